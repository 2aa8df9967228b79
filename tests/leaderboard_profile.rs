mod common;

use drill_terminal::leaderboard::{COMMUNITY_STATS, LeaderboardView, rank_badge, seed_leaderboard};
use drill_terminal::profile::{ProfileField, ProfileView, ProgressTone, progress_tone};

use common::sample_user;

#[test]
fn leaderboard_sorts_by_rank_and_exposes_podium() {
    let mut view = LeaderboardView::new();
    assert!(view.begin_load());
    assert!(!view.begin_load());

    let mut entries = seed_leaderboard();
    entries.reverse();
    view.finish_load(entries);

    let ranks = view.entries.iter().map(|e| e.rank).collect::<Vec<_>>();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    let podium = view
        .podium()
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(podium, vec!["Alex Rodriguez", "Sarah Johnson", "Mike Chen"]);
    assert_eq!(view.entries[0].initials(), "AR");
    assert!(!view.begin_load());
}

#[test]
fn failed_load_can_retry() {
    let mut view = LeaderboardView::new();
    assert!(view.begin_load());
    view.fail_load();
    assert!(view.begin_load());
}

#[test]
fn selection_stays_in_bounds() {
    let mut view = LeaderboardView::new();
    view.select_next();
    assert_eq!(view.selected, 0);

    view.finish_load(seed_leaderboard());
    for _ in 0..10 {
        view.select_next();
    }
    assert_eq!(view.selected, 5);
    view.select_prev();
    assert_eq!(view.selected, 4);
}

#[test]
fn podium_badges_and_community_totals() {
    assert_eq!(rank_badge(1), "GOLD");
    assert_eq!(rank_badge(3), "BRONZE");
    assert_eq!(rank_badge(4), "#4");
    assert_eq!(COMMUNITY_STATS.total_players, 247);
    assert_eq!(COMMUNITY_STATS.drills_completed, 1524);
    let copy = COMMUNITY_STATS;
    assert_eq!(copy, COMMUNITY_STATS);
    assert!((copy.average_performance - 92.3).abs() < 1e-4);
}

#[test]
fn profile_seeds_from_user_and_saves_locally() {
    let user = sample_user();
    let mut view = ProfileView::for_user(Some(&user));
    assert_eq!(view.draft.name, "John Doe");
    assert_eq!(view.draft.position, "Forward");

    assert!(view.focused_text_mut().is_none());
    assert!(!view.toggle_edit());
    assert!(view.editing);

    if let Some(name) = view.focused_text_mut() {
        name.push_str(" Jr ");
    }
    view.next_field();
    assert_eq!(view.focus, ProfileField::Position);
    view.cycle_position();
    assert_eq!(view.draft.position, "Striker");

    assert!(view.toggle_edit());
    assert!(!view.editing);
    assert_eq!(view.draft.name, "John Doe Jr");
}

#[test]
fn seeded_profile_content() {
    let view = ProfileView::default();
    assert_eq!(view.stats.drills_completed, 33);
    assert_eq!(view.stats.rank, 5);
    assert_eq!(view.recent.len(), 3);
    assert_eq!(view.categories.len(), 5);
}

#[test]
fn progress_tone_thresholds() {
    assert_eq!(progress_tone(85), ProgressTone::Strong);
    assert_eq!(progress_tone(80), ProgressTone::Strong);
    assert_eq!(progress_tone(72), ProgressTone::Fair);
    assert_eq!(progress_tone(59), ProgressTone::Weak);
}
