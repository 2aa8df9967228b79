use chrono::NaiveDate;

use drill_terminal::form::FormError;
use drill_terminal::injury::{InjuryDraft, InjuryLog, InjuryStatus, Severity};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date")
}

fn ankle_sprain() -> InjuryDraft {
    InjuryDraft {
        kind: "Sprain".to_string(),
        body_part: "Ankle".to_string(),
        severity: Some(Severity::Minor),
        date: None,
        expected_recovery: "7".to_string(),
        description: String::new(),
    }
}

#[test]
fn progress_drives_status() {
    let mut log = InjuryLog::seeded();

    assert!(log.update_progress(1, 100));
    assert_eq!(log.get(1).map(|i| i.status), Some(InjuryStatus::Recovered));

    assert!(log.update_progress(1, 0));
    assert_eq!(log.get(1).map(|i| i.status), Some(InjuryStatus::Active));

    assert!(log.update_progress(1, 40));
    assert_eq!(log.get(1).map(|i| i.status), Some(InjuryStatus::Recovering));

    assert!(!log.update_progress(99, 50));
}

#[test]
fn progress_above_full_is_capped() {
    let mut log = InjuryLog::empty();
    let id = log.add(&ankle_sprain(), today()).expect("valid draft");

    assert!(log.update_progress(id, 150));
    let injury = log.get(id).expect("injury still listed");
    assert_eq!(injury.recovery_progress, 100);
    assert_eq!(injury.status, InjuryStatus::Recovered);

    assert!(log.update_progress(id, u8::MAX));
    assert_eq!(log.get(id).map(|i| i.recovery_progress), Some(100));
    assert_eq!(log.summary().recovered, 1);
}

#[test]
fn average_recovery_is_full_without_active_injuries() {
    let mut log = InjuryLog::seeded();
    log.mark_recovered(1);

    let summary = log.summary();
    assert_eq!(summary.active, 0);
    assert_eq!(summary.recovered, 2);
    assert_eq!(summary.average_recovery, 100);

    assert_eq!(InjuryLog::empty().summary().average_recovery, 100);
}

#[test]
fn average_recovery_is_mean_of_active() {
    let mut log = InjuryLog::seeded();
    let id = log.add(&ankle_sprain(), today()).expect("valid draft");
    log.update_progress(id, 25);

    let summary = log.summary();
    assert_eq!(summary.active, 2);
    assert_eq!(summary.average_recovery, 50);
}

#[test]
fn new_injury_lands_at_head_of_active_list() {
    let mut log = InjuryLog::seeded();
    let id = log.add(&ankle_sprain(), today()).expect("valid draft");

    let active = log.active();
    let head = active.first().expect("active injury");
    assert_eq!(head.id, id);
    assert_eq!(head.title(), "Sprain - Ankle");
    assert_eq!(head.severity, Severity::Minor);
    assert_eq!(head.status, InjuryStatus::Active);
    assert_eq!(head.recovery_progress, 0);
    assert_eq!(head.expected_recovery_days, 7);
    assert_eq!(head.date, today());
    assert!(head.description.is_empty());
}

#[test]
fn incomplete_draft_is_rejected() {
    let mut log = InjuryLog::seeded();
    let before = log.all().len();

    let mut draft = ankle_sprain();
    draft.severity = None;
    assert_eq!(log.add(&draft, today()), Err(FormError::MissingInjuryFields));

    let mut draft = ankle_sprain();
    draft.expected_recovery = "soon".to_string();
    assert_eq!(log.add(&draft, today()), Err(FormError::MissingInjuryFields));

    let mut draft = ankle_sprain();
    draft.body_part = "  ".to_string();
    assert_eq!(log.add(&draft, today()), Err(FormError::MissingInjuryFields));

    assert_eq!(log.all().len(), before);
}

#[test]
fn bump_steps_by_quarter_until_recovered() {
    let mut log = InjuryLog::empty();
    let id = log.add(&ankle_sprain(), today()).expect("valid draft");

    for expected in [25, 50, 75, 100] {
        assert!(log.bump_progress(id));
        assert_eq!(log.get(id).map(|i| i.recovery_progress), Some(expected));
    }
    assert!(log.bump_progress(id));
    assert_eq!(log.get(id).map(|i| i.recovery_progress), Some(100));
    assert!(log.active().is_empty());
    assert_eq!(log.recovered().len(), 1);
}

#[test]
fn draft_pick_lists_cycle() {
    let mut draft = InjuryDraft::default();
    draft.cycle_kind();
    assert_eq!(draft.kind, "Muscle Strain");
    draft.cycle_body_part();
    assert_eq!(draft.body_part, "Head");
    draft.cycle_severity();
    draft.cycle_severity();
    draft.cycle_severity();
    draft.cycle_severity();
    assert_eq!(draft.severity, Some(Severity::Minor));
}
