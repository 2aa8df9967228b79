use crate::session::initials;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: String,
    pub score: u32,
    pub drills_completed: u32,
    pub improvement_percent: u32,
    pub rank: u32,
}

impl LeaderboardEntry {
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityStats {
    pub total_players: u32,
    pub drills_completed: u32,
    pub average_performance: f32,
}

pub const COMMUNITY_STATS: CommunityStats = CommunityStats {
    total_players: 247,
    drills_completed: 1524,
    average_performance: 92.3,
};

#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    pub entries: Vec<LeaderboardEntry>,
    pub loading: bool,
    pub loaded: bool,
    pub selected: usize,
    pub pending: Option<u64>,
}

impl LeaderboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a fetch should be issued: the board loads once per session.
    pub fn begin_load(&mut self) -> bool {
        if self.loading || self.loaded {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn finish_load(&mut self, mut entries: Vec<LeaderboardEntry>) {
        entries.sort_by_key(|e| e.rank);
        self.entries = entries;
        self.loading = false;
        self.pending = None;
        self.loaded = true;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn fail_load(&mut self) {
        self.loading = false;
        self.pending = None;
    }

    pub fn podium(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(3)]
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

pub fn rank_badge(rank: u32) -> String {
    match rank {
        1 => "GOLD".to_string(),
        2 => "SILVER".to_string(),
        3 => "BRONZE".to_string(),
        other => format!("#{other}"),
    }
}

pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn seed_leaderboard() -> Vec<LeaderboardEntry> {
    const SEED: [(&str, &str, &str, u32, u32, u32); 6] = [
        ("Alex Rodriguez", "Eagles FC", "Forward", 94, 45, 12),
        ("Sarah Johnson", "Lions United", "Midfielder", 91, 42, 8),
        ("Mike Chen", "Thunder FC", "Defender", 89, 38, 15),
        ("Emma Wilson", "Storm Athletic", "Goalkeeper", 87, 35, 6),
        ("John Doe", "Eagles FC", "Forward", 85, 33, 10),
        ("Lisa Brown", "Hawks FC", "Midfielder", 82, 30, 5),
    ];
    SEED.iter()
        .enumerate()
        .map(
            |(idx, (name, team, position, score, drills, improvement))| LeaderboardEntry {
                id: (idx + 1).to_string(),
                name: name.to_string(),
                team: team.to_string(),
                position: position.to_string(),
                score: *score,
                drills_completed: *drills,
                improvement_percent: *improvement,
                rank: idx as u32 + 1,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(1524), "1,524");
        assert_eq!(format_thousands(247), "247");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
    }
}
