use crate::session::{User, next_position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub drills_completed: u32,
    pub average_score: u32,
    pub best_category: String,
    pub days_active: u32,
    pub total_hours: u32,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentDrill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub score: u32,
    pub date: String,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProgress {
    pub name: String,
    pub progress: u8,
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTone {
    Strong,
    Fair,
    Weak,
}

pub fn progress_tone(progress: u8) -> ProgressTone {
    if progress >= 80 {
        ProgressTone::Strong
    } else if progress >= 60 {
        ProgressTone::Fair
    } else {
        ProgressTone::Weak
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Position,
    Team,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub position: String,
    pub team: String,
}

#[derive(Debug, Clone)]
pub struct ProfileView {
    pub editing: bool,
    pub draft: ProfileDraft,
    pub focus: ProfileField,
    pub stats: PlayerStats,
    pub recent: Vec<RecentDrill>,
    pub categories: Vec<CategoryProgress>,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            editing: false,
            draft: ProfileDraft::default(),
            focus: ProfileField::Name,
            stats: seed_stats(),
            recent: seed_recent_drills(),
            categories: seed_categories(),
        }
    }
}

impl ProfileView {
    pub fn for_user(user: Option<&User>) -> Self {
        let mut view = Self::default();
        if let Some(user) = user {
            view.draft = ProfileDraft {
                name: user.name.clone(),
                position: user.position.clone(),
                team: user.team.clone(),
            };
        }
        view
    }

    /// Enters edit mode, or saves and leaves it. Returns true when a save happened.
    /// Saving stays local to this view.
    pub fn toggle_edit(&mut self) -> bool {
        if self.editing {
            self.draft.name = self.draft.name.trim().to_string();
            self.draft.team = self.draft.team.trim().to_string();
            self.editing = false;
            true
        } else {
            self.editing = true;
            self.focus = ProfileField::Name;
            false
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ProfileField::Name => ProfileField::Position,
            ProfileField::Position => ProfileField::Team,
            ProfileField::Team => ProfileField::Name,
        };
    }

    pub fn cycle_position(&mut self) {
        if self.editing {
            self.draft.position = next_position(&self.draft.position).to_string();
        }
    }

    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        if !self.editing {
            return None;
        }
        match self.focus {
            ProfileField::Name => Some(&mut self.draft.name),
            ProfileField::Team => Some(&mut self.draft.team),
            ProfileField::Position => None,
        }
    }
}

pub fn seed_stats() -> PlayerStats {
    PlayerStats {
        drills_completed: 33,
        average_score: 85,
        best_category: "Shooting".to_string(),
        days_active: 45,
        total_hours: 67,
        rank: 5,
    }
}

pub fn seed_recent_drills() -> Vec<RecentDrill> {
    const SEED: [(&str, &str, u32, &str, &str); 3] = [
        ("Speed Shooting", "Shooting", 92, "2024-01-10", "Advanced"),
        ("Ball Control", "Dribbling", 78, "2024-01-09", "Intermediate"),
        ("Passing Accuracy", "Passing", 88, "2024-01-08", "Advanced"),
    ];
    SEED.iter()
        .enumerate()
        .map(|(idx, (name, category, score, date, difficulty))| RecentDrill {
            id: (idx + 1).to_string(),
            name: name.to_string(),
            category: category.to_string(),
            score: *score,
            date: date.to_string(),
            difficulty: difficulty.to_string(),
        })
        .collect()
}

pub fn seed_categories() -> Vec<CategoryProgress> {
    [
        ("Shooting", 85, "Advanced"),
        ("Dribbling", 72, "Intermediate"),
        ("Passing", 90, "Advanced"),
        ("Defending", 65, "Intermediate"),
        ("Fitness", 78, "Intermediate"),
    ]
    .into_iter()
    .map(|(name, progress, level)| CategoryProgress {
        name: name.to_string(),
        progress,
        level: level.to_string(),
    })
    .collect()
}
