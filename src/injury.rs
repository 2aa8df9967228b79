use chrono::NaiveDate;

use crate::form::{FormError, non_empty};

pub const INJURY_KINDS: [&str; 7] = [
    "Muscle Strain",
    "Sprain",
    "Fracture",
    "Bruise",
    "Cut",
    "Overuse",
    "Other",
];

pub const BODY_PARTS: [&str; 17] = [
    "Head", "Neck", "Shoulder", "Arm", "Elbow", "Wrist", "Hand", "Back", "Chest", "Ribs", "Hip",
    "Thigh", "Hamstring", "Knee", "Calf", "Ankle", "Foot",
];

/// Step applied by the "+25%" action.
pub const PROGRESS_STEP: u8 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Moderate, Severity::Severe];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjuryStatus {
    Active,
    Recovering,
    Recovered,
}

impl InjuryStatus {
    /// Status is a pure function of progress.
    pub fn from_progress(progress: u8) -> Self {
        if progress >= 100 {
            InjuryStatus::Recovered
        } else if progress > 0 {
            InjuryStatus::Recovering
        } else {
            InjuryStatus::Active
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InjuryStatus::Active => "Active",
            InjuryStatus::Recovering => "Recovering",
            InjuryStatus::Recovered => "Recovered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injury {
    pub id: u64,
    pub kind: String,
    pub body_part: String,
    pub severity: Severity,
    pub date: NaiveDate,
    pub expected_recovery_days: u32,
    pub description: String,
    pub status: InjuryStatus,
    pub recovery_progress: u8,
}

impl Injury {
    pub fn title(&self) -> String {
        format!("{} - {}", self.kind, self.body_part)
    }

    pub fn date_label(&self) -> String {
        self.date.format("%b %d, %Y").to_string()
    }

    fn set_progress(&mut self, percent: u8) {
        self.recovery_progress = percent.min(100);
        self.status = InjuryStatus::from_progress(self.recovery_progress);
    }
}

/// Form contents for a new injury. Text fields mirror what the user typed or picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjuryDraft {
    pub kind: String,
    pub body_part: String,
    pub severity: Option<Severity>,
    pub date: Option<NaiveDate>,
    pub expected_recovery: String,
    pub description: String,
}

impl InjuryDraft {
    pub fn cycle_kind(&mut self) {
        self.kind = cycle_str(&INJURY_KINDS, &self.kind).to_string();
    }

    pub fn cycle_body_part(&mut self) {
        self.body_part = cycle_str(&BODY_PARTS, &self.body_part).to_string();
    }

    pub fn cycle_severity(&mut self) {
        self.severity = match self.severity {
            None => Some(Severity::Minor),
            Some(Severity::Minor) => Some(Severity::Moderate),
            Some(Severity::Moderate) => Some(Severity::Severe),
            Some(Severity::Severe) => Some(Severity::Minor),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjurySummary {
    pub recovered: usize,
    pub active: usize,
    pub average_recovery: u8,
}

#[derive(Debug, Clone)]
pub struct InjuryLog {
    injuries: Vec<Injury>,
    next_id: u64,
}

impl Default for InjuryLog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl InjuryLog {
    pub fn empty() -> Self {
        Self {
            injuries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn seeded() -> Self {
        let injuries = seed_injuries();
        let next_id = injuries.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Self { injuries, next_id }
    }

    pub fn all(&self) -> &[Injury] {
        &self.injuries
    }

    pub fn get(&self, id: u64) -> Option<&Injury> {
        self.injuries.iter().find(|i| i.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.injuries.is_empty()
    }

    /// Records a new injury at the head of the list. Returns the new id.
    pub fn add(&mut self, draft: &InjuryDraft, today: NaiveDate) -> Result<u64, FormError> {
        let (Some(kind), Some(body_part), Some(severity), Some(expected)) = (
            non_empty(&draft.kind),
            non_empty(&draft.body_part),
            draft.severity,
            non_empty(&draft.expected_recovery).and_then(parse_days),
        ) else {
            return Err(FormError::MissingInjuryFields);
        };

        let id = self.next_id;
        self.next_id += 1;
        self.injuries.insert(
            0,
            Injury {
                id,
                kind: kind.to_string(),
                body_part: body_part.to_string(),
                severity,
                date: draft.date.unwrap_or(today),
                expected_recovery_days: expected,
                description: draft.description.trim().to_string(),
                status: InjuryStatus::Active,
                recovery_progress: 0,
            },
        );
        Ok(id)
    }

    /// Sets progress (capped at 100) and re-derives status. False if `id` is unknown.
    pub fn update_progress(&mut self, id: u64, percent: u8) -> bool {
        match self.injuries.iter_mut().find(|i| i.id == id) {
            Some(injury) => {
                injury.set_progress(percent);
                true
            }
            None => false,
        }
    }

    pub fn bump_progress(&mut self, id: u64) -> bool {
        let Some(current) = self.get(id).map(|i| i.recovery_progress) else {
            return false;
        };
        self.update_progress(id, current.saturating_add(PROGRESS_STEP).min(100))
    }

    pub fn mark_recovered(&mut self, id: u64) -> bool {
        self.update_progress(id, 100)
    }

    pub fn active(&self) -> Vec<&Injury> {
        self.injuries
            .iter()
            .filter(|i| i.status != InjuryStatus::Recovered)
            .collect()
    }

    pub fn recovered(&self) -> Vec<&Injury> {
        self.injuries
            .iter()
            .filter(|i| i.status == InjuryStatus::Recovered)
            .collect()
    }

    pub fn summary(&self) -> InjurySummary {
        let active = self.active();
        let average_recovery = if active.is_empty() {
            100
        } else {
            let total: u32 = active.iter().map(|i| u32::from(i.recovery_progress)).sum();
            (f64::from(total) / active.len() as f64).round() as u8
        };
        InjurySummary {
            recovered: self.injuries.len() - active.len(),
            active: active.len(),
            average_recovery,
        }
    }
}

pub fn seed_injuries() -> Vec<Injury> {
    vec![
        Injury {
            id: 1,
            kind: "Muscle Strain".to_string(),
            body_part: "Hamstring".to_string(),
            severity: Severity::Moderate,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default(),
            expected_recovery_days: 14,
            description: "Pulled hamstring during sprint training".to_string(),
            status: InjuryStatus::Recovering,
            recovery_progress: 75,
        },
        Injury {
            id: 2,
            kind: "Sprain".to_string(),
            body_part: "Ankle".to_string(),
            severity: Severity::Minor,
            date: NaiveDate::from_ymd_opt(2023, 12, 20).unwrap_or_default(),
            expected_recovery_days: 7,
            description: "Minor ankle sprain from landing awkwardly".to_string(),
            status: InjuryStatus::Recovered,
            recovery_progress: 100,
        },
    ]
}

fn parse_days(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|days| *days > 0)
}

fn cycle_str(all: &[&'static str], current: &str) -> &'static str {
    match all.iter().position(|v| *v == current) {
        Some(idx) => all[(idx + 1) % all.len()],
        None => all[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_progress() {
        assert_eq!(InjuryStatus::from_progress(0), InjuryStatus::Active);
        assert_eq!(InjuryStatus::from_progress(1), InjuryStatus::Recovering);
        assert_eq!(InjuryStatus::from_progress(99), InjuryStatus::Recovering);
        assert_eq!(InjuryStatus::from_progress(100), InjuryStatus::Recovered);
    }

    #[test]
    fn bump_caps_at_one_hundred() {
        let mut log = InjuryLog::seeded();
        assert!(log.bump_progress(1));
        let injury = log.get(1).expect("seed injury");
        assert_eq!(injury.recovery_progress, 100);
        assert_eq!(injury.status, InjuryStatus::Recovered);
    }

    #[test]
    fn seed_list_has_one_active_one_recovered() {
        let summary = InjuryLog::seeded().summary();
        assert_eq!(summary.active, 1);
        assert_eq!(summary.recovered, 1);
        assert_eq!(summary.average_recovery, 75);
    }
}
