use std::path::{Path, PathBuf};

use crate::form::FormError;
use crate::report::AnalysisReport;

pub const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mov", "avi", "mkv", "webm", "m4v"];

pub const UPLOAD_SUCCESS: &str = "Upload successful!";
pub const UPLOAD_UNSUCCESSFUL: &str = "Upload failed: Analysis unsuccessful";
pub const UPLOAD_NETWORK_ERROR: &str = "Upload failed: Network or server error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillCategory {
    Shooting,
    Dribbling,
    Passing,
    Defending,
    Fitness,
}

impl DrillCategory {
    pub const ALL: [DrillCategory; 5] = [
        DrillCategory::Shooting,
        DrillCategory::Dribbling,
        DrillCategory::Passing,
        DrillCategory::Defending,
        DrillCategory::Fitness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DrillCategory::Shooting => "Shooting",
            DrillCategory::Dribbling => "Dribbling",
            DrillCategory::Passing => "Passing",
            DrillCategory::Defending => "Defending",
            DrillCategory::Fitness => "Fitness",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Professional,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Professional => "Professional",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillMeta {
    pub title: Option<String>,
    pub category: Option<DrillCategory>,
    pub difficulty: Option<Difficulty>,
}

/// A validated upload, ready to hand to a `DrillApi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillSubmission {
    pub path: PathBuf,
    pub file_name: String,
    pub meta: DrillMeta,
}

#[derive(Debug, Clone, Default)]
pub struct UploadState {
    pub file: Option<PathBuf>,
    pub meta: DrillMeta,
    pub busy: bool,
    pub result: Option<AnalysisReport>,
    pub message: Option<String>,
    pub result_scroll: u16,
    /// Request id of the analysis in flight, if any.
    pub pending: Option<u64>,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, raw: &str) {
        let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'');
        self.file = if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        };
    }

    pub fn cycle_category(&mut self) {
        self.meta.category = cycle(&DrillCategory::ALL, self.meta.category);
    }

    pub fn cycle_difficulty(&mut self) {
        self.meta.difficulty = cycle(&Difficulty::ALL, self.meta.difficulty);
    }

    /// Validates the selection and marks the upload busy. Nothing is sent on `Err`.
    pub fn prepare_submission(&mut self) -> Result<DrillSubmission, FormError> {
        if self.busy {
            return Err(FormError::UploadInProgress);
        }
        let Some(path) = self.file.clone() else {
            return Err(FormError::NoVideoSelected);
        };
        if !is_video_path(&path) {
            return Err(FormError::UnsupportedVideo);
        }
        if !path.is_file() {
            return Err(FormError::VideoNotFound);
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut meta = self.meta.clone();
        meta.title = meta
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        self.busy = true;
        self.message = None;
        Ok(DrillSubmission {
            path,
            file_name,
            meta,
        })
    }

    pub fn finish(&mut self, outcome: UploadOutcome) {
        self.busy = false;
        self.pending = None;
        match outcome {
            UploadOutcome::Analyzed(report) => {
                self.result = Some(*report);
                self.result_scroll = 0;
                self.file = None;
                self.meta = DrillMeta::default();
                self.message = Some(UPLOAD_SUCCESS.to_string());
            }
            UploadOutcome::Unsuccessful => {
                self.message = Some(UPLOAD_UNSUCCESSFUL.to_string());
            }
            UploadOutcome::Failed => {
                self.message = Some(UPLOAD_NETWORK_ERROR.to_string());
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum UploadOutcome {
    Analyzed(Box<AnalysisReport>),
    Unsuccessful,
    Failed,
}

pub fn is_video_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|v| *v == value)?;
            all.get(idx + 1).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_category_ends_back_at_none() {
        let mut state = UploadState::new();
        for expected in DrillCategory::ALL {
            state.cycle_category();
            assert_eq!(state.meta.category, Some(expected));
        }
        state.cycle_category();
        assert_eq!(state.meta.category, None);
    }

    #[test]
    fn video_extensions_are_case_insensitive() {
        assert!(is_video_path(Path::new("drill.MP4")));
        assert!(!is_video_path(Path::new("notes.txt")));
        assert!(!is_video_path(Path::new("noext")));
    }
}
