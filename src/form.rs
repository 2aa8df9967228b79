use std::fmt;

/// Local validation failures. They never mutate state and map to one fixed message each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingCredentials,
    MissingSignupFields,
    NoVideoSelected,
    UnsupportedVideo,
    VideoNotFound,
    UploadInProgress,
    MissingInjuryFields,
}

impl FormError {
    pub fn message(self) -> &'static str {
        match self {
            FormError::MissingCredentials => "Please enter your email and password.",
            FormError::MissingSignupFields => "Please check your information and try again.",
            FormError::NoVideoSelected => "Please select a video file to upload.",
            FormError::UnsupportedVideo => "Selected file is not a supported video.",
            FormError::VideoNotFound => "Selected video file could not be found.",
            FormError::UploadInProgress => "An upload is already in progress.",
            FormError::MissingInjuryFields => "Please fill in all required fields.",
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FormError {}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
