mod common;

use std::fs;

use drill_terminal::form::FormError;
use drill_terminal::remote::DrillApi;
use drill_terminal::report::AnalysisReport;
use drill_terminal::upload::{
    Difficulty, DrillCategory, UPLOAD_NETWORK_ERROR, UPLOAD_SUCCESS, UPLOAD_UNSUCCESSFUL,
    UploadOutcome, UploadState,
};

use common::{FakeApi, temp_video};

/// Mirrors the submit path: nothing reaches the API unless validation passes.
fn submit(upload: &mut UploadState, api: &FakeApi) -> Result<(), FormError> {
    let submission = upload.prepare_submission()?;
    let _ = api.analyze(&submission);
    Ok(())
}

#[test]
fn no_file_means_no_network_call() {
    let api = FakeApi::accepting();
    let mut upload = UploadState::new();
    upload.select_file("   ");

    assert_eq!(submit(&mut upload, &api), Err(FormError::NoVideoSelected));
    assert_eq!(api.calls(), 0);
    assert!(!upload.busy);
}

#[test]
fn non_video_and_missing_files_are_rejected() {
    let api = FakeApi::accepting();
    let mut upload = UploadState::new();

    upload.select_file("notes.txt");
    assert_eq!(submit(&mut upload, &api), Err(FormError::UnsupportedVideo));

    upload.select_file("/definitely/not/here/drill.mp4");
    assert_eq!(submit(&mut upload, &api), Err(FormError::VideoNotFound));

    assert_eq!(api.calls(), 0);
}

#[test]
fn valid_selection_is_submitted_once() {
    let path = temp_video("shot.MP4");
    let api = FakeApi::accepting();
    let mut upload = UploadState::new();
    upload.select_file(&format!("\"{}\"", path.display()));
    upload.meta.title = Some("  Penalty practice ".to_string());
    upload.cycle_category();
    upload.cycle_difficulty();
    upload.cycle_difficulty();

    let submission = upload.prepare_submission().expect("valid submission");
    assert!(upload.busy);
    assert_eq!(submission.path, path);
    assert_eq!(submission.meta.title.as_deref(), Some("Penalty practice"));
    assert_eq!(submission.meta.category, Some(DrillCategory::Shooting));
    assert_eq!(submission.meta.difficulty, Some(Difficulty::Intermediate));

    assert_eq!(
        upload.prepare_submission(),
        Err(FormError::UploadInProgress)
    );
    assert_eq!(api.calls(), 0);

    let _ = fs::remove_file(path);
}

#[test]
fn outcomes_set_messages_and_release_busy() {
    let path = temp_video("sprint.mov");
    let mut upload = UploadState::new();
    upload.select_file(&path.display().to_string());

    upload.prepare_submission().expect("valid submission");
    upload.finish(UploadOutcome::Failed);
    assert!(!upload.busy);
    assert_eq!(upload.message.as_deref(), Some(UPLOAD_NETWORK_ERROR));
    assert!(upload.file.is_some());

    upload.prepare_submission().expect("valid submission");
    upload.finish(UploadOutcome::Unsuccessful);
    assert_eq!(upload.message.as_deref(), Some(UPLOAD_UNSUCCESSFUL));
    assert!(upload.result.is_none());

    upload.prepare_submission().expect("valid submission");
    upload.finish(UploadOutcome::Analyzed(Box::new(AnalysisReport::default())));
    assert_eq!(upload.message.as_deref(), Some(UPLOAD_SUCCESS));
    assert!(upload.result.is_some());
    assert!(upload.file.is_none());
    assert!(!upload.busy);

    let _ = fs::remove_file(path);
}

#[test]
fn labels_parse_case_insensitively() {
    assert_eq!(DrillCategory::parse("fitness"), Some(DrillCategory::Fitness));
    assert_eq!(Difficulty::parse("PROFESSIONAL"), Some(Difficulty::Professional));
    assert_eq!(Difficulty::parse("expert"), None);
}
