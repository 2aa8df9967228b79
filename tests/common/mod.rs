#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};

use drill_terminal::remote::DrillApi;
use drill_terminal::report::AnalysisReport;
use drill_terminal::session::{Credentials, Registration, User};
use drill_terminal::upload::DrillSubmission;

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Writes a throwaway file with a video extension so upload validation passes.
pub fn temp_video(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("drill_terminal_{}_{name}", std::process::id()));
    fs::write(&path, b"not really a video").expect("temp file should be writable");
    path
}

/// Counts every remote call; `accept` decides whether login and register succeed.
#[derive(Default)]
pub struct FakeApi {
    pub accept: bool,
    pub logins: AtomicUsize,
    pub registers: AtomicUsize,
    pub analyses: AtomicUsize,
}

impl FakeApi {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            ..Self::default()
        }
    }

    pub fn rejecting() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
            + self.registers.load(Ordering::SeqCst)
            + self.analyses.load(Ordering::SeqCst)
    }
}

impl DrillApi for FakeApi {
    fn login(&self, creds: &Credentials) -> Result<User> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if !self.accept {
            bail!("http 401: invalid credentials");
        }
        Ok(User::from_email(&creds.email))
    }

    fn register(&self, registration: &Registration) -> Result<User> {
        self.registers.fetch_add(1, Ordering::SeqCst);
        if !self.accept {
            bail!("http 400: email taken");
        }
        Ok(User {
            id: "7".to_string(),
            name: registration.name.clone(),
            email: registration.email.clone(),
            position: registration.position.clone(),
            team: registration.team.clone(),
        })
    }

    fn analyze(&self, _drill: &DrillSubmission) -> Result<Option<AnalysisReport>> {
        self.analyses.fetch_add(1, Ordering::SeqCst);
        Ok(Some(AnalysisReport::default()))
    }
}

pub fn sample_user() -> User {
    User {
        id: "1".to_string(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        position: "Forward".to_string(),
        team: "Eagles FC".to_string(),
    }
}
