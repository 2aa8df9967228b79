use std::sync::Arc;

use anyhow::Result;

use crate::config::{ApiMode, AppConfig};
use crate::http_api::HttpDrillApi;
use crate::leaderboard::{LeaderboardEntry, seed_leaderboard};
use crate::mock_api::MockDrillApi;
use crate::report::AnalysisReport;
use crate::session::{Credentials, Registration, User};
use crate::upload::DrillSubmission;

/// The remote side of the app. One implementation talks HTTP, one fabricates data;
/// everything above this trait is shared.
pub trait DrillApi: Send + Sync {
    fn login(&self, creds: &Credentials) -> Result<User>;

    fn register(&self, registration: &Registration) -> Result<User>;

    /// `Ok(None)` means the service answered but produced no analysis.
    fn analyze(&self, drill: &DrillSubmission) -> Result<Option<AnalysisReport>>;

    // No leaderboard endpoint exists yet; both clients serve the seed table.
    fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(seed_leaderboard())
    }
}

pub fn build_api(config: &AppConfig) -> Arc<dyn DrillApi> {
    match config.api_mode {
        ApiMode::Http => Arc::new(HttpDrillApi::new(config.clone())),
        ApiMode::Mock => Arc::new(MockDrillApi::new(config.mock_analyze_delay)),
    }
}
