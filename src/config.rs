use std::env;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Http,
    Mock,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_mode: ApiMode,
    pub api_base: String,
    pub analyze_timeout: Duration,
    pub mock_analyze_delay: Duration,
    pub leaderboard_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_mode: ApiMode::Http,
            api_base: DEFAULT_API_BASE.to_string(),
            analyze_timeout: Duration::from_secs(120),
            mock_analyze_delay: Duration::from_millis(3000),
            leaderboard_delay: Duration::from_millis(1000),
        }
    }
}

impl AppConfig {
    /// Reads settings from the process environment. Call after `load_dotenv`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_mode = match env::var("DRILL_API_MODE")
            .unwrap_or_default()
            .trim()
            .to_lowercase()
            .as_str()
        {
            "mock" | "fake" | "offline" => ApiMode::Mock,
            _ => defaults.api_mode,
        };
        let api_base = env::var("DRILL_API_BASE")
            .ok()
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or(defaults.api_base);
        let analyze_timeout_secs = env::var("ANALYZE_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(120)
            .clamp(10, 900);
        let mock_delay_ms = env::var("MOCK_ANALYZE_DELAY_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(3000)
            .min(60_000);
        let leaderboard_delay_ms = env::var("LEADERBOARD_DELAY_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(1000)
            .min(30_000);

        Self {
            api_mode,
            api_base,
            analyze_timeout: Duration::from_secs(analyze_timeout_secs),
            mock_analyze_delay: Duration::from_millis(mock_delay_ms),
            leaderboard_delay: Duration::from_millis(leaderboard_delay_ms),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

pub fn api_mode_label(mode: ApiMode) -> &'static str {
    match mode {
        ApiMode::Http => "LIVE",
        ApiMode::Mock => "MOCK",
    }
}
