use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::remote::DrillApi;
use crate::state::{AuthMode, Delta, ProviderCommand};
use crate::upload::UploadOutcome;

/// Runs remote calls off the UI thread. Each command gets its own worker so a
/// slow analysis never holds up a sign-in or a leaderboard load; results come
/// back as deltas and the UI thread stays the only writer of app state.
pub fn spawn_provider(
    api: Arc<dyn DrillApi>,
    leaderboard_delay: Duration,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let api = api.clone();
            let tx = tx.clone();
            thread::spawn(move || run_command(api.as_ref(), cmd, leaderboard_delay, &tx));
        }
    });
}

fn run_command(
    api: &dyn DrillApi,
    cmd: ProviderCommand,
    leaderboard_delay: Duration,
    tx: &Sender<Delta>,
) {
    match cmd {
        ProviderCommand::Login(creds) => {
            let delta = match api.login(&creds) {
                Ok(user) => Delta::SignedIn {
                    mode: AuthMode::Login,
                    user,
                },
                Err(err) => Delta::AuthFailed {
                    mode: AuthMode::Login,
                    reason: format!("{err:#}"),
                },
            };
            let _ = tx.send(delta);
        }
        ProviderCommand::Register(registration) => {
            let delta = match api.register(&registration) {
                Ok(user) => Delta::SignedIn {
                    mode: AuthMode::Signup,
                    user,
                },
                Err(err) => Delta::AuthFailed {
                    mode: AuthMode::Signup,
                    reason: format!("{err:#}"),
                },
            };
            let _ = tx.send(delta);
        }
        ProviderCommand::Analyze {
            request,
            submission,
        } => {
            let outcome = match api.analyze(&submission) {
                Ok(Some(report)) => UploadOutcome::Analyzed(Box::new(report)),
                Ok(None) => UploadOutcome::Unsuccessful,
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Analysis error: {err:#}")));
                    UploadOutcome::Failed
                }
            };
            let _ = tx.send(Delta::AnalysisFinished { request, outcome });
        }
        ProviderCommand::FetchLeaderboard { request } => {
            if !leaderboard_delay.is_zero() {
                thread::sleep(leaderboard_delay);
            }
            let delta = match api.leaderboard() {
                Ok(entries) => Delta::LeaderboardLoaded { request, entries },
                Err(err) => Delta::LeaderboardFailed {
                    request,
                    reason: format!("{err:#}"),
                },
            };
            let _ = tx.send(delta);
        }
    }
}
