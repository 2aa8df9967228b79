use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::injury::{InjuryDraft, InjuryLog};
use crate::leaderboard::{LeaderboardEntry, LeaderboardView};
use crate::profile::ProfileView;
use crate::session::{
    Credentials, LoginForm, Registration, SessionStore, SignupForm, User,
};
use crate::upload::{DrillSubmission, UploadOutcome, UploadState};

const MAX_LOGS: usize = 200;

/// Tags a provider command so its result can be matched to the request that is still pending.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// What the top level renders. Derived from the session, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Drills,
    Leaderboard,
    Profile,
    Health,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Drills,
        DashboardTab::Leaderboard,
        DashboardTab::Profile,
        DashboardTab::Health,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Password,
    Position,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillField {
    File,
    Title,
    Category,
    Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjuryField {
    Kind,
    BodyPart,
    Severity,
    ExpectedRecovery,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub title: String,
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub auth_mode: AuthMode,
    pub auth_busy: bool,
    pub login_form: LoginForm,
    pub login_focus: LoginField,
    pub signup_form: SignupForm,
    pub signup_focus: SignupField,
    pub tab: DashboardTab,
    pub upload: UploadState,
    pub drill_focus: DrillField,
    pub drill_file_input: String,
    pub drill_title_input: String,
    pub leaderboard: LeaderboardView,
    pub profile: ProfileView,
    pub injuries: InjuryLog,
    pub injury_form: Option<InjuryDraft>,
    pub injury_focus: InjuryField,
    pub injury_selected: usize,
    pub status: Option<StatusLine>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    next_request: RequestId,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionStore::new(),
            auth_mode: AuthMode::Login,
            auth_busy: false,
            login_form: LoginForm::default(),
            login_focus: LoginField::Email,
            signup_form: SignupForm::default(),
            signup_focus: SignupField::Name,
            tab: DashboardTab::Drills,
            upload: UploadState::new(),
            drill_focus: DrillField::File,
            drill_file_input: String::new(),
            drill_title_input: String::new(),
            leaderboard: LeaderboardView::new(),
            profile: ProfileView::default(),
            injuries: InjuryLog::seeded(),
            injury_form: None,
            injury_focus: InjuryField::Kind,
            injury_selected: 0,
            status: None,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            next_request: 1,
        }
    }

    pub fn page(&self) -> Page {
        if self.session.is_authenticated() {
            return Page::Dashboard;
        }
        match self.auth_mode {
            AuthMode::Login => Page::Login,
            AuthMode::Signup => Page::Signup,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn notify(&mut self, title: &str, text: &str) {
        self.status = Some(StatusLine {
            title: title.to_string(),
            text: text.to_string(),
            kind: StatusKind::Info,
        });
    }

    pub fn notify_error(&mut self, title: &str, text: &str) {
        self.status = Some(StatusLine {
            title: title.to_string(),
            text: text.to_string(),
            kind: StatusKind::Error,
        });
    }

    pub fn toggle_auth_mode(&mut self) {
        if self.auth_busy {
            return;
        }
        self.auth_mode = match self.auth_mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.status = None;
    }

    pub fn next_auth_field(&mut self) {
        match self.auth_mode {
            AuthMode::Login => {
                self.login_focus = match self.login_focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            AuthMode::Signup => {
                self.signup_focus = match self.signup_focus {
                    SignupField::Name => SignupField::Email,
                    SignupField::Email => SignupField::Password,
                    SignupField::Password => SignupField::Position,
                    SignupField::Position => SignupField::Team,
                    SignupField::Team => SignupField::Name,
                };
            }
        }
    }

    /// Validates the login form and hands back the command to send. `None` means
    /// nothing goes over the wire.
    pub fn submit_login(&mut self) -> Option<ProviderCommand> {
        if self.auth_busy {
            return None;
        }
        match self.login_form.validate() {
            Ok(creds) => {
                self.auth_busy = true;
                self.status = None;
                self.push_log(format!("[INFO] Signing in {}", creds.email));
                Some(ProviderCommand::Login(creds))
            }
            Err(err) => {
                self.notify_error("Login Failed", err.message());
                None
            }
        }
    }

    pub fn submit_signup(&mut self) -> Option<ProviderCommand> {
        if self.auth_busy {
            return None;
        }
        match self.signup_form.validate() {
            Ok(registration) => {
                self.auth_busy = true;
                self.status = None;
                self.push_log(format!("[INFO] Creating account {}", registration.email));
                Some(ProviderCommand::Register(registration))
            }
            Err(err) => {
                self.notify_error("Signup Failed", err.message());
                None
            }
        }
    }

    /// Clears the identity and every dashboard view; nothing outlives the session.
    pub fn logout(&mut self) {
        let was_signed_in = self.session.is_authenticated();
        self.session.logout();
        self.auth_busy = false;
        self.auth_mode = AuthMode::Login;
        self.login_form.password.clear();
        self.signup_form = SignupForm::default();
        self.reset_dashboard();
        if was_signed_in {
            self.push_log("[INFO] Signed out");
            self.notify("Signed Out", "See you at the next session.");
        }
    }

    fn reset_dashboard(&mut self) {
        self.tab = DashboardTab::Drills;
        self.upload = UploadState::new();
        self.drill_focus = DrillField::File;
        self.drill_file_input.clear();
        self.drill_title_input.clear();
        self.leaderboard = LeaderboardView::new();
        self.profile = ProfileView::for_user(self.session.user());
        self.injuries = InjuryLog::seeded();
        self.injury_form = None;
        self.injury_focus = InjuryField::Kind;
        self.injury_selected = 0;
    }

    pub fn select_tab(&mut self, tab: DashboardTab) -> Option<ProviderCommand> {
        self.tab = tab;
        if tab == DashboardTab::Leaderboard {
            return self.request_leaderboard();
        }
        None
    }

    pub fn request_leaderboard(&mut self) -> Option<ProviderCommand> {
        if !self.session.is_authenticated() || !self.leaderboard.begin_load() {
            return None;
        }
        let request = self.issue_request();
        self.leaderboard.pending = Some(request);
        self.push_log("[INFO] Loading leaderboard");
        Some(ProviderCommand::FetchLeaderboard { request })
    }

    /// Ids keep counting across logouts, so a result from an earlier session never matches.
    fn issue_request(&mut self) -> RequestId {
        let request = self.next_request;
        self.next_request += 1;
        request
    }

    pub fn next_drill_field(&mut self) {
        self.drill_focus = match self.drill_focus {
            DrillField::File => DrillField::Title,
            DrillField::Title => DrillField::Category,
            DrillField::Category => DrillField::Difficulty,
            DrillField::Difficulty => DrillField::File,
        };
    }

    pub fn submit_upload(&mut self) -> Option<ProviderCommand> {
        if !self.upload.busy {
            self.upload.select_file(&self.drill_file_input);
            self.upload.meta.title = Some(self.drill_title_input.clone());
        }
        match self.upload.prepare_submission() {
            Ok(submission) => {
                self.status = None;
                let request = self.issue_request();
                self.upload.pending = Some(request);
                self.push_log(format!("[INFO] Uploading {}", submission.file_name));
                Some(ProviderCommand::Analyze {
                    request,
                    submission,
                })
            }
            Err(err) => {
                self.notify_error("Upload", err.message());
                None
            }
        }
    }

    pub fn scroll_report(&mut self, down: bool) {
        if self.upload.result.is_none() {
            return;
        }
        self.upload.result_scroll = if down {
            self.upload.result_scroll.saturating_add(1)
        } else {
            self.upload.result_scroll.saturating_sub(1)
        };
    }

    pub fn toggle_profile_edit(&mut self) {
        if self.profile.toggle_edit() {
            self.push_log("[INFO] Profile saved locally");
            self.notify(
                "Profile Updated",
                "Your profile has been updated successfully.",
            );
        }
    }

    pub fn open_injury_form(&mut self, today: NaiveDate) {
        if self.injury_form.is_none() {
            self.injury_form = Some(InjuryDraft {
                date: Some(today),
                ..InjuryDraft::default()
            });
            self.injury_focus = InjuryField::Kind;
        }
    }

    pub fn cancel_injury_form(&mut self) {
        self.injury_form = None;
    }

    pub fn next_injury_field(&mut self) {
        self.injury_focus = match self.injury_focus {
            InjuryField::Kind => InjuryField::BodyPart,
            InjuryField::BodyPart => InjuryField::Severity,
            InjuryField::Severity => InjuryField::ExpectedRecovery,
            InjuryField::ExpectedRecovery => InjuryField::Description,
            InjuryField::Description => InjuryField::Kind,
        };
    }

    /// Cycles the focused pick-list field of the injury form.
    pub fn cycle_injury_choice(&mut self) {
        let Some(draft) = self.injury_form.as_mut() else {
            return;
        };
        match self.injury_focus {
            InjuryField::Kind => draft.cycle_kind(),
            InjuryField::BodyPart => draft.cycle_body_part(),
            InjuryField::Severity => draft.cycle_severity(),
            InjuryField::ExpectedRecovery | InjuryField::Description => {}
        }
    }

    pub fn submit_injury(&mut self, today: NaiveDate) -> bool {
        let Some(draft) = self.injury_form.as_ref() else {
            return false;
        };
        match self.injuries.add(draft, today) {
            Ok(id) => {
                self.injury_form = None;
                self.injury_selected = 0;
                self.push_log(format!("[INFO] Injury #{id} recorded"));
                self.notify(
                    "Injury Recorded",
                    "Your injury has been recorded. Start your recovery journey!",
                );
                true
            }
            Err(err) => {
                self.notify_error("Missing Information", err.message());
                false
            }
        }
    }

    pub fn selected_injury_id(&self) -> Option<u64> {
        self.injuries
            .active()
            .get(self.injury_selected)
            .map(|injury| injury.id)
    }

    pub fn select_next_injury(&mut self) {
        let len = self.injuries.active().len();
        if self.injury_selected + 1 < len {
            self.injury_selected += 1;
        }
    }

    pub fn select_prev_injury(&mut self) {
        self.injury_selected = self.injury_selected.saturating_sub(1);
    }

    pub fn bump_selected_injury(&mut self) {
        if let Some(id) = self.selected_injury_id() {
            self.injuries.bump_progress(id);
            self.after_progress_update();
        }
    }

    pub fn recover_selected_injury(&mut self) {
        if let Some(id) = self.selected_injury_id() {
            self.injuries.mark_recovered(id);
            self.after_progress_update();
        }
    }

    fn after_progress_update(&mut self) {
        let len = self.injuries.active().len();
        self.injury_selected = self.injury_selected.min(len.saturating_sub(1));
        self.notify("Progress Updated", "Recovery progress has been updated.");
    }

    /// The text buffer the focused field edits, if the focused field takes free text.
    pub fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.page() {
            Page::Login => Some(match self.login_focus {
                LoginField::Email => &mut self.login_form.email,
                LoginField::Password => &mut self.login_form.password,
            }),
            Page::Signup => match self.signup_focus {
                SignupField::Name => Some(&mut self.signup_form.name),
                SignupField::Email => Some(&mut self.signup_form.email),
                SignupField::Password => Some(&mut self.signup_form.password),
                SignupField::Team => Some(&mut self.signup_form.team),
                SignupField::Position => None,
            },
            Page::Dashboard => match self.tab {
                DashboardTab::Drills if !self.upload.busy => match self.drill_focus {
                    DrillField::File => Some(&mut self.drill_file_input),
                    DrillField::Title => Some(&mut self.drill_title_input),
                    DrillField::Category | DrillField::Difficulty => None,
                },
                DashboardTab::Profile => self.profile.focused_text_mut(),
                DashboardTab::Health => {
                    let focus = self.injury_focus;
                    let draft = self.injury_form.as_mut()?;
                    match focus {
                        InjuryField::ExpectedRecovery => Some(&mut draft.expected_recovery),
                        InjuryField::Description => Some(&mut draft.description),
                        _ => None,
                    }
                }
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SignedIn {
        mode: AuthMode,
        user: User,
    },
    AuthFailed {
        mode: AuthMode,
        reason: String,
    },
    AnalysisFinished {
        request: RequestId,
        outcome: UploadOutcome,
    },
    LeaderboardLoaded {
        request: RequestId,
        entries: Vec<LeaderboardEntry>,
    },
    LeaderboardFailed {
        request: RequestId,
        reason: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Login(Credentials),
    Register(Registration),
    Analyze {
        request: RequestId,
        submission: DrillSubmission,
    },
    FetchLeaderboard {
        request: RequestId,
    },
}

impl ProviderCommand {
    /// The delta that settles this command when it never reached the provider.
    pub fn undelivered(self, reason: &str) -> Delta {
        match self {
            ProviderCommand::Login(_) => Delta::AuthFailed {
                mode: AuthMode::Login,
                reason: reason.to_string(),
            },
            ProviderCommand::Register(_) => Delta::AuthFailed {
                mode: AuthMode::Signup,
                reason: reason.to_string(),
            },
            ProviderCommand::Analyze { request, .. } => Delta::AnalysisFinished {
                request,
                outcome: UploadOutcome::Failed,
            },
            ProviderCommand::FetchLeaderboard { request } => Delta::LeaderboardFailed {
                request,
                reason: reason.to_string(),
            },
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SignedIn { mode, user } => {
            if !state.auth_busy {
                state.push_log("[WARN] Dropped sign-in result with no pending request");
                return;
            }
            state.auth_busy = false;
            state.push_log(format!("[INFO] Signed in as {}", user.email));
            state.session.adopt(user);
            state.login_form.password.clear();
            state.signup_form.password.clear();
            state.reset_dashboard();
            match mode {
                AuthMode::Login => state.notify("Welcome Back", "You are now signed in."),
                AuthMode::Signup => state.notify(
                    "Account Created",
                    "Welcome to Football Drills! Your account has been created successfully.",
                ),
            }
        }
        Delta::AuthFailed { mode, reason } => {
            if !state.auth_busy {
                return;
            }
            state.auth_busy = false;
            state.push_log(format!("[WARN] Auth error: {reason}"));
            match mode {
                AuthMode::Login => state.notify_error(
                    "Login Failed",
                    "Something went wrong. Please try again.",
                ),
                AuthMode::Signup => state.notify_error(
                    "Signup Failed",
                    "Please check your information and try again.",
                ),
            }
        }
        Delta::AnalysisFinished { request, outcome } => {
            if !state.upload.busy || state.upload.pending != Some(request) {
                state.push_log(format!(
                    "[WARN] Dropped analysis result #{request} with no matching upload"
                ));
                return;
            }
            let analyzed = matches!(outcome, UploadOutcome::Analyzed(_));
            state.upload.finish(outcome);
            if analyzed {
                state.drill_file_input.clear();
                state.drill_title_input.clear();
            }
            let message = state.upload.message.clone().unwrap_or_default();
            if analyzed {
                state.push_log("[INFO] Analysis received");
                state.notify("Upload", &message);
            } else {
                state.push_log(format!("[WARN] {message}"));
                state.notify_error("Upload", &message);
            }
        }
        Delta::LeaderboardLoaded { request, entries } => {
            if state.leaderboard.pending != Some(request) {
                state.push_log(format!("[WARN] Dropped leaderboard result #{request}"));
                return;
            }
            state.push_log(format!("[INFO] Leaderboard loaded ({} players)", entries.len()));
            state.leaderboard.finish_load(entries);
        }
        Delta::LeaderboardFailed { request, reason } => {
            if state.leaderboard.pending != Some(request) {
                return;
            }
            state.leaderboard.fail_load();
            state.push_log(format!("[WARN] Leaderboard error: {reason}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn tab_label(tab: DashboardTab) -> &'static str {
    match tab {
        DashboardTab::Drills => "Drills",
        DashboardTab::Leaderboard => "Leaderboard",
        DashboardTab::Profile => "Profile",
        DashboardTab::Health => "Health",
    }
}
