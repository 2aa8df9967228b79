use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use drill_terminal::config::{self, ApiMode, AppConfig};
use drill_terminal::feed;
use drill_terminal::injury::{Injury, InjuryStatus};
use drill_terminal::leaderboard::{COMMUNITY_STATS, format_thousands, rank_badge};
use drill_terminal::profile::{ProfileField, ProgressTone, progress_tone};
use drill_terminal::remote;
use drill_terminal::report::{report_headline, report_lines};
use drill_terminal::state::{
    self, AppState, DashboardTab, DrillField, InjuryField, LoginField, Page, ProviderCommand,
    SignupField, StatusKind, apply_delta, tab_label,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    api_mode: ApiMode,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>, api_mode: ApiMode) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            api_mode,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(1) {
            self.state.help_overlay = !self.state.help_overlay;
            return;
        }
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.state.help_overlay = false;
            }
            return;
        }

        match self.state.page() {
            Page::Login | Page::Signup => self.on_auth_key(key, ctrl),
            Page::Dashboard => self.on_dashboard_key(key, ctrl),
        }
    }

    fn on_auth_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('s') if ctrl => self.state.toggle_auth_mode(),
            KeyCode::Tab | KeyCode::Down => self.state.next_auth_field(),
            KeyCode::Enter => {
                let cmd = match self.state.page() {
                    Page::Signup => self.state.submit_signup(),
                    _ => self.state.submit_login(),
                };
                self.dispatch(cmd);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.state.page() == Page::Signup
                    && self.state.signup_focus == SignupField::Position =>
            {
                self.state.signup_form.cycle_position();
            }
            _ => {
                self.edit_text(key, ctrl);
            }
        }
    }

    fn on_dashboard_key(&mut self, key: KeyEvent, ctrl: bool) {
        if ctrl {
            if key.code == KeyCode::Char('l') {
                self.state.logout();
            }
            return;
        }
        if key.code == KeyCode::BackTab {
            let cmd = self.state.select_tab(self.state.tab.next());
            self.dispatch(cmd);
            return;
        }

        let typing = self.state.focused_input_mut().is_some();
        if !typing {
            match key.code {
                KeyCode::Char(c @ '1'..='4') => {
                    let idx = c as usize - '1' as usize;
                    let cmd = self.state.select_tab(DashboardTab::ALL[idx]);
                    self.dispatch(cmd);
                    return;
                }
                KeyCode::Char('?') => {
                    self.state.help_overlay = true;
                    return;
                }
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                _ => {}
            }
        }

        let consumed = match self.state.tab {
            DashboardTab::Drills => self.on_drills_key(key),
            DashboardTab::Leaderboard => self.on_leaderboard_key(key),
            DashboardTab::Profile => self.on_profile_key(key),
            DashboardTab::Health => self.on_health_key(key),
        };
        if consumed || !typing {
            return;
        }
        self.edit_text(key, false);
    }

    // Tab handlers return true when the key was an action, so it never also lands in a text field.
    fn on_drills_key(&mut self, key: KeyEvent) -> bool {
        let choice = matches!(
            self.state.drill_focus,
            DrillField::Category | DrillField::Difficulty
        );
        match key.code {
            KeyCode::Tab => self.state.next_drill_field(),
            KeyCode::Enter => {
                let cmd = self.state.submit_upload();
                self.dispatch(cmd);
            }
            KeyCode::Down => self.state.scroll_report(true),
            KeyCode::Up => self.state.scroll_report(false),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if choice => {
                if !self.state.upload.busy {
                    match self.state.drill_focus {
                        DrillField::Category => self.state.upload.cycle_category(),
                        _ => self.state.upload.cycle_difficulty(),
                    }
                }
            }
            _ => return false,
        }
        true
    }

    fn on_leaderboard_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.leaderboard.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.leaderboard.select_prev(),
            _ => return false,
        }
        true
    }

    fn on_profile_key(&mut self, key: KeyEvent) -> bool {
        let editing = self.state.profile.editing;
        match key.code {
            KeyCode::Enter => self.state.toggle_profile_edit(),
            KeyCode::Char('e') if !editing => self.state.toggle_profile_edit(),
            KeyCode::Tab if editing => self.state.profile.next_field(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if editing && self.state.profile.focus == ProfileField::Position =>
            {
                self.state.profile.cycle_position();
            }
            _ => return false,
        }
        true
    }

    fn on_health_key(&mut self, key: KeyEvent) -> bool {
        let today = Local::now().date_naive();
        if self.state.injury_form.is_some() {
            let choice = matches!(
                self.state.injury_focus,
                InjuryField::Kind | InjuryField::BodyPart | InjuryField::Severity
            );
            match key.code {
                KeyCode::Esc => self.state.cancel_injury_form(),
                KeyCode::Tab => self.state.next_injury_field(),
                KeyCode::Enter => {
                    self.state.submit_injury(today);
                }
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if choice => {
                    self.state.cycle_injury_choice();
                }
                _ => return false,
            }
            return true;
        }
        match key.code {
            KeyCode::Char('a') => self.state.open_injury_form(today),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_injury(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev_injury(),
            KeyCode::Char('+') => self.state.bump_selected_injury(),
            KeyCode::Char('r') => self.state.recover_selected_injury(),
            _ => return false,
        }
        true
    }

    fn edit_text(&mut self, key: KeyEvent, ctrl: bool) -> bool {
        let Some(buf) = self.state.focused_input_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char(c) if !ctrl => {
                buf.push(c);
                true
            }
            KeyCode::Backspace => {
                buf.pop();
                true
            }
            _ => false,
        }
    }

    fn dispatch(&mut self, cmd: Option<ProviderCommand>) {
        let Some(cmd) = cmd else {
            return;
        };
        if let Err(mpsc::SendError(cmd)) = self.cmd_tx.send(cmd) {
            self.state.push_log("[WARN] Provider unavailable");
            apply_delta(&mut self.state, cmd.undelivered("provider unavailable"));
        }
    }
}

fn main() -> io::Result<()> {
    config::load_dotenv();
    let app_config = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let api = remote::build_api(&app_config);
    feed::spawn_provider(api, app_config.leaderboard_delay, tx, cmd_rx);

    let mut app = App::new(cmd_tx, app_config.api_mode);
    app.state.push_log(format!(
        "[INFO] API mode {} ({})",
        config::api_mode_label(app_config.api_mode),
        app_config.api_base
    ));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state, app.api_mode))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.page() {
        Page::Login | Page::Signup => render_auth(frame, chunks[1], &app.state),
        Page::Dashboard => match app.state.tab {
            DashboardTab::Drills => render_drills(frame, chunks[1], &app.state),
            DashboardTab::Leaderboard => render_leaderboard(frame, chunks[1], &app.state),
            DashboardTab::Profile => render_profile(frame, chunks[1], &app.state),
            DashboardTab::Health => render_health(frame, chunks[1], &app.state),
        },
    }

    frame.render_widget(status_line(&app.state), chunks[2]);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[4]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState, mode: ApiMode) -> String {
    let title = match (state.page(), state.user()) {
        (Page::Dashboard, Some(user)) => format!(
            "FOOTBALL DRILLS | Welcome, {} | {}",
            user.name,
            config::api_mode_label(mode)
        ),
        (Page::Signup, _) => format!("FOOTBALL DRILLS | Create account | {}", config::api_mode_label(mode)),
        _ => format!("FOOTBALL DRILLS | Sign in | {}", config::api_mode_label(mode)),
    };
    let tabs = if state.page() == Page::Dashboard {
        DashboardTab::ALL
            .iter()
            .enumerate()
            .map(|(idx, tab)| {
                let label = format!("{} {}", idx + 1, tab_label(*tab));
                if *tab == state.tab {
                    format!("[{label}]")
                } else {
                    format!(" {label} ")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        String::new()
    };
    format!("  .-.  {title}\n ( o )  {tabs}\n  `-'")
}

fn footer_text(state: &AppState) -> String {
    match state.page() {
        Page::Login => "Tab Next field | Enter Sign in | Ctrl+S Sign up | F1 Help | Ctrl+C Quit".to_string(),
        Page::Signup => {
            "Tab Next field | ←/→ Position | Enter Create | Ctrl+S Sign in | F1 Help | Ctrl+C Quit"
                .to_string()
        }
        Page::Dashboard => {
            let tab_hint = match state.tab {
                DashboardTab::Drills => "Tab Field | ←/→ Pick | Enter Upload | ↑/↓ Scroll report",
                DashboardTab::Leaderboard => "j/k/↑/↓ Move",
                DashboardTab::Profile if state.profile.editing => "Tab Field | ←/→ Position | Enter Save",
                DashboardTab::Profile => "e/Enter Edit",
                DashboardTab::Health if state.injury_form.is_some() => {
                    "Tab Field | ←/→ Pick | Enter Save | Esc Cancel"
                }
                DashboardTab::Health => "a Add | j/k Move | + Progress | r Recovered",
            };
            format!("1-4/Shift+Tab Tabs | {tab_hint} | Ctrl+L Logout | ? Help | q Quit")
        }
    }
}

fn status_line(state: &AppState) -> Paragraph<'static> {
    match &state.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Error => Color::Red,
            };
            Paragraph::new(format!("{}: {}", status.title, status.text))
                .style(Style::default().fg(color))
        }
        None => Paragraph::new(""),
    }
}

fn field_line(focused: bool, label: &str, value: &str) -> String {
    let marker = if focused { ">" } else { " " };
    format!("{marker} {label:<12} {value}")
}

fn masked(value: &str) -> String {
    "*".repeat(value.chars().count())
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn render_auth(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup = centered_rect(60, 70, area);
    let (title, mut lines) = match state.page() {
        Page::Signup => {
            let form = &state.signup_form;
            let focus = state.signup_focus;
            (
                "Create Account",
                vec![
                    field_line(focus == SignupField::Name, "Full name", &form.name),
                    field_line(focus == SignupField::Email, "Email", &form.email),
                    field_line(focus == SignupField::Password, "Password", &masked(&form.password)),
                    field_line(
                        focus == SignupField::Position,
                        "Position",
                        &or_placeholder(&form.position, "Select your position"),
                    ),
                    field_line(focus == SignupField::Team, "Team", &form.team),
                ],
            )
        }
        _ => {
            let form = &state.login_form;
            (
                "Sign In",
                vec![
                    field_line(state.login_focus == LoginField::Email, "Email", &form.email),
                    field_line(
                        state.login_focus == LoginField::Password,
                        "Password",
                        &masked(&form.password),
                    ),
                ],
            )
        }
    };
    lines.push(String::new());
    if state.auth_busy {
        lines.push(match state.page() {
            Page::Signup => "Creating account...".to_string(),
            _ => "Signing in...".to_string(),
        });
    } else {
        lines.push(match state.page() {
            Page::Signup => "Already have an account? Ctrl+S to sign in".to_string(),
            _ => "Don't have an account? Ctrl+S to sign up".to_string(),
        });
    }

    frame.render_widget(Clear, popup);
    let form = Paragraph::new(lines.join("\n"))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(form, popup);
}

fn render_drills(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(30)])
        .split(area);

    let upload = &state.upload;
    let focus = state.drill_focus;
    let mut lines = vec![
        field_line(
            focus == DrillField::File,
            "Video file",
            &or_placeholder(&state.drill_file_input, "path/to/drill.mp4"),
        ),
        field_line(focus == DrillField::Title, "Title", &state.drill_title_input),
        field_line(
            focus == DrillField::Category,
            "Category",
            upload
                .meta
                .category
                .map(|c| c.label())
                .unwrap_or("Select category"),
        ),
        field_line(
            focus == DrillField::Difficulty,
            "Difficulty",
            upload
                .meta
                .difficulty
                .map(|d| d.label())
                .unwrap_or("Select difficulty"),
        ),
        String::new(),
    ];
    if upload.busy {
        lines.push("Uploading and analyzing...".to_string());
    } else if let Some(message) = &upload.message {
        lines.push(message.clone());
    } else {
        lines.push("Enter to upload and analyze".to_string());
    }

    let form = Paragraph::new(lines.join("\n"))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Upload Drill").borders(Borders::ALL));
    frame.render_widget(form, columns[0]);

    match &upload.result {
        Some(report) => {
            let title = format!("Analysis Report | {}", report_headline(report));
            let body = Paragraph::new(report_lines(report).join("\n"))
                .scroll((upload.result_scroll, 0))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(body, columns[1]);
        }
        None => {
            let empty = Paragraph::new("Upload a drill video to see its analysis")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Analysis Report").borders(Borders::ALL));
            frame.render_widget(empty, columns[1]);
        }
    }
}

fn render_leaderboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let board = &state.leaderboard;
    if board.loading || !board.loaded {
        let text = if board.loading {
            "Loading leaderboard..."
        } else {
            "Leaderboard unavailable"
        };
        let waiting = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Leaderboard").borders(Borders::ALL));
        frame.render_widget(waiting, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let podium = board.podium();
    let podium_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);
    for (entry, col) in podium.iter().zip(podium_cols.iter()) {
        let color = match entry.rank {
            1 => Color::Yellow,
            2 => Color::Gray,
            _ => Color::Rgb(205, 127, 50),
        };
        let text = format!(
            "{} ({})\n{}\nScore {}%",
            entry.name,
            entry.initials(),
            entry.team,
            entry.score
        );
        let card = Paragraph::new(text).block(
            Block::default()
                .title(rank_badge(entry.rank))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(card, *col);
    }

    let visible = rows[1].height.saturating_sub(2) as usize;
    let (start, end) = visible_range(board.selected, board.entries.len(), visible);
    let mut lines = Vec::new();
    for idx in start..end {
        let entry = &board.entries[idx];
        let line = format!(
            "{:<7} {:<3} {:<16} {:<15} {:<11} {:>3}%  {:>3} drills  +{}%",
            rank_badge(entry.rank),
            entry.initials(),
            entry.name,
            entry.team,
            entry.position,
            entry.score,
            entry.drills_completed,
            entry.improvement_percent
        );
        let style = if idx == board.selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::styled(line, style));
    }
    let rankings = Paragraph::new(lines)
        .block(Block::default().title("Full Rankings").borders(Borders::ALL));
    frame.render_widget(rankings, rows[1]);

    let stats = Paragraph::new(format!(
        "Total players {} | Drills completed {} | Avg performance {:.1}%",
        format_thousands(COMMUNITY_STATS.total_players),
        format_thousands(COMMUNITY_STATS.drills_completed),
        COMMUNITY_STATS.average_performance
    ))
    .block(Block::default().title("Community").borders(Borders::ALL));
    frame.render_widget(stats, rows[2]);
}

fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let profile = &state.profile;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(columns[1]);

    let draft = &profile.draft;
    let editing = profile.editing;
    let email = state.user().map(|u| u.email.as_str()).unwrap_or_default();
    let identity = [
        field_line(editing && profile.focus == ProfileField::Name, "Name", &draft.name),
        field_line(
            editing && profile.focus == ProfileField::Position,
            "Position",
            &draft.position,
        ),
        field_line(editing && profile.focus == ProfileField::Team, "Team", &draft.team),
        field_line(false, "Email", email),
        if editing {
            "  editing...".to_string()
        } else {
            String::new()
        },
    ]
    .join("\n");
    let title = if editing { "Profile (editing)" } else { "Profile" };
    frame.render_widget(
        Paragraph::new(identity).block(Block::default().title(title).borders(Borders::ALL)),
        left[0],
    );

    let stats = &profile.stats;
    let stats_text = [
        format!("Drills completed  {}", stats.drills_completed),
        format!("Average score     {}%", stats.average_score),
        format!("Best category     {}", stats.best_category),
        format!("Days active       {}", stats.days_active),
        format!("Total hours       {}h", stats.total_hours),
        format!("Rank              #{}", stats.rank),
    ]
    .join("\n");
    frame.render_widget(
        Paragraph::new(stats_text).block(Block::default().title("Stats").borders(Borders::ALL)),
        left[1],
    );

    let recent = profile
        .recent
        .iter()
        .map(|drill| {
            format!(
                "{:<18} {:<10} {:<13} {:>3}%  {}",
                drill.name, drill.category, drill.difficulty, drill.score, drill.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    frame.render_widget(
        Paragraph::new(recent).block(Block::default().title("Recent Drills").borders(Borders::ALL)),
        right[0],
    );

    let bar_width = right[1].width.saturating_sub(34).max(10) as usize;
    let lines: Vec<Line> = profile
        .categories
        .iter()
        .map(|cat| {
            let color = match progress_tone(cat.progress) {
                ProgressTone::Strong => Color::Green,
                ProgressTone::Fair => Color::Yellow,
                ProgressTone::Weak => Color::Red,
            };
            Line::from(vec![
                Span::raw(format!("{:<10} {:<13} ", cat.name, cat.level)),
                Span::styled(progress_bar(cat.progress, bar_width), Style::default().fg(color)),
                Span::raw(format!(" {:>3}%", cat.progress)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Skill Progress").borders(Borders::ALL)),
        right[1],
    );
}

fn render_health(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let summary = state.injuries.summary();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);
    let card_data = [
        ("Recovered", summary.recovered.to_string(), Color::Green),
        ("Active", summary.active.to_string(), Color::Red),
        ("Avg Recovery", format!("{}%", summary.average_recovery), Color::Cyan),
    ];
    for ((title, value, color), col) in card_data.into_iter().zip(cards.iter()) {
        let card = Paragraph::new(value)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(card, *col);
    }

    if let Some(draft) = &state.injury_form {
        let focus = state.injury_focus;
        let date = draft
            .date
            .map(|d| d.format("%b %d, %Y").to_string())
            .unwrap_or_default();
        let lines = [
            field_line(
                focus == InjuryField::Kind,
                "Injury type",
                &or_placeholder(&draft.kind, "Select type"),
            ),
            field_line(
                focus == InjuryField::BodyPart,
                "Body part",
                &or_placeholder(&draft.body_part, "Select body part"),
            ),
            field_line(
                focus == InjuryField::Severity,
                "Severity",
                draft.severity.map(|s| s.label()).unwrap_or("Select severity"),
            ),
            field_line(false, "Date", &date),
            field_line(
                focus == InjuryField::ExpectedRecovery,
                "Recovery (d)",
                &draft.expected_recovery,
            ),
            field_line(
                focus == InjuryField::Description,
                "Description",
                &draft.description,
            ),
        ]
        .join("\n");
        let form = Paragraph::new(lines)
            .block(Block::default().title("Record Injury").borders(Borders::ALL));
        frame.render_widget(form, rows[1]);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let active = state.injuries.active();
    let active_lines: Vec<Line> = if active.is_empty() {
        vec![Line::styled(
            "No active injuries",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        active
            .iter()
            .enumerate()
            .flat_map(|(idx, injury)| injury_lines(injury, idx == state.injury_selected))
            .collect()
    };
    frame.render_widget(
        Paragraph::new(active_lines)
            .block(Block::default().title("Active Injuries").borders(Borders::ALL)),
        columns[0],
    );

    let recovered = state.injuries.recovered();
    let recovered_lines: Vec<Line> = if recovered.is_empty() {
        vec![Line::styled(
            "No recovered injuries yet",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        recovered
            .iter()
            .map(|injury| {
                Line::from(format!(
                    "{} [{}] {}",
                    injury.title(),
                    injury.severity.label(),
                    injury.date_label()
                ))
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(recovered_lines)
            .block(Block::default().title("Recovery History").borders(Borders::ALL)),
        columns[1],
    );
}

fn injury_lines(injury: &Injury, selected: bool) -> Vec<Line<'static>> {
    let style = if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let status_color = match injury.status {
        InjuryStatus::Active => Color::Red,
        InjuryStatus::Recovering => Color::Yellow,
        InjuryStatus::Recovered => Color::Green,
    };
    let mut detail = format!(
        "   {} | {} days expected",
        injury.date_label(),
        injury.expected_recovery_days
    );
    if !injury.description.is_empty() {
        detail.push_str(" | ");
        detail.push_str(&injury.description);
    }
    vec![
        Line::from(vec![
            Span::styled(
                format!(
                    "{} {} [{}] ",
                    if selected { ">" } else { " " },
                    injury.title(),
                    injury.severity.label()
                ),
                style,
            ),
            Span::styled(injury.status.label(), Style::default().fg(status_color)),
        ]),
        Line::raw(detail),
        Line::from(vec![
            Span::raw("   "),
            Span::styled(progress_bar(injury.recovery_progress, 20), Style::default().fg(status_color)),
            Span::raw(format!(" {}%", injury.recovery_progress)),
        ]),
    ]
}

fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Football Drills - Help",
        "",
        "Sign in / Sign up:",
        "  Tab          Next field",
        "  Enter        Submit",
        "  Ctrl+S       Switch form",
        "",
        "Dashboard:",
        "  1-4          Drills / Leaderboard / Profile / Health",
        "  Shift+Tab    Next tab",
        "  Tab          Next field",
        "  Ctrl+L       Log out",
        "",
        "Health:",
        "  a            Record injury",
        "  +            Progress +25%",
        "  r            Mark recovered",
        "",
        "  ? / F1       Toggle help",
        "  q / Ctrl+C   Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_terminal::session::User;
    use drill_terminal::state::{AuthMode, Delta};

    fn dashboard_app() -> (App, mpsc::Receiver<ProviderCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let mut app = App::new(cmd_tx, ApiMode::Mock);
        app.state.login_form.email = "john.doe@example.com".to_string();
        app.state.login_form.password = "secret".to_string();
        assert!(app.state.submit_login().is_some());
        apply_delta(
            &mut app.state,
            Delta::SignedIn {
                mode: AuthMode::Login,
                user: User::from_email("john.doe@example.com"),
            },
        );
        assert_eq!(app.state.page(), Page::Dashboard);
        (app, cmd_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn injury_form_actions_stay_out_of_text_fields() {
        let (mut app, _rx) = dashboard_app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.state.tab, DashboardTab::Health);
        press(&mut app, KeyCode::Char('a'));
        assert!(app.state.injury_form.is_some());

        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.state.injury_focus, InjuryField::ExpectedRecovery);
        type_text(&mut app, "14");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "sore calf");

        let draft = app.state.injury_form.clone().expect("form still open");
        assert_eq!(draft.expected_recovery, "14");
        assert_eq!(draft.description, "sore calf");

        press(&mut app, KeyCode::Esc);
        assert!(app.state.injury_form.is_none());
    }

    #[test]
    fn profile_edit_keys_do_not_type_into_the_name() {
        let (mut app, _rx) = dashboard_app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('e'));
        assert!(app.state.profile.editing);
        assert_eq!(app.state.profile.draft.name, "John Doe");

        type_text(&mut app, " Jr");
        press(&mut app, KeyCode::Enter);
        assert!(!app.state.profile.editing);
        assert_eq!(app.state.profile.draft.name, "John Doe Jr");
    }

    #[test]
    fn drill_fields_take_text_and_tab_moves_focus() {
        let (mut app, _rx) = dashboard_app();
        type_text(&mut app, "clip.mp4");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.drill_focus, DrillField::Title);
        type_text(&mut app, "Weak foot");

        assert_eq!(app.state.drill_file_input, "clip.mp4");
        assert_eq!(app.state.drill_title_input, "Weak foot");
        assert_eq!(app.state.tab, DashboardTab::Drills);
    }
}
