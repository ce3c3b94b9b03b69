use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use fc_terminal::api_client::{CreateMatchRequest, ImportPlayer};
use fc_terminal::api_worker;
use fc_terminal::formations;
use fc_terminal::lineup::{Selection, TapOutcome};
use fc_terminal::rating::StatField;
use fc_terminal::session;
use fc_terminal::state::{
    apply_delta, ApiCommand, AppState, Delta, DetailTarget, LeaderboardTab, Screen, TacticsFocus,
    TacticsSession,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ApiCommand>,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ApiCommand>) -> Self {
        Self {
            state: AppState::new(session::load()),
            should_quit: false,
            cmd_tx,
        }
    }

    fn send(&mut self, cmd: ApiCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            self.state.push_log("[WARN] api worker is gone");
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.state.screen {
            Screen::Login => self.on_login_key(key),
            Screen::Matches => self.on_matches_key(key),
            Screen::Import => self.on_import_key(key),
            Screen::Tactics => self.on_tactics_key(key),
            Screen::Stats => self.on_stats_key(key),
            Screen::Leaderboard => self.on_leaderboard_key(key),
        }
    }

    fn on_login_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.login;
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                form.focus_password = !form.focus_password;
            }
            KeyCode::Backspace => {
                let field = if form.focus_password {
                    &mut form.password
                } else {
                    &mut form.username
                };
                field.pop();
            }
            KeyCode::Char(ch) => {
                let field = if form.focus_password {
                    &mut form.password
                } else {
                    &mut form.username
                };
                field.push(ch);
            }
            KeyCode::Enter => {
                if form.in_flight {
                    return;
                }
                if form.username.trim().is_empty() || form.password.is_empty() {
                    form.error = "username and password required".to_string();
                    return;
                }
                form.in_flight = true;
                form.error.clear();
                let username = form.username.trim().to_string();
                let password = form.password.clone();
                self.send(ApiCommand::Login { username, password });
            }
            _ => {}
        }
    }

    fn on_matches_key(&mut self, key: KeyEvent) {
        if self.state.editing_filter {
            match key.code {
                KeyCode::Esc => {
                    self.state.editing_filter = false;
                    self.state.filter_date.clear();
                }
                KeyCode::Backspace => {
                    self.state.filter_date.pop();
                }
                KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '-' => {
                    self.state.filter_date.push(ch);
                }
                KeyCode::Enter => {
                    self.state.editing_filter = false;
                    self.refresh_matches();
                }
                _ => {}
            }
            return;
        }

        if let Some(id) = self.state.confirm_delete {
            match key.code {
                KeyCode::Char('y') => {
                    self.state.confirm_delete = None;
                    self.send(ApiCommand::DeleteMatch { id });
                }
                KeyCode::Char('n') | KeyCode::Esc => self.state.confirm_delete = None,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_match(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev_match(),
            KeyCode::Enter => self.open_selected(DetailTarget::Tactics),
            KeyCode::Char('s') => self.open_selected(DetailTarget::Stats),
            KeyCode::Char('i') => {
                if self.state.can_edit() {
                    self.state.screen = Screen::Import;
                } else {
                    self.state.push_log("[INFO] read-only account");
                }
            }
            KeyCode::Char('L') => {
                self.state.screen = Screen::Leaderboard;
                self.state.leaderboard_loading = true;
                self.send(ApiCommand::FetchLeaderboard);
            }
            KeyCode::Char('d') => {
                if !self.state.can_edit() {
                    self.state.push_log("[INFO] read-only account");
                } else if let Some(m) = self.state.selected_match() {
                    self.state.confirm_delete = Some(m.id);
                }
            }
            KeyCode::Char('f') => self.state.editing_filter = true,
            KeyCode::Char('g') => {
                let address = self
                    .state
                    .selected_match()
                    .and_then(|m| m.location.clone());
                match address {
                    Some(address) if !address.is_empty() => {
                        self.send(ApiCommand::Geocode { address })
                    }
                    _ => self.state.push_log("[INFO] no location to geocode"),
                }
            }
            KeyCode::Char('r') => self.refresh_matches(),
            KeyCode::Char('x') => {
                session::clear();
                self.state.reset_to_login();
            }
            _ => {}
        }
    }

    fn on_import_key(&mut self, key: KeyEvent) {
        if self.state.import.editing {
            match key.code {
                KeyCode::Esc => self.state.import.editing = false,
                KeyCode::Enter => self.state.import.text.push('\n'),
                KeyCode::Backspace => {
                    self.state.import.text.pop();
                }
                KeyCode::Char(ch) => self.state.import.text.push(ch),
                KeyCode::Tab => self.state.import.text.push(' '),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Matches,
            KeyCode::Char('e') => self.state.import.editing = true,
            KeyCode::Char('f') => self.state.import.cycle_format(),
            KeyCode::Char('v') => self.state.import.cycle_formation(),
            KeyCode::Char('p') => {
                let parsed = fc_terminal::roster_parse::parse_roster(
                    &self.state.import.text,
                    self.state.import.format,
                );
                if !parsed.has_players() {
                    self.state.push_log("[INFO] no players recognized");
                }
                self.state.import.parsed = Some(parsed);
            }
            KeyCode::Enter => self.submit_import(),
            _ => {}
        }
    }

    fn submit_import(&mut self) {
        if self.state.import.saving {
            return;
        }
        if !self.state.can_edit() {
            self.state.push_log("[INFO] read-only account");
            return;
        }
        let Some(parsed) = self.state.import.parsed.clone() else {
            self.state.push_log("[INFO] parse the sign-up text first (p)");
            return;
        };
        if !parsed.has_players() {
            self.state.push_log("[INFO] nothing to import");
            return;
        }

        let format = self.state.import.format;
        let squad_size = format.squad_size();
        let players = parsed
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| ImportPlayer {
                name: p.name.clone(),
                preferred_position: p.position.clone(),
                rating: 75,
                position_index: (idx < squad_size).then_some(idx),
                is_starter: idx < squad_size,
            })
            .collect();
        let match_date = if parsed.date.is_empty() {
            chrono::Local::now().format("%Y-%m-%d").to_string()
        } else {
            parsed.date.clone()
        };
        let request = CreateMatchRequest {
            match_date,
            match_time: (!parsed.time.is_empty()).then(|| parsed.time.clone()),
            location: (!parsed.location.is_empty()).then(|| parsed.location.clone()),
            format: format.as_str().to_string(),
        };

        self.state.import.saving = true;
        self.send(ApiCommand::ImportRoster {
            request,
            players,
            formation: self.state.import.formation().to_string(),
        });
    }

    fn on_tactics_key(&mut self, key: KeyEvent) {
        let Some(tactics) = self.state.tactics.as_mut() else {
            self.state.screen = Screen::Matches;
            return;
        };
        // Logs and commands are collected first; emitting them needs the
        // session borrow released.
        let mut log: Option<String> = None;
        let mut cmd: Option<ApiCommand> = None;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Esc => {
                self.state.screen = Screen::Matches;
            }
            KeyCode::Tab => {
                tactics.focus = match tactics.focus {
                    TacticsFocus::Pitch => TacticsFocus::Bench,
                    TacticsFocus::Bench => TacticsFocus::Pitch,
                };
                tactics.cursor = 0;
            }
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('l') | KeyCode::Right => {
                let max = match tactics.focus {
                    TacticsFocus::Pitch => tactics.board.squad_size(),
                    TacticsFocus::Bench => tactics.board.bench().len(),
                };
                if max > 0 {
                    tactics.cursor = (tactics.cursor + 1).min(max - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Char('h') | KeyCode::Left => {
                tactics.cursor = tactics.cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let outcome = match tactics.focus {
                    TacticsFocus::Pitch => tactics.board.tap_lineup(tactics.cursor),
                    TacticsFocus::Bench => tactics.board.tap_bench(tactics.cursor),
                };
                if tactics.focus == TacticsFocus::Bench {
                    tactics.cursor = tactics.cursor.min(
                        tactics.board.bench().len().saturating_sub(1),
                    );
                }
                log = match outcome {
                    TapOutcome::Selected => tactics
                        .board
                        .selected_name()
                        .map(|name| format!("[INFO] {name} selected, pick a target")),
                    TapOutcome::Swapped => Some("[INFO] players swapped".to_string()),
                    TapOutcome::Flipped | TapOutcome::Cleared | TapOutcome::Ignored => None,
                };
            }
            KeyCode::Char('c') => tactics.board.cancel_selection(),
            KeyCode::Char('f') => {
                if tactics.focus == TacticsFocus::Pitch {
                    tactics.board.toggle_flip(tactics.cursor);
                }
            }
            KeyCode::Char('v') => tactics.cycle_formation(),
            KeyCode::Char('w') => {
                if !tactics.board.is_editable() {
                    log = Some("[INFO] read-only account".to_string());
                } else if tactics.saving {
                } else if !tactics.board.is_dirty() {
                    log = Some("[INFO] nothing to save".to_string());
                } else {
                    tactics.saving = true;
                    cmd = Some(ApiCommand::SaveLineup {
                        match_id: tactics.match_id,
                        formation: tactics.formation.clone(),
                        players: tactics.board.import_payload(),
                    });
                }
            }
            _ => {}
        }
        if let Some(msg) = log {
            self.state.push_log(msg);
        }
        if let Some(cmd) = cmd {
            self.send(cmd);
        }
    }

    fn on_stats_key(&mut self, key: KeyEvent) {
        let Some(stats) = self.state.stats.as_mut() else {
            self.state.screen = Screen::Matches;
            return;
        };
        let editable = self
            .state
            .user
            .as_ref()
            .is_some_and(|u| u.role.can_edit());
        let mut log: Option<String> = None;
        let mut cmd: Option<ApiCommand> = None;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Matches,
            KeyCode::Char('j') | KeyCode::Down => {
                if !stats.stats.is_empty() {
                    stats.selected = (stats.selected + 1).min(stats.stats.len() - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => stats.selected = stats.selected.saturating_sub(1),
            KeyCode::Char('l') | KeyCode::Right => {
                stats.field = (stats.field + 1) % StatField::ALL.len();
            }
            KeyCode::Char('h') | KeyCode::Left => {
                stats.field = (stats.field + StatField::ALL.len() - 1) % StatField::ALL.len();
            }
            KeyCode::Char('+') | KeyCode::Char('=') if editable => stats.adjust(1),
            KeyCode::Char('-') | KeyCode::Char('_') if editable => stats.adjust(-1),
            KeyCode::Char('1') if editable => stats.adjust_score(true, -1),
            KeyCode::Char('2') if editable => stats.adjust_score(true, 1),
            KeyCode::Char('3') if editable => stats.adjust_score(false, -1),
            KeyCode::Char('4') if editable => stats.adjust_score(false, 1),
            KeyCode::Char('w') => {
                if !editable {
                    log = Some("[INFO] read-only account".to_string());
                } else if !stats.saving {
                    stats.saving = true;
                    cmd = Some(ApiCommand::SaveStats {
                        match_id: stats.match_id,
                        request: stats.request(),
                    });
                }
            }
            _ => {}
        }
        if let Some(msg) = log {
            self.state.push_log(msg);
        }
        if let Some(cmd) = cmd {
            self.send(cmd);
        }
    }

    fn on_leaderboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Matches,
            KeyCode::Tab => {
                self.state.leaderboard_tab = self.state.leaderboard_tab.next();
                self.state.leaderboard_scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.state.leaderboard.len().saturating_sub(1);
                self.state.leaderboard_scroll = (self.state.leaderboard_scroll + 1).min(max);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.leaderboard_scroll = self.state.leaderboard_scroll.saturating_sub(1);
            }
            KeyCode::Char('r') => {
                self.state.leaderboard_loading = true;
                self.send(ApiCommand::FetchLeaderboard);
            }
            _ => {}
        }
    }

    fn open_selected(&mut self, target: DetailTarget) {
        let Some(m) = self.state.selected_match() else {
            self.state.push_log("[INFO] no match selected");
            return;
        };
        let id = m.id;
        match target {
            DetailTarget::Tactics => self.state.tactics_loading = true,
            DetailTarget::Stats => self.state.stats_loading = true,
        }
        self.send(ApiCommand::FetchMatch { id, target });
    }

    fn refresh_matches(&mut self) {
        self.state.matches_loading = true;
        let date = self.state.filter_date.trim();
        let date = (!date.is_empty()).then(|| date.to_string());
        self.send(ApiCommand::FetchMatches { date });
    }

    fn persist_session(&mut self) {
        let Some(user) = self.state.user.clone() else {
            return;
        };
        if let Err(err) = session::save(&user) {
            self.state
                .push_log(format!("[WARN] session save failed: {err:#}"));
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    api_worker::spawn_api_worker(tx, cmd_rx);

    let mut app = App::new(cmd_tx);
    if app.state.screen == Screen::Matches {
        app.refresh_matches();
    }
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
    rx: mpsc::Receiver<fc_terminal::state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            let logged_in = matches!(delta, Delta::LoginOk(_));
            apply_delta(&mut app.state, delta);
            if logged_in {
                app.persist_session();
                app.refresh_matches();
            }
        }
        if let Some(id) = app.state.pending_open.take() {
            app.state.tactics_loading = true;
            app.send(ApiCommand::FetchMatch {
                id,
                target: DetailTarget::Tactics,
            });
            app.refresh_matches();
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
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Login => render_login(frame, chunks[1], &app.state),
        Screen::Matches => render_matches(frame, chunks[1], &app.state),
        Screen::Import => render_import(frame, chunks[1], &app.state),
        Screen::Tactics => render_tactics(frame, chunks[1], &app.state),
        Screen::Stats => render_stats(frame, chunks[1], &app.state),
        Screen::Leaderboard => render_leaderboard(frame, chunks[1], &app.state),
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.confirm_delete.is_some() {
        render_confirm_delete(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Login => "LOGIN",
        Screen::Matches => "MATCHES",
        Screen::Import => "IMPORT",
        Screen::Tactics => "TACTICS",
        Screen::Stats => "STATS",
        Screen::Leaderboard => "LEADERBOARD",
    };
    let who = match &state.user {
        Some(user) => format!("{} [{}]", user.display_name, user.role.label()),
        None => "not signed in".to_string(),
    };
    format!("FC TERMINAL | {screen} | {who}")
}

fn footer_text(state: &AppState) -> String {
    let keys = match state.screen {
        Screen::Login => "Tab Field | Enter Sign in | Esc Quit".to_string(),
        Screen::Matches => {
            if state.editing_filter {
                format!("Filter date: {}_ (Enter apply, Esc clear)", state.filter_date)
            } else {
                "j/k Move | Enter Tactics | s Stats | i Import | L Board | d Delete | f Filter | g Geocode | r Refresh | x Logout | q Quit".to_string()
            }
        }
        Screen::Import => {
            if state.import.editing {
                "typing... Esc Done".to_string()
            } else {
                "e Edit text | f Format | v Formation | p Parse | Enter Import | b Back | q Quit"
                    .to_string()
            }
        }
        Screen::Tactics => {
            "h/j/k/l Move | Tab Pitch/Bench | Enter Tap | c Cancel | v Formation | f Flip | w Save | b Back | q Quit"
                .to_string()
        }
        Screen::Stats => {
            "j/k Player | h/l Field | +/- Adjust | 1-4 Score | w Save | b Back | q Quit".to_string()
        }
        Screen::Leaderboard => "Tab Category | j/k Scroll | r Refresh | b Back | q Quit".to_string(),
    };
    let log = state.last_log().unwrap_or("");
    format!("{keys}\n{log}")
}

fn render_login(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup = centered_rect(50, 40, area);
    let block = Block::default().title("Sign in").borders(Borders::ALL);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let form = &state.login;
    let focus = Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan);
    let plain = Style::default();

    let username = Paragraph::new(format!("Username: {}", form.username)).style(
        if form.focus_password { plain } else { focus },
    );
    frame.render_widget(username, rows[0]);

    let masked: String = "*".repeat(form.password.chars().count());
    let password = Paragraph::new(format!("Password: {masked}")).style(if form.focus_password {
        focus
    } else {
        plain
    });
    frame.render_widget(password, rows[1]);

    let status = if form.in_flight {
        Paragraph::new("signing in...").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(form.error.as_str()).style(Style::default().fg(Color::Red))
    };
    frame.render_widget(status, rows[3]);
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = match_columns();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "Date", bold);
    render_cell_text(frame, cols[1], "Time", bold);
    render_cell_text(frame, cols[2], "Fmt", bold);
    render_cell_text(frame, cols[3], "Formation", bold);
    render_cell_text(frame, cols[4], "Location", bold);
    render_cell_text(frame, cols[5], "Players", bold);
    render_cell_text(frame, cols[6], "Score", bold);
    render_cell_text(frame, cols[7], "Status", bold);

    let list_area = sections[1];
    if state.matches.is_empty() {
        let message = if state.matches_loading {
            "loading matches..."
        } else if !state.matches_error.is_empty() {
            state.matches_error.as_str()
        } else {
            "no matches yet, press i to import a roster"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.match_selected, state.matches.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = idx == state.match_selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);
        let m = &state.matches[idx];
        render_cell_text(frame, cols[0], m.date_label(), row_style);
        render_cell_text(frame, cols[1], m.time_label(), row_style);
        render_cell_text(frame, cols[2], &m.format, row_style);
        render_cell_text(frame, cols[3], m.formation.as_deref().unwrap_or("-"), row_style);
        render_cell_text(frame, cols[4], m.location.as_deref().unwrap_or("-"), row_style);
        render_cell_text(frame, cols[5], &m.registered_count.to_string(), row_style);
        let score = if m.is_completed() {
            format!("{}-{}", m.home_score, m.away_score)
        } else {
            "-".to_string()
        };
        render_cell_text(frame, cols[6], &score, row_style);
        render_cell_text(frame, cols[7], &m.status, row_style);
    }
}

fn match_columns() -> [Constraint; 8] {
    [
        Constraint::Length(11),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(10),
    ]
}

fn render_import(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(30)])
        .split(area);

    let form = &state.import;
    let mut left_lines = vec![
        format!("Format:    {}", form.format.as_str()),
        format!("Formation: {}", form.formation()),
        String::new(),
    ];
    match &form.parsed {
        Some(parsed) => {
            left_lines.push(format!("Date:     {}", or_dash(&parsed.date)));
            left_lines.push(format!("Time:     {}", or_dash(&parsed.time)));
            left_lines.push(format!("Location: {}", or_dash(&parsed.location)));
            left_lines.push(format!("Players:  {}", parsed.players.len()));
            left_lines.push(String::new());
            for (idx, player) in parsed.players.iter().enumerate() {
                let starter = if idx < form.format.squad_size() {
                    "*"
                } else {
                    " "
                };
                left_lines.push(format!("{starter} {:>2} {} {}", idx + 1, player.position, player.name));
            }
        }
        None => left_lines.push("press p to parse".to_string()),
    }
    if form.saving {
        left_lines.push(String::new());
        left_lines.push("importing...".to_string());
    }
    let left = Paragraph::new(left_lines.join("\n"))
        .block(Block::default().title("Preview").borders(Borders::ALL));
    frame.render_widget(left, columns[0]);

    let title = if form.editing {
        "Sign-up text (editing)"
    } else {
        "Sign-up text"
    };
    let right = Paragraph::new(form.text.as_str())
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(right, columns[1]);
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn render_tactics(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(tactics) = &state.tactics else {
        let message = if state.tactics_loading {
            "loading match..."
        } else {
            "no match loaded"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(26)])
        .split(area);

    render_pitch(frame, columns[0], tactics);
    render_bench(frame, columns[1], tactics);
}

fn render_pitch(frame: &mut Frame, area: Rect, tactics: &TacticsSession) {
    let title = format!(
        "{} {} {}{}",
        tactics.summary.date_label(),
        tactics.format.as_str(),
        tactics.formation,
        if tactics.board.is_dirty() { " *" } else { "" },
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 12 || inner.height < 6 {
        return;
    }

    let Some(slots) = formations::formation_slots(tactics.format, &tactics.formation) else {
        let empty = Paragraph::new("unknown formation");
        frame.render_widget(empty, inner);
        return;
    };

    const CELL_WIDTH: u16 = 12;
    for (index, slot) in slots.iter().enumerate() {
        let cx = inner.x
            + ((slot.x / 100.0) * (inner.width.saturating_sub(CELL_WIDTH)) as f32).round() as u16;
        let cy =
            inner.y + ((slot.y / 100.0) * (inner.height.saturating_sub(2)) as f32).round() as u16;
        let cell = Rect {
            x: cx,
            y: cy,
            width: CELL_WIDTH.min(inner.width),
            height: 2,
        };

        let under_cursor =
            tactics.focus == TacticsFocus::Pitch && tactics.cursor == index;
        let picked = tactics.board.selection() == Selection::Lineup(index);
        let style = if picked {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else if under_cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let text = match tactics.board.slot(index) {
            Some(player) => {
                let rating = tactics.badge_rating(player.id, player.rating);
                let arrow = if tactics.board.is_flipped(index) { "v" } else { "^" };
                format!(
                    "{arrow}{} #{} {}\n  {} {}",
                    player.avatar_key, player.jersey_number, slot.label, player.name, rating
                )
            }
            None => format!(" [{}]", slot.label),
        };
        frame.render_widget(Paragraph::new(text).style(style), cell);
    }

    if let Some(name) = tactics.board.selected_name() {
        let hint = Rect {
            x: inner.x,
            y: inner.y + inner.height - 1,
            width: inner.width,
            height: 1,
        };
        let text = format!("swapping {name}... pick a slot or bench entry");
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
            hint,
        );
    }
}

fn render_bench(frame: &mut Frame, area: Rect, tactics: &TacticsSession) {
    let title = if tactics.saving {
        "Bench (saving...)"
    } else {
        "Bench"
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bench = tactics.board.bench();
    if bench.is_empty() {
        let empty = Paragraph::new("empty").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (index, player) in bench.iter().enumerate() {
        let under_cursor =
            tactics.focus == TacticsFocus::Bench && tactics.cursor == index;
        let picked = tactics.board.selection() == Selection::Bench(index);
        let style = if picked {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else if under_cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let rating = tactics.badge_rating(player.id, player.rating);
        lines.push(Line::styled(
            format!("{} {} {}", player.position, player.name, rating),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(stats) = &state.stats else {
        let message = if state.stats_loading {
            "loading match..."
        } else {
            "no match loaded"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let score = format!(
        "{} | score {} - {}{}",
        stats.summary.date_label(),
        stats.home_score,
        stats.away_score,
        if stats.saving { " | saving..." } else { "" },
    );
    frame.render_widget(Paragraph::new(score), sections[0]);

    let widths = stat_columns();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[1]);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "Player", bold);
    for (i, field) in StatField::ALL.iter().enumerate() {
        let style = if i == stats.field % StatField::ALL.len() {
            bold.fg(Color::Cyan)
        } else {
            bold
        };
        render_cell_text(frame, cols[i + 1], field.label(), style);
    }
    render_cell_text(frame, cols[6], "Rating", bold);
    render_cell_text(frame, cols[7], "MVP", bold);

    let list_area = sections[2];
    let visible = list_area.height as usize;
    let (start, end) = visible_range(stats.selected, stats.stats.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = idx == stats.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);
        let row = &stats.stats[idx];
        render_cell_text(frame, cols[0], &row.player_name, row_style);
        let values = [
            row.goals,
            row.assists,
            row.interceptions,
            row.yellow_cards,
            row.red_cards,
        ];
        for (col, value) in values.iter().enumerate() {
            let style = if selected && col == stats.field % StatField::ALL.len() {
                row_style.fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                row_style
            };
            render_cell_text(frame, cols[col + 1], &value.to_string(), style);
        }
        render_cell_text(frame, cols[6], &format!("{:.1}", row.rating), row_style);
        render_cell_text(frame, cols[7], if row.is_mvp { "MVP" } else { "" }, row_style);
    }
}

fn stat_columns() -> [Constraint; 8] {
    [
        Constraint::Min(14),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(4),
    ]
}

fn render_leaderboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let tabs = [
        LeaderboardTab::Goals,
        LeaderboardTab::Assists,
        LeaderboardTab::Interceptions,
        LeaderboardTab::Overview,
    ]
    .iter()
    .map(|tab| {
        if *tab == state.leaderboard_tab {
            format!("[{}]", tab.label())
        } else {
            format!(" {} ", tab.label())
        }
    })
    .collect::<Vec<_>>()
    .join(" ");
    frame.render_widget(Paragraph::new(tabs), sections[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = match state.leaderboard_tab {
        LeaderboardTab::Overview => {
            format!("{:<4}{:<16}{:>6}{:>6}{:>6}{:>6}{:>6}", "#", "Player", "MP", "G", "A", "INT", "MVP")
        }
        tab => format!(
            "{:<4}{:<16}{:>6}{:>6}{:>8}",
            "#",
            "Player",
            tab_short(tab),
            "MP",
            "Avg"
        ),
    };
    frame.render_widget(Paragraph::new(header).style(bold), sections[1]);

    let mut rows = state.leaderboard.clone();
    match state.leaderboard_tab {
        LeaderboardTab::Goals => rows.sort_by(|a, b| b.total_goals.cmp(&a.total_goals)),
        LeaderboardTab::Assists => rows.sort_by(|a, b| b.total_assists.cmp(&a.total_assists)),
        LeaderboardTab::Interceptions => {
            rows.sort_by(|a, b| b.total_interceptions.cmp(&a.total_interceptions))
        }
        LeaderboardTab::Overview => rows.sort_by(|a, b| {
            (b.mvp_count, b.total_goals, b.total_assists)
                .cmp(&(a.mvp_count, a.total_goals, a.total_assists))
        }),
    }

    let list_area = sections[2];
    if rows.is_empty() {
        let message = if state.leaderboard_loading {
            "loading..."
        } else {
            "no player data yet"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let max_start = rows.len().saturating_sub(visible);
    let start = state.leaderboard_scroll.min(max_start);
    let end = (start + visible).min(rows.len());
    let lines = rows[start..end]
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let rank = start + i + 1;
            match state.leaderboard_tab {
                LeaderboardTab::Overview => Line::raw(format!(
                    "{:<4}{:<16}{:>6}{:>6}{:>6}{:>6}{:>6}",
                    rank,
                    entry.name,
                    entry.matches_played,
                    entry.total_goals,
                    entry.total_assists,
                    entry.total_interceptions,
                    entry.mvp_count,
                )),
                tab => {
                    let value = match tab {
                        LeaderboardTab::Goals => entry.total_goals,
                        LeaderboardTab::Assists => entry.total_assists,
                        LeaderboardTab::Interceptions => entry.total_interceptions,
                        LeaderboardTab::Overview => 0,
                    };
                    let avg = if entry.matches_played > 0 {
                        value as f64 / entry.matches_played as f64
                    } else {
                        0.0
                    };
                    let text = format!(
                        "{:<4}{:<16}{:>6}{:>6}{:>8.1}",
                        rank, entry.name, value, entry.matches_played, avg
                    );
                    Line::styled(text, medal_style(rank, value))
                }
            }
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), list_area);
}

/// Gold, silver and bronze row colors for the top three, skipped when the
/// ranked value is zero.
fn medal_style(rank: usize, value: u32) -> Style {
    if value == 0 {
        return Style::default();
    }
    match rank {
        1 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        2 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        3 => Style::default().fg(Color::LightRed),
        _ => Style::default(),
    }
}

fn tab_short(tab: LeaderboardTab) -> &'static str {
    match tab {
        LeaderboardTab::Goals => "G",
        LeaderboardTab::Assists => "A",
        LeaderboardTab::Interceptions => "INT",
        LeaderboardTab::Overview => "",
    }
}

fn render_confirm_delete(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(40, 20, area);
    frame.render_widget(Clear, popup);
    let text = "Delete this match and all its data?\n\n  y Yes    n No";
    let confirm = Paragraph::new(text)
        .block(Block::default().title("Confirm").borders(Borders::ALL))
        .style(Style::default().fg(Color::Red));
    frame.render_widget(confirm, popup);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
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
