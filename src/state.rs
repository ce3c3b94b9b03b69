//! Application state: one struct per screen's editing session, the command
//! and delta protocol spoken with the API worker, and the routing that folds
//! worker results back into the UI.

use std::collections::{HashMap, VecDeque};

use crate::api_client::{
    BatchStatsRequest, CreateMatchRequest, ImportPlayer, LeaderboardEntry, MatchDetail,
    MatchSummary,
};
use crate::formations::{self, SquadFormat};
use crate::lineup::LineupBoard;
use crate::rating::{self, PlayerStat, StatField};
use crate::roster_parse::ParsedRoster;
use crate::session::AuthUser;

const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Matches,
    Import,
    Tactics,
    Stats,
    Leaderboard,
}

/// Requests the UI sends to the API worker. One command maps to one or more
/// sequential HTTP calls; the worker answers with exactly one terminal
/// `Delta` per command.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    Login {
        username: String,
        password: String,
    },
    FetchMatches {
        date: Option<String>,
    },
    FetchMatch {
        id: i64,
        target: DetailTarget,
    },
    DeleteMatch {
        id: i64,
    },
    /// Create the match, bulk-import the parsed roster, then set the
    /// formation. No rollback on partial failure.
    ImportRoster {
        request: CreateMatchRequest,
        players: Vec<ImportPlayer>,
        formation: String,
    },
    SaveLineup {
        match_id: i64,
        formation: String,
        players: Vec<ImportPlayer>,
    },
    SaveStats {
        match_id: i64,
        request: BatchStatsRequest,
    },
    FetchLeaderboard,
    Geocode {
        address: String,
    },
}

/// Which editing session a fetched match detail is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTarget {
    Tactics,
    Stats,
}

#[derive(Debug, Clone)]
pub enum Delta {
    LoginOk(AuthUser),
    LoginFailed(String),
    Matches(Vec<MatchSummary>),
    MatchesFailed(String),
    Match {
        detail: Box<MatchDetail>,
        target: DetailTarget,
    },
    MatchFailed {
        message: String,
        target: DetailTarget,
    },
    MatchDeleted(i64),
    RosterImported {
        match_id: i64,
    },
    ImportFailed(String),
    LineupSaved,
    StatsSaved,
    SaveFailed {
        message: String,
        target: DetailTarget,
    },
    Leaderboard(Vec<LeaderboardEntry>),
    LeaderboardFailed(String),
    Geocoded {
        address: String,
        lat: f64,
        lng: f64,
    },
    Log(String),
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus_password: bool,
    pub error: String,
    pub in_flight: bool,
}

#[derive(Debug, Clone)]
pub struct ImportForm {
    pub format: SquadFormat,
    pub formation_idx: usize,
    pub text: String,
    pub editing: bool,
    pub parsed: Option<ParsedRoster>,
    pub saving: bool,
}

impl ImportForm {
    pub fn new() -> Self {
        ImportForm {
            format: SquadFormat::FiveASide,
            formation_idx: 0,
            text: String::new(),
            editing: false,
            parsed: None,
            saving: false,
        }
    }

    pub fn formation(&self) -> &'static str {
        let names = formations::formation_names(self.format);
        names[self.formation_idx.min(names.len() - 1)]
    }

    pub fn cycle_format(&mut self) {
        self.format = self.format.next();
        self.formation_idx = 0;
        self.parsed = None;
    }

    pub fn cycle_formation(&mut self) {
        let count = formations::formation_names(self.format).len();
        self.formation_idx = (self.formation_idx + 1) % count;
    }
}

impl Default for ImportForm {
    fn default() -> Self {
        ImportForm::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TacticsFocus {
    Pitch,
    Bench,
}

#[derive(Debug)]
pub struct TacticsSession {
    pub match_id: i64,
    pub summary: MatchSummary,
    pub format: SquadFormat,
    pub formation: String,
    pub board: LineupBoard,
    /// Display-scale ratings derived from recorded stats, by player id.
    pub stats_rating: HashMap<i64, u32>,
    pub focus: TacticsFocus,
    pub cursor: usize,
    pub saving: bool,
}

impl TacticsSession {
    pub fn from_detail(detail: MatchDetail, editable: bool) -> Self {
        let format = SquadFormat::parse(&detail.summary.format).unwrap_or(SquadFormat::FiveASide);
        let formation = detail
            .summary
            .formation
            .clone()
            .filter(|name| formations::formation_slots(format, name).is_some())
            .unwrap_or_else(|| formations::default_formation(format).to_string());

        let stats_rating = detail
            .stats
            .iter()
            .map(|stat| {
                let rating10 = rating::rating(rating::Stats {
                    goals: stat.goals,
                    assists: stat.assists,
                    interceptions: stat.interceptions,
                    yellow_cards: stat.yellow_cards,
                    red_cards: stat.red_cards,
                });
                (stat.player_id, rating::display_rating(rating10))
            })
            .collect();

        let board =
            LineupBoard::from_registrations(&detail.registrations, format.squad_size(), editable);

        TacticsSession {
            match_id: detail.summary.id,
            summary: detail.summary,
            format,
            formation,
            board,
            stats_rating,
            focus: TacticsFocus::Pitch,
            cursor: 0,
            saving: false,
        }
    }

    /// Adopts the next formation of the same squad size. Players keep their
    /// slot indices; only the coordinate template changes.
    pub fn cycle_formation(&mut self) {
        let names = formations::formation_names(self.format);
        let current = names
            .iter()
            .position(|name| *name == self.formation)
            .unwrap_or(0);
        let next = names[(current + 1) % names.len()];
        if next != self.formation {
            if let Some(slots) = formations::formation_slots(self.format, next) {
                debug_assert_eq!(slots.len(), self.board.squad_size());
            }
            self.formation = next.to_string();
            self.board.mark_dirty();
        }
    }

    /// Badge rating: stats-derived when the match has a recorded stat line
    /// for the player, otherwise the imported rating.
    pub fn badge_rating(&self, player_id: i64, fallback: u32) -> u32 {
        self.stats_rating
            .get(&player_id)
            .copied()
            .unwrap_or(fallback)
    }
}

#[derive(Debug)]
pub struct StatsSession {
    pub match_id: i64,
    pub summary: MatchSummary,
    pub stats: Vec<PlayerStat>,
    pub home_score: i64,
    pub away_score: i64,
    pub selected: usize,
    pub field: usize,
    pub saving: bool,
}

impl StatsSession {
    /// One editable stat row per starter, seeded from recorded stats where
    /// they exist and a zero baseline otherwise.
    pub fn from_detail(detail: MatchDetail) -> Self {
        let mut stats: Vec<PlayerStat> = detail
            .registrations
            .iter()
            .filter(|reg| reg.is_starter)
            .map(|reg| {
                let mut row = PlayerStat::baseline(reg.player_id, reg.display_name());
                if let Some(record) = detail.stats.iter().find(|s| s.player_id == reg.player_id) {
                    row.goals = record.goals;
                    row.assists = record.assists;
                    row.interceptions = record.interceptions;
                    row.yellow_cards = record.yellow_cards;
                    row.red_cards = record.red_cards;
                    row.is_mvp = record.is_mvp;
                }
                row
            })
            .collect();
        rating::evaluate_mvp(&mut stats);

        StatsSession {
            match_id: detail.summary.id,
            home_score: detail.summary.home_score,
            away_score: detail.summary.away_score,
            summary: detail.summary,
            stats,
            selected: 0,
            field: 0,
            saving: false,
        }
    }

    pub fn current_field(&self) -> StatField {
        StatField::ALL[self.field % StatField::ALL.len()]
    }

    pub fn adjust(&mut self, delta: i32) {
        let field = self.current_field();
        rating::adjust_stat(&mut self.stats, self.selected, field, delta);
    }

    pub fn adjust_score(&mut self, home: bool, delta: i64) {
        let target = if home {
            &mut self.home_score
        } else {
            &mut self.away_score
        };
        *target = (*target + delta).max(0);
    }

    pub fn request(&self) -> BatchStatsRequest {
        BatchStatsRequest {
            stats: self.stats.clone(),
            home_score: self.home_score,
            away_score: self.away_score,
            formation: self.summary.formation.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardTab {
    Goals,
    Assists,
    Interceptions,
    Overview,
}

impl LeaderboardTab {
    pub fn label(self) -> &'static str {
        match self {
            LeaderboardTab::Goals => "Goals",
            LeaderboardTab::Assists => "Assists",
            LeaderboardTab::Interceptions => "Interceptions",
            LeaderboardTab::Overview => "Overview",
        }
    }

    pub fn next(self) -> Self {
        match self {
            LeaderboardTab::Goals => LeaderboardTab::Assists,
            LeaderboardTab::Assists => LeaderboardTab::Interceptions,
            LeaderboardTab::Interceptions => LeaderboardTab::Overview,
            LeaderboardTab::Overview => LeaderboardTab::Goals,
        }
    }
}

pub struct AppState {
    pub screen: Screen,
    pub user: Option<AuthUser>,

    pub login: LoginForm,

    pub matches: Vec<MatchSummary>,
    pub match_selected: usize,
    pub matches_loading: bool,
    pub matches_error: String,
    pub filter_date: String,
    pub editing_filter: bool,
    pub confirm_delete: Option<i64>,

    pub import: ImportForm,
    pub tactics: Option<TacticsSession>,
    pub tactics_loading: bool,
    pub stats: Option<StatsSession>,
    pub stats_loading: bool,
    /// Match to open in tactics once an import round-trip completes.
    pub pending_open: Option<i64>,

    pub leaderboard: Vec<LeaderboardEntry>,
    pub leaderboard_tab: LeaderboardTab,
    pub leaderboard_loading: bool,
    pub leaderboard_scroll: usize,

    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(user: Option<AuthUser>) -> Self {
        let screen = if user.is_some() {
            Screen::Matches
        } else {
            Screen::Login
        };
        AppState {
            screen,
            user,
            login: LoginForm::default(),
            matches: Vec::new(),
            match_selected: 0,
            matches_loading: false,
            matches_error: String::new(),
            filter_date: String::new(),
            editing_filter: false,
            confirm_delete: None,
            import: ImportForm::new(),
            tactics: None,
            tactics_loading: false,
            stats: None,
            stats_loading: false,
            pending_open: None,
            leaderboard: Vec::new(),
            leaderboard_tab: LeaderboardTab::Goals,
            leaderboard_loading: false,
            leaderboard_scroll: 0,
            logs: VecDeque::new(),
        }
    }

    pub fn can_edit(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.can_edit())
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        if self.logs.len() >= LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(msg.into());
    }

    pub fn last_log(&self) -> Option<&str> {
        self.logs.back().map(String::as_str)
    }

    pub fn selected_match(&self) -> Option<&MatchSummary> {
        self.matches.get(self.match_selected)
    }

    pub fn select_next_match(&mut self) {
        if !self.matches.is_empty() {
            self.match_selected = (self.match_selected + 1).min(self.matches.len() - 1);
        }
    }

    pub fn select_prev_match(&mut self) {
        self.match_selected = self.match_selected.saturating_sub(1);
    }

    pub fn clamp_match_selection(&mut self) {
        if self.matches.is_empty() {
            self.match_selected = 0;
        } else {
            self.match_selected = self.match_selected.min(self.matches.len() - 1);
        }
    }

    /// Drops every session; called on logout.
    pub fn reset_to_login(&mut self) {
        *self = AppState::new(None);
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::LoginOk(user) => {
            state.login.in_flight = false;
            state.login.error.clear();
            state.login.password.clear();
            state.user = Some(user);
            state.screen = Screen::Matches;
            state.matches_loading = true;
        }
        Delta::LoginFailed(message) => {
            state.login.in_flight = false;
            state.login.error = message;
        }
        Delta::Matches(matches) => {
            state.matches = matches;
            state.matches_loading = false;
            state.matches_error.clear();
            state.clamp_match_selection();
        }
        Delta::MatchesFailed(message) => {
            state.matches_loading = false;
            state.matches_error = "cannot reach server".to_string();
            state.push_log(format!("[WARN] match list fetch failed: {message}"));
        }
        Delta::Match { detail, target } => match target {
            DetailTarget::Tactics => {
                state.tactics_loading = false;
                state.tactics = Some(TacticsSession::from_detail(*detail, state.can_edit()));
                state.screen = Screen::Tactics;
            }
            DetailTarget::Stats => {
                state.stats_loading = false;
                state.stats = Some(StatsSession::from_detail(*detail));
                state.screen = Screen::Stats;
            }
        },
        Delta::MatchFailed { message, target } => {
            match target {
                DetailTarget::Tactics => state.tactics_loading = false,
                DetailTarget::Stats => state.stats_loading = false,
            }
            state.push_log(format!("[WARN] match fetch failed: {message}"));
        }
        Delta::MatchDeleted(id) => {
            state.matches.retain(|m| m.id != id);
            state.clamp_match_selection();
            state.push_log("[INFO] match deleted");
        }
        Delta::RosterImported { match_id } => {
            state.import.saving = false;
            state.import.text.clear();
            state.import.parsed = None;
            state.pending_open = Some(match_id);
            state.push_log("[INFO] roster imported");
        }
        Delta::ImportFailed(message) => {
            state.import.saving = false;
            state.push_log(format!("[WARN] import failed: {message}"));
        }
        Delta::LineupSaved => {
            if let Some(tactics) = state.tactics.as_mut() {
                tactics.saving = false;
                tactics.board.clear_dirty();
                tactics.summary.formation = Some(tactics.formation.clone());
            }
            state.push_log("[INFO] formation saved");
        }
        Delta::StatsSaved => {
            if let Some(stats) = state.stats.as_mut() {
                stats.saving = false;
            }
            state.push_log("[INFO] match stats saved");
        }
        Delta::SaveFailed { message, target } => {
            match target {
                DetailTarget::Tactics => {
                    if let Some(tactics) = state.tactics.as_mut() {
                        tactics.saving = false;
                    }
                }
                DetailTarget::Stats => {
                    if let Some(stats) = state.stats.as_mut() {
                        stats.saving = false;
                    }
                }
            }
            state.push_log(format!("[WARN] save failed: {message}"));
        }
        Delta::Leaderboard(entries) => {
            state.leaderboard = entries;
            state.leaderboard_loading = false;
        }
        Delta::LeaderboardFailed(message) => {
            state.leaderboard_loading = false;
            state.push_log(format!("[WARN] leaderboard fetch failed: {message}"));
        }
        Delta::Geocoded { address, lat, lng } => {
            state.push_log(format!("[INFO] {address} -> {lat:.5},{lng:.5}"));
        }
        Delta::Log(message) => state.push_log(message),
    }
}
