use std::fs;
use std::path::PathBuf;

use fc_terminal::api_client::{MatchDetail, MatchSummary, parse_match_detail_json};
use fc_terminal::session::{AuthUser, Role};
use fc_terminal::state::{
    AppState, Delta, DetailTarget, Screen, TacticsFocus, apply_delta,
};

fn captain() -> AuthUser {
    AuthUser {
        id: 1,
        username: "captain".to_string(),
        display_name: "老张".to_string(),
        role: Role::Captain,
    }
}

fn viewer() -> AuthUser {
    AuthUser {
        id: 2,
        username: "viewer".to_string(),
        display_name: "小王".to_string(),
        role: Role::Player,
    }
}

fn summary(id: i64) -> MatchSummary {
    MatchSummary {
        id,
        match_date: "2024-03-15".to_string(),
        format: "5v5".to_string(),
        status: "upcoming".to_string(),
        ..MatchSummary::default()
    }
}

fn fixture_detail() -> MatchDetail {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("match_detail.json");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    parse_match_detail_json(&raw).expect("fixture should parse")
}

#[test]
fn login_moves_to_the_match_list() {
    let mut state = AppState::new(None);
    assert_eq!(state.screen, Screen::Login);
    state.login.in_flight = true;

    apply_delta(&mut state, Delta::LoginOk(captain()));
    assert_eq!(state.screen, Screen::Matches);
    assert!(state.matches_loading);
    assert!(!state.login.in_flight);
    assert!(state.login.password.is_empty());
    assert!(state.can_edit());
}

#[test]
fn failed_login_keeps_the_form_with_an_error() {
    let mut state = AppState::new(None);
    state.login.in_flight = true;
    apply_delta(&mut state, Delta::LoginFailed("invalid credentials".to_string()));
    assert_eq!(state.screen, Screen::Login);
    assert!(!state.login.in_flight);
    assert_eq!(state.login.error, "invalid credentials");
}

#[test]
fn player_accounts_are_read_only() {
    let state = AppState::new(Some(viewer()));
    assert_eq!(state.screen, Screen::Matches);
    assert!(!state.can_edit());
}

#[test]
fn match_list_replacement_clamps_the_selection() {
    let mut state = AppState::new(Some(captain()));
    apply_delta(
        &mut state,
        Delta::Matches(vec![summary(1), summary(2), summary(3)]),
    );
    state.match_selected = 2;

    apply_delta(&mut state, Delta::Matches(vec![summary(1)]));
    assert_eq!(state.match_selected, 0);
}

#[test]
fn deleting_a_match_drops_its_row() {
    let mut state = AppState::new(Some(captain()));
    apply_delta(&mut state, Delta::Matches(vec![summary(1), summary(2)]));
    apply_delta(&mut state, Delta::MatchDeleted(1));
    assert_eq!(state.matches.len(), 1);
    assert_eq!(state.matches[0].id, 2);
}

#[test]
fn fetched_detail_opens_the_tactics_board() {
    let mut state = AppState::new(Some(captain()));
    state.tactics_loading = true;
    apply_delta(
        &mut state,
        Delta::Match {
            detail: Box::new(fixture_detail()),
            target: DetailTarget::Tactics,
        },
    );

    assert_eq!(state.screen, Screen::Tactics);
    assert!(!state.tactics_loading);
    let tactics = state.tactics.as_ref().expect("tactics session exists");
    assert_eq!(tactics.match_id, 42);
    assert_eq!(tactics.formation, "1-2-1");
    assert_eq!(tactics.focus, TacticsFocus::Pitch);
    assert!(tactics.board.is_editable());

    // 张三 on slot 0, 李四 pinned to slot 2, 王五 takes the first open slot.
    assert_eq!(tactics.board.slot(0).map(|p| p.name.as_str()), Some("张三"));
    assert_eq!(tactics.board.slot(1).map(|p| p.name.as_str()), Some("王五"));
    assert_eq!(tactics.board.slot(2).map(|p| p.name.as_str()), Some("李四"));
    assert_eq!(tactics.board.bench().len(), 1);

    // Two goals and an assist: 8.5 on the ten scale, 94 on the badge.
    assert_eq!(tactics.badge_rating(1, 80), 94);
    // No stat line recorded for player 2, so the import rating stands.
    assert_eq!(tactics.badge_rating(2, 80), 80);
}

#[test]
fn read_only_detail_yields_a_locked_board() {
    let mut state = AppState::new(Some(viewer()));
    apply_delta(
        &mut state,
        Delta::Match {
            detail: Box::new(fixture_detail()),
            target: DetailTarget::Tactics,
        },
    );
    let tactics = state.tactics.as_ref().expect("tactics session exists");
    assert!(!tactics.board.is_editable());
}

#[test]
fn fetched_detail_seeds_the_stats_screen() {
    let mut state = AppState::new(Some(captain()));
    apply_delta(
        &mut state,
        Delta::Match {
            detail: Box::new(fixture_detail()),
            target: DetailTarget::Stats,
        },
    );

    assert_eq!(state.screen, Screen::Stats);
    let stats = state.stats.as_ref().expect("stats session exists");
    assert_eq!(stats.home_score, 3);
    assert_eq!(stats.away_score, 2);
    // One row per starter; the bench player is not editable here.
    assert_eq!(stats.stats.len(), 3);

    let zhang = stats
        .stats
        .iter()
        .find(|s| s.player_id == 1)
        .expect("张三 has a row");
    assert_eq!(zhang.goals, 2);
    assert_eq!(zhang.rating, 8.5);
    assert!(zhang.is_mvp);

    let wang = stats
        .stats
        .iter()
        .find(|s| s.player_id == 3)
        .expect("王五 has a row");
    assert_eq!(wang.yellow_cards, 1);
    assert!(!wang.is_mvp);
}

#[test]
fn import_completion_queues_the_new_match() {
    let mut state = AppState::new(Some(captain()));
    state.import.saving = true;
    state.import.text = "1. 张三".to_string();

    apply_delta(&mut state, Delta::RosterImported { match_id: 99 });
    assert!(!state.import.saving);
    assert!(state.import.text.is_empty());
    assert_eq!(state.pending_open, Some(99));
}

#[test]
fn save_failure_releases_only_its_own_in_flight_flag() {
    let mut state = AppState::new(Some(captain()));
    apply_delta(
        &mut state,
        Delta::Match {
            detail: Box::new(fixture_detail()),
            target: DetailTarget::Tactics,
        },
    );
    apply_delta(
        &mut state,
        Delta::Match {
            detail: Box::new(fixture_detail()),
            target: DetailTarget::Stats,
        },
    );
    state.tactics.as_mut().expect("tactics session exists").saving = true;
    state.stats.as_mut().expect("stats session exists").saving = true;

    apply_delta(
        &mut state,
        Delta::SaveFailed {
            message: "http 500".to_string(),
            target: DetailTarget::Tactics,
        },
    );
    assert!(!state.tactics.as_ref().expect("tactics session exists").saving);
    assert!(state.stats.as_ref().expect("stats session exists").saving);
    assert!(state.last_log().expect("log line exists").contains("save failed"));

    apply_delta(
        &mut state,
        Delta::SaveFailed {
            message: "http 500".to_string(),
            target: DetailTarget::Stats,
        },
    );
    assert!(!state.stats.as_ref().expect("stats session exists").saving);
}

#[test]
fn logout_drops_every_session() {
    let mut state = AppState::new(Some(captain()));
    apply_delta(&mut state, Delta::Matches(vec![summary(1)]));
    state.reset_to_login();
    assert_eq!(state.screen, Screen::Login);
    assert!(state.user.is_none());
    assert!(state.matches.is_empty());
}
