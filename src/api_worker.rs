use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use serde_json::json;

use crate::api_client::{ApiClient, CreateMatchRequest, ImportPlayer};
use crate::state::{ApiCommand, Delta, DetailTarget};

/// Runs all HTTP on a dedicated thread so the draw loop never blocks.
/// Commands arrive over `cmd_rx`; every command produces exactly one
/// terminal delta on `tx`.
pub fn spawn_api_worker(tx: Sender<Delta>, cmd_rx: Receiver<ApiCommand>) {
    thread::spawn(move || {
        let client = ApiClient::from_env();
        while let Ok(cmd) = cmd_rx.recv() {
            let delta = execute(&client, cmd);
            if tx.send(delta).is_err() {
                break;
            }
        }
    });
}

/// One command in, one terminal delta out.
pub fn execute(client: &ApiClient, cmd: ApiCommand) -> Delta {
    match cmd {
        ApiCommand::Login { username, password } => {
            match client.login(&username, &password) {
                Ok(resp) => match resp.user {
                    Some(user) if resp.success => Delta::LoginOk(user),
                    _ => Delta::LoginFailed("invalid credentials".to_string()),
                },
                Err(err) => Delta::LoginFailed(format!("{err:#}")),
            }
        }
        ApiCommand::FetchMatches { date } => match client.matches(date.as_deref()) {
            Ok(matches) => Delta::Matches(matches),
            Err(err) => Delta::MatchesFailed(format!("{err:#}")),
        },
        ApiCommand::FetchMatch { id, target } => match client.match_detail(id) {
            Ok(detail) => Delta::Match {
                detail: Box::new(detail),
                target,
            },
            Err(err) => Delta::MatchFailed {
                message: format!("{err:#}"),
                target,
            },
        },
        ApiCommand::DeleteMatch { id } => match client.delete_match(id) {
            Ok(()) => Delta::MatchDeleted(id),
            Err(err) => Delta::Log(format!("[WARN] delete failed: {err:#}")),
        },
        ApiCommand::ImportRoster {
            request,
            players,
            formation,
        } => match import_roster(client, &request, &players, &formation) {
            Ok(match_id) => Delta::RosterImported { match_id },
            Err(err) => Delta::ImportFailed(format!("{err:#}")),
        },
        ApiCommand::SaveLineup {
            match_id,
            formation,
            players,
        } => {
            // A board with no placed players still saves its formation, but
            // an empty bulk import would wipe the server-side roster.
            let result = client
                .update_match(match_id, &json!({ "formation": formation }))
                .and_then(|()| {
                    if players.is_empty() {
                        Ok(())
                    } else {
                        client.import_players(match_id, &players)
                    }
                });
            match result {
                Ok(()) => Delta::LineupSaved,
                Err(err) => Delta::SaveFailed {
                    message: format!("{err:#}"),
                    target: DetailTarget::Tactics,
                },
            }
        }
        ApiCommand::SaveStats { match_id, request } => {
            match client.batch_save_stats(match_id, &request) {
                Ok(()) => Delta::StatsSaved,
                Err(err) => Delta::SaveFailed {
                    message: format!("{err:#}"),
                    target: DetailTarget::Stats,
                },
            }
        }
        ApiCommand::FetchLeaderboard => match client.leaderboard() {
            Ok(entries) => Delta::Leaderboard(entries),
            Err(err) => Delta::LeaderboardFailed(format!("{err:#}")),
        },
        ApiCommand::Geocode { address } => match client.geocode(&address) {
            Ok(result) => match (result.lat, result.lng) {
                (Some(lat), Some(lng)) => Delta::Geocoded { address, lat, lng },
                _ => Delta::Log(format!("[WARN] no coordinates for {address}")),
            },
            Err(err) => Delta::Log(format!("[WARN] geocode failed: {err:#}")),
        },
    }
}

/// Create, import, then set the formation. The steps run in order and the
/// first failure wins; a half-created match is left as-is for the user to
/// delete from the match list.
fn import_roster(
    client: &ApiClient,
    request: &CreateMatchRequest,
    players: &[ImportPlayer],
    formation: &str,
) -> anyhow::Result<i64> {
    let created = client.create_match(request)?;
    client.import_players(created.id, players)?;
    client.update_match(created.id, &json!({ "formation": formation }))?;
    Ok(created.id)
}
