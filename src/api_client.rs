//! Typed client for the club backend. Every endpoint lives under
//! `{FC_API_BASE}` (default `http://localhost:4000/api`); responses are
//! parsed by standalone `parse_*_json` functions so tests and benches can
//! exercise them against fixture bodies.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rating::PlayerStat;
use crate::session::AuthUser;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_BASE: &str = "http://localhost:4000/api";

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchSummary {
    pub id: i64,
    #[serde(default)]
    pub match_date: String,
    #[serde(default)]
    pub match_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub formation: Option<String>,
    #[serde(default)]
    pub registered_count: u32,
    #[serde(default)]
    pub home_score: i64,
    #[serde(default)]
    pub away_score: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl MatchSummary {
    /// Dates arrive either bare or as a full timestamp; only the day part is
    /// shown.
    pub fn date_label(&self) -> &str {
        self.match_date.split('T').next().unwrap_or("")
    }

    pub fn time_label(&self) -> &str {
        match &self.match_time {
            Some(t) if t.len() >= 5 => &t[..5],
            Some(t) => t,
            None => "",
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Registration {
    pub player_id: i64,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_position: Option<String>,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub position_index: Option<usize>,
    #[serde(default)]
    pub is_starter: bool,
}

impl Registration {
    pub fn display_name(&self) -> &str {
        self.player_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatRecord {
    pub player_id: i64,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub interceptions: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
    #[serde(default)]
    pub is_mvp: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub summary: MatchSummary,
    #[serde(default)]
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub stats: Vec<StatRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeaderboardEntry {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub preferred_position: Option<String>,
    #[serde(default)]
    pub total_goals: u32,
    #[serde(default)]
    pub total_assists: u32,
    #[serde(default)]
    pub total_interceptions: u32,
    #[serde(default)]
    pub mvp_count: u32,
    #[serde(default)]
    pub matches_played: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMatchRequest {
    pub match_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedMatch {
    pub id: i64,
}

/// One row of the bulk player import. `position_index` serializes as an
/// explicit null for bench entries, matching what the server expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportPlayer {
    pub name: String,
    pub preferred_position: String,
    pub rating: u32,
    pub position_index: Option<usize>,
    pub is_starter: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchStatsRequest {
    pub stats: Vec<PlayerStat>,
    pub home_score: i64,
    pub away_score: i64,
    pub formation: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeocodeResult {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    pub fn from_env() -> Self {
        let base = std::env::var("FC_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        ApiClient {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        ApiClient {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::json!({ "username": username, "password": password });
        let raw = self.post_json("/auth/login", &body)?;
        serde_json::from_str(&raw).context("invalid login response")
    }

    pub fn matches(&self, date: Option<&str>) -> Result<Vec<MatchSummary>> {
        let path = match date.filter(|d| !d.trim().is_empty()) {
            Some(date) => format!("/matches?date={date}"),
            None => "/matches".to_string(),
        };
        let raw = self.get(&path)?;
        parse_matches_json(&raw)
    }

    pub fn match_detail(&self, id: i64) -> Result<MatchDetail> {
        let raw = self.get(&format!("/matches/{id}"))?;
        parse_match_detail_json(&raw)
    }

    pub fn create_match(&self, req: &CreateMatchRequest) -> Result<CreatedMatch> {
        let raw = self.post_json("/matches", req)?;
        serde_json::from_str(&raw).context("invalid create-match response")
    }

    /// Partial update; only the fields present in `body` change.
    pub fn update_match(&self, id: i64, body: &Value) -> Result<()> {
        let client = http_client()?;
        let resp = client
            .put(self.url(&format!("/matches/{id}")))
            .json(body)
            .send()
            .context("request failed")?;
        check_status(resp.status())?;
        Ok(())
    }

    pub fn delete_match(&self, id: i64) -> Result<()> {
        let client = http_client()?;
        let resp = client
            .delete(self.url(&format!("/matches/{id}")))
            .send()
            .context("request failed")?;
        check_status(resp.status())?;
        Ok(())
    }

    pub fn import_players(&self, match_id: i64, players: &[ImportPlayer]) -> Result<()> {
        let body = serde_json::json!({ "players": players });
        self.post_json(&format!("/matches/{match_id}/import-players"), &body)?;
        Ok(())
    }

    pub fn batch_save_stats(&self, match_id: i64, req: &BatchStatsRequest) -> Result<()> {
        self.post_json(&format!("/matches/{match_id}/batch-stats"), req)?;
        Ok(())
    }

    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let raw = self.get("/stats/leaderboard")?;
        parse_leaderboard_json(&raw)
    }

    pub fn geocode(&self, address: &str) -> Result<GeocodeResult> {
        let client = http_client()?;
        let resp = client
            .get(self.url("/geocode"))
            .query(&[("address", address)])
            .send()
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            bail!("http {status}: {body}");
        }
        serde_json::from_str(&body).context("invalid geocode response")
    }

    fn get(&self, path: &str) -> Result<String> {
        let client = http_client()?;
        let resp = client.get(self.url(path)).send().context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            bail!("http {status}: {body}");
        }
        Ok(body)
    }

    fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<String> {
        let client = http_client()?;
        let resp = client
            .post(self.url(path))
            .json(body)
            .send()
            .context("request failed")?;
        let status = resp.status();
        let text = resp.text().context("failed reading body")?;
        if !status.is_success() {
            bail!("http {status}: {text}");
        }
        Ok(text)
    }
}

fn check_status(status: reqwest::StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        bail!("http {status}")
    }
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchSummary>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid matches json")
}

pub fn parse_match_detail_json(raw: &str) -> Result<MatchDetail> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        bail!("match not found");
    }
    serde_json::from_str(trimmed).context("invalid match json")
}

pub fn parse_leaderboard_json(raw: &str) -> Result<Vec<LeaderboardEntry>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid leaderboard json")
}
