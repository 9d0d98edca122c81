use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{Config, LEAGUE_VIEWS, PRO_PLAYERS_LIMIT};
use crate::document::{PlayerInfoDocument, ScheduleDocument};
use crate::error::{AppError, Result};

const FANTASY_FILTER_HEADER: &str = "x-fantasy-filter";

/// Longest response body kept in a status error.
const ERROR_BODY_LIMIT: usize = 500;

/// League data queries the extraction pipeline depends on.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Schedule with season-to-date totals and per-scoring-period points,
    /// restricted to one matchup period.
    async fn fetch_for_matchup_period(&self, matchup_period: u32) -> Result<ScheduleDocument>;

    /// Same schedule, with rosters as they stood on `scoring_period`.
    async fn fetch_for_scoring_period(
        &self,
        matchup_period: u32,
        scoring_period: u32,
    ) -> Result<ScheduleDocument>;
}

/// League-wide player stat lines, independent of fantasy rosters.
#[async_trait]
pub trait PlayerStatsSource: Send + Sync {
    async fn fetch_player_stats(&self) -> Result<PlayerInfoDocument>;
}

// ---------------------------------------------------------------------------
// ESPN client
// ---------------------------------------------------------------------------

/// Authenticated client for one league season.
///
/// Every request is bounded by `http_timeout_secs` from the config. A call that
/// stalls past it fails as `AppError::Http`, which aborts only the matchup
/// period (or pro-player dump) that issued it. There are no retries.
pub struct EspnClient {
    client: reqwest::Client,
    league_url: String,
}

impl EspnClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let cookie = format!("swid={}; espn_s2={}", cfg.swid_cookie, cfg.espn_s2_cookie);
        let mut cookie = HeaderValue::from_str(&cookie)
            .map_err(|_| AppError::Config("cookies contain invalid header characters".to_string()))?;
        cookie.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            league_url: league_url(cfg),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, filter: String) -> Result<T> {
        debug!(%url, %filter, "[HTTP] GET");
        let resp = self
            .client
            .get(url)
            .header(FANTASY_FILTER_HEADER, filter)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status != reqwest::StatusCode::OK {
            let cut = body.char_indices().nth(ERROR_BODY_LIMIT).map_or(body.len(), |(i, _)| i);
            return Err(AppError::Status {
                status: status.as_u16(),
                body: body[..cut].to_string(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl StatsSource for EspnClient {
    async fn fetch_for_matchup_period(&self, matchup_period: u32) -> Result<ScheduleDocument> {
        let url = format!("{}?{}", self.league_url, views_query());
        self.get_json(&url, schedule_filter(matchup_period)).await
    }

    async fn fetch_for_scoring_period(
        &self,
        matchup_period: u32,
        scoring_period: u32,
    ) -> Result<ScheduleDocument> {
        let url = format!(
            "{}?scoringPeriodId={}&{}",
            self.league_url,
            scoring_period,
            views_query()
        );
        self.get_json(&url, schedule_filter(matchup_period)).await
    }
}

#[async_trait]
impl PlayerStatsSource for EspnClient {
    async fn fetch_player_stats(&self) -> Result<PlayerInfoDocument> {
        let url = format!("{}?view=kona_player_info", self.league_url);
        self.get_json(&url, players_filter(PRO_PLAYERS_LIMIT)).await
    }
}

fn league_url(cfg: &Config) -> String {
    format!(
        "{}/seasons/{}/segments/0/leagues/{}",
        cfg.api_url.trim_end_matches('/'),
        cfg.season,
        cfg.league_id
    )
}

fn views_query() -> String {
    LEAGUE_VIEWS
        .iter()
        .map(|v| format!("view={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Restricts the schedule to one matchup period.
fn schedule_filter(matchup_period: u32) -> String {
    serde_json::json!({
        "schedule": { "filterMatchupPeriodIds": { "value": [matchup_period] } }
    })
    .to_string()
}

fn players_filter(limit: u32) -> String {
    serde_json::json!({ "players": { "limit": limit } }).to_string()
}
