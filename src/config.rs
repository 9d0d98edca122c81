use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const ESPN_API_URL: &str = "https://fantasy.espn.com/apis/v3/games/fba";

/// Season the period table below was laid out for.
pub const DEFAULT_SEASON: u16 = 2021;

pub const DEFAULT_OUTPUT_DIR: &str = "generated/csv";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Views requested on every league call. `mBoxscore` and `mRoster` carry the
/// per-period points and lineups; the rest keep the payload shape stable.
pub const LEAGUE_VIEWS: &[&str] = &[
    "mBoxscore",
    "mMatchupScore",
    "mRoster",
    "mSettings",
    "mStatus",
    "mTeam",
    "modular",
    "mNav",
];

/// Max players requested from the player-info view.
pub const PRO_PLAYERS_LIMIT: u32 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub league_id: u64,
    /// `swid` cookie (SWID_COOKIE)
    pub swid_cookie: String,
    /// `espn_s2` cookie (ESPNS2_COOKIE)
    pub espn_s2_cookie: String,
    pub season: u16,
    pub api_url: String,
    pub output_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        let league_id = required("LEAGUE_ID")?
            .parse::<u64>()
            .map_err(|_| AppError::Config("LEAGUE_ID must be a valid integer".to_string()))?;
        let swid_cookie = required("SWID_COOKIE")?;
        let espn_s2_cookie = required("ESPNS2_COOKIE")?;

        let season = match get("SEASON") {
            Some(s) => s
                .parse::<u16>()
                .map_err(|_| AppError::Config("SEASON must be a valid year".to_string()))?,
            None => DEFAULT_SEASON,
        };
        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(s) => s.parse::<u64>().map_err(|_| {
                AppError::Config("HTTP_TIMEOUT_SECS must be a number of seconds".to_string())
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            league_id,
            swid_cookie,
            espn_s2_cookie,
            season,
            api_url: get("ESPN_API_URL").unwrap_or_else(|| ESPN_API_URL.to_string()),
            output_dir: PathBuf::from(
                get("OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ),
            http_timeout_secs,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}
