//! Typed view of the league API payloads.
//!
//! Every field defaults when absent so extraction stays best-effort, but a
//! field of the wrong JSON type fails deserialization and aborts the unit.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Stat id of minutes played inside a stat line's `stats` container.
/// Tied to the league API schema version; a different id means the payload
/// format changed.
pub const MINUTES_PLAYED_STAT_ID: usize = 28;

// ---------------------------------------------------------------------------
// Schedule document
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub schedule: Vec<ScheduleEntry>,
}

/// One home-vs-away pairing. A missing side (bye) reads as team 0 with no points.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub home: TeamSide,
    #[serde(deserialize_with = "null_as_default")]
    pub away: TeamSide,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamSide {
    #[serde(deserialize_with = "null_as_default")]
    pub team_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_points: f64,
    /// Keyed by scoring period id as a string. A null value reads as 0.
    #[serde(deserialize_with = "null_points_as_zero")]
    pub points_by_scoring_period: HashMap<String, f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub roster_for_current_scoring_period: Roster,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Roster {
    #[serde(deserialize_with = "null_as_default")]
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub player_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub lineup_slot_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub player_pool_entry: PlayerPoolEntry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerPoolEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub applied_stat_total: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub player: Player,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub stats: Vec<StatLine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatLine {
    #[serde(deserialize_with = "null_as_default")]
    pub pro_team_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub applied_total: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub scoring_period_id: i64,
    /// Either an array indexed by stat id or an object keyed by it.
    pub stats: Value,
}

impl StatLine {
    pub fn stat(&self, stat_id: usize) -> f64 {
        let value = match &self.stats {
            Value::Array(items) => items.get(stat_id),
            Value::Object(map) => map.get(&stat_id.to_string()),
            _ => None,
        };
        value.and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn minutes_played(&self) -> i64 {
        whole(self.stat(MINUTES_PLAYED_STAT_ID))
    }
}

impl RosterEntry {
    /// Minutes from the first stat line of the pool entry, 0 when absent.
    pub fn minutes_played(&self) -> i64 {
        self.player_pool_entry
            .player
            .stats
            .first()
            .map(StatLine::minutes_played)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Player info document
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerInfoDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<PlayerInfoEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerInfoEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub player: Player,
}

/// Points arrive as floats; records keep whole points, truncated toward zero.
pub fn whole(points: f64) -> i64 {
    points.trunc() as i64
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_points_as_zero<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let points: HashMap<String, Option<f64>> = null_as_default(deserializer)?;
    Ok(points
        .into_iter()
        .map(|(period, value)| (period, value.unwrap_or_default()))
        .collect())
}
