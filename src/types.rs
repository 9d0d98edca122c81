use serde::Deserialize;

/// A flat record that can be written as one row of a table with a fixed header.
pub trait TabularRecord {
    const HEADER: &'static [&'static str];

    /// Field values in `HEADER` order.
    fn to_row(&self) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// Matchup
// ---------------------------------------------------------------------------

/// Final result of one home-vs-away pairing over a whole matchup period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatchupRecord {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_points: i64,
    pub away_points: i64,
    /// Matchup period the totals belong to.
    #[serde(rename = "period_id")]
    pub matchup_period_id: u32,
}

impl TabularRecord for MatchupRecord {
    const HEADER: &'static [&'static str] = &[
        "home_team_id",
        "away_team_id",
        "home_points",
        "away_points",
        "period_id",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.home_team_id.to_string(),
            self.away_team_id.to_string(),
            self.home_points.to_string(),
            self.away_points.to_string(),
            self.matchup_period_id.to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Points of one pairing within a single scoring period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoringRecord {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_points: i64,
    pub away_points: i64,
    pub matchup_period_id: u32,
    #[serde(rename = "period_id")]
    pub scoring_period_id: u32,
}

impl TabularRecord for ScoringRecord {
    const HEADER: &'static [&'static str] = &[
        "home_team_id",
        "away_team_id",
        "home_points",
        "away_points",
        "matchup_period_id",
        "period_id",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.home_team_id.to_string(),
            self.away_team_id.to_string(),
            self.home_points.to_string(),
            self.away_points.to_string(),
            self.matchup_period_id.to_string(),
            self.scoring_period_id.to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Rostered player
// ---------------------------------------------------------------------------

/// One lineup slot of a fantasy team on a given scoring period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosteredPlayerRecord {
    pub pro_player_id: i64,
    pub team_id: i64,
    pub fantasy_points: i64,
    pub lineup_slot_id: i64,
    pub minutes_played: i64,
    pub scoring_period_id: u32,
}

impl TabularRecord for RosteredPlayerRecord {
    const HEADER: &'static [&'static str] = &[
        "pro_player_id",
        "team_id",
        "fantasy_points",
        "lineup_slot_id",
        "minutes_played",
        "scoring_period_id",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.pro_player_id.to_string(),
            self.team_id.to_string(),
            self.fantasy_points.to_string(),
            self.lineup_slot_id.to_string(),
            self.minutes_played.to_string(),
            self.scoring_period_id.to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Pro player scoring
// ---------------------------------------------------------------------------

/// One stat line of a pro player, independent of fantasy rosters.
/// `team_id` is the player's NBA team, not a fantasy team.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProPlayerScoringRecord {
    pub pro_player_id: i64,
    pub team_id: i64,
    pub fantasy_points: i64,
    pub minutes_played: i64,
    pub scoring_period_id: i64,
}

impl TabularRecord for ProPlayerScoringRecord {
    const HEADER: &'static [&'static str] = &[
        "pro_player_id",
        "team_id",
        "fantasy_points",
        "minutes_played",
        "scoring_period_id",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.pro_player_id.to_string(),
            self.team_id.to_string(),
            self.fantasy_points.to_string(),
            self.minutes_played.to_string(),
            self.scoring_period_id.to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Row counts written for one matchup period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSummary {
    pub matchups: usize,
    pub scorings: usize,
    pub rostered_players: usize,
}

impl std::fmt::Display for PeriodSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "matchups={} scorings={} rostered_players={}",
            self.matchups, self.scorings, self.rostered_players
        )
    }
}
