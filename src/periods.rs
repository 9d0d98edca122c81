use crate::error::{AppError, Result};

pub const MIN_MATCHUP_PERIOD: u32 = 1;
pub const MAX_MATCHUP_PERIOD: u32 = 16;

/// Scoring periods (league days) making up each matchup period, in order.
/// Index 0 is matchup period 1. Matchup period 11 spans the All-Star break,
/// so scoring periods 74-78 belong to no matchup.
const SCORING_PERIODS: [&[u32]; MAX_MATCHUP_PERIOD as usize] = [
    &[1, 2, 3, 4, 5, 6],
    &[7, 8, 9, 10, 11, 12, 13],
    &[14, 15, 16, 17, 18, 19, 20],
    &[21, 22, 23, 24, 25, 26, 27],
    &[28, 29, 30, 31, 32, 33, 34],
    &[35, 36, 37, 38, 39, 40, 41],
    &[42, 43, 44, 45, 46, 47, 48],
    &[49, 50, 51, 52, 53, 54, 55],
    &[56, 57, 58, 59, 60, 61, 62],
    &[63, 64, 65, 66, 67, 68, 69],
    &[70, 71, 72, 73, 79, 80, 81, 82, 83],
    &[84, 85, 86, 87, 88, 89, 90],
    &[91, 92, 93, 94, 95, 96, 97],
    &[98, 99, 100, 101, 102, 103, 104],
    &[105, 106, 107, 108, 109, 110, 111],
    &[112, 113, 114, 115, 116, 117, 118],
];

/// Scoring periods of `matchup_period`.
///
/// Panics outside `MIN_MATCHUP_PERIOD..=MAX_MATCHUP_PERIOD`; callers go
/// through [`MatchupRange`] first.
pub fn scoring_periods_of(matchup_period: u32) -> &'static [u32] {
    assert!(
        is_valid_matchup_period(matchup_period),
        "matchup period {matchup_period} out of range"
    );
    SCORING_PERIODS[(matchup_period - MIN_MATCHUP_PERIOD) as usize]
}

pub fn is_valid_matchup_period(matchup_period: u32) -> bool {
    (MIN_MATCHUP_PERIOD..=MAX_MATCHUP_PERIOD).contains(&matchup_period)
}

/// Inclusive, validated range of matchup periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchupRange {
    lower: u32,
    upper: u32,
}

impl MatchupRange {
    pub fn new(lower: u32, upper: u32) -> Result<Self> {
        for bound in [lower, upper] {
            if !is_valid_matchup_period(bound) {
                return Err(AppError::Config(format!(
                    "matchup period must be between {MIN_MATCHUP_PERIOD} and {MAX_MATCHUP_PERIOD}, got {bound}"
                )));
            }
        }
        if lower > upper {
            return Err(AppError::Config(format!(
                "invalid range: lower bound {lower} is greater than upper bound {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }

    pub fn len(&self) -> usize {
        (self.upper - self.lower + 1) as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.lower..=self.upper
    }
}
