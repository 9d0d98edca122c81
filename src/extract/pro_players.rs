use crate::document::{whole, PlayerInfoDocument};
use crate::types::ProPlayerScoringRecord;

/// One record per stat line per player.
pub fn extract_pro_player_scorings(doc: &PlayerInfoDocument) -> Vec<ProPlayerScoringRecord> {
    doc.players
        .iter()
        .flat_map(|entry| {
            let player = &entry.player;
            player.stats.iter().map(move |line| ProPlayerScoringRecord {
                pro_player_id: player.id,
                team_id: line.pro_team_id,
                fantasy_points: whole(line.applied_total),
                minutes_played: line.minutes_played(),
                scoring_period_id: line.scoring_period_id,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_record_per_stat_line() {
        let doc: PlayerInfoDocument = serde_json::from_str(
            r#"{"players":[
                {"player":{"id":11,"stats":[
                    {"proTeamId":5,"appliedTotal":32.5,"scoringPeriodId":12,"stats":{"28":31.0}},
                    {"proTeamId":5,"appliedTotal":18.0,"scoringPeriodId":13,"stats":{"28":22.0}}
                ]}},
                {"player":{"id":12,"stats":[]}},
                {"player":{"id":13,"stats":[{"proTeamId":9,"appliedTotal":-1.5,"scoringPeriodId":0}]}}
            ]}"#,
        )
        .unwrap();

        let records = extract_pro_player_scorings(&doc);
        assert_eq!(
            records,
            vec![
                ProPlayerScoringRecord {
                    pro_player_id: 11,
                    team_id: 5,
                    fantasy_points: 32,
                    minutes_played: 31,
                    scoring_period_id: 12,
                },
                ProPlayerScoringRecord {
                    pro_player_id: 11,
                    team_id: 5,
                    fantasy_points: 18,
                    minutes_played: 22,
                    scoring_period_id: 13,
                },
                ProPlayerScoringRecord {
                    pro_player_id: 13,
                    team_id: 9,
                    fantasy_points: -1,
                    minutes_played: 0,
                    scoring_period_id: 0,
                },
            ]
        );
    }
}
