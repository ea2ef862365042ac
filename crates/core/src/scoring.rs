//! Fantasy point scoring.
//!
//! The scorer is a pure function of a player's stat line. The draft engine
//! never recomputes it; it is used to back-fill projections at catalog load
//! time and to total up rosters for the leaderboard.

use serde::Serialize;

use crate::player::Player;

/// Maps a player's statistics to a point value.
pub trait Scorer: Send + Sync {
    fn score(&self, player: &Player) -> f64;
}

/// Standard rotisserie-style stat line scoring.
///
/// Hitters: `avg * 100 + hr * 4 + rbi + sb * 2`.
/// Pitchers: `wins * 5 + strikeouts - era * 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatLineScorer;

impl Scorer for StatLineScorer {
    fn score(&self, player: &Player) -> f64 {
        let s = &player.stats;
        if player.position.is_pitcher() {
            s.wins * 5.0 + s.strikeouts - s.era * 2.0
        } else {
            s.batting_average * 100.0 + s.home_runs * 4.0 + s.rbi + s.stolen_bases * 2.0
        }
    }
}

/// A player together with its computed points.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerWithPoints {
    #[serde(flatten)]
    pub player: Player,
    pub points: f64,
}

/// Attach computed points to each player, preserving order.
pub fn with_points(scorer: &dyn Scorer, players: &[Player]) -> Vec<PlayerWithPoints> {
    players
        .iter()
        .map(|p| PlayerWithPoints {
            player: p.clone(),
            points: scorer.score(p),
        })
        .collect()
}

/// Sum of points over a roster.
pub fn team_points(scorer: &dyn Scorer, roster: &[Player]) -> f64 {
    roster.iter().map(|p| scorer.score(p)).sum()
}

/// The `n` highest-scoring players, best first.
pub fn top_players(scorer: &dyn Scorer, roster: &[Player], n: usize) -> Vec<PlayerWithPoints> {
    let mut scored = with_points(scorer, roster);
    scored.sort_by(|a, b| b.points.total_cmp(&a.points));
    scored.truncate(n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerStats, Position};

    fn hitter(name: &str, avg: f64, hr: f64, rbi: f64, sb: f64) -> Player {
        Player::new(name, name, Position::Outfield, 0.0).with_stats(PlayerStats {
            batting_average: avg,
            home_runs: hr,
            rbi,
            stolen_bases: sb,
            ..Default::default()
        })
    }

    #[test]
    fn test_hitter_formula() {
        let judge = hitter("judge", 0.311, 62.0, 131.0, 16.0);
        let points = StatLineScorer.score(&judge);
        // 31.1 + 248 + 131 + 32
        assert!((points - 442.1).abs() < 1e-9);
    }

    #[test]
    fn test_pitcher_formula() {
        let cole = Player::new("cole", "Gerrit Cole", Position::Pitcher, 0.0).with_stats(
            PlayerStats {
                wins: 15.0,
                strikeouts: 222.0,
                era: 2.5,
                // hitting stats are ignored for pitchers
                home_runs: 10.0,
                ..Default::default()
            },
        );
        assert_eq!(StatLineScorer.score(&cole), 75.0 + 222.0 - 5.0);
    }

    #[test]
    fn test_missing_stats_score_zero() {
        let blank = Player::new("x", "Blank", Position::Catcher, 0.0);
        assert_eq!(StatLineScorer.score(&blank), 0.0);
    }

    #[test]
    fn test_top_players_orders_and_truncates() {
        let roster = vec![
            hitter("a", 0.0, 1.0, 0.0, 0.0),
            hitter("b", 0.0, 5.0, 0.0, 0.0),
            hitter("c", 0.0, 3.0, 0.0, 0.0),
        ];
        let top = top_players(&StatLineScorer, &roster, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player.id, "b");
        assert_eq!(top[1].player.id, "c");
        assert_eq!(team_points(&StatLineScorer, &roster), 36.0);
    }
}
