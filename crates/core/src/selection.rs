//! Automatic player selection.
//!
//! The policy favours positions a team still has open slots for and falls
//! back to the best player overall once those are exhausted.

use std::cmp::Ordering;

use crate::ledger::Team;
use crate::player::{Player, Position};

/// How many position-need picks go into a suggestion list.
const NEEDED_SUGGESTIONS: usize = 2;

/// Default suggestion list length.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Chooses players on behalf of a team.
pub trait SelectionPolicy: Send + Sync {
    /// Best candidate for `team`, or `None` when `available` is empty.
    fn select_best(&self, team: &Team, available: &[Player]) -> Option<Player>;

    /// Up to `n` recommended players, best first.
    fn suggest(&self, team: &Team, available: &[Player], n: usize) -> Vec<Player>;
}

/// Open slots as a multiset: a position with three open slots appears three
/// times. Positions are emitted in canonical order.
pub fn needed_positions(team: &Team) -> Vec<Position> {
    Position::ALL
        .iter()
        .flat_map(|&p| std::iter::repeat(p).take(team.open_slots(p) as usize))
        .collect()
}

pub fn can_draft_position(team: &Team, position: Position) -> bool {
    team.has_room_for(position)
}

fn by_projection_desc(a: &Player, b: &Player) -> Ordering {
    b.projected_points.total_cmp(&a.projected_points)
}

/// Highest projection; the earliest player wins a tie.
fn best_of<'a>(players: impl Iterator<Item = &'a Player>) -> Option<&'a Player> {
    players.fold(None::<&'a Player>, |best, p| match best {
        Some(b) if p.projected_points <= b.projected_points => Some(b),
        _ => Some(p),
    })
}

/// Position-need-aware policy ranking by projected points.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedBasedPolicy;

impl SelectionPolicy for NeedBasedPolicy {
    fn select_best(&self, team: &Team, available: &[Player]) -> Option<Player> {
        let needed = needed_positions(team);
        best_of(available.iter().filter(|p| needed.contains(&p.position)))
            .or_else(|| best_of(available.iter()))
            .cloned()
    }

    fn suggest(&self, team: &Team, available: &[Player], n: usize) -> Vec<Player> {
        let needed = needed_positions(team);

        let mut by_need: Vec<&Player> = available
            .iter()
            .filter(|p| needed.contains(&p.position))
            .collect();
        by_need.sort_by(|a, b| by_projection_desc(a, b));
        by_need.truncate(NEEDED_SUGGESTIONS);

        let mut suggestions: Vec<Player> = by_need.into_iter().cloned().collect();
        if let Some(best) = best_of(available.iter()) {
            if !suggestions.iter().any(|p| p.id == best.id) {
                suggestions.push(best.clone());
            }
        }

        suggestions.sort_by(by_projection_desc);
        suggestions.truncate(n);
        suggestions
    }
}
