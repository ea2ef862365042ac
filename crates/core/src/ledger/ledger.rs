//! The roster ledger: authoritative player and team state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::config::LeagueConfig;
use super::types::{LedgerError, Team, TeamView};
use crate::player::Player;

/// Ledger shared between the draft orchestrator and read-only API handlers.
pub type SharedLedger = Arc<RwLock<RosterLedger>>;

/// Owns every `Player` and `Team` for the session.
///
/// Players are kept in catalog order. Mutations validate everything before
/// touching any state, so a failed call leaves the ledger unchanged.
#[derive(Debug, Clone)]
pub struct RosterLedger {
    league: LeagueConfig,
    catalog: Vec<Player>,
    players: Vec<Player>,
    player_index: HashMap<String, usize>,
    teams: Vec<Team>,
    team_index: HashMap<String, usize>,
}

impl RosterLedger {
    /// Build a ledger from the loaded catalog and the league layout.
    pub fn new(catalog: Vec<Player>, league: LeagueConfig) -> Self {
        let mut ledger = Self {
            league,
            catalog,
            players: Vec::new(),
            player_index: HashMap::new(),
            teams: Vec::new(),
            team_index: HashMap::new(),
        };
        ledger.reset_all();
        ledger
    }

    /// Wrap into the shared handle used by the orchestrator.
    pub fn shared(self) -> SharedLedger {
        Arc::new(RwLock::new(self))
    }

    pub fn league(&self) -> &LeagueConfig {
        &self.league
    }

    pub fn list_players(&self) -> &[Player] {
        &self.players
    }

    /// Undrafted players in catalog order.
    pub fn list_available(&self) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| !p.is_drafted)
            .cloned()
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_drafted).count()
    }

    pub fn get_player(&self, id: &str) -> Option<&Player> {
        self.player_index.get(id).map(|&i| &self.players[i])
    }

    /// Teams in league (draft) order.
    pub fn list_teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_ids(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.id.clone()).collect()
    }

    pub fn get_team(&self, id: &str) -> Option<&Team> {
        self.team_index.get(id).map(|&i| &self.teams[i])
    }

    /// Players on a team, in pick order.
    pub fn roster_players(&self, team_id: &str) -> Option<Vec<Player>> {
        let team = self.get_team(team_id)?;
        Some(
            team.roster
                .iter()
                .filter_map(|id| self.get_player(id).cloned())
                .collect(),
        )
    }

    pub fn team_view(&self, team_id: &str) -> Option<TeamView> {
        let team = self.get_team(team_id)?;
        Some(self.view_of(team))
    }

    pub fn team_views(&self) -> Vec<TeamView> {
        self.teams.iter().map(|t| self.view_of(t)).collect()
    }

    fn view_of(&self, team: &Team) -> TeamView {
        TeamView {
            id: team.id.clone(),
            name: team.name.clone(),
            owner: team.owner.clone(),
            roster: team
                .roster
                .iter()
                .filter_map(|id| self.get_player(id).cloned())
                .collect(),
            position_counts: team.position_counts,
            max_positions: team.max_positions,
        }
    }

    /// Put a player on a team's roster.
    ///
    /// Sets the drafted flag and owner, appends to the roster and bumps the
    /// position count as one step.
    pub fn assign_player_to_team(&mut self, team_id: &str, player_id: &str) -> Result<(), LedgerError> {
        let team_idx = *self
            .team_index
            .get(team_id)
            .ok_or_else(|| LedgerError::TeamNotFound(team_id.to_string()))?;
        let player_idx = *self
            .player_index
            .get(player_id)
            .ok_or_else(|| LedgerError::PlayerNotFound(player_id.to_string()))?;

        let player = &self.players[player_idx];
        if player.is_drafted {
            return Err(LedgerError::AlreadyDrafted(player_id.to_string()));
        }
        let position = player.position;
        if !self.teams[team_idx].has_room_for(position) {
            return Err(LedgerError::PositionFull {
                team_id: team_id.to_string(),
                position,
            });
        }

        let player = &mut self.players[player_idx];
        player.is_drafted = true;
        player.drafted_by = Some(team_id.to_string());

        let team = &mut self.teams[team_idx];
        team.roster.push(player_id.to_string());
        *team.position_counts.get_mut(position) += 1;

        debug!("Assigned {} ({}) to {}", player_id, position, team_id);
        Ok(())
    }

    /// Take a player off a team's roster and return them to the pool.
    pub fn unassign_player_from_team(
        &mut self,
        team_id: &str,
        player_id: &str,
    ) -> Result<(), LedgerError> {
        let team_idx = *self
            .team_index
            .get(team_id)
            .ok_or_else(|| LedgerError::TeamNotFound(team_id.to_string()))?;
        let player_idx = *self
            .player_index
            .get(player_id)
            .ok_or_else(|| LedgerError::PlayerNotFound(player_id.to_string()))?;

        let roster_pos = self.teams[team_idx]
            .roster
            .iter()
            .position(|id| id == player_id)
            .ok_or_else(|| LedgerError::NotOnRoster {
                team_id: team_id.to_string(),
                player_id: player_id.to_string(),
            })?;

        let player = &mut self.players[player_idx];
        player.is_drafted = false;
        player.drafted_by = None;
        let position = player.position;

        let team = &mut self.teams[team_idx];
        team.roster.remove(roster_pos);
        let count = team.position_counts.get_mut(position);
        *count = count.saturating_sub(1);

        debug!("Released {} from {}", player_id, team_id);
        Ok(())
    }

    /// Restore every player to undrafted and recreate empty teams.
    pub fn reset_all(&mut self) {
        self.players = self
            .catalog
            .iter()
            .cloned()
            .map(|mut p| {
                p.is_drafted = false;
                p.drafted_by = None;
                p
            })
            .collect();
        self.player_index = self
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        let max = self.league.max_positions;
        self.teams = self
            .league
            .teams
            .iter()
            .map(|seed| Team::from_seed(seed, max))
            .collect();
        self.team_index = self
            .teams
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
    }

    /// Check the roster bookkeeping of every team.
    ///
    /// Counts must sum to the roster length, stay within the position
    /// maximums, and every rostered player must point back at its team.
    pub fn invariants_hold(&self) -> bool {
        self.teams.iter().all(|team| {
            let sum_ok = team.position_counts.total() as usize == team.roster.len();
            let max_ok = crate::player::Position::ALL
                .iter()
                .all(|p| team.position_counts.get(*p) <= team.max_positions.get(*p));
            let owners_ok = team.roster.iter().all(|id| {
                self.get_player(id)
                    .map(|p| p.is_drafted && p.drafted_by.as_deref() == Some(team.id.as_str()))
                    .unwrap_or(false)
            });
            sum_ok && max_ok && owners_ok
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Position, PositionCounts};

    fn ledger() -> RosterLedger {
        let players = vec![
            Player::new("c1", "Catcher One", Position::Catcher, 10.0),
            Player::new("c2", "Catcher Two", Position::Catcher, 8.0),
            Player::new("p1", "Pitcher One", Position::Pitcher, 20.0),
            Player::new("of1", "Outfielder One", Position::Outfield, 30.0),
        ];
        RosterLedger::new(players, LeagueConfig::default())
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = ledger();
        assert_eq!(ledger.list_players().len(), 4);
        assert_eq!(ledger.list_available().len(), 4);
        assert_eq!(ledger.list_teams().len(), 4);
        assert!(ledger.list_teams().iter().all(|t| t.roster.is_empty()));
        assert!(ledger.invariants_hold());
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let ledger = ledger();
        assert!(ledger.get_player("nope").is_none());
        assert!(ledger.get_team("nope").is_none());
        assert!(ledger.roster_players("nope").is_none());
    }

    #[test]
    fn test_assign_updates_both_sides() {
        let mut ledger = ledger();
        ledger.assign_player_to_team("team-1", "p1").unwrap();

        let player = ledger.get_player("p1").unwrap();
        assert!(player.is_drafted);
        assert_eq!(player.drafted_by.as_deref(), Some("team-1"));

        let team = ledger.get_team("team-1").unwrap();
        assert_eq!(team.roster, vec!["p1".to_string()]);
        assert_eq!(team.position_counts.pitcher, 1);
        assert_eq!(ledger.list_available().len(), 3);
        assert!(ledger.invariants_hold());
    }

    #[test]
    fn test_assign_failures_leave_ledger_untouched() {
        let mut ledger = ledger();
        ledger.assign_player_to_team("team-1", "c1").unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.assign_player_to_team("team-9", "c2"),
            Err(LedgerError::TeamNotFound("team-9".to_string()))
        );
        assert_eq!(
            ledger.assign_player_to_team("team-1", "zz"),
            Err(LedgerError::PlayerNotFound("zz".to_string()))
        );
        assert_eq!(
            ledger.assign_player_to_team("team-2", "c1"),
            Err(LedgerError::AlreadyDrafted("c1".to_string()))
        );
        assert!(matches!(
            ledger.assign_player_to_team("team-1", "c2"),
            Err(LedgerError::PositionFull { position: Position::Catcher, .. })
        ));

        assert_eq!(ledger.list_players(), before.list_players());
        assert_eq!(ledger.list_teams(), before.list_teams());
        assert!(ledger.invariants_hold());
    }

    #[test]
    fn test_unassign_is_inverse() {
        let mut ledger = ledger();
        ledger.assign_player_to_team("team-2", "of1").unwrap();
        ledger.unassign_player_from_team("team-2", "of1").unwrap();

        let player = ledger.get_player("of1").unwrap();
        assert!(!player.is_drafted);
        assert!(player.drafted_by.is_none());
        let team = ledger.get_team("team-2").unwrap();
        assert!(team.roster.is_empty());
        assert_eq!(team.position_counts, PositionCounts::default());
        assert!(ledger.invariants_hold());
    }

    #[test]
    fn test_unassign_requires_membership() {
        let mut ledger = ledger();
        ledger.assign_player_to_team("team-1", "of1").unwrap();

        assert!(matches!(
            ledger.unassign_player_from_team("team-2", "of1"),
            Err(LedgerError::NotOnRoster { .. })
        ));
        assert_eq!(
            ledger.unassign_player_from_team("team-1", "ghost"),
            Err(LedgerError::PlayerNotFound("ghost".to_string()))
        );
        assert!(ledger.get_player("of1").unwrap().is_drafted);
    }

    #[test]
    fn test_reset_all_restores_catalog() {
        let mut ledger = ledger();
        ledger.assign_player_to_team("team-1", "c1").unwrap();
        ledger.assign_player_to_team("team-2", "p1").unwrap();

        ledger.reset_all();

        assert_eq!(ledger.list_available().len(), 4);
        assert!(ledger.list_teams().iter().all(|t| t.roster.is_empty()));
        assert!(ledger.invariants_hold());
    }

    #[test]
    fn test_team_view_resolves_roster() {
        let mut ledger = ledger();
        ledger.assign_player_to_team("team-3", "of1").unwrap();
        ledger.assign_player_to_team("team-3", "c2").unwrap();

        let view = ledger.team_view("team-3").unwrap();
        let names: Vec<_> = view.roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Outfielder One", "Catcher Two"]);
    }
}
