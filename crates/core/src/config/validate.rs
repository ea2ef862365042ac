use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration.
///
/// Checks the server port, the draft timing values, and that the league can
/// actually fill a roster of `draft.roster_capacity` players.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(invalid("server.port cannot be 0"));
    }

    // Draft validation
    let draft = &config.draft;
    if draft.seconds_per_pick == 0 {
        return Err(invalid("draft.seconds_per_pick must be greater than 0"));
    }
    if draft.tick_interval_ms == 0 {
        return Err(invalid("draft.tick_interval_ms must be greater than 0"));
    }
    if draft.roster_capacity == 0 {
        return Err(invalid("draft.roster_capacity must be greater than 0"));
    }

    // League validation
    let league = &config.league;
    if league.teams.is_empty() {
        return Err(invalid("league.teams must contain at least one team"));
    }

    let mut seen = HashSet::new();
    for team in &league.teams {
        if !seen.insert(team.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate team id in league.teams: {}",
                team.id
            )));
        }
    }

    if !seen.contains(draft.designated_team_id.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "draft.designated_team_id {} is not a league team",
            draft.designated_team_id
        )));
    }

    let slots = league.max_positions.total() as usize;
    if slots < draft.roster_capacity {
        return Err(ConfigError::ValidationError(format!(
            "league.max_positions allows {} players, fewer than draft.roster_capacity ({})",
            slots, draft.roster_capacity
        )));
    }

    Ok(())
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::ValidationError(msg.to_string())
}
