//! Player catalog loading.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::types::{Player, PlayerStats, Position};
use crate::scoring::Scorer;

const BUILTIN_PLAYERS: &str = include_str!("../../data/players.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate player id in catalog: {0}")]
    Duplicate(String),
}

/// Source of the initial player list.
pub trait PlayerCatalog: Send + Sync {
    fn load(&self) -> Result<Vec<Player>, CatalogError>;
}

/// Catalog record as stored on disk. `projectedPoints` is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRecord {
    id: String,
    name: String,
    position: Position,
    #[serde(default)]
    team: String,
    #[serde(default)]
    stats: PlayerStats,
    #[serde(default, alias = "projected_points")]
    projected_points: Option<f64>,
}

/// Parse a JSON array of players.
///
/// Every player comes out undrafted. Records without a projection get one
/// from `scorer`.
pub fn parse_catalog(json: &str, scorer: &dyn Scorer) -> Result<Vec<Player>, CatalogError> {
    let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut players = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id.clone()) {
            return Err(CatalogError::Duplicate(record.id));
        }
        let mut player = Player::new(record.id, record.name, record.position, 0.0)
            .with_stats(record.stats)
            .with_mlb_team(record.team);
        player.projected_points = record
            .projected_points
            .unwrap_or_else(|| scorer.score(&player));
        players.push(player);
    }

    Ok(players)
}

/// Catalog read from a JSON file on disk.
pub struct JsonFileCatalog {
    path: PathBuf,
    scorer: Box<dyn Scorer>,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>, scorer: Box<dyn Scorer>) -> Self {
        Self {
            path: path.into(),
            scorer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlayerCatalog for JsonFileCatalog {
    fn load(&self) -> Result<Vec<Player>, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::FileNotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let players = parse_catalog(&content, self.scorer.as_ref())?;
        debug!("Loaded {} players from {:?}", players.len(), self.path);
        Ok(players)
    }
}

/// Demo catalog compiled into the binary.
pub struct BuiltinCatalog {
    scorer: Box<dyn Scorer>,
}

impl BuiltinCatalog {
    pub fn new(scorer: Box<dyn Scorer>) -> Self {
        Self { scorer }
    }
}

impl PlayerCatalog for BuiltinCatalog {
    fn load(&self) -> Result<Vec<Player>, CatalogError> {
        parse_catalog(BUILTIN_PLAYERS, self.scorer.as_ref())
    }
}
