//! Players, positions and the catalog they are loaded from.

mod catalog;
mod types;

pub use catalog::{parse_catalog, BuiltinCatalog, CatalogError, JsonFileCatalog, PlayerCatalog};
pub use types::{Player, PlayerId, PlayerStats, Position, PositionCounts};
