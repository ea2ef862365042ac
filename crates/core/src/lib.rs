pub mod config;
pub mod draft;
pub mod ledger;
pub mod metrics;
pub mod player;
pub mod scoring;
pub mod selection;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    ServerConfig,
};
pub use draft::{
    Draft, DraftConfig, DraftError, DraftEvent, DraftEventSink, DraftOrchestrator, DraftSnapshot,
    DraftStatus, ErrorKind, NoopEventSink, Pick,
};
pub use ledger::{LeagueConfig, LedgerError, RosterLedger, SharedLedger, Team, TeamSeed, TeamView};
pub use player::{
    BuiltinCatalog, CatalogError, JsonFileCatalog, Player, PlayerCatalog, PlayerId, PlayerStats,
    Position, PositionCounts,
};
pub use scoring::{PlayerWithPoints, Scorer, StatLineScorer};
pub use selection::{NeedBasedPolicy, SelectionPolicy};
