pub mod draft;
pub mod error;
pub mod handlers;
pub mod leaderboard;
pub mod middleware;
pub mod players;
pub mod routes;
pub mod teams;
pub mod ws;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use ws::{WsBroadcaster, WsMessage};
