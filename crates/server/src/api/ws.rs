//! WebSocket support for live draft updates.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use draftroom_core::{Draft, DraftError, DraftEventSink, DraftSnapshot, Pick, Team};

use crate::metrics::{WS_CONNECTIONS_ACTIVE, WS_CONNECTIONS_TOTAL, WS_LAG_EVENTS, WS_MESSAGES_SENT};
use crate::state::AppState;

/// Replies queued for a single client.
const REPLY_BUFFER: usize = 16;

/// WebSocket message sent to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Full draft state, sent in reply to `get_state`.
    DraftState { state: DraftSnapshot },
    /// A pick was made.
    DraftPick { pick: Pick, draft: Draft },
    /// Pick timer tick.
    TimerUpdate {
        remaining_secs: u64,
        team_id: String,
        team_name: String,
    },
    /// The pick timer ran out; an automatic pick follows.
    TimeExpired { team_id: String, team_name: String },
    /// The draft reached completion.
    DraftCompleted { draft: Draft },
    /// A client request was rejected.
    DraftError { message: String, kind: String },
}

impl WsMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            WsMessage::DraftState { .. } => "draft_state",
            WsMessage::DraftPick { .. } => "draft_pick",
            WsMessage::TimerUpdate { .. } => "timer_update",
            WsMessage::TimeExpired { .. } => "time_expired",
            WsMessage::DraftCompleted { .. } => "draft_completed",
            WsMessage::DraftError { .. } => "draft_error",
        }
    }

    fn rejected(err: &DraftError) -> Self {
        WsMessage::DraftError {
            message: err.to_string(),
            kind: err.kind().as_str().to_string(),
        }
    }
}

/// Message sent by a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    GetState,
    SelectPlayer { team_id: String, player_id: String },
    RequestAutodraft,
}

/// Broadcaster for WebSocket messages using tokio broadcast channel.
///
/// Doubles as the orchestrator's event sink.
#[derive(Debug, Clone)]
pub struct WsBroadcaster {
    sender: broadcast::Sender<WsMessage>,
}

impl WsBroadcaster {
    /// Create a new broadcaster with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Broadcast a message to all connected clients.
    pub fn broadcast(&self, msg: WsMessage) {
        // Ignore send errors - they just mean no one is listening
        let _ = self.sender.send(msg);
    }

    /// Subscribe to receive messages.
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.sender.subscribe()
    }
}

impl Default for WsBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}

impl DraftEventSink for WsBroadcaster {
    fn on_pick(&self, pick: &Pick, draft: &Draft) {
        self.broadcast(WsMessage::DraftPick {
            pick: pick.clone(),
            draft: draft.clone(),
        });
    }

    fn on_timer_tick(&self, remaining_secs: u64, team: &Team) {
        self.broadcast(WsMessage::TimerUpdate {
            remaining_secs,
            team_id: team.id.clone(),
            team_name: team.name.clone(),
        });
    }

    fn on_time_expired(&self, team: &Team) {
        self.broadcast(WsMessage::TimeExpired {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
        });
    }

    fn on_completed(&self, draft: &Draft) {
        self.broadcast(WsMessage::DraftCompleted {
            draft: draft.clone(),
        });
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle a single WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe to broadcast messages
    let mut rx = state.ws_broadcaster().subscribe();
    let (reply_tx, mut reply_rx) = mpsc::channel::<WsMessage>(REPLY_BUFFER);

    // Track connection metrics
    WS_CONNECTIONS_TOTAL.inc();
    WS_CONNECTIONS_ACTIVE.inc();

    info!("WebSocket client connected");

    // Forward broadcasts and direct replies to this client
    let send_task = tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                result = rx.recv() => match result {
                    Ok(msg) => msg,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("WebSocket client lagged, skipped {} messages", n);
                        WS_LAG_EVENTS.inc();
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                },
                reply = reply_rx.recv() => match reply {
                    Some(msg) => msg,
                    None => break,
                },
            };

            WS_MESSAGES_SENT
                .with_label_values(&[msg.message_type()])
                .inc();

            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        debug!("WebSocket send failed, client disconnected");
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize WsMessage: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from client
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Close(_)) => {
                debug!("WebSocket client requested close");
                break;
            }
            Ok(Message::Text(text)) => {
                let reply = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(msg) => handle_client_message(&state, msg).await,
                    Err(e) => {
                        debug!("Unrecognised client message: {}", e);
                        Some(WsMessage::DraftError {
                            message: format!("invalid message: {}", e),
                            kind: "bad_request".to_string(),
                        })
                    }
                };
                if let Some(reply) = reply {
                    if reply_tx.send(reply).await.is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {
                // Ping/pong is handled by axum; binary frames are ignored
            }
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        }
    }

    // Clean up
    send_task.abort();
    WS_CONNECTIONS_ACTIVE.dec();
    info!("WebSocket client disconnected");
}

/// Act on a client request. Successful picks reach every client through the
/// broadcast channel, so only state dumps and errors are answered directly.
async fn handle_client_message(state: &AppState, msg: ClientMessage) -> Option<WsMessage> {
    let orchestrator = state.orchestrator();
    match msg {
        ClientMessage::GetState => Some(WsMessage::DraftState {
            state: orchestrator.snapshot().await,
        }),
        ClientMessage::SelectPlayer { team_id, player_id } => orchestrator
            .attempt_pick(&team_id, &player_id)
            .await
            .err()
            .map(|e| WsMessage::rejected(&e)),
        ClientMessage::RequestAutodraft => orchestrator
            .autodraft()
            .await
            .err()
            .map(|e| WsMessage::rejected(&e)),
    }
}
