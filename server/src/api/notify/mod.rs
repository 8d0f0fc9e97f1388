//! Live notification WebSocket
//!
//! `GET /api/notify/ws?token=<jwt>` upgrades to a WebSocket that streams
//! [`NotifyMessage`] events as JSON text frames. Browsers cannot set an
//! Authorization header on an upgrade request, so the token travels in
//! the query string; the middleware skips this path and the handler
//! validates the token itself before upgrading.
//!
//! [`NotifyMessage`]: shared::message::NotifyMessage

use axum::{
    Router,
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/notify/ws", get(upgrade))
}

#[derive(Debug, Deserialize)]
struct WsQuery {
    token: String,
}

async fn upgrade(
    State(state): State<ServerState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let claims = state
        .jwt_service
        .validate_token(&query.token)
        .map_err(|_| AppError::invalid_token("Invalid token"))?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state, socket, claims.username)))
}

async fn handle_socket(state: ServerState, socket: WebSocket, username: String) {
    let connection_id = Uuid::new_v4().to_string();
    let mut rx = state.notify.register(connection_id.clone());
    tracing::debug!(%connection_id, %username, "notification connection opened");

    let (mut sender, mut receiver) = socket.split();

    // Forward broadcast events to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let Ok(text) = serde_json::to_string(&message) else {
                continue;
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Clients only listen; the read side just watches for close
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.notify.unregister(&connection_id);
    tracing::debug!(%connection_id, "notification connection closed");
}
