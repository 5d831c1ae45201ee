use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::broadcast::Broadcaster;
use crate::models::events::ServerEvent;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.broadcaster))
}

async fn handle_socket(socket: WebSocket, hub: Broadcaster) {
    let session_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the handshake so nothing published after `connected`
    // can be missed.
    let mut rx = hub.subscribe();

    tracing::info!(
        "Client connected: {} ({} connected)",
        session_id,
        hub.client_count()
    );

    let hello = match serde_json::to_string(&ServerEvent::connected()) {
        Ok(hello) => hello,
        Err(e) => {
            tracing::error!("Failed to encode handshake: {}", e);
            return;
        }
    };
    if sender.send(Message::Text(hello.into())).await.is_err() {
        tracing::info!("Client disconnected: {}", session_id);
        return;
    }

    // Task: forward broadcast events to this client
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(payload) => {
                    if sender.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Client {} lagged, skipped {} event(s)", session_id, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Task: drain incoming frames; clients only ever close
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::info!("Client disconnected: {}", session_id);
}
