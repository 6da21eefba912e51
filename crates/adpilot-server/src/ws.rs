use std::sync::Arc;

use adpilot_core::Message as ChatMessage;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tracing::{error, info, warn};

use crate::dto::{WsPayload, WsResponse};
use crate::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

fn encode(response: &WsResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(text) => Some(text),
        Err(e) => {
            error!("Failed to encode ws response: {}", e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut uuid = uuid::Uuid::new_v4().to_string();
    // Generated ids are private to this connection; client-supplied ones may
    // be resumed later.
    let mut generated_uuid = true;

    while let Some(Ok(msg)) = receiver.next().await {
        let Message::Text(text) = msg else { continue };

        let payload: WsPayload = match serde_json::from_str(&text) {
            Ok(p) => p,
            Err(e) => {
                error!("JSON parse error: {}", e);
                continue;
            }
        };

        if payload.init {
            if let Some(id) = payload.uuid.filter(|id| !id.trim().is_empty()) {
                if generated_uuid {
                    state.remove_conversation(&uuid);
                }
                uuid = id;
                generated_uuid = false;
            }
            info!("Connection initialized: {}", uuid);
            continue;
        }

        let Some(message) = payload.message else { continue };

        let preview: String = message.chars().take(50).collect();
        info!("Message from {}: {}...", uuid, preview);

        let Some(reply) = chat_turn(&state, &uuid, message).await else {
            continue;
        };

        let (Some(stream_msg), Some(end_msg)) =
            (encode(&WsResponse::stream(&reply)), encode(&WsResponse::end()))
        else {
            break;
        };

        if sender.send(Message::Text(stream_msg.into())).await.is_err() {
            break;
        }
        if sender.send(Message::Text(end_msg.into())).await.is_err() {
            break;
        }
    }

    if generated_uuid {
        state.remove_conversation(&uuid);
    }
    info!("Connection closed: {}", uuid);
}

/// Runs one chat turn for `uuid`. Blank messages get no reply, and only turns
/// the backend actually answered are kept in the transcript.
async fn chat_turn(state: &AppState, uuid: &str, message: String) -> Option<String> {
    if message.trim().is_empty() {
        return None;
    }

    let history = state.get_conversation(uuid);
    let outcome = state.advisor.chat_turn(&message, &history).await;

    if outcome.is_fallback() {
        warn!("Not keeping fallback turn for {}", uuid);
    } else {
        state.add_message(uuid, ChatMessage::user(message));
        state.add_message(uuid, ChatMessage::model(outcome.value().clone()));
    }

    Some(outcome.into_value())
}
