//! WebSocket relay for agent communication.
//!
//! Every inbound text frame is routed through the [`MessageRouter`] and
//! answered with exactly one text frame. The loop ends on the first frame it
//! cannot serve. A client-initiated close or a vanished peer is an expected
//! disconnect; everything else is answered with a close frame whose code
//! says why.
//!
//! [`MessageRouter`]: nexus_core::MessageRouter

use std::time::Duration;

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;

use nexus_core::CollaboratorError;

use crate::state::AppState;

/// Close reasons are limited to 123 bytes by RFC 6455.
const MAX_CLOSE_REASON: usize = 123;

/// Upper bound on flushing the reply to a client close frame.
const CLOSE_REPLY_TIMEOUT: Duration = Duration::from_secs(1);

/// `GET /ws/agent-communication`
pub async fn agent_communication(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| relay_messages(socket, state))
}

/// Why the relay loop stopped.
#[derive(Debug)]
enum RelayEnd {
    /// Peer sent a close frame.
    ClientClosed(Option<u16>),
    /// Stream ended or a send failed.
    Disconnected,
    /// Reading a frame failed.
    ProtocolError(String),
    /// Peer sent a binary frame.
    UnsupportedData,
    /// The router could not answer.
    RouterFailed(CollaboratorError),
}

impl RelayEnd {
    /// Close frame to send, if the server should initiate the close.
    fn close_frame(&self) -> Option<CloseFrame> {
        let (code, reason) = match self {
            RelayEnd::ClientClosed(_) | RelayEnd::Disconnected => return None,
            RelayEnd::ProtocolError(_) => (close_code::PROTOCOL, "protocol error".to_string()),
            RelayEnd::UnsupportedData => (
                close_code::UNSUPPORTED,
                "binary frames are not supported".to_string(),
            ),
            RelayEnd::RouterFailed(CollaboratorError::Validation(msg)) => {
                (close_code::POLICY, truncate_reason(msg))
            }
            RelayEnd::RouterFailed(CollaboratorError::Internal(_)) => {
                (close_code::ERROR, "internal error".to_string())
            }
        };
        Some(CloseFrame {
            code,
            reason: reason.into(),
        })
    }
}

fn truncate_reason(msg: &str) -> String {
    if msg.len() <= MAX_CLOSE_REASON {
        return msg.to_string();
    }
    let mut end = MAX_CLOSE_REASON;
    while !msg.is_char_boundary(end) {
        end -= 1;
    }
    msg[..end].to_string()
}

async fn relay_messages(mut socket: WebSocket, state: AppState) {
    let _connection = state.track_connection();
    tracing::info!(connections = state.connection_count(), "agent socket opened");

    let end = loop {
        let message = match socket.recv().await {
            None => break RelayEnd::Disconnected,
            Some(Err(err)) => break RelayEnd::ProtocolError(err.to_string()),
            Some(Ok(message)) => message,
        };

        match message {
            Message::Text(text) => match state.message_router.route(text.as_str()).await {
                Ok(reply) => {
                    if socket.send(Message::Text(reply.into())).await.is_err() {
                        break RelayEnd::Disconnected;
                    }
                }
                Err(err) => break RelayEnd::RouterFailed(err),
            },
            Message::Binary(_) => break RelayEnd::UnsupportedData,
            Message::Close(frame) => break RelayEnd::ClientClosed(frame.map(|f| f.code)),
            // Pings are answered by the transport.
            Message::Ping(_) | Message::Pong(_) => {}
        }
    };

    match &end {
        RelayEnd::ClientClosed(code) => tracing::debug!(?code, "agent socket closed by client"),
        RelayEnd::Disconnected => tracing::debug!("agent socket disconnected"),
        RelayEnd::ProtocolError(err) => {
            tracing::warn!(error = %err, "agent socket protocol error")
        }
        RelayEnd::UnsupportedData => tracing::warn!("agent socket sent binary frame"),
        RelayEnd::RouterFailed(CollaboratorError::Internal(err)) => {
            tracing::error!(error = %err, "agent message routing failed")
        }
        RelayEnd::RouterFailed(err) => tracing::warn!(error = %err, "agent message rejected"),
    }

    if let Some(frame) = end.close_frame() {
        // Best effort: the peer may already be gone.
        let _ = socket.send(Message::Close(Some(frame))).await;
    } else if matches!(end, RelayEnd::ClientClosed(_)) {
        // The close reply is queued by the transport and only written on the
        // next read, which then reports the connection as closed.
        let _ = tokio::time::timeout(CLOSE_REPLY_TIMEOUT, socket.recv()).await;
    }

    tracing::info!(
        connections = state.connection_count().saturating_sub(1),
        "agent socket finished"
    );
}
