//! Realtime Document Session
//!
//! One broker connection per open editor, scoped to a single document id.
//! The connection task drives the WebSocket; the session handle lives on
//! the UI side and is polled once per frame.
//!
//! State machine: `Disconnected -> Connecting -> Connected`. After the
//! broker acknowledges the connection the session publishes a "document
//! opened" notification and subscribes to that document's topic. Broadcast
//! payloads carry a server-assigned sequence number; the session applies a
//! broadcast only when its `seq` is newer than the last applied one, so
//! stale and duplicate pushes are dropped while the newest writer wins.
//!
//! A broker-reported error tears the session down to `Disconnected`; there
//! is no automatic reconnect. Reopening the document connects again.

use crate::app::feedback::Feedback;
use crate::app::realtime::stomp::{Command, Frame, FrameError};
use crate::shared::ClientError;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, Sender};
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

/// Destination of the "document opened" notification
const OPEN_DESTINATION: &str = "/app/chat.showDocs";

/// Connection state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting...",
            SessionState::Connected => "live",
        }
    }
}

/// Content pushed by the server for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBroadcast {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Server-assigned sequence number; higher wins
    pub seq: u64,
}

/// Body of the open notification
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenNotification {
    document_idx: String,
}

/// Events flowing from the connection task to the UI handle
#[derive(Debug)]
enum SessionEvent {
    StateChanged(SessionState),
    Broadcast(DocumentBroadcast),
    Failed(String),
}

enum SessionCommand {
    Shutdown,
}

/// Failures inside the connection task
#[derive(Debug, Error)]
enum SessionError {
    #[error("could not connect to the broker: {0}")]
    Connect(String),
    #[error("broker connection failed: {0}")]
    Transport(String),
    #[error("broker closed the connection during the handshake")]
    HandshakeClosed,
    #[error("broker error: {0}")]
    Broker(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("could not encode payload: {0}")]
    Encode(String),
}

/// UI-side handle for one document's realtime session.
pub struct DocumentSession {
    document_id: String,
    pub state: SessionState,
    pub title: String,
    pub buffer: String,
    last_seq: Option<u64>,
    events: Receiver<SessionEvent>,
    commands: tokio::sync::mpsc::UnboundedSender<SessionCommand>,
}

impl DocumentSession {
    /// Open a session: spawns the connection task and returns immediately
    /// in the `Connecting` state.
    pub fn open(runtime: &tokio::runtime::Handle, broker_url: &str, document_id: &str) -> Self {
        let (event_tx, event_rx) = std::sync::mpsc::channel();
        let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();
        runtime.spawn(run_connection(
            broker_url.to_string(),
            document_id.to_string(),
            event_tx,
            command_rx,
        ));
        Self {
            document_id: document_id.to_string(),
            state: SessionState::Connecting,
            title: String::new(),
            buffer: String::new(),
            last_seq: None,
            events: event_rx,
            commands: command_tx,
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// The broadcast topic for one document: scoped per document, so a
    /// session never receives another document's pushes.
    pub fn topic(document_id: &str) -> String {
        format!("/topic/docs.{}", document_id)
    }

    /// Last applied sequence number, if any broadcast arrived yet
    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }

    /// Drain events from the connection task; called once per frame.
    pub fn poll(&mut self, feedback: &mut Feedback) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SessionEvent::StateChanged(state) => self.state = state,
                SessionEvent::Broadcast(broadcast) => {
                    self.apply_broadcast(broadcast);
                }
                SessionEvent::Failed(message) => {
                    self.state = SessionState::Disconnected;
                    feedback.error(&ClientError::network(message));
                }
            }
        }
    }

    /// Monotonic last-writer-wins: replace the buffer only for a newer
    /// sequence number. Returns whether the broadcast was applied.
    pub fn apply_broadcast(&mut self, broadcast: DocumentBroadcast) -> bool {
        if let Some(last) = self.last_seq {
            if broadcast.seq <= last {
                tracing::debug!(
                    document_id = %self.document_id,
                    seq = broadcast.seq,
                    last,
                    "Dropping stale broadcast"
                );
                return false;
            }
        }
        self.last_seq = Some(broadcast.seq);
        self.title = broadcast.title;
        // Uncommitted local edits are replaced wholesale.
        self.buffer = broadcast.content;
        true
    }
}

impl Drop for DocumentSession {
    fn drop(&mut self) {
        // Deactivate on unmount; in-flight publishes are not flushed.
        let _ = self.commands.send(SessionCommand::Shutdown);
    }
}

/// Host portion of a ws:// or wss:// URL, for the CONNECT frame
fn host_of(broker_url: &str) -> &str {
    let without_scheme = broker_url
        .strip_prefix("ws://")
        .or_else(|| broker_url.strip_prefix("wss://"))
        .unwrap_or(broker_url);
    without_scheme
        .split_once('/')
        .map(|(host, _)| host)
        .unwrap_or(without_scheme)
}

async fn send_frame<S>(sink: &mut S, frame: Frame) -> Result<(), SessionError>
where
    S: SinkExt<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    sink.send(Message::Text(frame.encode()))
        .await
        .map_err(|e| SessionError::Transport(e.to_string()))
}

async fn run_connection(
    broker_url: String,
    document_id: String,
    events: Sender<SessionEvent>,
    mut commands: tokio::sync::mpsc::UnboundedReceiver<SessionCommand>,
) {
    tracing::info!(url = %broker_url, document_id = %document_id, "Opening realtime session");
    match drive_session(&broker_url, &document_id, &events, &mut commands).await {
        Ok(()) => {
            tracing::info!(document_id = %document_id, "Realtime session ended");
            let _ = events.send(SessionEvent::StateChanged(SessionState::Disconnected));
        }
        Err(error) => {
            tracing::error!(document_id = %document_id, error = %error, "Realtime session failed");
            let _ = events.send(SessionEvent::Failed(error.to_string()));
        }
    }
}

async fn drive_session(
    broker_url: &str,
    document_id: &str,
    events: &Sender<SessionEvent>,
    commands: &mut tokio::sync::mpsc::UnboundedReceiver<SessionCommand>,
) -> Result<(), SessionError> {
    let (ws_stream, _response) = connect_async(broker_url)
        .await
        .map_err(|e| SessionError::Connect(e.to_string()))?;
    let (mut sink, mut stream) = ws_stream.split();

    send_frame(&mut sink, Frame::connect(host_of(broker_url))).await?;

    // Await the broker's CONNECTED acknowledgment.
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => {
                let frame = Frame::parse(&text)?;
                match frame.command {
                    Command::Connected => break,
                    Command::Error => return Err(SessionError::Broker(error_detail(&frame))),
                    _ => continue,
                }
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(SessionError::Transport(e.to_string())),
            None => return Err(SessionError::HandshakeClosed),
        }
    }
    let _ = events.send(SessionEvent::StateChanged(SessionState::Connected));

    // Announce the open document, then subscribe to its topic.
    let notification = OpenNotification {
        document_idx: document_id.to_string(),
    };
    let body =
        serde_json::to_string(&notification).map_err(|e| SessionError::Encode(e.to_string()))?;
    send_frame(&mut sink, Frame::send(OPEN_DESTINATION, body)).await?;

    let subscription_id = Uuid::new_v4().to_string();
    let topic = DocumentSession::topic(document_id);
    send_frame(&mut sink, Frame::subscribe(&subscription_id, &topic)).await?;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                // Either an explicit shutdown or the handle was dropped.
                Some(SessionCommand::Shutdown) | None => {
                    let _ = send_frame(&mut sink, Frame::disconnect()).await;
                    return Ok(());
                }
            },
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let frame = Frame::parse(&text)?;
                    match frame.command {
                        Command::Message => match serde_json::from_str::<DocumentBroadcast>(&frame.body) {
                            Ok(broadcast) => {
                                let _ = events.send(SessionEvent::Broadcast(broadcast));
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, raw = %frame.body, "Malformed broadcast payload");
                            }
                        },
                        Command::Error => return Err(SessionError::Broker(error_detail(&frame))),
                        _ => {}
                    }
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                    // Handled automatically by tungstenite.
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(?frame, "Broker closed the session");
                    return Ok(());
                }
                Some(Ok(_)) => {
                    // Binary / Frame - ignore.
                }
                Some(Err(e)) => return Err(SessionError::Transport(e.to_string())),
                None => return Ok(()),
            }
        }
    }
}

/// Human-readable detail of an ERROR frame
fn error_detail(frame: &Frame) -> String {
    frame
        .header("message")
        .map(str::to_string)
        .unwrap_or_else(|| frame.body.clone())
}
