//! STOMP Framing
//!
//! The broker exchanges STOMP frames as WebSocket text messages:
//! a command line, `name:value` header lines, a blank line, the body, and a
//! trailing NUL. Only the handful of commands the session needs is
//! implemented.

use thiserror::Error;

/// Frame commands used by the broker dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Connected,
    Send,
    Subscribe,
    Unsubscribe,
    Message,
    Error,
    Disconnect,
}

impl Command {
    fn as_str(self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Connected => "CONNECTED",
            Command::Send => "SEND",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Message => "MESSAGE",
            Command::Error => "ERROR",
            Command::Disconnect => "DISCONNECT",
        }
    }

    fn parse(line: &str) -> Option<Command> {
        match line {
            "CONNECT" => Some(Command::Connect),
            "CONNECTED" => Some(Command::Connected),
            "SEND" => Some(Command::Send),
            "SUBSCRIBE" => Some(Command::Subscribe),
            "UNSUBSCRIBE" => Some(Command::Unsubscribe),
            "MESSAGE" => Some(Command::Message),
            "ERROR" => Some(Command::Error),
            "DISCONNECT" => Some(Command::Disconnect),
            _ => None,
        }
    }
}

/// Frame parse failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame is missing the NUL terminator")]
    MissingTerminator,
    #[error("frame is missing the blank line after headers")]
    MissingBlankLine,
    #[error("frame is missing the command line")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("malformed header line: {0}")]
    MalformedHeader(String),
}

/// One STOMP frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    pub fn new(
        command: Command,
        headers: Vec<(String, String)>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            command,
            headers,
            body: body.into(),
        }
    }

    /// Handshake frame
    pub fn connect(host: &str) -> Self {
        Self::new(
            Command::Connect,
            vec![
                ("accept-version".to_string(), "1.2".to_string()),
                ("host".to_string(), host.to_string()),
            ],
            "",
        )
    }

    /// Subscribe to a destination under a client-chosen subscription id
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self::new(
            Command::Subscribe,
            vec![
                ("id".to_string(), id.to_string()),
                ("destination".to_string(), destination.to_string()),
                ("ack".to_string(), "auto".to_string()),
            ],
            "",
        )
    }

    /// Publish a JSON body to a destination
    pub fn send(destination: &str, body: String) -> Self {
        Self::new(
            Command::Send,
            vec![
                ("destination".to_string(), destination.to_string()),
                ("content-type".to_string(), "application/json".to_string()),
                ("content-length".to_string(), body.len().to_string()),
            ],
            body,
        )
    }

    pub fn disconnect() -> Self {
        Self::new(Command::Disconnect, Vec::new(), "")
    }

    /// First header with this name, if any
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Serialize to the wire text
    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            out.push_str(name);
            out.push(':');
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parse one frame from wire text
    pub fn parse(input: &str) -> Result<Frame, FrameError> {
        let input = input
            .strip_suffix('\0')
            .ok_or(FrameError::MissingTerminator)?;
        let (head, body) = match input.split_once("\n\n") {
            Some(parts) => parts,
            // A frame may legally have no body section at all.
            None => (input.strip_suffix('\n').unwrap_or(input), ""),
        };
        let mut lines = head.lines();
        let command_line = lines
            .next()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .ok_or(FrameError::MissingCommand)?;
        let command = Command::parse(command_line)
            .ok_or_else(|| FrameError::UnknownCommand(command_line.to_string()))?;
        let mut headers = Vec::new();
        for line in lines {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FrameError::MalformedHeader(line.to_string()))?;
            headers.push((name.to_string(), value.to_string()));
        }
        Ok(Frame {
            command,
            headers,
            body: body.to_string(),
        })
    }
}
