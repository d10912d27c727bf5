//! IRC message lines.
//!
//! A [`Message`] carries the two positional parameters the redirect filter
//! reads and rewrites (`target` and `body`) plus enough of the original line
//! to serialize it again and measure its size on the wire.

use std::fmt;

use crate::common::error::{ProtocolError, ProtocolResult};
use crate::protocol::ctcp;

/// Maximum length of a protocol line in bytes, excluding the CRLF terminator.
pub const MAX_LINE_BYTES: usize = 510;

/// Kind of message, derived from the command and CTCP framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Plain `PRIVMSG`.
    Text,
    /// `NOTICE`.
    Notice,
    /// `PRIVMSG` carrying a CTCP ACTION (`/me`).
    Action,
    /// Any other command.
    Other,
}

impl MessageKind {
    /// Classify a command and its body.
    ///
    /// CTCP requests and replies other than ACTION are `Other`; their
    /// framing must reach the client untouched.
    pub fn detect(command: &str, body: &str) -> Self {
        if command.eq_ignore_ascii_case("PRIVMSG") {
            if ctcp::is_action(body) {
                MessageKind::Action
            } else if ctcp::is_ctcp(body) {
                MessageKind::Other
            } else {
                MessageKind::Text
            }
        } else if command.eq_ignore_ascii_case("NOTICE") && !ctcp::is_ctcp(body) {
            MessageKind::Notice
        } else {
            MessageKind::Other
        }
    }

    /// Parse a kind name as used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" | "privmsg" => Some(MessageKind::Text),
            "notice" => Some(MessageKind::Notice),
            "action" | "me" => Some(MessageKind::Action),
            _ => None,
        }
    }
}

/// A single message as delivered to a downstream client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// IRCv3 message tags, without the leading `@`. Not counted in the line budget.
    pub tags: Option<String>,
    /// Message source (`nick!user@host`), without the leading `:`.
    pub source: Option<String>,
    /// Wire command, e.g. `PRIVMSG`.
    pub command: String,
    pub kind: MessageKind,
    /// First positional parameter.
    pub target: String,
    /// Second positional parameter.
    pub body: String,
}

impl Message {
    /// Create a message, deriving its kind from the command and body.
    pub fn new(command: impl Into<String>, target: impl Into<String>, body: impl Into<String>) -> Self {
        let command = command.into();
        let body = body.into();
        Self {
            tags: None,
            source: None,
            kind: MessageKind::detect(&command, &body),
            command,
            target: target.into(),
            body,
        }
    }

    /// Set the message source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Parse a raw protocol line.
    ///
    /// Trailing CR/LF are ignored. Parameters past the second are folded
    /// into the body, separated by spaces.
    pub fn parse(line: &str) -> ProtocolResult<Self> {
        let mut rest = line.trim_end_matches(['\r', '\n']);
        if rest.trim().is_empty() {
            return Err(ProtocolError::EmptyLine);
        }

        let mut tags = None;
        if let Some(stripped) = rest.strip_prefix('@') {
            let (t, r) = stripped.split_once(' ').unwrap_or((stripped, ""));
            tags = Some(t.to_string());
            rest = r.trim_start_matches(' ');
        }

        let mut source = None;
        if let Some(stripped) = rest.strip_prefix(':') {
            let (s, r) = stripped.split_once(' ').unwrap_or((stripped, ""));
            source = Some(s.to_string());
            rest = r.trim_start_matches(' ');
        }

        let (command, r) = rest.split_once(' ').unwrap_or((rest, ""));
        if command.is_empty() {
            return Err(ProtocolError::MissingCommand {
                line: line.to_string(),
            });
        }
        rest = r;

        let mut params: Vec<&str> = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing);
                break;
            }
            match rest.split_once(' ') {
                Some((param, r)) => {
                    params.push(param);
                    rest = r;
                }
                None => {
                    params.push(rest);
                    break;
                }
            }
        }

        let target = params.first().copied().unwrap_or_default().to_string();
        let body = params.get(1..).map(|p| p.join(" ")).unwrap_or_default();

        Ok(Self {
            tags,
            source,
            kind: MessageKind::detect(command, &body),
            command: command.to_string(),
            target,
            body,
        })
    }

    /// Byte length of the serialized line, excluding tags and the CRLF terminator.
    pub fn wire_length(&self) -> usize {
        let source_len = self.source.as_ref().map_or(0, |s| s.len() + 2);
        // "COMMAND target :body"
        source_len + self.command.len() + 1 + self.target.len() + 2 + self.body.len()
    }

    /// Whether the serialized line fits the protocol maximum.
    pub fn fits_line(&self) -> bool {
        self.wire_length() <= MAX_LINE_BYTES
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tags) = &self.tags {
            write!(f, "@{} ", tags)?;
        }
        if let Some(source) = &self.source {
            write!(f, ":{} ", source)?;
        }
        write!(f, "{} {} :{}", self.command, self.target, self.body)
    }
}
