//! Line-oriented console host.
//!
//! Stands in for the bouncer: every input line is either a module command,
//! a change to the simulated client session, or a raw server line that is
//! run through the redirect hook and echoed as the client would receive it.
//!
//! - `*statusmsg <command>` runs a module command
//! - `client [identifier]` switches the destination client
//! - `isupport STATUSMSG=<prefixes> CHANTYPES=<types>` renegotiates the
//!   status prefixes and channel types
//! - anything else is a server line

use anyhow::Result;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

use crate::commands::CommandInterpreter;
use crate::protocol::{ChannelTypes, Message, StatusPrefixes};
use crate::redirect::{ClientSession, FilterOutcome, StatusMsgRedirect};

/// Nick module commands are addressed to.
pub const MODULE_NICK: &str = "*statusmsg";

/// Longest accepted input line, tags included.
const MAX_INPUT_LINE: usize = 8192;

/// Console state: the hook, its command interpreter and the current session.
pub struct Console {
    redirect: StatusMsgRedirect,
    commands: CommandInterpreter,
    session: ClientSession,
}

impl Console {
    pub fn new(redirect: StatusMsgRedirect, session: ClientSession) -> Self {
        let commands = CommandInterpreter::new(redirect.state().clone());
        Self {
            redirect,
            commands,
            session,
        }
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    /// Handle one input line and return the output lines.
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return Vec::new();
        }

        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        if word.eq_ignore_ascii_case(MODULE_NICK) {
            return self
                .commands
                .execute(rest, &self.session.client_identifier)
                .into_iter()
                .map(|reply| format!("{}: {}", MODULE_NICK, reply))
                .collect();
        }
        if word.eq_ignore_ascii_case("client") {
            return vec![self.switch_client(rest.trim())];
        }
        if word.eq_ignore_ascii_case("isupport") {
            return self.renegotiate(rest);
        }

        self.deliver(line)
    }

    fn switch_client(&mut self, identifier: &str) -> String {
        self.session.client_identifier = identifier.to_string();
        info!("Console client identifier is now '{}'", identifier);
        if identifier.is_empty() {
            "Client identifier cleared".to_string()
        } else {
            format!("Client identifier set to '{}'", identifier)
        }
    }

    fn renegotiate(&mut self, tokens: &str) -> Vec<String> {
        let mut replies = Vec::new();
        if let Some(prefixes) = StatusPrefixes::from_tokens(tokens.split_whitespace()) {
            info!("STATUSMSG renegotiated: '{}'", prefixes);
            replies.push(format!("STATUSMSG set to '{}'", prefixes));
            self.session.status_prefixes = prefixes;
        }
        if let Some(types) = ChannelTypes::from_tokens(tokens.split_whitespace()) {
            info!("CHANTYPES renegotiated: '{}'", types);
            replies.push(format!("CHANTYPES set to '{}'", types));
            self.session.channel_types = types;
        }
        if replies.is_empty() {
            replies.push("No STATUSMSG or CHANTYPES token found".to_string());
        }
        replies
    }

    fn deliver(&self, line: &str) -> Vec<String> {
        let mut message = match Message::parse(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Dropping unparsable line {:?}: {}", line, e);
                return vec![format!("Unable to parse line: {}", e)];
            }
        };

        match self.redirect.on_send_to_client(&mut message, &self.session) {
            FilterOutcome::PassThrough(_) => vec![line.to_string()],
            FilterOutcome::Rewritten { .. } => vec![message.to_string()],
        }
    }
}

/// Drive the console until the reader hits EOF.
pub async fn run<R, W>(console: &mut Console, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_INPUT_LINE));
    let mut output = FramedWrite::new(writer, LinesCodec::new());

    while let Some(line) = lines.next().await {
        let replies = match line {
            Ok(line) => console.handle_line(&line),
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                warn!("Input line longer than {} bytes skipped", MAX_INPUT_LINE);
                vec![format!("Line too long (max {} bytes)", MAX_INPUT_LINE)]
            }
            Err(LinesCodecError::Io(e)) => return Err(e.into()),
        };

        for reply in replies {
            output.send(reply).await?;
        }
    }

    debug!("Console input closed");
    Ok(())
}
