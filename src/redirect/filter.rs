//! Outbound message hook.
//!
//! [`StatusMsgRedirect::on_send_to_client`] is called for every message the
//! bouncer is about to deliver to a downstream client. It classifies the
//! message against a settings snapshot and, if eligible, rewrites it.

use std::sync::Arc;

use tracing::trace;

use crate::protocol::{ChannelTypes, Message, StatusPrefixes};
use crate::redirect::classifier::{classify, Classification, RedirectKinds, SkipReason};
use crate::redirect::rewrite::rewrite;
use crate::redirect::state::RedirectState;

/// What the host knows about the delivery in progress.
pub trait DeliveryContext {
    /// Identifier of the destination client, empty if it has none.
    fn client_identifier(&self) -> &str;

    /// STATUSMSG prefixes negotiated with the network.
    fn status_prefixes(&self) -> &StatusPrefixes;

    /// Name of the channel the message belongs to.
    fn channel_name(&self, message: &Message) -> String;
}

/// A delivery to one client on one network.
#[derive(Debug, Clone, Default)]
pub struct ClientSession {
    pub client_identifier: String,
    pub status_prefixes: StatusPrefixes,
    pub channel_types: ChannelTypes,
}

impl ClientSession {
    pub fn new(client_identifier: impl Into<String>, status_prefixes: StatusPrefixes) -> Self {
        Self {
            client_identifier: client_identifier.into(),
            status_prefixes,
            channel_types: ChannelTypes::default(),
        }
    }

    pub fn with_channel_types(mut self, channel_types: ChannelTypes) -> Self {
        self.channel_types = channel_types;
        self
    }
}

impl DeliveryContext for ClientSession {
    fn client_identifier(&self) -> &str {
        &self.client_identifier
    }

    fn status_prefixes(&self) -> &StatusPrefixes {
        &self.status_prefixes
    }

    fn channel_name(&self, message: &Message) -> String {
        strip_status_prefixes(&message.target, &self.status_prefixes, &self.channel_types)
            .to_string()
    }
}

/// Strip leading status prefixes from a status message target.
///
/// The first character is always taken as a prefix. Further prefixes are
/// stripped up to the first channel type, so `@+#chan` -> `#chan` and, with
/// `&` in both sets, `@&ops` -> `&ops`. A target with nothing left after
/// its prefixes is returned whole.
pub fn strip_status_prefixes<'a>(
    target: &'a str,
    prefixes: &StatusPrefixes,
    channel_types: &ChannelTypes,
) -> &'a str {
    let mut chars = target.chars();
    if chars.next().is_none() {
        return target;
    }
    let rest = chars
        .as_str()
        .trim_start_matches(|c| prefixes.contains(c) && !channel_types.contains(c));
    if rest.is_empty() {
        target
    } else {
        rest
    }
}

/// Result of running the hook on one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The message was left untouched.
    PassThrough(SkipReason),
    /// The message was rewritten; `truncated` body bytes were dropped.
    Rewritten { truncated: usize },
}

/// The status message redirect hook.
#[derive(Clone)]
pub struct StatusMsgRedirect {
    state: Arc<RedirectState>,
    kinds: RedirectKinds,
}

impl StatusMsgRedirect {
    pub fn new(state: Arc<RedirectState>, kinds: RedirectKinds) -> Self {
        Self { state, kinds }
    }

    pub fn state(&self) -> &Arc<RedirectState> {
        &self.state
    }

    /// Inspect and possibly rewrite a message about to reach a client.
    pub fn on_send_to_client(
        &self,
        message: &mut Message,
        ctx: &dyn DeliveryContext,
    ) -> FilterOutcome {
        let settings = self.state.snapshot();

        match classify(
            message,
            ctx.client_identifier(),
            ctx.status_prefixes(),
            &settings.registry,
            self.kinds,
        ) {
            Classification::PassThrough(reason) => {
                trace!("Passing {} through: {}", message.command, reason);
                FilterOutcome::PassThrough(reason)
            }
            Classification::Rewrite { status_prefix } => {
                let channel = ctx.channel_name(message);
                let truncated = rewrite(message, status_prefix, &channel, &settings.template);
                FilterOutcome::Rewritten { truncated }
            }
        }
    }
}
