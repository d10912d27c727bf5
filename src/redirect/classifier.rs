//! Decides whether an outbound message gets redirected.

use std::fmt;

use tracing::trace;

use crate::protocol::{Message, MessageKind, StatusPrefixes};
use crate::redirect::registry::IdentifierRegistry;

/// Message kinds eligible for redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectKinds {
    pub text: bool,
    pub notice: bool,
    pub action: bool,
}

impl Default for RedirectKinds {
    fn default() -> Self {
        Self {
            text: true,
            notice: true,
            action: true,
        }
    }
}

impl RedirectKinds {
    /// Only plain `PRIVMSG` text.
    pub fn text_only() -> Self {
        Self {
            text: true,
            notice: false,
            action: false,
        }
    }

    /// Build from configured kind names. Unknown names are returned as the error.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        let mut kinds = Self {
            text: false,
            notice: false,
            action: false,
        };
        for name in names {
            match MessageKind::from_name(name.as_ref()) {
                Some(MessageKind::Text) => kinds.text = true,
                Some(MessageKind::Notice) => kinds.notice = true,
                Some(MessageKind::Action) => kinds.action = true,
                _ => return Err(name.as_ref().to_string()),
            }
        }
        Ok(kinds)
    }

    pub fn allows(&self, kind: MessageKind) -> bool {
        match kind {
            MessageKind::Text => self.text,
            MessageKind::Notice => self.notice,
            MessageKind::Action => self.action,
            MessageKind::Other => false,
        }
    }
}

/// Why a message was passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    IneligibleKind(MessageKind),
    NoClientIdentifier,
    UnknownClient,
    EmptyTarget,
    NotStatusMessage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::IneligibleKind(kind) => write!(f, "kind {:?} is not redirected", kind),
            SkipReason::NoClientIdentifier => f.write_str("client has no identifier"),
            SkipReason::UnknownClient => f.write_str("client identifier not registered"),
            SkipReason::EmptyTarget => f.write_str("message has no target"),
            SkipReason::NotStatusMessage => f.write_str("target has no status prefix"),
        }
    }
}

/// Outcome of classifying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Redirect; `status_prefix` is the leading character of the target.
    Rewrite { status_prefix: char },
    PassThrough(SkipReason),
}

/// Classify an outbound message for a destination client.
pub fn classify(
    message: &Message,
    client_identifier: &str,
    status_prefixes: &StatusPrefixes,
    registry: &IdentifierRegistry,
    kinds: RedirectKinds,
) -> Classification {
    let result = if !kinds.allows(message.kind) {
        Classification::PassThrough(SkipReason::IneligibleKind(message.kind))
    } else if client_identifier.is_empty() {
        Classification::PassThrough(SkipReason::NoClientIdentifier)
    } else if !registry.contains(client_identifier) {
        Classification::PassThrough(SkipReason::UnknownClient)
    } else if message.target.is_empty() {
        Classification::PassThrough(SkipReason::EmptyTarget)
    } else {
        match status_prefixes.match_target(&message.target) {
            Some(status_prefix) => Classification::Rewrite { status_prefix },
            None => Classification::PassThrough(SkipReason::NotStatusMessage),
        }
    };

    trace!(
        "Classified {} to '{}' for client '{}': {:?}",
        message.command,
        message.target,
        client_identifier,
        result
    );
    result
}

/// Returns true if the message should be redirected.
pub fn should_rewrite(
    message: &Message,
    client_identifier: &str,
    status_prefixes: &StatusPrefixes,
    registry: &IdentifierRegistry,
    kinds: RedirectKinds,
) -> bool {
    matches!(
        classify(message, client_identifier, status_prefixes, registry, kinds),
        Classification::Rewrite { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> IdentifierRegistry {
        IdentifierRegistry::from_list(vec!["phone".to_string()])
    }

    fn prefixes() -> StatusPrefixes {
        StatusPrefixes::new("@+")
    }

    #[test]
    fn test_status_message_for_registered_client() {
        let msg = Message::new("PRIVMSG", "@#general", "hi");
        assert_eq!(
            classify(&msg, "phone", &prefixes(), &registry(), RedirectKinds::default()),
            Classification::Rewrite { status_prefix: '@' }
        );
    }

    #[test]
    fn test_client_identifier_checks() {
        let msg = Message::new("PRIVMSG", "@#general", "hi");
        let kinds = RedirectKinds::default();
        assert_eq!(
            classify(&msg, "", &prefixes(), &registry(), kinds),
            Classification::PassThrough(SkipReason::NoClientIdentifier)
        );
        assert_eq!(
            classify(&msg, "laptop", &prefixes(), &registry(), kinds),
            Classification::PassThrough(SkipReason::UnknownClient)
        );
    }

    #[test]
    fn test_target_checks() {
        let kinds = RedirectKinds::default();
        let empty = Message::new("PRIVMSG", "", "hi");
        assert_eq!(
            classify(&empty, "phone", &prefixes(), &registry(), kinds),
            Classification::PassThrough(SkipReason::EmptyTarget)
        );

        let plain = Message::new("PRIVMSG", "#general", "hi");
        assert!(!should_rewrite(&plain, "phone", &prefixes(), &registry(), kinds));

        // '%' is a status prefix on some networks but not this one.
        let halfop = Message::new("PRIVMSG", "%#general", "hi");
        assert!(!should_rewrite(&halfop, "phone", &prefixes(), &registry(), kinds));

        let voiced = Message::new("PRIVMSG", "+#general", "hi");
        assert!(should_rewrite(&voiced, "phone", &prefixes(), &registry(), kinds));
    }

    #[test]
    fn test_empty_prefix_set_never_matches() {
        let msg = Message::new("PRIVMSG", "@#general", "hi");
        assert!(!should_rewrite(
            &msg,
            "phone",
            &StatusPrefixes::none(),
            &registry(),
            RedirectKinds::default()
        ));
    }

    #[test]
    fn test_kinds() {
        let notice = Message::new("NOTICE", "@#general", "hi");
        let action = Message::new("PRIVMSG", "@#general", "\x01ACTION waves\x01");
        let join = Message::new("JOIN", "@#general", "");

        let all = RedirectKinds::default();
        assert!(should_rewrite(&notice, "phone", &prefixes(), &registry(), all));
        assert!(should_rewrite(&action, "phone", &prefixes(), &registry(), all));
        assert_eq!(
            classify(&join, "phone", &prefixes(), &registry(), all),
            Classification::PassThrough(SkipReason::IneligibleKind(MessageKind::Other))
        );

        let text_only = RedirectKinds::text_only();
        assert!(!should_rewrite(&notice, "phone", &prefixes(), &registry(), text_only));
        assert!(!should_rewrite(&action, "phone", &prefixes(), &registry(), text_only));
    }

    #[test]
    fn test_ctcp_other_than_action_is_ineligible() {
        let ping = Message::new("PRIVMSG", "@#general", "\x01PING 1\x01");
        let version = Message::new("NOTICE", "@#general", "\x01VERSION x\x01");

        for message in [ping, version] {
            assert_eq!(
                classify(&message, "phone", &prefixes(), &registry(), RedirectKinds::default()),
                Classification::PassThrough(SkipReason::IneligibleKind(MessageKind::Other))
            );
        }
    }

    #[test]
    fn test_kinds_from_names() {
        assert_eq!(
            RedirectKinds::from_names(&["text", "ACTION"]),
            Ok(RedirectKinds {
                text: true,
                notice: false,
                action: true
            })
        );
        assert_eq!(RedirectKinds::from_names(&["ctcp"]), Err("ctcp".to_string()));
    }
}
