//! STATUSMSG and CHANTYPES ISUPPORT handling.
//!
//! Networks advertise the channel membership prefixes that may be used to
//! address a subset of a channel, e.g. `STATUSMSG=@+`, and the characters
//! channel names start with, e.g. `CHANTYPES=#&`. Both are negotiated per
//! connection and can change on reconnect, so callers pass them in fresh
//! for every message.

use std::fmt;

/// ISUPPORT token names.
pub const STATUSMSG_TOKEN: &str = "STATUSMSG";
pub const CHANTYPES_TOKEN: &str = "CHANTYPES";

/// Channel types assumed when the network does not advertise CHANTYPES.
pub const DEFAULT_CHANTYPES: &str = "#&";

/// Value of the ISUPPORT token `name`, `Some("")` if it is bare or negated.
fn token_value<'a>(tokens: impl IntoIterator<Item = &'a str>, name: &str) -> Option<&'a str> {
    tokens.into_iter().find_map(|token| {
        let unset = token.strip_prefix('-').unwrap_or(token);
        if unset.eq_ignore_ascii_case(name) {
            return Some("");
        }
        let (key, value) = token.split_once('=')?;
        key.eq_ignore_ascii_case(name).then_some(value)
    })
}

/// Distinct, non-whitespace characters of `value`, in order.
fn char_set(value: &str) -> Vec<char> {
    let mut chars = Vec::new();
    for c in value.chars() {
        if !c.is_whitespace() && !chars.contains(&c) {
            chars.push(c);
        }
    }
    chars
}

/// The set of status prefixes a network accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPrefixes {
    prefixes: Vec<char>,
}

impl StatusPrefixes {
    /// Build the set from a STATUSMSG value such as `@+`.
    pub fn new(value: &str) -> Self {
        Self {
            prefixes: char_set(value),
        }
    }

    /// An empty set; no message is a status message.
    pub fn none() -> Self {
        Self::default()
    }

    /// Find the STATUSMSG token among ISUPPORT tokens.
    ///
    /// Returns `None` if the token is absent. A bare `STATUSMSG` or a
    /// negated `-STATUSMSG` yields an empty set.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        token_value(tokens, STATUSMSG_TOKEN).map(Self::new)
    }

    pub fn contains(&self, c: char) -> bool {
        self.prefixes.contains(&c)
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.prefixes.iter().copied()
    }

    /// The status prefix `target` starts with, if any.
    pub fn match_target(&self, target: &str) -> Option<char> {
        target.chars().next().filter(|&c| self.contains(c))
    }
}

impl fmt::Display for StatusPrefixes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.prefixes {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// The characters a channel name may start with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTypes {
    types: Vec<char>,
}

impl ChannelTypes {
    /// Build the set from a CHANTYPES value such as `#&`.
    pub fn new(value: &str) -> Self {
        Self {
            types: char_set(value),
        }
    }

    /// Find the CHANTYPES token among ISUPPORT tokens.
    ///
    /// Returns `None` if the token is absent. A bare or negated token yields
    /// an empty set.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        token_value(tokens, CHANTYPES_TOKEN).map(Self::new)
    }

    pub fn contains(&self, c: char) -> bool {
        self.types.contains(&c)
    }
}

impl Default for ChannelTypes {
    fn default() -> Self {
        Self::new(DEFAULT_CHANTYPES)
    }
}

impl fmt::Display for ChannelTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.types {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dedups() {
        let prefixes = StatusPrefixes::new("@+@");
        assert_eq!(prefixes.iter().collect::<Vec<_>>(), vec!['@', '+']);
        assert_eq!(prefixes.to_string(), "@+");
    }

    #[test]
    fn test_from_tokens() {
        let tokens = ["CHANTYPES=#", "statusmsg=~&@%+", "NETWORK=Test"];
        let prefixes = StatusPrefixes::from_tokens(tokens).unwrap();
        assert!(prefixes.contains('~'));
        assert!(prefixes.contains('%'));
        assert!(!prefixes.contains('#'));

        assert_eq!(StatusPrefixes::from_tokens(["CHANTYPES=#"]), None);
        assert_eq!(
            StatusPrefixes::from_tokens(["-STATUSMSG"]),
            Some(StatusPrefixes::none())
        );
        assert_eq!(
            StatusPrefixes::from_tokens(["STATUSMSG"]),
            Some(StatusPrefixes::none())
        );
    }

    #[test]
    fn test_channel_types() {
        let defaults = ChannelTypes::default();
        assert!(defaults.contains('#'));
        assert!(defaults.contains('&'));
        assert!(!defaults.contains('@'));
        assert_eq!(defaults.to_string(), "#&");

        let types = ChannelTypes::from_tokens(["STATUSMSG=@+", "chantypes=#!"]).unwrap();
        assert!(types.contains('!'));
        assert!(!types.contains('&'));
        assert_eq!(ChannelTypes::from_tokens(["STATUSMSG=@+"]), None);
        assert_eq!(ChannelTypes::from_tokens(["-CHANTYPES"]), Some(ChannelTypes::new("")));
    }

    #[test]
    fn test_match_target() {
        let prefixes = StatusPrefixes::new("@+");
        assert_eq!(prefixes.match_target("@#chan"), Some('@'));
        assert_eq!(prefixes.match_target("+#chan"), Some('+'));
        assert_eq!(prefixes.match_target("#chan"), None);
        assert_eq!(prefixes.match_target(""), None);
        assert_eq!(StatusPrefixes::none().match_target("@#chan"), None);
    }
}
