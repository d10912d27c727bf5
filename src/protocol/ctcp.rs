//! CTCP ACTION framing.

/// CTCP delimiter byte.
pub const CTCP_DELIM: char = '\x01';

/// Opening of an ACTION body, up to and including the separating space.
pub const ACTION_OPEN: &str = "\x01ACTION ";

/// Returns true if `body` is any CTCP payload.
pub fn is_ctcp(body: &str) -> bool {
    body.starts_with(CTCP_DELIM)
}

/// Returns true if `body` is a CTCP ACTION.
pub fn is_action(body: &str) -> bool {
    body.starts_with(ACTION_OPEN)
}

/// Extract the inner text of an ACTION body.
///
/// The closing delimiter is optional, some clients omit it.
pub fn action_text(body: &str) -> Option<&str> {
    let inner = body.strip_prefix(ACTION_OPEN)?;
    Some(inner.strip_suffix(CTCP_DELIM).unwrap_or(inner))
}

/// Wrap `text` as an ACTION body.
///
/// Delimiters inside `text` are dropped so the result holds exactly one
/// opening and one closing marker.
pub fn wrap_action(text: &str) -> String {
    let mut body = String::with_capacity(ACTION_OPEN.len() + text.len() + 1);
    body.push_str(ACTION_OPEN);
    body.extend(text.chars().filter(|&c| c != CTCP_DELIM));
    body.push(CTCP_DELIM);
    body
}
