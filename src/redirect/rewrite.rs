//! Template substitution and line-length enforcement.

use tracing::debug;

use crate::protocol::ctcp;
use crate::protocol::{Message, MessageKind, MAX_LINE_BYTES};
use crate::redirect::template::FormatTemplate;

/// Rewrite a status message in place so it shows on the plain channel.
///
/// The target becomes `channel_name` and the body is rendered through
/// `template` with the status prefix and original text. ACTION bodies are
/// rendered around their inner text and re-wrapped once. If the resulting
/// line is longer than [`MAX_LINE_BYTES`] the body is shortened from the end.
///
/// Returns the number of body bytes removed by truncation.
pub fn rewrite(
    message: &mut Message,
    status_prefix: char,
    channel_name: &str,
    template: &FormatTemplate,
) -> usize {
    let mut buf = [0u8; 4];
    let prefix = status_prefix.encode_utf8(&mut buf);

    message.target = channel_name.to_string();
    message.body = match message.kind {
        MessageKind::Action => {
            let inner = ctcp::action_text(&message.body).unwrap_or(&message.body);
            ctcp::wrap_action(&template.render(prefix, inner))
        }
        _ => template.render(prefix, &message.body),
    };

    let removed = truncate_to_line(message);
    debug!(
        "Redirected {} to {} ({} bytes on the wire, {} truncated)",
        message.command,
        message.target,
        message.wire_length(),
        removed
    );
    removed
}

/// Shorten the body until the line fits, keeping ACTION framing intact.
///
/// Whole characters are removed, so slightly more than the excess may go
/// when the cut lands inside a multi-byte character. The body is never
/// shortened past empty text. Returns the number of bytes removed.
pub fn truncate_to_line(message: &mut Message) -> usize {
    if message.fits_line() {
        return 0;
    }
    let excess = message.wire_length() - MAX_LINE_BYTES;
    let before = message.body.len();

    if message.kind == MessageKind::Action {
        let inner = ctcp::action_text(&message.body).unwrap_or_default();
        let kept = trim_end_bytes(inner, excess);
        message.body = ctcp::wrap_action(kept);
    } else {
        let keep = trim_end_bytes(&message.body, excess).len();
        message.body.truncate(keep);
    }

    before.saturating_sub(message.body.len())
}

/// Drop at least `count` bytes from the end of `s` without splitting a character.
fn trim_end_bytes(s: &str, count: usize) -> &str {
    &s[..floor_char_boundary(s, s.len().saturating_sub(count))]
}

/// Find the last UTF-8 char boundary at or before `byte_index` in `s`.
fn floor_char_boundary(s: &str, byte_index: usize) -> usize {
    if byte_index >= s.len() {
        return s.len();
    }
    let mut i = byte_index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
