//! IRC wire protocol types.
//!
//! Only the pieces the redirect filter needs: parsing and serializing a
//! single message line, CTCP framing and the STATUSMSG and CHANTYPES
//! ISUPPORT tokens.

pub mod ctcp;
pub mod isupport;
pub mod message;

pub use isupport::{ChannelTypes, StatusPrefixes};
pub use message::{Message, MessageKind, MAX_LINE_BYTES};
