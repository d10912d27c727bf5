//! statusmsg-redirect - STATUSMSG redirection for IRC bouncer clients
//!
//! Some clients cannot display messages addressed to a subset of a channel
//! (`PRIVMSG @#chan`). For opted-in clients this crate rewrites such
//! messages onto the plain channel, tagging the status prefix into the text
//! through a configurable format.

pub mod commands;
pub mod common;
pub mod config;
pub mod console;
pub mod protocol;
pub mod redirect;
pub mod store;
