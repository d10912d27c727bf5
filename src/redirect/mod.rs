//! Status message redirection.
//!
//! ## Module Structure
//!
//! - `template`: format template parsing and rendering
//! - `registry`: opt-in client identifiers
//! - `classifier`: eligibility decision for outbound messages
//! - `rewrite`: template substitution and line truncation
//! - `state`: shared, persisted settings
//! - `filter`: the outbound message hook tying it together

pub mod classifier;
pub mod filter;
pub mod registry;
pub mod rewrite;
pub mod state;
pub mod template;

pub use classifier::{classify, should_rewrite, Classification, RedirectKinds, SkipReason};
pub use filter::{ClientSession, DeliveryContext, FilterOutcome, StatusMsgRedirect};
pub use registry::IdentifierRegistry;
pub use rewrite::{rewrite, truncate_to_line};
pub use state::{RedirectSettings, RedirectState};
pub use template::{FormatTemplate, DEFAULT_FORMAT};
