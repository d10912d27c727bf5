//! Key-value persistence for module state.
//!
//! The redirect state is saved under two fixed keys: the identifier list
//! (as a JSON array) and the raw format string.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::common::error::StoreResult;

/// Key holding the JSON-encoded identifier list.
pub const IDENTIFIERS_KEY: &str = "identifiers";

/// Key holding the raw format template.
pub const FORMAT_KEY: &str = "format";

/// A string key-value store.
pub trait KeyValueStore: Send {
    /// Load the value stored under `key`, if any.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Encode an identifier list for storage.
pub fn encode_identifiers(identifiers: &[String]) -> StoreResult<String> {
    Ok(serde_json::to_string(identifiers)?)
}

/// Decode a stored identifier list.
pub fn decode_identifiers(raw: &str) -> StoreResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::StoreError;

    #[test]
    fn test_identifier_encoding() {
        let ids = vec!["phone".to_string(), "lap\"top".to_string()];
        let raw = encode_identifiers(&ids).unwrap();
        assert_eq!(raw, r#"["phone","lap\"top"]"#);
        assert_eq!(decode_identifiers(&raw).unwrap(), ids);
    }

    #[test]
    fn test_decode_rejects_non_list() {
        assert!(matches!(
            decode_identifiers(r#"{"phone": true}"#),
            Err(StoreError::Encoding(_))
        ));
    }
}
