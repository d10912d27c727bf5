//! Opt-in client identifiers.

use crate::common::error::{RegistryError, RegistryResult};

/// Ordered set of client identifiers whose connections get status
/// messages redirected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierRegistry {
    members: Vec<String>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from persisted identifiers, dropping empties and duplicates.
    pub fn from_list(identifiers: impl IntoIterator<Item = String>) -> Self {
        let mut registry = Self::new();
        for id in identifiers {
            // Empty identifiers are skipped, duplicates are no-ops.
            let _ = registry.add(id);
        }
        registry
    }

    /// Add an identifier.
    ///
    /// Returns `Ok(false)` if it was already present.
    pub fn add(&mut self, id: impl Into<String>) -> RegistryResult<bool> {
        let id = id.into();
        if id.is_empty() {
            return Err(RegistryError::EmptyIdentifier);
        }
        if self.contains(&id) {
            return Ok(false);
        }
        self.members.push(id);
        Ok(true)
    }

    /// Remove an identifier, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> RegistryResult<()> {
        match self.members.iter().position(|m| m == id) {
            Some(idx) => {
                self.members.remove(idx);
                Ok(())
            }
            None => Err(RegistryError::NotFound {
                identifier: id.to_string(),
            }),
        }
    }

    /// Identifiers in insertion order.
    pub fn list(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut once = IdentifierRegistry::new();
        assert_eq!(once.add("phone"), Ok(true));

        let mut twice = IdentifierRegistry::new();
        twice.add("phone").unwrap();
        assert_eq!(twice.add("phone"), Ok(false));

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_order() {
        let mut registry = IdentifierRegistry::from_list(vec!["a".to_string(), "b".to_string()]);
        let before = registry.clone();

        registry.add("c").unwrap();
        registry.remove("c").unwrap();
        assert_eq!(registry, before);

        registry.add("x").unwrap();
        registry.remove("a").unwrap();
        assert_eq!(registry.list(), &["b".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_remove_unknown_fails() {
        let mut registry = IdentifierRegistry::from_list(vec!["phone".to_string()]);
        assert_eq!(
            registry.remove("ghost"),
            Err(RegistryError::NotFound {
                identifier: "ghost".to_string()
            })
        );
        assert_eq!(registry.list(), &["phone".to_string()]);
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let mut registry = IdentifierRegistry::new();
        assert_eq!(registry.add(""), Err(RegistryError::EmptyIdentifier));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_list_drops_duplicates_and_empties() {
        let registry = IdentifierRegistry::from_list(
            ["phone", "", "laptop", "phone"].map(String::from),
        );
        assert_eq!(registry.list(), &["phone".to_string(), "laptop".to_string()]);
        assert!(registry.contains("laptop"));
        assert!(!registry.contains(""));
    }
}
