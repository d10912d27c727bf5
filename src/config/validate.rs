//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;
use crate::redirect::RedirectKinds;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.store.path.trim().is_empty() {
        errors.push("store.path must not be empty".to_string());
    }

    if let Some(ref kinds) = config.redirect.kinds {
        if kinds.is_empty() {
            errors.push("redirect.kinds is empty - nothing would be redirected".to_string());
        }
        if let Err(name) = RedirectKinds::from_names(kinds.as_slice()) {
            errors.push(format!(
                "redirect.kinds entry '{}' is invalid (use: text, notice, action)",
                name
            ));
        }
    }

    if let Some(ref statusmsg) = config.network.statusmsg {
        if statusmsg.chars().any(char::is_whitespace) {
            errors.push(format!(
                "network.statusmsg '{}' must not contain whitespace",
                statusmsg
            ));
        }
    }

    if let Some(ref chantypes) = config.network.chantypes {
        if chantypes.trim().is_empty() {
            errors.push("network.chantypes must not be empty".to_string());
        } else if chantypes.chars().any(char::is_whitespace) {
            errors.push(format!(
                "network.chantypes '{}' must not contain whitespace",
                chantypes
            ));
        }
    }

    if let Some(ref identifier) = config.client.identifier {
        if identifier.chars().any(char::is_whitespace) {
            errors.push(format!(
                "client.identifier '{}' must not contain whitespace",
                identifier
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
