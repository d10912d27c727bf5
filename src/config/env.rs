//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `STATUSMSG_REDIRECT_CONFIG` - Config file path
//! - `STATUSMSG_REDIRECT_STORE_PATH` - Persisted state file
//! - `STATUSMSG_REDIRECT_CLIENT_IDENTIFIER` - Console client identifier
//! - `STATUSMSG_REDIRECT_STATUSMSG` - STATUSMSG ISUPPORT value
//! - `STATUSMSG_REDIRECT_CHANTYPES` - CHANTYPES ISUPPORT value

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "STATUSMSG_REDIRECT";

/// Default config file name.
const DEFAULT_CONFIG_PATH: &str = "statusmsg-redirect.conf";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(path) = env::var(format!("{}_STORE_PATH", ENV_PREFIX)) {
        config.store.path = path;
    }
    if let Ok(identifier) = env::var(format!("{}_CLIENT_IDENTIFIER", ENV_PREFIX)) {
        config.client.identifier = Some(identifier);
    }
    if let Ok(statusmsg) = env::var(format!("{}_STATUSMSG", ENV_PREFIX)) {
        config.network.statusmsg = Some(statusmsg);
    }
    if let Ok(chantypes) = env::var(format!("{}_CHANTYPES", ENV_PREFIX)) {
        config.network.chantypes = Some(chantypes);
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `STATUSMSG_REDIRECT_CONFIG`, otherwise returns "statusmsg-redirect.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "STATUSMSG_REDIRECT");
    }

    #[test]
    fn test_get_config_path_default() {
        env::remove_var("STATUSMSG_REDIRECT_CONFIG");
        assert_eq!(get_config_path(), "statusmsg-redirect.conf");
    }

    #[test]
    fn test_apply_env_overrides() {
        env::remove_var("STATUSMSG_REDIRECT_STORE_PATH");
        env::remove_var("STATUSMSG_REDIRECT_STATUSMSG");
        env::set_var("STATUSMSG_REDIRECT_CLIENT_IDENTIFIER", "phone");
        env::set_var("STATUSMSG_REDIRECT_CHANTYPES", "#!");

        let result = apply_env_overrides(Config::default());
        env::remove_var("STATUSMSG_REDIRECT_CLIENT_IDENTIFIER");
        env::remove_var("STATUSMSG_REDIRECT_CHANTYPES");

        assert_eq!(result.client_identifier(), "phone");
        assert_eq!(result.store.path, "statusmsg-redirect.json");
        assert_eq!(result.network.statusmsg, None);
        assert!(result.channel_types().contains('!'));
    }
}
