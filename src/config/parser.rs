//! Configuration file parsing (HOCON format).

use std::path::Path;

use hocon::HoconLoader;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Load configuration from a HOCON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    HoconLoader::new()
        .load_file(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?
        .resolve()
        .map_err(parse_error)
}

/// Load configuration from a HOCON string.
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    HoconLoader::new()
        .load_str(content)
        .map_err(parse_error)?
        .resolve()
        .map_err(parse_error)
}

fn parse_error(e: hocon::Error) -> ConfigError {
    ConfigError::ParseError {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DEFAULT_STORE_PATH;
    use crate::redirect::RedirectKinds;

    #[test]
    fn test_full_config() {
        let config = load_config_str(
            r##"
            store { path = "/var/lib/statusmsg/state.json" }
            redirect { kinds = ["text", "action"] }
            client { identifier = "phone" }
            network { statusmsg = "~@%+", chantypes = "#" }
            "##,
        )
        .unwrap();

        assert_eq!(config.store.path, "/var/lib/statusmsg/state.json");
        assert_eq!(config.client_identifier(), "phone");
        assert!(config.status_prefixes().contains('%'));
        assert!(!config.channel_types().contains('&'));
        assert_eq!(
            config.redirect_kinds(),
            RedirectKinds {
                text: true,
                notice: false,
                action: true
            }
        );
    }

    #[test]
    fn test_sections_default() {
        let config = load_config_str(r#"client { identifier = "tablet" }"#).unwrap();
        assert_eq!(config.store.path, DEFAULT_STORE_PATH);
        assert_eq!(config.redirect_kinds(), RedirectKinds::default());
        assert_eq!(config.status_prefixes().to_string(), "@+");
        assert_eq!(config.channel_types().to_string(), "#&");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/statusmsg-redirect.conf"),
            Err(ConfigError::IoError { .. })
        ));
    }
}
