//! Configuration type definitions.

use serde::Deserialize;

use crate::protocol::{ChannelTypes, StatusPrefixes};
use crate::redirect::RedirectKinds;

/// Default path of the persisted module state.
pub const DEFAULT_STORE_PATH: &str = "statusmsg-redirect.json";

/// STATUSMSG value assumed when none is configured.
pub const DEFAULT_STATUSMSG: &str = "@+";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub redirect: RedirectConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Persistence settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

/// Redirect behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectConfig {
    /// Message kinds to redirect: "text", "notice", "action". All when unset.
    pub kinds: Option<Vec<String>>,
}

/// The downstream client the console delivers to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    pub identifier: Option<String>,
}

/// Network capabilities the console pretends were negotiated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    /// STATUSMSG ISUPPORT value, e.g. "@+".
    pub statusmsg: Option<String>,
    /// CHANTYPES ISUPPORT value, "#&" when unset.
    pub chantypes: Option<String>,
}

impl Config {
    /// Message kinds to redirect. Unknown names are rejected by validation,
    /// so they are ignored here.
    pub fn redirect_kinds(&self) -> RedirectKinds {
        match &self.redirect.kinds {
            Some(names) => RedirectKinds::from_names(names.as_slice()).unwrap_or_default(),
            None => RedirectKinds::default(),
        }
    }

    pub fn status_prefixes(&self) -> StatusPrefixes {
        StatusPrefixes::new(self.network.statusmsg.as_deref().unwrap_or(DEFAULT_STATUSMSG))
    }

    pub fn channel_types(&self) -> ChannelTypes {
        self.network
            .chantypes
            .as_deref()
            .map(ChannelTypes::new)
            .unwrap_or_default()
    }

    pub fn client_identifier(&self) -> &str {
        self.client.identifier.as_deref().unwrap_or_default()
    }
}
