//! Shared redirect settings.
//!
//! Readers take an immutable snapshot per message; writers serialize on the
//! store lock, publish a new snapshot and persist it. A reader therefore
//! never sees a half-applied change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;
use tracing::{error, info, warn};

use crate::common::error::{RegistryResult, Result, StoreResult, TemplateResult};
use crate::redirect::registry::IdentifierRegistry;
use crate::redirect::template::FormatTemplate;
use crate::store::{self, KeyValueStore, FORMAT_KEY, IDENTIFIERS_KEY};

/// One consistent view of the settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectSettings {
    pub registry: IdentifierRegistry,
    pub template: FormatTemplate,
}

/// Settings shared between the message path and the command path.
pub struct RedirectState {
    current: ArcSwap<RedirectSettings>,
    store: Mutex<Box<dyn KeyValueStore>>,
}

impl RedirectState {
    /// Create state with default settings, persisting to `store`.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_settings(RedirectSettings::default(), store)
    }

    pub fn with_settings(settings: RedirectSettings, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            current: ArcSwap::from_pointee(settings),
            store: Mutex::new(store),
        }
    }

    /// Load settings previously saved in `store`.
    ///
    /// A stored format that no longer parses is replaced by the default.
    pub fn restore(store: Box<dyn KeyValueStore>) -> Result<Self> {
        let mut settings = RedirectSettings::default();

        if let Some(raw) = store.load(IDENTIFIERS_KEY)? {
            settings.registry = IdentifierRegistry::from_list(store::decode_identifiers(&raw)?);
        }

        if let Some(format) = store.load(FORMAT_KEY)? {
            match FormatTemplate::validate(&format) {
                Ok(template) => settings.template = template,
                Err(e) => warn!("Ignoring stored format {:?}: {}", format, e),
            }
        }

        info!(
            "Restored {} identifier(s), format {:?}",
            settings.registry.len(),
            settings.template.as_str()
        );
        Ok(Self::with_settings(settings, store))
    }

    /// The current settings snapshot.
    pub fn snapshot(&self) -> Arc<RedirectSettings> {
        self.current.load_full()
    }

    /// Add an opt-in identifier. Returns `Ok(false)` if already present.
    pub fn add_identifier(&self, id: &str) -> RegistryResult<bool> {
        let mut store = self.lock_store();
        let mut next = RedirectSettings::clone(&self.current.load());
        let added = next.registry.add(id)?;
        if added {
            info!("Added identifier '{}'", id);
            self.publish(&mut **store, next);
        }
        Ok(added)
    }

    /// Remove an opt-in identifier.
    pub fn remove_identifier(&self, id: &str) -> RegistryResult<()> {
        let mut store = self.lock_store();
        let mut next = RedirectSettings::clone(&self.current.load());
        next.registry.remove(id)?;
        info!("Removed identifier '{}'", id);
        self.publish(&mut **store, next);
        Ok(())
    }

    pub fn list_identifiers(&self) -> Vec<String> {
        self.current.load().registry.list().to_vec()
    }

    /// Validate and activate a new format. On error the old format stays.
    pub fn set_template(&self, candidate: &str) -> TemplateResult<()> {
        let template = FormatTemplate::validate(candidate).map_err(|e| {
            warn!("Rejected format {:?}: {}", candidate, e);
            e
        })?;

        let mut store = self.lock_store();
        let mut next = RedirectSettings::clone(&self.current.load());
        next.template = template;
        info!("Format set to {:?}", candidate);
        self.publish(&mut **store, next);
        Ok(())
    }

    /// The active format string.
    pub fn template(&self) -> String {
        self.current.load().template.as_str().to_string()
    }

    /// Persist the current settings.
    pub fn save(&self) -> StoreResult<()> {
        let mut store = self.lock_store();
        write_settings(&mut **store, &self.current.load())
    }

    fn lock_store(&self) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap in `next` and persist it. Persistence failures are logged;
    /// the in-memory change stands.
    fn publish(&self, store: &mut dyn KeyValueStore, next: RedirectSettings) {
        if let Err(e) = write_settings(store, &next) {
            error!("Failed to persist redirect settings: {}", e);
        }
        self.current.store(Arc::new(next));
    }
}

fn write_settings(store: &mut dyn KeyValueStore, settings: &RedirectSettings) -> StoreResult<()> {
    store.save(
        IDENTIFIERS_KEY,
        &store::encode_identifiers(settings.registry.list())?,
    )?;
    store.save(FORMAT_KEY, settings.template.as_str())
}
