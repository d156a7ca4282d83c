//! Application state for the PAYE API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::TaxRules;

/// Shared application state.
///
/// The rules are loaded once at startup and only read afterwards, so every
/// handler shares the same `Arc`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Shorthand for the active tax rules.
    pub fn rules(&self) -> &TaxRules {
        self.config.rules()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConfigLoader::builtin())
    }
}
