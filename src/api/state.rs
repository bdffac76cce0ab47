//! Application state for the pay statement engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::StatementParties;

/// Shared application state.
///
/// Holds the loaded configuration; its party metadata is joined onto every
/// statement the API returns.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the configured party metadata.
    pub fn parties(&self) -> &StatementParties {
        self.config.parties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_parties_come_from_config() {
        let state = AppState::new(ConfigLoader::load("./config/default").unwrap());
        assert_eq!(state.parties().pay_method, "Electronic Transfer");
    }
}
