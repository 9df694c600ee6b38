//! Headless client core for the data preparation front-end.
//! State, action dispatch, optimistic mutations and parameter forms live
//! here; rendering and transport belong to the host.

pub mod action;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod effect;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod optimistic;
pub mod preferences;
pub mod runtime;
pub mod search;
pub mod state;
pub mod transformation;

pub use action::{Action, ActionParseError};
pub use config::{ConfigError, CoreConfig};
pub use dispatch::Dispatcher;
pub use effect::{
    BackendError, BackendRequest, BackendResponse, Completion, ConfirmPrompt, Effect,
    ExternalUiTrigger, Notification, NotificationLevel, RequestId,
};
pub use i18n::MessageCatalog;
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use optimistic::{MutationLedger, MutationTicket, Settlement};
pub use preferences::{
    InventoryPreferences, MemoryPreferenceStore, PreferenceError, PreferenceStore,
    PreferenceWrite, SqlitePreferenceStore,
};
pub use runtime::{BackendClient, Runtime, UiBridge};
pub use state::AppState;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
