//! User preference persistence.
//!
//! # Responsibility
//! - Define the key-value store contract that survives across sessions.
//! - Map typed inventory preferences (sort, order, display mode) onto keys.
//!
//! # Invariants
//! - Values are JSON-encoded strings.
//! - Loading never fails: missing or unreadable entries fall back to
//!   defaults and are logged.
//!
//! # See also
//! - `db` for the SQLite schema backing `SqlitePreferenceStore`.

mod memory;
mod sqlite;

pub use memory::MemoryPreferenceStore;
pub use sqlite::SqlitePreferenceStore;

use crate::db::DbError;
use crate::model::inventory::{DisplayMode, SortField, SortOrder, SortSelection};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const KEY_DATASETS_SORT: &str = "org.talend.dataprep.datasets.sort";
pub const KEY_DATASETS_ORDER: &str = "org.talend.dataprep.datasets.order";
pub const KEY_PREPARATIONS_SORT: &str = "org.talend.dataprep.preparations.sort";
pub const KEY_PREPARATIONS_ORDER: &str = "org.talend.dataprep.preparations.order";
pub const KEY_DATASETS_DISPLAY_MODE: &str = "org.talend.dataprep.datasets.displaymode";
pub const KEY_PREPARATIONS_DISPLAY_MODE: &str = "org.talend.dataprep.preparations.displaymode";

pub type PreferenceResult<T> = Result<T, PreferenceError>;

#[derive(Debug)]
pub enum PreferenceError {
    Db(DbError),
    Encoding(serde_json::Error),
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "preference value is not valid JSON: {err}"),
        }
    }
}

impl Error for PreferenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encoding(err) => Some(err),
        }
    }
}

impl From<DbError> for PreferenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PreferenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for PreferenceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// Raw key-value store.
pub trait PreferenceStore {
    fn get_raw(&self, key: &str) -> PreferenceResult<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> PreferenceResult<()>;
    fn remove(&self, key: &str) -> PreferenceResult<()>;
}

/// Reads and JSON-decodes one value.
pub fn get_json<T: DeserializeOwned>(
    store: &impl PreferenceStore,
    key: &str,
) -> PreferenceResult<Option<T>> {
    match store.get_raw(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// JSON-encodes and writes one value.
pub fn set_json<T: Serialize>(
    store: &impl PreferenceStore,
    key: &str,
    value: &T,
) -> PreferenceResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set_raw(key, &raw)
}

/// One typed preference write, emitted as an effect by dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceWrite {
    DatasetsSort(SortField),
    DatasetsOrder(SortOrder),
    PreparationsSort(SortField),
    PreparationsOrder(SortOrder),
    DatasetsDisplayMode(DisplayMode),
    PreparationsDisplayMode(DisplayMode),
}

impl PreferenceWrite {
    pub fn key(self) -> &'static str {
        match self {
            Self::DatasetsSort(_) => KEY_DATASETS_SORT,
            Self::DatasetsOrder(_) => KEY_DATASETS_ORDER,
            Self::PreparationsSort(_) => KEY_PREPARATIONS_SORT,
            Self::PreparationsOrder(_) => KEY_PREPARATIONS_ORDER,
            Self::DatasetsDisplayMode(_) => KEY_DATASETS_DISPLAY_MODE,
            Self::PreparationsDisplayMode(_) => KEY_PREPARATIONS_DISPLAY_MODE,
        }
    }

    pub fn apply(self, store: &impl PreferenceStore) -> PreferenceResult<()> {
        match self {
            Self::DatasetsSort(field) | Self::PreparationsSort(field) => {
                set_json(store, self.key(), &field)
            }
            Self::DatasetsOrder(order) | Self::PreparationsOrder(order) => {
                set_json(store, self.key(), &order)
            }
            Self::DatasetsDisplayMode(mode) | Self::PreparationsDisplayMode(mode) => {
                set_json(store, self.key(), &mode)
            }
        }
    }
}

/// Inventory preferences restored at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryPreferences {
    pub datasets_sort: SortSelection,
    pub preparations_sort: SortSelection,
    pub datasets_display_mode: DisplayMode,
    pub preparations_display_mode: DisplayMode,
}

impl InventoryPreferences {
    pub fn load(store: &impl PreferenceStore) -> Self {
        let defaults = Self::default();
        Self {
            datasets_sort: SortSelection::new(
                read_or(store, KEY_DATASETS_SORT, defaults.datasets_sort.field),
                read_or(store, KEY_DATASETS_ORDER, defaults.datasets_sort.order),
            ),
            preparations_sort: SortSelection::new(
                read_or(store, KEY_PREPARATIONS_SORT, defaults.preparations_sort.field),
                read_or(store, KEY_PREPARATIONS_ORDER, defaults.preparations_sort.order),
            ),
            datasets_display_mode: read_or(
                store,
                KEY_DATASETS_DISPLAY_MODE,
                defaults.datasets_display_mode,
            ),
            preparations_display_mode: read_or(
                store,
                KEY_PREPARATIONS_DISPLAY_MODE,
                defaults.preparations_display_mode,
            ),
        }
    }
}

fn read_or<T: DeserializeOwned>(store: &impl PreferenceStore, key: &str, fallback: T) -> T {
    match get_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(err) => {
            warn!("event=preference_load module=preferences status=error key={key} error={err}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        InventoryPreferences, MemoryPreferenceStore, PreferenceStore, PreferenceWrite,
        KEY_DATASETS_ORDER, KEY_DATASETS_SORT,
    };
    use crate::model::inventory::{DisplayMode, SortField, SortOrder};

    #[test]
    fn load_uses_defaults_when_empty() {
        let store = MemoryPreferenceStore::new();
        let preferences = InventoryPreferences::load(&store);
        assert_eq!(preferences, InventoryPreferences::default());
        assert_eq!(preferences.datasets_sort.order, SortOrder::Desc);
    }

    #[test]
    fn writes_round_through_typed_load() {
        let store = MemoryPreferenceStore::new();
        PreferenceWrite::DatasetsSort(SortField::Date)
            .apply(&store)
            .unwrap();
        PreferenceWrite::DatasetsOrder(SortOrder::Asc)
            .apply(&store)
            .unwrap();
        PreferenceWrite::PreparationsDisplayMode(DisplayMode::Large)
            .apply(&store)
            .unwrap();

        assert_eq!(
            store.get_raw(KEY_DATASETS_SORT).unwrap().as_deref(),
            Some("\"date\"")
        );
        let preferences = InventoryPreferences::load(&store);
        assert_eq!(preferences.datasets_sort.field, SortField::Date);
        assert_eq!(preferences.datasets_sort.order, SortOrder::Asc);
        assert_eq!(preferences.preparations_display_mode, DisplayMode::Large);
    }

    #[test]
    fn unreadable_values_fall_back_to_defaults() {
        let store = MemoryPreferenceStore::new();
        store.set_raw(KEY_DATASETS_ORDER, "sideways").unwrap();
        let preferences = InventoryPreferences::load(&store);
        assert_eq!(preferences.datasets_sort.order, SortOrder::Desc);
    }
}
