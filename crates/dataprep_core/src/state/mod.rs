//! Application state records.
//!
//! # Responsibility
//! - Hold the UI state shared by dispatchers and views, one record per
//!   domain.
//!
//! # Invariants
//! - Records are independent; no invariant spans two records.
//! - Each record is mutated only through its named setters. There is no
//!   generic field setter and no multi-field transaction.
//! - One `AppState` lives for the whole session; it is passed by reference
//!   to whoever needs it.

pub mod import;
pub mod inventory;
pub mod playground;
pub mod route;
pub mod search;

use crate::model::inventory::ItemKind;
use crate::preferences::InventoryPreferences;
use import::ImportState;
use inventory::InventoryState;
use playground::PlaygroundState;
use route::RouteState;
use search::SearchState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub inventory: InventoryState,
    pub playground: PlaygroundState,
    pub import: ImportState,
    pub route: RouteState,
    pub search: SearchState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies persisted sort and display preferences.
    pub fn restore_preferences(&mut self, preferences: &InventoryPreferences) {
        self.inventory.set_datasets_sort(preferences.datasets_sort);
        self.inventory
            .set_preparations_sort(preferences.preparations_sort);
        self.inventory
            .set_display_mode(ItemKind::Dataset, preferences.datasets_display_mode);
        self.inventory.set_display_mode(
            ItemKind::Preparation,
            preferences.preparations_display_mode,
        );
    }
}
