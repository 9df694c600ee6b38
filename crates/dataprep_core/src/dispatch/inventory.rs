//! Inventory view actions shared by datasets and preparations.

use super::Dispatcher;
use crate::action::InventoryAction;
use crate::effect::Effect;
use crate::model::inventory::{ItemKey, ItemKind};
use crate::preferences::PreferenceWrite;
use crate::state::AppState;
use log::debug;

impl Dispatcher {
    pub(super) fn dispatch_inventory(
        &mut self,
        state: &mut AppState,
        action: InventoryAction,
    ) -> Vec<Effect> {
        match action {
            InventoryAction::DisplayMode { kind, mode } => {
                state.inventory.set_display_mode(kind, mode);
                let write = match kind {
                    ItemKind::Dataset => PreferenceWrite::DatasetsDisplayMode(mode),
                    ItemKind::Preparation | ItemKind::Folder => {
                        PreferenceWrite::PreparationsDisplayMode(mode)
                    }
                };
                vec![self.save_preference(write)]
            }
            InventoryAction::Edit { kind, id } => {
                toggle_edit(state, ItemKey::new(kind, id), true);
                Vec::new()
            }
            InventoryAction::CancelEdit { kind, id } => {
                toggle_edit(state, ItemKey::new(kind, id), false);
                Vec::new()
            }
        }
    }
}

fn toggle_edit(state: &mut AppState, key: ItemKey, enabled: bool) {
    let listed = if enabled {
        state.inventory.enable_edit(&key)
    } else {
        state.inventory.disable_edit(&key)
    };
    if !listed {
        debug!(
            "event=inventory_edit module=dispatch status=skipped kind={} id={} reason=not_listed",
            key.kind.as_str(),
            key.id
        );
    }
}
