//! Dataset inventory actions.

use super::{
    backend_result, expect_done, is_confirmed, log_failure, Dispatcher, Flow, RenameMessages,
};
use crate::action::DatasetAction;
use crate::effect::{
    BackendError, BackendRequest, BackendResponse, Completion, ConfirmPrompt, Effect,
    ExternalUiTrigger, Notification,
};
use crate::model::inventory::{InventoryItem, ItemKey, ItemKind, SortOrder, SortSelection};
use crate::optimistic::{MutationTicket, Settlement};
use crate::state::route::{Route, ROUTE_DATASETS};
use crate::state::AppState;
use log::{debug, info};

const DATASET_RENAME: RenameMessages = RenameMessages {
    renaming_title: "DATASET_CURRENTLY_RENAMING_TITLE",
    renaming: "DATASET_CURRENTLY_RENAMING",
    used_title: "DATASET_NAME_ALREADY_USED_TITLE",
    used: "DATASET_NAME_ALREADY_USED",
};

#[derive(Debug)]
pub(super) enum DatasetFlow {
    Sort {
        ticket: MutationTicket<ItemKind>,
        sort: SortSelection,
    },
    Fetch,
    Refresh,
    Rename {
        ticket: MutationTicket<ItemKey>,
    },
    ConfirmRemove {
        key: ItemKey,
        name: String,
    },
    Remove {
        key: ItemKey,
        name: String,
    },
    Clone,
    Favourite {
        ticket: MutationTicket<ItemKey>,
    },
}

impl Dispatcher {
    pub(super) fn dispatch_dataset(
        &mut self,
        state: &mut AppState,
        action: DatasetAction,
    ) -> Vec<Effect> {
        match action {
            DatasetAction::Sort { sort_by, sort_desc } => {
                let sort = SortSelection::new(sort_by, SortOrder::from_descending(sort_desc));
                let ticket = self
                    .sorts
                    .begin(ItemKind::Dataset, state.inventory.datasets_sort());
                state.inventory.set_datasets_sort(sort);
                vec![self.request(
                    BackendRequest::ListDatasets { sort },
                    Flow::Dataset(DatasetFlow::Sort { ticket, sort }),
                )]
            }
            DatasetAction::Fetch => {
                state.route.set_previous(Route::new(ROUTE_DATASETS));
                state.inventory.set_fetching_datasets(true);
                let sort = state.inventory.datasets_sort();
                vec![self.request(
                    BackendRequest::ListDatasets { sort },
                    Flow::Dataset(DatasetFlow::Fetch),
                )]
            }
            DatasetAction::SubmitEdit { id, value } => {
                let key = ItemKey::dataset(id.as_str());
                let name = match self.check_rename(state, &key, &value, &DATASET_RENAME) {
                    Ok(name) => name,
                    Err(effects) => return effects,
                };
                let Some(previous) = state.inventory.rename(&key, &name) else {
                    return Vec::new();
                };
                let ticket = self.renames.begin(key, previous);
                vec![self.request(
                    BackendRequest::RenameDataset { id, name },
                    Flow::Dataset(DatasetFlow::Rename { ticket }),
                )]
            }
            DatasetAction::Remove { id } => {
                let key = ItemKey::dataset(id);
                let Some(name) = listed_name(state, &key) else {
                    return Vec::new();
                };
                vec![self.confirm(
                    ConfirmPrompt::delete(ItemKind::Dataset.as_str(), &name),
                    Flow::Dataset(DatasetFlow::ConfirmRemove { key, name }),
                )]
            }
            DatasetAction::Clone { id } => vec![self.request(
                BackendRequest::CloneDataset { id },
                Flow::Dataset(DatasetFlow::Clone),
            )],
            DatasetAction::Favourite { id } => {
                let key = ItemKey::dataset(id.as_str());
                let Some(current) = state.inventory.find(&key).map(|item| item.favorite) else {
                    debug!("event=dataset_favourite module=dispatch status=skipped id={id} reason=not_listed");
                    return Vec::new();
                };
                state.inventory.set_favorite(&key, !current);
                let ticket = self.favourites.begin(key, current);
                vec![self.request(
                    BackendRequest::SetFavourite {
                        id,
                        favorite: !current,
                    },
                    Flow::Dataset(DatasetFlow::Favourite { ticket }),
                )]
            }
            DatasetAction::Update { id } => {
                let Some(item) = state.inventory.find(&ItemKey::dataset(id.as_str())) else {
                    debug!("event=dataset_update module=dispatch status=skipped id={id} reason=not_listed");
                    return Vec::new();
                };
                if item.is_component_backed() {
                    state.inventory.set_dataset_to_edit(Some(id));
                    Vec::new()
                } else {
                    state.inventory.set_dataset_to_update(Some(id));
                    vec![Effect::TriggerExternalUi(
                        ExternalUiTrigger::DatasetFilePicker,
                    )]
                }
            }
        }
    }

    pub(super) fn resume_dataset(
        &mut self,
        state: &mut AppState,
        flow: DatasetFlow,
        completion: Completion,
    ) -> Vec<Effect> {
        match flow {
            DatasetFlow::Sort { ticket, sort } => match datasets(completion) {
                Ok(items) => {
                    if !self.sorts.is_current(&ticket) {
                        self.sorts.settle(&ticket, true);
                        debug!("event=dataset_sort module=dispatch status=skipped reason=stale");
                        return Vec::new();
                    }
                    state.inventory.set_datasets(items);
                    vec![self.save_sort(ticket, sort)]
                }
                Err(err) => {
                    log_failure("list_datasets", &err);
                    self.roll_back_sort(state, &ticket);
                    Vec::new()
                }
            },
            DatasetFlow::Fetch => {
                state.inventory.set_fetching_datasets(false);
                store_datasets(state, completion);
                Vec::new()
            }
            DatasetFlow::Refresh => {
                store_datasets(state, completion);
                Vec::new()
            }
            DatasetFlow::Rename { ticket } => {
                match expect_done(completion, "rename_dataset") {
                    Ok(()) => {
                        self.renames.settle(&ticket, true);
                        info!(
                            "event=dataset_rename module=dispatch status=ok id={}",
                            ticket.key.id
                        );
                        vec![Effect::Notify(Notification::success(
                            "DATASET_RENAME_SUCCESS_TITLE",
                            "DATASET_RENAME_SUCCESS",
                        ))]
                    }
                    Err(err) => {
                        log_failure("rename_dataset", &err);
                        if let Settlement::RolledBack(previous) =
                            self.renames.settle(&ticket, false)
                        {
                            state.inventory.rename(&ticket.key, &previous);
                        }
                        Vec::new()
                    }
                }
            }
            DatasetFlow::ConfirmRemove { key, name } => {
                if !is_confirmed(&completion) {
                    debug!(
                        "event=dataset_remove module=dispatch status=skipped id={} reason=declined",
                        key.id
                    );
                    return Vec::new();
                }
                let id = key.id.clone();
                vec![self.request(
                    BackendRequest::DeleteDataset { id },
                    Flow::Dataset(DatasetFlow::Remove { key, name }),
                )]
            }
            DatasetFlow::Remove { key, name } => match expect_done(completion, "delete_dataset") {
                Ok(()) => {
                    state.inventory.remove(&key);
                    info!("event=dataset_remove module=dispatch status=ok id={}", key.id);
                    vec![Effect::Notify(
                        Notification::success("REMOVE_SUCCESS_TITLE", "REMOVE_SUCCESS")
                            .with_param("type", ItemKind::Dataset.as_str())
                            .with_param("name", name),
                    )]
                }
                Err(err) => {
                    log_failure("delete_dataset", &err);
                    Vec::new()
                }
            },
            DatasetFlow::Clone => match expect_done(completion, "clone_dataset") {
                Ok(()) => {
                    let sort = state.inventory.datasets_sort();
                    vec![
                        Effect::Notify(Notification::success("COPY_SUCCESS_TITLE", "COPY_SUCCESS")),
                        self.request(
                            BackendRequest::ListDatasets { sort },
                            Flow::Dataset(DatasetFlow::Refresh),
                        ),
                    ]
                }
                Err(err) => {
                    log_failure("clone_dataset", &err);
                    Vec::new()
                }
            },
            DatasetFlow::Favourite { ticket } => {
                let succeeded = match expect_done(completion, "set_favourite") {
                    Ok(()) => true,
                    Err(err) => {
                        log_failure("set_favourite", &err);
                        false
                    }
                };
                if let Settlement::RolledBack(previous) =
                    self.favourites.settle(&ticket, succeeded)
                {
                    state.inventory.set_favorite(&ticket.key, previous);
                }
                Vec::new()
            }
        }
    }
}

fn store_datasets(state: &mut AppState, completion: Completion) {
    match datasets(completion) {
        Ok(items) => state.inventory.set_datasets(items),
        Err(err) => log_failure("list_datasets", &err),
    }
}

fn datasets(completion: Completion) -> Result<Vec<InventoryItem>, BackendError> {
    match backend_result(completion, "list_datasets")? {
        BackendResponse::Datasets(items) => Ok(items),
        _ => Err(BackendError::UnexpectedResponse {
            request: "list_datasets",
        }),
    }
}

/// Name of a listed item; `None` when it is no longer listed.
pub(super) fn listed_name(state: &AppState, key: &ItemKey) -> Option<String> {
    let name = state.inventory.find(key).map(|item| item.name.clone());
    if name.is_none() {
        debug!(
            "event=inventory_lookup module=dispatch status=skipped kind={} id={} reason=not_listed",
            key.kind.as_str(),
            key.id
        );
    }
    name
}
