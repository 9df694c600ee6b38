//! Preparation and folder inventory actions.

use super::dataset::listed_name;
use super::{
    backend_result, expect_done, is_confirmed, log_failure, Dispatcher, Flow, RenameMessages,
};
use crate::action::PreparationAction;
use crate::effect::{
    BackendError, BackendRequest, BackendResponse, Completion, ConfirmPrompt, Effect,
    Notification,
};
use crate::model::inventory::{FolderContent, ItemKey, ItemKind, SortOrder, SortSelection};
use crate::optimistic::{MutationTicket, Settlement};
use crate::state::route::{Route, ROUTE_PREPARATIONS};
use crate::state::AppState;
use log::{debug, info};

const PREPARATION_RENAME: RenameMessages = RenameMessages {
    renaming_title: "PREPARATION_CURRENTLY_RENAMING_TITLE",
    renaming: "PREPARATION_CURRENTLY_RENAMING",
    used_title: "PREPARATION_NAME_ALREADY_USED_TITLE",
    used: "PREPARATION_NAME_ALREADY_USED",
};

#[derive(Debug)]
pub(super) enum PreparationFlow {
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
        name: String,
    },
    /// Folder refresh that precedes the removal banner.
    RefreshAfterRemove {
        name: String,
    },
    RemoveFolder,
}

impl Dispatcher {
    pub(super) fn dispatch_preparation(
        &mut self,
        state: &mut AppState,
        action: PreparationAction,
    ) -> Vec<Effect> {
        match action {
            PreparationAction::Create => {
                state.inventory.toggle_preparation_creator();
                Vec::new()
            }
            PreparationAction::Sort {
                field,
                is_descending,
            } => {
                let sort = SortSelection::new(field, SortOrder::from_descending(is_descending));
                let ticket = self
                    .sorts
                    .begin(ItemKind::Preparation, state.inventory.preparations_sort());
                state.inventory.set_preparations_sort(sort);
                vec![self.refresh_folder(state, PreparationFlow::Sort { ticket, sort })]
            }
            PreparationAction::FolderFetch { folder_id } => {
                let folder_id = folder_id.unwrap_or_default();
                state.route.set_previous(
                    Route::new(ROUTE_PREPARATIONS).with_param("folderId", folder_id.as_str()),
                );
                state.inventory.set_fetching_preparations(true);
                let sort = state.inventory.preparations_sort();
                vec![self.request(
                    BackendRequest::ListFolder { folder_id, sort },
                    Flow::Preparation(PreparationFlow::Fetch),
                )]
            }
            PreparationAction::CopyMove { id } => {
                let folder = state.inventory.folder().metadata.clone();
                state
                    .inventory
                    .toggle_copy_move(folder, ItemKey::preparation(id));
                Vec::new()
            }
            PreparationAction::SubmitEdit { kind, id, value } => {
                if kind == ItemKind::Dataset {
                    state.inventory.disable_edit(&ItemKey::dataset(id.as_str()));
                    debug!("event=preparation_rename module=dispatch status=skipped id={id} reason=dataset_kind");
                    return Vec::new();
                }
                let key = ItemKey::new(kind, id.as_str());
                let name = match self.check_rename(state, &key, &value, &PREPARATION_RENAME) {
                    Ok(name) => name,
                    Err(effects) => return effects,
                };
                let Some(previous) = state.inventory.rename(&key, &name) else {
                    return Vec::new();
                };
                let ticket = self.renames.begin(key, previous);
                let request = if kind == ItemKind::Folder {
                    BackendRequest::RenameFolder { id, name }
                } else {
                    BackendRequest::RenamePreparation { id, name }
                };
                vec![self.request(
                    request,
                    Flow::Preparation(PreparationFlow::Rename { ticket }),
                )]
            }
            PreparationAction::Remove { id } => {
                let key = ItemKey::preparation(id);
                let Some(name) = listed_name(state, &key) else {
                    return Vec::new();
                };
                vec![self.confirm(
                    ConfirmPrompt::delete(ItemKind::Preparation.as_str(), &name),
                    Flow::Preparation(PreparationFlow::ConfirmRemove { key, name }),
                )]
            }
            PreparationAction::RemoveFolder { id } => vec![self.request(
                BackendRequest::RemoveFolder { id },
                Flow::Preparation(PreparationFlow::RemoveFolder),
            )],
        }
    }

    pub(super) fn resume_preparation(
        &mut self,
        state: &mut AppState,
        flow: PreparationFlow,
        completion: Completion,
    ) -> Vec<Effect> {
        match flow {
            PreparationFlow::Sort { ticket, sort } => match folder(completion) {
                Ok(content) => {
                    if !self.sorts.is_current(&ticket) {
                        self.sorts.settle(&ticket, true);
                        debug!(
                            "event=preparation_sort module=dispatch status=skipped reason=stale"
                        );
                        return Vec::new();
                    }
                    state.inventory.set_folder(content);
                    vec![self.save_sort(ticket, sort)]
                }
                Err(err) => {
                    log_failure("list_folder", &err);
                    self.roll_back_sort(state, &ticket);
                    Vec::new()
                }
            },
            PreparationFlow::Fetch => {
                state.inventory.set_fetching_preparations(false);
                store_folder(state, completion);
                Vec::new()
            }
            PreparationFlow::Refresh => {
                store_folder(state, completion);
                Vec::new()
            }
            PreparationFlow::Rename { ticket } => match expect_done(completion, "rename") {
                Ok(()) => {
                    self.renames.settle(&ticket, true);
                    info!(
                        "event=preparation_rename module=dispatch status=ok kind={} id={}",
                        ticket.key.kind.as_str(),
                        ticket.key.id
                    );
                    vec![self.refresh_folder(state, PreparationFlow::Refresh)]
                }
                Err(err) => {
                    log_failure("rename", &err);
                    if let Settlement::RolledBack(previous) = self.renames.settle(&ticket, false) {
                        state.inventory.rename(&ticket.key, &previous);
                    }
                    Vec::new()
                }
            },
            PreparationFlow::ConfirmRemove { key, name } => {
                if !is_confirmed(&completion) {
                    debug!(
                        "event=preparation_remove module=dispatch status=skipped id={} reason=declined",
                        key.id
                    );
                    return Vec::new();
                }
                vec![self.request(
                    BackendRequest::DeletePreparation { id: key.id },
                    Flow::Preparation(PreparationFlow::Remove { name }),
                )]
            }
            PreparationFlow::Remove { name } => {
                match expect_done(completion, "delete_preparation") {
                    Ok(()) => vec![self.refresh_folder(
                        state,
                        PreparationFlow::RefreshAfterRemove { name },
                    )],
                    Err(err) => {
                        log_failure("delete_preparation", &err);
                        Vec::new()
                    }
                }
            }
            PreparationFlow::RefreshAfterRemove { name } => match folder(completion) {
                Ok(content) => {
                    state.inventory.set_folder(content);
                    vec![Effect::Notify(
                        Notification::success("REMOVE_SUCCESS_TITLE", "REMOVE_SUCCESS")
                            .with_param("type", ItemKind::Preparation.as_str())
                            .with_param("name", name),
                    )]
                }
                Err(err) => {
                    log_failure("list_folder", &err);
                    Vec::new()
                }
            },
            PreparationFlow::RemoveFolder => match expect_done(completion, "remove_folder") {
                Ok(()) => vec![self.refresh_folder(state, PreparationFlow::Refresh)],
                Err(err) => {
                    log_failure("remove_folder", &err);
                    Vec::new()
                }
            },
        }
    }

    /// Reloads the folder currently shown, with the current sort.
    fn refresh_folder(&mut self, state: &AppState, flow: PreparationFlow) -> Effect {
        let folder_id = state.inventory.folder().metadata.id.clone();
        let sort = state.inventory.preparations_sort();
        self.request(
            BackendRequest::ListFolder { folder_id, sort },
            Flow::Preparation(flow),
        )
    }
}

fn folder(completion: Completion) -> Result<FolderContent, BackendError> {
    match backend_result(completion, "list_folder")? {
        BackendResponse::Folder(content) => Ok(content),
        _ => Err(BackendError::UnexpectedResponse {
            request: "list_folder",
        }),
    }
}

fn store_folder(state: &mut AppState, completion: Completion) {
    match folder(completion) {
        Ok(content) => state.inventory.set_folder(content),
        Err(err) => log_failure("list_folder", &err),
    }
}
