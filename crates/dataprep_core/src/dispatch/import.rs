//! Import dialog actions.

use super::{backend_result, log_failure, Dispatcher, Flow};
use crate::action::ImportAction;
use crate::effect::{BackendError, BackendRequest, BackendResponse, Completion, Effect};
use crate::state::import::ImportType;
use crate::state::AppState;
use log::debug;

#[derive(Debug)]
pub(super) enum ImportFlow {
    FetchTypes,
}

impl Dispatcher {
    pub(super) fn dispatch_import(
        &mut self,
        state: &mut AppState,
        action: ImportAction,
    ) -> Vec<Effect> {
        match action {
            ImportAction::FetchTypes => vec![self.request(
                BackendRequest::ListImportTypes,
                Flow::Import(ImportFlow::FetchTypes),
            )],
            ImportAction::Open { import_type } => {
                let selected = match import_type.as_deref() {
                    Some(location) => state
                        .import
                        .import_types()
                        .iter()
                        .find(|candidate| candidate.location_type == location),
                    None => state.import.default_import_type(),
                };
                match selected.cloned() {
                    Some(item) => state.import.set_visible(item),
                    None => debug!(
                        "event=import_open module=dispatch status=skipped reason=unknown_type"
                    ),
                }
                Vec::new()
            }
            ImportAction::Close => {
                state.import.hide();
                Vec::new()
            }
        }
    }

    pub(super) fn resume_import(
        &mut self,
        state: &mut AppState,
        flow: ImportFlow,
        completion: Completion,
    ) -> Vec<Effect> {
        match flow {
            ImportFlow::FetchTypes => match import_types(completion) {
                Ok(types) => state.import.set_import_types(types),
                Err(err) => log_failure("list_import_types", &err),
            },
        }
        Vec::new()
    }
}

fn import_types(completion: Completion) -> Result<Vec<ImportType>, BackendError> {
    match backend_result(completion, "list_import_types")? {
        BackendResponse::ImportTypes(types) => Ok(types),
        _ => Err(BackendError::UnexpectedResponse {
            request: "list_import_types",
        }),
    }
}
