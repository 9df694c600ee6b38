//! Documentation search.

use super::{backend_result, log_failure, Dispatcher, Flow};
use crate::action::SearchAction;
use crate::effect::{BackendError, BackendRequest, BackendResponse, Completion, Effect};
use crate::search::documentation::search_results;
use crate::state::AppState;
use log::debug;

#[derive(Debug)]
pub(super) enum SearchFlow {
    Documentation { keyword: String },
}

impl Dispatcher {
    pub(super) fn dispatch_search(
        &mut self,
        state: &mut AppState,
        action: SearchAction,
    ) -> Vec<Effect> {
        match action {
            SearchAction::Documentation { keyword } => {
                let keyword = keyword.trim().to_string();
                if keyword.is_empty() {
                    state.search.clear();
                    return Vec::new();
                }
                state.search.start(&keyword);
                vec![self.request(
                    BackendRequest::SearchDocumentation {
                        keyword: keyword.clone(),
                    },
                    Flow::Search(SearchFlow::Documentation { keyword }),
                )]
            }
        }
    }

    pub(super) fn resume_search(
        &mut self,
        state: &mut AppState,
        flow: SearchFlow,
        completion: Completion,
    ) -> Vec<Effect> {
        match flow {
            SearchFlow::Documentation { keyword } => {
                if state.search.keyword() != Some(keyword.as_str()) {
                    debug!("event=documentation_search module=dispatch status=skipped reason=stale");
                    return Vec::new();
                }
                match documentation(completion) {
                    Ok(body) => {
                        let entries = search_results(&body, &keyword);
                        debug!(
                            "event=documentation_search module=dispatch status=ok results={}",
                            entries.len()
                        );
                        state.search.set_documentation(entries);
                    }
                    Err(err) => {
                        log_failure("search_documentation", &err);
                        state.search.stop();
                    }
                }
                Vec::new()
            }
        }
    }
}

fn documentation(completion: Completion) -> Result<String, BackendError> {
    match backend_result(completion, "search_documentation")? {
        BackendResponse::Documentation(body) => Ok(body),
        _ => Err(BackendError::UnexpectedResponse {
            request: "search_documentation",
        }),
    }
}
