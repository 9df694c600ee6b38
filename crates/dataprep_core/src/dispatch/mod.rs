//! Action dispatch.
//!
//! # Responsibility
//! - Apply the synchronous part of each action to `AppState`.
//! - Emit the effects the action needs, and park a continuation for every
//!   request or confirmation it waits on.
//! - Resume parked continuations when their completion arrives.
//!
//! # Invariants
//! - Each `RequestId` maps to at most one parked continuation and is
//!   resolved at most once; unknown ids are ignored.
//! - Optimistic targets (column type/domain, sort selection, item name,
//!   favourite flag) are versioned per key; only the latest mutation of a key
//!   may commit or roll back. Column changes are keyed by playground target
//!   and column id.
//! - A sort selection stays in flight until its list refresh and both
//!   preference writes have succeeded; any failed step restores it.
//! - A chain step is emitted only after the previous step succeeded.

mod dataset;
mod import;
mod inventory;
mod playground;
mod preference;
mod preparation;
mod search;

use crate::action::Action;
use crate::effect::{
    BackendError, BackendRequest, BackendResponse, Completion, ConfirmPrompt, Effect,
    Notification, RequestId,
};
use crate::model::column::ColumnTypeSnapshot;
use crate::model::inventory::{name_in_use, ItemKey, ItemKind, SortSelection};
use crate::optimistic::MutationLedger;
use crate::preferences::PreferenceWrite;
use crate::state::AppState;
use log::{debug, warn};
use std::collections::HashMap;

use dataset::DatasetFlow;
use import::ImportFlow;
use playground::PlaygroundFlow;
use preference::PreferenceFlow;
use preparation::PreparationFlow;
use search::SearchFlow;

/// Continuation parked until a request or confirmation completes.
#[derive(Debug)]
enum Flow {
    Dataset(DatasetFlow),
    Preparation(PreparationFlow),
    Playground(PlaygroundFlow),
    Preference(PreferenceFlow),
    Import(ImportFlow),
    Search(SearchFlow),
}

/// Turns actions into state changes plus effects.
#[derive(Debug)]
pub struct Dispatcher {
    next_request: u64,
    pending: HashMap<RequestId, Flow>,
    columns: MutationLedger<(ItemKey, String), ColumnTypeSnapshot>,
    sorts: MutationLedger<ItemKind, SortSelection>,
    renames: MutationLedger<ItemKey, String>,
    favourites: MutationLedger<ItemKey, bool>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            next_request: 1,
            pending: HashMap::new(),
            columns: MutationLedger::new(),
            sorts: MutationLedger::new(),
            renames: MutationLedger::new(),
            favourites: MutationLedger::new(),
        }
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` and returns the effects to run, in order.
    pub fn dispatch(&mut self, state: &mut AppState, action: Action) -> Vec<Effect> {
        debug!(
            "event=action_dispatch module=dispatch status=start action={}",
            action.name()
        );
        match action {
            Action::Dataset(action) => self.dispatch_dataset(state, action),
            Action::Preparation(action) => self.dispatch_preparation(state, action),
            Action::Inventory(action) => self.dispatch_inventory(state, action),
            Action::Playground(action) => self.dispatch_playground(state, action),
            Action::Import(action) => self.dispatch_import(state, action),
            Action::Search(action) => self.dispatch_search(state, action),
        }
    }

    /// Resumes the continuation parked under `id`.
    pub fn resolve(
        &mut self,
        state: &mut AppState,
        id: RequestId,
        completion: Completion,
    ) -> Vec<Effect> {
        let Some(flow) = self.pending.remove(&id) else {
            warn!("event=request_resolve module=dispatch status=skipped reason=unknown_id id={id}");
            return Vec::new();
        };
        match flow {
            Flow::Dataset(flow) => self.resume_dataset(state, flow, completion),
            Flow::Preparation(flow) => self.resume_preparation(state, flow, completion),
            Flow::Playground(flow) => self.resume_playground(state, flow, completion),
            Flow::Preference(flow) => self.resume_preference(state, flow, completion),
            Flow::Import(flow) => self.resume_import(state, flow, completion),
            Flow::Search(flow) => self.resume_search(state, flow, completion),
        }
    }

    /// Number of requests and confirmations awaiting completion.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_renaming(&self, key: &ItemKey) -> bool {
        self.renames.is_in_flight(key)
    }

    fn request(&mut self, request: BackendRequest, flow: Flow) -> Effect {
        let id = self.park(flow);
        debug!(
            "event=request_issue module=dispatch status=start request={} id={id}",
            request.name()
        );
        Effect::Request { id, request }
    }

    fn confirm(&mut self, prompt: ConfirmPrompt, flow: Flow) -> Effect {
        let id = self.park(flow);
        Effect::Confirm { id, prompt }
    }

    fn save(&mut self, write: PreferenceWrite, flow: Flow) -> Effect {
        let id = self.park(flow);
        Effect::SavePreference { id, write }
    }

    fn park(&mut self, flow: Flow) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.pending.insert(id, flow);
        id
    }

    /// Applies the client-side rename guards shared by every inventory list.
    ///
    /// Edit mode is always left disabled. Returns the cleaned name when the
    /// rename may proceed; otherwise the effects to emit instead.
    fn check_rename(
        &self,
        state: &mut AppState,
        key: &ItemKey,
        value: &str,
        keys: &RenameMessages,
    ) -> Result<String, Vec<Effect>> {
        state.inventory.disable_edit(key);

        let clean = value.trim();
        let current = state.inventory.find(key).map(|item| item.name.as_str());
        if clean.is_empty() || current.is_none() || current == Some(clean) {
            debug!(
                "event=rename module=dispatch status=skipped kind={} id={} reason=unchanged",
                key.kind.as_str(),
                key.id
            );
            return Err(Vec::new());
        }
        if self.renames.is_in_flight(key) {
            return Err(vec![Effect::Notify(Notification::warning(
                keys.renaming_title,
                keys.renaming,
            ))]);
        }
        if name_in_use(state.inventory.siblings(key), clean, key) {
            return Err(vec![Effect::Notify(Notification::error(
                keys.used_title,
                keys.used,
            ))]);
        }
        Ok(clean.to_string())
    }
}

/// Message keys of the rename guards for one inventory family.
struct RenameMessages {
    renaming_title: &'static str,
    renaming: &'static str,
    used_title: &'static str,
    used: &'static str,
}

/// Unwraps a backend completion; any other completion is a mismatch.
fn backend_result(
    completion: Completion,
    request: &'static str,
) -> Result<BackendResponse, BackendError> {
    match completion {
        Completion::Backend(result) => result,
        Completion::Confirmation(_) | Completion::Saved(_) => {
            Err(BackendError::UnexpectedResponse { request })
        }
    }
}

fn is_confirmed(completion: &Completion) -> bool {
    matches!(completion, Completion::Confirmation(true))
}

/// Success without a payload of interest.
fn expect_done(completion: Completion, request: &'static str) -> Result<(), BackendError> {
    backend_result(completion, request).map(|_| ())
}

fn log_failure(request: &'static str, err: &BackendError) {
    warn!("event=request_settle module=dispatch status=error request={request} error={err}");
}
