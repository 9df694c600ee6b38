//! Effect runtime.
//!
//! # Responsibility
//! - Own the session state, the dispatcher and the collaborators.
//! - Run effects in order and feed completions back to the dispatcher.
//!
//! # Invariants
//! - Effects run FIFO; a continuation's effects queue behind the effects
//!   already pending, so one chain never interleaves with itself.
//! - Unknown action types are ignored after a debug log.

use crate::action::{Action, ActionParseError};
use crate::dispatch::Dispatcher;
use crate::effect::{
    BackendError, BackendRequest, BackendResponse, Completion, ConfirmPrompt, Effect,
    ExternalUiTrigger, Notification,
};
use crate::preferences::{InventoryPreferences, PreferenceStore};
use crate::state::AppState;
use log::{debug, warn};
use std::collections::VecDeque;

/// REST resource client.
pub trait BackendClient {
    fn execute(&mut self, request: &BackendRequest) -> Result<BackendResponse, BackendError>;
}

/// Host UI services reached outside the state store.
pub trait UiBridge {
    /// Blocking confirmation dialog; `true` when confirmed.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
    fn notify(&mut self, notification: &Notification);
    fn trigger(&mut self, trigger: ExternalUiTrigger);
}

pub struct Runtime<B: BackendClient, P: PreferenceStore, U: UiBridge> {
    state: AppState,
    dispatcher: Dispatcher,
    backend: B,
    preferences: P,
    ui: U,
}

impl<B: BackendClient, P: PreferenceStore, U: UiBridge> Runtime<B, P, U> {
    /// Creates the session and restores persisted inventory preferences.
    pub fn new(backend: B, preferences: P, ui: U) -> Self {
        let mut state = AppState::new();
        state.restore_preferences(&InventoryPreferences::load(&preferences));
        Self {
            state,
            dispatcher: Dispatcher::new(),
            backend,
            preferences,
            ui,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Direct state access for hosts that load data outside the action
    /// system (e.g. opening the playground).
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn dispatch(&mut self, action: Action) {
        let effects = self.dispatcher.dispatch(&mut self.state, action);
        self.drain(effects);
    }

    /// Parses and dispatches one wire action.
    ///
    /// Unknown types are ignored and return `Ok`; malformed messages and
    /// bad payloads are errors.
    pub fn dispatch_json(&mut self, raw: &str) -> Result<(), ActionParseError> {
        match Action::from_json(raw) {
            Ok(action) => {
                self.dispatch(action);
                Ok(())
            }
            Err(ActionParseError::UnknownType(action_type)) => {
                debug!(
                    "event=action_dispatch module=runtime status=skipped reason=unknown_type type={action_type}"
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=action_parse module=runtime status=error error={err}");
                Err(err)
            }
        }
    }

    fn drain(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let next = match effect {
                Effect::Request { id, request } => {
                    let result = self.backend.execute(&request);
                    self.dispatcher
                        .resolve(&mut self.state, id, Completion::Backend(result))
                }
                Effect::Confirm { id, prompt } => {
                    let confirmed = self.ui.confirm(&prompt);
                    self.dispatcher
                        .resolve(&mut self.state, id, Completion::Confirmation(confirmed))
                }
                Effect::SavePreference { id, write } => {
                    let result = write.apply(&self.preferences).map_err(|err| {
                        warn!(
                            "event=preference_save module=runtime status=error key={} error={err}",
                            write.key()
                        );
                        err.to_string()
                    });
                    self.dispatcher
                        .resolve(&mut self.state, id, Completion::Saved(result))
                }
                Effect::Notify(notification) => {
                    self.ui.notify(&notification);
                    Vec::new()
                }
                Effect::TriggerExternalUi(trigger) => {
                    self.ui.trigger(trigger);
                    Vec::new()
                }
            };
            queue.extend(next);
        }
    }
}
