//! Playground actions: column type menu and recipe steps.

use super::{backend_result, expect_done, log_failure, Dispatcher, Flow};
use crate::action::PlaygroundAction;
use crate::effect::{
    BackendError, BackendRequest, BackendResponse, Completion, Effect, Notification,
};
use crate::model::column::{
    adapt_semantic_domains, filter_menu_types, Column, PrimitiveType, SemanticDomain,
    TypeDescriptor,
};
use crate::model::inventory::ItemKey;
use crate::model::step::StepAction;
use crate::optimistic::{MutationTicket, Settlement};
use crate::state::AppState;
use log::debug;

#[derive(Debug)]
pub(super) enum PlaygroundFlow {
    Domains {
        column_id: String,
    },
    Types,
    /// Type or domain change applied to the column before the step is sent;
    /// the ticket is keyed by playground target and column id.
    ColumnChange {
        ticket: MutationTicket<(ItemKey, String)>,
        step: StepAction,
    },
    AppendStep {
        actions: Vec<StepAction>,
    },
}

impl Dispatcher {
    pub(super) fn dispatch_playground(
        &mut self,
        state: &mut AppState,
        action: PlaygroundAction,
    ) -> Vec<Effect> {
        match action {
            PlaygroundAction::LoadColumnTypes { column_id } => {
                let Some(target) = state.playground.target() else {
                    debug!("event=column_types module=dispatch status=skipped reason=no_playground");
                    return Vec::new();
                };
                vec![self.request(
                    BackendRequest::FetchColumnDomains {
                        target,
                        column_id: column_id.clone(),
                    },
                    Flow::Playground(PlaygroundFlow::Domains { column_id }),
                )]
            }
            PlaygroundAction::ChangeType { column_id, type_id } => {
                let Some(kind) = PrimitiveType::parse(&type_id) else {
                    debug!("event=column_type_change module=dispatch status=skipped column_id={column_id} reason=unknown_type");
                    return Vec::new();
                };
                self.change_column(state, &column_id, |column| {
                    let step = StepAction::type_change(column, &type_id);
                    column.set_domain_and_type(&SemanticDomain::none(), Some(kind));
                    step
                })
            }
            PlaygroundAction::ChangeDomain { column_id, domain } => {
                self.change_column(state, &column_id, |column| {
                    column.set_domain_and_type(&domain, None);
                    StepAction::domain_change(column, &domain)
                })
            }
            PlaygroundAction::AppendStep { actions } => {
                let Some(target) = state.playground.target() else {
                    debug!("event=append_step module=dispatch status=skipped reason=no_playground");
                    return Vec::new();
                };
                vec![self.request(
                    BackendRequest::AppendStep {
                        target,
                        actions: actions.clone(),
                    },
                    Flow::Playground(PlaygroundFlow::AppendStep { actions }),
                )]
            }
        }
    }

    pub(super) fn resume_playground(
        &mut self,
        state: &mut AppState,
        flow: PlaygroundFlow,
        completion: Completion,
    ) -> Vec<Effect> {
        match flow {
            PlaygroundFlow::Domains { column_id } => {
                let domains = match domains(completion) {
                    Ok(domains) => adapt_semantic_domains(domains),
                    Err(err) => {
                        log_failure("fetch_column_domains", &err);
                        return Vec::new();
                    }
                };
                state.playground.set_semantic_domains(&column_id, domains);
                if state.playground.primitive_types().is_some() {
                    return Vec::new();
                }
                vec![self.request(
                    BackendRequest::FetchTypes,
                    Flow::Playground(PlaygroundFlow::Types),
                )]
            }
            PlaygroundFlow::Types => {
                match types(completion) {
                    Ok(types) => state.playground.set_primitive_types(filter_menu_types(types)),
                    Err(err) => log_failure("fetch_types", &err),
                }
                Vec::new()
            }
            PlaygroundFlow::ColumnChange { ticket, step } => {
                let (target, column_id) = &ticket.key;
                let still_open = state.playground.target().as_ref() == Some(target);
                match expect_done(completion, "append_step") {
                    Ok(()) => {
                        self.columns.settle(&ticket, true);
                        if still_open {
                            state.playground.append_steps(vec![step]);
                        }
                    }
                    Err(err) => {
                        log_failure("append_step", &err);
                        let settlement = self.columns.settle(&ticket, false);
                        if !still_open {
                            debug!("event=column_change module=dispatch status=skipped column_id={column_id} reason=playground_changed");
                        } else if let Settlement::RolledBack(snapshot) = settlement {
                            if let Some(column) = state.playground.column_mut(column_id) {
                                column.restore(&snapshot);
                            }
                        }
                    }
                }
                Vec::new()
            }
            PlaygroundFlow::AppendStep { actions } => match expect_done(completion, "append_step")
            {
                Ok(()) => {
                    state.playground.append_steps(actions);
                    Vec::new()
                }
                Err(err) => {
                    log_failure("append_step", &err);
                    vec![Effect::Notify(Notification::error(
                        "APPEND_STEP_ERROR_TITLE",
                        "APPEND_STEP_ERROR",
                    ))]
                }
            },
        }
    }

    /// Applies `change` to the column right away and sends the step it
    /// returns; the column is restored if the step is rejected.
    fn change_column(
        &mut self,
        state: &mut AppState,
        column_id: &str,
        change: impl FnOnce(&mut Column) -> StepAction,
    ) -> Vec<Effect> {
        let Some(target) = state.playground.target() else {
            debug!("event=column_change module=dispatch status=skipped reason=no_playground");
            return Vec::new();
        };
        let Some(column) = state.playground.column_mut(column_id) else {
            debug!("event=column_change module=dispatch status=skipped column_id={column_id} reason=unknown_column");
            return Vec::new();
        };
        let ticket = self
            .columns
            .begin((target.clone(), column_id.to_string()), column.snapshot());
        let step = change(column);
        vec![self.request(
            BackendRequest::AppendStep {
                target,
                actions: vec![step.clone()],
            },
            Flow::Playground(PlaygroundFlow::ColumnChange { ticket, step }),
        )]
    }
}

fn domains(completion: Completion) -> Result<Vec<SemanticDomain>, BackendError> {
    match backend_result(completion, "fetch_column_domains")? {
        BackendResponse::Domains(domains) => Ok(domains),
        _ => Err(BackendError::UnexpectedResponse {
            request: "fetch_column_domains",
        }),
    }
}

fn types(completion: Completion) -> Result<Vec<TypeDescriptor>, BackendError> {
    match backend_result(completion, "fetch_types")? {
        BackendResponse::Types(types) => Ok(types),
        _ => Err(BackendError::UnexpectedResponse {
            request: "fetch_types",
        }),
    }
}
