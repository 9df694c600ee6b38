//! Preference writes, including the sort persistence chain.

use super::{Dispatcher, Flow};
use crate::effect::{Completion, Effect};
use crate::model::inventory::{ItemKind, SortSelection};
use crate::optimistic::{MutationTicket, Settlement};
use crate::preferences::PreferenceWrite;
use crate::state::AppState;
use log::{debug, info, warn};

#[derive(Debug)]
pub(super) enum PreferenceFlow {
    /// Standalone write; a failure is only logged.
    Write { key: &'static str },
    /// Sort field write; the order write follows on success.
    SortField {
        ticket: MutationTicket<ItemKind>,
        sort: SortSelection,
    },
    SortOrder {
        ticket: MutationTicket<ItemKind>,
    },
}

impl Dispatcher {
    pub(super) fn save_preference(&mut self, write: PreferenceWrite) -> Effect {
        let key = write.key();
        self.save(write, Flow::Preference(PreferenceFlow::Write { key }))
    }

    /// Starts persisting a sort whose list refresh succeeded.
    pub(super) fn save_sort(
        &mut self,
        ticket: MutationTicket<ItemKind>,
        sort: SortSelection,
    ) -> Effect {
        let write = sort_field_write(ticket.key, sort);
        self.save(
            write,
            Flow::Preference(PreferenceFlow::SortField { ticket, sort }),
        )
    }

    /// Settles a failed sort step and restores the captured selection.
    pub(super) fn roll_back_sort(
        &mut self,
        state: &mut AppState,
        ticket: &MutationTicket<ItemKind>,
    ) {
        if let Settlement::RolledBack(previous) = self.sorts.settle(ticket, false) {
            set_sort(state, ticket.key, previous);
        }
    }

    pub(super) fn resume_preference(
        &mut self,
        state: &mut AppState,
        flow: PreferenceFlow,
        completion: Completion,
    ) -> Vec<Effect> {
        let result = saved(completion);
        match flow {
            PreferenceFlow::Write { key } => {
                if let Err(err) = result {
                    warn!("event=preference_save module=dispatch status=error key={key} error={err}");
                }
                Vec::new()
            }
            PreferenceFlow::SortField { ticket, sort } => match result {
                Ok(()) => {
                    let write = sort_order_write(ticket.key, sort);
                    vec![self.save(
                        write,
                        Flow::Preference(PreferenceFlow::SortOrder { ticket }),
                    )]
                }
                Err(err) => {
                    warn!(
                        "event=sort_save module=dispatch status=error kind={} step=field error={err}",
                        ticket.key.as_str()
                    );
                    self.roll_back_sort(state, &ticket);
                    Vec::new()
                }
            },
            PreferenceFlow::SortOrder { ticket } => {
                match result {
                    Ok(()) => {
                        if matches!(self.sorts.settle(&ticket, true), Settlement::Committed) {
                            info!(
                                "event=sort_save module=dispatch status=ok kind={}",
                                ticket.key.as_str()
                            );
                        } else {
                            debug!(
                                "event=sort_save module=dispatch status=skipped kind={} reason=stale",
                                ticket.key.as_str()
                            );
                        }
                    }
                    Err(err) => {
                        warn!(
                            "event=sort_save module=dispatch status=error kind={} step=order error={err}",
                            ticket.key.as_str()
                        );
                        self.roll_back_sort(state, &ticket);
                    }
                }
                Vec::new()
            }
        }
    }
}

fn saved(completion: Completion) -> Result<(), String> {
    match completion {
        Completion::Saved(result) => result,
        Completion::Backend(_) | Completion::Confirmation(_) => {
            Err("unexpected completion".to_string())
        }
    }
}

fn sort_field_write(kind: ItemKind, sort: SortSelection) -> PreferenceWrite {
    match kind {
        ItemKind::Dataset => PreferenceWrite::DatasetsSort(sort.field),
        ItemKind::Preparation | ItemKind::Folder => PreferenceWrite::PreparationsSort(sort.field),
    }
}

fn sort_order_write(kind: ItemKind, sort: SortSelection) -> PreferenceWrite {
    match kind {
        ItemKind::Dataset => PreferenceWrite::DatasetsOrder(sort.order),
        ItemKind::Preparation | ItemKind::Folder => PreferenceWrite::PreparationsOrder(sort.order),
    }
}

fn set_sort(state: &mut AppState, kind: ItemKind, sort: SortSelection) {
    match kind {
        ItemKind::Dataset => state.inventory.set_datasets_sort(sort),
        ItemKind::Preparation | ItemKind::Folder => state.inventory.set_preparations_sort(sort),
    }
}
