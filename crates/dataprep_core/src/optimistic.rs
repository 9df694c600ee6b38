//! Optimistic mutation bookkeeping.
//!
//! # Responsibility
//! - Capture the value a target had before a locally applied change.
//! - Decide, when the persisting request settles, whether to keep the new
//!   value, restore the captured one, or ignore a stale response.
//!
//! # Invariants
//! - Versions are globally monotonic across all keys of one ledger.
//! - Only the current ticket of a key may commit or roll back; older
//!   tickets settle as `Stale` and leave the target untouched.
//! - A failed older ticket hands its captured value to the next pending
//!   ticket of the key, and a rolled-back current ticket hands currency to
//!   the previous pending one. Either failure order ends on the value the
//!   backend last accepted.
//! - Every ticket settles at most once; a second `settle` is `Stale`.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Proof of one in-flight optimistic mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutationTicket<K> {
    pub key: K,
    pub version: u64,
}

/// What the caller must do once a request has settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement<V> {
    /// Request succeeded; the optimistic value stays.
    Committed,
    /// Request failed; re-apply this captured value.
    RolledBack(V),
    /// A newer mutation of the same key was issued; ignore this response.
    Stale,
}

#[derive(Debug)]
struct Pending<K, V> {
    key: K,
    previous: V,
}

/// Per-key versioned ledger of in-flight optimistic mutations.
#[derive(Debug)]
pub struct MutationLedger<K, V> {
    next_version: u64,
    latest: HashMap<K, u64>,
    pending: BTreeMap<u64, Pending<K, V>>,
}

impl<K, V> Default for MutationLedger<K, V> {
    fn default() -> Self {
        Self {
            next_version: 1,
            latest: HashMap::new(),
            pending: BTreeMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V> MutationLedger<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mutation of `key` whose prior value is `previous`.
    ///
    /// The caller applies the new value right after this call.
    pub fn begin(&mut self, key: K, previous: V) -> MutationTicket<K> {
        let version = self.next_version;
        self.next_version += 1;
        self.latest.insert(key.clone(), version);
        self.pending.insert(
            version,
            Pending {
                key: key.clone(),
                previous,
            },
        );
        MutationTicket { key, version }
    }

    pub fn settle(&mut self, ticket: &MutationTicket<K>, succeeded: bool) -> Settlement<V> {
        let Some(pending) = self.pending.remove(&ticket.version) else {
            return Settlement::Stale;
        };
        if self.latest.get(&pending.key) != Some(&ticket.version) {
            if !succeeded {
                if let Some(next) = self
                    .pending
                    .range_mut(ticket.version + 1..)
                    .map(|(_, next)| next)
                    .find(|next| next.key == pending.key)
                {
                    next.previous = pending.previous;
                }
            }
            return Settlement::Stale;
        }
        if succeeded {
            self.latest.remove(&pending.key);
            return Settlement::Committed;
        }
        let older = self
            .pending
            .range(..ticket.version)
            .rev()
            .find(|(_, older)| older.key == pending.key)
            .map(|(version, _)| *version);
        match older {
            Some(version) => {
                self.latest.insert(pending.key, version);
            }
            None => {
                self.latest.remove(&pending.key);
            }
        }
        Settlement::RolledBack(pending.previous)
    }

    /// `true` while `ticket` is pending and would commit or roll back.
    pub fn is_current(&self, ticket: &MutationTicket<K>) -> bool {
        self.pending.contains_key(&ticket.version)
            && self.latest.get(&ticket.key) == Some(&ticket.version)
    }

    pub fn is_in_flight(&self, key: &K) -> bool {
        self.pending.values().any(|pending| pending.key == *key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.pending.len()
    }
}
