/*
[INPUT]:  Sequence numbers carried by balances, orders, trades and ticks
[OUTPUT]: Gap / reorder classification per stream
[POS]:    Data layer - consumer-side ordering checks
[UPDATE]: When sequence semantics of the exchange change
*/

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Outcome of observing one sequence number on a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceCheck {
    /// First value seen for the stream.
    First,
    /// Exactly one more than the previous value.
    InOrder,
    /// Values between `expected` and `received` were never seen.
    Gap { expected: u64, received: u64 },
    /// Duplicate or reordered value at or below the last one seen.
    Stale { last: u64, received: u64 },
}

impl SequenceCheck {
    pub fn is_in_order(&self) -> bool {
        matches!(self, SequenceCheck::First | SequenceCheck::InOrder)
    }
}

/// Tracks the last sequence number per stream (account, instrument, ...).
///
/// The client never enforces ordering; consumers feed records through a
/// tracker to detect gaps or reordering. Stale values never move a stream
/// backwards.
#[derive(Debug, Clone)]
pub struct SequenceTracker<K = String> {
    last: HashMap<K, u64>,
}

impl<K> Default for SequenceTracker<K> {
    fn default() -> Self {
        Self {
            last: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> SequenceTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, stream: K, sequence: u64) -> SequenceCheck {
        match self.last.entry(stream) {
            Entry::Vacant(slot) => {
                slot.insert(sequence);
                SequenceCheck::First
            }
            Entry::Occupied(mut slot) => {
                let last = *slot.get();
                if sequence <= last {
                    return SequenceCheck::Stale {
                        last,
                        received: sequence,
                    };
                }
                slot.insert(sequence);
                if sequence == last + 1 {
                    SequenceCheck::InOrder
                } else {
                    SequenceCheck::Gap {
                        expected: last + 1,
                        received: sequence,
                    }
                }
            }
        }
    }

    pub fn last<Q>(&self, stream: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.last.get(stream).copied()
    }

    /// Forget a stream, e.g. after re-fetching a snapshot.
    pub fn reset<Q>(&mut self, stream: &Q)
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.last.remove(stream);
    }
}
