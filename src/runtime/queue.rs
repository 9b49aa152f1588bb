//! Pending effect units, addressed by sequence id.
//!
//! Every unit appended by a transition receives the next [`EffectId`]. Ids
//! only grow, so the queue is always sorted by id and a drain is a range:
//! capture the boundary (the next id to be handed out), then take every
//! entry below it. Units appended after the boundary was captured stay
//! queued for the next drain, however they got there.
//!
//! ```text
//!   boundary captured here ──────────┐
//!                                    ▼
//!   [ #4 | #5 | #6 | #7 ]  ──take──► [ #4 | #5 | #6 | #7 ]   (run in order)
//!   [ #8 ]                           left for the next drain
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::effect::{Effect, EffectUnit};

/// Identity of one pending effect unit within a runtime.
///
/// Two units built from identical arguments still get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectId(u64);

impl EffectId {
    /// Wraps a raw sequence number.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "effect#{}", self.0)
    }
}

pub(crate) struct PendingEntry<A> {
    pub(crate) id: EffectId,
    pub(crate) unit: EffectUnit<A>,
}

/// FIFO arena of units waiting for the next drain.
pub(crate) struct PendingQueue<A> {
    entries: VecDeque<PendingEntry<A>>,
    next: u64,
}

impl<A> PendingQueue<A> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The id the next appended unit will receive.
    pub(crate) const fn boundary(&self) -> EffectId {
        EffectId(self.next)
    }

    /// Appends every unit of `effect`, in order. Returns how many were added.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted.
    pub(crate) fn push(&mut self, effect: Effect<A>) -> usize {
        let before = self.entries.len();
        for unit in effect.into_units() {
            let id = EffectId(self.next);
            self.next = self
                .next
                .checked_add(1)
                .expect("effect id space exhausted");
            self.entries.push_back(PendingEntry { id, unit });
        }
        self.entries.len() - before
    }

    /// Removes and returns every entry whose id is below `boundary`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the queue is not sorted by id, which would mean an entry
    /// was inserted out of sequence.
    pub(crate) fn take_before(&mut self, boundary: EffectId) -> Vec<PendingEntry<A>> {
        let split = self.entries.partition_point(|entry| entry.id < boundary);
        let taken: Vec<PendingEntry<A>> = self.entries.drain(..split).collect();
        assert!(
            self.entries.iter().all(|entry| entry.id >= boundary),
            "pending effects out of sequence below {boundary}"
        );
        taken
    }
}

impl<A> fmt::Debug for PendingQueue<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PendingQueue")
            .field("len", &self.entries.len())
            .field("next", &self.next)
            .finish()
    }
}
