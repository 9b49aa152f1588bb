//! Counters returned by host passes.

use super::EffectPanic;
use crate::typeclass::{Monoid, Semigroup};

/// What a host pass did.
///
/// Reports from consecutive passes combine by addition, so a whole run can
/// be summarized with [`Monoid::combine_all`].
///
/// ```rust
/// use elmish::runtime::Report;
/// use elmish::typeclass::Semigroup;
///
/// let first = Report { transitions: 2, executed: 1, failures: Vec::new() };
/// let second = Report { transitions: 0, executed: 3, failures: Vec::new() };
/// assert_eq!(first.combine(second).executed, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Actions taken from the inbox and reduced, no-ops included.
    pub transitions: usize,
    /// Effect units invoked.
    pub executed: usize,
    /// Units that panicked while being invoked.
    pub failures: Vec<EffectPanic>,
}

impl Report {
    /// `true` when the pass neither reduced an action nor ran a unit.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.transitions == 0 && self.executed == 0
    }
}

impl Semigroup for Report {
    fn combine(self, other: Self) -> Self {
        Self {
            transitions: self.transitions + other.transitions,
            executed: self.executed + other.executed,
            failures: self.failures.combine(other.failures),
        }
    }
}

impl Monoid for Report {
    fn empty() -> Self {
        Self::default()
    }
}
