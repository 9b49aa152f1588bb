//! The pure state-transition seam.

use std::sync::Arc;

use crate::effect::Effect;

/// The result of one domain transition: the next state and the effects to
/// run once it has been committed.
pub type Transition<S, A> = (Arc<S>, Effect<A>);

/// A pure function `(state, action) -> (state, effects)`.
///
/// Returning the same `Arc` (by pointer) together with an empty effect
/// marks the transition as a no-op: observers are not notified and the host
/// is not asked to commit.
///
/// Any closure or function with the matching signature is a reducer:
///
/// ```rust
/// use elmish::effect::Effect;
/// use elmish::runtime::{Reducer, Transition};
/// use std::sync::Arc;
///
/// fn counter(state: &Arc<i64>, delta: i64) -> Transition<i64, i64> {
///     if delta == 0 {
///         (Arc::clone(state), Effect::none())
///     } else {
///         (Arc::new(**state + delta), Effect::none())
///     }
/// }
///
/// let (next, effects) = counter.reduce(&Arc::new(1), 2);
/// assert_eq!(*next, 3);
/// assert!(effects.is_empty());
/// ```
///
/// A reducer must not panic for a well-formed action. If it does, the panic
/// reaches whoever is applying the transition and the state is left as it
/// was.
pub trait Reducer<S, A>: Send + Sync + 'static {
    /// Computes the transition for `action` from `state`.
    fn reduce(&self, state: &Arc<S>, action: A) -> Transition<S, A>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&Arc<S>, A) -> Transition<S, A> + Send + Sync + 'static,
{
    #[inline]
    fn reduce(&self, state: &Arc<S>, action: A) -> Transition<S, A> {
        self(state, action)
    }
}
