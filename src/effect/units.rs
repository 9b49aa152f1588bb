//! `Effect`: an ordered batch of deferred units, and its synchronous constructors.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::Dispatch;
use crate::typeclass::{Monoid, Semigroup};

/// One deferred procedure. It runs at most once, when a runtime drains it.
pub(crate) type EffectUnit<A> = Box<dyn FnOnce(&Dispatch<A>) + Send + 'static>;

/// Most reducers return zero or one unit per transition.
const INLINE_UNITS: usize = 2;

/// An ordered sequence of deferred units produced by a reducer.
///
/// An `Effect` describes work; it performs none of it until a runtime (or a
/// call to [`Effect::run`]) hands each unit a [`Dispatch`]. Units carry no
/// identity of their own: two calls to the same constructor with equal
/// arguments are two distinct pending units. `Effect` is deliberately not
/// `Clone`, because each unit may run only once.
///
/// # Monoid
///
/// `Effect` is a [`Monoid`]: `combine` concatenates unit sequences and
/// `empty` is [`Effect::none`].
///
/// ```rust
/// use elmish::effect::{Dispatch, Effect};
/// use elmish::typeclass::Semigroup;
/// use std::sync::{Arc, Mutex};
///
/// let received = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&received);
/// let dispatch = Dispatch::new(move |action| sink.lock().unwrap().push(action));
///
/// Effect::action("a")
///     .combine(Effect::from_iterator(["b", "c"]))
///     .run(&dispatch);
/// assert_eq!(*received.lock().unwrap(), vec!["a", "b", "c"]);
/// ```
pub struct Effect<A> {
    units: SmallVec<[EffectUnit<A>; INLINE_UNITS]>,
}

impl<A> Effect<A> {
    /// The effect with no units.
    #[must_use]
    pub fn none() -> Self {
        Self {
            units: SmallVec::new(),
        }
    }

    /// Number of units in this effect.
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` for the no-op effect.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Invokes every unit in order with `dispatch`, consuming the effect.
    ///
    /// A runtime drains its queue through this same sequence; calling it
    /// directly is how hosts without a runtime, and tests, execute effects.
    pub fn run(self, dispatch: &Dispatch<A>) {
        for unit in self.units {
            unit(dispatch);
        }
    }

    pub(crate) fn into_units(self) -> impl Iterator<Item = EffectUnit<A>> {
        self.units.into_iter()
    }
}

impl<A: Send + 'static> Effect<A> {
    /// A unit that dispatches `action` once, synchronously.
    #[must_use]
    pub fn action(action: A) -> Self {
        Self::from_fn(move |dispatch| dispatch.send(action))
    }

    /// Wraps a procedure that receives the dispatch directly.
    ///
    /// The closure is the unit: it may dispatch zero, one or many times, and
    /// it may clone the dispatch to report later.
    #[must_use]
    pub fn from_fn<F>(function: F) -> Self
    where
        F: FnOnce(&Dispatch<A>) + Send + 'static,
    {
        let mut units: SmallVec<[EffectUnit<A>; INLINE_UNITS]> = SmallVec::new();
        units.push(Box::new(function));
        Self { units }
    }

    /// Runs a fallible producer and dispatches the mapped outcome.
    ///
    /// `Ok(value)` dispatches `of_success(value)`; `Err(error)` dispatches
    /// `of_error(error)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use elmish::effect::{Dispatch, Effect};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let received = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&received);
    /// let dispatch = Dispatch::new(move |action| sink.lock().unwrap().push(action));
    ///
    /// Effect::from_function(
    ///     || "42".parse::<i32>(),
    ///     |value| format!("parsed {value}"),
    ///     |error| format!("failed: {error}"),
    /// )
    /// .run(&dispatch);
    /// assert_eq!(*received.lock().unwrap(), vec!["parsed 42".to_string()]);
    /// ```
    #[must_use]
    pub fn from_function<V, E, F, S, R>(function: F, of_success: S, of_error: R) -> Self
    where
        F: FnOnce() -> Result<V, E> + Send + 'static,
        S: FnOnce(V) -> A + Send + 'static,
        R: FnOnce(E) -> A + Send + 'static,
    {
        Self::from_fn(move |dispatch| match function() {
            Ok(value) => dispatch.send(of_success(value)),
            Err(error) => dispatch.send(of_error(error)),
        })
    }

    /// Runs a fallible producer and reports only its failure.
    ///
    /// A successful return dispatches nothing; that is not an error.
    #[must_use]
    pub fn attempt_function<V, E, F, R>(function: F, of_error: R) -> Self
    where
        F: FnOnce() -> Result<V, E> + Send + 'static,
        R: FnOnce(E) -> A + Send + 'static,
    {
        Self::from_fn(move |dispatch| {
            if let Err(error) = function() {
                dispatch.send(of_error(error));
            }
        })
    }

    /// A unit that dispatches every element of `actions`, in order.
    ///
    /// The iterator is consumed when the unit runs, not when the effect is
    /// built.
    #[must_use]
    pub fn from_iterator<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = A> + Send + 'static,
    {
        Self::from_fn(move |dispatch| {
            for action in actions {
                dispatch.send(action);
            }
        })
    }

    /// Converts every action this effect dispatches with `function`.
    ///
    /// Used to embed a child component's effects in a parent whose action
    /// type wraps the child's. Order and unit count are preserved.
    #[must_use]
    pub fn map<B, F>(self, function: F) -> Effect<B>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        let units = self
            .units
            .into_iter()
            .map(|unit| {
                let function = Arc::clone(&function);
                Box::new(move |dispatch: &Dispatch<B>| {
                    unit(&dispatch.contramap(move |action| function(action)));
                }) as EffectUnit<B>
            })
            .collect();
        Effect { units }
    }
}

impl<A> Semigroup for Effect<A> {
    fn combine(mut self, other: Self) -> Self {
        self.units.extend(other.units);
        self
    }
}

impl<A> Monoid for Effect<A> {
    fn empty() -> Self {
        Self::none()
    }
}

impl<A> Default for Effect<A> {
    fn default() -> Self {
        Self::none()
    }
}

impl<A> FromIterator<Effect<A>> for Effect<A> {
    fn from_iter<I: IntoIterator<Item = Effect<A>>>(iterator: I) -> Self {
        Self::combine_all(iterator)
    }
}

impl<A> Extend<Effect<A>> for Effect<A> {
    fn extend<I: IntoIterator<Item = Effect<A>>>(&mut self, iterator: I) {
        for effect in iterator {
            self.units.extend(effect.units);
        }
    }
}

impl<A> fmt::Debug for Effect<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Effect")
            .field("units", &self.units.len())
            .finish()
    }
}
