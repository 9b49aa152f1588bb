//! Monoid type class - semigroups with an identity element.
//!
//! A type `T` is a monoid if it is a [`Semigroup`] and has an identity
//! element `empty` such that combining with it changes nothing. For
//! [`Effect`](crate::effect::Effect) the identity is the effect with no
//! units, so `Effect::none()` and `Effect::empty()` are the same value.
//!
//! # Laws
//!
//! ```text
//! T::empty().combine(a) == a
//! a.combine(T::empty()) == a
//! ```

use super::semigroup::Semigroup;

/// A type class for semigroups with an identity element.
///
/// # Examples
///
/// ```rust
/// use elmish::effect::Effect;
/// use elmish::typeclass::Monoid;
///
/// let effect: Effect<u8> = Effect::combine_all([
///     Effect::action(1),
///     Effect::empty(),
///     Effect::action(2),
/// ]);
/// assert_eq!(effect.len(), 2);
/// ```
pub trait Monoid: Semigroup {
    /// Returns the identity element for this monoid.
    fn empty() -> Self;

    /// Combines all elements in an iterator, starting from the identity element.
    ///
    /// An empty iterator yields the identity element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use elmish::typeclass::Monoid;
    ///
    /// let empty: Vec<Vec<u8>> = vec![];
    /// assert!(Vec::combine_all(empty).is_empty());
    /// ```
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), |accumulator, element| {
                accumulator.combine(element)
            })
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }
}
