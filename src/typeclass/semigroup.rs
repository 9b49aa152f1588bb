//! Semigroup type class - types with an associative binary operation.
//!
//! A type `T` is a semigroup if there exists a function
//! `combine: (T, T) -> T` that is associative. In this crate the operation
//! is always some form of ordered concatenation: effects concatenate their
//! units, reports concatenate their counters and failures.
//!
//! # Laws
//!
//! For all `a`, `b`, `c` of type `T`:
//!
//! ## Associativity
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use elmish::typeclass::Semigroup;
//!
//! let first = vec![1, 2];
//! let second = vec![3, 4];
//! assert_eq!(first.combine(second), vec![1, 2, 3, 4]);
//! ```

/// A type class for types with an associative binary operation.
///
/// # Laws
///
/// All implementations must satisfy:
///
/// ## Associativity
///
/// For all `a`, `b`, `c`:
/// ```text
/// (a.combine(b)).combine(c) == a.combine(b.combine(c))
/// ```
///
/// # Examples
///
/// ```rust
/// use elmish::effect::Effect;
/// use elmish::typeclass::Semigroup;
///
/// let effect: Effect<&str> = Effect::action("first").combine(Effect::action("second"));
/// assert_eq!(effect.len(), 2);
/// ```
pub trait Semigroup {
    /// Combines two values into one.
    ///
    /// This operation must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;
}

// =============================================================================
// Vec Implementation
// =============================================================================

impl<T> Semigroup for Vec<T> {
    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_vec_i32_associativity(
            first in prop::collection::vec(any::<i32>(), 0..10),
            second in prop::collection::vec(any::<i32>(), 0..10),
            third in prop::collection::vec(any::<i32>(), 0..10)
        ) {
            let left = first.clone().combine(second.clone()).combine(third.clone());
            let right = first.combine(second.combine(third));
            prop_assert_eq!(left, right);
        }
    }
}
