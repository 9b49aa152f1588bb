//! The `combine!` macro for concatenating effects.

/// Concatenates any number of effects, preserving their order.
///
/// `combine!()` is [`Effect::none`](crate::effect::Effect::none);
/// `combine!(a, b, c)` runs `a`'s units, then `b`'s, then `c`'s.
///
/// # Examples
///
/// ```rust
/// use elmish::combine;
/// use elmish::effect::{Dispatch, Effect};
/// use std::sync::{Arc, Mutex};
///
/// let received = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&received);
/// let dispatch = Dispatch::new(move |action| sink.lock().unwrap().push(action));
///
/// let effect = combine!(
///     Effect::action(1),
///     Effect::none(),
///     Effect::from_iterator([2, 3]),
/// );
/// effect.run(&dispatch);
/// assert_eq!(*received.lock().unwrap(), vec![1, 2, 3]);
/// ```
#[macro_export]
macro_rules! combine {
    () => {
        $crate::effect::Effect::none()
    };
    ($($effect:expr),+ $(,)?) => {
        <$crate::effect::Effect<_> as $crate::typeclass::Monoid>::combine_all([$($effect),+])
    };
}
