//! The dispatch callback handed to every effect unit.

use std::fmt;
use std::sync::Arc;

use static_assertions::assert_impl_all;

/// A cloneable callback that feeds an action back into a runtime.
///
/// Effect units receive a `&Dispatch<A>` when they run. Asynchronous units
/// clone it and keep it until their timer fires or their future settles, so
/// `Dispatch` is `Send + Sync` regardless of `A`.
///
/// A `Dispatch` can also wrap any closure, which is how effects are tested
/// without a runtime:
///
/// ```rust
/// use elmish::effect::{Dispatch, Effect};
/// use std::sync::{Arc, Mutex};
///
/// let received = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&received);
/// let dispatch = Dispatch::new(move |action| sink.lock().unwrap().push(action));
///
/// Effect::from_iterator(vec![1, 2, 3]).run(&dispatch);
/// assert_eq!(*received.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub struct Dispatch<A> {
    sink: Arc<dyn Fn(A) + Send + Sync>,
}

assert_impl_all!(Dispatch<()>: Send, Sync, Clone);
assert_impl_all!(Dispatch<std::rc::Rc<()>>: Send, Sync);

impl<A: 'static> Dispatch<A> {
    /// Creates a dispatch that forwards every action to `sink`.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Creates a dispatch that discards every action.
    #[must_use]
    pub fn ignore() -> Self {
        Self::new(|_| {})
    }

    /// Sends an action.
    #[inline]
    pub fn send(&self, action: A) {
        (self.sink)(action);
    }

    /// Adapts this dispatch to accept actions of another type.
    ///
    /// Every `B` sent through the result is converted with `function` and
    /// then sent through `self`. This is how a child component's effects
    /// report back to a parent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use elmish::effect::Dispatch;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let received = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&received);
    /// let parent: Dispatch<String> = Dispatch::new(move |action| sink.lock().unwrap().push(action));
    ///
    /// let child: Dispatch<u32> = parent.contramap(|count: u32| format!("count={count}"));
    /// child.send(3);
    /// assert_eq!(*received.lock().unwrap(), vec!["count=3".to_string()]);
    /// ```
    #[must_use]
    pub fn contramap<B, F>(&self, function: F) -> Dispatch<B>
    where
        B: 'static,
        F: Fn(B) -> A + Send + Sync + 'static,
    {
        let inner = self.clone();
        Dispatch::new(move |action| inner.send(function(action)))
    }
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<A> fmt::Debug for Dispatch<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Dispatch")
            .field("handles", &Arc::strong_count(&self.sink))
            .finish()
    }
}
