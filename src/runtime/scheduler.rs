//! The host scheduler seam.
//!
//! A [`Runtime`](super::Runtime) never runs itself. Whenever it has work
//! (an action waiting in its inbox, or a transition whose effects need a
//! commit) it calls [`Scheduler::schedule`]. The host answers by calling
//! [`Runtime::tick`](super::Runtime::tick) (or `process` followed by `commit`)
//! soon after, typically once it has rendered the new state.

/// Wakes the host so that it drives the runtime.
///
/// `schedule` may be called from any thread, including from inside a
/// timer or future effect, and may be called many times before the host
/// reacts; implementations should coalesce.
///
/// The runtime never holds a pass open while it calls `schedule`, so a
/// scheduler may also drive the runtime synchronously by calling
/// [`Runtime::tick`](super::Runtime::tick) or
/// [`Runtime::run_until_idle`](super::Runtime::run_until_idle) inline.
/// Actions sent by effect units during a drain request a pass right away;
/// an inline host finds that pass refused, and the runtime asks again once
/// the drain has finished.
///
/// Closures are schedulers:
///
/// ```rust
/// use elmish::runtime::Scheduler;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let requests = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&requests);
/// let scheduler = move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// };
///
/// scheduler.schedule();
/// assert_eq!(requests.load(Ordering::SeqCst), 1);
/// ```
pub trait Scheduler: Send + Sync + 'static {
    /// Requests a host pass.
    fn schedule(&self);
}

impl<F> Scheduler for F
where
    F: Fn() + Send + Sync + 'static,
{
    #[inline]
    fn schedule(&self) {
        self();
    }
}

/// A scheduler that ignores every request.
///
/// For hosts that drive the runtime on their own cadence, and for tests
/// that call `run_until_idle` explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualScheduler;

impl Scheduler for ManualScheduler {
    #[inline]
    fn schedule(&self) {}
}
