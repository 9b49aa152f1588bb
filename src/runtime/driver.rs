//! An async host for [`Runtime`] (feature `async`).
//!
//! The [`Driver`] plays the part of the host scheduler: it sleeps on a
//! [`Notify`] until the runtime asks for a pass, runs the runtime to idle,
//! and publishes each new state on a [`watch`] channel. Timer and future
//! effects spawned while it runs wake it again when they dispatch.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Notify, watch};

use super::{Report, Runtime, Scheduler};
use crate::effect::Dispatch;
use crate::typeclass::{Monoid, Semigroup};

/// A scheduler that wakes a [`Notify`].
///
/// Requests made while nobody waits are remembered as a single permit, so
/// a wake-up is never lost and bursts coalesce.
#[derive(Debug, Clone, Default)]
pub struct NotifyScheduler {
    notify: Arc<Notify>,
}

impl NotifyScheduler {
    /// Creates a scheduler with a fresh notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The notifier woken by [`Scheduler::schedule`].
    #[must_use]
    pub fn notifier(&self) -> Arc<Notify> {
        Arc::clone(&self.notify)
    }
}

impl Scheduler for NotifyScheduler {
    fn schedule(&self) {
        self.notify.notify_one();
    }
}

/// Drives a [`Runtime`] from a tokio task.
///
/// # Examples
///
/// ```rust
/// use elmish::effect::Effect;
/// use elmish::runtime::{Driver, Transition};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// fn reduce(state: &Arc<u32>, action: &'static str) -> Transition<u32, &'static str> {
///     match action {
///         "later" => (Arc::clone(state), Effect::delay("bump", Duration::from_millis(10))),
///         "bump" => (Arc::new(**state + 1), Effect::none()),
///         _ => (Arc::clone(state), Effect::none()),
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let driver = Driver::new(reduce, || (0, Effect::action("later")));
/// let mut states = driver.watch();
/// let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
/// let host = tokio::spawn(driver.run_until(async move {
///     let _ = stopped.await;
/// }));
///
/// states.wait_for(|state| **state == 1).await.unwrap();
/// stop.send(()).unwrap();
/// let report = host.await.unwrap();
/// assert_eq!(report.transitions, 2);
/// # });
/// ```
pub struct Driver<S, A> {
    runtime: Runtime<S, A>,
    wake: Arc<Notify>,
    states: watch::Receiver<Arc<S>>,
}

impl<S, A> Driver<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    /// Builds a runtime with default options and attaches a driver to it.
    pub fn new<R, I>(reducer: R, initializer: I) -> Self
    where
        R: super::Reducer<S, A>,
        I: FnOnce() -> (S, crate::effect::Effect<A>),
    {
        Runtime::builder(reducer).build_driver(initializer)
    }

    pub(super) fn attach(runtime: Runtime<S, A>, wake: Arc<Notify>) -> Self {
        let (publisher, states) = watch::channel(runtime.state());
        runtime.observe(move |state| {
            publisher.send_replace(Arc::clone(state));
        });
        Self {
            runtime,
            wake,
            states,
        }
    }

    /// The driven runtime.
    pub fn runtime(&self) -> &Runtime<S, A> {
        &self.runtime
    }

    /// The runtime's dispatch.
    pub fn dispatcher(&self) -> Dispatch<A> {
        self.runtime.dispatcher()
    }

    /// A receiver that sees every state the runtime commits.
    pub fn watch(&self) -> watch::Receiver<Arc<S>> {
        self.states.clone()
    }

    /// Runs host passes until `shutdown` completes, then returns the
    /// combined report of every pass.
    ///
    /// Shutdown is checked between passes; a pass in progress finishes
    /// first. Effects still in flight keep their dispatch, but the actions
    /// they send afterwards are only queued.
    pub async fn run_until<F>(self, shutdown: F) -> Report
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut total = Report::empty();
        loop {
            total = total.combine(self.runtime.run_until_idle());
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = self.wake.notified() => {}
            }
        }
        tracing::trace!(
            runtime = %self.runtime.name(),
            transitions = total.transitions,
            executed = total.executed,
            "driver stopped"
        );
        total
    }
}

impl<S, A> std::fmt::Debug for Driver<S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Driver")
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}
