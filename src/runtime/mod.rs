//! The effect-coupled reducer runtime.
//!
//! A [`Runtime`] owns the current state and a queue of pending effect
//! units. It changes in exactly two ways:
//!
//! - **Domain transition** ([`Runtime::process`]): an action from the inbox
//!   is reduced; the new state replaces the old one and the returned effect
//!   units are appended to the pending queue. A transition that returns the
//!   same state `Arc` and no effects is a no-op and notifies nobody.
//! - **Drain** ([`Runtime::commit`]): the host's commit hook. A snapshot of
//!   every pending unit is removed from the queue and each unit is invoked,
//!   in append order, with the runtime's [`Dispatch`].
//!
//! Dispatching never reduces inline: [`Dispatch::send`] pushes the action
//! into the inbox and asks the [`Scheduler`] for a host pass. Effects that
//! dispatch while being drained therefore cannot re-enter the reducer, and
//! the units their transitions append wait for the next drain.
//!
//! ```text
//!   dispatch(a) ──► inbox ──process──► reducer ──► state', pending ++ effects
//!                                                         │
//!        ▲                                    host commits│
//!        │                                                ▼
//!        └─────────────── units call dispatch ◄──commit── drain snapshot
//! ```
//!
//! # Examples
//!
//! ```rust
//! use elmish::effect::Effect;
//! use elmish::runtime::{Runtime, Transition};
//! use std::sync::Arc;
//!
//! #[derive(Debug, PartialEq)]
//! enum Status {
//!     Idle,
//!     Running,
//! }
//!
//! fn reduce(state: &Arc<Status>, action: &'static str) -> Transition<Status, &'static str> {
//!     match action {
//!         "start" => (Arc::new(Status::Running), Effect::none()),
//!         _ => (Arc::clone(state), Effect::none()),
//!     }
//! }
//!
//! // The initial effect dispatches "start" during the first drain.
//! let runtime = Runtime::new(reduce, || (Status::Idle, Effect::action("start")));
//! assert_eq!(*runtime.state(), Status::Idle);
//!
//! runtime.run_until_idle();
//! assert_eq!(*runtime.state(), Status::Running);
//! ```

mod error;
mod queue;
mod reducer;
mod report;
mod scheduler;

#[cfg(feature = "async")]
mod driver;

pub use error::EffectPanic;
pub use queue::EffectId;
pub use reducer::{Reducer, Transition};
pub use report::Report;
pub use scheduler::{ManualScheduler, Scheduler};

#[cfg(feature = "async")]
pub use driver::{Driver, NotifyScheduler};

pub(crate) use error::panic_message;

use std::collections::VecDeque;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use static_assertions::assert_impl_all;

use crate::effect::{Dispatch, Effect};
use crate::typeclass::{Monoid, Semigroup};
use queue::PendingQueue;

const DEFAULT_NAME: &str = "elmish";

type Observer<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

/// Handle returned by [`Runtime::observe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The state and the units waiting for the next drain.
struct Core<S, A> {
    state: Arc<S>,
    pending: PendingQueue<A>,
}

struct Shared<S, A> {
    name: String,
    reducer: Box<dyn Reducer<S, A>>,
    core: Mutex<Core<S, A>>,
    inbox: Mutex<VecDeque<A>>,
    /// Held for the whole of a `process` or `commit` pass.
    consumer: Mutex<()>,
    scheduler: Arc<dyn Scheduler>,
    observers: RwLock<Vec<(ObserverId, Observer<S>)>>,
    next_observer: AtomicU64,
}

/// Outcome of one reduced action.
enum Step {
    Unchanged,
    Changed { state_changed: bool },
}

impl<S, A> Shared<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    fn enqueue(&self, action: A) {
        let queued = {
            let mut inbox = self.inbox.lock();
            inbox.push_back(action);
            inbox.len()
        };
        tracing::trace!(runtime = %self.name, queued, "action enqueued");
        self.scheduler.schedule();
    }

    /// Reduces every queued action. The caller holds `consumer`.
    ///
    /// Returns how many actions were reduced and whether any transition
    /// needs a commit. Waking the scheduler is left to the caller, once
    /// `consumer` is released.
    fn process(&self) -> (usize, bool) {
        let mut transitions = 0;
        let mut needs_commit = false;

        loop {
            let Some(action) = self.inbox.lock().pop_front() else {
                break;
            };
            transitions += 1;
            match self.step(action) {
                Step::Unchanged => {}
                Step::Changed { state_changed } => {
                    needs_commit = true;
                    if state_changed {
                        self.notify();
                    }
                }
            }
        }

        (transitions, needs_commit)
    }

    /// Wakes the scheduler if work is left after a pass. The caller must
    /// have released `consumer`, so a host that drives the runtime from
    /// inside `schedule` is not refused.
    fn settle(&self, needs_commit: bool) {
        let queued = self.inbox.lock().len();
        if needs_commit || queued > 0 {
            tracing::trace!(runtime = %self.name, needs_commit, queued, "pass requested");
            self.scheduler.schedule();
        }
    }

    fn step(&self, action: A) -> Step {
        let mut core = self.core.lock();
        let (next_state, effects) = self.reducer.reduce(&core.state, action);
        let state_changed = !Arc::ptr_eq(&next_state, &core.state);
        if !state_changed && effects.is_empty() {
            tracing::trace!(runtime = %self.name, "transition suppressed");
            return Step::Unchanged;
        }

        let appended = core.pending.push(effects);
        core.state = next_state;
        tracing::trace!(
            runtime = %self.name,
            state_changed,
            appended,
            pending = core.pending.len(),
            "transition applied"
        );
        Step::Changed { state_changed }
    }

    fn notify(&self) {
        let state = Arc::clone(&self.core.lock().state);
        let observers: Vec<Observer<S>> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&state);
        }
    }

    /// Removes the current pending snapshot and invokes it. The caller
    /// holds `consumer`.
    fn drain(&self, dispatch: &Dispatch<A>) -> Report {
        let snapshot = {
            let mut core = self.core.lock();
            let boundary = core.pending.boundary();
            core.pending.take_before(boundary)
        };
        if snapshot.is_empty() {
            return Report::empty();
        }

        tracing::trace!(runtime = %self.name, units = snapshot.len(), "draining effects");
        let mut report = Report::empty();
        for entry in snapshot {
            let effect = entry.id;
            let unit = entry.unit;
            report.executed += 1;
            if let Err(payload) = catch_unwind(AssertUnwindSafe(move || unit(dispatch))) {
                let failure = EffectPanic {
                    effect,
                    message: panic_message(payload.as_ref()),
                };
                tracing::error!(runtime = %self.name, %failure, "effect unit panicked");
                report.failures.push(failure);
            }
        }
        report
    }
}

/// An Elm-architecture runtime: a reducer, its state, and its pending effects.
///
/// `Runtime` is a cheap handle; clones share the same state, queue and
/// [`Dispatch`]. The host drives it:
///
/// - [`Runtime::process`] applies queued actions (domain transitions),
/// - [`Runtime::commit`] drains pending effects (the commit hook),
/// - [`Runtime::tick`] does both, [`Runtime::run_until_idle`] repeats ticks.
///
/// Passes are serialized. A `process` or `commit` started while another
/// pass is running (for example from inside an effect unit that captured a
/// runtime handle) does nothing and returns an idle report, so drains never
/// overlap and every unit runs exactly once.
pub struct Runtime<S, A> {
    shared: Arc<Shared<S, A>>,
    dispatch: Dispatch<A>,
}

assert_impl_all!(Runtime<u32, u32>: Send, Sync, Clone);

impl<S, A> Runtime<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    /// Creates a runtime with the default name and a [`ManualScheduler`].
    ///
    /// `initializer` is called exactly once. Its effects are pending from
    /// the start and run on the first commit.
    pub fn new<R, I>(reducer: R, initializer: I) -> Self
    where
        R: Reducer<S, A>,
        I: FnOnce() -> (S, Effect<A>),
    {
        Self::builder(reducer).build(initializer)
    }

    /// Starts configuring a runtime around `reducer`.
    pub fn builder<R>(reducer: R) -> RuntimeBuilder<S, A>
    where
        R: Reducer<S, A>,
    {
        RuntimeBuilder {
            reducer: Box::new(reducer),
            name: DEFAULT_NAME.to_string(),
            scheduler: Arc::new(ManualScheduler),
        }
    }

    /// The name used in this runtime's log events.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// The current state.
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&self.shared.core.lock().state)
    }

    /// The current state and the runtime's dispatch, as a render pass sees them.
    pub fn view(&self) -> (Arc<S>, Dispatch<A>) {
        (self.state(), self.dispatcher())
    }

    /// The runtime's dispatch. Every call returns a handle to the same sink.
    ///
    /// The dispatch holds the runtime weakly: actions sent after every
    /// `Runtime` handle has been dropped are discarded.
    pub fn dispatcher(&self) -> Dispatch<A> {
        self.dispatch.clone()
    }

    /// Number of effect units waiting for the next drain.
    pub fn pending_effects(&self) -> usize {
        self.shared.core.lock().pending.len()
    }

    /// Number of actions waiting to be reduced.
    pub fn queued_actions(&self) -> usize {
        self.shared.inbox.lock().len()
    }

    /// Dispatches `action` from the host.
    ///
    /// When no pass is running the inbox is processed immediately, so the
    /// new state is visible when this returns and a panicking reducer
    /// unwinds into the caller. Otherwise the action is only queued and the
    /// scheduler is asked for a pass.
    pub fn dispatch(&self, action: A) {
        self.shared.inbox.lock().push_back(action);
        let Some(pass) = self.shared.consumer.try_lock() else {
            tracing::trace!(runtime = %self.shared.name, "pass in progress; action queued");
            self.shared.scheduler.schedule();
            return;
        };
        let (_, needs_commit) = self.shared.process();
        drop(pass);
        self.shared.settle(needs_commit);
    }

    /// Applies every queued action. Returns how many were reduced.
    pub fn process(&self) -> usize {
        let Some(pass) = self.shared.consumer.try_lock() else {
            tracing::debug!(runtime = %self.shared.name, "process skipped; pass in progress");
            return 0;
        };
        let (transitions, needs_commit) = self.shared.process();
        drop(pass);
        self.shared.settle(needs_commit);
        transitions
    }

    /// The commit hook: drains and runs every pending effect unit.
    ///
    /// Units run in the order they were appended. A unit that panics is
    /// recorded in the report and does not stop the others.
    pub fn commit(&self) -> Report {
        let Some(pass) = self.shared.consumer.try_lock() else {
            tracing::debug!(runtime = %self.shared.name, "commit skipped; drain in progress");
            return Report::empty();
        };
        let report = self.shared.drain(&self.dispatch);
        drop(pass);
        self.shared.settle(false);
        report
    }

    /// One host pass: [`process`](Self::process), then [`commit`](Self::commit).
    pub fn tick(&self) -> Report {
        let transitions = self.process();
        Report {
            transitions,
            ..Report::empty()
        }
        .combine(self.commit())
    }

    /// Ticks until a pass neither reduces an action nor runs a unit.
    ///
    /// Work registered with timers or futures is not waited for. Effects
    /// that keep dispatching synchronously forever keep this looping.
    pub fn run_until_idle(&self) -> Report {
        let mut total = Report::empty();
        loop {
            let report = self.tick();
            if report.is_idle() {
                return total;
            }
            total = total.combine(report);
        }
    }

    /// Registers `observer`, called with the new state after every
    /// transition that replaced it.
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&Arc<S>) + Send + Sync + 'static,
    {
        let id = ObserverId(self.shared.next_observer.fetch_add(1, Ordering::Relaxed));
        self.shared.observers.write().push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut observers = self.shared.observers.write();
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }
}

impl<S, A> Clone for Runtime<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Runtime<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Runtime")
            .field("name", &self.shared.name)
            .field("pending", &self.shared.core.lock().pending)
            .field("queued", &self.shared.inbox.lock().len())
            .finish_non_exhaustive()
    }
}

/// Configures and builds a [`Runtime`].
///
/// ```rust
/// use elmish::effect::Effect;
/// use elmish::runtime::{Runtime, Transition};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let wakeups = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&wakeups);
///
/// let runtime = Runtime::builder(|state: &Arc<u32>, step: u32| -> Transition<u32, u32> {
///     (Arc::new(**state + step), Effect::none())
/// })
/// .name("counter")
/// .scheduler(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// })
/// .build(|| (0, Effect::none()));
///
/// runtime.dispatcher().send(5);
/// assert_eq!(wakeups.load(Ordering::SeqCst), 1);
/// runtime.process();
/// assert_eq!(*runtime.state(), 5);
/// ```
pub struct RuntimeBuilder<S, A> {
    reducer: Box<dyn Reducer<S, A>>,
    name: String,
    scheduler: Arc<dyn Scheduler>,
}

impl<S, A> RuntimeBuilder<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    /// Sets the name attached to this runtime's log events.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the scheduler woken whenever the runtime has work.
    #[must_use]
    pub fn scheduler<T: Scheduler>(mut self, scheduler: T) -> Self {
        self.scheduler = Arc::new(scheduler);
        self
    }

    /// Calls `initializer` once and builds the runtime.
    pub fn build<I>(self, initializer: I) -> Runtime<S, A>
    where
        I: FnOnce() -> (S, Effect<A>),
    {
        let (state, effects) = initializer();
        let mut pending = PendingQueue::new();
        let appended = pending.push(effects);

        let shared = Arc::new(Shared {
            name: self.name,
            reducer: self.reducer,
            core: Mutex::new(Core {
                state: Arc::new(state),
                pending,
            }),
            inbox: Mutex::new(VecDeque::new()),
            consumer: Mutex::new(()),
            scheduler: self.scheduler,
            observers: RwLock::new(Vec::new()),
            next_observer: AtomicU64::new(0),
        });

        let weak = Arc::downgrade(&shared);
        let name = shared.name.clone();
        let dispatch = Dispatch::new(move |action| match weak.upgrade() {
            Some(shared) => shared.enqueue(action),
            None => tracing::debug!(runtime = %name, "runtime dropped; action discarded"),
        });

        tracing::trace!(runtime = %shared.name, appended, "runtime initialized");
        if appended > 0 {
            shared.scheduler.schedule();
        }
        Runtime { shared, dispatch }
    }

    /// Builds a runtime wired to a [`Driver`], the async host loop.
    #[cfg(feature = "async")]
    pub fn build_driver<I>(self, initializer: I) -> Driver<S, A>
    where
        I: FnOnce() -> (S, Effect<A>),
    {
        let scheduler = NotifyScheduler::new();
        let wake = scheduler.notifier();
        Driver::attach(self.scheduler(scheduler).build(initializer), wake)
    }
}
