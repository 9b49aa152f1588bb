//! Tests for the reducer runtime: domain transitions, drains, and their
//! ordering guarantees.

use elmish::combine;
use elmish::effect::{Dispatch, Effect};
use elmish::runtime::{EffectId, Runtime, Transition};
use parking_lot::Mutex;
use rstest::{fixture, rstest};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counter(state: &Arc<i32>, action: &'static str) -> Transition<i32, &'static str> {
    if action == "increment" {
        (Arc::new(**state + 1), Effect::none())
    } else {
        (Arc::clone(state), Effect::none())
    }
}

#[fixture]
fn counter_runtime() -> Runtime<i32, &'static str> {
    Runtime::new(counter, || (0, Effect::none()))
}

// =============================================================================
// Domain Transitions
// =============================================================================

mod transitions {
    use super::*;

    #[rstest]
    fn acts_as_a_reducer(counter_runtime: Runtime<i32, &'static str>) {
        counter_runtime.dispatch("increment");
        assert_eq!(*counter_runtime.state(), 1);
    }

    #[rstest]
    fn initializer_is_called_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let runtime = Runtime::new(counter, move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            (10, Effect::none())
        });

        runtime.dispatch("increment");
        runtime.run_until_idle();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*runtime.state(), 11);
    }

    #[rstest]
    fn view_returns_state_and_stable_dispatch(counter_runtime: Runtime<i32, &'static str>) {
        let (state, dispatch) = counter_runtime.view();
        assert_eq!(*state, 0);

        dispatch.send("increment");
        counter_runtime.dispatcher().send("increment");
        counter_runtime.clone().dispatcher().send("increment");
        assert_eq!(counter_runtime.process(), 3);
        assert_eq!(*counter_runtime.state(), 3);
    }

    #[rstest]
    fn reducer_panics_reach_the_dispatch_caller() {
        let runtime = Runtime::new(
            |state: &Arc<i32>, action: i32| -> Transition<i32, i32> {
                assert!(action >= 0, "negative action");
                (Arc::new(**state + action), Effect::none())
            },
            || (0, Effect::none()),
        );

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            runtime.dispatch(-1);
        }));
        assert!(outcome.is_err());

        // The runtime is still usable and the failed transition left no trace.
        assert_eq!(*runtime.state(), 0);
        runtime.dispatch(2);
        assert_eq!(*runtime.state(), 2);
    }
}

// =============================================================================
// No-op Suppression
// =============================================================================

mod suppression {
    use super::*;

    #[rstest]
    fn unchanged_state_without_effects_notifies_nobody(
        counter_runtime: Runtime<i32, &'static str>,
    ) {
        let notifications = Arc::new(AtomicUsize::new(0));
        let notifications_clone = Arc::clone(&notifications);
        counter_runtime.observe(move |_| {
            notifications_clone.fetch_add(1, Ordering::SeqCst);
        });

        counter_runtime.dispatch("ignored");
        counter_runtime.dispatch("ignored");
        assert_eq!(notifications.load(Ordering::SeqCst), 0);

        counter_runtime.dispatch("increment");
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn equal_but_new_state_is_a_change() {
        let runtime = Runtime::new(
            |state: &Arc<i32>, (): ()| -> Transition<i32, ()> { (Arc::new(**state), Effect::none()) },
            || (0, Effect::none()),
        );
        let notifications = Arc::new(AtomicUsize::new(0));
        let notifications_clone = Arc::clone(&notifications);
        runtime.observe(move |_| {
            notifications_clone.fetch_add(1, Ordering::SeqCst);
        });

        runtime.dispatch(());
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn no_op_does_not_hold_back_earlier_effects() {
        let executed = Arc::new(AtomicUsize::new(0));
        let executed_clone = Arc::clone(&executed);
        let runtime = Runtime::new(
            move |state: &Arc<()>, schedule: bool| -> Transition<(), bool> {
                if schedule {
                    let executed = Arc::clone(&executed_clone);
                    let effect = Effect::from_fn(move |_| {
                        executed.fetch_add(1, Ordering::SeqCst);
                    });
                    (Arc::clone(state), effect)
                } else {
                    (Arc::clone(state), Effect::none())
                }
            },
            || ((), Effect::none()),
        );

        runtime.dispatch(true);
        runtime.dispatch(false);
        assert_eq!(runtime.pending_effects(), 1);

        runtime.commit();
        assert_eq!(executed.load(Ordering::SeqCst), 1);
    }
}

// =============================================================================
// Drains
// =============================================================================

mod drains {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Status {
        Idle,
        Running,
        Stopped,
    }

    fn singer(state: &Arc<Status>, action: &'static str) -> Transition<Status, &'static str> {
        match action {
            "start" => (Arc::new(Status::Running), Effect::action("stop")),
            "stop" => (Arc::new(Status::Stopped), Effect::none()),
            _ => (Arc::clone(state), Effect::none()),
        }
    }

    #[rstest]
    fn initial_effects_run_on_first_drain() {
        let runtime = Runtime::new(
            |state: &Arc<Status>, action: &'static str| -> Transition<Status, &'static str> {
                match action {
                    "start" => (Arc::new(Status::Running), Effect::none()),
                    _ => (Arc::clone(state), Effect::none()),
                }
            },
            || (Status::Idle, Effect::action("start")),
        );
        assert_eq!(runtime.pending_effects(), 1);

        let report = runtime.tick();
        assert_eq!(report.executed, 1);
        runtime.process();
        assert_eq!(*runtime.state(), Status::Running);
    }

    #[rstest]
    fn effects_chain_through_further_transitions() {
        let runtime = Runtime::new(singer, || (Status::Idle, Effect::none()));
        runtime.dispatch("start");
        assert_eq!(*runtime.state(), Status::Running);

        let report = runtime.run_until_idle();
        assert_eq!(*runtime.state(), Status::Stopped);
        assert_eq!(report.executed, 1);
        assert_eq!(report.transitions, 1);
    }

    #[rstest]
    fn units_drain_in_append_order_across_transitions() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = Arc::clone(&log);
        let runtime = Runtime::new(
            move |state: &Arc<()>, tag: u32| -> Transition<(), u32> {
                let first = Arc::clone(&log_clone);
                let second = Arc::clone(&log_clone);
                let effect = combine!(
                    Effect::from_fn(move |_| first.lock().push((tag, 'a'))),
                    Effect::from_fn(move |_| second.lock().push((tag, 'b'))),
                );
                (Arc::clone(state), effect)
            },
            || ((), Effect::none()),
        );

        runtime.dispatch(1);
        runtime.dispatch(2);
        runtime.commit();
        assert_eq!(*log.lock(), vec![(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
    }

    #[rstest]
    fn commit_with_nothing_pending_is_idle(counter_runtime: Runtime<i32, &'static str>) {
        assert!(counter_runtime.commit().is_idle());
    }
}

// =============================================================================
// Exactly Once
// =============================================================================

mod exactly_once {
    use super::*;

    /// Every transition below the limit appends one unit that counts its own
    /// invocations and dispatches the next step synchronously.
    fn chain(
        invocations: Arc<Mutex<Vec<usize>>>,
        limit: usize,
    ) -> impl Fn(&Arc<usize>, usize) -> Transition<usize, usize> + Send + Sync + 'static {
        move |_: &Arc<usize>, step: usize| {
            let invocations = Arc::clone(&invocations);
            let effect = if step < limit {
                invocations.lock().push(0);
                Effect::from_fn(move |dispatch: &Dispatch<usize>| {
                    invocations.lock()[step] += 1;
                    dispatch.send(step + 1);
                })
            } else {
                Effect::none()
            };
            (Arc::new(step), effect)
        }
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(50)]
    fn re_entrant_dispatch_runs_every_unit_once(#[case] limit: usize) {
        let invocations = Arc::new(Mutex::new(Vec::new()));
        let runtime = Runtime::new(chain(Arc::clone(&invocations), limit), || (0, Effect::none()));

        runtime.dispatch(0);
        runtime.run_until_idle();
        // A second full pass finds nothing left to run.
        assert!(runtime.run_until_idle().is_idle());

        assert_eq!(*runtime.state(), limit);
        assert_eq!(*invocations.lock(), vec![1; limit]);
    }

    #[rstest]
    fn units_appended_during_a_drain_wait_for_the_next_one() {
        let invocations = Arc::new(Mutex::new(Vec::new()));
        let runtime = Runtime::new(chain(Arc::clone(&invocations), 3), || (0, Effect::none()));
        runtime.dispatch(0);

        let first = runtime.commit();
        assert_eq!(first.executed, 1);
        assert_eq!(runtime.queued_actions(), 1, "dispatch from a unit only enqueues");
        assert_eq!(runtime.pending_effects(), 0);

        runtime.process();
        assert_eq!(runtime.pending_effects(), 1);
        assert_eq!(runtime.commit().executed, 1);
    }

    #[rstest]
    fn nested_commit_from_a_unit_is_refused() {
        let nested = Arc::new(Mutex::new(None));
        let nested_clone = Arc::clone(&nested);
        let slot: Arc<Mutex<Option<Runtime<i32, &'static str>>>> = Arc::new(Mutex::new(None));
        let slot_clone = Arc::clone(&slot);

        let runtime = Runtime::new(counter, move || {
            let effect = Effect::from_fn(move |_| {
                let runtime = slot_clone.lock().clone();
                if let Some(runtime) = runtime {
                    runtime.dispatch("increment");
                    let state = *runtime.state();
                    let report = runtime.commit();
                    *nested_clone.lock() = Some((state, report.is_idle()));
                }
            });
            (0, combine!(effect, Effect::action("increment")))
        });
        *slot.lock() = Some(runtime.clone());

        let report = runtime.commit();
        assert_eq!(report.executed, 2);
        // Inside the drain the dispatch was only queued, and the nested
        // commit did nothing.
        assert_eq!(*nested.lock(), Some((0, true)));

        runtime.run_until_idle();
        assert_eq!(*runtime.state(), 2);
        slot.lock().take();
    }
}

// =============================================================================
// Synchronous Hosts
// =============================================================================

mod synchronous_hosts {
    use super::*;
    use std::sync::OnceLock;

    type Host = fn(&Runtime<i32, &'static str>);

    fn echo(state: &Arc<i32>, action: &'static str) -> Transition<i32, &'static str> {
        match action {
            "echo" => (Arc::clone(state), Effect::action("increment")),
            "increment" => (Arc::new(**state + 1), Effect::none()),
            _ => (Arc::clone(state), Effect::none()),
        }
    }

    fn tick_once(runtime: &Runtime<i32, &'static str>) {
        runtime.tick();
    }

    fn until_idle(runtime: &Runtime<i32, &'static str>) {
        runtime.run_until_idle();
    }

    /// A runtime whose scheduler drives it inline, on the calling thread.
    fn inline_runtime(host: Host) -> Runtime<i32, &'static str> {
        let slot: Arc<OnceLock<Runtime<i32, &'static str>>> = Arc::new(OnceLock::new());
        let scheduled = Arc::clone(&slot);
        let runtime = Runtime::builder(echo)
            .scheduler(move || {
                if let Some(runtime) = scheduled.get() {
                    host(runtime);
                }
            })
            .build(|| (0, Effect::none()));
        assert!(slot.set(runtime.clone()).is_ok());
        runtime
    }

    #[rstest]
    #[case::tick(tick_once as Host)]
    #[case::run_until_idle(until_idle as Host)]
    fn host_dispatch_drains_effects(#[case] host: Host) {
        let runtime = inline_runtime(host);

        runtime.dispatch("echo");

        assert_eq!(*runtime.state(), 1);
        assert_eq!(runtime.pending_effects(), 0);
        assert_eq!(runtime.queued_actions(), 0);
    }

    #[rstest]
    #[case::tick(tick_once as Host)]
    #[case::run_until_idle(until_idle as Host)]
    fn sent_actions_are_reduced_and_drained(#[case] host: Host) {
        let runtime = inline_runtime(host);

        runtime.dispatcher().send("echo");
        runtime.dispatcher().send("echo");

        assert_eq!(*runtime.state(), 2);
        assert_eq!(runtime.pending_effects(), 0);
        assert_eq!(runtime.queued_actions(), 0);
    }
}

// =============================================================================
// Fault Isolation
// =============================================================================

mod faults {
    use super::*;

    #[rstest]
    fn panicking_unit_does_not_stop_the_drain() {
        let runtime = Runtime::new(counter, || {
            let effect = combine!(
                Effect::action("increment"),
                Effect::from_fn(|_| panic!("unit exploded")),
                Effect::action("increment"),
            );
            (0, effect)
        });

        let report = runtime.commit();
        assert_eq!(report.executed, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].effect, EffectId::from_raw(1));
        assert_eq!(report.failures[0].message, "unit exploded");

        runtime.process();
        assert_eq!(*runtime.state(), 2);
    }

    #[rstest]
    fn dispatch_after_teardown_is_discarded() {
        let runtime = Runtime::new(counter, || (0, Effect::none()));
        let dispatch = runtime.dispatcher();
        drop(runtime);

        dispatch.send("increment");
    }
}
