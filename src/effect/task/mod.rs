//! Asynchronous effect constructors (feature `async`).
//!
//! These units return as soon as they have registered their work with
//! tokio; the dispatch happens later, outside the drain that started them.
//! Each one calls its producer synchronously when the unit runs and spawns
//! the resulting future through [`runtime::spawn`].
//!
//! A future that panics is an unhandled failure: it is logged at `error`
//! and dispatches nothing. Use [`Effect::from_future`] or
//! [`Effect::attempt_future`] to turn a failure into an action instead.
//!
//! # Examples
//!
//! ```rust
//! use elmish::effect::{Dispatch, Effect};
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let (sender, mut receiver) = mpsc::unbounded_channel();
//! let dispatch = Dispatch::new(move |action| { let _ = sender.send(action); });
//!
//! Effect::delay("tick", Duration::from_millis(5)).run(&dispatch);
//! assert_eq!(receiver.recv().await, Some("tick"));
//! # });
//! ```

pub mod runtime;

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;

use super::Effect;
use crate::runtime::panic_message;

/// Spawns a dispatching future, logging it if it panics.
fn spawn_unit<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime::spawn(async move {
        if let Err(payload) = AssertUnwindSafe(future).catch_unwind().await {
            tracing::error!(
                panic = %panic_message(payload.as_ref()),
                "unhandled failure in asynchronous effect"
            );
        }
    });
}

impl<A: Send + 'static> Effect<A> {
    /// Dispatches `action` once `duration` has elapsed.
    ///
    /// The unit does not block: it schedules a timer and returns.
    #[must_use]
    pub fn delay(action: A, duration: Duration) -> Self {
        Self::from_fn(move |dispatch| {
            let dispatch = dispatch.clone();
            spawn_unit(async move {
                tokio::time::sleep(duration).await;
                dispatch.send(action);
            });
        })
    }

    /// Calls `producer` and dispatches the action its future resolves to.
    #[must_use]
    pub fn future<P, Fut>(producer: P) -> Self
    where
        P: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::from_fn(move |dispatch| {
            let dispatch = dispatch.clone();
            let pending = producer();
            spawn_unit(async move {
                dispatch.send(pending.await);
            });
        })
    }

    /// Calls `producer` and dispatches the mapped outcome of its future.
    ///
    /// `Ok(value)` dispatches `of_success(value)`; `Err(error)` dispatches
    /// `of_error(error)`.
    #[must_use]
    pub fn from_future<P, Fut, V, E, S, R>(producer: P, of_success: S, of_error: R) -> Self
    where
        P: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        S: FnOnce(V) -> A + Send + 'static,
        R: FnOnce(E) -> A + Send + 'static,
    {
        Self::from_fn(move |dispatch| {
            let dispatch = dispatch.clone();
            let pending = producer();
            spawn_unit(async move {
                match pending.await {
                    Ok(value) => dispatch.send(of_success(value)),
                    Err(error) => dispatch.send(of_error(error)),
                }
            });
        })
    }

    /// Calls `producer` and dispatches only a mapped failure.
    ///
    /// A successful future dispatches nothing.
    #[must_use]
    pub fn attempt_future<P, Fut, V, E, R>(producer: P, of_error: R) -> Self
    where
        P: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        R: FnOnce(E) -> A + Send + 'static,
    {
        Self::from_fn(move |dispatch| {
            let dispatch = dispatch.clone();
            let pending = producer();
            spawn_unit(async move {
                if let Err(error) = pending.await {
                    dispatch.send(of_error(error));
                }
            });
        })
    }
}
