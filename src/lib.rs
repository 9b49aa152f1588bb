//! # elmish
//!
//! An Elm-architecture runtime for Rust: a pure reducer
//! `(state, action) -> (state, effects)` paired with a queue of deferred
//! side effects that run exactly once, after the transition that produced
//! them has been committed.
//!
//! ## Overview
//!
//! - **Effects** ([`effect`]): an [`Effect`](effect::Effect) is an ordered
//!   batch of units, each a procedure receiving a
//!   [`Dispatch`](effect::Dispatch). Constructors cover immediate actions,
//!   fallible functions, iterators, timers and futures.
//! - **Runtime** ([`runtime`]): a [`Runtime`](runtime::Runtime) holds the
//!   state and the pending units, applies dispatched actions through the
//!   reducer, and drains pending units when the host commits.
//! - **Type classes** ([`typeclass`]): effects combine as a
//!   [`Monoid`](typeclass::Monoid).
//!
//! ## Feature Flags
//!
//! - `async` (default): timer and future effects, and the
//!   [`Driver`](runtime::Driver) host loop, on tokio
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use elmish::prelude::*;
//! use std::sync::Arc;
//!
//! fn reduce(count: &Arc<u32>, action: &'static str) -> Transition<u32, &'static str> {
//!     match action {
//!         "increment" => (Arc::new(**count + 1), Effect::none()),
//!         "twice" => (Arc::clone(count), combine!(Effect::action("increment"), Effect::action("increment"))),
//!         _ => (Arc::clone(count), Effect::none()),
//!     }
//! }
//!
//! let runtime = Runtime::new(reduce, || (0, Effect::none()));
//! runtime.dispatch("increment");
//! assert_eq!(*runtime.state(), 1);
//!
//! runtime.dispatch("twice");
//! runtime.run_until_idle();
//! assert_eq!(*runtime.state(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use elmish::prelude::*;
/// ```
pub mod prelude {
    pub use crate::combine;
    pub use crate::effect::{Dispatch, Effect};
    pub use crate::runtime::{Reducer, Report, Runtime, Scheduler, Transition};
    pub use crate::typeclass::{Monoid, Semigroup};

    #[cfg(feature = "async")]
    pub use crate::runtime::Driver;
}

pub mod effect;
pub mod runtime;
pub mod typeclass;
