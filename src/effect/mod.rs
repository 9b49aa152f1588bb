//! Effects: deferred work returned by reducers.
//!
//! An [`Effect`] is an ordered batch of units. Each unit is a procedure that
//! receives a [`Dispatch`] and may feed actions back into the runtime, now or
//! later. Reducers stay pure by returning effects instead of performing
//! work; the runtime runs each unit exactly once after the transition that
//! produced it has been committed.
//!
//! # Constructors
//!
//! | Constructor | Dispatches |
//! |---|---|
//! | [`Effect::none`] | nothing |
//! | [`Effect::action`] | the given action, once |
//! | [`Effect::from_fn`] | whatever the closure dispatches |
//! | [`Effect::from_function`] | `of_success(value)` or `of_error(error)` |
//! | [`Effect::attempt_function`] | `of_error(error)` only |
//! | [`Effect::from_iterator`] | every element, in order |
//! | `Effect::delay` | the action after a duration (feature `async`) |
//! | `Effect::future` | the future's output (feature `async`) |
//! | `Effect::from_future` | mapped success or failure (feature `async`) |
//! | `Effect::attempt_future` | mapped failure only (feature `async`) |
//!
//! Effects concatenate through [`Semigroup::combine`](crate::typeclass::Semigroup::combine),
//! [`Monoid::combine_all`](crate::typeclass::Monoid::combine_all), `collect`,
//! or the [`combine!`](crate::combine) macro.
//!
//! # Examples
//!
//! ```rust
//! use elmish::combine;
//! use elmish::effect::{Dispatch, Effect};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Debug, PartialEq)]
//! enum Message {
//!     Loaded(u32),
//!     Failed(String),
//! }
//!
//! let received = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&received);
//! let dispatch = Dispatch::new(move |message| sink.lock().unwrap().push(message));
//!
//! let effect = combine!(
//!     Effect::from_function(|| "7".parse::<u32>(), Message::Loaded, |e| Message::Failed(e.to_string())),
//!     Effect::attempt_function(|| "x".parse::<u32>(), |e| Message::Failed(e.to_string())),
//! );
//! effect.run(&dispatch);
//!
//! assert_eq!(
//!     *received.lock().unwrap(),
//!     vec![
//!         Message::Loaded(7),
//!         Message::Failed("invalid digit found in string".to_string()),
//!     ]
//! );
//! ```

mod combine_macro;
mod dispatch;
mod units;

pub use dispatch::Dispatch;
pub use units::Effect;

pub(crate) use units::EffectUnit;

#[cfg(feature = "async")]
pub mod task;
