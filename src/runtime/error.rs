//! Error types for the runtime.
//!
//! Effect units are isolated from each other: a unit that panics is caught,
//! reported as an [`EffectPanic`] in the drain's
//! [`Report`](super::Report), and the remaining units still run. Reducer
//! panics are not caught; they propagate to the caller that applied the
//! transition.

use std::any::Any;
use std::fmt;

use super::EffectId;

/// A pending effect unit panicked while it was being drained.
///
/// # Examples
///
/// ```rust
/// use elmish::runtime::{EffectId, EffectPanic};
///
/// let failure = EffectPanic {
///     effect: EffectId::from_raw(3),
///     message: "boom".to_string(),
/// };
/// assert_eq!(format!("{failure}"), "effect#3 panicked: boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectPanic {
    /// The arena id the unit had while pending.
    pub effect: EffectId,
    /// The panic payload, when it was a string.
    pub message: String,
}

impl fmt::Display for EffectPanic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} panicked: {}", self.effect, self.message)
    }
}

impl std::error::Error for EffectPanic {}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown panic".to_string()
    }
}
