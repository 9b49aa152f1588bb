//! Type classes shared by effects and runtime reports.
//!
//! Only the algebra this crate actually needs lives here:
//!
//! - [`Semigroup`]: associative `combine`
//! - [`Monoid`]: `Semigroup` plus an identity element
//!
//! [`Effect`](crate::effect::Effect) is a monoid under unit concatenation,
//! and [`Report`](crate::runtime::Report) is a monoid under counter addition.

mod monoid;
mod semigroup;

pub use monoid::Monoid;
pub use semigroup::Semigroup;
