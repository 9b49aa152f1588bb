//! The tokio runtime that asynchronous effect units spawn onto.
//!
//! Timer and future units must register their callbacks somewhere even when
//! the host drives the [`Runtime`](crate::runtime::Runtime) from plain
//! synchronous code. This module resolves that place:
//!
//! 1. **Current runtime**: when a unit runs inside a tokio runtime (a
//!    `Driver`, a `#[tokio::test]`), its work is spawned there, so paused
//!    test clocks and the host's shutdown apply to it.
//! 2. **Global runtime**: otherwise a lazily-initialized multi-thread
//!    runtime is used. It is created once and never dropped.
//!
//! Handles to the global runtime are cached per thread.
//!
//! # Examples
//!
//! ```rust
//! use elmish::effect::task::runtime::{global, handle};
//!
//! // Outside any tokio context the global runtime is used.
//! let obtained = handle();
//! let value = global().block_on(async move {
//!     obtained.spawn(async { 21 * 2 }).await
//! });
//! assert_eq!(value.ok(), Some(42));
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

// =============================================================================
// Global Runtime
// =============================================================================

/// Global tokio runtime initialized lazily on first access.
///
/// - Multi-thread scheduler
/// - Worker threads equal to the number of CPU cores
/// - Time and IO drivers enabled
static GLOBAL_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("elmish-effects")
        .enable_all()
        .build()
        .expect("Failed to create global tokio runtime")
});

/// Returns the global runtime, creating it on first use.
#[inline]
#[must_use]
pub fn global() -> &'static Runtime {
    &GLOBAL_RUNTIME
}

// =============================================================================
// Handle Caching
// =============================================================================

thread_local! {
    static CACHED_HANDLE: RefCell<Option<Handle>> = const { RefCell::new(None) };
}

/// Returns a handle to the current runtime, or to the global one.
///
/// # Handle Priority
///
/// 1. If inside a tokio runtime: returns `Handle::current()`
/// 2. Otherwise: returns the cached `global().handle()`
#[inline]
#[must_use]
pub fn handle() -> Handle {
    if let Ok(current_handle) = Handle::try_current() {
        return current_handle;
    }

    CACHED_HANDLE.with(|cached| {
        cached
            .borrow_mut()
            .get_or_insert_with(|| global().handle().clone())
            .clone()
    })
}

/// Spawns `future` on the runtime chosen by [`handle`].
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    handle().spawn(future)
}
