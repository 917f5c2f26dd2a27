//! Stack growth for recursive walks over deeply nested syntax.
//!
//! On native targets [`ensure_sufficient_stack`] grows the stack with
//! `stacker` when fewer than [`RED_ZONE`] bytes remain. On WASM it calls
//! through.

/// Minimum remaining stack before growing.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
