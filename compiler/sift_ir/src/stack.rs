//! Stack growth for deep syntax trees.
//!
//! Generated code and long builder chains nest far deeper than hand-written
//! code. Every recursive step of the visitor runs inside
//! [`ensure_sufficient_stack`], which moves onto a fresh stack segment when
//! the current one is nearly used up. On wasm32 the closure runs directly.

/// Grow when less than this much stack is left.
const MIN_REMAINING: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// close to exhausted.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(not(target_arch = "wasm32"))]
    {
        stacker::maybe_grow(MIN_REMAINING, SEGMENT_SIZE, f)
    }
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (MIN_REMAINING, SEGMENT_SIZE);
        f()
    }
}
