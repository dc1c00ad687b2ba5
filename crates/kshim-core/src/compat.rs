//! Alignment arithmetic, branch hints, and the `BUG`/`WARN` family.
//!
//! The hints carry no behavioural contract; they exist so call sites read the
//! same as the code they were written for. [`bug`] is the single place where
//! the shim gives up: it logs and aborts without unwinding.

/// Round `x` up to the next multiple of `a`. `a` must be a power of two.
#[inline]
pub const fn align(x: usize, a: usize) -> usize {
    (x + (a - 1)) & !(a - 1)
}

/// Round `x` down to a multiple of `a`. `a` must be a power of two.
#[inline]
pub const fn align_down(x: usize, a: usize) -> usize {
    x & !(a - 1)
}

/// Whether `x` is a multiple of `a`. `a` must be a power of two.
#[inline]
pub const fn is_aligned(x: usize, a: usize) -> bool {
    x & (a - 1) == 0
}

/// Branch hint: `cond` is expected to be true.
#[inline(always)]
pub const fn likely(cond: bool) -> bool {
    cond
}

/// Branch hint: `cond` is expected to be false.
#[inline(always)]
pub const fn unlikely(cond: bool) -> bool {
    cond
}

/// Marks the calling path as cold. Does nothing at runtime.
#[cold]
#[inline(never)]
pub fn cold_path() {}

/// Report an unrecoverable invariant violation and abort the process.
#[cold]
#[track_caller]
pub fn bug(reason: &str) -> ! {
    let location = std::panic::Location::caller();
    tracing::error!(%location, reason, "BUG: aborting");
    std::process::abort()
}

/// Abort via [`bug`] when `cond` holds.
#[inline]
#[track_caller]
pub fn bug_on(cond: bool, reason: &str) {
    if unlikely(cond) {
        bug(reason);
    }
}

/// Log a warning when `cond` holds and return `cond` unchanged, so it can
/// be used directly in an `if`.
#[inline]
#[track_caller]
pub fn warn_on(cond: bool, reason: &str) -> bool {
    if unlikely(cond) {
        let location = std::panic::Location::caller();
        tracing::warn!(%location, reason, "WARNING");
    }
    cond
}
