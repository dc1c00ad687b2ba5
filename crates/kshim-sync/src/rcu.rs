//! Read-copy-update stand-in with immediate reclamation.
//!
//! Real RCU lets readers run without locks while writers retire objects;
//! the retired memory is freed only after every reader that might still see
//! it has passed a quiescent state. Nothing here tracks quiescent states:
//!
//! - [`rcu_read_lock`] / [`rcu_read_unlock`] mark a read section and do
//!   nothing else;
//! - [`call_rcu`] runs the reclamation callback immediately, at the point
//!   the update side retires the object;
//! - [`synchronize_rcu`] and [`rcu_barrier`] return at once because there is
//!   never a pending callback or an outstanding grace period.
//!
//! This is a fidelity gap. It is only correct when the hosted structure is
//! driven from one thread, or when readers and writers are serialised by an
//! external lock. Concurrent lock-free readers would observe freed nodes.

use std::marker::PhantomData;

/// Marker for an open read-side critical section.
///
/// Zero-sized and `!Send`: a read section belongs to the thread that opened
/// it. Dropping the guard ends the section.
#[must_use = "the read section ends when the guard is dropped"]
#[derive(Debug)]
pub struct RcuReadGuard {
    _not_send: PhantomData<*const ()>,
}

/// Begin a read-side critical section. No-op.
#[inline]
pub fn rcu_read_lock() -> RcuReadGuard {
    RcuReadGuard {
        _not_send: PhantomData,
    }
}

/// End a read-side critical section. No-op.
#[inline]
pub fn rcu_read_unlock(guard: RcuReadGuard) {
    drop(guard);
}

/// Reclamation record embedded in a retirable object.
///
/// Instead of recovering the enclosing object from the address of an
/// embedded field, the record carries an explicit back-reference to its
/// owner (an index or handle) which the callback uses to find what to free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RcuHead<O> {
    owner: O,
}

impl<O> RcuHead<O> {
    /// Create a record pointing back at `owner`.
    pub const fn new(owner: O) -> Self {
        Self { owner }
    }

    /// The owning object's handle.
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Consume the record, yielding the owner's handle.
    pub fn into_owner(self) -> O {
        self.owner
    }
}

/// Queue `func` to reclaim the object behind `head` after a grace period.
///
/// Runs `func(head)` synchronously before returning and passes its result
/// back, since no grace period is ever observed.
pub fn call_rcu<O, R>(head: RcuHead<O>, func: impl FnOnce(RcuHead<O>) -> R) -> R
where
    O: std::fmt::Debug,
{
    tracing::trace!(owner = ?head.owner, "call_rcu: reclaiming immediately");
    func(head)
}

/// Wait for all pre-existing readers. Returns immediately.
#[inline]
pub fn synchronize_rcu() {}

/// Wait for all queued callbacks to finish. Returns immediately, because
/// [`call_rcu`] never leaves a callback queued.
#[inline]
pub fn rcu_barrier() {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn read_markers_are_noops() {
        let guard = rcu_read_lock();
        let nested = rcu_read_lock();
        drop(nested);
        rcu_read_unlock(guard);
        assert_eq!(std::mem::size_of::<RcuReadGuard>(), 0);
    }

    #[test]
    fn callback_runs_before_call_rcu_returns() {
        let freed = RefCell::new(Vec::new());
        call_rcu(RcuHead::new(3u32), |head| {
            freed.borrow_mut().push(head.into_owner());
        });
        assert_eq!(*freed.borrow(), vec![3]);
    }

    #[test]
    fn callback_result_is_returned() {
        let out = call_rcu(RcuHead::new("node"), |head| head.owner().len());
        assert_eq!(out, 4);
    }

    #[test]
    fn callbacks_run_in_retirement_order() {
        let order = RefCell::new(Vec::new());
        for i in 0..4u32 {
            call_rcu(RcuHead::new(i), |h| order.borrow_mut().push(*h.owner()));
        }
        synchronize_rcu();
        rcu_barrier();
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
    }
}
