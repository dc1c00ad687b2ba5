//! Blocking, ownerless, non-reentrant lock standing in for `spinlock_t`.
//!
//! The kernel lock spins with preemption disabled. In user space that would
//! burn a core while the holder is descheduled, so [`SpinLock`] parks the
//! waiter instead. The observable contract is unchanged:
//!
//! - mutual exclusion while held, nothing more (no fairness, no ordering
//!   promise beyond the exclusion itself);
//! - no owner identity: any thread may release a held lock;
//! - re-acquiring on the holding thread deadlocks and is not detected;
//! - releasing an unheld lock is a bug and aborts the process.
//!
//! Interrupt and bottom-half variants collapse onto the plain lock because
//! there are no interrupts to mask.

use kshim_core::compat::bug;
use parking_lot::{Condvar, Mutex};

/// Saved "interrupt state" returned by [`SpinLock::lock_irqsave`].
///
/// Carries nothing; it exists so the save/restore pairing type-checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[must_use = "pass the flags back to unlock_irqrestore"]
pub struct IrqFlags(());

/// Binary lock with blocking acquisition.
#[derive(Debug, Default)]
pub struct SpinLock {
    locked: Mutex<bool>,
    released: Condvar,
}

// Compile-time assertion: SpinLock must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SpinLock>();
};

impl SpinLock {
    /// Create an unlocked lock (`__SPIN_LOCK_UNLOCKED`).
    pub const fn new() -> Self {
        Self {
            locked: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    /// Acquire the lock, blocking until it is free.
    pub fn acquire(&self) {
        let mut locked = self.locked.lock();
        if *locked {
            tracing::trace!("spin lock contended, parking");
            while *locked {
                self.released.wait(&mut locked);
            }
        }
        *locked = true;
    }

    /// Try to acquire without blocking. Returns `true` on success.
    pub fn try_acquire(&self) -> bool {
        let mut locked = self.locked.lock();
        if *locked {
            return false;
        }
        *locked = true;
        true
    }

    /// Release the lock and wake one waiter.
    ///
    /// Any thread may release. Releasing a lock that is not held aborts.
    pub fn release(&self) {
        let mut locked = self.locked.lock();
        if !*locked {
            drop(locked);
            bug("spin lock released while not held");
        }
        *locked = false;
        drop(locked);
        self.released.notify_one();
    }

    /// Whether the lock is currently held by anyone.
    pub fn is_locked(&self) -> bool {
        *self.locked.lock()
    }

    /// Acquire and return a guard that releases on drop.
    pub fn lock(&self) -> SpinGuard<'_> {
        self.acquire();
        SpinGuard { lock: self }
    }

    /// Non-blocking variant of [`lock`](Self::lock).
    ///
    /// Returns `None` if the lock is held, leaving it untouched: no guard is
    /// created, so nothing is released on the holder's behalf.
    pub fn try_lock(&self) -> Option<SpinGuard<'_>> {
        self.try_acquire().then(|| SpinGuard { lock: self })
    }

    /// Run `f` with the lock held, releasing it on every exit path
    /// including unwinding.
    pub fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock();
        f()
    }

    /// Acquire with lockdep subclass annotation. The subclass is ignored.
    pub fn lock_nested(&self, _subclass: u32) -> SpinGuard<'_> {
        self.lock()
    }

    /// Acquire, "saving interrupt state" (`spin_lock_irqsave`).
    pub fn lock_irqsave(&self) -> IrqFlags {
        self.acquire();
        IrqFlags::default()
    }

    /// Release, "restoring interrupt state" (`spin_unlock_irqrestore`).
    pub fn unlock_irqrestore(&self, _flags: IrqFlags) {
        self.release();
    }

    /// `spin_lock_irq`. Same as [`acquire`](Self::acquire).
    pub fn lock_irq(&self) {
        self.acquire();
    }

    /// `spin_unlock_irq`. Same as [`release`](Self::release).
    pub fn unlock_irq(&self) {
        self.release();
    }

    /// `spin_lock_bh`. Same as [`acquire`](Self::acquire).
    pub fn lock_bh(&self) {
        self.acquire();
    }

    /// `spin_unlock_bh`. Same as [`release`](Self::release).
    pub fn unlock_bh(&self) {
        self.release();
    }
}

/// Scoped hold on a [`SpinLock`]; releases when dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SpinGuard<'a> {
    lock: &'a SpinLock,
}

impl SpinGuard<'_> {
    /// Release early. Equivalent to dropping the guard.
    pub fn unlock(self) {
        drop(self);
    }
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// `lockdep_is_held`. There is no lock dependency tracking, so every
/// assertion passes.
pub fn lockdep_is_held(_lock: &SpinLock) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_unheld_succeeds_immediately() {
        let lock = SpinLock::new();
        lock.acquire();
        assert!(lock.is_locked());
        lock.release();
        assert!(!lock.is_locked());
    }

    #[test]
    fn try_acquire_fails_while_held() {
        let lock = SpinLock::new();
        assert!(lock.try_acquire());
        assert!(!lock.try_acquire());
        lock.release();
        assert!(lock.try_acquire());
        lock.release();
    }

    #[test]
    fn guard_releases_on_drop() {
        let lock = SpinLock::new();
        {
            let _guard = lock.lock();
            assert!(lock.is_locked());
            assert!(lock.try_lock().is_none());
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn failed_try_lock_keeps_holder_lock() {
        let lock = SpinLock::new();
        lock.acquire();
        assert!(lock.try_lock().is_none());
        assert!(lock.is_locked());
        assert!(lock.try_lock().is_none());
        assert!(!lock.try_acquire());
        lock.release();
        let guard = lock.try_lock();
        assert!(guard.is_some());
        assert!(lock.is_locked());
        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn explicit_unlock_releases() {
        let lock = SpinLock::new();
        let guard = lock.lock();
        guard.unlock();
        assert!(!lock.is_locked());
    }

    #[test]
    fn with_returns_closure_value_and_releases() {
        let lock = SpinLock::new();
        let v = lock.with(|| {
            assert!(lock.is_locked());
            7
        });
        assert_eq!(v, 7);
        assert!(!lock.is_locked());
    }

    #[test]
    fn with_releases_on_panic() {
        let lock = SpinLock::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            lock.with(|| panic!("inside critical section"))
        }));
        assert!(result.is_err());
        assert!(!lock.is_locked());
    }

    #[test]
    fn irqsave_pair_round_trips() {
        let lock = SpinLock::new();
        let flags = lock.lock_irqsave();
        assert!(lock.is_locked());
        lock.unlock_irqrestore(flags);
        assert!(!lock.is_locked());
    }

    #[test]
    fn irq_and_bh_variants_degrade_to_plain_lock() {
        let lock = SpinLock::new();
        lock.lock_irq();
        assert!(!lock.try_acquire());
        lock.unlock_irq();
        lock.lock_bh();
        assert!(lock.is_locked());
        lock.unlock_bh();
        let guard = lock.lock_nested(1);
        assert!(lock.is_locked());
        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn release_from_another_thread_is_allowed() {
        let lock = std::sync::Arc::new(SpinLock::new());
        lock.acquire();
        let remote = std::sync::Arc::clone(&lock);
        std::thread::spawn(move || remote.release())
            .join()
            .unwrap();
        assert!(!lock.is_locked());
    }

    #[test]
    fn release_of_unheld_lock_aborts() {
        kshim_test_utils::assert_aborts("spinlock::tests::release_of_unheld_lock_aborts", || {
            SpinLock::new().release();
        });
    }

    #[test]
    fn guard_drop_after_manual_release_aborts() {
        kshim_test_utils::assert_aborts(
            "spinlock::tests::guard_drop_after_manual_release_aborts",
            || {
                let lock = SpinLock::new();
                let guard = lock.lock();
                lock.release();
                drop(guard);
            },
        );
    }

    #[test]
    fn lockdep_always_satisfied() {
        let lock = SpinLock::new();
        assert!(lockdep_is_held(&lock));
    }
}
