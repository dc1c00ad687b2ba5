//! Synchronization emulation for the kshim kernel-compatibility layer.
//!
//! Three pieces stand in for kernel primitives the hosted radix tree expects:
//!
//! ```text
//! spinlock  SpinLock (parking, ownerless) + SpinGuard scoped region
//! rcu       no-op read markers, call_rcu that reclaims immediately
//! ordering  READ_ONCE / acquire / release as plain load and store
//! ```
//!
//! Only the lock provides a real cross-thread guarantee. The RCU and
//! ordering layers are correct only for single-threaded use or when every
//! access is serialised by a [`SpinLock`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ordering;
pub mod rcu;
pub mod spinlock;

pub use ordering::{load_acquire, read_once, store_release, write_once, RcuCell};
pub use rcu::{
    call_rcu, rcu_barrier, rcu_read_lock, rcu_read_unlock, synchronize_rcu, RcuHead, RcuReadGuard,
};
pub use spinlock::{lockdep_is_held, IrqFlags, SpinGuard, SpinLock};
