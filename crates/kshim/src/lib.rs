//! kshim: the kernel primitives a radix-tree sparse array needs, in user space.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the kshim sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use kshim::prelude::*;
//!
//! // Mark bitmap for a 64-slot node.
//! let mut marks = [0usize; kshim::bitops::bits_to_longs(64)];
//! let lock = SpinLock::new();
//! lock.with(|| {
//!     set_bit(3, &mut marks);
//!     set_bit(40, &mut marks);
//! });
//! assert_eq!(find_first_set_bit(&marks, 64), 3);
//! assert_eq!(find_next_set_bit(&marks, 64, 4), 40);
//! assert_eq!(find_next_set_bit(&marks, 64, 41), 64);
//!
//! // Nodes arrive zeroed with an empty list anchor.
//! let mut slab: NodeSlab<[usize; 8]> = NodeSlab::new(AllocConfig::default()).unwrap();
//! let id = slab.allocate_node(Gfp::KERNEL).unwrap();
//! assert!(slab.list_empty(id).unwrap());
//!
//! // Retirement reclaims on the spot.
//! let head = slab.get(id).unwrap().rcu_head();
//! call_rcu(head, |h| slab.rcu_free(h)).unwrap();
//! assert!(!slab.contains(id));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`bitops`] | `kshim-core` | Bit operations, scans, set-bit iteration |
//! | [`compat`] | `kshim-core` | errno, alignment, integer aliases, flags, feature config |
//! | [`sync`] | `kshim-sync` | Spin lock, RCU stand-in, ordering primitives |
//! | [`alloc`] | `kshim-alloc` | Node slab, list anchors |
//!
//! # Fidelity gaps
//!
//! RCU read sections do nothing and `call_rcu` frees immediately. Acquire
//! and release accessors are plain loads and stores. Both are sound only
//! when the hosted structure runs on one thread or under its lock.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Bit-vector operations (`kshim-core::bitops`).
pub use kshim_core::bitops;

/// Compatibility constants and helpers (`kshim-core`).
///
/// errno codes live in [`compat::error`], integer aliases and allocation
/// flags in [`compat::types`], feature toggles in [`compat::config`].
pub use kshim_core as compat;

/// Synchronization emulation (`kshim-sync`).
pub use kshim_sync as sync;

/// Node allocation (`kshim-alloc`).
pub use kshim_alloc as alloc;

/// Common imports.
///
/// ```rust
/// use kshim::prelude::*;
/// ```
pub mod prelude {
    // Bit family
    pub use kshim_core::bitops::{
        assign_bit, clear_bit, find_first_clear_bit, find_first_set_bit, find_next_clear_bit,
        find_next_set_bit, iter_set_bits, lowest_set_bit, population_count, set_bit,
        test_and_clear_bit, test_and_set_bit, test_bit,
    };

    // Compatibility
    pub use kshim_core::{Errno, Gfp, ShimConfig};

    // Lock family
    pub use kshim_sync::{
        call_rcu, rcu_read_lock, rcu_read_unlock, RcuCell, RcuHead, SpinGuard, SpinLock,
    };

    // Allocation family
    pub use kshim_alloc::{AllocConfig, AllocError, ListHead, NodeId, NodeSlab};
}
