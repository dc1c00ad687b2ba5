//! Node allocation shim for the kshim kernel-compatibility layer.
//!
//! The hosted radix tree allocates its interior nodes from a slab cache and
//! expects each one zero-filled, with the embedded `private_list` anchor
//! already initialised to an empty list. This crate provides that contract
//! in safe Rust:
//!
//! ```text
//! NodeSlab<T> (owns every node; config-bounded budget)
//! ├── Slot::Occupied(Node<T>) ── id: NodeId (index + generation)
//! │                            ├── private_list: ListHead (NodeId links)
//! │                            └── body: T (T::default() == zero state)
//! └── free_list: Vec<u32> (released slots, generation bumped)
//! ```
//!
//! Allocation failure is reported as `None`, never a panic. Release is
//! immediate and doubles as the RCU reclamation callback
//! ([`NodeSlab::rcu_free`]), matching the synchronous `call_rcu` in
//! `kshim-sync`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod list;
pub mod slab;

pub use config::AllocConfig;
pub use error::{AllocError, ConfigError};
pub use handle::NodeId;
pub use list::{ListHead, LIST_POISON1, LIST_POISON2};
pub use slab::{ListIter, Node, NodeSlab};
