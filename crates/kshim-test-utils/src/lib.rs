//! Test fixtures for kshim development.
//!
//! Provides a [`MockNode`] payload shaped like the hosted radix tree's
//! interior node, bit-vector builders, and a one-call tracing setup so test
//! output includes the shim's diagnostics when `RUST_LOG` is set.
//! [`assert_aborts`] checks paths that must abort rather than panic.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod abort;
pub mod fixtures;

pub use abort::{assert_aborts, ABORT_CASE_VAR};
pub use fixtures::{bitmap_with, init_tracing, MockNode, NODE_SLOTS};
