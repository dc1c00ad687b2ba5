//! Core primitives for the kshim kernel-compatibility layer.
//!
//! This is the leaf crate with zero internal dependencies. It holds the
//! bit-vector scanner the hosted radix tree uses for its mark and occupancy
//! bitmaps, plus the thin compatibility surface (errno codes, alignment
//! arithmetic, integer aliases, allocation flags, feature toggles, and the
//! `BUG`/`WARN` helpers).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bitops;
pub mod compat;
pub mod config;
pub mod error;
pub mod types;

pub use bitops::{
    assign_bit, clear_bit, find_first_clear_bit, find_first_set_bit, find_next_clear_bit,
    find_next_set_bit, iter_clear_bits, iter_set_bits, lowest_set_bit, population_count,
    set_bit, test_and_clear_bit, test_and_set_bit, test_bit, SetBits, BITS_PER_LONG,
};
pub use compat::{bug, bug_on, likely, unlikely, warn_on};
pub use config::{Feature, ShimConfig};
pub use error::{is_err_value, Errno, MAX_ERRNO};
pub use types::Gfp;
