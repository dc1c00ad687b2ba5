//! Benchmark inputs for the kshim compatibility layer.
//!
//! - [`strided_bitmap`]: a vector with every `stride`-th bit set
//! - [`SCAN_BITS`]: the vector size used by the scan benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kshim_core::bitops::{bits_to_longs, set_bit};

/// Bits in the benchmark vectors (64 words on a 64-bit target).
pub const SCAN_BITS: usize = 4096;

/// Build a `nbits`-bit vector with bits `0, stride, 2*stride, ...` set.
///
/// A stride of 0 yields an empty vector.
pub fn strided_bitmap(nbits: usize, stride: usize) -> Vec<usize> {
    let mut words = vec![0usize; bits_to_longs(nbits)];
    if stride == 0 {
        return words;
    }
    for nr in (0..nbits).step_by(stride) {
        set_bit(nr, &mut words);
    }
    words
}
