//! Reusable fixtures.

use kshim_core::bitops::{bits_to_longs, set_bit};

/// Slots per mock node (`XA_CHUNK_SIZE` with `CONFIG_BASE_SMALL=0`).
pub const NODE_SLOTS: usize = 64;

/// Number of mark bitmaps carried per node.
pub const NODE_MARKS: usize = 3;

/// Words per mark bitmap.
pub const MARK_LONGS: usize = bits_to_longs(NODE_SLOTS);

/// Payload shaped like a radix-tree interior node.
///
/// `Default` is the all-zero state, which is what the allocator must hand
/// out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockNode {
    pub shift: u8,
    pub offset: u8,
    pub count: u8,
    pub nr_values: u8,
    pub parent: Option<u32>,
    pub slots: [usize; NODE_SLOTS],
    pub marks: [[usize; MARK_LONGS]; NODE_MARKS],
}

impl Default for MockNode {
    fn default() -> Self {
        Self {
            shift: 0,
            offset: 0,
            count: 0,
            nr_values: 0,
            parent: None,
            slots: [0; NODE_SLOTS],
            marks: [[0; MARK_LONGS]; NODE_MARKS],
        }
    }
}

impl MockNode {
    /// Whether every field is still zero.
    pub fn is_zeroed(&self) -> bool {
        *self == Self::default()
    }
}

/// Build a bit vector of `nbits` capacity with exactly `bits` set.
pub fn bitmap_with(bits: &[usize], nbits: usize) -> Vec<usize> {
    let mut words = vec![0usize; bits_to_longs(nbits)];
    for &b in bits {
        set_bit(b, &mut words);
    }
    words
}

/// Install a test-writer `tracing` subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
