//! Node handles.
//!
//! A [`NodeId`] names a slot in a [`NodeSlab`](crate::NodeSlab) plus the
//! generation of the allocation that produced it. Releasing a node bumps the
//! slot's generation, so an old handle is detected as stale in O(1) instead
//! of silently aliasing whatever is allocated into the slot next.

use std::fmt;

/// Generation value reserved for poison handles. Live slots never use it.
pub(crate) const POISON_GENERATION: u32 = u32::MAX;

/// Handle to a node owned by a [`NodeSlab`](crate::NodeSlab).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the slab.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Allocation generation of the slot when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether this is one of the list poison handles.
    pub fn is_poison(&self) -> bool {
        self.generation == POISON_GENERATION
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@{})", self.index, self.generation)
    }
}

/// Generation that follows `generation`, skipping the poison value.
pub(crate) fn next_generation(generation: u32) -> u32 {
    match generation.wrapping_add(1) {
        POISON_GENERATION => 0,
        g => g,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let id = NodeId::new(7, 3);
        assert_eq!(id.index(), 7);
        assert_eq!(id.generation(), 3);
        assert!(!id.is_poison());
        assert_eq!(id.to_string(), "NodeId(7@3)");
    }

    #[test]
    fn generation_skips_poison() {
        assert_eq!(next_generation(0), 1);
        assert_eq!(next_generation(POISON_GENERATION - 1), 0);
    }

    #[test]
    fn poison_generation_is_flagged() {
        assert!(NodeId::new(0x100, POISON_GENERATION).is_poison());
    }
}
