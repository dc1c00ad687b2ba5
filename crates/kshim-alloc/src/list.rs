//! The two-link list anchor embedded in every allocated node.
//!
//! Links are [`NodeId`]s rather than pointers. An anchor whose links both
//! name its own node is the canonical empty list. The operations that splice
//! anchors together live on [`NodeSlab`](crate::NodeSlab), which owns every
//! node and can therefore follow a link to its neighbour.

use crate::handle::{NodeId, POISON_GENERATION};

/// Value written to `next` by `list_del` (`LIST_POISON1`).
pub const LIST_POISON1: NodeId = NodeId::new(0x100, POISON_GENERATION);

/// Value written to `prev` by `list_del` (`LIST_POISON2`).
pub const LIST_POISON2: NodeId = NodeId::new(0x200, POISON_GENERATION);

/// Doubly linked list anchor (`struct list_head`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListHead {
    pub(crate) next: NodeId,
    pub(crate) prev: NodeId,
}

impl ListHead {
    /// An empty anchor owned by `owner` (`INIT_LIST_HEAD`).
    pub const fn empty(owner: NodeId) -> Self {
        Self {
            next: owner,
            prev: owner,
        }
    }

    /// Following node.
    pub fn next(&self) -> NodeId {
        self.next
    }

    /// Preceding node.
    pub fn prev(&self) -> NodeId {
        self.prev
    }

    /// Whether this anchor, owned by `owner`, is an empty list.
    pub fn is_empty_for(&self, owner: NodeId) -> bool {
        self.next == owner && self.prev == owner
    }

    /// Whether `list_del` has poisoned this anchor.
    pub fn is_poisoned(&self) -> bool {
        self.next == LIST_POISON1 && self.prev == LIST_POISON2
    }

    pub(crate) fn poison(&mut self) {
        self.next = LIST_POISON1;
        self.prev = LIST_POISON2;
    }
}
