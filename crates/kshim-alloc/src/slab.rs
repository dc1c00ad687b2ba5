//! Slab of fixed-size nodes with embedded list anchors.
//!
//! [`NodeSlab`] stands in for the kernel's node cache. Every allocation hands
//! out a payload in its zero state (`T::default()`) whose anchor already
//! forms an empty list, so a caller can link the node without initialising it
//! first. Released slots go on a free list and are reused with a bumped
//! generation.
//!
//! The slab owns every node. Callers hold [`NodeId`]s and reach node data
//! through accessors, and the list operations below follow links through the
//! slab instead of through raw pointers.

use kshim_core::compat::{bug, warn_on};
use kshim_core::Gfp;
use kshim_sync::RcuHead;

use crate::config::AllocConfig;
use crate::error::{AllocError, ConfigError};
use crate::handle::{next_generation, NodeId};
use crate::list::ListHead;

/// An allocated node: payload plus the embedded `private_list` anchor.
#[derive(Debug)]
pub struct Node<T> {
    id: NodeId,
    private_list: ListHead,
    body: T,
}

impl<T> Node<T> {
    /// This node's handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The embedded list anchor.
    pub fn private_list(&self) -> &ListHead {
        &self.private_list
    }

    /// Reclamation record pointing back at this node, for
    /// [`call_rcu`](kshim_sync::call_rcu) with [`NodeSlab::rcu_free`].
    pub fn rcu_head(&self) -> RcuHead<NodeId> {
        RcuHead::new(self.id)
    }

    /// The payload.
    pub fn body(&self) -> &T {
        &self.body
    }

    /// The payload, mutably.
    pub fn body_mut(&mut self) -> &mut T {
        &mut self.body
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    /// Released; the next allocation here uses `generation`.
    Vacant { generation: u32 },
}

/// Owner of all nodes of one hosted structure.
#[derive(Debug)]
pub struct NodeSlab<T> {
    slots: Vec<Slot<T>>,
    /// Indices of vacant slots available for reuse.
    free_list: Vec<u32>,
    live: usize,
    config: AllocConfig,
}

impl<T> NodeSlab<T> {
    /// Create an empty slab.
    pub fn new(config: AllocConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            config,
        })
    }

    /// The configuration this slab was built with.
    pub fn config(&self) -> &AllocConfig {
        &self.config
    }

    /// Allocate a zero-initialised node (`kmem_cache_alloc_lru`).
    ///
    /// The returned node's anchor references the node itself in both
    /// directions. Returns `None` once `max_nodes` nodes are live. The
    /// allocation flags are accepted for signature parity and ignored.
    pub fn allocate_node(&mut self, _gfp: Gfp) -> Option<NodeId>
    where
        T: Default,
    {
        if self.live >= self.config.max_nodes {
            tracing::warn!(
                max_nodes = self.config.max_nodes,
                "node allocation failed: budget exhausted"
            );
            return None;
        }

        let id = if let Some(index) = self.free_list.pop() {
            let generation = match self.slots[index as usize] {
                Slot::Vacant { generation } => generation,
                Slot::Occupied(_) => bug("node free list names an occupied slot"),
            };
            NodeId::new(index, generation)
        } else {
            // live < max_nodes <= u32::MAX, so the new index fits.
            let index = self.slots.len() as u32;
            self.slots.push(Slot::Vacant { generation: 0 });
            NodeId::new(index, 0)
        };

        self.slots[id.index as usize] = Slot::Occupied(Node {
            id,
            private_list: ListHead::empty(id),
            body: T::default(),
        });
        self.live += 1;
        tracing::trace!(node = %id, live = self.live, "allocated node");
        Some(id)
    }

    /// Free a node immediately and return its payload.
    ///
    /// The handle, and every copy of it, is stale afterwards.
    pub fn release_node(&mut self, id: NodeId) -> Result<T, AllocError> {
        let checks = self.config.shim.checks_lists();
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|_| !id.is_poison())
            .ok_or(AllocError::UnknownNode { node: id })?;

        match &*slot {
            Slot::Occupied(node) if node.id == id => {
                if checks {
                    let anchor = node.private_list;
                    warn_on(
                        !anchor.is_empty_for(id) && !anchor.is_poisoned(),
                        "node released while still linked on a list",
                    );
                }
            }
            _ => return Err(AllocError::StaleNode { node: id }),
        }

        let vacant = Slot::Vacant {
            generation: next_generation(id.generation),
        };
        let Slot::Occupied(node) = std::mem::replace(slot, vacant) else {
            bug("node slot vacated during release");
        };
        self.free_list.push(id.index);
        self.live -= 1;
        tracing::trace!(node = %id, live = self.live, "released node");
        Ok(node.body)
    }

    /// Reclamation callback (`radix_tree_node_rcu_free`): release the node
    /// the record points back at.
    pub fn rcu_free(&mut self, head: RcuHead<NodeId>) -> Result<T, AllocError> {
        self.release_node(head.into_owner())
    }

    /// Look up a live node.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.index as usize)? {
            Slot::Occupied(node) if node.id == id => Some(node),
            _ => None,
        }
    }

    /// Look up a live node mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match self.slots.get_mut(id.index as usize)? {
            Slot::Occupied(node) if node.id == id => Some(node),
            _ => None,
        }
    }

    /// Whether `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Maximum number of live nodes.
    pub fn capacity(&self) -> usize {
        self.config.max_nodes
    }

    /// Number of released slots awaiting reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    fn node(&self, id: NodeId) -> Result<&Node<T>, AllocError> {
        self.get(id).ok_or_else(|| self.lookup_error(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<T>, AllocError> {
        let err = self.lookup_error(id);
        self.get_mut(id).ok_or(err)
    }

    fn lookup_error(&self, id: NodeId) -> AllocError {
        if id.is_poison() || id.index as usize >= self.slots.len() {
            AllocError::UnknownNode { node: id }
        } else {
            AllocError::StaleNode { node: id }
        }
    }

    // ── list operations ────────────────────────────────────────────

    /// Whether the list anchored at `head` is empty (`list_empty`).
    pub fn list_empty(&self, head: NodeId) -> Result<bool, AllocError> {
        Ok(self.node(head)?.private_list.is_empty_for(head))
    }

    /// Insert `new` right after `head` (`list_add`).
    pub fn list_add(&mut self, new: NodeId, head: NodeId) -> Result<(), AllocError> {
        let next = self.node(head)?.private_list.next;
        self.link_between(new, head, next)
    }

    /// Insert `new` right before `head`, i.e. at the tail (`list_add_tail`).
    pub fn list_add_tail(&mut self, new: NodeId, head: NodeId) -> Result<(), AllocError> {
        let prev = self.node(head)?.private_list.prev;
        self.link_between(new, prev, head)
    }

    /// Unlink `entry` and poison its anchor (`list_del`).
    pub fn list_del(&mut self, entry: NodeId) -> Result<(), AllocError> {
        self.unlink(entry)?;
        self.node_mut(entry)?.private_list.poison();
        Ok(())
    }

    /// Unlink `entry` and reset its anchor to empty (`list_del_init`).
    pub fn list_del_init(&mut self, entry: NodeId) -> Result<(), AllocError> {
        self.unlink(entry)?;
        self.node_mut(entry)?.private_list = ListHead::empty(entry);
        Ok(())
    }

    /// Iterate the members of the list anchored at `head`, front to back,
    /// excluding `head` itself.
    pub fn list_entries(&self, head: NodeId) -> ListIter<'_, T> {
        ListIter {
            slab: self,
            head,
            cursor: self.get(head).map(|n| n.private_list.next),
        }
    }

    fn link_between(&mut self, new: NodeId, prev: NodeId, next: NodeId) -> Result<(), AllocError> {
        let next_prev = self.node(next)?.private_list.prev;
        let prev_next = self.node(prev)?.private_list.next;
        self.node(new)?;
        if self.config.shim.checks_lists()
            && (next_prev != prev || prev_next != next || new == prev || new == next)
        {
            bug("list_add corruption");
        }

        self.node_mut(next)?.private_list.prev = new;
        let anchor = &mut self.node_mut(new)?.private_list;
        anchor.next = next;
        anchor.prev = prev;
        self.node_mut(prev)?.private_list.next = new;
        Ok(())
    }

    fn unlink(&mut self, entry: NodeId) -> Result<(), AllocError> {
        let ListHead { next, prev } = self.node(entry)?.private_list;
        let checks = self.config.shim.checks_lists();
        if checks && (next.is_poison() || prev.is_poison()) {
            bug("list_del on an already deleted entry");
        }
        // Both neighbours must resolve before either is written.
        let next_prev = self.node(next)?.private_list.prev;
        let prev_next = self.node(prev)?.private_list.next;
        if checks && (next_prev != entry || prev_next != entry) {
            bug("list_del corruption");
        }

        self.node_mut(next)?.private_list.prev = prev;
        self.node_mut(prev)?.private_list.next = next;
        Ok(())
    }
}

impl<T> Default for NodeSlab<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            config: AllocConfig::default(),
        }
    }
}

/// Iterator returned by [`NodeSlab::list_entries`].
///
/// Stops at the head, or early if a link names a node that is no longer
/// live.
#[derive(Debug)]
pub struct ListIter<'a, T> {
    slab: &'a NodeSlab<T>,
    head: NodeId,
    cursor: Option<NodeId>,
}

impl<T> Iterator for ListIter<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor.take()?;
        if current == self.head {
            return None;
        }
        let node = self.slab.get(current)?;
        self.cursor = Some(node.private_list.next);
        Some(current)
    }
}
