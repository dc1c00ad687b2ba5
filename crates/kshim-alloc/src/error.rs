//! Allocator error types.

use std::error::Error;
use std::fmt;

use kshim_core::Errno;

use crate::handle::NodeId;

/// Errors from node lookup, release, and list operations.
///
/// Exhaustion is not an error here: [`allocate_node`](crate::NodeSlab::allocate_node)
/// reports it as `None`, the way the kernel allocator returns `NULL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The handle's slot has been released (and possibly reused) since
    /// the handle was issued.
    StaleNode {
        /// The handle that was presented.
        node: NodeId,
    },
    /// The handle names a slot the slab never allocated, or a poison value.
    UnknownNode {
        /// The handle that was presented.
        node: NodeId,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleNode { node } => write!(f, "stale node handle {node}"),
            Self::UnknownNode { node } => write!(f, "unknown node handle {node}"),
        }
    }
}

impl Error for AllocError {}

impl From<AllocError> for Errno {
    fn from(_: AllocError) -> Self {
        Errno::Invalid
    }
}

/// Errors detected by [`AllocConfig::validate`](crate::AllocConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_nodes` is zero, so nothing could ever be allocated.
    ZeroCapacity,
    /// `max_nodes` exceeds what a [`NodeId`] index can address.
    CapacityTooLarge {
        /// The configured budget.
        configured: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "max_nodes must be at least 1"),
            Self::CapacityTooLarge { configured } => {
                write!(f, "max_nodes {configured} exceeds the addressable node count")
            }
        }
    }
}

impl Error for ConfigError {}
