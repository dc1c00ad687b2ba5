//! Memory-ordering primitives reduced to plain loads and stores.
//!
//! `READ_ONCE`, `WRITE_ONCE`, `smp_load_acquire`, `smp_store_release` and
//! the RCU pointer accessors all compile to ordinary memory accesses with no
//! fence. That is only sound on a single thread, so the shared-cell form
//! ([`RcuCell`]) is built on [`Cell`] and is therefore `!Sync`: it cannot be
//! handed to another thread, and nothing here claims multi-core ordering.

use std::cell::Cell;

/// `READ_ONCE`: plain load.
#[inline(always)]
pub fn read_once<T: Copy>(src: &T) -> T {
    *src
}

/// `WRITE_ONCE`: plain store.
#[inline(always)]
pub fn write_once<T>(dst: &mut T, value: T) {
    *dst = value;
}

/// `smp_load_acquire`: plain load, no fence.
#[inline(always)]
pub fn load_acquire<T: Copy>(src: &T) -> T {
    *src
}

/// `smp_store_release`: plain store, no fence.
#[inline(always)]
pub fn store_release<T>(dst: &mut T, value: T) {
    *dst = value;
}

/// An RCU-published slot (`T __rcu *`).
///
/// Typically holds a node handle or a tagged entry word. Readers call
/// [`dereference`](Self::dereference); the update side publishes with
/// [`assign_pointer`](Self::assign_pointer).
#[derive(Debug, Default)]
pub struct RcuCell<T: Copy> {
    value: Cell<T>,
}

impl<T: Copy> RcuCell<T> {
    /// Create a slot holding `value`.
    pub const fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
        }
    }

    /// `rcu_dereference`: read inside a read section.
    #[inline]
    pub fn dereference(&self) -> T {
        self.value.get()
    }

    /// `rcu_dereference_check`: read, asserting `_cond` holds. The condition
    /// is not evaluated for correctness.
    #[inline]
    pub fn dereference_check(&self, _cond: bool) -> T {
        self.value.get()
    }

    /// `rcu_dereference_protected`: read on the update side while the
    /// lock named by `_held` is held.
    #[inline]
    pub fn dereference_protected(&self, _held: bool) -> T {
        self.value.get()
    }

    /// `rcu_dereference_raw`: unchecked read.
    #[inline]
    pub fn dereference_raw(&self) -> T {
        self.value.get()
    }

    /// `rcu_assign_pointer`: publish a new value.
    #[inline]
    pub fn assign_pointer(&self, value: T) {
        self.value.set(value);
    }

    /// `RCU_INIT_POINTER`: initialise without publication ordering.
    #[inline]
    pub fn init_pointer(&self, value: T) {
        self.value.set(value);
    }

    /// Publish `value` and return the previous one.
    #[inline]
    pub fn replace(&self, value: T) -> T {
        self.value.replace(value)
    }

    /// Consume the slot.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_accessors_are_plain() {
        let mut x = 5u64;
        assert_eq!(read_once(&x), 5);
        write_once(&mut x, 9);
        assert_eq!(x, 9);
    }

    #[test]
    fn acquire_release_round_trip() {
        let mut flag = false;
        store_release(&mut flag, true);
        assert!(load_acquire(&flag));
    }

    #[test]
    fn rcu_cell_publishes_latest_value() {
        let slot = RcuCell::new(0usize);
        slot.init_pointer(0x100);
        assert_eq!(slot.dereference(), 0x100);
        slot.assign_pointer(0x200);
        assert_eq!(slot.dereference_protected(true), 0x200);
        assert_eq!(slot.dereference_check(false), 0x200);
        assert_eq!(slot.dereference_raw(), 0x200);
        assert_eq!(slot.replace(0x300), 0x200);
        assert_eq!(slot.into_inner(), 0x300);
    }

    #[test]
    fn rcu_cell_of_option_handle() {
        let slot: RcuCell<Option<u32>> = RcuCell::default();
        assert_eq!(slot.dereference(), None);
        slot.assign_pointer(Some(4));
        assert_eq!(slot.dereference(), Some(4));
    }
}
