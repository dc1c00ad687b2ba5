//! Fixed-width integer aliases and allocation flags.

#![allow(non_camel_case_types)]

/// Unsigned 8-bit integer.
pub type u8 = core::primitive::u8;
/// Unsigned 16-bit integer.
pub type u16 = core::primitive::u16;
/// Unsigned 32-bit integer.
pub type u32 = core::primitive::u32;
/// Unsigned 64-bit integer.
pub type u64 = core::primitive::u64;
/// Signed 8-bit integer.
pub type s8 = i8;
/// Signed 16-bit integer.
pub type s16 = i16;
/// Signed 32-bit integer.
pub type s32 = i32;
/// Signed 64-bit integer.
pub type s64 = i64;

/// Allocation context flags (`gfp_t`).
///
/// Carried through the allocation surface for signature compatibility. The
/// user-space allocator has a single behaviour, so every flag combination
/// may block and none changes the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gfp(pub core::primitive::u32);

impl Gfp {
    /// Normal, possibly sleeping allocation.
    pub const KERNEL: Self = Self(0);
    /// Allocation that must not sleep.
    pub const NOWAIT: Self = Self(0);
    /// Charge the allocation to the caller's memory cgroup.
    pub const ACCOUNT: Self = Self(0);
    /// Number of low bits reserved for allocator flags. Callers may stash
    /// their own state above this shift.
    pub const BITS_SHIFT: core::primitive::u32 = 26;

    /// Whether the allocation may block. Always true in user space.
    pub const fn allows_blocking(self) -> bool {
        true
    }

    /// Union of two flag sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}
