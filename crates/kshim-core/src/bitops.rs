//! Word-granular bit-vector operations and forward scans.
//!
//! A bit vector is a caller-owned slice of machine words. Bit `nr` lives in
//! word `nr / BITS_PER_LONG` at offset `nr % BITS_PER_LONG`. Capacity is
//! whatever the caller allocated; indices past it are a caller contract
//! violation and are not range-checked beyond ordinary slice indexing.
//!
//! All mutations here are plain (non-atomic) read-modify-write of a single
//! word. Callers sharing a vector across threads must hold an external lock
//! for the whole region, e.g. via `SpinLock::with` in `kshim-sync`.
//!
//! # Scan contract
//!
//! [`find_next_set_bit`] and [`find_next_clear_bit`] return an index in
//! `[offset, size]`. Returning `size` means "not found". The result is
//! clamped to `size` even when the final word carries spare bits past
//! `size`, so a stray bit beyond the logical end is never reported.

/// Number of bits in one bit-vector word.
pub const BITS_PER_LONG: usize = usize::BITS as usize;

/// Number of bits in a byte.
pub const BITS_PER_BYTE: usize = 8;

/// Number of bits occupied by a value of type `T`.
pub const fn bits_per_type<T>() -> usize {
    std::mem::size_of::<T>() * BITS_PER_BYTE
}

/// Number of words needed to hold `nbits` bits.
#[inline]
pub const fn bits_to_longs(nbits: usize) -> usize {
    nbits.div_ceil(BITS_PER_LONG)
}

/// Index of the word holding bit `nr`.
#[inline]
pub const fn bit_word(nr: usize) -> usize {
    nr / BITS_PER_LONG
}

/// Single-bit mask for bit `nr` within its word.
#[inline]
pub const fn bit(nr: usize) -> usize {
    1 << (nr & (BITS_PER_LONG - 1))
}

/// Contiguous mask with bits `l..=h` set.
///
/// `h` must be `>= l` and `< BITS_PER_LONG`.
#[inline]
pub const fn genmask(h: usize, l: usize) -> usize {
    (!0usize << l) & (!0usize >> (BITS_PER_LONG - 1 - h))
}

/// Returns `true` if bit `nr` is set.
#[inline]
pub fn test_bit(nr: usize, addr: &[usize]) -> bool {
    (addr[bit_word(nr)] >> (nr & (BITS_PER_LONG - 1))) & 1 != 0
}

/// Set bit `nr`.
#[inline]
pub fn set_bit(nr: usize, addr: &mut [usize]) {
    addr[bit_word(nr)] |= bit(nr);
}

/// Clear bit `nr`.
#[inline]
pub fn clear_bit(nr: usize, addr: &mut [usize]) {
    addr[bit_word(nr)] &= !bit(nr);
}

/// Set bit `nr` and return its previous value.
#[inline]
pub fn test_and_set_bit(nr: usize, addr: &mut [usize]) -> bool {
    let mask = bit(nr);
    let word = &mut addr[bit_word(nr)];
    let old = *word;
    *word = old | mask;
    old & mask != 0
}

/// Clear bit `nr` and return its previous value.
#[inline]
pub fn test_and_clear_bit(nr: usize, addr: &mut [usize]) -> bool {
    let mask = bit(nr);
    let word = &mut addr[bit_word(nr)];
    let old = *word;
    *word = old & !mask;
    old & mask != 0
}

/// Set or clear bit `nr` according to `value`.
#[inline]
pub fn assign_bit(nr: usize, addr: &mut [usize], value: bool) {
    if value {
        set_bit(nr, addr);
    } else {
        clear_bit(nr, addr);
    }
}

/// Number of set bits in `word`.
#[inline]
pub const fn population_count(word: usize) -> u32 {
    word.count_ones()
}

/// Index of the least significant set bit in `word`.
///
/// `word` must be nonzero. The hardware instruction this stands in for has
/// no defined result for zero, so callers must test first. Debug builds
/// assert the precondition.
#[inline]
pub fn lowest_set_bit(word: usize) -> u32 {
    debug_assert!(word != 0, "lowest_set_bit called on an all-zero word");
    word.trailing_zeros()
}

/// Shared scan loop. `invert` selects the complement of each word so the
/// same code finds clear bits.
#[inline]
fn find_next(addr: &[usize], size: usize, offset: usize, invert: usize) -> usize {
    if offset >= size {
        return size;
    }

    // First, possibly partial, word.
    let mut tmp = (addr[bit_word(offset)] ^ invert) & (!0usize << (offset & (BITS_PER_LONG - 1)));
    let mut base = offset - (offset % BITS_PER_LONG);

    while tmp == 0 {
        base += BITS_PER_LONG;
        if base >= size {
            return size;
        }
        tmp = addr[bit_word(base)] ^ invert;
    }
    (base + lowest_set_bit(tmp) as usize).min(size)
}

/// Index of the next set bit at or after `offset`, or `size` if none.
#[inline]
pub fn find_next_set_bit(addr: &[usize], size: usize, offset: usize) -> usize {
    find_next(addr, size, offset, 0)
}

/// Index of the next clear bit at or after `offset`, or `size` if none.
#[inline]
pub fn find_next_clear_bit(addr: &[usize], size: usize, offset: usize) -> usize {
    find_next(addr, size, offset, !0)
}

/// Index of the first set bit, or `size` if none.
#[inline]
pub fn find_first_set_bit(addr: &[usize], size: usize) -> usize {
    find_next_set_bit(addr, size, 0)
}

/// Index of the first clear bit, or `size` if none.
#[inline]
pub fn find_first_clear_bit(addr: &[usize], size: usize) -> usize {
    find_next_clear_bit(addr, size, 0)
}

/// Ascending iterator over the set bits of a vector.
///
/// Each step is an independent `find_next_set_bit` call, so the iterator
/// never mutates the vector and a fresh one can be created at any time.
pub fn iter_set_bits(addr: &[usize], size: usize) -> SetBits<'_> {
    SetBits {
        addr,
        size,
        next: 0,
        clear: false,
    }
}

/// Ascending iterator over the clear bits of a vector.
pub fn iter_clear_bits(addr: &[usize], size: usize) -> SetBits<'_> {
    SetBits {
        addr,
        size,
        next: 0,
        clear: true,
    }
}

/// Iterator returned by [`iter_set_bits`] and [`iter_clear_bits`].
#[derive(Clone, Debug)]
pub struct SetBits<'a> {
    addr: &'a [usize],
    size: usize,
    next: usize,
    clear: bool,
}

impl Iterator for SetBits<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let found = if self.clear {
            find_next_clear_bit(self.addr, self.size, self.next)
        } else {
            find_next_set_bit(self.addr, self.size, self.next)
        };
        if found >= self.size {
            self.next = self.size;
            return None;
        }
        self.next = found + 1;
        Some(found)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.size.saturating_sub(self.next)))
    }
}

impl std::iter::FusedIterator for SetBits<'_> {}
