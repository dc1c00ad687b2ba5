//! Mark and occupancy bitmaps as the hosted radix tree uses them.

use kshim_core::bitops::{bits_to_longs, genmask, BITS_PER_LONG};
use kshim_core::{
    clear_bit, find_first_clear_bit, find_next_set_bit, is_err_value, iter_clear_bits,
    iter_set_bits, set_bit, test_and_set_bit, Errno, Feature, ShimConfig,
};

const SLOTS: usize = 128;

#[test]
fn tagged_entries_scan_in_order() {
    let mut tags = vec![0usize; bits_to_longs(SLOTS)];
    for nr in [3, 40, 127] {
        set_bit(nr, &mut tags);
    }

    assert_eq!(find_next_set_bit(&tags, SLOTS, 0), 3);
    assert_eq!(find_next_set_bit(&tags, SLOTS, 4), 40);
    assert_eq!(find_next_set_bit(&tags, SLOTS, 41), 127);
    assert_eq!(find_next_set_bit(&tags, SLOTS, 128), SLOTS);

    clear_bit(40, &mut tags);
    assert_eq!(iter_set_bits(&tags, SLOTS).collect::<Vec<_>>(), vec![3, 127]);
}

#[test]
fn free_slot_search_skips_full_words() {
    let mut occupied = vec![usize::MAX; bits_to_longs(SLOTS)];
    assert_eq!(find_first_clear_bit(&occupied, SLOTS), SLOTS);

    let hole = BITS_PER_LONG + 5;
    clear_bit(hole, &mut occupied);
    assert_eq!(find_first_clear_bit(&occupied, SLOTS), hole);
    assert_eq!(iter_clear_bits(&occupied, SLOTS).collect::<Vec<_>>(), vec![hole]);

    assert!(!test_and_set_bit(hole, &mut occupied));
    assert_eq!(find_first_clear_bit(&occupied, SLOTS), SLOTS);
}

#[test]
fn partial_last_word_is_bounded_by_size() {
    // Bits past `size` are set but must never be reported.
    let words = [0usize, genmask(BITS_PER_LONG - 1, 10)];
    let size = BITS_PER_LONG + 4;
    assert_eq!(find_next_set_bit(&words, size, 0), size);
    assert_eq!(iter_set_bits(&words, size).count(), 0);
}

#[test]
fn errno_survives_pointer_encoding() {
    let encoded = Errno::Busy.to_err_value();
    assert!(is_err_value(encoded));
    assert_eq!(Errno::from_err_value(encoded), Some(Errno::Busy));
    assert!(!is_err_value(0x1000));
    assert_eq!(Errno::from_code(-12), Some(Errno::NoMemory));
}

#[test]
fn default_features_match_test_harness_build() {
    let config = ShimConfig::default();
    assert!(config.is_enabled(Feature::XarrayMulti));
    assert!(!config.is_enabled(Feature::BaseSmall));
    assert!(!config.checks_lists());
}
