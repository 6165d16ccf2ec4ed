//! Pure bit-region primitives over the packed `u128` cube representation.
//!
//! Every function takes the state by value and returns a new value, so the
//! solver can keep every historical state alive without copying buffers.

/// A half-open bit range `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRegion {
    pub start: u32,
    pub len: u32,
}

impl BitRegion {
    #[must_use]
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    #[must_use]
    pub const fn end(self) -> u32 {
        self.start + self.len
    }
}

/// A mask of `len` low ones. `len` may be the full width.
const fn ones(len: u32) -> u128 {
    if len >= u128::BITS {
        u128::MAX
    } else {
        (1 << len) - 1
    }
}

const fn clear(value: u128, start: u32, len: u32) -> u128 {
    value & !(ones(len) << start)
}

/// Read `len` bits starting at `start`, shifted down to bit zero.
///
/// # Panics
///
/// If the range does not fit inside 128 bits.
#[must_use]
pub const fn extract_field(value: u128, start: u32, len: u32) -> u128 {
    assert!(start + len <= u128::BITS, "bit range out of bounds");
    (value >> start) & ones(len)
}

/// Overwrite `len` bits starting at `start` with the low bits of `field`.
///
/// # Panics
///
/// If the range does not fit inside 128 bits.
#[must_use]
pub const fn insert_field(value: u128, start: u32, len: u32, field: u128) -> u128 {
    assert!(start + len <= u128::BITS, "bit range out of bounds");
    clear(value, start, len) | ((field & ones(len)) << start)
}

/// Treat `[start, end)` as a circular buffer and rotate it by `amount` bits.
/// A positive `amount` moves bits toward higher significance; bits leaving the
/// top of the range re-enter at `start`.
///
/// # Panics
///
/// If the range is empty or out of bounds, or if `|amount|` is not strictly
/// smaller than the range length. Callers reduce larger rotations modulo the
/// range length first.
#[must_use]
pub const fn rotate_field(value: u128, start: u32, end: u32, amount: i32) -> u128 {
    assert!(start < end && end <= u128::BITS, "bit range out of bounds");
    let len = end - start;
    assert!(amount.unsigned_abs() < len, "rotation amount exceeds range");
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    let shift = amount.rem_euclid(len as i32) as u32;
    if shift == 0 {
        return value;
    }
    let field = extract_field(value, start, len);
    let rotated = ((field << shift) | (field >> (len - shift))) & ones(len);
    clear(value, start, len) | (rotated << start)
}

/// Exchange the contents of two equal-length, non-overlapping regions.
///
/// # Panics
///
/// If the regions differ in length, overlap, or fall outside 128 bits.
#[must_use]
pub const fn swap_fields(value: u128, a: BitRegion, b: BitRegion) -> u128 {
    assert!(a.len == b.len, "swapped regions must have equal length");
    assert!(a.end() <= b.start || b.end() <= a.start, "swapped regions overlap");
    let field_a = extract_field(value, a.start, a.len);
    let field_b = extract_field(value, b.start, b.len);
    let value = insert_field(value, a.start, a.len, field_b);
    insert_field(value, b.start, b.len, field_a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_reads_nibbles() {
        let value = 0xABCD_u128;
        assert_eq!(extract_field(value, 0, 4), 0xD);
        assert_eq!(extract_field(value, 4, 8), 0xBC);
        assert_eq!(extract_field(value, 12, 4), 0xA);
        assert_eq!(extract_field(u128::MAX, 0, 128), u128::MAX);
    }

    #[test]
    fn insert_only_touches_region() {
        let value = insert_field(0xFFFF, 4, 4, 0x3);
        assert_eq!(value, 0xFF3F);
    }

    #[test]
    fn rotate_moves_toward_higher_bits() {
        // Nibbles 0x4321 rotated up by one nibble inside a 16 bit window.
        let value = 0xF_4321_u128;
        assert_eq!(rotate_field(value, 0, 16, 4), 0xF_3214);
        assert_eq!(rotate_field(value, 0, 16, -4), 0xF_1432);
        assert_eq!(rotate_field(value, 0, 16, 0), value);
    }

    #[test]
    fn rotate_inside_offset_window() {
        let value = 0x4321_0000_u128;
        assert_eq!(rotate_field(value, 16, 32, 8), 0x2143_0000);
    }

    #[test]
    fn rotate_full_cycle_is_identity() {
        let value = 0x0123_4567_89AB_CDEF_u128;
        let mut rotated = value;
        for _ in 0..4 {
            rotated = rotate_field(rotated, 8, 24, 4);
        }
        assert_eq!(rotated, value);
    }

    #[test]
    #[should_panic(expected = "rotation amount exceeds range")]
    fn rotate_rejects_oversized_amount() {
        let _ = rotate_field(0, 0, 16, 16);
    }

    #[test]
    fn swap_exchanges_regions() {
        let value = 0x00A0_000B_u128;
        let swapped = swap_fields(value, BitRegion::new(0, 4), BitRegion::new(20, 4));
        assert_eq!(swapped, 0x00B0_000A);
    }

    #[test]
    #[should_panic(expected = "swapped regions overlap")]
    fn swap_rejects_overlap() {
        let _ = swap_fields(0, BitRegion::new(0, 8), BitRegion::new(4, 8));
    }
}
