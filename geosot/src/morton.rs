//! Bit interleaving (Morton order) of 32-bit axis values.
//!
//! Two-axis codes fit into `u64`, three-axis codes take 96 bits and are stored in `u128`.

const SPREAD2_MASKS: [u64; 6] = [
    0x0000_0000_FFFF_FFFF,
    0x0000_FFFF_0000_FFFF,
    0x00FF_00FF_00FF_00FF,
    0x0F0F_0F0F_0F0F_0F0F,
    0x3333_3333_3333_3333,
    0x5555_5555_5555_5555,
];

const SPREAD3_SHIFTS: [u32; 5] = [32, 16, 8, 4, 2];
const SPREAD3_MASKS: [u128; 5] = [
    0xFFFF_0000_0000_FFFF,
    0xFF00_00FF_0000_FF00_00FF,
    0xF0_0F00_F00F_00F0_0F00_F00F,
    0xC30_C30C_30C3_0C30_C30C_30C3,
    0x2492_4924_9249_2492_4924_9249,
];

/// Inserts a zero bit after every bit of `x`: bit `i` moves to bit `2i`.
pub fn spread(x: u32) -> u64 {
    let mut x = x as u64;
    x = (x | (x << 16)) & SPREAD2_MASKS[1];
    x = (x | (x << 8)) & SPREAD2_MASKS[2];
    x = (x | (x << 4)) & SPREAD2_MASKS[3];
    x = (x | (x << 2)) & SPREAD2_MASKS[4];
    x = (x | (x << 1)) & SPREAD2_MASKS[5];
    x
}

/// Inverse of [`spread`]. Collects even bits of `x`, odd bits are ignored.
pub fn compact(x: u64) -> u32 {
    let mut x = x & SPREAD2_MASKS[5];
    x = (x ^ (x >> 1)) & SPREAD2_MASKS[4];
    x = (x ^ (x >> 2)) & SPREAD2_MASKS[3];
    x = (x ^ (x >> 4)) & SPREAD2_MASKS[2];
    x = (x ^ (x >> 8)) & SPREAD2_MASKS[1];
    x = (x ^ (x >> 16)) & SPREAD2_MASKS[0];
    x as u32
}

/// Interleaves two values: bits of `l` go to even positions, bits of `b` to odd ones.
pub fn interleave2(l: u32, b: u32) -> u64 {
    spread(l) | (spread(b) << 1)
}

/// Inverse of [`interleave2`].
pub fn deinterleave2(code: u64) -> (u32, u32) {
    (compact(code), compact(code >> 1))
}

/// Inserts two zero bits after every bit of `x`: bit `i` moves to bit `3i`.
pub fn spread3(x: u32) -> u128 {
    let mut x = x as u128;
    for (shift, mask) in SPREAD3_SHIFTS.iter().zip(SPREAD3_MASKS) {
        x = (x | (x << shift)) & mask;
    }
    x
}

/// Inverse of [`spread3`]. Collects every third bit of `x` starting from bit 0.
pub fn compact3(x: u128) -> u32 {
    let mut x = x & SPREAD3_MASKS[4];
    for i in (0..SPREAD3_SHIFTS.len()).rev() {
        let mask = if i == 0 {
            u32::MAX as u128
        } else {
            SPREAD3_MASKS[i - 1]
        };
        x = (x ^ (x >> SPREAD3_SHIFTS[i])) & mask;
    }
    x as u32
}

/// Interleaves three values: bit `i` of `x`, `y`, `z` goes to bit `3i`, `3i + 1` and `3i + 2`
/// respectively.
pub fn interleave3(x: u32, y: u32, z: u32) -> u128 {
    spread3(x) | (spread3(y) << 1) | (spread3(z) << 2)
}

/// Inverse of [`interleave3`].
pub fn deinterleave3(code: u128) -> (u32, u32, u32) {
    (compact3(code), compact3(code >> 1), compact3(code >> 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_interleave3(x: u32, y: u32, z: u32) -> u128 {
        let mut code = 0u128;
        for i in 0..32 {
            code |= (((x as u128) >> i) & 1) << (3 * i);
            code |= (((y as u128) >> i) & 1) << (3 * i + 1);
            code |= (((z as u128) >> i) & 1) << (3 * i + 2);
        }
        code
    }

    #[test]
    fn spread_known_value() {
        assert_eq!(spread(639358566), 293861272910566420);
        assert_eq!(spread(u32::MAX), 0x5555_5555_5555_5555);
        assert_eq!(spread(0b1011), 0b1000101);
    }

    #[test]
    fn interleave2_places_axes() {
        assert_eq!(interleave2(1, 0), 1);
        assert_eq!(interleave2(0, 1), 2);
        assert_eq!(interleave2(0x8000_0000, 0x8000_0000), 0xC000_0000_0000_0000);
        assert_eq!(deinterleave2(0xC000_0000_0000_0003), (0x8000_0001, 0x8000_0001));
    }

    #[test]
    fn deinterleave2_inverts() {
        for (l, b) in [(0, 0), (975550096, 334956480), (u32::MAX, 0), (12345, u32::MAX)] {
            assert_eq!(deinterleave2(interleave2(l, b)), (l, b));
        }
    }

    #[test]
    fn spread3_matches_naive() {
        for x in [0, 1, 0xFFFF_FFFF, 0x8000_0000, 0x3A25_B690, 0x1234_5678, 0xDEAD_BEEF] {
            assert_eq!(spread3(x), naive_interleave3(x, 0, 0));
            assert_eq!(compact3(spread3(x)), x);
        }
    }

    #[test]
    fn interleave3_matches_naive() {
        let (x, y, z) = (0x3A25_B690, 0x13F5_5200, 0x1C8C_C000);
        let code = interleave3(x, y, z);
        assert_eq!(code, naive_interleave3(x, y, z));
        assert_eq!(deinterleave3(code), (x, y, z));
        assert!(code < 1 << 96);
    }
}
