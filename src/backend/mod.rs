//! Limb-level primitives for the multi-precision integer engine.
//!
//! Integers are stored as sequences of 26-bit limbs, each held in a
//! `u32`. All intermediate computations on limbs are done over `u32` (for
//! additions and subtractions) or `u64` (for products and carries), so
//! that:
//!
//!  - the sum of two limbs and an incoming carry fits in 27 bits;
//!
//!  - a limb-by-limb product fits in 52 bits, and a full column of the
//!    schoolbook product, together with its running carry, stays far
//!    below 2^64 for any realistic operand length;
//!
//!  - a two-limb "running remainder" (52 bits) can be divided by a
//!    single limb with a native `u64` division.
//!
//! The 26-bit width also makes the hexadecimal and byte conversions
//! regroup bits across limb boundaries (24-bit groups, advancing the
//! offset by 2 bits per limb); see `bigint::conv`.
//!
//! None of these functions is constant-time in any meaningful sense;
//! the whole crate is variable-time and MUST NOT be used with secret
//! data in contexts where side channels matter.

/// Number of bits in a limb.
pub const LIMB_BITS: u32 = 26;

/// Mask for the low `LIMB_BITS` bits.
pub const LIMB_MASK: u32 = (1u32 << LIMB_BITS) - 1;

// Compute x+y+c over 26-bit limbs; returned values are the sum modulo
// 2^26, and the output carry (0 or 1). Input carry MUST be 0 or 1.
#[inline(always)]
pub(crate) const fn addcarry_w26(x: u32, y: u32, c: u32) -> (u32, u32) {
    let z = x + y + c;
    (z & LIMB_MASK, z >> LIMB_BITS)
}

// Compute x-y-c over 26-bit limbs; returned values are the difference
// modulo 2^26, and the output borrow (0 or 1). Input borrow MUST be 0
// or 1.
#[inline(always)]
pub(crate) const fn subborrow_w26(x: u32, y: u32, c: u32) -> (u32, u32) {
    let z = x.wrapping_sub(y).wrapping_sub(c);
    (z & LIMB_MASK, z >> 31)
}

// Compute x*y+z over 64 bits, returned as (low 26 bits, high part).
#[inline(always)]
pub(crate) const fn umull_add_w26(x: u32, y: u32, z: u64) -> (u32, u64) {
    let t = (x as u64) * (y as u64) + z;
    ((t as u32) & LIMB_MASK, t >> LIMB_BITS)
}

// Get the length (in bits) of a limb (0 for a zero limb).
#[inline(always)]
pub(crate) const fn bitlen_w26(x: u32) -> u32 {
    32 - x.leading_zeros()
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn carries() {
        assert_eq!(addcarry_w26(LIMB_MASK, 1, 0), (0, 1));
        assert_eq!(addcarry_w26(LIMB_MASK, LIMB_MASK, 1), (LIMB_MASK, 1));
        assert_eq!(addcarry_w26(5, 7, 1), (13, 0));
        assert_eq!(subborrow_w26(0, 1, 0), (LIMB_MASK, 1));
        assert_eq!(subborrow_w26(0, LIMB_MASK, 1), (0, 1));
        assert_eq!(subborrow_w26(9, 4, 1), (4, 0));
        assert_eq!(umull_add_w26(LIMB_MASK, LIMB_MASK, 0),
            (1, ((LIMB_MASK as u64) * (LIMB_MASK as u64)) >> LIMB_BITS));
        assert_eq!(umull_add_w26(3, 5, 1 << 26), (15, 1));
        assert_eq!(bitlen_w26(0), 0);
        assert_eq!(bitlen_w26(1), 1);
        assert_eq!(bitlen_w26(LIMB_MASK), 26);
    }
}
