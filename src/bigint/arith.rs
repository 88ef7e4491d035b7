// Addition, subtraction, multiplication and shifts.
//
// Sign handling is done on top of two magnitude primitives (add_mag() and
// sub_mag()), which work on limb vectors only. Shifts operate on the
// absolute value and keep the sign, so that a right shift of a negative
// value truncates toward zero.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use super::{Integer, cmp_limbs};
use crate::backend::{LIMB_BITS, LIMB_MASK, addcarry_w26, subborrow_w26,
                     umull_add_w26};

// Sets d to |d| + |b|.
fn add_mag(d: &mut Vec<u32>, b: &[u32]) {
    if d.len() < b.len() {
        d.resize(b.len(), 0);
    }
    let mut cc = 0;
    for i in 0..b.len() {
        (d[i], cc) = addcarry_w26(d[i], b[i], cc);
    }
    let mut i = b.len();
    while cc != 0 && i < d.len() {
        (d[i], cc) = addcarry_w26(d[i], 0, cc);
        i += 1;
    }
    if cc != 0 {
        d.push(cc);
    }
}

// Sets d to ||d| - |b||. Returned value is true if |d| < |b| (i.e. the
// sign of the difference is the opposite of that of d). Both inputs
// MUST be normalized; the output is not (the caller normalizes).
fn sub_mag(d: &mut Vec<u32>, b: &[u32]) -> bool {
    match cmp_limbs(d, b) {
        Ordering::Equal => {
            d.clear();
            d.push(0);
            false
        }
        Ordering::Greater => {
            let mut cc = 0;
            for i in 0..b.len() {
                (d[i], cc) = subborrow_w26(d[i], b[i], cc);
            }
            let mut i = b.len();
            while cc != 0 {
                (d[i], cc) = subborrow_w26(d[i], 0, cc);
                i += 1;
            }
            false
        }
        Ordering::Less => {
            let n = d.len();
            d.resize(b.len(), 0);
            let mut cc = 0;
            for i in 0..n {
                (d[i], cc) = subborrow_w26(b[i], d[i], cc);
            }
            for i in n..b.len() {
                (d[i], cc) = subborrow_w26(b[i], 0, cc);
            }
            true
        }
    }
}

// Schoolbook product of two magnitudes. For each output limb k, all
// products a[i]*b[j] with i + j = k are accumulated; each product is
// split into its low 26 bits (added to the current limb) and its high
// part (added to the carry for the next limb).
pub(crate) fn mul_limbs(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len() + b.len();
    let mut d = vec![0u32; n];
    let mut carry: u64 = 0;
    for k in 0..(n - 1) {
        let mut ncarry = carry >> LIMB_BITS;
        let mut w = carry & (LIMB_MASK as u64);
        let jmin = k.saturating_sub(a.len() - 1);
        let jmax = core::cmp::min(k, b.len() - 1);
        for j in jmin..=jmax {
            let (lo, hi) = umull_add_w26(a[k - j], b[j], w);
            w = lo as u64;
            ncarry += hi;
        }
        d[k] = w as u32;
        carry = ncarry;
    }

    // The product is lower than 2^(26*n), hence the final carry fits
    // in the top limb.
    d[n - 1] = carry as u32;
    d
}

impl Integer {

    /// Adds `rhs` to this integer (in place).
    pub fn set_add(&mut self, rhs: &Self) {
        if self.neg == rhs.neg {
            add_mag(&mut self.limbs, &rhs.limbs);
        } else if sub_mag(&mut self.limbs, &rhs.limbs) {
            self.neg = !self.neg;
        }
        self.normalize();
    }

    /// Subtracts `rhs` from this integer (in place).
    pub fn set_sub(&mut self, rhs: &Self) {
        if self.neg != rhs.neg {
            // a - (-b) = a + b, and -a - b = -(a + b)
            add_mag(&mut self.limbs, &rhs.limbs);
        } else if sub_mag(&mut self.limbs, &rhs.limbs) {
            self.neg = !self.neg;
        }
        self.normalize();
    }

    /// Multiplies this integer by `rhs` (in place).
    pub fn set_mul(&mut self, rhs: &Self) {
        self.limbs = mul_limbs(&self.limbs, &rhs.limbs);
        self.neg ^= rhs.neg;
        self.normalize();
    }

    /// Squares this integer (in place).
    pub fn set_square(&mut self) {
        self.limbs = mul_limbs(&self.limbs, &self.limbs);
        self.neg = false;
        self.normalize();
    }

    /// Returns the square of this integer.
    #[inline]
    pub fn square(&self) -> Self {
        Self::from_raw(false, mul_limbs(&self.limbs, &self.limbs))
    }

    /// Multiplies this integer by a small non-negative value (in place).
    pub fn set_mul_small(&mut self, m: u32) {
        let mut cc: u64 = 0;
        for i in 0..self.limbs.len() {
            (self.limbs[i], cc) = umull_add_w26(self.limbs[i], m, cc);
        }
        while cc != 0 {
            self.limbs.push((cc as u32) & LIMB_MASK);
            cc >>= LIMB_BITS;
        }
        self.normalize();
    }

    /// Shifts this integer to the left by `n` bits (in place).
    ///
    /// The absolute value is shifted; the sign is unchanged.
    pub fn set_shl(&mut self, n: u32) {
        let r = n % LIMB_BITS;
        let s = (n / LIMB_BITS) as usize;

        if r != 0 {
            let mut carry = 0;
            for i in 0..self.limbs.len() {
                let w = self.limbs[i];
                self.limbs[i] = ((w << r) & LIMB_MASK) | carry;
                carry = w >> (LIMB_BITS - r);
            }
            if carry != 0 {
                self.limbs.push(carry);
            }
        }

        if s != 0 && !self.is_zero() {
            self.limbs.splice(0..0, core::iter::repeat(0).take(s));
        }

        self.normalize();
    }

    /// Shifts this integer to the right by `n` bits (in place).
    ///
    /// The absolute value is shifted and the sign is kept, hence the
    /// result is truncated toward zero (e.g. `-5 >> 1` yields `-2`).
    #[inline]
    pub fn set_shr(&mut self, n: u32) {
        self.shr_inner(n, 0, false);
    }

    /// Shifts this integer to the right by `n` bits (in place), and
    /// returns the bits that were shifted out, as a non-negative integer
    /// (i.e. the absolute value of this integer, modulo `2^n`).
    ///
    /// `hint` is a bit position such that all bits of the absolute value
    /// below that position are known to be zero; it allows the top-down
    /// scan to stop early. Use 0 when no such information is available.
    #[inline]
    pub fn set_shr_split(&mut self, n: u32, hint: u32) -> Self {
        self.shr_inner(n, hint, true)
    }

    fn shr_inner(&mut self, n: u32, hint: u32, keep_low: bool) -> Self {
        let r = n % LIMB_BITS;
        let s = core::cmp::min((n / LIMB_BITS) as usize, self.limbs.len());
        let mask = (1u32 << r) - 1;
        let hint = ((hint / LIMB_BITS) as usize).saturating_sub(s);

        let mut low = Vec::new();
        if keep_low {
            low.extend_from_slice(&self.limbs[..s]);
        }

        if s == self.limbs.len() {
            self.limbs.clear();
            self.limbs.push(0);
        } else if s != 0 {
            self.limbs.drain(..s);
        }

        let mut carry = 0;
        for i in (0..self.limbs.len()).rev() {
            if carry == 0 && i < hint {
                break;
            }
            let w = self.limbs[i];
            self.limbs[i] = ((carry << (LIMB_BITS - r)) & LIMB_MASK) | (w >> r);
            carry = w & mask;
        }

        if keep_low && carry != 0 {
            low.push(carry);
        }

        self.normalize();
        Self::from_raw(false, low)
    }
}
