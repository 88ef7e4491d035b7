// Division with remainder.
//
// Signs are first reduced to the non-negative case. The sign rules are
// NOT those of a single floor or Euclidean convention:
//
//   a < 0, b > 0:  q = -(|a| / b)
//                  r = b - (|a| mod b)  if |a| mod b != 0, 0 otherwise
//   a >= 0, b < 0: q = -(a / |b|)
//                  r = a mod |b|
//   a < 0, b < 0:  q = |a| / |b|
//                  r = |a| mod |b|
//
// In particular, with a negative dividend and a positive divisor, the
// remainder is always in [0, b) (which is what modular reduction needs),
// but the quotient is truncated, so q*b + r != a whenever the remainder
// is not zero.
//
// Magnitude division uses short division when the divisor fits in a
// single limb. Otherwise, the long division estimates each quotient digit
// from the top limbs of the running remainder and the top limb of the
// divisor, and lets the running remainder become negative when the
// estimate was too large (the next steps then add back instead of
// subtracting). The divisor is first normalized (shifted so that its top
// limb has its high bit set), which keeps estimates within a few units of
// the true digit.

use super::Integer;
use crate::backend::{LIMB_BITS, LIMB_MASK, bitlen_w26};
use crate::{Error, Result};

/// Which results a division should compute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DivMode {
    /// Quotient only.
    Quotient,
    /// Remainder only.
    Remainder,
    /// Both quotient and remainder.
    Both,
}

impl DivMode {
    #[inline(always)]
    fn wants_quotient(self) -> bool {
        self != DivMode::Remainder
    }

    #[inline(always)]
    fn wants_remainder(self) -> bool {
        self != DivMode::Quotient
    }
}

/// Output of a division: each part is present if the `DivMode` asked
/// for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivRem {
    pub quotient: Option<Integer>,
    pub remainder: Option<Integer>,
}

impl Integer {

    /// Divides this integer by `rhs`, returning the quotient, the
    /// remainder, or both, depending on `mode`.
    ///
    /// An error is returned if `rhs` is zero. Signs are handled as
    /// follows (`|a| / |b|` and `|a| mod |b|` denote the usual division
    /// of absolute values):
    ///
    ///  - `a >= 0`, `b > 0`: `q = a / b`, `r = a mod b`
    ///
    ///  - `a < 0`, `b > 0`: `q = -(|a| / b)`, and `r = b - (|a| mod b)`
    ///    if `|a| mod b != 0`, or 0 otherwise
    ///
    ///  - `a >= 0`, `b < 0`: `q = -(a / |b|)`, `r = a mod |b|`
    ///
    ///  - `a < 0`, `b < 0`: `q = |a| / |b|`, `r = |a| mod |b|`
    ///
    /// The remainder is thus never negative, and always lower than `b`
    /// when `b` is positive; however, for a negative dividend, `q*b + r`
    /// differs from `a` whenever the remainder is not zero.
    pub fn div_rem(&self, rhs: &Self, mode: DivMode) -> Result<DivRem> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }

        match (self.neg, rhs.neg) {
            (false, false) => Ok(self.div_rem_mag(rhs, mode)),
            (true, true) => Ok(self.abs().div_rem_mag(&rhs.abs(), mode)),
            (true, false) => {
                let DivRem { quotient, remainder } =
                    self.abs().div_rem_mag(rhs, mode);
                Ok(DivRem {
                    quotient: quotient.map(|q| -q),
                    remainder: remainder.map(|r| {
                        if r.is_zero() { r } else { rhs - &r }
                    }),
                })
            }
            (false, true) => {
                let DivRem { quotient, remainder } =
                    self.div_rem_mag(&rhs.abs(), mode);
                Ok(DivRem {
                    quotient: quotient.map(|q| -q),
                    remainder,
                })
            }
        }
    }

    /// Returns the quotient of this integer by `rhs`.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        let DivRem { quotient, .. } = self.div_rem(rhs, DivMode::Quotient)?;
        Ok(quotient.unwrap_or_default())
    }

    /// Returns the remainder of this integer by `rhs`.
    ///
    /// When `rhs` is positive, the result is always in `[0, rhs)`, even
    /// if this integer is negative.
    pub fn checked_rem(&self, rhs: &Self) -> Result<Self> {
        let DivRem { remainder, .. } = self.div_rem(rhs, DivMode::Remainder)?;
        Ok(remainder.unwrap_or_default())
    }

    /// Reduces this integer modulo `m`; this is an alias for
    /// `checked_rem()`.
    #[inline]
    pub fn modulo(&self, m: &Self) -> Result<Self> {
        self.checked_rem(m)
    }

    /// Returns both the quotient and the remainder of this integer by
    /// `rhs`.
    pub fn divmod(&self, rhs: &Self) -> Result<(Self, Self)> {
        let DivRem { quotient, remainder } = self.div_rem(rhs, DivMode::Both)?;
        Ok((quotient.unwrap_or_default(), remainder.unwrap_or_default()))
    }

    /// Divides this integer by `rhs` (in place).
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    pub fn set_div(&mut self, rhs: &Self) {
        match self.checked_div(rhs) {
            Ok(q) => *self = q,
            Err(e) => panic!("{}", e),
        }
    }

    /// Replaces this integer with its remainder by `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    pub fn set_rem(&mut self, rhs: &Self) {
        match self.checked_rem(rhs) {
            Ok(r) => *self = r,
            Err(e) => panic!("{}", e),
        }
    }

    /// Divides the absolute value of this integer by `d` (in place),
    /// and returns the remainder. The sign is kept.
    ///
    /// # Panics
    ///
    /// Panics if `d` is zero.
    pub fn set_div_small(&mut self, d: u32) -> u32 {
        assert!(d != 0, "division by zero");
        let d = d as u64;
        let mut rem = 0u64;
        for i in (0..self.limbs.len()).rev() {
            let w = (rem << LIMB_BITS) | (self.limbs[i] as u64);
            self.limbs[i] = (w / d) as u32;
            rem = w % d;
        }
        self.normalize();
        rem as u32
    }

    /// Returns the absolute value of this integer, modulo `d`.
    ///
    /// # Panics
    ///
    /// Panics if `d` is zero.
    pub fn mod_small(&self, d: u32) -> u32 {
        assert!(d != 0, "division by zero");
        let d = d as u64;
        let mut rem = 0u64;
        for i in (0..self.limbs.len()).rev() {
            rem = ((rem << LIMB_BITS) | (self.limbs[i] as u64)) % d;
        }
        rem as u32
    }

    // Division of non-negative values (rhs non-zero).
    fn div_rem_mag(&self, rhs: &Self, mode: DivMode) -> DivRem {
        if self.cmp_magnitude(rhs).is_lt() {
            return DivRem {
                quotient: mode.wants_quotient().then(Integer::zero),
                remainder: mode.wants_remainder().then(|| self.clone()),
            };
        }

        if rhs.limbs.len() == 1 {
            let mut q = self.clone();
            let r = q.set_div_small(rhs.limbs[0]);
            return DivRem {
                quotient: mode.wants_quotient().then_some(q),
                remainder: mode.wants_remainder().then(|| Integer::from(r)),
            };
        }

        self.long_div(rhs, mode)
    }

    // Long division of non-negative values; the divisor has at least two
    // limbs, and the dividend is not lower than the divisor.
    fn long_div(&self, rhs: &Self, mode: DivMode) -> DivRem {
        let want_q = mode.wants_quotient();

        // Normalize so that the top limb of the divisor has its high bit
        // set; the quotient is unchanged and the remainder is shifted
        // back at the end.
        let norm = LIMB_BITS - bitlen_w26(rhs.limbs[rhs.limbs.len() - 1]);
        let b = rhs << norm;
        let mut a = self << norm;
        let blen = b.limbs.len();
        let btop = b.limbs[blen - 1] as u64;

        let mut q = Integer::zero();

        // While the running remainder is longer than the divisor, use a
        // two-limb estimate: since the top limb of the running remainder
        // is non-zero and btop < 2^26, the estimate is at least 1.
        while a.limbs.len() > blen {
            let alen = a.limbs.len();
            let hi = ((a.limbs[alen - 1] as u64) << LIMB_BITS)
                | (a.limbs[alen - 2] as u64);
            let sq = core::cmp::min(hi / btop, LIMB_MASK as u64) as u32;
            let shift = ((alen - blen - 1) as u32) * LIMB_BITS;
            a.step(&mut q, want_q, &b, sq, shift);
        }

        // Running remainder now has at most as many limbs as the divisor;
        // finish with single-limb estimates.
        while a.cmp_magnitude(&b).is_ge() {
            let alen = a.limbs.len();
            let sq = ((a.limbs[alen - 1] as u64) / btop) as u32;
            let shift = ((alen - blen) as u32) * LIMB_BITS;
            a.step(&mut q, want_q, &b, sq, shift);
        }

        if a.neg {
            if want_q {
                q.set_sub(&Integer::one());
            }
            a.set_add(&b);
        }

        DivRem {
            quotient: want_q.then_some(q),
            remainder: mode.wants_remainder().then(|| a >> norm),
        }
    }

    // One long division step on the running remainder (self): subtract
    // (or add, if the running remainder is negative) sq*b*2^shift, and
    // adjust the quotient accordingly.
    fn step(&mut self, q: &mut Integer, want_q: bool, b: &Integer,
            sq: u32, shift: u32)
    {
        if want_q {
            let t = Integer::from(sq) << shift;
            if self.neg {
                q.set_sub(&t);
            } else {
                q.set_add(&t);
            }
        }
        let mut t = b.clone();
        t.set_mul_small(sq);
        t.set_shl(shift);
        if self.neg {
            self.set_add(&t);
        } else {
            self.set_sub(&t);
        }
    }
}
