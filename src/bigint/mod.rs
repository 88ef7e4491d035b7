//! Multi-precision signed integers.
//!
//! An `Integer` is a sign flag and a vector of limbs; each limb holds 26
//! bits (see `backend`), least significant limb first. The representation
//! is always canonical:
//!
//!  - the vector contains at least one limb;
//!
//!  - the most significant limb is non-zero, unless the value is zero,
//!    in which case the vector contains exactly one limb of value 0;
//!
//!  - zero is never negative.
//!
//! All functions that may break these rules (in-place arithmetic, shifts,
//! parsing) renormalize the value before returning, so that long chains
//! of in-place updates remain canonical. Thanks to this invariant, the
//! derived `PartialEq`, `Eq` and `Hash` implementations are numeric.
//!
//! Arithmetic is split over several submodules:
//!
//!  - `arith`: addition, subtraction, multiplication, shifts;
//!
//!  - `div`: division with remainder, in "short" (single-limb divisor)
//!    and "long" (multi-limb divisor) variants;
//!
//!  - `inv`: modular inversion with an extended binary GCD;
//!
//!  - `conv`: conversions from and to strings, bytes and bits.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg,
                Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
                SubAssign};

use crate::backend::{LIMB_BITS, LIMB_MASK, bitlen_w26};

mod arith;
mod conv;
mod div;
mod inv;

pub use div::{DivMode, DivRem};

/// A signed multi-precision integer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    neg: bool,
    limbs: Vec<u32>,
}

impl Integer {

    /// Returns a new instance of value zero.
    #[inline]
    pub fn zero() -> Self {
        Self { neg: false, limbs: vec![0] }
    }

    /// Returns a new instance of value one.
    #[inline]
    pub fn one() -> Self {
        Self { neg: false, limbs: vec![1] }
    }

    // Builds an instance from a sign and limbs (least significant first);
    // limbs MUST be lower than 2^26. The value is normalized.
    pub(crate) fn from_raw(neg: bool, limbs: Vec<u32>) -> Self {
        let mut r = Self { neg, limbs };
        r.normalize();
        r
    }

    /// Creates an integer from a 64-bit magnitude and a sign.
    pub fn from_u64_signed(v: u64, neg: bool) -> Self {
        let mut limbs = Vec::with_capacity(3);
        let mut v = v;
        loop {
            limbs.push((v as u32) & LIMB_MASK);
            v >>= LIMB_BITS;
            if v == 0 {
                break;
            }
        }
        Self::from_raw(neg, limbs)
    }

    // Removes the most significant zero limbs, and clears the sign of
    // zero.
    pub(crate) fn normalize(&mut self) {
        while self.limbs.len() > 1 && self.limbs[self.limbs.len() - 1] == 0 {
            self.limbs.pop();
        }
        if self.limbs.is_empty() {
            self.limbs.push(0);
        }
        if self.limbs.len() == 1 && self.limbs[0] == 0 {
            self.neg = false;
        }
    }

    /// Returns the limbs of the absolute value of this integer (26-bit
    /// limbs, least significant first). There is always at least one
    /// limb, and the last limb is non-zero unless the value is zero.
    #[inline]
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    /// Returns the number of significant limbs.
    #[inline]
    pub fn limb_len(&self) -> usize {
        self.limbs.len()
    }

    /// Returns `true` if this integer is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 0
    }

    /// Returns `true` if this integer is one.
    #[inline]
    pub fn is_one(&self) -> bool {
        !self.neg && self.limbs.len() == 1 && self.limbs[0] == 1
    }

    // Returns true if this integer is strictly greater than one.
    #[inline]
    pub(crate) fn gt_one(&self) -> bool {
        !self.neg && (self.limbs.len() > 1 || self.limbs[0] > 1)
    }

    /// Returns `true` if this integer is strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.neg
    }

    /// Returns `true` if this integer is even (negative values included).
    #[inline]
    pub fn is_even(&self) -> bool {
        (self.limbs[0] & 1) == 0
    }

    /// Returns `true` if this integer is odd (negative values included).
    #[inline]
    pub fn is_odd(&self) -> bool {
        (self.limbs[0] & 1) != 0
    }

    /// Returns the length, in bits, of the absolute value of this
    /// integer. Zero has length 0.
    pub fn bit_length(&self) -> u32 {
        let n = self.limbs.len();
        ((n - 1) as u32) * LIMB_BITS + bitlen_w26(self.limbs[n - 1])
    }

    /// Returns bit `i` of the absolute value of this integer.
    pub fn test_bit(&self, i: u32) -> bool {
        let j = (i / LIMB_BITS) as usize;
        if j >= self.limbs.len() {
            return false;
        }
        ((self.limbs[j] >> (i % LIMB_BITS)) & 1) != 0
    }

    /// Compares the absolute values of `self` and `rhs`.
    pub fn cmp_magnitude(&self, rhs: &Self) -> Ordering {
        cmp_limbs(&self.limbs, &rhs.limbs)
    }

    /// Negates this integer (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        if !self.is_zero() {
            self.neg = !self.neg;
        }
    }

    /// Returns the absolute value of this integer.
    pub fn abs(&self) -> Self {
        Self { neg: false, limbs: self.limbs.clone() }
    }
}

// Compares two normalized limb sequences, as unsigned integers.
pub(crate) fn cmp_limbs(a: &[u32], b: &[u32]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for i in (0..a.len()).rev() {
        if a[i] != b[i] {
            return a[i].cmp(&b[i]);
        }
    }
    Ordering::Equal
}

impl Default for Integer {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for Integer {
    fn cmp(&self, rhs: &Self) -> Ordering {
        match (self.neg, rhs.neg) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_magnitude(rhs),
            (true, true) => rhs.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for Integer {
    #[inline]
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl From<u64> for Integer {
    #[inline]
    fn from(v: u64) -> Self {
        Self::from_u64_signed(v, false)
    }
}

impl From<u32> for Integer {
    #[inline]
    fn from(v: u32) -> Self {
        Self::from_u64_signed(v as u64, false)
    }
}

impl From<i64> for Integer {
    #[inline]
    fn from(v: i64) -> Self {
        Self::from_u64_signed(v.unsigned_abs(), v < 0)
    }
}

impl From<i32> for Integer {
    #[inline]
    fn from(v: i32) -> Self {
        Self::from_u64_signed(v.unsigned_abs() as u64, v < 0)
    }
}

impl From<&Integer> for Integer {
    #[inline]
    fn from(v: &Integer) -> Self {
        v.clone()
    }
}

// ========================================================================
// Operators. Each binary operator is implemented for all combinations of
// values and references; the work is done by the in-place `set_*()`
// functions. The `Add` implementation on two references accumulates into
// a copy of the longer operand.

macro_rules! forward_binop {
    ($tr:ident, $f:ident, $tra:ident, $fa:ident, $set:ident) => {

        impl $tr<Integer> for Integer {
            type Output = Integer;

            #[inline(always)]
            fn $f(mut self, other: Integer) -> Integer {
                self.$set(&other);
                self
            }
        }

        impl $tr<&Integer> for Integer {
            type Output = Integer;

            #[inline(always)]
            fn $f(mut self, other: &Integer) -> Integer {
                self.$set(other);
                self
            }
        }

        impl $tr<Integer> for &Integer {
            type Output = Integer;

            #[inline(always)]
            fn $f(self, other: Integer) -> Integer {
                let mut r = self.clone();
                r.$set(&other);
                r
            }
        }

        impl $tra<Integer> for Integer {
            #[inline(always)]
            fn $fa(&mut self, other: Integer) {
                self.$set(&other);
            }
        }

        impl $tra<&Integer> for Integer {
            #[inline(always)]
            fn $fa(&mut self, other: &Integer) {
                self.$set(other);
            }
        }
    }
}

forward_binop!(Add, add, AddAssign, add_assign, set_add);
forward_binop!(Sub, sub, SubAssign, sub_assign, set_sub);
forward_binop!(Mul, mul, MulAssign, mul_assign, set_mul);
forward_binop!(Div, div, DivAssign, div_assign, set_div);
forward_binop!(Rem, rem, RemAssign, rem_assign, set_rem);

impl Add<&Integer> for &Integer {
    type Output = Integer;

    #[inline]
    fn add(self, other: &Integer) -> Integer {
        if self.limbs.len() >= other.limbs.len() {
            let mut r = self.clone();
            r.set_add(other);
            r
        } else {
            let mut r = other.clone();
            r.set_add(self);
            r
        }
    }
}

impl Sub<&Integer> for &Integer {
    type Output = Integer;

    #[inline(always)]
    fn sub(self, other: &Integer) -> Integer {
        let mut r = self.clone();
        r.set_sub(other);
        r
    }
}

impl Mul<&Integer> for &Integer {
    type Output = Integer;

    #[inline(always)]
    fn mul(self, other: &Integer) -> Integer {
        Integer::from_raw(self.neg != other.neg,
            arith::mul_limbs(&self.limbs, &other.limbs))
    }
}

impl Div<&Integer> for &Integer {
    type Output = Integer;

    #[inline(always)]
    fn div(self, other: &Integer) -> Integer {
        let mut r = self.clone();
        r.set_div(other);
        r
    }
}

impl Rem<&Integer> for &Integer {
    type Output = Integer;

    #[inline(always)]
    fn rem(self, other: &Integer) -> Integer {
        let mut r = self.clone();
        r.set_rem(other);
        r
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline(always)]
    fn neg(mut self) -> Integer {
        self.set_neg();
        self
    }
}

impl Neg for &Integer {
    type Output = Integer;

    #[inline(always)]
    fn neg(self) -> Integer {
        let mut r = self.clone();
        r.set_neg();
        r
    }
}

impl Shl<u32> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn shl(mut self, n: u32) -> Integer {
        self.set_shl(n);
        self
    }
}

impl Shl<u32> for &Integer {
    type Output = Integer;

    #[inline(always)]
    fn shl(self, n: u32) -> Integer {
        let mut r = self.clone();
        r.set_shl(n);
        r
    }
}

impl ShlAssign<u32> for Integer {
    #[inline(always)]
    fn shl_assign(&mut self, n: u32) {
        self.set_shl(n);
    }
}

impl Shr<u32> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn shr(mut self, n: u32) -> Integer {
        self.set_shr(n);
        self
    }
}

impl Shr<u32> for &Integer {
    type Output = Integer;

    #[inline(always)]
    fn shr(self, n: u32) -> Integer {
        let mut r = self.clone();
        r.set_shr(n);
        r
    }
}

impl ShrAssign<u32> for Integer {
    #[inline(always)]
    fn shr_assign(&mut self, n: u32) {
        self.set_shr(n);
    }
}
