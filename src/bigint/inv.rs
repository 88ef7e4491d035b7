// Modular inversion.
//
// The inverse is computed with an extended binary GCD. Given an odd
// modulus p > 0 and a value u in [0, p), we maintain the invariants:
//
//   x1*a = u  mod p
//   x2*a = v  mod p
//
// starting from u = a mod p, v = p, x1 = 1 and x2 = 0. At each iteration,
// u and v are made odd by halving (x1 and x2 are halved modulo p, which
// is possible since p is odd), then the larger of u and v is replaced by
// the difference. When either u or v reaches 1, the corresponding
// coefficient is the inverse. If the loop ends with neither equal to 1,
// then gcd(a, p) != 1 and there is no inverse.

use tracing::debug;

use super::Integer;
use crate::{Error, Result};

impl Integer {

    /// Computes the inverse of this integer modulo `p`.
    ///
    /// The modulus must be positive and odd, otherwise
    /// `Error::InvalidModulus` is returned. If this integer is not
    /// invertible modulo `p` (including when it is a multiple of `p`),
    /// `Error::NotInvertible` is returned. On success, the result is in
    /// the `[1, p)` range. Negative inputs are supported.
    pub fn mod_inverse(&self, p: &Self) -> Result<Self> {
        if p.neg || p.is_zero() || p.is_even() {
            debug!(bits = p.bit_length(), "rejected modulus for inversion");
            return Err(Error::InvalidModulus);
        }

        let mut u = self.checked_rem(p)?;
        let mut v = p.clone();
        let mut x1 = Integer::one();
        let mut x2 = Integer::zero();

        while u.gt_one() && v.gt_one() {
            halve_mod(&mut u, &mut x1, p);
            halve_mod(&mut v, &mut x2, p);
            if u >= v {
                u.set_sub(&v);
                x1.set_sub(&x2);
            } else {
                v.set_sub(&u);
                x2.set_sub(&x1);
            }
        }

        if u.is_one() {
            x1.checked_rem(p)
        } else if v.is_one() {
            x2.checked_rem(p)
        } else {
            Err(Error::NotInvertible)
        }
    }
}

// While y is even (and non-zero), divide it by 2 and divide x by 2
// modulo the odd modulus p.
fn halve_mod(y: &mut Integer, x: &mut Integer, p: &Integer) {
    while !y.is_zero() && y.is_even() {
        y.set_shr(1);
        if x.is_odd() {
            x.set_add(p);
        }
        x.set_shr(1);
    }
}
