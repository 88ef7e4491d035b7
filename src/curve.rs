//! Short Weierstraß curves in affine coordinates.
//!
//! A `Curve` is defined by a prime `p`, the coefficients `a` and `b` of
//! the curve equation `y^2 = x^3 + a*x + b`, the order `n` of the
//! subgroup of interest, and a generator `G` of that subgroup. Curves are
//! built from a `CurveParams` bundle of constant words; bundles are
//! provided for secp256k1 (`SECP256K1`) and NIST P-256 (`P256`), behind
//! the Cargo features of the same names.
//!
//! The group law uses the textbook affine formulas:
//!
//! ```text
//!   add:     lambda = (y2 - y1) / (x2 - x1)
//!   double:  lambda = (3*x^2 + a) / (2*y)
//!            x3 = lambda^2 - x1 - x2
//!            y3 = lambda*(x1 - x3) - y1
//! ```
//!
//! All results are reduced into `[0, p)`. Since there is no
//! representation of the point-at-infinity, `add()` rejects inputs with
//! the same x coordinate (a point and itself, or a point and its
//! opposite) with `Error::DegenerateAddition`. Doubling a point with
//! `y = 0` has no representable result either; `double()` then returns an
//! unspecified point (the inverse of zero is taken to be zero, so e.g. on
//! secp256k1, doubling `(0, 0)` returns `(0, 0)`). Input points are not
//! validated; use `is_on_curve()` where needed.
//!
//! `Curve::new()` rejects parameters whose modulus is not odd and greater
//! than 2. The bundled parameters are always accepted.
//!
//! Scalar multiplication is a left-to-right double-and-add over the bits
//! of the scalar, which must be in `[1, n]`. This is NOT constant-time.

use tracing::{debug, instrument};

use crate::{CryptoRng, Error, Integer, Point, Result, RngCore};

/// Domain parameters for a short Weierstraß curve.
///
/// All values are encoded as four 64-bit words, most significant first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParams {
    pub name: &'static str,
    pub p: [u64; 4],
    pub a: [u64; 4],
    pub b: [u64; 4],
    pub n: [u64; 4],
    pub gx: [u64; 4],
    pub gy: [u64; 4],
}

/// Parameters for secp256k1 (SEC 2).
#[cfg(feature = "secp256k1")]
pub const SECP256K1: CurveParams = CurveParams {
    name: "secp256k1",
    p: [
        0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF, 0xFFFFFFFEFFFFFC2F,
    ],
    a: [0, 0, 0, 0],
    b: [0, 0, 0, 7],
    n: [
        0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFE,
        0xBAAEDCE6AF48A03B, 0xBFD25E8CD0364141,
    ],
    gx: [
        0x79BE667EF9DCBBAC, 0x55A06295CE870B07,
        0x029BFCDB2DCE28D9, 0x59F2815B16F81798,
    ],
    gy: [
        0x483ADA7726A3C465, 0x5DA4FBFC0E1108A8,
        0xFD17B448A6855419, 0x9C47D08FFB10D4B8,
    ],
};

/// Parameters for NIST P-256 (FIPS 186-4, also known as secp256r1).
#[cfg(feature = "p256")]
pub const P256: CurveParams = CurveParams {
    name: "P-256",
    p: [
        0xFFFFFFFF00000001, 0x0000000000000000,
        0x00000000FFFFFFFF, 0xFFFFFFFFFFFFFFFF,
    ],
    a: [
        0xFFFFFFFF00000001, 0x0000000000000000,
        0x00000000FFFFFFFF, 0xFFFFFFFFFFFFFFFC,
    ],
    b: [
        0x5AC635D8AA3A93E7, 0xB3EBBD55769886BC,
        0x651D06B0CC53B0F6, 0x3BCE3C3E27D2604B,
    ],
    n: [
        0xFFFFFFFF00000000, 0xFFFFFFFFFFFFFFFF,
        0xBCE6FAADA7179E84, 0xF3B9CAC2FC632551,
    ],
    gx: [
        0x6B17D1F2E12C4247, 0xF8BCE6E563A440F2,
        0x77037D812DEB33A0, 0xF4A13945D898C296,
    ],
    gy: [
        0x4FE342E2FE1A7F9B, 0x8EE7EB4A7C0F9E16,
        0x2BCE33576B315ECE, 0xCBB6406837BF51F5,
    ],
};

/// A short Weierstraß curve, with its group law.
#[derive(Clone, Debug)]
pub struct Curve {
    name: &'static str,
    p: Integer,
    a: Integer,
    b: Integer,
    n: Integer,
    g: Point,
}

impl Curve {

    /// Builds a curve from its parameters.
    ///
    /// The field modulus `p` must be odd and greater than 2; otherwise,
    /// `Error::InvalidModulus` is returned. Primality of `p` is not
    /// checked.
    pub fn new(params: &CurveParams) -> Result<Self> {
        let curve = Self::from_params(params);
        if curve.p.is_even() || !curve.p.gt_one() {
            debug!(curve = params.name, bits = curve.p.bit_length(),
                "rejected curve modulus");
            return Err(Error::InvalidModulus);
        }
        Ok(curve)
    }

    // Decodes a parameter bundle without validation.
    fn from_params(params: &CurveParams) -> Self {
        Self {
            name: params.name,
            p: Integer::from_w64be(&params.p),
            a: Integer::from_w64be(&params.a),
            b: Integer::from_w64be(&params.b),
            n: Integer::from_w64be(&params.n),
            g: Point::new(
                Integer::from_w64be(&params.gx),
                Integer::from_w64be(&params.gy)),
        }
    }

    /// Builds the secp256k1 curve.
    #[cfg(feature = "secp256k1")]
    #[inline]
    pub fn secp256k1() -> Self {
        Self::from_params(&SECP256K1)
    }

    /// Builds the NIST P-256 curve.
    #[cfg(feature = "p256")]
    #[inline]
    pub fn p256() -> Self {
        Self::from_params(&P256)
    }

    /// Gets the curve name.
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Gets the field modulus `p`.
    #[inline(always)]
    pub fn modulus(&self) -> &Integer {
        &self.p
    }

    /// Gets the order `n` of the generator.
    #[inline(always)]
    pub fn order(&self) -> &Integer {
        &self.n
    }

    /// Gets the conventional generator `G`.
    #[inline(always)]
    pub fn generator(&self) -> &Point {
        &self.g
    }

    // Reduces x into [0, p). The modulus is positive (checked in new()).
    #[inline]
    fn reduce(&self, x: &Integer) -> Integer {
        x % &self.p
    }

    // Inverts x modulo p; a non-invertible input yields zero. The modulus
    // is odd and greater than 2 (checked in new()), so inversion cannot
    // fail for any other reason.
    #[inline]
    fn invert(&self, x: &Integer) -> Integer {
        match x.mod_inverse(&self.p) {
            Ok(y) => y,
            Err(Error::NotInvertible) => Integer::zero(),
            Err(e) => unreachable!("modulus was validated: {}", e),
        }
    }

    // Computes the sum (or double) from the slope lambda.
    fn finish(&self, lambda: &Integer, p1: &Point, x2: &Integer) -> Point {
        let mut x3 = lambda.square();
        x3.set_sub(p1.x());
        x3.set_sub(x2);
        let x3 = self.reduce(&x3);

        let mut y3 = p1.x() - &x3;
        y3.set_mul(lambda);
        y3.set_sub(p1.y());
        let y3 = self.reduce(&y3);

        Point::new(x3, y3)
    }

    /// Adds two points.
    ///
    /// If the two points have the same x coordinate (modulo p), then the
    /// sum is either a doubling or the point-at-infinity, and
    /// `Error::DegenerateAddition` is returned; use `double()` for the
    /// former.
    pub fn add(&self, p1: &Point, p2: &Point) -> Result<Point> {
        let dx = self.reduce(&(p2.x() - p1.x()));
        if dx.is_zero() {
            debug!(curve = self.name, "degenerate point addition");
            return Err(Error::DegenerateAddition);
        }
        let mut lambda = p2.y() - p1.y();
        lambda.set_mul(&self.invert(&dx));
        let lambda = self.reduce(&lambda);
        Ok(self.finish(&lambda, p1, p2.x()))
    }

    /// Doubles a point.
    ///
    /// If `y` is zero modulo p, the true double is the point-at-infinity,
    /// which cannot be represented; the returned value is then
    /// unspecified and is NOT `2*P`. The current implementation, with
    /// the inverse of zero taken to be zero, returns `(-2*x mod p, 0)`;
    /// thus, `(0, 0)` maps to `(0, 0)`.
    pub fn double(&self, p1: &Point) -> Point {
        let mut num = p1.x().square();
        num.set_mul_small(3);
        num.set_add(&self.a);
        let mut den = p1.y().clone();
        den.set_shl(1);
        let den = self.reduce(&den);

        num.set_mul(&self.invert(&den));
        let lambda = self.reduce(&num);
        self.finish(&lambda, p1, p1.x())
    }

    /// Multiplies a point by a scalar `k`, with `1 <= k <= n`.
    ///
    /// A scalar out of that range is rejected with
    /// `Error::ScalarOutOfRange`. For `k = n` (and generally whenever the
    /// double-and-add chain reaches the point-at-infinity),
    /// `Error::DegenerateAddition` is returned.
    #[instrument(skip_all, name = "Curve::multiply", level = "debug")]
    pub fn multiply(&self, k: &Integer, point: &Point) -> Result<Point> {
        if k.is_zero() || k.is_negative() || k > &self.n {
            debug!(curve = self.name, bits = k.bit_length(),
                negative = k.is_negative(), "scalar out of range");
            return Err(Error::ScalarOutOfRange);
        }

        let bits = k.to_bits();
        let mut q = point.clone();
        for &bit in bits.iter().skip(1) {
            q = self.double(&q);
            if bit {
                q = self.add(&q, point)?;
            }
        }
        Ok(q)
    }

    /// Multiplies the conventional generator by a scalar `k`, with
    /// `1 <= k <= n`.
    #[inline]
    pub fn mulgen(&self, k: &Integer) -> Result<Point> {
        self.multiply(k, &self.g)
    }

    /// Returns the opposite of a point.
    pub fn neg(&self, p1: &Point) -> Point {
        let y = self.reduce(&-p1.y());
        Point::new(self.reduce(p1.x()), y)
    }

    /// Tests whether a point satisfies the curve equation (modulo p).
    pub fn is_on_curve(&self, p1: &Point) -> bool {
        let x = p1.x();
        let mut rhs = x.square();
        rhs.set_add(&self.a);
        rhs.set_mul(x);
        rhs.set_add(&self.b);
        rhs.set_sub(&p1.y().square());
        self.reduce(&rhs).is_zero()
    }

    /// Generates a uniformly random scalar in `[1, n)`.
    pub fn random_scalar<R: CryptoRng + RngCore>(&self, rng: &mut R)
        -> Integer
    {
        let nbits = self.n.bit_length();
        let len = ((nbits + 7) >> 3) as usize;
        let mut buf = alloc::vec![0u8; len];
        loop {
            rng.fill_bytes(&mut buf);
            let extra = (len as u32) * 8 - nbits;
            buf[0] &= 0xFFu8 >> extra;
            let k = Integer::from_bytes_be(&buf);
            if !k.is_zero() && k < self.n {
                return k;
            }
        }
    }
}
