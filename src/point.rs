//! Affine curve points.
//!
//! A `Point` is a plain pair of coordinates `(x, y)`. It is not bound to
//! a specific curve, and there is no representation of the
//! point-at-infinity: the group law is implemented by `Curve`, which
//! validates its inputs where the affine formulas are undefined.
//!
//! Points are immutable once built; curve operations always return new
//! instances. Equality is coordinate-wise, on the exact integer values
//! (coordinates are not reduced modulo any field prime).

use core::fmt;

use crate::{Integer, Result};

/// An affine point, as a pair of integer coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    x: Integer,
    y: Integer,
}

impl Point {

    /// Creates a point from its coordinates.
    pub fn new(x: Integer, y: Integer) -> Self {
        Self { x, y }
    }

    /// Creates a point from its coordinates, provided as hexadecimal
    /// strings (whitespace is ignored).
    pub fn from_hex(x: &str, y: &str) -> Result<Self> {
        Ok(Self::new(Integer::from_hex(x)?, Integer::from_hex(y)?))
    }

    /// Gets the x coordinate.
    #[inline(always)]
    pub fn x(&self) -> &Integer {
        &self.x
    }

    /// Gets the y coordinate.
    #[inline(always)]
    pub fn y(&self) -> &Integer {
        &self.y
    }

    /// Consumes this point and returns its coordinates.
    #[inline]
    pub fn into_coordinates(self) -> (Integer, Integer) {
        (self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:x}, {:x})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {

    use super::Point;
    use crate::{Error, Integer};
    use alloc::string::ToString;

    #[test]
    fn build() {
        let p = Point::from_hex("ff", "0").unwrap();
        assert_eq!(p.x(), &Integer::from(255u32));
        assert!(p.y().is_zero());

        let q = Point::new(Integer::from(255u32), Integer::zero());
        assert_eq!(p, q);
        let r = Point::from_hex("ff", "1").unwrap();
        assert_ne!(p, r);
        assert_ne!(Point::from_hex("1", "ff").unwrap(), p);

        assert_eq!(Point::from_hex("fg", "0"),
            Err(Error::InvalidDigit { ch: 'g', base: 16 }));
        assert_eq!(Point::from_hex("1", ""), Err(Error::NoDigits));

        let (x, y) = r.into_coordinates();
        assert_eq!(x, Integer::from(255u32));
        assert_eq!(y, Integer::one());
    }

    #[test]
    fn display() {
        let p = Point::from_hex("aa", "bb").unwrap();
        assert_eq!(p.to_string(), "(aa, bb)");
        let p = Point::new(Integer::from(-1i32), Integer::from(0x1000000u32));
        assert_eq!(p.to_string(), "(-1, 1000000)");
    }

    #[test]
    fn clone_is_deep() {
        let p = Point::from_hex(
            "79BE667E F9DCBBAC 55A06295 CE870B07 029BFCDB 2DCE28D9 59F2815B 16F81798",
            "483ADA77 26A3C465 5DA4FBFC 0E1108A8 FD17B448 A6855419 9C47D08F FB10D4B8")
            .unwrap();
        let q = p.clone();
        let (mut x, y) = p.into_coordinates();
        x.set_add(&Integer::one());
        assert_ne!(&x, q.x());
        assert_eq!(&y, q.y());
    }
}
