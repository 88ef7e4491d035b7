//! Wbig is a small library for multi-precision integer arithmetic and
//! affine elliptic-curve computations over short Weierstraß curves.
//!
//! The `bigint` module implements the `Integer` type: a signed,
//! arbitrary-size integer stored as a sign flag and a sequence of 26-bit
//! limbs. It supports addition, subtraction, multiplication, shifts,
//! division with remainder, modular inversion (extended binary GCD), and
//! conversions from and to decimal and hexadecimal strings, big-endian
//! bytes and native integers.
//!
//! The `point` and `curve` modules build on top of `Integer` to provide
//! the group law of curves with equation `y^2 = x^3 + a*x + b` over a
//! prime field: point addition, point doubling, and scalar multiplication
//! with the double-and-add method. Named parameter bundles are provided
//! for secp256k1 and P-256.
//!
//! # Conventions
//!
//! Throughout the code, functions that modify the object on which they
//! are called have a name in `set_*()` (e.g. `x.set_add(&y)` adds `y` to
//! `x` in place, while `&x + &y` leaves `x` unmodified and returns the
//! sum as a new instance). Usual arithmetic operators are implemented for
//! both `Integer` values and references; division and remainder by zero
//! through the `/` and `%` operators panic, exactly like native integers,
//! while the `checked_*()` and `div_rem()` functions report an `Error`.
//!
//! Points are plain affine coordinate pairs; there is no representation
//! of the point-at-infinity. Consequently, curve additions whose result
//! would be undefined in affine coordinates (adding a point to itself or
//! to its opposite) are reported as `Error::DegenerateAddition`.
//!
//! Nothing in this library is constant-time. It is meant for research,
//! testing and educational use, and MUST NOT be used to handle secret
//! values where timing side channels are a concern.
//!
//! # Usage
//!
//! The library is `no_std` (it still requires `alloc`). By default, it
//! compiles against the standard library (feature `std`).

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub use rand_core::{CryptoRng, RngCore};

pub mod backend;
pub mod bigint;
pub mod point;
pub mod curve;

pub use bigint::{DivMode, DivRem, Integer};
pub use point::Point;
pub use curve::{Curve, CurveParams};

#[cfg(feature = "secp256k1")]
pub use curve::SECP256K1;

#[cfg(feature = "p256")]
pub use curve::P256;

/// Errors reported by integer and curve operations.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("unsupported base: {0}")]
    InvalidBase(u32),
    #[error("no digits to parse")]
    NoDigits,
    #[error("invalid digit {ch:?} for base {base}")]
    InvalidDigit { ch: char, base: u32 },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulus must be odd and positive")]
    InvalidModulus,
    #[error("value is not invertible modulo the provided modulus")]
    NotInvertible,
    #[error("scalar out of range")]
    ScalarOutOfRange,
    #[error("degenerate point addition (equal x coordinates)")]
    DegenerateAddition,
}

/// Result type for fallible operations of this crate.
pub type Result<T> = core::result::Result<T, Error>;
