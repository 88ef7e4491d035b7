// Conversions from and to strings, bytes and bits.
//
// Limbs are 26 bits wide, while hexadecimal digits and bytes naturally
// come in groups of 24 bits (6 hex digits, or 3 bytes). Conversions
// therefore move 24-bit groups across limb boundaries: each group is
// OR-ed into the current limb at some bit offset, with its overflow
// going into the next limb; the offset advances by 24 bits per group,
// i.e. it falls back by 2 bits each time a limb boundary is crossed.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use super::Integer;
use crate::backend::{LIMB_BITS, LIMB_MASK};
use crate::{Error, Result};

// Inserts a 24-bit group w at bit offset `off` of limb `j`, then
// advances the position by 24 bits.
#[inline]
fn push_group(limbs: &mut [u32], j: &mut usize, off: &mut u32, w: u32) {
    let w = w as u64;
    limbs[*j] |= ((w << *off) as u32) & LIMB_MASK;
    limbs[*j + 1] |= ((w >> (LIMB_BITS - *off)) as u32) & LIMB_MASK;
    *off += 24;
    if *off >= LIMB_BITS {
        *off -= LIMB_BITS;
        *j += 1;
    }
}

impl Integer {

    /// Parses an integer from a string in the provided base.
    ///
    /// Supported bases are 2 to 16 (inclusive); digits above 9 use
    /// letters (case-insensitive). An optional leading `-` makes the
    /// value negative. Whitespace is ignored everywhere, so that long
    /// constants may be written in groups (e.g.
    /// `"a89c e5af8724 c0a23e0e"`).
    pub fn parse(s: &str, base: u32) -> Result<Self> {
        if !(2..=16).contains(&base) {
            return Err(Error::InvalidBase(base));
        }

        let mut chars = s.chars().filter(|c| !c.is_whitespace()).peekable();
        let neg = chars.next_if_eq(&'-').is_some();
        let mut digits = Vec::with_capacity(s.len());
        for ch in chars {
            match ch.to_digit(base) {
                Some(d) => digits.push(d),
                None => return Err(Error::InvalidDigit { ch, base }),
            }
        }
        if digits.is_empty() {
            return Err(Error::NoDigits);
        }

        let mut r = if base == 16 {
            Self::parse_hex_digits(&digits)
        } else {
            Self::parse_base_digits(&digits, base)
        };
        r.neg = neg;
        r.normalize();
        Ok(r)
    }

    /// Parses an integer from a hexadecimal string; this is equivalent
    /// to `Integer::parse(s, 16)`.
    #[inline]
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::parse(s, 16)
    }

    // Hexadecimal digits are consumed by chunks of six, starting from the
    // least significant end.
    fn parse_hex_digits(digits: &[u32]) -> Self {
        let mut limbs = vec![0u32; (digits.len() + 5) / 6 + 1];
        let mut j = 0;
        let mut off = 0;
        for chunk in digits.rchunks(6) {
            let w = chunk.iter().fold(0, |w, &d| (w << 4) | d);
            push_group(&mut limbs, &mut j, &mut off, w);
        }
        Self::from_raw(false, limbs)
    }

    // Other bases: digits are accumulated into a small word until the
    // corresponding multiplier exceeds 2^20, then the word is folded into
    // the total with a multiply-and-add.
    fn parse_base_digits(digits: &[u32], base: u32) -> Self {
        let mut r = Self::zero();
        let mut w = 0u32;
        let mut q = 1u32;
        for &d in digits {
            w = w * base + d;
            q *= base;
            if q > 0xFFFFF {
                r.set_mul_small(q);
                r.set_add(&Self::from(w));
                w = 0;
                q = 1;
            }
        }
        if q != 1 {
            r.set_mul_small(q);
            r.set_add(&Self::from(w));
        }
        r
    }

    /// Decodes a non-negative integer from bytes (unsigned big-endian
    /// convention). An empty slice yields zero.
    pub fn from_bytes_be(buf: &[u8]) -> Self {
        let mut limbs = vec![0u32; (buf.len() + 2) / 3 + 1];
        let mut j = 0;
        let mut off = 0;
        for chunk in buf.rchunks(3) {
            let w = chunk.iter().fold(0u32, |w, &b| (w << 8) | (b as u32));
            push_group(&mut limbs, &mut j, &mut off, w);
        }
        Self::from_raw(false, limbs)
    }

    /// Decodes a non-negative integer from 64-bit words, most significant
    /// word first.
    pub fn from_w64be(words: &[u64]) -> Self {
        let mut buf = Vec::with_capacity(words.len() * 8);
        for w in words {
            buf.extend_from_slice(&w.to_be_bytes());
        }
        Self::from_bytes_be(&buf)
    }

    /// Encodes the absolute value of this integer into bytes (unsigned
    /// big-endian convention), with minimal length; zero is encoded over
    /// a single byte of value 0.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.limbs.len() * 4);
        let mut acc = 0u64;
        let mut acc_len = 0;
        for &w in self.limbs.iter() {
            acc |= (w as u64) << acc_len;
            acc_len += LIMB_BITS;
            while acc_len >= 8 {
                buf.push(acc as u8);
                acc >>= 8;
                acc_len -= 8;
            }
        }
        if acc_len > 0 {
            buf.push(acc as u8);
        }
        while buf.len() > 1 && buf[buf.len() - 1] == 0 {
            buf.pop();
        }
        buf.reverse();
        buf
    }

    /// Returns the bits of the absolute value of this integer, most
    /// significant first. The top bit is always set; zero yields an
    /// empty vector.
    pub fn to_bits(&self) -> Vec<bool> {
        (0..self.bit_length()).rev().map(|i| self.test_bit(i)).collect()
    }

    /// Formats this integer in the provided base (only 10 and 16 are
    /// supported). Hexadecimal output is lowercase.
    pub fn to_string_radix(&self, base: u32) -> Result<String> {
        match base {
            10 => Ok(alloc::format!("{}", self)),
            16 => Ok(alloc::format!("{:x}", self)),
            _ => Err(Error::InvalidBase(base)),
        }
    }

    // Splits the absolute value into 24-bit groups (least significant
    // first), with the most significant zero groups removed; there is
    // always at least one group.
    fn hex_groups(&self) -> Vec<u32> {
        let mut groups = Vec::with_capacity(self.limbs.len() + 1);
        let mut acc = 0u64;
        let mut acc_len = 0;
        for &w in self.limbs.iter() {
            acc |= (w as u64) << acc_len;
            acc_len += LIMB_BITS;
            while acc_len >= 24 {
                groups.push((acc as u32) & 0xFFFFFF);
                acc >>= 24;
                acc_len -= 24;
            }
        }
        if acc_len > 0 {
            groups.push(acc as u32);
        }
        while groups.len() > 1 && groups[groups.len() - 1] == 0 {
            groups.pop();
        }
        groups
    }

    fn fmt_hex(&self, f: &mut fmt::Formatter<'_>, upper: bool)
        -> fmt::Result
    {
        let groups = self.hex_groups();
        let mut s = String::with_capacity(groups.len() * 6);
        for (i, &g) in groups.iter().rev().enumerate() {
            let d = match (i == 0, upper) {
                (true, false) => alloc::format!("{:x}", g),
                (true, true) => alloc::format!("{:X}", g),
                (false, false) => alloc::format!("{:06x}", g),
                (false, true) => alloc::format!("{:06X}", g),
            };
            s.push_str(&d);
        }
        f.pad_integral(!self.neg, "0x", &s)
    }
}

impl FromStr for Integer {
    type Err = Error;

    /// Parses a decimal integer.
    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, 10)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut c = self.abs();
        let mut chunks = Vec::new();
        loop {
            chunks.push(c.set_div_small(1_000_000));
            if c.is_zero() {
                break;
            }
        }
        let mut s = String::with_capacity(chunks.len() * 6);
        for (i, &d) in chunks.iter().rev().enumerate() {
            if i == 0 {
                s.push_str(&alloc::format!("{}", d));
            } else {
                s.push_str(&alloc::format!("{:06}", d));
            }
        }
        f.pad_integral(!self.neg, "", &s)
    }
}

impl fmt::LowerHex for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_hex(f, false)
    }
}

impl fmt::UpperHex for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_hex(f, true)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({:#x})", self)
    }
}

#[cfg(test)]
mod tests {

    use super::super::Integer;
    use crate::Error;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    #[test]
    fn parse_vectors() {
        assert_eq!(Integer::from(12345u32).to_string_radix(16).unwrap(),
            "3039");
        assert_eq!(Integer::from(0x4123456u32).to_string_radix(16).unwrap(),
            "4123456");
        let x = Integer::parse("29048849665247", 10).unwrap();
        assert_eq!(x.to_string_radix(16).unwrap(), "1a6b765d8cdf");
        let x = Integer::parse("-29048849665247", 10).unwrap();
        assert_eq!(x.to_string_radix(16).unwrap(), "-1a6b765d8cdf");
        assert_eq!(x.to_string(), "-29048849665247");

        let x = Integer::parse("  a89c e5af8724 c0a23e0e 0ff77500  ", 16)
            .unwrap();
        assert_eq!(format!("{:x}", x), "a89ce5af8724c0a23e0e0ff77500");

        let s = "123456789abcdef123456789abcdef123456789abcdef123456789abcdef";
        let x = Integer::parse(s, 16).unwrap();
        assert_eq!(format!("{:x}", x), s);
        assert_eq!(format!("{:X}", x), s.to_uppercase());
        assert_eq!(Integer::from_hex("ABCDEF").unwrap(),
            Integer::from(0xabcdefu32));

        assert_eq!(Integer::parse("-0", 10).unwrap(), Integer::zero());
        assert!(!Integer::parse("-000", 16).unwrap().is_negative());
        assert_eq!(Integer::parse("101101", 2).unwrap(), Integer::from(45u32));
        assert_eq!(Integer::parse("-777", 8).unwrap(), Integer::from(-511i32));
        assert_eq!("1000000000000".parse::<Integer>().unwrap(),
            Integer::from(1_000_000_000_000u64));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Integer::parse("10", 1), Err(Error::InvalidBase(1)));
        assert_eq!(Integer::parse("10", 17), Err(Error::InvalidBase(17)));
        assert_eq!(Integer::parse("", 10), Err(Error::NoDigits));
        assert_eq!(Integer::parse("-", 10), Err(Error::NoDigits));
        assert_eq!(Integer::parse("  ", 16), Err(Error::NoDigits));
        assert_eq!(Integer::parse("12a", 10),
            Err(Error::InvalidDigit { ch: 'a', base: 10 }));
        assert_eq!(Integer::parse("1-2", 10),
            Err(Error::InvalidDigit { ch: '-', base: 10 }));
        assert_eq!(Integer::parse("0x12", 16),
            Err(Error::InvalidDigit { ch: 'x', base: 16 }));
        assert_eq!(Integer::from(5u32).to_string_radix(8),
            Err(Error::InvalidBase(8)));
        assert!("abc".parse::<Integer>().is_err());
    }

    #[test]
    fn bytes() {
        assert_eq!(format!("{:x}", Integer::from_bytes_be(&[1, 2, 3])),
            "10203");
        assert_eq!(format!("{:x}", Integer::from_bytes_be(&[1, 2, 3, 4])),
            "1020304");
        assert_eq!(format!("{:x}", Integer::from_bytes_be(&[1, 2, 3, 4, 5])),
            "102030405");
        assert_eq!(format!("{:x}",
            Integer::from_bytes_be(&[1, 2, 3, 4, 5, 6, 7, 8])),
            "102030405060708");
        assert_eq!(Integer::from_bytes_be(&[]), Integer::zero());
        assert_eq!(Integer::from_bytes_be(&[0, 0, 0, 0]), Integer::zero());

        assert_eq!(Integer::zero().to_bytes_be(), vec![0u8]);
        assert_eq!(Integer::from(0x10203u32).to_bytes_be(), vec![1u8, 2, 3]);
        assert_eq!(Integer::from(-0x1ffi32).to_bytes_be(), vec![1u8, 0xff]);

        let x = Integer::from_w64be(&[0x0123456789ABCDEF, 0xFEDCBA9876543210]);
        assert_eq!(format!("{:x}", x), "123456789abcdeffedcba9876543210");
        assert_eq!(Integer::from_w64be(&[0, 7]), Integer::from(7u32));
    }

    #[test]
    fn bits() {
        assert_eq!(Integer::zero().to_bits(), Vec::<bool>::new());
        assert_eq!(Integer::one().to_bits(), vec![true]);
        assert_eq!(Integer::from(0xfeu32).to_bits(),
            vec![true, true, true, true, true, true, true, false]);
        assert_eq!(Integer::from(-5i32).to_bits(), vec![true, false, true]);
        let x = Integer::one() << 100;
        let b = x.to_bits();
        assert_eq!(b.len(), 101);
        assert!(b[0]);
        assert!(b[1..].iter().all(|&v| !v));
    }

    #[test]
    fn formatting() {
        assert_eq!(Integer::zero().to_string(), "0");
        assert_eq!(format!("{:x}", Integer::zero()), "0");
        assert_eq!(Integer::from(1_000_000u32).to_string(), "1000000");
        assert_eq!(Integer::from(-1_000_001i64).to_string(), "-1000001");
        assert_eq!(Integer::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(format!("{:#x}", Integer::from(255u32)), "0xff");
        assert_eq!(format!("{:x}", Integer::from(-255i32)), "-ff");
        assert_eq!(format!("{:>6}", Integer::from(42u32)), "    42");
        assert_eq!(format!("{:?}", Integer::from(-16i32)), "Integer(-0x10)");

        // Zero groups below the top one are padded.
        let x = Integer::one() << 48;
        assert_eq!(format!("{:x}", x), "1000000000000");
        let x = Integer::one() << 52;
        assert_eq!(format!("{:x}", x), "10000000000000");
    }

    #[test]
    fn against_bigint() {
        let mut sh = Sha256::new();
        for i in 0..200u64 {
            sh.update(i.to_le_bytes());
            let mut buf: Vec<u8> = sh.finalize_reset().to_vec();
            buf.truncate(1 + (i as usize % 32));
            let zx = BigInt::from_bytes_be(
                if (i & 1) != 0 { Sign::Minus } else { Sign::Plus }, &buf);
            let mut x = Integer::from_bytes_be(&buf);
            if (i & 1) != 0 {
                x.set_neg();
            }

            assert_eq!(x.to_string(), zx.to_string());
            assert_eq!(format!("{:x}", x), format!("{:x}", zx));
            assert_eq!(Integer::parse(&zx.to_string(), 10).unwrap(), x);
            assert_eq!(Integer::parse(&zx.to_str_radix(7), 7).unwrap(), x);
            assert_eq!(Integer::parse(&format!("{:x}", zx), 16).unwrap(), x);
            assert_eq!(x.to_bytes_be(), zx.magnitude().to_bytes_be());
            assert_eq!(Integer::from_bytes_be(&x.to_bytes_be()), x.abs());
        }
    }
}
