// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 128-bit base-10 decimal.
//!
//! [`Decimal`] holds a 96-bit magnitude, a sign and a power-of-ten scale
//! between 0 and 28. It occupies 16 bytes so that it fits the same inline
//! payload as the other wide primitive kinds.
//!
//! Equality is numeric: `1.0` and `1.00` are equal and hash identically,
//! but each keeps its own scale for display.

use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::error::ParseError;
use crate::kind::PrimitiveKind;

/// Largest supported scale.
pub const MAX_SCALE: u8 = 28;

/// Exclusive upper bound of the mantissa magnitude (2^96).
const MANTISSA_LIMIT: u128 = 1 << 96;

/// A 128-bit decimal number.
///
/// # Example
///
/// ```rust
/// use understory_flex::Decimal;
///
/// let price: Decimal = "19.90".parse().unwrap();
/// assert_eq!(price.mantissa(), 1990);
/// assert_eq!(price.scale(), 2);
/// assert_eq!(price.to_string(), "19.90");
///
/// let same: Decimal = "19.9".parse().unwrap();
/// assert_eq!(price, same);
/// assert!(price < "20".parse().unwrap());
/// ```
#[derive(Copy, Clone, Default)]
pub struct Decimal {
    lo: u64,
    hi: u32,
    scale: u8,
    negative: bool,
}

impl Decimal {
    /// Zero.
    pub const ZERO: Self = Self {
        lo: 0,
        hi: 0,
        scale: 0,
        negative: false,
    };

    /// One.
    pub const ONE: Self = Self {
        lo: 1,
        hi: 0,
        scale: 0,
        negative: false,
    };

    /// Creates a decimal equal to `mantissa * 10^-scale`.
    ///
    /// Returns `None` if the magnitude does not fit in 96 bits or the scale
    /// exceeds [`MAX_SCALE`].
    #[must_use]
    pub fn try_new(mantissa: i128, scale: u8) -> Option<Self> {
        let magnitude = mantissa.unsigned_abs();
        if magnitude >= MANTISSA_LIMIT || scale > MAX_SCALE {
            return None;
        }
        #[expect(clippy::cast_possible_truncation, reason = "magnitude < 2^96")]
        let value = Self {
            lo: magnitude as u64,
            hi: (magnitude >> 64) as u32,
            scale,
            negative: mantissa < 0,
        };
        Some(value)
    }

    /// Returns the signed mantissa.
    #[must_use]
    pub fn mantissa(self) -> i128 {
        let magnitude = self.magnitude() as i128;
        if self.negative { -magnitude } else { magnitude }
    }

    /// Returns the scale (number of fractional digits).
    #[must_use]
    #[inline]
    pub fn scale(self) -> u8 {
        self.scale
    }

    /// Returns `true` if this decimal is zero, whatever its scale.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Returns `true` if this decimal is strictly negative.
    #[must_use]
    pub fn is_sign_negative(self) -> bool {
        self.negative
    }

    /// Returns the same value with trailing fractional zeros removed.
    #[must_use]
    pub fn normalize(self) -> Self {
        let mut mantissa = self.mantissa();
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        // Removing zeros only shrinks the magnitude.
        Self::try_new(mantissa, scale).unwrap_or(self)
    }

    fn magnitude(self) -> u128 {
        (u128::from(self.hi) << 64) | u128::from(self.lo)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        let magnitude = value.unsigned_abs();
        Self {
            lo: magnitude,
            hi: 0,
            scale: 0,
            negative: value < 0,
        }
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self {
            lo: value,
            hi: 0,
            scale: 0,
            negative: false,
        }
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalize();
        normalized.mantissa().hash(state);
        normalized.scale.hash(state);
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.mantissa(), other.mantissa());
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => a.cmp(&b),
            Ordering::Less => cmp_rescaled(a, other.scale - self.scale, b),
            Ordering::Greater => cmp_rescaled(b, self.scale - other.scale, a).reverse(),
        }
    }
}

/// Compares `small * 10^shift` against `other`.
///
/// When the multiplication overflows, `small` is non-zero and its magnitude
/// after rescaling exceeds any 96-bit mantissa, so its sign decides.
fn cmp_rescaled(small: i128, shift: u8, other: i128) -> Ordering {
    match 10_i128
        .checked_pow(u32::from(shift))
        .and_then(|factor| small.checked_mul(factor))
    {
        Some(scaled) => scaled.cmp(&other),
        None if small < 0 => Ordering::Less,
        None => Ordering::Greater,
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = usize::from(self.scale);
        let digits = self.magnitude().to_string();
        let digits = if digits.len() <= scale {
            let mut padded = String::with_capacity(scale + 1);
            padded.extend(core::iter::repeat_n('0', scale + 1 - digits.len()));
            padded.push_str(&digits);
            padded
        } else {
            digits
        };
        if self.negative {
            f.write_str("-")?;
        }
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        f.write_str(int_part)?;
        if scale > 0 {
            f.write_str(".")?;
            f.write_str(frac_part)?;
        }
        Ok(())
    }
}

impl FromStr for Decimal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::new(PrimitiveKind::Decimal, s);

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        let scale = u8::try_from(frac_part.len())
            .ok()
            .filter(|scale| *scale <= MAX_SCALE)
            .ok_or_else(err)?;

        let mut magnitude: u128 = 0;
        for byte in int_part.bytes().chain(frac_part.bytes()) {
            if !byte.is_ascii_digit() {
                return Err(err());
            }
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u128::from(byte - b'0')))
                .filter(|m| *m < MANTISSA_LIMIT)
                .ok_or_else(err)?;
        }

        let mantissa = magnitude as i128;
        Self::try_new(if negative { -mantissa } else { mantissa }, scale).ok_or_else(err)
    }
}
