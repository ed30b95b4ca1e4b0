use num::{BigUint, Integer, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::math::int::Int;

/// Number of fractional digits carried by [`Dec`]
pub const PRECISION: u32 = 18;

fn precision_multiplier() -> BigUint {
    BigUint::from(10u32).pow(PRECISION)
}

/// Drop `PRECISION` digits and round the remainder half-to-even.
fn chop_precision_and_round(value: &BigUint) -> BigUint {
    let one = precision_multiplier();
    let (quo, rem) = value.div_rem(&one);
    if rem.is_zero() {
        return quo;
    }

    let half = one / 2u32;
    match rem.cmp(&half) {
        Ordering::Less => quo,
        Ordering::Greater => quo + 1u32,
        Ordering::Equal => {
            if quo.is_even() {
                quo
            } else {
                quo + 1u32
            }
        }
    }
}

/// Non-negative fixed-point decimal with 18 fractional digits.
///
/// Arithmetic follows the ledger's own decimal type so that snapshots agree
/// with on-chain numbers: products and quotients are computed exactly and
/// then rounded half-to-even back to 18 digits.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigUint);

impl Dec {
    pub fn zero() -> Self {
        Dec(BigUint::zero())
    }

    pub fn one() -> Self {
        Dec(precision_multiplier())
    }

    pub fn from_int(value: &Int) -> Self {
        Dec(value.as_biguint() * precision_multiplier())
    }

    /// `value * 10^-prec`, e.g. `new_with_prec(1251, 4)` is 0.1251
    pub fn new_with_prec(value: u64, prec: u32) -> Result<Self, CoreError> {
        if prec > PRECISION {
            return Err(CoreError::InvalidDec(format!(
                "precision {} exceeds {}",
                prec, PRECISION
            )));
        }
        Ok(Dec(BigUint::from(value) * BigUint::from(10u32).pow(PRECISION - prec)))
    }

    /// Basis points, e.g. `from_bps(100)` is 0.01
    pub fn from_bps(bps: u64) -> Self {
        Dec(BigUint::from(bps) * BigUint::from(10u32).pow(PRECISION - 4))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn mul(&self, other: &Dec) -> Dec {
        Dec(chop_precision_and_round(&(&self.0 * &other.0)))
    }

    /// Multiply by an integer; exact, no rounding involved
    pub fn mul_int(&self, other: &Int) -> Dec {
        Dec(&self.0 * other.as_biguint())
    }

    pub fn quo(&self, other: &Dec) -> Result<Dec, CoreError> {
        if other.is_zero() {
            return Err(CoreError::DivisionByZero);
        }
        let one = precision_multiplier();
        let scaled = &self.0 * &one * &one;
        Ok(Dec(chop_precision_and_round(&(scaled / &other.0))))
    }

    pub fn power(&self, exp: u32) -> Dec {
        (0..exp).fold(Dec::one(), |acc, _| acc.mul(self))
    }

    /// Round to the nearest integer, ties to even
    pub fn round_int(&self) -> Int {
        Int::from_biguint(chop_precision_and_round(&self.0))
    }
}

impl FromStr for Dec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidDec(s.to_string());

        let (int_part, frac_part) = match s.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(invalid());
                }
                (int_part, frac_part)
            }
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }
        if frac_part.len() > PRECISION as usize {
            return Err(invalid());
        }

        let padding = "0".repeat(PRECISION as usize - frac_part.len());
        let combined = format!("{}{}{}", int_part, frac_part, padding);
        BigUint::from_str(&combined).map(Dec).map_err(|_| invalid())
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let width = PRECISION as usize + 1;
        let padded = if digits.len() < width {
            format!("{}{}", "0".repeat(width - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - PRECISION as usize);
        write!(f, "{}.{}", int_part, frac_part)
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({})", self)
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        String::deserialize(de)?.parse().map_err(de::Error::custom)
    }
}
