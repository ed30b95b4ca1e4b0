use num::{BigUint, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::CoreError;
use crate::math::dec::Dec;

/// Non-negative arbitrary-precision integer token amount.
///
/// Rendered in JSON as a string of decimal digits.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(BigUint);

impl Int {
    pub fn zero() -> Self {
        Int(BigUint::zero())
    }

    pub fn new(value: u64) -> Self {
        Int(BigUint::from(value))
    }

    pub fn from_biguint(value: BigUint) -> Self {
        Int(value)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, returning `None` if the result would be negative
    pub fn checked_sub(&self, other: &Int) -> Option<Int> {
        if self.0 < other.0 {
            None
        } else {
            Some(Int(&self.0 - &other.0))
        }
    }

    /// Convert to a decimal with the same value
    pub fn to_dec(&self) -> Dec {
        Dec::from_int(self)
    }
}

impl From<u64> for Int {
    fn from(value: u64) -> Self {
        Int::new(value)
    }
}

impl Add for Int {
    type Output = Int;

    fn add(self, rhs: Int) -> Int {
        Int(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Int> for &'a Int {
    type Output = Int;

    fn add(self, rhs: &'a Int) -> Int {
        Int(&self.0 + &rhs.0)
    }
}

impl AddAssign<&Int> for Int {
    fn add_assign(&mut self, rhs: &Int) {
        self.0 += &rhs.0;
    }
}

impl std::iter::Sum for Int {
    fn sum<I: Iterator<Item = Int>>(iter: I) -> Int {
        iter.fold(Int::zero(), |acc, x| acc + x)
    }
}

impl FromStr for Int {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidInt(s.to_string()));
        }
        BigUint::from_str(s)
            .map(Int)
            .map_err(|_| CoreError::InvalidInt(s.to_string()))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int({})", self.0)
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        String::deserialize(de)?.parse().map_err(de::Error::custom)
    }
}
