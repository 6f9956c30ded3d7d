//! Arbitrary-precision decimal numbers.
//!
//! A [`Decimal`] is `coefficient / 10^scale`. Equality is numeric, so `54`
//! and `54.0` compare equal even though they keep their own scale for display.
//!
//! ```rust
//! use axion::Decimal;
//!
//! let d: Decimal = "123456789.0009".parse().unwrap();
//! assert_eq!(d.to_plain_string(), "123456789.0009");
//! assert_eq!(d.to_exponent_string(), "1.234567890009D8");
//! assert_eq!("1.234567890009d8".parse::<Decimal>().unwrap(), d);
//! ```

use crate::{Error, Result};
use num_bigint::{BigInt, Sign};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Largest scale or exponent magnitude accepted from untrusted input.
pub const MAX_SCALE: u32 = 100_000;

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

#[derive(Clone, Debug)]
pub struct Decimal {
    coefficient: BigInt,
    scale: u32,
}

impl Decimal {
    /// Creates `coefficient * 10^-scale`.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `scale` exceeds [`MAX_SCALE`].
    pub fn new(coefficient: impl Into<BigInt>, scale: u32) -> Result<Self> {
        if scale > MAX_SCALE {
            return Err(Error::argument(format!(
                "decimal scale {} exceeds {}",
                scale, MAX_SCALE
            )));
        }
        Ok(Decimal {
            coefficient: coefficient.into(),
            scale,
        })
    }

    fn integer(coefficient: BigInt) -> Self {
        Decimal {
            coefficient,
            scale: 0,
        }
    }

    #[must_use]
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficient.sign() == Sign::NoSign
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.coefficient.sign() == Sign::Minus
    }

    /// Drops trailing fractional zeros: `12.500` becomes `12.5`.
    #[must_use]
    pub fn normalized(&self) -> Decimal {
        let ten = BigInt::from(10u32);
        let mut coefficient = self.coefficient.clone();
        let mut scale = self.scale;
        if coefficient.sign() == Sign::NoSign {
            return Decimal::integer(coefficient);
        }
        while scale > 0 && (&coefficient % &ten).sign() == Sign::NoSign {
            coefficient /= &ten;
            scale -= 1;
        }
        Decimal { coefficient, scale }
    }

    fn rescaled(&self, scale: u32) -> BigInt {
        &self.coefficient * pow10(scale - self.scale)
    }

    /// Fixed-point rendering with a forced `.0` when there is no fractional part.
    ///
    /// ```rust
    /// use axion::Decimal;
    ///
    /// assert_eq!(Decimal::from(54).to_plain_string(), "54.0");
    /// assert_eq!(Decimal::new(-5, 3).unwrap().to_plain_string(), "-0.005");
    /// ```
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        let digits = self.coefficient.magnitude().to_str_radix(10);
        let sign = if self.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return format!("{}{}.0", sign, digits);
        }
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        format!("{}{}.{}", sign, int_part, frac_part)
    }

    /// Exponent rendering with `D` as the exponent marker: `d.dddDn`.
    #[must_use]
    pub fn to_exponent_string(&self) -> String {
        let normalized = self.normalized();
        if normalized.is_zero() {
            return "0.0D0".to_string();
        }
        let digits = normalized.coefficient.magnitude().to_str_radix(10);
        let sign = if normalized.is_negative() { "-" } else { "" };
        let exponent = digits.len() as i64 - 1 - i64::from(normalized.scale);
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        format!("{}{}.{}D{}", sign, lead, rest, exponent)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let scale = self.scale.max(other.scale);
        self.rescaled(scale) == other.rescaled(scale)
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.rescaled(scale).cmp(&other.rescaled(scale))
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalized();
        normalized.coefficient.hash(state);
        normalized.scale.hash(state);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Parses `-12.34`, `12.`, `12d0`, `1.5D-3` and similar forms.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::format(format!("'{}' is not a valid decimal", s));
        let (mantissa, exponent) = match s.find(['d', 'D']) {
            Some(pos) => {
                let exponent = s[pos + 1..].parse::<i64>().map_err(|_| invalid())?;
                (&s[..pos], exponent)
            }
            None => (s, 0),
        };
        let (negative, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (unsigned, ""),
        };
        if int_part.is_empty()
            || !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let digits = format!("{}{}", int_part, frac_part);
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let coefficient = if negative { -magnitude } else { magnitude };
        let scale = frac_part.len() as i64 - exponent;
        if scale.unsigned_abs() > u64::from(MAX_SCALE) {
            return Err(Error::format(format!("exponent of '{}' is out of range", s)));
        }
        if scale >= 0 {
            let scale = u32::try_from(scale).map_err(|_| invalid())?;
            Decimal::new(coefficient, scale)
        } else {
            let shift = u32::try_from(-scale).map_err(|_| invalid())?;
            Ok(Decimal::integer(coefficient * pow10(shift)))
        }
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::integer(BigInt::from(value))
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal::integer(BigInt::from(value))
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_bounded() {
        assert!(Decimal::new(1, MAX_SCALE).is_ok());
        assert!(matches!(Decimal::new(1, MAX_SCALE + 1), Err(Error::Argument(_))));
        assert!(Decimal::new(1, 200_000).is_err());
    }

    #[test]
    fn test_numeric_equality_ignores_scale() {
        assert_eq!(Decimal::from(54), "54.0".parse::<Decimal>().unwrap());
        assert_eq!(Decimal::new(1250, 3).unwrap(), Decimal::new(125, 2).unwrap());
        assert_ne!(Decimal::new(125, 2).unwrap(), Decimal::new(125, 3).unwrap());
    }

    #[test]
    fn test_plain_rendering() {
        assert_eq!(Decimal::new(12345, 2).unwrap().to_plain_string(), "123.45");
        assert_eq!(Decimal::new(5, 1).unwrap().to_plain_string(), "0.5");
        assert_eq!(Decimal::new(0, 0).unwrap().to_plain_string(), "0.0");
    }

    #[test]
    fn test_exponent_rendering() {
        assert_eq!(Decimal::from(5).to_exponent_string(), "5.0D0");
        assert_eq!(Decimal::new(-15, 4).unwrap().to_exponent_string(), "-1.5D-3");
        assert_eq!(Decimal::from(0).to_exponent_string(), "0.0D0");
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("12.".parse::<Decimal>().unwrap(), Decimal::from(12));
        assert_eq!("-1.5D-3".parse::<Decimal>().unwrap(), Decimal::new(-15, 4).unwrap());
        assert_eq!("2d3".parse::<Decimal>().unwrap(), Decimal::from(2000));
        assert!("abc".parse::<Decimal>().is_err());
        assert!(".5".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |d: &Decimal| {
            let mut hasher = DefaultHasher::new();
            d.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&Decimal::new(10, 1).unwrap()), hash(&Decimal::from(1)));
    }

    #[test]
    fn test_exponent_out_of_range() {
        assert!("1d999999999".parse::<Decimal>().is_err());
        assert!("1d-999999999".parse::<Decimal>().is_err());
        assert_eq!("1d5".parse::<Decimal>().unwrap(), Decimal::from(100_000));
    }
}
