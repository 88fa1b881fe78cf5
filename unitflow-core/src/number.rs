//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for decimal arithmetic. Values are stored with
//! unlimited precision, so addition, subtraction and multiplication are exact.
//! Only division works at a bounded precision, and only the final rounding
//! step leaves the decimal world.

use std::fmt;

use dashu_float::DBig;
use dashu_int::IBig;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Non-finite value: {0}")]
    NonFinite(f64),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Minimum significant decimal digits kept by a non-terminating division
const WORK_PRECISION: usize = 50;

/// Arbitrary precision decimal number
///
/// Every stored value has unlimited precision (dashu precision 0). Mixing a
/// bounded operand into add/sub/mul would round the result, so nothing
/// bounded is ever stored.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Widen a DBig to unlimited precision; never rounds
    fn exact(val: DBig) -> DBig {
        val.with_precision(0).value()
    }

    /// Bounded copy of an operand for division
    fn for_division(val: &DBig, precision: usize) -> DBig {
        val.clone().with_precision(precision).value()
    }

    /// Create from string representation
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Handle rational format "a/b"
        if let Some((num_str, den_str)) = s.split_once('/') {
            let num: DBig = num_str.trim().parse()
                .map_err(|_| NumberError::ParseError(s.to_string()))?;
            let den: DBig = den_str.trim().parse()
                .map_err(|_| NumberError::ParseError(s.to_string()))?;

            return Self { inner: Self::exact(num) }
                .checked_div(&Self { inner: Self::exact(den) });
        }

        // Scientific notation: "602214076e15", "1.5e-3"
        if let Some((mantissa, exp)) = s.to_lowercase().split_once('e') {
            let mantissa = Self::from_str(mantissa)?;
            let exp: isize = exp.parse()
                .map_err(|_| NumberError::ParseError(s.to_string()))?;
            return Ok(mantissa.mul(&Self::from_scaled(1, exp)));
        }

        let inner: DBig = s.parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self { inner: Self::exact(inner) })
    }

    /// Create from i64
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::exact(DBig::from(n)) }
    }

    /// Exact `significand * 10^exponent`, e.g. `from_scaled(36, -1)` is 3.6
    pub fn from_scaled(significand: i64, exponent: isize) -> Self {
        let inner = DBig::from_parts(IBig::from(significand), exponent);
        Self { inner: Self::exact(inner) }
    }

    /// Create from f64 through its shortest round-trip decimal form.
    ///
    /// `0.1` becomes exactly `0.1`, not the binary value nearest to it.
    pub fn try_from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NonFinite(f));
        }
        Self::from_str(&f.to_string())
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    ///
    /// Terminating quotients within the working precision are exact; others
    /// are rounded to at least `WORK_PRECISION` significant digits.
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        // unlimited-precision division is not defined in dashu
        let precision = WORK_PRECISION
            .max(self.inner.digits())
            .max(other.inner.digits());
        let quotient = Self::for_division(&self.inner, precision)
            / Self::for_division(&other.inner, precision);
        Ok(Self { inner: Self::exact(quotient) })
    }

    // ========== Rounding ==========

    /// Round to `places` decimal places, ties away from zero.
    ///
    /// `2.0005` becomes `2.001` and `-2.0005` becomes `-2.001`.
    pub fn round_half_up(&self, places: u32) -> Self {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let scale = -(places as isize);
        if exponent >= scale {
            return self.clone();
        }

        let negative = significand < IBig::ZERO;
        let magnitude = if negative { -significand } else { significand };
        let divisor = IBig::from(10u8).pow((scale - exponent) as usize);
        let mut quotient = &magnitude / &divisor;
        let remainder = &magnitude % &divisor;
        if &remainder + &remainder >= divisor {
            quotient += IBig::ONE;
        }
        let rounded = if negative { -quotient } else { quotient };

        Self { inner: Self::exact(DBig::from_parts(rounded, scale)) }
    }

    // ========== Conversion ==========

    /// Convert to the nearest f64, `None` when out of range
    pub fn to_f64(&self) -> Option<f64> {
        let parsed: f64 = self.to_string().parse().ok()?;
        if parsed.is_finite() {
            Some(parsed)
        } else {
            None
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::from_i64(i64::from(n))
    }
}

// ========== Trait Implementations ==========

/// Plain positional notation, no exponent: `-17.778`, `22000000`, `0.00002`
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let negative = significand < IBig::ZERO;
        let digits = (if negative { -significand } else { significand }).to_string();

        let mut text = if exponent >= 0 {
            if digits == "0" {
                digits
            } else {
                format!("{}{}", digits, "0".repeat(exponent as usize))
            }
        } else {
            let frac_len = exponent.unsigned_abs();
            let padded = if digits.len() <= frac_len {
                format!("{}{}", "0".repeat(frac_len - digits.len() + 1), digits)
            } else {
                digits
            };
            let (int_part, frac_part) = padded.split_at(padded.len() - frac_len);
            let frac_part = frac_part.trim_end_matches('0');
            if frac_part.is_empty() {
                int_part.to_string()
            } else {
                format!("{}.{}", int_part, frac_part)
            }
        };

        if negative && text != "0" {
            text.insert(0, '-');
        }
        f.write_str(&text)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Number;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Number, E> {
        Ok(Number::from_i64(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Number, E> {
        Number::from_str(&v.to_string()).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Number, E> {
        Number::try_from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Number, E> {
        Number::from_str(v).map_err(E::custom)
    }
}

/// Accepts JSON numbers as well as decimal strings (`1000`, `"0.001"`)
impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumberVisitor)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}
