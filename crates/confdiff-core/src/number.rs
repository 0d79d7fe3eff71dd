use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number as JsonNumber;

use crate::ParseError;

/// A document number stored as an IEEE-754 double.
///
/// Integral values print without a fractional part so `1` stays `1` in every
/// renderer.
#[derive(Clone, Copy, Debug, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(f64);

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use confdiff_core::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.get(), 42.0);
    /// assert!(Number::new(f64::NAN).is_err());
    /// # Ok::<(), confdiff_core::ParseError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, ParseError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(ParseError::NotFinite { value })
        }
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Converts the number into a `serde_json::Number`, preferring the integer
    /// representation when the value has no fractional part.
    #[must_use]
    pub fn to_json_number(self) -> JsonNumber {
        if self.0.fract() == 0.0 && !(self.0 == 0.0 && self.0.is_sign_negative()) {
            // `i64::MAX as f64` and `u64::MAX as f64` round up to 2^63 and 2^64.
            if (i64::MIN as f64) <= self.0 && self.0 < (i64::MAX as f64) {
                return JsonNumber::from(self.0 as i64);
            }
            if self.0 >= 0.0 && self.0 < (u64::MAX as f64) {
                return JsonNumber::from(self.0 as u64);
            }
        }
        // Finite by construction; `from_f64` only rejects NaN and infinities.
        JsonNumber::from_f64(self.0).unwrap_or_else(|| JsonNumber::from(0))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_number())
    }
}

impl TryFrom<f64> for Number {
    type Error = ParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_display_without_fraction() {
        assert_eq!(Number::from(3).to_string(), "3");
        assert_eq!(Number::new(-12.0).unwrap().to_string(), "-12");
    }

    #[test]
    fn fractional_values_keep_their_digits() {
        assert_eq!(Number::new(2.5).unwrap().to_string(), "2.5");
    }

    #[test]
    fn negative_zero_is_equal_to_zero() {
        assert_eq!(Number::new(-0.0).unwrap(), Number::from(0));
    }

    #[test]
    fn integers_at_the_top_of_the_i64_range_are_not_clamped() {
        let two_pow_63 = Number::new(9_223_372_036_854_775_808.0).unwrap();
        assert_eq!(two_pow_63.to_json_number(), JsonNumber::from(9_223_372_036_854_775_808u64));
        assert_eq!(two_pow_63.to_string(), "9223372036854775808");
    }

    #[test]
    fn integers_at_the_top_of_the_u64_range_are_not_clamped() {
        let two_pow_64 = Number::new(18_446_744_073_709_551_616.0).unwrap();
        assert_eq!(two_pow_64.to_json_number().as_f64(), Some(18_446_744_073_709_551_616.0));
        assert_ne!(two_pow_64.to_string(), u64::MAX.to_string());
    }

    #[test]
    fn i64_minimum_stays_an_integer() {
        let min = Number::new(i64::MIN as f64).unwrap();
        assert_eq!(min.to_json_number(), JsonNumber::from(i64::MIN));
    }

    #[test]
    fn infinity_is_rejected() {
        let err = Number::new(f64::INFINITY).unwrap_err();
        assert!(matches!(err, ParseError::NotFinite { .. }));
    }
}
