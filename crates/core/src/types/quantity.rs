//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be at least {min} (got {value})", min = Quantity::MIN)]
    BelowMinimum {
        /// The rejected value.
        value: i64,
    },
    /// The value does not fit in a `u32`.
    #[error("quantity {value} is too large")]
    TooLarge {
        /// The rejected value.
        value: i64,
    },
}

/// Number of units of one product in the cart.
///
/// ## Constraints
///
/// - Always at least 1
/// - At most `u32::MAX`; increments saturate instead of wrapping
///
/// ## Examples
///
/// ```
/// use shopfront_core::Quantity;
///
/// assert!(Quantity::new(1).is_ok());
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::try_from(-5_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest allowed quantity.
    pub const MIN: u32 = 1;

    /// A quantity of one.
    pub const ONE: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::BelowMinimum`] if `value` is zero.
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        if value < Self::MIN {
            return Err(QuantityError::BelowMinimum {
                value: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// The number of units.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more unit, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < i64::from(Self::MIN) {
            return Err(QuantityError::BelowMinimum { value });
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge { value })
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(matches!(
            Quantity::new(0),
            Err(QuantityError::BelowMinimum { value: 0 })
        ));
        assert!(matches!(
            Quantity::try_from(-5_i64),
            Err(QuantityError::BelowMinimum { value: -5 })
        ));
    }

    #[test]
    fn test_rejects_overflowing_i64() {
        assert!(matches!(
            Quantity::try_from(i64::from(u32::MAX) + 1),
            Err(QuantityError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_increment_saturates() {
        assert_eq!(Quantity::ONE.increment().get(), 2);
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.increment(), max);
    }

    #[test]
    fn test_deserialize_validates() {
        assert_eq!(
            serde_json::from_str::<Quantity>("3").unwrap(),
            Quantity::new(3).unwrap()
        );
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
    }
}
