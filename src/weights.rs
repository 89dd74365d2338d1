//! Weights

use std::{fmt, ops::Deref};

use serde::Deserialize;

/// A weight in whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct Weight {
    value: u64,
}

impl Weight {
    /// No weight at all.
    pub const ZERO: Weight = Weight { value: 0 };

    /// Creates a new Weight
    pub const fn new(value: u64) -> Self {
        Weight { value }
    }

    /// Add two weights, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Weight) -> Option<Weight> {
        self.value.checked_add(other.value).map(Weight::new)
    }

    /// Subtract a weight, clamping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Weight) -> Weight {
        Weight::new(self.value.saturating_sub(other.value))
    }
}

impl Deref for Weight {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_derefs_to_u64() {
        let weight = Weight::new(12);

        assert_eq!(*weight, 12);
    }

    #[test]
    fn checked_add_overflows_to_none() {
        assert_eq!(
            Weight::new(40).checked_add(Weight::new(5)),
            Some(Weight::new(45))
        );
        assert_eq!(Weight::new(u64::MAX).checked_add(Weight::new(1)), None);
    }

    #[test]
    fn saturating_sub_stops_at_zero() {
        assert_eq!(Weight::new(3).saturating_sub(Weight::new(5)), Weight::ZERO);
    }

    #[test]
    fn displays_bare_number() {
        assert_eq!(Weight::new(50).to_string(), "50");
    }
}
