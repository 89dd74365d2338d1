//! Items

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::weights::Weight;

/// Errors raised by item pricing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// Unit price times quantity does not fit in minor units.
    #[error("total price of {0} overflows")]
    PriceOverflow(String),
}

/// What a cart needs to know about the things it holds.
///
/// Equality identifies "the same item" and must ignore the quantity: two
/// apples with different quantities are still the same apple.
pub trait CartItem<'a>: PartialEq {
    /// Display name
    fn name(&self) -> &str;

    /// Weight of a single unit
    fn unit_weight(&self) -> Weight;

    /// Price of a single unit
    fn unit_price(&self) -> &Money<'a, Currency>;

    /// Number of units held
    fn quantity(&self) -> u32;

    /// Overwrite the number of units held
    fn set_quantity(&mut self, quantity: u32);

    /// Add one unit.
    fn increment_quantity(&mut self) {
        let quantity = self.quantity().saturating_add(1);

        self.set_quantity(quantity);
    }

    /// Take away one unit. Does nothing and returns `false` when the quantity is already zero.
    fn decrement_quantity(&mut self) -> bool {
        match self.quantity().checked_sub(1) {
            Some(quantity) => {
                self.set_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::PriceOverflow`] if the total does not fit in minor units.
    fn total_price(&self) -> Result<Money<'a, Currency>, ItemError> {
        let price = self.unit_price();

        let minor_units = price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity()))
            .ok_or_else(|| ItemError::PriceOverflow(self.name().to_string()))?;

        Ok(Money::from_minor(minor_units, price.currency()))
    }
}

/// A priced, weighed grocery item.
#[derive(Clone, Debug)]
pub struct Grocery<'a> {
    name: String,
    price: Money<'a, Currency>,
    weight: Weight,
    quantity: u32,
}

impl<'a> Grocery<'a> {
    /// Creates a single unit of a grocery item.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            price,
            weight,
            quantity: 1,
        }
    }

    /// Same item with a different quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

impl<'a> CartItem<'a> for Grocery<'a> {
    fn name(&self) -> &str {
        &self.name
    }

    fn unit_weight(&self) -> Weight {
        self.weight
    }

    fn unit_price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

impl PartialEq for Grocery<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.price == other.price && self.weight == other.weight
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn apple<'a>() -> Grocery<'a> {
        Grocery::new("Apple", Money::from_minor(300, GBP), Weight::new(10))
    }

    #[test]
    fn new_grocery_has_one_unit() {
        assert_eq!(apple().quantity(), 1);
    }

    #[test]
    fn equality_ignores_quantity() {
        assert_eq!(apple(), apple().with_quantity(7));
    }

    #[test]
    fn equality_compares_price_and_weight() {
        let dearer = Grocery::new("Apple", Money::from_minor(350, GBP), Weight::new(10));
        let heavier = Grocery::new("Apple", Money::from_minor(300, GBP), Weight::new(11));

        assert_ne!(apple(), dearer);
        assert_ne!(apple(), heavier);
    }

    #[test]
    fn increment_and_decrement() {
        let mut item = apple();

        item.increment_quantity();
        assert_eq!(item.quantity(), 2);

        assert!(item.decrement_quantity());
        assert!(item.decrement_quantity());
        assert_eq!(item.quantity(), 0);
    }

    #[test]
    fn decrement_at_zero_is_a_no_op() {
        let mut item = apple().with_quantity(0);

        assert!(!item.decrement_quantity());
        assert_eq!(item.quantity(), 0);
    }

    #[test]
    fn total_price_multiplies_quantity() -> TestResult {
        let item = apple().with_quantity(2);

        assert_eq!(item.total_price()?, Money::from_minor(600, GBP));

        Ok(())
    }

    #[test]
    fn total_price_overflow_errors() {
        let item = Grocery::new("Gold", Money::from_minor(i64::MAX, GBP), Weight::new(1))
            .with_quantity(2);

        assert_eq!(
            item.total_price(),
            Err(ItemError::PriceOverflow("Gold".to_string()))
        );
    }
}
