//! Cart
//!
//! A weight-limited shopping cart built on a [`Bag`]. Adding an item that is
//! already in the cart bumps its quantity instead of taking another slot, and
//! removing the last unit of an item frees its slot.
//!
//! The cart keeps a running total of the weight it holds. Every mutation
//! either succeeds completely or returns an error and leaves the cart as it
//! was, so `current_weight` always equals the sum of unit weight times
//! quantity over the items held, and never exceeds `weight_limit`.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    bag::{Bag, BagError, DEFAULT_CAPACITY},
    items::{CartItem, Grocery, ItemError},
    receipt::{CheckoutObserver, NoopObserver, Receipt},
    weights::Weight,
};

/// Weight limit used when none is given.
pub const DEFAULT_WEIGHT_LIMIT: Weight = Weight::new(50);

/// Errors related to cart updates or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Adding the item would push the cart over its weight limit.
    #[error("adding would bring the cart to {attempted}, over its limit of {limit}")]
    Overweight {
        /// Weight the cart would have held
        attempted: Weight,
        /// Carrying capacity of the cart
        limit: Weight,
    },

    /// The item's currency differs from the cart's (item currency, cart currency).
    #[error("item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The item is not in the cart.
    #[error("{0} is not in the cart")]
    ItemNotFound(String),

    /// The underlying bag rejected the change.
    #[error(transparent)]
    Bag(#[from] BagError),

    /// An item could not be priced.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The sum of line totals does not fit in minor units.
    #[error("cart total overflows")]
    TotalOverflow,

    /// The cart's weight no longer fits in a [`Weight`].
    #[error("cart weight overflows")]
    WeightOverflow,

    /// The item's quantity is already at its maximum.
    #[error("quantity of {0} overflows")]
    QuantityOverflow(String),
}

/// Limits and currency for a cart.
#[derive(Debug, Clone, Copy)]
pub struct CartConfig<'a> {
    /// Number of distinct items the cart can hold
    pub capacity: usize,

    /// Maximum total weight
    pub weight_limit: Weight,

    /// Currency every item must be priced in
    pub currency: &'a Currency,
}

impl<'a> CartConfig<'a> {
    /// Default limits in the given currency.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            weight_limit: DEFAULT_WEIGHT_LIMIT,
            currency,
        }
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a, G: CartItem<'a> = Grocery<'a>> {
    items: Bag<G>,
    weight_limit: Weight,
    current_weight: Weight,
    currency: &'a Currency,
}

impl<'a, G: CartItem<'a>> Cart<'a, G> {
    /// Create an empty cart with the default limits.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Self::from_config(&CartConfig::new(currency))
    }

    /// Create an empty cart with the given slot capacity and weight limit.
    #[must_use]
    pub fn with_limits(capacity: usize, weight_limit: Weight, currency: &'a Currency) -> Self {
        Self::from_config(&CartConfig {
            capacity,
            weight_limit,
            currency,
        })
    }

    /// Create an empty cart from a config.
    #[must_use]
    pub fn from_config(config: &CartConfig<'a>) -> Self {
        Cart {
            items: Bag::new(config.capacity),
            weight_limit: config.weight_limit,
            current_weight: Weight::ZERO,
            currency: config.currency,
        }
    }

    /// Put one unit of `item` in the cart.
    ///
    /// If an equal item is already in the cart its quantity goes up by one;
    /// otherwise the item takes a new slot with a quantity of one.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    /// - [`CartError::Overweight`]: one more unit would exceed the weight limit.
    /// - [`CartError::WeightOverflow`]: one more unit would not fit in a [`Weight`].
    /// - [`CartError::QuantityOverflow`]: the item's quantity cannot go any higher.
    /// - [`CartError::Bag`]: the item is new and every slot is taken.
    pub fn add(&mut self, mut item: G) -> Result<(), CartError> {
        self.ensure_currency(&item)?;

        let Some(attempted) = self.current_weight.checked_add(item.unit_weight()) else {
            debug!(item = item.name(), "rejected item overflowing cart weight");

            return Err(CartError::WeightOverflow);
        };

        if attempted > self.weight_limit {
            debug!(
                item = item.name(),
                %attempted,
                limit = %self.weight_limit,
                "rejected item over weight limit"
            );

            return Err(CartError::Overweight {
                attempted,
                limit: self.weight_limit,
            });
        }

        match self.items.index_of(&item) {
            Some(index) => {
                let existing = self
                    .items
                    .get_mut(index)
                    .ok_or(BagError::IndexOutOfBounds(index))?;

                if existing.quantity() == u32::MAX {
                    return Err(CartError::QuantityOverflow(existing.name().to_string()));
                }

                existing.increment_quantity();
            }
            None => {
                item.set_quantity(1);
                self.items.add(item)?;
            }
        }

        self.current_weight = attempted;

        debug!(weight = %self.current_weight, slots = self.items.len(), "added item to cart");

        Ok(())
    }

    /// Take one unit of `item` out of the cart, freeing its slot when none are left.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the item is not in the cart.
    pub fn remove(&mut self, item: &G) -> Result<(), CartError> {
        let entry = self
            .items
            .index_of(item)
            .and_then(|index| self.items.get_mut(index))
            .ok_or_else(|| CartError::ItemNotFound(item.name().to_string()))?;

        if entry.decrement_quantity() {
            self.current_weight = self.current_weight.saturating_sub(entry.unit_weight());
        }

        debug!(
            item = item.name(),
            weight = %self.current_weight,
            "removed item from cart"
        );

        self.garbage_collect();

        Ok(())
    }

    /// Free every slot whose item has a quantity of zero. Returns the number freed.
    pub fn garbage_collect(&mut self) -> usize {
        let mut purged = 0;
        let mut index = 0;

        // Removal swaps the last slot into `index`, which then needs checking too.
        while let Some(item) = self.items.get(index) {
            if item.quantity() > 0 {
                index += 1;
                continue;
            }

            match self.items.remove_at(index) {
                Ok(removed) => {
                    debug!(item = removed.name(), "purged empty cart entry");
                    purged += 1;
                }
                Err(_) => break,
            }
        }

        purged
    }

    /// Check the cart out without reporting line items.
    ///
    /// # Errors
    ///
    /// See [`Cart::checkout_with_observer`].
    pub fn checkout_total(&mut self) -> Result<Money<'a, Currency>, CartError> {
        self.checkout_with_observer(&mut NoopObserver)
    }

    /// Check the cart out and collect a [`Receipt`].
    ///
    /// # Errors
    ///
    /// See [`Cart::checkout_with_observer`].
    pub fn checkout(&mut self) -> Result<Receipt<'a>, CartError> {
        let mut receipt = Receipt::new(self.currency);

        self.checkout_with_observer(&mut receipt)?;

        Ok(receipt)
    }

    /// Check the cart out, reporting each line item and the total to `observer`.
    ///
    /// An empty cart reports `on_empty` and returns zero. Otherwise the cart is
    /// emptied and its weight reset once every item has been priced.
    ///
    /// # Errors
    ///
    /// - [`CartError::Item`]: an item's total price overflows.
    /// - [`CartError::TotalOverflow`]: the grand total overflows.
    ///
    /// The cart is unchanged when an error is returned.
    pub fn checkout_with_observer<O>(
        &mut self,
        observer: &mut O,
    ) -> Result<Money<'a, Currency>, CartError>
    where
        O: CheckoutObserver<'a>,
    {
        if self.is_empty() {
            observer.on_empty();

            return Ok(Money::from_minor(0, self.currency));
        }

        let total = self.total()?;

        for item in &self.items {
            observer.on_line_item(item.name(), item.quantity(), item.total_price()?);
        }

        observer.on_total(total);

        debug!(total = %total, lines = self.items.len(), "checked out cart");

        self.items.clear();
        self.current_weight = Weight::ZERO;

        Ok(total)
    }

    /// Sum of every item's total price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Item`] or [`CartError::TotalOverflow`] if a line or
    /// the sum overflows.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        let minor_units = self
            .items
            .iter()
            .try_fold(0_i64, |acc, item| -> Result<i64, CartError> {
                let line = item.total_price()?;

                acc.checked_add(line.to_minor_units())
                    .ok_or(CartError::TotalOverflow)
            })?;

        Ok(Money::from_minor(minor_units, self.currency))
    }

    /// Check if this cart's total is strictly greater than `other`'s.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the carts use different
    /// currencies, or any error from [`Cart::total`].
    pub fn greater_than(&self, other: &Self) -> Result<bool, CartError> {
        let (ours, theirs) = self.comparable_totals(other)?;

        Ok(ours > theirs)
    }

    /// Check if this cart's total is strictly less than `other`'s.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the carts use different
    /// currencies, or any error from [`Cart::total`].
    pub fn less_than(&self, other: &Self) -> Result<bool, CartError> {
        let (ours, theirs) = self.comparable_totals(other)?;

        Ok(ours < theirs)
    }

    /// Check if an item equal to `item` is in the cart.
    pub fn contains(&self, item: &G) -> bool {
        self.items.contains(item)
    }

    /// Units of `item` in the cart, zero if it is not there.
    pub fn quantity_of(&self, item: &G) -> u32 {
        self.items
            .index_of(item)
            .and_then(|index| self.items.get(index))
            .map_or(0, G::quantity)
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &G> {
        self.items.iter()
    }

    /// Number of distinct items (occupied slots).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct items the cart can hold.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Weight of everything in the cart.
    pub fn current_weight(&self) -> Weight {
        self.current_weight
    }

    /// Maximum weight the cart can carry.
    pub fn weight_limit(&self) -> Weight {
        self.weight_limit
    }

    /// Weight that can still be added.
    pub fn remaining_weight(&self) -> Weight {
        self.weight_limit.saturating_sub(self.current_weight)
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    fn ensure_currency(&self, item: &G) -> Result<(), CartError> {
        let item_currency = item.unit_price().currency();

        if item_currency == self.currency {
            Ok(())
        } else {
            Err(CartError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ))
        }
    }

    fn comparable_totals(&self, other: &Self) -> Result<(i64, i64), CartError> {
        if self.currency != other.currency {
            return Err(CartError::CurrencyMismatch(
                other.currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        Ok((
            self.total()?.to_minor_units(),
            other.total()?.to_minor_units(),
        ))
    }
}
