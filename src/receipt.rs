//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Callbacks fired while a cart is checked out.
///
/// Every callback defaults to doing nothing, so an observer only implements
/// the events it cares about.
pub trait CheckoutObserver<'a> {
    /// Called once per item in the cart, in slot order.
    fn on_line_item(&mut self, _name: &str, _quantity: u32, _total: Money<'a, Currency>) {}

    /// Called once after every line item with the grand total.
    fn on_total(&mut self, _total: Money<'a, Currency>) {}

    /// Called instead of any other callback when the cart is empty.
    fn on_empty(&mut self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CheckoutObserver<'_> for NoopObserver {}

/// A single receipt line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    name: String,
    quantity: u32,
    total: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units bought
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}

/// Record of a checked out cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[LineItem<'a>; 10]>,
    total: Money<'a, Currency>,
    currency: &'a Currency,
}

impl<'a> Receipt<'a> {
    /// Create an empty receipt in the given currency.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            lines: SmallVec::new(),
            total: Money::from_minor(0, currency),
            currency,
        }
    }

    /// Line items in the order they were checked out.
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// Total amount paid
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Check if nothing was bought.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Writes the receipt as a table.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::Io`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.is_empty() {
            writeln!(out, "Your cart is empty!")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Total"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                line.total.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..3), Alignment::right());

        writeln!(out, "\n{table}")?;
        writeln!(out, " Total: {}\n", self.total)?;

        Ok(())
    }
}

impl<'a> CheckoutObserver<'a> for Receipt<'a> {
    fn on_line_item(&mut self, name: &str, quantity: u32, total: Money<'a, Currency>) {
        self.lines.push(LineItem {
            name: name.to_string(),
            quantity,
            total,
        });
    }

    fn on_total(&mut self, total: Money<'a, Currency>) {
        self.total = total;
    }

    fn on_empty(&mut self) {
        self.lines.clear();
        self.total = Money::from_minor(0, self.currency);
    }
}
