//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bag::{Bag, BagError, DEFAULT_CAPACITY},
    cart::{Cart, CartConfig, CartError, DEFAULT_WEIGHT_LIMIT},
    fixtures::{Fixture, FixtureError},
    items::{CartItem, Grocery, ItemError},
    receipt::{CheckoutObserver, LineItem, NoopObserver, Receipt, ReceiptError},
    weights::Weight,
};
