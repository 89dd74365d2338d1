//! Trolley
//!
//! Trolley provides a fixed-capacity multiset [`Bag`](bag::Bag) and a weight-limited
//! shopping [`Cart`](cart::Cart) built on top of it.

pub mod bag;
pub mod cart;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod receipt;
pub mod weights;
