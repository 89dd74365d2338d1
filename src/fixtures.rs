//! Fixtures
//!
//! Grocery catalogues and cart settings loaded from YAML:
//!
//! - `<base>/groceries/<name>.yml`: a `groceries` map of key to `{ name, price, weight }`
//! - `<base>/carts/<name>.yml`: `{ currency, capacity, weight_limit }`

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    bag::DEFAULT_CAPACITY,
    cart::{Cart, CartConfig, DEFAULT_WEIGHT_LIMIT},
    items::{CartItem, Grocery},
    weights::Weight,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between groceries or between groceries and the cart
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Grocery not found
    #[error("Grocery not found: {0}")]
    GroceryNotFound(String),

    /// No cart settings loaded
    #[error("No cart settings loaded")]
    NoCart,
}

/// Wrapper for groceries in YAML
#[derive(Debug, Deserialize)]
pub struct GroceriesFixture {
    /// Map of grocery key -> grocery fixture
    pub groceries: FxHashMap<String, GroceryFixture>,
}

/// Grocery Fixture
#[derive(Debug, Deserialize)]
pub struct GroceryFixture {
    /// Display name
    pub name: String,

    /// Unit price (e.g., "2.99 GBP")
    pub price: String,

    /// Unit weight
    pub weight: Weight,
}

impl TryFrom<GroceryFixture> for Grocery<'static> {
    type Error = FixtureError;

    fn try_from(fixture: GroceryFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Grocery::new(
            fixture.name,
            Money::from_minor(minor_units, currency),
            fixture.weight,
        ))
    }
}

/// Cart Fixture
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Currency code (e.g., "GBP")
    pub currency: String,

    /// Number of distinct items the cart can hold
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Maximum total weight
    #[serde(default = "default_weight_limit")]
    pub weight_limit: Weight,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_weight_limit() -> Weight {
    DEFAULT_WEIGHT_LIMIT
}

impl TryFrom<CartFixture> for CartConfig<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CartFixture) -> Result<Self, Self::Error> {
        Ok(CartConfig {
            capacity: fixture.capacity,
            weight_limit: fixture.weight_limit,
            currency: parse_currency(&fixture.currency)?,
        })
    }
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Groceries by fixture key
    groceries: FxHashMap<String, Grocery<'static>>,

    /// Cart settings, once loaded
    cart: Option<CartConfig<'static>>,

    /// Currency shared by every grocery and the cart
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            groceries: FxHashMap::default(),
            cart: None,
            currency: None,
        }
    }

    /// Load the groceries and cart settings sharing a set name from `./fixtures`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed, or if the
    /// currencies disagree.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load the groceries and cart settings sharing a set name from `base_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed, or if the
    /// currencies disagree.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_groceries(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Load groceries from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_groceries(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("groceries").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: GroceriesFixture = serde_norway::from_str(&contents)?;

        for (key, grocery_fixture) in fixture.groceries {
            let grocery: Grocery<'static> = grocery_fixture.try_into()?;

            self.check_currency(grocery.unit_price().currency())?;

            self.groceries.insert(key, grocery);
        }

        debug!(path = %file_path.display(), count = self.groceries.len(), "loaded groceries");

        Ok(self)
    }

    /// Load cart settings from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the cart
    /// currency differs from the groceries'.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;
        let config: CartConfig<'static> = fixture.try_into()?;

        self.check_currency(config.currency)?;
        self.cart = Some(config);

        debug!(path = %file_path.display(), "loaded cart settings");

        Ok(self)
    }

    /// Get a fresh single unit of the grocery stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::GroceryNotFound`] if no grocery has that key.
    pub fn grocery(&self, key: &str) -> Result<Grocery<'static>, FixtureError> {
        self.groceries
            .get(key)
            .cloned()
            .ok_or_else(|| FixtureError::GroceryNotFound(key.to_string()))
    }

    /// Keys of every loaded grocery, sorted.
    pub fn grocery_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.groceries.keys().map(String::as_str).collect();

        keys.sort_unstable();

        keys
    }

    /// Loaded cart settings.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCart`] if no cart settings have been loaded.
    pub fn cart_config(&self) -> Result<CartConfig<'static>, FixtureError> {
        self.cart.ok_or(FixtureError::NoCart)
    }

    /// An empty cart built from the loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCart`] if no cart settings have been loaded.
    pub fn cart(&self) -> Result<Cart<'static>, FixtureError> {
        Ok(Cart::from_config(&self.cart_config()?))
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);
                Ok(())
            }
        }
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .ok()
        .and_then(|value| value.checked_mul(Decimal::new(100, 0)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Parse an ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes other than GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
