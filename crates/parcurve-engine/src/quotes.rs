//! Market quote storage.
//!
//! Calibration inputs arrive as a flat map from free-form quote ids
//! (e.g. `"USD-DEPOSIT-3M"`) to quoted values in market units: percent
//! for rates, basis points for tenor-swap spreads, price points for
//! futures. Unit scaling happens in the node converter, not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A map of market quotes keyed by quote id.
///
/// Lookup of an absent id is a hard error: calibration must fail fast
/// on incomplete market data rather than guess a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteMap {
    quotes: BTreeMap<String, f64>,
}

impl QuoteMap {
    /// Creates an empty quote map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a quote, replacing any previous value for the id.
    pub fn insert(&mut self, id: impl Into<String>, value: f64) {
        self.quotes.insert(id.into(), value);
    }

    /// Adds a quote, builder style.
    #[must_use]
    pub fn with_quote(mut self, id: impl Into<String>, value: f64) -> Self {
        self.insert(id, value);
        self
    }

    /// Looks up a quote by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingMarketData`] naming the id when it
    /// is absent.
    pub fn get(&self, id: &str) -> EngineResult<f64> {
        self.quotes
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::missing_market_data(id))
    }

    /// Returns true if the id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.quotes.contains_key(id)
    }

    /// Removes a quote, returning its value if it was present.
    pub fn remove(&mut self, id: &str) -> Option<f64> {
        self.quotes.remove(id)
    }

    /// Number of quotes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if no quotes are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterates over (id, value) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.quotes.iter().map(|(id, value)| (id.as_str(), *value))
    }
}

impl FromIterator<(String, f64)> for QuoteMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}
