//! Price feed interface

use std::collections::HashMap;

use super::{RateTable, TradingPair};

/// Source of directed rates. A network-backed feed is awaited by the
/// caller, which then takes a synchronous [`RateTable`] snapshot.
pub trait PriceFeed {
    fn source(&self) -> &str;
    fn fetch_rate(&self, from: &str, to: &str) -> Option<f64>;
}

/// Feed serving a fixed set of rates.
#[derive(Debug, Clone)]
pub struct StaticPriceFeed {
    source: String,
    rates: HashMap<TradingPair, f64>,
}

impl StaticPriceFeed {
    pub fn new(source: &str, rates: impl IntoIterator<Item = (TradingPair, f64)>) -> Self {
        Self {
            source: source.to_string(),
            rates: rates.into_iter().collect(),
        }
    }

    pub fn from_table(source: &str, table: &RateTable) -> Self {
        Self::new(source, table.pairs().map(|(pair, rate)| (pair.clone(), rate)))
    }
}

impl PriceFeed for StaticPriceFeed {
    fn source(&self) -> &str {
        &self.source
    }

    fn fetch_rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(&TradingPair::new(from, to)).copied()
    }
}
