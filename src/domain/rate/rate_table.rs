//! Directed rate lookup table

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::{PriceFeed, TradingPair};
use crate::domain::token::TokenRegistry;
use crate::shared::errors::ConfigError;

/// Immutable `(from, to) -> rate` table. `1 from = rate to`.
///
/// Every directed pair must be listed on its own; a missing pair is
/// absent, and no inverse is ever derived from the opposite direction.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: IndexMap<TradingPair, f64>,
}

impl RateTable {
    /// Build a table, checking every pair against the registry.
    pub fn new(
        rates: impl IntoIterator<Item = (TradingPair, f64)>,
        registry: &TokenRegistry,
    ) -> Result<Self, ConfigError> {
        let mut map = IndexMap::new();
        for (pair, rate) in rates {
            if pair.from == pair.to {
                return Err(ConfigError::InvalidPairKey(pair.to_string()));
            }
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConfigError::InvalidRate {
                    pair: pair.to_string(),
                    rate,
                });
            }
            for symbol in [&pair.from, &pair.to] {
                if !registry.contains(symbol) {
                    return Err(ConfigError::UnregisteredToken {
                        pair: pair.to_string(),
                        symbol: symbol.clone(),
                    });
                }
            }
            map.insert(pair, rate);
        }
        debug!("rate table built with {} pairs", map.len());
        Ok(Self { rates: map })
    }

    /// Build from `"FROM-TO" = rate` entries.
    pub fn from_config(
        rates: &IndexMap<String, f64>,
        registry: &TokenRegistry,
    ) -> Result<Self, ConfigError> {
        let pairs = rates
            .iter()
            .map(|(key, rate)| Ok((key.parse::<TradingPair>()?, *rate)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Self::new(pairs, registry)
    }

    /// Take a full snapshot from a feed: every ordered pair of registered
    /// tokens is requested. Pairs the feed cannot price are left out.
    pub fn from_feed(registry: &TokenRegistry, feed: &dyn PriceFeed) -> Self {
        let symbols: Vec<&str> = registry.symbols().collect();
        let mut rates = IndexMap::new();
        for from in &symbols {
            for to in &symbols {
                if from == to {
                    continue;
                }
                match feed.fetch_rate(from, to) {
                    Some(rate) if rate.is_finite() && rate > 0.0 => {
                        rates.insert(TradingPair::new(from, to), rate);
                    }
                    Some(rate) => {
                        warn!("{} returned unusable rate {} for {}-{}", feed.source(), rate, from, to);
                    }
                    None => {}
                }
            }
        }
        debug!("snapshot from {}: {} pairs", feed.source(), rates.len());
        Self { rates }
    }

    /// Rate for the directed pair, inputs matched case-insensitively.
    pub fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(&TradingPair::new(from, to)).copied()
    }

    /// Directed pairs in configuration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&TradingPair, f64)> {
        self.rates.iter().map(|(pair, rate)| (pair, *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
