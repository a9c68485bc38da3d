//! Registry of supported tokens

use indexmap::IndexMap;

use super::{canonical_symbol, Token};
use crate::shared::config::TokenCfg;
use crate::shared::errors::ConfigError;
use crate::shared::utils::format_grouped;

/// Immutable symbol -> token mapping, iterated in configuration order.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: IndexMap<String, Token>,
}

impl TokenRegistry {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Result<Self, ConfigError> {
        let mut map = IndexMap::new();
        for token in tokens {
            let symbol = canonical_symbol(&token.symbol);
            if symbol.is_empty() || symbol.contains('-') {
                return Err(ConfigError::InvalidSymbol(token.symbol));
            }
            if map.contains_key(&symbol) {
                return Err(ConfigError::DuplicateToken(symbol));
            }
            map.insert(symbol.clone(), Token { symbol, ..token });
        }
        Ok(Self { tokens: map })
    }

    pub fn from_config(tokens: &[TokenCfg]) -> Result<Self, ConfigError> {
        Self::new(tokens.iter().map(Token::from))
    }

    /// Get token by symbol (case-insensitive)
    pub fn get(&self, symbol: &str) -> Option<&Token> {
        self.tokens.get(&canonical_symbol(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// All tokens in configuration order
    pub fn all(&self) -> Vec<&Token> {
        self.tokens.values().collect()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render `amount` bounded by the token's display precision. Unknown
    /// symbols fall back to the plain `Display` form.
    pub fn format_amount(&self, amount: f64, symbol: &str) -> String {
        match self.get(symbol) {
            Some(token) => format_grouped(amount, token.display_decimals() as usize),
            None => amount.to_string(),
        }
    }
}
