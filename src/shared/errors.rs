//! Error handling for the application

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Quote-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot swap {0} for itself")]
    SameToken(String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("No rate available for {from} -> {to}")]
    RateUnavailable { from: String, to: String },
}

impl QuoteError {
    /// Message shown to the user when a quote cannot be rendered.
    pub fn user_message(&self) -> &'static str {
        match self {
            QuoteError::InvalidAmount(_) => "Please enter a valid amount",
            QuoteError::SameToken(_) => "Cannot swap same token",
            QuoteError::UnknownToken(_) => "Token is not supported",
            QuoteError::RateUnavailable { .. } => "No exchange rate for this pair",
        }
    }
}

/// Market configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid token symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Duplicate token: {0}")]
    DuplicateToken(String),

    #[error("Invalid pair key: {0:?} (expected FROM-TO)")]
    InvalidPairKey(String),

    #[error("Invalid rate for {pair}: {rate}")]
    InvalidRate { pair: String, rate: f64 },

    #[error("Pair {pair} references unregistered token {symbol}")]
    UnregisteredToken { pair: String, symbol: String },

    #[error("Invalid fee setting: {0}")]
    InvalidFee(String),

    #[error("Invalid impact thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Invalid app setting: {0}")]
    InvalidSetting(String),
}

/// Session-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    #[error("Transaction already finalized: {0}")]
    TransactionFinalized(Uuid),
}

impl SessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::Quote(err) => err.user_message(),
            SessionError::WalletNotConnected => "Please connect your wallet",
            SessionError::InvalidSettings(_) => "Invalid slippage or deadline",
            SessionError::TransactionNotFound(_) | SessionError::TransactionFinalized(_) => {
                "Transaction failed"
            }
        }
    }
}
