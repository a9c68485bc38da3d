//! Domain layer - tokens, rates and quotes

pub mod quote;
pub mod rate;
pub mod token;
