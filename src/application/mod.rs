//! Application layer - use cases and services

pub mod commands;
pub mod services;
pub mod session;

pub use commands::{Cli, CommandExecutor, Commands};
pub use services::SwapService;
pub use session::{SwapPreview, SwapSession, SwapSettings, TransactionRecord, TransactionStatus};
