//! Per-user swap state: selected tokens, entered amount, settings and
//! the in-memory transaction log.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::services::SwapService;
use crate::domain::quote::Quote;
use crate::domain::token::canonical_symbol;
use crate::shared::errors::{QuoteError, SessionError};
use crate::shared::utils::{min_received, parse_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

/// Simulated swap kept in the session log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub pay_token: String,
    pub receive_token: String,
    pub pay_amount: f64,
    pub receive_amount: f64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapSettings {
    /// Percent
    pub slippage: f64,
    pub deadline_minutes: u32,
}

/// Everything the page shows for the current input
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPreview {
    pub quote: Quote,
    pub minimum_received: f64,
    pub output_display: String,
    pub minimum_received_display: String,
    pub fee_display: String,
    pub rate_label: String,
    pub deadline_minutes: u32,
}

pub struct SwapSession {
    service: Arc<SwapService>,
    pay_token: String,
    receive_token: String,
    pay_amount: String,
    wallet_connected: bool,
    settings: SwapSettings,
    transactions: Vec<TransactionRecord>,
}

impl SwapSession {
    pub fn new(service: Arc<SwapService>) -> Self {
        let app = service.app();
        let pay_token = canonical_symbol(&app.default_pay_token);
        let receive_token = canonical_symbol(&app.default_receive_token);
        let settings = SwapSettings {
            slippage: app.default_slippage,
            deadline_minutes: app.default_deadline_minutes,
        };
        Self {
            service,
            pay_token,
            receive_token,
            pay_amount: String::new(),
            wallet_connected: false,
            settings,
            transactions: Vec::new(),
        }
    }

    pub fn pay_token(&self) -> &str {
        &self.pay_token
    }

    pub fn receive_token(&self) -> &str {
        &self.receive_token
    }

    pub fn pay_amount(&self) -> &str {
        &self.pay_amount
    }

    pub fn settings(&self) -> SwapSettings {
        self.settings
    }

    pub fn is_wallet_connected(&self) -> bool {
        self.wallet_connected
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    /// Picking the token already on the receive side swaps the sides.
    pub fn select_pay_token(&mut self, symbol: &str) -> Result<(), SessionError> {
        let symbol = self.registered(symbol)?;
        if symbol == self.receive_token {
            self.flip();
        } else {
            self.pay_token = symbol;
        }
        Ok(())
    }

    /// Picking the token already on the pay side swaps the sides.
    pub fn select_receive_token(&mut self, symbol: &str) -> Result<(), SessionError> {
        let symbol = self.registered(symbol)?;
        if symbol == self.pay_token {
            self.flip();
        } else {
            self.receive_token = symbol;
        }
        Ok(())
    }

    /// Set both sides at once. Unlike the single-side selectors this
    /// never flips; asking for the same token on both sides is an error.
    pub fn select_pair(&mut self, pay: &str, receive: &str) -> Result<(), SessionError> {
        let pay = self.registered(pay)?;
        let receive = self.registered(receive)?;
        if pay == receive {
            return Err(QuoteError::SameToken(pay).into());
        }
        self.pay_token = pay;
        self.receive_token = receive;
        Ok(())
    }

    pub fn flip(&mut self) {
        std::mem::swap(&mut self.pay_token, &mut self.receive_token);
        debug!("flipped to {} -> {}", self.pay_token, self.receive_token);
    }

    /// Store the raw input. Negative numbers are clamped to zero.
    pub fn set_pay_amount(&mut self, text: &str) {
        self.pay_amount = match parse_amount(text) {
            Some(v) if v < 0.0 => "0".to_string(),
            _ => text.trim().to_string(),
        };
    }

    pub fn connect_wallet(&mut self) {
        self.wallet_connected = true;
        info!("wallet connected");
    }

    pub fn disconnect_wallet(&mut self) {
        self.wallet_connected = false;
        info!("wallet disconnected");
    }

    pub fn update_settings(&mut self, slippage: f64, deadline_minutes: u32) -> Result<(), SessionError> {
        let app = self.service.app();
        if !slippage.is_finite() || slippage <= 0.0 || slippage > app.max_slippage {
            return Err(SessionError::InvalidSettings(format!(
                "slippage must be in (0, {}], got {}",
                app.max_slippage, slippage
            )));
        }
        if deadline_minutes == 0 || deadline_minutes > app.max_deadline_minutes {
            return Err(SessionError::InvalidSettings(format!(
                "deadline must be in [1, {}] minutes, got {}",
                app.max_deadline_minutes, deadline_minutes
            )));
        }
        self.settings = SwapSettings {
            slippage,
            deadline_minutes,
        };
        info!("settings saved: slippage {}%, deadline {}m", slippage, deadline_minutes);
        Ok(())
    }

    /// Quote the current input.
    pub fn preview(&self) -> Result<SwapPreview, QuoteError> {
        let amount = parse_amount(&self.pay_amount)
            .ok_or_else(|| QuoteError::InvalidAmount(self.pay_amount.clone()))?;
        let quote = self.service.quote(&self.pay_token, &self.receive_token, amount)?;
        let rate_label = self
            .service
            .exchange_rate_label(&self.pay_token, &self.receive_token)?;
        let minimum_received = min_received(quote.net_output, self.settings.slippage);

        Ok(SwapPreview {
            output_display: self.service.format(quote.net_output, &quote.to),
            minimum_received_display: self.service.format(minimum_received, &quote.to),
            fee_display: self.service.format(quote.fee, &quote.to),
            minimum_received,
            rate_label,
            deadline_minutes: self.settings.deadline_minutes,
            quote,
        })
    }

    /// Record a pending swap for the current input. Nothing leaves the
    /// process; the record only enters the local log.
    pub fn submit_swap(&mut self) -> Result<&TransactionRecord, SessionError> {
        if !self.wallet_connected {
            return Err(SessionError::WalletNotConnected);
        }
        let preview = self.preview()?;
        if preview.quote.impact_level.needs_warning() {
            warn!(
                "submitting {} {} with {} price impact",
                preview.quote.input_amount, preview.quote.from, preview.quote.impact_level
            );
        }

        let record = TransactionRecord {
            id: Uuid::new_v4(),
            pay_token: preview.quote.from,
            receive_token: preview.quote.to,
            pay_amount: preview.quote.input_amount,
            receive_amount: preview.quote.net_output,
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
        };
        info!(
            "swap {} recorded: {} {} -> {} {}",
            record.id, record.pay_amount, record.pay_token, record.receive_amount, record.receive_token
        );
        self.transactions.push(record);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    pub fn complete(&mut self, id: Uuid) -> Result<(), SessionError> {
        self.finalize(id, TransactionStatus::Success)
    }

    pub fn fail(&mut self, id: Uuid) -> Result<(), SessionError> {
        self.finalize(id, TransactionStatus::Failed)
    }

    pub fn cancel(&mut self, id: Uuid) -> Result<(), SessionError> {
        self.finalize(id, TransactionStatus::Cancelled)
    }

    fn finalize(&mut self, id: Uuid, status: TransactionStatus) -> Result<(), SessionError> {
        let record = self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or(SessionError::TransactionNotFound(id))?;
        if record.status != TransactionStatus::Pending {
            return Err(SessionError::TransactionFinalized(id));
        }
        record.status = status;
        info!("swap {} {}", id, status.as_str());
        Ok(())
    }

    fn registered(&self, symbol: &str) -> Result<String, QuoteError> {
        let symbol = canonical_symbol(symbol);
        if self.service.get_token(&symbol).is_none() {
            return Err(QuoteError::UnknownToken(symbol));
        }
        Ok(symbol)
    }
}
