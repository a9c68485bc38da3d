// Loading markets from files and running a session over them.

use std::io::Write;
use std::sync::Arc;

use swapquote::application::TransactionStatus;
use swapquote::{ConfigError, MarketConfig, QuoteError, SessionError, SwapService, SwapSession};
use tempfile::NamedTempFile;

const SMALL_MARKET: &str = r#"
[app]
name = "Test"
version = "0.0.1"
default_slippage = 1.0
max_slippage = 10.0
default_deadline_minutes = 5
max_deadline_minutes = 60
min_transaction_amount = 0.01
default_network = "testnet"
supported_networks = ["testnet"]
default_pay_token = "aaa"
default_receive_token = "BBB"

[[tokens]]
symbol = "AAA"
name = "Token A"
decimals = 2

[[tokens]]
symbol = "BBB"
name = "Token B"
decimals = 4

[rates]
"AAA-BBB" = 2.5

[fees]
trading_fee = 0.01

[impact]
low = 10.0
medium = 100.0
high = 1000.0
"#;

fn write_market(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_market_from_file() {
    let file = write_market(SMALL_MARKET);
    let cfg = MarketConfig::from_file(file.path()).unwrap();
    let service = SwapService::from_config(cfg).unwrap();

    assert_eq!(service.get_trading_pairs(), vec!["AAA-BBB".to_string()]);
    let q = service.quote("aaa", "bbb", 10.0).unwrap();
    assert!((q.net_output - 24.75).abs() < 1e-12);
    assert_eq!(service.format(1234.56789, "BBB"), "1,234.5679");
    assert!(matches!(
        service.quote("AAA", "BBB", 0.001),
        Err(QuoteError::InvalidAmount(_))
    ));
    assert!(matches!(
        service.quote("BBB", "AAA", 1.0),
        Err(QuoteError::RateUnavailable { .. })
    ));
}

#[test]
fn rejects_rate_for_unregistered_token() {
    let broken = SMALL_MARKET.replace("\"AAA-BBB\" = 2.5", "\"AAA-CCC\" = 2.5");
    let cfg = MarketConfig::from_toml_str(&broken).unwrap();
    assert!(matches!(
        SwapService::from_config(cfg),
        Err(ConfigError::UnregisteredToken { .. })
    ));
}

#[test]
fn rejects_malformed_pair_key() {
    let broken = SMALL_MARKET.replace("\"AAA-BBB\" = 2.5", "\"AAABBB\" = 2.5");
    let cfg = MarketConfig::from_toml_str(&broken).unwrap();
    assert!(matches!(
        SwapService::from_config(cfg),
        Err(ConfigError::InvalidPairKey(_))
    ));
}

#[test]
fn rejects_zero_rate() {
    let broken = SMALL_MARKET.replace("\"AAA-BBB\" = 2.5", "\"AAA-BBB\" = 0.0");
    let cfg = MarketConfig::from_toml_str(&broken).unwrap();
    assert!(matches!(
        SwapService::from_config(cfg),
        Err(ConfigError::InvalidRate { .. })
    ));
}

#[test]
fn rejects_duplicate_token() {
    let broken = SMALL_MARKET.replace("symbol = \"BBB\"", "symbol = \"aaa\"");
    let cfg = MarketConfig::from_toml_str(&broken).unwrap();
    assert!(matches!(
        SwapService::from_config(cfg),
        Err(ConfigError::DuplicateToken(_))
    ));
}

#[test]
fn session_over_loaded_market() {
    let cfg = MarketConfig::from_toml_str(SMALL_MARKET).unwrap();
    let service = Arc::new(SwapService::from_config(cfg).unwrap());
    let mut session = SwapSession::new(service);

    assert_eq!(session.pay_token(), "AAA");
    assert_eq!(session.settings().slippage, 1.0);
    assert!(session.update_settings(11.0, 5).is_err());

    session.set_pay_amount("100");
    let preview = session.preview().unwrap();
    assert!((preview.quote.net_output - 247.5).abs() < 1e-9);
    assert!((preview.minimum_received - 245.025).abs() < 1e-9);
    assert_eq!(preview.output_display, "247.5");
    assert_eq!(preview.minimum_received_display, "245.025");

    assert_eq!(
        session.submit_swap().unwrap_err(),
        SessionError::WalletNotConnected
    );
    session.connect_wallet();
    let id = session.submit_swap().unwrap().id;
    session.cancel(id).unwrap();
    assert_eq!(session.transactions()[0].status, TransactionStatus::Cancelled);

    session.flip();
    assert!(matches!(
        session.preview(),
        Err(QuoteError::RateUnavailable { .. })
    ));
}
