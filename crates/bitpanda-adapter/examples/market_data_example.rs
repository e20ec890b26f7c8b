/*
[INPUT]:  Instrument code (e.g., "BTC_EUR")
[OUTPUT]: Market data (time, instruments, order book, candlesticks)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use bitpanda_adapter::*;
use chrono::{Duration, Utc};

/// Example: Query market data (no authentication required)
///
/// These endpoints are public and don't need an API token.
#[tokio::main]
async fn main() {
    println!("=== Bitpanda Market Data Example ===\n");

    let client = match BitpandaClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let instrument = InstrumentCode::BtcEur;

    match client.server_time().await {
        Ok(time) => println!("✓ Server time: {}", time.iso),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying instrument limits for {}...", instrument);
    match client.instruments().await {
        Ok(instruments) => {
            for info in instruments.iter().filter(|i| i.code() == instrument) {
                println!(
                    "✓ {} state={} min_size={} amount_precision={} market_precision={}",
                    info.code(),
                    info.state,
                    info.min_size,
                    info.amount_precision,
                    info.market_precision
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying order book for {}...", instrument);
    match client.order_book(&instrument, OrderBookLevel::Two).await {
        Ok(book) => println!(
            "✓ {} bids / {} asks, spread {:?}",
            book.bids.len(),
            book.asks.len(),
            book.spread()
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying hourly candlesticks for {}...", instrument);
    let to = Utc::now();
    let query = CandlesticksQuery::new(Granularity::ONE_HOUR, to - Duration::hours(6), to);
    match client.candlesticks(&instrument, &query).await {
        Ok(candles) => {
            for candle in candles {
                println!(
                    "  {} O={} H={} L={} C={} V={}",
                    candle.time, candle.open, candle.high, candle.low, candle.close, candle.volume
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
