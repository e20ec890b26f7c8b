/*
[INPUT]:  Parsed subcommand and configured client
[OUTPUT]: API responses rendered as JSON values
[POS]:    CLI layer - subcommand dispatch
[UPDATE]: When adding new subcommands
*/

use anyhow::{Context, Result, anyhow};
use bitpanda_adapter::{
    BitpandaClient, CandlesticksQuery, Granularity, InstrumentCode, OrderBookLevel,
    OrderHistoryQuery, TimeUnit, TradeHistoryQuery,
};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Exchange server time
    Time,
    /// Listed currencies
    Currencies,
    /// Tradable instruments
    Instruments,
    /// Public fee schedules
    Fees,
    /// Market ticker for all instruments or one
    Ticker { instrument: Option<InstrumentCode> },
    /// Order book snapshot
    OrderBook {
        instrument: InstrumentCode,
        #[arg(long, default_value_t = 2)]
        level: u8,
    },
    /// Candlesticks for a time range
    Candles {
        instrument: InstrumentCode,
        #[arg(long, default_value = "MINUTES")]
        unit: TimeUnit,
        #[arg(long, default_value_t = 1)]
        period: u32,
        #[arg(long)]
        from: DateTime<Utc>,
        #[arg(long)]
        to: DateTime<Utc>,
    },
    /// Account balances (needs API token)
    Balances,
    /// Account fee tier (needs API token)
    AccountFees,
    /// One page of order history (needs API token)
    Orders(HistoryArgs),
    /// One page of trade history (needs API token)
    Trades(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[arg(long)]
    pub instrument: Option<InstrumentCode>,
    #[arg(long)]
    pub cursor: Option<String>,
    #[arg(long)]
    pub max_page_size: Option<u32>,
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("encode response")
}

pub async fn run(client: &BitpandaClient, command: Command) -> Result<Value> {
    match command {
        Command::Time => to_json(client.server_time().await?),
        Command::Currencies => to_json(client.currencies().await?),
        Command::Instruments => to_json(client.instruments().await?),
        Command::Fees => to_json(client.fee_groups().await?),
        Command::Ticker { instrument: None } => to_json(client.market_ticker().await?),
        Command::Ticker {
            instrument: Some(code),
        } => to_json(client.market_tick(&code).await?),
        Command::OrderBook { instrument, level } => {
            let level = OrderBookLevel::try_from(level)
                .map_err(|level| anyhow!("order book level must be 1, 2 or 3, got {level}"))?;
            if level == OrderBookLevel::One {
                to_json(client.order_book_level_one(&instrument).await?)
            } else {
                to_json(client.order_book(&instrument, level).await?)
            }
        }
        Command::Candles {
            instrument,
            unit,
            period,
            from,
            to,
        } => {
            let granularity = Granularity::new(unit, period);
            if !granularity.is_supported() {
                warn!(unit = %granularity.unit, period = granularity.period, "granularity not listed as supported");
            }
            let query = CandlesticksQuery::new(granularity, from, to);
            let candles = client.candlesticks(&instrument, &query).await?;
            info!(count = candles.len(), "candlesticks received");
            to_json(candles)
        }
        Command::Balances => to_json(client.balances().await?),
        Command::AccountFees => to_json(client.account_fees().await?),
        Command::Orders(args) => {
            let query = OrderHistoryQuery {
                instrument_code: args.instrument,
                cursor: args.cursor,
                max_page_size: args.max_page_size,
                ..Default::default()
            };
            to_json(client.orders(&query).await?)
        }
        Command::Trades(args) => {
            let query = TradeHistoryQuery {
                instrument_code: args.instrument,
                cursor: args.cursor,
                max_page_size: args.max_page_size,
                ..Default::default()
            };
            to_json(client.trades(&query).await?)
        }
    }
}
