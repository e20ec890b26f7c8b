/*
[INPUT]:  Exchange API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    CurrencyCode, FeeType, InstrumentCode, InstrumentState, OrderSide, OrderStatus, OrderType,
    TimeUnit,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

impl Currency {
    /// Whether `value` has no more decimal places than the currency allows.
    ///
    /// Trailing zeros are ignored. A currency without a precision accepts
    /// any value.
    pub fn fits_precision(&self, value: &Decimal) -> bool {
        self.precision
            .is_none_or(|precision| value.normalize().scale() <= precision)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub state: InstrumentState,
    pub base: Currency,
    pub quote: Currency,
    pub amount_precision: u32,
    pub market_precision: u32,
    #[serde(with = "crate::types::decimal::exact")]
    pub min_size: Decimal,
}

impl Instrument {
    pub fn code(&self) -> InstrumentCode {
        InstrumentCode::new(&self.base.code, &self.quote.code)
    }
}

/// Candlestick bucket size, e.g. 5 MINUTES.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Granularity {
    pub unit: TimeUnit,
    pub period: u32,
}

pub type TimeGranularity = Granularity;

impl Granularity {
    pub const ONE_MINUTE: Granularity = Granularity::new(TimeUnit::Minutes, 1);
    pub const FIVE_MINUTES: Granularity = Granularity::new(TimeUnit::Minutes, 5);
    pub const FIFTEEN_MINUTES: Granularity = Granularity::new(TimeUnit::Minutes, 15);
    pub const THIRTY_MINUTES: Granularity = Granularity::new(TimeUnit::Minutes, 30);
    pub const ONE_HOUR: Granularity = Granularity::new(TimeUnit::Hours, 1);
    pub const FOUR_HOURS: Granularity = Granularity::new(TimeUnit::Hours, 4);
    pub const ONE_DAY: Granularity = Granularity::new(TimeUnit::Days, 1);
    pub const ONE_WEEK: Granularity = Granularity::new(TimeUnit::Weeks, 1);
    pub const ONE_MONTH: Granularity = Granularity::new(TimeUnit::Months, 1);

    pub const fn new(unit: TimeUnit, period: u32) -> Self {
        Self { unit, period }
    }

    /// Whether the exchange serves candlesticks at this resolution.
    pub fn is_supported(&self) -> bool {
        match self.unit {
            TimeUnit::Minutes => matches!(self.period, 1 | 5 | 15 | 30),
            TimeUnit::Hours => matches!(self.period, 1 | 4),
            TimeUnit::Days | TimeUnit::Weeks | TimeUnit::Months => self.period == 1,
            TimeUnit::Other(_) => false,
        }
    }
}

/// Account balance for one single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub account_id: String,
    pub currency_code: CurrencyCode,
    #[serde(with = "crate::types::decimal::exact")]
    pub change: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub available: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub locked: Decimal,
    pub sequence: u64,
    pub time: DateTime<Utc>,
}

impl Balance {
    pub fn total(&self) -> Decimal {
        self.available + self.locked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub balances: Vec<Balance>,
}

impl Account {
    pub fn balance(&self, currency: &CurrencyCode) -> Option<&Balance> {
        self.balances
            .iter()
            .find(|balance| &balance.currency_code == currency)
    }
}

/// One step of a fee schedule. Fees are percentages of the traded notional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    pub fee_group_id: String,
    #[serde(with = "crate::types::decimal::exact")]
    pub volume: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub maker_fee: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub taker_fee: Decimal,
}

impl FeeTier {
    /// Fee percentage for the given liquidity side, `None` for unknown types.
    pub fn rate(&self, fee_type: &FeeType) -> Option<Decimal> {
        match fee_type {
            FeeType::Maker => Some(self.maker_fee),
            FeeType::Taker => Some(self.taker_fee),
            FeeType::Other(_) => None,
        }
    }

    /// Fee owed on `notional` at this tier.
    pub fn fee_for(&self, notional: Decimal, fee_type: &FeeType) -> Option<Decimal> {
        self.rate(fee_type)
            .map(|rate| notional * rate / Decimal::ONE_HUNDRED)
    }
}

/// Highest tier whose volume threshold has been reached.
fn tier_for_volume<'a>(tiers: &'a [FeeTier], volume: &Decimal) -> Option<&'a FeeTier> {
    tiers
        .iter()
        .filter(|tier| tier.volume <= *volume)
        .max_by(|a, b| a.volume.cmp(&b.volume))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeGroup {
    pub fee_group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    pub fee_tiers: Vec<FeeTier>,
    #[serde(with = "crate::types::decimal::exact")]
    pub fee_discount_rate: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub minimum_price_value: Decimal,
}

impl FeeGroup {
    pub fn tier_for_volume(&self, running_trading_volume: &Decimal) -> Option<&FeeTier> {
        tier_for_volume(&self.fee_tiers, running_trading_volume)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFees {
    pub account_id: String,
    #[serde(with = "crate::types::decimal::exact")]
    pub running_trading_volume: Decimal,
    pub fee_group_id: String,
    pub fee_tiers: Vec<FeeTier>,
    pub active_fee_tier: FeeTier,
    pub collect_fees_in_best: bool,
    #[serde(with = "crate::types::decimal::exact")]
    pub fee_discount_rate: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub minimum_price_value: Decimal,
}

impl AccountFees {
    /// Tier the account would be placed in for its current running volume.
    pub fn expected_tier(&self) -> Option<&FeeTier> {
        tier_for_volume(&self.fee_tiers, &self.running_trading_volume)
    }
}

/// Fee applied to the account balance as part of trade settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(with = "crate::types::decimal::exact")]
    pub fee_amount: Decimal,
    pub fee_currency: CurrencyCode,
    #[serde(with = "crate::types::decimal::exact")]
    pub fee_percentage: Decimal,
    pub fee_group_id: String,
    pub fee_type: FeeType,
    #[serde(with = "crate::types::decimal::exact")]
    pub running_trading_volume: Decimal,
}

/// Toggle for paying fees in BEST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeMode {
    pub collect_fees_in_best: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingVolume {
    #[serde(with = "crate::types::decimal::exact")]
    pub volume: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub account_id: String,
    pub instrument_code: InstrumentCode,
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub filled_amount: Decimal,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    #[serde(
        default,
        with = "crate::types::decimal::exact_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_triggered: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::types::decimal::exact_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger_price: Option<Decimal>,
}

impl Order {
    pub fn remaining_amount(&self) -> Decimal {
        (self.amount - self.filled_amount).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: String,
    pub order_id: String,
    pub account_id: String,
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    pub side: OrderSide,
    pub instrument_code: InstrumentCode,
    #[serde(with = "crate::types::decimal::exact")]
    pub price: Decimal,
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
}

/// Trade recorded for exactly one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistoryEntry {
    pub trade: Trade,
    pub fee: Fee,
}

/// Active or inactive order. Trades are only populated for orders that
/// have been (partially) filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistoryEntry {
    pub order: Order,
    #[serde(default)]
    pub trades: Vec<TradeHistoryEntry>,
}

/// A cursor-paginated page returned by the history endpoints.
pub trait Paginated {
    type Entry;

    fn entries(&self) -> &[Self::Entry];

    /// Cursor for the next page. `None` on the final page.
    fn cursor(&self) -> Option<&str>;

    fn is_last_page(&self) -> bool {
        self.cursor().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistory {
    pub order_history: Vec<OrderHistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Paginated for OrderHistory {
    type Entry = OrderHistoryEntry;

    fn entries(&self) -> &[OrderHistoryEntry] {
        &self.order_history
    }

    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistory {
    pub trade_history: Vec<TradeHistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Paginated for TradeHistory {
    type Entry = TradeHistoryEntry;

    fn entries(&self) -> &[TradeHistoryEntry] {
        &self.trade_history
    }

    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

/// Aggregated price level of a level one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    #[serde(with = "crate::types::decimal::exact")]
    pub price: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    pub number_of_orders: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopOfBook {
    pub value: PriceLevel,
}

/// Row of a level two (aggregated) or level three (per order) book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEntry {
    #[serde(with = "crate::types::decimal::exact")]
    pub price: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_orders: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Snapshot of the order book. Bids are best (highest) first, asks best
/// (lowest) first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub instrument_code: InstrumentCode,
    pub time: DateTime<Utc>,
    pub bids: Vec<OrderBookEntry>,
    pub asks: Vec<OrderBookEntry>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.bids.iter().max_by(|a, b| a.price.cmp(&b.price))
    }

    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.asks.iter().min_by(|a, b| a.price.cmp(&b.price))
    }

    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookLevelOne {
    pub instrument_code: InstrumentCode,
    pub time: DateTime<Utc>,
    pub bids: TopOfBook,
    pub asks: TopOfBook,
}

/// Price action for one granularity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candlestick {
    pub last_sequence: u64,
    pub instrument_code: InstrumentCode,
    pub granularity: Granularity,
    #[serde(with = "crate::types::decimal::exact")]
    pub high: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub low: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub open: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub close: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub volume: Decimal,
    pub time: DateTime<Utc>,
}

/// 24h statistics for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTick {
    pub instrument_code: InstrumentCode,
    pub sequence: u64,
    pub state: InstrumentState,
    pub is_frozen: u8,
    #[serde(with = "crate::types::decimal::exact")]
    pub quote_volume: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub base_volume: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub last_price: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub best_bid: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub best_ask: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub price_change: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub price_change_percentage: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub high: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub low: Decimal,
}

impl MarketTick {
    pub fn frozen(&self) -> bool {
        self.is_frozen != 0
    }
}

/// Last trade on an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTick {
    pub instrument_code: InstrumentCode,
    #[serde(with = "crate::types::decimal::exact")]
    pub price: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    #[serde(with = "crate::types::decimal::exact")]
    pub volume: Decimal,
    pub sequence: u64,
    pub taker_side: OrderSide,
    pub time: DateTime<Utc>,
    /// Epoch milliseconds.
    pub trade_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTime {
    pub iso: DateTime<Utc>,
    pub epoch_millis: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAddress {
    pub address: String,
    #[serde(
        rename = "destinationTag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_tag: Option<String>,
    pub enabled: bool,
    pub can_create_more: bool,
    pub is_smart_contract: bool,
}

/// Bank details for EUR deposits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiatDepositInfo {
    pub iban: String,
    pub bic: String,
    pub bank: String,
    pub address: String,
    pub receiver: String,
    pub receiver_address: String,
    pub unique_payment_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawResult {
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    pub recipient: String,
    #[serde(
        rename = "destinationTag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_tag: Option<String>,
    #[serde(with = "crate::types::decimal::exact")]
    pub fee: Decimal,
}
