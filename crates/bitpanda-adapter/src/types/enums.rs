/*
[INPUT]:  Exchange API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a string-valued wire enum that keeps unrecognised values.
///
/// The exchange may list new currencies, instruments or statuses before
/// this crate knows about them, so every enum carries an `Other(String)`
/// variant and (de)serializes through `String`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Value not known to this version of the crate, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Wire representation of the value.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            /// `false` for values decoded into [`Self::Other`].
            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Currency codes listed on the exchange.
    pub enum CurrencyCode {
        Best => "BEST",
        Btc => "BTC",
        Eth => "ETH",
        Eur => "EUR",
        Miota => "MIOTA",
        Pan => "PAN",
        Usdt => "USDT",
        Xrp => "XRP",
    }
}

wire_enum! {
    /// Instrument codes, `{BASE}_{QUOTE}`.
    pub enum InstrumentCode {
        BestBtc => "BEST_BTC",
        BestEur => "BEST_EUR",
        BestUsdt => "BEST_USDT",
        BtcEur => "BTC_EUR",
        BtcUsdt => "BTC_USDT",
        EthBtc => "ETH_BTC",
        EthEur => "ETH_EUR",
        MiotaBtc => "MIOTA_BTC",
        MiotaEur => "MIOTA_EUR",
        PanBtc => "PAN_BTC",
        XrpBtc => "XRP_BTC",
        XrpEur => "XRP_EUR",
    }
}

wire_enum! {
    pub enum OrderType {
        Market => "MARKET",
        Limit => "LIMIT",
        Stop => "STOP",
    }
}

wire_enum! {
    pub enum OrderSide {
        Buy => "BUY",
        Sell => "SELL",
    }
}

wire_enum! {
    /// Order lifecycle status.
    ///
    /// `FILLED` means partially filled and still working; the `FILLED_*`
    /// variants are the terminal outcomes of a partially filled order.
    pub enum OrderStatus {
        Open => "OPEN",
        StopTriggered => "STOP_TRIGGERED",
        Filled => "FILLED",
        FilledFully => "FILLED_FULLY",
        FilledClosed => "FILLED_CLOSED",
        FilledRejected => "FILLED_REJECTED",
        Rejected => "REJECTED",
        Closed => "CLOSED",
        Failed => "FAILED",
    }
}

wire_enum! {
    /// Unit of a candlestick granularity.
    pub enum TimeUnit {
        Minutes => "MINUTES",
        Hours => "HOURS",
        Days => "DAYS",
        Weeks => "WEEKS",
        Months => "MONTHS",
    }
}

wire_enum! {
    pub enum InstrumentState {
        Active => "ACTIVE",
        Suspended => "SUSPENDED",
        InMaintenance => "IN_MAINTENANCE",
        PostOnly => "POST_ONLY",
        Closed => "CLOSED",
    }
}

wire_enum! {
    pub enum FeeType {
        Maker => "MAKER",
        Taker => "TAKER",
    }
}

impl InstrumentCode {
    /// Build the code for a base/quote pair.
    pub fn new(base: &CurrencyCode, quote: &CurrencyCode) -> Self {
        InstrumentCode::from(format!("{base}_{quote}"))
    }

    pub fn base(&self) -> Option<CurrencyCode> {
        self.as_str()
            .split_once('_')
            .map(|(base, _)| CurrencyCode::from(base))
    }

    pub fn quote(&self) -> Option<CurrencyCode> {
        self.as_str()
            .split_once('_')
            .map(|(_, quote)| CurrencyCode::from(quote))
    }
}

impl OrderStatus {
    /// Whether the order can no longer change.
    ///
    /// Unknown statuses are reported as non-terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::FilledFully
                | OrderStatus::FilledClosed
                | OrderStatus::FilledRejected
                | OrderStatus::Rejected
                | OrderStatus::Closed
                | OrderStatus::Failed
        )
    }

    /// Whether any part of the order has been executed.
    pub fn is_filled(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::FilledFully
                | OrderStatus::FilledClosed
                | OrderStatus::FilledRejected
        )
    }

    /// Whether an update from `self` to `next` respects the lifecycle.
    ///
    /// Statuses only move forward: `OPEN` may become `STOP_TRIGGERED`,
    /// `FILLED` or any terminal status; a partially filled order only ends
    /// in one of the `FILLED_*` outcomes; terminal statuses never change.
    /// Re-delivery of the current status is accepted. An unknown status on
    /// either side is accepted unless `self` is terminal.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }

        match (self, next) {
            (OrderStatus::Other(_), _) | (_, OrderStatus::Other(_)) => true,
            (OrderStatus::Open, OrderStatus::StopTriggered) => true,
            (OrderStatus::Open | OrderStatus::StopTriggered, next) => {
                next.is_terminal() || *next == OrderStatus::Filled
            }
            (OrderStatus::Filled, next) => {
                next.is_filled() && next.is_terminal()
            }
            _ => false,
        }
    }
}

/// Depth of an order book snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderBookLevel {
    /// Best bid and ask only.
    One,
    /// Price levels aggregated with order counts.
    Two,
    /// Every resting order with its id.
    #[default]
    Three,
}

impl OrderBookLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            OrderBookLevel::One => 1,
            OrderBookLevel::Two => 2,
            OrderBookLevel::Three => 3,
        }
    }
}

impl TryFrom<u8> for OrderBookLevel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OrderBookLevel::One),
            2 => Ok(OrderBookLevel::Two),
            3 => Ok(OrderBookLevel::Three),
            other => Err(other),
        }
    }
}
