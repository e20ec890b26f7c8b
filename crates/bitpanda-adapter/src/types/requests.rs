/*
[INPUT]:  Exchange API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::enums::{CurrencyCode, InstrumentCode, OrderSide, OrderType, TimeUnit};
use super::models::{Granularity, Instrument};

/// Body of `POST /account/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub instrument_code: InstrumentCode,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: OrderSide,
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    #[serde(
        default,
        with = "crate::types::decimal::exact_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(
        default,
        with = "crate::types::decimal::exact_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Reasons an order is refused before it is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("{0} orders require a price")]
    MissingPrice(OrderType),

    #[error("MARKET orders must not carry a price")]
    UnexpectedPrice,

    #[error("STOP orders require a trigger price")]
    MissingTriggerPrice,

    #[error("trigger price is only valid on STOP orders")]
    UnexpectedTriggerPrice,

    #[error("order is for {order} but instrument is {instrument}")]
    InstrumentMismatch {
        order: InstrumentCode,
        instrument: InstrumentCode,
    },

    #[error("amount {amount} is below the minimum size {min_size}")]
    BelowMinSize { amount: Decimal, min_size: Decimal },

    #[error("amount {amount} exceeds {precision} decimal places")]
    AmountPrecision { amount: Decimal, precision: u32 },

    #[error("price {price} exceeds {precision} decimal places")]
    PricePrecision { price: Decimal, precision: u32 },
}

impl CreateOrder {
    pub fn market(instrument_code: InstrumentCode, side: OrderSide, amount: Decimal) -> Self {
        Self {
            instrument_code,
            order_type: OrderType::Market,
            side,
            amount,
            price: None,
            trigger_price: None,
            client_id: None,
        }
    }

    pub fn limit(
        instrument_code: InstrumentCode,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            price: Some(price),
            order_type: OrderType::Limit,
            ..Self::market(instrument_code, side, amount)
        }
    }

    pub fn stop(
        instrument_code: InstrumentCode,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
        trigger_price: Decimal,
    ) -> Self {
        Self {
            price: Some(price),
            trigger_price: Some(trigger_price),
            order_type: OrderType::Stop,
            ..Self::market(instrument_code, side, amount)
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Attach a random UUID v4 client id.
    pub fn with_generated_client_id(self) -> Self {
        self.with_client_id(Uuid::new_v4().to_string())
    }

    /// Check the order shape and, when the instrument is known, its size
    /// and precision limits.
    ///
    /// Order types this crate does not know are only checked for a
    /// positive amount.
    pub fn validate(&self, instrument: Option<&Instrument>) -> Result<(), OrderValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(OrderValidationError::NonPositiveAmount(self.amount));
        }

        match self.order_type {
            OrderType::Market => {
                if self.price.is_some() {
                    return Err(OrderValidationError::UnexpectedPrice);
                }
                if self.trigger_price.is_some() {
                    return Err(OrderValidationError::UnexpectedTriggerPrice);
                }
            }
            OrderType::Limit => {
                if self.price.is_none() {
                    return Err(OrderValidationError::MissingPrice(OrderType::Limit));
                }
                if self.trigger_price.is_some() {
                    return Err(OrderValidationError::UnexpectedTriggerPrice);
                }
            }
            OrderType::Stop => {
                if self.price.is_none() {
                    return Err(OrderValidationError::MissingPrice(OrderType::Stop));
                }
                if self.trigger_price.is_none() {
                    return Err(OrderValidationError::MissingTriggerPrice);
                }
            }
            OrderType::Other(_) => {}
        }

        let Some(instrument) = instrument else {
            return Ok(());
        };

        let code = instrument.code();
        if code != self.instrument_code {
            return Err(OrderValidationError::InstrumentMismatch {
                order: self.instrument_code.clone(),
                instrument: code,
            });
        }
        if self.amount < instrument.min_size {
            return Err(OrderValidationError::BelowMinSize {
                amount: self.amount,
                min_size: instrument.min_size,
            });
        }
        if self.amount.normalize().scale() > instrument.amount_precision {
            return Err(OrderValidationError::AmountPrecision {
                amount: self.amount,
                precision: instrument.amount_precision,
            });
        }
        for price in [self.price, self.trigger_price].into_iter().flatten() {
            if price.normalize().scale() > instrument.market_precision {
                return Err(OrderValidationError::PricePrecision {
                    price,
                    precision: instrument.market_precision,
                });
            }
        }

        Ok(())
    }
}

/// Body of `POST /account/deposit/crypto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDepositAddress {
    pub currency: CurrencyCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<String>,
}

/// Body of `POST /account/withdraw/crypto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub currency: CurrencyCode,
    #[serde(with = "crate::types::decimal::exact")]
    pub amount: Decimal,
    pub recipient: Recipient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandlesticksQuery {
    pub unit: TimeUnit,
    pub period: u32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl CandlesticksQuery {
    pub fn new(granularity: Granularity, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            unit: granularity.unit,
            period: granularity.period,
            from,
            to,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriceTicksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_code: Option<InstrumentCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_cancelled_and_rejected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_just_filled_inactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_code: Option<InstrumentCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl OrderHistoryQuery {
    /// Same filters, positioned at `cursor`.
    pub fn next_page(&self, cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            ..self.clone()
        }
    }
}

impl TradeHistoryQuery {
    /// Same filters, positioned at `cursor`.
    pub fn next_page(&self, cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            ..self.clone()
        }
    }
}
