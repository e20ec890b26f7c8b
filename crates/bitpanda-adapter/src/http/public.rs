/*
[INPUT]:  Instrument codes and query parameters
[OUTPUT]: Market data (currencies, instruments, books, candles, ticks)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{BitpandaClient, BitpandaError, Result};
use crate::types::{
    Candlestick, CandlesticksQuery, Currency, FeeGroup, Instrument, InstrumentCode, MarketTick,
    OrderBook, OrderBookLevel, OrderBookLevelOne, PriceTick, PriceTicksQuery, ServerTime,
};
use reqwest::Method;

impl BitpandaClient {
    /// List all currencies
    ///
    /// GET /currencies
    pub async fn currencies(&self) -> Result<Vec<Currency>> {
        let builder = self.public_request(Method::GET, &["currencies"])?;
        self.send_json(builder).await
    }

    /// List all instruments
    ///
    /// GET /instruments
    pub async fn instruments(&self) -> Result<Vec<Instrument>> {
        let builder = self.public_request(Method::GET, &["instruments"])?;
        self.send_json(builder).await
    }

    /// List the fee schedules
    ///
    /// GET /fees
    pub async fn fee_groups(&self) -> Result<Vec<FeeGroup>> {
        let builder = self.public_request(Method::GET, &["fees"])?;
        self.send_json(builder).await
    }

    /// Get candlesticks for an instrument
    ///
    /// GET /candlesticks/{instrument_code}?unit={unit}&period={period}&from={from}&to={to}
    pub async fn candlesticks(
        &self,
        instrument_code: &InstrumentCode,
        query: &CandlesticksQuery,
    ) -> Result<Vec<Candlestick>> {
        let path = ["candlesticks", instrument_code.as_str()];
        let builder = self.public_request(Method::GET, &path)?.query(query);
        self.send_json(builder).await
    }

    /// Get a level two or level three order book snapshot
    ///
    /// GET /order-book/{instrument_code}?level={level}
    pub async fn order_book(
        &self,
        instrument_code: &InstrumentCode,
        level: OrderBookLevel,
    ) -> Result<OrderBook> {
        if level == OrderBookLevel::One {
            return Err(BitpandaError::InvalidRequest(
                "level one books have a different shape, use order_book_level_one".to_string(),
            ));
        }
        let path = ["order-book", instrument_code.as_str()];
        let builder = self
            .public_request(Method::GET, &path)?
            .query(&[("level", level.as_u8())]);
        self.send_json(builder).await
    }

    /// Get the best bid and ask
    ///
    /// GET /order-book/{instrument_code}?level=1
    pub async fn order_book_level_one(
        &self,
        instrument_code: &InstrumentCode,
    ) -> Result<OrderBookLevelOne> {
        let path = ["order-book", instrument_code.as_str()];
        let builder = self
            .public_request(Method::GET, &path)?
            .query(&[("level", OrderBookLevel::One.as_u8())]);
        self.send_json(builder).await
    }

    /// Get market statistics for all instruments
    ///
    /// GET /market-ticker
    pub async fn market_ticker(&self) -> Result<Vec<MarketTick>> {
        let builder = self.public_request(Method::GET, &["market-ticker"])?;
        self.send_json(builder).await
    }

    /// Get market statistics for one instrument
    ///
    /// GET /market-ticker/{instrument_code}
    pub async fn market_tick(&self, instrument_code: &InstrumentCode) -> Result<MarketTick> {
        let path = ["market-ticker", instrument_code.as_str()];
        let builder = self.public_request(Method::GET, &path)?;
        self.send_json(builder).await
    }

    /// Get price ticks for an instrument
    ///
    /// GET /price-ticks/{instrument_code}?from={from}&to={to}
    pub async fn price_ticks(
        &self,
        instrument_code: &InstrumentCode,
        query: &PriceTicksQuery,
    ) -> Result<Vec<PriceTick>> {
        let path = ["price-ticks", instrument_code.as_str()];
        let builder = self.public_request(Method::GET, &path)?.query(query);
        self.send_json(builder).await
    }

    /// Get the exchange server time
    ///
    /// GET /time
    pub async fn server_time(&self) -> Result<ServerTime> {
        let builder = self.public_request(Method::GET, &["time"])?;
        self.send_json(builder).await
    }
}
