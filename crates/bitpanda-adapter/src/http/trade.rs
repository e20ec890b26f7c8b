/*
[INPUT]:  Order requests, history filters and API token
[OUTPUT]: Orders, trades and cancellation results
[POS]:    HTTP layer - trading endpoints (require bearer token)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::{BitpandaClient, Result};
use crate::types::{
    CancelledOrders, CreateOrder, InstrumentCode, Order, OrderHistory, OrderHistoryEntry,
    OrderHistoryQuery, TradeHistory, TradeHistoryEntry, TradeHistoryQuery,
};
use reqwest::Method;
use tracing::debug;

impl BitpandaClient {
    /// Create a new order
    ///
    /// POST /account/orders
    ///
    /// The order shape is validated locally before it is sent.
    pub async fn create_order(&self, req: &CreateOrder) -> Result<Order> {
        req.validate(None)?;
        debug!(
            instrument_code = %req.instrument_code,
            order_type = %req.order_type,
            side = %req.side,
            "creating order"
        );
        let builder = self
            .private_request(Method::POST, &["account", "orders"])?
            .json(req);
        self.send_json(builder).await
    }

    /// Query one page of orders
    ///
    /// GET /account/orders?from=&to=&instrument_code=&max_page_size=&cursor=
    pub async fn orders(&self, query: &OrderHistoryQuery) -> Result<OrderHistory> {
        let builder = self
            .private_request(Method::GET, &["account", "orders"])?
            .query(query);
        self.send_json(builder).await
    }

    /// Query a single order with its trades
    ///
    /// GET /account/orders/{order_id}
    pub async fn order(&self, order_id: &str) -> Result<OrderHistoryEntry> {
        let path = ["account", "orders", order_id];
        let builder = self.private_request(Method::GET, &path)?;
        self.send_json(builder).await
    }

    /// Cancel a single order
    ///
    /// DELETE /account/orders/{order_id}
    pub async fn cancel_order(&self, order_id: &str) -> Result<()> {
        let path = ["account", "orders", order_id];
        let builder = self.private_request(Method::DELETE, &path)?;
        self.send_empty(builder).await
    }

    /// Cancel all open orders, optionally restricted to one instrument
    ///
    /// DELETE /account/orders?instrument_code={instrument_code}
    pub async fn cancel_all_orders(
        &self,
        instrument_code: Option<&InstrumentCode>,
    ) -> Result<CancelledOrders> {
        let mut builder = self.private_request(Method::DELETE, &["account", "orders"])?;
        if let Some(code) = instrument_code {
            builder = builder.query(&[("instrument_code", code.as_str())]);
        }
        self.send_json(builder).await
    }

    /// Query the trades of one order
    ///
    /// GET /account/orders/{order_id}/trades
    pub async fn order_trades(&self, order_id: &str) -> Result<TradeHistory> {
        let path = ["account", "orders", order_id, "trades"];
        let builder = self.private_request(Method::GET, &path)?;
        self.send_json(builder).await
    }

    /// Query one page of trades
    ///
    /// GET /account/trades?from=&to=&instrument_code=&max_page_size=&cursor=
    pub async fn trades(&self, query: &TradeHistoryQuery) -> Result<TradeHistory> {
        let builder = self
            .private_request(Method::GET, &["account", "trades"])?
            .query(query);
        self.send_json(builder).await
    }

    /// Query a single trade with its fee
    ///
    /// GET /account/trades/{trade_id}
    pub async fn trade(&self, trade_id: &str) -> Result<TradeHistoryEntry> {
        let path = ["account", "trades", trade_id];
        let builder = self.private_request(Method::GET, &path)?;
        self.send_json(builder).await
    }
}
