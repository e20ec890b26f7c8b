/*
[INPUT]:  Exchange JSON payloads
[OUTPUT]: Test results for wire type decoding and encoding
[POS]:    Integration tests - serialization contract
[UPDATE]: When wire types change
*/

mod common;

use bitpanda_adapter::{
    Account, AccountFees, BitpandaError, Candlestick, CreateOrder, Currency, CurrencyCode,
    DepositAddress, Fee, FeeGroup, FiatDepositInfo, Instrument, InstrumentCode, MarketTick, Order,
    OrderBook, OrderBookLevelOne, OrderHistory, OrderHistoryEntry, OrderSide, OrderStatus,
    OrderType, Paginated, PriceTick, ServerTime, TimeUnit, Trade, TradeHistory,
    TradeHistoryEntry, Withdraw, WithdrawResult,
};
use common::{authenticated_client, sample_order_json, setup_mock_server};
use rstest::rstest;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Decode `payload` into `T`, encode it again and compare the JSON values.
fn assert_lossless<T>(payload: Value)
where
    T: DeserializeOwned + Serialize + PartialEq + std::fmt::Debug,
{
    let decoded: T = serde_json::from_value(payload.clone()).expect("decode");
    let encoded = serde_json::to_value(&decoded).expect("encode");
    assert_eq!(encoded, payload);

    let decoded_again: T = serde_json::from_value(encoded).expect("decode again");
    assert_eq!(decoded_again, decoded);
}

#[test]
fn sample_order_decodes_as_documented() {
    let order: Order = serde_json::from_str(sample_order_json()).expect("order");

    assert_eq!(order.side, OrderSide::Buy);
    assert_eq!(order.order_type, OrderType::Limit);
    assert_eq!(order.status, OrderStatus::Open);
    assert_eq!(order.price.map(|p| p.to_string()).as_deref(), Some("30000.00"));
    assert_eq!(order.time_last_updated, None);
    assert_eq!(order.instrument_code, InstrumentCode::BtcEur);
}

#[test]
fn sample_order_round_trips() {
    let payload: Value = serde_json::from_str(sample_order_json()).expect("json");
    assert_lossless::<Order>(payload);
}

#[rstest]
#[case::new_status("status", "PARTIALLY_MATCHED")]
#[case::new_side("side", "SHORT")]
#[case::new_type("type", "TRAILING_STOP")]
#[case::new_instrument("instrument_code", "DOT_EUR")]
fn unknown_enum_values_decode_and_survive(#[case] field: &str, #[case] raw: &str) {
    let mut payload: Value = serde_json::from_str(sample_order_json()).expect("json");
    payload[field] = json!(raw);

    let order: Order = serde_json::from_value(payload.clone()).expect("unknown value must decode");
    let encoded = serde_json::to_value(&order).expect("encode");

    assert_eq!(encoded[field], json!(raw));
}

#[rstest]
#[case("2021-01-01T01:00:00+01:00", "2021-01-01T00:00:00Z")]
#[case("2021-06-30T23:59:59.123-02:00", "2021-07-01T01:59:59.123Z")]
#[case("2021-01-01T00:00:00.000001Z", "2021-01-01T00:00:00.000001Z")]
fn timestamps_are_normalized_to_utc(#[case] wire: &str, #[case] expected: &str) {
    let mut payload: Value = serde_json::from_str(sample_order_json()).expect("json");
    payload["time"] = json!(wire);

    let order: Order = serde_json::from_value(payload).expect("order");
    let encoded = serde_json::to_value(&order).expect("encode");

    assert_eq!(encoded["time"], json!(expected));
}

#[test]
fn stop_order_round_trips_with_all_optionals() {
    assert_lossless::<Order>(json!({
        "order_id": "66756a10-3e86-48f4-9678-b634c4b135b2",
        "account_id": "1eb2ad5d-55f1-40b5-bc92-7dc05869e905",
        "instrument_code": "BTC_EUR",
        "amount": "1234.5678",
        "filled_amount": "1234.5678",
        "side": "SELL",
        "type": "STOP",
        "status": "FILLED_FULLY",
        "sequence": 123456789,
        "price": "1234.5678",
        "reason": "MANUAL",
        "time": "2019-12-06T09:56:59.123Z",
        "time_last_updated": "2019-12-06T09:57:01.456Z",
        "time_triggered": "2019-12-06T09:57:00Z",
        "trigger_price": "1234.00"
    }));
}

#[test]
fn account_round_trips() {
    assert_lossless::<Account>(json!({
        "account_id": "e4eaaaf2-d142-11e1-b3e4-080027620cdd",
        "balances": [
            {
                "account_id": "e4eaaaf2-d142-11e1-b3e4-080027620cdd",
                "currency_code": "BTC",
                "change": "0.50000000",
                "available": "10.0",
                "locked": "1.1234567",
                "sequence": 5,
                "time": "2019-04-01T13:39:17.155Z"
            },
            {
                "account_id": "e4eaaaf2-d142-11e1-b3e4-080027620cdd",
                "currency_code": "DOGE",
                "change": "-1",
                "available": "0",
                "locked": "0",
                "sequence": 6,
                "time": "2019-04-01T13:39:17.155Z"
            }
        ]
    }));
}

#[test]
fn order_book_level_three_round_trips() {
    assert_lossless::<OrderBook>(json!({
        "instrument_code": "BTC_EUR",
        "time": "2019-10-08T12:20:15.123Z",
        "bids": [{"price": "8886.21", "amount": "0.0002", "order_id": "6d1a3c8f"}],
        "asks": [{"price": "8889.97", "amount": "0.125", "order_id": "4d44ac6c"}]
    }));
}

#[test]
fn order_book_level_one_round_trips() {
    assert_lossless::<OrderBookLevelOne>(json!({
        "instrument_code": "BTC_EUR",
        "time": "2019-10-08T12:20:15Z",
        "bids": {"value": {"price": "8886.21", "amount": "0.0002", "number_of_orders": 1}},
        "asks": {"value": {"price": "8889.97", "amount": "0.125", "number_of_orders": 2}}
    }));
}

#[test]
fn candlestick_round_trips() {
    assert_lossless::<Candlestick>(json!({
        "last_sequence": 12345,
        "instrument_code": "BTC_EUR",
        "granularity": {"unit": "HOURS", "period": 4},
        "high": "9000.00",
        "low": "8500.00",
        "open": "8600.00",
        "close": "8950.00",
        "volume": "123.456",
        "time": "2019-10-08T15:59:59.999Z"
    }));
}

#[test]
fn candlestick_with_unknown_unit_decodes() {
    let candle: Candlestick = serde_json::from_value(json!({
        "last_sequence": 1,
        "instrument_code": "BTC_EUR",
        "granularity": {"unit": "YEARS", "period": 1},
        "high": "1", "low": "1", "open": "1", "close": "1", "volume": "0",
        "time": "2019-10-08T15:59:59Z"
    }))
    .expect("candlestick");

    assert_eq!(candle.granularity.unit, TimeUnit::Other("YEARS".to_string()));
    assert!(!candle.granularity.is_supported());
}

#[test]
fn market_tick_round_trips() {
    assert_lossless::<MarketTick>(json!({
        "instrument_code": "ETH_EUR",
        "sequence": 77,
        "state": "POST_ONLY",
        "is_frozen": 1,
        "quote_volume": "1234.56",
        "base_volume": "12.3",
        "last_price": "170.00",
        "best_bid": "169.99",
        "best_ask": "170.01",
        "price_change": "1.5",
        "price_change_percentage": "0.89",
        "high": "172.00",
        "low": "165.00"
    }));
}

#[test]
fn price_tick_round_trips() {
    assert_lossless::<PriceTick>(json!({
        "instrument_code": "BTC_EUR",
        "price": "8137.28",
        "amount": "0.22269",
        "volume": "1812.1",
        "sequence": 1,
        "taker_side": "BUY",
        "time": "2019-10-08T15:21:13.123Z",
        "trade_timestamp": 1570548073123i64
    }));
}

#[test]
fn fees_round_trip() {
    assert_lossless::<FeeGroup>(json!({
        "fee_group_id": "default",
        "display_text": "The standard fee plan.",
        "fee_tiers": [
            {"fee_group_id": "default", "volume": "0.0", "maker_fee": "0.1", "taker_fee": "0.2"},
            {"fee_group_id": "default", "volume": "100.0", "maker_fee": "0.09", "taker_fee": "0.19"}
        ],
        "fee_discount_rate": "25.0",
        "minimum_price_value": "0.12"
    }));

    assert_lossless::<AccountFees>(json!({
        "account_id": "acc-1",
        "running_trading_volume": "0.0",
        "fee_group_id": "default",
        "fee_tiers": [
            {"fee_group_id": "default", "volume": "0.0", "maker_fee": "0.1", "taker_fee": "0.2"}
        ],
        "active_fee_tier": {"fee_group_id": "default", "volume": "0.0", "maker_fee": "0.1", "taker_fee": "0.2"},
        "collect_fees_in_best": false,
        "fee_discount_rate": "25.0",
        "minimum_price_value": "0.12"
    }));
}

#[test]
fn server_time_round_trips() {
    assert_lossless::<ServerTime>(json!({
        "iso": "2019-10-08T15:21:13.123Z",
        "epoch_millis": 1570548073123u64
    }));
}

#[rstest]
#[case::more_pages(json!("next-cursor"), false)]
#[case::empty_cursor(json!(""), true)]
fn trade_history_cursor_marks_page(#[case] cursor: Value, #[case] last_page: bool) {
    let page: TradeHistory = serde_json::from_value(json!({
        "trade_history": [],
        "max_page_size": 100,
        "cursor": cursor
    }))
    .expect("trade history");

    assert_eq!(page.is_last_page(), last_page);
}

#[test]
fn final_trade_history_page_has_no_cursor() {
    let payload = json!({"trade_history": []});
    let page: TradeHistory = serde_json::from_value(payload.clone()).expect("trade history");

    assert!(page.is_last_page());
    assert_eq!(page.cursor(), None);
    assert_eq!(page.max_page_size, None);
    assert_eq!(serde_json::to_value(&page).expect("encode"), payload);
}

#[test]
fn decimal_fields_are_encoded_as_strings() {
    let order: Order = serde_json::from_str(sample_order_json()).expect("order");
    let encoded = serde_json::to_value(&order).expect("encode");

    assert_eq!(encoded["amount"], json!("0.5"));
    assert_eq!(encoded["filled_amount"], json!("0"));
    assert_eq!(encoded["price"], json!("30000.00"));

    let currency: CurrencyCode = serde_json::from_value(json!("EUR")).expect("currency");
    assert_eq!(currency, CurrencyCode::Eur);
}

fn trade_json() -> Value {
    json!({
        "trade_id": "fdff2bcc-37d6-4a2d-92a5-46e09c868664",
        "order_id": "36bb2437-7402-4794-bf26-4bdf03526439",
        "account_id": "a4c699f6-338d-4a26-941f-8f9853bfc4b9",
        "amount": "1.4",
        "side": "BUY",
        "instrument_code": "BTC_EUR",
        "price": "7341.4",
        "time": "2019-09-27T15:05:32.564Z",
        "sequence": 48670
    })
}

fn fee_json() -> Value {
    json!({
        "fee_amount": "0.0014",
        "fee_currency": "BTC",
        "fee_percentage": "0.1",
        "fee_group_id": "default",
        "fee_type": "TAKER",
        "running_trading_volume": "0.0"
    })
}

#[test]
fn trade_and_fee_round_trip() {
    assert_lossless::<Trade>(trade_json());
    assert_lossless::<Fee>(fee_json());
    assert_lossless::<TradeHistoryEntry>(json!({"trade": trade_json(), "fee": fee_json()}));
}

#[test]
fn trade_without_sequence_round_trips() {
    let mut payload = trade_json();
    payload
        .as_object_mut()
        .expect("object")
        .remove("sequence");

    assert_lossless::<Trade>(payload);
}

#[test]
fn order_history_entry_with_trades_round_trips() {
    let mut order: Value = serde_json::from_str(sample_order_json()).expect("json");
    order["status"] = json!("FILLED");
    order["filled_amount"] = json!("0.25");

    let entry = json!({
        "order": order,
        "trades": [{"trade": trade_json(), "fee": fee_json()}]
    });
    assert_lossless::<OrderHistoryEntry>(entry.clone());
    assert_lossless::<OrderHistory>(json!({
        "order_history": [entry],
        "max_page_size": 100,
        "cursor": "next-cursor"
    }));
}

#[test]
fn currency_and_instrument_round_trip() {
    assert_lossless::<Currency>(json!({"code": "BTC", "precision": 8}));
    assert_lossless::<Currency>(json!({"code": "BEST"}));
    assert_lossless::<Instrument>(json!({
        "state": "ACTIVE",
        "base": {"code": "BTC", "precision": 8},
        "quote": {"code": "EUR", "precision": 2},
        "amount_precision": 5,
        "market_precision": 2,
        "min_size": "10.0"
    }));
}

#[test]
fn deposit_and_withdraw_results_round_trip() {
    assert_lossless::<DepositAddress>(json!({
        "address": "rBitpandaXRP",
        "destinationTag": "123456",
        "enabled": true,
        "can_create_more": false,
        "is_smart_contract": false
    }));
    assert_lossless::<DepositAddress>(json!({
        "address": "0x2a1b",
        "enabled": true,
        "can_create_more": true,
        "is_smart_contract": true
    }));
    assert_lossless::<WithdrawResult>(json!({
        "amount": "1234.5678",
        "recipient": "rBitpandaXRP",
        "destinationTag": "99",
        "fee": "0.25"
    }));
    assert_lossless::<FiatDepositInfo>(json!({
        "iban": "AT611904300234573201",
        "bic": "BKAUATWW",
        "bank": "Example Bank AG",
        "address": "Schottengasse 6-8, 1010 Wien",
        "receiver": "Bitpanda GmbH",
        "receiver_address": "Campus 2, Jakov-Lind-Strasse 2, 1020 Wien",
        "unique_payment_number": "BPGE3DSSPX"
    }));
}

#[test]
fn request_bodies_round_trip() {
    assert_lossless::<CreateOrder>(json!({
        "instrument_code": "BTC_EUR",
        "type": "STOP",
        "side": "SELL",
        "amount": "0.50000",
        "price": "29000.00",
        "trigger_price": "29500.00",
        "client_id": "82d36d23-a1d1-4e24-a8d0-1b5a0d36e0d7"
    }));
    assert_lossless::<CreateOrder>(json!({
        "instrument_code": "ETH_EUR",
        "type": "MARKET",
        "side": "BUY",
        "amount": "1"
    }));
    assert_lossless::<Withdraw>(json!({
        "currency": "XRP",
        "amount": "25.000001",
        "recipient": {"address": "rBitpandaXRP", "destination_tag": "42"}
    }));
}

#[rstest]
#[case::amount_underflow("amount", "0.000000000000000000000000000001")]
#[case::amount_too_many_digits("amount", "0.12345678901234567890123456789")]
#[case::price_overflow("price", "123456789012345678901234567890")]
fn decimals_that_would_round_are_rejected(#[case] field: &str, #[case] raw: &str) {
    let mut payload: Value = serde_json::from_str(sample_order_json()).expect("json");
    payload[field] = json!(raw);

    let err = serde_json::from_value::<Order>(payload).expect_err("must not round");
    assert!(err.to_string().contains(raw), "{err}");
}

#[test]
fn decimal_at_full_scale_is_kept() {
    let mut payload: Value = serde_json::from_str(sample_order_json()).expect("json");
    payload["amount"] = json!("0.0000000000000000000000000001");

    let order: Order = serde_json::from_value(payload.clone()).expect("order");
    assert!(!order.amount.is_zero());
    assert_eq!(serde_json::to_value(&order).expect("encode"), payload);
}

#[tokio::test]
async fn inexact_decimal_in_response_is_a_decode_error() {
    let server = setup_mock_server().await;
    let mut order: Value = serde_json::from_str(sample_order_json()).expect("json");
    order["filled_amount"] = json!("0.000000000000000000000000000001");
    let body = json!({"order": order, "trades": []}).to_string();

    Mock::given(method("GET"))
        .and(path("/account/orders/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.clone(), "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = authenticated_client(&server)
        .order("abc")
        .await
        .expect_err("filled_amount must not be rounded to zero");

    match err {
        BitpandaError::Decode { source, body: kept } => {
            assert_eq!(kept, body);
            assert!(source.to_string().contains("0.000000000000000000000000000001"));
        }
        other => panic!("Expected Decode error variant, got {other:?}"),
    }
}
