/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bitpanda-adapter tests

use bitpanda_adapter::{BitpandaClient, ClientConfig, Credentials};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, authenticated with [`mock_api_token`]
#[allow(dead_code)]
pub fn authenticated_client(server: &MockServer) -> BitpandaClient {
    let mut client = BitpandaClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    client.set_credentials(Credentials::new(mock_api_token()));
    client
}

/// Mock API token for testing
pub fn mock_api_token() -> String {
    "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

/// Order payload from the exchange documentation
#[allow(dead_code)]
pub fn sample_order_json() -> &'static str {
    r#"{"order_id":"abc","account_id":"u1","instrument_code":"BTC_EUR","amount":"0.5","filled_amount":"0","side":"BUY","type":"LIMIT","status":"OPEN","price":"30000.00","time":"2021-01-01T00:00:00Z"}"#
}
