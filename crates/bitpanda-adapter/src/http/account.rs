/*
[INPUT]:  API token and account parameters
[OUTPUT]: Account data (balances, deposits, withdrawals, fees)
[POS]:    HTTP layer - account endpoints (require bearer token)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use crate::http::{BitpandaClient, Result};
use crate::types::{
    Account, AccountFees, CreateDepositAddress, CurrencyCode, DepositAddress, FeeMode,
    FiatDepositInfo, TradingVolume, Withdraw, WithdrawResult,
};
use reqwest::Method;

impl BitpandaClient {
    /// Query account balances
    ///
    /// GET /account/balances
    pub async fn balances(&self) -> Result<Account> {
        let builder = self.private_request(Method::GET, &["account", "balances"])?;
        self.send_json(builder).await
    }

    /// Get the deposit address of a crypto currency
    ///
    /// GET /account/deposit/crypto/{currency_code}
    pub async fn deposit_address(&self, currency: &CurrencyCode) -> Result<DepositAddress> {
        let path = ["account", "deposit", "crypto", currency.as_str()];
        let builder = self.private_request(Method::GET, &path)?;
        self.send_json(builder).await
    }

    /// Create a new deposit address for a crypto currency
    ///
    /// POST /account/deposit/crypto
    pub async fn create_deposit_address(&self, currency: &CurrencyCode) -> Result<DepositAddress> {
        let body = CreateDepositAddress {
            currency: currency.clone(),
        };
        let builder = self
            .private_request(Method::POST, &["account", "deposit", "crypto"])?
            .json(&body);
        self.send_json(builder).await
    }

    /// Get bank details for EUR deposits
    ///
    /// GET /account/deposit/fiat/EUR
    pub async fn fiat_deposit_info(&self) -> Result<FiatDepositInfo> {
        let builder = self.private_request(Method::GET, &["account", "deposit", "fiat", "EUR"])?;
        self.send_json(builder).await
    }

    /// Withdraw crypto to an external address
    ///
    /// POST /account/withdraw/crypto
    pub async fn withdraw(&self, req: &Withdraw) -> Result<WithdrawResult> {
        let builder = self
            .private_request(Method::POST, &["account", "withdraw", "crypto"])?
            .json(req);
        self.send_json(builder).await
    }

    /// Query fee tier and running trading volume
    ///
    /// GET /account/fees
    pub async fn account_fees(&self) -> Result<AccountFees> {
        let builder = self.private_request(Method::GET, &["account", "fees"])?;
        self.send_json(builder).await
    }

    /// Enable or disable fee collection in BEST
    ///
    /// POST /account/fees
    pub async fn set_fee_mode(&self, mode: FeeMode) -> Result<AccountFees> {
        let builder = self
            .private_request(Method::POST, &["account", "fees"])?
            .json(&mode);
        self.send_json(builder).await
    }

    /// Query the 30 day trading volume
    ///
    /// GET /account/trading-volume
    pub async fn trading_volume(&self) -> Result<TradingVolume> {
        let builder = self.private_request(Method::GET, &["account", "trading-volume"])?;
        self.send_json(builder).await
    }
}
