use crate::domain::ports::GatewayTransport;
use crate::domain::wire::{GatewayResponse, WireRequest};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

const LIVE_ENDPOINT: &str = "https://secure.tokenpay-gateway.com/api/transact";
const TEST_ENDPOINT: &str = "https://sandbox.tokenpay-gateway.com/api/transact";

/// Knobs for the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Overrides the live/test endpoint selection. Used by staging setups
    /// and tests.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl TransportSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Form-posting transport for the gateway's `x_*` protocol.
///
/// Submits each request as a form-urlencoded POST and parses the JSON
/// answer. The endpoint follows the configuration's test-mode flag unless
/// overridden through `TransportSettings`.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(test_mode: bool, settings: TransportSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .build()?;
        let endpoint = settings.endpoint.unwrap_or_else(|| {
            if test_mode { TEST_ENDPOINT } else { LIVE_ENDPOINT }.to_string()
        });
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GatewayTransport for HttpTransport {
    async fn submit(&self, request: &WireRequest) -> Result<GatewayResponse> {
        let pairs = request.form_pairs()?;
        let res = self
            .client
            .post(&self.endpoint)
            .form(&pairs)
            .send()
            .await?;
        tracing::debug!(url = %self.endpoint, status = %res.status(), "gateway http exchange");
        let res = res.error_for_status()?;
        Ok(res.json::<GatewayResponse>().await?)
    }
}
