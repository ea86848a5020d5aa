use crate::domain::charge::{CaptureOutcome, CardToken, ChargeRequest};
use crate::domain::config::ConfigField;
use crate::domain::wire::{GatewayResponse, WireRequest};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Host-facing capability port: what a billing platform asks of a payment
/// module during checkout and recurring billing.
#[async_trait]
pub trait PaymentModule: Send + Sync {
    /// Configuration schema the host's admin panel renders.
    fn configuration(&self) -> &'static [ConfigField];

    /// Currency codes the module settles; empty means all.
    fn supported_currencies(&self) -> &'static [&'static str];

    /// Attempts to charge the given card or token.
    async fn capture(&self, request: ChargeRequest) -> Result<CaptureOutcome>;

    /// Revokes a stored token before the client enters a new card.
    async fn delete_token(&self, token: &CardToken) -> Result<()>;
}

/// Network boundary to the gateway.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    async fn submit(&self, request: &WireRequest) -> Result<GatewayResponse>;
}

/// Success/failure tag on a host activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityResult {
    Success,
    Failure,
}

/// One entry for the host's gateway activity feed. `output` is already
/// masked; see `domain::mask`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub output: serde_json::Value,
    pub result: ActivityResult,
}

/// Host collaborator receiving gateway activity entries.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn log(&self, entry: ActivityEntry) -> Result<()>;
}

/// One settled charge for the host's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub client_id: String,
    pub invoice_id: String,
    pub description: String,
    pub number: String,
    pub amount_in: Decimal,
    pub fee: Decimal,
}

/// Host collaborator recording settled charges.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    async fn record(&self, record: TransactionRecord) -> Result<()>;
}

pub type PaymentModuleBox = Box<dyn PaymentModule>;
pub type GatewayTransportBox = Box<dyn GatewayTransport>;
pub type ActivityLogBox = Box<dyn ActivityLog>;
pub type TransactionRecorderBox = Box<dyn TransactionRecorder>;
