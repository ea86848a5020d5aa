use crate::domain::charge::{CaptureOutcome, CardToken, ChargeRequest};
use crate::domain::config::{CONFIG_SCHEMA, ConfigField, GatewayConfig, SUPPORTED_CURRENCIES};
use crate::domain::mask;
use crate::domain::ports::{
    ActivityEntry, ActivityLogBox, ActivityResult, GatewayTransportBox, PaymentModule,
    TransactionRecord, TransactionRecorderBox,
};
use crate::domain::wire::{
    ChargeFields, GatewayResponse, ResponseStatus, TokenDeleteFields, WireRequest,
};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Payment-gateway adapter with card tokenization.
///
/// `TokenGateway` owns an immutable configuration and boxed collaborator
/// ports; it keeps no per-call state, so the host may drive it concurrently
/// for different transactions.
///
/// # Arguments
///
/// * `transport` - The network boundary submitting wire requests.
/// * `activity_log` - The host's gateway activity feed.
/// * `recorder` - The host's ledger for settled charges.
pub struct TokenGateway {
    config: GatewayConfig,
    transport: GatewayTransportBox,
    activity_log: ActivityLogBox,
    recorder: TransactionRecorderBox,
}

impl TokenGateway {
    pub fn new(
        config: GatewayConfig,
        transport: GatewayTransportBox,
        activity_log: ActivityLogBox,
        recorder: TransactionRecorderBox,
    ) -> Self {
        Self {
            config,
            transport,
            activity_log,
            recorder,
        }
    }

    async fn log_exchange(
        &self,
        request: &WireRequest,
        response: &GatewayResponse,
        result: ActivityResult,
    ) -> Result<()> {
        let output = serde_json::json!({
            "request": mask::secure_serializable(request)?,
            "response": mask::secure_serializable(response)?,
        });
        self.activity_log.log(ActivityEntry { output, result }).await
    }
}

#[async_trait]
impl PaymentModule for TokenGateway {
    fn configuration(&self) -> &'static [ConfigField] {
        CONFIG_SCHEMA
    }

    fn supported_currencies(&self) -> &'static [&'static str] {
        SUPPORTED_CURRENCIES
    }

    async fn capture(&self, request: ChargeRequest) -> Result<CaptureOutcome> {
        self.config.validate()?;

        let wire = WireRequest::Charge(ChargeFields::build(&self.config, &request));
        let masked = mask::secure_serializable(&wire)?;
        tracing::debug!(invoice = %request.invoice_id, data = %masked, "gateway charge request");

        let response = self.transport.submit(&wire).await?;
        let masked = mask::secure_serializable(&response)?;
        tracing::debug!(invoice = %request.invoice_id, data = %masked, "gateway charge response");

        match response.status() {
            ResponseStatus::Approved => {
                self.log_exchange(&wire, &response, ActivityResult::Success)
                    .await?;

                let number = response.transaction_id.clone().unwrap_or_default();
                self.recorder
                    .record(TransactionRecord {
                        client_id: request.client.client_id.clone(),
                        invoice_id: request.invoice_id.clone(),
                        description: format!("Payment for invoice {}", request.invoice_id),
                        number: number.clone(),
                        amount_in: request.amount.value(),
                        fee: Decimal::ZERO,
                    })
                    .await?;

                // Hand the token back only if the client allowed storage.
                match response.token {
                    Some(token) if request.store_card => Ok(CaptureOutcome::TokenIssued {
                        transaction_id: number,
                        token: CardToken::new(token),
                    }),
                    _ => Ok(CaptureOutcome::Approved {
                        transaction_id: number,
                    }),
                }
            }
            ResponseStatus::Declined => {
                self.log_exchange(&wire, &response, ActivityResult::Failure)
                    .await?;
                Ok(CaptureOutcome::Declined {
                    reason: response.reason,
                })
            }
            ResponseStatus::Unknown(code) => Err(PaymentError::UnknownStatus(code)),
        }
    }

    async fn delete_token(&self, token: &CardToken) -> Result<()> {
        self.config.validate()?;

        let wire = WireRequest::TokenDelete(TokenDeleteFields::build(&self.config, token));
        // The gateway's verdict on a revoke is not interpreted; the stored
        // card is gone from the host either way.
        let response = self.transport.submit(&wire).await?;
        tracing::debug!(code = response.code, "token revoke response");
        Ok(())
    }
}
