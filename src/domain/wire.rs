use crate::domain::charge::{ChargeRequest, PaymentSource};
use crate::domain::config::GatewayConfig;
use crate::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Action tag the gateway expects on a token revoke request.
pub const REMOVE_TOKEN_ACTION: &str = "Remove Token";

/// Outbound form fields for a charge, in the gateway's `x_*` vocabulary.
///
/// The card block is mutually exclusive with `x_card_token`; `build` fills
/// one or the other from the request's `PaymentSource`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeFields {
    pub x_login: String,
    pub x_tran_key: String,
    pub x_first_name: String,
    pub x_last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_phone: Option<String>,
    pub x_email: String,
    pub x_cust_id: String,
    pub x_invoice_num: String,
    pub x_description: String,
    pub x_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_card_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_card_num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_exp_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_card_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_test_request: Option<String>,
}

impl ChargeFields {
    pub fn build(config: &GatewayConfig, request: &ChargeRequest) -> Self {
        let (x_card_token, x_card_num, x_exp_date, x_card_code) = match &request.source {
            PaymentSource::Stored(token) => (Some(token.as_str().to_string()), None, None, None),
            PaymentSource::Card(card) => (
                None,
                Some(card.number.clone()),
                Some(card.expiry.to_string()),
                card.cvv.clone(),
            ),
        };

        Self {
            x_login: config.api_login.clone(),
            x_tran_key: config.transaction_key.clone(),
            x_first_name: request.client.first_name.clone(),
            x_last_name: request.client.last_name.clone(),
            x_address: request.client.address.clone(),
            x_city: request.client.city.clone(),
            x_state: request.client.state.clone(),
            x_zip: request.client.postcode.clone(),
            x_country: request.client.country.clone(),
            x_phone: request.client.phone.clone(),
            x_email: request.client.email.clone(),
            x_cust_id: request.client.client_id.clone(),
            x_invoice_num: request.invoice_id.clone(),
            x_description: request.description.clone(),
            x_amount: request.amount.to_string(),
            x_card_token,
            x_card_num,
            x_exp_date,
            x_card_code,
            x_test_request: config.test_mode.then(|| "TRUE".to_string()),
        }
    }
}

/// Outbound fields revoking a stored token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenDeleteFields {
    pub x_login: String,
    pub x_tran_key: String,
    pub x_card_token: String,
    pub x_action: String,
}

impl TokenDeleteFields {
    pub fn build(config: &GatewayConfig, token: &crate::domain::charge::CardToken) -> Self {
        Self {
            x_login: config.api_login.clone(),
            x_tran_key: config.transaction_key.clone(),
            x_card_token: token.as_str().to_string(),
            x_action: REMOVE_TOKEN_ACTION.to_string(),
        }
    }
}

/// A fully built request as handed to the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireRequest {
    Charge(ChargeFields),
    TokenDelete(TokenDeleteFields),
}

impl WireRequest {
    /// Flattens the request into the key/value pairs a form-urlencoded POST
    /// carries.
    pub fn form_pairs(&self) -> Result<Vec<(String, String)>> {
        let serde_json::Value::Object(map) = serde_json::to_value(self)? else {
            return Err(serde_json::Error::custom("wire request is not an object").into());
        };
        Ok(map
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect())
    }
}

/// Parsed gateway answer: a status code plus the optional transaction id and
/// reusable token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub code: u32,
    #[serde(rename = "Transaction ID", default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(rename = "Token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "Reason", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GatewayResponse {
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::from_code(self.code)
    }
}

/// The two documented gateway verdicts, plus everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Approved,
    Declined,
    Unknown(u32),
}

impl ResponseStatus {
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Approved,
            2 => Self::Declined,
            other => Self::Unknown(other),
        }
    }
}
