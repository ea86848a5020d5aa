use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive monetary amount.
///
/// Wraps `rust_decimal::Decimal` so a zero or negative charge can never
/// reach the wire.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Card expiry as hosts supply it: `MMYY`, e.g. `1225` for December 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    month: u8,
    year: u8,
}

impl Expiry {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PaymentError::Validation(format!(
                "expiry must be MMYY, got {raw:?}"
            )));
        }
        let month: u8 = raw[..2]
            .parse()
            .map_err(|_| PaymentError::Validation(format!("invalid expiry month in {raw:?}")))?;
        let year: u8 = raw[2..]
            .parse()
            .map_err(|_| PaymentError::Validation(format!("invalid expiry year in {raw:?}")))?;
        if !(1..=12).contains(&month) {
            return Err(PaymentError::Validation(format!(
                "expiry month {month} out of range"
            )));
        }
        Ok(Self { month, year })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u8 {
        self.year
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.month, self.year)
    }
}

/// Opaque gateway-issued identifier standing in for a stored card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardToken(String);

impl CardToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw card fields for a manual (non-tokenized) charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub expiry: Expiry,
    /// Present only when the client typed it during a manual payment.
    pub cvv: Option<String>,
}

/// What funds a charge: a stored token or raw card details, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentSource {
    Stored(CardToken),
    Card(CardDetails),
}

impl PaymentSource {
    /// Builds a source from whatever the host handed over.
    ///
    /// Hosts that already tokenized a card keep sending the last four card
    /// digits alongside the token; the token wins.
    pub fn from_parts(token: Option<CardToken>, card: Option<CardDetails>) -> Result<Self> {
        match (token, card) {
            (Some(token), _) => Ok(Self::Stored(token)),
            (None, Some(card)) => Ok(Self::Card(card)),
            (None, None) => Err(PaymentError::Validation(
                "charge needs a token or card details".to_string(),
            )),
        }
    }
}

/// Customer identity and address fields as the host supplies them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientProfile {
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

/// Everything one capture call needs, passed explicitly per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub client: ClientProfile,
    pub invoice_id: String,
    pub description: String,
    pub amount: Amount,
    pub source: PaymentSource,
    /// Whether the client allowed the gateway token to be kept for reuse.
    pub store_card: bool,
}

/// What a capture reports back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// Charge went through; nothing to store.
    Approved { transaction_id: String },
    /// Charge went through and the gateway issued a reusable token the
    /// caller asked to keep.
    TokenIssued {
        transaction_id: String,
        token: CardToken,
    },
    /// The gateway refused the charge.
    Declined { reason: Option<String> },
}
