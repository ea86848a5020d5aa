use crate::domain::charge::{
    Amount, CardDetails, CardToken, ChargeRequest, ClientProfile, Expiry, PaymentSource,
};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a recurring-billing batch file.
///
/// Card columns stay raw strings here; `into_request` validates them and
/// applies token precedence.
#[derive(Debug, Deserialize)]
struct ChargeRow {
    client_id: String,
    first_name: String,
    last_name: String,
    email: String,
    invoice_id: String,
    description: String,
    amount: Decimal,
    cardnum: Option<String>,
    expdate: Option<String>,
    cvv: Option<String>,
    token: Option<String>,
    #[serde(default)]
    store: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ChargeRow {
    fn into_request(self) -> Result<ChargeRequest> {
        let token = non_empty(self.token).map(CardToken::new);

        // Card columns are only parsed when no token short-circuits them.
        let card = if token.is_none() {
            match non_empty(self.cardnum) {
                Some(number) => {
                    let raw = non_empty(self.expdate).ok_or_else(|| {
                        PaymentError::Validation(format!(
                            "invoice {}: card row missing expdate",
                            self.invoice_id
                        ))
                    })?;
                    Some(CardDetails {
                        number,
                        expiry: Expiry::parse(&raw)?,
                        cvv: non_empty(self.cvv),
                    })
                }
                None => None,
            }
        } else {
            None
        };

        Ok(ChargeRequest {
            client: ClientProfile {
                client_id: self.client_id,
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                ..Default::default()
            },
            invoice_id: self.invoice_id,
            description: self.description,
            amount: Amount::new(self.amount)?,
            source: PaymentSource::from_parts(token, card)?,
            store_card: self.store,
        })
    }
}

/// Reads charge requests from a CSV batch source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<ChargeRequest>`. It handles whitespace trimming and flexible
/// record lengths automatically.
pub struct ChargeReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ChargeReader<R> {
    /// Creates a new `ChargeReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates charge rows.
    pub fn charges(self) -> impl Iterator<Item = Result<ChargeRequest>> {
        self.reader
            .into_deserialize::<ChargeRow>()
            .map(|result| result.map_err(PaymentError::from).and_then(ChargeRow::into_request))
    }
}
