use crate::domain::charge::CaptureOutcome;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// How a processed charge ended up, as written to the receipt file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Approved,
    TokenIssued,
    Declined,
}

/// One receipt row per processed charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub invoice_id: String,
    pub status: ReceiptStatus,
    pub transaction_id: Option<String>,
    pub token: Option<String>,
}

impl Receipt {
    pub fn from_outcome(invoice_id: &str, outcome: &CaptureOutcome) -> Self {
        match outcome {
            CaptureOutcome::Approved { transaction_id } => Self {
                invoice_id: invoice_id.to_string(),
                status: ReceiptStatus::Approved,
                transaction_id: Some(transaction_id.clone()),
                token: None,
            },
            CaptureOutcome::TokenIssued {
                transaction_id,
                token,
            } => Self {
                invoice_id: invoice_id.to_string(),
                status: ReceiptStatus::TokenIssued,
                transaction_id: Some(transaction_id.clone()),
                token: Some(token.as_str().to_string()),
            },
            CaptureOutcome::Declined { .. } => Self {
                invoice_id: invoice_id.to_string(),
                status: ReceiptStatus::Declined,
                transaction_id: None,
                token: None,
            },
        }
    }
}

/// Writes receipt rows to a CSV sink.
pub struct ReceiptWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReceiptWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_receipt(&mut self, receipt: &Receipt) -> Result<()> {
        self.writer.serialize(receipt)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and hands back the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| crate::error::PaymentError::Io(std::io::Error::other(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::charge::CardToken;

    fn render(receipts: &[Receipt]) -> String {
        let mut writer = ReceiptWriter::new(Vec::new());
        for receipt in receipts {
            writer.write_receipt(receipt).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_receipt_rows() {
        let rows = [
            Receipt::from_outcome(
                "1001",
                &CaptureOutcome::TokenIssued {
                    transaction_id: "tx1".to_string(),
                    token: CardToken::new("tok_abc"),
                },
            ),
            Receipt::from_outcome("1002", &CaptureOutcome::Declined { reason: None }),
        ];
        let output = render(&rows);

        assert!(output.starts_with("invoice_id,status,transaction_id,token\n"));
        assert!(output.contains("1001,token_issued,tx1,tok_abc"));
        assert!(output.contains("1002,declined,,"));
    }

    #[test]
    fn test_approved_receipt_has_no_token() {
        let receipt = Receipt::from_outcome(
            "1003",
            &CaptureOutcome::Approved {
                transaction_id: "tx9".to_string(),
            },
        );
        assert_eq!(receipt.status, ReceiptStatus::Approved);
        assert_eq!(receipt.token, None);
        assert!(render(&[receipt]).contains("1003,approved,tx9,"));
    }
}
