use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokenpay::application::adapter::TokenGateway;
use tokenpay::domain::charge::{
    Amount, CaptureOutcome, CardDetails, CardToken, ChargeRequest, ClientProfile, Expiry,
    PaymentSource,
};
use tokenpay::domain::config::GatewayConfig;
use tokenpay::domain::ports::{ActivityResult, PaymentModule};
use tokenpay::domain::wire::{GatewayResponse, WireRequest};
use tokenpay::infrastructure::memory::{
    RecordedActivityLog, RecordedTransactions, ScriptedTransport,
};

fn config() -> GatewayConfig {
    GatewayConfig {
        api_login: "login".to_string(),
        transaction_key: "key".to_string(),
        md5_hash: String::new(),
        test_mode: true,
    }
}

fn gateway() -> (
    TokenGateway,
    ScriptedTransport,
    RecordedActivityLog,
    RecordedTransactions,
) {
    let transport = ScriptedTransport::new();
    let activity = RecordedActivityLog::new();
    let recorder = RecordedTransactions::new();
    let gateway = TokenGateway::new(
        config(),
        Box::new(transport.clone()),
        Box::new(activity.clone()),
        Box::new(recorder.clone()),
    );
    (gateway, transport, activity, recorder)
}

fn manual_charge(store_card: bool) -> ChargeRequest {
    ChargeRequest {
        client: ClientProfile {
            client_id: "42".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: Some("12 Analytical Row".to_string()),
            city: Some("London".to_string()),
            ..Default::default()
        },
        invoice_id: "1001".to_string(),
        description: "Hosting renewal".to_string(),
        amount: Amount::new(dec!(10.00)).unwrap(),
        source: PaymentSource::Card(CardDetails {
            number: "4111111111111111".to_string(),
            expiry: Expiry::parse("1225").unwrap(),
            cvv: None,
        }),
        store_card,
    }
}

#[tokio::test]
async fn test_capture_and_store_token() {
    let (gateway, transport, activity, recorder) = gateway();
    transport
        .push_response(GatewayResponse {
            code: 1,
            transaction_id: Some("tx1".to_string()),
            token: Some("tok_abc".to_string()),
            reason: None,
        })
        .await;

    let outcome = gateway.capture(manual_charge(true)).await.unwrap();

    assert_eq!(
        outcome,
        CaptureOutcome::TokenIssued {
            transaction_id: "tx1".to_string(),
            token: CardToken::new("tok_abc"),
        }
    );

    let records = recorder.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].client_id, "42");
    assert_eq!(records[0].invoice_id, "1001");
    assert_eq!(records[0].number, "tx1");
    assert_eq!(records[0].amount_in, dec!(10.00));
    assert_eq!(records[0].fee, Decimal::ZERO);

    let entries = activity.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result, ActivityResult::Success);
}

#[tokio::test]
async fn test_declined_charge_reports_failure() {
    let (gateway, transport, activity, recorder) = gateway();
    transport
        .push_response(GatewayResponse {
            code: 2,
            transaction_id: None,
            token: None,
            reason: None,
        })
        .await;

    let outcome = gateway.capture(manual_charge(true)).await.unwrap();

    assert_eq!(outcome, CaptureOutcome::Declined { reason: None });
    assert!(recorder.records().await.is_empty());

    let entries = activity.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result, ActivityResult::Failure);
}

#[tokio::test]
async fn test_recurring_charge_by_token() {
    let (gateway, transport, _, recorder) = gateway();
    transport
        .push_response(GatewayResponse {
            code: 1,
            transaction_id: Some("tx2".to_string()),
            token: None,
            reason: None,
        })
        .await;

    let request = ChargeRequest {
        source: PaymentSource::Stored(CardToken::new("tok_abc")),
        store_card: false,
        ..manual_charge(false)
    };
    let outcome = gateway.capture(request).await.unwrap();

    assert_eq!(
        outcome,
        CaptureOutcome::Approved {
            transaction_id: "tx2".to_string(),
        }
    );
    assert_eq!(recorder.records().await.len(), 1);

    // the stored token funds the charge; raw card fields never leave the host
    let requests = transport.requests().await;
    match &requests[0] {
        WireRequest::Charge(fields) => {
            assert_eq!(fields.x_card_token.as_deref(), Some("tok_abc"));
            assert_eq!(fields.x_card_num, None);
            assert_eq!(fields.x_exp_date, None);
            assert_eq!(fields.x_card_code, None);
        }
        other => panic!("expected a charge request, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sequential_captures_are_independent() {
    let (gateway, transport, _, recorder) = gateway();
    for code in [1, 2, 1] {
        transport
            .push_response(GatewayResponse {
                code,
                transaction_id: (code == 1).then(|| "tx".to_string()),
                token: None,
                reason: None,
            })
            .await;
    }

    let first = gateway.capture(manual_charge(false)).await.unwrap();
    let second = gateway.capture(manual_charge(false)).await.unwrap();
    let third = gateway.capture(manual_charge(false)).await.unwrap();

    assert!(matches!(first, CaptureOutcome::Approved { .. }));
    assert!(matches!(second, CaptureOutcome::Declined { .. }));
    assert!(matches!(third, CaptureOutcome::Approved { .. }));
    assert_eq!(recorder.records().await.len(), 2);
}
