use std::sync::Arc;

use serde_json::json;
use shared::error::ErrorCode;

use super::*;
use crate::test_support::{relay_context, GatewayCall, RecordingGateway};

#[tokio::test]
async fn numeric_string_amount_is_rounded() {
    let gateway = Arc::new(RecordingGateway::default());
    let ctx = relay_context(Arc::clone(&gateway));

    let intent = resolve_and_capture(
        &ctx,
        &json!({ "payment_intent_id": "pi_cap", "amount": "150.7" }),
    )
    .await
    .expect("capture");

    assert_eq!(intent.amount_received, Some(151));
    assert_eq!(
        gateway.recorded(),
        vec![GatewayCall::CapturePaymentIntent {
            intent: "pi_cap".to_string(),
            amount: Some(151),
        }]
    );
}

#[tokio::test]
async fn numeric_amount_is_rounded_to_nearest_integer() {
    let gateway = Arc::new(RecordingGateway::default());
    let ctx = relay_context(Arc::clone(&gateway));

    resolve_and_capture(&ctx, &json!({ "payment_intent_id": "pi_cap", "amount": 200.4 }))
        .await
        .expect("capture");

    assert_eq!(
        gateway.recorded(),
        vec![GatewayCall::CapturePaymentIntent {
            intent: "pi_cap".to_string(),
            amount: Some(200),
        }]
    );
}

#[tokio::test]
async fn non_numeric_amount_string_requests_full_capture() {
    let gateway = Arc::new(RecordingGateway::default());
    let ctx = relay_context(Arc::clone(&gateway));

    resolve_and_capture(
        &ctx,
        &json!({ "payment_intent_id": "pi_cap", "amount": "everything" }),
    )
    .await
    .expect("capture");

    assert_eq!(
        gateway.recorded(),
        vec![GatewayCall::CapturePaymentIntent {
            intent: "pi_cap".to_string(),
            amount: None,
        }]
    );
}

#[tokio::test]
async fn first_non_empty_id_alias_wins() {
    let gateway = Arc::new(RecordingGateway::default());
    let ctx = relay_context(Arc::clone(&gateway));

    resolve_and_capture(
        &ctx,
        &json!({ "paymentIntentId": "  ", "payment_intent": "pi_alias" }),
    )
    .await
    .expect("capture");

    assert_eq!(
        gateway.recorded(),
        vec![GatewayCall::CapturePaymentIntent {
            intent: "pi_alias".to_string(),
            amount: None,
        }]
    );
}

#[tokio::test]
async fn missing_intent_id_is_invalid_input() {
    let gateway = Arc::new(RecordingGateway::default());
    let ctx = relay_context(Arc::clone(&gateway));

    let err = resolve_and_capture(&ctx, &json!({ "amount": 100 }))
        .await
        .expect_err("should fail");

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(gateway.recorded().is_empty());
}
