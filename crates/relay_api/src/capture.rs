use serde_json::Value;
use shared::domain::PaymentIntentId;
use shared::error::ApiException;
use stripe_integration::PaymentIntent;

use crate::RelayContext;

/// Field names under which callers supply the intent id; first non-empty
/// wins.
const PAYMENT_INTENT_FIELD_ALIASES: &[&str] =
    &["payment_intent_id", "paymentIntentId", "payment_intent", "id"];

pub async fn resolve_and_capture(
    ctx: &RelayContext,
    parameters: &Value,
) -> Result<PaymentIntent, ApiException> {
    let intent_id = PAYMENT_INTENT_FIELD_ALIASES
        .iter()
        .find_map(|field| {
            parameters
                .get(*field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
        .ok_or_else(|| {
            ApiException::invalid_input(format!(
                "capture requires a payment intent id under one of: {}",
                PAYMENT_INTENT_FIELD_ALIASES.join(", ")
            ))
        })?;

    let amount = capture_amount(parameters.get("amount"));
    ctx.gateway
        .capture_payment_intent(&PaymentIntentId::new(intent_id), amount)
        .await
        .map_err(|err| ApiException::upstream(err.to_string()))
}

/// Numbers and numeric strings round to the nearest integer amount; any
/// other value (including a non-numeric string) requests a full capture.
fn capture_amount(raw: Option<&Value>) -> Option<i64> {
    let parsed = match raw? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !parsed.is_finite() {
        return None;
    }
    Some(parsed.round() as i64)
}

#[cfg(test)]
#[path = "tests/capture_tests.rs"]
mod tests;
