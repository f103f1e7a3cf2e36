use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::domain::{ChargeId, CustomerId, PaymentIntentId};
use shared::error::ApiException;
use stripe_integration::{Refund, RefundCreate};
use tracing::info;

use crate::lookup::PaymentRecord;
use crate::RelayContext;

pub const REFUND_IDENTIFIER_FIELDS: &[&str] = &[
    "charge_id",
    "payment_intent_id",
    "order_identifier",
    "customer_identifier",
];

const DEFAULT_REFUND_REASON: &str = "requested_by_customer";
const CUSTOMER_CHARGE_LOOKBACK: u8 = 10;

/// Inputs of one refund invocation; lives only for the duration of the call.
/// Exactly one identifier wins, in the order of [`REFUND_IDENTIFIER_FIELDS`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefundRequest {
    #[serde(default)]
    pub charge_id: Option<String>,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    #[serde(default, alias = "order_id")]
    pub order_identifier: Option<String>,
    #[serde(default, alias = "customer_id")]
    pub customer_identifier: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl RefundRequest {
    pub fn from_parameters(parameters: &Value) -> Result<Self, ApiException> {
        serde_json::from_value(parameters.clone())
            .map_err(|err| ApiException::invalid_input(format!("malformed refund parameters: {err}")))
    }
}

/// The issued refund plus, for order/customer paths, a line naming what
/// triggered it.
#[derive(Debug, Clone, Serialize)]
pub struct RefundOutcome {
    #[serde(flatten)]
    pub refund: Refund,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn resolve_and_refund(
    ctx: &RelayContext,
    request: RefundRequest,
) -> Result<RefundOutcome, ApiException> {
    let charge_id = present(&request.charge_id);
    let payment_intent_id = present(&request.payment_intent_id);
    let order_identifier = present(&request.order_identifier);
    let customer_identifier = present(&request.customer_identifier);

    if let Some(charge_id) = charge_id {
        let refund = issue_refund(ctx, ChargeId::new(charge_id), &request).await?;
        return Ok(RefundOutcome {
            refund,
            message: None,
        });
    }

    if let Some(intent_id) = payment_intent_id {
        let intent = ctx
            .gateway
            .retrieve_payment_intent(&PaymentIntentId::new(intent_id))
            .await
            .map_err(upstream)?;
        let charge = intent.latest_charge.as_ref().ok_or_else(|| {
            ApiException::invalid_state(format!(
                "payment intent {} has no charge to refund",
                intent.id
            ))
        })?;
        let refund = issue_refund(ctx, charge.charge_id().clone(), &request).await?;
        return Ok(RefundOutcome {
            refund,
            message: None,
        });
    }

    if let Some(order) = order_identifier {
        match ctx
            .payments
            .find_payment_by_identifier(order)
            .await
            .map_err(upstream)?
        {
            Some(record) => {
                let charge_id = charge_from_payment_record(&record).ok_or_else(|| {
                    ApiException::invalid_state(format!(
                        "payment for order {order} has no charge to refund"
                    ))
                })?;
                info!(order, charge = %charge_id, "resolved refund target via order lookup");
                let refund = issue_refund(ctx, charge_id, &request).await?;
                return Ok(RefundOutcome {
                    refund,
                    message: Some(format!("refund issued for order {order}")),
                });
            }
            None if customer_identifier.is_none() => {
                return Err(ApiException::not_found(format!(
                    "no payment found for order {order}"
                )));
            }
            // The order did not resolve but a customer identifier is still
            // available; fall through to the customer path.
            None => {}
        }
    }

    if let Some(identifier) = customer_identifier {
        let customer = ctx
            .customers
            .find_customer_by_identifier(identifier)
            .await
            .map_err(upstream)?
            .ok_or_else(|| {
                ApiException::not_found(format!("no customer matching {identifier}"))
            })?;
        let most_recent = most_recent_charge(ctx, &customer.id).await?;
        info!(identifier, charge = %most_recent, "resolved refund target via customer lookup");
        let refund = issue_refund(ctx, most_recent, &request).await?;
        let who = customer
            .name
            .clone()
            .or_else(|| customer.email.clone())
            .unwrap_or_else(|| customer.id.to_string());
        return Ok(RefundOutcome {
            refund,
            message: Some(format!("refund issued for most recent charge of {who}")),
        });
    }

    Err(ApiException::invalid_input(format!(
        "refund requires one of: {}",
        REFUND_IDENTIFIER_FIELDS.join(", ")
    )))
}

/// Charge behind a located payment: a direct reference wins; otherwise an
/// expanded payment intent may carry its latest charge.
fn charge_from_payment_record(record: &PaymentRecord) -> Option<ChargeId> {
    if let Some(charge) = &record.charge {
        return Some(charge.charge_id().clone());
    }
    record
        .payment_intent
        .as_ref()?
        .latest_charge()
        .map(|charge| charge.charge_id().clone())
}

async fn most_recent_charge(
    ctx: &RelayContext,
    customer_id: &CustomerId,
) -> Result<ChargeId, ApiException> {
    let charges = ctx
        .gateway
        .list_customer_charges(customer_id, CUSTOMER_CHARGE_LOOKBACK)
        .await
        .map_err(upstream)?;
    // The provider lists newest first.
    charges.first().map(|charge| charge.id.clone()).ok_or_else(|| {
        ApiException::not_found(format!("customer {customer_id} has no charges to refund"))
    })
}

async fn issue_refund(
    ctx: &RelayContext,
    charge: ChargeId,
    request: &RefundRequest,
) -> Result<Refund, ApiException> {
    let create = RefundCreate {
        charge,
        amount: request.amount,
        reason: Some(
            request
                .reason
                .clone()
                .unwrap_or_else(|| DEFAULT_REFUND_REASON.to_string()),
        ),
        metadata: request.metadata.clone(),
    };
    ctx.gateway.create_refund(create).await.map_err(upstream)
}

fn upstream(err: anyhow::Error) -> ApiException {
    ApiException::upstream(err.to_string())
}

fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "tests/refund_tests.rs"]
mod tests;
