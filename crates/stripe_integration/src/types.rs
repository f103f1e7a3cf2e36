use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::domain::{ChargeId, CustomerId, PaymentIntentId, RefundId};

/// A settled transaction capable of being refunded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub id: ChargeId,
    pub amount: i64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_intent: Option<PaymentIntentId>,
    #[serde(default)]
    pub refunded: bool,
    #[serde(default)]
    pub created: i64,
}

/// An authorized-but-not-necessarily-captured payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_received: Option<i64>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_charge: Option<ChargeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerId>,
}

/// A charge reference the provider returns either collapsed to a bare id or
/// expanded in place. All readers project through [`ChargeRef::charge_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChargeRef {
    Id(ChargeId),
    Expanded(Box<Charge>),
}

impl ChargeRef {
    pub fn charge_id(&self) -> &ChargeId {
        match self {
            Self::Id(id) => id,
            Self::Expanded(charge) => &charge.id,
        }
    }
}

/// Same collapsed-or-expanded split for payment-intent references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentIntentRef {
    Id(PaymentIntentId),
    Expanded(Box<PaymentIntent>),
}

impl PaymentIntentRef {
    pub fn intent_id(&self) -> &PaymentIntentId {
        match self {
            Self::Id(id) => id,
            Self::Expanded(intent) => &intent.id,
        }
    }

    /// The latest charge is only visible on an expanded reference.
    pub fn latest_charge(&self) -> Option<&ChargeRef> {
        match self {
            Self::Id(_) => None,
            Self::Expanded(intent) => intent.latest_charge.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub id: RefundId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<ChargeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Parameters of one refund create call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefundCreate {
    pub charge: ChargeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}
