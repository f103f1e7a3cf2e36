use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use shared::domain::{ChargeId, CustomerId, PaymentIntentId, RefundId};
use stripe_integration::{
    CatalogTool, Charge, ChargeRef, Customer, PaymentIntent, PaymentsGateway, Refund,
    RefundCreate,
};

use crate::lookup::{CustomerLookup, PaymentLookup, PaymentRecord};
use crate::RelayContext;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    RetrievePaymentIntent(String),
    ListCustomerCharges { customer: String, limit: u8 },
    CreateRefund(RefundCreate),
    CapturePaymentIntent { intent: String, amount: Option<i64> },
    RunCatalogTool { tool: CatalogTool, params_json: String },
}

/// In-memory gateway that records every capability invocation.
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    payment_intents: Mutex<HashMap<String, PaymentIntent>>,
    customer_charges: Mutex<HashMap<String, Vec<Charge>>>,
}

impl RecordingGateway {
    pub fn with_payment_intent(self, intent: PaymentIntent) -> Self {
        self.payment_intents
            .lock()
            .expect("lock")
            .insert(intent.id.to_string(), intent);
        self
    }

    pub fn with_customer_charges(self, customer: &str, charges: Vec<Charge>) -> Self {
        self.customer_charges
            .lock()
            .expect("lock")
            .insert(customer.to_string(), charges);
        self
    }

    pub fn recorded(&self) -> Vec<GatewayCall> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn refunds_created(&self) -> Vec<RefundCreate> {
        self.recorded()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::CreateRefund(create) => Some(create),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().expect("lock").push(call);
    }
}

#[async_trait]
impl PaymentsGateway for RecordingGateway {
    async fn retrieve_payment_intent(&self, id: &PaymentIntentId) -> Result<PaymentIntent> {
        self.record(GatewayCall::RetrievePaymentIntent(id.to_string()));
        self.payment_intents
            .lock()
            .expect("lock")
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| anyhow!("unknown payment intent {id}"))
    }

    async fn list_customer_charges(
        &self,
        customer: &CustomerId,
        limit: u8,
    ) -> Result<Vec<Charge>> {
        self.record(GatewayCall::ListCustomerCharges {
            customer: customer.to_string(),
            limit,
        });
        Ok(self
            .customer_charges
            .lock()
            .expect("lock")
            .get(customer.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn create_refund(&self, refund: RefundCreate) -> Result<Refund> {
        self.record(GatewayCall::CreateRefund(refund.clone()));
        Ok(Refund {
            id: RefundId::new("re_test"),
            amount: refund.amount,
            charge: Some(refund.charge),
            status: Some("succeeded".to_string()),
            reason: refund.reason,
        })
    }

    async fn capture_payment_intent(
        &self,
        id: &PaymentIntentId,
        amount_to_capture: Option<i64>,
    ) -> Result<PaymentIntent> {
        self.record(GatewayCall::CapturePaymentIntent {
            intent: id.to_string(),
            amount: amount_to_capture,
        });
        let stored = self
            .payment_intents
            .lock()
            .expect("lock")
            .get(id.as_str())
            .cloned();
        let mut intent = stored.unwrap_or(PaymentIntent {
            id: id.clone(),
            amount: amount_to_capture.unwrap_or_default(),
            amount_received: None,
            status: "requires_capture".to_string(),
            latest_charge: None,
            customer: None,
        });
        intent.status = "succeeded".to_string();
        intent.amount_received = amount_to_capture.or(Some(intent.amount));
        Ok(intent)
    }

    async fn run_catalog_tool(&self, tool: CatalogTool, params_json: &str) -> Result<Value> {
        self.record(GatewayCall::RunCatalogTool {
            tool,
            params_json: params_json.to_string(),
        });
        Ok(json!({ "tool": tool.canonical_name(), "echo": params_json }))
    }
}

pub struct StaticCustomerLookup {
    customer: Option<Customer>,
    pub queried: Mutex<Vec<String>>,
}

impl StaticCustomerLookup {
    pub fn none() -> Self {
        Self {
            customer: None,
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn with(customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            queried: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CustomerLookup for StaticCustomerLookup {
    async fn find_customer_by_identifier(&self, identifier: &str) -> Result<Option<Customer>> {
        self.queried.lock().expect("lock").push(identifier.to_string());
        Ok(self.customer.clone())
    }
}

pub struct StaticPaymentLookup {
    payment: Option<PaymentRecord>,
    pub queried: Mutex<Vec<String>>,
}

impl StaticPaymentLookup {
    pub fn none() -> Self {
        Self {
            payment: None,
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn with(payment: PaymentRecord) -> Self {
        Self {
            payment: Some(payment),
            queried: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PaymentLookup for StaticPaymentLookup {
    async fn find_payment_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<PaymentRecord>> {
        self.queried.lock().expect("lock").push(identifier.to_string());
        Ok(self.payment.clone())
    }
}

pub fn relay_context(gateway: std::sync::Arc<RecordingGateway>) -> RelayContext {
    RelayContext {
        gateway,
        customers: std::sync::Arc::new(StaticCustomerLookup::none()),
        payments: std::sync::Arc::new(StaticPaymentLookup::none()),
    }
}

pub fn intent(id: &str, latest_charge: Option<&str>) -> PaymentIntent {
    PaymentIntent {
        id: PaymentIntentId::new(id),
        amount: 1000,
        amount_received: None,
        status: "succeeded".to_string(),
        latest_charge: latest_charge.map(|charge| ChargeRef::Id(ChargeId::new(charge))),
        customer: None,
    }
}

pub fn charge(id: &str, amount: i64) -> Charge {
    Charge {
        id: ChargeId::new(id),
        amount,
        currency: "usd".to_string(),
        customer: None,
        payment_intent: None,
        refunded: false,
        created: 0,
    }
}
