use async_trait::async_trait;
use shared::domain::{CustomerId, PaymentIntentId};

mod catalog;
mod client;
mod types;

pub use catalog::{CatalogTool, CATALOG};
pub use client::{StripeClient, StripeConfig, DEFAULT_API_BASE};
pub use types::{
    Charge, ChargeRef, Customer, PaymentIntent, PaymentIntentRef, Refund, RefundCreate,
};

/// Payments provider calls the relay depends on. The concrete backend is
/// [`StripeClient`]; tests substitute their own impls.
#[async_trait]
pub trait PaymentsGateway: Send + Sync {
    async fn retrieve_payment_intent(&self, id: &PaymentIntentId) -> anyhow::Result<PaymentIntent>;

    /// Most recent charges first, bounded by `limit`.
    async fn list_customer_charges(
        &self,
        customer: &CustomerId,
        limit: u8,
    ) -> anyhow::Result<Vec<Charge>>;

    async fn create_refund(&self, refund: RefundCreate) -> anyhow::Result<Refund>;

    async fn capture_payment_intent(
        &self,
        id: &PaymentIntentId,
        amount_to_capture: Option<i64>,
    ) -> anyhow::Result<PaymentIntent>;

    /// Generic invocation of a catalog tool: the parameters travel as the
    /// JSON-serialized record the calling agent produced.
    async fn run_catalog_tool(
        &self,
        tool: CatalogTool,
        params_json: &str,
    ) -> anyhow::Result<serde_json::Value>;
}
