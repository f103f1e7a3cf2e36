use anyhow::{anyhow, Result};
use async_trait::async_trait;
use stripe_integration::{ChargeRef, Customer, PaymentIntentRef};

/// Read-only directory lookup resolving a free-form customer identifier
/// (provider id, email, external reference) to a provider customer.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn find_customer_by_identifier(&self, identifier: &str) -> Result<Option<Customer>>;
}

/// Read-only lookup resolving an order identifier to the payment that
/// settled it.
#[async_trait]
pub trait PaymentLookup: Send + Sync {
    async fn find_payment_by_identifier(&self, identifier: &str)
        -> Result<Option<PaymentRecord>>;
}

/// Payment located for an order. Carries whichever reference the directory
/// stored: a charge, an expanded payment intent, or both.
#[derive(Debug, Clone, Default)]
pub struct PaymentRecord {
    pub charge: Option<ChargeRef>,
    pub payment_intent: Option<PaymentIntentRef>,
}

pub struct MissingCustomerLookup;

#[async_trait]
impl CustomerLookup for MissingCustomerLookup {
    async fn find_customer_by_identifier(&self, identifier: &str) -> Result<Option<Customer>> {
        Err(anyhow!(
            "customer lookup backend unavailable for identifier {identifier}"
        ))
    }
}

pub struct MissingPaymentLookup;

#[async_trait]
impl PaymentLookup for MissingPaymentLookup {
    async fn find_payment_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<PaymentRecord>> {
        Err(anyhow!(
            "payment lookup backend unavailable for identifier {identifier}"
        ))
    }
}
