use std::sync::Arc;

use stripe_integration::PaymentsGateway;

mod capture;
mod dispatch;
mod lookup;
mod refund;

pub use capture::resolve_and_capture;
pub use dispatch::{dispatch_tool, route_tool, ToolRoute};
pub use lookup::{
    CustomerLookup, MissingCustomerLookup, MissingPaymentLookup, PaymentLookup, PaymentRecord,
};
pub use refund::{resolve_and_refund, RefundOutcome, RefundRequest};

/// Collaborators shared by every relay invocation. No request state lives
/// here; each dispatch is fully request-scoped.
#[derive(Clone)]
pub struct RelayContext {
    pub gateway: Arc<dyn PaymentsGateway>,
    pub customers: Arc<dyn CustomerLookup>,
    pub payments: Arc<dyn PaymentLookup>,
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
