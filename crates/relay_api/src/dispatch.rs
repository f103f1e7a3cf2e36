use serde_json::{json, Value};
use shared::error::ApiException;
use stripe_integration::CatalogTool;
use tracing::info;

use crate::{capture, refund, RelayContext};

/// Handler a tool name resolves to. Alias tables decide first, the catalog
/// second; substring matching is the explicit lowest-priority rule so the
/// precedence stays auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRoute {
    Refund,
    Capture,
    Catalog(CatalogTool),
}

const REFUND_TOOL_ALIASES: &[&str] = &["refunds_create", "create_refund", "stripe_refunds_create"];

const CAPTURE_TOOL_ALIASES: &[&str] = &[
    "paymentIntents_capture",
    "capture_payment_intent",
    "stripe_paymentIntents_capture",
    "capturePaymentIntent",
    "stripe_capture_payment_intent",
];

pub fn route_tool(tool_name: &str) -> Option<ToolRoute> {
    if REFUND_TOOL_ALIASES.contains(&tool_name) {
        return Some(ToolRoute::Refund);
    }
    if CAPTURE_TOOL_ALIASES.contains(&tool_name) || tool_name.contains("capture_payment_intent") {
        return Some(ToolRoute::Capture);
    }
    if let Some(tool) = CatalogTool::lookup(tool_name) {
        return Some(ToolRoute::Catalog(tool));
    }
    if tool_name.contains("refund") {
        return Some(ToolRoute::Refund);
    }
    if tool_name.contains("capture") {
        return Some(ToolRoute::Capture);
    }
    None
}

pub async fn dispatch_tool(
    ctx: &RelayContext,
    tool_name: &str,
    parameters: Value,
) -> Result<Value, ApiException> {
    // A missing parameters field arrives as null; treat it as an empty set.
    let parameters = if parameters.is_null() {
        json!({})
    } else {
        parameters
    };

    let route = route_tool(tool_name)
        .ok_or_else(|| ApiException::not_found(format!("unknown tool: {tool_name}")))?;
    info!(tool_name, ?route, "dispatching tool call");

    match route {
        ToolRoute::Refund => {
            let request = refund::RefundRequest::from_parameters(&parameters)?;
            let outcome = refund::resolve_and_refund(ctx, request).await?;
            serde_json::to_value(outcome).map_err(|err| ApiException::upstream(err.to_string()))
        }
        ToolRoute::Capture => {
            let intent = capture::resolve_and_capture(ctx, &parameters).await?;
            serde_json::to_value(intent).map_err(|err| ApiException::upstream(err.to_string()))
        }
        ToolRoute::Catalog(tool) => ctx
            .gateway
            .run_catalog_tool(tool, &parameters.to_string())
            .await
            .map_err(|err| ApiException::upstream(err.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
