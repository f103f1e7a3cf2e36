use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use shared::domain::{CustomerId, PaymentIntentId};
use tracing::debug;
use url::Url;

use crate::{CatalogTool, Charge, PaymentIntent, PaymentsGateway, Refund, RefundCreate};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Thin client over the provider's form-encoded REST wire format.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    config: StripeConfig,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        let base = self.config.api_base.trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .with_context(|| format!("invalid stripe endpoint for path {path}"))
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        debug!(path, "stripe GET");
        let response = self
            .http
            .get(self.endpoint(path)?)
            .query(query)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .with_context(|| format!("stripe GET {path} failed"))?;
        Self::into_payload(response).await
    }

    async fn post_form(&self, path: &str, fields: &[(String, String)]) -> anyhow::Result<Value> {
        debug!(path, "stripe POST");
        let response = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(&self.config.secret_key)
            .form(fields)
            .send()
            .await
            .with_context(|| format!("stripe POST {path} failed"))?;
        Self::into_payload(response).await
    }

    async fn into_payload(response: reqwest::Response) -> anyhow::Result<Value> {
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .context("stripe returned a non-JSON body")?;
        if !status.is_success() {
            let message = payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("unknown provider error");
            bail!("stripe rejected the call ({status}): {message}");
        }
        Ok(payload)
    }
}

#[async_trait]
impl PaymentsGateway for StripeClient {
    async fn retrieve_payment_intent(&self, id: &PaymentIntentId) -> anyhow::Result<PaymentIntent> {
        let payload = self.get(&format!("payment_intents/{id}"), &[]).await?;
        serde_json::from_value(payload).context("unexpected payment intent shape")
    }

    async fn list_customer_charges(
        &self,
        customer: &CustomerId,
        limit: u8,
    ) -> anyhow::Result<Vec<Charge>> {
        #[derive(Deserialize)]
        struct ChargeList {
            data: Vec<Charge>,
        }

        let payload = self
            .get(
                "charges",
                &[
                    ("customer", customer.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        let list: ChargeList =
            serde_json::from_value(payload).context("unexpected charge list shape")?;
        Ok(list.data)
    }

    async fn create_refund(&self, refund: RefundCreate) -> anyhow::Result<Refund> {
        let mut fields = vec![("charge".to_string(), refund.charge.to_string())];
        if let Some(amount) = refund.amount {
            fields.push(("amount".to_string(), amount.to_string()));
        }
        if let Some(reason) = &refund.reason {
            fields.push(("reason".to_string(), reason.clone()));
        }
        if let Some(metadata) = &refund.metadata {
            for (key, value) in metadata {
                fields.push((format!("metadata[{key}]"), value.clone()));
            }
        }

        let payload = self.post_form("refunds", &fields).await?;
        serde_json::from_value(payload).context("unexpected refund shape")
    }

    async fn capture_payment_intent(
        &self,
        id: &PaymentIntentId,
        amount_to_capture: Option<i64>,
    ) -> anyhow::Result<PaymentIntent> {
        let mut fields = Vec::new();
        if let Some(amount) = amount_to_capture {
            fields.push(("amount_to_capture".to_string(), amount.to_string()));
        }

        let payload = self
            .post_form(&format!("payment_intents/{id}/capture"), &fields)
            .await?;
        serde_json::from_value(payload).context("unexpected payment intent shape")
    }

    async fn run_catalog_tool(
        &self,
        tool: CatalogTool,
        params_json: &str,
    ) -> anyhow::Result<Value> {
        let params: Value =
            serde_json::from_str(params_json).context("catalog tool parameters are not JSON")?;

        match tool {
            CatalogTool::RefundsCreate => self.post_form("refunds", &form_fields(&params)).await,
            CatalogTool::RefundsRetrieve => {
                let id = require_param(&params, &["refund_id", "id"])?;
                self.get(&format!("refunds/{id}"), &[]).await
            }
            CatalogTool::CustomersRetrieve => {
                let id = require_param(&params, &["customer_id", "customer", "id"])?;
                self.get(&format!("customers/{id}"), &[]).await
            }
            CatalogTool::PaymentIntentsRetrieve => {
                let id = require_param(&params, &["payment_intent_id", "id"])?;
                self.get(&format!("payment_intents/{id}"), &[]).await
            }
            CatalogTool::PaymentIntentsUpdate => {
                let id = require_param(&params, &["payment_intent_id", "id"])?;
                let fields: Vec<_> = form_fields(&params)
                    .into_iter()
                    .filter(|(key, _)| key != "payment_intent_id" && key != "id")
                    .collect();
                self.post_form(&format!("payment_intents/{id}"), &fields).await
            }
        }
    }
}

/// Flattens a JSON parameter object into the provider's form encoding.
/// Nested objects become `parent[child]` pairs; nulls and arrays are
/// dropped.
fn form_fields(params: &Value) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let Some(object) = params.as_object() else {
        return fields;
    };

    for (key, value) in object {
        match value {
            Value::String(text) => fields.push((key.clone(), text.clone())),
            Value::Number(number) => fields.push((key.clone(), number.to_string())),
            Value::Bool(flag) => fields.push((key.clone(), flag.to_string())),
            Value::Object(nested) => {
                for (nested_key, nested_value) in nested {
                    let rendered = match nested_value {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    fields.push((format!("{key}[{nested_key}]"), rendered));
                }
            }
            Value::Null | Value::Array(_) => {}
        }
    }

    fields
}

fn require_param(params: &Value, keys: &[&str]) -> anyhow::Result<String> {
    keys.iter()
        .find_map(|key| {
            params
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
        .map(str::to_string)
        .ok_or_else(|| anyhow!("missing required parameter: one of {}", keys.join(", ")))
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
