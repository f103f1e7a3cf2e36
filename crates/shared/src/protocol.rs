use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AgentId, BatchCallId, BatchCallStatus, ConversationId, PhoneNumberId, RecipientId,
    RecipientStatus,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCallSummary {
    pub id: BatchCallId,
    pub name: String,
    pub agent_id: AgentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub total_calls_dispatched: u32,
    pub total_calls_scheduled: u32,
    pub status: BatchCallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number_id: Option<PhoneNumberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_provider: Option<String>,
}

/// One addressable target within a campaign: a phone number or a
/// messaging-user id, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: RecipientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_user_id: Option<String>,
    pub status: RecipientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCallsEnvelope {
    pub batch_calls: Vec<BatchCallSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCallDetail {
    #[serde(flatten)]
    pub batch: BatchCallSummary,
    pub recipients: Vec<Recipient>,
}

/// Body of a relayed tool invocation. The field casing follows the calling
/// agent's convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    #[serde(rename = "toolName")]
    pub tool_name: String,
    #[serde(default)]
    pub parameters: serde_json::Value,
}
