use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(BatchCallId);
id_newtype!(RecipientId);
id_newtype!(AgentId);
id_newtype!(ConversationId);
id_newtype!(PhoneNumberId);
id_newtype!(ChargeId);
id_newtype!(PaymentIntentId);
id_newtype!(CustomerId);
id_newtype!(RefundId);

/// Campaign lifecycle as reported by the batch-calling backend. Values the
/// backend may add later survive as `Other` instead of failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BatchCallStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Other(String),
}

impl BatchCallStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for BatchCallStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<BatchCallStatus> for String {
    fn from(status: BatchCallStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Per-recipient delivery status within a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecipientStatus {
    Pending,
    Initiated,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Voicemail,
    Other(String),
}

impl RecipientStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Initiated => "initiated",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Voicemail => "voicemail",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for RecipientStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "initiated" => Self::Initiated,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "voicemail" => Self::Voicemail,
            _ => Self::Other(raw),
        }
    }
}

impl From<RecipientStatus> for String {
    fn from(status: RecipientStatus) -> Self {
        status.as_str().to_string()
    }
}
