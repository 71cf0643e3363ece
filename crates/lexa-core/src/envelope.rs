use crate::{Message, Result as CoreResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The `{type, data?}` wire unit carried by the message bus.
///
/// The envelope keeps the raw kind string so unknown kinds survive transit
/// and can be dropped by the consumer instead of failing the channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub sent_at: DateTime<Utc>,
}

impl Envelope {
    /// Wrap a raw kind/data pair, e.g. one received from an external surface.
    pub fn raw(kind: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            data,
            sent_at: Utc::now(),
        }
    }

    /// Decode into the typed catalog.
    pub fn decode(&self) -> CoreResult<Message> {
        Message::decode(&self.kind, self.data.as_ref())
    }
}

impl From<&Message> for Envelope {
    fn from(message: &Message) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: message.kind().to_string(),
            data: message.payload(),
            sent_at: Utc::now(),
        }
    }
}

impl From<Message> for Envelope {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}
