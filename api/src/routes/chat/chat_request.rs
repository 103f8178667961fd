use serde::Deserialize;

use crate::pipeline::FeatureRequest;

/// Request payload for `/gloo-chat`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message, forwarded verbatim.
    #[serde(default)]
    pub query: Option<String>,
    /// Conversation handle returned by the previous turn.
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl From<ChatRequest> for FeatureRequest {
    fn from(r: ChatRequest) -> Self {
        FeatureRequest::Chat {
            query: r.query,
            chat_id: r.chat_id,
        }
    }
}
