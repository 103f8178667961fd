//! Transport to the three proxy functions.

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::ClientError;

pub const CHAT_FUNCTION: &str = "gloo-chat";
pub const DEVOTIONAL_FUNCTION: &str = "gloo-devotional";
pub const JOURNAL_FUNCTION: &str = "gloo-journal";

/// Journal assistance kinds understood by the journal endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalAction {
    Reflect,
    Prompt,
    Prayer,
}

impl JournalAction {
    pub fn requires_entry(self) -> bool {
        !matches!(self, JournalAction::Prompt)
    }

    pub fn label(self) -> &'static str {
        match self {
            JournalAction::Reflect => "Reflection",
            JournalAction::Prompt => "Prompt",
            JournalAction::Prayer => "Prayer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatReply {
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
    pub message: Option<String>,
    pub suggestions: Vec<String>,
    pub sources: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevotionalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DevotionalReply {
    pub devotional: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRequest {
    pub action: JournalAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JournalReply {
    pub result: Option<String>,
}

/// The proxy endpoints as seen by the controllers.
#[async_trait]
pub trait CompanionApi: Send + Sync {
    async fn chat(&self, req: ChatRequest) -> Result<ChatReply, ClientError>;
    async fn devotional(&self, req: DevotionalRequest) -> Result<DevotionalReply, ClientError>;
    async fn journal(&self, req: JournalRequest) -> Result<JournalReply, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Calls the functions over HTTP the way the Supabase client's
/// `functions.invoke` does: `POST {functions_url}/{name}` with the anon key
/// as both `apikey` and bearer token.
#[derive(Debug, Clone)]
pub struct HttpCompanionApi {
    client: reqwest::Client,
    functions_url: String,
    anon_key: String,
}

impl HttpCompanionApi {
    pub fn new(functions_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), functions_url, anon_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        functions_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            functions_url: functions_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    fn url(&self, function: &str) -> String {
        format!("{}/{}", self.functions_url, function)
    }

    async fn invoke<B, R>(&self, function: &'static str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(function);
        debug!(%url, "invoking function");

        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| status.to_string());
            warn!(function, %status, %message, "function call failed");
            return Err(ClientError::Status {
                function,
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<R>().await.map_err(|e| ClientError::Decode {
            function,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CompanionApi for HttpCompanionApi {
    async fn chat(&self, req: ChatRequest) -> Result<ChatReply, ClientError> {
        self.invoke(CHAT_FUNCTION, &req).await
    }

    async fn devotional(&self, req: DevotionalRequest) -> Result<DevotionalReply, ClientError> {
        self.invoke(DEVOTIONAL_FUNCTION, &req).await
    }

    async fn journal(&self, req: JournalRequest) -> Result<JournalReply, ClientError> {
        self.invoke(JOURNAL_FUNCTION, &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_omits_missing_chat_id() {
        let first = ChatRequest {
            query: "hello".into(),
            chat_id: None,
        };
        assert_eq!(serde_json::to_value(&first).unwrap(), json!({ "query": "hello" }));

        let next = ChatRequest {
            query: "again".into(),
            chat_id: Some("chat-1".into()),
        };
        assert_eq!(serde_json::to_value(&next).unwrap()["chatId"], "chat-1");
    }

    #[test]
    fn replies_treat_null_as_no_content() {
        let reply: ChatReply =
            serde_json::from_value(json!({ "chatId": "c", "message": null })).unwrap();
        assert!(reply.message.is_none());
        assert!(reply.suggestions.is_empty());

        let reply: DevotionalReply = serde_json::from_value(json!({})).unwrap();
        assert!(reply.devotional.is_none());
    }

    #[test]
    fn journal_request_uses_wire_names() {
        let req = JournalRequest {
            action: JournalAction::Reflect,
            journal_entry: Some("entry".into()),
            prompt: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "action": "reflect", "journalEntry": "entry" })
        );
    }

    #[test]
    fn function_urls_are_joined() {
        let api = HttpCompanionApi::new("https://proj.supabase.co/functions/v1/", "anon");
        assert_eq!(
            api.url(CHAT_FUNCTION),
            "https://proj.supabase.co/functions/v1/gloo-chat"
        );
    }
}
