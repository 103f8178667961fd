use serde::Deserialize;
use serde_json::Value;

use crate::pipeline::FeatureRequest;

/// Request payload for `/gloo-journal`.
///
/// `action` stays raw JSON so an unknown value, or one that is not a
/// string at all, is reported as "Invalid action" instead of a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRequest {
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub journal_entry: Option<String>,
    /// Custom instruction for the `prompt` action.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl From<JournalRequest> for FeatureRequest {
    fn from(r: JournalRequest) -> Self {
        FeatureRequest::Journal {
            action: r.action.and_then(action_text),
            journal_entry: r.journal_entry,
            prompt: r.prompt,
        }
    }
}

/// `null` counts as absent; any other non-string keeps its JSON text and
/// fails action parsing downstream.
fn action_text(raw: Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
