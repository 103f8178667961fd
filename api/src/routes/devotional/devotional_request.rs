use serde::Deserialize;

use crate::pipeline::FeatureRequest;

/// Request payload for `/gloo-devotional`. Both fields are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevotionalRequest {
    #[serde(default)]
    pub topic: Option<String>,
    /// e.g. "John 3:16"; takes precedence over `topic`.
    #[serde(default)]
    pub verse_reference: Option<String>,
}

impl From<DevotionalRequest> for FeatureRequest {
    fn from(r: DevotionalRequest) -> Self {
        FeatureRequest::Devotional {
            topic: r.topic,
            verse_reference: r.verse_reference,
        }
    }
}
