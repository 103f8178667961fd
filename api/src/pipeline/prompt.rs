//! Fixed prompt templates per feature.
//!
//! Pure and deterministic: the same request always composes the same
//! upstream payload. Validation lives here so a bad request is rejected
//! before any credentials are touched.

use gloo_ai_service::services::message_service::MessageRequest;
use thiserror::Error;

use crate::pipeline::{FeatureRequest, feature::JournalAction};

pub const DEFAULT_DEVOTIONAL_TOPIC: &str = "finding peace in difficult times";

pub const DEVOTIONAL_SYSTEM_PROMPT: &str = "You are a thoughtful Christian devotional writer who creates inspiring, biblically-grounded daily devotionals that help people connect their faith to everyday life.";

pub const JOURNAL_SYSTEM_PROMPT: &str = "You are a compassionate Christian spiritual guide who helps people reflect on their faith journey through journaling. You provide thoughtful, biblically-grounded guidance that encourages deeper spiritual reflection.";

pub const DEFAULT_JOURNAL_PROMPT: &str = "Give me a meaningful journaling prompt about faith for today. Include: 1) A thought-provoking question or theme, 2) A relevant Bible verse to meditate on, 3) Guidance on what to explore in the journaling. Keep it concise (100-150 words).";

/// Request rejected before reaching the upstream platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Query is required")]
    MissingQuery,

    #[error("Journal entry is required for reflection")]
    MissingEntryForReflection,

    #[error("Journal entry is required to generate prayer")]
    MissingEntryForPrayer,

    #[error("Invalid action. Use: reflect, prompt, or prayer")]
    InvalidAction,
}

/// System and user halves of a chat-completion prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Upstream payload ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposedRequest {
    Chat(MessageRequest),
    Devotional(PromptPair),
    Journal {
        action: JournalAction,
        prompt: PromptPair,
    },
}

/// Non-blank input, forwarded as typed.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

pub fn compose(req: &FeatureRequest) -> Result<ComposedRequest, ValidationError> {
    match req {
        FeatureRequest::Chat { query, chat_id } => {
            let query = present(query).ok_or(ValidationError::MissingQuery)?;
            let chat_id = present(chat_id).map(str::to_string);
            Ok(ComposedRequest::Chat(MessageRequest::for_query(query, chat_id)))
        }
        FeatureRequest::Devotional {
            topic,
            verse_reference,
        } => Ok(ComposedRequest::Devotional(PromptPair {
            system: DEVOTIONAL_SYSTEM_PROMPT.to_string(),
            user: devotional_prompt(present(topic), present(verse_reference)),
        })),
        FeatureRequest::Journal {
            action,
            journal_entry,
            prompt,
        } => {
            let action: JournalAction = present(action)
                .and_then(|a| a.parse().ok())
                .ok_or(ValidationError::InvalidAction)?;
            let user = journal_prompt(action, present(journal_entry), present(prompt))?;
            Ok(ComposedRequest::Journal {
                action,
                prompt: PromptPair {
                    system: JOURNAL_SYSTEM_PROMPT.to_string(),
                    user,
                },
            })
        }
    }
}

/// Verse reference wins over topic; neither falls back to the default topic.
fn devotional_prompt(topic: Option<&str>, verse_reference: Option<&str>) -> String {
    match verse_reference {
        Some(verse) => format!(
            "Create an inspiring daily devotional based on {verse}. Include: 1) A brief reflection on the verse's meaning, 2) How it applies to daily life, 3) A practical action step, and 4) A closing prayer. Keep it concise and encouraging (about 300-400 words)."
        ),
        None => {
            let topic = topic.unwrap_or(DEFAULT_DEVOTIONAL_TOPIC);
            format!(
                "Create an inspiring daily devotional about {topic}. Include: 1) A relevant Bible verse, 2) A reflection on its meaning, 3) How it applies to daily life, 4) A practical action step, and 5) A closing prayer. Keep it concise and encouraging (about 300-400 words)."
            )
        }
    }
}

fn journal_prompt(
    action: JournalAction,
    entry: Option<&str>,
    custom_prompt: Option<&str>,
) -> Result<String, ValidationError> {
    match action {
        JournalAction::Reflect => {
            let entry = entry.ok_or(ValidationError::MissingEntryForReflection)?;
            Ok(format!(
                "I've written this journal entry about my faith journey:\n\n\"{entry}\"\n\nPlease provide thoughtful reflections that help me go deeper. Consider: 1) What spiritual themes or patterns do you notice? 2) What questions might help me reflect further? 3) Are there relevant Bible verses or spiritual practices that might resonate? Keep your response encouraging and concise (200-300 words)."
            ))
        }
        JournalAction::Prompt => Ok(custom_prompt.unwrap_or(DEFAULT_JOURNAL_PROMPT).to_string()),
        JournalAction::Prayer => {
            let entry = entry.ok_or(ValidationError::MissingEntryForPrayer)?;
            Ok(format!(
                "Based on this journal entry:\n\n\"{entry}\"\n\nWrite a heartfelt prayer that captures the essence of what I've shared. Make it personal, authentic, and grounded in Scripture. (100-150 words)"
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journal(action: Option<&str>, entry: Option<&str>, prompt: Option<&str>) -> FeatureRequest {
        FeatureRequest::Journal {
            action: action.map(Into::into),
            journal_entry: entry.map(Into::into),
            prompt: prompt.map(Into::into),
        }
    }

    #[test]
    fn chat_forwards_query_verbatim() {
        let req = FeatureRequest::Chat {
            query: Some("  What does grace mean? ".into()),
            chat_id: Some("chat-7".into()),
        };
        match compose(&req).unwrap() {
            ComposedRequest::Chat(body) => {
                assert_eq!(body.query, "  What does grace mean? ");
                assert_eq!(body.chat_id.as_deref(), Some("chat-7"));
                assert_eq!(body.character_limit, 1000);
                assert_eq!(body.sources_limit, 5);
                assert_eq!(body.enable_suggestions, 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn chat_requires_query() {
        for query in [None, Some(""), Some("   ")] {
            let req = FeatureRequest::Chat {
                query: query.map(Into::into),
                chat_id: None,
            };
            assert_eq!(compose(&req), Err(ValidationError::MissingQuery));
        }
    }

    #[test]
    fn blank_chat_id_is_dropped() {
        let req = FeatureRequest::Chat {
            query: Some("hi".into()),
            chat_id: Some("".into()),
        };
        let ComposedRequest::Chat(body) = compose(&req).unwrap() else {
            panic!("expected chat");
        };
        assert!(body.chat_id.is_none());
    }

    #[test]
    fn devotional_prefers_verse() {
        let req = FeatureRequest::Devotional {
            topic: Some("courage".into()),
            verse_reference: Some("Psalm 23:1-4".into()),
        };
        let ComposedRequest::Devotional(pair) = compose(&req).unwrap() else {
            panic!("expected devotional");
        };
        assert_eq!(pair.system, DEVOTIONAL_SYSTEM_PROMPT);
        assert!(pair.user.starts_with("Create an inspiring daily devotional based on Psalm 23:1-4."));
        assert!(!pair.user.contains("courage"));
    }

    #[test]
    fn devotional_uses_topic_then_default() {
        let with_topic = FeatureRequest::Devotional {
            topic: Some("overcoming fear".into()),
            verse_reference: None,
        };
        let ComposedRequest::Devotional(pair) = compose(&with_topic).unwrap() else {
            panic!("expected devotional");
        };
        assert!(pair.user.contains("devotional about overcoming fear."));

        let empty = FeatureRequest::Devotional {
            topic: Some(String::new()),
            verse_reference: Some(" ".into()),
        };
        let ComposedRequest::Devotional(pair) = compose(&empty).unwrap() else {
            panic!("expected devotional");
        };
        assert!(pair.user.contains(DEFAULT_DEVOTIONAL_TOPIC));
    }

    #[test]
    fn composition_is_deterministic() {
        let req = FeatureRequest::Devotional {
            topic: Some("hope".into()),
            verse_reference: None,
        };
        assert_eq!(compose(&req), compose(&req));
    }

    #[test]
    fn reflect_and_prayer_need_entry() {
        assert_eq!(
            compose(&journal(Some("reflect"), None, None)),
            Err(ValidationError::MissingEntryForReflection)
        );
        assert_eq!(
            compose(&journal(Some("prayer"), Some("  "), None)),
            Err(ValidationError::MissingEntryForPrayer)
        );
    }

    #[test]
    fn reflect_quotes_entry() {
        let ComposedRequest::Journal { action, prompt } =
            compose(&journal(Some("reflect"), Some("Grateful today."), None)).unwrap()
        else {
            panic!("expected journal");
        };
        assert_eq!(action, JournalAction::Reflect);
        assert_eq!(prompt.system, JOURNAL_SYSTEM_PROMPT);
        assert!(prompt.user.contains("\"Grateful today.\""));
    }

    #[test]
    fn prompt_action_uses_custom_or_default() {
        let ComposedRequest::Journal { prompt, .. } =
            compose(&journal(Some("prompt"), None, None)).unwrap()
        else {
            panic!("expected journal");
        };
        assert_eq!(prompt.user, DEFAULT_JOURNAL_PROMPT);

        let ComposedRequest::Journal { prompt, .. } =
            compose(&journal(Some("prompt"), None, Some("Write about rest."))).unwrap()
        else {
            panic!("expected journal");
        };
        assert_eq!(prompt.user, "Write about rest.");
    }

    #[test]
    fn unknown_or_missing_action_is_invalid() {
        assert_eq!(
            compose(&journal(Some("summarize"), Some("entry"), None)),
            Err(ValidationError::InvalidAction)
        );
        assert_eq!(
            compose(&journal(None, Some("entry"), None)),
            Err(ValidationError::InvalidAction)
        );
    }
}
