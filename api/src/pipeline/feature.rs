use std::{fmt, str::FromStr};

use serde::Serialize;

/// Which proxy endpoint a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Chat,
    Devotional,
    Journal,
}

impl Feature {
    /// Generic message returned to the browser when the upstream call fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Feature::Chat => "Failed to send message",
            Feature::Devotional => "Failed to generate devotional",
            Feature::Journal => "Failed to generate journal assistance",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::Devotional => "devotional",
            Feature::Journal => "journal",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Journal assistance kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalAction {
    Reflect,
    Prompt,
    Prayer,
}

impl JournalAction {
    /// `reflect` and `prayer` work on the user's entry; `prompt` does not.
    pub fn requires_entry(self) -> bool {
        matches!(self, JournalAction::Reflect | JournalAction::Prayer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction;

impl FromStr for JournalAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflect" => Ok(JournalAction::Reflect),
            "prompt" => Ok(JournalAction::Prompt),
            "prayer" => Ok(JournalAction::Prayer),
            _ => Err(UnknownAction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse_exactly() {
        assert_eq!("reflect".parse::<JournalAction>(), Ok(JournalAction::Reflect));
        assert_eq!("prayer".parse::<JournalAction>(), Ok(JournalAction::Prayer));
        assert_eq!("prompt".parse::<JournalAction>(), Ok(JournalAction::Prompt));
        assert_eq!("Prayer".parse::<JournalAction>(), Err(UnknownAction));
        assert_eq!("".parse::<JournalAction>(), Err(UnknownAction));
    }

    #[test]
    fn only_prompt_skips_entry() {
        assert!(JournalAction::Reflect.requires_entry());
        assert!(JournalAction::Prayer.requires_entry());
        assert!(!JournalAction::Prompt.requires_entry());
    }

    #[test]
    fn action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(JournalAction::Prayer).unwrap(),
            serde_json::json!("prayer")
        );
    }
}
