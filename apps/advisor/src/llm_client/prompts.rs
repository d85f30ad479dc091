// Cross-cutting prompt-building utilities.
// Each module that calls the model keeps its own prompts.rs with the actual wording.

use std::fmt::Display;

/// A system instruction plus the user's text, ready for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: Option<String>,
    pub user_text: String,
}

impl Prompt {
    pub fn with_system(system: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            system_instruction: Some(system.into()),
            user_text: user_text.into(),
        }
    }

    /// A prompt with no system instruction.
    pub fn user(user_text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            user_text: user_text.into(),
        }
    }
}

/// Builds `Label: value, Label: value` user texts.
///
/// Optional segments whose value is absent or renders blank are dropped
/// entirely, label included.
#[derive(Debug, Clone)]
pub struct LabeledText {
    text: String,
}

impl LabeledText {
    pub fn new(label: &str, value: impl Display) -> Self {
        Self {
            text: format!("{label}: {value}"),
        }
    }

    /// Appends `, Label: value`.
    pub fn field(mut self, label: &str, value: impl Display) -> Self {
        self.text.push_str(&format!(", {label}: {value}"));
        self
    }

    pub fn optional<T: Display>(self, label: &str, value: Option<T>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(rendered) if !rendered.trim().is_empty() => self.field(label, rendered),
            _ => self,
        }
    }

    pub fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_text_joins_segments() {
        let text = LabeledText::new("Symptoms", "fever")
            .field("Age", 34)
            .finish();
        assert_eq!(text, "Symptoms: fever, Age: 34");
    }

    #[test]
    fn test_absent_optional_is_omitted() {
        let text = LabeledText::new("Symptoms", "fever")
            .optional::<u32>("Age", None)
            .optional::<&str>("Gender", None)
            .finish();
        assert_eq!(text, "Symptoms: fever");
    }

    #[test]
    fn test_blank_optional_is_omitted() {
        let text = LabeledText::new("Symptoms", "cough")
            .optional("Gender", Some("   "))
            .finish();
        assert_eq!(text, "Symptoms: cough");
    }

    #[test]
    fn test_prompt_user_has_no_system_instruction() {
        let prompt = Prompt::user("hi");
        assert!(prompt.system_instruction.is_none());
        assert_eq!(prompt.user_text, "hi");
    }
}
