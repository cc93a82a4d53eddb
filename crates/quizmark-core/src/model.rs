//! Core data model types for quizmark.
//!
//! Questions are owned by the caller and read-only to the session; answers
//! are the ledger entries a session accumulates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for feedback text. Never affects grading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ja => write!(f, "ja"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ja" | "jp" | "japanese" => Ok(Locale::Ja),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}

/// How a question is answered, and therefore how it is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    TextInput,
}

impl QuestionType {
    /// Free-text questions go through the evaluator and accept overrides.
    pub fn is_free_text(self) -> bool {
        matches!(self, QuestionType::TextInput)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::TextInput => write!(f, "text_input"),
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Unique identifier for this question.
    pub id: String,
    /// The prompt shown to the learner.
    pub text: String,
    /// Accepted answer; free-text references may hold `/`-separated variants.
    pub reference_answer: String,
    /// Explicit question type. See [`QuizQuestion::kind`] when absent.
    #[serde(default, rename = "type")]
    pub question_type: Option<QuestionType>,
    /// Choices for multiple-choice questions.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
}

impl QuizQuestion {
    /// Build a free-text question.
    pub fn text_input(
        id: impl Into<String>,
        text: impl Into<String>,
        reference_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            reference_answer: reference_answer.into(),
            question_type: Some(QuestionType::TextInput),
            options: Vec::new(),
            explanation: None,
            category: None,
            difficulty: None,
        }
    }

    /// Build a multiple-choice question.
    pub fn multiple_choice(
        id: impl Into<String>,
        text: impl Into<String>,
        reference_answer: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            question_type: Some(QuestionType::MultipleChoice),
            options,
            ..Self::text_input(id, text, reference_answer)
        }
    }

    /// Build a true/false question.
    pub fn true_false(
        id: impl Into<String>,
        text: impl Into<String>,
        reference_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_type: Some(QuestionType::TrueFalse),
            ..Self::text_input(id, text, reference_answer)
        }
    }

    /// The effective question type.
    ///
    /// Questions without an explicit type are multiple choice when they carry
    /// options and free text otherwise.
    pub fn kind(&self) -> QuestionType {
        match self.question_type {
            Some(kind) => kind,
            None if !self.options.is_empty() => QuestionType::MultipleChoice,
            None => QuestionType::TextInput,
        }
    }
}

/// One ledger entry, created when the learner submits an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    /// Seconds between the question being shown and the submission.
    pub answer_time_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_display_and_parse() {
        assert_eq!(Locale::En.to_string(), "en");
        assert_eq!(Locale::Ja.to_string(), "ja");
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("japanese".parse::<Locale>().unwrap(), Locale::Ja);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn kind_prefers_explicit_type() {
        let mut q = QuizQuestion::true_false("q1", "Is water wet?", "true");
        q.options = vec!["true".into(), "false".into()];
        assert_eq!(q.kind(), QuestionType::TrueFalse);
    }

    #[test]
    fn kind_inferred_from_options() {
        let mut q = QuizQuestion::text_input("q1", "Capital?", "Tokyo");
        q.question_type = None;
        assert_eq!(q.kind(), QuestionType::TextInput);

        q.options = vec!["Tokyo".into(), "Osaka".into()];
        assert_eq!(q.kind(), QuestionType::MultipleChoice);
    }

    #[test]
    fn question_serde_uses_snake_case_type() {
        let json = r#"{
            "id": "q1",
            "text": "Capital of Japan?",
            "reference_answer": "東京/Tokyo",
            "type": "text_input"
        }"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind(), QuestionType::TextInput);
        assert!(q.options.is_empty());

        let out = serde_json::to_string(&QuizQuestion::true_false("q2", "?", "false")).unwrap();
        assert!(out.contains(r#""type":"true_false""#));
    }
}
