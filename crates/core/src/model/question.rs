use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::OPTION_COUNT;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("expected {expected} options, got {actual}")]
    OptionCount { expected: usize, actual: usize },

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Informational difficulty label attached by the question source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with exactly four options.
///
/// Option order is fixed once the question is built. Text fields may contain
/// markup; callers decide how to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "question", alias = "text")]
    text: String,
    options: Vec<String>,
    correct_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` for a blank prompt,
    /// `QuestionError::OptionCount` unless there are exactly four options, and
    /// `QuestionError::CorrectIndexOutOfRange` if the index does not point at an option.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        difficulty: Option<Difficulty>,
    ) -> Result<Self, QuestionError> {
        let question = Self {
            id,
            text: text.into(),
            options,
            correct_index,
            difficulty,
        };
        question.validate()?;
        Ok(question)
    }

    /// Re-check invariants, e.g. after deserializing bundled data.
    ///
    /// # Errors
    ///
    /// Same as [`Question::new`].
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuestionError::OptionCount {
                expected: OPTION_COUNT,
                actual: self.options.len(),
            });
        }
        if self.correct_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len: self.options.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Paris", "Rome", "Berlin", "Madrid"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn new_accepts_valid_question() {
        let q = Question::new(
            QuestionId::new("q1"),
            "Capital of France?",
            options(),
            0,
            Some(Difficulty::Easy),
        )
        .unwrap();
        assert_eq!(q.correct_option(), "Paris");
        assert_eq!(q.option(3), Some("Madrid"));
        assert_eq!(q.option(4), None);
    }

    #[test]
    fn new_rejects_wrong_option_count() {
        let err = Question::new(
            QuestionId::new("q1"),
            "Q",
            vec!["a".into(), "b".into()],
            0,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            QuestionError::OptionCount {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn new_rejects_out_of_range_index() {
        let err = Question::new(QuestionId::new("q1"), "Q", options(), 4, None).unwrap_err();
        assert!(matches!(err, QuestionError::CorrectIndexOutOfRange { index: 4, len: 4 }));
    }

    #[test]
    fn new_rejects_blank_text() {
        let err = Question::new(QuestionId::new("q1"), "  ", options(), 0, None).unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }

    #[test]
    fn deserializes_bundled_shape() {
        let json = r#"{
            "id": "local-1",
            "question": "Capital of France?",
            "options": ["Paris", "Rome", "Berlin", "Madrid"],
            "correctIndex": 0,
            "difficulty": "easy"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id().as_str(), "local-1");
        assert_eq!(q.text(), "Capital of France?");
        assert_eq!(q.difficulty(), Some(Difficulty::Easy));
        q.validate().unwrap();
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
