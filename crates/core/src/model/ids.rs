use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a question, unique within one batch.
///
/// Remote questions are tagged with their position (`api-3`); bundled
/// questions carry whatever id the dataset assigns.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Positional id for the `index`-th question of a batch from `prefix`.
    #[must_use]
    pub fn positional(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}-{index}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing an id from a blank string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: empty value")]
pub struct ParseIdError {
    kind: &'static str,
}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError { kind: "QuestionId" });
        }
        Ok(Self::new(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_ids_carry_prefix_and_index() {
        assert_eq!(QuestionId::positional("api", 3).as_str(), "api-3");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!("   ".parse::<QuestionId>().is_err());
        let id: QuestionId = " q1 ".parse().unwrap();
        assert_eq!(id.to_string(), "q1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&QuestionId::new("local-1")).unwrap();
        assert_eq!(json, "\"local-1\"");
    }
}
