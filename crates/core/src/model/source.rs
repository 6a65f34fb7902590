use serde::{Deserialize, Serialize};
use std::fmt;

/// Which adapter produced the current batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    /// Open Trivia DB.
    #[default]
    Remote,
    /// The bundled dataset.
    Local,
}

impl QuestionSource {
    #[must_use]
    pub fn used_api(self) -> bool {
        matches!(self, QuestionSource::Remote)
    }

    #[must_use]
    pub fn from_use_api(use_api: bool) -> Self {
        if use_api { Self::Remote } else { Self::Local }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionSource::Remote => "Open Trivia DB API",
            QuestionSource::Local => "Local JSON",
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuestionSource::Remote => "remote",
            QuestionSource::Local => "local",
        })
    }
}
