use rand::Rng;
use serde::Deserialize;

use quiz_core::model::{Difficulty, Question, QuestionId};
use quiz_core::{AMOUNT, OPTION_COUNT};

use crate::error::QuestionSourceError;

/// Question exactly as Open Trivia DB sends it, with HTML entities still encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Id prefix for questions built from the remote source.
pub const REMOTE_ID_PREFIX: &str = "api";

/// Decode HTML entities (`&amp;`, `&quot;`, `&#039;`, …) into plain characters.
#[must_use]
pub fn decode_html(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

/// Convert raw trivia questions into the internal shape.
///
/// At most `AMOUNT` items are used. The correct answer lands at a uniformly
/// random slot; the incorrect answers keep their relative order around it.
///
/// # Errors
///
/// Returns `QuestionSourceError::MalformedResponse` if an item does not carry
/// exactly three incorrect answers.
pub fn normalize<R: Rng + ?Sized>(
    raw: Vec<RawQuestion>,
    rng: &mut R,
) -> Result<Vec<Question>, QuestionSourceError> {
    raw.into_iter()
        .take(AMOUNT)
        .enumerate()
        .map(|(index, item)| normalize_one(index, item, rng))
        .collect()
}

fn normalize_one<R: Rng + ?Sized>(
    index: usize,
    raw: RawQuestion,
    rng: &mut R,
) -> Result<Question, QuestionSourceError> {
    if raw.incorrect_answers.len() != OPTION_COUNT - 1 {
        return Err(QuestionSourceError::MalformedResponse(format!(
            "question {index} has {} incorrect answers",
            raw.incorrect_answers.len()
        )));
    }

    let mut options: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|answer| decode_html(answer))
        .collect();
    let insert_at = rng.random_range(0..OPTION_COUNT);
    options.insert(insert_at, decode_html(&raw.correct_answer));

    let difficulty = raw
        .difficulty
        .as_deref()
        .and_then(|value| value.parse::<Difficulty>().ok())
        .unwrap_or(Difficulty::Medium);

    Ok(Question::new(
        QuestionId::positional(REMOTE_ID_PREFIX, index),
        decode_html(&raw.question),
        options,
        insert_at,
        Some(difficulty),
    )?)
}
