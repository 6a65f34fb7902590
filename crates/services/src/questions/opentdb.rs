use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use quiz_core::model::Question;

use super::QuestionProvider;
use super::normalize::{RawQuestion, normalize};
use crate::error::QuestionSourceError;

/// Default Open Trivia DB host.
pub const DEFAULT_TRIVIA_URL: &str = "https://opentdb.com";

#[derive(Clone, Debug)]
pub struct TriviaConfig {
    pub base_url: Url,
}

impl TriviaConfig {
    /// # Errors
    ///
    /// Returns `url::ParseError` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Reads `QUIZ_TRIVIA_URL`, falling back to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the variable holds an invalid URL.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let raw = env::var("QUIZ_TRIVIA_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRIVIA_URL.into());
        Self::new(raw.trim())
    }

    /// `{base}/api.php?amount={amount}&type=multiple`
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the path cannot be joined onto the base.
    pub fn endpoint(&self, amount: usize) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join("api.php")?;
        url.query_pairs_mut()
            .append_pair("amount", &amount.to_string())
            .append_pair("type", "multiple");
        Ok(url)
    }
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_TRIVIA_URL).expect("default trivia url is valid"),
        }
    }
}

/// Decoded body of a trivia response, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaResponse {
    pub response_code: Option<i64>,
    pub results: Vec<RawQuestion>,
}

/// Parse a trivia response body.
///
/// A missing or `null` `results` field reads as an empty list.
///
/// # Errors
///
/// Returns `QuestionSourceError::MalformedResponse` if the body is not a JSON
/// object, `results` is not an array, or an item lacks required fields.
pub fn parse_response(body: &str) -> Result<TriviaResponse, QuestionSourceError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| QuestionSourceError::MalformedResponse(err.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(QuestionSourceError::MalformedResponse(
            "response body is not an object".into(),
        ));
    };

    let response_code = object.get("response_code").and_then(Value::as_i64);
    let results = match object.remove("results") {
        None | Some(Value::Null) => Vec::new(),
        Some(results @ Value::Array(_)) => serde_json::from_value(results)
            .map_err(|err| QuestionSourceError::MalformedResponse(err.to_string()))?,
        Some(_) => {
            return Err(QuestionSourceError::MalformedResponse(
                "`results` is not an array".into(),
            ));
        }
    };

    Ok(TriviaResponse {
        response_code,
        results,
    })
}

/// Remote question source backed by Open Trivia DB.
#[derive(Clone)]
pub struct OpenTdbProvider {
    client: Client,
    config: TriviaConfig,
}

impl OpenTdbProvider {
    #[must_use]
    pub fn new(config: TriviaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TriviaConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionProvider for OpenTdbProvider {
    async fn fetch_batch(&self, amount: usize) -> Result<Vec<Question>, QuestionSourceError> {
        let url = self
            .config
            .endpoint(amount)
            .map_err(|err| QuestionSourceError::MalformedResponse(err.to_string()))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let parsed = parse_response(&body)?;
        if let Some(code) = parsed.response_code.filter(|code| *code != 0) {
            tracing::warn!(code, results = parsed.results.len(), "trivia api returned non-zero response code");
        }

        normalize(parsed.results, &mut rand::rng())
    }
}
