use std::future::Future;
use std::time::Duration;

use rand::seq::IndexedRandom;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_WORD_URL: &str = "https://random-word-api.herokuapp.com/word";

pub const DEFAULT_WORDS: &[&str] = &[
    "EXAMPLE", "RUST", "ASYNC", "TOKIO", "HANGMAN", "TERMINAL", "NETWORK", "SOCKET", "GALLOWS",
    "KEYBOARD", "COMPILER", "BORROW", "LIFETIME", "TRAIT", "CANVAS",
];

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("word request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("word service answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected word service response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("word source had no words")]
    Empty,
    #[error("word source returned an unusable word: {0:?}")]
    InvalidWord(String),
}

/// Something that can hand out a random secret word.
pub trait WordSource: Send + Sync + 'static {
    fn fetch_random_word(&self) -> impl Future<Output = Result<String, WordSourceError>> + Send;
}

/// Fetches words from a random-word HTTP service that answers with a JSON
/// array of strings.
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    client: reqwest::Client,
    url: String,
}

impl HttpWordSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WordSourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl WordSource for HttpWordSource {
    async fn fetch_random_word(&self) -> Result<String, WordSourceError> {
        debug!(url = %self.url, "requesting random word");
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(WordSourceError::Status(resp.status()));
        }
        let body = resp.text().await?;
        parse_word_response(&body)
    }
}

/// Takes the first word out of a `["word", ...]` response body.
pub fn parse_word_response(body: &str) -> Result<String, WordSourceError> {
    let words: Vec<String> = serde_json::from_str(body)?;
    words.into_iter().next().ok_or(WordSourceError::Empty)
}

/// Picks words from a fixed list, for offline play.
#[derive(Debug, Clone)]
pub struct ListWordSource {
    words: Vec<String>,
}

impl ListWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    fn pick(&self) -> Option<String> {
        self.words.choose(&mut rand::rng()).cloned()
    }
}

impl Default for ListWordSource {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS.iter().copied())
    }
}

impl WordSource for ListWordSource {
    async fn fetch_random_word(&self) -> Result<String, WordSourceError> {
        self.pick().ok_or(WordSourceError::Empty)
    }
}
