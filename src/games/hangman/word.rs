use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::GameError;

/// Secret word for one round: non-empty, ASCII letters only, uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Uppercases `raw` and checks it only holds letters A-Z.
    pub fn parse(raw: &str) -> Result<Self, GameError> {
        let word = raw.trim().to_ascii_uppercase();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(GameError::InvalidWord(raw.to_string()));
        }
        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Word {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::parse(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// Reduces raw text typed by the player to exactly one uppercase letter.
///
/// Surrounding whitespace is ignored; anything else that is not a single
/// ASCII letter is rejected.
pub fn validate_guess(raw: &str) -> Result<char, GameError> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(GameError::InvalidInput(raw.to_string())),
    }
}
