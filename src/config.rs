//! User settings, read from an optional JSON file.
//!
//! Every field has a default, so a settings file only needs the keys it
//! changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::games::hangman::word::Word;
use crate::games::hangman::words::{DEFAULT_WORDS, DEFAULT_WORD_URL};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub word_source: WordSourceSettings,
    pub display: DisplaySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSourceSettings {
    /// Random-word service, answering with a JSON array of strings
    pub url: String,
    pub timeout_secs: u64,
    /// Pick from `words` instead of calling the service
    pub offline: bool,
    pub words: Vec<String>,
}

impl Default for WordSourceSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_WORD_URL.to_string(),
            timeout_secs: 10,
            offline: false,
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordSourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Shown in place of letters not guessed yet
    pub placeholder: char,
    /// Any color name or hex code ratatui understands
    pub figure_color: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            placeholder: '_',
            figure_color: "white".to_string(),
        }
    }
}

impl DisplaySettings {
    pub fn figure_color(&self) -> Result<Color> {
        Color::from_str(&self.figure_color)
            .map_err(|_| anyhow::anyhow!("unknown figure color {:?}", self.figure_color))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub file: PathBuf,
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` takes priority
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("hangterm.log"),
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_source.timeout_secs == 0 {
            bail!("word_source.timeout_secs must be at least 1");
        }
        if self.word_source.offline && self.word_source.words.is_empty() {
            bail!("word_source.words must not be empty when playing offline");
        }
        for word in &self.word_source.words {
            Word::parse(word)?;
        }
        if self.display.placeholder.is_alphabetic() || self.display.placeholder.is_whitespace() {
            bail!(
                "display.placeholder {:?} would be mistaken for a letter",
                self.display.placeholder
            );
        }
        self.display.figure_color()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.word_source.url, DEFAULT_WORD_URL);
        assert_eq!(settings.word_source.timeout(), Duration::from_secs(10));
        assert_eq!(settings.display.figure_color().unwrap(), Color::White);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "word_source": { "offline": true, "words": ["tea", "cup"] },
                 "display": { "placeholder": "*" } }"#,
        )
        .unwrap();
        assert!(settings.word_source.offline);
        assert_eq!(settings.word_source.words, ["tea", "cup"]);
        assert_eq!(settings.word_source.url, DEFAULT_WORD_URL);
        assert_eq!(settings.display.placeholder, '*');
        assert_eq!(settings.display.figure_color, "white");
        assert_eq!(settings.log, LogSettings::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn rejects_bad_values() {
        for json in [
            r#"{ "word_source": { "timeout_secs": 0 } }"#,
            r#"{ "word_source": { "offline": true, "words": [] } }"#,
            r#"{ "word_source": { "words": ["fine", "not fine"] } }"#,
            r#"{ "display": { "placeholder": "x" } }"#,
            r#"{ "display": { "figure_color": "not-a-color" } }"#,
            r#"{ "word_source": { "timeout_secs": "ten" } }"#,
        ] {
            assert!(Settings::from_json(json).is_err(), "{json}");
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("reading settings"));
    }

    #[test]
    fn no_file_means_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }
}
