use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::core::engine::Engine;
use crate::games::hangman::{
    HangmanRenderer, HttpWordSource, ListWordSource, Session, Word, WordSource,
};
use crate::logging;

#[derive(Debug, Parser)]
#[command(name = "hangterm")]
#[command(about = "🎩 Hangman in your terminal")]
#[command(version)]
pub struct Cli {
    /// JSON settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Where to write logs (overrides the settings file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Play hangman (the default)
    Play {
        /// Use the built-in word list instead of the word service
        #[arg(long)]
        offline: bool,

        /// Word service URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Fetch one word from the word source and print it
    Fetch {
        /// Use the built-in word list instead of the word service
        #[arg(long)]
        offline: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Play {
            offline: false,
            url: None,
        })
    }

    /// Folds command line overrides into `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(file) = &self.log_file {
            settings.log.file = file.clone();
        }
        match self.command() {
            Commands::Play { offline, url } => {
                settings.word_source.offline |= offline;
                if let Some(url) = url {
                    settings.word_source.url = url;
                }
            }
            Commands::Fetch { offline } => settings.word_source.offline |= offline,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    settings.validate()?;
    logging::init(&settings.log)?;

    let offline = settings.word_source.offline;
    info!(offline, url = %settings.word_source.url, "starting");

    match (cli.command(), offline) {
        (Commands::Play { .. }, true) => {
            play(ListWordSource::new(settings.word_source.words.clone()), &settings).await
        }
        (Commands::Play { .. }, false) => play(http_source(&settings)?, &settings).await,
        (Commands::Fetch { .. }, true) => {
            fetch(ListWordSource::new(settings.word_source.words.clone())).await
        }
        (Commands::Fetch { .. }, false) => fetch(http_source(&settings)?).await,
    }
}

fn http_source(settings: &Settings) -> Result<HttpWordSource> {
    HttpWordSource::new(settings.word_source.url.clone(), settings.word_source.timeout())
        .context("building HTTP client")
}

async fn play<S: WordSource>(source: S, settings: &Settings) -> Result<()> {
    let renderer = HangmanRenderer::new(settings.display.figure_color()?);
    let session = Session::new(settings.display.placeholder);
    let engine = Engine::new(source, session, renderer);

    let terminal = ratatui::init();
    let result = engine.run(terminal).await;
    ratatui::restore();
    result
}

async fn fetch<S: WordSource>(source: S) -> Result<()> {
    let raw = source
        .fetch_random_word()
        .await
        .context("word source unavailable")?;
    let word = Word::parse(&raw)?;
    println!("{word}");
    Ok(())
}
