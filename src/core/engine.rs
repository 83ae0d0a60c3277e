use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::core::renderer::GameRenderer;
use crate::games::hangman::{Command, Session, Ticket, WordSource, WordSourceError};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

type FetchResult = (Ticket, Result<String, WordSourceError>);

/// Drives one session: redraws, reads keys, and runs word requests in the
/// background.
pub struct Engine<S: WordSource, R: GameRenderer<Session>> {
    source: Arc<S>,
    session: Session,
    renderer: R,
    fetch_tx: mpsc::UnboundedSender<FetchResult>,
    fetch_rx: mpsc::UnboundedReceiver<FetchResult>,
    in_flight: Option<JoinHandle<()>>,
}

impl<S: WordSource, R: GameRenderer<Session>> Engine<S, R> {
    pub fn new(source: S, session: Session, renderer: R) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            session,
            renderer,
            fetch_tx,
            fetch_rx,
            in_flight: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let ticket = self.session.begin_fetch();
        self.spawn_fetch(ticket);

        loop {
            terminal.draw(|f| self.renderer.render(f, &self.session))?;

            // INPUT (non-blocking)
            if event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    match self.session.handle_key(key) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(Command::FetchWord(ticket))) => self.spawn_fetch(ticket),
                        Ok(None) => {}
                        Err(err) if err.is_desync() => {
                            error!(error = %err, "game state and drawing out of sync");
                            self.abort_fetch();
                            return Err(err.into());
                        }
                        Err(err) => warn!(error = %err, "guess rejected"),
                    }
                }
            }

            tokio::select! {
                Some((ticket, result)) = self.fetch_rx.recv() => {
                    self.session.word_arrived(ticket, result);
                }
                _ = tokio::time::sleep(FRAME_INTERVAL) => {}
            }
        }

        self.abort_fetch();
        info!("player quit");
        Ok(())
    }

    /// Runs a word request in the background, cancelling the previous one.
    pub fn spawn_fetch(&mut self, ticket: Ticket) {
        self.abort_fetch();
        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source.fetch_random_word().await;
            // Receiver is gone once the engine has shut down.
            let _ = tx.send((ticket, result));
        }));
    }

    /// Waits for the next word request to finish and hands it to the session.
    pub async fn next_word(&mut self) -> Option<bool> {
        let (ticket, result) = self.fetch_rx.recv().await?;
        Some(self.session.word_arrived(ticket, result))
    }

    fn abort_fetch(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("cancelling word request");
            }
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::{HangmanRenderer, ListWordSource, Phase};

    fn engine(words: &[&str]) -> Engine<ListWordSource, HangmanRenderer> {
        Engine::new(
            ListWordSource::new(words.iter().copied()),
            Session::default(),
            HangmanRenderer::default(),
        )
    }

    #[tokio::test]
    async fn fetched_word_starts_round() {
        let mut engine = engine(&["rust"]);
        let ticket = engine.session.begin_fetch();
        engine.spawn_fetch(ticket);
        assert_eq!(engine.next_word().await, Some(true));
        assert_eq!(engine.session().phase(), Phase::InProgress);
        assert_eq!(engine.session().game().unwrap().word().as_str(), "RUST");
    }

    #[tokio::test]
    async fn superseded_fetch_is_ignored() {
        let mut engine = engine(&["rust"]);
        let first = engine.session.begin_fetch();
        let second = engine.session.begin_fetch();

        // The first answer may or may not arrive before the abort; either
        // way it must not start a round.
        engine.spawn_fetch(first);
        engine.spawn_fetch(second);
        engine.fetch_tx.send((first, Ok("stale".into()))).unwrap();

        loop {
            match engine.next_word().await {
                Some(true) => break,
                Some(false) => continue,
                None => panic!("channel closed"),
            }
        }
        assert_eq!(engine.session().game().unwrap().word().as_str(), "RUST");
    }

    #[tokio::test]
    async fn empty_source_fails_round() {
        let mut engine = engine(&[]);
        let ticket = engine.session.begin_fetch();
        engine.spawn_fetch(ticket);
        assert_eq!(engine.next_word().await, Some(true));
        assert_eq!(engine.session().phase(), Phase::Failed);
    }
}
