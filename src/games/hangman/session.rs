//! Glue between the terminal and the game core: owns the current round, the
//! drawing and whatever the player has typed.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

use crate::core::error::GameError;
use crate::games::hangman::drawing::DrawingSequencer;
use crate::games::hangman::game::{GameState, GameStatus, GuessOutcome};
use crate::games::hangman::word::{validate_guess, Word};
use crate::games::hangman::words::WordSourceError;

/// Identifies one word request. Only the newest one is honoured.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Loading,
    InProgress,
    Won,
    Lost,
    /// The word source failed; no word is set until a retry succeeds.
    Failed,
}

impl Phase {
    pub fn accepts_guesses(self) -> bool {
        self == Phase::InProgress
    }

    pub fn can_restart(self) -> bool {
        matches!(
            self,
            Phase::NotStarted | Phase::Won | Phase::Lost | Phase::Failed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Win,
    Lose,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// What the engine has to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    FetchWord(Ticket),
}

#[derive(Debug)]
pub struct Session {
    game: Option<GameState>,
    drawing: DrawingSequencer,
    input: String,
    message: Option<Message>,
    placeholder: char,
    last_ticket: Ticket,
    pending: Option<Ticket>,
    failed: bool,
}

impl Session {
    pub fn new(placeholder: char) -> Self {
        Self {
            game: None,
            drawing: DrawingSequencer::new(),
            input: String::new(),
            message: None,
            placeholder,
            last_ticket: 0,
            pending: None,
            failed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            return Phase::Loading;
        }
        if self.failed {
            return Phase::Failed;
        }
        match self.game.as_ref().map(GameState::status) {
            None => Phase::NotStarted,
            Some(GameStatus::InProgress) => Phase::InProgress,
            Some(GameStatus::Won) => Phase::Won,
            Some(GameStatus::Lost) => Phase::Lost,
        }
    }

    /// Starts waiting for a new word. Any request still in flight is
    /// superseded and its answer will be ignored.
    pub fn begin_fetch(&mut self) -> Ticket {
        self.last_ticket += 1;
        self.pending = Some(self.last_ticket);
        self.input.clear();
        self.message = Some(Message::new(MessageKind::Info, "Fetching a new word..."));
        debug!(ticket = self.last_ticket, "waiting for word");
        self.last_ticket
    }

    /// Feeds the answer of a word request back in. Returns `false` when the
    /// answer belongs to a superseded request and was dropped.
    pub fn word_arrived(
        &mut self,
        ticket: Ticket,
        result: Result<String, WordSourceError>,
    ) -> bool {
        if self.pending != Some(ticket) {
            debug!(ticket, latest = self.last_ticket, "dropping stale word");
            return false;
        }
        self.pending = None;

        let word = result.and_then(|raw| {
            Word::parse(&raw).map_err(|_| WordSourceError::InvalidWord(raw))
        });
        match word {
            Ok(word) => {
                info!(ticket, len = word.len(), "new round started");
                match self.game.as_mut() {
                    Some(game) => game.start(word),
                    None => self.game = Some(GameState::new(word)),
                }
                self.drawing.reset();
                self.failed = false;
                self.message = None;
            }
            Err(err) => {
                warn!(ticket, error = %err, "could not load word");
                self.game = None;
                self.drawing.reset();
                self.failed = true;
                self.message = Some(Message::new(
                    MessageKind::Error,
                    "Failed to load word. Press Enter to retry.",
                ));
            }
        }
        true
    }

    /// Submits the typed text as a guess. Returns `Ok(None)` when nothing was
    /// guessed (no round running or the text was not a letter).
    ///
    /// Errors only when the drawing falls out of step with the mistake count.
    pub fn submit_guess(&mut self) -> Result<Option<GuessOutcome>, GameError> {
        let raw = std::mem::take(&mut self.input);
        if !self.phase().accepts_guesses() {
            return Ok(None);
        }
        let Some(game) = self.game.as_mut() else {
            return Ok(None);
        };

        let letter = match validate_guess(&raw) {
            Ok(letter) => letter,
            Err(_) => {
                self.message = Some(Message::new(
                    MessageKind::Warning,
                    "Please enter a valid letter A-Z.",
                ));
                return Ok(None);
            }
        };

        let outcome = game.submit_guess(letter)?;
        self.message = None;
        match outcome {
            GuessOutcome::AlreadyGuessed => {
                self.message = Some(Message::new(
                    MessageKind::Warning,
                    "You already guessed that letter!",
                ));
            }
            GuessOutcome::Correct => debug!(%letter, "correct guess"),
            GuessOutcome::Incorrect { mistakes } => {
                let step = self.drawing.advance_to_step(mistakes)?;
                debug!(%letter, mistakes, step = step.name(), "wrong guess");
            }
        }

        match game.status() {
            GameStatus::Won => {
                info!(word = %game.word(), mistakes = game.mistakes(), "round won");
                self.message = Some(Message::new(MessageKind::Win, "Congratulations! You won!"));
            }
            GameStatus::Lost => {
                info!(word = %game.word(), "round lost");
                self.message = Some(Message::new(
                    MessageKind::Lose,
                    format!("You lost! The word was: {}", game.word()),
                ));
            }
            GameStatus::InProgress => {}
        }
        Ok(Some(outcome))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Command>, GameError> {
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        let phase = self.phase();
        match key.code {
            KeyCode::Esc => Ok(Some(Command::Quit)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Ok(Some(Command::Quit))
            }
            KeyCode::Enter if phase.accepts_guesses() => {
                self.submit_guess()?;
                Ok(None)
            }
            KeyCode::Enter if phase.can_restart() => Ok(Some(Command::FetchWord(self.begin_fetch()))),
            KeyCode::Char(c)
                if phase.accepts_guesses()
                    && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                // Single-character field: typing replaces the previous letter.
                self.input.clear();
                self.input.push(c);
                Ok(None)
            }
            KeyCode::Backspace => {
                self.input.clear();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn drawing(&self) -> &DrawingSequencer {
        &self.drawing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Word with hidden letters as placeholders, spaced out for display.
    pub fn display_word(&self) -> Option<String> {
        let game = self.game.as_ref()?;
        let letters: Vec<String> = game
            .masked_word(self.placeholder)
            .chars()
            .map(String::from)
            .collect();
        Some(letters.join(" "))
    }

    pub fn wrong_letters_line(&self) -> String {
        let wrong: Vec<String> = self
            .game
            .iter()
            .flat_map(|game| game.wrong_letters())
            .map(char::to_string)
            .collect();
        format!("Wrong Letters: {}", wrong.join(", "))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new('_')
    }
}
