//! Hangman: game rules, the gallows drawing and the terminal front end
pub mod drawing;
pub mod game;
pub mod renderer;
pub mod session;
pub mod word;
pub mod words;

pub use drawing::{DrawStep, DrawingSequencer, Stroke, STEP_COUNT};
pub use game::{GameState, GameStatus, GuessOutcome, MAX_MISTAKES};
pub use renderer::HangmanRenderer;
pub use session::{Command, Message, MessageKind, Phase, Session, Ticket};
pub use word::{validate_guess, Word};
pub use words::{HttpWordSource, ListWordSource, WordSource, WordSourceError};
