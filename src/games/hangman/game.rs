use serde::{Deserialize, Serialize};

use crate::core::error::GameError;
use crate::games::hangman::word::Word;

/// Wrong guesses allowed before the round is lost. The drawing has exactly
/// one step per mistake.
pub const MAX_MISTAKES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter was already in the guessed or wrong set; nothing changed.
    AlreadyGuessed,
    Correct,
    /// Letter is not in the word. Carries the new mistake count.
    Incorrect { mistakes: usize },
}

/// State of a single round: the secret word plus every letter tried so far.
///
/// Deserializing goes through the same checks a round played through
/// `submit_guess` would satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SavedRound")]
pub struct GameState {
    word: Word,
    guessed: Vec<char>,
    wrong: Vec<char>,
}

impl GameState {
    pub fn new(word: Word) -> Self {
        Self {
            word,
            guessed: Vec::new(),
            wrong: Vec::new(),
        }
    }

    /// Begins a fresh round with `word`, dropping everything from the last one.
    pub fn start(&mut self, word: Word) {
        *self = Self::new(word);
    }

    pub fn submit_guess(&mut self, letter: char) -> Result<GuessOutcome, GameError> {
        if !letter.is_ascii_uppercase() {
            return Err(GameError::InvalidInput(letter.to_string()));
        }

        let status = self.status();
        if status.is_over() {
            return Err(GameError::GameFinished(status));
        }

        if self.guessed.contains(&letter) || self.wrong.contains(&letter) {
            return Ok(GuessOutcome::AlreadyGuessed);
        }

        if self.word.contains(letter) {
            self.guessed.push(letter);
            Ok(GuessOutcome::Correct)
        } else {
            self.wrong.push(letter);
            Ok(GuessOutcome::Incorrect {
                mistakes: self.mistakes(),
            })
        }
    }

    /// Derived on every call so it can never go stale.
    pub fn status(&self) -> GameStatus {
        if self.word.chars().all(|c| self.guessed.contains(&c)) {
            GameStatus::Won
        } else if self.mistakes() >= MAX_MISTAKES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// One entry per letter of the word, `None` where it is still hidden.
    pub fn rendered_word(&self) -> Vec<Option<char>> {
        self.word
            .chars()
            .map(|c| self.guessed.contains(&c).then_some(c))
            .collect()
    }

    /// Rendered word with hidden letters replaced by `placeholder`.
    pub fn masked_word(&self, placeholder: char) -> String {
        self.rendered_word()
            .into_iter()
            .map(|c| c.unwrap_or(placeholder))
            .collect()
    }

    pub fn mistakes(&self) -> usize {
        self.wrong.len()
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Correct letters, in the order they were guessed.
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    /// Wrong letters, in the order they were guessed.
    pub fn wrong_letters(&self) -> &[char] {
        &self.wrong
    }
}

#[derive(Deserialize)]
struct SavedRound {
    word: Word,
    guessed: Vec<char>,
    wrong: Vec<char>,
}

impl TryFrom<SavedRound> for GameState {
    type Error = GameError;

    fn try_from(saved: SavedRound) -> Result<Self, Self::Error> {
        let invalid = |reason: String| Err(GameError::InvalidState(reason));

        if saved.wrong.len() > MAX_MISTAKES {
            return invalid(format!(
                "{} wrong letters, at most {MAX_MISTAKES} allowed",
                saved.wrong.len()
            ));
        }

        let mut state = GameState::new(saved.word);
        for (letter, correct) in saved
            .guessed
            .into_iter()
            .map(|c| (c, true))
            .chain(saved.wrong.into_iter().map(|c| (c, false)))
        {
            if !letter.is_ascii_uppercase() {
                return invalid(format!("{letter:?} is not a letter A-Z"));
            }
            if state.guessed.contains(&letter) || state.wrong.contains(&letter) {
                return invalid(format!("{letter:?} listed twice"));
            }
            if state.word.contains(letter) != correct {
                return invalid(format!("{letter:?} is in the wrong set"));
            }
            if correct {
                state.guessed.push(letter);
            } else {
                state.wrong.push(letter);
            }
        }

        // No guess is accepted once the round is lost, so a full drawing
        // rules out a completed word.
        let completed = state.word.chars().all(|c| state.guessed.contains(&c));
        if state.mistakes() == MAX_MISTAKES && completed {
            return invalid("word completed after the round was lost".to_string());
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(word: &str) -> GameState {
        GameState::new(Word::parse(word).unwrap())
    }

    #[test]
    fn new_game_hides_every_letter() {
        let game = new_game("hello");
        assert_eq!(game.rendered_word(), vec![None; 5]);
        assert_eq!(game.masked_word('_'), "_____");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.mistakes(), 0);
    }

    #[test]
    fn correct_guess_reveals_every_occurrence() {
        let mut game = new_game("hello");
        assert_eq!(game.submit_guess('L'), Ok(GuessOutcome::Correct));
        assert_eq!(game.masked_word('_'), "__LL_");
        assert_eq!(game.guessed_letters(), &['L']);
        assert!(game.wrong_letters().is_empty());
    }

    #[test]
    fn incorrect_guess_counts_a_mistake() {
        let mut game = new_game("hello");
        assert_eq!(
            game.submit_guess('Z'),
            Ok(GuessOutcome::Incorrect { mistakes: 1 })
        );
        assert_eq!(
            game.submit_guess('Q'),
            Ok(GuessOutcome::Incorrect { mistakes: 2 })
        );
        assert_eq!(game.wrong_letters(), &['Z', 'Q']);
        assert_eq!(game.mistakes(), game.wrong_letters().len());
    }

    #[test]
    fn repeated_guess_changes_nothing() {
        let mut game = new_game("hello");
        game.submit_guess('H').unwrap();
        game.submit_guess('X').unwrap();
        let before = game.clone();

        assert_eq!(game.submit_guess('H'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game.submit_guess('X'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game.guessed_letters(), before.guessed_letters());
        assert_eq!(game.wrong_letters(), before.wrong_letters());
        assert_eq!(game.mistakes(), 1);
    }

    #[test]
    fn malformed_letters_are_rejected() {
        let mut game = new_game("hello");
        for letter in ['h', '1', ' ', 'É'] {
            assert_eq!(
                game.submit_guess(letter),
                Err(GameError::InvalidInput(letter.to_string()))
            );
        }
        assert!(game.guessed_letters().is_empty());
        assert!(game.wrong_letters().is_empty());
    }

    #[test]
    fn won_when_all_letters_guessed() {
        let mut game = new_game("noon");
        game.submit_guess('N').unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        game.submit_guess('O').unwrap();
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn lost_after_max_mistakes() {
        let mut game = new_game("a");
        for (i, letter) in "BCDEFGHIJK".chars().enumerate() {
            assert_eq!(game.status(), GameStatus::InProgress);
            assert_eq!(
                game.submit_guess(letter),
                Ok(GuessOutcome::Incorrect { mistakes: i + 1 })
            );
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.mistakes(), MAX_MISTAKES);
    }

    #[test]
    fn finished_game_rejects_guesses() {
        let mut game = new_game("a");
        game.submit_guess('A').unwrap();
        assert_eq!(
            game.submit_guess('B'),
            Err(GameError::GameFinished(GameStatus::Won))
        );
        assert!(game.wrong_letters().is_empty());

        let mut game = game_lost();
        assert_eq!(
            game.submit_guess('A'),
            Err(GameError::GameFinished(GameStatus::Lost))
        );
        assert!(game.guessed_letters().is_empty());
        assert_eq!(game.mistakes(), MAX_MISTAKES);
    }

    #[test]
    fn start_resets_everything() {
        let mut game = game_lost();
        game.start(Word::parse("rust").unwrap());
        assert_eq!(game.word().as_str(), "RUST");
        assert_eq!(game.mistakes(), 0);
        assert!(game.guessed_letters().is_empty());
        assert!(game.wrong_letters().is_empty());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn saved_round_restores_progress() {
        let mut game = new_game("cat");
        game.submit_guess('A').unwrap();
        game.submit_guess('Z').unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.masked_word('_'), "_A_");
        assert_eq!(restored.wrong_letters(), &['Z']);
        assert_eq!(restored.mistakes(), 1);
        assert_eq!(restored.status(), GameStatus::InProgress);
    }

    #[test]
    fn saved_finished_rounds_restore() {
        let won: GameState =
            serde_json::from_str(r#"{"word":"CAT","guessed":["C","A","T"],"wrong":["Z"]}"#).unwrap();
        assert_eq!(won.status(), GameStatus::Won);

        let lost: GameState = serde_json::from_str(
            r#"{"word":"GO","guessed":["G"],"wrong":["B","D","E","F","H","J","K","L","M","N"]}"#,
        )
        .unwrap();
        assert_eq!(lost.status(), GameStatus::Lost);
        assert_eq!(lost.mistakes(), MAX_MISTAKES);
    }

    #[test]
    fn saved_round_must_be_playable() {
        for json in [
            // too many mistakes, letters of the word listed as wrong
            r#"{"word":"CAT","guessed":[],"wrong":["C","A","T","B","D","E","F","G","H","I","J","K"]}"#,
            // guessed letter missing from the word
            r#"{"word":"CAT","guessed":["Z"],"wrong":[]}"#,
            // wrong letter that is in the word
            r#"{"word":"CAT","guessed":[],"wrong":["C"]}"#,
            // same letter in both sets
            r#"{"word":"CAT","guessed":["A"],"wrong":["A"]}"#,
            // duplicates
            r#"{"word":"CAT","guessed":[],"wrong":["Q","Q"]}"#,
            // lowercase letter
            r#"{"word":"CAT","guessed":["a"],"wrong":[]}"#,
            // word completed with the drawing already full
            r#"{"word":"A","guessed":["A"],"wrong":["B","C","D","E","F","G","H","I","J","K"]}"#,
            // invalid word
            r#"{"word":"C4T","guessed":[],"wrong":[]}"#,
        ] {
            assert!(serde_json::from_str::<GameState>(json).is_err(), "{json}");
        }
    }

    fn game_lost() -> GameState {
        let mut game = new_game("a");
        for letter in "BCDEFGHIJK".chars() {
            game.submit_guess(letter).unwrap();
        }
        game
    }
}
