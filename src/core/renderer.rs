//! Draws a game's state into a ratatui frame
use ratatui::Frame;

/// Pure view over game state - no game logic, no mutation
pub trait GameRenderer<State> {
    fn render(&self, frame: &mut Frame, state: &State);
}
