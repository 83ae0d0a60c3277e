//! Hangman renderer - draws the session, never changes it
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::core::renderer::GameRenderer;
use crate::games::hangman::drawing::{Stroke, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::games::hangman::session::{MessageKind, Phase, Session};

pub struct HangmanRenderer {
    figure_color: Color,
}

impl HangmanRenderer {
    pub fn new(figure_color: Color) -> Self {
        Self { figure_color }
    }

    fn render_gallows(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let color = self.figure_color;
        let canvas = Canvas::default()
            .block(Block::default().title(" Gallows ").borders(Borders::ALL))
            .marker(Marker::Braille)
            .x_bounds([0.0, CANVAS_WIDTH])
            .y_bounds([0.0, CANVAS_HEIGHT])
            .paint(|ctx| {
                // Canvas y grows upwards, drawing geometry grows downwards.
                for stroke in session.drawing().strokes() {
                    match stroke {
                        Stroke::Line { x1, y1, x2, y2 } => ctx.draw(&CanvasLine::new(
                            x1,
                            CANVAS_HEIGHT - y1,
                            x2,
                            CANVAS_HEIGHT - y2,
                            color,
                        )),
                        Stroke::Circle { x, y, radius } => ctx.draw(&Circle {
                            x,
                            y: CANVAS_HEIGHT - y,
                            radius,
                            color,
                        }),
                    }
                }
            });
        frame.render_widget(canvas, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        let phase = session.phase();
        let word = match session.display_word() {
            Some(word) => Line::from(Span::raw(word).bold()),
            None if phase == Phase::Loading => Line::from("Loading word...".italic()),
            None => Line::from("No word loaded".dark_gray()),
        };
        frame.render_widget(
            Paragraph::new(word)
                .alignment(Alignment::Center)
                .block(Block::default().title(" Word ").borders(Borders::ALL)),
            rows[0],
        );

        frame.render_widget(
            Paragraph::new(session.wrong_letters_line())
                .block(Block::default().borders(Borders::ALL)),
            rows[1],
        );

        let input = if phase.accepts_guesses() {
            Line::from(vec![
                Span::raw("Guess: "),
                Span::styled(
                    format!("{}_", session.input()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ])
        } else {
            Line::from("Input disabled".dark_gray())
        };
        frame.render_widget(
            Paragraph::new(input).block(Block::default().borders(Borders::ALL)),
            rows[2],
        );

        if let Some(message) = session.message() {
            let color = match message.kind {
                MessageKind::Info => Color::Cyan,
                MessageKind::Warning => Color::Yellow,
                MessageKind::Win => Color::Green,
                MessageKind::Lose | MessageKind::Error => Color::Red,
            };
            frame.render_widget(
                Paragraph::new(message.text.as_str())
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center),
                rows[3],
            );
        }
    }
}

impl Default for HangmanRenderer {
    fn default() -> Self {
        Self::new(Color::White)
    }
}

fn key_hints(phase: Phase) -> &'static str {
    match phase {
        Phase::InProgress => " [A-Z] Letter  [Enter] Guess  [Esc] Quit ",
        Phase::Failed => " [Enter] Retry  [Esc] Quit ",
        Phase::NotStarted | Phase::Won | Phase::Lost => " [Enter] Play again  [Esc] Quit ",
        Phase::Loading => " [Esc] Quit ",
    }
}

impl GameRenderer<Session> for HangmanRenderer {
    fn render(&self, frame: &mut Frame, session: &Session) {
        let outer = Block::default()
            .title(Line::from(" HANGMAN ".bold()).alignment(Alignment::Center))
            .title_bottom(Line::from(key_hints(session.phase())).alignment(Alignment::Center))
            .borders(Borders::ALL);
        let inner = outer.inner(frame.area());
        frame.render_widget(outer, frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        self.render_gallows(frame, columns[0], session);
        self.render_status(frame, columns[1], session);
    }
}
