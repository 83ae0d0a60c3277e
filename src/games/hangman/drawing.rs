//! Maps the mistake count onto the gallows drawing, one part per mistake.
//!
//! Geometry lives on a 300x250 canvas with the origin in the top-left corner
//! and y growing downwards. Renderers with a different orientation flip it
//! themselves.

use crate::core::error::GameError;
use crate::games::hangman::game::MAX_MISTAKES;

pub const CANVAS_WIDTH: f64 = 300.0;
pub const CANVAS_HEIGHT: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { x: f64, y: f64, radius: f64 },
}

const fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Stroke {
    Stroke::Line { x1, y1, x2, y2 }
}

/// Parts of the drawing in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStep {
    Base,
    Pole,
    TopBeam,
    Rope,
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl DrawStep {
    pub const ALL: [DrawStep; 10] = [
        DrawStep::Base,
        DrawStep::Pole,
        DrawStep::TopBeam,
        DrawStep::Rope,
        DrawStep::Head,
        DrawStep::Body,
        DrawStep::LeftArm,
        DrawStep::RightArm,
        DrawStep::LeftLeg,
        DrawStep::RightLeg,
    ];

    /// Step drawn for the `number`th mistake, counting from 1.
    pub fn numbered(number: usize) -> Option<DrawStep> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            DrawStep::Base => "base",
            DrawStep::Pole => "pole",
            DrawStep::TopBeam => "top beam",
            DrawStep::Rope => "rope",
            DrawStep::Head => "head",
            DrawStep::Body => "body",
            DrawStep::LeftArm => "left arm",
            DrawStep::RightArm => "right arm",
            DrawStep::LeftLeg => "left leg",
            DrawStep::RightLeg => "right leg",
        }
    }

    pub fn stroke(self) -> Stroke {
        match self {
            DrawStep::Base => line(10.0, 240.0, 290.0, 240.0),
            DrawStep::Pole => line(50.0, 240.0, 50.0, 20.0),
            DrawStep::TopBeam => line(50.0, 20.0, 200.0, 20.0),
            DrawStep::Rope => line(200.0, 20.0, 200.0, 50.0),
            DrawStep::Head => Stroke::Circle {
                x: 200.0,
                y: 70.0,
                radius: 20.0,
            },
            DrawStep::Body => line(200.0, 90.0, 200.0, 150.0),
            DrawStep::LeftArm => line(200.0, 110.0, 160.0, 130.0),
            DrawStep::RightArm => line(200.0, 110.0, 240.0, 130.0),
            DrawStep::LeftLeg => line(200.0, 150.0, 170.0, 190.0),
            DrawStep::RightLeg => line(200.0, 150.0, 230.0, 190.0),
        }
    }
}

pub const STEP_COUNT: usize = DrawStep::ALL.len();

// The figure must be complete exactly when the round is lost.
const _: () = assert!(STEP_COUNT == MAX_MISTAKES);

/// Tracks how much of the drawing is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawingSequencer {
    drawn: usize,
}

impl DrawingSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_count(&self) -> usize {
        STEP_COUNT
    }

    /// Erases the drawing.
    pub fn reset(&mut self) {
        self.drawn = 0;
    }

    /// Shows exactly steps `1..=count`. Calling it again with the same count
    /// leaves the drawing as it is.
    pub fn render_up_to(&mut self, count: usize) -> Result<(), GameError> {
        if count > STEP_COUNT {
            return Err(GameError::OutOfRangeStep {
                step: count,
                max: STEP_COUNT,
            });
        }
        self.drawn = count;
        Ok(())
    }

    /// Draws step `count` on top of steps `1..count`, which must already be
    /// visible.
    pub fn advance_to_step(&mut self, count: usize) -> Result<DrawStep, GameError> {
        let step = DrawStep::numbered(count).ok_or(GameError::OutOfRangeStep {
            step: count,
            max: STEP_COUNT,
        })?;
        if count != self.drawn + 1 {
            return Err(GameError::StepOutOfOrder {
                expected: self.drawn + 1,
                got: count,
            });
        }
        self.drawn = count;
        Ok(step)
    }

    pub fn drawn_count(&self) -> usize {
        self.drawn
    }

    pub fn is_complete(&self) -> bool {
        self.drawn == STEP_COUNT
    }

    pub fn visible_steps(&self) -> &'static [DrawStep] {
        let all: &'static [DrawStep] = &DrawStep::ALL;
        &all[..self.drawn]
    }

    pub fn strokes(&self) -> impl Iterator<Item = Stroke> + '_ {
        self.visible_steps().iter().map(|step| step.stroke())
    }
}
