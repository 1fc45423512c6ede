//! Shifting an image by a fraction of its size.
//!
//! The canvas keeps its dimensions. Content pushed past the edge is lost and
//! the vacated band becomes white.

use serde::{Deserialize, Serialize};

use super::validate_fraction;
use crate::buffer::PixelBuffer;
use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};
use crate::Augmenter;

const DEFAULT_VALUE: f64 = 0.2;

/// Shifts at or above this fraction may move the subject out of frame.
const CAUTION_VALUE: f64 = 0.4;

/// Direction the content moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Signed `(col, row)` step for one cell of movement.
    fn step(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Raw translation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// `up`, `down`, `left` or `right`
    pub direction: String,
    /// Shift as a fraction of the extent along the direction (0.0 to 1.0)
    pub value: f64,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            direction: Direction::default().as_str().to_string(),
            value: DEFAULT_VALUE,
        }
    }
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn build(&self) -> Validated<Translator> {
        let mut warnings = Vec::new();

        let direction = Direction::parse(&self.direction).unwrap_or_else(|| {
            push_warning(
                &mut warnings,
                ConfigWarning::UnknownValue {
                    option: "direction",
                    value: self.direction.clone(),
                    default: Direction::default().as_str().to_string(),
                },
            );
            Direction::default()
        });
        let value = validate_fraction(
            "value",
            self.value,
            DEFAULT_VALUE,
            Some(CAUTION_VALUE),
            &mut warnings,
        );

        Validated::new(Translator { direction, value }, warnings)
    }
}

/// Moves image content in one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translator {
    direction: Direction,
    value: f64,
}

impl Default for Translator {
    fn default() -> Self {
        TranslateOptions::default().build().into_inner()
    }
}

impl Translator {
    pub fn from_options(options: &TranslateOptions) -> Validated<Self> {
        options.build()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of cells the content moves for an image of this size.
    pub fn shift(&self, width: u32, height: u32) -> u32 {
        let extent = match self.direction {
            Direction::Up | Direction::Down => height,
            Direction::Left | Direction::Right => width,
        };
        (f64::from(extent) * self.value) as u32
    }
}

impl Augmenter for Translator {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        image.validate()?;
        let shift = i64::from(self.shift(image.width, image.height));
        let (step_col, step_row) = self.direction.step();
        let (width, height) = (i64::from(image.width), i64::from(image.height));

        let mut output = PixelBuffer::background(image.width, image.height);
        for row in 0..height {
            for col in 0..width {
                let src_row = row - step_row * shift;
                let src_col = col - step_col * shift;
                if (0..height).contains(&src_row) && (0..width).contains(&src_col) {
                    output.set_pixel(
                        row as usize,
                        col as usize,
                        image.pixel(src_row as usize, src_col as usize),
                    );
                }
            }
        }

        Ok(output)
    }
}
