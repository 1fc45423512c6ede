//! Mirroring along one or both axes.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};
use crate::Augmenter;

/// Which axis to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipAxis {
    /// Reverse the row order (upside down).
    X,
    /// Reverse the column order (left to right).
    #[default]
    Y,
    /// Both, equivalent to a half turn.
    Both,
}

impl FlipAxis {
    /// Parse `x`, `y`, `xy` or `yx` (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x" => Some(FlipAxis::X),
            "y" => Some(FlipAxis::Y),
            "xy" | "yx" => Some(FlipAxis::Both),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlipAxis::X => "x",
            FlipAxis::Y => "y",
            FlipAxis::Both => "xy",
        }
    }

    fn reverses_rows(self) -> bool {
        matches!(self, FlipAxis::X | FlipAxis::Both)
    }

    fn reverses_columns(self) -> bool {
        matches!(self, FlipAxis::Y | FlipAxis::Both)
    }
}

/// Raw flip options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipOptions {
    /// `x`, `y`, `xy` or `yx`
    pub axis: String,
}

impl Default for FlipOptions {
    fn default() -> Self {
        Self {
            axis: FlipAxis::default().as_str().to_string(),
        }
    }
}

impl FlipOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = axis.into();
        self
    }

    pub fn build(&self) -> Validated<Flipper> {
        let mut warnings = Vec::new();
        let axis = FlipAxis::parse(&self.axis).unwrap_or_else(|| {
            push_warning(
                &mut warnings,
                ConfigWarning::UnknownValue {
                    option: "axis",
                    value: self.axis.clone(),
                    default: FlipAxis::default().as_str().to_string(),
                },
            );
            FlipAxis::default()
        });
        Validated::new(Flipper::new(axis), warnings)
    }
}

/// Mirrors images along a fixed axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flipper {
    axis: FlipAxis,
}

impl Flipper {
    pub fn new(axis: FlipAxis) -> Self {
        Self { axis }
    }

    pub fn from_options(options: &FlipOptions) -> Validated<Self> {
        options.build()
    }

    pub fn axis(&self) -> FlipAxis {
        self.axis
    }
}

impl Augmenter for Flipper {
    fn name(&self) -> &'static str {
        "flip"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        image.validate()?;
        let (width, height) = (image.width as usize, image.height as usize);
        let mut output = PixelBuffer::background(image.width, image.height);

        for row in 0..height {
            let src_row = if self.axis.reverses_rows() {
                height - 1 - row
            } else {
                row
            };
            if !self.axis.reverses_columns() {
                output.row_mut(row).copy_from_slice(image.row(src_row));
                continue;
            }
            for col in 0..width {
                output.set_pixel(row, col, image.pixel(src_row, width - 1 - col));
            }
        }

        Ok(output)
    }
}
