//! Per-channel color transforms.
//!
//! Each method touches only the selected channels (or, for `keep`, only the
//! unselected ones). All arithmetic saturates to `0..=255` and fractional
//! results are truncated.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};
use crate::Augmenter;

const DEFAULT_VALUE: f64 = 10.0;

/// What to do with the selected channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMethod {
    /// Raise samples below `value` to `value`.
    Min,
    /// Lower samples above `value` to `value`.
    Max,
    /// Zero the selected channels.
    Kill,
    /// Zero every channel that is not selected.
    #[default]
    Keep,
    /// Add `value` (or `value` percent of the sample).
    Inc,
    /// Subtract `value` (or `value` percent of the sample).
    Dec,
}

impl ColorMethod {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "min" => Some(ColorMethod::Min),
            "max" => Some(ColorMethod::Max),
            "kill" => Some(ColorMethod::Kill),
            "keep" => Some(ColorMethod::Keep),
            "inc" => Some(ColorMethod::Inc),
            "dec" => Some(ColorMethod::Dec),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMethod::Min => "min",
            ColorMethod::Max => "max",
            ColorMethod::Kill => "kill",
            ColorMethod::Keep => "keep",
            ColorMethod::Inc => "inc",
            ColorMethod::Dec => "dec",
        }
    }
}

/// A subset of the R, G and B channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSet {
    selected: [bool; CHANNELS],
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl ChannelSet {
    pub const ALL: ChannelSet = ChannelSet {
        selected: [true; CHANNELS],
    };

    /// Parse a string of distinct `r`, `g` and `b` characters (case-insensitive).
    ///
    /// On failure the reason is returned for the warning message.
    pub fn parse(channels: &str) -> Result<Self, &'static str> {
        let channels = channels.to_ascii_lowercase();
        if channels.chars().count() > CHANNELS {
            return Err("is longer than three characters");
        }

        let mut selected = [false; CHANNELS];
        for c in channels.chars() {
            let index = match c {
                'r' => 0,
                'g' => 1,
                'b' => 2,
                _ => return Err("contains a character other than r, g or b"),
            };
            if selected[index] {
                return Err("contains a channel twice");
            }
            selected[index] = true;
        }
        Ok(Self { selected })
    }

    pub fn contains(&self, channel: usize) -> bool {
        self.selected.get(channel).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.iter().all(|s| !s)
    }
}

impl std::fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, selected) in ['r', 'g', 'b'].iter().zip(self.selected) {
            if selected {
                write!(f, "{}", name)?;
            }
        }
        Ok(())
    }
}

/// Raw color transform options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    /// `min`, `max`, `kill`, `keep`, `inc` or `dec`
    pub method: String,
    /// Threshold or amount, must not be negative
    pub value: f64,
    /// Channels to operate on, e.g. `rg`
    pub channels: String,
    /// Interpret `value` as a percentage of each sample (`inc`/`dec` only)
    pub percentage: bool,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            method: ColorMethod::default().as_str().to_string(),
            value: DEFAULT_VALUE,
            channels: "rgb".to_string(),
            percentage: false,
        }
    }
}

impl ColorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn channels(mut self, channels: impl Into<String>) -> Self {
        self.channels = channels.into();
        self
    }

    pub fn percentage(mut self, percentage: bool) -> Self {
        self.percentage = percentage;
        self
    }

    pub fn build(&self) -> Validated<ColorTransformer> {
        let mut warnings = Vec::new();

        let method = ColorMethod::parse(&self.method).unwrap_or_else(|| {
            push_warning(
                &mut warnings,
                ConfigWarning::UnknownValue {
                    option: "method",
                    value: self.method.clone(),
                    default: ColorMethod::default().as_str().to_string(),
                },
            );
            ColorMethod::default()
        });

        let value = if self.value >= 0.0 {
            self.value
        } else {
            push_warning(
                &mut warnings,
                ConfigWarning::OutOfRange {
                    option: "value",
                    value: self.value.to_string(),
                    range: "0..",
                    default: DEFAULT_VALUE.to_string(),
                },
            );
            DEFAULT_VALUE
        };

        let channels = ChannelSet::parse(&self.channels).unwrap_or_else(|reason| {
            push_warning(
                &mut warnings,
                ConfigWarning::InvalidChannels {
                    value: self.channels.clone(),
                    reason,
                },
            );
            ChannelSet::ALL
        });

        Validated::new(
            ColorTransformer {
                method,
                value,
                channels,
                percentage: self.percentage,
            },
            warnings,
        )
    }
}

/// Applies one color method to a set of channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransformer {
    method: ColorMethod,
    value: f64,
    channels: ChannelSet,
    percentage: bool,
}

impl Default for ColorTransformer {
    fn default() -> Self {
        ColorOptions::default().build().into_inner()
    }
}

impl ColorTransformer {
    pub fn from_options(options: &ColorOptions) -> Validated<Self> {
        options.build()
    }

    pub fn method(&self) -> ColorMethod {
        self.method
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn channels(&self) -> ChannelSet {
        self.channels
    }

    pub fn percentage(&self) -> bool {
        self.percentage
    }

    /// New value of one sample in a channel the method applies to.
    #[inline]
    fn transform_sample(&self, sample: u8) -> u8 {
        let s = f64::from(sample);
        let delta = if self.percentage {
            s * self.value / 100.0
        } else {
            self.value
        };

        let result = match self.method {
            ColorMethod::Min if s < self.value => self.value,
            ColorMethod::Max if s > self.value => self.value,
            ColorMethod::Min | ColorMethod::Max => s,
            ColorMethod::Kill | ColorMethod::Keep => 0.0,
            ColorMethod::Inc => s + delta,
            ColorMethod::Dec => s - delta,
        };
        // Float to int casts saturate and truncate
        result.clamp(0.0, 255.0) as u8
    }

    fn applies_to(&self, channel: usize) -> bool {
        match self.method {
            ColorMethod::Keep => !self.channels.contains(channel),
            _ => self.channels.contains(channel),
        }
    }
}

impl Augmenter for ColorTransformer {
    fn name(&self) -> &'static str {
        "color"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        image.validate()?;
        let active: Vec<usize> = (0..CHANNELS).filter(|&c| self.applies_to(c)).collect();

        let mut output = image.clone();
        if active.is_empty() {
            return Ok(output);
        }
        for pixel in output.pixels.chunks_exact_mut(CHANNELS) {
            for &channel in &active {
                pixel[channel] = self.transform_sample(pixel[channel]);
            }
        }
        Ok(output)
    }
}
