//! Error and validation types shared by every transform.

use thiserror::Error;

/// Error types for augmentation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AugmentError {
    /// The transform was handed a configuration that validation never produces.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The pixel vector does not match `width * height * 3`.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The transform needs at least one pixel to work with.
    #[error("Image has no pixels")]
    EmptyImage,
}

/// A correction applied while validating transform options.
///
/// Validation never fails: a rejected option is replaced by its default and
/// the replacement is reported through one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigWarning {
    /// A named choice (method, axis, direction, ...) was not recognized.
    #[error("Unknown {option} '{value}', using default '{default}'")]
    UnknownValue {
        option: &'static str,
        value: String,
        default: String,
    },

    /// A numeric option fell outside its accepted range.
    #[error("{option} {value} is outside {range}, using default {default}")]
    OutOfRange {
        option: &'static str,
        value: String,
        range: &'static str,
        default: String,
    },

    /// Anti-aliasing was requested for a rotation that is not centered.
    #[error("Anti-aliasing can only be used with method 'center', disabling it")]
    AntiAliasingRequiresCenter,

    /// The rotation pivot was outside the image.
    #[error("Pivot ({x}, {y}) must lie within 0..=100, changing method to 'center'")]
    PivotOutOfRange { x: f64, y: f64 },

    /// Method `point` was requested without a pivot.
    #[error("Method 'point' needs a pivot, changing method to 'center'")]
    MissingPivot,

    /// The channel selection string was rejected.
    #[error("Channels '{value}' {reason}, using default 'rgb'")]
    InvalidChannels { value: String, reason: &'static str },

    /// The number of erased areas was not positive or would erase too much.
    #[error("count {count} must be positive and erase at most {limit} of the image, using {max}")]
    EraseCountCapped {
        count: i64,
        limit: &'static str,
        max: u32,
    },

    /// The value was accepted but is strong enough to change what the image shows.
    #[error("{option} {value} may not be label preserving")]
    MayNotPreserveLabel { option: &'static str, value: f64 },
}

/// A validated value together with the corrections made while building it.
#[derive(Debug, Clone)]
pub struct Validated<T> {
    /// The fully validated value.
    pub value: T,
    /// Corrections applied during validation, in the order they happened.
    pub warnings: Vec<ConfigWarning>,
}

impl<T> Validated<T> {
    pub(crate) fn new(value: T, warnings: Vec<ConfigWarning>) -> Self {
        Self { value, warnings }
    }

    /// True if every option was accepted as given.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Discard the warnings and keep the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        Validated {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Record a warning and emit it through the `log` facade.
pub(crate) fn push_warning(warnings: &mut Vec<ConfigWarning>, warning: ConfigWarning) {
    log::warn!("{}", warning);
    warnings.push(warning);
}
