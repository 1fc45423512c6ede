//! Rotation options and their validation.
//!
//! [`RotationOptions`] holds raw, unchecked input. [`RotationOptions::build`]
//! turns it into an immutable [`RotationConfig`], replacing every invalid
//! option with its default and reporting the replacement as a
//! [`ConfigWarning`].
//!
//! Options are validated in a fixed order: method, anti-aliasing, angle,
//! pivot. Anti-aliasing and pivot are only legal for some methods, so the
//! method has to be settled first. A rejected pivot changes the method back
//! to `center` after anti-aliasing has already been decided.

use serde::{Deserialize, Serialize};

use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};

/// Default rotation angle in degrees.
pub const DEFAULT_ANGLE: u16 = 90;

/// Largest accepted rotation angle in degrees.
pub const MAX_ANGLE: i32 = 360;

/// Where the rotation is centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationMethod {
    /// Rotate around the geometric center of the image.
    #[default]
    Center,
    /// Rotate around a pivot given relative to the image size.
    Point,
}

impl RotationMethod {
    /// Parse a method name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "center" => Some(RotationMethod::Center),
            "point" => Some(RotationMethod::Point),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationMethod::Center => "center",
            RotationMethod::Point => "point",
        }
    }
}

/// Pivot position as percentages of image width (`x`) and height (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePivot {
    pub x: f64,
    pub y: f64,
}

impl RelativePivot {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_valid(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// Raw rotation options, as a caller or a JSON document supplies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationOptions {
    /// `center` or `point`
    pub method: String,
    /// Rotation angle in degrees (0 to 360)
    pub angle: i32,
    /// Relative pivot, only consulted for method `point`
    pub pivot: Option<RelativePivot>,
    /// Use the shear rotation (method `center` only)
    pub anti_aliasing: bool,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            method: RotationMethod::Center.as_str().to_string(),
            angle: i32::from(DEFAULT_ANGLE),
            pivot: None,
            anti_aliasing: true,
        }
    }
}

impl RotationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn pivot(mut self, x: f64, y: f64) -> Self {
        self.pivot = Some(RelativePivot::new(x, y));
        self
    }

    pub fn anti_aliasing(mut self, anti_aliasing: bool) -> Self {
        self.anti_aliasing = anti_aliasing;
        self
    }

    /// Validate the options into a [`RotationConfig`].
    ///
    /// Never fails; see the module docs for the correction rules.
    pub fn build(&self) -> Validated<RotationConfig> {
        let mut warnings = Vec::new();

        let method = validate_method(&self.method, &mut warnings);
        let anti_aliasing = validate_anti_aliasing(self.anti_aliasing, method, &mut warnings);
        let angle_degrees = validate_angle(self.angle, &mut warnings);
        let (method, pivot) = validate_pivot(self.pivot, method, &mut warnings);

        Validated::new(
            RotationConfig {
                method,
                angle_degrees,
                pivot,
                anti_aliasing,
            },
            warnings,
        )
    }
}

fn validate_method(name: &str, warnings: &mut Vec<ConfigWarning>) -> RotationMethod {
    RotationMethod::parse(name).unwrap_or_else(|| {
        let default = RotationMethod::default();
        push_warning(
            warnings,
            ConfigWarning::UnknownValue {
                option: "method",
                value: name.to_string(),
                default: default.as_str().to_string(),
            },
        );
        default
    })
}

fn validate_anti_aliasing(
    anti_aliasing: bool,
    method: RotationMethod,
    warnings: &mut Vec<ConfigWarning>,
) -> bool {
    if anti_aliasing && method != RotationMethod::Center {
        push_warning(warnings, ConfigWarning::AntiAliasingRequiresCenter);
        return false;
    }
    anti_aliasing
}

fn validate_angle(angle: i32, warnings: &mut Vec<ConfigWarning>) -> u16 {
    if (0..=MAX_ANGLE).contains(&angle) {
        return angle as u16;
    }
    push_warning(
        warnings,
        ConfigWarning::OutOfRange {
            option: "angle",
            value: angle.to_string(),
            range: "0..=360",
            default: DEFAULT_ANGLE.to_string(),
        },
    );
    DEFAULT_ANGLE
}

fn validate_pivot(
    pivot: Option<RelativePivot>,
    method: RotationMethod,
    warnings: &mut Vec<ConfigWarning>,
) -> (RotationMethod, Option<RelativePivot>) {
    if method != RotationMethod::Point {
        return (method, None);
    }
    match pivot {
        Some(p) if p.is_valid() => (method, Some(p)),
        Some(p) => {
            push_warning(warnings, ConfigWarning::PivotOutOfRange { x: p.x, y: p.y });
            (RotationMethod::Center, None)
        }
        None => {
            push_warning(warnings, ConfigWarning::MissingPivot);
            (RotationMethod::Center, None)
        }
    }
}

/// Validated rotation configuration.
///
/// Only [`RotationOptions::build`] creates one, so the fields always satisfy:
/// the angle is within 0..=360, a pivot is present exactly when the method
/// is `point`, and anti-aliasing is only enabled for `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationConfig {
    method: RotationMethod,
    angle_degrees: u16,
    pivot: Option<RelativePivot>,
    anti_aliasing: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationOptions::default().build().into_inner()
    }
}

impl RotationConfig {
    pub fn method(&self) -> RotationMethod {
        self.method
    }

    pub fn angle_degrees(&self) -> u16 {
        self.angle_degrees
    }

    pub fn pivot(&self) -> Option<RelativePivot> {
        self.pivot
    }

    pub fn anti_aliasing(&self) -> bool {
        self.anti_aliasing
    }

    /// The rotation algorithm this configuration selects.
    ///
    /// Returns `InvalidConfiguration` for states validation never produces:
    /// anti-aliasing combined with a pivot, or method `point` without one.
    pub fn strategy(&self) -> Result<RotationStrategy, AugmentError> {
        match (self.method, self.pivot) {
            (RotationMethod::Center, _) => Ok(RotationStrategy::Center {
                anti_aliasing: self.anti_aliasing,
            }),
            (RotationMethod::Point, _) if self.anti_aliasing => {
                Err(AugmentError::InvalidConfiguration(
                    "anti-aliasing can not be used with method 'point'".to_string(),
                ))
            }
            (RotationMethod::Point, Some(pivot)) => Ok(RotationStrategy::Point { pivot }),
            (RotationMethod::Point, None) => Err(AugmentError::InvalidConfiguration(
                "method 'point' has no pivot".to_string(),
            )),
        }
    }
}

/// Rotation algorithm selected by a [`RotationConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationStrategy {
    /// Around the image center; shear rotation when anti-aliased,
    /// matrix rotation otherwise.
    Center { anti_aliasing: bool },
    /// Matrix rotation around a relative pivot.
    Point { pivot: RelativePivot },
}
