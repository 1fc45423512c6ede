//! Erasing random rectangles.
//!
//! Each rectangle covers roughly `size` of the image area with a randomly
//! chosen aspect ratio, and is filled with a solid color. Rectangles that
//! run past the right or bottom edge are cut off there.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};
use crate::Augmenter;

const DEFAULT_SIZE: f64 = 0.01;
const DEFAULT_COUNT: i64 = 1;
const DEFAULT_COLOR: &str = "#575757";

/// Upper bound for `size` and for the total `size * count`.
const MAX_AREA: f64 = 0.4;

/// Relative spread of the rectangle side lengths around a square.
const SIDE_SPREAD: f64 = 0.7;

/// Parse `#rrggbb` or the `#rgb` shorthand (case-insensitive).
pub fn parse_hex_color(color: &str) -> Option<[u8; CHANNELS]> {
    let digits = color.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match digits.len() {
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        3 => {
            let mut rgb = [0u8; CHANNELS];
            for (i, out) in rgb.iter_mut().enumerate() {
                *out = channel(&digits[i..i + 1])? * 17;
            }
            Some(rgb)
        }
        _ => None,
    }
}

/// Raw eraser options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraseOptions {
    /// Area of each rectangle as a fraction of the image (exclusive 0.0 to 0.4)
    pub size: f64,
    /// Number of rectangles; `size * count` must not exceed 0.4
    pub count: i64,
    /// Fill color, `#rrggbb` or `#rgb`
    pub color: String,
    /// Seed for rectangle shapes and positions
    pub seed: u64,
}

impl Default for EraseOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            count: DEFAULT_COUNT,
            color: DEFAULT_COLOR.to_string(),
            seed: 0,
        }
    }
}

impl EraseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate in the order size, count, color. The count limit uses the
    /// validated size.
    pub fn build(&self) -> Validated<Eraser> {
        let mut warnings = Vec::new();

        let size = if self.size > 0.0 && self.size < MAX_AREA {
            self.size
        } else {
            push_warning(
                &mut warnings,
                ConfigWarning::OutOfRange {
                    option: "size",
                    value: self.size.to_string(),
                    range: "(0, 0.4)",
                    default: DEFAULT_SIZE.to_string(),
                },
            );
            DEFAULT_SIZE
        };

        let count = if self.count > 0 && self.count as f64 * size <= MAX_AREA {
            self.count as u32
        } else {
            let max = (MAX_AREA / size).round() as u32;
            push_warning(
                &mut warnings,
                ConfigWarning::EraseCountCapped {
                    count: self.count,
                    limit: "40%",
                    max,
                },
            );
            max
        };

        let color = parse_hex_color(&self.color).unwrap_or_else(|| {
            push_warning(
                &mut warnings,
                ConfigWarning::UnknownValue {
                    option: "color",
                    value: self.color.clone(),
                    default: DEFAULT_COLOR.to_string(),
                },
            );
            [0x57, 0x57, 0x57]
        });

        Validated::new(
            Eraser {
                size,
                count,
                color,
                seed: self.seed,
            },
            warnings,
        )
    }
}

/// Fills seeded random rectangles with a solid color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eraser {
    size: f64,
    count: u32,
    color: [u8; CHANNELS],
    seed: u64,
}

impl Default for Eraser {
    fn default() -> Self {
        EraseOptions::default().build().into_inner()
    }
}

impl Eraser {
    pub fn from_options(options: &EraseOptions) -> Validated<Self> {
        options.build()
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn color(&self) -> [u8; CHANNELS] {
        self.color
    }
}

impl Augmenter for Eraser {
    fn name(&self) -> &'static str {
        "erase"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        image.validate()?;
        let mut output = image.clone();
        let area = (image.pixel_count() as f64 * self.size) as usize;
        if area == 0 {
            return Ok(output);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        for _ in 0..self.count {
            erase_rectangle(&mut output, area, self.color, &mut rng);
        }
        Ok(output)
    }
}

/// Fill one rectangle of at most `area` pixels.
///
/// The width is drawn from `side ± 0.7·side` around the side of the
/// equivalent square and the height follows from the area. The top-left
/// corner may lie anywhere that leaves at least the spread inside the image.
fn erase_rectangle<R: Rng + ?Sized>(
    image: &mut PixelBuffer,
    area: usize,
    color: [u8; CHANNELS],
    rng: &mut R,
) {
    let (width, height) = (image.width as usize, image.height as usize);
    let side = (area as f64).sqrt();
    let spread = (SIDE_SPREAD * side) as usize;
    let shortest = ((side - spread as f64) as usize).max(1);
    let longest = ((side + spread as f64) as usize).max(shortest);

    let rect_width = rng.random_range(shortest..=longest);
    let rect_height = area / rect_width;
    let left = rng.random_range(0..=width.saturating_sub(spread));
    let top = rng.random_range(0..=height.saturating_sub(spread));

    let right = width.min(left + rect_width);
    let bottom = height.min(top + rect_height);
    for row in top..bottom {
        for col in left..right {
            image.set_pixel(row, col, color);
        }
    }
}
