//! Gaussian and salt-and-pepper noise.
//!
//! Both kinds draw from a generator seeded by the options, so a configured
//! [`NoiseInjector`] adds the same noise to the same image every time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::validate_fraction;
use crate::buffer::PixelBuffer;
use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};
use crate::Augmenter;

const DEFAULT_VALUE: f64 = 0.5;

/// Mean of the gaussian noise at `value = 1`.
const GAUSS_MEAN: f64 = 30.0;

/// Standard deviation of the gaussian noise at `value = 1`.
const GAUSS_SIGMA: f64 = 20.0;

/// Kind of noise to add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseMethod {
    /// Add a normally distributed offset to every sample.
    #[default]
    Gauss,
    /// Set random pixels to white, then random pixels to black.
    SaltPepper,
}

impl NoiseMethod {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gauss" => Some(NoiseMethod::Gauss),
            "salt_pepper" => Some(NoiseMethod::SaltPepper),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoiseMethod::Gauss => "gauss",
            NoiseMethod::SaltPepper => "salt_pepper",
        }
    }
}

/// Raw noise options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseOptions {
    /// `gauss` or `salt_pepper`
    pub method: String,
    /// Noise intensity (0.0 to 1.0)
    pub value: f64,
    /// Seed for the noise generator
    pub seed: u64,
}

impl Default for NoiseOptions {
    fn default() -> Self {
        Self {
            method: NoiseMethod::default().as_str().to_string(),
            value: DEFAULT_VALUE,
            seed: 0,
        }
    }
}

impl NoiseOptions {
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

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(&self) -> Validated<NoiseInjector> {
        let mut warnings = Vec::new();
        let method = NoiseMethod::parse(&self.method).unwrap_or_else(|| {
            push_warning(
                &mut warnings,
                ConfigWarning::UnknownValue {
                    option: "method",
                    value: self.method.clone(),
                    default: NoiseMethod::default().as_str().to_string(),
                },
            );
            NoiseMethod::default()
        });
        let value = validate_fraction("value", self.value, DEFAULT_VALUE, None, &mut warnings);

        Validated::new(
            NoiseInjector {
                method,
                value,
                seed: self.seed,
            },
            warnings,
        )
    }
}

/// Adds seeded noise to images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseInjector {
    method: NoiseMethod,
    value: f64,
    seed: u64,
}

impl Default for NoiseInjector {
    fn default() -> Self {
        NoiseOptions::default().build().into_inner()
    }
}

impl NoiseInjector {
    pub fn from_options(options: &NoiseOptions) -> Validated<Self> {
        options.build()
    }

    pub fn method(&self) -> NoiseMethod {
        self.method
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Augmenter for NoiseInjector {
    fn name(&self) -> &'static str {
        "noise"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        image.validate()?;
        let mut output = image.clone();
        if output.is_empty() {
            return Ok(output);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        match self.method {
            NoiseMethod::Gauss => add_gaussian(&mut output, self.value, &mut rng),
            NoiseMethod::SaltPepper => add_salt_pepper(&mut output, self.value, &mut rng),
        }
        Ok(output)
    }
}

/// Add `N(30·value, 20·value)` to every sample, clamp to `[0, 255]` and
/// truncate.
fn add_gaussian<R: Rng + ?Sized>(image: &mut PixelBuffer, value: f64, rng: &mut R) {
    let mean = GAUSS_MEAN * value;
    let sigma = GAUSS_SIGMA * value;
    for sample in image.pixels.iter_mut() {
        let noisy = f64::from(*sample) + mean + sigma * standard_normal(rng);
        *sample = noisy.clamp(0.0, 255.0) as u8;
    }
}

/// Whiten `ceil(value/100 · samples/2)` random pixels, then blacken as many.
fn add_salt_pepper<R: Rng + ?Sized>(image: &mut PixelBuffer, value: f64, rng: &mut R) {
    let amount = value / 100.0;
    let count = (amount * image.pixels.len() as f64 * 0.5).ceil() as usize;
    let (height, width) = (image.height as usize, image.width as usize);

    for fill in [[255u8; 3], [0u8; 3]] {
        for _ in 0..count {
            let row = rng.random_range(0..height);
            let col = rng.random_range(0..width);
            image.set_pixel(row, col, fill);
        }
    }
}

/// Box-Muller sample from the standard normal distribution.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps the logarithm finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
