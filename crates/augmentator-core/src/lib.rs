//! Augmentator Core - Image augmentation library
//!
//! This crate provides label-preserving augmentations for RGB images:
//! rotation (shear or matrix based), flipping, translation, center and
//! random cropping, color channel transforms, mixing of two images, noise
//! injection and random erasing.
//!
//! Every transform is built from a serde-friendly options struct. Building
//! never fails: invalid options are replaced by defaults and reported as
//! [`ConfigWarning`]s. Applying a transform never modifies its input.

pub mod buffer;
pub mod pipeline;
pub mod rotation;
pub mod transform;
pub mod types;

pub use buffer::{PixelBuffer, BACKGROUND_FILL, CHANNELS};
pub use pipeline::Pipeline;
pub use rotation::{apply_rotation, RotationConfig, RotationOptions, Rotator};
pub use transform::{
    ColorTransformer, Cropper, Eraser, Flipper, Mixer, NoiseInjector, Translator,
};
pub use types::{AugmentError, ConfigWarning, Validated};

/// A configured image augmentation.
///
/// Implementations are immutable once built and deterministic: the same
/// input always gives the same output, including for randomized transforms,
/// which reseed from their configured seed on every call. The input buffer
/// is only read.
pub trait Augmenter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Apply the augmentation, returning a new buffer.
    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError>;
}

impl<A: Augmenter + ?Sized> Augmenter for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        (**self).augment(image)
    }
}
