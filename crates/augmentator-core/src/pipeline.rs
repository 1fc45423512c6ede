//! Sequential composition of augmenters.

use crate::buffer::PixelBuffer;
use crate::types::AugmentError;
use crate::Augmenter;

/// An ordered list of augmenters applied one after another.
///
/// Stops at the first failing stage; an empty pipeline returns a copy of
/// its input.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Augmenter>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage, builder style.
    pub fn with(mut self, stage: impl Augmenter + 'static) -> Self {
        self.push(stage);
        self
    }

    pub fn push(&mut self, stage: impl Augmenter + 'static) {
        self.stages.push(Box::new(stage));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in application order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl Augmenter for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        image.validate()?;

        let mut current = image.clone();
        for stage in &self.stages {
            log::debug!(
                "pipeline stage '{}' on {}x{}",
                stage.name(),
                current.width,
                current.height
            );
            current = stage.augment(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::{RotationOptions, Rotator};
    use crate::transform::{CropOptions, FlipOptions, Flipper};

    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    struct Failing;

    impl Augmenter for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn augment(&self, _image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
            Err(AugmentError::EmptyImage)
        }
    }

    #[test]
    fn test_empty_pipeline_copies_input() {
        let img = test_image(4, 3);
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.augment(&img).unwrap(), img);
    }

    #[test]
    fn test_stages_run_in_order() {
        let img = test_image(6, 4);
        let flip = Flipper::from_options(&FlipOptions::new().axis("y")).into_inner();
        let rotate = Rotator::from_options(&RotationOptions::new().angle(0)).into_inner();

        let pipeline = Pipeline::new().with(flip).with(rotate);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.stage_names(), vec!["flip", "rotate"]);

        let expected = rotate.augment(&flip.augment(&img).unwrap()).unwrap();
        assert_eq!(pipeline.augment(&img).unwrap(), expected);
    }

    #[test]
    fn test_double_flip_is_identity() {
        let img = test_image(5, 7);
        let flip = Flipper::from_options(&FlipOptions::new().axis("xy")).into_inner();
        let mut pipeline = Pipeline::new();
        pipeline.push(flip);
        pipeline.push(flip);
        assert_eq!(pipeline.augment(&img).unwrap(), img);
    }

    #[test]
    fn test_stops_at_first_error() {
        let img = test_image(4, 4);
        let crop = crate::transform::Cropper::from_options(&CropOptions::new()).into_inner();
        let pipeline = Pipeline::new().with(Failing).with(crop);
        assert_eq!(pipeline.augment(&img), Err(AugmentError::EmptyImage));
    }

    #[test]
    fn test_malformed_input_rejected() {
        let img = PixelBuffer {
            width: 2,
            height: 2,
            pixels: vec![0; 3],
        };
        let err = Pipeline::new().augment(&img).unwrap_err();
        assert!(matches!(err, AugmentError::BufferSizeMismatch { .. }));
    }
}
