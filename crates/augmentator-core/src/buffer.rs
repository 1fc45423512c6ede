//! RGB pixel buffer shared by all transforms.

use crate::types::AugmentError;

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// Value of destination pixels that no source pixel was mapped to.
pub const BACKGROUND_FILL: [u8; CHANNELS] = [255, 255, 255];

/// An image with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length must be width * height * 3.
    pub pixels: Vec<u8>,
}

/// Length in bytes of a `width` x `height` RGB buffer, or `None` on overflow.
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

impl PixelBuffer {
    /// Create a buffer from dimensions and pixel data, checking the length.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AugmentError> {
        let image = Self {
            width,
            height,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Create a buffer where every pixel has the same value.
    ///
    /// # Panics
    ///
    /// If `width * height * 3` does not fit in `usize`.
    pub fn filled(width: u32, height: u32, pixel: [u8; CHANNELS]) -> Self {
        let len = byte_len(width, height).unwrap_or(usize::MAX);
        let mut pixels = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            pixels.extend_from_slice(&pixel);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer filled with [`BACKGROUND_FILL`].
    ///
    /// # Panics
    ///
    /// If `width * height * 3` does not fit in `usize`.
    pub fn background(width: u32, height: u32) -> Self {
        let len = byte_len(width, height).unwrap_or(usize::MAX);
        Self {
            width,
            height,
            pixels: vec![255u8; len],
        }
    }

    /// Create a PixelBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for encoding or further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check that the pixel vector matches the dimensions.
    ///
    /// Dimensions whose byte length overflows `usize` never match; the error
    /// then reports `usize::MAX` as the expected length.
    pub fn validate(&self) -> Result<(), AugmentError> {
        let expected = byte_len(self.width, self.height);
        if expected != Some(self.pixels.len()) {
            let expected = expected.unwrap_or(usize::MAX);
            return Err(AugmentError::BufferSizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        (row * self.width as usize + col) * CHANNELS
    }

    /// Read the pixel at `(row, col)`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; CHANNELS] {
        let idx = self.index(row, col);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Overwrite the pixel at `(row, col)`.
    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, pixel: [u8; CHANNELS]) {
        let idx = self.index(row, col);
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&pixel);
    }

    /// Bytes of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = self.index(row, 0);
        &self.pixels[start..start + self.row_len()]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = self.index(row, 0);
        let len = self.row_len();
        &mut self.pixels[start..start + len]
    }

    #[inline]
    fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(PixelBuffer::new(2, 2, vec![0u8; 12]).is_ok());

        let err = PixelBuffer::new(2, 2, vec![0u8; 11]).unwrap_err();
        assert_eq!(
            err,
            AugmentError::BufferSizeMismatch {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        // u32::MAX^2 fits in 64 bits but the byte length does not
        let img = PixelBuffer {
            width: u32::MAX,
            height: u32::MAX,
            pixels: Vec::new(),
        };
        assert_eq!(
            img.validate(),
            Err(AugmentError::BufferSizeMismatch {
                expected: usize::MAX,
                actual: 0
            })
        );
        assert!(PixelBuffer::new(u32::MAX, u32::MAX, vec![0u8; 3]).is_err());
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(byte_len(4, 5), Some(60));
        assert_eq!(byte_len(0, u32::MAX), Some(0));
        assert_eq!(byte_len(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_filled_and_background() {
        let img = PixelBuffer::filled(3, 2, [1, 2, 3]);
        assert_eq!(img.pixel_count(), 6);
        assert_eq!(img.byte_size(), 18);
        assert_eq!(img.pixel(1, 2), [1, 2, 3]);

        let bg = PixelBuffer::background(2, 2);
        assert!(bg.pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_pixel_access() {
        let mut img = PixelBuffer::filled(4, 3, [0, 0, 0]);
        img.set_pixel(2, 1, [9, 8, 7]);

        assert_eq!(img.pixel(2, 1), [9, 8, 7]);
        assert_eq!(img.pixel(1, 2), [0, 0, 0]);
        // Row 2 starts at byte 24; column 1 is bytes 27..30
        assert_eq!(&img.row(2)[3..6], &[9, 8, 7]);
    }

    #[test]
    fn test_empty() {
        assert!(PixelBuffer::background(0, 5).is_empty());
        assert!(!PixelBuffer::background(1, 1).is_empty());
    }

    #[test]
    fn test_rgb_image_conversion() {
        let img = PixelBuffer::filled(5, 4, [10, 20, 30]);
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.dimensions(), (5, 4));

        let back = PixelBuffer::from_rgb_image(rgb);
        assert_eq!(back, img);
    }
}
