// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host pixel buffers and their conversion to the engine's luma layout.
//!
//! The engine consumes one byte of intensity per pixel, row-major, with the
//! same width and height as the source image.

use crate::errors::DecodeError;

/// Pixel layout of a host image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Interleaved `[r, g, b, a]` bytes, as produced by a canvas `ImageData`.
    Rgba8,
    /// One `u32` per pixel, packed as `0x00RRGGBB`, stored little-endian.
    Rgb32,
}

impl PixelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        4
    }
}

/// A borrowed host image.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl<'a> PixelBuffer<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            data,
            width,
            height,
            layout,
        }
    }

    pub fn rgba(data: &'a [u8], width: u32, height: u32) -> Self {
        Self::new(data, width, height, PixelLayout::Rgba8)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Convert to luma, checking the buffer against its declared dimensions.
    pub fn to_luma(&self) -> Result<Vec<u8>, DecodeError> {
        let pixels = pixel_count(self.width, self.height)?;
        let expected = pixels
            .checked_mul(self.layout.bytes_per_pixel())
            .ok_or_else(|| DecodeError::MalformedInput("image dimensions overflow".to_string()))?;

        if self.data.len() != expected {
            return Err(DecodeError::MalformedInput(format!(
                "pixel buffer holds {} bytes, {}x{} {:?} needs {}",
                self.data.len(),
                self.width,
                self.height,
                self.layout,
                expected
            )));
        }

        Ok(match self.layout {
            PixelLayout::Rgba8 => rgba_to_luma(self.data),
            PixelLayout::Rgb32 => rgb32_to_luma(self.data),
        })
    }
}

/// Number of pixels in a `width` x `height` image; both must be non-zero.
pub fn pixel_count(width: u32, height: u32) -> Result<usize, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::MalformedInput(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| DecodeError::MalformedInput("image dimensions overflow".to_string()))
}

/// Fixed-point BT.601 luminance: `(306 R + 601 G + 117 B + 0x200) >> 10`.
#[inline]
pub fn luminance(red: u8, green: u8, blue: u8) -> u8 {
    ((306 * red as u32 + 601 * green as u32 + 117 * blue as u32 + 0x200) >> 10) as u8
}

/// Interleaved RGBA to luma. Fully transparent pixels read as white.
///
/// Trailing bytes that do not form a whole pixel are ignored.
pub fn rgba_to_luma(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .map(|pixel| {
            if pixel[3] == 0 {
                0xFF
            } else {
                luminance(pixel[0], pixel[1], pixel[2])
            }
        })
        .collect()
}

/// Packed little-endian `0x00RRGGBB` pixels to luma.
pub fn rgb32_to_luma(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .map(|pixel| {
            let packed = u32::from_le_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);
            luminance((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
    }

    #[test]
    fn test_luminance_weights_green_highest() {
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
        assert_eq!(luminance(255, 0, 0), 76);
    }

    #[test]
    fn test_transparent_pixels_are_white() {
        let data = [0, 0, 0, 0, 0, 0, 0, 255];
        assert_eq!(rgba_to_luma(&data), vec![255, 0]);
    }

    #[test]
    fn test_rgb32_matches_rgba() {
        let rgba = [10, 200, 30, 255];
        let packed = (10u32 << 16 | 200 << 8 | 30).to_le_bytes();
        assert_eq!(rgb32_to_luma(&packed), rgba_to_luma(&rgba));
    }

    #[test]
    fn test_buffer_dimensions_checked() {
        let data = vec![255u8; 4 * 6];
        let ok = PixelBuffer::rgba(&data, 3, 2).to_luma().unwrap();
        assert_eq!(ok.len(), 6);

        let short = PixelBuffer::rgba(&data, 4, 2).to_luma();
        assert!(matches!(short, Err(DecodeError::MalformedInput(_))));

        let empty = PixelBuffer::rgba(&[], 0, 2).to_luma();
        assert!(matches!(empty, Err(DecodeError::MalformedInput(_))));
    }

    #[test]
    fn test_rgb32_buffer_to_luma() {
        let pixels = [0x00FF_FFFFu32, 0x0000_0000, 0x00FF_0000, 0x000A_C81E];
        let data: Vec<u8> = pixels.iter().flat_map(|pixel| pixel.to_le_bytes()).collect();

        let buffer = PixelBuffer::new(&data, 2, 2, PixelLayout::Rgb32);
        assert_eq!(buffer.layout(), PixelLayout::Rgb32);
        assert_eq!(
            buffer.to_luma().unwrap(),
            vec![255, 0, 76, luminance(10, 200, 30)]
        );

        let short = PixelBuffer::new(&data[..12], 2, 2, PixelLayout::Rgb32).to_luma();
        assert!(matches!(short, Err(DecodeError::MalformedInput(_))));
    }
}
