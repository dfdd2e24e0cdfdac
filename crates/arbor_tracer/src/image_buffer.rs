//! Pixel destinations for the tracer.

use std::path::Path;

use arbor_math::Color;

use crate::error::{RenderError, RenderResult};

/// Anything the tracer can write scanlines into.
///
/// Row 0 is the bottom of the image.
pub trait ImageSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Store `data` as consecutive pixels of row `y`, starting at column `x`.
    /// Pixels past the end of the row are dropped.
    fn set_data(&mut self, x: u32, y: u32, data: &[Color]);
}

/// Clamp a color to [0, 1] and convert it to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// In-memory image of linear colors.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// RGBA bytes with the top row first, as image files expect.
    pub fn to_rgba(&self) -> Vec<u8> {
        let rgba: Vec<[u8; 4]> = (0..self.height)
            .rev()
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| color_to_rgba(self.get(x, y)))
            .collect();
        bytemuck::cast_slice(&rgba).to_vec()
    }

    /// Save as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let invalid = RenderError::InvalidImageSize {
            width: self.width,
            height: self.height,
        };
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba()).ok_or(invalid)?;
        image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

impl ImageSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_data(&mut self, x: u32, y: u32, data: &[Color]) {
        if y >= self.height || x >= self.width {
            return;
        }
        let start = self.index(x, y);
        let count = data.len().min((self.width - x) as usize);
        self.pixels[start..start + count].copy_from_slice(&data[..count]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 1.0)), [255, 0, 255, 255]);
        assert_eq!(color_to_rgba(Color::splat(0.5)), [127, 127, 127, 255]);
    }

    #[test]
    fn test_set_data_clips_row() {
        let mut image = ImageBuffer::new(3, 2);
        image.set_data(1, 1, &[Color::ONE; 5]);

        assert_eq!(image.get(0, 1), Color::ZERO);
        assert_eq!(image.get(1, 1), Color::ONE);
        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.get(2, 0), Color::ZERO);

        // Out of range rows are ignored
        image.set_data(0, 5, &[Color::ONE]);
    }

    #[test]
    fn test_to_rgba_puts_top_row_first() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 1, Color::X);

        let bytes = image.to_rgba();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &[255, 0, 0, 255]);
        assert_eq!(&bytes[4..], &[0, 0, 0, 255]);
    }
}
