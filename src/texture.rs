//! CPU-side RGBA images: decoded screen captures, procedural sprite
//! sheets, and cached text renders. Blitting into the frame happens in
//! `PixelBuffer`.

use crate::error::{Error, Result};

/// A texture stored as RGBA pixels
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA, 4 bytes per pixel
}

impl Texture {
    /// Create a new fully transparent texture
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Create texture from raw RGBA data
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() == (width * height * 4) as usize {
            Some(Self {
                width,
                height,
                pixels: data,
            })
        } else {
            None
        }
    }

    /// Decode PNG/JPEG bytes (content type inferred from the payload)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| Error::AssetDecode(e.to_string()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            pixels: img.into_raw(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            self.pixels[idx] = r;
            self.pixels[idx + 1] = g;
            self.pixels[idx + 2] = b;
            self.pixels[idx + 3] = a;
        }
    }

    /// Fill an axis-aligned region (sprite builders)
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, r: u8, g: u8, b: u8, a: u8) {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                let idx = ((py * self.width + px) * 4) as usize;
                self.pixels[idx] = r;
                self.pixels[idx + 1] = g;
                self.pixels[idx + 2] = b;
                self.pixels[idx + 3] = a;
            }
        }
    }

    /// Sample with coordinates clamped to the edges
    #[inline]
    pub fn sample_clamped(&self, x: i32, y: i32) -> (u8, u8, u8, u8) {
        let x = x.clamp(0, self.width as i32 - 1) as u32;
        let y = y.clamp(0, self.height as i32 - 1) as u32;
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Sample with wrapping coordinates (equirectangular globe texture)
    #[inline]
    pub fn sample_wrapped(&self, x: i32, y: i32) -> (u8, u8, u8, u8) {
        let x = x.rem_euclid(self.width as i32) as u32;
        let y = y.rem_euclid(self.height as i32) as u32;
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_size_check() {
        assert!(Texture::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Texture::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_sample_clamped_edges() {
        let mut tex = Texture::new(2, 2);
        tex.set_pixel(1, 1, 9, 8, 7, 255);
        assert_eq!(tex.sample_clamped(5, 5), (9, 8, 7, 255));
        assert_eq!(tex.sample_clamped(-3, -3), (0, 0, 0, 0));
    }

    #[test]
    fn test_sample_wrapped() {
        let mut tex = Texture::new(4, 2);
        tex.set_pixel(0, 0, 1, 2, 3, 255);
        assert_eq!(tex.sample_wrapped(4, 2), (1, 2, 3, 255));
        assert_eq!(tex.sample_wrapped(-4, 0), (1, 2, 3, 255));
    }
}
