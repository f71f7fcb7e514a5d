//! Decoded texture data

use crate::assets::AssetError;
use crate::scene::Color;

/// Which surface a texture belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Surface of the central body
    CentralBody,
    /// Surface shared by every NEO body
    NeoSurface,
}

/// RGBA8 pixels ready for a backend
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// Raw RGBA pixel data, row-major
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    mean: Color,
}

impl TextureData {
    /// Decode an encoded image (PNG, JPEG)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::debug!("Decoded texture {}x{}", width, height);

        Ok(Self::from_raw(rgba.into_raw(), width, height))
    }

    /// Create a solid color texture
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        Self::from_raw(color.repeat(pixel_count), width, height)
    }

    fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Self {
        let mean = mean_color(&data);
        Self {
            data,
            width,
            height,
            mean,
        }
    }

    /// Average color over all pixels
    pub fn mean_color(&self) -> Color {
        self.mean
    }

    /// Nearest-neighbour sample at texture coordinates in `[0, 1]`
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return self.mean;
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        let offset = ((y * self.width + x) * 4) as usize;
        match self.data.get(offset..offset + 3) {
            Some(&[r, g, b]) => Color::from_rgb(r, g, b),
            _ => self.mean,
        }
    }
}

fn mean_color(data: &[u8]) -> Color {
    let pixels = data.len() / 4;
    if pixels == 0 {
        return Color::default();
    }
    let mut sums = [0u64; 3];
    for pixel in data.chunks_exact(4) {
        for (sum, channel) in sums.iter_mut().zip(pixel) {
            *sum += u64::from(*channel);
        }
    }
    let [r, g, b] = sums.map(|sum| (sum / pixels as u64) as u8);
    Color::from_rgb(r, g, b)
}
