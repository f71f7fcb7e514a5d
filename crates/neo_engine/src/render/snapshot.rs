//! Software rendering backend
//!
//! Rasterizes spheres as depth-tested, shaded discs into an RGBA image that
//! can be written to a PNG. Used by headless hosts and tests.

use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

use crate::foundation::math::Vec3;
use crate::render::{BackendResult, Camera, DrawSphere, RenderBackend, RenderError};
use crate::scene::Color;

/// Light contribution that every lit pixel receives
const AMBIENT: f32 = 0.35;

/// Software backend drawing into an image
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    frame: RgbaImage,
    depth: Vec<f32>,
    camera: Option<Camera>,
    frames_presented: u64,
    spheres_drawn: usize,
}

impl SnapshotBackend {
    /// Backend with a `width` x `height` surface
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            frame: RgbaImage::new(width, height),
            depth: vec![f32::INFINITY; (width * height) as usize],
            camera: None,
            frames_presented: 0,
            spheres_drawn: 0,
        }
    }

    /// The most recent frame
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    /// Color at pixel `(x, y)`, if inside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.frame.width() || y >= self.frame.height() {
            return None;
        }
        let Rgba([r, g, b, _]) = *self.frame.get_pixel(x, y);
        Some(Color::from_rgb(r, g, b))
    }

    /// Frames completed so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Spheres that were at least partly visible in the last frame
    pub fn spheres_drawn(&self) -> usize {
        self.spheres_drawn
    }

    /// Write the most recent frame as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> BackendResult<()> {
        let path = path.as_ref();
        self.frame
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| RenderError::Backend(format!("Failed to write {:?}: {}", path, e)))?;
        log::info!("Saved snapshot to {:?}", path);
        Ok(())
    }
}

impl RenderBackend for SnapshotBackend {
    fn surface_size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::Backend(format!("Invalid surface size {}x{}", width, height)));
        }
        if self.frame.dimensions() != (width, height) {
            log::debug!("Snapshot surface resized to {}x{}", width, height);
            self.frame = RgbaImage::new(width, height);
            self.depth = vec![f32::INFINITY; (width * height) as usize];
        }
        Ok(())
    }

    fn begin_frame(&mut self, camera: &Camera, clear: Color) -> BackendResult<()> {
        let clear = Rgba(clear.to_rgba8());
        for pixel in self.frame.pixels_mut() {
            *pixel = clear;
        }
        self.depth.fill(f32::INFINITY);
        self.camera = Some(camera.clone());
        self.spheres_drawn = 0;
        Ok(())
    }

    fn draw_sphere(&mut self, sphere: &DrawSphere<'_>) -> BackendResult<()> {
        let camera = self
            .camera
            .as_ref()
            .ok_or_else(|| RenderError::Backend("draw_sphere called outside a frame".to_string()))?;

        let forward = (camera.target - camera.position).normalize();
        let view_depth = (sphere.center - camera.position).dot(&forward);
        if view_depth <= camera.near || view_depth - sphere.radius > camera.far {
            return Ok(());
        }
        let Some(ndc) = camera.project_point(sphere.center) else {
            return Ok(());
        };

        let (width, height) = self.frame.dimensions();
        let half_height = height as f32 / 2.0;
        let center_x = (ndc.x + 1.0) * width as f32 / 2.0;
        let center_y = (1.0 - ndc.y) * half_height;
        let radius_px = sphere.radius / (view_depth * (camera.fov / 2.0).tan()) * half_height;
        if radius_px < 0.5 {
            return Ok(());
        }

        let min_x = (center_x - radius_px).floor().max(0.0) as u32;
        let max_x = (center_x + radius_px).ceil().min(width as f32 - 1.0);
        let min_y = (center_y - radius_px).floor().max(0.0) as u32;
        let max_y = (center_y + radius_px).ceil().min(height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return Ok(());
        }

        let mut visible = false;
        for y in min_y..=max_y as u32 {
            for x in min_x..=max_x as u32 {
                let dx = (x as f32 + 0.5 - center_x) / radius_px;
                let dy = (y as f32 + 0.5 - center_y) / radius_px;
                let rho_squared = dx * dx + dy * dy;
                if rho_squared > 1.0 {
                    continue;
                }

                let facing = (1.0 - rho_squared).sqrt();
                let depth = view_depth - facing * sphere.radius;
                let index = (y * width + x) as usize;
                if depth >= self.depth[index] {
                    continue;
                }
                self.depth[index] = depth;
                visible = true;

                let surface = match sphere.texture {
                    Some(texture) => texture
                        .sample((dx + 1.0) / 2.0, (dy + 1.0) / 2.0)
                        .modulate(sphere.color),
                    None => sphere.color,
                };
                self.frame.put_pixel(x, y, Rgba(shade(surface, Vec3::new(dx, -dy, facing))));
            }
        }

        if visible {
            self.spheres_drawn += 1;
        }
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        if self.camera.take().is_none() {
            return Err(RenderError::Backend("end_frame called outside a frame".to_string()));
        }
        self.frames_presented += 1;
        log::trace!("Snapshot frame {} with {} spheres", self.frames_presented, self.spheres_drawn);
        Ok(())
    }
}

/// Headlight shading: full intensity where the surface faces the viewer
fn shade(color: Color, normal: Vec3) -> [u8; 4] {
    let light = AMBIENT + (1.0 - AMBIENT) * normal.z.max(0.0);
    let [r, g, b] = color.rgb().map(|channel| (f32::from(channel) * light).round() as u8);
    [r, g, b, 0xff]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureData;

    /// Shading dims the disc slightly even at its center
    fn assert_near_color(actual: Option<Color>, expected: Color) {
        let actual = actual.unwrap().rgb();
        for (a, e) in actual.iter().zip(expected.rgb()) {
            assert!((i16::from(*a) - i16::from(e)).abs() <= 3, "{:?} vs {}", actual, expected);
        }
    }

    fn sphere(center: Vec3, radius: f32, color: u32) -> DrawSphere<'static> {
        DrawSphere {
            center,
            radius,
            color: Color::from_hex(color),
            texture: None,
        }
    }

    #[test]
    fn test_sphere_covers_center_of_view() {
        let mut backend = SnapshotBackend::new(64, 64);
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);

        backend.begin_frame(&camera, Color::from_hex(0x000000)).unwrap();
        backend.draw_sphere(&sphere(Vec3::zeros(), 1.0, 0xff0000)).unwrap();
        backend.end_frame().unwrap();

        assert_near_color(backend.pixel(32, 32), Color::from_hex(0xff0000));
        assert_eq!(backend.pixel(0, 0), Some(Color::from_hex(0x000000)));
        assert_eq!(backend.spheres_drawn(), 1);
        assert_eq!(backend.frames_presented(), 1);
    }

    #[test]
    fn test_nearer_sphere_wins_depth_test() {
        let mut backend = SnapshotBackend::new(64, 64);
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);

        backend.begin_frame(&camera, Color::from_hex(0x000000)).unwrap();
        backend.draw_sphere(&sphere(Vec3::new(0.0, 0.0, 2.0), 0.5, 0x00ff00)).unwrap();
        backend.draw_sphere(&sphere(Vec3::zeros(), 1.0, 0xff0000)).unwrap();
        backend.end_frame().unwrap();

        assert_near_color(backend.pixel(32, 32), Color::from_hex(0x00ff00));
    }

    #[test]
    fn test_sphere_behind_camera_is_skipped() {
        let mut backend = SnapshotBackend::new(32, 32);
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);

        backend.begin_frame(&camera, Color::from_hex(0x000000)).unwrap();
        backend.draw_sphere(&sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, 0xffffff)).unwrap();
        backend.end_frame().unwrap();

        assert_eq!(backend.spheres_drawn(), 0);
    }

    #[test]
    fn test_texture_is_tinted_by_material() {
        let mut backend = SnapshotBackend::new(64, 64);
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);
        let texture = TextureData::solid_color(4, 4, [0, 128, 255, 255]);

        backend.begin_frame(&camera, Color::from_hex(0x000000)).unwrap();
        backend
            .draw_sphere(&DrawSphere {
                texture: Some(&texture),
                ..sphere(Vec3::zeros(), 1.0, 0xffffff)
            })
            .unwrap();
        backend.end_frame().unwrap();

        assert_near_color(backend.pixel(32, 32), Color::from_rgb(0, 128, 255));
    }

    #[test]
    fn test_draw_outside_frame_is_an_error() {
        let mut backend = SnapshotBackend::new(8, 8);
        assert!(backend.draw_sphere(&sphere(Vec3::zeros(), 1.0, 0)).is_err());
        assert!(backend.end_frame().is_err());
        assert!(backend.resize(0, 8).is_err());
    }
}
