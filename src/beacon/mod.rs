use std::time::Instant;

use bytemuck::cast_slice;
use log::{debug, trace, warn};
use nalgebra::Vector4;
use rayon::prelude::*;

use crate::beacon::error::RenderError;
use crate::beacon::integrator::FrameContext;
use crate::beacon::scene::Scene;
use crate::camera::Camera;
use crate::vec4_to_rgba;

pub mod error;
pub mod integrator;
pub mod intersect;
pub mod random;
pub mod ray;
pub mod scene;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub accumulate: bool,
    // PCG 대신 rand의 thread_rng 사용. 비교/디버깅용
    pub slow_render: bool,
    pub bounce_limit: usize,
    /// Scale each bounce's emission by the albedo gathered so far.
    ///
    /// Off by default: emission is summed as-is, which is not energy
    /// conserving but matches the look the renderer has always had.
    pub weighted_emission: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accumulate: true,
            slow_render: false,
            bounce_limit: 5,
            weighted_emission: false,
        }
    }
}

pub struct Renderer {
    width: u32,
    height: u32,
    final_image_data: Vec<u32>,
    accumulation: Vec<Vector4<f32>>,
    frame_index: u32,
    pub settings: Settings,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width * height) as usize;

        Self {
            width,
            height,
            final_image_data: vec![0; pixel_count],
            accumulation: vec![Vector4::zeros(); pixel_count],
            frame_index: 1,
            settings: Default::default(),
        }
    }

    /// Reallocates the output and accumulation buffers.
    ///
    /// Returns `false` without touching anything when the size is unchanged.
    /// Must not be called while a pass is running, which `&mut self` already
    /// guarantees.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }

        debug!("resizing renderer {}x{} -> {}x{}", self.width, self.height, width, height);

        let pixel_count = (width * height) as usize;
        self.width = width;
        self.height = height;
        self.final_image_data = vec![0; pixel_count];
        self.accumulation = vec![Vector4::zeros(); pixel_count];
        self.frame_index = 1;

        true
    }

    /// Renders one frame and folds it into the accumulation buffer.
    ///
    /// The scene and the camera are checked before any state changes, so a
    /// refused frame leaves the frame index and both buffers as they were.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        if let Err(err) = scene.validate() {
            warn!("refusing to render: {}", err);
            return Err(err.into());
        }

        let expected = (self.width * self.height) as usize;
        if camera.rays().len() != expected {
            warn!(
                "refusing to render: camera has {} rays for a {}x{} image",
                camera.rays().len(),
                self.width,
                self.height
            );
            return Err(RenderError::RayCountMismatch {
                expected,
                actual: camera.rays().len(),
            });
        }

        if expected == 0 {
            return Ok(());
        }

        let started = Instant::now();

        // 누적 시작 지점
        if self.frame_index == 1 {
            self.accumulation.fill(Vector4::zeros());
        }

        let context = FrameContext {
            scene,
            origin: camera.position(),
            rays: camera.rays(),
            width: self.width,
            frame_index: self.frame_index,
            settings: &self.settings,
        };
        let divisor = self.frame_index as f32;
        let width = self.width as usize;

        // 픽셀마다 자기 칸만 건드리니 잠금이 필요 없음
        self.accumulation
            .par_chunks_mut(width)
            .zip(self.final_image_data.par_chunks_mut(width))
            .enumerate()
            .for_each(|(y, (accumulation_row, image_row))| {
                accumulation_row
                    .par_iter_mut()
                    .zip(image_row.par_iter_mut())
                    .enumerate()
                    .for_each(|(x, (accumulated, pixel))| {
                        *accumulated += context.per_pixel(x as u32, y as u32);
                        *pixel = vec4_to_rgba(&(*accumulated / divisor));
                    });
            });

        trace!(
            "frame {} rendered in {:.3}ms",
            self.frame_index,
            started.elapsed().as_secs_f64() * 1000.0
        );

        if self.settings.accumulate {
            self.frame_index += 1;
        } else {
            self.frame_index = 1;
        }

        Ok(())
    }

    pub fn reset_frame_index(&mut self) {
        debug!("accumulation reset after {} frames", self.frame_index - 1);
        self.frame_index = 1;
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Packed RGBA pixels, row-major from the top-left corner.
    pub fn image_data(&self) -> &[u32] {
        &self.final_image_data
    }

    pub fn image_bytes(&self) -> &[u8] {
        cast_slice(&self.final_image_data)
    }

    pub fn accumulation(&self) -> &[Vector4<f32>] {
        &self.accumulation
    }
}
