use log::debug;
use nalgebra::{Isometry3, Perspective3, Point3, Unit, Vector2, Vector3, Vector4};
use rayon::prelude::*;

/// Static perspective camera.
///
/// Caches one ray direction per pixel, row-major starting at the top-left
/// pixel, and rebuilds them whenever the view or the viewport changes.
/// Interactive input lives outside this crate; callers move the camera with
/// [`Camera::set_view`] and reset accumulation when it reports a change.
pub struct Camera {
    projection: Option<Perspective3<f32>>,
    view: Isometry3<f32>,

    vertical_fov: f32,
    near: f32,
    far: f32,

    position: Point3<f32>,
    forward: Unit<Vector3<f32>>,

    rays: Vec<Vector3<f32>>,

    width: u32,
    height: u32,
}

impl Camera {
    /// `vertical_fov` is in degrees.
    pub fn new(vertical_fov: f32, near: f32, far: f32, width: u32, height: u32) -> Self {
        let position = Point3::new(0.0, 0.0, 6.0);
        let forward = Unit::new_unchecked(-Vector3::z());

        let mut to_return = Self {
            projection: None,
            view: Self::look_at(&position, &forward),
            vertical_fov,
            near,
            far,
            position,
            forward,
            rays: vec![],
            width,
            height,
        };

        to_return.reevaluate_projection();
        to_return.reevaluate_rays();

        to_return
    }

    pub fn with_view(mut self, position: Point3<f32>, forward: Vector3<f32>) -> Self {
        self.set_view(position, forward);
        self
    }

    /// Moves the camera. Returns `true` if the view actually changed, in which
    /// case previously accumulated samples are stale.
    pub fn set_view(&mut self, position: Point3<f32>, forward: Vector3<f32>) -> bool {
        let Some(forward) = Unit::try_new(forward, f32::EPSILON) else {
            return false;
        };
        if position == self.position && forward == self.forward {
            return false;
        }

        self.position = position;
        self.forward = forward;
        self.view = Self::look_at(&self.position, &self.forward);
        self.reevaluate_rays();

        true
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }

        debug!("camera viewport {}x{}", width, height);
        self.width = width;
        self.height = height;

        self.reevaluate_projection();
        self.reevaluate_rays();

        true
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward.into_inner()
    }

    pub fn rays(&self) -> &[Vector3<f32>] {
        &self.rays
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn look_at(position: &Point3<f32>, forward: &Unit<Vector3<f32>>) -> Isometry3<f32> {
        // 정면이 y축과 평행하면 up 벡터를 바꿔야 look_at이 망가지지 않음
        let up = if forward.cross(&Vector3::y()).magnitude_squared() < 1e-6 {
            Vector3::z()
        } else {
            Vector3::y()
        };
        Isometry3::look_at_rh(position, &(position + forward.into_inner()), &up)
    }

    fn reevaluate_projection(&mut self) {
        // 넓이나 높이가 0이면 종횡비를 못 구함
        self.projection = (self.width > 0 && self.height > 0).then(|| {
            let aspect = self.width as f32 / self.height as f32;
            Perspective3::new(aspect, self.vertical_fov.to_radians(), self.near, self.far)
        });
    }

    fn reevaluate_rays(&mut self) {
        let Some(projection) = self.projection else {
            self.rays = vec![];
            return;
        };

        let inverse_projection = projection.inverse();
        let (width, height) = (self.width, self.height);
        let view = self.view;

        self.rays = (0..width * height)
            .into_par_iter()
            .map(|index| {
                let y = index / width;
                let x = index % width;

                // 0번째 줄이 화면 맨 위가 되도록 y를 뒤집음
                let coord = Vector2::new(
                    x as f32 / width as f32 * 2.0 - 1.0,
                    1.0 - y as f32 / height as f32 * 2.0,
                );

                let target = inverse_projection * Vector4::new(coord.x, coord.y, 1.0, 1.0);
                let direction = (target.xyz() / target.w).normalize();

                view.inverse_transform_vector(&direction)
            })
            .collect();
    }
}
