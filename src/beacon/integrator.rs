use nalgebra::{Point3, Vector3, Vector4};

use crate::beacon::intersect::trace_ray;
use crate::beacon::random::in_unit_sphere;
use crate::beacon::ray::Ray;
use crate::beacon::scene::Scene;
use crate::beacon::Settings;
use crate::util::random_unit_vec;

// 표면에서 바로 다시 부딪히지 않도록 법선 방향으로 살짝 띄움
const SURFACE_OFFSET: f32 = 0.0001;

/// Read-only state shared by every pixel task of one frame.
///
/// Built once per pass by the renderer and borrowed by all workers, so the
/// integrator never reaches for the renderer itself.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub scene: &'a Scene,
    pub origin: Point3<f32>,
    pub rays: &'a [Vector3<f32>],
    pub width: u32,
    pub frame_index: u32,
    pub settings: &'a Settings,
}

impl<'a> FrameContext<'a> {
    // DirectX의 RayGen 쉐이더와 같음
    pub fn per_pixel(&self, x: u32, y: u32) -> Vector4<f32> {
        let index = (y * self.width + x) as usize;

        let mut ray = Ray::new(self.origin, self.rays[index]);

        let mut light = Vector3::zeros();
        let mut contribution = Vector3::new(1.0, 1.0, 1.0);

        // 같은 (픽셀, 프레임, 바운스)면 언제나 같은 난수
        let mut seed = (x + y * self.width).wrapping_mul(self.frame_index);

        for bounce in 0..self.settings.bounce_limit {
            seed = seed.wrapping_add(bounce as u32);

            let payload = trace_ray(&ray, self.scene);
            let Some(object_index) = payload.object() else {
                // 하늘은 검은색
                break;
            };

            let sphere = &self.scene.spheres[object_index];
            let material = &self.scene.materials[sphere.material_index];

            contribution.component_mul_assign(&material.albedo);
            if self.settings.weighted_emission {
                light += material.emission().component_mul(&contribution);
            } else {
                light += material.emission();
            }

            ray.origin = payload.world_position + payload.world_normal * SURFACE_OFFSET;

            let random = if self.settings.slow_render {
                random_unit_vec()
            } else {
                in_unit_sphere(&mut seed)
            };
            ray.direction = (payload.world_normal + random)
                .try_normalize(f32::EPSILON)
                .unwrap_or(payload.world_normal);
        }

        Vector4::new(light.x, light.y, light.z, 1.0)
    }
}
