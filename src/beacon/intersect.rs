use crate::beacon::ray::{HitPayload, Ray};
use crate::beacon::scene::Scene;

/// Finds the nearest sphere hit in front of the ray origin.
///
/// Every sphere is tested (no acceleration structure). Only the near root of
/// the quadratic is considered, so a ray starting inside a sphere does not
/// hit it. On equal distances the sphere that comes first in
/// `scene.spheres` wins.
pub fn trace_ray(ray: &Ray, scene: &Scene) -> HitPayload {
    // (bx^2 + by^2 + bz^2) * t^2 + 2 * (ax * bx + ay * by + az * bz) * t + (ax^2 + ay^2 + az^2 - r^2) = 0
    // a = 빔 시작, b = 빔 방향, r = 구 반지름, t = 빔이 구와 만나는 거리
    // 구가 원점에 있다고 가정한 식이라 빔 시작점을 구 중심만큼 옮겨서 계산함.
    let a = ray.direction.magnitude_squared();

    // 길이 0인 방향은 0으로 나누게 되니 무조건 miss
    if a <= 0.0 || !a.is_finite() {
        return miss(ray);
    }

    let mut hit_distance = f32::MAX;
    let mut closest_sphere = None;

    for (index, sphere) in scene.spheres.iter().enumerate() {
        let origin = ray.origin.coords - sphere.position;

        let b = 2.0 * origin.dot(&ray.direction);
        let c = origin.magnitude_squared() - sphere.radius * sphere.radius;

        // 판별식
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            continue;
        }

        let distance = (-b - discriminant.sqrt()) / (2.0 * a);
        if distance > 0.0 && distance < hit_distance {
            hit_distance = distance;
            closest_sphere = Some(index);
        }
    }

    match closest_sphere {
        Some(index) => closest_hit(ray, scene, hit_distance, index),
        None => miss(ray),
    }
}

pub fn closest_hit(ray: &Ray, scene: &Scene, hit_distance: f32, object_index: usize) -> HitPayload {
    let sphere = &scene.spheres[object_index];

    let origin = ray.origin.coords - sphere.position;
    let local_position = origin + ray.direction * hit_distance;
    let world_normal = local_position.normalize();

    HitPayload {
        hit_distance,
        world_position: (local_position + sphere.position).into(),
        world_normal,
        object_index: object_index as i32,
    }
}

pub fn miss(_ray: &Ray) -> HitPayload {
    HitPayload::miss()
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};

    use super::*;
    use crate::beacon::scene::{Material, Sphere};

    fn scene_of(spheres: Vec<Sphere>) -> Scene {
        Scene::new(spheres, vec![Material::default()])
    }

    fn sphere(position: Vector3<f32>, radius: f32) -> Sphere {
        Sphere {
            position,
            radius,
            material_index: 0,
        }
    }

    #[test]
    fn ray_pointing_away_misses() {
        let scene = scene_of(vec![
            sphere(Vector3::new(0.0, 0.0, -5.0), 1.0),
            sphere(Vector3::new(3.0, 0.0, -2.0), 0.5),
        ]);
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0));

        let payload = trace_ray(&ray, &scene);
        assert!(payload.hit_distance < 0.0);
        assert!(payload.object_index < 0);
    }

    #[test]
    fn hit_distance_is_center_distance_minus_radius() {
        for (d, r) in [(5.0_f32, 1.0_f32), (2.0, 1.5), (10.0, 0.25)] {
            let direction = Vector3::new(1.0, 2.0, -2.0).normalize();
            let origin = Point3::new(0.5, -0.5, 3.0);
            let scene = scene_of(vec![sphere(origin.coords + direction * d, r)]);

            let payload = trace_ray(&Ray::new(origin, direction), &scene);
            assert_eq!(payload.object_index, 0);
            assert!(
                (payload.hit_distance - (d - r)).abs() < 1e-4,
                "d={d} r={r} got {}",
                payload.hit_distance
            );
        }
    }

    #[test]
    fn normal_is_unit_and_outward() {
        let center = Vector3::new(0.3, 0.2, -4.0);
        let scene = scene_of(vec![sphere(center, 1.2)]);

        for direction in [
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.1, 0.05, -1.0),
            Vector3::new(0.3, 0.4, -2.0),
        ] {
            let payload = trace_ray(&Ray::new(Point3::origin(), direction), &scene);
            assert!(payload.is_hit());
            assert!((payload.world_normal.magnitude() - 1.0).abs() < 1e-5);

            let outward = payload.world_position.coords - center;
            assert!(payload.world_normal.dot(&outward) > 0.0);
        }
    }

    #[test]
    fn nearest_sphere_wins_regardless_of_order() {
        let scene = scene_of(vec![
            sphere(Vector3::new(0.0, 0.0, -10.0), 1.0),
            sphere(Vector3::new(0.0, 0.0, -4.0), 1.0),
        ]);

        let payload = trace_ray(&Ray::new(Point3::origin(), -Vector3::z()), &scene);
        assert_eq!(payload.object(), Some(1));
        assert!((payload.hit_distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn coincident_spheres_pick_lower_index() {
        let mut scene = scene_of(vec![
            sphere(Vector3::new(0.0, 0.0, -3.0), 1.0),
            sphere(Vector3::new(0.0, 0.0, -3.0), 1.0),
        ]);
        scene.spheres[1].material_index = 1;
        scene.materials.push(Material::default());

        for _ in 0..4 {
            let payload = trace_ray(&Ray::new(Point3::origin(), -Vector3::z()), &scene);
            assert_eq!(payload.object_index, 0);
        }
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let scene = scene_of(vec![sphere(Vector3::new(0.0, 0.0, 5.0), 1.0)]);
        let payload = trace_ray(&Ray::new(Point3::origin(), -Vector3::z()), &scene);
        assert!(!payload.is_hit());
    }

    #[test]
    fn zero_direction_is_a_miss() {
        let scene = scene_of(vec![sphere(Vector3::zeros(), 1.0)]);
        let payload = trace_ray(&Ray::new(Point3::new(0.0, 0.0, 3.0), Vector3::zeros()), &scene);

        assert_eq!(payload, HitPayload::miss());
        assert!(payload.world_position.coords.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn unnormalized_direction_gives_parametric_distance() {
        let scene = scene_of(vec![sphere(Vector3::new(0.0, 0.0, -5.0), 1.0)]);
        let payload = trace_ray(
            &Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -2.0)),
            &scene,
        );

        assert!((payload.hit_distance - 2.0).abs() < 1e-4);
        assert!((payload.world_position - Point3::new(0.0, 0.0, -4.0)).magnitude() < 1e-4);
    }

    #[test]
    fn straight_on_hit_against_half_unit_sphere() {
        let scene = Scene::new(
            vec![sphere(Vector3::zeros(), 0.5)],
            vec![Material {
                albedo: Vector3::new(1.0, 0.0, 1.0),
                ..Default::default()
            }],
        );
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, -1.0));

        let payload = trace_ray(&ray, &scene);
        assert_eq!(payload.object_index, 0);
        assert!((payload.hit_distance - 0.5).abs() < 1e-5);
        assert!((payload.world_position - Point3::new(0.0, 0.0, 0.5)).magnitude() < 1e-5);
        assert!((payload.world_normal - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-5);
    }
}
