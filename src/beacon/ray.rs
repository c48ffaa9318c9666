use nalgebra::{Point3, Vector3};

// direction은 정규화되어 있지 않아도 됨. 교차 계산은 같은 direction만 쓰면 맞게 나옴
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

/// Result of tracing a ray through the scene.
///
/// A miss is encoded in-band: both `hit_distance` and `object_index` are
/// negative and the position/normal are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPayload {
    pub hit_distance: f32,
    pub world_position: Point3<f32>,
    pub world_normal: Vector3<f32>,
    pub object_index: i32,
}

impl HitPayload {
    pub fn miss() -> Self {
        Self {
            hit_distance: -1.0,
            world_position: Point3::origin(),
            world_normal: Vector3::zeros(),
            object_index: -1,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.object_index >= 0 && self.hit_distance >= 0.0
    }

    pub fn object(&self) -> Option<usize> {
        self.is_hit().then_some(self.object_index as usize)
    }
}
