use nalgebra::Vector3;

use crate::beacon::error::SceneError;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub position: Vector3<f32>,
    pub radius: f32,
    // materials에 대한 인덱스. 소유권 없음
    pub material_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub albedo: Vector3<f32>,
    /// Reserved for a future shading model, not read by the integrator.
    pub roughness: f32,
    /// Reserved for a future shading model, not read by the integrator.
    pub metallic: f32,
    pub emission_color: Vector3<f32>,
    pub emission_power: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            radius: 0.5,
            material_index: 0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vector3::new(1.0, 1.0, 1.0),
            roughness: 1.0,
            metallic: 0.0,
            emission_color: Vector3::zeros(),
            emission_power: 0.0,
        }
    }
}

impl Material {
    pub fn emission(&self) -> Vector3<f32> {
        self.emission_color * self.emission_power
    }
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, materials: Vec<Material>) -> Self {
        Self { spheres, materials }
    }

    pub fn material_of(&self, sphere: &Sphere) -> Option<&Material> {
        self.materials.get(sphere.material_index)
    }

    /// Checks that every sphere points at an existing material.
    ///
    /// The renderer refuses to start a pass on a scene that fails this check,
    /// so the per-pixel loop can index materials directly.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.spheres.is_empty() {
            return Ok(());
        }
        if self.materials.is_empty() {
            return Err(SceneError::NoMaterials);
        }

        for (sphere, Sphere { material_index, .. }) in self.spheres.iter().enumerate() {
            if *material_index >= self.materials.len() {
                return Err(SceneError::MaterialIndexOutOfRange {
                    sphere,
                    index: *material_index,
                    material_count: self.materials.len(),
                });
            }
        }

        Ok(())
    }

    /// 에디터용: 범위를 벗어난 material 인덱스를 마지막 material로 고정함.
    /// 바뀐 구의 개수를 돌려줌.
    pub fn clamp_material_indices(&mut self) -> usize {
        let Some(last) = self.materials.len().checked_sub(1) else {
            return 0;
        };

        let mut clamped = 0;
        for sphere in &mut self.spheres {
            if sphere.material_index > last {
                sphere.material_index = last;
                clamped += 1;
            }
        }
        clamped
    }

    /// Pink ball on a blue floor, lit by an orange emissive ball.
    pub fn demo() -> Self {
        let spheres = vec![
            Sphere {
                position: Vector3::zeros(),
                radius: 1.0,
                material_index: 0,
            },
            Sphere {
                position: Vector3::new(0.0, -101.0, 0.0),
                radius: 100.0,
                material_index: 1,
            },
            Sphere {
                position: Vector3::new(2.0, 0.0, 0.0),
                radius: 1.0,
                material_index: 2,
            },
        ];

        let orange = Vector3::new(0.8, 0.5, 0.2);
        let materials = vec![
            Material {
                albedo: Vector3::new(1.0, 0.0, 1.0),
                roughness: 0.0,
                ..Default::default()
            },
            Material {
                albedo: Vector3::new(0.2, 0.3, 1.0),
                roughness: 0.1,
                ..Default::default()
            },
            Material {
                albedo: orange,
                roughness: 0.1,
                emission_color: orange,
                emission_power: 1.0,
                ..Default::default()
            },
        ];

        Self { spheres, materials }
    }
}
