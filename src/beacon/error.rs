use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("sphere {sphere} uses material {index}, but the scene only has {material_count} materials")]
    MaterialIndexOutOfRange {
        sphere: usize,
        index: usize,
        material_count: usize,
    },
    #[error("scene has spheres but no materials")]
    NoMaterials,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),
    #[error("camera supplied {actual} ray directions, expected {expected}")]
    RayCountMismatch { expected: usize, actual: usize },
}
