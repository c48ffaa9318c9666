use nalgebra::Vector4;

pub mod beacon;
pub mod camera;
pub mod util;

pub use beacon::error::{RenderError, SceneError};
pub use beacon::scene::{Material, Scene, Sphere};
pub use beacon::{Renderer, Settings};
pub use camera::Camera;

// 0..1 실수 RGBA를 화면 이미지 포맷(리틀 엔디언 RGBA)에 맞춰 u32 하나로 묶음
pub fn vec4_to_rgba(color: &Vector4<f32>) -> u32 {
    let to_byte = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0) as u32;

    let r = to_byte(color.x);
    let g = to_byte(color.y);
    let b = to_byte(color.z);
    let a = to_byte(color.w);

    (a << 24) | (b << 16) | (g << 8) | r
}
