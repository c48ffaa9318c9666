use nalgebra::Vector3;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{thread_rng, Rng};
use std::ops::RangeBounds;

pub fn random_vec<T: SampleUniform, R: RangeBounds<T> + SampleRange<T> + Clone>(
    range: R,
) -> Vector3<T> {
    let mut rng = thread_rng();
    Vector3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

// slow render 모드에서 PCG 대신 쓰는 무작위 단위 벡터
pub fn random_unit_vec() -> Vector3<f32> {
    random_vec(-1.0..=1.0)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::y)
}
