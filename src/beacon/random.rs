use nalgebra::Vector3;

// 1.0 바로 아래의 f32. u32::MAX 근처 값은 f32로 바꾸면 1.0으로 반올림되기 때문
const ONE_MINUS_EPSILON: f32 = 0.999_999_94;

/// PCG RXS-M-XS style hash. Cheap, stateless and bit-reproducible.
pub fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277_803_737);
    (word >> 22) ^ word
}

/// Advances `seed` and returns a float in `[0, 1)`.
pub fn random_float(seed: &mut u32) -> f32 {
    *seed = pcg_hash(*seed);
    (*seed as f32 / u32::MAX as f32).min(ONE_MINUS_EPSILON)
}

/// Random direction built from three values in `[-1, 1]`, normalized.
///
/// Not uniform over the sphere (the cube corners are over-represented),
/// which is fine for the diffuse bounce it feeds.
pub fn in_unit_sphere(seed: &mut u32) -> Vector3<f32> {
    let v = Vector3::new(
        random_float(seed) * 2.0 - 1.0,
        random_float(seed) * 2.0 - 1.0,
        random_float(seed) * 2.0 - 1.0,
    );
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::y)
}
