//! Random block buffers for kernel tests.

use crate::quant::{pack_blocks, BlockQ4_0, BlockQ8_0, QuantType};
use half::f16;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(crate) fn random_scale(rng: &mut StdRng) -> f16 {
    f16::from_f32(rng.gen_range(0.001f32..0.1))
}

pub(crate) fn random_blocks(qtype: QuantType, n_blocks: usize, rng: &mut StdRng) -> Vec<u8> {
    match qtype {
        QuantType::Q4_0 => {
            let blocks: Vec<_> = (0..n_blocks)
                .map(|_| {
                    let codes = std::array::from_fn(|_| rng.gen_range(-8i8..=7));
                    BlockQ4_0::from_codes(random_scale(rng), &codes)
                })
                .collect();
            pack_blocks(&blocks)
        }
        QuantType::Q8_0 => {
            let blocks: Vec<_> = (0..n_blocks)
                .map(|_| {
                    let codes = std::array::from_fn(|_| rng.gen_range(-128i16..=127) as i8);
                    BlockQ8_0::from_codes(random_scale(rng), &codes)
                })
                .collect();
            pack_blocks(&blocks)
        }
    }
}

pub(crate) fn random_f32_vec(n: usize, rng: &mut StdRng) -> Vec<f32> {
    (0..n).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
}

/// Tolerance scaled by the sum of absolute products, so cancellation in
/// the exact result does not inflate the relative error.
pub(crate) fn assert_close(actual: f32, expected: f32, magnitude: f32) {
    let tol = 1e-3 * magnitude.max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "actual {actual} expected {expected} (tol {tol})"
    );
}

pub(crate) fn abs_magnitude(qtype: QuantType, data: &[u8], q_off: usize, x: &[f32], x_off: usize, n: usize) -> f32 {
    (0..n)
        .map(|i| (crate::quant::dequant_at(qtype, data, q_off + i) * x[x_off + i]).abs())
        .sum()
}
