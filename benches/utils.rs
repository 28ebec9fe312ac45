#![allow(dead_code)]

use qdot_kernels::{pack_blocks, BlockQ4_0, BlockQ8_0, QuantType, QK};
use half::f16;
use rand::Rng;

/// GEMV GFLOPS: 2*rows*cols / duration / 1e9
pub fn gemv_gflops(rows: usize, cols: usize, duration_secs: f64) -> f64 {
    2.0 * rows as f64 * cols as f64 / duration_secs / 1e9
}

/// Dot FLOP count (multiply-add = 2 ops)
pub fn dot_flops(n: usize) -> u64 {
    2 * n as u64
}

/// Random f32 vector in [-1.0, 1.0)
pub fn random_f32_vec(n: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Random f16 scale in (0.001..0.1)
pub fn random_scale() -> f16 {
    f16::from_f32(rand::thread_rng().gen_range(0.001..0.1))
}

/// Random packed blocks covering `n` elements (rounded up to whole blocks)
pub fn random_blocks(qtype: QuantType, n: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let n_blocks = n.div_ceil(QK);
    match qtype {
        QuantType::Q4_0 => {
            let blocks: Vec<_> = (0..n_blocks)
                .map(|_| BlockQ4_0::from_codes(random_scale(), &std::array::from_fn(|_| rng.gen_range(-8..=7i8))))
                .collect();
            pack_blocks(&blocks)
        }
        QuantType::Q8_0 => {
            let blocks: Vec<_> = (0..n_blocks)
                .map(|_| BlockQ8_0::from_codes(random_scale(), &std::array::from_fn(|_| rng.gen_range(-128..=127i8))))
                .collect();
            pack_blocks(&blocks)
        }
    }
}
