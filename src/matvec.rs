//! Row-parallel quantized matrix-vector product.

use crate::cpu_kernels::QuantDotKernel;
use crate::error::{KernelError, KernelResult};
use crate::tensor::QuantizedTensor;
use rayon::prelude::*;

/// Below this many output rows the product runs on the calling thread.
pub const PARALLEL_THRESHOLD_ROWS: usize = 64;

/// `out[r] = dot(weights[r * x.len() ..][..x.len()], x)`.
///
/// `weights` is a row-major `out.len() x x.len()` matrix. Rows may start
/// mid-block when `x.len()` is not a multiple of the block size.
pub fn matvec(
    kernel: &QuantDotKernel,
    weights: &QuantizedTensor<'_>,
    x: &[f32],
    out: &mut [f32],
) -> KernelResult<()> {
    let cols = x.len();
    let rows = out.len();
    let needed = rows.checked_mul(cols).ok_or_else(|| {
        KernelError::ShapeMismatch(format!("{rows} x {cols} overflows usize"))
    })?;
    if weights.len() != needed {
        return Err(KernelError::ShapeMismatch(format!(
            "weights have {} elements, expected {rows} x {cols}",
            weights.len()
        )));
    }

    let row_dot = |(r, o): (usize, &mut f32)| {
        *o = kernel.dot_in_bounds(weights, r * cols, x, 0, cols);
    };
    if rows < PARALLEL_THRESHOLD_ROWS {
        out.iter_mut().enumerate().for_each(row_dot);
    } else {
        out.par_iter_mut().enumerate().for_each(row_dot);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_kernels::scalar;
    use crate::cpu_kernels::test_util::*;
    use crate::dispatch::VectorWidth;
    use crate::quant::QuantType;

    fn any_kernel() -> Option<QuantDotKernel> {
        let k = VectorWidth::detect().and_then(QuantDotKernel::new).ok();
        if k.is_none() {
            println!("Skipping matvec test: no supported vector width");
        }
        k
    }

    fn check(qtype: QuantType, rows: usize, cols: usize, seed: u64) {
        let Some(kernel) = any_kernel() else { return };
        let mut rng = rng(seed);
        let n = rows * cols;
        let data = random_blocks(qtype, n.div_ceil(32), &mut rng);
        let w = QuantizedTensor::new(qtype, &data, n).unwrap();
        let x = random_f32_vec(cols, &mut rng);
        let mut out = vec![0.0f32; rows];
        matvec(&kernel, &w, &x, &mut out).unwrap();
        for (r, &got) in out.iter().enumerate() {
            let want = scalar::dot(qtype, &data, r * cols, &x, 0, cols);
            assert_close(got, want, abs_magnitude(qtype, &data, r * cols, &x, 0, cols));
        }
    }

    #[test]
    fn test_matvec_aligned_rows() {
        check(QuantType::Q8_0, 8, 64, 31);
        check(QuantType::Q4_0, 128, 96, 32);
    }

    #[test]
    fn test_matvec_rows_straddle_blocks() {
        check(QuantType::Q4_0, 9, 40, 33);
        check(QuantType::Q8_0, 100, 45, 34);
    }

    #[test]
    fn test_matvec_shape_mismatch() {
        let Some(kernel) = any_kernel() else { return };
        let data = vec![0u8; QuantType::Q8_0.storage_bytes(64)];
        let w = QuantizedTensor::new(QuantType::Q8_0, &data, 64).unwrap();
        let mut out = vec![0.0f32; 3];
        let err = matvec(&kernel, &w, &[0.0; 32], &mut out).unwrap_err();
        assert!(matches!(err, KernelError::ShapeMismatch(_)));
    }

    #[test]
    fn test_matvec_empty() {
        let Some(kernel) = any_kernel() else { return };
        let w = QuantizedTensor::new(QuantType::Q4_0, &[], 0).unwrap();
        let mut out: Vec<f32> = Vec::new();
        matvec(&kernel, &w, &[1.0; 8], &mut out).unwrap();
    }
}
