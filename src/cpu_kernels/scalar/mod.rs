//! Scalar fallback dot: ordinary sequential accumulation, one dequantized
//! weight at a time. Used for the unaligned head and the short tail of a
//! request, and as the golden reference in tests.

use crate::error::KernelResult;
use crate::quant::{dequant_at, QuantType};
use crate::tensor::{DotRequest, QuantizedTensor};

/// `sum(w[q_off + i] * x[x_off + i])` for `i` in `0..n`, in index order.
#[inline]
pub fn dot(qtype: QuantType, data: &[u8], q_off: usize, x: &[f32], x_off: usize, n: usize) -> f32 {
    let mut result = 0.0f32;
    for (i, &b) in x[x_off..x_off + n].iter().enumerate() {
        result += dequant_at(qtype, data, q_off + i) * b;
    }
    result
}

/// Dot product computed with the scalar fallback over the whole range.
pub fn reference_dot(
    quantized: &QuantizedTensor<'_>,
    q_off: usize,
    dense: &[f32],
    x_off: usize,
    count: usize,
) -> KernelResult<f32> {
    DotRequest::new(q_off, x_off, count).validate(quantized, dense.len())?;
    Ok(dot(quantized.qtype(), quantized.data(), q_off, dense, x_off, count))
}
