//! Quantized dot kernel: scalar prologue up to the next block boundary,
//! vectorized main loop over whole blocks, lane reduction, scalar epilogue.

pub mod avx2;
pub mod neon;
pub mod scalar;
pub mod sse;

#[cfg(test)]
pub(crate) mod test_util;

use crate::dispatch::{host_features, KernelConfig, VectorWidth};
use crate::error::{KernelError, KernelResult};
use crate::quant::QuantType;
use crate::tensor::{DotRequest, QuantizedTensor};
use std::fmt;
use std::sync::OnceLock;

/// Vectorized main loop over whole blocks.
///
/// Safety: the host must support the target features the function was
/// compiled for, and `blocks.len() / block_bytes * block_size == xs.len()`.
pub(crate) type DotBlocksFn = unsafe fn(&[u8], &[f32]) -> f32;

/// Main loops for one vector width, one per scheme.
#[derive(Clone, Copy)]
struct MainLoops {
    q4_0: DotBlocksFn,
    q8_0: DotBlocksFn,
}

impl MainLoops {
    #[allow(unreachable_patterns)]
    fn resolve(width: VectorWidth) -> Option<Self> {
        match width {
            #[cfg(target_arch = "x86_64")]
            VectorWidth::W256 => Some(Self { q4_0: avx2::dot_blocks_q4_0, q8_0: avx2::dot_blocks_q8_0 }),
            #[cfg(target_arch = "x86_64")]
            VectorWidth::W128 => Some(Self { q4_0: sse::dot_blocks_q4_0, q8_0: sse::dot_blocks_q8_0 }),
            #[cfg(target_arch = "aarch64")]
            VectorWidth::W128 => Some(Self { q4_0: neon::dot_blocks_q4_0, q8_0: neon::dot_blocks_q8_0 }),
            _ => None,
        }
    }

    #[inline]
    fn get(&self, qtype: QuantType) -> DotBlocksFn {
        match qtype {
            QuantType::Q4_0 => self.q4_0,
            QuantType::Q8_0 => self.q8_0,
        }
    }
}

/// Dot product of a block-quantized tensor range against an f32 range.
///
/// The vector width is fixed at construction. Instances are `Copy` and
/// hold no mutable state, so one kernel can serve any number of threads.
#[derive(Clone, Copy)]
pub struct QuantDotKernel {
    width: VectorWidth,
    loops: MainLoops,
}

impl fmt::Debug for QuantDotKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantDotKernel").field("width", &self.width).finish()
    }
}

impl QuantDotKernel {
    /// Kernel for an explicit width; fails if this host cannot run it.
    pub fn new(width: VectorWidth) -> KernelResult<Self> {
        if !width.host_supports() {
            return Err(KernelError::HostLacksVectorWidth { bits: width.bits() });
        }
        let loops = MainLoops::resolve(width)
            .ok_or(KernelError::HostLacksVectorWidth { bits: width.bits() })?;
        Ok(Self { width, loops })
    }

    pub fn with_config(config: &KernelConfig) -> KernelResult<Self> {
        let width = config.resolve_width()?;
        let kernel = Self::new(width)?;
        log::info!("Quantized dot kernel: {} main loop (host: {})", width, host_features());
        Ok(kernel)
    }

    /// Widest width the host supports.
    pub fn detect() -> KernelResult<Self> {
        Self::with_config(&KernelConfig::default())
    }

    pub fn width(&self) -> VectorWidth {
        self.width
    }

    /// `sum(w[q_off + i] * x[x_off + i])` for `i` in `0..count`.
    pub fn checked_dot(
        &self,
        quantized: &QuantizedTensor<'_>,
        q_off: usize,
        dense: &[f32],
        x_off: usize,
        count: usize,
    ) -> KernelResult<f32> {
        DotRequest::new(q_off, x_off, count).validate(quantized, dense.len())?;
        Ok(self.dot_in_bounds(quantized, q_off, dense, x_off, count))
    }

    /// Same as [`checked_dot`](Self::checked_dot).
    ///
    /// # Panics
    /// If either range runs past the end of its tensor.
    pub fn dot(
        &self,
        quantized: &QuantizedTensor<'_>,
        q_off: usize,
        dense: &[f32],
        x_off: usize,
        count: usize,
    ) -> f32 {
        match self.checked_dot(quantized, q_off, dense, x_off, count) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Caller has already validated both ranges.
    #[inline]
    pub(crate) fn dot_in_bounds(
        &self,
        quantized: &QuantizedTensor<'_>,
        q_off: usize,
        dense: &[f32],
        x_off: usize,
        count: usize,
    ) -> f32 {
        let qtype = quantized.qtype();
        vdot(qtype, self.loops.get(qtype), quantized.data(), q_off, dense, x_off, count)
    }
}

fn vdot(
    qtype: QuantType,
    main_loop: DotBlocksFn,
    data: &[u8],
    q_off: usize,
    x: &[f32],
    x_off: usize,
    count: usize,
) -> f32 {
    let (block_size, block_bytes) = qtype.layout();
    let mut result = 0.0f32;
    let mut j = 0usize;

    let align = count.min(q_off.wrapping_neg() % block_size);
    if align > 0 {
        result += scalar::dot(qtype, data, q_off, x, x_off, align);
        j += align;
    }

    let n_blocks = (count - j) / block_size;
    if n_blocks > 0 {
        debug_assert_eq!((q_off + j) % block_size, 0);
        let first = (q_off + j) / block_size * block_bytes;
        let blocks = &data[first..first + n_blocks * block_bytes];
        let xs = &x[x_off + j..x_off + j + n_blocks * block_size];
        // SAFETY: `main_loop` was resolved for a width the host supports,
        // and both slices cover exactly `n_blocks` blocks.
        result += unsafe { main_loop(blocks, xs) };
        j += n_blocks * block_size;
    }

    if j < count {
        result += scalar::dot(qtype, data, q_off + j, x, x_off + j, count - j);
    }
    result
}

static KERNEL: OnceLock<KernelResult<QuantDotKernel>> = OnceLock::new();

/// Process-wide kernel at the widest width the host supports.
pub fn kernel() -> KernelResult<&'static QuantDotKernel> {
    KERNEL
        .get_or_init(QuantDotKernel::detect)
        .as_ref()
        .map_err(Clone::clone)
}
