//! qdot-kernels: SIMD dot products between block-quantized weights and f32
//! activations.
//!
//! - **Block formats**: Q4_0 (4-bit codes, bias 8) and Q8_0 (signed 8-bit
//!   codes), 32 elements per block with one f16 scale.
//! - **Width selected once**: 256-bit (AVX2+FMA) or 128-bit (SSE4.1+FMA,
//!   NEON) main loops, resolved at construction and never re-checked.
//! - **Any alignment**: scalar prologue/epilogue around the vectorized
//!   whole-block loop.
//!
//! # Quick Start
//!
//! ```ignore
//! use qdot_kernels::{QuantDotKernel, QuantizedTensor, QuantType};
//!
//! let kernel = QuantDotKernel::detect()?;
//! let w = QuantizedTensor::new(QuantType::Q8_0, &bytes, len)?;
//! let y = kernel.dot(&w, 0, &x, 0, len);
//! ```

pub mod error;
pub mod quant;
pub mod tensor;

// Vector-width selection
pub mod dispatch;

// 3-Layer macro architecture for the SIMD main loops
#[macro_use]
pub mod macros;

pub mod cpu_kernels;
pub mod matvec;

pub use cpu_kernels::scalar::reference_dot;
pub use cpu_kernels::{kernel, QuantDotKernel};
pub use dispatch::{KernelConfig, VectorWidth};
pub use error::{KernelError, KernelResult};
pub use matvec::matvec;
pub use quant::{pack_blocks, BlockQ4_0, BlockQ8_0, QuantBlock, QuantType, QK};
pub use tensor::{dense_from_bytes, DotRequest, QuantizedTensor};
