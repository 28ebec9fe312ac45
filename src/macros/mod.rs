//! Macro system for the quantized dot kernels.
//!
//! Follows a 3-layer architecture:
//! 1. simd_primitive! (Hardware Primitives)
//! 2. quant_primitive! (Block unpack-and-multiply per scheme)
//! 3. define_dot_blocks! (Vectorized main loop per ISA x scheme)

#[macro_use]
pub mod simd_primitive;
#[macro_use]
pub mod quant_primitive;
#[macro_use]
pub mod expand;
