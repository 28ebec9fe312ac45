// 128-bit main loops on aarch64 (same sub-iteration split as the SSE path).
#[cfg(target_arch = "aarch64")]
crate::define_dot_blocks!(neon, dot_blocks_q4_0, q4_0, crate::quant::QuantType::Q4_0);
#[cfg(target_arch = "aarch64")]
crate::define_dot_blocks!(neon, dot_blocks_q8_0, q8_0, crate::quant::QuantType::Q8_0);
