// 128-bit main loops on x86_64: each block is two half-block sub-iterations,
// each folded into the accumulator with its own FMA.
#[cfg(target_arch = "x86_64")]
crate::define_dot_blocks!(sse, dot_blocks_q4_0, q4_0, crate::quant::QuantType::Q4_0);
#[cfg(target_arch = "x86_64")]
crate::define_dot_blocks!(sse, dot_blocks_q8_0, q8_0, crate::quant::QuantType::Q8_0);
