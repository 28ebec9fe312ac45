// 256-bit main loops: one 16-byte code load per Q4_0 block, two for Q8_0,
// a single FMA per block.
#[cfg(target_arch = "x86_64")]
crate::define_dot_blocks!(avx2, dot_blocks_q4_0, q4_0, crate::quant::QuantType::Q4_0);
#[cfg(target_arch = "x86_64")]
crate::define_dot_blocks!(avx2, dot_blocks_q8_0, q8_0, crate::quant::QuantType::Q8_0);

#[cfg(test)]
mod tests;
