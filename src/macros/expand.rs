/// Generates the vectorized main loop for one ISA x scheme pair.
///
/// This macro is the "Layer 3" of the architecture. The generated function
/// consumes whole, block-aligned blocks only:
/// `blocks.len() == n * block_bytes` and `xs.len() == n * block_size`.
/// Per block: broadcast the decoded f16 scale, take the unscaled partial
/// sums from `quant_primitive!`, and FMA each of them by the scale into the
/// running accumulator. The accumulator is reduced once at the end.
#[macro_export]
macro_rules! define_dot_blocks {
    (avx2, $fn_name:ident, $qfmt:ident, $qtype:expr) => {
        #[target_feature(enable = "avx2,fma")]
        pub(crate) unsafe fn $fn_name(blocks: &[u8], xs: &[f32]) -> f32 {
            $crate::define_dot_blocks!(@body avx2, $qfmt, $qtype, blocks, xs)
        }
    };
    (sse, $fn_name:ident, $qfmt:ident, $qtype:expr) => {
        #[target_feature(enable = "sse4.1,fma")]
        pub(crate) unsafe fn $fn_name(blocks: &[u8], xs: &[f32]) -> f32 {
            $crate::define_dot_blocks!(@body sse, $qfmt, $qtype, blocks, xs)
        }
    };
    (neon, $fn_name:ident, $qfmt:ident, $qtype:expr) => {
        #[target_feature(enable = "neon")]
        pub(crate) unsafe fn $fn_name(blocks: &[u8], xs: &[f32]) -> f32 {
            $crate::define_dot_blocks!(@body neon, $qfmt, $qtype, blocks, xs)
        }
    };

    (@body $isa:ident, $qfmt:ident, $qtype:expr, $blocks:ident, $xs:ident) => {
        {
            let qtype: $crate::quant::QuantType = $qtype;
            let (block_size, block_bytes) = qtype.layout();
            debug_assert_eq!($blocks.len() % block_bytes, 0);
            debug_assert_eq!($blocks.len() / block_bytes * block_size, $xs.len());

            let mut acc = $crate::simd_primitive!($isa, f32, zero);
            for (block, x) in $blocks.chunks_exact(block_bytes).zip($xs.chunks_exact(block_size)) {
                let scale = $crate::simd_primitive!($isa, f32, splat, $crate::quant::load_f16(block, 0));
                let qs = block.as_ptr().add($crate::quant::SCALE_BYTES);
                let sums = $crate::quant_primitive!($isa, $qfmt, block_sums, qs, x.as_ptr());
                for sum in sums {
                    acc = $crate::simd_primitive!($isa, f32, fma, sum, scale, acc);
                }
            }
            $crate::simd_primitive!($isa, f32, reduce_sum, acc)
        }
    };
}
