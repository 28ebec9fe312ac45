/// Classic GGML block primitives (Q4_0, Q8_0) against an f32 slice.
///
/// Layer 2 of the macro architecture.
/// `quant_primitive!(isa, format, block_sums, qs_ptr, x_ptr)` unpacks one
/// block's packed codes, multiplies them lane-wise with the 32 floats at
/// `x_ptr` and returns the UNSCALED partial sums, one register per
/// sub-iteration: `[V; 1]` on 256-bit ISAs, `[V; 2]` (half blocks) on 128-bit.
/// The caller applies the block scale with one FMA per returned register.
///
/// Partial products are summed as `((s0 + s1) + s2) + s3` in every branch.
#[macro_export]
macro_rules! quant_primitive {
    // ========================================================================
    // Q4_0: d(f16) + qs[16] packed 4-bit, zero_point = 8
    // element i < 16 -> low nibble of qs[i], element i >= 16 -> high nibble of qs[i - 16]
    // ========================================================================

    (avx2, q4_0, block_sums, $qs_ptr:expr, $x_ptr:expr) => {
        {
            let qs: *const u8 = $qs_ptr;
            let x: *const f32 = $x_ptr;
            let (lo, hi) = $crate::simd_primitive!(avx2, u8, nibbles_i8, $crate::simd_primitive!(avx2, u8, load16, qs));
            let [l0, l1] = $crate::simd_primitive!(avx2, i8, widen_f32x16, lo);
            let [h0, h1] = $crate::simd_primitive!(avx2, i8, widen_f32x16, hi);
            let s0 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x), l0);
            let s1 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x.add(8)), l1);
            let s2 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x.add(16)), h0);
            let s3 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x.add(24)), h1);
            [$crate::quant_primitive!(@sum4 avx2, s0, s1, s2, s3)]
        }
    };

    (sse, q4_0, block_sums, $qs_ptr:expr, $x_ptr:expr) => {
        {
            let qs: *const u8 = $qs_ptr;
            let x: *const f32 = $x_ptr;
            let (lo, hi) = $crate::simd_primitive!(sse, u8, nibbles_i8, $crate::simd_primitive!(sse, u8, load16, qs));
            [
                $crate::quant_primitive!(@mul_sum16 sse, lo, x),
                $crate::quant_primitive!(@mul_sum16 sse, hi, x.add(16)),
            ]
        }
    };

    (neon, q4_0, block_sums, $qs_ptr:expr, $x_ptr:expr) => {
        {
            let qs: *const u8 = $qs_ptr;
            let x: *const f32 = $x_ptr;
            let (lo, hi) = $crate::simd_primitive!(neon, u8, nibbles_i8, $crate::simd_primitive!(neon, u8, load16, qs));
            [
                $crate::quant_primitive!(@mul_sum16 neon, lo, x),
                $crate::quant_primitive!(@mul_sum16 neon, hi, x.add(16)),
            ]
        }
    };

    // ========================================================================
    // Q8_0: d(f16) + qs[32] signed i8
    // ========================================================================

    (avx2, q8_0, block_sums, $qs_ptr:expr, $x_ptr:expr) => {
        {
            let qs: *const u8 = $qs_ptr;
            let x: *const f32 = $x_ptr;
            let [w0, w1] = $crate::simd_primitive!(avx2, i8, widen_f32x16, $crate::simd_primitive!(avx2, u8, load16, qs));
            let [w2, w3] = $crate::simd_primitive!(avx2, i8, widen_f32x16, $crate::simd_primitive!(avx2, u8, load16, qs.add(16)));
            let s0 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x), w0);
            let s1 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x.add(8)), w1);
            let s2 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x.add(16)), w2);
            let s3 = $crate::simd_primitive!(avx2, f32, mul, $crate::simd_primitive!(avx2, f32, load, x.add(24)), w3);
            [$crate::quant_primitive!(@sum4 avx2, s0, s1, s2, s3)]
        }
    };

    (sse, q8_0, block_sums, $qs_ptr:expr, $x_ptr:expr) => {
        {
            let qs: *const u8 = $qs_ptr;
            let x: *const f32 = $x_ptr;
            [
                $crate::quant_primitive!(@mul_sum16 sse, $crate::simd_primitive!(sse, u8, load16, qs), x),
                $crate::quant_primitive!(@mul_sum16 sse, $crate::simd_primitive!(sse, u8, load16, qs.add(16)), x.add(16)),
            ]
        }
    };

    (neon, q8_0, block_sums, $qs_ptr:expr, $x_ptr:expr) => {
        {
            let qs: *const u8 = $qs_ptr;
            let x: *const f32 = $x_ptr;
            [
                $crate::quant_primitive!(@mul_sum16 neon, $crate::simd_primitive!(neon, i8, load16, qs), x),
                $crate::quant_primitive!(@mul_sum16 neon, $crate::simd_primitive!(neon, i8, load16, qs.add(16)), x.add(16)),
            ]
        }
    };

    // ------------------------------------------------------------------------
    // Shared helpers
    // ------------------------------------------------------------------------

    // 16 signed codes x 16 floats on a 4-lane ISA -> one register of partial sums
    (@mul_sum16 $isa:ident, $codes:expr, $x_ptr:expr) => {
        {
            let x: *const f32 = $x_ptr;
            let [w0, w1, w2, w3] = $crate::simd_primitive!($isa, i8, widen_f32x16, $codes);
            let s0 = $crate::simd_primitive!($isa, f32, mul, $crate::simd_primitive!($isa, f32, load, x), w0);
            let s1 = $crate::simd_primitive!($isa, f32, mul, $crate::simd_primitive!($isa, f32, load, x.add(4)), w1);
            let s2 = $crate::simd_primitive!($isa, f32, mul, $crate::simd_primitive!($isa, f32, load, x.add(8)), w2);
            let s3 = $crate::simd_primitive!($isa, f32, mul, $crate::simd_primitive!($isa, f32, load, x.add(12)), w3);
            $crate::quant_primitive!(@sum4 $isa, s0, s1, s2, s3)
        }
    };

    (@sum4 $isa:ident, $s0:expr, $s1:expr, $s2:expr, $s3:expr) => {
        $crate::simd_primitive!(
            $isa, f32, add,
            $crate::simd_primitive!($isa, f32, add, $crate::simd_primitive!($isa, f32, add, $s0, $s1), $s2),
            $s3
        )
    };
}
