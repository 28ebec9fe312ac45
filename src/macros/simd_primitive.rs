/// Maps abstract SIMD operations to concrete hardware intrinsics.
///
/// # Architecture
/// This macro is the "Layer 1" of the macro architecture. It provides a unified interface
/// for the f32 lane arithmetic and the i8 -> f32 widening used by the block kernels:
/// - `avx2`: 256-bit, 8 x f32 (AVX2 + FMA)
/// - `sse`: 128-bit, 4 x f32 (SSE4.1 + FMA)
/// - `neon`: 128-bit, 4 x f32
///
/// Every expansion must sit inside an `unsafe` function compiled with the
/// matching `#[target_feature]`.
///
/// # Usage
/// ```ignore
/// simd_primitive!(avx2, f32, add, a, b)            // -> _mm256_add_ps(a, b)
/// simd_primitive!(sse, i8, widen_f32x16, bytes)    // -> [__m128; 4]
/// ```
#[macro_export]
macro_rules! simd_primitive {
    // ========================================================================
    // AVX2 Implementation
    // ========================================================================

    // --- f32 Compute Primitives ---
    (avx2, f32, zero) => { std::arch::x86_64::_mm256_setzero_ps() };
    (avx2, f32, splat, $v:expr) => { std::arch::x86_64::_mm256_set1_ps($v) };
    (avx2, f32, load, $p:expr) => { std::arch::x86_64::_mm256_loadu_ps($p) };
    (avx2, f32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_add_ps($a, $b) };
    (avx2, f32, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_mul_ps($a, $b) };
    // a * b + c, single rounding
    (avx2, f32, fma, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm256_fmadd_ps($a, $b, $c) };

    // Reduce sum: horizontal add
    (avx2, f32, reduce_sum, $v:expr) => {
        {
            let h1 = std::arch::x86_64::_mm256_hadd_ps($v, $v);
            let h2 = std::arch::x86_64::_mm256_hadd_ps(h1, h1);
            let t1 = std::arch::x86_64::_mm256_extractf128_ps(h2, 1);
            let t2 = std::arch::x86_64::_mm256_castps256_ps128(h2);
            let res = std::arch::x86_64::_mm_add_ps(t1, t2);
            std::arch::x86_64::_mm_cvtss_f32(res)
        }
    };

    // --- Integer Primitives ---
    (avx2, u8, load16, $p:expr) => { std::arch::x86_64::_mm_loadu_si128($p as *const std::arch::x86_64::__m128i) };
    (avx2, u8, nibbles_i8, $v:expr) => { $crate::simd_primitive!(sse, u8, nibbles_i8, $v) };
    // 16 signed bytes -> 2 x 8 f32
    (avx2, i8, widen_f32x16, $v:expr) => {
        {
            let v = $v;
            [
                std::arch::x86_64::_mm256_cvtepi32_ps(std::arch::x86_64::_mm256_cvtepi8_epi32(v)),
                std::arch::x86_64::_mm256_cvtepi32_ps(std::arch::x86_64::_mm256_cvtepi8_epi32(
                    std::arch::x86_64::_mm_srli_si128(v, 8),
                )),
            ]
        }
    };

    // ========================================================================
    // SSE4.1 Implementation (128-bit on x86_64)
    // ========================================================================

    // --- f32 Compute Primitives ---
    (sse, f32, zero) => { std::arch::x86_64::_mm_setzero_ps() };
    (sse, f32, splat, $v:expr) => { std::arch::x86_64::_mm_set1_ps($v) };
    (sse, f32, load, $p:expr) => { std::arch::x86_64::_mm_loadu_ps($p) };
    (sse, f32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm_add_ps($a, $b) };
    (sse, f32, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm_mul_ps($a, $b) };
    (sse, f32, fma, $a:expr, $b:expr, $c:expr) => { std::arch::x86_64::_mm_fmadd_ps($a, $b, $c) };

    (sse, f32, reduce_sum, $v:expr) => {
        {
            let v = $v;
            let shuf = std::arch::x86_64::_mm_movehdup_ps(v);
            let sums = std::arch::x86_64::_mm_add_ps(v, shuf);
            let shuf = std::arch::x86_64::_mm_movehl_ps(shuf, sums);
            std::arch::x86_64::_mm_cvtss_f32(std::arch::x86_64::_mm_add_ss(sums, shuf))
        }
    };

    // --- Integer Primitives ---
    (sse, u8, load16, $p:expr) => { std::arch::x86_64::_mm_loadu_si128($p as *const std::arch::x86_64::__m128i) };
    // Packed nibbles -> (low - 8, high - 8) as signed bytes
    (sse, u8, nibbles_i8, $v:expr) => {
        {
            let v = $v;
            let mask = std::arch::x86_64::_mm_set1_epi8(0x0F);
            let bias = std::arch::x86_64::_mm_set1_epi8(8);
            let lo = std::arch::x86_64::_mm_and_si128(v, mask);
            let hi = std::arch::x86_64::_mm_and_si128(std::arch::x86_64::_mm_srli_epi16(v, 4), mask);
            (
                std::arch::x86_64::_mm_sub_epi8(lo, bias),
                std::arch::x86_64::_mm_sub_epi8(hi, bias),
            )
        }
    };
    // 16 signed bytes -> 4 x 4 f32
    (sse, i8, widen_f32x16, $v:expr) => {
        {
            let v = $v;
            [
                std::arch::x86_64::_mm_cvtepi32_ps(std::arch::x86_64::_mm_cvtepi8_epi32(v)),
                std::arch::x86_64::_mm_cvtepi32_ps(std::arch::x86_64::_mm_cvtepi8_epi32(
                    std::arch::x86_64::_mm_srli_si128(v, 4),
                )),
                std::arch::x86_64::_mm_cvtepi32_ps(std::arch::x86_64::_mm_cvtepi8_epi32(
                    std::arch::x86_64::_mm_srli_si128(v, 8),
                )),
                std::arch::x86_64::_mm_cvtepi32_ps(std::arch::x86_64::_mm_cvtepi8_epi32(
                    std::arch::x86_64::_mm_srli_si128(v, 12),
                )),
            ]
        }
    };

    // ========================================================================
    // NEON Implementation
    // ========================================================================

    // --- f32 Compute Primitives ---
    (neon, f32, zero) => { std::arch::aarch64::vdupq_n_f32(0.0) };
    (neon, f32, splat, $v:expr) => { std::arch::aarch64::vdupq_n_f32($v) };
    (neon, f32, load, $p:expr) => { std::arch::aarch64::vld1q_f32($p) };
    (neon, f32, add, $a:expr, $b:expr) => { std::arch::aarch64::vaddq_f32($a, $b) };
    (neon, f32, mul, $a:expr, $b:expr) => { std::arch::aarch64::vmulq_f32($a, $b) };
    (neon, f32, fma, $a:expr, $b:expr, $c:expr) => { std::arch::aarch64::vfmaq_f32($c, $a, $b) };
    (neon, f32, reduce_sum, $v:expr) => { std::arch::aarch64::vaddvq_f32($v) };

    // --- Integer Primitives ---
    (neon, u8, load16, $p:expr) => { std::arch::aarch64::vld1q_u8($p) };
    (neon, u8, nibbles_i8, $v:expr) => {
        {
            let v = $v;
            let mask = std::arch::aarch64::vdupq_n_u8(0x0F);
            let bias = std::arch::aarch64::vdupq_n_s8(8);
            let lo = std::arch::aarch64::vreinterpretq_s8_u8(std::arch::aarch64::vandq_u8(v, mask));
            let hi = std::arch::aarch64::vreinterpretq_s8_u8(std::arch::aarch64::vshrq_n_u8(v, 4));
            (
                std::arch::aarch64::vsubq_s8(lo, bias),
                std::arch::aarch64::vsubq_s8(hi, bias),
            )
        }
    };
    (neon, i8, load16, $p:expr) => { std::arch::aarch64::vld1q_s8($p as *const i8) };
    (neon, i8, widen_f32x16, $v:expr) => {
        {
            use std::arch::aarch64::*;
            let v = $v;
            let lo16 = vmovl_s8(vget_low_s8(v));
            let hi16 = vmovl_high_s8(v);
            [
                vcvtq_f32_s32(vmovl_s16(vget_low_s16(lo16))),
                vcvtq_f32_s32(vmovl_high_s16(lo16)),
                vcvtq_f32_s32(vmovl_s16(vget_low_s16(hi16))),
                vcvtq_f32_s32(vmovl_high_s16(hi16)),
            ]
        }
    };
}
