#[cfg(test)]
#[cfg(target_arch = "x86_64")]
mod tests {
    use crate::cpu_kernels::avx2::{dot_blocks_q4_0, dot_blocks_q8_0};
    use crate::cpu_kernels::scalar;
    use crate::cpu_kernels::test_util::*;
    use crate::quant::{pack_blocks, BlockQ4_0, BlockQ8_0, QuantType};
    use half::f16;

    fn has_avx2() -> bool {
        is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
    }

    #[test]
    fn test_avx2_q4_0_matches_scalar() {
        if !has_avx2() {
            println!("Skipping AVX2 test: AVX2+FMA not supported");
            return;
        }
        let mut rng = rng(1);
        let blocks = random_blocks(QuantType::Q4_0, 8, &mut rng);
        let x = random_f32_vec(256, &mut rng);

        let got = unsafe { dot_blocks_q4_0(&blocks, &x) };
        let want = scalar::dot(QuantType::Q4_0, &blocks, 0, &x, 0, 256);
        assert_close(got, want, abs_magnitude(QuantType::Q4_0, &blocks, 0, &x, 0, 256));
    }

    #[test]
    fn test_avx2_q8_0_matches_scalar() {
        if !has_avx2() {
            println!("Skipping AVX2 test: AVX2+FMA not supported");
            return;
        }
        let mut rng = rng(2);
        let blocks = random_blocks(QuantType::Q8_0, 5, &mut rng);
        let x = random_f32_vec(160, &mut rng);

        let got = unsafe { dot_blocks_q8_0(&blocks, &x) };
        let want = scalar::dot(QuantType::Q8_0, &blocks, 0, &x, 0, 160);
        assert_close(got, want, abs_magnitude(QuantType::Q8_0, &blocks, 0, &x, 0, 160));
    }

    #[test]
    fn test_avx2_q4_0_lane_mapping() {
        if !has_avx2() {
            return;
        }
        // One-hot dense vectors pick out each dequantized weight.
        let codes: [i8; 32] = std::array::from_fn(|i| (i as i8 % 16) - 8);
        let blocks = pack_blocks(&[BlockQ4_0::from_codes(f16::from_f32(0.5), &codes)]);
        for (i, &c) in codes.iter().enumerate() {
            let mut x = vec![0.0f32; 32];
            x[i] = 1.0;
            assert_eq!(unsafe { dot_blocks_q4_0(&blocks, &x) }, c as f32 * 0.5, "element {i}");
        }
    }

    #[test]
    fn test_avx2_q8_0_lane_mapping() {
        if !has_avx2() {
            return;
        }
        // Codes in the second 16-byte half come from a separate load.
        let codes: [i8; 32] = std::array::from_fn(|i| if i < 16 { i as i8 + 1 } else { -(i as i8) * 3 });
        let blocks = pack_blocks(&[BlockQ8_0::from_codes(f16::from_f32(0.25), &codes)]);
        for (i, &c) in codes.iter().enumerate() {
            let mut x = vec![0.0f32; 32];
            x[i] = 1.0;
            assert_eq!(unsafe { dot_blocks_q8_0(&blocks, &x) }, c as f32 * 0.25, "element {i}");
        }
    }

    #[test]
    fn test_avx2_empty() {
        if !has_avx2() {
            return;
        }
        assert_eq!(unsafe { dot_blocks_q8_0(&[], &[]) }, 0.0);
    }
}
