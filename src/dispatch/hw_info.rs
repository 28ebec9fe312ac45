//! Host ISA feature detection.
//!
//! Collects the feature flags that decide which float vector widths the
//! dot kernels can run on this machine.

use std::fmt;

/// ISA feature set relevant to kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IsaFeatures {
    pub avx2: bool,
    pub fma: bool,
    pub sse41: bool,
    pub neon: bool,
}

impl IsaFeatures {
    /// Detect features of the current machine.
    pub fn detect() -> Self {
        detect_isa_features()
    }

    /// 256-bit lanes: AVX2 integer widening plus FMA.
    pub fn has_256(&self) -> bool {
        self.avx2 && self.fma
    }

    /// 128-bit lanes: SSE4.1 + FMA on x86, NEON on aarch64.
    pub fn has_128(&self) -> bool {
        (self.sse41 && self.fma) || self.neon
    }
}

impl fmt::Display for IsaFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut feats = Vec::new();
        if self.avx2 {
            feats.push("AVX2");
        }
        if self.sse41 {
            feats.push("SSE4.1");
        }
        if self.fma {
            feats.push("FMA");
        }
        if self.neon {
            feats.push("NEON");
        }
        if feats.is_empty() {
            feats.push("Scalar");
        }
        write!(f, "{}", feats.join("+"))
    }
}

#[cfg(target_arch = "x86_64")]
fn detect_isa_features() -> IsaFeatures {
    IsaFeatures {
        avx2: is_x86_feature_detected!("avx2"),
        fma: is_x86_feature_detected!("fma"),
        sse41: is_x86_feature_detected!("sse4.1"),
        neon: false,
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_isa_features() -> IsaFeatures {
    IsaFeatures {
        neon: std::arch::is_aarch64_feature_detected!("neon"),
        ..IsaFeatures::default()
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_isa_features() -> IsaFeatures {
    IsaFeatures::default()
}
