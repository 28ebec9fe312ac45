//! Vector-width selection for the quantized dot kernels.
//!
//! The width is resolved once, from host features and an optional explicit
//! `KernelConfig::vector_bits`, and then injected into `QuantDotKernel`.

pub mod hw_info;

pub use hw_info::IsaFeatures;

use crate::error::{KernelError, KernelResult};
use std::fmt;
use std::sync::OnceLock;

static FEATURES: OnceLock<IsaFeatures> = OnceLock::new();

/// Host ISA features (detected once, cached for process lifetime).
pub fn host_features() -> IsaFeatures {
    *FEATURES.get_or_init(IsaFeatures::detect)
}

/// Float vector register width used by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorWidth {
    /// 4 x f32 lanes; a block is consumed in two half-block sub-iterations.
    W128,
    /// 8 x f32 lanes; a block is consumed in one unpack-and-multiply pass.
    W256,
}

impl VectorWidth {
    pub const ALL: [VectorWidth; 2] = [VectorWidth::W256, VectorWidth::W128];

    pub fn from_bits(bits: usize) -> KernelResult<Self> {
        match bits {
            128 => Ok(Self::W128),
            256 => Ok(Self::W256),
            other => Err(KernelError::UnsupportedVectorWidth(other)),
        }
    }

    pub const fn bits(self) -> usize {
        match self {
            Self::W128 => 128,
            Self::W256 => 256,
        }
    }

    /// f32 lanes per register.
    pub const fn lanes(self) -> usize {
        self.bits() / 32
    }

    pub fn host_supports(self) -> bool {
        let feats = host_features();
        match self {
            Self::W128 => feats.has_128(),
            Self::W256 => feats.has_256(),
        }
    }

    /// Widths usable on this host, widest first.
    pub fn available() -> Vec<VectorWidth> {
        Self::ALL.into_iter().filter(|w| w.host_supports()).collect()
    }

    /// Widest width the host supports.
    pub fn detect() -> KernelResult<Self> {
        Self::available()
            .first()
            .copied()
            .ok_or(KernelError::NoVectorSupport)
    }
}

impl fmt::Display for VectorWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit ({} x f32)", self.bits(), self.lanes())
    }
}

/// Kernel construction settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelConfig {
    /// Forced width in bits; `None` picks the widest the host supports.
    pub vector_bits: Option<usize>,
}

impl KernelConfig {
    pub fn with_vector_bits(bits: usize) -> Self {
        Self { vector_bits: Some(bits) }
    }

    /// Resolve the configured width against the host.
    pub fn resolve_width(&self) -> KernelResult<VectorWidth> {
        let width = match self.vector_bits {
            Some(bits) => {
                log::debug!("Forced vector width: {bits} bits");
                VectorWidth::from_bits(bits)?
            }
            None => VectorWidth::detect()?,
        };
        if !width.host_supports() {
            return Err(KernelError::HostLacksVectorWidth { bits: width.bits() });
        }
        Ok(width)
    }
}
