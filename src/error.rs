use crate::quant::QuantType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("unsupported vector width: {0} bits (supported: 128, 256)")]
    UnsupportedVectorWidth(usize),
    #[error("host does not provide {bits}-bit float vector lanes")]
    HostLacksVectorWidth { bits: usize },
    #[error("no supported SIMD vector width on this host")]
    NoVectorSupport,
    #[error("{qtype:?} tensor of {len} elements needs {needed} bytes, buffer has {actual}")]
    BufferTooSmall {
        qtype: QuantType,
        len: usize,
        needed: usize,
        actual: usize,
    },
    #[error("quantized range {offset}+{count} exceeds tensor length {len}")]
    QuantizedOutOfBounds { offset: usize, count: usize, len: usize },
    #[error("dense range {offset}+{count} exceeds tensor length {len}")]
    DenseOutOfBounds { offset: usize, count: usize, len: usize },
    #[error("dense buffer cast failed: {0}")]
    DenseCast(String),
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

pub type KernelResult<T> = Result<T, KernelError>;

impl From<bytemuck::PodCastError> for KernelError {
    fn from(err: bytemuck::PodCastError) -> Self {
        KernelError::DenseCast(format!("{err:?}"))
    }
}
