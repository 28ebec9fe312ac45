//! Borrowed tensor views handed to the dot kernels.
//!
//! Both buffers are owned by the caller; the kernels only read them for the
//! duration of one call.

use crate::error::{KernelError, KernelResult};
use crate::quant::{QuantBlock, QuantType};

/// Read-only view of a block-quantized buffer.
#[derive(Debug, Clone, Copy)]
pub struct QuantizedTensor<'a> {
    qtype: QuantType,
    data: &'a [u8],
    len: usize,
}

impl<'a> QuantizedTensor<'a> {
    /// Wrap `data` as `len` elements of `qtype`. The buffer must hold every
    /// block that `len` touches; trailing bytes are ignored.
    pub fn new(qtype: QuantType, data: &'a [u8], len: usize) -> KernelResult<Self> {
        let needed = qtype.storage_bytes(len);
        if data.len() < needed {
            return Err(KernelError::BufferTooSmall {
                qtype,
                len,
                needed,
                actual: data.len(),
            });
        }
        Ok(Self { qtype, data, len })
    }

    /// Zero-copy view over typed blocks.
    #[cfg(target_endian = "little")]
    pub fn from_blocks<B: QuantBlock>(blocks: &'a [B], len: usize) -> KernelResult<Self> {
        Self::new(B::QTYPE, bytemuck::cast_slice(blocks), len)
    }

    #[inline]
    pub fn qtype(&self) -> QuantType {
        self.qtype
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Logical element count.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get_f32(&self, index: usize) -> Option<f32> {
        (index < self.len).then(|| crate::quant::dequant_at(self.qtype, self.data, index))
    }
}

/// One dot-product request: `count` elements from each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotRequest {
    pub quantized_offset: usize,
    pub dense_offset: usize,
    pub count: usize,
}

impl DotRequest {
    pub fn new(quantized_offset: usize, dense_offset: usize, count: usize) -> Self {
        Self { quantized_offset, dense_offset, count }
    }

    pub fn validate(&self, quantized: &QuantizedTensor<'_>, dense_len: usize) -> KernelResult<()> {
        let in_bounds = |offset: usize, len: usize| {
            offset.checked_add(self.count).is_some_and(|end| end <= len)
        };
        if !in_bounds(self.quantized_offset, quantized.len()) {
            return Err(KernelError::QuantizedOutOfBounds {
                offset: self.quantized_offset,
                count: self.count,
                len: quantized.len(),
            });
        }
        if !in_bounds(self.dense_offset, dense_len) {
            return Err(KernelError::DenseOutOfBounds {
                offset: self.dense_offset,
                count: self.count,
                len: dense_len,
            });
        }
        Ok(())
    }
}

/// View a native-endian byte buffer as f32 values.
pub fn dense_from_bytes(bytes: &[u8]) -> KernelResult<&[f32]> {
    Ok(bytemuck::try_cast_slice(bytes)?)
}
