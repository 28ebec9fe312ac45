use bytemuck::{Pod, Zeroable};
use half::f16;

/// Supported quantization schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantType {
    Q4_0,
    Q8_0,
}

/// Logical elements per block (both classic schemes).
pub const QK: usize = 32;
/// Size of the f16 scale that leads every block.
pub const SCALE_BYTES: usize = 2;
/// Offset subtracted from raw Q4_0 nibbles.
pub const Q4_0_BIAS: i8 = 8;

// ==========================================================================
// Classic GGML Block Structures (block_size=32, matching llama.cpp layout)
// ==========================================================================

/// Q4_0: 4-bit quantization, 32 elements per block, 18 bytes.
/// Layout: d(f16) + qs(16 bytes packed 4-bit)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BlockQ4_0 {
    pub d: f16,        // delta (scale)
    pub qs: [u8; 16],  // element i in low nibble of qs[i], element 16+i in high nibble
}

/// Q8_0: 8-bit quantization, 32 elements per block, 34 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BlockQ8_0 {
    pub d: f16,        // delta (scale)
    pub qs: [i8; 32],  // 32 x 8-bit quantized values
}

const _: () = assert!(std::mem::size_of::<BlockQ4_0>() == QuantType::Q4_0.block_bytes());
const _: () = assert!(std::mem::size_of::<BlockQ8_0>() == QuantType::Q8_0.block_bytes());

impl QuantType {
    /// Elements per block.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Q4_0 | Self::Q8_0 => QK,
        }
    }

    /// Bytes per block.
    pub const fn block_bytes(self) -> usize {
        match self {
            Self::Q4_0 => SCALE_BYTES + QK / 2,
            Self::Q8_0 => SCALE_BYTES + QK,
        }
    }

    /// `(block_size, block_bytes)`.
    pub const fn layout(self) -> (usize, usize) {
        (self.block_size(), self.block_bytes())
    }

    /// Bytes needed to hold `len` elements as whole blocks.
    pub const fn storage_bytes(self, len: usize) -> usize {
        len.div_ceil(self.block_size()) * self.block_bytes()
    }

    /// Signed code of element `index` (0..32) inside a block's packed bytes.
    #[inline(always)]
    pub fn code(self, qs: &[u8], index: usize) -> i8 {
        match self {
            Self::Q4_0 => {
                let nibble = if index < QK / 2 {
                    qs[index] & 0x0F
                } else {
                    qs[index - QK / 2] >> 4
                };
                nibble as i8 - Q4_0_BIAS
            }
            Self::Q8_0 => qs[index] as i8,
        }
    }
}

/// Decode the little-endian f16 at `byte_offset` to f32.
#[inline(always)]
pub fn load_f16(buf: &[u8], byte_offset: usize) -> f32 {
    f16::from_le_bytes([buf[byte_offset], buf[byte_offset + 1]]).to_f32()
}

/// Dequantized value of element `index` of a block-laid-out buffer.
#[inline(always)]
pub fn dequant_at(qtype: QuantType, data: &[u8], index: usize) -> f32 {
    let (block_size, block_bytes) = qtype.layout();
    let block_offset = (index / block_size) * block_bytes;
    let scale = load_f16(data, block_offset);
    let qs = &data[block_offset + SCALE_BYTES..block_offset + block_bytes];
    qtype.code(qs, index % block_size) as f32 * scale
}

/// Dequantize `out.len()` elements starting at element `offset`.
pub fn dequantize(qtype: QuantType, data: &[u8], offset: usize, out: &mut [f32]) {
    for (i, o) in out.iter_mut().enumerate() {
        *o = dequant_at(qtype, data, offset + i);
    }
}

/// A block type with a fixed on-disk layout.
pub trait QuantBlock: Pod {
    const QTYPE: QuantType;

    fn to_le_bytes(&self) -> Vec<u8>;
}

impl BlockQ4_0 {
    /// Pack 32 signed codes in `[-8, 7]` under scale `d`.
    pub fn from_codes(d: f16, codes: &[i8; QK]) -> Self {
        let mut qs = [0u8; QK / 2];
        for (i, q) in qs.iter_mut().enumerate() {
            debug_assert!((-8..=7).contains(&codes[i]) && (-8..=7).contains(&codes[i + QK / 2]));
            let lo = (codes[i] + Q4_0_BIAS) as u8 & 0x0F;
            let hi = (codes[i + QK / 2] + Q4_0_BIAS) as u8 & 0x0F;
            *q = lo | (hi << 4);
        }
        Self { d, qs }
    }

    pub fn codes(&self) -> [i8; QK] {
        std::array::from_fn(|i| QuantType::Q4_0.code(&self.qs, i))
    }
}

impl BlockQ8_0 {
    pub fn from_codes(d: f16, codes: &[i8; QK]) -> Self {
        Self { d, qs: *codes }
    }

    pub fn codes(&self) -> [i8; QK] {
        self.qs
    }
}

impl QuantBlock for BlockQ4_0 {
    const QTYPE: QuantType = QuantType::Q4_0;

    fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::QTYPE.block_bytes());
        out.extend_from_slice(&self.d.to_le_bytes());
        out.extend_from_slice(&self.qs);
        out
    }
}

impl QuantBlock for BlockQ8_0 {
    const QTYPE: QuantType = QuantType::Q8_0;

    fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::QTYPE.block_bytes());
        out.extend_from_slice(&self.d.to_le_bytes());
        out.extend(self.qs.iter().map(|&q| q as u8));
        out
    }
}

/// Concatenate blocks into a little-endian buffer.
pub fn pack_blocks<B: QuantBlock>(blocks: &[B]) -> Vec<u8> {
    let mut out = Vec::with_capacity(blocks.len() * B::QTYPE.block_bytes());
    for block in blocks {
        out.extend_from_slice(&block.to_le_bytes());
    }
    out
}
