//! Minimal PNG writer: signature, IHDR, a single IDAT and IEND.

mod chunk;
mod crc;
mod encoder;

pub use encoder::{check_size, encode, MAX_ICON_SIZE};
#[cfg(test)]
pub use encoder::read_chunks;

#[derive(Debug, thiserror::Error)]
pub enum PngError {
    #[error("image size must be non-zero")]
    ZeroSize,

    #[error("image size {0} exceeds the icon limit of {max}", max = MAX_ICON_SIZE)]
    SizeTooLarge(u32),

    #[error("pixel buffer is {actual} bytes, expected {expected} for a {size}x{size} image")]
    BufferLength {
        size: u32,
        expected: usize,
        actual: usize,
    },

    #[error("chunk payload of {0} bytes does not fit a PNG length field")]
    ChunkTooLarge(usize),

    #[error("not a PNG stream: bad signature")]
    BadSignature,

    #[error("truncated chunk: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("CRC mismatch in {kind}: computed {computed:08x}, declared {declared:08x}")]
    CrcMismatch {
        kind: String,
        computed: u32,
        declared: u32,
    },
}
