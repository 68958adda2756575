use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use tracing::debug;

use super::chunk::{PngChunk, IDAT, IEND, IHDR};
use super::PngError;
use crate::icon::PixelBuffer;

/// Fixed 8-byte PNG file signature.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest icon edge accepted. Keeps the scanline buffer (about 64 MiB at
/// this size) well inside memory; the PNG header itself allows 2^31 - 1.
pub const MAX_ICON_SIZE: u32 = 4096;

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;

/// Image header: 8-bit truecolor with alpha, deflate, no filtering, no interlace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ihdr {
    pub width: u32,
    pub height: u32,
}

impl Ihdr {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// The 13-byte IHDR payload.
    pub fn to_bytes(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = BIT_DEPTH;
        out[9] = COLOR_TYPE_RGBA;
        // compression, filter and interlace methods stay 0
        out
    }

    pub fn to_chunk(&self) -> PngChunk {
        PngChunk::new(IHDR, self.to_bytes().to_vec())
    }
}

/// Reject sizes that cannot be rendered: zero, or above [`MAX_ICON_SIZE`].
pub fn check_size(size: u32) -> Result<(), PngError> {
    if size == 0 {
        return Err(PngError::ZeroSize);
    }
    if size > MAX_ICON_SIZE {
        return Err(PngError::SizeTooLarge(size));
    }
    Ok(())
}

/// Encode a square RGBA image into a complete PNG stream.
pub fn encode(pixels: &PixelBuffer) -> Result<Vec<u8>, PngError> {
    encode_scanlines(pixels.as_bytes(), pixels.size())
}

/// Encode raw scanlines (filter byte + `size` RGBA pixels per row).
pub fn encode_scanlines(raw: &[u8], size: u32) -> Result<Vec<u8>, PngError> {
    check_size(size)?;

    let expected = PixelBuffer::expected_len(size);
    if raw.len() != expected {
        return Err(PngError::BufferLength {
            size,
            expected,
            actual: raw.len(),
        });
    }

    let compressed = compress_to_vec_zlib(raw, CompressionLevel::BestCompression as u8);
    debug!(
        "Deflated {}x{} scanlines: {} -> {} bytes",
        size,
        size,
        raw.len(),
        compressed.len()
    );

    let chunks = [
        Ihdr::square(size).to_chunk(),
        PngChunk::new(IDAT, compressed),
        PngChunk::end(),
    ];
    for chunk in &chunks {
        debug!("Chunk {}", chunk);
    }

    let total = SIGNATURE.len() + chunks.iter().map(PngChunk::encoded_len).sum::<usize>();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&SIGNATURE);
    for chunk in &chunks {
        chunk.write_to(&mut out)?;
    }
    Ok(out)
}

/// Split a PNG stream into its chunks, validating the signature and every CRC.
///
/// Stops after IEND; anything following it is ignored.
#[cfg(test)]
pub fn read_chunks(data: &[u8]) -> Result<Vec<PngChunk>, PngError> {
    let body = data
        .strip_prefix(&SIGNATURE)
        .ok_or(PngError::BadSignature)?;

    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < body.len() {
        let (chunk, used) = PngChunk::from_bytes_checked(&body[pos..])?;
        pos += used;
        let done = chunk.kind == IEND;
        chunks.push(chunk);
        if done {
            break;
        }
    }
    Ok(chunks)
}
