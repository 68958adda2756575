use super::crc::chunk_crc;
use super::PngError;

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// Length, type and CRC fields around every payload.
const OVERHEAD: usize = 12;

/// A single PNG chunk.
///
/// Wire format:
/// ```text
/// [length: 4 bytes BE] [type: 4 ASCII bytes] [payload: `length` bytes] [CRC32: 4 bytes BE]
/// ```
///
/// The CRC covers type + payload, not the length field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngChunk {
    pub kind: [u8; 4],
    pub payload: Vec<u8>,
}

impl PngChunk {
    pub fn new(kind: [u8; 4], payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }

    pub fn end() -> Self {
        Self::new(IEND, Vec::new())
    }

    /// Size of this chunk once serialized.
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    pub fn crc(&self) -> u32 {
        chunk_crc(&self.kind, &self.payload)
    }

    /// Append the serialized chunk to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), PngError> {
        let length = u32::try_from(self.payload.len())
            .ok()
            .filter(|&len| len <= i32::MAX as u32)
            .ok_or(PngError::ChunkTooLarge(self.payload.len()))?;

        out.reserve(self.encoded_len());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&self.kind);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&self.crc().to_be_bytes());
        Ok(())
    }

    /// Parse one chunk from the front of `data` and verify its CRC.
    ///
    /// Returns the chunk and the number of bytes it occupied.
    #[cfg(test)]
    pub fn from_bytes_checked(data: &[u8]) -> Result<(Self, usize), PngError> {
        if data.len() < OVERHEAD {
            return Err(PngError::Truncated {
                needed: OVERHEAD,
                available: data.len(),
            });
        }

        let length = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let total = OVERHEAD + length;
        if data.len() < total {
            return Err(PngError::Truncated {
                needed: total,
                available: data.len(),
            });
        }

        let kind = [data[4], data[5], data[6], data[7]];
        let payload = data[8..8 + length].to_vec();
        let crc_bytes = &data[8 + length..total];
        let declared = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

        let chunk = Self::new(kind, payload);
        let computed = chunk.crc();
        if computed != declared {
            return Err(PngError::CrcMismatch {
                kind: chunk.kind_str().into_owned(),
                computed,
                declared,
            });
        }

        Ok((chunk, total))
    }

    pub fn kind_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.kind)
    }
}

impl std::fmt::Display for PngChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} len={} crc={:08x}",
            self.kind_str(),
            self.payload.len(),
            self.crc()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(chunk: &PngChunk) -> Vec<u8> {
        let mut out = Vec::new();
        chunk.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_iend_wire_format() {
        let bytes = wire(&PngChunk::end());
        assert_eq!(
            bytes,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn test_length_prefix_is_big_endian() {
        let chunk = PngChunk::new(IDAT, vec![0xAB; 300]);
        let bytes = wire(&chunk);
        assert_eq!(&bytes[..4], &[0x00, 0x00, 0x01, 0x2C]);
        assert_eq!(&bytes[4..8], b"IDAT");
        assert_eq!(bytes.len(), chunk.encoded_len());
    }

    #[test]
    fn test_parse_back() {
        let chunk = PngChunk::new(IHDR, vec![1, 2, 3, 4]);
        let mut bytes = wire(&chunk);
        bytes.extend_from_slice(b"trailing");

        let (parsed, used) = PngChunk::from_bytes_checked(&bytes).unwrap();
        assert_eq!(parsed, chunk);
        assert_eq!(used, 16);
    }

    #[test]
    fn test_crc_validation_fails_on_corrupt() {
        let mut bytes = wire(&PngChunk::new(IDAT, vec![9, 9, 9]));
        bytes[9] ^= 0xFF;
        assert!(matches!(
            PngChunk::from_bytes_checked(&bytes),
            Err(PngError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_truncated() {
        let bytes = wire(&PngChunk::new(IDAT, vec![0; 10]));
        assert!(matches!(
            PngChunk::from_bytes_checked(&bytes[..15]),
            Err(PngError::Truncated { needed: 22, available: 15 })
        ));
        assert!(matches!(
            PngChunk::from_bytes_checked(&bytes[..3]),
            Err(PngError::Truncated { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(PngChunk::end().to_string(), "IEND len=0 crc=ae426082");
    }
}
