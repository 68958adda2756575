use crc::{Crc, CRC_32_ISO_HDLC};

/// The zlib/PNG CRC-32 (reflected 0x04C11DB7), not CRC-32C.
const CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC-32 over a chunk's type tag followed by its payload.
pub fn chunk_crc(kind: &[u8; 4], payload: &[u8]) -> u32 {
    let mut digest = CRC.digest();
    digest.update(kind);
    digest.update(payload);
    digest.finalize()
}
