use super::Rgb;

/// Bytes per RGBA pixel.
const CHANNELS: usize = 4;

/// Raw, unfiltered PNG scanlines for an RGBA image.
///
/// Layout:
/// ```text
/// row 0: [filter=0] [R G B A] x size
/// row 1: [filter=0] [R G B A] x size
/// ...
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Render an opaque square of `color` centered on a transparent background.
    ///
    /// The square spans `[size / 4, size - size / 4)` on both axes. Transparent
    /// pixels still carry `color` in their RGB channels, only alpha is zero.
    /// `size` must be non-zero.
    pub fn centered_square(size: u32, color: Rgb) -> Self {
        let n = size as usize;
        let margin = n / 4;
        let inside = |v: usize| margin <= v && v < n - margin;
        let [r, g, b] = color.to_array();

        let mut data = Vec::with_capacity(Self::expected_len(size));
        for y in 0..n {
            data.push(0); // filter: none
            for x in 0..n {
                let alpha = if inside(x) && inside(y) { 255 } else { 0 };
                data.extend_from_slice(&[r, g, b, alpha]);
            }
        }

        Self { size, data }
    }

    /// Byte length of the scanlines for a `size`x`size` RGBA image.
    pub fn expected_len(size: u32) -> usize {
        let n = size as usize;
        n * (1 + CHANNELS * n)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Inspection helpers for checking rendered output.
#[cfg(test)]
impl PixelBuffer {
    /// RGBA value at (x, y), skipping the scanline filter bytes.
    pub fn pixel_at(&self, x: u32, y: u32) -> [u8; 4] {
        let n = self.size as usize;
        let row = y as usize * (1 + CHANNELS * n);
        let idx = row + 1 + x as usize * CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixel_at(x, y)[3]
    }

    /// Pixels without filter bytes, row-major RGBA.
    pub fn to_rgba(&self) -> Vec<u8> {
        let stride = 1 + CHANNELS * self.size as usize;
        self.data
            .chunks(stride)
            .flat_map(|row| row[1..].iter().copied())
            .collect()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("size", &self.size)
            .field("data", &format_args!("{} bytes", self.data.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDIGO: Rgb = Rgb::new(99, 102, 241);

    #[test]
    fn test_length() {
        for size in [1, 2, 3, 4, 5, 7, 16, 48, 128] {
            let buf = PixelBuffer::centered_square(size, INDIGO);
            let n = size as usize;
            assert_eq!(buf.as_bytes().len(), n * (1 + 4 * n), "size {}", size);
        }
    }

    #[test]
    fn test_every_row_starts_with_filter_none() {
        let buf = PixelBuffer::centered_square(16, INDIGO);
        let stride = 1 + 4 * 16;
        for row in buf.as_bytes().chunks(stride) {
            assert_eq!(row[0], 0);
        }
    }

    #[test]
    fn test_alpha_matches_margin_rule() {
        for size in [1u32, 3, 6, 9, 16, 48] {
            let buf = PixelBuffer::centered_square(size, INDIGO);
            let margin = size / 4;
            for y in 0..size {
                for x in 0..size {
                    let inside = (margin..size - margin).contains(&x)
                        && (margin..size - margin).contains(&y);
                    let expected = if inside { 255 } else { 0 };
                    assert_eq!(buf.alpha_at(x, y), expected, "size {} at ({}, {})", size, x, y);
                }
            }
        }
    }

    #[test]
    fn test_transparent_pixels_keep_color() {
        let buf = PixelBuffer::centered_square(16, INDIGO);
        assert_eq!(buf.pixel_at(0, 0), [99, 102, 241, 0]);
        assert_eq!(buf.pixel_at(15, 3), [99, 102, 241, 0]);
        assert_eq!(buf.pixel_at(4, 4), [99, 102, 241, 255]);
        assert_eq!(buf.pixel_at(11, 11), [99, 102, 241, 255]);
        assert_eq!(buf.pixel_at(12, 11), [99, 102, 241, 0]);
    }

    #[test]
    fn test_tiny_sizes() {
        // margin 0 for sizes below 4, so the whole image is opaque
        let buf = PixelBuffer::centered_square(1, INDIGO);
        assert_eq!(buf.as_bytes(), &[0, 99, 102, 241, 255]);

        let buf = PixelBuffer::centered_square(4, INDIGO);
        assert_eq!(buf.alpha_at(0, 0), 0);
        assert_eq!(buf.alpha_at(1, 1), 255);
        assert_eq!(buf.alpha_at(2, 2), 255);
        assert_eq!(buf.alpha_at(3, 3), 0);
    }

    #[test]
    fn test_to_rgba_strips_filter_bytes() {
        let buf = PixelBuffer::centered_square(8, INDIGO);
        let rgba = buf.to_rgba();
        assert_eq!(rgba.len(), 8 * 8 * 4);
        assert_eq!(&rgba[..4], &[99, 102, 241, 0]);
        let center = (3 * 8 + 3) * 4;
        assert_eq!(&rgba[center..center + 4], &[99, 102, 241, 255]);
    }
}
