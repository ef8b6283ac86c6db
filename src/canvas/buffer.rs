//! The packed canvas buffer.

use super::packer::BYTES_PER_PIXEL;

/// A square, row-major RGB buffer of side `dimension`.
///
/// Always holds at least `dimension * dimension * 3` bytes. The first
/// `source_len` bytes are the file contents; everything after is zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    dimension: u64,
    source_len: u64,
    data: Vec<u8>,
}

impl Canvas {
    pub(super) fn new(dimension: u64, source_len: u64, data: Vec<u8>) -> Self {
        Self {
            dimension,
            source_len,
            data,
        }
    }

    /// Side length in pixels.
    pub fn dimension(&self) -> u64 {
        self.dimension
    }

    /// Number of source bytes copied into the canvas.
    pub fn source_len(&self) -> u64 {
        self.source_len
    }

    /// Number of pixels covered by the square (`dimension²`).
    pub fn pixel_count(&self) -> u64 {
        self.dimension * self.dimension
    }

    /// The full backing buffer, padding included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGB triple at column `x`, row `y`.
    pub fn pixel(&self, x: u64, y: u64) -> Option<[u8; 3]> {
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        let start = ((y * self.dimension + x) as usize) * BYTES_PER_PIXEL;
        let rgb = self.data.get(start..start + BYTES_PER_PIXEL)?;
        Some([rgb[0], rgb[1], rgb[2]])
    }

    /// Expand to opaque RGBA8, one texel per pixel of the square.
    ///
    /// GPUs have no 24-bit texel format, so this is the layout the renderer
    /// uploads. Bytes past `dimension² * 3` are never present in practice
    /// and are not part of the image.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let square_bytes = self.pixel_count() as usize * BYTES_PER_PIXEL;
        let mut rgba = Vec::with_capacity(self.pixel_count() as usize * 4);
        for rgb in self.data[..square_bytes].chunks_exact(BYTES_PER_PIXEL) {
            rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], u8::MAX]);
        }
        rgba
    }
}
