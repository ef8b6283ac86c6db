//! Byte packing: grouping file bytes three at a time into RGB pixels laid
//! out on the smallest comfortable square.

use super::Canvas;

/// Bytes consumed per RGB pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Smallest `r` with `r * r >= n`.
///
/// Starts from the float estimate and corrects it with exact 128-bit
/// squares, so the answer is right for every `u64`.
fn ceil_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }

    let target = u128::from(n);
    let square = |v: u64| u128::from(v) * u128::from(v);

    let mut r = (n as f64).sqrt() as u64;
    while r > 0 && square(r) > target {
        r -= 1;
    }
    while square(r) < target {
        r += 1;
    }
    r
}

/// Calculate the canvas side length for a source of `len` bytes.
///
/// `ceil(sqrt(ceil(len / 3))) + 1`: the tight square plus one row and column
/// of slack. An empty source gets a 1x1 canvas.
pub fn canvas_dimension(len: u64) -> u64 {
    let pixel_count = len.div_ceil(BYTES_PER_PIXEL as u64);
    ceil_sqrt(pixel_count) + 1
}

/// Pack `bytes` into a zero-padded square canvas.
///
/// The buffer is `max(D * D * 3, len)` bytes; the source is copied verbatim
/// to the front.
pub fn pack(bytes: &[u8]) -> Canvas {
    let len = bytes.len() as u64;
    let dimension = canvas_dimension(len);

    let square_bytes = u128::from(dimension) * u128::from(dimension) * BYTES_PER_PIXEL as u128;
    let size = usize::try_from(square_bytes.max(u128::from(len))).unwrap_or(usize::MAX);

    let mut data = vec![0u8; size];
    data[..bytes.len()].copy_from_slice(bytes);

    tracing::debug!(
        source_len = len,
        buffer_size = size,
        dimension,
        "packed canvas"
    );

    Canvas::new(dimension, len, data)
}
