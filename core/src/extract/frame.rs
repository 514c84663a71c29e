use crate::{CoreError, CoreResult};

/// Borrow-free wrapper around a row-major RGBA byte buffer.
///
/// The core never decodes images; the driver hands in raw RGBA8 bytes
/// (from a PNG decode, an HTTP payload, or the synthetic generator).
#[derive(Debug, Clone)]
pub struct ImageFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ImageFrame {
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> CoreResult<Self> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(CoreError::InvalidInput(format!(
                "rgba buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGB channels at (x, y). Alpha is skipped on purpose.
    #[inline]
    pub fn rgb_at(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}
