//! Captured window pixels.
//!
//! [`Frame`] is the output of `Window::capture`: a dense, top-down RGBA
//! buffer sized exactly `width * height * 4`.  Row 0 is the visual top
//! row of the window.

use crate::errors::{GwcError, Result};

/// One captured frame of a window's visible contents.
///
/// Pixels are stored row-major, left-to-right, top-to-bottom, 4 bytes per
/// pixel in RGBA order with alpha always 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw RGBA buffer, validating the size invariant.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(GwcError::os_call(
                "Frame::from_rgba",
                format!(
                    "buffer size mismatch: got {} bytes, expected {expected} for {width}x{height}",
                    data.len()
                ),
            ));
        }
        Ok(Frame {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes; length is always `width * height * 4`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA of the pixel at (`x`, `y`), origin top-left.
    ///
    /// Returns `None` when the coordinate is outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Encode the frame as an in-memory PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| {
                GwcError::os_call("RgbaImage::from_raw", "buffer size mismatch")
            })?;

        let mut buf: Vec<u8> = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buf);
        img.write_to(&mut cursor, image::ImageFormat::Png)
            .map_err(|e| GwcError::os_call("png encode", e))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Frame {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Frame::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_size_invariant_enforced() {
        assert!(Frame::from_rgba(2, 2, vec![0u8; 16]).is_ok());
        assert!(Frame::from_rgba(2, 2, vec![0u8; 15]).is_err());
        assert!(Frame::from_rgba(2, 2, vec![0u8; 17]).is_err());
    }

    #[test]
    fn test_pixel_indexing_is_top_down() {
        let mut data = vec![0u8; 2 * 2 * 4];
        // Top-right pixel red, bottom-left pixel green.
        data[4..8].copy_from_slice(&[255, 0, 0, 255]);
        data[8..12].copy_from_slice(&[0, 255, 0, 255]);
        let frame = Frame::from_rgba(2, 2, data).unwrap();

        assert_eq!(frame.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(0, 1), Some([0, 255, 0, 255]));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(2, 0), None);
        assert_eq!(frame.pixel(0, 2), None);
    }

    #[test]
    fn test_png_round_trip() {
        let frame = solid(3, 2, [10, 20, 30, 255]);
        let png = frame.to_png().unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }
}
