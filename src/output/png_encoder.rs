//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::encode(fb, BufWriter::new(file))
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    /// Encode a framebuffer as a `data:image/png;base64,...` URI for
    /// embedding in HTML or SVG.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_data_uri(fb: &Framebuffer) -> Result<String> {
        let bytes = Self::to_bytes(fb)?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
    }

    fn encode<W: Write>(fb: &Framebuffer, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        // Compact, straight-alpha rows without stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_png_to_bytes() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::new(255, 0, 0, 255));

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_png_roundtrip_pixels() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.set_pixel(1, 1, Rgba::new(10, 20, 30, 255));

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!((info.width, info.height), (3, 2));
        let offset = (3 + 1) * 4;
        assert_eq!(&buf[offset..offset + 4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_data_uri() {
        let fb = Framebuffer::new(2, 2).unwrap();
        let uri = PngEncoder::to_data_uri(&fb).unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
        let payload = &uri["data:image/png;base64,".len()..];
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(&decoded[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let fb = Framebuffer::new(4, 4).unwrap();

        PngEncoder::write_to_file(&fb, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }
}
