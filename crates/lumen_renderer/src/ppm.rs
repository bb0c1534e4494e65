//! Plain-text PPM (P3) encoding.

use std::io::Write;

use crate::PixelBuffer;
use lumen_math::{Color, Interval};

/// Header for a `width` x `height` image with 8-bit channels.
pub fn ppm_header(width: u32, height: u32) -> String {
    format!("P3\n{} {}\n255\n", width, height)
}

/// Quantize a gamma-corrected color to 8-bit RGB.
///
/// Each channel is clamped to [0, 0.999] and scaled by 256, so 1.0 maps to 255.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (256.0 * Interval::COLOR.clamp(c)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Write the buffer as P3 PPM, top row first.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, mut writer: W) -> std::io::Result<()> {
    writer.write_all(ppm_header(buffer.width(), buffer.height()).as_bytes())?;
    for color in buffer.scanlines() {
        let [r, g, b] = color_to_rgb8(color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }
    writer.flush()
}

/// Encode the buffer as a P3 PPM string.
pub fn encode_ppm(buffer: &PixelBuffer) -> String {
    let mut out = ppm_header(buffer.width(), buffer.height());
    for color in buffer.scanlines() {
        let [r, g, b] = color_to_rgb8(color);
        out.push_str(&format!("{} {} {}\n", r, g, b));
    }
    out
}
