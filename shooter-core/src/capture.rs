use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::constants::CAPTURE_JPEG_QUALITY;

/// A downscaled, lossily re-encoded snapshot of the render surface.
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

impl CapturedFrame {
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:image/jpeg;base64,{}",
            BASE64_STANDARD.encode(&self.jpeg)
        )
    }
}

/// Downscales the surface so width <= `max_width` (aspect ratio preserved)
/// and encodes it as low-quality JPEG. Returns `None` when the surface
/// cannot produce pixel data; the caller simply skips the hint cycle.
pub fn capture(surface: &RgbImage, max_width: u32) -> Option<CapturedFrame> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 || max_width == 0 {
        return None;
    }

    let scaled;
    let scaled_ref = if width > max_width {
        let target_height =
            ((height as f64 * max_width as f64 / width as f64).round() as u32).max(1);
        scaled = imageops::resize(surface, max_width, target_height, FilterType::Triangle);
        &scaled
    } else {
        surface
    };

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, CAPTURE_JPEG_QUALITY);
    scaled_ref.write_with_encoder(encoder).ok()?;

    Some(CapturedFrame {
        width: scaled_ref.width(),
        height: scaled_ref.height(),
        jpeg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CAPTURE_MAX_WIDTH;
    use crate::render::render;
    use crate::sim::Game;

    #[test]
    fn wide_surfaces_are_downscaled_with_aspect_preserved() {
        let game = Game::new(800, 600, 0xDEAD_BEEF);
        let surface = render(&game.snapshot());
        let frame = capture(&surface, CAPTURE_MAX_WIDTH).expect("capture should succeed");
        assert_eq!(frame.width, CAPTURE_MAX_WIDTH);
        assert_eq!(frame.height, 240);
        assert!(!frame.jpeg.is_empty());
    }

    #[test]
    fn narrow_surfaces_keep_their_size() {
        let surface = RgbImage::new(200, 150);
        let frame = capture(&surface, CAPTURE_MAX_WIDTH).expect("capture should succeed");
        assert_eq!((frame.width, frame.height), (200, 150));
    }

    #[test]
    fn odd_aspect_ratios_round_within_one_pixel() {
        let surface = RgbImage::new(1000, 333);
        let frame = capture(&surface, CAPTURE_MAX_WIDTH).expect("capture should succeed");
        assert_eq!(frame.width, CAPTURE_MAX_WIDTH);
        let exact = 333.0 * CAPTURE_MAX_WIDTH as f64 / 1000.0;
        assert!((frame.height as f64 - exact).abs() <= 1.0);
    }

    #[test]
    fn dead_surface_is_a_silent_no_op() {
        assert!(capture(&RgbImage::new(0, 0), CAPTURE_MAX_WIDTH).is_none());
        assert!(capture(&RgbImage::new(100, 0), CAPTURE_MAX_WIDTH).is_none());
        assert!(capture(&RgbImage::new(100, 100), 0).is_none());
    }

    #[test]
    fn encoded_frame_is_a_decodable_jpeg() {
        let game = Game::new(640, 480, 7);
        let surface = render(&game.snapshot());
        let frame = capture(&surface, CAPTURE_MAX_WIDTH).expect("capture should succeed");
        let decoded = image::load_from_memory(&frame.jpeg).expect("jpeg should decode");
        assert_eq!(decoded.width(), frame.width);
        assert_eq!(decoded.height(), frame.height);
    }

    #[test]
    fn data_uri_carries_the_jpeg_marker() {
        let surface = RgbImage::new(64, 64);
        let frame = capture(&surface, CAPTURE_MAX_WIDTH).expect("capture should succeed");
        assert!(frame.to_data_uri().starts_with("data:image/jpeg;base64,"));
    }
}
