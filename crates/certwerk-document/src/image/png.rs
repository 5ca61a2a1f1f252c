// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PNG handling for logo, watermark and signature images. Operates on
// in-memory images using the `image` crate.

use std::io::Cursor;

use certwerk_core::ImageField;
use certwerk_core::error::{CertwerkError, Result};
use image::{ImageFormat, ImageReader, RgbaImage};
use tracing::{debug, instrument};

/// The eight magic bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Check that `bytes` is a non-empty PNG with a readable header.
///
/// The check is by content, never by file name. Returns the pixel dimensions.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn validate_png(field: ImageField, bytes: &[u8]) -> Result<(u32, u32)> {
    let invalid = |reason: String| CertwerkError::InvalidImageFormat { field, reason };

    if bytes.is_empty() {
        return Err(invalid("image is empty".into()));
    }
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(invalid("missing PNG signature".into()));
    }

    let dimensions = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
        .into_dimensions()
        .map_err(|err| invalid(err.to_string()))?;

    debug!(width = dimensions.0, height = dimensions.1, "PNG header valid");
    Ok(dimensions)
}

/// Fully decode a PNG into RGBA pixels.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(CertwerkError::ImageDecode("missing PNG signature".into()));
    }
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|err| CertwerkError::ImageDecode(format!("failed to decode PNG: {err}")))?;
    Ok(image.to_rgba8())
}

/// Scale every pixel's alpha by `opacity`, leaving the colour untouched.
///
/// The result keeps its alpha channel, so whatever was drawn underneath
/// stays visible through it. At 0.15 a watermark reads as a faint mark.
pub fn apply_opacity(image: &RgbaImage, opacity: f32) -> RgbaImage {
    let opacity = opacity.clamp(0.0, 1.0);
    let mut faded = image.clone();
    for pixel in faded.pixels_mut() {
        let alpha = pixel.0[3] as f32 * opacity;
        pixel.0[3] = alpha.round().clamp(0.0, 255.0) as u8;
    }
    faded
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba};

    fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, pixel));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn valid_png_reports_dimensions() {
        let bytes = png_bytes(4, 2, Rgba([10, 20, 30, 255]));
        assert_eq!(validate_png(ImageField::Logo, &bytes).unwrap(), (4, 2));
    }

    #[test]
    fn empty_image_is_rejected() {
        match validate_png(ImageField::Signature, &[]) {
            Err(CertwerkError::InvalidImageFormat { field, reason }) => {
                assert_eq!(field, ImageField::Signature);
                assert_eq!(reason, "image is empty");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn jpeg_bytes_are_rejected() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert!(matches!(
            validate_png(ImageField::Logo, &jpeg_header),
            Err(CertwerkError::InvalidImageFormat { field: ImageField::Logo, .. })
        ));
    }

    #[test]
    fn truncated_png_is_rejected() {
        let bytes = png_bytes(4, 2, Rgba([10, 20, 30, 255]));
        assert!(validate_png(ImageField::Logo, &bytes[..12]).is_err());
    }

    #[test]
    fn corrupt_pixel_data_passes_validation_but_not_decoding() {
        let mut bytes = png_bytes(4, 2, Rgba([10, 20, 30, 255]));
        let idat = bytes.windows(4).position(|w| w == b"IDAT").unwrap();
        for byte in &mut bytes[idat + 4..idat + 12] {
            *byte ^= 0xFF;
        }

        assert_eq!(validate_png(ImageField::Logo, &bytes).unwrap(), (4, 2));
        assert!(matches!(decode_png(&bytes), Err(CertwerkError::ImageDecode(_))));
    }

    #[test]
    fn decode_round_trips_pixels() {
        let bytes = png_bytes(3, 3, Rgba([200, 100, 50, 255]));
        let decoded = decode_png(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 3));
        assert_eq!(*decoded.get_pixel(1, 1), Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn opacity_scales_alpha_only() {
        let image = RgbaImage::from_pixel(2, 1, Rgba([0, 40, 80, 255]));
        assert_eq!(*apply_opacity(&image, 1.0).get_pixel(0, 0), Rgba([0, 40, 80, 255]));

        let faded = apply_opacity(&image, 0.15);
        // 255 * 0.15 = 38.25
        assert_eq!(*faded.get_pixel(1, 0), Rgba([0, 40, 80, 38]));
    }

    #[test]
    fn opacity_keeps_transparent_pixels_transparent() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 0, Rgba([9, 9, 9, 128]));

        let faded = apply_opacity(&image, 0.5);
        assert_eq!(faded.get_pixel(0, 0).0[3], 0);
        assert_eq!(faded.get_pixel(1, 0).0[3], 64);
        assert_eq!(apply_opacity(&image, 7.0), image);
    }
}
