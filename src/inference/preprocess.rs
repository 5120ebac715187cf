//! Image normalization for model input
//!
//! Turns raw uploaded bytes into the classifier's input tensor. The model
//! consumes NHWC `[1, 224, 224, 3]` float tensors with samples scaled from
//! [0, 255] to [0.0, 1.0]; no mean/std normalization is applied because the
//! model was trained on plain rescaled pixels.

use image::imageops::FilterType;
use ndarray::Array4;

use crate::error::{PipelineError, Result};
use crate::IMAGE_SIZE;

/// Decode and normalize raw image bytes into a `[1, H, W, 3]` tensor
///
/// Accepts any container format the `image` crate can decode. Non-RGB inputs
/// are converted to 3-channel RGB, which silently drops alpha and expands
/// grayscale. The image is resized (not cropped) to 224x224, ignoring the
/// source aspect ratio.
///
/// Pure function of the input bytes; fails with [`PipelineError::Decode`]
/// when the bytes are not a decodable image.
pub fn normalize(bytes: &[u8]) -> Result<Array4<f32>> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_exact(IMAGE_SIZE as u32, IMAGE_SIZE as u32, FilterType::Lanczos3);
    let rgb = resized.to_rgb8();

    let data: Vec<f32> = rgb
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.0)
        .collect();

    // Raw RGB8 buffers are row-major HWC, which is exactly the target layout
    // once the batch dimension is prepended.
    Array4::from_shape_vec((1, IMAGE_SIZE, IMAGE_SIZE, 3), data)
        .map_err(|e| PipelineError::Preprocess(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, LumaA, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_normalize_solid_red() {
        let img = RgbImage::from_pixel(10, 10, Rgb([255, 0, 0]));
        let tensor = normalize(&encode_png(DynamicImage::ImageRgb8(img))).unwrap();

        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        for y in 0..224 {
            for x in 0..224 {
                assert!((tensor[[0, y, x, 0]] - 1.0).abs() < 1e-4);
                assert!(tensor[[0, y, x, 1]].abs() < 1e-4);
                assert!(tensor[[0, y, x, 2]].abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_normalize_converts_grayscale_with_alpha() {
        // Grayscale+alpha input is expanded to 3 RGB channels
        let img = image::ImageBuffer::from_pixel(8, 8, LumaA([128u8, 255u8]));
        let tensor = normalize(&encode_png(DynamicImage::ImageLumaA8(img))).unwrap();

        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        let v = tensor[[0, 100, 100, 0]];
        assert!((v - 128.0 / 255.0).abs() < 1e-2);
        assert_eq!(tensor[[0, 100, 100, 1]], v);
        assert_eq!(tensor[[0, 100, 100, 2]], v);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let err = normalize(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }
}
