//! Byte-level encoders for every raster container.

use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use std::io::Cursor;

use crate::error::EncodeError;

/// Encode 8-bit pixel data as a PNG.
///
/// Compression and filter are fixed so identical input always yields
/// identical bytes.
pub fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        encoder.set_filter(png::FilterType::Paeth);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
        writer.finish()?;
    }
    Ok(buf.into_inner())
}

pub fn encode_png_rgba(image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    encode_png(
        image.width(),
        image.height(),
        png::ColorType::Rgba,
        image.as_raw(),
    )
}

pub fn encode_tiff(image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Cursor::new(Vec::new());
    TiffEncoder::new(&mut buf)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| EncodeError::Image {
            format: "TIFF",
            source,
        })?;
    Ok(buf.into_inner())
}

/// GIF has a single transparent palette index and no partial alpha, so every
/// pixel with alpha below 255 is written fully transparent. The quantizer
/// works on a copy; `image` is left as is.
pub fn encode_gif(image: &RgbaImage, speed: i32) -> Result<Vec<u8>, EncodeError> {
    let binary = binary_alpha(image);
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut buf, speed);
        encoder
            .encode(
                binary.as_raw(),
                binary.width(),
                binary.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|source| EncodeError::Image {
                format: "GIF",
                source,
            })?;
    }
    Ok(buf)
}

fn binary_alpha(image: &RgbaImage) -> RgbaImage {
    let mut copy = image.clone();
    for px in copy.pixels_mut() {
        if px.0[3] < 255 {
            px.0[3] = 0;
        }
    }
    copy
}

pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|source| EncodeError::Image {
            format: "JPEG",
            source,
        })?;
    Ok(buf)
}

pub fn encode_bmp(image: &RgbImage) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    BmpEncoder::new(&mut buf)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|source| EncodeError::Image {
            format: "BMP",
            source,
        })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, Rgba};

    /// 4x4 image with a fully transparent and a half transparent pixel.
    fn translucent() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 255, 0]));
        img.put_pixel(2, 2, Rgba([0, 255, 0, 128]));
        img
    }

    #[test]
    fn test_png_preserves_alpha() {
        let bytes = encode_png_rgba(&translucent()).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded, translucent());
    }

    #[test]
    fn test_tiff_preserves_alpha() {
        let bytes = encode_tiff(&translucent()).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Tiff)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.get_pixel(1, 1).0[3], 0);
        assert_eq!(decoded.get_pixel(2, 2).0[3], 128);
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_gif_keeps_every_translucent_pixel_transparent() {
        let mut img = translucent();
        img.put_pixel(3, 0, Rgba([0, 0, 255, 200]));
        img.put_pixel(0, 3, Rgba([0, 255, 0, 254]));

        let bytes = encode_gif(&img, 10).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Gif)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
        for (x, y) in [(1, 1), (2, 2), (3, 0), (0, 3)] {
            let alpha = img.get_pixel(x, y).0[3];
            let px = decoded.get_pixel(x, y).0;
            assert!(px[3] < 255, "alpha {alpha} decoded as {px:?}");
        }
        assert_eq!(decoded.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn test_gif_leaves_source_untouched() {
        let img = translucent();
        encode_gif(&img, 10).unwrap();
        assert_eq!(img, translucent());
    }

    #[test]
    fn test_jpeg_and_bmp_accept_three_channels() {
        let rgb = RgbImage::from_pixel(8, 8, Rgb([10, 200, 30]));

        let jpeg = encode_jpeg(&rgb, 75).unwrap();
        let decoded = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.color().channel_count(), 3);

        let bmp = encode_bmp(&rgb).unwrap();
        let decoded = image::load_from_memory_with_format(&bmp, ImageFormat::Bmp)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded, rgb);
    }

    #[test]
    fn test_png_is_deterministic() {
        let a = encode_png_rgba(&translucent()).unwrap();
        let b = encode_png_rgba(&translucent()).unwrap();
        assert_eq!(a, b);
    }
}
