//! Image payloads for signature, initials and image-block elements.
//!
//! The editor stores images as `data:` URLs. They are decoded here into an
//! [`EmbeddedImage`] ready to become a PDF Image XObject:
//!
//! - **JPEG**: passed through untouched (`DCTDecode`), dimensions read from the SOF marker.
//! - **PNG**: decoded with the `image` crate, pixels and alpha split and Flate-compressed.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::geometry::Rect;

/// Encoded form of the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG stream, embedded as-is
    Jpeg,
    /// Flate-compressed raw samples (decoded from PNG)
    Png,
}

/// Color space of the sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// 1 component
    DeviceGray,
    /// 3 components
    DeviceRGB,
    /// 4 components
    DeviceCMYK,
}

impl ColorSpace {
    /// Number of color components per pixel.
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
            ColorSpace::DeviceCMYK => 4,
        }
    }

    /// PDF name of the color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

/// A decoded image, ready for embedding.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bits per component (always 8 here)
    pub bits_per_component: u8,
    /// Color space of `data`
    pub color_space: ColorSpace,
    /// Encoding of `data`
    pub format: ImageFormat,
    /// JPEG bytes or Flate-compressed samples
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha channel, if the source had one
    pub soft_mask: Option<Vec<u8>>,
}

impl EmbeddedImage {
    /// Wrap a JPEG file without transcoding.
    pub fn from_jpeg(data: Vec<u8>) -> Result<Self, ImageError> {
        let (width, height, color_space) = parse_jpeg_header(&data)?;
        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            format: ImageFormat::Jpeg,
            data,
            soft_mask: None,
        })
    }

    /// Decode a PNG file into compressed samples plus an optional soft mask.
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        use image::GenericImageView;

        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidData("image has no pixels".to_string()));
        }

        let (color_space, pixels, alpha) = match img.color() {
            image::ColorType::L8 | image::ColorType::L16 => {
                (ColorSpace::DeviceGray, img.to_luma8().into_raw(), None)
            },
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = img.to_luma_alpha8();
                let mut gray = Vec::with_capacity((width * height) as usize);
                let mut alpha = Vec::with_capacity((width * height) as usize);
                for pixel in la.pixels() {
                    gray.push(pixel.0[0]);
                    alpha.push(pixel.0[1]);
                }
                (ColorSpace::DeviceGray, gray, Some(alpha))
            },
            image::ColorType::Rgb8 | image::ColorType::Rgb16 => {
                (ColorSpace::DeviceRGB, img.to_rgb8().into_raw(), None)
            },
            _ => {
                let rgba = img.to_rgba8();
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                let mut alpha = Vec::with_capacity((width * height) as usize);
                for pixel in rgba.pixels() {
                    rgb.extend_from_slice(&pixel.0[..3]);
                    alpha.push(pixel.0[3]);
                }
                (ColorSpace::DeviceRGB, rgb, Some(alpha))
            },
        };

        // Fully opaque alpha adds nothing.
        let alpha = alpha.filter(|a| a.iter().any(|&v| v != u8::MAX));

        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            format: ImageFormat::Png,
            data: compress(&pixels)?,
            soft_mask: alpha.map(|a| compress(&a)).transpose()?,
        })
    }

    /// Decode raw bytes, detecting the format from magic bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        match sniff_format(data) {
            Some(ImageFormat::Jpeg) => Self::from_jpeg(data.to_vec()),
            Some(ImageFormat::Png) => Self::from_png(data),
            None => Err(ImageError::UnsupportedFormat),
        }
    }

    /// Decode a `data:image/...;base64,` URL.
    ///
    /// The MIME type selects the decoder; an unknown or missing MIME type
    /// falls back to magic-byte detection.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::export::{EmbeddedImage, ImageError};
    ///
    /// let err = EmbeddedImage::from_data_url("https://example.com/a.png").unwrap_err();
    /// assert!(matches!(err, ImageError::InvalidDataUrl(_)));
    /// ```
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let (mime, bytes) = decode_data_url(url)?;
        match mime.as_str() {
            "image/jpeg" | "image/jpg" => Self::from_jpeg(bytes),
            "image/png" => Self::from_png(&bytes),
            _ => Self::from_bytes(&bytes),
        }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Largest rect with the image's aspect ratio that fits in `area`, centred.
    pub fn fit_contain(&self, area: Rect) -> Rect {
        if !area.has_area() {
            return area;
        }
        let aspect = self.aspect_ratio();
        let (width, height) = if aspect > area.width / area.height {
            (area.width, area.width / aspect)
        } else {
            (area.height * aspect, area.height)
        };
        Rect::new(
            area.x + (area.width - width) / 2.0,
            area.y + (area.height - height) / 2.0,
            width,
            height,
        )
    }
}

/// Image decoding error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Neither JPEG nor PNG
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// Malformed `data:` URL
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Failed to decode image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Failed to compress image data
    #[error("Compression error: {0}")]
    CompressionError(String),

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),
}

/// True when `value` looks like a `data:` URL.
pub fn is_data_url(value: &str) -> bool {
    value.trim_start().starts_with("data:")
}

/// Split a base64 `data:` URL into its lowercase MIME type and payload.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), ImageError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| ImageError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(ImageError::InvalidDataUrl("payload is not base64".to_string()));
    }

    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| ImageError::InvalidDataUrl(e.to_string()))?;
    if bytes.is_empty() {
        return Err(ImageError::InvalidDataUrl("empty payload".to_string()));
    }
    Ok((mime, bytes))
}

fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    if data.starts_with(&[0xFF, 0xD8]) {
        Some(ImageFormat::Jpeg)
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(ImageFormat::Png)
    } else {
        None
    }
}

/// Read width, height and color space from the first SOF marker.
fn parse_jpeg_header(data: &[u8]) -> Result<(u32, u32, ColorSpace), ImageError> {
    if sniff_format(data) != Some(ImageFormat::Jpeg) {
        return Err(ImageError::InvalidData("Not a valid JPEG".to_string()));
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        pos += 2;

        if marker == 0xFF || marker == 0x00 {
            continue;
        }

        // SOF0..SOF15 minus DHT (C4), JPG (C8) and DAC (CC)
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            if pos + 7 >= data.len() {
                return Err(ImageError::InvalidData("Truncated JPEG header".to_string()));
            }
            let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
            let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let color_space = match data[pos + 7] {
                1 => ColorSpace::DeviceGray,
                4 => ColorSpace::DeviceCMYK,
                _ => ColorSpace::DeviceRGB,
            };
            if width == 0 || height == 0 {
                return Err(ImageError::InvalidData("JPEG has zero dimensions".to_string()));
            }
            return Ok((width, height, color_space));
        }

        if pos + 2 > data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        pos += length;
    }

    Err(ImageError::InvalidData("Could not find JPEG dimensions".to_string()))
}

fn compress(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ImageError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| ImageError::CompressionError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    fn png_data_url(img: image::DynamicImage) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(img)))
    }

    /// Smallest byte sequence `parse_jpeg_header` accepts: SOI, APP0 stub, SOF0.
    fn jpeg_stub(width: u16, height: u16, components: u8) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00];
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.push(components);
        data.extend_from_slice(&[0x00; 9]);
        data
    }

    #[test]
    fn test_jpeg_header_dimensions() {
        let image = EmbeddedImage::from_jpeg(jpeg_stub(320, 240, 3)).unwrap();
        assert_eq!((image.width, image.height), (320, 240));
        assert_eq!(image.color_space, ColorSpace::DeviceRGB);
        assert_eq!(image.format, ImageFormat::Jpeg);

        let gray = EmbeddedImage::from_jpeg(jpeg_stub(10, 10, 1)).unwrap();
        assert_eq!(gray.color_space, ColorSpace::DeviceGray);
    }

    #[test]
    fn test_invalid_jpeg_header() {
        assert!(matches!(parse_jpeg_header(&[0x00, 0x00]), Err(ImageError::InvalidData(_))));
        assert!(matches!(
            parse_jpeg_header(&[0xFF, 0xD8, 0xFF, 0xC0, 0x00]),
            Err(ImageError::InvalidData(_))
        ));
    }

    #[test]
    fn test_png_with_alpha_gets_soft_mask() {
        let mut rgba = image::RgbaImage::new(4, 2);
        rgba.put_pixel(0, 0, image::Rgba([255, 0, 0, 128]));
        let image = EmbeddedImage::from_png(&png_bytes(image::DynamicImage::ImageRgba8(rgba))).unwrap();

        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.color_space, ColorSpace::DeviceRGB);
        assert_eq!(image.format, ImageFormat::Png);
        assert!(image.soft_mask.is_some());
    }

    #[test]
    fn test_opaque_png_has_no_soft_mask() {
        let rgb = image::RgbImage::from_pixel(3, 3, image::Rgb([10, 20, 30]));
        let image = EmbeddedImage::from_png(&png_bytes(image::DynamicImage::ImageRgb8(rgb))).unwrap();
        assert!(image.soft_mask.is_none());

        let opaque = image::RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 255]));
        let image =
            EmbeddedImage::from_png(&png_bytes(image::DynamicImage::ImageRgba8(opaque))).unwrap();
        assert!(image.soft_mask.is_none());
    }

    #[test]
    fn test_from_data_url_png() {
        let url = png_data_url(image::DynamicImage::ImageLuma8(image::GrayImage::new(5, 7)));
        let image = EmbeddedImage::from_data_url(&url).unwrap();
        assert_eq!((image.width, image.height), (5, 7));
        assert_eq!(image.color_space, ColorSpace::DeviceGray);
    }

    #[test]
    fn test_from_data_url_sniffs_unknown_mime() {
        let payload = STANDARD.encode(jpeg_stub(8, 4, 3));
        let url = format!("data:application/octet-stream;base64,{}", payload);
        let image = EmbeddedImage::from_data_url(&url).unwrap();
        assert_eq!(image.format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_decode_data_url_errors() {
        assert!(matches!(decode_data_url("image/png;base64,AAAA"), Err(ImageError::InvalidDataUrl(_))));
        assert!(matches!(decode_data_url("data:image/png;base64"), Err(ImageError::InvalidDataUrl(_))));
        assert!(matches!(decode_data_url("data:text/plain,hello"), Err(ImageError::InvalidDataUrl(_))));
        assert!(matches!(decode_data_url("data:image/png;base64,@@@"), Err(ImageError::InvalidDataUrl(_))));
        assert!(matches!(decode_data_url("data:image/png;base64,"), Err(ImageError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_decode_data_url_ignores_whitespace() {
        let (mime, bytes) = decode_data_url("data:IMAGE/PNG;base64,aGVs\nbG8=").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_unsupported_bytes() {
        assert!(matches!(EmbeddedImage::from_bytes(b"GIF89a"), Err(ImageError::UnsupportedFormat)));
        let url = format!("data:image/gif;base64,{}", STANDARD.encode(b"GIF89a"));
        assert!(matches!(EmbeddedImage::from_data_url(&url), Err(ImageError::UnsupportedFormat)));
    }

    #[test]
    fn test_fit_contain_centres() {
        let image = EmbeddedImage::from_jpeg(jpeg_stub(200, 100, 3)).unwrap();

        let fitted = image.fit_contain(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(fitted, Rect::new(0.0, 25.0, 100.0, 50.0));

        let fitted = image.fit_contain(Rect::new(10.0, 0.0, 400.0, 100.0));
        assert_eq!(fitted, Rect::new(110.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_is_data_url() {
        assert!(is_data_url("data:image/png;base64,AA"));
        assert!(!is_data_url("JD"));
    }
}
