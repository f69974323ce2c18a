use image::{DynamicImage, ImageBuffer};
use std::path::Path;
use super::errors::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    L8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    #[cfg_attr(not(feature = "heif"), allow(dead_code))]
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::L8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Tightly packed pixels as handed back by a decoder.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// Repacks rows that carry padding (`stride > width * channels`) into a
    /// contiguous buffer.
    #[cfg_attr(not(feature = "heif"), allow(dead_code))]
    pub fn from_strided(
        format: PixelFormat,
        width: u32,
        height: u32,
        stride: usize,
        data: &[u8],
    ) -> Result<Self, ConvertError> {
        let row_len = width as usize * format.channels();
        if stride < row_len || data.len() < stride * height.saturating_sub(1) as usize + row_len {
            return Err(ConvertError::InvalidPixels(format!(
                "{}x{} image does not fit in {} bytes with stride {}",
                width, height, data.len(), stride
            )));
        }

        let mut packed = Vec::with_capacity(row_len * height as usize);
        for row in data.chunks(stride).take(height as usize) {
            packed.extend_from_slice(&row[..row_len]);
        }

        Ok(Self { format, width, height, data: packed })
    }

    pub fn into_dynamic(self) -> Result<DynamicImage, ConvertError> {
        let (width, height, format) = (self.width, self.height, self.format);
        let mismatch = || ConvertError::InvalidPixels(format!(
            "buffer does not match {}x{} {:?}", width, height, format
        ));

        let img = match format {
            PixelFormat::L8 => DynamicImage::ImageLuma8(
                ImageBuffer::from_raw(width, height, self.data).ok_or_else(mismatch)?,
            ),
            PixelFormat::Rgb8 => DynamicImage::ImageRgb8(
                ImageBuffer::from_raw(width, height, self.data).ok_or_else(mismatch)?,
            ),
            PixelFormat::Rgba8 => DynamicImage::ImageRgba8(
                ImageBuffer::from_raw(width, height, self.data).ok_or_else(mismatch)?,
            ),
        };
        Ok(img)
    }
}

pub trait Decoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ConvertError>;
}

/// Decodes through the `image` crate, sniffing the real format from the file
/// contents. Used when the binary is built without the `heif` feature.
#[cfg_attr(feature = "heif", allow(dead_code))]
pub struct ImageCrateDecoder;

impl Decoder for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ConvertError> {
        let reader = image::ImageReader::open(path)
            .map_err(ConvertError::Open)?
            .with_guessed_format()
            .map_err(ConvertError::Open)?;

        let img = reader.decode().map_err(ConvertError::Decode)?;
        let (width, height) = (img.width(), img.height());

        let (format, data) = match img {
            DynamicImage::ImageLuma8(gray) => (PixelFormat::L8, gray.into_raw()),
            other if other.color().has_alpha() => (PixelFormat::Rgba8, other.into_rgba8().into_raw()),
            other => (PixelFormat::Rgb8, other.into_rgb8().into_raw()),
        };

        Ok(DecodedImage { format, width, height, data })
    }
}

#[cfg(feature = "heif")]
pub struct HeifDecoder;

#[cfg(feature = "heif")]
impl Decoder for HeifDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ConvertError> {
        use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

        // Read through std so non-UTF-8 file names work.
        let bytes = std::fs::read(path).map_err(ConvertError::Open)?;
        let lib_heif = LibHeif::new();
        let ctx = HeifContext::read_from_bytes(&bytes).map_err(ConvertError::Heif)?;
        let handle = ctx.primary_image_handle().map_err(ConvertError::Heif)?;

        let (format, chroma) = if handle.has_alpha_channel() {
            (PixelFormat::Rgba8, RgbChroma::Rgba)
        } else {
            (PixelFormat::Rgb8, RgbChroma::Rgb)
        };

        let image = lib_heif.decode(&handle, ColorSpace::Rgb(chroma), None)
            .map_err(ConvertError::Heif)?;
        let planes = image.planes();
        let plane = planes.interleaved
            .ok_or_else(|| ConvertError::InvalidPixels("no interleaved RGB plane".to_string()))?;

        DecodedImage::from_strided(format, plane.width, plane.height, plane.stride, plane.data)
    }
}

pub fn default_decoder() -> Box<dyn Decoder> {
    #[cfg(feature = "heif")]
    {
        Box::new(HeifDecoder)
    }
    #[cfg(not(feature = "heif"))]
    {
        Box::new(ImageCrateDecoder)
    }
}
