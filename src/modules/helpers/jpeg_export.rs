use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use super::errors::ConvertError;

pub const OUTPUT_EXTENSION: &str = "jpg";
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// `destination/<source stem>.jpg`. Two sources sharing a stem map to the
/// same output, and the later write wins.
pub fn output_path_for(source: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
    let stem = source.file_stem().ok_or(ConvertError::InvalidFileName)?;

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    Ok(destination.join(name))
}

pub fn write_jpeg(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(ConvertError::CreateOutput)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));

    // JPEG has no alpha channel; anything that isn't plain grayscale is flattened to RGB.
    match img {
        DynamicImage::ImageLuma8(gray) => {
            encoder.write_image(gray.as_raw(), gray.width(), gray.height(), ExtendedColorType::L8)?;
        }
        other => {
            let rgb = other.to_rgb8();
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
        }
    }

    writer.flush().map_err(|e| ConvertError::Encode(image::ImageError::IoError(e)))?;
    Ok(())
}
