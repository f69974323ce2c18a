use std::io;
use thiserror::Error;

/// Everything that can go wrong while converting a single file.
///
/// None of these are fatal: the pipeline turns each one into a per-item
/// failure message and moves on to the next file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to open file: {0}")]
    Open(#[source] io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[cfg(feature = "heif")]
    #[error("Failed to decode HEIF image: {0}")]
    Heif(#[source] libheif_rs::HeifError),

    #[error("Invalid pixel data: {0}")]
    InvalidPixels(String),

    #[error("Invalid filename")]
    InvalidFileName,

    #[error("Failed to create output file: {0}")]
    CreateOutput(#[source] io::Error),

    #[error("Failed to encode JPEG: {0}")]
    Encode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn open_message_leaves_the_path_to_the_caller() {
        let err = ConvertError::Open(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "Failed to open file: gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn decode_keeps_the_image_error_as_source() {
        let inner = image::ImageError::IoError(io::Error::new(io::ErrorKind::InvalidData, "truncated"));
        let err = ConvertError::Decode(inner);
        let source = err.source().unwrap();
        assert!(source.downcast_ref::<image::ImageError>().is_some());
    }
}
