//! Error types for exiftool-jp2.

use thiserror::Error;

/// JP2 container errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open data source: {0}")]
    DataSourceOpenFailed(String),

    #[error("not a JPEG 2000 image (signature mismatch)")]
    NotAnImage,

    #[error("corrupted metadata: {0}")]
    CorruptedMetadata(String),

    #[error("failed to read image data: {0}")]
    FailedToReadImageData(String),

    #[error("failed to read input data: {0}")]
    InputDataReadFailed(String),

    #[error("failed to write image: {0}")]
    ImageWriteFailed(String),

    #[error("no image in input data")]
    NoImageInInputData,

    #[error("invalid setting for this image type: {0}")]
    InvalidSettingForImage(&'static str),

    #[error("EXIF error: {0}")]
    Exif(#[from] exiftool_core::Error),

    #[error("IPTC error: {0}")]
    Iptc(#[from] exiftool_iptc::Error),

    #[error("XMP error: {0}")]
    Xmp(#[from] exiftool_xmp::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
