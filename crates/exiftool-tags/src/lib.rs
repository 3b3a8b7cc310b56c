//! EXIF tag definitions.
//!
//! This crate contains the standard EXIF/GPS tag tables (IFD0, ExifIFD, GPS,
//! Interop). Vendor MakerNote tables are out of scope here -- a JP2 Exif UUID
//! is a bare TIFF stream with no MakerNote IFD.
//!
//! Tag tables are auto-generated from ExifTool Perl sources via xtask.

mod exif;
pub mod generated;
pub mod interp;

pub use exif::{TagDef, TagGroup, EXIF_TAGS, GPS_TAGS, IFD0_TAGS};

/// Well-known tag IDs re-exported from core.
pub use exiftool_core::ifd::tags;
