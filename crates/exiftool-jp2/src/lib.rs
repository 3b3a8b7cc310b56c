//! JPEG 2000 (JP2) container reader/writer for Exif, IPTC, XMP and an embedded
//! ICC colour profile.
//!
//! The container walker and rewriter (the box grammar, the JP2-header
//! re-encoder and the UUID-box metadata round-trip) are the subject of this
//! crate; the Exif/IPTC/XMP codecs themselves live in the sibling
//! `exiftool-core`/`exiftool-iptc`/`exiftool-xmp` crates and are treated here
//! as opaque façades (see [`facade`]).

pub mod boxes;
pub mod byte_order;
mod error;
pub mod facade;
pub mod image;
pub mod jp2h;
pub mod rewriter;
pub mod uuid;

pub use boxes::{BoxHeader, BoxWalker, ImageHeader, DEFAULT_BOX_BUDGET};
pub use error::{Error, Result};
pub use image::{Jp2Image, StructureOption, MAX_FILE_SIZE};
pub use rewriter::SIGNATURE;
pub use uuid::{UuidKind, EXIF_UUID, IPTC_UUID, XMP_UUID};
