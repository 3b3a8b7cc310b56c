//! `Jp2Image`, the public entry point for reading and writing a JP2
//! container's metadata.

use std::io::{self, Write};
use std::path::Path;

use exiftool_attrs::Attrs;
use exiftool_core::ByteOrder;

use crate::boxes::{parse_colr, parse_ihdr, BoxWalker, DEFAULT_BOX_BUDGET};
use crate::error::{Error, Result};
use crate::facade;
use crate::jp2h::PLACEHOLDER_COLR;
use crate::rewriter::{self, FreshPayloads, SIGNATURE};
use crate::uuid::{classify, split_identifier, UuidKind};

/// Caps the size of any single file `Jp2Image::open` will read into memory.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Which box types `print_structure` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureOption {
    /// One line per top-level box: type and length.
    Basic,
    /// Like `Basic`, but descends into `jp2h`'s sub-boxes, indented.
    Recursive,
    /// Writes the raw embedded ICC profile bytes to `out` (not a tree).
    IccProfile,
    /// Writes the raw XMP packet text to `out` (not a tree).
    Xmp,
    /// Like `Recursive`, but `uuid` boxes holding IPTC are annotated as dropped,
    /// previewing what a `write_metadata` pass would do to them when the IPTC
    /// collection is left empty.
    IptcErase,
}

/// A decoded (or freshly constructed) JPEG 2000 image and its metadata.
///
/// Owns the bytes it was opened from (or the embedded blank template) so that
/// `write_metadata` can rewrite the original box stream without needing to
/// reopen anything.
pub struct Jp2Image {
    source: Vec<u8>,

    pub pixel_width: u32,
    pub pixel_height: u32,

    pub exif: Attrs,
    pub iptc: Attrs,
    pub xmp: Attrs,
    /// The raw XMP packet text read from (or set directly on) the image. When
    /// present, `write_metadata` writes this unmodified instead of re-encoding
    /// `xmp`, per `facade::write_xmp_from_packet`.
    pub xmp_packet: Option<String>,

    pub icc_profile: Option<Vec<u8>>,

    /// Byte order of the inner TIFF stream of the most recently decoded Exif
    /// payload, if any.
    pub byte_order: Option<ByteOrder>,
}

impl Default for Jp2Image {
    fn default() -> Self {
        Self {
            source: Vec::new(),
            pixel_width: 0,
            pixel_height: 0,
            exif: Attrs::new(),
            iptc: Attrs::new(),
            xmp: Attrs::new(),
            xmp_packet: None,
            icc_profile: None,
            byte_order: None,
        }
    }
}

impl Jp2Image {
    /// Box budget shared by the read-side walker and the write-side rewriter's
    /// internal walk.
    pub const DEFAULT_BOX_BUDGET: usize = DEFAULT_BOX_BUDGET;

    /// Creates a fresh image from the embedded blank template:
    /// signature, empty `ftyp`, a minimal `jp2h` with a 1x1 `ihdr` and
    /// placeholder `colr`, and a minimal `jp2c`. Immediately read so the caller
    /// sees `pixel_width == pixel_height == 1` and empty metadata, matching
    /// Testable Properties seed scenario 1.
    pub fn new() -> Self {
        let mut image = Self::from_bytes(blank_template());
        image
            .read_metadata()
            .expect("embedded blank JP2 template is well-formed");
        image
    }

    /// Loads a JP2 file's bytes into memory without parsing them. Call
    /// `read_metadata` to populate the image model.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)
            .map_err(|e| Error::DataSourceOpenFailed(format!("{}: {e}", path.display())))?;
        if meta.len() > MAX_FILE_SIZE {
            return Err(Error::FailedToReadImageData(format!(
                "{} exceeds {MAX_FILE_SIZE}-byte limit",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)
            .map_err(|e| Error::FailedToReadImageData(format!("{}: {e}", path.display())))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Wraps already-in-memory bytes without parsing them.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: bytes.into(),
            ..Default::default()
        }
    }

    /// Parses the held byte stream, populating `pixel_width`/`pixel_height` and
    /// the Exif/IPTC/XMP/ICC collections. Fails only on a container-level
    /// grammar violation; individual metadata parser failures
    /// are local and clear only the affected collection.
    pub fn read_metadata(&mut self) -> Result<()> {
        if self.source.len() < SIGNATURE.len() || self.source[..SIGNATURE.len()] != SIGNATURE {
            return Err(Error::NotAnImage);
        }

        self.pixel_width = 0;
        self.pixel_height = 0;
        self.exif = Attrs::new();
        self.iptc = Attrs::new();
        self.xmp = Attrs::new();
        self.xmp_packet = None;
        self.icc_profile = None;
        self.byte_order = None;

        let body = &self.source[SIGNATURE.len()..];

        for header in BoxWalker::with_budget(body, Self::DEFAULT_BOX_BUDGET) {
            let header = header?;
            let payload = &body[header.payload.clone()];

            match &header.box_type {
                b"jp2h" => self.read_jp2h(payload)?,
                b"uuid" => self.read_uuid(payload),
                _ => {}
            }
        }

        Ok(())
    }

    fn read_jp2h(&mut self, jp2h_payload: &[u8]) -> Result<()> {
        for sub in BoxWalker::new(jp2h_payload) {
            let sub = sub?;
            let sub_payload = &jp2h_payload[sub.payload.clone()];
            match &sub.box_type {
                b"ihdr" => {
                    let ihdr = parse_ihdr(sub_payload)?;
                    self.pixel_height = ihdr.height;
                    self.pixel_width = ihdr.width;
                }
                b"colr" => {
                    if let Some(icc) = parse_colr(sub_payload)? {
                        self.icc_profile = Some(icc);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn read_uuid(&mut self, payload: &[u8]) {
        let Some((id, rest)) = split_identifier(payload) else {
            return;
        };

        match classify(id) {
            UuidKind::Exif => self.read_exif_uuid(rest),
            UuidKind::Iptc => match facade::iptc_decode(rest) {
                Ok(attrs) => self.iptc = attrs,
                Err(e) => {
                    eprintln!("warning: failed to decode IPTC metadata: {e}");
                    self.iptc = Attrs::new();
                }
            },
            UuidKind::Xmp => self.read_xmp_uuid(rest),
            UuidKind::Unknown => {}
        }
    }

    fn read_exif_uuid(&mut self, payload: &[u8]) {
        let Some(start) = crate::uuid::find_exif_tiff_start(payload) else {
            eprintln!("warning: Exif UUID payload has no recognisable TIFF header; discarding");
            self.exif = Attrs::new();
            return;
        };
        if start > 0 {
            eprintln!("warning: Exif UUID payload had a stray marker before the TIFF stream");
        }
        let tiff = &payload[start..];

        if tiff.len() >= 2 {
            if let Ok(order) = ByteOrder::from_marker([tiff[0], tiff[1]]) {
                self.byte_order = Some(order);
            }
        }

        match facade::exif_decode(tiff) {
            Ok(attrs) => self.exif = attrs,
            Err(e) => {
                eprintln!("warning: failed to decode Exif metadata: {e}");
                self.exif = Attrs::new();
            }
        }
    }

    fn read_xmp_uuid(&mut self, payload: &[u8]) {
        let (stripped, k) = crate::uuid::strip_xmp_preamble(payload);
        if k > 0 {
            eprintln!("warning: XMP UUID payload had {k} leading bytes before '<'; stripped");
        }
        let packet = String::from_utf8_lossy(stripped).into_owned();

        match facade::xmp_decode(&packet) {
            Ok(attrs) => {
                self.xmp = attrs;
                self.xmp_packet = Some(packet);
            }
            Err(e) => {
                eprintln!("warning: failed to decode XMP metadata: {e}");
                self.xmp = Attrs::new();
                self.xmp_packet = None;
            }
        }
    }

    /// Produces a fresh JP2 byte stream with the current in-memory metadata:
    /// rebuilds `jp2h` (replacing `colr` when an ICC profile is held) and
    /// injects Exif/IPTC/XMP UUID boxes in that order, dropping any of the
    /// three the input held.
    pub fn write_metadata(&self) -> Result<Vec<u8>> {
        let exif_bytes = if self.exif.is_empty() {
            None
        } else {
            Some(facade::exif_encode(&self.exif)?)
        };
        let iptc_bytes = if self.iptc.is_empty() {
            None
        } else {
            Some(facade::iptc_encode(&self.iptc)?)
        };
        let xmp_text = if self.xmp_packet.is_some() || !self.xmp.is_empty() {
            Some(facade::write_xmp_from_packet(
                self.xmp_packet.as_deref(),
                &self.xmp,
            )?)
        } else {
            None
        };

        let fresh = FreshPayloads {
            exif: exif_bytes.as_deref(),
            iptc: iptc_bytes.as_deref(),
            xmp: xmp_text.as_ref().map(|s| s.as_bytes()),
            icc: self.icc_profile.as_deref(),
        };

        rewriter::rewrite(&self.source, &fresh, Self::DEFAULT_BOX_BUDGET)
    }

    /// Writes the result of `write_metadata` to `path`, replacing the source
    /// bytes this image was opened from only after the new bytes are fully
    /// staged (write-to-temp then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.write_metadata()?;
        let tmp = path.with_extension("jp2.tmp");
        std::fs::write(&tmp, &bytes)
            .map_err(|e| Error::ImageWriteFailed(format!("{}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, path)
            .map_err(|e| Error::ImageWriteFailed(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    /// Unsupported: JP2 has no comment box in this crate's scope. Always fails.
    pub fn set_comment(&mut self, _comment: &str) -> Result<()> {
        Err(Error::InvalidSettingForImage(
            "JP2 does not support a text comment in this implementation",
        ))
    }

    /// Writes a human-readable box tree (or, for `IccProfile`/`Xmp`, the raw
    /// bytes/text) to `out`.
    pub fn print_structure(
        &self,
        out: &mut impl Write,
        option: StructureOption,
        depth: Option<usize>,
    ) -> Result<()> {
        match option {
            StructureOption::IccProfile => {
                if let Some(icc) = &self.icc_profile {
                    out.write_all(icc)?;
                }
                return Ok(());
            }
            StructureOption::Xmp => {
                if let Some(packet) = &self.xmp_packet {
                    out.write_all(packet.as_bytes())?;
                }
                return Ok(());
            }
            StructureOption::Basic => self.print_tree(out, false, false, depth)?,
            StructureOption::Recursive => self.print_tree(out, true, false, depth)?,
            StructureOption::IptcErase => self.print_tree(out, true, true, depth)?,
        }
        Ok(())
    }

    fn print_tree(
        &self,
        out: &mut impl Write,
        recurse: bool,
        annotate_iptc_erase: bool,
        depth: Option<usize>,
    ) -> io::Result<()> {
        if self.source.len() < SIGNATURE.len() {
            return Ok(());
        }
        let body = &self.source[SIGNATURE.len()..];
        let max_depth = depth.unwrap_or(usize::MAX);

        for header in BoxWalker::with_budget(body, Self::DEFAULT_BOX_BUDGET) {
            let Ok(header) = header else { break };
            writeln!(
                out,
                "{} ({} bytes)",
                header.type_str(),
                header.total_len()
            )?;

            if &header.box_type == b"jp2h" && recurse && max_depth > 0 {
                let payload = &body[header.payload.clone()];
                for sub in BoxWalker::new(payload) {
                    let Ok(sub) = sub else { break };
                    writeln!(out, "  {} ({} bytes)", sub.type_str(), sub.total_len())?;
                }
            }

            if &header.box_type == b"uuid" && annotate_iptc_erase {
                let payload = &body[header.payload.clone()];
                if let Some((id, _)) = split_identifier(payload) {
                    if classify(id) == UuidKind::Iptc {
                        writeln!(out, "  (IPTC UUID, dropped on next write)")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Builds the embedded 219-byte blank JP2 template: signature, empty `ftyp`
/// (brand `jp2 `, minor version 0, one compatibility entry `jp2 `), a minimal
/// `jp2h` holding a 1x1 `ihdr` and the placeholder `colr`, and a `jp2c` box
/// (`length == 0`, extending to EOF) wrapping a bare SOC marker as an opaque
/// stand-in codestream.
fn blank_template() -> Vec<u8> {
    let mut out = Vec::with_capacity(219);
    out.extend_from_slice(&SIGNATURE);

    // ftyp: brand "jp2 ", minor version 0, one compatibility entry "jp2 ".
    let ftyp_payload: [u8; 12] = *b"jp2 \x00\x00\x00\x00jp2 ";
    out.extend_from_slice(&((8 + ftyp_payload.len()) as u32).to_be_bytes());
    out.extend_from_slice(b"ftyp");
    out.extend_from_slice(&ftyp_payload);

    // jp2h: ihdr (1x1, 8-bit, unknown colourspace) + placeholder colr.
    let ihdr_payload: [u8; 14] = [
        0x00, 0x00, 0x00, 0x01, // height = 1
        0x00, 0x00, 0x00, 0x01, // width = 1
        0x00, 0x01, // num_components = 1
        0x07, // bpc = 8-bit (encoded as bpc - 1)
        0x07, // compression type = 7 (wavelet)
        0x01, // unknown colourspace
        0x00, // IPR = 0
    ];
    let mut jp2h_body = Vec::new();
    jp2h_body.extend_from_slice(&((8 + ihdr_payload.len()) as u32).to_be_bytes());
    jp2h_body.extend_from_slice(b"ihdr");
    jp2h_body.extend_from_slice(&ihdr_payload);
    jp2h_body.extend_from_slice(&((8 + PLACEHOLDER_COLR.len()) as u32).to_be_bytes());
    jp2h_body.extend_from_slice(b"colr");
    jp2h_body.extend_from_slice(&PLACEHOLDER_COLR);

    out.extend_from_slice(&((8 + jp2h_body.len()) as u32).to_be_bytes());
    out.extend_from_slice(b"jp2h");
    out.extend_from_slice(&jp2h_body);

    // jp2c: length == 0 (extends to EOF), padded with a bare SOC marker and
    // filler so the template totals exactly 219 bytes.
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(b"jp2c");
    out.extend_from_slice(&[0xFF, 0x4F]); // SOC marker
    let target_len = 219;
    if out.len() < target_len {
        out.resize(target_len, 0);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use exiftool_attrs::AttrValue;

    #[test]
    fn blank_template_is_219_bytes() {
        assert_eq!(blank_template().len(), 219);
    }

    #[test]
    fn new_image_is_1x1_with_empty_metadata() {
        let image = Jp2Image::new();
        assert_eq!(image.pixel_width, 1);
        assert_eq!(image.pixel_height, 1);
        assert!(image.exif.is_empty());
        assert!(image.iptc.is_empty());
        assert!(image.xmp.is_empty());
        assert!(image.icc_profile.is_none());
    }

    #[test]
    fn round_trips_an_exif_tag() {
        let mut image = Jp2Image::new();
        image.exif.set("IFD0:Artist", AttrValue::Str("Alice".to_string()));

        let written = image.write_metadata().unwrap();
        let mut reread = Jp2Image::from_bytes(written.clone());
        reread.read_metadata().unwrap();

        assert_eq!(reread.exif.get_str("IFD0:Artist"), Some("Alice"));

        let body = &written[SIGNATURE.len()..];
        let boxes: Vec<_> = BoxWalker::new(body).collect::<Result<_>>().unwrap();
        let uuid_count = boxes.iter().filter(|b| &b.box_type == b"uuid").count();
        assert_eq!(uuid_count, 1);
    }

    #[test]
    fn write_metadata_strips_metadata_when_all_empty() {
        let image = Jp2Image::new();
        let written = image.write_metadata().unwrap();
        let body = &written[SIGNATURE.len()..];
        let boxes: Vec<_> = BoxWalker::new(body).collect::<Result<_>>().unwrap();
        assert!(!boxes.iter().any(|b| &b.box_type == b"uuid"));
    }

    #[test]
    fn write_metadata_is_idempotent() {
        let mut image = Jp2Image::new();
        image.exif.set("IFD0:Make", AttrValue::Str("Acme".to_string()));
        let first = image.write_metadata().unwrap();
        let second = image.write_metadata().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn set_comment_is_unsupported() {
        let mut image = Jp2Image::new();
        assert!(matches!(
            image.set_comment("hello"),
            Err(Error::InvalidSettingForImage(_))
        ));
    }

    #[test]
    fn icc_profile_round_trips() {
        let mut image = Jp2Image::new();
        image.icc_profile = Some(vec![1, 2, 3, 4]);
        let written = image.write_metadata().unwrap();
        let mut reread = Jp2Image::from_bytes(written);
        reread.read_metadata().unwrap();
        assert_eq!(reread.icc_profile, Some(vec![1, 2, 3, 4]));
    }
}
