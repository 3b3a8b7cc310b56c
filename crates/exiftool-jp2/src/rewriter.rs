//! File rewriter.
//!
//! Reads the whole file into memory, walks it box by box, rebuilds the
//! `jp2h` super-box and injects fresh Exif/IPTC/XMP UUID boxes right after
//! it, drops any stale metadata UUID boxes, and copies everything else
//! verbatim.

use crate::boxes::{BoxWalker, DEFAULT_BOX_BUDGET};
use crate::error::{Error, Result};
use crate::jp2h::encode_jp2_header;
use crate::uuid::{classify, split_identifier, UuidKind, EXIF_UUID, IPTC_UUID, XMP_UUID};

/// The fixed 12-byte JP2 signature prefix.
pub const SIGNATURE: [u8; 12] = [0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A];

/// Fresh payloads to embed, keyed by which metadata collection produced them.
/// Each is `None` when the corresponding collection was empty at write time (and
/// so no UUID box is emitted for it), per Testable Property 5.
#[derive(Default)]
pub struct FreshPayloads<'a> {
    pub exif: Option<&'a [u8]>,
    pub iptc: Option<&'a [u8]>,
    pub xmp: Option<&'a [u8]>,
    pub icc: Option<&'a [u8]>,
}

fn write_explicit_box(out: &mut Vec<u8>, box_type: &[u8; 4], payload: &[u8]) -> Result<()> {
    let total_len: u32 = (8usize + payload.len())
        .try_into()
        .map_err(|_| Error::ImageWriteFailed("box too large to encode".to_string()))?;
    out.extend_from_slice(&total_len.to_be_bytes());
    out.extend_from_slice(box_type);
    out.extend_from_slice(payload);
    Ok(())
}

fn write_uuid_box(out: &mut Vec<u8>, id: &[u8; 16], payload: &[u8]) -> Result<()> {
    let mut body = Vec::with_capacity(16 + payload.len());
    body.extend_from_slice(id);
    body.extend_from_slice(payload);
    write_explicit_box(out, b"uuid", &body)
}

/// Rewrites a JP2 byte stream, replacing metadata UUID boxes and the `jp2h`
/// colour specification with the given fresh payloads.
///
/// `input` must begin with the 12-byte JP2 [`SIGNATURE`]; otherwise this fails
/// with [`Error::NoImageInInputData`]. Boxes are walked with `budget` (shared
/// with the read-side walker by convention).
pub fn rewrite(input: &[u8], fresh: &FreshPayloads, budget: usize) -> Result<Vec<u8>> {
    if input.len() < SIGNATURE.len() || input[..SIGNATURE.len()] != SIGNATURE {
        return Err(Error::NoImageInInputData);
    }

    let mut out = Vec::with_capacity(input.len());
    out.extend_from_slice(&SIGNATURE);

    let body = &input[SIGNATURE.len()..];
    let mut wrote_jp2h = false;

    for header in BoxWalker::with_budget(body, budget) {
        let header = header?;
        let payload = &body[header.payload.clone()];

        if &header.box_type == b"jp2h" {
            let rebuilt = encode_jp2_header(payload, fresh.icc)?;
            out.extend_from_slice(&rebuilt);
            wrote_jp2h = true;

            if let Some(exif) = fresh.exif.filter(|p| !p.is_empty()) {
                write_uuid_box(&mut out, &EXIF_UUID, exif)?;
            }
            if let Some(iptc) = fresh.iptc.filter(|p| !p.is_empty()) {
                write_uuid_box(&mut out, &IPTC_UUID, iptc)?;
            }
            if let Some(xmp) = fresh.xmp.filter(|p| !p.is_empty()) {
                write_uuid_box(&mut out, &XMP_UUID, xmp)?;
            }
            continue;
        }

        if &header.box_type == b"uuid" {
            if let Some((id, _rest)) = split_identifier(payload) {
                if !matches!(classify(id), UuidKind::Unknown) {
                    continue; // drop known metadata UUIDs; replacements were written after jp2h
                }
            }
            write_explicit_box(&mut out, &header.box_type, payload)?;
            continue;
        }

        write_explicit_box(&mut out, &header.box_type, payload)?;
    }

    if !wrote_jp2h {
        return Err(Error::CorruptedMetadata(
            "input has no jp2h box to rewrite".to_string(),
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_box(box_type: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
        out.extend_from_slice(box_type);
        out.extend_from_slice(payload);
        out
    }

    fn minimal_input() -> Vec<u8> {
        let mut data = SIGNATURE.to_vec();
        data.extend(make_box(b"ftyp", b"jp2 \x00\x00\x00\x00jp2 "));
        let jp2h_payload = make_box(b"ihdr", &[0u8; 14]);
        data.extend(make_box(b"jp2h", &jp2h_payload));
        data.extend(make_box(b"jp2c", b"codestream-bytes"));
        data
    }

    #[test]
    fn rejects_missing_signature() {
        let fresh = FreshPayloads::default();
        assert!(matches!(
            rewrite(b"not a jp2 file at all!!", &fresh, DEFAULT_BOX_BUDGET),
            Err(Error::NoImageInInputData)
        ));
    }

    #[test]
    fn strips_metadata_when_all_empty() {
        let mut data = minimal_input();
        let mut iptc_uuid_box = Vec::new();
        iptc_uuid_box.extend_from_slice(&IPTC_UUID);
        iptc_uuid_box.extend_from_slice(b"old-iptc-data");
        data.extend(make_box(b"uuid", &iptc_uuid_box));

        let fresh = FreshPayloads::default();
        let out = rewrite(&data, &fresh, DEFAULT_BOX_BUDGET).unwrap();

        let body = &out[SIGNATURE.len()..];
        let boxes: Vec<_> = BoxWalker::new(body).collect::<Result<_>>().unwrap();
        assert!(!boxes.iter().any(|b| &b.box_type == b"uuid"));
    }

    #[test]
    fn injects_fresh_uuid_boxes_after_jp2h() {
        let data = minimal_input();
        let fresh = FreshPayloads {
            exif: Some(b"exif-bytes"),
            iptc: Some(b"iptc-bytes"),
            xmp: Some(b"xmp-bytes"),
            icc: None,
        };
        let out = rewrite(&data, &fresh, DEFAULT_BOX_BUDGET).unwrap();
        let body = &out[SIGNATURE.len()..];
        let boxes: Vec<_> = BoxWalker::new(body).collect::<Result<_>>().unwrap();

        let types: Vec<_> = boxes.iter().map(|b| b.box_type).collect();
        let jp2h_pos = types.iter().position(|t| t == b"jp2h").unwrap();
        assert_eq!(&types[jp2h_pos + 1], b"uuid");
        assert_eq!(&types[jp2h_pos + 2], b"uuid");
        assert_eq!(&types[jp2h_pos + 3], b"uuid");

        let uuid_count = types.iter().filter(|t| **t == *b"uuid").count();
        assert_eq!(uuid_count, 3);
    }

    #[test]
    fn length_zero_input_box_is_rewritten_explicit() {
        let mut data = SIGNATURE.to_vec();
        let jp2h_payload = make_box(b"ihdr", &[0u8; 14]);
        data.extend(make_box(b"jp2h", &jp2h_payload));
        // Tail box with length == 0, extending to EOF.
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(b"jp2c");
        data.extend_from_slice(b"tail-codestream");

        let fresh = FreshPayloads::default();
        let out = rewrite(&data, &fresh, DEFAULT_BOX_BUDGET).unwrap();
        let body = &out[SIGNATURE.len()..];
        let boxes: Vec<_> = BoxWalker::new(body).collect::<Result<_>>().unwrap();
        let jp2c = boxes.iter().find(|b| &b.box_type == b"jp2c").unwrap();
        assert!(jp2c.total_len() > 0);
        assert_eq!(&body[jp2c.payload.clone()], b"tail-codestream");
    }
}
