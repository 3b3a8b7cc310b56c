//! JP2-header re-encoder.
//!
//! Rebuilds a `jp2h` super-box from its original sub-boxes, replacing the first
//! `colr` sub-box with one carrying either the placeholder "unknown colourspace"
//! bytes or a fresh ICC profile.

use crate::boxes::BoxWalker;
use crate::byte_order::write_u32_be;
use crate::error::Result;

/// The literal placeholder `colr` payload written when no ICC profile is held:
/// pad `01 00 00 00 00 00 10 00 00` followed by bytes `05 1c` and ASCII `uuid`.
/// Not a standards-conforming enumerated colourspace. Never reconstructed from
/// parts.
pub const PLACEHOLDER_COLR: [u8; 15] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x05, 0x1c, b'u', b'u', b'i', b'd',
];

fn write_box(out: &mut Vec<u8>, box_type: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
    out.extend_from_slice(box_type);
    out.extend_from_slice(payload);
}

/// Rebuilds a `jp2h` box (header included) from the original payload, replacing
/// the first `colr` sub-box found.
///
/// Sub-boxes preceding the first `colr` are copied verbatim. The first `colr` is
/// replaced with [`PLACEHOLDER_COLR`] (no ICC profile held) or a `02 00 00` pad
/// followed by the raw ICC bytes. Sub-boxes *after* the first `colr` are dropped
/// -- a deliberate quirk, not a bug to fix; encoding stops as soon as the
/// replacement `colr` is appended.
pub fn encode_jp2_header(original_payload: &[u8], icc_profile: Option<&[u8]>) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    for header in BoxWalker::new(original_payload) {
        let header = header?;
        let sub_payload = &original_payload[header.payload.clone()];

        if &header.box_type == b"colr" {
            match icc_profile {
                Some(icc) if !icc.is_empty() => {
                    let mut payload = Vec::with_capacity(3 + icc.len());
                    payload.extend_from_slice(&[0x02, 0x00, 0x00]);
                    payload.extend_from_slice(icc);
                    write_box(&mut body, b"colr", &payload);
                }
                _ => {
                    write_box(&mut body, b"colr", &PLACEHOLDER_COLR);
                }
            }
            break;
        }

        write_box(&mut body, &header.box_type, sub_payload);
    }

    let mut out = Vec::with_capacity(8 + body.len());
    out.extend_from_slice(&[0, 0, 0, 0]);
    out.extend_from_slice(b"jp2h");
    out.extend_from_slice(&body);
    let total_len = out.len() as u32;
    write_u32_be(&mut out, 0, total_len)?;
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

    fn make_colr(icc: &[u8]) -> Vec<u8> {
        let mut payload = vec![2, 0, 0];
        payload.extend_from_slice(&(icc.len() as u32).to_be_bytes());
        payload.extend_from_slice(icc);
        make_box(b"colr", &payload)
    }

    #[test]
    fn replaces_colr_with_placeholder_when_no_icc() {
        let mut ihdr_payload = vec![0u8; 14];
        ihdr_payload[3] = 1; // height = 1
        ihdr_payload[7] = 1; // width = 1
        let mut payload = make_box(b"ihdr", &ihdr_payload);
        payload.extend(make_colr(&[0xAA, 0xBB]));

        let out = encode_jp2_header(&payload, None).unwrap();
        assert_eq!(&out[4..8], b"jp2h");

        let boxes: Vec<_> = BoxWalker::new(&out[8..]).collect::<Result<_>>().unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(&boxes[0].box_type, b"ihdr");
        assert_eq!(&boxes[1].box_type, b"colr");
        let colr_payload = &out[8..][boxes[1].payload.clone()];
        assert_eq!(colr_payload, &PLACEHOLDER_COLR[..]);
    }

    #[test]
    fn replaces_colr_with_icc_profile() {
        let payload = make_colr(&[0xAA]);
        let icc = vec![1, 2, 3, 4, 5];
        let out = encode_jp2_header(&payload, Some(&icc)).unwrap();

        let boxes: Vec<_> = BoxWalker::new(&out[8..]).collect::<Result<_>>().unwrap();
        assert_eq!(boxes.len(), 1);
        let colr_payload = &out[8..][boxes[0].payload.clone()];
        assert_eq!(&colr_payload[0..3], &[0x02, 0x00, 0x00]);
        assert_eq!(&colr_payload[3..], &icc[..]);
    }

    #[test]
    fn drops_sub_boxes_after_first_colr() {
        let mut payload = make_colr(&[]);
        payload.extend(make_box(b"res ", b"trailing"));
        let out = encode_jp2_header(&payload, None).unwrap();

        let boxes: Vec<_> = BoxWalker::new(&out[8..]).collect::<Result<_>>().unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(&boxes[0].box_type, b"colr");
    }

    #[test]
    fn copies_sub_boxes_verbatim_when_no_colr_present() {
        let payload = make_box(b"ihdr", &[0u8; 14]);
        let out = encode_jp2_header(&payload, None).unwrap();
        let boxes: Vec<_> = BoxWalker::new(&out[8..]).collect::<Result<_>>().unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(&boxes[0].box_type, b"ihdr");
    }
}
