//! UUID dispatcher.
//!
//! Classifies a `uuid` box's 16-byte identifier as Exif, IPTC or XMP, and the
//! small amount of payload massaging each metadata kind needs once split from
//! its identifier.

/// `JpgTiffExif->JP2` in ASCII.
pub const EXIF_UUID: [u8; 16] = *b"JpgTiffExif->JP2";

pub const IPTC_UUID: [u8; 16] = [
    0x33, 0xC7, 0xA4, 0xD2, 0xB8, 0x1D, 0x47, 0x23, 0xA0, 0xBA, 0xF1, 0xA3, 0xE0, 0x97, 0xAD, 0x38,
];

pub const XMP_UUID: [u8; 16] = [
    0xBE, 0x7A, 0xCF, 0xCB, 0x97, 0xA9, 0x42, 0xE8, 0x9C, 0x71, 0x99, 0x94, 0x91, 0xE3, 0xAF, 0xAC,
];

/// The stray marker some producers prepend before a TIFF stream inside an Exif UUID.
const EXIF_MARKER: [u8; 6] = [0x45, 0x78, 0x69, 0x66, 0x00, 0x00];

/// What an identified `uuid` box payload (past the 16-byte identifier) contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UuidKind {
    Exif,
    Iptc,
    Xmp,
    Unknown,
}

/// Classifies a 16-byte UUID identifier.
pub fn classify(identifier: &[u8; 16]) -> UuidKind {
    if *identifier == EXIF_UUID {
        UuidKind::Exif
    } else if *identifier == IPTC_UUID {
        UuidKind::Iptc
    } else if *identifier == XMP_UUID {
        UuidKind::Xmp
    } else {
        UuidKind::Unknown
    }
}

/// Splits a `uuid` box payload into its 16-byte identifier and trailing bytes.
/// Returns `None` if the payload is too short to hold an identifier.
pub fn split_identifier(payload: &[u8]) -> Option<(&[u8; 16], &[u8])> {
    if payload.len() < 16 {
        return None;
    }
    let (id, rest) = payload.split_at(16);
    Some((id.try_into().unwrap(), rest))
}

/// Locates the start of the TIFF stream inside an Exif UUID payload.
///
/// Valid TIFF data starts with `II` or `MM` at position 0. Failing that, this looks
/// for a stray `"Exif\0\0"` marker and returns the offset just past it. Returns
/// `None` if neither is found, signalling the caller should discard the payload.
pub fn find_exif_tiff_start(payload: &[u8]) -> Option<usize> {
    if payload.len() >= 2 && (&payload[0..2] == b"II" || &payload[0..2] == b"MM") {
        return Some(0);
    }
    if payload.len() >= EXIF_MARKER.len() {
        for i in 0..=(payload.len() - EXIF_MARKER.len()) {
            if payload[i..i + EXIF_MARKER.len()] == EXIF_MARKER {
                return Some(i + EXIF_MARKER.len());
            }
        }
    }
    None
}

/// Strips any bytes preceding the first `<` in an XMP packet.
///
/// Returns the (possibly unchanged) slice and how many leading bytes, if any, were
/// stripped, so the caller can emit a warning when `k > 0`.
pub fn strip_xmp_preamble(payload: &[u8]) -> (&[u8], usize) {
    match payload.iter().position(|&b| b == b'<') {
        Some(0) | None => (payload, 0),
        Some(k) => (&payload[k..], k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_identifiers() {
        assert_eq!(classify(&EXIF_UUID), UuidKind::Exif);
        assert_eq!(classify(&IPTC_UUID), UuidKind::Iptc);
        assert_eq!(classify(&XMP_UUID), UuidKind::Xmp);
        assert_eq!(classify(&[0u8; 16]), UuidKind::Unknown);
    }

    #[test]
    fn finds_plain_tiff_start() {
        let payload = b"II*\x00rest";
        assert_eq!(find_exif_tiff_start(payload), Some(0));
    }

    #[test]
    fn finds_tiff_after_stray_marker() {
        let mut payload = vec![0xAA, 0xBB];
        payload.extend_from_slice(&EXIF_MARKER);
        payload.extend_from_slice(b"MM\x00\x2a");
        let start = find_exif_tiff_start(&payload).unwrap();
        assert_eq!(&payload[start..start + 2], b"MM");
    }

    #[test]
    fn no_marker_found() {
        assert_eq!(find_exif_tiff_start(b"garbage data"), None);
    }

    #[test]
    fn strips_xmp_preamble() {
        let (stripped, k) = strip_xmp_preamble(b"junk<?xpacket?>");
        assert_eq!(k, 4);
        assert_eq!(stripped, b"<?xpacket?>");

        let (stripped, k) = strip_xmp_preamble(b"<?xpacket?>");
        assert_eq!(k, 0);
        assert_eq!(stripped, b"<?xpacket?>");
    }
}
