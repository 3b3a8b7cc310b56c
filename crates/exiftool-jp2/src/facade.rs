//! Metadata decode/encode façade.
//!
//! Thin wrappers over `exiftool-core`, `exiftool-iptc` and `exiftool-xmp` that
//! turn their typed readers/writers into the raw byte payloads a JP2 Exif,
//! IPTC and XMP UUID box carries. A JP2 Exif UUID is a bare TIFF stream
//! rather than a JPEG APP1 segment, so both IFD0 and the GPS IFD are read
//! and written here.

use exiftool_attrs::{AttrValue, Attrs};
use exiftool_core::{ByteOrder, ExifWriter, IfdEntry, RawValue, WriteEntry};
use exiftool_iptc::{IptcParser, IptcWriter};
use exiftool_tags::generated::exif::EXIF_MAIN;
use exiftool_tags::generated::gps::GPS_MAIN;
use exiftool_xmp::{XmpParser, XmpWriter};

use crate::error::Result;

const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_GPS_IFD_POINTER: u16 = 0x8825;

fn lookup_ifd0(tag: u16) -> Option<&'static str> {
    match tag {
        TAG_EXIF_IFD_POINTER => Some("ExifOffset"),
        TAG_GPS_IFD_POINTER => Some("GPSInfo"),
        0x014A => Some("SubIFDs"),
        0xA005 => Some("InteropOffset"),
        _ => EXIF_MAIN.get(&tag).map(|def| def.name),
    }
}

fn lookup_gps(tag: u16) -> Option<&'static str> {
    GPS_MAIN.get(&tag).map(|def| def.name)
}

fn reverse_lookup_exif(name: &str) -> Option<u16> {
    EXIF_MAIN
        .entries()
        .find(|(_, def)| def.name == name)
        .map(|(tag, _)| *tag)
}

fn reverse_lookup_gps(name: &str) -> Option<u16> {
    GPS_MAIN
        .entries()
        .find(|(_, def)| def.name == name)
        .map(|(tag, _)| *tag)
}

fn entry_to_attr(entry: &IfdEntry) -> AttrValue {
    match &entry.value {
        RawValue::String(s) => AttrValue::Str(s.clone()),
        RawValue::UInt8(v) if v.len() == 1 => AttrValue::UInt(v[0] as u32),
        RawValue::UInt16(v) if v.len() == 1 => AttrValue::UInt(v[0] as u32),
        RawValue::UInt32(v) if v.len() == 1 => AttrValue::UInt(v[0]),
        RawValue::Int8(v) if v.len() == 1 => AttrValue::Int(v[0] as i32),
        RawValue::Int16(v) if v.len() == 1 => AttrValue::Int(v[0] as i32),
        RawValue::Int32(v) if v.len() == 1 => AttrValue::Int(v[0]),
        RawValue::URational(v) if v.len() == 1 => AttrValue::URational(v[0].num, v[0].den),
        RawValue::SRational(v) if v.len() == 1 => AttrValue::Rational(v[0].num, v[0].den),
        RawValue::Float(v) if v.len() == 1 => AttrValue::Float(v[0]),
        RawValue::Double(v) if v.len() == 1 => AttrValue::Double(v[0]),
        RawValue::Undefined(v) => AttrValue::Bytes(v.clone()),
        _ => AttrValue::Str(entry.value.to_string()),
    }
}

/// Decodes a standalone TIFF/Exif stream (the payload of an Exif `uuid` box, past
/// the stray-marker handling already applied by [`crate::uuid::find_exif_tiff_start`]).
pub fn exif_decode(tiff: &[u8]) -> Result<Attrs> {
    let mut attrs = Attrs::new();
    if tiff.len() < 2 {
        return Ok(attrs);
    }
    let byte_order = ByteOrder::from_marker([tiff[0], tiff[1]])?;
    let reader = exiftool_core::IfdReader::new(tiff, byte_order);
    let ifd0_offset = reader.parse_header()?;

    let (entries, next_ifd) = reader.read_ifd(ifd0_offset)?;
    for entry in &entries {
        if entry.tag == TAG_EXIF_IFD_POINTER {
            if let Some(offset) = entry.value.as_u32() {
                if let Ok((exif_entries, _)) = reader.read_ifd(offset) {
                    for e in &exif_entries {
                        if let Some(name) = EXIF_MAIN.get(&e.tag).map(|def| def.name) {
                            attrs.set(format!("ExifIFD:{name}"), entry_to_attr(e));
                        }
                    }
                }
            }
            continue;
        }
        if entry.tag == TAG_GPS_IFD_POINTER {
            if let Some(offset) = entry.value.as_u32() {
                if let Ok((gps_entries, _)) = reader.read_ifd(offset) {
                    for e in &gps_entries {
                        if let Some(name) = lookup_gps(e.tag) {
                            attrs.set(format!("GPS:{name}"), entry_to_attr(e));
                        }
                    }
                }
            }
            continue;
        }
        if let Some(name) = lookup_ifd0(entry.tag) {
            attrs.set(format!("IFD0:{name}"), entry_to_attr(entry));
        }
    }

    if next_ifd != 0 {
        if let Ok((ifd1_entries, _)) = reader.read_ifd(next_ifd) {
            for e in &ifd1_entries {
                if let Some(name) = lookup_ifd0(e.tag) {
                    attrs.set(format!("IFD1:{name}"), entry_to_attr(e));
                }
            }
        }
    }

    Ok(attrs)
}

/// Encodes an `Attrs` collection back into a standalone little-endian TIFF/Exif
/// stream. Keys are expected to carry the `IFD0:`/`ExifIFD:`/`GPS:`/`IFD1:` group
/// prefixes [`exif_decode`] produces; ungrouped keys fall back to an IFD0 lookup.
pub fn exif_encode(attrs: &Attrs) -> Result<Vec<u8>> {
    let mut w = ExifWriter::new_le();

    for (key, value) in attrs.iter() {
        let (bucket, name) = match key.split_once(':') {
            Some(("IFD0", rest)) => ("IFD0", rest),
            Some(("ExifIFD", rest)) => ("ExifIFD", rest),
            Some(("GPS", rest)) => ("GPS", rest),
            Some(("IFD1", rest)) => ("IFD1", rest),
            _ => ("IFD0", key.as_str()),
        };

        let tag = match bucket {
            "GPS" => reverse_lookup_gps(name),
            _ => reverse_lookup_exif(name),
        };
        let Some(tag) = tag else { continue };

        let entry = match value {
            AttrValue::Str(s) => WriteEntry::from_str(tag, s),
            AttrValue::UInt(v) if *v <= u16::MAX as u32 => WriteEntry::from_u16(tag, *v as u16),
            AttrValue::UInt(v) => WriteEntry::from_u32(tag, *v),
            AttrValue::Int(v) => WriteEntry::from_u32(tag, *v as u32),
            AttrValue::URational(n, d) => WriteEntry::from_urational(tag, *n, *d),
            AttrValue::Rational(n, d) => WriteEntry::from_srational(tag, *n, *d),
            AttrValue::Bytes(b) => WriteEntry::from_bytes(tag, b),
            _ => continue,
        };

        match bucket {
            "ExifIFD" => w.add_exif(entry),
            "GPS" => w.add_gps(entry),
            "IFD1" => w.add_ifd1(entry),
            _ => w.add_ifd0(entry),
        }
    }

    Ok(w.serialize()?)
}

/// Decodes an IPTC IIM dataset stream.
pub fn iptc_decode(payload: &[u8]) -> Result<Attrs> {
    Ok(IptcParser::parse(payload)?)
}

/// Encodes an `Attrs` collection back into an IPTC IIM dataset stream.
pub fn iptc_encode(attrs: &Attrs) -> Result<Vec<u8>> {
    Ok(IptcWriter::write(attrs)?)
}

/// Parses an XMP packet string into an `Attrs` collection.
pub fn xmp_decode(packet: &str) -> Result<Attrs> {
    Ok(XmpParser::parse(packet)?)
}

/// Serializes an `Attrs` collection into a fresh XMP packet.
pub fn xmp_encode(attrs: &Attrs) -> Result<String> {
    Ok(XmpWriter::write(attrs)?)
}

/// Produces the XMP packet to embed on write: the caller's original raw packet
/// string when one was held, falling back to re-encoding from the datum collection
/// only when no raw packet survived the read.
pub fn write_xmp_from_packet(raw_packet: Option<&str>, attrs: &Attrs) -> Result<String> {
    match raw_packet {
        Some(packet) => Ok(packet.to_string()),
        None => xmp_encode(attrs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exif_round_trips_a_string_tag() {
        let mut attrs = Attrs::new();
        attrs.set("IFD0:Make", AttrValue::Str("Acme".to_string()));
        let bytes = exif_encode(&attrs).unwrap();
        let decoded = exif_decode(&bytes).unwrap();
        assert_eq!(decoded.get_str("IFD0:Make"), Some("Acme"));
    }

    #[test]
    fn write_xmp_from_packet_prefers_raw() {
        let attrs = Attrs::new();
        let out = write_xmp_from_packet(Some("<x:xmpmeta/>"), &attrs).unwrap();
        assert_eq!(out, "<x:xmpmeta/>");
    }
}
