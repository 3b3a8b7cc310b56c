#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the JP2 container reader with arbitrary data, backing Testable
    // Property 6 (bounds safety on <= 64 KiB inputs): read_metadata must
    // terminate with either success or a recognised error, never a panic.
    let mut image = exiftool_jp2::Jp2Image::from_bytes(data.to_vec());
    let _ = image.read_metadata();
});
