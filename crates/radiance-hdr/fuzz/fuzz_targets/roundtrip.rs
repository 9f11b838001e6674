#![no_main]

use libfuzzer_sys::fuzz_target;
use radiance_hdr::radiance_core::bytestream::ByteCursor;
use radiance_hdr::radiance_core::options::{EncoderOptions, MAX_DIMENSION};
use radiance_hdr::{HdrDecoder, HdrEncoder, HdrHeader};

// width comes from the first byte, the rest are pixels
fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    let width = usize::from(data[0]).max(1);
    let pixels = &data[1..];
    // the decoder refuses anything taller, keep inputs decodable
    let height = (pixels.len() / (width * 4)).min(MAX_DIMENSION);

    if height == 0 {
        return;
    }
    let rgbe = &pixels[..width * height * 4];
    // legacy rows may not contain run markers
    if width < 8 && rgbe.chunks_exact(4).any(|x| x[..3] == [1, 1, 1]) {
        return;
    }
    let header = HdrHeader::default();
    let mut file = Vec::new();

    HdrEncoder::new(rgbe, EncoderOptions::new(width, height), &header)
        .encode(&mut file)
        .unwrap();

    let decoded = HdrDecoder::new(ByteCursor::new(file)).decode().unwrap();
    assert_eq!(decoded, rgbe);
});
