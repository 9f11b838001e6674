#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use radiance_hdr::radiance_core::bytestream::ByteCursor;
    let data = ByteCursor::new(data);
    let mut decoder = radiance_hdr::HdrDecoder::new(data);
    let _ = decoder.decode();
});
