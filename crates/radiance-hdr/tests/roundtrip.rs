/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;
use std::io::{BufReader, Cursor};

use nanorand::Rng;
use radiance_hdr::radiance_core::bytestream::ByteCursor;
use radiance_hdr::radiance_core::options::{EncoderOptions, MAX_DIMENSION};
use radiance_hdr::{rgba_to_rgbe, HdrDecodeErrors, HdrDecoder, HdrEncoder, HdrHeader};

fn random_rgbe(rand: &mut nanorand::WyRand, width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0_u8; width * height * 4];
    // mix runs and noise so both run and literal codes show up
    let mut value = 0;
    for byte in data.iter_mut() {
        if rand.generate_range(0_u8..4) == 0 {
            value = rand.generate::<u8>();
        }
        *byte = value;
    }
    data
}

fn encode(data: &[u8], width: usize, height: usize, header: &HdrHeader) -> Vec<u8> {
    let mut out = Vec::new();
    HdrEncoder::new(data, EncoderOptions::new(width, height), header)
        .encode(&mut out)
        .unwrap();
    out
}

#[test]
fn rle_widths_are_lossless() {
    let mut rand = nanorand::WyRand::new_seed(7);
    let header = HdrHeader::default();

    for (width, height) in [(8, 1), (9, 3), (100, 5), (300, 2), (1000, 1)] {
        let data = random_rgbe(&mut rand, width, height);
        let file = encode(&data, width, height, &header);

        let mut decoder = HdrDecoder::new(ByteCursor::new(&file));
        assert_eq!(decoder.decode().unwrap(), data, "width {width}");
        assert_eq!(decoder.dimensions(), Some((width, height)));
    }
}

#[test]
fn raw_widths_are_lossless() {
    let header = HdrHeader::default();
    let width = 7;
    let height = 3;
    // raw rows must not look like run markers
    let data: Vec<u8> = (0..width * height * 4).map(|x| (x % 200) as u8 + 2).collect();

    let file = encode(&data, width, height, &header);
    assert_eq!(
        HdrDecoder::new(ByteCursor::new(&file)).decode().unwrap(),
        data
    );
}

#[test]
fn uniform_image_compresses() {
    let (width, height) = (256, 16);
    let data = [9_u8, 8, 7, 130].repeat(width * height);
    let file = encode(&data, width, height, &HdrHeader::default());

    assert!(file.len() < data.len() / 10);
    assert_eq!(
        HdrDecoder::new(ByteCursor::new(&file)).decode().unwrap(),
        data
    );
}

#[test]
fn header_survives_round_trip() {
    let header = HdrHeader {
        comment: String::from("first line\nsecond line"),
        format: String::from("32-bit_rle_xyze"),
        ..HdrHeader::default()
    };
    let mut extra = BTreeMap::new();
    extra.insert(String::from("EXPOSURE"), String::from("1.5"));
    extra.insert(String::from("SOFTWARE"), String::from("radiance-hdr"));

    let data = vec![0_u8; 8 * 4];
    let mut encoder = HdrEncoder::new(&data, EncoderOptions::new(8, 1), &header);
    encoder.add_headers(&extra);
    let mut file = Vec::new();
    encoder.encode(&mut file).unwrap();

    let mut decoder = HdrDecoder::new(ByteCursor::new(&file));
    decoder.decode_headers().unwrap();
    let decoded = decoder.header().unwrap();

    assert_eq!(decoded.comment, header.comment);
    assert_eq!(decoded.metadata["FORMAT"], "32-bit_rle_xyze");
    assert_eq!(decoded.metadata["EXPOSURE"], "1.5");
    assert_eq!(decoded.metadata["SOFTWARE"], "radiance-hdr");
}

#[test]
fn floats_round_trip_through_a_file() {
    let (width, height) = (12, 4);
    let mut rand = nanorand::WyRand::new_seed(99);
    let rgba: Vec<f32> = (0..width * height * 4)
        .map(|_| rand.generate::<f32>() * 100.0)
        .collect();

    let mut rgbe = vec![0; rgba.len()];
    rgba_to_rgbe(&rgba, &mut rgbe, width, height);
    let file = encode(&rgbe, width, height, &HdrHeader::default());

    let decoded = HdrDecoder::new(ByteCursor::new(&file))
        .decode_rgba()
        .unwrap();

    for (input, output) in rgba.chunks_exact(4).zip(decoded.chunks_exact(4)) {
        let v = input[0].max(input[1]).max(input[2]);
        for c in 0..3 {
            assert!((input[c] - output[c]).abs() <= 2.0 * v / 255.0 + 1e-30);
        }
        assert_eq!(output[3], 1.0);
    }
}

#[test]
fn decodes_from_buf_read() {
    let mut rand = nanorand::WyRand::new_seed(3);
    let data = random_rgbe(&mut rand, 40, 6);
    let file = encode(&data, 40, 6, &HdrHeader::default());

    // a tiny buffer makes peeking the scanline marker cross refills
    let reader = BufReader::with_capacity(3, Cursor::new(file));
    assert_eq!(HdrDecoder::new(reader).decode().unwrap(), data);
}

#[test]
fn encodes_into_std_writer() {
    let data = vec![1_u8; 16 * 4];
    let mut sink = Cursor::new(Vec::new());

    let size = HdrEncoder::new(&data, EncoderOptions::new(16, 1), &HdrHeader::default())
        .encode(&mut sink)
        .unwrap();

    assert_eq!(size, sink.get_ref().len());
}

#[test]
fn tallest_decodable_image() {
    let header = HdrHeader::default();
    let pixel = [5_u8, 6, 7, 128];

    let data = pixel.repeat(MAX_DIMENSION);
    let file = encode(&data, 1, MAX_DIMENSION, &header);
    assert_eq!(
        HdrDecoder::new(ByteCursor::new(&file)).decode().unwrap(),
        data
    );

    // the encoder does not limit height, the decoder does
    let data = pixel.repeat(MAX_DIMENSION + 1);
    let file = encode(&data, 1, MAX_DIMENSION + 1, &header);
    let err = HdrDecoder::new(ByteCursor::new(&file)).decode().unwrap_err();

    assert!(matches!(
        err,
        HdrDecodeErrors::InvalidDimensions("height", 16384, 16385)
    ));
}
