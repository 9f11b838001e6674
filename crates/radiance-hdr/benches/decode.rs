/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use nanorand::Rng;
use radiance_hdr::radiance_core::bytestream::ByteCursor;
use radiance_hdr::radiance_core::options::EncoderOptions;
use radiance_hdr::{rgba_to_rgbe, HdrDecoder, HdrEncoder, HdrHeader};

/// A smooth gradient with some noise, similar in compressibility to a sky probe
fn sample_image(width: usize, height: usize) -> Vec<u8> {
    let mut rand = nanorand::WyRand::new_seed(42);
    let mut rgba = vec![1.0_f32; width * height * 4];

    for (i, pixel) in rgba.chunks_exact_mut(4).enumerate() {
        let (x, y) = ((i % width) as f32, (i / width) as f32);
        pixel[0] = x / width as f32 * 8.0;
        pixel[1] = y / height as f32 * 2.0;
        pixel[2] = rand.generate::<f32>() * 0.01;
    }
    let mut rgbe = vec![0; rgba.len()];
    rgba_to_rgbe(&rgba, &mut rgbe, width, height);

    let header = HdrHeader::default();
    let mut file = Vec::new();
    HdrEncoder::new(&rgbe, EncoderOptions::new(width, height), &header)
        .encode(&mut file)
        .unwrap();
    file
}

fn decode_rgbe(data: &[u8]) -> Vec<u8> {
    HdrDecoder::new(ByteCursor::new(data)).decode().unwrap()
}

fn decode_rgba(data: &[u8]) -> Vec<f32> {
    HdrDecoder::new(ByteCursor::new(data)).decode_rgba().unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let data = sample_image(1024, 512);
    let mut group = c.benchmark_group("hdr: Simple decode (1024x512)");

    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("radiance-hdr/rgbe", |b| {
        b.iter(|| black_box(decode_rgbe(data.as_slice())))
    });

    group.bench_function("radiance-hdr/rgba", |b| {
        b.iter(|| black_box(decode_rgba(data.as_slice())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_decode);

criterion_main!(benches);
