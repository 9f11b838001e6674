/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! This module exposes the structs through which decoders and encoders
//! receive their configuration.
//!
//! Options are plain `Copy` values configured through builder style setters,
//! the same value can be reused for many images.
pub use decoder::{DecoderOptions, MAX_DIMENSION};
pub use encoder::EncoderOptions;

mod decoder;
mod encoder;
