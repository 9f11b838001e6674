/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A RADIANCE HDR decoder and encoder
//!
//!
//! # Features
//! - Minimal interface, few dependencies
//! - No unsafe
//! - `no_std` with `alloc`
//! - Fuzz tested decoder
//!
//! # Usage notes
//! The decoder returns packed RGBE bytes, three mantissas and one shared exponent per pixel.
//! [`HdrDecoder::decode_rgba`] or [`rgbe_to_rgba`] turn that into linear floats,
//! [`rgba_to_rgbe`] goes the other way before handing data to the [`HdrEncoder`].
//!
//! Both run length encodings found in the wild are understood by the decoder,
//! the encoder writes the adaptive one for widths between 8 and 32767 and raw pixels
//! otherwise.
//!
//! # Metadata
//! - Radiance images usually store metadata in key value pairs.
//!
//! During decoding, we extract this metadata from the headers into a map available
//! via [`HdrDecoder::header`], the decoder does not in any way interpret the metadata to understand
//! the image characteristics or colorspace, it is the caller's work to do that.
//!
//! # Crate features
//! - `std`: Implement byte sources and sinks for `BufRead` and `Write`, enabled by default
//! - `log`: Forward decoder tracing to the `log` crate
//! - `serde`: Serialize [`HdrHeader`]
//!
//! # Example
//! ```
//! use radiance_hdr::radiance_core::bytestream::ByteCursor;
//! use radiance_hdr::radiance_core::options::EncoderOptions;
//! use radiance_hdr::{rgba_to_rgbe, HdrDecoder, HdrEncoder, HdrHeader};
//!
//! let (w, h) = (16, 2);
//! let rgba = vec![0.5_f32; w * h * 4];
//! let mut rgbe = vec![0_u8; w * h * 4];
//! rgba_to_rgbe(&rgba, &mut rgbe, w, h);
//!
//! let header = HdrHeader::default();
//! let mut file = Vec::new();
//! HdrEncoder::new(&rgbe, EncoderOptions::new(w, h), &header)
//!     .encode(&mut file)
//!     .unwrap();
//!
//! let mut decoder = HdrDecoder::new(ByteCursor::new(file));
//! assert_eq!(decoder.decode().unwrap(), rgbe);
//! assert_eq!(decoder.dimensions(), Some((w, h)));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;
extern crate core;
pub extern crate radiance_core;

pub use convert::{rgba_to_rgbe, rgba_to_rgbe_pixel, rgbe_to_rgba, rgbe_to_rgba_pixel};
pub use decoder::HdrDecoder;
pub use encoder::HdrEncoder;
pub use errors::{HdrDecodeErrors, HdrEncodeErrors};
pub use header::{HdrHeader, ProgramType};

mod convert;
mod decoder;
mod encoder;
mod errors;
mod header;
mod serde;

/// Scanlines narrower than this are never run length encoded
pub(crate) const MIN_SCANLINE_LENGTH: usize = 8;
/// Scanlines wider than this are never run length encoded
pub(crate) const MAX_SCANLINE_LENGTH: usize = 0x7fff;
