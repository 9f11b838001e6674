/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::convert::From;
use core::fmt::{Debug, Display, Formatter};

use radiance_core::bytestream::ByteIoError;

/// HDR decoding errors
pub enum HdrDecodeErrors {
    /// Magic bytes are not exactly `#?RADIANCE\n` or `#?RGBE\n`
    InvalidMagicBytes,
    /// The stream ended while reading the named header section
    UnexpectedEof(&'static str),
    /// The resolution line is not of the form `-Y <height> +X <width>`
    ResolutionParse(String),
    /// A dimension is zero or larger than allowed,
    /// contains the dimension, the maximum allowed and the value found
    InvalidDimensions(&'static str, usize, usize),
    /// The buffer provider declined to give us a buffer
    BufferAllocation,
    /// The output array is too small to contain the whole
    /// image, contains expected and found sizes
    TooSmallOutputArray(usize, usize),
    /// Scanline data is truncated or inconsistent
    Decompression(&'static str),
    /// The underlying byte source failed
    IoErrors(ByteIoError)
}

impl HdrDecodeErrors {
    /// Map a byte source error while reading `section` of the header
    pub(crate) fn in_header(section: &'static str, err: ByteIoError) -> HdrDecodeErrors {
        if err.is_eof() {
            HdrDecodeErrors::UnexpectedEof(section)
        } else {
            HdrDecodeErrors::IoErrors(err)
        }
    }
    /// Map a byte source error while reading pixel data
    pub(crate) fn in_scanline(err: ByteIoError) -> HdrDecodeErrors {
        if err.is_eof() {
            HdrDecodeErrors::Decompression("Stream ended before the scanline was complete")
        } else {
            HdrDecodeErrors::IoErrors(err)
        }
    }
}

impl Debug for HdrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            HdrDecodeErrors::InvalidMagicBytes => {
                writeln!(
                    f,
                    "Invalid magic bytes, file does not start with #?RADIANCE or #?RGBE"
                )
            }
            HdrDecodeErrors::UnexpectedEof(section) => {
                writeln!(f, "EOF reached while reading {section}")
            }
            HdrDecodeErrors::ResolutionParse(line) => {
                writeln!(
                    f,
                    "Failed to parse resolution `{line}`, expected `-Y <height> +X <width>`"
                )
            }
            HdrDecodeErrors::InvalidDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Invalid {dimension} {found}, expected a value between 1 and {expected}"
                )
            }
            HdrDecodeErrors::BufferAllocation => {
                writeln!(f, "Failed to get image buffer")
            }
            HdrDecodeErrors::TooSmallOutputArray(expected, found) => {
                writeln!(f, "Too small of an output array, expected array of at least length {} but found {}", expected, found)
            }
            HdrDecodeErrors::Decompression(reason) => {
                writeln!(f, "Decompression failed: {reason}")
            }
            HdrDecodeErrors::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<ByteIoError> for HdrDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        HdrDecodeErrors::IoErrors(value)
    }
}

impl Display for HdrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HdrDecodeErrors {}

/// HDR encoding errors
pub enum HdrEncodeErrors {
    /// The input size was expected to be of a certain size but isn't
    WrongInputSize(usize, usize),
    /// Width or height is zero or their product overflows
    InvalidDimensions(&'static str, usize),
    /// Writing the header or raw pixels failed
    IoErrors(ByteIoError),
    /// Writing a run length encoded scanline failed
    CompressionFailed(ByteIoError)
}

impl Debug for HdrEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            HdrEncodeErrors::WrongInputSize(expected, found) => {
                writeln!(f, "Input array length {found} doesn't match {expected}")
            }
            HdrEncodeErrors::InvalidDimensions(dimension, found) => {
                writeln!(f, "Cannot encode an image with {dimension} {found}")
            }
            HdrEncodeErrors::IoErrors(err) => writeln!(f, "I/O error {:?}", err),
            HdrEncodeErrors::CompressionFailed(err) => {
                writeln!(f, "Compression failed: {:?}", err)
            }
        }
    }
}

impl Display for HdrEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HdrEncodeErrors {}

impl From<ByteIoError> for HdrEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        HdrEncodeErrors::IoErrors(value)
    }
}
