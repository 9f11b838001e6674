/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The textual preamble of a radiance file
//!
//! ```text
//! #?RADIANCE
//! # comment
//! FORMAT=32-bit_rle_rgbe
//!
//! -Y <height> +X <width>
//! ```
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use radiance_core::bytestream::{ByteIoError, ByteSink, ByteWriter};

use crate::errors::HdrDecodeErrors;

/// Longest accepted program type line, newline included
pub(crate) const MAX_PROGRAM_TYPE_LENGTH: usize = 16;
/// Longest accepted resolution line, newline included
pub(crate) const MAX_RESOLUTION_LENGTH: usize = 200;

/// The program that wrote the file, taken from the magic line
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ProgramType {
    /// `#?RGBE`
    Rgbe,
    /// `#?RADIANCE`
    #[default]
    Radiance
}

impl ProgramType {
    /// The name as it appears after `#?`
    pub const fn as_str(self) -> &'static str {
        match self {
            ProgramType::Rgbe => "RGBE",
            ProgramType::Radiance => "RADIANCE"
        }
    }
    /// Match a full magic line, terminating newline included
    pub(crate) fn from_magic(line: &[u8]) -> Option<ProgramType> {
        match line {
            b"#?RGBE\n" => Some(ProgramType::Rgbe),
            b"#?RADIANCE\n" => Some(ProgramType::Radiance),
            _ => None
        }
    }
}

/// Header of a radiance file
///
/// Only the program type, comment and the raw `KEY=VALUE` metadata
/// are filled in by the decoder, the typed fields keep their defaults and
/// exist so callers can describe the image. Of those only `format` is written
/// by the encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct HdrHeader {
    /// Magic line of the file, the encoder always writes [`ProgramType::Radiance`]
    pub program_type: ProgramType,
    /// Free text, one line per `#` line of the header
    pub comment:      String,
    /// `FORMAT=`, `32-bit_rle_rgbe` or `32-bit_rle_xyze`
    pub format:       String,
    /// `GAMMA=`
    pub gamma:        f32,
    /// `EXPOSURE=`, watts/steradian/m^2
    pub exposure:     f32,
    /// `COLORCORR=`, scaling for each component
    pub color_corr:   [f32; 3],
    /// `PIXASPECT=`, ratio of the height to width of a pixel
    pub pixel_aspect: f32,
    /// `PRIMARIES=`, CIE (x,y) of the red, green and blue primaries and the white point
    pub primaries:    [f32; 8],
    /// Every `KEY=VALUE` line found in the header, uninterpreted
    pub metadata:     BTreeMap<String, String>
}

impl Default for HdrHeader {
    fn default() -> Self {
        HdrHeader {
            program_type: ProgramType::Radiance,
            comment:      String::new(),
            format:       String::from("32-bit_rle_rgbe"),
            gamma:        1.0,
            exposure:     1.0,
            color_corr:   [1.0; 3],
            pixel_aspect: 1.0,
            primaries:    [0.0; 8],
            metadata:     BTreeMap::new()
        }
    }
}

impl HdrHeader {
    /// Take one line of the header block, without its newline
    pub(crate) fn absorb_line(&mut self, line: &[u8]) {
        // lossy, a garbage header should not fail decoding
        let line = String::from_utf8_lossy(line);

        if let Some(text) = line.strip_prefix('#') {
            let text = text.strip_prefix(' ').unwrap_or(text);

            if !self.comment.is_empty() {
                self.comment.push('\n');
            }
            self.comment.push_str(text);
        } else if let Some((key, value)) = line.split_once('=') {
            self.metadata
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    /// Write the header, resolution line included
    pub(crate) fn write<T: ByteSink>(
        &self, writer: &mut ByteWriter<T>, width: usize, height: usize,
        extra: Option<&BTreeMap<String, String>>
    ) -> Result<(), ByteIoError> {
        writer.write_all(b"#?RADIANCE\n")?;

        for line in self.comment.split('\n') {
            writer.write_all(format!("# {line}\n").as_bytes())?;
        }
        writer.write_all(format!("FORMAT={}\n", self.format).as_bytes())?;

        if let Some(extra) = extra {
            for (key, value) in extra {
                writer.write_all(format!("{key}={value}\n").as_bytes())?;
            }
        }
        writer.write_u8_err(b'\n')?;
        writer.write_all(format!("-Y {height} +X {width}\n").as_bytes())?;

        Ok(())
    }
}

/// Parse `-Y <height> +X <width>` returning `(width, height)`
///
/// Only the standard orientation is understood, flipped or
/// rotated images are rejected.
pub(crate) fn parse_resolution(line: &[u8]) -> Result<(usize, usize), HdrDecodeErrors> {
    let text = String::from_utf8_lossy(line);
    let error = || HdrDecodeErrors::ResolutionParse(text.trim().to_string());

    let tokens: Vec<&str> = text.split_ascii_whitespace().collect();

    match tokens.as_slice() {
        ["-Y", height, "+X", width] => {
            let height = height.parse::<usize>().map_err(|_| error())?;
            let width = width.parse::<usize>().map_err(|_| error())?;
            Ok((width, height))
        }
        _ => Err(error())
    }
}
