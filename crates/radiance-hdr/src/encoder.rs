/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Radiance HDR encoder

use alloc::collections::BTreeMap;
use alloc::string::String;

use radiance_core::bytestream::{ByteIoError, ByteSink, ByteWriter};
use radiance_core::log::trace;
use radiance_core::options::EncoderOptions;

use crate::errors::HdrEncodeErrors;
use crate::header::HdrHeader;
use crate::{MAX_SCANLINE_LENGTH, MIN_SCANLINE_LENGTH};

/// Shortest run worth a run code
const MIN_RUN_LENGTH: usize = 4;
/// Longest run a single run code can hold
const MAX_RUN_LENGTH: usize = 127;
/// Longest literal span a single count byte can hold
const MAX_LITERAL_LENGTH: usize = 128;

/// A radiance HDR encoder
///
/// Data is packed RGBE, 4 bytes per pixel and its size should be
/// `width*height*4`. Use [`rgba_to_rgbe`](crate::rgba_to_rgbe) to
/// get there from floats.
pub struct HdrEncoder<'a> {
    data:    &'a [u8],
    header:  &'a HdrHeader,
    headers: Option<&'a BTreeMap<String, String>>,
    options: EncoderOptions
}

impl<'a> HdrEncoder<'a> {
    /// Create a new HDR encoder context that can encode
    /// the provided data
    ///
    /// # Arguments
    ///  - `data`: Packed RGBE pixels to encode
    ///  - `options`: Width and height of the image
    ///  - `header`: Comment and format written to the file
    pub fn new(data: &'a [u8], options: EncoderOptions, header: &'a HdrHeader) -> HdrEncoder<'a> {
        Self {
            data,
            header,
            headers: None,
            options
        }
    }
    /// Add extra headers to be encoded with the image
    ///
    /// This must be called before you call [`encode`](crate::encoder::HdrEncoder::encode)
    /// otherwise it will have no effect.
    ///
    /// # Arguments:
    /// - headers: Keys and values, written as `key=value`
    /// after the `FORMAT=` line
    pub fn add_headers(&mut self, headers: &'a BTreeMap<String, String>) {
        self.headers = Some(headers)
    }

    /// Calculate buffer with padding size needed for
    /// encoding this into a vec
    ///
    /// This is an upper limit, the size of the output depends
    /// on how well the data compresses.
    pub fn expected_buffer_size(&self) -> Option<usize> {
        let width = self.options.width();
        let height = self.options.height();

        // a scanline that does not compress at all costs a count byte
        // per literal span on each plane, plus the marker
        let row = width
            .checked_mul(4)?
            .checked_add(4 * (width / MAX_LITERAL_LENGTH + 1) + 4)?;

        let comment_lines = self.header.comment.split('\n').count();
        let mut header = 11 + self.header.comment.len() + comment_lines * 3;
        header += self.header.format.len() + 8;

        if let Some(extra) = self.headers {
            for (key, value) in extra {
                header = header.checked_add(key.len() + value.len() + 2)?;
            }
        }
        // blank line and the resolution line
        header += 1 + 48;

        row.checked_mul(height)?.checked_add(header)
    }

    /// Encode into a sink
    ///
    /// Scanlines between 8 and 32767 pixels wide are run length encoded,
    /// other widths are written as raw RGBE.
    ///
    /// # Arguments:
    /// - out: The output sink to write bytes into
    ///
    /// # Returns
    /// - Ok(usize):  The number of bytes written into out
    /// - Err(HdrEncodeErrors): An error if something occurred
    ///
    /// # Examples
    /// - Encode a black image of 10x10
    ///```
    /// use radiance_hdr::radiance_core::options::EncoderOptions;
    /// use radiance_hdr::{HdrEncoder, HdrHeader};
    /// let (w, h) = (10, 10);
    /// let data = vec![0_u8; w * h * 4];
    /// let header = HdrHeader::default();
    /// let encoder = HdrEncoder::new(&data, EncoderOptions::new(w, h), &header);
    /// // create output buffer, this is the upper limit on it
    /// let mut output = Vec::with_capacity(encoder.expected_buffer_size().unwrap());
    /// let size = encoder.encode(&mut output).unwrap();
    /// assert_eq!(size, output.len());
    ///```
    pub fn encode<T: ByteSink>(&self, out: T) -> Result<usize, HdrEncodeErrors> {
        let width = self.options.width();
        let height = self.options.height();

        if width == 0 {
            return Err(HdrEncodeErrors::InvalidDimensions("width", width));
        }
        if height == 0 {
            return Err(HdrEncodeErrors::InvalidDimensions("height", height));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(4))
            .ok_or(HdrEncodeErrors::InvalidDimensions("width", width))?;

        let found = self.data.len();

        if expected != found {
            return Err(HdrEncodeErrors::WrongInputSize(expected, found));
        }
        let mut writer = ByteWriter::new(out);

        if let Some(size) = self.expected_buffer_size() {
            writer.reserve(size)?;
        }
        self.header.write(&mut writer, width, height, self.headers)?;

        if (MIN_SCANLINE_LENGTH..=MAX_SCANLINE_LENGTH).contains(&width) {
            trace!("Writing {} run length encoded scanlines", height);

            let marker = [2, 2, (width >> 8) as u8, (width & 255) as u8];

            for scanline in self.data.chunks_exact(width * 4) {
                writer
                    .write_const_bytes(&marker)
                    .map_err(HdrEncodeErrors::CompressionFailed)?;

                for component in 0..4 {
                    compress_plane(&scanline[component..], width, &mut writer)
                        .map_err(HdrEncodeErrors::CompressionFailed)?;
                }
            }
        } else {
            trace!("Width {} cannot be run length encoded, writing raw pixels", width);

            writer.write_all(self.data)?;
        }
        writer.flush()?;

        Ok(writer.bytes_written())
    }
}

/// Run length encode one component of a scanline
///
/// `data` is the interleaved scanline starting at the component,
/// every fourth byte belongs to the plane.
fn compress_plane<T: ByteSink>(
    data: &[u8], width: usize, writer: &mut ByteWriter<T>
) -> Result<(), ByteIoError> {
    let value = |i: usize| data[i * 4];
    let mut cur = 0;

    while cur < width {
        let mut run_start = cur;
        let mut run_count = 0;
        let mut old_run_count = 0;

        // step over short runs until a long one starts or the row ends
        while run_count < MIN_RUN_LENGTH && run_start < width {
            run_start += run_count;
            old_run_count = run_count;
            run_count = 1;

            while run_start + run_count < width
                && run_count < MAX_RUN_LENGTH
                && value(run_start) == value(run_start + run_count)
            {
                run_count += 1;
            }
        }

        // a short run right before the long one
        if old_run_count > 1 && old_run_count == run_start - cur {
            writer.write_const_bytes(&[(128 + old_run_count) as u8, value(cur)])?;
            cur = run_start;
        }

        while cur < run_start {
            let literals = (run_start - cur).min(MAX_LITERAL_LENGTH);

            writer.write_u8_err(literals as u8)?;

            for i in cur..cur + literals {
                writer.write_u8_err(value(i))?;
            }
            cur += literals;
        }

        if run_count >= MIN_RUN_LENGTH {
            writer.write_const_bytes(&[(128 + run_count) as u8, value(run_start)])?;
            cur += run_count;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use radiance_core::bytestream::ByteWriter;
    use radiance_core::options::EncoderOptions;

    use super::compress_plane;
    use crate::{HdrEncodeErrors, HdrEncoder, HdrHeader};

    /// Compress a single plane given as plain bytes
    fn compress(plane: &[u8]) -> Vec<u8> {
        let interleaved: Vec<u8> = plane.iter().flat_map(|x| [*x, 0, 0, 0]).collect();
        let mut out = Vec::new();
        let mut writer = ByteWriter::new(&mut out);

        compress_plane(&interleaved, plane.len(), &mut writer).unwrap();
        out
    }

    #[test]
    fn run_of_four() {
        assert_eq!(compress(&[7, 7, 7, 7]), [132, 7]);
    }

    #[test]
    fn lone_run_of_three_is_literal() {
        assert_eq!(compress(&[1, 7, 7, 7, 2]), [5, 1, 7, 7, 7, 2]);
    }

    #[test]
    fn short_run_before_long_run() {
        assert_eq!(compress(&[7, 7, 7, 9, 9, 9, 9]), [131, 7, 132, 9]);
    }

    #[test]
    fn literals_then_run() {
        assert_eq!(
            compress(&[1, 2, 3, 4, 4, 4, 4, 4]),
            [3, 1, 2, 3, 133, 4]
        );
    }

    #[test]
    fn long_runs_are_split() {
        let out = compress(&[5; 300]);
        assert_eq!(out, [255, 5, 255, 5, 174, 5]);
    }

    #[test]
    fn long_literals_are_split() {
        let plane: Vec<u8> = (0..200).map(|x| x as u8).collect();
        let out = compress(&plane);

        assert_eq!(out.len(), 202);
        assert_eq!(out[0], 128);
        assert_eq!(&out[1..129], &plane[..128]);
        assert_eq!(out[129], 72);
        assert_eq!(&out[130..], &plane[128..]);
    }

    #[test]
    fn writes_marker_and_header() {
        let data = vec![3_u8; 8 * 4];
        let header = HdrHeader::default();
        let mut extra = BTreeMap::new();
        extra.insert(String::from("EXPOSURE"), String::from("2"));

        let mut encoder = HdrEncoder::new(&data, EncoderOptions::new(8, 1), &header);
        encoder.add_headers(&extra);

        let mut out = Vec::new();
        let size = encoder.encode(&mut out).unwrap();

        let expected = b"#?RADIANCE\n# \nFORMAT=32-bit_rle_rgbe\nEXPOSURE=2\n\n-Y 1 +X 8\n";
        assert_eq!(&out[..expected.len()], &expected[..]);
        assert_eq!(
            &out[expected.len()..],
            &[2, 2, 0, 8, 136, 3, 136, 3, 136, 3, 136, 3]
        );
        assert_eq!(size, out.len());
        assert!(size <= encoder.expected_buffer_size().unwrap());
    }

    #[test]
    fn narrow_images_are_raw() {
        let data: Vec<u8> = (0..7 * 2 * 4).map(|x| x as u8).collect();
        let header = HdrHeader::default();
        let encoder = HdrEncoder::new(&data, EncoderOptions::new(7, 2), &header);

        let mut out = Vec::new();
        encoder.encode(&mut out).unwrap();

        assert!(out.ends_with(&data));
    }

    #[test]
    fn rejects_wrong_sizes() {
        let header = HdrHeader::default();
        let data = [0_u8; 12];

        let encoder = HdrEncoder::new(&data, EncoderOptions::new(2, 2), &header);
        assert!(matches!(
            encoder.encode(&mut Vec::new()),
            Err(HdrEncodeErrors::WrongInputSize(16, 12))
        ));

        let encoder = HdrEncoder::new(&data, EncoderOptions::new(0, 2), &header);
        assert!(matches!(
            encoder.encode(&mut Vec::new()),
            Err(HdrEncodeErrors::InvalidDimensions("width", 0))
        ));
    }

    #[test]
    fn full_sink_is_compression_failure() {
        let data = vec![3_u8; 8 * 4];
        let header = HdrHeader::default();
        let encoder = HdrEncoder::new(&data, EncoderOptions::new(8, 1), &header);

        // 48 bytes of header, the 4 byte scanline marker does not fit
        let mut out = [0_u8; 51];
        let result = encoder.encode(&mut out[..]);

        assert!(matches!(result, Err(HdrEncodeErrors::CompressionFailed(_))));

        // header, marker and four runs of two bytes
        let mut exact = [0_u8; 48 + 4 + 8];
        assert_eq!(encoder.encode(&mut exact[..]).unwrap(), 60);
        assert_eq!(&exact[48..52], &[2, 2, 0, 8]);
    }
}
