/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use radiance_core::bytestream::{ByteReader, ByteSource};
use radiance_core::log::{trace, warn};
use radiance_core::options::DecoderOptions;

use crate::convert::rgbe_to_rgba;
use crate::errors::HdrDecodeErrors;
use crate::header::{
    parse_resolution, HdrHeader, ProgramType, MAX_PROGRAM_TYPE_LENGTH, MAX_RESOLUTION_LENGTH
};
use crate::{MAX_SCANLINE_LENGTH, MIN_SCANLINE_LENGTH};

/// Marker quad of the legacy encoding, `1,1,1,count`
const OLD_RUN_MARKER: [u8; 3] = [1, 1, 1];

/// A radiance HDR decoder
///
/// The decoder produces packed RGBE pixels, 4 bytes per pixel.
/// Use [`decode_rgba`](Self::decode_rgba) or [`rgbe_to_rgba`]
/// to get linear floats.
///
/// # Accessing metadata
///
/// After [`decode_headers`](Self::decode_headers) the parsed header is available
/// via [`header`](Self::header). Radiance files may contain metadata as key value pairs,
/// these are exposed untouched in [`HdrHeader::metadata`].
pub struct HdrDecoder<T: ByteSource> {
    buf:             ByteReader<T>,
    options:         DecoderOptions,
    header:          HdrHeader,
    width:           usize,
    height:          usize,
    decoded_headers: bool
}

impl<T> HdrDecoder<T>
where
    T: ByteSource
{
    /// Create a new HDR decoder
    ///
    /// # Arguments
    ///
    /// * `data`: Raw HDR file contents
    ///
    /// returns: HdrDecoder
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use radiance_hdr::HdrDecoder;
    /// // read hdr file to memory
    /// let file_data = std::io::BufReader::new(std::fs::File::open("sample.hdr").unwrap());
    /// let decoder = HdrDecoder::new(file_data);
    /// ```
    pub fn new(data: T) -> HdrDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new HDR decoder with the specified options
    ///
    /// # Arguments
    ///
    /// * `data`: Raw HDR file contents
    /// * `options`: Decoder options that influence how decoding occurs
    ///
    /// returns: HdrDecoder
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::io::BufReader;
    /// use radiance_hdr::radiance_core::options::DecoderOptions;
    /// use radiance_hdr::HdrDecoder;
    /// let file_data = std::fs::File::open("sample.hdr").unwrap();
    /// // set that the decoder does not decode images greater than
    /// // 50 px width
    /// let options = DecoderOptions::default().set_max_width(50);
    /// // use the options set
    /// let decoder = HdrDecoder::new_with_options(BufReader::new(file_data), options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> HdrDecoder<T> {
        HdrDecoder {
            buf: ByteReader::new(data),
            options,
            header: HdrHeader::default(),
            width: 0,
            height: 0,
            decoded_headers: false
        }
    }

    /// Return the parsed header or `None` if headers
    /// haven't been decoded
    pub const fn header(&self) -> Option<&HdrHeader> {
        if self.decoded_headers {
            Some(&self.header)
        } else {
            None
        }
    }

    /// Decode headers for the HDR image
    ///
    /// The struct is modified in place and data can be
    /// extracted from appropriate getters.
    pub fn decode_headers(&mut self) -> Result<(), HdrDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let mut line = Vec::with_capacity(MAX_RESOLUTION_LENGTH);

        self.header.program_type = self.read_program_type(&mut line)?;

        trace!("Program type: {}", self.header.program_type.as_str());

        // The header block ends at an empty line. The newline closing the magic
        // line counts, so `#?RADIANCE\n\n` is a header without metadata.
        line.clear();
        let mut previous = b'\n';

        loop {
            let byte = self
                .buf
                .read_u8_err()
                .map_err(|e| HdrDecodeErrors::in_header("comment", e))?;

            if byte == b'\n' {
                if previous == b'\n' {
                    break;
                }
                self.header.absorb_line(&line);
                line.clear();
            } else {
                line.push(byte);
            }
            previous = byte;
        }
        trace!("Comment: {:?}", self.header.comment);
        trace!("Metadata: {:?}", self.header.metadata);

        self.read_resolution_line(&mut line)?;

        let (width, height) = parse_resolution(&line)?;

        if height == 0 || height > self.options.max_height() {
            return Err(HdrDecodeErrors::InvalidDimensions(
                "height",
                self.options.max_height(),
                height
            ));
        }
        if width == 0 || width > self.options.max_width() {
            return Err(HdrDecodeErrors::InvalidDimensions(
                "width",
                self.options.max_width(),
                width
            ));
        }
        self.width = width;
        self.height = height;

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);

        self.decoded_headers = true;

        Ok(())
    }

    /// Get image dimensions as a tuple of width and height
    /// or `None` if the image hasn't been decoded.
    ///
    /// # Returns
    /// - `Some(width,height)`: Image dimensions
    /// -  None : The image headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// Return the number of bytes required to hold the packed RGBE image
    ///
    /// # Returns
    ///  - `Some(usize)`: Minimum size for a buffer needed to decode the image
    ///  - `None`: Indicates the image headers were not decoded
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            Some(self.width.checked_mul(self.height)?.checked_mul(4)?)
        } else {
            None
        }
    }

    /// Decode the image into a buffer handed out by `provide`
    ///
    /// Headers are decoded first, then `provide` is called with the
    /// width, height and header of the image and should return a buffer of at least
    /// `width*height*4` bytes, or `None` to abort decoding.
    ///
    /// # Returns
    /// - `Ok(B)`: The buffer returned by `provide`, filled with packed RGBE pixels
    /// - `Err(HdrDecodeErrors)`: The error that stopped decoding, the tail of the buffer is then unspecified
    ///
    /// # Example
    /// ```
    /// use radiance_hdr::radiance_core::bytestream::ByteCursor;
    /// use radiance_hdr::HdrDecoder;
    ///
    /// let mut file = b"#?RADIANCE\n\n-Y 1 +X 2\n".to_vec();
    /// file.extend_from_slice(&[10, 20, 30, 128, 1, 1, 1, 1]);
    ///
    /// let mut decoder = HdrDecoder::new(ByteCursor::new(file));
    /// let pixels = decoder
    ///     .decode_with(|w, h, _header| Some(vec![0_u8; w * h * 4]))
    ///     .unwrap();
    /// assert_eq!(pixels, &[10, 20, 30, 128, 10, 20, 30, 128]);
    /// ```
    pub fn decode_with<B, F>(&mut self, provide: F) -> Result<B, HdrDecodeErrors>
    where
        B: AsMut<[u8]>,
        F: FnOnce(usize, usize, &HdrHeader) -> Option<B>
    {
        self.decode_headers()?;

        let mut buffer =
            provide(self.width, self.height, &self.header).ok_or(HdrDecodeErrors::BufferAllocation)?;

        self.decode_into(buffer.as_mut())?;

        Ok(buffer)
    }

    /// Decode HDR file returning packed RGBE pixels
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)`: `width*height*4` bytes, R,G,B and shared exponent for every pixel
    /// - `Err(HdrDecodeErrors)`: Indicates an unrecoverable
    ///  error occurred during decoding.
    pub fn decode(&mut self) -> Result<Vec<u8>, HdrDecodeErrors> {
        self.decode_with(|width, height, _| Some(vec![0_u8; width * height * 4]))
    }

    /// Decode HDR file returning linear RGBA floats
    ///
    /// Alpha is always `1.0`
    pub fn decode_rgba(&mut self) -> Result<Vec<f32>, HdrDecodeErrors> {
        let rgbe = self.decode()?;
        let mut rgba = vec![0.0_f32; rgbe.len()];

        rgbe_to_rgba(&rgbe, &mut rgba, self.width, self.height);

        Ok(rgba)
    }

    /// Decode into a pre-allocated buffer
    ///
    /// It is an error if the buffer size is smaller than
    /// [`output_buffer_size()`](Self::output_buffer_size)
    ///
    /// If the buffer is bigger than expected, we ignore the end padding bytes
    ///
    /// # Example
    ///
    /// - Read  headers and then alloc a buffer big enough to hold the image
    ///
    /// ```no_run
    /// use radiance_hdr::radiance_core::bytestream::ByteCursor;
    /// use radiance_hdr::HdrDecoder;
    /// let mut decoder = HdrDecoder::new(ByteCursor::new(&[]));
    /// // before we get output, we must decode the headers to get width
    /// // and height
    /// decoder.decode_headers().unwrap();
    ///
    /// let mut out = vec![0; decoder.output_buffer_size().unwrap()];
    /// // write into out
    /// decoder.decode_into(&mut out).unwrap();
    /// ```
    pub fn decode_into(&mut self, buffer: &mut [u8]) -> Result<(), HdrDecodeErrors> {
        self.decode_headers()?;

        let output_size = self
            .output_buffer_size()
            .ok_or(HdrDecodeErrors::InvalidDimensions(
                "width",
                self.options.max_width(),
                self.width
            ))?;

        if buffer.len() < output_size {
            return Err(HdrDecodeErrors::TooSmallOutputArray(
                output_size,
                buffer.len()
            ));
        }
        let stride = self.width * 4;

        for row in 0..self.height {
            let start = row * stride;
            self.decode_scanline(&mut buffer[..output_size], start, start + stride)?;
        }
        trace!("Finished decoding at byte {}", self.buf.position());

        Ok(())
    }

    /// Read `#?RGBE\n` or `#?RADIANCE\n`
    fn read_program_type(&mut self, line: &mut Vec<u8>) -> Result<ProgramType, HdrDecodeErrors> {
        line.clear();

        while line.len() < MAX_PROGRAM_TYPE_LENGTH {
            let byte = self
                .buf
                .read_u8_err()
                .map_err(|e| HdrDecodeErrors::in_header("program type", e))?;
            line.push(byte);

            if byte == b'\n' {
                return ProgramType::from_magic(line).ok_or(HdrDecodeErrors::InvalidMagicBytes);
            }
        }
        Err(HdrDecodeErrors::InvalidMagicBytes)
    }

    /// Read the resolution line into `line`, newline excluded
    ///
    /// Empty lines in front of it are skipped.
    fn read_resolution_line(&mut self, line: &mut Vec<u8>) -> Result<(), HdrDecodeErrors> {
        line.clear();

        loop {
            let byte = self
                .buf
                .read_u8_err()
                .map_err(|e| HdrDecodeErrors::in_header("resolution", e))?;

            if byte == b'\n' {
                if line.is_empty() {
                    continue;
                }
                return Ok(());
            }
            // the newline would be byte number MAX_RESOLUTION_LENGTH+1
            if line.len() + 1 >= MAX_RESOLUTION_LENGTH {
                return Err(HdrDecodeErrors::ResolutionParse(
                    "resolution section too long".into()
                ));
            }
            line.push(byte);
        }
    }

    /// Fill pixels `image[start..end]` of one scanline
    fn decode_scanline(
        &mut self, image: &mut [u8], start: usize, end: usize
    ) -> Result<(), HdrDecodeErrors> {
        if !(MIN_SCANLINE_LENGTH..=MAX_SCANLINE_LENGTH).contains(&self.width) {
            return self.decode_old_rle(image, start, end);
        }
        if self.buf.peek_u8()? != Some(2) {
            return self.decode_old_rle(image, start, end);
        }
        let marker = self
            .buf
            .read_fixed_bytes_or_error::<4>()
            .map_err(HdrDecodeErrors::in_scanline)?;

        if marker[1] != 2 || (marker[2] & 128) != 0 {
            // not an adaptive scanline, the bytes are the first pixel
            // of an old style one
            image[start..start + 4].copy_from_slice(&marker);
            return self.decode_old_rle(image, start + 4, end);
        }

        let encoded_width = (usize::from(marker[2]) << 8) | usize::from(marker[3]);

        if encoded_width != self.width {
            if self.options.strict_mode() {
                return Err(HdrDecodeErrors::Decompression(
                    "Scanline length does not match image width"
                ));
            }
            warn!(
                "Scanline length {} does not match image width {}, ignoring",
                encoded_width,
                self.width
            );
        }
        let mut literals = [0_u8; 128];

        for component in 0..4 {
            let plane = &mut image[start + component..end];
            let mut position = 0;

            while position < self.width {
                let code = self.buf.read_u8_err().map_err(HdrDecodeErrors::in_scanline)?;

                if code > 128 {
                    let count = usize::from(code & 127);
                    let value = self.buf.read_u8_err().map_err(HdrDecodeErrors::in_scanline)?;

                    if position + count > self.width {
                        return Err(HdrDecodeErrors::Decompression(
                            "Run overflows the scanline"
                        ));
                    }
                    for pixel in plane[position * 4..].iter_mut().step_by(4).take(count) {
                        *pixel = value;
                    }
                    position += count;
                } else {
                    let count = usize::from(code);

                    if position + count > self.width {
                        return Err(HdrDecodeErrors::Decompression(
                            "Literal span overflows the scanline"
                        ));
                    }
                    let literals = &mut literals[..count];
                    self.buf
                        .read_exact_bytes(literals)
                        .map_err(HdrDecodeErrors::in_scanline)?;

                    for (pixel, value) in plane[position * 4..]
                        .iter_mut()
                        .step_by(4)
                        .zip(literals.iter())
                    {
                        *pixel = *value;
                    }
                    position += count;
                }
            }
        }
        Ok(())
    }

    /// Decode old style run length encoded pixels into `image[position..end]`
    ///
    /// A `1,1,1,n` quad repeats the pixel before it, consecutive markers
    /// form a little endian count. The previous pixel may sit on the row above.
    fn decode_old_rle(
        &mut self, image: &mut [u8], mut position: usize, end: usize
    ) -> Result<(), HdrDecodeErrors> {
        let mut shift = 0_u32;

        while position < end {
            let quad = self
                .buf
                .read_fixed_bytes_or_error::<4>()
                .map_err(HdrDecodeErrors::in_scanline)?;

            if quad[..3] == OLD_RUN_MARKER {
                if position < 4 {
                    return Err(HdrDecodeErrors::Decompression(
                        "Run marker without a preceding pixel"
                    ));
                }
                let count = u64::from(quad[3]).checked_shl(shift).unwrap_or(u64::MAX);
                let remaining = ((end - position) / 4) as u64;

                // runs past the end of the row are cut at the row end
                for _ in 0..count.min(remaining) {
                    image.copy_within(position - 4..position, position);
                    position += 4;
                }
                shift = shift.saturating_add(8);
            } else {
                image[position..position + 4].copy_from_slice(&quad);
                position += 4;
                shift = 0;
            }
        }
        Ok(())
    }
}
