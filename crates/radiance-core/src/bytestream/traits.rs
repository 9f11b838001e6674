/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading and writing bytes
//!
//! This exposes the traits a type must implement to be used as
//! an input or output of the radiance decoders and encoders.

use crate::bytestream::reader::ByteIoError;

/// The input trait implemented for readers.
///
/// A source is consumed strictly front to back, the only look-ahead
/// we ever need is a single byte via [`peek_byte`](Self::peek_byte).
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ByteCursor`](crate::bytestream::ByteCursor)
/// over [`Cursor`](std::io::Cursor), it doesn't go through the `std::io` error machinery
/// for every byte.
pub trait ByteSource {
    /// Read a single byte, returning [`ByteIoError::NotEnoughBytes`] if the
    /// source is exhausted
    fn read_byte(&mut self) -> Result<u8, ByteIoError>;
    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// ## Arguments
    ///  - `buf`: Buffer to fill with bytes from the underlying reader
    ///  ## Errors
    /// When the source ends before `buf` is full the error is [`ByteIoError::NotEnoughBytes`],
    /// the contents of `buf` are then unspecified
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;
    /// Return the next byte without consuming it, or `None` at the end of the source
    ///
    /// ## Warning
    /// For file backed readers this may cause an additional read syscall
    fn peek_byte(&mut self) -> Result<Option<u8>, ByteIoError>;
}

/// The writer trait implemented for sinks of the encoders
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded images
pub trait ByteSink {
    /// Write all bytes to the sink or return an error if something occurred
    ///
    /// This will always write all bytes, if it can't fully write all bytes, it will
    /// error out
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Ensure bytes are written to the sink.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
    /// A hint to tell the implementation how big of a size we expect the image to be
    ///
    /// This is just a hint, akin to calling `Vec::reserve` and should be treated as such.
    /// If your implementation doesn't support such, e.g file or mutable slices, it's okay to return
    /// `Ok(())`
    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError>;
}
