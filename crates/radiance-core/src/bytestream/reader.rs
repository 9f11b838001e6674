/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use core::fmt::Formatter;

pub use cursor::ByteCursor;

use crate::bytestream::ByteSource;

mod cursor;
mod std_readers;

/// Errors raised by byte sources and sinks
pub enum ByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    // requested, read
    NotEnoughBytes(usize, usize),
    // requested, available
    NotEnoughBuffer(usize, usize)
}

impl ByteIoError {
    /// Whether this error means the source ran out of bytes
    pub const fn is_eof(&self) -> bool {
        matches!(self, ByteIoError::NotEnoughBytes(..))
    }
}

impl core::fmt::Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::NotEnoughBuffer(expected, found) => {
                writeln!(
                    f,
                    "Not enough buffer to write {expected} bytes, buffer size is {found}"
                )
            }
        }
    }
}

impl core::fmt::Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        if value.kind() == std::io::ErrorKind::UnexpectedEof {
            return ByteIoError::NotEnoughBytes(1, 0);
        }
        ByteIoError::StdIoError(value)
    }
}

/// A sequential reader over a [`ByteSource`]
///
/// Counts consumed bytes so decoders can report where in the stream
/// something went wrong.
pub struct ByteReader<T: ByteSource> {
    inner:    T,
    position: u64
}

impl<T: ByteSource> ByteReader<T> {
    pub fn new(source: T) -> ByteReader<T> {
        ByteReader {
            inner:    source,
            position: 0
        }
    }
    #[inline(always)]
    pub fn read_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let byte = self.inner.read_byte()?;
        self.position += 1;
        Ok(byte)
    }
    /// Look at the next byte without advancing the stream
    #[inline(always)]
    pub fn peek_u8(&mut self) -> Result<Option<u8>, ByteIoError> {
        self.inner.peek_byte()
    }
    /// Read `N` bytes or error out if the source does not have them
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.read_exact_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.inner.read_exact_bytes(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Number of bytes consumed since this reader was created
    #[inline(always)]
    pub const fn position(&self) -> u64 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::{ByteCursor, ByteReader};

    #[test]
    fn peek_does_not_advance() {
        let mut reader = ByteReader::new(ByteCursor::new([7_u8, 8]));

        assert_eq!(reader.peek_u8().unwrap(), Some(7));
        assert_eq!(reader.read_u8_err().unwrap(), 7);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_fixed_bytes_or_error::<1>().unwrap(), [8]);
        assert_eq!(reader.peek_u8().unwrap(), None);
    }

    #[test]
    fn short_read_is_eof() {
        let mut reader = ByteReader::new(ByteCursor::new([1_u8, 2, 3]));
        let err = reader.read_fixed_bytes_or_error::<4>().unwrap_err();
        assert!(err.is_eof());
        assert_eq!(reader.position(), 0);
    }
}
