/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::{ByteIoError, ByteSink};

mod no_std_writer;
mod std_writer;

/// Encapsulates a simple byte writer that counts
/// how many bytes went into the sink
pub struct ByteWriter<T: ByteSink> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ByteSink> ByteWriter<T> {
    /// Create a new writer for the sink
    pub fn new(data: T) -> ByteWriter<T> {
        ByteWriter {
            buffer:        data,
            bytes_written: 0
        }
    }
    /// Write all bytes from `buf` into the sink or error out
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }
    /// Write a fixed number of bytes, the size is known at compile time
    #[inline]
    pub fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all(buf)
    }
    /// Write a single byte into the sink or error out
    #[inline]
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_const_bytes(&[byte])
    }
    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use radiance_core::bytestream::ByteWriter;
    /// let mut sink = vec![];
    /// let mut stream = ByteWriter::new(&mut sink);
    /// stream.write_all(b"#?").unwrap();
    /// assert_eq!(stream.bytes_written(), 2);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }
    /// Tell the sink how many more bytes we expect to write
    pub fn reserve(&mut self, additional: usize) -> Result<(), ByteIoError> {
        self.buffer.reserve_capacity(additional)
    }

    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.buffer.flush_bytes()
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::ByteWriter;

    #[test]
    fn slice_sink_reports_overflow() {
        let mut storage = [0_u8; 3];
        let mut writer = ByteWriter::new(&mut storage[..]);

        writer.write_const_bytes(&[1, 2]).unwrap();
        assert!(writer.write_const_bytes(&[3, 4]).is_err());
        assert_eq!(writer.bytes_written(), 2);
        assert_eq!(&storage[..2], &[1, 2]);
    }
}
