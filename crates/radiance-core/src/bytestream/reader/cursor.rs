/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::{ByteIoError, ByteSource};

/// An in memory byte source
///
/// Works with anything that can be viewed as a byte slice,
/// e.g `&[u8]`, `Vec<u8>` or `[u8; N]`
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(buffer: T) -> ByteCursor<T> {
        ByteCursor {
            stream:   buffer,
            position: 0
        }
    }
    /// Bytes not yet consumed
    pub fn remaining(&self) -> &[u8] {
        let data = self.stream.as_ref();
        &data[self.position.min(data.len())..]
    }
}

impl<T: AsRef<[u8]>> ByteSource for ByteCursor<T> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let remaining = self.remaining();

        if remaining.len() < buf.len() {
            // do not move, a short read leaves the cursor where it was
            return Err(ByteIoError::NotEnoughBytes(buf.len(), remaining.len()));
        }
        buf.copy_from_slice(&remaining[..buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    #[inline(always)]
    fn peek_byte(&mut self) -> Result<Option<u8>, ByteIoError> {
        Ok(self.stream.as_ref().get(self.position).copied())
    }
}
