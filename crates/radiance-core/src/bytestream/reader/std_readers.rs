/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

use std::io::{BufRead, ErrorKind};

use crate::bytestream::{ByteIoError, ByteSource};

// BufRead gives us a one byte look-ahead for free through fill_buf,
// so there is no need to require Seek to undo reads.
impl<T: BufRead> ByteSource for T {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, ByteIoError> {
        let byte = self.peek_byte()?.ok_or(ByteIoError::NotEnoughBytes(1, 0))?;
        self.consume(1);
        Ok(byte)
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let requested = buf.len();

        self.read_exact(buf).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                ByteIoError::NotEnoughBytes(requested, 0)
            } else {
                ByteIoError::StdIoError(err)
            }
        })
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, ByteIoError> {
        loop {
            match self.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ByteIoError::StdIoError(err))
            }
        }
    }
}
