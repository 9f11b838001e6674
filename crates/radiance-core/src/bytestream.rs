/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The codecs only ever read and write sequentially, the only
//! look-ahead needed is a single byte which every source must be able
//! to peek without consuming it.
//!
//! - Sources: [`ByteCursor`] for in memory data, and with the `std` feature
//!   anything implementing [`BufRead`](std::io::BufRead)
//! - Sinks: with `std`, anything implementing [`Write`](std::io::Write), otherwise
//!   `&mut [u8]` and `&mut Vec<u8>`
pub use reader::{ByteCursor, ByteIoError, ByteReader};
pub use traits::{ByteSink, ByteSource};
pub use writer::ByteWriter;

mod reader;
mod traits;
mod writer;
