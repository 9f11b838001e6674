/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the radiance codecs
//!
//! It currently contains
//!
//! - A byte source and sink abstraction, with a reader and writer
//!   wrapper that keep track of how many bytes were consumed or produced
//! - Decoder and encoder options
//! - Logging macros that compile to nothing unless the `log` feature is enabled
//!
//! This library is `#[no_std]` with `alloc` needed for the `Vec` backed sinks.
//!
//! # Features
//!  - `std`: Implements byte sources for anything that is [`BufRead`](std::io::BufRead)
//!     and byte sinks for anything that is [`Write`](std::io::Write)
//!
//!  - `log`: Forwards the logging macros to the [`log`](https://docs.rs/log) crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
