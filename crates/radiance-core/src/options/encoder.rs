/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Options shared by encoders
///
/// Carries the geometry of the image being encoded
#[derive(Debug, Copy, Clone, Default)]
pub struct EncoderOptions {
    width:  usize,
    height: usize
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    ///
    /// returns: EncoderOptions
    pub const fn new(width: usize, height: usize) -> EncoderOptions {
        EncoderOptions { width, height }
    }
    /// Get the width for which the image will be encoded in
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get height for the image
    pub const fn height(&self) -> usize {
        self.height
    }
}
