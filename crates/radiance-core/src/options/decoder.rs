/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Largest width or height any radiance decoder accepts
///
/// Larger values are clamped to this, it exists to prevent
/// pathological allocations from a forged header.
pub const MAX_DIMENSION: usize = 1 << 14;

/// Decoder options
///
/// Not all options are respected by all decoders
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Treat some warnings as errors
    ///
    /// Some images have recoverable inconsistencies, e.g a scanline
    /// announcing a length that differs from the image width.
    ///
    /// When set to false, these are logged via the log crate.
    /// When set to true, this will return an `Result<Err>` on exception.
    ///
    /// - Default value: false
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   MAX_DIMENSION,
            max_height:  MAX_DIMENSION,
            strict_mode: false
        }
    }
}

impl DecoderOptions {
    /// Create options where recoverable inconsistencies
    /// become errors
    pub fn new_strict() -> DecoderOptions {
        DecoderOptions::default().set_strict_mode(true)
    }
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// Values above [`MAX_DIMENSION`] are clamped to it
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width.min(MAX_DIMENSION);
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    ///
    /// Values above [`MAX_DIMENSION`] are clamped to it
    ///
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height.min(MAX_DIMENSION);
        self
    }

    /// Set whether the decoder should be in strict mode
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::options::decoder::MAX_DIMENSION;
    use crate::options::DecoderOptions;

    #[test]
    fn limits_never_exceed_format_maximum() {
        let options = DecoderOptions::default()
            .set_max_width(usize::MAX)
            .set_max_height(100);

        assert_eq!(options.max_width(), MAX_DIMENSION);
        assert_eq!(options.max_height(), 100);
        assert!(!options.strict_mode());
        assert!(DecoderOptions::new_strict().strict_mode());
    }
}
