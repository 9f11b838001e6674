/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging facade
//!
//! With the `log` feature the macros are the ones from the `log` crate,
//! otherwise they expand to nothing and arguments are never evaluated.
//!
//! Codecs only trace their progress and warn about data they chose to accept,
//! so only those two levels are exposed.

#[cfg(feature = "log")]
pub use log::{trace, warn};

// #[macro_export] always puts the macro in the crate root,
// #[doc(hidden)] + "pub use" namespaces it under `log`.
#[cfg(not(feature = "log"))]
pub use crate::{__trace as trace, __warn as warn};

#[doc(hidden)]
#[macro_export]
macro_rules! __warn {
    ($($arg:tt)+) => {};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __trace {
    ($($arg:tt)+) => {};
}

#[cfg(test)]
mod tests {
    use crate::log::{trace, warn};

    #[test]
    fn macros_accept_format_arguments() {
        let width = 16;
        trace!("Width: {}", width);
        warn!("Scanline length {} does not match image width {}", 8, width);
        assert_eq!(width, 16);
    }
}
