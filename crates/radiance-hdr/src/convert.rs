/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion between packed RGBE and linear RGBA floats
//!
//! Both directions are exact bit manipulations, no `libm` or `std` float
//! functions are needed, so this works in `no_std`.

/// Values whose largest channel is below this are stored as black
const BLACK_THRESHOLD: f32 = 1e-32;

/// Largest exponent an RGBE exponent byte can carry, `255 - 128`
const MAX_EXPONENT: i32 = 127;

/// Exactly `2^exp` for `exp` in `-149..=127`
///
/// Subnormal results are built directly, outside the range this
/// saturates to `0.0` or `2^127`
fn pow2(exp: i32) -> f32 {
    if exp > MAX_EXPONENT {
        f32::from_bits(254 << 23)
    } else if exp >= -126 {
        f32::from_bits(((exp + 127) as u32) << 23)
    } else if exp >= -149 {
        f32::from_bits(1 << (exp + 149))
    } else {
        0.0
    }
}

/// Split a normal positive float into `(m, e)` with `v = m * 2^e`
/// and `m` in `[0.5, 1)`
fn frexp(v: f32) -> (f32, i32) {
    let bits = v.to_bits();
    let exponent = ((bits >> 23) & 0xFF) as i32;
    let mantissa = f32::from_bits((bits & 0x807F_FFFF) | (126 << 23));

    (mantissa, exponent - 126)
}

/// Convert one RGBE pixel to linear RGBA
///
/// Each channel is `mantissa / 255 * 2^(exponent - 128)` and alpha is `1.0`
#[inline]
pub fn rgbe_to_rgba_pixel(rgbe: [u8; 4]) -> [f32; 4] {
    let scale = pow2(i32::from(rgbe[3]) - 128);

    [
        (f32::from(rgbe[0]) / 255.0) * scale,
        (f32::from(rgbe[1]) / 255.0) * scale,
        (f32::from(rgbe[2]) / 255.0) * scale,
        1.0
    ]
}

/// Convert one linear RGBA pixel to RGBE, alpha is dropped
///
/// Pixels whose largest channel is below `1e-32` (or NaN) become `[0, 0, 0, 0]`.
/// Values too large for the exponent byte saturate to exponent `255` with
/// clamped mantissas, negative channels become `0`.
#[inline]
pub fn rgba_to_rgbe_pixel(rgba: [f32; 4]) -> [u8; 4] {
    let v = rgba[0].max(rgba[1]).max(rgba[2]);

    if !(v >= BLACK_THRESHOLD) {
        return [0; 4];
    }
    let exponent = if v.is_finite() {
        frexp(v).1.min(MAX_EXPONENT)
    } else {
        MAX_EXPONENT
    };
    // m * 256 / v, exact since v / m is a power of two
    let scale = pow2(8 - exponent);

    // float to int casts truncate towards zero and saturate
    [
        (rgba[0] * scale) as u8,
        (rgba[1] * scale) as u8,
        (rgba[2] * scale) as u8,
        (exponent + 128) as u8
    ]
}

/// Convert `width*height` packed RGBE pixels into linear RGBA floats
///
/// # Panics
/// If `rgbe` or `rgba` hold less than `width*height*4` elements
pub fn rgbe_to_rgba(rgbe: &[u8], rgba: &mut [f32], width: usize, height: usize) {
    let size = width * height * 4;

    for (input, output) in rgbe[..size]
        .chunks_exact(4)
        .zip(rgba[..size].chunks_exact_mut(4))
    {
        let pixel = rgbe_to_rgba_pixel([input[0], input[1], input[2], input[3]]);
        output.copy_from_slice(&pixel);
    }
}

/// Convert `width*height` linear RGBA pixels into packed RGBE
///
/// # Panics
/// If `rgba` or `rgbe` hold less than `width*height*4` elements
pub fn rgba_to_rgbe(rgba: &[f32], rgbe: &mut [u8], width: usize, height: usize) {
    let size = width * height * 4;

    for (input, output) in rgba[..size]
        .chunks_exact(4)
        .zip(rgbe[..size].chunks_exact_mut(4))
    {
        let pixel = rgba_to_rgbe_pixel([input[0], input[1], input[2], input[3]]);
        output.copy_from_slice(&pixel);
    }
}
