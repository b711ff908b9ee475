// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local placeholder images
//!
//! The only offline fallback. Used directly for single-image requests and as
//! the last resort whenever a remote image pathway fails. Pure and
//! deterministic: the same inputs always produce the same PNG.

use image::{imageops, DynamicImage, Rgb, RgbImage};

use super::errors::GenerationError;
use super::imaging::{decode_image_bytes, encode_png};
use super::request::InputImage;

/// Side length of the flat-colour placeholder
pub const PLACEHOLDER_SIDE: u32 = 512;

/// Colour used for unknown style labels
pub const DEFAULT_STYLE_COLOR: [u8; 3] = [128, 128, 128];

/// Fixed style palette keyed by lower-cased label
const STYLE_COLORS: &[(&str, [u8; 3])] = &[
    ("warm", [255, 200, 150]),
    ("cool", [150, 200, 255]),
    ("neutral", [200, 200, 200]),
    ("vibrant", [255, 100, 100]),
    ("muted", [150, 150, 150]),
];

/// Colour for a style label, case-insensitive
pub fn style_color(style_label: &str) -> [u8; 3] {
    let key = style_label.to_lowercase();
    STYLE_COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(DEFAULT_STYLE_COLOR)
}

/// Flat square in the style's colour
pub fn flat_placeholder(style_label: &str) -> RgbImage {
    RgbImage::from_pixel(
        PLACEHOLDER_SIDE,
        PLACEHOLDER_SIDE,
        Rgb(style_color(style_label)),
    )
}

/// Rotate 90° clockwise, then center-crop to a square of side `min(w, h)`.
///
/// Crop offsets are `(dimension - side) / 2` with integer division, so an odd
/// remainder leaves the extra row or column on the bottom/right.
pub fn transform_reference_image(image: &DynamicImage) -> RgbImage {
    let rgb = image.to_rgb8();
    let rotated = imageops::rotate90(&rgb);

    let (width, height) = rotated.dimensions();
    let side = width.min(height);
    let x = (width - side) / 2;
    let y = (height - side) / 2;

    imageops::crop_imm(&rotated, x, y, side, side).to_image()
}

/// Render the placeholder for a request as PNG bytes
pub fn placeholder(images: &[InputImage], style_label: &str) -> Result<Vec<u8>, GenerationError> {
    let rendered = match images.first() {
        Some(first) => {
            let decoded = decode_image_bytes(&first.data).map_err(|e| {
                GenerationError::Placeholder(format!(
                    "cannot decode reference image '{}': {}",
                    first.file_name, e
                ))
            })?;
            transform_reference_image(&decoded)
        }
        None => flat_placeholder(style_label),
    };

    encode_png(&DynamicImage::ImageRgb8(rendered))
        .map_err(|e| GenerationError::Placeholder(e.to_string()))
}
