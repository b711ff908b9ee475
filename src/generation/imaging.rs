// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding, encoding and inline data URI helpers

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

/// Largest image accepted for decoding (25MB)
const MAX_IMAGE_SIZE: usize = 25 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,

    #[error("Malformed data URI")]
    MalformedDataUri,
}

/// Payload of a `data:<mime>;base64,<payload>` URI
#[derive(Debug, Clone, PartialEq)]
pub struct InlineData {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Decode raw image bytes, detecting the format from magic bytes
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge(bytes.len(), MAX_IMAGE_SIZE));
    }

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = detect_format(bytes)?;

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))
}

/// Detect image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF87a / GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(ImageFormat::Bmp),

        _ => Err(ImageError::UnsupportedFormat),
    }
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Re-encode arbitrary provider output as PNG
pub fn to_png(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    if matches!(detect_format(bytes), Ok(ImageFormat::Png)) {
        // Still decode so corrupt payloads are rejected
        decode_image_bytes(bytes)?;
        return Ok(bytes.to_vec());
    }
    let image = decode_image_bytes(bytes)?;
    encode_png(&image)
}

pub fn is_data_uri(candidate: &str) -> bool {
    candidate.starts_with("data:")
}

/// Split and decode a base64 `data:` URI without touching the network
pub fn decode_data_uri(uri: &str) -> Result<InlineData, ImageError> {
    let rest = uri.strip_prefix("data:").ok_or(ImageError::MalformedDataUri)?;
    let (meta, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUri)?;
    let media_type = meta
        .strip_suffix(";base64")
        .ok_or(ImageError::MalformedDataUri)?;

    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    Ok(InlineData {
        media_type: if media_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            media_type.to_string()
        },
        bytes,
    })
}

/// Build a base64 `data:` URI for the given bytes
pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}
