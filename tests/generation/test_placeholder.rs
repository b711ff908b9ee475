// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Placeholder rendering tests

use image::{imageops, DynamicImage, GenericImageView, Rgb, RgbImage};
use veramo_backend::generation::imaging::encode_png;
use veramo_backend::generation::placeholder::{placeholder, transform_reference_image};
use veramo_backend::generation::{GenerationError, InputImage};

fn coordinate_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([x as u8 * 10, y as u8 * 10, 0]))
}

fn png_input(name: &str, image: RgbImage) -> InputImage {
    let bytes = encode_png(&DynamicImage::ImageRgb8(image)).unwrap();
    InputImage::new(name, bytes)
}

#[test]
fn test_flat_placeholder_for_known_style() {
    let png = placeholder(&[], "WARM").unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (512, 512));
    assert!(decoded.pixels().all(|p| p.0 == [255, 200, 150]));
}

#[test]
fn test_flat_placeholder_for_unknown_style() {
    let png = placeholder(&[], "baroque").unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert!(decoded.pixels().all(|p| p.0 == [128, 128, 128]));
}

#[test]
fn test_placeholder_is_deterministic() {
    let input = vec![png_input("a.png", coordinate_image(6, 4))];
    assert_eq!(
        placeholder(&input, "cool").unwrap(),
        placeholder(&input, "cool").unwrap()
    );
}

#[test]
fn test_odd_remainder_crop_offset() {
    // 5x2 rotates to 2x5; crop offset is (5 - 2) / 2 = 1 row
    let out = transform_reference_image(&DynamicImage::ImageRgb8(coordinate_image(5, 2)));
    assert_eq!(out.dimensions(), (2, 2));
    assert_eq!(out.get_pixel(0, 0).0, [10, 10, 0]);
    assert_eq!(out.get_pixel(1, 0).0, [10, 0, 0]);
    assert_eq!(out.get_pixel(0, 1).0, [20, 10, 0]);
    assert_eq!(out.get_pixel(1, 1).0, [20, 0, 0]);
}

#[test]
fn test_square_transform_twice_is_half_turn() {
    let src = DynamicImage::ImageRgb8(coordinate_image(4, 4));
    let once = transform_reference_image(&src);
    let twice = transform_reference_image(&DynamicImage::ImageRgb8(once));
    assert_eq!(twice, imageops::rotate180(&src.to_rgb8()));
}

#[test]
fn test_only_first_reference_image_used() {
    let input = vec![
        png_input("first.png", coordinate_image(6, 4)),
        png_input("second.png", coordinate_image(10, 10)),
    ];
    let png = placeholder(&input, "neutral").unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.dimensions(), (4, 4));
}

#[test]
fn test_undecodable_reference_image() {
    let input = vec![InputImage::new("broken.png", b"not an image".to_vec())];
    let err = placeholder(&input, "warm").unwrap_err();
    assert!(matches!(err, GenerationError::Placeholder(_)));
    assert!(err.to_string().contains("broken.png"));
}
