//! Integration tests for the raster transform library.
//!
//! Covers the algebraic properties the transforms promise:
//! - Invert and mirror are exact involutions
//! - Pixelate preserves outer dimensions and produces uniform cells
//! - Heatmap interpolates exactly between its endpoint colors
//! - Resize-to-bound pins the longer side and keeps alpha

use art_booth::raster::{
    self, MirrorAxis, RasterError, DEFAULT_CELL_SIZE, HEATMAP_COLD, HEATMAP_HOT, STICKER_MAX_SIDE,
};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([
            (x * 7 % 256) as u8,
            (y * 11 % 256) as u8,
            ((x + y) * 3 % 256) as u8,
        ]);
    }
    DynamicImage::ImageRgb8(img)
}

// ==================== Invert Tests ====================

#[test]
fn test_invert_is_exact_involution() {
    // 255 - (255 - v) = v, no clamping loss anywhere
    let img = gradient_rgb(32, 24);
    let twice = raster::invert(&raster::invert(&img));
    assert_eq!(twice.to_rgb8().as_raw(), img.to_rgb8().as_raw());
}

#[test]
fn test_invert_extremes() {
    let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])));
    let inverted = raster::invert(&black);
    assert_eq!(inverted.to_rgb8().get_pixel(0, 0).0, [255, 255, 255]);
}

// ==================== Mirror Tests ====================

#[test]
fn test_mirror_horizontal_is_involution() {
    let img = gradient_rgb(31, 17);
    let twice = raster::mirror(
        &raster::mirror(&img, MirrorAxis::Horizontal),
        MirrorAxis::Horizontal,
    );
    assert_eq!(twice.to_rgb8().as_raw(), img.to_rgb8().as_raw());
}

#[test]
fn test_mirror_vertical_is_involution() {
    let img = gradient_rgb(17, 31);
    let twice = raster::mirror(
        &raster::mirror(&img, MirrorAxis::Vertical),
        MirrorAxis::Vertical,
    );
    assert_eq!(twice.to_rgb8().as_raw(), img.to_rgb8().as_raw());
}

#[test]
fn test_mirror_horizontal_swaps_columns() {
    let mut img = RgbImage::new(2, 1);
    img.put_pixel(0, 0, Rgb([1, 1, 1]));
    img.put_pixel(1, 0, Rgb([2, 2, 2]));
    let mirrored = raster::mirror(&DynamicImage::ImageRgb8(img), MirrorAxis::Horizontal);
    let out = mirrored.to_rgb8();
    assert_eq!(out.get_pixel(0, 0).0, [2, 2, 2]);
    assert_eq!(out.get_pixel(1, 0).0, [1, 1, 1]);
}

#[test]
fn test_mirror_vertical_swaps_rows() {
    let mut img = RgbImage::new(1, 2);
    img.put_pixel(0, 0, Rgb([1, 1, 1]));
    img.put_pixel(0, 1, Rgb([2, 2, 2]));
    let mirrored = raster::mirror(&DynamicImage::ImageRgb8(img), MirrorAxis::Vertical);
    let out = mirrored.to_rgb8();
    assert_eq!(out.get_pixel(0, 0).0, [2, 2, 2]);
    assert_eq!(out.get_pixel(0, 1).0, [1, 1, 1]);
}

// ==================== Pixelate Tests ====================

#[test]
fn test_pixelate_preserves_outer_dimensions() {
    let img = gradient_rgb(100, 60);
    let out = raster::pixelate(&img, DEFAULT_CELL_SIZE).unwrap();
    assert_eq!(out.dimensions(), (100, 60));
}

#[test]
fn test_pixelate_block_constant_image_is_fixed_point() {
    // An image already constant within every 20x20 cell survives the
    // downsample/upsample round trip unchanged.
    let mut img = RgbImage::new(100, 100);
    for (_, y, pixel) in img.enumerate_pixels_mut() {
        let band = ((y / 20) * 50) as u8;
        *pixel = Rgb([band, band, band]);
    }
    let img = DynamicImage::ImageRgb8(img);
    let out = raster::pixelate(&img, 20).unwrap();
    assert_eq!(out.to_rgb8().as_raw(), img.to_rgb8().as_raw());
}

#[test]
fn test_pixelate_produces_uniform_cells() {
    let img = gradient_rgb(100, 100);
    let out = raster::pixelate(&img, 20).unwrap().to_rgb8();
    // Every pixel inside one 20x20 cell carries the same value
    let anchor = out.get_pixel(0, 0);
    for x in 0..20 {
        for y in 0..20 {
            assert_eq!(out.get_pixel(x, y), anchor);
        }
    }
}

#[test]
fn test_pixelate_parameter_validation() {
    let img = gradient_rgb(50, 30);
    assert!(matches!(
        raster::pixelate(&img, 0),
        Err(RasterError::InvalidParameter { .. })
    ));
    // Cell equal to the smaller dimension degenerates
    assert!(raster::pixelate(&img, 30).is_err());
    assert!(raster::pixelate(&img, 64).is_err());
    assert!(raster::pixelate(&img, 29).is_ok());
}

// ==================== Heatmap Tests ====================

#[test]
fn test_heatmap_cold_and_hot_endpoints() {
    let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([0, 0, 0])));
    let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([255, 255, 255])));
    assert_eq!(
        raster::heatmap(&black).to_rgb8().get_pixel(1, 1).0,
        HEATMAP_COLD
    );
    assert_eq!(
        raster::heatmap(&white).to_rgb8().get_pixel(1, 1).0,
        HEATMAP_HOT
    );
}

#[test]
fn test_heatmap_midpoint_interpolation() {
    // Intensity 128 between blue and red:
    // r = (0*127 + 255*128)/255 = 128, g = 0, b = (255*127 + 0)/255 = 127
    let mid = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([128, 128, 128])));
    assert_eq!(raster::heatmap(&mid).to_rgb8().get_pixel(0, 0).0, [128, 0, 127]);
}

#[test]
fn test_heatmap_output_dimensions_match_input() {
    let img = gradient_rgb(33, 21);
    assert_eq!(raster::heatmap(&img).dimensions(), (33, 21));
}

#[test]
fn test_heatmap_grayscale_prepass_changes_nothing() {
    // Heatmap works on luminance, so grayscaling first is a no-op:
    // luma of an already-gray image is the identity
    let img = gradient_rgb(24, 16);
    let direct = raster::heatmap(&img);
    let prepassed = raster::heatmap(&raster::grayscale(&img));
    assert_eq!(direct.to_rgb8().as_raw(), prepassed.to_rgb8().as_raw());
}

// ==================== Resize-To-Bound Tests ====================

#[test]
fn test_resize_to_bound_landscape() {
    let img = gradient_rgb(1000, 500);
    let out = raster::resize_to_bound(&img, STICKER_MAX_SIDE).unwrap();
    assert_eq!(out.dimensions(), (512, 256));
}

#[test]
fn test_resize_to_bound_portrait() {
    let img = gradient_rgb(500, 1000);
    let out = raster::resize_to_bound(&img, STICKER_MAX_SIDE).unwrap();
    assert_eq!(out.dimensions(), (256, 512));
}

#[test]
fn test_resize_to_bound_square_and_upscale() {
    let img = gradient_rgb(100, 100);
    let out = raster::resize_to_bound(&img, 512).unwrap();
    assert_eq!(out.dimensions(), (512, 512));
}

#[test]
fn test_resize_to_bound_extreme_aspect_keeps_min_side() {
    // 1000:1 aspect would scale the short side below one pixel; it clamps to 1
    let img = gradient_rgb(1000, 1);
    let out = raster::resize_to_bound(&img, 100).unwrap();
    assert_eq!(out.dimensions(), (100, 1));
}

#[test]
fn test_resize_to_bound_rejects_zero() {
    let img = gradient_rgb(10, 10);
    assert!(matches!(
        raster::resize_to_bound(&img, 0),
        Err(RasterError::InvalidParameter { .. })
    ));
}
