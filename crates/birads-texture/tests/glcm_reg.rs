//! Co-occurrence texture regression test
//!
//! Tests quantization, co-occurrence offsets, contrast and homogeneity on
//! images with known answers, entropy, and the feature layout.

use birads_core::GrayImage;
use birads_test::RegParams;
use birads_texture::entropy::shannon_entropy;
use birads_texture::quantize::quantize_value;
use birads_texture::{
    FEATURE_DIM, Glcm, Offset, TextureOptions, extract_features, extract_features_with, quantize,
};

#[test]
fn glcm_reg() {
    let mut rp = RegParams::new("glcm");

    // --- Test 1: quantization covers 0..=31 ---
    let mut max_level = 0u8;
    for p in 0..=255u8 {
        let q = quantize_value(p, 8);
        rp.check(q == p / 8, "level = p / 8");
        max_level = max_level.max(q);
    }
    rp.compare_values(31.0, max_level as f64, 0.0);

    // --- Test 2: checkerboard of extreme levels ---
    let checker = GrayImage::from_fn(16, 16, |x, y| if (x + y) % 2 == 0 { 0 } else { 255 })
        .expect("checker");
    let q = quantize(&checker, 32);
    let horizontal = Glcm::compute(&q, Offset::from_polar(1, 0));
    rp.compare_values(961.0, horizontal.contrast(), 1e-9);
    rp.compare_values(1.0 / 962.0, horizontal.homogeneity(), 1e-12);
    let features = extract_features(&checker);
    // horizontal and vertical neighbours differ, diagonal ones match
    rp.compare_values(2.0 * 961.0, features.contrast()[0], 1e-9);
    rp.compare_values(2.0 + 2.0 / 962.0, features.homogeneity()[0], 1e-9);
    // distance 2 lands on the same color in every direction
    rp.compare_values(0.0, features.contrast()[1], 1e-12);
    rp.compare_values(1.0, features.entropy(), 1e-12);

    // --- Test 3: constant image ---
    let flat = GrayImage::from_fn(64, 64, |_, _| 77).expect("flat");
    let features = extract_features(&flat);
    for k in 0..5 {
        rp.compare_values(0.0, features.contrast()[k], 0.0);
        rp.compare_values(4.0, features.homogeneity()[k], 1e-12);
    }
    rp.compare_values(0.0, features.entropy(), 0.0);

    // --- Test 4: horizontal ramp ---
    // each step to the right raises the level by one
    let ramp = GrayImage::from_fn(32, 8, |x, _| (x * 8) as u8).expect("ramp");
    let q = quantize(&ramp, 32);
    let g = Glcm::compute(&q, Offset::from_polar(1, 0));
    rp.compare_values(1.0, g.contrast(), 1e-12);
    rp.compare_values(0.5, g.homogeneity(), 1e-12);
    let g = Glcm::compute(&q, Offset::from_polar(4, 0));
    rp.compare_values(16.0, g.contrast(), 1e-12);
    let g = Glcm::compute(&q, Offset::from_polar(1, 2));
    rp.compare_values(0.0, g.contrast(), 0.0);
    rp.compare_values(5.0, shannon_entropy(&q), 1e-12);

    // --- Test 5: vector length is fixed for every size ---
    for (w, h) in [(1, 1), (2, 5), (17, 3), (40, 40), (128, 96)] {
        let img = GrayImage::from_fn(w, h, |x, y| ((x * 13 + y * 29) % 256) as u8).expect("img");
        let v = extract_features(&img);
        rp.compare_values(FEATURE_DIM as f64, v.as_slice().len() as f64, 0.0);
        rp.check(v.is_finite(), "finite features");
    }

    // --- Test 6: same pixels, same features ---
    let img = GrayImage::from_fn(50, 30, |x, y| ((x * x + y * 3) % 256) as u8).expect("img");
    let a = extract_features(&img);
    let b = extract_features(&img.to_mut().into());
    rp.check(a == b, "deterministic features");

    // --- Test 7: custom options ---
    let coarse = TextureOptions::new().with_levels(2);
    let v = extract_features_with(&checker, &coarse).expect("coarse");
    rp.compare_values(2.0, v.contrast()[0], 1e-12);
    let bad_levels = TextureOptions::new().with_levels(7);
    rp.check(extract_features_with(&checker, &bad_levels).is_err(), "bad levels");

    assert!(rp.cleanup(), "glcm regression test failed");
}
