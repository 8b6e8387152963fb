#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use style::*;

#[test]
fn rgba_scales_channels() {
    assert_eq!(css_rgba([1.0, 1.0, 1.0, 0.8]), "rgba(255, 255, 255, 0.80)");
    assert_eq!(css_rgba([0.0, 1.0, 0.533, 1.0]), "rgba(0, 255, 136, 1.00)");
}

#[test]
fn rgba_clamps_out_of_range() {
    assert_eq!(css_rgba([-0.5, 2.0, 0.5, 1.5]), "rgba(0, 255, 128, 1.00)");
}

#[test]
fn glow_uses_color_and_radius() {
    assert_eq!(
        glow_shadow([0.0, 1.0, 0.533, 1.0], 10.0).as_deref(),
        Some("0 0 10px rgba(0, 255, 136, 1.00)")
    );
    assert_eq!(glow_shadow([1.0; 4], 0.0), None);
    assert_eq!(glow_shadow([1.0; 4], -3.0), None);
}
