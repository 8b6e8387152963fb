// Host-side tests for frontend constants and how they relate to the engine's.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use scrollscape_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_are_positive() {
    assert!(SCROLL_SMOOTH_TIME_SEC > 0.0);
    assert!(SCROLL_SETTLE_EPSILON > 0.0 && SCROLL_SETTLE_EPSILON < VISIBILITY_EPSILON);
    assert!(MAX_FRAME_DT_SEC > 0.0);
    // a capped frame must still be shorter than the quickest intro fade
    assert!(MAX_FRAME_DT_SEC * 1000.0 < INTRO_TEXT_FADE_MS as f32);
}

#[test]
fn dom_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        SCROLL_SPACER_ID,
        INTRO_OVERLAY_ID,
        INTRO_TEXT_ID,
        CONTENT_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "{a} is not a valid id");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn one_draw_slot_per_depth_scene() {
    // intro, analytics and onboarding are the depth-rendered scenes
    assert_eq!(MAX_DEPTH_DRAWS, 3);
    assert!(DEPTH_POINT_SIZE > 0.0);
    assert!(INTRO_GLOW_PX > 0.0);
}

#[test]
fn sprite_colors_are_normalized() {
    for c in BILLBOARD_CORE_RGBA.iter().chain(BILLBOARD_EDGE_RGBA.iter()) {
        assert!((0.0..=1.0).contains(c));
    }
    assert!(BILLBOARD_EDGE_RGBA[3] < BILLBOARD_CORE_RGBA[3]);
}

#[test]
fn clear_color_is_dark() {
    assert!(CLEAR_LINEAR > 0.0 && CLEAR_LINEAR < 0.01);
}
