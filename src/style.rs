// CSS string helpers for the overlay. Pure Rust so host tests can include it.

#[inline]
fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `[r, g, b, a]` in `0..=1` to a CSS `rgba()` color.
pub fn css_rgba(color: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {:.2})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Soft text glow in the given color; `None` when the radius is not positive.
pub fn glow_shadow(color: [f32; 4], radius_px: f32) -> Option<String> {
    (radius_px > 0.0).then(|| format!("0 0 {}px {}", radius_px.round(), css_rgba(color)))
}
