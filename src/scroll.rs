// Scroll position tracking: raw page scroll to a damped, normalized offset.
// Pure Rust so the host tests can include it.

/// Map a page scroll position to `[0, 1]`.
///
/// `scroll_height` and `client_height` come from the scrolling element; a page
/// that cannot scroll reports 0.
#[inline]
pub fn normalize_scroll(scroll_top: f64, scroll_height: f64, client_height: f64) -> f32 {
    let range = scroll_height - client_height;
    if !(range > 0.0) || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / range).clamp(0.0, 1.0) as f32
}

/// CSS height for the spacer that gives `pages` screens of scroll.
pub fn spacer_height_css(pages: f32) -> String {
    format!("{}vh", (pages.max(1.0) * 100.0).round())
}

/// Critically damped follower of the raw offset, the same feel as
/// scroll-controls with `damping = smooth_time`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSmoother {
    pub current: f32,
    pub velocity: f32,
    pub smooth_time: f32,
}

impl ScrollSmoother {
    pub fn new(smooth_time: f32) -> Self {
        Self {
            current: 0.0,
            velocity: 0.0,
            smooth_time: smooth_time.max(1e-4),
        }
    }

    /// Jump straight to `value` (used while scrolling is locked).
    pub fn reset(&mut self, value: f32) {
        self.current = value.clamp(0.0, 1.0);
        self.velocity = 0.0;
    }

    pub fn step(&mut self, target: f32, dt_sec: f32, epsilon: f32) -> f32 {
        let target = target.clamp(0.0, 1.0);
        if dt_sec <= 0.0 {
            return self.current;
        }
        let omega = 2.0 / self.smooth_time;
        let x = omega * dt_sec;
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
        let change = self.current - target;
        let temp = (self.velocity + omega * change) * dt_sec;
        self.velocity = (self.velocity - omega * temp) * exp;
        let mut next = target + (change + temp) * exp;
        // never shoot past the target
        if (target - self.current > 0.0) == (next > target) {
            next = target;
            self.velocity = 0.0;
        }
        if (next - target).abs() < epsilon && self.velocity.abs() < epsilon {
            next = target;
            self.velocity = 0.0;
        }
        self.current = next.clamp(0.0, 1.0);
        self.current
    }
}
