//! Scroll timeline: maps a normalized scroll offset onto per-scene ramps.
//!
//! The timeline is split into `pages` equal windows. Scenes gate their
//! opacity on either a linear ramp ([`ScrollTimeline::range`]), a sine pulse
//! ([`ScrollTimeline::curve`]) or a page window ([`ScrollTimeline::page_opacity`]).
//! All functions are total: degenerate inputs clamp instead of failing.

use std::f32::consts::PI;

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTimeline {
    offset: f32,
    pages: f32,
    page_len: f32,
}

impl ScrollTimeline {
    pub fn new(pages: f32) -> Self {
        let pages = if pages.is_finite() && pages > 0.0 {
            pages
        } else {
            log::warn!("[timeline] invalid page count {pages}, using a single page");
            1.0
        };
        Self {
            offset: 0.0,
            pages,
            page_len: 1.0 / pages,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Store the current scroll offset, clamped to `[0, 1]`.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, 1.0)
        };
    }

    pub fn pages(&self) -> f32 {
        self.pages
    }

    /// Fraction of the timeline covered by one page.
    pub fn page_len(&self) -> f32 {
        self.page_len
    }

    /// Number of whole page windows, counting a trailing partial page.
    pub fn page_count(&self) -> usize {
        self.pages.ceil() as usize
    }

    /// 0 before `start`, 1 after `start + length`, linear in between.
    pub fn range(&self, start: f32, length: f32) -> f32 {
        ramp(self.offset, start, length)
    }

    /// Like [`range`](Self::range) with the window widened by `margin` on both sides.
    pub fn range_with_margin(&self, start: f32, length: f32, margin: f32) -> f32 {
        ramp(self.offset, start - margin, length + 2.0 * margin)
    }

    /// Sine pulse over `[start, start + length]`: 0 at both edges, 1 at the center.
    pub fn curve(&self, start: f32, length: f32) -> f32 {
        if length <= 0.0 {
            return 0.0;
        }
        let t = ((self.offset - start) / length).clamp(0.0, 1.0);
        (t * PI).sin().clamp(0.0, 1.0)
    }

    pub fn visible(&self, start: f32, length: f32) -> bool {
        self.offset >= start && self.offset <= start + length.max(0.0)
    }

    /// `[k/P, (k+1)/P]`, clipped to the timeline.
    pub fn page_window(&self, page: usize) -> (f32, f32) {
        let start = (page as f32 * self.page_len).min(1.0);
        let end = ((page + 1) as f32 * self.page_len).min(1.0);
        (start, end)
    }

    /// Opacity of a scene that owns page `page`: fully on inside the window,
    /// fading over `fade` pages on either side. The first page does not fade
    /// in and the last page does not fade out.
    pub fn page_opacity(&self, page: usize, fade: f32) -> f32 {
        let (start, end) = self.page_window(page);
        let fade_len = fade.max(0.0) * self.page_len;
        let fade_in = if page == 0 {
            1.0
        } else {
            ramp(self.offset, start - fade_len, fade_len)
        };
        let fade_out = if page + 1 >= self.page_count() {
            1.0
        } else {
            1.0 - ramp(self.offset, end, fade_len)
        };
        fade_in * fade_out
    }

    /// Sine pulse spanning page `page`.
    pub fn page_pulse(&self, page: usize) -> f32 {
        let (start, _) = self.page_window(page);
        self.curve(start, self.page_len)
    }
}

impl Default for ScrollTimeline {
    fn default() -> Self {
        Self::new(crate::constants::PAGES_WIDE)
    }
}

/// Linear ramp with the end clipped to the timeline; a non-positive window
/// degenerates to a step at `start`.
#[inline]
pub fn ramp(offset: f32, start: f32, length: f32) -> f32 {
    let end = (start + length).min(1.0);
    if end <= start {
        return if offset < start { 0.0 } else { 1.0 };
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}
