// Host-side tests for the scroll timeline ramps and page windows.

use scrollscape_core::*;

fn at(offset: f32, pages: f32) -> ScrollTimeline {
    let mut t = ScrollTimeline::new(pages);
    t.set_offset(offset);
    t
}

#[test]
fn range_is_zero_before_one_after_and_monotonic_between() {
    let (start, length) = (0.3, 0.2);
    assert_eq!(at(0.0, 5.0).range(start, length), 0.0);
    assert_eq!(at(0.29, 5.0).range(start, length), 0.0);
    assert_eq!(at(0.51, 5.0).range(start, length), 1.0);
    assert_eq!(at(1.0, 5.0).range(start, length), 1.0);

    let mut prev = -1.0;
    for i in 0..=100 {
        let offset = start + length * i as f32 / 100.0;
        let r = at(offset, 5.0).range(start, length);
        assert!((0.0..=1.0).contains(&r));
        assert!(r >= prev, "range decreased at offset {offset}");
        prev = r;
    }
    assert!((at(0.4, 5.0).range(start, length) - 0.5).abs() < 1e-5);
}

#[test]
fn range_degenerate_windows_clamp_instead_of_failing() {
    // zero length: step at start
    assert_eq!(at(0.49, 5.0).range(0.5, 0.0), 0.0);
    assert_eq!(at(0.5, 5.0).range(0.5, 0.0), 1.0);
    assert_eq!(at(0.7, 5.0).range(0.5, -1.0), 1.0);
    // window past the end: ramp completes at offset 1
    assert_eq!(at(1.0, 5.0).range(0.8, 0.5), 1.0);
    assert!((at(0.9, 5.0).range(0.8, 0.5) - 0.5).abs() < 1e-5);
}

#[test]
fn range_with_margin_widens_the_window() {
    let t = at(0.25, 5.0);
    assert_eq!(t.range(0.3, 0.2), 0.0);
    assert!(t.range_with_margin(0.3, 0.2, 0.1) > 0.0);
}

#[test]
fn curve_peaks_at_window_center_and_vanishes_outside() {
    let (start, length) = (0.4, 0.2);
    assert!((at(0.5, 5.0).curve(start, length) - 1.0).abs() < 1e-5);
    assert_eq!(at(0.39, 5.0).curve(start, length), 0.0);
    assert_eq!(at(0.4, 5.0).curve(start, length), 0.0);
    assert_eq!(at(0.6, 5.0).curve(start, length), 0.0);
    assert_eq!(at(0.8, 5.0).curve(start, length), 0.0);
    let quarter = at(0.45, 5.0).curve(start, length);
    assert!(quarter > 0.0 && quarter < 1.0);
    assert_eq!(at(0.5, 5.0).curve(start, 0.0), 0.0);
}

#[test]
fn visible_matches_closed_window() {
    assert!(at(0.4, 5.0).visible(0.4, 0.2));
    assert!(at(0.59, 5.0).visible(0.4, 0.2));
    assert!(!at(0.61, 5.0).visible(0.4, 0.2));
}

#[test]
fn page_windows_tile_the_timeline() {
    for pages in [1.0_f32, 2.0, 3.0, 5.0, 6.0, 7.0] {
        let t = ScrollTimeline::new(pages);
        assert!((t.page_len() * pages - 1.0).abs() < 1e-6);
        let mut cursor = 0.0;
        for k in 0..t.page_count() {
            let (s, e) = t.page_window(k);
            assert!((s - cursor).abs() < 1e-6, "gap before page {k} of {pages}");
            assert!(e > s);
            cursor = e;
        }
        assert!((cursor - 1.0).abs() < 1e-5);
    }
}

#[test]
fn page_opacity_at_top_of_five_pages() {
    let t = at(0.0, 5.0);
    assert_eq!(t.page_opacity(0, 0.5), 1.0);
    assert_eq!(t.page_opacity(4, 0.5), 0.0);
}

#[test]
fn page_opacity_on_last_page_of_five() {
    let t = at(0.9, 5.0);
    assert_eq!(t.page_opacity(4, 0.5), 1.0);
    assert_eq!(t.page_opacity(0, 0.5), 0.0);
    // last page does not fade out at the very end
    assert_eq!(at(1.0, 5.0).page_opacity(4, 0.5), 1.0);
}

#[test]
fn page_opacity_is_full_inside_each_window() {
    let pages = 6.0;
    let probe = ScrollTimeline::new(pages);
    for k in 0..probe.page_count() {
        let (s, e) = probe.page_window(k);
        let mid = (s + e) / 2.0;
        assert_eq!(at(mid, pages).page_opacity(k, 0.5), 1.0, "page {k}");
    }
}

#[test]
fn invalid_page_counts_fall_back_to_one_page() {
    for pages in [0.0, -3.0, f32::NAN, f32::INFINITY] {
        let t = ScrollTimeline::new(pages);
        assert_eq!(t.pages(), 1.0);
        assert_eq!(t.page_len(), 1.0);
        assert_eq!(t.page_count(), 1);
    }
}

#[test]
fn offset_is_clamped_and_may_move_backward() {
    let mut t = ScrollTimeline::new(5.0);
    t.set_offset(1.5);
    assert_eq!(t.offset(), 1.0);
    t.set_offset(0.3);
    assert_eq!(t.offset(), 0.3);
    t.set_offset(-0.2);
    assert_eq!(t.offset(), 0.0);
    t.set_offset(f32::NAN);
    assert_eq!(t.offset(), 0.0);
}
