// Host-side tests for the intro phase table and sequencer.

use scrollscape_core::constants::*;
use scrollscape_core::*;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn phases_are_visited_once_each_in_order() {
    let mut seq = IntroSequencer::default();
    let mut seen = vec![seq.phase()];
    let mut completions = 0;
    let mut t = 0;
    while t <= 7000 {
        let u = seq.advance(ms(t));
        if u.changed {
            seen.push(u.phase);
        }
        if u.completed {
            completions += 1;
        }
        t += 16;
    }
    assert_eq!(seen, [0, 1, 2, 3]);
    assert_eq!(completions, 1);
    assert!(seq.is_complete());
}

#[test]
fn phase_changes_land_on_the_table() {
    let mut seq = IntroSequencer::default();
    assert_eq!(seq.advance(ms(1499)).phase, 0);
    let u = seq.advance(ms(1500));
    assert!(u.changed);
    assert_eq!(u.phase, 1);
    assert_eq!(seq.advance(ms(3000)).phase, 2);
    assert_eq!(seq.advance(ms(4500)).phase, 3);
    assert!(!seq.advance(ms(5499)).completed);
    assert!(seq.advance(ms(5500)).completed);
    assert!(!seq.advance(ms(5600)).completed);
}

#[test]
fn a_long_stall_still_steps_one_phase_per_update() {
    let mut seq = IntroSequencer::default();
    let updates: Vec<IntroUpdate> = (0..5).map(|_| seq.advance(ms(10_000))).collect();
    let phases: Vec<u8> = updates.iter().map(|u| u.phase).collect();
    assert_eq!(phases, [1, 2, 3, 3, 3]);
    assert_eq!(updates.iter().filter(|u| u.completed).count(), 1);
    assert!(updates[3].completed);
}

#[test]
fn cancel_freezes_progress() {
    let mut seq = IntroSequencer::default();
    seq.advance(ms(1600));
    assert_eq!(seq.phase(), 1);
    seq.cancel();
    assert!(seq.is_cancelled());
    for t in [2000, 4000, 6000, 60_000] {
        let u = seq.advance(ms(t));
        assert_eq!(u.phase, 1);
        assert!(!u.changed && !u.completed);
    }
    assert!(!seq.is_complete());
}

#[test]
fn invalid_tables_are_rejected() {
    assert!(PhaseTimeline::new(&[], 100).is_err());
    assert!(PhaseTimeline::new(&[10, 20], 100).is_err());
    assert!(PhaseTimeline::new(&[0, 20, 20], 100).is_err());
    assert!(PhaseTimeline::new(&[0, 50], 50).is_err());
    let ok = PhaseTimeline::new(&[0, 50], 80).unwrap();
    assert_eq!(ok.last_phase(), 1);
    assert_eq!(ok.span(1).map(|s| s.end_ms), Some(80));
}

#[test]
fn default_table_matches_the_boot_sequence() {
    let t = PhaseTimeline::default();
    let starts: Vec<u64> = t.spans().iter().map(|s| s.start_ms).collect();
    assert_eq!(starts, INTRO_PHASE_STARTS_MS);
    assert_eq!(t.done_ms(), INTRO_DONE_MS);
    assert_eq!(t.phase_at(0), 0);
    assert_eq!(t.phase_at(2999), 1);
    assert_eq!(t.phase_at(99_999), 3);
}

#[test]
fn text_and_accent_follow_the_phase() {
    let mut seq = IntroSequencer::default();
    assert_eq!(seq.text(), INTRO_TEXT[0]);
    assert_eq!(seq.accent(), INTRO_TEXT_RGBA);
    for t in [1500, 3000, 4500] {
        seq.advance(ms(t));
    }
    assert_eq!(seq.text(), INTRO_TEXT[3]);
    assert_eq!(&seq.accent()[..3], &SUCCESS_RGB[..]);
}

#[test]
fn text_fades_in_after_each_phase_change() {
    let mut seq = IntroSequencer::default();
    assert_eq!(seq.text_opacity(ms(0)), 0.0);
    assert_eq!(seq.text_opacity(ms(INTRO_TEXT_FADE_MS)), 1.0);
    seq.advance(ms(1500));
    assert_eq!(seq.text_opacity(ms(1500)), 0.0);
    assert!((seq.text_opacity(ms(1500 + INTRO_TEXT_FADE_MS / 2)) - 0.5).abs() < 1e-3);
}

#[test]
fn scene_fades_out_before_teardown() {
    let seq = IntroSequencer::default();
    assert_eq!(seq.scene_opacity(ms(0)), 1.0);
    assert_eq!(seq.scene_opacity(ms(INTRO_DONE_MS - INTRO_OUTRO_MS)), 1.0);
    assert!((seq.scene_opacity(ms(INTRO_DONE_MS - INTRO_OUTRO_MS / 2)) - 0.5).abs() < 1e-3);
    assert_eq!(seq.scene_opacity(ms(INTRO_DONE_MS)), 0.0);
}
