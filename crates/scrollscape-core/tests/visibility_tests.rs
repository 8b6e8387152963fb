// Host-side tests for the scene visibility controller.

use scrollscape_core::*;
use std::f32::consts::PI;

fn timeline(offset: f32, viewport: ViewportClass) -> ScrollTimeline {
    let mut t = ScrollTimeline::new(viewport.pages());
    t.set_offset(offset);
    t
}

fn wide() -> SceneController {
    SceneController::standard(ViewportClass::Wide)
}

#[test]
fn top_of_page_shows_only_the_fluid_backdrop() {
    let c = wide();
    let f = c.compute(&timeline(0.0, ViewportClass::Wide), false);
    let fluid = f.get(SceneId::Fluid).unwrap();
    assert!(fluid.visible);
    assert_eq!(fluid.opacity, 1.0);
    for id in [SceneId::Intro, SceneId::Depth, SceneId::Network, SceneId::Onboarding] {
        assert!(!f.get(id).unwrap().visible, "{} should be hidden", id.name());
    }
}

#[test]
fn last_page_shows_the_network_and_hides_the_fluid() {
    let c = wide();
    let f = c.compute(&timeline(0.9, ViewportClass::Wide), false);
    assert_eq!(f.opacity(SceneId::Network), 1.0);
    assert!(f.get(SceneId::Network).unwrap().visible);
    assert_eq!(f.opacity(SceneId::Fluid), 0.0);
    assert!(!f.get(SceneId::Fluid).unwrap().visible);
}

#[test]
fn depth_scene_pulses_over_its_page_and_spins_with_scroll() {
    let c = wide();
    let f = c.compute(&timeline(0.5, ViewportClass::Wide), false);
    let depth = f.get(SceneId::Depth).unwrap();
    assert!(depth.visible);
    assert!((depth.opacity - 1.0).abs() < 1e-4);
    assert!((depth.transform.rotation.y - 0.5 * PI).abs() < 1e-5);

    let early = c.compute(&timeline(0.3, ViewportClass::Wide), false);
    assert!(!early.get(SceneId::Depth).unwrap().visible);
}

#[test]
fn fluid_parallax_pushes_back_with_scroll() {
    let c = wide();
    let f = c.compute(&timeline(0.1, ViewportClass::Wide), false);
    let fluid = f.get(SceneId::Fluid).unwrap();
    assert!((fluid.transform.position.z + 0.5).abs() < 1e-5);
}

#[test]
fn onboarding_slides_in_at_the_very_end() {
    let c = wide();
    let hidden = c.compute(&timeline(0.5, ViewportClass::Wide), false);
    let o = hidden.get(SceneId::Onboarding).unwrap();
    assert!(!o.visible);
    assert!((o.transform.position.z - ONBOARDING_Z).abs() < 1e-5);

    let end = c.compute(&timeline(1.0, ViewportClass::Wide), false);
    let o = end.get(SceneId::Onboarding).unwrap();
    assert!(o.visible);
    assert_eq!(o.opacity, 1.0);
    assert!(o.transform.position.z.abs() < 1e-5);
}

const ONBOARDING_Z: f32 = scrollscape_core::constants::ONBOARDING_FROM_Z;

#[test]
fn intro_flag_overrides_every_scroll_scene() {
    let c = wide();
    for offset in [0.0, 0.5, 0.9, 1.0] {
        let f = c.compute(&timeline(offset, ViewportClass::Wide), true);
        let intro = f.get(SceneId::Intro).unwrap();
        assert!(intro.visible);
        assert_eq!(intro.opacity, 1.0);
        for id in [SceneId::Fluid, SceneId::Depth, SceneId::Network, SceneId::Onboarding] {
            let v = f.get(id).unwrap();
            assert!(!v.visible, "{} visible during intro at {offset}", id.name());
            assert_eq!(v.opacity, 0.0);
        }
    }
    let after = c.compute(&timeline(0.0, ViewportClass::Wide), false);
    assert!(!after.get(SceneId::Intro).unwrap().visible);
}

#[test]
fn narrow_viewport_dims_and_shrinks() {
    let c = SceneController::standard(ViewportClass::Narrow);
    let t = timeline(0.0, ViewportClass::Narrow);
    assert_eq!(t.pages(), 6.0);
    let f = c.compute(&t, false);
    assert!((f.opacity(SceneId::Fluid) - 0.3).abs() < 1e-6);

    let intro = c.compute(&t, true);
    let scale = intro.get(SceneId::Intro).unwrap().transform.scale;
    assert!((scale.x - 0.7).abs() < 1e-6);
}

#[test]
fn viewport_class_follows_breakpoint() {
    assert_eq!(ViewportClass::from_width_px(375.0), ViewportClass::Narrow);
    assert_eq!(ViewportClass::from_width_px(767.9), ViewportClass::Narrow);
    assert_eq!(ViewportClass::from_width_px(768.0), ViewportClass::Wide);
    assert_eq!(ViewportClass::from_width_px(1440.0), ViewportClass::Wide);
}

#[test]
fn commit_writes_computed_values_into_slots() {
    let mut c = wide();
    assert!(!c.get(SceneId::Fluid).unwrap().visible);
    let f = c.compute(&timeline(0.0, ViewportClass::Wide), false);
    c.commit(&f);
    assert_eq!(c.get(SceneId::Fluid), f.get(SceneId::Fluid));
    assert_eq!(c.iter().count(), 5);
}

#[test]
fn fade_below_threshold_hides_a_scene() {
    let c = wide();
    let mut f = c.compute(&timeline(0.0, ViewportClass::Wide), true);
    f.fade(SceneId::Intro, 0.5);
    assert!(f.get(SceneId::Intro).unwrap().visible);
    f.fade(SceneId::Intro, 0.001);
    assert!(!f.get(SceneId::Intro).unwrap().visible);
}

#[test]
fn custom_gates_evaluate_against_the_timeline() {
    let t = timeline(0.75, ViewportClass::Wide);
    let fade_in = Gate::FadeIn {
        start: 0.5,
        length: 0.5,
    };
    let fade_out = Gate::FadeOut {
        start: 0.5,
        length: 0.5,
    };
    assert!((fade_in.evaluate(&t) - 0.5).abs() < 1e-5);
    assert!((fade_out.evaluate(&t) - 0.5).abs() < 1e-5);
    assert_eq!(Gate::IntroOnly.evaluate(&t), 0.0);
}
