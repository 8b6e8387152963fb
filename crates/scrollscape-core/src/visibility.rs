//! Scene visibility controller.
//!
//! Each frame the controller derives a [`SceneVisibility`] for every
//! registered scene from the scroll timeline ([`SceneController::compute`]),
//! then writes the result into its owned slots ([`SceneController::commit`]).
//! Computation is pure; only `commit` mutates.

use crate::constants::*;
use crate::state::Transform;
use crate::timeline::ScrollTimeline;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneId {
    Intro,
    Fluid,
    Depth,
    Network,
    Onboarding,
}

impl SceneId {
    pub fn name(self) -> &'static str {
        match self {
            SceneId::Intro => "intro",
            SceneId::Fluid => "fluid",
            SceneId::Depth => "depth",
            SceneId::Network => "network",
            SceneId::Onboarding => "onboarding",
        }
    }
}

/// Responsive layout bucket, picked from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Wide,
    Narrow,
}

impl ViewportClass {
    pub fn from_width_px(width: f64) -> Self {
        if width < NARROW_BREAKPOINT_PX {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }

    pub fn pages(self) -> f32 {
        match self {
            ViewportClass::Wide => PAGES_WIDE,
            ViewportClass::Narrow => PAGES_NARROW,
        }
    }

    /// Group scale for scenes that shrink on narrow screens.
    pub fn scale(self) -> f32 {
        match self {
            ViewportClass::Wide => 1.0,
            ViewportClass::Narrow => NARROW_SCALE,
        }
    }

    /// Background dimming so overlaid copy stays readable.
    pub fn dim(self) -> f32 {
        match self {
            ViewportClass::Wide => 1.0,
            ViewportClass::Narrow => NARROW_DIM,
        }
    }
}

/// How a scene's opacity is derived from the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    /// Shown only while the intro runs.
    IntroOnly,
    /// Owns page `k`.
    Page(usize),
    /// Sine pulse over page `k`.
    PagePulse(usize),
    /// Owns the final page.
    LastPage,
    /// Ramps in over the second half of the final page.
    LastPageTail,
    FadeIn { start: f32, length: f32 },
    FadeOut { start: f32, length: f32 },
}

impl Gate {
    pub fn evaluate(self, timeline: &ScrollTimeline) -> f32 {
        match self {
            Gate::IntroOnly => 0.0,
            Gate::Page(k) => timeline.page_opacity(k, PAGE_FADE),
            Gate::PagePulse(k) => timeline.page_pulse(k),
            Gate::LastPage => {
                timeline.page_opacity(timeline.page_count().saturating_sub(1), PAGE_FADE)
            }
            Gate::LastPageTail => {
                let half = timeline.page_len() * 0.5;
                timeline.range(1.0 - half, half)
            }
            Gate::FadeIn { start, length } => timeline.range(start, length),
            Gate::FadeOut { start, length } => 1.0 - timeline.range(start, length),
        }
    }
}

/// Scene-specific transform derived from scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Static,
    /// Push back along -z by `k` over the full scroll.
    Parallax { k: f32 },
    /// Yaw by `k` radians over the full scroll.
    Spin { k: f32 },
    /// Start at `from_z` and slide to the base position as the gate opens.
    SlideIn { from_z: f32 },
}

#[derive(Clone, Debug)]
pub struct SceneSpec {
    pub id: SceneId,
    pub gate: Gate,
    pub motion: Motion,
    pub base: Transform,
    pub narrow_scale: bool,
    pub narrow_dim: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneVisibility {
    pub visible: bool,
    pub opacity: f32,
    /// Drive scalar handed to the scene (scroll progress, dimmed on narrow screens).
    pub intensity: f32,
    pub transform: Transform,
}

impl SceneVisibility {
    pub const HIDDEN: Self = Self {
        visible: false,
        opacity: 0.0,
        intensity: 0.0,
        transform: Transform::IDENTITY,
    };
}

/// One frame's worth of scene values, in registration order.
#[derive(Clone, Debug, Default)]
pub struct FrameVisibility {
    pub entries: SmallVec<[(SceneId, SceneVisibility); 8]>,
}

impl FrameVisibility {
    pub fn get(&self, id: SceneId) -> Option<&SceneVisibility> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, v)| v)
    }

    pub fn opacity(&self, id: SceneId) -> f32 {
        self.get(id).map_or(0.0, |v| v.opacity)
    }

    /// Multiply one scene's opacity, re-deriving its visibility.
    pub fn fade(&mut self, id: SceneId, factor: f32) {
        if let Some((_, v)) = self.entries.iter_mut().find(|(i, _)| *i == id) {
            v.opacity = (v.opacity * factor).clamp(0.0, 1.0);
            v.visible = v.visible && v.opacity > VISIBILITY_EPSILON;
        }
    }
}

struct SceneSlot {
    spec: SceneSpec,
    state: SceneVisibility,
}

pub struct SceneController {
    slots: Vec<SceneSlot>,
    viewport: ViewportClass,
}

impl SceneController {
    pub fn new(specs: Vec<SceneSpec>, viewport: ViewportClass) -> Self {
        let slots = specs
            .into_iter()
            .map(|spec| SceneSlot {
                spec,
                state: SceneVisibility::HIDDEN,
            })
            .collect();
        Self { slots, viewport }
    }

    /// The landing stage: intro cloud, fluid backdrop on the first page, depth
    /// cloud pulsing over page 2, shape morpher on the last page and the
    /// onboarding cloud sliding in at the very end.
    pub fn standard(viewport: ViewportClass) -> Self {
        let specs = vec![
            SceneSpec {
                id: SceneId::Intro,
                gate: Gate::IntroOnly,
                motion: Motion::Static,
                base: Transform::IDENTITY,
                narrow_scale: true,
                narrow_dim: false,
            },
            SceneSpec {
                id: SceneId::Fluid,
                gate: Gate::Page(0),
                motion: Motion::Parallax { k: FLUID_PARALLAX },
                base: Transform::IDENTITY,
                narrow_scale: false,
                narrow_dim: true,
            },
            SceneSpec {
                id: SceneId::Depth,
                gate: Gate::PagePulse(2),
                motion: Motion::Spin { k: DEPTH_SPIN },
                base: Transform::IDENTITY,
                narrow_scale: false,
                narrow_dim: true,
            },
            SceneSpec {
                id: SceneId::Network,
                gate: Gate::LastPage,
                motion: Motion::Static,
                base: Transform::uniform(NETWORK_GROUP_SCALE),
                narrow_scale: false,
                narrow_dim: false,
            },
            SceneSpec {
                id: SceneId::Onboarding,
                gate: Gate::LastPageTail,
                motion: Motion::SlideIn {
                    from_z: ONBOARDING_FROM_Z,
                },
                base: Transform::IDENTITY,
                narrow_scale: true,
                narrow_dim: true,
            },
        ];
        Self::new(specs, viewport)
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: ViewportClass) {
        self.viewport = viewport;
    }

    pub fn compute(&self, timeline: &ScrollTimeline, intro: bool) -> FrameVisibility {
        let mut frame = FrameVisibility::default();
        for slot in &self.slots {
            frame
                .entries
                .push((slot.spec.id, self.evaluate(&slot.spec, timeline, intro)));
        }
        frame
    }

    fn evaluate(&self, spec: &SceneSpec, timeline: &ScrollTimeline, intro: bool) -> SceneVisibility {
        let mut transform = spec.base;
        if spec.narrow_scale {
            transform.scale *= self.viewport.scale();
        }

        // Intro mode overrides everything: no blending with scroll scenes.
        if intro || spec.gate == Gate::IntroOnly {
            let on = intro && spec.gate == Gate::IntroOnly;
            return SceneVisibility {
                visible: on,
                opacity: if on { 1.0 } else { 0.0 },
                intensity: if on { 1.0 } else { 0.0 },
                transform,
            };
        }

        let offset = timeline.offset();
        let gate = spec.gate.evaluate(timeline).clamp(0.0, 1.0);
        let dim = if spec.narrow_dim {
            self.viewport.dim()
        } else {
            1.0
        };
        match spec.motion {
            Motion::Static => {}
            Motion::Parallax { k } => transform.position.z -= offset * k,
            Motion::Spin { k } => transform.rotation.y += offset * k,
            Motion::SlideIn { from_z } => transform.position.z += from_z * (1.0 - gate),
        }
        let opacity = gate * dim;
        SceneVisibility {
            visible: opacity > VISIBILITY_EPSILON,
            opacity,
            intensity: offset * dim,
            transform,
        }
    }

    /// Write a computed frame into the scene slots in place.
    pub fn commit(&mut self, frame: &FrameVisibility) {
        for (id, vis) in &frame.entries {
            if let Some(slot) = self.slots.iter_mut().find(|s| s.spec.id == *id) {
                slot.state = *vis;
            }
        }
    }

    pub fn get(&self, id: SceneId) -> Option<&SceneVisibility> {
        self.slots
            .iter()
            .find(|s| s.spec.id == id)
            .map(|s| &s.state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SceneId, &SceneVisibility)> {
        self.slots.iter().map(|s| (s.spec.id, &s.state))
    }
}
