//! The visual root: owns every scene's state and runs one frame at a time.

use crate::constants::*;
use crate::depth::{
    BlobField, DepthField, DepthPalette, DepthPoint, DepthPose, DepthProjection, DepthVariant,
    IntensitySource,
};
use crate::intro::{IntroSequencer, PhaseTimeline};
use crate::morph::{Billboard, MorphParams, Morpher};
use crate::state::Transform;
use crate::timeline::ScrollTimeline;
use crate::visibility::{FrameVisibility, SceneController, SceneId, ViewportClass};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct StageConfig {
    pub viewport: ViewportClass,
    pub morph: MorphParams,
    pub projection: DepthProjection,
    /// Resolution of the intensity field; the projection is resolution independent.
    pub field_size: (u32, u32),
    /// `None` skips the intro and starts in scroll mode.
    pub intro: Option<PhaseTimeline>,
    pub seed: u64,
}

impl StageConfig {
    pub fn for_viewport(viewport: ViewportClass) -> Self {
        Self {
            viewport,
            morph: MorphParams::default(),
            projection: DepthProjection::default(),
            field_size: (DEPTH_WIDTH, DEPTH_HEIGHT),
            intro: Some(PhaseTimeline::default()),
            seed: 42,
        }
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::for_viewport(ViewportClass::Wide)
    }
}

/// What collaborators see of the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageProps {
    pub intro: bool,
    pub intro_phase: u8,
    pub total_pages: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub offset: f32,
    /// Time since mount.
    pub elapsed: Duration,
    pub dt: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FluidUniform {
    pub time: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroOverlay {
    pub phase: u8,
    pub text: &'static str,
    pub color: [f32; 4],
    pub opacity: f32,
}

/// A depth cloud as placed for this frame: group transform times pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthInstance {
    pub scene: SceneId,
    pub group: Transform,
    pub pose: Transform,
    pub opacity: f32,
}

#[derive(Default)]
pub struct FrameOutput {
    pub scenes: FrameVisibility,
    pub depth_points: Vec<DepthPoint>,
    pub depth_palette: Option<DepthPalette>,
    pub depth_instances: Vec<DepthInstance>,
    pub billboards: Vec<Billboard>,
    pub network_group: Transform,
    pub network_opacity: f32,
    pub fluid: FluidUniform,
    pub intro: Option<IntroOverlay>,
    /// Set on the single frame where the intro hands over to scroll mode.
    pub intro_completed: bool,
}

struct DepthScene {
    id: SceneId,
    pose: DepthPose,
}

pub struct Stage {
    timeline: ScrollTimeline,
    controller: SceneController,
    morpher: Morpher,
    field: DepthField,
    source: Box<dyn IntensitySource>,
    projection: DepthProjection,
    depth_scenes: Vec<DepthScene>,
    intro: Option<IntroSequencer>,
    fluid_time: f32,
    /// Latest `elapsed` seen; the morph layout clock runs on its increments.
    last_elapsed: Duration,
    out: FrameOutput,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let source = Box::new(BlobField::new(config.seed ^ 0xB10B));
        Self::with_source(config, source)
    }

    /// Use an external intensity feed instead of the procedural blobs.
    pub fn with_source(config: StageConfig, source: Box<dyn IntensitySource>) -> Self {
        let (w, h) = config.field_size;
        let seed = config.seed;
        let depth_scenes = [
            (SceneId::Intro, DepthVariant::Intro),
            (SceneId::Depth, DepthVariant::Analytics),
            (SceneId::Onboarding, DepthVariant::Onboarding),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (id, variant))| DepthScene {
            id,
            pose: DepthPose::new(variant, seed.wrapping_add(i as u64)),
        })
        .collect();
        log::info!(
            "[stage] pages={} field={}x{} morph_points={}",
            config.viewport.pages(),
            w,
            h,
            config.morph.count
        );
        Self {
            timeline: ScrollTimeline::new(config.viewport.pages()),
            controller: SceneController::standard(config.viewport),
            morpher: Morpher::new(config.morph, seed),
            field: DepthField::new(w, h),
            source,
            projection: config.projection,
            depth_scenes,
            intro: config.intro.map(IntroSequencer::new),
            fluid_time: 0.0,
            last_elapsed: Duration::ZERO,
            out: FrameOutput::default(),
        }
    }

    pub fn props(&self) -> StageProps {
        StageProps {
            intro: self.intro_active(),
            intro_phase: self.intro.as_ref().map_or(0, |s| s.phase()),
            total_pages: self.timeline.pages(),
        }
    }

    pub fn intro_active(&self) -> bool {
        self.intro.as_ref().is_some_and(|s| !s.is_complete())
    }

    pub fn set_viewport(&mut self, viewport: ViewportClass) {
        if viewport == self.controller.viewport() {
            return;
        }
        let offset = self.timeline.offset();
        self.timeline = ScrollTimeline::new(viewport.pages());
        self.timeline.set_offset(offset);
        self.controller.set_viewport(viewport);
        log::info!("[stage] viewport {:?}, pages={}", viewport, viewport.pages());
    }

    pub fn timeline(&self) -> &ScrollTimeline {
        &self.timeline
    }

    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    pub fn morpher(&self) -> &Morpher {
        &self.morpher
    }

    pub fn field(&self) -> &DepthField {
        &self.field
    }

    pub fn output(&self) -> &FrameOutput {
        &self.out
    }

    /// Freeze the intro; nothing advances it after unmount.
    pub fn teardown(&mut self) {
        if let Some(seq) = &mut self.intro {
            seq.cancel();
        }
    }

    pub fn frame(&mut self, input: FrameInput) -> &FrameOutput {
        let dt_sec = input.dt.as_secs_f32();
        let time = input.elapsed.as_secs_f32();
        self.timeline.set_offset(input.offset);

        // Intro first: it decides which scene set is live.
        self.out.intro_completed = false;
        let mut phase = 0;
        let mut intro_fade = 1.0;
        if let Some(seq) = &mut self.intro {
            let update = seq.advance(input.elapsed);
            phase = update.phase;
            intro_fade = seq.scene_opacity(input.elapsed);
            if update.completed {
                self.out.intro_completed = true;
            }
        }
        let intro = self.intro_active();

        let mut scenes = self.controller.compute(&self.timeline, intro);
        if intro {
            scenes.fade(SceneId::Intro, intro_fade);
        }
        self.controller.commit(&scenes);

        // Morph and depth feed run regardless of scroll.
        // Layout rotation keeps wall time even when the host caps `dt`.
        let wall = input.elapsed.saturating_sub(self.last_elapsed);
        self.last_elapsed = self.last_elapsed.max(input.elapsed);
        self.morpher.advance(wall, input.dt);
        self.fluid_time += dt_sec * 0.5;
        self.source.render(dt_sec, &mut self.field);

        self.out.depth_instances.clear();
        let mut palette = DepthPalette::Standard;
        for scene in &mut self.depth_scenes {
            let Some(vis) = self.controller.get(scene.id) else {
                continue;
            };
            scene.pose.advance(vis.intensity, phase, time, dt_sec);
            if vis.visible {
                if scene.id == SceneId::Intro {
                    palette = scene.pose.palette(phase);
                }
                self.out.depth_instances.push(DepthInstance {
                    scene: scene.id,
                    group: vis.transform,
                    pose: scene.pose.transform,
                    opacity: vis.opacity,
                });
            }
        }
        if self.out.depth_instances.is_empty() {
            self.out.depth_points.clear();
            self.out.depth_palette = None;
        } else {
            self.projection
                .project_into(&self.field, palette, &mut self.out.depth_points);
            self.out.depth_palette = Some(palette);
        }

        let network = self
            .controller
            .get(SceneId::Network)
            .copied()
            .unwrap_or(crate::visibility::SceneVisibility::HIDDEN);
        self.out.network_group = network.transform;
        self.out.network_opacity = if network.visible { network.opacity } else { 0.0 };
        // Billboards face the camera in the group's own space.
        let eye_local = network
            .transform
            .matrix()
            .inverse()
            .transform_point3(camera_eye());
        self.morpher
            .billboards_into(eye_local, time, &mut self.out.billboards);

        let fluid = scenes.get(SceneId::Fluid);
        self.out.fluid = FluidUniform {
            time: self.fluid_time,
            opacity: fluid.filter(|v| v.visible).map_or(0.0, |v| v.opacity),
        };

        self.out.intro = self.intro.as_ref().filter(|s| !s.is_complete()).map(|s| IntroOverlay {
            phase: s.phase(),
            text: s.text(),
            color: s.accent(),
            opacity: s.text_opacity(input.elapsed),
        });
        self.out.scenes = scenes;
        &self.out
    }
}
