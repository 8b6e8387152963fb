//! Depth-camera style point clouds.
//!
//! A [`DepthField`] of intensities is projected into one point per pixel by
//! [`DepthProjection`]. The field itself comes from any [`IntensitySource`];
//! [`BlobField`] is the procedural stand-in for a live depth feed.

use crate::constants::*;
use crate::error::{CoreError, Result};
use crate::state::Transform;
use glam::{Vec2, Vec3};
use rand::prelude::*;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Debug, PartialEq)]
pub struct DepthField {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DepthField {
    pub fn new(width: u32, height: u32) -> Self {
        Self::uniform(width, height, 0.0)
    }

    pub fn uniform(width: u32, height: u32, value: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    pub fn from_samples(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if expected == 0 || data.len() != expected {
            return Err(CoreError::FieldSize {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, u: u32, v: u32) -> usize {
        v as usize * self.width as usize + u as usize
    }

    #[inline]
    pub fn get(&self, u: u32, v: u32) -> f32 {
        self.data[self.index(u, v)]
    }

    #[inline]
    pub fn set(&mut self, u: u32, v: u32, value: f32) {
        let i = self.index(u, v);
        self.data[i] = value;
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// One projected point, laid out for direct upload as a GPU instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DepthPoint {
    /// xyz in camera units, w = source intensity.
    pub pos_intensity: [f32; 4],
    pub color: [f32; 4],
}

impl DepthPoint {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.pos_intensity[0],
            self.pos_intensity[1],
            self.pos_intensity[2],
        )
    }

    pub fn intensity(&self) -> f32 {
        self.pos_intensity[3]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthPalette {
    /// Cyan/blue, brighter when closer.
    Standard,
    /// Success green used once the intro locks in.
    Success,
}

impl DepthPalette {
    pub fn color(self, intensity: f32) -> [f32; 4] {
        let alpha = 0.8 * intensity + 0.2;
        match self {
            DepthPalette::Standard => [0.2, intensity + 0.4, 1.0, alpha],
            DepthPalette::Success => {
                let k = 0.4 + 0.6 * intensity;
                [
                    SUCCESS_RGB[0] * k,
                    SUCCESS_RGB[1] * k,
                    SUCCESS_RGB[2] * k,
                    alpha,
                ]
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DepthProjection {
    pub near: f32,
    pub far: f32,
    pub kx: f32,
    pub ky: f32,
    pub z_offset: f32,
    /// Pixels darker than this are dropped.
    pub cutoff: f32,
}

impl Default for DepthProjection {
    fn default() -> Self {
        Self {
            near: DEPTH_NEAR,
            far: DEPTH_FAR,
            kx: DEPTH_X_TO_Z,
            ky: DEPTH_Y_TO_Z,
            z_offset: DEPTH_Z_OFFSET,
            cutoff: DEPTH_CUTOFF,
        }
    }
}

impl DepthProjection {
    /// Project pixel `(u, v)` of a `width x height` grid at intensity `i`.
    #[inline]
    pub fn project_point(&self, u: u32, v: u32, width: u32, height: u32, i: f32) -> Vec3 {
        let z = (1.0 - i) * (self.far - self.near) + self.near;
        let x = (u as f32 / width as f32 - 0.5) * z * self.kx;
        let y = (v as f32 / height as f32 - 0.5) * z * self.ky;
        Vec3::new(x, y, -z + self.z_offset)
    }

    /// Project every pixel at or above the cutoff into `out`, reusing its allocation.
    pub fn project_into(&self, field: &DepthField, palette: DepthPalette, out: &mut Vec<DepthPoint>) {
        out.clear();
        let (w, h) = (field.width(), field.height());
        for v in 0..h {
            for u in 0..w {
                let i = field.get(u, v);
                // also drops NaN
                if !(i >= self.cutoff) {
                    continue;
                }
                let p = self.project_point(u, v, w, h, i);
                out.push(DepthPoint {
                    pos_intensity: [p.x, p.y, p.z, i],
                    color: palette.color(i),
                });
            }
        }
    }

    pub fn project(&self, field: &DepthField, palette: DepthPalette) -> Vec<DepthPoint> {
        let mut out = Vec::with_capacity(field.len());
        self.project_into(field, palette, &mut out);
        out
    }
}

/// Anything that can paint an intensity field once per frame.
pub trait IntensitySource {
    /// Advance by `dt_sec` and write the new frame into `field`.
    fn render(&mut self, dt_sec: f32, field: &mut DepthField);
}

/// A radial gradient "ball": white at the center, black at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    pub center: Vec2,
    pub radius: f32,
    /// Canvas units per reference frame (60 fps).
    pub velocity: Vec2,
}

/// Procedural depth feed: bouncing blobs plus an occasional glitch band.
pub struct BlobField {
    canvas: Vec2,
    blobs: SmallVec<[Blob; 4]>,
    rng: StdRng,
}

impl BlobField {
    pub fn new(seed: u64) -> Self {
        let blobs = smallvec![
            Blob {
                center: Vec2::new(320.0, 240.0),
                radius: 100.0,
                velocity: Vec2::new(2.0, 1.5),
            },
            Blob {
                center: Vec2::new(100.0, 100.0),
                radius: 80.0,
                velocity: Vec2::new(-2.0, 2.0),
            },
            Blob {
                center: Vec2::new(500.0, 300.0),
                radius: 120.0,
                velocity: Vec2::new(-1.5, -2.0),
            },
        ];
        Self::with_blobs(blobs, seed)
    }

    pub fn with_blobs(blobs: SmallVec<[Blob; 4]>, seed: u64) -> Self {
        Self {
            canvas: Vec2::new(DEPTH_WIDTH as f32, DEPTH_HEIGHT as f32),
            blobs,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Move every blob, reflecting elastically off the canvas edges.
    pub fn step(&mut self, dt_sec: f32) {
        let frames = dt_sec.max(0.0) * 60.0;
        let bounds = self.canvas;
        for b in &mut self.blobs {
            b.center += b.velocity * frames;
            if b.center.x < 0.0 {
                b.center.x = -b.center.x;
                b.velocity.x = b.velocity.x.abs();
            } else if b.center.x > bounds.x {
                b.center.x = 2.0 * bounds.x - b.center.x;
                b.velocity.x = -b.velocity.x.abs();
            }
            if b.center.y < 0.0 {
                b.center.y = -b.center.y;
                b.velocity.y = b.velocity.y.abs();
            } else if b.center.y > bounds.y {
                b.center.y = 2.0 * bounds.y - b.center.y;
                b.velocity.y = -b.velocity.y.abs();
            }
            b.center = b.center.clamp(Vec2::ZERO, bounds);
        }
    }

    /// Paint the blobs (brightest wins where they overlap) at the field's resolution.
    pub fn paint(&self, field: &mut DepthField) {
        let (w, h) = (field.width(), field.height());
        let sx = self.canvas.x / w as f32;
        let sy = self.canvas.y / h as f32;
        for v in 0..h {
            let cy = (v as f32 + 0.5) * sy;
            for u in 0..w {
                let p = Vec2::new((u as f32 + 0.5) * sx, cy);
                let i = self
                    .blobs
                    .iter()
                    .map(|b| 1.0 - (p.distance(b.center) / b.radius.max(1e-3)))
                    .fold(0.0_f32, f32::max);
                field.set(u, v, i.clamp(0.0, 1.0));
            }
        }
    }

    fn glitch(&mut self, field: &mut DepthField) {
        if self.rng.gen::<f32>() <= 1.0 - NOISE_BAND_CHANCE {
            return;
        }
        let alpha = self.rng.gen::<f32>() * NOISE_BAND_ALPHA_MAX;
        let top = self.rng.gen::<f32>() * self.canvas.y;
        let (w, h) = (field.width(), field.height());
        let sy = self.canvas.y / h as f32;
        for v in 0..h {
            let cy = (v as f32 + 0.5) * sy;
            if cy < top || cy >= top + NOISE_BAND_HEIGHT {
                continue;
            }
            for u in 0..w {
                let i = field.get(u, v);
                field.set(u, v, i * (1.0 - alpha) + alpha);
            }
        }
    }
}

impl IntensitySource for BlobField {
    fn render(&mut self, dt_sec: f32, field: &mut DepthField) {
        self.step(dt_sec);
        self.paint(field);
        self.glitch(field);
    }
}

/// Presentation variants of the depth cloud. Projection is shared; only the
/// group pose differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthVariant {
    Analytics,
    Onboarding,
    Intro,
}

/// Post-projection pose of a depth cloud, advanced once per frame.
pub struct DepthPose {
    pub variant: DepthVariant,
    pub transform: Transform,
    rng: StdRng,
}

impl DepthPose {
    pub fn new(variant: DepthVariant, seed: u64) -> Self {
        let mut transform = Transform::uniform(DEPTH_BASE_SCALE);
        if variant != DepthVariant::Intro {
            transform.position.z = DEPTH_GROUP_Z;
        }
        Self {
            variant,
            transform,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `drive` is the scene intensity for scroll variants; `phase` steers the intro.
    pub fn advance(&mut self, drive: f32, phase: u8, time: f32, dt_sec: f32) {
        let frames = dt_sec.max(0.0) * 60.0;
        let t = &mut self.transform;
        match self.variant {
            DepthVariant::Analytics => {
                t.rotation.y = time.sin() * 0.2 + drive * 0.5;
                t.scale = Vec3::splat(DEPTH_BASE_SCALE);
                t.position = Vec3::new(0.0, 0.0, DEPTH_GROUP_Z);
            }
            DepthVariant::Onboarding => {
                t.rotation.y = -time.sin() * 0.5 + drive * 0.2;
                t.scale = Vec3::splat(DEPTH_BASE_SCALE);
                t.position = Vec3::new((time * 2.0).sin() * 50.0, 0.0, DEPTH_GROUP_Z);
            }
            DepthVariant::Intro => {
                match phase {
                    // searching: fast spin with jitter
                    0 => {
                        t.rotation.y += 0.02 * frames;
                        t.rotation.z = time.sin() * 0.1;
                        let s = DEPTH_BASE_SCALE + self.rng.gen::<f32>() * 0.005;
                        t.scale = Vec3::splat(s);
                    }
                    // stabilizing
                    1 => {
                        t.rotation.y += 0.005 * frames;
                        let k = 1.0 - 0.9_f32.powf(frames);
                        t.scale = t.scale.lerp(Vec3::splat(INTRO_STABLE_SCALE), k);
                    }
                    // breathing
                    2 => {
                        t.rotation.y = (time * 0.5).sin() * 0.2;
                        let s = INTRO_BREATH_SCALE + (time * 2.0).sin() * 0.002;
                        t.scale = Vec3::splat(s);
                    }
                    // locked in
                    _ => {
                        t.rotation.y = 0.0;
                        t.rotation.z = 0.0;
                        t.scale = Vec3::splat(INTRO_LOCKED_SCALE);
                    }
                }
                t.position = Vec3::ZERO;
            }
        }
    }

    pub fn palette(&self, phase: u8) -> DepthPalette {
        if self.variant == DepthVariant::Intro && phase >= 3 {
            DepthPalette::Success
        } else {
            DepthPalette::Standard
        }
    }
}
