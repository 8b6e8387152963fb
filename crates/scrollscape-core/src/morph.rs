use crate::constants::*;
use crate::error::{CoreError, Result};
use glam::{Mat3, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;
use std::time::Duration;

/// Named point-cloud arrangements, in the order the morpher cycles through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Random,
    Sphere,
    Cube,
    Plane,
}

pub const LAYOUT_ORDER: [Layout; 4] = [Layout::Random, Layout::Sphere, Layout::Cube, Layout::Plane];

impl Layout {
    pub fn name(self) -> &'static str {
        match self {
            Layout::Random => "random",
            Layout::Sphere => "sphere",
            Layout::Cube => "cube",
            Layout::Plane => "plane",
        }
    }

    pub fn generate(self, count: usize, rng: &mut impl Rng) -> LayoutTarget {
        let points = match self {
            Layout::Random => random_layout(count, RANDOM_EXTENT, rng),
            Layout::Sphere => sphere_layout(count, SPHERE_RADIUS),
            Layout::Cube => cube_layout(count, CUBE_PER_AXIS, CUBE_SEPARATION),
            Layout::Plane => plane_layout(count, PLANE_COLUMNS, PLANE_SEPARATION),
        };
        LayoutTarget::new(self.name(), points)
    }
}

/// A fixed-length target arrangement. Point `i` of one layout morphs toward
/// point `i` of the next.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutTarget {
    pub name: &'static str,
    points: Vec<Vec3>,
}

impl LayoutTarget {
    pub fn new(name: &'static str, points: Vec<Vec3>) -> Self {
        Self { name, points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fibonacci lattice on a sphere: evenly spread, no randomness.
pub fn sphere_layout(count: usize, radius: f32) -> Vec<Vec3> {
    let n = count.max(1) as f32;
    let spiral = (n * PI).sqrt();
    (0..count)
        .map(|i| {
            let phi = (-1.0 + 2.0 * i as f32 / n).clamp(-1.0, 1.0).acos();
            let theta = spiral * phi;
            Vec3::new(
                radius * theta.cos() * phi.sin(),
                radius * theta.sin() * phi.sin(),
                radius * phi.cos(),
            )
        })
        .collect()
}

/// Regular 3D grid, `per_axis` points along each edge, centered on the origin.
pub fn cube_layout(count: usize, per_axis: usize, separation: f32) -> Vec<Vec3> {
    let a = per_axis.max(1);
    let offset = (a - 1) as f32 * separation / 2.0;
    (0..count)
        .map(|i| {
            let x = (i % a) as f32 * separation;
            let y = ((i / a) % a) as f32 * separation;
            let z = (i / (a * a)) as f32 * separation;
            Vec3::new(x - offset, y - offset, z - offset)
        })
        .collect()
}

/// Rippled plane: `columns` wide, as many rows as needed, height from two sines.
pub fn plane_layout(count: usize, columns: usize, separation: f32) -> Vec<Vec3> {
    let cols = columns.max(1);
    let rows = count.div_ceil(cols).max(1);
    let offset_x = (cols - 1) as f32 * separation / 2.0;
    let offset_z = (rows - 1) as f32 * separation / 2.0;
    (0..count)
        .map(|i| {
            let x = (i % cols) as f32 * separation;
            let z = (i / cols) as f32 * separation;
            let y = ((x * PLANE_FREQUENCY).sin() + (z * PLANE_FREQUENCY).sin()) * PLANE_AMPLITUDE;
            Vec3::new(x - offset_x, y, z - offset_z)
        })
        .collect()
}

/// Uniform scatter in a cube of edge `extent` centered on the origin.
pub fn random_layout(count: usize, extent: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    let half = extent / 2.0;
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen::<f32>() * extent - half,
                rng.gen::<f32>() * extent - half,
                rng.gen::<f32>() * extent - half,
            )
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct MorphParams {
    pub count: usize,
    /// Time spent on each layout before rotating to the next.
    pub interval: Duration,
    /// Exponential approach rate, per second.
    pub rate: f32,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            count: MORPH_COUNT,
            interval: Duration::from_millis(MORPH_INTERVAL_MS),
            rate: MORPH_RATE,
        }
    }
}

/// Per-instance placement of one morph point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Billboard {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

pub struct Morpher {
    layouts: Vec<LayoutTarget>,
    current: Vec<Vec3>,
    mode: usize,
    mode_clock: Duration,
    params: MorphParams,
}

impl Morpher {
    /// Build the standard four layouts. `seed` fixes the random scatter.
    pub fn new(params: MorphParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let layouts = LAYOUT_ORDER
            .iter()
            .map(|l| l.generate(params.count, &mut rng))
            .collect::<Vec<_>>();
        let current = layouts[0].points.clone();
        Self {
            layouts,
            current,
            mode: 0,
            mode_clock: Duration::ZERO,
            params,
        }
    }

    /// Build from caller-supplied layouts. All must share one non-zero length.
    pub fn with_layouts(layouts: Vec<LayoutTarget>, mut params: MorphParams) -> Result<Self> {
        let first = layouts.first().ok_or(CoreError::NoLayouts)?;
        let expected = first.len();
        if expected == 0 {
            return Err(CoreError::LayoutLength {
                index: 0,
                expected: 1,
                got: 0,
            });
        }
        if let Some((index, l)) = layouts.iter().enumerate().find(|(_, l)| l.len() != expected) {
            return Err(CoreError::LayoutLength {
                index,
                expected,
                got: l.len(),
            });
        }
        params.count = expected;
        let current = first.points.clone();
        Ok(Self {
            layouts,
            current,
            mode: 0,
            mode_clock: Duration::ZERO,
            params,
        })
    }

    pub fn mode(&self) -> usize {
        self.mode
    }

    pub fn target(&self) -> &LayoutTarget {
        &self.layouts[self.mode]
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    pub fn params(&self) -> &MorphParams {
        &self.params
    }

    /// Advance the layout clock, then move every point toward the current target.
    pub fn tick(&mut self, dt: Duration) {
        self.advance(dt, dt);
    }

    /// Like [`tick`](Self::tick), but the layout clock follows `wall` time while
    /// the points move by the (possibly capped) frame step `dt`.
    pub fn advance(&mut self, wall: Duration, dt: Duration) {
        self.advance_mode(wall);
        self.step(dt.as_secs_f32());
    }

    fn advance_mode(&mut self, dt: Duration) {
        let interval = self.params.interval.as_nanos();
        if interval == 0 {
            return;
        }
        self.mode_clock += dt;
        let clock = self.mode_clock.as_nanos();
        let turns = clock / interval;
        if turns == 0 {
            return;
        }
        self.mode_clock = Duration::from_nanos((clock % interval) as u64);
        let len = self.layouts.len();
        self.mode = (self.mode + (turns % len as u128) as usize) % len;
        log::debug!("[morph] layout -> {}", self.layouts[self.mode].name);
    }

    /// `current += (target - current) * speed` with `speed = min(rate * dt, 1)`.
    pub fn step(&mut self, dt_sec: f32) {
        let speed = (self.params.rate * dt_sec.max(0.0)).min(1.0);
        let target = &self.layouts[self.mode].points;
        for (p, t) in self.current.iter_mut().zip(target) {
            *p += (*t - *p) * speed;
        }
    }

    /// Largest distance between a point and its target.
    pub fn distance_to_target(&self) -> f32 {
        self.current
            .iter()
            .zip(self.target().points())
            .map(|(p, t)| p.distance(*t))
            .fold(0.0, f32::max)
    }

    pub fn arrived(&self, epsilon: f32) -> bool {
        self.distance_to_target() <= epsilon
    }

    /// Orient every point toward `eye` and pulse its scale with `time`.
    pub fn billboards_into(&self, eye: Vec3, time: f32, out: &mut Vec<Billboard>) {
        out.clear();
        out.extend(self.current.iter().map(|&p| Billboard {
            position: p,
            rotation: look_at(p, eye),
            scale: pulse_scale(p.x, time),
        }));
    }
}

/// Deterministic in position and time, so recomputation never drifts.
#[inline]
pub fn pulse_scale(x: f32, time: f32) -> f32 {
    let s = 1.0 + BILLBOARD_PULSE_AMPLITUDE * ((x.floor() + time) * BILLBOARD_PULSE_FREQUENCY).sin();
    s * BILLBOARD_BASE_SCALE
}

/// Rotation that turns local +Z toward `target`.
pub fn look_at(position: Vec3, target: Vec3) -> Quat {
    let forward = (target - position).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = Vec3::Y.cross(forward);
    if right.length_squared() < 1e-8 {
        right = Vec3::Z.cross(forward);
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}
