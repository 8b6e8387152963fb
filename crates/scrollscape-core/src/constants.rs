use glam::Vec3;

// Shared tuning constants for the stage. Web and test code read these directly.

// Scroll timeline
pub const PAGES_WIDE: f32 = 5.0; // desktop layout
pub const PAGES_NARROW: f32 = 6.0; // stacked content needs one more page
pub const NARROW_BREAKPOINT_PX: f64 = 768.0;
pub const VISIBILITY_EPSILON: f32 = 0.01; // below this a scene is not drawn
pub const PAGE_FADE: f32 = 0.5; // fraction of a page spent fading between scenes

// Narrow viewport presentation
pub const NARROW_SCALE: f32 = 0.7;
pub const NARROW_DIM: f32 = 0.3;

// Scene motion
pub const FLUID_PARALLAX: f32 = 5.0; // world units pushed back over the full scroll
pub const DEPTH_SPIN: f32 = std::f32::consts::PI; // yaw over the full scroll
pub const ONBOARDING_FROM_Z: f32 = -10.0;
pub const NETWORK_GROUP_SCALE: f32 = 0.005; // morph layouts are in large units

// Shape morpher
pub const MORPH_COUNT: usize = 512;
pub const MORPH_INTERVAL_MS: u64 = 3000;
pub const MORPH_RATE: f32 = 2.0; // per second
pub const SPHERE_RADIUS: f32 = 750.0;
pub const CUBE_PER_AXIS: usize = 8;
pub const CUBE_SEPARATION: f32 = 150.0;
pub const PLANE_COLUMNS: usize = 16;
pub const PLANE_SEPARATION: f32 = 150.0;
pub const PLANE_FREQUENCY: f32 = 0.5;
pub const PLANE_AMPLITUDE: f32 = 200.0;
pub const RANDOM_EXTENT: f32 = 4000.0; // edge length of the scatter cube

// Billboards
pub const BILLBOARD_BASE_SCALE: f32 = 15.0;
pub const BILLBOARD_PULSE_AMPLITUDE: f32 = 0.3;
pub const BILLBOARD_PULSE_FREQUENCY: f32 = 0.002;

// Depth projection (structured-light camera intrinsics)
pub const DEPTH_WIDTH: u32 = 640;
pub const DEPTH_HEIGHT: u32 = 480;
pub const DEPTH_NEAR: f32 = 850.0;
pub const DEPTH_FAR: f32 = 4000.0;
pub const DEPTH_X_TO_Z: f32 = 1.11146; // tan(1.0144686 / 2) * 2
pub const DEPTH_Y_TO_Z: f32 = 0.83359; // tan(0.7898090 / 2) * 2
pub const DEPTH_Z_OFFSET: f32 = 1000.0;
pub const DEPTH_CUTOFF: f32 = 0.1;
pub const NOISE_BAND_CHANCE: f32 = 0.1; // per frame
pub const NOISE_BAND_HEIGHT: f32 = 10.0; // reference canvas units
pub const NOISE_BAND_ALPHA_MAX: f32 = 0.5;

// Depth poses
pub const DEPTH_BASE_SCALE: f32 = 0.015;
pub const DEPTH_GROUP_Z: f32 = -5.0;
pub const INTRO_STABLE_SCALE: f32 = 0.018;
pub const INTRO_BREATH_SCALE: f32 = 0.02;
pub const INTRO_LOCKED_SCALE: f32 = 0.025;

// Intro timeline (milliseconds from mount)
pub const INTRO_PHASE_STARTS_MS: [u64; 4] = [0, 1500, 3000, 4500];
pub const INTRO_DONE_MS: u64 = 5500;
pub const INTRO_TEXT_FADE_MS: u64 = 250;
pub const INTRO_OUTRO_MS: u64 = 400; // scene fade before teardown

pub const INTRO_TEXT: [&str; 4] = [
    "ESTABLISHING SECURE CONNECTION...",
    "ANALYZING GLOBAL DATA STREAMS...",
    "OPTIMIZING PREDICTIVE MODELS...",
    "ACCESS GRANTED. WELCOME, AGENT.",
];

// Palette
pub const INTRO_TEXT_RGBA: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
pub const SUCCESS_RGB: [f32; 3] = [0.0, 1.0, 0.533]; // #00ff88

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;

#[inline]
pub fn camera_eye() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_Z)
}
