// Frontend wiring and presentation constants.
//
// Engine tuning lives in scrollscape-core; these only cover the DOM hooks,
// scroll feel and how the renderer dresses the engine's output.

// DOM element ids
pub const CANVAS_ID: &str = "stage-canvas";
pub const SCROLL_SPACER_ID: &str = "scroll-spacer"; // its height sets the scrollable length
pub const INTRO_OVERLAY_ID: &str = "intro-overlay";
pub const INTRO_TEXT_ID: &str = "intro-text";
pub const CONTENT_ID: &str = "content"; // landing copy, revealed once the intro ends
pub const HIDDEN_CLASS: &str = "is-hidden";

// Scroll smoothing (critically damped spring)
pub const SCROLL_SMOOTH_TIME_SEC: f32 = 0.2;
pub const SCROLL_SETTLE_EPSILON: f32 = 1e-4; // snap when this close to the target

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // background tabs resume without a jump

// Background #050505 in linear space
pub const CLEAR_LINEAR: f64 = 0.0015;

// Sprites
pub const DEPTH_POINT_SIZE: f32 = 6.0; // in projected depth units, before the group scale
pub const BILLBOARD_CORE_RGBA: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BILLBOARD_EDGE_RGBA: [f32; 4] = [0.0, 0.5, 1.0, 0.5]; // glow mid-stop
pub const MAX_DEPTH_DRAWS: usize = 3; // intro, analytics and onboarding clouds

// Intro overlay glow on the final phase
pub const INTRO_GLOW_PX: f32 = 10.0;
