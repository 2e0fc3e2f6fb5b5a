/// Side length of the square drawing surface, in pixels.
pub const CANVAS_PIXELS: usize = 800;
pub const CANVAS_SIZE: f32 = CANVAS_PIXELS as f32;

/// Number of height samples along each axis of the terrain grid.
pub const TERRAIN_SIZE: usize = 100;
/// Largest grid accepted from settings.
pub const MAX_TERRAIN_SIZE: usize = 1024;
pub const CELL_SIZE: f32 = CANVAS_SIZE / TERRAIN_SIZE as f32;

pub const DEFAULT_NOISE_SCALE: f32 = 0.05;
pub const DEFAULT_HEIGHT_SCALE: f32 = 20.0;
pub const DEFAULT_ROTATION_SPEED: f32 = 0.005;
pub const DEFAULT_THRESHOLD: u8 = 128;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 400.0;

/// Scroll zoom keeps the perspective divisor inside this range.
pub const MIN_CAMERA_DISTANCE: f32 = 100.0;
pub const MAX_CAMERA_DISTANCE: f32 = 800.0;

/// Radians of rotation per pixel of horizontal drag.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Frequency multipliers and weights of the three height-field octaves.
pub const OCTAVE_FREQUENCIES: [f32; 3] = [1.0, 2.0, 4.0];
pub const OCTAVE_WEIGHTS: [f32; 3] = [0.5, 0.25, 0.125];
/// Upper bound of the combined octave value for a `[0, 1]` noise source.
pub const OCTAVE_WEIGHT_SUM: f32 = 0.875;

/// Inner detail of the coherent noise source itself (octave count and
/// per-octave amplitude falloff).
pub const NOISE_DETAIL_OCTAVES: i32 = 4;
pub const NOISE_DETAIL_FALLOFF: f32 = 0.5;

/// Light comes from the upper right; normalized at use.
pub const LIGHT_DIRECTION: [f32; 3] = [1.0, 0.5, 1.0];
/// Brightness bonus at the top of the height range.
pub const HEIGHT_INFLUENCE: f32 = 0.3;
/// Distance attenuation factor reached at half the canvas size.
pub const FAR_ATTENUATION: f32 = 0.5;
