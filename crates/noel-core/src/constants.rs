use glam::Vec3;

// Shared tuning constants for the tree scene. `SceneConfig::default()` is
// built from these.

// Tree canopy
pub const TREE_HEIGHT: f32 = 10.0;
pub const TREE_BASE_RADIUS: f32 = 4.0;
pub const TREE_LAYERS: u32 = 100;
pub const TREE_POINTS_PER_LAYER: u32 = 70;
pub const MIN_POINTS_PER_LAYER: u32 = 8;
pub const LAYER_RADIUS_TAPER: f32 = 0.95; // fraction of base radius lost at the apex
pub const LAYER_COUNT_TAPER: f64 = 0.8; // fraction of points lost at the apex
pub const LAYER_ANGLE_JITTER: f32 = 0.2; // radians, full width
pub const LAYER_RADIUS_JITTER: f32 = 0.1; // fraction of band radius, full width

// Trunk
pub const TRUNK_POINTS: u32 = 40;
pub const TRUNK_RADIUS: f32 = 0.4;
pub const TRUNK_DEPTH: f32 = 1.5;
pub const TRUNK_COLOR: [f32; 3] = [0.4, 0.25, 0.1];
pub const TRUNK_SIZE: f32 = 0.08;
pub const TRUNK_BRIGHTNESS: f32 = 0.5;

// Star
pub const STAR_OUTER_RADIUS: f32 = 0.9;
pub const STAR_INNER_RADIUS: f32 = 0.36;
pub const STAR_OFFSET: f32 = 0.7; // above the canopy apex
pub const STAR_SAMPLES_PER_EDGE: u32 = 20;
pub const STAR_COLOR: [f32; 3] = [1.0, 0.84, 0.0];
pub const STAR_SIZE: f32 = 0.15;
pub const STAR_BRIGHTNESS: f32 = 1.0;

// Cumulative color bucket thresholds: green, gold, red, blue
pub const COLOR_THRESHOLDS: [f32; 4] = [0.40, 0.70, 0.95, 1.00];
// Cumulative size bucket thresholds and their [min, max) ranges
pub const SIZE_THRESHOLDS: [f32; 4] = [0.25, 0.50, 0.75, 1.00];
pub const SIZE_RANGES: [[f32; 2]; 4] = [[0.02, 0.06], [0.06, 0.12], [0.12, 0.20], [0.22, 0.32]];

// Idle jitter scale per axis, applied on top of the per-point amplitude
pub const TREE_JITTER: Vec3 = Vec3::new(0.08, 0.06, 0.08);
pub const STAR_JITTER: Vec3 = Vec3::new(0.04, 0.04, 0.02);

// Dispersion targets are drawn from a box of this full extent around the origin
pub const DISPERSION_EXTENT: Vec3 = Vec3::new(50.0, 40.0, 20.0);

// Dispersion easing (per frame) and UI hysteresis band
pub const DISPERSION_EASING: f32 = 0.08;
pub const LETTER_SHOW_THRESHOLD: f32 = 0.5;
pub const LETTER_HIDE_THRESHOLD: f32 = 0.3;

// Tree rotation
pub const IDLE_YAW_SPEED: f32 = 0.1; // radians per second
pub const ROTATION_SETTLE_THRESHOLD: f32 = 0.1; // amount below which the tree spins
pub const ROTATION_DECAY: f32 = 0.95; // per frame once dispersing

// Snow
pub const SNOW_COUNT: u32 = 1200;
pub const SNOW_SPREAD: f32 = 35.0; // full width in x and z
pub const SNOW_SPAWN_MIN_Y: f32 = -5.0;
pub const SNOW_SPAWN_SPAN_Y: f32 = 25.0;
pub const SNOW_FLOOR_Y: f32 = -10.0;
pub const SNOW_CEILING_Y: f32 = 18.0;
pub const SNOW_SPEED_MIN: f32 = 0.02;
pub const SNOW_SPEED_SPAN: f32 = 0.03;

// Interaction
pub const DRAG_THRESHOLD_PX: f32 = 15.0;

// Letter overlay
pub const LETTER_OPEN_DELAY_SEC: f32 = 0.8;
pub const MEMORY_REVEAL_BASE_DELAY_SEC: f32 = 1.5;

// Responsive view
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const DESKTOP_EYE: Vec3 = Vec3::new(0.0, 0.0, 12.0);
pub const MOBILE_LANDSCAPE_EYE: Vec3 = Vec3::new(0.0, 0.0, 13.0);
pub const MOBILE_PORTRAIT_EYE: Vec3 = Vec3::new(0.0, -1.0, 16.0);
pub const DESKTOP_SIZE_MULTIPLIER: f32 = 1.0;
pub const MOBILE_SIZE_MULTIPLIER: f32 = 2.5;
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
