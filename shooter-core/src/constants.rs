const SQRT_3: f32 = 1.732_050_8;

pub const BUBBLE_RADIUS: f32 = 22.0;
pub const ROW_HEIGHT: f32 = BUBBLE_RADIUS * SQRT_3;
pub const GRID_COLS: u32 = 12;
pub const GRID_ROWS: u32 = 8;
pub const SEEDED_ROWS: u32 = 5;

pub const SLINGSHOT_BOTTOM_OFFSET: f32 = 220.0;
pub const GRAVITY: f32 = 0.0;
pub const FRICTION: f32 = 0.998;

pub const MAX_DRAG_DIST: f32 = 180.0;
pub const MIN_FORCE_MULT: f32 = 0.15;
pub const MAX_FORCE_MULT: f32 = 0.45;

// Captures are downscaled to this width and re-encoded lossily so the
// payload stays small enough to ship on every cycle.
pub const CAPTURE_MAX_WIDTH: u32 = 320;
pub const CAPTURE_JPEG_QUALITY: u8 = 40;

pub const WORLD_WIDTH_DEFAULT: u32 = 800;
pub const WORLD_HEIGHT_DEFAULT: u32 = 600;
