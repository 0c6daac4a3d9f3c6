pub const INITIAL_WINDOW_WIDTH: i32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: i32 = 720;
pub const MSAA_SAMPLES: i32 = 4;

pub const LEFT_MARGIN: f32 = 100.0;
pub const RIGHT_MARGIN: f32 = 30.0;
pub const TOP_MARGIN: f32 = 110.0;
pub const BOTTOM_MARGIN: f32 = 90.0;

pub const TITLE_Y: f32 = 40.0;
pub const STATUS_Y: f32 = 72.0;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;

pub const ANIMATION_FRAMES: usize = 100;
pub const FRAME_INTERVAL_S: f32 = 0.05;
pub const VELOCITY_ARROW_SCALE: f32 = 0.1;
pub const ARROW_HEAD_PX: f32 = 10.0;
