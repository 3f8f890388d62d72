pub mod app;
pub mod host;
pub mod logo;
pub mod theme;

pub const SIDEBAR_WIDTH: i32 = 250;
pub const SIDEBAR_ANIMATION_MS: u32 = 300;
pub const SIDEBAR_BUTTON_OFFSET_CLOSED: i32 = 16;
pub const SIDEBAR_BUTTON_OFFSET_OPEN: i32 = SIDEBAR_WIDTH + 16;
