//! Application constants

pub const APP_TITLE: &str = "Fitness Club Reward Tracker";

// UI constants
pub const NOTICE_TTL_MS: u32 = 4_000;
