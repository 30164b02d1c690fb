pub mod expiry;
pub mod misc;
pub mod search;
pub mod time;
