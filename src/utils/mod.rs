pub mod constants;
pub mod string_utils;

pub use constants::*;
pub use string_utils::{log_preview, safe_truncate_chars};
