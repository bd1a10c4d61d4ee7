//! Tolerant reading of comment-annotated CSV measurement logs.

pub mod read;
pub mod row;

pub use read::{parse_log_text, read_log_file};
pub use row::{RawLog, RawRecord};
