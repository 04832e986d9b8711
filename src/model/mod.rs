// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Model module - profile, event, identifier and feedback value types

mod emergency;
mod feedback;
mod user;

pub use emergency::*;
pub use feedback::*;
pub use user::*;

use chrono::{DateTime, Local};

/// Timestamp layout used in every log record and console summary
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp as `yyyy-MM-dd HH:mm:ss`
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
