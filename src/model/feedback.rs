// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Post-incident feedback

use chrono::{DateTime, Local};
use serde::Serialize;

/// Lowest satisfaction rating
pub const MIN_RATING: u8 = 1;

/// Highest satisfaction rating
pub const MAX_RATING: u8 = 5;

/// Stored when the operator leaves no comment
pub const NO_COMMENTS: &str = "Sin comentarios";

/// Operator feedback about one recorded emergency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    emergency_id: String,
    satisfaction_rating: u8,
    comments: String,
    timestamp: DateTime<Local>,
}

impl Feedback {
    /// Empty comments are replaced by [`NO_COMMENTS`]
    pub(crate) fn new(emergency_id: impl Into<String>, satisfaction_rating: u8, comments: &str) -> Self {
        let comments = comments.trim();
        Self {
            emergency_id: emergency_id.into(),
            satisfaction_rating,
            comments: if comments.is_empty() {
                NO_COMMENTS.to_string()
            } else {
                comments.to_string()
            },
            timestamp: Local::now(),
        }
    }

    pub fn emergency_id(&self) -> &str {
        &self.emergency_id
    }

    pub fn satisfaction_rating(&self) -> u8 {
        self.satisfaction_rating
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }
}
