// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Audit module - append-only event and feedback history

mod sink;

pub use sink::*;

use std::io::{BufRead, Write};
use std::path::Path;

use chrono::Local;
use tracing::{error, info, warn};

use crate::config::AuditConfig;
use crate::console::Console;
use crate::error::{Error, Result};
use crate::model::{format_timestamp, EmergencyEvent, EmergencyId, Feedback, MAX_RATING, MIN_RATING};

/// Durable record of confirmed events and their feedback
pub struct AuditLog {
    history: Box<dyn RecordSink>,
    feedback: Box<dyn RecordSink>,
}

impl AuditLog {
    pub fn new(history: impl RecordSink + 'static, feedback: impl RecordSink + 'static) -> Self {
        Self {
            history: Box::new(history),
            feedback: Box::new(feedback),
        }
    }

    /// File-backed log under `data_dir`
    pub fn from_config(config: &AuditConfig, data_dir: &Path) -> Self {
        Self::new(
            AppendFile::new(data_dir.join(&config.history_file)),
            AppendFile::new(data_dir.join(&config.feedback_file)),
        )
    }

    /// Append `event` to the history and return its fresh identifier
    pub fn record_event(&self, event: Option<&EmergencyEvent>) -> Result<EmergencyId> {
        let event = event.ok_or_else(|| {
            error!("record_event called without an event");
            Error::Contract("cannot record an absent emergency event")
        })?;

        let id = EmergencyId::generate();
        let line = format!(
            "[{}] ID: {} | Type: {} | Location: {} | Severity: {}",
            format_timestamp(&Local::now()),
            id,
            event.emergency_type(),
            event.location(),
            event.severity()
        );

        self.history.append(&line).map_err(|source| {
            warn!(error = %source, "failed to record emergency");
            Error::Storage {
                path: self.history.location().to_path_buf(),
                source,
            }
        })?;

        info!(id = %id, "emergency recorded");
        Ok(id)
    }

    /// Ask for a rating and comments about `emergency_id` and append them
    pub fn collect_feedback<R: BufRead, W: Write>(
        &self,
        emergency_id: &str,
        console: &mut Console<R, W>,
    ) -> Result<Feedback> {
        if emergency_id.trim().is_empty() {
            error!("collect_feedback called without an emergency id");
            return Err(Error::Contract("feedback requires a recorded emergency id"));
        }

        console.say("")?;
        console.say("--- Solicitud de Feedback ---")?;
        let rating = loop {
            let answer = console.prompt(&format!(
                "¿Cómo fue tu experiencia? ({}-{}, donde {} es excelente): ",
                MIN_RATING, MAX_RATING, MAX_RATING
            ))?;
            match answer.trim().parse::<u8>() {
                Ok(n) if (MIN_RATING..=MAX_RATING).contains(&n) => break n,
                _ => console.say(&format!(
                    "Por favor, ingrese un valor entre {} y {}.",
                    MIN_RATING, MAX_RATING
                ))?,
            }
        };
        let comments = console.prompt("¿Tienes algún comentario adicional? ")?;

        let feedback = Feedback::new(emergency_id, rating, &comments);
        let line = format!(
            "[{}] EmergencyID: {} | Rating: {}/{} | Comments: {}",
            format_timestamp(feedback.timestamp()),
            feedback.emergency_id(),
            feedback.satisfaction_rating(),
            MAX_RATING,
            feedback.comments()
        );

        self.feedback.append(&line).map_err(|source| {
            warn!(error = %source, "failed to record feedback");
            Error::Storage {
                path: self.feedback.location().to_path_buf(),
                source,
            }
        })?;

        info!(id = %emergency_id, rating, "feedback recorded");
        Ok(feedback)
    }
}
