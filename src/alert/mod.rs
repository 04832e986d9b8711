// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Alert module - delivery of confirmed events to responders and contacts
//!
//! The session only ever holds a `Box<dyn AlertChannel>`; adding a delivery
//! medium means adding an implementation here and a variant to [`AlertKind`].

mod call;
mod dispatch;

pub use call::*;
pub use dispatch::*;

use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::audit::AppendFile;
use crate::config::{AlertConfig, AlertKind};
use crate::console::SEPARATOR_WIDTH;
use crate::model::{EmergencyEvent, UserProfile};

/// Number of progress ticks printed while connecting
const CONNECT_TICKS: u32 = 3;

/// Capability set shared by every delivery medium
pub trait AlertChannel: Send + Sync {
    /// Record and dispatch `event`
    ///
    /// Returns `true` only when the trail append and the dispatch both
    /// succeeded. An absent event is a failed delivery. Never panics or
    /// propagates I/O errors.
    fn send(&self, event: Option<&EmergencyEvent>, out: &mut dyn Write) -> bool;

    /// Tell the profile's emergency contact about `event`
    ///
    /// Without a contact this only warns the operator.
    fn notify_contacts(&self, profile: &UserProfile, event: &EmergencyEvent, out: &mut dyn Write);

    /// Human-readable name of the medium
    fn alert_type(&self) -> &'static str;
}

/// Build the channel selected in configuration
pub fn build_channel(config: &AlertConfig, data_dir: &Path) -> Box<dyn AlertChannel> {
    let trail = AppendFile::new(data_dir.join(&config.trail_file));
    let link = ResponderLink::new(
        config.emergency_number.clone(),
        Duration::from_millis(config.connect_delay_ms),
    );

    match config.channel {
        AlertKind::Dispatch => Box::new(DispatchAlert::new(trail, link)),
        AlertKind::Call => Box::new(CallAlert::new(trail, link)),
    }
}

/// Simulated connection to the emergency responder
#[derive(Debug, Clone)]
pub struct ResponderLink {
    emergency_number: String,
    delay: Duration,
}

impl ResponderLink {
    pub fn new(emergency_number: impl Into<String>, delay: Duration) -> Self {
        Self {
            emergency_number: emergency_number.into(),
            delay,
        }
    }

    pub fn emergency_number(&self) -> &str {
        &self.emergency_number
    }

    /// Print progress ticks over the connection delay; blocks the caller
    pub fn connect(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        write!(out, "Conectando con el servicio de emergencias {}", self.emergency_number)?;
        out.flush()?;

        let tick = self.delay / CONNECT_TICKS;
        for _ in 0..CONNECT_TICKS {
            thread::sleep(tick);
            write!(out, ".")?;
            out.flush()?;
        }
        writeln!(out)?;

        debug!(number = %self.emergency_number, "responder connected");
        Ok(())
    }
}

/// Separator line preceding every alert trail record
pub(crate) fn trail_record(message: &str) -> String {
    format!("{}\n{}", "-".repeat(SEPARATOR_WIDTH), message)
}
