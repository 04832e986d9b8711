// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Emergencia - Interactive Emergency Report Console
//!
//! Collects the reporting user's profile, interviews the operator about an
//! emergency, dispatches the confirmed report through an alert channel and
//! keeps an append-only audit trail of events and feedback.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Session                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────┐   ┌───────────┐   ┌───────────┐   ┌──────────┐  │
//! │  │ Profile │ → │  Event    │ → │  Audit    │ → │  Alert   │  │
//! │  │ Store   │   │  Detector │   │  Log      │   │  Channel │  │
//! │  └─────────┘   └───────────┘   └───────────┘   └──────────┘  │
//! │       ↓              ↓               ↓               ↓       │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                 Console (shared stdin)                 │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                       ↓                      ↓               │
//! │               ┌───────────────┐     ┌─────────────────┐      │
//! │               │ Append-only   │     │ Health-center   │      │
//! │               │ log files     │     │ directory       │      │
//! │               └───────────────┘     └─────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod alert;
pub mod audit;
pub mod config;
pub mod console;
pub mod detection;
pub mod directory;
pub mod error;
pub mod model;
pub mod profile;
pub mod session;

// Re-exports for convenience
pub use alert::{build_channel, AlertChannel, CallAlert, DispatchAlert};
pub use audit::{AppendFile, AuditLog, RecordSink};
pub use config::Config;
pub use console::Console;
pub use detection::{DetectionOutcome, EventDetector};
pub use error::{Error, Result};
pub use model::{EmergencyEvent, EmergencyId, EmergencyType, Feedback, UserProfile};
pub use session::{Session, SessionStats};

/// Emergencia version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Emergencia name
pub const NAME: &str = "Emergencia";
