// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Session orchestrator - profile collection followed by report cycles
//!
//! ```text
//! CollectProfile → loop {
//!     Detect → Confirmed? → RecordEvent → Send ─ok─► NotifyContacts → Protocol
//!                                          │          → [region] Directory → Feedback
//!                                          └fail─► "call the emergency number"
//!     AskContinue
//! }
//! ```
//!
//! Failures inside a cycle are reported and the loop moves on to the continue
//! question; only fatal errors (closed input, broken terminal, incomplete
//! profile) end the session.

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{error, info, warn};

use crate::alert::AlertChannel;
use crate::audit::AuditLog;
use crate::config::DirectoryConfig;
use crate::console::Console;
use crate::detection::{DetectionOutcome, EventDetector};
use crate::directory::{load_centers, render_centers};
use crate::error::{Error, Result};
use crate::model::EmergencyEvent;
use crate::profile::ProfileStore;

/// Counters kept over one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub interviews: u64,
    pub confirmed: u64,
    pub recorded: u64,
    pub alerts_sent: u64,
    pub alerts_failed: u64,
    pub feedback: u64,
    pub failures: u64,
}

/// Interactive emergency session
pub struct Session<R, W> {
    console: Console<R, W>,
    profiles: ProfileStore,
    detector: EventDetector,
    alert: Box<dyn AlertChannel>,
    audit: AuditLog,
    directory: DirectoryConfig,
    emergency_number: String,
    stats: SessionStats,
    start_time: Option<Instant>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        console: Console<R, W>,
        alert: Box<dyn AlertChannel>,
        audit: AuditLog,
        directory: DirectoryConfig,
    ) -> Self {
        Self {
            console,
            profiles: ProfileStore::new(),
            detector: EventDetector::new(),
            alert,
            audit,
            directory,
            emergency_number: "112".to_string(),
            stats: SessionStats::default(),
            start_time: None,
        }
    }

    /// Number quoted when an alert could not be delivered
    pub fn with_emergency_number(mut self, number: impl Into<String>) -> Self {
        self.emergency_number = number.into();
        self
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn uptime(&self) -> u64 {
        self.start_time.map(|t| t.elapsed().as_secs()).unwrap_or(0)
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run until the operator declines to continue
    pub fn run(&mut self) -> Result<SessionStats> {
        info!(channel = self.alert.alert_type(), "starting emergency session");
        self.start_time = Some(Instant::now());

        self.console.say("Sistema de Gestión de Emergencias - Iniciado")?;
        self.console.separator('=')?;
        self.profiles.collect(&mut self.console)?;

        loop {
            match self.cycle() {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => self.report(&e, "Error al procesar la emergencia")?,
            }

            self.console.say("")?;
            if !self.console.confirm("¿Desea realizar otra acción?")? {
                self.console.say("")?;
                self.console
                    .say("✅ Saliendo del sistema de emergencias. ¡Hasta pronto!")?;
                break;
            }
            self.console.say("")?;
            self.console.separator('=')?;
        }

        info!(
            interviews = self.stats.interviews,
            recorded = self.stats.recorded,
            alerts_sent = self.stats.alerts_sent,
            alerts_failed = self.stats.alerts_failed,
            feedback = self.stats.feedback,
            uptime_secs = self.uptime(),
            "emergency session finished"
        );
        Ok(self.stats.clone())
    }

    fn cycle(&mut self) -> Result<()> {
        self.stats.interviews += 1;
        let outcome = self.detector.detect(&mut self.console, self.profiles.profile())?;
        let DetectionOutcome::Confirmed(event) = outcome else {
            return Ok(());
        };
        self.stats.confirmed += 1;

        let id = self.audit.record_event(Some(&event))?;
        self.stats.recorded += 1;
        self.console.say("")?;
        self.console
            .say(&format!("✅ Emergencia registrada con ID: {}", id))?;

        if !self.alert.send(Some(&event), self.console.output_mut()) {
            self.stats.alerts_failed += 1;
            warn!(id = %id, channel = self.alert.alert_type(), "alert not delivered");
            self.console.say("")?;
            self.console.say(&format!(
                "❌ No se pudo enviar la alerta. Por favor, intente nuevamente o llame al {} manualmente.",
                self.emergency_number
            ))?;
            return Ok(());
        }
        self.stats.alerts_sent += 1;

        self.alert
            .notify_contacts(self.profiles.profile(), &event, self.console.output_mut());
        self.show_protocol(&event)?;
        self.offer_directory(&event)?;

        self.console.say("")?;
        self.console.say("✅ ¡Emergencia reportada con éxito!")?;
        self.console
            .say("Se ha creado un registro de la emergencia en el sistema.")?;

        match self.audit.collect_feedback(id.as_str(), &mut self.console) {
            Ok(_) => {
                self.stats.feedback += 1;
                self.console.say("")?;
                self.console
                    .say("✅ Gracias por tu feedback. Nos ayuda a mejorar el sistema.")?;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => self.report(&e, "Error al recopilar feedback")?,
        }
        Ok(())
    }

    fn show_protocol(&mut self, event: &EmergencyEvent) -> Result<()> {
        let response = event.emergency_type().response();
        self.console.say("")?;
        self.console.say(&format!(
            "=== PROTOCOLO DE RESPUESTA: {} (prioridad {}/10) ===",
            event.emergency_type(),
            response.priority
        ))?;
        for line in response.protocol.lines() {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn offer_directory(&mut self, event: &EmergencyEvent) -> Result<()> {
        let region = self.directory.region.trim();
        if region.is_empty() || !event.location().to_lowercase().contains(&region.to_lowercase()) {
            return Ok(());
        }

        self.console.say("")?;
        let question = format!("¿Quieres ver todos los centros de salud de {}?", title_case(region));
        if !self.console.confirm(&question)? {
            return Ok(());
        }

        match load_centers(&self.directory.path) {
            Some(centers) => render_centers(&centers, region, self.console.output_mut())
                .map_err(Error::Console)?,
            None => self
                .console
                .say("⚠️  No se pudo cargar el directorio de centros de salud.")?,
        }
        Ok(())
    }

    fn report(&mut self, err: &Error, context: &str) -> Result<()> {
        self.stats.failures += 1;
        if err.is_contract_violation() {
            error!(error = %err, "internal contract violated");
            self.console.say(&format!("❌ Error interno: {}", err))
        } else {
            warn!(error = %err, "{}", context);
            self.console.say(&format!("❌ {}: {}", context, err))
        }
    }
}

fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{DispatchAlert, ResponderLink};
    use crate::audit::AppendFile;
    use crate::config::AuditConfig;
    use std::io::Cursor;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::tempdir;

    const PROFILE: &str = "A\n600123456\n\nB 600654321\n";

    type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

    fn session(dir: &Path, input: &str) -> TestSession {
        session_with_trail(dir, input, AppendFile::new(dir.join("emergency_alerts.log")))
    }

    fn session_with_trail(dir: &Path, input: &str, trail: AppendFile) -> TestSession {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let alert = Box::new(DispatchAlert::new(trail, ResponderLink::new("112", Duration::ZERO)));
        let audit = AuditLog::from_config(&AuditConfig::default(), dir);
        let directory = DirectoryConfig {
            path: dir.join("centros.json"),
            region: "murcia".into(),
        };
        Session::new(console, alert, audit, directory)
    }

    fn output(session: TestSession) -> String {
        String::from_utf8(session.into_console().into_inner().1).unwrap()
    }

    fn read(dir: &Path, file: &str) -> String {
        std::fs::read_to_string(dir.join(file)).unwrap()
    }

    #[test]
    fn test_full_report_cycle() {
        let dir = tempdir().unwrap();
        let input = format!("{}S\n2\nMurcia\n7\nS\nN\n4\n\nN\n", PROFILE);
        let mut s = session(dir.path(), &input);

        let stats = s.run().unwrap();
        assert_eq!(stats.interviews, 1);
        assert_eq!(stats.recorded, 1);
        assert_eq!(stats.alerts_sent, 1);
        assert_eq!(stats.feedback, 1);
        assert_eq!(stats.failures, 0);

        let history = read(dir.path(), "emergency_history.log");
        assert!(history.contains("| Type: Problema médico | Location: Murcia | Severity: 7"));
        let feedback = read(dir.path(), "user_feedback.log");
        assert!(feedback.contains("| Rating: 4/5 | Comments: Sin comentarios"));
        let trail = read(dir.path(), "emergency_alerts.log");
        assert!(trail.contains("Contacto de emergencia: B 600654321"));

        let text = output(s);
        assert!(text.contains("Emergencia registrada con ID: "));
        assert!(text.contains("¿Quieres ver todos los centros de salud de Murcia? (S/N): "));
        assert!(text.contains("PROTOCOLO DE RESPUESTA: Problema médico"));
        assert!(text.contains("¡Emergencia reportada con éxito!"));
        assert!(text.contains("¡Hasta pronto!"));
    }

    #[test]
    fn test_directory_shown_for_region() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("centros.json"),
            r#"[{"Nombre": "Centro Norte", "Dirección": "Calle A 1", "Municipio": "Murcia", "Teléfono": "968000001"}]"#,
        )
        .unwrap();
        let input = format!("{}S\n3\nbarrio del Carmen, MURCIA\n9\nS\nS\n5\nrápido\nN\n", PROFILE);
        let mut s = session(dir.path(), &input);

        s.run().unwrap();
        let text = output(s);
        assert!(text.contains("- Centro Norte | Calle A 1 | Municipio: Murcia | Tel: 968000001"));
    }

    #[test]
    fn test_directory_not_offered_elsewhere() {
        let dir = tempdir().unwrap();
        let input = format!("{}S\n1\nMadrid\n4\nS\n3\nok\nN\n", PROFILE);
        let mut s = session(dir.path(), &input);

        let stats = s.run().unwrap();
        assert_eq!(stats.feedback, 1);
        assert!(!output(s).contains("centros de salud"));
    }

    #[test]
    fn test_cancelled_interview_touches_nothing() {
        let dir = tempdir().unwrap();
        let input = format!("{}S\n5\nCalle Luna\n2\nN\nN\n", PROFILE);
        let mut s = session(dir.path(), &input);

        let stats = s.run().unwrap();
        assert_eq!(stats.interviews, 1);
        assert_eq!(stats.confirmed, 0);
        assert!(!dir.path().join("emergency_history.log").exists());
        assert!(!dir.path().join("emergency_alerts.log").exists());
        assert!(!dir.path().join("user_feedback.log").exists());
    }

    #[test]
    fn test_two_events_get_distinct_ids() {
        let dir = tempdir().unwrap();
        let input = format!(
            "{}S\n1\nCalle A\n3\nS\n4\n\nS\nS\n3\nCalle B\n8\nS\n2\nlento\nN\n",
            PROFILE
        );
        let mut s = session(dir.path(), &input);

        let stats = s.run().unwrap();
        assert_eq!(stats.recorded, 2);

        let history = read(dir.path(), "emergency_history.log");
        let ids: Vec<&str> = history
            .lines()
            .map(|l| l.split("ID: ").nth(1).unwrap().split(" |").next().unwrap())
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        for id in &ids {
            assert_eq!(history.matches(id).count(), 1);
        }
    }

    #[test]
    fn test_alert_failure_continues_session() {
        let dir = tempdir().unwrap();
        let input = format!("{}S\n2\nCalle Sol\n6\nS\nS\nN\nN\n", PROFILE);
        // the trail path is a directory, so the append fails
        let mut s = session_with_trail(dir.path(), &input, AppendFile::new(dir.path()));

        let stats = s.run().unwrap();
        assert_eq!(stats.recorded, 1);
        assert_eq!(stats.alerts_failed, 1);
        assert_eq!(stats.interviews, 2);
        assert!(!dir.path().join("user_feedback.log").exists());

        let text = output(s);
        assert!(text.contains("llame al 112 manualmente"));
    }

    #[test]
    fn test_record_failure_skips_alert() {
        let dir = tempdir().unwrap();
        let history_dir = dir.path().join("emergency_history.log");
        std::fs::create_dir(&history_dir).unwrap();
        let input = format!("{}S\n2\nCalle Sol\n6\nS\nN\n", PROFILE);
        let mut s = session(dir.path(), &input);

        let stats = s.run().unwrap();
        assert_eq!(stats.recorded, 0);
        assert_eq!(stats.failures, 1);
        assert!(!dir.path().join("emergency_alerts.log").exists());
        assert!(output(s).contains("Error al procesar la emergencia"));
    }

    #[test]
    fn test_closed_input_ends_session() {
        let dir = tempdir().unwrap();
        let input = format!("{}S\n2\n", PROFILE);
        let mut s = session(dir.path(), &input);
        assert!(matches!(s.run(), Err(Error::InputClosed)));

        let mut s = session(dir.path(), "A\n");
        assert!(matches!(s.run(), Err(Error::Profile(_))));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("murcia"), "Murcia");
        assert_eq!(title_case(""), "");
    }
}
