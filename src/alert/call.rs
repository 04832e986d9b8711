// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Voice-call alert

use std::io::{self, Write};

use tracing::{error, info, warn};

use super::{trail_record, AlertChannel, ResponderLink};
use crate::audit::RecordSink;
use crate::model::{format_timestamp, EmergencyEvent, UserProfile, MAX_SEVERITY};

/// Tag prefixed to call records in the shared alert trail
const CALL_TAG: &str = "[LLAMADA]";

/// Places a phone call to the emergency number and to the user's contact
pub struct CallAlert {
    trail: Box<dyn RecordSink>,
    link: ResponderLink,
}

impl CallAlert {
    pub fn new(trail: impl RecordSink + 'static, link: ResponderLink) -> Self {
        Self {
            trail: Box::new(trail),
            link,
        }
    }

    fn format_alert(event: &EmergencyEvent) -> String {
        format!(
            "[{}] ALERTA DE EMERGENCIA\nTipo: {}\nUbicación: {}\nGravedad: {}/{}\n\n{}",
            format_timestamp(event.timestamp()),
            event.emergency_type(),
            event.location(),
            event.severity(),
            MAX_SEVERITY,
            event.user_snapshot(),
        )
    }

    fn deliver(&self, event: &EmergencyEvent, out: &mut dyn Write) -> io::Result<()> {
        let message = Self::format_alert(event);
        writeln!(out)?;
        writeln!(out, "=== ALERTA DE LLAMADA ENVIADA ===")?;
        writeln!(out, "{}", message)?;

        self.trail
            .append(&trail_record(&format!("{} {}", CALL_TAG, message)))?;

        self.link.connect(out)?;
        writeln!(out, "✅ ¡Conexión establecida!")?;
        writeln!(out, "Emergencia: {}", event.emergency_type())?;
        Ok(())
    }

    fn write_call_notice(
        profile: &UserProfile,
        event: &EmergencyEvent,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Notificando a contactos por llamada...")?;
        if !profile.has_emergency_contact() {
            warn!("no emergency contact configured");
            writeln!(out, "⚠️  No hay contactos de emergencia configurados.")?;
            return Ok(());
        }
        writeln!(out, "✅ Llamada enviada al contacto: {}", profile.emergency_contact)?;
        writeln!(
            out,
            "Motivo: {} en {} ({})",
            event.emergency_type(),
            event.location(),
            format_timestamp(event.timestamp())
        )
    }
}

impl AlertChannel for CallAlert {
    fn send(&self, event: Option<&EmergencyEvent>, out: &mut dyn Write) -> bool {
        let Some(event) = event else {
            error!("call requested without an event");
            let _ = writeln!(out, "❌ Error: no se puede enviar una alerta vacía");
            return false;
        };

        match self.deliver(event, out) {
            Ok(()) => {
                info!(number = %self.link.emergency_number(), "emergency call placed");
                true
            }
            Err(e) => {
                warn!(error = %e, "emergency call failed");
                let _ = writeln!(out, "❌ Error al guardar la alerta: {}", e);
                false
            }
        }
    }

    fn notify_contacts(&self, profile: &UserProfile, event: &EmergencyEvent, out: &mut dyn Write) {
        if let Err(e) = Self::write_call_notice(profile, event, out) {
            warn!(error = %e, "contact call output failed");
        }
    }

    fn alert_type(&self) -> &'static str {
        "Llamada Telefónica"
    }
}
