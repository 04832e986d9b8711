// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Multi-channel emergency dispatch

use std::io::{self, Write};

use tracing::{error, info, warn};

use super::{trail_record, AlertChannel, ResponderLink};
use crate::audit::RecordSink;
use crate::model::{format_timestamp, EmergencyEvent, UserProfile, MAX_SEVERITY};

/// Full alert record with user data, dispatched to the emergency service
pub struct DispatchAlert {
    trail: Box<dyn RecordSink>,
    link: ResponderLink,
}

impl DispatchAlert {
    pub fn new(trail: impl RecordSink + 'static, link: ResponderLink) -> Self {
        Self {
            trail: Box::new(trail),
            link,
        }
    }

    fn format_alert(event: &EmergencyEvent) -> String {
        let ts = format_timestamp(event.timestamp());
        let response = event.emergency_type().response();
        format!(
            "[{ts}] ALERTA DE EMERGENCIA\n\
             Tipo: {}\n\
             Ubicación: {}\n\
             Nivel de gravedad: {}/{}\n\
             Prioridad: {}/10\n\
             Servicios requeridos: {}\n\
             Hora del evento: {ts}\n\
             \n\
             INFORMACIÓN DEL USUARIO:\n{}",
            event.emergency_type(),
            event.location(),
            event.severity(),
            MAX_SEVERITY,
            response.priority,
            response.required_services.join(", "),
            event.user_snapshot(),
        )
    }

    fn deliver(&self, event: &EmergencyEvent, out: &mut dyn Write) -> io::Result<()> {
        let message = Self::format_alert(event);
        writeln!(out)?;
        writeln!(out, "=== ALERTA ENVIADA ===")?;
        writeln!(out, "{}", message)?;

        self.trail.append(&trail_record(&message))?;

        self.link.connect(out)?;
        writeln!(out)?;
        writeln!(out, "✅ ¡Conexión establecida con el servicio de emergencias!")?;
        writeln!(out, "Operador: ¿Cuál es su emergencia?")?;
        writeln!(
            out,
            "Sistema: Se ha detectado una emergencia de tipo: {}",
            event.emergency_type()
        )?;
        writeln!(out, "Ubicación: {}", event.location())?;
        writeln!(out)?;
        writeln!(out, "✅ ¡Ayuda en camino! Se ha notificado a los servicios de emergencia.")?;
        Ok(())
    }

    fn write_notification(
        profile: &UserProfile,
        event: &EmergencyEvent,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Notificando a contactos de emergencia...")?;
        if !profile.has_emergency_contact() {
            warn!("no emergency contact configured");
            writeln!(out, "⚠️  No hay contactos de emergencia configurados.")?;
            return Ok(());
        }
        writeln!(
            out,
            "✅ Se ha enviado una notificación a los contactos de emergencia con los siguientes datos:"
        )?;
        writeln!(out, "Tipo de emergencia: {}", event.emergency_type())?;
        writeln!(out, "Ubicación: {}", event.location())?;
        writeln!(out, "Hora del evento: {}", format_timestamp(event.timestamp()))?;
        info!(contact = %profile.emergency_contact, "emergency contact notified");
        Ok(())
    }
}

impl AlertChannel for DispatchAlert {
    fn send(&self, event: Option<&EmergencyEvent>, out: &mut dyn Write) -> bool {
        let Some(event) = event else {
            error!("dispatch requested without an event");
            let _ = writeln!(out, "❌ Error: no se puede enviar una alerta vacía");
            return false;
        };

        match self.deliver(event, out) {
            Ok(()) => {
                info!(
                    kind = %event.emergency_type(),
                    number = %self.link.emergency_number(),
                    "alert dispatched"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, trail = ?self.trail.location(), "alert dispatch failed");
                let _ = writeln!(out, "❌ Error al registrar o enviar la alerta: {}", e);
                false
            }
        }
    }

    fn notify_contacts(&self, profile: &UserProfile, event: &EmergencyEvent, out: &mut dyn Write) {
        if let Err(e) = Self::write_notification(profile, event, out) {
            warn!(error = %e, "contact notification output failed");
        }
    }

    fn alert_type(&self) -> &'static str {
        "Sistema de Alertas de Emergencia"
    }
}
