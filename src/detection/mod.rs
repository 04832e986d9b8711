// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Detection module - guided emergency interview
//!
//! ```text
//! Gate ──no──────────────────────────────────────────► Cancelled
//!  │yes
//!  ▼
//! TypeSelection ⟲ → LocationEntry ⟲ → SeverityEntry ⟲ → Confirmation ──no──► Cancelled
//!                                                           │yes
//!                                                           ▼
//!                                                       Confirmed(event)
//! ```
//!
//! `⟲` steps re-prompt until the answer is valid; there is no retry cap.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::console::Console;
use crate::error::Result;
use crate::model::{EmergencyEvent, EmergencyType, UserProfile, MAX_SEVERITY, MIN_SEVERITY};

/// Terminal result of one interview
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    Confirmed(EmergencyEvent),
    Cancelled,
}

impl DetectionOutcome {
    pub fn event(&self) -> Option<&EmergencyEvent> {
        match self {
            DetectionOutcome::Confirmed(event) => Some(event),
            DetectionOutcome::Cancelled => None,
        }
    }
}

/// Interview steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Gate,
    TypeSelection,
    LocationEntry,
    SeverityEntry,
    Confirmation,
}

/// Drives the interview that turns operator answers into an [`EmergencyEvent`]
#[derive(Debug, Default)]
pub struct EventDetector;

impl EventDetector {
    pub fn new() -> Self {
        Self
    }

    /// Run one interview against `profile`
    ///
    /// Only console failures are errors; a declined gate or confirmation is
    /// [`DetectionOutcome::Cancelled`].
    pub fn detect<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        profile: &UserProfile,
    ) -> Result<DetectionOutcome> {
        console.say("")?;
        console.say("=== DETECCIÓN DE EMERGENCIA ===")?;

        let mut step = Step::Gate;
        let mut kind = EmergencyType::Other;
        let mut location = String::new();
        let mut severity = MIN_SEVERITY;

        loop {
            debug!(?step, "interview step");
            step = match step {
                Step::Gate => {
                    if !console.confirm("¿Estás en una situación de emergencia?")? {
                        return cancel(console);
                    }
                    Step::TypeSelection
                }
                Step::TypeSelection => {
                    kind = select_type(console)?;
                    Step::LocationEntry
                }
                Step::LocationEntry => {
                    location = read_location(console)?;
                    Step::SeverityEntry
                }
                Step::SeverityEntry => {
                    severity = read_severity(console)?;
                    Step::Confirmation
                }
                Step::Confirmation => {
                    if !confirm_summary(console, kind, &location, severity)? {
                        return cancel(console);
                    }
                    let event = EmergencyEvent::new(kind, location, severity, profile.snapshot());
                    info!(
                        kind = %event.emergency_type(),
                        location = %event.location(),
                        severity = event.severity(),
                        "emergency confirmed"
                    );
                    return Ok(DetectionOutcome::Confirmed(event));
                }
            };
        }
    }
}

fn cancel<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<DetectionOutcome> {
    console.say("Emergencia cancelada o no confirmada.")?;
    info!("interview cancelled");
    Ok(DetectionOutcome::Cancelled)
}

fn select_type<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<EmergencyType> {
    console.say("")?;
    console.say("Tipos de emergencia disponibles:")?;
    for (i, kind) in EmergencyType::ALL.iter().enumerate() {
        console.say(&format!("{}. {}", i + 1, kind.label()))?;
    }

    let max = EmergencyType::ALL.len();
    loop {
        let answer = console.prompt(&format!("Seleccione el tipo de emergencia (1-{}): ", max))?;
        if let Some(kind) = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(EmergencyType::from_menu)
        {
            return Ok(kind);
        }
        console.say(&format!("Opción no válida. Elija un número entre 1 y {}.", max))?;
    }
}

fn read_location<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<String> {
    console.say("")?;
    loop {
        let answer = console.prompt("Ubicación actual: ")?;
        if !answer.trim().is_empty() {
            return Ok(answer);
        }
        console.say("La ubicación es obligatoria.")?;
    }
}

fn read_severity<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<u8> {
    console.say("")?;
    loop {
        let answer = console.prompt(&format!(
            "Nivel de gravedad ({}-{}): ",
            MIN_SEVERITY, MAX_SEVERITY
        ))?;
        match answer.trim().parse::<u8>() {
            Ok(n) if (MIN_SEVERITY..=MAX_SEVERITY).contains(&n) => return Ok(n),
            Ok(_) => console.say(&format!(
                "Por favor, ingrese un valor entre {} y {}.",
                MIN_SEVERITY, MAX_SEVERITY
            ))?,
            Err(_) => console.say("Por favor, ingrese un número válido.")?,
        }
    }
}

fn confirm_summary<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    kind: EmergencyType,
    location: &str,
    severity: u8,
) -> Result<bool> {
    console.say("")?;
    console.say("=== RESUMEN DE LA EMERGENCIA ===")?;
    console.say(&format!("Tipo: {}", kind))?;
    console.say(&format!("Ubicación: {}", location))?;
    console.say(&format!("Nivel de gravedad: {}/{}", severity, MAX_SEVERITY))?;
    console.say("")?;
    console.confirm("¿Confirmar envío de alerta de emergencia?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn profile() -> UserProfile {
        UserProfile {
            full_name: "A".into(),
            phone_number: "600123456".into(),
            medical_info: "No especificada".into(),
            emergency_contact: "B 600654321".into(),
        }
    }

    fn output(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(c.into_inner().1).unwrap()
    }

    #[test]
    fn test_scenario_medical_problem() {
        let mut c = console("S\n2\nMurcia\n7\nS\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();

        let event = outcome.event().expect("confirmed event");
        assert_eq!(event.emergency_type().label(), "Problema médico");
        assert_eq!(event.location(), "Murcia");
        assert_eq!(event.severity(), 7);
        assert_eq!(event.user_snapshot(), profile().snapshot());
    }

    #[test]
    fn test_gate_is_case_insensitive() {
        let mut c = console("s\n1\nCalle 1\n3\ns\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();
        assert!(matches!(outcome, DetectionOutcome::Confirmed(_)));
    }

    #[test]
    fn test_gate_declined_cancels_without_further_prompts() {
        let mut c = console("N\nS\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();
        assert_eq!(outcome, DetectionOutcome::Cancelled);

        // the second line is left unread
        let mut rest = c;
        assert_eq!(rest.read_line().unwrap(), "S");
    }

    #[test]
    fn test_severity_rejects_out_of_range_and_garbage() {
        let mut c = console("S\n1\nPlaza\n0\n11\nabc\n\n5\nS\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();
        assert_eq!(outcome.event().unwrap().severity(), 5);

        let text = output(c);
        assert_eq!(text.matches("Por favor, ingrese un valor entre 1 y 10.").count(), 2);
        assert_eq!(text.matches("Por favor, ingrese un número válido.").count(), 2);
    }

    #[test]
    fn test_type_menu_rejects_invalid_choices() {
        let mut c = console("S\n0\n6\n\nx\n3\nPlaza\n4\nS\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();
        assert_eq!(outcome.event().unwrap().emergency_type(), EmergencyType::Fire);

        let text = output(c);
        assert_eq!(text.matches("Opción no válida").count(), 4);
    }

    #[test]
    fn test_empty_location_never_defaults() {
        let mut c = console("S\n5\n\n\n   \nMain St 1\n2\nS\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();
        assert_eq!(outcome.event().unwrap().location(), "Main St 1");

        let text = output(c);
        assert_eq!(text.matches("La ubicación es obligatoria.").count(), 3);
    }

    #[test]
    fn test_location_keeps_leading_whitespace() {
        let mut c = console("S\n5\n  Portal 2, 3ºB\n2\nS\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();
        assert_eq!(outcome.event().unwrap().location(), "  Portal 2, 3ºB");
    }

    #[test]
    fn test_non_utf8_answers_are_recovered_locally() {
        let input = b"S\n1\nCalle \xff\nMain St 1\n\xfe\n5\nS\n".to_vec();
        let mut c = Console::new(Cursor::new(input), Vec::new());
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();

        let event = outcome.event().expect("confirmed event");
        assert_eq!(event.location(), "Calle \u{FFFD}");
        assert_eq!(event.severity(), 5);
        assert_eq!(output(c).matches("Por favor, ingrese un número válido.").count(), 2);
    }

    #[test]
    fn test_declined_confirmation_cancels() {
        let mut c = console("S\n4\nCalle Luna\n9\nN\n");
        let outcome = EventDetector::new().detect(&mut c, &profile()).unwrap();
        assert_eq!(outcome, DetectionOutcome::Cancelled);
        assert!(outcome.event().is_none());

        let text = output(c);
        assert!(text.contains("Tipo: Agresión"));
        assert!(text.contains("Nivel de gravedad: 9/10"));
        assert!(text.contains("Emergencia cancelada o no confirmada."));
    }

    #[test]
    fn test_closed_input_is_error() {
        let mut c = console("S\n2\n");
        let err = EventDetector::new().detect(&mut c, &profile()).unwrap_err();
        assert!(matches!(err, Error::InputClosed));
    }
}
