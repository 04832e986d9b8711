// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Emergency catalogue, events and identifiers

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Lowest accepted severity
pub const MIN_SEVERITY: u8 = 1;

/// Highest accepted severity
pub const MAX_SEVERITY: u8 = 10;

/// Emergency categories offered by the interview menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmergencyType {
    TrafficAccident,
    MedicalProblem,
    Fire,
    Assault,
    Other,
}

/// Static response data attached to each emergency type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseProfile {
    pub kind: EmergencyType,
    /// 1-10, where 10 is the highest priority
    pub priority: u8,
    pub protocol: &'static str,
    pub required_services: &'static [&'static str],
}

const RESPONSE_TABLE: [ResponseProfile; 5] = [
    ResponseProfile {
        kind: EmergencyType::TrafficAccident,
        priority: 9,
        protocol: "1. Señalizar la zona del accidente\n\
                   2. No mover a los heridos salvo peligro inminente\n\
                   3. Indicar número de vehículos y personas implicadas\n\
                   4. Esperar a los servicios en un lugar seguro",
        required_services: &["Ambulancia", "Policía", "Bomberos"],
    },
    ResponseProfile {
        kind: EmergencyType::MedicalProblem,
        priority: 8,
        protocol: "1. Llamar inmediatamente a ambulancia (112)\n\
                   2. Facilitar la información médica del paciente\n\
                   3. Realizar primeros auxilios si es necesario\n\
                   4. Mantener al paciente calmado\n\
                   5. Notificar a los contactos de emergencia",
        required_services: &["Ambulancia", "Hospital", "Servicio médico de emergencia"],
    },
    ResponseProfile {
        kind: EmergencyType::Fire,
        priority: 10,
        protocol: "1. Abandonar el edificio por la salida más cercana\n\
                   2. No utilizar ascensores\n\
                   3. Cerrar puertas tras de sí para contener el fuego\n\
                   4. Esperar a los bomberos en el punto de reunión",
        required_services: &["Bomberos", "Ambulancia", "Policía"],
    },
    ResponseProfile {
        kind: EmergencyType::Assault,
        priority: 8,
        protocol: "1. Alejarse del agresor y buscar un lugar seguro\n\
                   2. No enfrentarse al agresor\n\
                   3. Memorizar rasgos y dirección de huida\n\
                   4. Esperar a la policía",
        required_services: &["Policía", "Ambulancia"],
    },
    ResponseProfile {
        kind: EmergencyType::Other,
        priority: 5,
        protocol: "1. Mantener la calma\n\
                   2. Describir la situación al operador\n\
                   3. Seguir las indicaciones del servicio de emergencias",
        required_services: &["Servicio de emergencias 112"],
    },
];

impl EmergencyType {
    /// Catalogue in menu order
    pub const ALL: [EmergencyType; 5] = [
        EmergencyType::TrafficAccident,
        EmergencyType::MedicalProblem,
        EmergencyType::Fire,
        EmergencyType::Assault,
        EmergencyType::Other,
    ];

    /// Operator-facing label
    pub fn label(&self) -> &'static str {
        match self {
            EmergencyType::TrafficAccident => "Accidente de tráfico",
            EmergencyType::MedicalProblem => "Problema médico",
            EmergencyType::Fire => "Incendio",
            EmergencyType::Assault => "Agresión",
            EmergencyType::Other => "Otro",
        }
    }

    /// Map a 1-based menu choice to a type
    pub fn from_menu(choice: usize) -> Option<Self> {
        choice
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn response(&self) -> &'static ResponseProfile {
        // RESPONSE_TABLE follows the order of ALL
        &RESPONSE_TABLE[*self as usize]
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A confirmed emergency report
///
/// Only built once every field has been validated by the interview, so the
/// accessors never need to re-check ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyEvent {
    emergency_type: EmergencyType,
    location: String,
    severity: u8,
    timestamp: DateTime<Local>,
    user_snapshot: String,
}

impl EmergencyEvent {
    pub(crate) fn new(
        emergency_type: EmergencyType,
        location: impl Into<String>,
        severity: u8,
        user_snapshot: impl Into<String>,
    ) -> Self {
        Self {
            emergency_type,
            location: location.into(),
            severity,
            timestamp: Local::now(),
            user_snapshot: user_snapshot.into(),
        }
    }

    pub fn emergency_type(&self) -> EmergencyType {
        self.emergency_type
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn severity(&self) -> u8 {
        self.severity
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    pub fn user_snapshot(&self) -> &str {
        &self.user_snapshot
    }
}

/// Correlation key between a recorded event and its feedback
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmergencyId(String);

impl EmergencyId {
    /// Fresh random 128-bit identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmergencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
