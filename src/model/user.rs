// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Reporting user profile

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stored when no medical information is given
pub const MEDICAL_INFO_UNSPECIFIED: &str = "No especificada";

/// Minimum digits a phone number must carry
pub const MIN_PHONE_DIGITS: usize = 9;

/// Identity, medical and emergency-contact data of the reporting user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub phone_number: String,
    pub medical_info: String,
    pub emergency_contact: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone_number: String::new(),
            medical_info: MEDICAL_INFO_UNSPECIFIED.to_string(),
            emergency_contact: String::new(),
        }
    }
}

impl UserProfile {
    /// Formatted capture embedded into each event
    pub fn snapshot(&self) -> String {
        self.to_string()
    }

    pub fn has_emergency_contact(&self) -> bool {
        !self.emergency_contact.trim().is_empty()
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nombre: {}\nTeléfono: {}\nContacto de emergencia: {}\nInformación médica: {}",
            self.full_name, self.phone_number, self.emergency_contact, self.medical_info
        )
    }
}

/// Accepts an optional leading `+` followed by at least
/// [`MIN_PHONE_DIGITS`] digits once spaces and hyphens are removed
pub fn is_valid_phone(raw: &str) -> bool {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && digits.len() >= MIN_PHONE_DIGITS
}
