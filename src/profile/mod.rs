// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Profile store - interactive collection of the reporting user's data

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::console::Console;
use crate::error::{Error, Result};
use crate::model::{is_valid_phone, UserProfile, MEDICAL_INFO_UNSPECIFIED, MIN_PHONE_DIGITS};

/// Holds the single active profile of the session
#[derive(Debug, Default)]
pub struct ProfileStore {
    profile: UserProfile,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Interview the operator for every profile field, re-prompting on invalid answers
    pub fn collect<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<&UserProfile> {
        let profile = interview(console).map_err(|e| match e {
            Error::InputClosed => Error::Profile("input closed before the profile was complete".into()),
            other => other,
        })?;

        info!(name = %profile.full_name, "profile registered");
        self.profile = profile;
        Ok(&self.profile)
    }
}

fn interview<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<UserProfile> {
    console.say("")?;
    console.say("=== REGISTRO DE DATOS DE USUARIO ===")?;

    let full_name = loop {
        let name = console.prompt("Ingrese su nombre completo: ")?;
        if !name.trim().is_empty() {
            break name.trim().to_string();
        }
        console.say("El nombre no puede estar vacío.")?;
    };

    let phone_number = loop {
        let phone = console.prompt("Ingrese su número de teléfono: ")?;
        if is_valid_phone(&phone) {
            break phone.trim().to_string();
        }
        debug!(phone = %phone, "rejected phone number");
        console.say(&format!(
            "Número no válido: debe contener al menos {} dígitos.",
            MIN_PHONE_DIGITS
        ))?;
    };

    let medical = console.prompt(
        "Ingrese información médica relevante (alergias, condiciones, etc.) [opcional]: ",
    )?;
    let medical_info = if medical.trim().is_empty() {
        MEDICAL_INFO_UNSPECIFIED.to_string()
    } else {
        medical.trim().to_string()
    };

    let emergency_contact = loop {
        let contact = console.prompt(
            "Ingrese nombre y teléfono de contacto de emergencia (ejemplo: Juan Pérez 123456789): ",
        )?;
        if !contact.trim().is_empty() {
            break contact.trim().to_string();
        }
        console.say("El contacto de emergencia es obligatorio.")?;
    };

    console.say("")?;
    console.say("¡Gracias! Sus datos han sido registrados correctamente.")?;
    console.separator('=')?;

    Ok(UserProfile {
        full_name,
        phone_number,
        medical_info,
        emergency_contact,
    })
}
