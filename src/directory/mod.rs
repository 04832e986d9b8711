// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Health-center directory - read-only JSON lookup and console rendering

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::console::SEPARATOR_WIDTH;

/// One health-center record
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct HealthCenter {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Dirección")]
    pub address: String,
    #[serde(rename = "Municipio")]
    pub municipality: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
}

fn read_centers(path: &Path) -> Result<Vec<HealthCenter>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let centers = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(centers)
}

/// Load every center from `path`; any failure yields `None`
pub fn load_centers(path: &Path) -> Option<Vec<HealthCenter>> {
    match read_centers(path) {
        Ok(centers) => {
            debug!(count = centers.len(), path = ?path, "health centers loaded");
            Some(centers)
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            warn!(error = %reason, "failed to load health centers");
            None
        }
    }
}

/// Print `centers` as one line per record under a `region` header
pub fn render_centers(centers: &[HealthCenter], region: &str, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "=== TODOS LOS CENTROS DE SALUD DE LA REGIÓN DE {} ===",
        region.to_uppercase()
    )?;
    if centers.is_empty() {
        writeln!(out, "No se encontraron centros en el archivo.")?;
    }
    for center in centers {
        writeln!(
            out,
            "- {} | {} | Municipio: {} | Tel: {}",
            center.name, center.address, center.municipality, center.phone
        )?;
    }
    writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))
}
