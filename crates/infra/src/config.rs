//! Configuration loading and representation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use fulfilment_warehouses::Location;

use crate::location_gateway::InMemoryLocationGateway;

/// Path to a JSON array of locations replacing the built-in catalogue.
pub const LOCATIONS_FILE_ENV: &str = "FULFILMENT_LOCATIONS_FILE";

/// Infrastructure settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfraConfig {
    pub locations_file: Option<PathBuf>,
}

impl InfraConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup (tests inject a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let locations_file = lookup(LOCATIONS_FILE_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { locations_file }
    }

    /// Build the location gateway this configuration describes.
    pub fn location_gateway(&self) -> anyhow::Result<InMemoryLocationGateway> {
        match &self.locations_file {
            Some(path) => {
                let locations = load_locations(path)?;
                tracing::info!(path = %path.display(), count = locations.len(), "loaded location catalogue");
                Ok(InMemoryLocationGateway::new(locations))
            }
            None => Ok(InMemoryLocationGateway::builtin()),
        }
    }
}

/// Parse a location catalogue file (JSON array of locations).
pub fn load_locations(path: &Path) -> anyhow::Result<Vec<Location>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read location catalogue {}", path.display()))?;
    let locations: Vec<Location> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid location catalogue {}", path.display()))?;

    let mut seen = HashSet::new();
    for location in &locations {
        if !seen.insert(location.identification.clone()) {
            bail!(
                "duplicate location {} in catalogue {}",
                location.identification,
                path.display()
            );
        }
    }
    Ok(locations)
}
