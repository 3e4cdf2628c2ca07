// src/resources.rs
//! Crisis resources directory: hotlines, organizations, and emergency
//! numbers behind the `show_crisis_resources` recommendation action.
//! Loaded once from TOML; `TRIAGE_RESOURCES_PATH` overrides the embedded
//! default, and a broken override falls back to the embedded table so the
//! crisis path always has something to serve.

use serde::{Deserialize, Serialize};
use std::fs;

pub const ENV_RESOURCES_PATH: &str = "TRIAGE_RESOURCES_PATH";

static EMBEDDED_RESOURCES: &str = include_str!("../config/resources.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotline {
    pub name: String,
    pub number: String,
    pub available: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyNumbers {
    pub police: String,
    pub ambulance: String,
    pub fire: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResources {
    #[serde(default)]
    pub hotlines: Vec<Hotline>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    pub emergency: EmergencyNumbers,
}

impl CrisisResources {
    /// Load from `TRIAGE_RESOURCES_PATH` if set and parseable, else the
    /// embedded directory.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(ENV_RESOURCES_PATH) {
            match fs::read_to_string(&path).map_err(anyhow::Error::from).and_then(|s| Self::from_toml_str(&s)) {
                Ok(res) => return res,
                Err(e) => {
                    tracing::warn!(%path, error = %e, "resources override unusable, using embedded directory");
                }
            }
        }
        Self::from_toml_str(EMBEDDED_RESOURCES).expect("valid embedded resources")
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
