//! Placement configuration.
//!
//! Built once and handed to the engine at construction; nothing mutates it
//! afterwards. Defaults live in [`crate::consts`]. Hosts can start from
//! [`PlacementConfig::new`], load JSON, or layer environment overrides on top.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_PLACEMENT_DISTANCE, DEFAULT_PITCH_OFFSET_DEG, DEFAULT_SELECTION_OFFSET_Y};

pub const ENV_MIN_PLACEMENT_DISTANCE: &str = "ARPLACE_MIN_PLACEMENT_DISTANCE";
pub const ENV_SELECTION_RADIUS: &str = "ARPLACE_SELECTION_RADIUS";
pub const ENV_SELECTION_OFFSET_Y: &str = "ARPLACE_SELECTION_OFFSET_Y";
pub const ENV_PITCH_OFFSET_DEG: &str = "ARPLACE_PITCH_OFFSET_DEG";

/// Identifier of a placeable object template (the host's prefab/asset key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one object template is required")]
    NoTemplates,
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("invalid value for {var}: {raw:?}")]
    Parse { var: &'static str, raw: String },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable configuration for the placement state machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementConfig {
    /// Templates the user can cycle through; index 0 is active at start.
    pub templates: Vec<TemplateId>,
    /// Objects closer than this (centre to centre) overlap.
    pub min_placement_distance: f64,
    /// A tap closer than this to an object selects it.
    pub selection_radius: f64,
    /// Offset from a selected object to where its menu is anchored.
    pub selection_offset: DVec3,
    /// Local pitch applied to the surface orientation of new objects.
    pub pitch_offset_degrees: f64,
}

/// On-disk shape: everything but the templates is optional.
#[derive(Deserialize)]
struct RawConfig {
    templates: Vec<TemplateId>,
    min_placement_distance: Option<f64>,
    selection_radius: Option<f64>,
    selection_offset: Option<DVec3>,
    pitch_offset_degrees: Option<f64>,
}

impl PlacementConfig {
    /// Defaults for every threshold, with the given templates.
    #[must_use]
    pub fn new(templates: Vec<TemplateId>) -> Self {
        Self {
            templates,
            min_placement_distance: DEFAULT_MIN_PLACEMENT_DISTANCE,
            selection_radius: DEFAULT_MIN_PLACEMENT_DISTANCE,
            selection_offset: DVec3::new(0.0, DEFAULT_SELECTION_OFFSET_Y, 0.0),
            pitch_offset_degrees: DEFAULT_PITCH_OFFSET_DEG,
        }
    }

    /// Parse and validate a JSON config. Missing thresholds take defaults;
    /// a missing selection radius follows the min placement distance.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let mut cfg = Self::new(raw.templates);
        if let Some(d) = raw.min_placement_distance {
            cfg.min_placement_distance = d;
            cfg.selection_radius = d;
        }
        if let Some(r) = raw.selection_radius {
            cfg.selection_radius = r;
        }
        if let Some(offset) = raw.selection_offset {
            cfg.selection_offset = offset;
        }
        if let Some(p) = raw.pitch_offset_degrees {
            cfg.pitch_offset_degrees = p;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by environment variables.
    ///
    /// Optional:
    /// - `ARPLACE_MIN_PLACEMENT_DISTANCE`: default 0.5
    /// - `ARPLACE_SELECTION_RADIUS`: defaults to the min placement distance
    /// - `ARPLACE_SELECTION_OFFSET_Y`: default 0.2
    /// - `ARPLACE_PITCH_OFFSET_DEG`: default -90
    pub fn from_env(templates: Vec<TemplateId>) -> Result<Self, ConfigError> {
        Self::from_lookup(templates, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup<F>(templates: Vec<TemplateId>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::new(templates);

        if let Some(d) = parse_f64(&lookup, ENV_MIN_PLACEMENT_DISTANCE)? {
            cfg.min_placement_distance = d;
            cfg.selection_radius = d;
        }
        if let Some(r) = parse_f64(&lookup, ENV_SELECTION_RADIUS)? {
            cfg.selection_radius = r;
        }
        if let Some(y) = parse_f64(&lookup, ENV_SELECTION_OFFSET_Y)? {
            cfg.selection_offset = DVec3::new(0.0, y, 0.0);
        }
        if let Some(p) = parse_f64(&lookup, ENV_PITCH_OFFSET_DEG)? {
            cfg.pitch_offset_degrees = p;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check templates and thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.templates.is_empty() {
            return Err(ConfigError::NoTemplates);
        }
        require_positive("min_placement_distance", self.min_placement_distance)?;
        require_positive("selection_radius", self.selection_radius)?;
        require_finite("pitch_offset_degrees", self.pitch_offset_degrees)?;
        if !self.selection_offset.is_finite() {
            return Err(ConfigError::NotFinite { field: "selection_offset", value: self.selection_offset.length() });
        }
        Ok(())
    }
}

fn parse_f64<F>(lookup: &F, var: &'static str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ConfigError::Parse { var, raw }),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() { Ok(()) } else { Err(ConfigError::NotFinite { field, value }) }
}
