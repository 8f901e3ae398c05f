//! Matching Engine
//!
//! Static collector directory plus the pure ranking function: material label
//! in, eligible collectors out, cheapest first.

use shared::error::{AppError, AppResult};
use shared::models::Collector;
use std::path::Path;

/// Rank collectors that accept `material`, ascending by `price_per_kg`
///
/// Ties keep their input order (`sort_by` is stable). An empty result is a
/// normal outcome, not an error.
pub fn match_collectors<'a>(material: &str, collectors: &'a [Collector]) -> Vec<&'a Collector> {
    let mut eligible: Vec<&Collector> = collectors.iter().filter(|c| c.accepts(material)).collect();
    eligible.sort_by(|a, b| a.price_per_kg.total_cmp(&b.price_per_kg));
    eligible
}

/// Built-in collectors used when no collectors file is configured
pub fn default_collectors() -> Vec<Collector> {
    vec![
        Collector {
            name: "Pengepul A".into(),
            materials: vec!["Plastik PET".into(), "Kertas".into()],
            price_per_kg: 5000.0,
            lat: Some(-6.9),
            lon: Some(107.6),
            rating: Some(4.5),
            radius_km: None,
        },
        Collector {
            name: "Pengepul B".into(),
            materials: vec!["Plastik PET".into(), "HDPE".into()],
            price_per_kg: 4000.0,
            lat: Some(-6.92),
            lon: Some(107.58),
            rating: Some(4.0),
            radius_km: None,
        },
        Collector {
            name: "Bank Sampah C".into(),
            materials: vec!["Kertas".into(), "Kaca".into(), "Logam".into()],
            price_per_kg: 3000.0,
            lat: Some(-6.91),
            lon: Some(107.59),
            rating: None,
            radius_km: None,
        },
    ]
}

/// Immutable collector list shared by the services
#[derive(Debug, Clone)]
pub struct CollectorDirectory {
    collectors: Vec<Collector>,
}

impl Default for CollectorDirectory {
    fn default() -> Self {
        Self::new(default_collectors())
    }
}

impl CollectorDirectory {
    pub fn new(collectors: Vec<Collector>) -> Self {
        Self { collectors }
    }

    /// Load from a JSON array of collectors
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read collectors file {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let collectors: Vec<Collector> = serde_json::from_str(raw)
            .map_err(|e| AppError::config(format!("Invalid collectors file: {e}")))?;

        for c in &collectors {
            if c.name.trim().is_empty() {
                return Err(AppError::config("Collector name must not be empty"));
            }
            if !c.price_per_kg.is_finite() || c.price_per_kg < 0.0 {
                return Err(AppError::config(format!(
                    "Collector {} has an invalid price_per_kg: {}",
                    c.name, c.price_per_kg
                )));
            }
        }

        Ok(Self::new(collectors))
    }

    /// Directory from `path` when given, the built-in list otherwise
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let directory = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        tracing::info!(count = directory.collectors.len(), "Collector directory loaded");
        Ok(directory)
    }

    pub fn all(&self) -> &[Collector] {
        &self.collectors
    }

    /// Exact name lookup
    pub fn find(&self, name: &str) -> Option<&Collector> {
        self.collectors.iter().find(|c| c.name == name)
    }

    pub fn match_material(&self, material: &str) -> Vec<&Collector> {
        match_collectors(material, &self.collectors)
    }

    /// Cheapest collector for `material`, if any
    pub fn cheapest(&self, material: &str) -> Option<&Collector> {
        self.match_material(material).into_iter().next()
    }
}
