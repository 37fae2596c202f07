//! Content catalogs: starting artifacts and yearly policy events.
//!
//! The default catalogs ship inside the binary as JSON. A directory holding
//! `artifacts.json` and `events.json` in the same format can replace them.

pub mod error;

pub use error::CatalogError;

use republic_core::{Artifact, GameEvent};
use std::collections::HashSet;
use std::path::Path;

const ARTIFACTS_JSON: &str = include_str!("../data/artifacts.json");
const EVENTS_JSON: &str = include_str!("../data/events.json");

/// File names looked up by [`Catalog::load_dir`].
pub const ARTIFACTS_FILE: &str = "artifacts.json";
pub const EVENTS_FILE: &str = "events.json";

/// Read-only artifact and event tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub artifacts: Vec<Artifact>,
    pub events: Vec<GameEvent>,
}

impl Catalog {
    /// The catalogs compiled into the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(ARTIFACTS_JSON, EVENTS_JSON)
    }

    /// Load `artifacts.json` and `events.json` from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let artifacts = read_file(&dir.join(ARTIFACTS_FILE))?;
        let events = read_file(&dir.join(EVENTS_FILE))?;
        log::info!("Loading catalogs from {}", dir.display());
        Self::from_json(&artifacts, &events)
    }

    /// Parse and validate catalogs from JSON text.
    pub fn from_json(artifacts: &str, events: &str) -> Result<Self, CatalogError> {
        let artifacts: Vec<Artifact> =
            serde_json::from_str(artifacts).map_err(|source| CatalogError::Parse {
                what: ARTIFACTS_FILE.to_string(),
                source,
            })?;
        let events: Vec<GameEvent> =
            serde_json::from_str(events).map_err(|source| CatalogError::Parse {
                what: EVENTS_FILE.to_string(),
                source,
            })?;

        let catalog = Self { artifacts, events };
        catalog.validate()?;
        log::debug!(
            "Loaded {} artifacts, {} events",
            catalog.artifacts.len(),
            catalog.events.len()
        );
        Ok(catalog)
    }

    /// Check ids are unique, events carry 2 to 4 options and year windows are non-empty.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for artifact in &self.artifacts {
            if !seen.insert(artifact.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "artifact",
                    id: artifact.id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for event in &self.events {
            if !seen.insert(event.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "event",
                    id: event.id.clone(),
                });
            }
            let count = event.options.len();
            if !(2..=4).contains(&count) {
                return Err(CatalogError::OptionCount {
                    id: event.id.clone(),
                    count,
                });
            }
            if let (Some(min), Some(max)) = (event.min_year, event.max_year)
                && min > max
            {
                return Err(CatalogError::EmptyYearWindow {
                    id: event.id.clone(),
                    min,
                    max,
                });
            }
        }

        for event in &self.events {
            for flag in &event.req_flags {
                if !self.flag_is_settable(flag) {
                    log::warn!(
                        "Event '{}' requires flag '{}' that no option sets",
                        event.id,
                        flag
                    );
                }
            }
        }

        Ok(())
    }

    /// Whether any event option raises `flag`.
    pub fn flag_is_settable(&self, flag: &str) -> bool {
        self.events
            .iter()
            .flat_map(|event| &event.options)
            .any(|option| option.set_flags.iter().any(|f| f == flag))
    }

    pub fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&GameEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Resolve artifact ids to catalog entries, preserving the given order.
    pub fn select_artifacts<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Artifact>, CatalogError> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.artifact(id)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownArtifact(id.to_string()))
            })
            .collect()
    }
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
