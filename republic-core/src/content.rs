//! Catalog entry schema: artifacts chosen at setup and yearly policy events.
//!
//! The catalogs themselves are read-only content owned by the surrounding
//! application (see the `republic-data` crate); the engine only depends on
//! the shape defined here.

use crate::stats::Effects;
use serde::{Deserialize, Serialize};

/// A starting national-character modifier, applied once at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: Effects,
    /// Constitution points spent on this artifact. Negative values refund points.
    #[serde(default)]
    pub point_cost: i32,
    /// Labels that triple the weight of events sharing any of them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// One choice inside a [`GameEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOption {
    pub text: String,
    #[serde(default)]
    pub effects: Effects,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Flags raised when this option is chosen. Flags are never lowered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_flags: Vec<String>,
}

/// A yearly decision point.
///
/// `title` through `image` are presentation metadata and never read by the
/// engine. Gating uses `min_year`/`max_year` (inclusive) and `req_flags`;
/// weighting uses `tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<EventOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Every flag listed here must be set before the event can be offered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub req_flags: Vec<String>,
}

impl GameEvent {
    /// Whether `year` falls inside the event's inclusive year window.
    pub fn in_year_window(&self, year: i32) -> bool {
        self.min_year.map_or(true, |min| year >= min) && self.max_year.map_or(true, |max| year <= max)
    }
}
