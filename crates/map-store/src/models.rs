//! Saved map models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use state_data::{ColorScheme, StateRecord};

/// A map configuration as submitted for saving (no id or timestamp yet).
///
/// Missing fields take the editor defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMap {
    pub state_data: Vec<StateRecord>,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_legend_title")]
    pub legend_title: String,
    #[serde(default = "default_legend_min")]
    pub legend_min_label: String,
    #[serde(default = "default_legend_max")]
    pub legend_max_label: String,
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
    /// Explicit fill per state code, used by the `multi` scheme.
    #[serde(default)]
    pub custom_colors: BTreeMap<String, String>,
}

fn default_title() -> String {
    "US Map".to_string()
}

fn default_legend_title() -> String {
    "Value".to_string()
}

fn default_legend_min() -> String {
    "Low".to_string()
}

fn default_legend_max() -> String {
    "High".to_string()
}

fn default_show_labels() -> bool {
    true
}

impl NewMap {
    /// A configuration with default settings around the given records.
    pub fn with_records(state_data: Vec<StateRecord>) -> Self {
        Self {
            state_data,
            color_scheme: ColorScheme::default(),
            title: default_title(),
            legend_title: default_legend_title(),
            legend_min_label: default_legend_min(),
            legend_max_label: default_legend_max(),
            show_labels: default_show_labels(),
            custom_colors: BTreeMap::new(),
        }
    }

    /// Attach an id and creation time.
    pub fn into_saved(self, id: String, created_at: DateTime<Utc>) -> MapConfiguration {
        MapConfiguration {
            id,
            created_at,
            map: self,
        }
    }
}

/// A saved map. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfiguration {
    /// Storage key and embed URL path segment.
    pub id: String,
    #[serde(flatten)]
    pub map: NewMap,
    pub created_at: DateTime<Utc>,
}

impl MapConfiguration {
    pub fn summary(&self) -> MapSummary {
        MapSummary {
            id: self.id.clone(),
            title: self.map.title.clone(),
            created_at: self.created_at,
            embed_url: embed_path(&self.id),
        }
    }
}

/// Listing entry for a saved map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub embed_url: String,
}

/// Relative URL of the embed page for a map.
pub fn embed_path(id: &str) -> String {
    format!("/embed/{}", id)
}

/// Newest first; ids break ties so the order is stable.
pub(crate) fn sort_newest_first(summaries: &mut [MapSummary]) {
    summaries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
