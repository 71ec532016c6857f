//! Page-level configuration.
//!
//! Read from an optional `<script id="tree-graph-config" type="application/json">`
//! element; every field falls back to its default when omitted.

use log::{info, warn};
use serde::Deserialize;

use crate::components::force_graph::ViewportConfig;
use crate::source::script_text;

/// Id of the script element carrying the configuration.
pub const CONFIG_ID: &str = "tree-graph-config";

/// Tree provider used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3200/tree";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// URL answering GET with the tree JSON.
	pub endpoint: String,
	/// Node field used for auto-colouring.
	pub node_auto_color_by: String,
	/// Directional particles per link.
	pub link_directional_particles: u32,
	/// Padding in pixels kept around the graph when re-fitting.
	pub fit_padding: f64,
	/// Quiet period after the last resize before re-fitting.
	pub resize_debounce_ms: f64,
	/// Also show the tree as a nested list.
	pub show_outline: bool,
}

impl Default for GraphConfig {
	fn default() -> Self {
		let viewport = ViewportConfig::default();
		Self {
			endpoint: DEFAULT_ENDPOINT.into(),
			node_auto_color_by: "node_type".into(),
			link_directional_particles: 6,
			fit_padding: viewport.fit_padding,
			resize_debounce_ms: viewport.debounce_ms,
			show_outline: false,
		}
	}
}

impl GraphConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Reads the page configuration, falling back to defaults.
	pub fn load() -> Self {
		let Some(json) = script_text(CONFIG_ID) else {
			return Self::default();
		};
		match Self::from_json(&json) {
			Ok(config) => {
				info!("tree-graph: using endpoint {}", config.endpoint);
				config
			}
			Err(e) => {
				warn!("tree-graph: ignoring malformed config: {}", e);
				Self::default()
			}
		}
	}

	pub fn viewport(&self) -> ViewportConfig {
		ViewportConfig {
			fit_padding: self.fit_padding,
			debounce_ms: self.resize_debounce_ms,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_default() {
		assert_eq!(GraphConfig::from_json("{}").unwrap(), GraphConfig::default());
	}

	#[test]
	fn defaults_match_viewport() {
		let config = GraphConfig::default();
		assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
		assert_eq!(config.viewport(), ViewportConfig::default());
		assert_eq!(config.link_directional_particles, 6);
	}

	#[test]
	fn partial_override() {
		let config = GraphConfig::from_json(
			r#"{"endpoint": "/api/tree", "show_outline": true, "resize_debounce_ms": 50}"#,
		)
		.unwrap();
		assert_eq!(config.endpoint, "/api/tree");
		assert!(config.show_outline);
		assert_eq!(config.viewport().debounce_ms, 50.0);
		assert_eq!(config.node_auto_color_by, "node_type");
	}

	#[test]
	fn wrong_type_is_an_error() {
		assert!(GraphConfig::from_json(r#"{"fit_padding": "wide"}"#).is_err());
	}
}
