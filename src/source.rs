//! Obtaining the tree: inline `<script>` data or the tree provider over HTTP.

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Request, RequestInit, RequestMode, Response};

use crate::components::force_graph::Tree;
use crate::error::{Error, Result};

/// Id of the script element that may carry the tree inline.
pub const TREE_DATA_ID: &str = "tree-data";

/// Text content of the `<script>` element with the given id.
pub fn script_text(id: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let script: HtmlScriptElement = document.get_element_by_id(id)?.dyn_into().ok()?;
	script.text().ok()
}

/// Decodes and validates a tree.
pub fn parse_tree(json: &str) -> Result<Tree> {
	let tree: Tree = serde_json::from_str(json)?;
	tree.validate()?;
	Ok(tree)
}

/// Fetches the tree from the provider with a plain GET.
pub async fn fetch_tree(endpoint: &str) -> Result<Tree> {
	let window = web_sys::window().ok_or(Error::Environment("window"))?;

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);

	let request = Request::new_with_str_and_init(endpoint, &opts)
		.map_err(|e| Error::Fetch(format!("{:?}", e)))?;
	let resp_value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| Error::Fetch(format!("{:?}", e)))?;
	let resp: Response = resp_value
		.dyn_into()
		.map_err(|_| Error::Fetch("response is not a Response".into()))?;

	if !resp.ok() {
		return Err(Error::Http {
			status: resp.status(),
		});
	}

	let text = JsFuture::from(resp.text().map_err(|e| Error::Fetch(format!("{:?}", e)))?)
		.await
		.map_err(|e| Error::Fetch(format!("{:?}", e)))?;
	let text = text
		.as_string()
		.ok_or_else(|| Error::Fetch("response body is not text".into()))?;
	parse_tree(&text)
}

/// Fills `target` with the tree, preferring inline data over the endpoint.
///
/// Failures are logged and leave `target` unset. A response arriving after
/// the owning view is gone is dropped.
pub fn load_tree(endpoint: String, target: RwSignal<Option<Tree>>) {
	if let Some(json) = script_text(TREE_DATA_ID) {
		match parse_tree(&json) {
			Ok(tree) => {
				info!("tree-graph: loaded inline tree with {} nodes", tree.len());
				target.set(Some(tree));
			}
			Err(e) => warn!("tree-graph: inline tree rejected: {}", e),
		}
		return;
	}

	wasm_bindgen_futures::spawn_local(async move {
		match fetch_tree(&endpoint).await {
			Ok(tree) => {
				info!("tree-graph: fetched tree with {} nodes from {}", tree.len(), endpoint);
				if target.try_set(Some(tree)).is_some() {
					debug!("tree-graph: view gone before tree arrived");
				}
			}
			Err(e) => warn!("tree-graph: loading tree from {} failed: {}", endpoint, e),
		}
	});
}
