//! Error types for loading and validating trees.

use thiserror::Error;

/// A structural problem found by [`Tree::validate`](crate::Tree::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
	#[error("duplicate node id {id}")]
	DuplicateId { id: u64 },
}

/// Failure while obtaining a tree from the provider.
#[derive(Debug, Error)]
pub enum Error {
	#[error("fetch failed: {0}")]
	Fetch(String),
	#[error("tree provider answered HTTP {status}")]
	Http { status: u16 },
	#[error("malformed tree JSON: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("invalid tree: {0}")]
	InvalidTree(#[from] TreeError),
	#[error("browser environment unavailable: {0}")]
	Environment(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
