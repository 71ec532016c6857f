pub mod force_graph;
pub mod tree_outline;
