//! Dependency tree model and node/edge collection.
//!
//! This crate turns a JSON dependency tree into the two renderable forms
//! used by depviz: a styled static graph (consumed by the DOT writer) and a
//! flat nodes/links list (consumed by the HTML page).
//!
//! # Module Structure
//!
//! - [`model`]: Input types and JSON loading
//! - [`style`]: Shape and color lookup by node kind and theme
//! - [`walk`]: The pre-order traversal shared by both projections
//! - [`types`]: Render types (RenderNode, RenderEdge, FlatGraph, etc.)
//! - `collect`: The two projections, [`build_graph`] and [`flatten`]

mod collect;
pub mod model;
pub mod style;
mod types;
pub mod walk;

/// Type assumed for nodes without a `type` field.
pub const DEFAULT_TYPE: &str = "default";

pub use collect::{build_graph, flatten};
pub use model::{DependencyNode, Forest, RawId, load_forest, parse_forest};
pub use style::{NodeKind, NodeSize, Shape, StyleSpec, Theme};
pub use types::{
    FlatGraph, FlatLink, FlatNode, GraphOptions, LINK_DEPENDS_ON, Orientation, RenderEdge,
    RenderNode, StaticGraph,
};
pub use walk::{Visit, Walk, WalkIter};
