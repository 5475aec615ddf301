//! Core types for graph rendering.

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use crate::style::{NodeSize, Shape, StyleSpec, Theme};

/// Link type attached to every flat link.
pub const LINK_DEPENDS_ON: &str = "depends_on";

// Layout options

/// Rank direction handed to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, IntoStaticStr)]
pub enum Orientation {
    /// Left to right (default)
    #[default]
    #[strum(serialize = "LR")]
    LeftToRight,
    /// Top to bottom (`--vertical`)
    #[strum(serialize = "TB")]
    TopToBottom,
}

impl Orientation {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Self::TopToBottom
        } else {
            Self::LeftToRight
        }
    }

    /// The Graphviz `rankdir` value.
    pub fn rankdir(&self) -> &'static str {
        (*self).into()
    }
}

/// Options for building the static graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    pub theme: Theme,
    pub orientation: Orientation,
}

// Static path

/// Node representation for the static renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: String,
    /// Display label (`name`, else the id)
    pub label: String,
    pub shape: Shape,
    pub fill_color: &'static str,
    pub font_color: &'static str,
    pub border_color: &'static str,
    /// Fixed footprint; databases only
    pub size: Option<NodeSize>,
    /// Hover text taken from the node description
    pub tooltip: Option<String>,
}

impl RenderNode {
    pub fn new(id: String, label: String, style: StyleSpec) -> Self {
        Self {
            id,
            label,
            shape: style.shape,
            fill_color: style.fill_color,
            font_color: style.font_color,
            border_color: style.border_color,
            size: style.size,
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: Option<String>) -> Self {
        self.tooltip = tooltip.filter(|text| !text.is_empty());
        self
    }
}

/// Directed parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderEdge {
    pub from_id: String,
    pub to_id: String,
}

/// The retained graph description consumed by the DOT writer.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticGraph {
    pub name: &'static str,
    pub theme: Theme,
    pub orientation: Orientation,
    /// Nodes in walk order
    pub nodes: Vec<RenderNode>,
    /// Edges in walk order
    pub edges: Vec<RenderEdge>,
}

impl StaticGraph {
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

// Interactive path

/// Node entry of the flat payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    pub shape: &'static str,
}

/// Link entry of the flat payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: &'static str,
}

/// Flat nodes/links lists for the force-directed page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlatGraph {
    pub nodes: Vec<FlatNode>,
    pub links: Vec<FlatLink>,
}
