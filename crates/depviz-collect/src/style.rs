//! Style resolution: (node kind, theme) → shape and colors.
//!
//! Every lookup is total. Unknown types resolve through [`NodeKind::Default`].

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// Semantic node category, parsed case-insensitively from the `type` field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NodeKind {
    Database,
    Api,
    Service,
    Proxy,
    Queue,
    Cache,
    Ui,
    Microservice,
    Lambda,
    Container,
    #[default]
    Default,
}

impl NodeKind {
    /// Map a type name to its kind. Unrecognized names become `Default`.
    pub fn from_type_name(type_name: &str) -> Self {
        type_name.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Shape token used by the interactive page. An identity mapping of the kind.
    pub fn html_shape(&self) -> &'static str {
        self.as_str()
    }
}

/// Color palette selection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Graphviz node shapes used by the static renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Shape {
    Cylinder,
    Component,
    Box3d,
    Diamond,
    Note,
    Folder,
    Tab,
    Hexagon,
    Parallelogram,
    Rect,
    Box,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Fixed node footprint in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSize {
    pub height: f64,
    pub width: f64,
}

/// Fully resolved visual attributes for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSpec {
    pub shape: Shape,
    pub fill_color: &'static str,
    pub font_color: &'static str,
    pub border_color: &'static str,
    pub size: Option<NodeSize>,
}

/// Generic shape table. `proxy` and `queue` are pinned again in [`style`].
pub fn shape(kind: NodeKind) -> Shape {
    match kind {
        NodeKind::Database => Shape::Cylinder,
        NodeKind::Api => Shape::Component,
        NodeKind::Service => Shape::Box3d,
        NodeKind::Proxy => Shape::Diamond,
        NodeKind::Queue => Shape::Note,
        NodeKind::Cache => Shape::Folder,
        NodeKind::Ui => Shape::Tab,
        NodeKind::Microservice => Shape::Hexagon,
        NodeKind::Lambda => Shape::Parallelogram,
        NodeKind::Container => Shape::Rect,
        NodeKind::Default => Shape::Box,
    }
}

/// Shapes that no other choice may override.
pub fn pinned_shape(kind: NodeKind) -> Option<Shape> {
    match kind {
        NodeKind::Proxy => Some(Shape::Diamond),
        NodeKind::Queue => Some(Shape::Note),
        _ => None,
    }
}

pub fn fill_color(kind: NodeKind, theme: Theme) -> &'static str {
    match theme {
        Theme::Light => match kind {
            NodeKind::Database => "#4DB6AC",
            NodeKind::Api => "#FF8A65",
            NodeKind::Service => "#64B5F6",
            NodeKind::Proxy => "#BA68C8",
            NodeKind::Queue => "#FFD54F",
            NodeKind::Cache => "#AED581",
            NodeKind::Ui => "#7986CB",
            NodeKind::Microservice => "#4DD0E1",
            NodeKind::Lambda => "#F06292",
            NodeKind::Container => "#81C784",
            NodeKind::Default => "#E0E0E0",
        },
        Theme::Dark => match kind {
            NodeKind::Database => "#00695C",
            NodeKind::Api => "#BF360C",
            NodeKind::Service => "#0D47A1",
            NodeKind::Proxy => "#6A1B9A",
            NodeKind::Queue => "#FF8F00",
            NodeKind::Cache => "#558B2F",
            NodeKind::Ui => "#3949AB",
            NodeKind::Microservice => "#00838F",
            NodeKind::Lambda => "#AD1457",
            NodeKind::Container => "#2E7D32",
            NodeKind::Default => "#424242",
        },
    }
}

/// Font color depends on the theme only.
pub fn font_color(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "#000000",
        Theme::Dark => "#ffffff",
    }
}

pub fn border_color(kind: NodeKind, theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "#ffffff",
        Theme::Light => match kind {
            NodeKind::Database => "#00796B",
            NodeKind::Api => "#E64A19",
            NodeKind::Service => "#1976D2",
            NodeKind::Proxy => "#7B1FA2",
            _ => "#616161",
        },
    }
}

/// Only databases get an enlarged footprint.
pub fn size(kind: NodeKind) -> Option<NodeSize> {
    match kind {
        NodeKind::Database => Some(NodeSize {
            height: 1.2,
            width: 1.8,
        }),
        _ => None,
    }
}

/// Resolve the complete node style.
pub fn style(kind: NodeKind, theme: Theme) -> StyleSpec {
    StyleSpec {
        shape: pinned_shape(kind).unwrap_or_else(|| shape(kind)),
        fill_color: fill_color(kind, theme),
        font_color: font_color(theme),
        border_color: border_color(kind, theme),
        size: size(kind),
    }
}

// Graph-level styling

pub const GRAPH_NAME: &str = "Dependency Tree";
pub const NODE_SEPARATION: &str = "0.8";
pub const RANK_SEPARATION: &str = "1.2";
pub const EDGE_ROUTING: &str = "ortho";
pub const NODE_FONT: &str = "Helvetica";
pub const NODE_FONT_SIZE: &str = "10";
pub const PEN_WIDTH: &str = "1.5";
pub const ARROW_SIZE: &str = "0.8";
pub const EDGE_COLOR: &str = "#a0a0a0";

pub fn background_color(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "#ffffff",
        Theme::Dark => "#2d2d2d",
    }
}
