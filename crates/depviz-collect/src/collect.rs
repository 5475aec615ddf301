//! Projections of a [`Walk`] into the two render forms.

use tracing::debug;

use crate::style;
use crate::types::{
    FlatGraph, FlatLink, FlatNode, GraphOptions, LINK_DEPENDS_ON, RenderEdge, RenderNode,
    StaticGraph,
};
use crate::walk::Walk;

/// Build the styled node/edge set for the static renderer.
///
/// One node per visit and one edge per visit with a parent, both in walk
/// order. No geometry is computed here.
pub fn build_graph(walk: &Walk<'_>, options: &GraphOptions) -> StaticGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for visit in walk {
        let node_style = style::style(visit.kind, options.theme);
        nodes.push(
            RenderNode::new(visit.id.clone(), visit.label, node_style)
                .with_tooltip(visit.node.description.clone()),
        );
        if let Some(parent) = visit.parent {
            edges.push(RenderEdge {
                from_id: parent,
                to_id: visit.id,
            });
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        theme = %options.theme,
        "built static graph"
    );

    StaticGraph {
        name: style::GRAPH_NAME,
        theme: options.theme,
        orientation: options.orientation,
        nodes,
        edges,
    }
}

/// Flatten the walk into nodes/links lists for the interactive page.
///
/// Shapes come from the HTML vocabulary; the theme is not applied here.
pub fn flatten(walk: &Walk<'_>) -> FlatGraph {
    let mut graph = FlatGraph::default();

    for visit in walk {
        graph.nodes.push(FlatNode {
            id: visit.id.clone(),
            name: visit.label,
            shape: visit.kind.html_shape(),
            type_name: visit.type_name,
            description: visit.node.description.clone().unwrap_or_default(),
        });
        if let Some(parent) = visit.parent {
            graph.links.push(FlatLink {
                source: parent,
                target: visit.id,
                link_type: LINK_DEPENDS_ON,
            });
        }
    }

    debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "flattened graph"
    );
    graph
}
