//! Static graph → DOT text.

use depviz_collect::StaticGraph;
use depviz_collect::style::{
    ARROW_SIZE, EDGE_COLOR, EDGE_ROUTING, NODE_FONT, NODE_FONT_SIZE, NODE_SEPARATION, PEN_WIDTH,
    RANK_SEPARATION, background_color,
};

use crate::dot::DotBuilder;

/// Render the styled graph to DOT.
///
/// Graph attributes come first, then node and edge defaults, then every node
/// and edge in walk order.
pub fn render_dot(graph: &StaticGraph) -> String {
    let mut builder = DotBuilder::new(graph.name);

    builder
        .attr("rankdir", graph.orientation.rankdir())
        .attr("splines", EDGE_ROUTING)
        .attr("nodesep", NODE_SEPARATION)
        .attr("ranksep", RANK_SEPARATION)
        .attr("bgcolor", background_color(graph.theme))
        .node_defaults(&[
            ("style", "filled"),
            ("fontname", NODE_FONT),
            ("fontsize", NODE_FONT_SIZE),
            ("penwidth", PEN_WIDTH),
        ])
        .edge_defaults(&[
            ("arrowsize", ARROW_SIZE),
            ("penwidth", PEN_WIDTH),
            ("color", EDGE_COLOR),
        ]);

    if !graph.nodes.is_empty() {
        builder.blank();
    }
    for node in &graph.nodes {
        let height;
        let width;
        let mut attrs: Vec<(&str, &str)> = vec![
            ("label", node.label.as_str()),
            ("shape", node.shape.as_str()),
            ("fillcolor", node.fill_color),
            ("fontcolor", node.font_color),
            ("color", node.border_color),
        ];
        if let Some(size) = node.size {
            height = size.height.to_string();
            width = size.width.to_string();
            attrs.push(("height", height.as_str()));
            attrs.push(("width", width.as_str()));
        }
        if let Some(tooltip) = &node.tooltip {
            attrs.push(("tooltip", tooltip.as_str()));
        }
        builder.node(&node.id, &attrs);
    }

    if !graph.edges.is_empty() {
        builder.blank();
    }
    for edge in &graph.edges {
        builder.edge(&edge.from_id, &edge.to_id);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depviz_collect::{GraphOptions, Orientation, Theme, Walk, build_graph, parse_forest};
    use pretty_assertions::assert_eq;

    fn dot_for(json: &str, options: GraphOptions) -> String {
        let forest = parse_forest(json).unwrap();
        render_dot(&build_graph(&Walk::new(&forest), &options))
    }

    #[test]
    fn test_scenario_light() {
        let dot = dot_for(
            r#"{"id":"root","type":"service","dependencies":[{"id":"db","type":"database"}]}"#,
            GraphOptions::default(),
        );
        let expected = r##"digraph "Dependency Tree" {
  rankdir="LR";
  splines="ortho";
  nodesep="0.8";
  ranksep="1.2";
  bgcolor="#ffffff";
  node [style="filled", fontname="Helvetica", fontsize="10", penwidth="1.5"];
  edge [arrowsize="0.8", penwidth="1.5", color="#a0a0a0"];

  "root" [label="root", shape="box3d", fillcolor="#64B5F6", fontcolor="#000000", color="#1976D2"];
  "db" [label="db", shape="cylinder", fillcolor="#4DB6AC", fontcolor="#000000", color="#00796B", height="1.2", width="1.8"];

  "root" -> "db";
}
"##;
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_dark_vertical() {
        let dot = dot_for(
            r#"{"id":"q","type":"queue","description":"jobs"}"#,
            GraphOptions {
                theme: Theme::Dark,
                orientation: Orientation::TopToBottom,
            },
        );
        assert!(dot.contains("rankdir=\"TB\";"));
        assert!(dot.contains("bgcolor=\"#2d2d2d\";"));
        assert!(dot.contains(
            r##""q" [label="q", shape="note", fillcolor="#FF8F00", fontcolor="#ffffff", color="#ffffff", tooltip="jobs"];"##
        ));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let dot = dot_for(
            r#"{"id":"a\"b","name":"line one\nline \"two\""}"#,
            GraphOptions::default(),
        );
        assert!(dot.contains(r#""a\"b" [label="line one\nline \"two\"""#));
    }

    #[test]
    fn test_empty_graph() {
        let dot = dot_for("[]", GraphOptions::default());
        assert!(dot.starts_with("digraph \"Dependency Tree\" {\n"));
        assert!(dot.ends_with("edge [arrowsize=\"0.8\", penwidth=\"1.5\", color=\"#a0a0a0\"];\n}\n"));
    }

    #[test]
    fn test_edge_count_matches_parents() {
        let dot = dot_for(
            r#"[{"id":"a","dependencies":[{"id":"b","dependencies":[{}]},{}]},{"id":"c"}]"#,
            GraphOptions::default(),
        );
        assert_eq!(dot.matches(" -> ").count(), 3);
        assert!(dot.contains("\"b\" -> \"node-0-0-0\";"));
        assert!(dot.contains("\"a\" -> \"node-0-1\";"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let json = r#"[{"dependencies":[{"type":"api"},{"type":"lambda"}]},{"type":"ui"}]"#;
        assert_eq!(
            dot_for(json, GraphOptions::default()),
            dot_for(json, GraphOptions::default())
        );
    }
}
