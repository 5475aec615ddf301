//! Static rendering for depviz: DOT output and Graphviz layout.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the [`DotBuilder`]
//! - `render`: [`StaticGraph`](depviz_collect::StaticGraph) → DOT text
//! - `engine`: the [`LayoutEngine`] seam and the Graphviz process engine

pub mod dot;
mod engine;
mod render;

use std::path::Path;

use tracing::info;

use depviz_collect::StaticGraph;
use depviz_error::Result;

pub use dot::DotBuilder;
pub use engine::{DEFAULT_DOT_PROGRAM, GraphvizEngine, ImageFormat, LayoutEngine};
pub use render::render_dot;

/// Render `graph` to DOT and hand it to `engine`, which writes `output`.
pub fn render_image(
    graph: &StaticGraph,
    engine: &dyn LayoutEngine,
    format: ImageFormat,
    output: &Path,
) -> Result<()> {
    let dot = render_dot(graph);
    info!(
        engine = engine.name(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        %format,
        "rendering static graph"
    );
    engine
        .render(&dot, format, output)
        .map_err(|err| err.with_operation("dot::render_image"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    use depviz_collect::{GraphOptions, Walk, build_graph, parse_forest};
    use depviz_error::{Error, ErrorKind};

    #[derive(Default)]
    struct RecordingEngine {
        calls: RefCell<Vec<(String, ImageFormat, PathBuf)>>,
        fail: bool,
    }

    impl LayoutEngine for RecordingEngine {
        fn name(&self) -> &str {
            "recording"
        }

        fn render(&self, dot: &str, format: ImageFormat, output: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((dot.to_string(), format, output.to_path_buf()));
            if self.fail {
                return Err(Error::render_failed("boom").with_operation("recording"));
            }
            Ok(())
        }
    }

    fn sample_graph() -> StaticGraph {
        let forest = parse_forest(r#"{"id":"a","dependencies":[{"id":"b"}]}"#).unwrap();
        build_graph(&Walk::new(&forest), &GraphOptions::default())
    }

    #[test]
    fn test_render_image_passes_dot_to_engine() {
        let engine = RecordingEngine::default();
        let graph = sample_graph();
        render_image(&graph, &engine, ImageFormat::Svg, Path::new("deps.svg")).unwrap();

        let calls = engine.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, render_dot(&graph));
        assert_eq!(calls[0].1, ImageFormat::Svg);
        assert_eq!(calls[0].2, PathBuf::from("deps.svg"));
    }

    #[test]
    fn test_render_image_propagates_failure() {
        let engine = RecordingEngine {
            fail: true,
            ..Default::default()
        };
        let err = render_image(&sample_graph(), &engine, ImageFormat::Png, Path::new("x.png"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RenderFailed);
        assert_eq!(err.operation(), "dot::render_image");
        assert_eq!(err.context_value("called"), Some("recording"));
    }
}
