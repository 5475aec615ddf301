//! Core pipeline: load → walk → project → write → open.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use depviz_collect::{GraphOptions, Walk, build_graph, flatten, load_forest};
use depviz_dot::{LayoutEngine, render_dot, render_image};
use depviz_error::Result;
use depviz_html::{PageData, PageTemplate};

use crate::options::{OutputFormat, RenderConfig};
use crate::output::{ensure_parent_dir, write_artifact};
use crate::viewer::Viewer;

/// Render `config.input` to `config.artifact_path()` and return that path.
///
/// Image formats go through `engine`; `html` and `dot` are written directly.
/// A viewer failure is logged and does not fail the run.
pub fn run(config: &RenderConfig, engine: &dyn LayoutEngine, viewer: &dyn Viewer) -> Result<PathBuf> {
    let total_start = Instant::now();

    // 1. Load
    let load_start = Instant::now();
    let forest = load_forest(&config.input)?;
    info!(
        path = %config.input.display(),
        roots = forest.roots().len(),
        nodes = forest.node_count(),
        "Loading: {:.2}s",
        load_start.elapsed().as_secs_f64()
    );

    // 2. Walk
    let walk = Walk::new(&forest);
    for id in walk.duplicate_ids() {
        warn!(id = %id, "id shared by several nodes; they will render as one");
    }

    // 3. Project and write
    let artifact = config.artifact_path();
    let render_start = Instant::now();
    match config.format.image_format() {
        Some(image_format) => {
            let graph = build_graph(&walk, &graph_options(config));
            ensure_parent_dir(&artifact)?;
            render_image(&graph, engine, image_format, &artifact)?;
        }
        None if config.format == OutputFormat::Html => {
            let graph = flatten(&walk);
            let template = match &config.template {
                Some(path) => PageTemplate::load(path)?,
                None => PageTemplate::bundled()?,
            };
            let html = template.render(&PageData {
                title: &config.title,
                graph: &graph,
                theme: config.theme,
            })?;
            write_artifact(&artifact, &html)?;
        }
        None => {
            let graph = build_graph(&walk, &graph_options(config));
            write_artifact(&artifact, &render_dot(&graph))?;
        }
    }
    info!(
        format = %config.format,
        "Rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    // 4. Open
    if config.open {
        if let Err(err) = viewer.open(&artifact) {
            warn!(error = %err, "could not open output");
        }
    }

    info!(
        path = %artifact.display(),
        total_secs = total_start.elapsed().as_secs_f64(),
        "complete"
    );
    Ok(artifact)
}

fn graph_options(config: &RenderConfig) -> GraphOptions {
    GraphOptions {
        theme: config.theme,
        orientation: config.orientation,
    }
}
