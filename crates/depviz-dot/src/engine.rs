//! Layout engines: DOT text in, rendered image on disk.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, info};

use depviz_error::{Error, Result};

/// Image formats the layout engine can produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Jpg,
}

impl ImageFormat {
    /// File extension, also the Graphviz `-T` value.
    pub fn extension(&self) -> &'static str {
        (*self).into()
    }
}

/// Something that lays out a DOT graph and writes the result to `output`.
pub trait LayoutEngine {
    fn name(&self) -> &str;

    fn render(&self, dot: &str, format: ImageFormat, output: &Path) -> Result<()>;
}

/// Default Graphviz executable.
pub const DEFAULT_DOT_PROGRAM: &str = "dot";

/// Runs the Graphviz `dot` program, feeding the graph on stdin.
#[derive(Debug, Clone)]
pub struct GraphvizEngine {
    program: PathBuf,
}

impl Default for GraphvizEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DOT_PROGRAM)
    }
}

impl GraphvizEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the program for one render.
    pub fn args(format: ImageFormat, output: &Path) -> Vec<String> {
        vec![
            format!("-T{}", format.extension()),
            "-o".to_string(),
            output.display().to_string(),
        ]
    }

    fn failure(&self, message: impl Into<String>, format: ImageFormat, output: &Path) -> Error {
        Error::render_failed(message)
            .with_operation("dot::graphviz")
            .with_context("program", self.program.display().to_string())
            .with_context("format", format.extension())
            .with_context("path", output.display().to_string())
    }
}

impl LayoutEngine for GraphvizEngine {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn render(&self, dot: &str, format: ImageFormat, output: &Path) -> Result<()> {
        let start = Instant::now();
        debug!(program = %self.program.display(), %format, path = %output.display(), "spawning layout engine");

        let mut child = Command::new(&self.program)
            .args(Self::args(format, output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                let message = if err.kind() == std::io::ErrorKind::NotFound {
                    "Graphviz executable not found; install Graphviz or pass --dot-binary"
                        .to_string()
                } else {
                    format!("failed to start layout engine: {err}")
                };
                self.failure(message, format, output).set_source(err)
            })?;

        // Dropping stdin closes the pipe so the engine sees EOF.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(dot.as_bytes()),
            None => Ok(()),
        };

        let result = child.wait_with_output().map_err(|err| {
            self.failure(format!("failed to wait for layout engine: {err}"), format, output)
                .set_source(err)
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(self.failure(
                format!(
                    "layout engine exited with {}: {}",
                    result.status,
                    stderr.trim()
                ),
                format,
                output,
            ));
        }
        write_result.map_err(|err| {
            self.failure(format!("failed to send graph to layout engine: {err}"), format, output)
                .set_source(err)
        })?;

        info!(
            path = %output.display(),
            "Layout: {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
