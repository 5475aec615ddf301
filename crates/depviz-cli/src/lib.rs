//! depviz command-line interface.
//!
pub mod options;
pub mod output;
pub mod pipeline;
pub mod viewer;

pub use options::{Cli, OutputFormat, RenderConfig};
pub use pipeline::run;
pub use viewer::{SystemViewer, Viewer};
