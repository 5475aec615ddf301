//! Opening a finished artifact in the platform's default application.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use depviz_error::{Error, Result};

pub trait Viewer {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Hands the file to `open`, `start` or `xdg-open` without waiting for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl SystemViewer {
    /// The launcher command for the current platform.
    pub fn command(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            // The empty string is the window title `start` expects first.
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<()> {
        let mut cmd = Self::command(path);
        debug!(program = ?cmd.get_program(), path = %path.display(), "launching viewer");
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                Error::viewer_failed(format!("failed to open '{}': {err}", path.display()))
                    .with_operation("viewer::open")
                    .with_context("path", path.display().to_string())
                    .set_source(err)
            })?;
        Ok(())
    }
}
