//! Command-line options and the immutable render configuration built from them.

use std::path::{Path, PathBuf};

use clap::Parser;
use strum::VariantNames;
use strum_macros::{Display, EnumString, IntoStaticStr, VariantNames};

use depviz_collect::{Orientation, Theme};
use depviz_dot::{DEFAULT_DOT_PROGRAM, ImageFormat};
use depviz_error::{Error, Result};
use depviz_html::DEFAULT_TITLE;

/// What kind of artifact to produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr, VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Jpg,
    /// Interactive page
    Html,
    /// DOT source, no layout engine involved
    Dot,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        (*self).into()
    }

    /// The layout engine format, for formats rendered through Graphviz.
    pub fn image_format(&self) -> Option<ImageFormat> {
        match self {
            OutputFormat::Png => Some(ImageFormat::Png),
            OutputFormat::Svg => Some(ImageFormat::Svg),
            OutputFormat::Pdf => Some(ImageFormat::Pdf),
            OutputFormat::Jpg => Some(ImageFormat::Jpg),
            OutputFormat::Html | OutputFormat::Dot => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "depviz",
    about = "Render a JSON dependency tree as a diagram or an interactive HTML page",
    version
)]
pub struct Cli {
    /// JSON file describing the dependency tree (one root object or an array of roots)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file name without extension (defaults to the input file stem)
    #[arg(short = 'o', long = "output", value_name = "NAME")]
    pub output: Option<PathBuf>,

    /// Output format; 'html' writes an interactive page, 'dot' the raw graph source
    #[arg(
        short = 'f',
        long = "format",
        default_value = "png",
        value_parser = clap::builder::PossibleValuesParser::new(OutputFormat::VARIANTS)
    )]
    pub format: String,

    /// Lay the graph out top to bottom instead of left to right
    #[arg(long, default_value_t = false)]
    pub vertical: bool,

    /// Open the generated file in the system viewer
    #[arg(long, default_value_t = false)]
    pub open: bool,

    /// Color theme
    #[arg(
        long,
        default_value = "light",
        value_parser = clap::builder::PossibleValuesParser::new(Theme::VARIANTS)
    )]
    pub theme: String,

    /// Page title for HTML output
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Liquid template to use for HTML output instead of the bundled page
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Graphviz executable used for image formats
    #[arg(long = "dot-binary", value_name = "PATH", default_value = DEFAULT_DOT_PROGRAM)]
    pub dot_binary: PathBuf,
}

impl Cli {
    /// Validate the parsed flags into a [`RenderConfig`].
    pub fn into_config(self) -> Result<RenderConfig> {
        let format = self.format.parse::<OutputFormat>().map_err(|_| {
            Error::invalid_argument(format!("unknown output format '{}'", self.format))
                .with_operation("cli::into_config")
        })?;
        let theme = self.theme.parse::<Theme>().map_err(|_| {
            Error::invalid_argument(format!("unknown theme '{}'", self.theme))
                .with_operation("cli::into_config")
        })?;
        let output = match self.output {
            Some(output) => output,
            None => default_output_stem(&self.input)?,
        };

        Ok(RenderConfig {
            input: self.input,
            output,
            format,
            orientation: Orientation::from_vertical(self.vertical),
            open: self.open,
            theme,
            title: self.title,
            template: self.template,
            dot_binary: self.dot_binary,
        })
    }
}

/// Everything one run needs, fixed before any work starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub input: PathBuf,
    /// Output path without extension
    pub output: PathBuf,
    pub format: OutputFormat,
    pub orientation: Orientation,
    /// Open the artifact after it is written
    pub open: bool,
    pub theme: Theme,
    pub title: String,
    pub template: Option<PathBuf>,
    pub dot_binary: PathBuf,
}

impl RenderConfig {
    /// Defaults matching a bare `depviz <input>` invocation.
    pub fn new(input: impl Into<PathBuf>) -> Result<Self> {
        let input = input.into();
        let output = default_output_stem(&input)?;
        Ok(Self {
            input,
            output,
            format: OutputFormat::default(),
            orientation: Orientation::default(),
            open: false,
            theme: Theme::default(),
            title: DEFAULT_TITLE.to_string(),
            template: None,
            dot_binary: PathBuf::from(DEFAULT_DOT_PROGRAM),
        })
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.orientation = Orientation::from_vertical(vertical);
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_template(mut self, template: Option<PathBuf>) -> Self {
        self.template = template;
        self
    }

    /// `<output>.<format>`. The extension is appended, never substituted, so
    /// a stem like `deps.v2` keeps its dot.
    pub fn artifact_path(&self) -> PathBuf {
        let mut path = self.output.clone().into_os_string();
        path.push(".");
        path.push(self.format.extension());
        PathBuf::from(path)
    }
}

/// The input file stem, relative to the working directory.
fn default_output_stem(input: &Path) -> Result<PathBuf> {
    input.file_stem().map(PathBuf::from).ok_or_else(|| {
        Error::invalid_argument(format!(
            "cannot derive an output name from '{}'; pass --output",
            input.display()
        ))
        .with_operation("cli::default_output_stem")
    })
}
