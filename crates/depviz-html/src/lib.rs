//! Interactive rendering: the flat graph injected into an HTML page template.
//!
//! Templates are Liquid. A page receives four globals:
//!
//! - `title`: page title (plain text, escape it in markup)
//! - `nodes`: JSON array of `{id, name, type, description, shape}`
//! - `links`: JSON array of `{source, target, type}`
//! - `theme`: `"light"` or `"dark"`
//!
//! `nodes` and `links` are safe to place directly inside a `<script>` block.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use depviz_collect::{FlatGraph, Theme};
use depviz_error::{Error, Result};

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "Dependency Tree Visualization";

/// The page bundled with depviz (D3 force layout).
pub const BUNDLED_TEMPLATE: &str = include_str!("../templates/dependency_tree.html");

/// Values substituted into a page template.
#[derive(Debug, Clone, Copy)]
pub struct PageData<'a> {
    pub title: &'a str,
    pub graph: &'a FlatGraph,
    pub theme: Theme,
}

/// A parsed page template.
pub struct PageTemplate {
    template: liquid::Template,
}

impl PageTemplate {
    /// Parse the bundled template.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_TEMPLATE)
            .map_err(|err| err.with_context("template", "bundled"))
    }

    /// Parse template source text.
    pub fn parse(source: &str) -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib().build().map_err(|err| {
            Error::template_failed(err.to_string()).with_operation("html::build_parser")
        })?;
        let template = parser.parse(source).map_err(|err| {
            Error::template_failed(err.to_string()).with_operation("html::parse_template")
        })?;
        Ok(Self { template })
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self> {
        let path_text = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|err| {
            Error::io_at(err, path_text.clone()).with_operation("html::load_template")
        })?;
        debug!(path = %path.display(), bytes = source.len(), "loaded page template");
        Self::parse(&source).map_err(|err| err.with_context("template", path_text))
    }

    /// Render the page.
    pub fn render(&self, page: &PageData<'_>) -> Result<String> {
        let nodes = to_script_json(&page.graph.nodes)?;
        let links = to_script_json(&page.graph.links)?;
        let title = page.title;
        let theme = page.theme.as_str();

        let globals = liquid::object!({
            "title": title,
            "nodes": nodes,
            "links": links,
            "theme": theme,
        });

        self.template.render(&globals).map_err(|err| {
            Error::template_failed(err.to_string()).with_operation("html::render_page")
        })
    }
}

/// Serialize `value` as JSON that can sit inside an HTML `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where their `\u` escapes
/// decode to the same text.
pub fn to_script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(|err| {
        Error::serialization_failed(err.to_string())
            .with_operation("html::to_script_json")
            .set_source(err)
    })?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Render `graph` with the bundled template.
pub fn render_page(title: &str, graph: &FlatGraph, theme: Theme) -> Result<String> {
    PageTemplate::bundled()?.render(&PageData {
        title,
        graph,
        theme,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depviz_collect::{Walk, flatten, parse_forest};
    use depviz_error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn scenario_graph() -> FlatGraph {
        let forest = parse_forest(
            r#"{"id":"root","type":"service","dependencies":[{"id":"db","type":"database"}]}"#,
        )
        .unwrap();
        flatten(&Walk::new(&forest))
    }

    #[test]
    fn test_bundled_page_embeds_payload() {
        let html = render_page(DEFAULT_TITLE, &scenario_graph(), Theme::Light).unwrap();
        assert!(html.contains("<title>Dependency Tree Visualization</title>"));
        assert!(html.contains(
            r#"const nodes = [{"id":"root","name":"root","type":"service","description":"","shape":"service"},{"id":"db","name":"db","type":"database","description":"","shape":"database"}];"#
        ));
        assert!(html.contains(
            r#"const links = [{"source":"root","target":"db","type":"depends_on"}];"#
        ));
        assert!(html.contains(r#"const theme = "light";"#));
    }

    #[test]
    fn test_dark_theme_passed_through() {
        let html = render_page("Deps", &scenario_graph(), Theme::Dark).unwrap();
        assert!(html.contains(r#"const theme = "dark";"#));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = render_page("<b>A & B</b>", &FlatGraph::default(), Theme::Light).unwrap();
        assert!(html.contains("<title>&lt;b&gt;A &amp; B&lt;/b&gt;</title>"));
        assert!(html.contains("const nodes = [];"));
    }

    #[test]
    fn test_script_json_escapes_markup() {
        let forest = parse_forest(
            r#"{"id":"x","description":"</script><script>alert(1)</script> & more"}"#,
        )
        .unwrap();
        let graph = flatten(&Walk::new(&forest));
        let json = to_script_json(&graph.nodes).unwrap();
        assert!(!json.contains("</script>"));
        assert!(!json.contains('&'));

        let decoded: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            decoded[0]["description"],
            "</script><script>alert(1)</script> & more"
        );
    }

    #[test]
    fn test_custom_template() {
        let template = PageTemplate::parse(
            "{{ title }}|{{ theme }}|{{ nodes }}|{{ links }}",
        )
        .unwrap();
        let graph = scenario_graph();
        let rendered = template
            .render(&PageData {
                title: "T",
                graph: &graph,
                theme: Theme::Dark,
            })
            .unwrap();
        let parts: Vec<_> = rendered.splitn(4, '|').collect();
        assert_eq!(parts[0], "T");
        assert_eq!(parts[1], "dark");
        let nodes: serde_json::Value = serde_json::from_str(parts[2]).unwrap();
        assert_eq!(nodes.as_array().unwrap().len(), 2);
        let links: serde_json::Value = serde_json::from_str(parts[3]).unwrap();
        assert_eq!(links[0]["type"], "depends_on");
    }

    #[test]
    fn test_load_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<h1>{{ title }}</h1>").unwrap();
        let rendered = PageTemplate::load(&path)
            .unwrap()
            .render(&PageData {
                title: "Loaded",
                graph: &FlatGraph::default(),
                theme: Theme::Light,
            })
            .unwrap();
        assert_eq!(rendered, "<h1>Loaded</h1>");
    }

    #[test]
    fn test_template_errors() {
        let err = PageTemplate::parse("<h1>{{ title").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::TemplateFailed);
        assert_eq!(err.operation(), "html::parse_template");

        let dir = tempfile::tempdir().unwrap();
        let err = PageTemplate::load(&dir.path().join("missing.html")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "html::load_template");
    }
}
