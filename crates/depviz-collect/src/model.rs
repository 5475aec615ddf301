//! Input model: the dependency tree as read from JSON.

use std::fmt;
use std::path::Path;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use depviz_error::{Error, Result};

/// An explicit node id. JSON strings and numbers are both accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    /// The id as it appears in the rendered output. Numbers keep their JSON text.
    pub fn as_text(&self) -> String {
        match self {
            RawId::Text(text) => text.clone(),
            RawId::Number(number) => number.to_string(),
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(text) => f.write_str(text),
            RawId::Number(number) => write!(f, "{number}"),
        }
    }
}

/// One entry in the input tree.
///
/// Every field is optional; missing values are filled in by the walker.
/// Unknown fields are ignored. `name` and `description` also accept numbers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DependencyNode {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Option<Vec<DependencyNode>>,
}

impl DependencyNode {
    /// Explicit id, if present and non-empty.
    pub fn explicit_id(&self) -> Option<String> {
        self.id
            .as_ref()
            .map(RawId::as_text)
            .filter(|id| !id.is_empty())
    }

    /// Lower-cased type, `"default"` when absent or empty.
    pub fn type_name(&self) -> String {
        match self.type_name.as_deref() {
            Some(ty) if !ty.is_empty() => ty.to_lowercase(),
            _ => crate::DEFAULT_TYPE.to_string(),
        }
    }

    /// Child dependencies in input order. A missing or `null` list is empty.
    pub fn children(&self) -> &[DependencyNode] {
        self.dependencies.as_deref().unwrap_or(&[])
    }
}

// Tear deep chains down with a work list instead of nested drop calls.
impl Drop for DependencyNode {
    fn drop(&mut self) {
        let mut pending = self.dependencies.take().unwrap_or_default();
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.dependencies.take() {
                pending.extend(children);
            }
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| raw.as_text()))
}

/// The top-level input: one root, or an ordered list of roots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    roots: Vec<DependencyNode>,
}

impl Forest {
    pub fn new(roots: Vec<DependencyNode>) -> Self {
        Self { roots }
    }

    pub fn single(root: DependencyNode) -> Self {
        Self { roots: vec![root] }
    }

    pub fn roots(&self) -> &[DependencyNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes across all roots.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&DependencyNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

impl<'de> Deserialize<'de> for Forest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ForestVisitor)
    }
}

struct ForestVisitor;

impl<'de> Visitor<'de> for ForestVisitor {
    type Value = Forest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object or an array of objects")
    }

    fn visit_map<A>(self, map: A) -> std::result::Result<Forest, A::Error>
    where
        A: MapAccess<'de>,
    {
        DependencyNode::deserialize(MapAccessDeserializer::new(map)).map(Forest::single)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Forest, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut roots = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(root) = seq.next_element::<DependencyNode>()? {
            roots.push(root);
        }
        Ok(Forest::new(roots))
    }
}

/// Parse a forest from JSON text.
///
/// The document must be an object (a single root) or an array of objects.
/// Nesting depth is unbounded; the parser grows its stack on demand.
pub fn parse_forest(text: &str) -> Result<Forest> {
    let forest = deserialize_forest(text).map_err(|err| {
        Error::deserialization_failed(err.to_string())
            .with_operation("collect::parse_forest")
            .with_context("line", err.line().to_string())
            .set_source(err)
    })?;

    debug!(
        roots = forest.roots().len(),
        nodes = forest.node_count(),
        "parsed dependency forest"
    );
    Ok(forest)
}

fn deserialize_forest(text: &str) -> serde_json::Result<Forest> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let forest = Forest::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(forest)
}

/// Read and parse a forest from a JSON file.
pub fn load_forest(path: &Path) -> Result<Forest> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path)
        .map_err(|err| Error::io_at(err, display.clone()).with_operation("collect::load_forest"))?;
    parse_forest(&text).map_err(|err| err.with_context("path", display))
}

#[cfg(test)]
mod tests {
    use super::*;
    use depviz_error::ErrorKind;
    use std::io::Write;

    #[test]
    fn test_single_root() {
        let forest = parse_forest(r#"{"id": "root", "dependencies": [{"id": "db"}]}"#).unwrap();
        assert_eq!(forest.roots().len(), 1);
        assert_eq!(forest.node_count(), 2);
        assert_eq!(forest.roots()[0].explicit_id().as_deref(), Some("root"));
    }

    #[test]
    fn test_array_of_roots() {
        let forest = parse_forest(r#"[{"id": "a"}, {"id": "b", "dependencies": [{}]}]"#).unwrap();
        assert_eq!(forest.roots().len(), 2);
        assert_eq!(forest.node_count(), 3);
    }

    #[test]
    fn test_empty_array() {
        let forest = parse_forest("[]").unwrap();
        assert!(forest.is_empty());
        assert_eq!(forest.node_count(), 0);
    }

    #[test]
    fn test_numeric_and_empty_ids() {
        let forest = parse_forest(r#"[{"id": 42}, {"id": 1.5}, {"id": ""}, {"id": null}]"#).unwrap();
        let ids: Vec<_> = forest.roots().iter().map(|n| n.explicit_id()).collect();
        assert_eq!(
            ids,
            vec![Some("42".to_string()), Some("1.5".to_string()), None, None]
        );
    }

    #[test]
    fn test_type_defaults_and_lowercase() {
        let forest = parse_forest(r#"[{"type": "DataBase"}, {}, {"type": ""}]"#).unwrap();
        let types: Vec<_> = forest.roots().iter().map(|n| n.type_name()).collect();
        assert_eq!(types, vec!["database", "default", "default"]);
    }

    #[test]
    fn test_null_dependencies_and_extra_fields() {
        let forest =
            parse_forest(r#"{"id": "x", "dependencies": null, "owner": "team-a", "tags": [1, 2]}"#)
                .unwrap();
        assert!(forest.roots()[0].children().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_forest(r#"{"id": "root""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.operation(), "collect::parse_forest");
        assert!(err.context_value("line").is_some());
    }

    #[test]
    fn test_wrong_top_level_shape() {
        for text in ["\"just a string\"", "42", "null", "[1, 2]"] {
            let err = parse_forest(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DeserializationFailed, "{text}");
        }
        let err = parse_forest("true").unwrap_err();
        assert!(err.message().contains("an object or an array of objects"), "{err}");
    }

    #[test]
    fn test_wrong_field_type_reports_line() {
        let err = parse_forest("[{\"id\": \"ok\"},\n {\"dependencies\": \"nope\"}]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.context_value("line"), Some("2"));
    }

    #[test]
    fn test_trailing_content_rejected() {
        let err = parse_forest(r#"{"id": "a"} {"id": "b"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
    }

    #[test]
    fn test_numeric_name_and_description() {
        let forest =
            parse_forest(r#"{"id": "svc", "name": 5, "description": 2.5}"#).unwrap();
        let root = &forest.roots()[0];
        assert_eq!(root.name.as_deref(), Some("5"));
        assert_eq!(root.description.as_deref(), Some("2.5"));

        let err = parse_forest(r#"{"name": ["not", "text"]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
    }

    #[test]
    fn test_deeply_nested_document() {
        let depth = 5_000;
        let mut text = "{\"dependencies\":[".repeat(depth);
        text.push_str("{\"id\":\"leaf\"}");
        text.push_str(&"]}".repeat(depth));

        let forest = parse_forest(&text).unwrap();
        assert_eq!(forest.node_count(), depth + 1);

        let mut node = &forest.roots()[0];
        while let [child] = node.children() {
            node = child;
        }
        assert_eq!(node.explicit_id().as_deref(), Some("leaf"));
    }

    #[test]
    fn test_load_forest_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": "svc", "type": "service"}}"#).unwrap();
        let forest = load_forest(file.path()).unwrap();
        assert_eq!(forest.node_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let err = load_forest(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "collect::load_forest");
        assert_eq!(
            err.context_value("path"),
            Some(missing.display().to_string().as_str())
        );
    }
}
