//! DOT format utilities for graph rendering.

use std::fmt::Write;

/// Escape special characters for quoted DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Quote an arbitrary string as a DOT identifier.
///
/// User ids may contain anything, so every id is emitted as a quoted string
/// rather than sanitized (sanitizing would merge `a-b` and `a_b`).
pub fn quote_id(input: &str) -> String {
    format!("\"{}\"", escape_label(input))
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new directed graph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {} {{", quote_id(name));
        Self { output, indent: 1 }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Set default attributes for every node.
    pub fn node_defaults(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        self.defaults("node", attrs)
    }

    /// Set default attributes for every edge.
    pub fn edge_defaults(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        self.defaults("edge", attrs)
    }

    fn defaults(&mut self, target: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str(target);
        self.output.push(' ');
        write_attr_list(&mut self.output, attrs);
        self.output.push_str(";\n");
        self
    }

    /// Add a blank line for readability.
    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Add a node with full attributes.
    pub fn node(&mut self, id: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str(&quote_id(id));
        if !attrs.is_empty() {
            self.output.push(' ');
            write_attr_list(&mut self.output, attrs);
        }
        self.output.push_str(";\n");
        self
    }

    /// Add an edge.
    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{} -> {};", quote_id(from), quote_id(to));
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

fn write_attr_list(output: &mut String, attrs: &[(&str, &str)]) {
    output.push('[');
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        let _ = write!(output, "{}=\"{}\"", key, escape_label(value));
    }
    output.push(']');
}
