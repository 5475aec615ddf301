//! Pre-order traversal of a dependency forest.
//!
//! [`Walk`] is the single traversal primitive. Both the static graph builder
//! and the flattener consume [`Walk::iter`], so they see nodes in the same
//! order and with the same ids.

use std::collections::HashSet;

use crate::model::{DependencyNode, Forest};
use crate::style::NodeKind;

/// Prefix of generated ids for nodes without an explicit `id`.
pub const PLACEHOLDER_PREFIX: &str = "node";

/// One visited node together with its resolved identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit<'a> {
    pub node: &'a DependencyNode,
    pub id: String,
    pub label: String,
    /// Lower-cased `type`, `"default"` when absent.
    pub type_name: String,
    pub kind: NodeKind,
    /// Id of the node whose `dependencies` contain this one. `None` for roots.
    pub parent: Option<String>,
    /// Index path from the forest root, e.g. `[0, 2, 1]`.
    pub path: Vec<usize>,
}

impl Visit<'_> {
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A restartable walk over a forest.
///
/// Construction does one pass to collect explicit ids, so generated
/// placeholders can be kept distinct from them.
pub struct Walk<'a> {
    roots: &'a [DependencyNode],
    explicit_ids: HashSet<String>,
    duplicate_ids: Vec<String>,
}

impl<'a> Walk<'a> {
    pub fn new(forest: &'a Forest) -> Self {
        Self::over(forest.roots())
    }

    pub fn over(roots: &'a [DependencyNode]) -> Self {
        let mut explicit_ids = HashSet::new();
        let mut duplicate_ids = Vec::new();

        let mut stack: Vec<&DependencyNode> = roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let Some(id) = node.explicit_id()
                && !explicit_ids.insert(id.clone())
                && !duplicate_ids.contains(&id)
            {
                duplicate_ids.push(id);
            }
            stack.extend(node.children().iter().rev());
        }

        Self {
            roots,
            explicit_ids,
            duplicate_ids,
        }
    }

    /// Start (or restart) the traversal.
    pub fn iter(&self) -> WalkIter<'_, 'a> {
        let stack = self
            .roots
            .iter()
            .enumerate()
            .rev()
            .map(|(index, node)| Frame {
                node,
                parent: None,
                path: vec![index],
            })
            .collect();
        WalkIter { walk: self, stack }
    }

    /// Explicit ids that occur on more than one node, in first-seen order.
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }

    /// Placeholder id for the node at `path`.
    ///
    /// `node-<i>-<j>...`; a trailing `_` is appended while it would clash
    /// with an explicit id.
    fn placeholder_id(&self, path: &[usize]) -> String {
        let mut id = String::from(PLACEHOLDER_PREFIX);
        for index in path {
            id.push('-');
            id.push_str(&index.to_string());
        }
        while self.explicit_ids.contains(&id) {
            id.push('_');
        }
        id
    }
}

impl<'w, 'a> IntoIterator for &'w Walk<'a> {
    type Item = Visit<'a>;
    type IntoIter = WalkIter<'w, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct Frame<'a> {
    node: &'a DependencyNode,
    parent: Option<String>,
    path: Vec<usize>,
}

/// Iterator over [`Visit`]s in pre-order, depth-first, left-to-right.
pub struct WalkIter<'w, 'a> {
    walk: &'w Walk<'a>,
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for WalkIter<'_, 'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let Frame { node, parent, path } = self.stack.pop()?;

        let id = node
            .explicit_id()
            .unwrap_or_else(|| self.walk.placeholder_id(&path));
        let label = node.name.clone().unwrap_or_else(|| id.clone());
        let type_name = node.type_name();
        let kind = NodeKind::from_type_name(&type_name);

        for (index, child) in node.children().iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(index);
            self.stack.push(Frame {
                node: child,
                parent: Some(id.clone()),
                path: child_path,
            });
        }

        Some(Visit {
            node,
            id,
            label,
            type_name,
            kind,
            parent,
            path,
        })
    }
}
