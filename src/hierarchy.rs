//! Namespace hierarchy - groups flat records into a tree of districts
//!
//! Child order is first-insertion order. The layout assigns grid cells in
//! that order, so it must never be sorted.

use crate::extractors::TypeMetrics;
use indexmap::IndexMap;
use serde::Serialize;

/// Name of the synthetic root node
pub const ROOT_NAME: &str = "Root";
/// Bucket for records declared outside any namespace
pub const GLOBAL_NAMESPACE: &str = "Global";
/// PHP namespace separator
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Split a namespace into path segments
///
/// A missing or empty namespace resolves to the single `Global` segment.
pub fn namespace_segments(namespace: Option<&str>) -> Vec<String> {
    match namespace {
        None | Some("") => vec![GLOBAL_NAMESPACE.to_string()],
        Some(ns) => ns.split(NAMESPACE_SEPARATOR).map(str::to_string).collect(),
    }
}

/// Join segments back into a namespace string
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            joined.push(NAMESPACE_SEPARATOR);
        }
        joined.push_str(segment.as_ref());
    }
    joined
}

/// One district of the city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceNode {
    /// Path segment, `Root` or `Global`
    pub name: String,
    /// Segments from the root joined with `\` (empty for the root)
    pub full_path: String,
    /// Distance from the root (root = 0)
    pub level: usize,
    pub children: IndexMap<String, NamespaceNode>,
    /// Records whose namespace is exactly `full_path`, in input order
    pub records: Vec<TypeMetrics>,
}

impl NamespaceNode {
    pub fn root() -> Self {
        Self::new(ROOT_NAME, String::new(), 0)
    }

    fn new(name: &str, full_path: String, level: usize) -> Self {
        Self {
            name: name.to_string(),
            full_path,
            level,
            children: IndexMap::new(),
            records: Vec::new(),
        }
    }

    /// Return the child named `segment`, creating it on first use
    fn child_entry(&mut self, segment: &str) -> &mut NamespaceNode {
        let level = self.level + 1;
        let full_path = if self.full_path.is_empty() {
            segment.to_string()
        } else {
            format!("{}{}{}", self.full_path, NAMESPACE_SEPARATOR, segment)
        };
        self.children
            .entry(segment.to_string())
            .or_insert_with(|| NamespaceNode::new(segment, full_path, level))
    }

    /// Look up a descendant by full path (`""` is this node)
    pub fn find(&self, full_path: &str) -> Option<&NamespaceNode> {
        if full_path.is_empty() {
            return Some(self);
        }
        full_path
            .split(NAMESPACE_SEPARATOR)
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Pre-order walk: this node, then each child subtree in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Records in this node and every descendant
    pub fn total_records(&self) -> usize {
        self.iter().map(NamespaceNode::record_count).sum()
    }

    /// Longest path to a leaf counted in nodes (a leaf has depth 1)
    pub fn max_depth(&self) -> usize {
        1 + self
            .children
            .values()
            .map(NamespaceNode::max_depth)
            .max()
            .unwrap_or(0)
    }

    /// Largest child count of any node in the subtree, at least 1
    pub fn max_breadth(&self) -> usize {
        self.children
            .values()
            .map(NamespaceNode::max_breadth)
            .fold(self.children.len().max(1), usize::max)
    }

    /// No records and no children
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.children.is_empty()
    }
}

/// Pre-order iterator over a namespace tree
pub struct Iter<'a> {
    stack: Vec<&'a NamespaceNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a NamespaceNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.values().rev());
        Some(node)
    }
}

/// Builds a `NamespaceNode` tree one record at a time
#[derive(Debug)]
pub struct HierarchyBuilder {
    root: NamespaceNode,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            root: NamespaceNode::root(),
        }
    }

    /// Attach `record` to the node at the end of its namespace path
    pub fn insert(&mut self, record: TypeMetrics) {
        let segments = namespace_segments(record.namespace.as_deref());
        let node = segments
            .iter()
            .fold(&mut self.root, |node, segment| node.child_entry(segment));
        node.records.push(record);
    }

    pub fn build(self) -> NamespaceNode {
        self.root
    }
}

/// Group `records` into a namespace tree
pub fn build_hierarchy<I>(records: I) -> NamespaceNode
where
    I: IntoIterator<Item = TypeMetrics>,
{
    let mut builder = HierarchyBuilder::new();
    for record in records {
        builder.insert(record);
    }
    let root = builder.build();
    tracing::debug!(
        "Built namespace tree: {} records, depth {}, breadth {}",
        root.total_records(),
        root.max_depth(),
        root.max_breadth()
    );
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(namespace: Option<&str>, name: &str) -> TypeMetrics {
        TypeMetrics::new(format!("{}.php", name), namespace, name)
    }

    #[test]
    fn test_empty_input_builds_bare_root() {
        let root = build_hierarchy(Vec::new());
        assert_eq!(root.name, ROOT_NAME);
        assert_eq!(root.level, 0);
        assert!(root.is_empty());
        assert_eq!(root.max_depth(), 1);
        assert_eq!(root.max_breadth(), 1);
    }

    #[test]
    fn test_records_attach_to_deepest_node() {
        let root = build_hierarchy(vec![
            record(Some("App\\Models"), "User"),
            record(Some("App"), "Kernel"),
        ]);

        let app = root.find("App").unwrap();
        assert_eq!(app.level, 1);
        assert_eq!(app.full_path, "App");
        assert_eq!(app.records.len(), 1);
        assert_eq!(app.records[0].name, "Kernel");

        let models = root.find("App\\Models").unwrap();
        assert_eq!(models.name, "Models");
        assert_eq!(models.level, 2);
        assert_eq!(models.full_path, "App\\Models");
        assert_eq!(models.records[0].name, "User");
        assert_eq!(root.total_records(), 2);
        assert!(root.records.is_empty());
    }

    #[test]
    fn test_missing_namespace_goes_to_global() {
        let root = build_hierarchy(vec![
            record(None, "Helpers"),
            record(Some(""), "Legacy"),
            record(Some("Global"), "Explicit"),
        ]);

        assert_eq!(root.children.len(), 1);
        let global = root.find(GLOBAL_NAMESPACE).unwrap();
        assert_eq!(global.level, 1);
        let names: Vec<_> = global.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Helpers", "Legacy", "Explicit"]);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let root = build_hierarchy(vec![
            record(Some("Zeta"), "Z"),
            record(Some("Alpha\\Inner"), "A"),
            record(Some("Mid"), "M"),
            record(Some("Alpha"), "A2"),
        ]);

        let order: Vec<_> = root.children.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);

        let walked: Vec<_> = root.iter().map(|n| n.full_path.as_str()).collect();
        assert_eq!(walked, vec!["", "Zeta", "Alpha", "Alpha\\Inner", "Mid"]);
    }

    #[test]
    fn test_grouping_is_a_stable_permutation() {
        let input = vec![
            record(Some("A"), "a1"),
            record(Some("B"), "b1"),
            record(Some("A\\C"), "c1"),
            record(Some("A"), "a2"),
            record(None, "g1"),
            record(Some("B"), "b2"),
            record(Some("A\\C"), "c2"),
        ];
        let root = build_hierarchy(input.clone());

        let flattened: Vec<&TypeMetrics> = root.iter().flat_map(|n| n.records.iter()).collect();
        assert_eq!(flattened.len(), input.len());
        for original in &input {
            assert_eq!(
                flattened.iter().filter(|r| *r == &original).count(),
                1,
                "{} should appear exactly once",
                original.name
            );
        }

        for node in root.iter() {
            let expected: Vec<_> = input
                .iter()
                .filter(|r| {
                    join_segments(&namespace_segments(r.namespace.as_deref())) == node.full_path
                })
                .map(|r| r.name.as_str())
                .collect();
            let actual: Vec<_> = node.records.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(actual, expected, "records of '{}'", node.full_path);
        }
    }

    #[test]
    fn test_segment_round_trip() {
        for namespace in [
            "App",
            "App\\Http\\Controllers",
            "Vendor\\Package\\Sub\\Deep",
            "Global",
            "Ünïcode\\Ns",
        ] {
            let segments = namespace_segments(Some(namespace));
            assert_eq!(join_segments(&segments), namespace);
        }
        assert_eq!(namespace_segments(None), vec!["Global".to_string()]);
    }

    #[test]
    fn test_depth_and_breadth() {
        let root = build_hierarchy(vec![
            record(Some("A\\B\\C"), "deep"),
            record(Some("X"), "x"),
            record(Some("Y"), "y"),
            record(Some("A\\P"), "p"),
            record(Some("A\\Q"), "q"),
            record(Some("A\\R"), "r"),
        ]);

        // Root -> A -> B -> C
        assert_eq!(root.max_depth(), 4);
        // A has B, P, Q, R
        assert_eq!(root.max_breadth(), 4);
        assert_eq!(root.find("A\\B").unwrap().max_depth(), 2);
        assert!(root.find("A\\Missing").is_none());
    }
}
