use std::sync::{Arc, Mutex, Weak};

use crate::error::Error;
use crate::limits::MAX_HIERARCHY_DEPTH;
use crate::reduce::with_suffix;

const DEFAULT_SEPARATOR: &str = "/";

/// A named node in a tree. Parents own their children; a child only keeps a
/// weak link back up, so dropping the root frees the whole tree.
#[derive(Debug)]
pub struct Node {
    name: Option<String>,
    parent: Weak<Node>,
    children: Mutex<Vec<Arc<Node>>>,
}

impl Node {
    pub fn root(name: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            name: name.map(str::to_string),
            parent: Weak::new(),
            children: Mutex::new(Vec::new()),
        })
    }

    /// Create a child under `self` and return it.
    pub fn add_child(self: &Arc<Self>, name: Option<&str>) -> Arc<Self> {
        let child = Arc::new(Self {
            name: name.map(str::to_string),
            parent: Arc::downgrade(self),
            children: Mutex::new(Vec::new()),
        });
        self.children
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(child.clone());
        child
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `None` for a root, or when the parent has already been dropped.
    pub fn parent(&self) -> Option<Arc<Node>> {
        self.parent.upgrade()
    }

    pub fn children(&self) -> Vec<Arc<Node>> {
        self.children
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

// Unlink descendants one at a time so a long chain doesn't drop recursively.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = std::mem::take(
            self.children
                .get_mut()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        while let Some(child) = stack.pop() {
            if let Ok(mut node) = Arc::try_unwrap(child) {
                stack.append(
                    node.children
                        .get_mut()
                        .unwrap_or_else(|poisoned| poisoned.into_inner()),
                );
            }
        }
    }
}

/// Path from the root down to `node`, joined by `separator` (`"/"` when blank).
///
/// Built root first with `with_suffix`, so a blank ancestor name empties
/// everything accumulated up to that point. A lone node renders as its name.
pub fn full_name(node: &Arc<Node>, separator: Option<&str>) -> Result<String, Error> {
    let separator = match separator {
        Some(s) if !s.trim().is_empty() => s,
        _ => DEFAULT_SEPARATOR,
    };

    let mut chain = vec![node.clone()];
    let mut current = node.parent();
    while let Some(parent) = current {
        if chain.len() > MAX_HIERARCHY_DEPTH {
            return Err(Error::LimitExceeded("hierarchy too deep"));
        }
        current = parent.parent();
        chain.push(parent);
    }

    let mut nodes = chain.iter().rev();
    let mut name = nodes
        .next()
        .and_then(|root| root.name())
        .unwrap_or_default()
        .to_string();
    for n in nodes {
        let segment = format!("{separator}{}", n.name().unwrap_or_default());
        name = with_suffix(Some(name.as_str()), Some(segment.as_str()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// child → parent1 → ... → parent6
    fn seven_levels() -> (Arc<Node>, Arc<Node>) {
        let root = Node::root(Some("parent6"));
        let mut node = root.clone();
        for name in ["parent5", "parent4", "parent3", "parent2", "parent1", "child"] {
            node = node.add_child(Some(name));
        }
        (root, node)
    }

    #[test]
    fn unnamed_root_is_empty() {
        assert_eq!(full_name(&Node::root(None), None).unwrap(), "");
    }

    #[test]
    fn lone_node() {
        assert_eq!(full_name(&Node::root(Some("Child")), None).unwrap(), "Child");
    }

    #[test]
    fn one_parent_default_separator() {
        let parent = Node::root(Some("Parent"));
        let child = parent.add_child(Some("Child"));
        assert_eq!(full_name(&child, None).unwrap(), "Parent/Child");
        assert_eq!(full_name(&child, Some("")).unwrap(), "Parent/Child");
        assert_eq!(full_name(&child, Some("  ")).unwrap(), "Parent/Child");
    }

    #[test]
    fn one_parent_custom_separator() {
        let parent = Node::root(Some("Parent"));
        let child = parent.add_child(Some("Child"));
        assert_eq!(full_name(&child, Some("*")).unwrap(), "Parent*Child");
    }

    #[test]
    fn custom_separator_applies_to_every_level() {
        let (_root, leaf) = seven_levels();
        assert_eq!(
            full_name(&leaf, Some("::")).unwrap(),
            "parent6::parent5::parent4::parent3::parent2::parent1::child"
        );
    }

    #[test]
    fn seven_level_chain() {
        let (_root, leaf) = seven_levels();
        assert_eq!(
            full_name(&leaf, None).unwrap(),
            "parent6/parent5/parent4/parent3/parent2/parent1/child"
        );
    }

    #[test]
    fn blank_ancestor_blanks_prefix() {
        let root = Node::root(None);
        let child = root.add_child(Some("Child"));
        assert_eq!(full_name(&child, None).unwrap(), "");
        let grandchild = child.add_child(Some("Leaf"));
        assert_eq!(full_name(&grandchild, None).unwrap(), "");
    }

    #[test]
    fn unnamed_leaf_keeps_trailing_separator() {
        let root = Node::root(Some("Parent"));
        let child = root.add_child(None);
        assert_eq!(full_name(&child, None).unwrap(), "Parent/");
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let root = Node::root(Some("r"));
        let mut node = root.clone();
        for _ in 0..5_000 {
            node = node.add_child(Some("n"));
        }
        let name = full_name(&node, None).unwrap();
        assert_eq!(name.len(), 1 + 5_000 * 2);
    }

    #[test]
    fn too_deep_is_rejected() {
        let root = Node::root(Some("r"));
        let mut node = root.clone();
        for _ in 0..=MAX_HIERARCHY_DEPTH {
            node = node.add_child(Some("n"));
        }
        assert!(matches!(
            full_name(&node, None),
            Err(Error::LimitExceeded(_))
        ));
    }

    #[test]
    fn children_are_owned_by_parent() {
        let root = Node::root(Some("root"));
        let child = root.add_child(Some("a"));
        root.add_child(Some("b"));
        assert_eq!(root.children().len(), 2);
        assert_eq!(child.parent().unwrap().name(), Some("root"));
        assert!(root.parent().is_none());
    }

    #[test]
    fn dropping_root_orphans_children() {
        let root = Node::root(Some("root"));
        let child = root.add_child(Some("a"));
        drop(root);
        assert!(child.parent().is_none());
        assert_eq!(full_name(&child, None).unwrap(), "a");
    }
}
