//! Read-only model of a host-rendered result tree.
//!
//! The host rebuilds these trees whenever its search or backlinks feature
//! re-renders, so nothing here is stable across a refresh. Anchors are weak
//! handles: once the host drops a node, every anchor pointing at it goes
//! dead and must be re-resolved through extraction.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared handle to a live node. Held only while walking a tree the host
/// currently owns.
pub type NodeHandle = Rc<RefCell<NodeData>>;

/// Weak handle used for highlighting and scroll requests. Never persisted
/// across a refresh boundary.
pub type Anchor = Weak<RefCell<NodeData>>;

#[derive(Debug, Default)]
pub struct NodeData {
    classes: Vec<String>,
    text: String,
    children: Vec<NodeHandle>,
    /// Set by the panel on the selected result row; the host styles it.
    pub highlighted: bool,
    /// Set alongside a highlight; the host consumes it on its next paint.
    pub scroll_requested: bool,
}

impl NodeData {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

pub fn node(classes: &[&str]) -> NodeHandle {
    Rc::new(RefCell::new(NodeData {
        classes: classes.iter().map(|c| c.to_string()).collect(),
        ..NodeData::default()
    }))
}

pub fn text_node(classes: &[&str], text: &str) -> NodeHandle {
    let n = node(classes);
    n.borrow_mut().text = text.to_string();
    n
}

pub fn push_child(parent: &NodeHandle, child: NodeHandle) {
    parent.borrow_mut().children.push(child);
}

pub fn anchor(node: &NodeHandle) -> Anchor {
    Rc::downgrade(node)
}

pub fn same_node(a: &NodeHandle, b: &NodeHandle) -> bool {
    Rc::ptr_eq(a, b)
}

/// All descendants of `root` (excluding `root` itself) carrying `class`,
/// in visual (depth-first) order.
pub fn query_all(root: &NodeHandle, class: &str) -> Vec<NodeHandle> {
    let mut found = Vec::new();
    collect(root, class, &mut found);
    found
}

pub fn query_first(root: &NodeHandle, class: &str) -> Option<NodeHandle> {
    query_all(root, class).into_iter().next()
}

fn collect(node: &NodeHandle, class: &str, found: &mut Vec<NodeHandle>) {
    for child in node.borrow().children().iter() {
        if child.borrow().has_class(class) {
            found.push(child.clone());
        }
        collect(child, class, found);
    }
}

/// Own text plus descendant text, whitespace-normalized.
pub fn text_content(node: &NodeHandle) -> String {
    let mut parts = Vec::new();
    gather_text(node, &mut parts);
    parts.join(" ").trim().to_string()
}

fn gather_text(node: &NodeHandle, parts: &mut Vec<String>) {
    let data = node.borrow();
    let own = data.text().trim();
    if !own.is_empty() {
        parts.push(own.to_string());
    }
    for child in data.children() {
        gather_text(child, parts);
    }
}

/// Highlights the node behind `anchor` and requests a scroll-into-view.
/// Returns false when the anchor is dead (the host re-rendered).
pub fn highlight(anchor: &Anchor) -> bool {
    match anchor.upgrade() {
        Some(node) => {
            let mut data = node.borrow_mut();
            data.highlighted = true;
            data.scroll_requested = true;
            true
        }
        None => false,
    }
}

pub fn clear_highlight(anchor: &Anchor) {
    if let Some(node) = anchor.upgrade() {
        let mut data = node.borrow_mut();
        data.highlighted = false;
        data.scroll_requested = false;
    }
}

pub fn is_highlighted(node: &NodeHandle) -> bool {
    node.borrow().highlighted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> NodeHandle {
        let root = node(&["pane-content"]);
        let list = node(&["result-list"]);
        for label in ["alpha", "beta"] {
            let item = node(&["result-item"]);
            push_child(&item, text_node(&["result-label"], label));
            push_child(&list, item);
        }
        push_child(&root, list);
        root
    }

    #[test]
    fn test_query_all_depth_first_order() {
        let root = sample_tree();
        let items = query_all(&root, "result-item");
        assert_eq!(items.len(), 2);
        assert_eq!(text_content(&items[0]), "alpha");
        assert_eq!(text_content(&items[1]), "beta");
    }

    #[test]
    fn test_query_excludes_root() {
        let root = node(&["result-item"]);
        assert!(query_all(&root, "result-item").is_empty());
    }

    #[test]
    fn test_text_content_joins_descendants() {
        let item = node(&["result-item"]);
        push_child(&item, text_node(&[], "Project"));
        push_child(&item, text_node(&[], "Plan"));
        assert_eq!(text_content(&item), "Project Plan");
    }

    #[test]
    fn test_highlight_and_clear() {
        let root = sample_tree();
        let item = query_first(&root, "result-item").unwrap();
        let a = anchor(&item);
        assert!(highlight(&a));
        assert!(is_highlighted(&item));
        assert!(item.borrow().scroll_requested);
        clear_highlight(&a);
        assert!(!is_highlighted(&item));
    }

    #[test]
    fn test_dead_anchor_after_rerender() {
        let a = {
            let root = sample_tree();
            let item = query_first(&root, "result-item").unwrap();
            anchor(&item)
        };
        // Tree dropped, as after a host re-render.
        assert!(!highlight(&a));
        clear_highlight(&a); // must not panic
    }
}
