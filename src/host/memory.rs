//! In-memory host implementation.
//!
//! Backs the test suite and serves as a reference for embedders wiring the
//! panel into a real host. Rendered trees are supplied by the caller, in
//! the markup shape the extractor's primary matchers expect.

use std::collections::{HashMap, HashSet};

use super::tree::{self, NodeHandle};
use super::{Doc, Feature, HostError, PaneId, Placement, Vault, Workspace};

#[derive(Debug)]
struct Pane {
    id: PaneId,
    feature: Feature,
    doc: Option<Doc>,
    pinned: bool,
    offscreen: bool,
}

#[derive(Default)]
pub struct MemoryWorkspace {
    panes: Vec<Pane>,
    next_id: u64,
    active: Option<PaneId>,
    search_tree: Option<NodeHandle>,
    backlinks_tree: Option<NodeHandle>,
    fail_opens: u32,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search_tree(&mut self, root: Option<NodeHandle>) {
        self.search_tree = root;
    }

    pub fn set_backlinks_tree(&mut self, root: Option<NodeHandle>) {
        self.backlinks_tree = root;
    }

    /// Simulates the user pinning a pane.
    pub fn pin_pane(&mut self, pane: PaneId) {
        if let Some(p) = self.pane_mut(pane) {
            p.pinned = true;
        }
    }

    /// Simulates an external close (user or host discarding the pane).
    pub fn close_pane(&mut self, pane: PaneId) {
        self.panes.retain(|p| p.id != pane);
        if self.active == Some(pane) {
            self.active = None;
        }
    }

    /// The next `open_doc` call fails, as a host open error would.
    pub fn fail_next_open(&mut self) {
        self.fail_opens += 1;
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    fn pane_mut(&mut self, pane: PaneId) -> Option<&mut Pane> {
        self.panes.iter_mut().find(|p| p.id == pane)
    }

    fn pane(&self, pane: PaneId) -> Option<&Pane> {
        self.panes.iter().find(|p| p.id == pane)
    }
}

impl Workspace for MemoryWorkspace {
    fn panes_of(&self, feature: Feature) -> Vec<PaneId> {
        self.panes
            .iter()
            .filter(|p| p.feature == feature)
            .map(|p| p.id)
            .collect()
    }

    fn active_pane(&self) -> Option<PaneId> {
        self.active
    }

    fn create_pane(&mut self, placement: Placement) -> PaneId {
        self.next_id += 1;
        let id = PaneId(self.next_id);
        self.panes.push(Pane {
            id,
            feature: Feature::Editor,
            doc: None,
            pinned: false,
            offscreen: placement == Placement::Background,
        });
        id
    }

    fn open_doc(&mut self, pane: PaneId, doc: &Doc, activate: bool) -> Result<(), HostError> {
        if self.fail_opens > 0 {
            self.fail_opens -= 1;
            return Err(HostError::OpenFailed("host rejected open".into()));
        }
        let p = self.pane_mut(pane).ok_or(HostError::NoSuchPane)?;
        p.doc = Some(doc.clone());
        if activate {
            self.active = Some(pane);
        }
        Ok(())
    }

    fn activate_pane(&mut self, pane: PaneId) {
        if self.pane(pane).is_some() {
            self.active = Some(pane);
        }
    }

    fn detach_pane(&mut self, pane: PaneId) {
        self.close_pane(pane);
    }

    fn pane_exists(&self, pane: PaneId) -> bool {
        self.pane(pane).is_some()
    }

    fn pane_pinned(&self, pane: PaneId) -> bool {
        self.pane(pane).is_some_and(|p| p.pinned)
    }

    fn pane_offscreen(&self, pane: PaneId) -> bool {
        self.pane(pane).is_some_and(|p| p.offscreen)
    }

    fn pane_doc(&self, pane: PaneId) -> Option<Doc> {
        self.pane(pane).and_then(|p| p.doc.clone())
    }

    fn feature_tree(&self, feature: Feature) -> Option<NodeHandle> {
        match feature {
            Feature::Search => self.search_tree.clone(),
            Feature::Backlinks => self.backlinks_tree.clone(),
            Feature::Editor => None,
        }
    }
}

#[derive(Default)]
pub struct MemoryVault {
    docs: Vec<Doc>,
    contents: HashMap<String, String>,
    links: HashMap<String, Vec<String>>,
    unreadable: HashSet<String>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str, content: &str) -> Doc {
        let doc = Doc::new(path);
        self.contents.insert(path.to_string(), content.to_string());
        self.docs.push(doc.clone());
        doc
    }

    /// Records a resolved link edge from `from` to `to` (both paths).
    pub fn link(&mut self, from: &str, to: &str) {
        self.links
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
    }

    pub fn mark_unreadable(&mut self, path: &str) {
        self.unreadable.insert(path.to_string());
    }
}

impl Vault for MemoryVault {
    fn docs(&self) -> Vec<Doc> {
        self.docs.clone()
    }

    fn resolve(&self, path: &str) -> Option<Doc> {
        self.docs.iter().find(|d| d.path == path).cloned()
    }

    fn read(&self, doc: &Doc) -> Result<String, HostError> {
        if self.unreadable.contains(&doc.path) {
            return Err(HostError::Unreadable(doc.path.clone()));
        }
        self.contents
            .get(&doc.path)
            .cloned()
            .ok_or_else(|| HostError::Unreadable(doc.path.clone()))
    }

    fn links_from(&self, path: &str) -> Vec<String> {
        self.links.get(path).cloned().unwrap_or_default()
    }
}

/// Builds a rendered search-results tree in the host's current markup shape.
pub fn search_results_tree(labels: &[&str]) -> NodeHandle {
    let root = tree::node(&["workspace-leaf-content"]);
    let list = tree::node(&["search-results-children"]);
    for label in labels {
        let item = tree::node(&["tree-item-self"]);
        tree::push_child(&item, tree::text_node(&["tree-item-inner"], label));
        tree::push_child(&list, item);
    }
    tree::push_child(&root, list);
    root
}

/// Builds a rendered backlinks tree, including the section headers the
/// extractor has to skip over.
pub fn backlink_results_tree(linked: &[&str], unlinked: &[&str]) -> NodeHandle {
    let root = tree::node(&["workspace-leaf-content"]);
    let pane = tree::node(&["backlink-pane"]);
    let section = |header: &str, labels: &[&str]| {
        let head = tree::node(&["search-result-file-title"]);
        tree::push_child(&head, tree::text_node(&["tree-item-inner"], header));
        tree::push_child(&pane, head);
        for label in labels {
            let item = tree::node(&["search-result-file-title"]);
            tree::push_child(&item, tree::text_node(&["tree-item-inner"], label));
            tree::push_child(&pane, item);
        }
    };
    if !linked.is_empty() {
        section("Linked mentions", linked);
    }
    if !unlinked.is_empty() {
        section("Unlinked mentions", unlinked);
    }
    tree::push_child(&root, pane);
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_open() {
        let mut ws = MemoryWorkspace::new();
        let pane = ws.create_pane(Placement::Tab);
        let doc = Doc::new("a.md");
        ws.open_doc(pane, &doc, true).unwrap();
        assert_eq!(ws.pane_doc(pane), Some(doc));
        assert_eq!(ws.active_pane(), Some(pane));
    }

    #[test]
    fn test_background_pane_is_offscreen() {
        let mut ws = MemoryWorkspace::new();
        let pane = ws.create_pane(Placement::Background);
        assert!(ws.pane_offscreen(pane));
        let tab = ws.create_pane(Placement::Tab);
        assert!(!ws.pane_offscreen(tab));
    }

    #[test]
    fn test_open_without_activate_keeps_focus() {
        let mut ws = MemoryWorkspace::new();
        let front = ws.create_pane(Placement::Tab);
        ws.activate_pane(front);
        let back = ws.create_pane(Placement::Background);
        ws.open_doc(back, &Doc::new("b.md"), false).unwrap();
        assert_eq!(ws.active_pane(), Some(front));
    }

    #[test]
    fn test_failed_open() {
        let mut ws = MemoryWorkspace::new();
        let pane = ws.create_pane(Placement::Tab);
        ws.fail_next_open();
        assert!(ws.open_doc(pane, &Doc::new("a.md"), false).is_err());
        // Only the one open fails.
        assert!(ws.open_doc(pane, &Doc::new("a.md"), false).is_ok());
    }

    #[test]
    fn test_vault_read_and_links() {
        let mut vault = MemoryVault::new();
        vault.add("a.md", "hello");
        vault.add("b.md", "world");
        vault.link("b.md", "a.md");
        vault.mark_unreadable("b.md");
        let a = vault.resolve("a.md").unwrap();
        assert_eq!(vault.read(&a).unwrap(), "hello");
        let b = vault.resolve("b.md").unwrap();
        assert!(vault.read(&b).is_err());
        assert_eq!(vault.links_from("b.md"), vec!["a.md".to_string()]);
    }
}
