//! Seams toward the host application.
//!
//! The panel never implements search, link resolution, or rendering. It
//! consumes the host through two traits: [`Workspace`] for pane management
//! and rendered feature trees, [`Vault`] for the document index. Everything
//! in this module is the interface the core needs and nothing more.

pub mod memory;
pub mod tree;

use std::fmt;

use tree::NodeHandle;

/// A document reference. Identity is the path; the host owns the content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Doc {
    pub path: String,
    /// Human-readable base name (file stem).
    pub name: String,
}

impl Doc {
    pub fn new(path: &str) -> Self {
        let file = path.rsplit('/').next().unwrap_or(path);
        let name = match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        };
        Self {
            path: path.to_string(),
            name: name.to_string(),
        }
    }
}

/// Opaque handle to a host-managed pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

/// Where a newly created pane lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A normal foreground-capable tab.
    Tab,
    /// A side-by-side split.
    Split,
    /// Off-layout pane, hidden from the user. Used by the preview surface.
    Background,
}

/// Host feature kinds the panel enumerates panes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Search,
    Backlinks,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The pane was closed or never existed.
    NoSuchPane,
    /// The host refused to open the document.
    OpenFailed(String),
    /// The document's text could not be read.
    Unreadable(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoSuchPane => write!(f, "pane no longer exists"),
            HostError::OpenFailed(why) => write!(f, "open failed: {}", why),
            HostError::Unreadable(path) => write!(f, "cannot read {}", path),
        }
    }
}

impl std::error::Error for HostError {}

/// Pane management and rendered feature output, as exposed by the host.
pub trait Workspace {
    /// Panes currently showing `feature`, in layout order.
    fn panes_of(&self, feature: Feature) -> Vec<PaneId>;

    fn active_pane(&self) -> Option<PaneId>;

    /// Creates an empty pane at the given placement. Does not focus it.
    fn create_pane(&mut self, placement: Placement) -> PaneId;

    /// Opens `doc` inside `pane`. With `activate` the pane also takes focus.
    fn open_doc(&mut self, pane: PaneId, doc: &Doc, activate: bool) -> Result<(), HostError>;

    fn activate_pane(&mut self, pane: PaneId);

    /// Removes a pane from the layout entirely.
    fn detach_pane(&mut self, pane: PaneId);

    fn pane_exists(&self, pane: PaneId) -> bool;

    /// Pinned panes refuse to change document; the user owns them.
    fn pane_pinned(&self, pane: PaneId) -> bool;

    /// True for panes moved off-layout (the background-pane hiding
    /// mechanism). Such panes never count as "already showing" a document.
    fn pane_offscreen(&self, pane: PaneId) -> bool;

    fn pane_doc(&self, pane: PaneId) -> Option<Doc>;

    /// Root of the rendered result tree for `feature`, if that feature is
    /// currently open and has output. Read-only.
    fn feature_tree(&self, feature: Feature) -> Option<NodeHandle>;
}

/// The host's document index.
pub trait Vault {
    /// Every indexed document, in stable traversal order.
    fn docs(&self) -> Vec<Doc>;

    /// Resolves a canonical path back to a document.
    fn resolve(&self, path: &str) -> Option<Doc>;

    /// Full text of a document.
    fn read(&self, doc: &Doc) -> Result<String, HostError>;

    /// Resolved outgoing link edges (target paths) for a source document.
    fn links_from(&self, path: &str) -> Vec<String>;
}
