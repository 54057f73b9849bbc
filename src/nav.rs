//! Selection and navigation state across the two result modes.
//!
//! Each mode remembers its own selected index and the fingerprint of the
//! list it was selected in. A refresh either restores that index (same
//! fingerprint) or resets the selection (list changed). Anchors are
//! re-resolved on every refresh; at most one is highlighted at a time.

use crate::extract::{self, Matcher, ResultSet};
use crate::host::tree::{self, Anchor, NodeHandle};
use crate::host::{Doc, Feature, Vault, Workspace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Backlinks,
}

impl Mode {
    pub fn feature(self) -> Feature {
        match self {
            Mode::Search => Feature::Search,
            Mode::Backlinks => Feature::Backlinks,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Search => "Search",
            Mode::Backlinks => "Backlinks",
        }
    }

    fn matchers(self) -> &'static [Matcher] {
        match self {
            Mode::Search => extract::SEARCH_MATCHERS,
            Mode::Backlinks => extract::BACKLINK_MATCHERS,
        }
    }

    fn slot(self) -> usize {
        match self {
            Mode::Search => 0,
            Mode::Backlinks => 1,
        }
    }
}

/// Picks the mode whose host feature currently has rendered output. Used
/// only at panel activation; afterwards the mode changes explicitly.
pub fn detect_mode(ws: &dyn Workspace) -> Option<Mode> {
    if ws.feature_tree(Feature::Search).is_some() {
        Some(Mode::Search)
    } else if ws.feature_tree(Feature::Backlinks).is_some() {
        Some(Mode::Backlinks)
    } else {
        None
    }
}

pub struct NavState {
    mode: Mode,
    pub results: ResultSet,
    /// `None` means nothing selected yet; the first `move_by(1)` lands on 0.
    pub selected: Option<usize>,
    saved: [Option<usize>; 2],
    last_fingerprint: [Option<String>; 2],
    highlighted: Option<Anchor>,
}

impl NavState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            results: ResultSet::default(),
            selected: None,
            saved: [None, None],
            last_fingerprint: [None, None],
            highlighted: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected_doc(&self) -> Option<&Doc> {
        self.results.doc(self.selected?)
    }

    /// Re-extracts the active mode's result list and reconciles selection:
    /// a changed fingerprint resets it, an unchanged one restores the saved
    /// index (clamped if the list shrank).
    pub fn refresh(&mut self, ws: &dyn Workspace, vault: &dyn Vault) {
        let root = ws.feature_tree(self.mode.feature());
        let set = extract::extract(root.as_ref(), self.mode.matchers(), vault);
        let fingerprint = set.fingerprint();
        let slot = self.mode.slot();
        let changed = self.last_fingerprint[slot].as_deref() != Some(fingerprint.as_str());

        self.clear_highlight();
        self.results = set;
        self.last_fingerprint[slot] = Some(fingerprint);

        if changed {
            self.selected = None;
            self.saved[slot] = None;
        } else if self.results.is_empty() {
            self.selected = None;
        } else {
            self.selected = self.saved[slot].map(|i| i.min(self.results.len() - 1));
            self.saved[slot] = self.selected;
        }

        if let Some(index) = self.selected {
            self.highlight_index(index);
        }
    }

    /// Moves the selection by `delta` with wraparound, refreshing first.
    /// Returns the newly selected document, or `None` when the list is
    /// empty.
    pub fn move_by(&mut self, delta: i32, ws: &dyn Workspace, vault: &dyn Vault) -> Option<Doc> {
        self.refresh(ws, vault);
        let len = self.results.len();
        if len == 0 {
            return None;
        }
        let next = match self.selected {
            None => {
                if delta >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(index) => {
                let moved = index as i64 + delta as i64;
                if moved < 0 {
                    len - 1
                } else if moved as usize >= len {
                    0
                } else {
                    moved as usize
                }
            }
        };
        self.select(next)
    }

    /// Selects `index` (clamped into range), refreshing first. Used when a
    /// result row is activated directly.
    pub fn set_index(&mut self, index: usize, ws: &dyn Workspace, vault: &dyn Vault) -> Option<Doc> {
        self.refresh(ws, vault);
        if self.results.is_empty() {
            return None;
        }
        self.select(index.min(self.results.len() - 1))
    }

    /// Resolves a clicked row back to its post-refresh index and selects it.
    pub fn select_anchor(
        &mut self,
        node: &NodeHandle,
        ws: &dyn Workspace,
        vault: &dyn Vault,
    ) -> Option<Doc> {
        self.refresh(ws, vault);
        let index = self.results.index_of_anchor(node)?;
        self.select(index)
    }

    /// Explicit mode switch. Neither mode's remembered index is cleared;
    /// the refresh decides whether the new mode's index still applies.
    pub fn switch_mode(&mut self, mode: Mode, ws: &dyn Workspace, vault: &dyn Vault) {
        self.mode = mode;
        self.refresh(ws, vault);
    }

    fn select(&mut self, index: usize) -> Option<Doc> {
        self.selected = Some(index);
        self.saved[self.mode.slot()] = Some(index);
        self.highlight_index(index);
        self.results.doc(index).cloned()
    }

    fn highlight_index(&mut self, index: usize) {
        self.clear_highlight();
        if let Some(anchor) = self.results.anchor(index) {
            if tree::highlight(anchor) {
                self.highlighted = Some(anchor.clone());
            }
        }
    }

    pub fn clear_highlight(&mut self) {
        if let Some(anchor) = self.highlighted.take() {
            tree::clear_highlight(&anchor);
        }
    }
}
