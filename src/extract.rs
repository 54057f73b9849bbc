//! Recovers an ordered result list from a host-rendered tree.
//!
//! The host's markup is not a stable contract, so matching is driven by an
//! ordered chain of [`Matcher`]s: the exact classes of the current host
//! version first, progressively looser shapes after. Supporting a new host
//! version means adding a matcher, not touching the state machine.

use crate::host::tree::{self, Anchor, NodeHandle};
use crate::host::{Doc, Vault};

/// One structural shape a result list can take.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    /// Class of the list container.
    pub container: &'static str,
    /// Class of one result row.
    pub item: &'static str,
    /// Class of the label node inside a row; `None` means the row's own
    /// text content is the label.
    pub label: Option<&'static str>,
}

pub const SEARCH_MATCHERS: &[Matcher] = &[
    Matcher {
        container: "search-results-children",
        item: "tree-item-self",
        label: Some("tree-item-inner"),
    },
    Matcher {
        container: "search-results-children",
        item: "tree-item",
        label: None,
    },
    Matcher {
        container: "search-result-container",
        item: "search-result",
        label: None,
    },
];

pub const BACKLINK_MATCHERS: &[Matcher] = &[
    Matcher {
        container: "backlink-pane",
        item: "search-result-file-title",
        label: Some("tree-item-inner"),
    },
    Matcher {
        container: "backlink-pane",
        item: "tree-item-self",
        label: Some("tree-item-inner"),
    },
    Matcher {
        container: "backlink-pane",
        item: "tree-item",
        label: None,
    },
];

/// Section dividers the host renders between result groups. Never documents.
const SECTION_HEADERS: &[&str] = &[
    "Linked mentions",
    "Unlinked mentions",
    "No backlinks found",
    "No results found",
];

/// One extracted result: a document plus the row it was read from. The
/// anchor dies when the host re-renders and must never outlive a refresh.
#[derive(Debug, Clone)]
pub struct ResultEntry {
    pub doc: Doc,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub entries: Vec<ResultEntry>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn doc(&self, index: usize) -> Option<&Doc> {
        self.entries.get(index).map(|e| &e.doc)
    }

    pub fn anchor(&self, index: usize) -> Option<&Anchor> {
        self.entries.get(index).map(|e| &e.anchor)
    }

    /// Order-sensitive digest of the document paths. Two sets with equal
    /// fingerprints are the same list for index-restore purposes.
    pub fn fingerprint(&self) -> String {
        let paths: Vec<&str> = self.entries.iter().map(|e| e.doc.path.as_str()).collect();
        paths.join("|")
    }

    /// Index of the entry anchored at `node`, resolved against the current
    /// list (indices shift across refreshes, so callers re-resolve).
    pub fn index_of_anchor(&self, node: &NodeHandle) -> Option<usize> {
        self.entries.iter().position(|e| {
            e.anchor
                .upgrade()
                .is_some_and(|n| tree::same_node(&n, node))
        })
    }

    pub fn index_of_path(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.doc.path == path)
    }
}

/// Extracts the ordered result list under `root`. An absent root or an
/// unrecognized shape yields an empty set, never an error.
pub fn extract(root: Option<&NodeHandle>, matchers: &[Matcher], vault: &dyn Vault) -> ResultSet {
    let Some(root) = root else {
        return ResultSet::default();
    };
    let Some((matcher, items)) = find_items(root, matchers) else {
        return ResultSet::default();
    };

    let mut set = ResultSet::default();
    for item in items {
        let label = match matcher.label {
            Some(class) => match tree::query_first(&item, class) {
                Some(node) => tree::text_content(&node),
                None => continue,
            },
            None => tree::text_content(&item),
        };
        let label = label.trim();
        if label.is_empty() || is_section_header(label) {
            continue;
        }
        // Unresolvable labels are skipped, never fatal.
        if let Some(doc) = resolve_label(vault, label) {
            set.entries.push(ResultEntry {
                doc,
                anchor: tree::anchor(&item),
            });
        }
    }
    set
}

fn find_items(root: &NodeHandle, matchers: &[Matcher]) -> Option<(Matcher, Vec<NodeHandle>)> {
    for matcher in matchers {
        let container = if root.borrow().has_class(matcher.container) {
            root.clone()
        } else {
            match tree::query_first(root, matcher.container) {
                Some(c) => c,
                None => continue,
            }
        };
        let items = tree::query_all(&container, matcher.item);
        if !items.is_empty() {
            return Some((*matcher, items));
        }
    }
    None
}

fn is_section_header(label: &str) -> bool {
    SECTION_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(label))
}

/// Resolution ladder for a visible label: exact base name, then path
/// suffix, then case-insensitive name, then the same with a trailing
/// extension stripped.
fn resolve_label(vault: &dyn Vault, label: &str) -> Option<Doc> {
    let docs = vault.docs();
    if let Some(doc) = docs.iter().find(|d| d.name == label) {
        return Some(doc.clone());
    }
    if let Some(doc) = docs.iter().find(|d| d.path.ends_with(label)) {
        return Some(doc.clone());
    }
    if let Some(doc) = docs.iter().find(|d| d.name.eq_ignore_ascii_case(label)) {
        return Some(doc.clone());
    }
    if let Some((stem, _)) = label.rsplit_once('.') {
        if !stem.is_empty() {
            return docs
                .iter()
                .find(|d| d.name == stem || d.name.eq_ignore_ascii_case(stem))
                .cloned();
        }
    }
    None
}
