//! Backlink aggregation independent of the host's backlinks UI.
//!
//! Combines the vault's resolved-link table (linked mentions) with a
//! whole-word text scan (unlinked mentions). Order is vault traversal
//! order, stable but not ranked.

use std::collections::HashSet;

use regex::Regex;

use crate::host::{Doc, Vault};

#[derive(Debug, Clone, PartialEq)]
pub struct Backlink {
    pub doc: Doc,
    pub is_linked: bool,
}

/// Every document mentioning `target`, linked entries first. Duplicate-free;
/// `target` itself is never included. Unreadable documents are skipped.
pub fn backlinks_for(vault: &dyn Vault, target: &Doc) -> Vec<Backlink> {
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(target.path.clone());
    let mut out = Vec::new();

    for doc in vault.docs() {
        if doc.path == target.path {
            continue;
        }
        if vault.links_from(&doc.path).iter().any(|t| t == &target.path) {
            seen.insert(doc.path.clone());
            out.push(Backlink {
                doc,
                is_linked: true,
            });
        }
    }

    let Some(pattern) = mention_pattern(&target.name) else {
        return out;
    };
    for doc in vault.docs() {
        if seen.contains(&doc.path) {
            continue;
        }
        let Ok(text) = vault.read(&doc) else {
            // ReadFailure: skip, keep scanning.
            continue;
        };
        if pattern.is_match(&text) {
            seen.insert(doc.path.clone());
            out.push(Backlink {
                doc,
                is_linked: false,
            });
        }
    }

    out
}

/// Case-insensitive whole-word matcher for a document name. The name is
/// escaped first; names are arbitrary user strings.
fn mention_pattern(name: &str) -> Option<Regex> {
    if name.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryVault;

    fn names(links: &[Backlink]) -> Vec<(&str, bool)> {
        links
            .iter()
            .map(|b| (b.doc.name.as_str(), b.is_linked))
            .collect()
    }

    #[test]
    fn test_linked_before_unlinked() {
        let mut v = MemoryVault::new();
        let target = v.add("Project Plan.md", "the plan itself");
        v.add("Mentions.md", "See Project Plan for details");
        v.add("Linker.md", "[[Project Plan]]");
        v.link("Linker.md", "Project Plan.md");
        let links = backlinks_for(&v, &target);
        assert_eq!(names(&links), vec![("Linker", true), ("Mentions", false)]);
    }

    #[test]
    fn test_word_boundary_matching() {
        let mut v = MemoryVault::new();
        let target = v.add("Project Plan.md", "");
        v.add("Hit.md", "See Project Plan for details");
        v.add("Miss.md", "Project Planning is different");
        v.add("CaseHit.md", "about the project plan here");
        let links = backlinks_for(&v, &target);
        assert_eq!(names(&links), vec![("Hit", false), ("CaseHit", false)]);
    }

    #[test]
    fn test_linked_doc_excluded_from_unlinked_scan() {
        let mut v = MemoryVault::new();
        let target = v.add("Alpha.md", "");
        v.add("Both.md", "Alpha is linked and mentioned");
        v.link("Both.md", "Alpha.md");
        let links = backlinks_for(&v, &target);
        assert_eq!(names(&links), vec![("Both", true)]);
    }

    #[test]
    fn test_target_never_included() {
        let mut v = MemoryVault::new();
        let target = v.add("Alpha.md", "Alpha mentions itself: Alpha");
        v.link("Alpha.md", "Alpha.md");
        assert!(backlinks_for(&v, &target).is_empty());
    }

    #[test]
    fn test_unreadable_docs_skipped() {
        let mut v = MemoryVault::new();
        let target = v.add("Alpha.md", "");
        v.add("Broken.md", "Alpha everywhere");
        v.add("Fine.md", "Alpha here too");
        v.mark_unreadable("Broken.md");
        let links = backlinks_for(&v, &target);
        assert_eq!(names(&links), vec![("Fine", false)]);
    }

    #[test]
    fn test_regex_metacharacters_in_name() {
        let mut v = MemoryVault::new();
        let target = v.add("C++ draft.md", "");
        v.add("Hit.md", "learn C++ draft today");
        v.add("Miss.md", "the C++ draftsman notes");
        let links = backlinks_for(&v, &target);
        assert_eq!(names(&links), vec![("Hit", false)]);
    }

    #[test]
    fn test_idempotent() {
        let mut v = MemoryVault::new();
        let target = v.add("Alpha.md", "");
        v.add("One.md", "Alpha");
        v.link("One.md", "Alpha.md");
        v.add("Two.md", "Alpha again");
        let first = backlinks_for(&v, &target);
        let second = backlinks_for(&v, &target);
        assert_eq!(first, second);
        let mut paths: Vec<&str> = first.iter().map(|b| b.doc.path.as_str()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), first.len());
    }
}
