//! Promotion of the current result to a real tab, and the focus policy
//! around it.

use crate::host::{Doc, Feature, HostError, PaneId, Placement, Workspace};

/// First editor pane already showing `doc`, skipping `exclude` (the preview
/// surface) and any pane the host has moved off-layout.
pub fn find_pane_with(ws: &dyn Workspace, doc: &Doc, exclude: Option<PaneId>) -> Option<PaneId> {
    ws.panes_of(Feature::Editor).into_iter().find(|&pane| {
        Some(pane) != exclude
            && !ws.pane_offscreen(pane)
            && ws.pane_doc(pane).is_some_and(|d| d.path == doc.path)
    })
}

/// Always opens a fresh tab, duplicates allowed, without moving focus.
/// The caller restores focus to the panel afterward.
pub fn open_keep_focus(ws: &mut dyn Workspace, doc: &Doc) -> Result<PaneId, HostError> {
    let pane = ws.create_pane(Placement::Tab);
    ws.open_doc(pane, doc, false)?;
    Ok(pane)
}

/// Reuses and focuses an existing pane showing `doc`, or opens a new
/// focused tab.
pub fn open_switch_focus(
    ws: &mut dyn Workspace,
    doc: &Doc,
    exclude: Option<PaneId>,
) -> Result<PaneId, HostError> {
    if let Some(pane) = find_pane_with(ws, doc, exclude) {
        ws.activate_pane(pane);
        return Ok(pane);
    }
    let pane = ws.create_pane(Placement::Tab);
    ws.open_doc(pane, doc, true)?;
    Ok(pane)
}

/// Always opens a new focused side-by-side pane, duplicates allowed.
pub fn open_split(ws: &mut dyn Workspace, doc: &Doc) -> Result<PaneId, HostError> {
    let pane = ws.create_pane(Placement::Split);
    ws.open_doc(pane, doc, true)?;
    Ok(pane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryWorkspace;

    #[test]
    fn test_find_skips_excluded_and_offscreen() {
        let mut ws = MemoryWorkspace::new();
        let doc = Doc::new("a.md");
        let hidden = ws.create_pane(Placement::Background);
        ws.open_doc(hidden, &doc, false).unwrap();
        let excluded = ws.create_pane(Placement::Tab);
        ws.open_doc(excluded, &doc, false).unwrap();
        let visible = ws.create_pane(Placement::Tab);
        ws.open_doc(visible, &doc, false).unwrap();
        assert_eq!(find_pane_with(&ws, &doc, Some(excluded)), Some(visible));
        assert_eq!(find_pane_with(&ws, &Doc::new("b.md"), None), None);
    }

    #[test]
    fn test_keep_focus_allows_duplicates_and_keeps_focus() {
        let mut ws = MemoryWorkspace::new();
        let doc = Doc::new("a.md");
        let existing = ws.create_pane(Placement::Tab);
        ws.open_doc(existing, &doc, false).unwrap();
        let panel = ws.create_pane(Placement::Tab);
        ws.activate_pane(panel);

        let opened = open_keep_focus(&mut ws, &doc).unwrap();
        assert_ne!(opened, existing);
        assert_eq!(ws.pane_doc(opened).unwrap().path, "a.md");
        assert_eq!(ws.active_pane(), Some(panel));
    }

    #[test]
    fn test_switch_focus_reuses_existing_pane() {
        let mut ws = MemoryWorkspace::new();
        let doc = Doc::new("a.md");
        let existing = ws.create_pane(Placement::Tab);
        ws.open_doc(existing, &doc, false).unwrap();

        let before = ws.pane_count();
        let pane = open_switch_focus(&mut ws, &doc, None).unwrap();
        assert_eq!(pane, existing);
        assert_eq!(ws.active_pane(), Some(existing));
        assert_eq!(ws.pane_count(), before);
    }

    #[test]
    fn test_switch_focus_opens_new_when_only_preview_has_it() {
        let mut ws = MemoryWorkspace::new();
        let doc = Doc::new("a.md");
        let preview = ws.create_pane(Placement::Background);
        ws.open_doc(preview, &doc, false).unwrap();

        let pane = open_switch_focus(&mut ws, &doc, Some(preview)).unwrap();
        assert_ne!(pane, preview);
        assert_eq!(ws.active_pane(), Some(pane));
    }

    #[test]
    fn test_split_always_opens_new() {
        let mut ws = MemoryWorkspace::new();
        let doc = Doc::new("a.md");
        let existing = ws.create_pane(Placement::Tab);
        ws.open_doc(existing, &doc, false).unwrap();

        let pane = open_split(&mut ws, &doc).unwrap();
        assert_ne!(pane, existing);
        assert_eq!(ws.active_pane(), Some(pane));
    }
}
