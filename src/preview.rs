//! The single reusable background pane that renders the current document.
//!
//! The pane is created lazily, reused across navigations, and recreated if
//! the host invalidated it (closed externally, or pinned by the user). It
//! is never activated and never participates in normal pane queries.

use crate::host::{Doc, PaneId, Placement, Workspace};

#[derive(Default)]
pub struct PreviewSurface {
    pane: Option<PaneId>,
    current: Option<Doc>,
    error: Option<String>,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pane currently backing the preview, for exclusion from
    /// find-existing-pane queries.
    pub fn pane(&self) -> Option<PaneId> {
        self.pane
    }

    pub fn current(&self) -> Option<&Doc> {
        self.current.as_ref()
    }

    /// Inline placeholder text after a failed open, cleared by the next
    /// successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shows `doc` in the background pane without taking focus. A host
    /// failure is absorbed into the error placeholder; it never propagates.
    pub fn show(&mut self, ws: &mut dyn Workspace, doc: &Doc) {
        let pane = self.ensure_pane(ws);
        match ws.open_doc(pane, doc, false) {
            Ok(()) => {
                self.current = Some(doc.clone());
                self.error = None;
            }
            Err(err) => {
                self.error = Some(format!("could not preview {}: {}", doc.name, err));
            }
        }
    }

    fn ensure_pane(&mut self, ws: &mut dyn Workspace) -> PaneId {
        if let Some(pane) = self.pane {
            if ws.pane_exists(pane) && !ws.pane_pinned(pane) {
                return pane;
            }
            // Closed or pinned: the old pane belongs to the user now.
            self.pane = None;
        }
        let pane = ws.create_pane(Placement::Background);
        self.pane = Some(pane);
        pane
    }

    /// Detaches the pane on panel close. The surface must not leak an
    /// orphaned pane into the host layout.
    pub fn teardown(&mut self, ws: &mut dyn Workspace) {
        if let Some(pane) = self.pane.take() {
            if ws.pane_exists(pane) {
                ws.detach_pane(pane);
            }
        }
        self.current = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryWorkspace;

    #[test]
    fn test_pane_created_once_and_reused() {
        let mut ws = MemoryWorkspace::new();
        let mut preview = PreviewSurface::new();
        preview.show(&mut ws, &Doc::new("a.md"));
        let first = preview.pane().unwrap();
        preview.show(&mut ws, &Doc::new("b.md"));
        assert_eq!(preview.pane(), Some(first));
        assert_eq!(ws.pane_count(), 1);
        assert_eq!(preview.current().unwrap().path, "b.md");
    }

    #[test]
    fn test_pane_is_background_and_unfocused() {
        let mut ws = MemoryWorkspace::new();
        let mut preview = PreviewSurface::new();
        preview.show(&mut ws, &Doc::new("a.md"));
        let pane = preview.pane().unwrap();
        assert!(ws.pane_offscreen(pane));
        assert_eq!(ws.active_pane(), None);
    }

    #[test]
    fn test_recreated_after_external_close() {
        let mut ws = MemoryWorkspace::new();
        let mut preview = PreviewSurface::new();
        preview.show(&mut ws, &Doc::new("a.md"));
        let first = preview.pane().unwrap();
        ws.close_pane(first);
        preview.show(&mut ws, &Doc::new("a.md"));
        let second = preview.pane().unwrap();
        assert_ne!(first, second);
        assert!(ws.pane_exists(second));
    }

    #[test]
    fn test_recreated_after_pin_leaving_pinned_pane_alone() {
        let mut ws = MemoryWorkspace::new();
        let mut preview = PreviewSurface::new();
        preview.show(&mut ws, &Doc::new("a.md"));
        let pinned = preview.pane().unwrap();
        ws.pin_pane(pinned);
        preview.show(&mut ws, &Doc::new("b.md"));
        assert_ne!(preview.pane(), Some(pinned));
        // The pinned pane keeps its document and stays in the layout.
        assert!(ws.pane_exists(pinned));
        assert_eq!(ws.pane_doc(pinned).unwrap().path, "a.md");
    }

    #[test]
    fn test_show_same_doc_is_idempotent() {
        let mut ws = MemoryWorkspace::new();
        let mut preview = PreviewSurface::new();
        let doc = Doc::new("a.md");
        preview.show(&mut ws, &doc);
        preview.show(&mut ws, &doc);
        assert_eq!(ws.pane_count(), 1);
        assert_eq!(preview.current(), Some(&doc));
    }

    #[test]
    fn test_open_failure_becomes_placeholder() {
        let mut ws = MemoryWorkspace::new();
        let mut preview = PreviewSurface::new();
        preview.show(&mut ws, &Doc::new("a.md"));
        ws.fail_next_open();
        preview.show(&mut ws, &Doc::new("b.md"));
        assert!(preview.error().unwrap().contains("b"));
        // Last good document is retained behind the placeholder.
        assert_eq!(preview.current().unwrap().path, "a.md");
        // Next successful show clears it.
        preview.show(&mut ws, &Doc::new("c.md"));
        assert!(preview.error().is_none());
        assert_eq!(preview.current().unwrap().path, "c.md");
    }

    #[test]
    fn test_teardown_detaches_pane() {
        let mut ws = MemoryWorkspace::new();
        let mut preview = PreviewSurface::new();
        preview.show(&mut ws, &Doc::new("a.md"));
        let pane = preview.pane().unwrap();
        preview.teardown(&mut ws);
        assert!(!ws.pane_exists(pane));
        assert!(preview.pane().is_none());
        assert!(preview.current().is_none());
        assert_eq!(ws.pane_count(), 0);
    }
}
