//! The navigation panel: one context object owning the navigation state,
//! the preview surface and the configuration, created at activation and
//! torn down at deactivation. No ambient state anywhere.

use crossterm::event::KeyEvent;

use crate::backlinks::{self, Backlink};
use crate::command::Command;
use crate::config::{Config, Theme};
use crate::host::tree::NodeHandle;
use crate::host::{Doc, PaneId, Placement, Vault, Workspace};
use crate::keymap::{self, FocusContext};
use crate::nav::{self, Mode, NavState};
use crate::preview::PreviewSurface;
use crate::tabs;

pub struct Panel {
    pub nav: NavState,
    pub preview: PreviewSurface,
    pub config: Config,
    pub theme: Theme,
    pub status: Option<String>,
    pane: Option<PaneId>,
    /// Focus returns to the panel on the next tick, not via a timer.
    pending_focus_restore: bool,
    /// First activation navigates to the first result on the next tick.
    pending_first_navigate: bool,
}

impl Panel {
    pub fn new(config: Config) -> Self {
        let theme = Theme::from_name(&config.theme);
        let nav = NavState::new(config.start_mode());
        Self {
            nav,
            preview: PreviewSurface::new(),
            config,
            theme,
            status: None,
            pane: None,
            pending_focus_restore: false,
            pending_first_navigate: false,
        }
    }

    /// The panel's own pane, once opened.
    pub fn pane(&self) -> Option<PaneId> {
        self.pane
    }

    pub fn mode(&self) -> Mode {
        self.nav.mode()
    }

    /// Activates the panel: reveals its pane (creating it on first open)
    /// and, when the configured mode has no rendered output, falls back to
    /// whichever feature currently has output. Navigation to the first
    /// result is deferred to the next tick.
    pub fn open(&mut self, ws: &mut dyn Workspace) {
        let pane = match self.pane {
            Some(p) if ws.pane_exists(p) => p,
            _ => {
                let p = ws.create_pane(Placement::Tab);
                self.pane = Some(p);
                self.pending_first_navigate = true;
                p
            }
        };
        ws.activate_pane(pane);
        if ws.feature_tree(self.nav.mode().feature()).is_none() {
            if let Some(mode) = nav::detect_mode(ws) {
                self.nav = NavState::new(mode);
            }
        }
    }

    /// Deactivation: the preview pane must not outlive the panel.
    pub fn close(&mut self, ws: &mut dyn Workspace) {
        self.preview.teardown(ws);
        self.nav.clear_highlight();
        self.pane = None;
        self.status = None;
        self.pending_focus_restore = false;
        self.pending_first_navigate = false;
    }

    /// Host animation/layout tick. Resolves deferred work; skipping ticks
    /// degrades smoothness, never correctness.
    pub fn on_tick(&mut self, ws: &mut dyn Workspace, vault: &dyn Vault) {
        if self.pending_first_navigate {
            self.pending_first_navigate = false;
            self.nav.refresh(ws, vault);
            if !self.nav.results.is_empty() {
                self.navigate(1, ws, vault);
            }
        }
        if self.pending_focus_restore {
            self.pending_focus_restore = false;
            if let Some(pane) = self.pane {
                ws.activate_pane(pane);
            }
        }
    }

    pub fn on_layout_change(&mut self, ws: &dyn Workspace, vault: &dyn Vault) {
        self.nav.refresh(ws, vault);
    }

    pub fn on_active_pane_change(&mut self, ws: &dyn Workspace, vault: &dyn Vault) {
        self.nav.refresh(ws, vault);
    }

    /// Routes a key event through the interception policy. Returns true
    /// when the event was consumed.
    pub fn key(
        &mut self,
        key: &KeyEvent,
        ctx: FocusContext,
        ws: &mut dyn Workspace,
        vault: &dyn Vault,
    ) -> bool {
        let modifier = self.config.interception_modifier();
        match keymap::intercept(modifier, key, ctx) {
            Some(cmd) => {
                if cmd.enabled(self) {
                    self.dispatch(cmd, ws, vault);
                }
                true
            }
            None => false,
        }
    }

    pub fn dispatch(&mut self, cmd: Command, ws: &mut dyn Workspace, vault: &dyn Vault) {
        match cmd {
            Command::OpenPanel => self.open(ws),
            Command::NavigateNext => self.navigate(1, ws, vault),
            Command::NavigatePrevious => self.navigate(-1, ws, vault),
            Command::OpenKeepFocus => self.promote_keep_focus(ws, vault),
            Command::OpenSwitchFocus => self.promote_switch_focus(ws, vault),
            Command::OpenSplit => self.promote_split(ws, vault),
            Command::SwitchToSearch => self.nav.switch_mode(Mode::Search, ws, vault),
            Command::SwitchToBacklinks => self.nav.switch_mode(Mode::Backlinks, ws, vault),
            Command::SyncBacklinks => self.sync_backlinks(ws),
        }
    }

    fn navigate(&mut self, delta: i32, ws: &mut dyn Workspace, vault: &dyn Vault) {
        // An explicit navigation supersedes the deferred first one.
        self.pending_first_navigate = false;
        match self.nav.move_by(delta, ws, vault) {
            Some(doc) => {
                if self.config.preview {
                    self.preview.show(ws, &doc);
                    if let Some(err) = self.preview.error() {
                        let message = err.to_string();
                        self.set_status(message);
                        return;
                    }
                }
                let index = self.nav.selected.unwrap_or(0);
                self.set_status(format!(
                    "result {}/{}: {}",
                    index + 1,
                    self.nav.results.len(),
                    doc.name
                ));
            }
            None => self.set_status("no results".to_string()),
        }
    }

    /// A result row was activated directly (plain click).
    pub fn click_result(&mut self, row: &NodeHandle, ws: &mut dyn Workspace, vault: &dyn Vault) {
        if let Some(doc) = self.nav.select_anchor(row, ws, vault) {
            if self.config.preview {
                self.preview.show(ws, &doc);
            }
        }
    }

    /// Modifier-click on a result row: straight to a new unfocused tab.
    pub fn modifier_click_result(
        &mut self,
        row: &NodeHandle,
        ws: &mut dyn Workspace,
        vault: &dyn Vault,
    ) {
        self.nav.refresh(ws, vault);
        let Some(index) = self.nav.results.index_of_anchor(row) else {
            return;
        };
        let Some(doc) = self.nav.results.doc(index).cloned() else {
            return;
        };
        if let Err(err) = tabs::open_keep_focus(ws, &doc) {
            self.set_status(format!("could not open {}: {}", doc.name, err));
        }
    }

    fn promote_keep_focus(&mut self, ws: &mut dyn Workspace, vault: &dyn Vault) {
        let Some(doc) = self.refreshed_selection(ws, vault) else {
            return;
        };
        match tabs::open_keep_focus(ws, &doc) {
            Ok(_) => {
                self.pending_focus_restore = true;
                self.set_status(format!("opened {} in new tab", doc.name));
            }
            Err(err) => self.set_status(format!("could not open {}: {}", doc.name, err)),
        }
    }

    fn promote_switch_focus(&mut self, ws: &mut dyn Workspace, vault: &dyn Vault) {
        let Some(doc) = self.refreshed_selection(ws, vault) else {
            return;
        };
        match tabs::open_switch_focus(ws, &doc, self.preview.pane()) {
            Ok(_) => self.set_status(format!("switched to {}", doc.name)),
            Err(err) => self.set_status(format!("could not open {}: {}", doc.name, err)),
        }
    }

    fn promote_split(&mut self, ws: &mut dyn Workspace, vault: &dyn Vault) {
        let Some(doc) = self.refreshed_selection(ws, vault) else {
            return;
        };
        match tabs::open_split(ws, &doc) {
            Ok(_) => self.set_status(format!("opened {} in split", doc.name)),
            Err(err) => self.set_status(format!("could not open {}: {}", doc.name, err)),
        }
    }

    /// Shared precondition of the promotion commands: refresh, then require
    /// a selected document. No-ops with a notice otherwise.
    fn refreshed_selection(&mut self, ws: &dyn Workspace, vault: &dyn Vault) -> Option<Doc> {
        self.nav.refresh(ws, vault);
        if self.nav.results.is_empty() {
            self.set_status("no results".to_string());
            return None;
        }
        match self.nav.selected_doc().cloned() {
            Some(doc) => Some(doc),
            None => {
                self.set_status("no result selected".to_string());
                None
            }
        }
    }

    /// Brings the previewed document into a real, focused pane so the
    /// host's own backlinks feature follows it.
    fn sync_backlinks(&mut self, ws: &mut dyn Workspace) {
        let Some(doc) = self.preview.current().cloned() else {
            self.set_status("no current file".to_string());
            return;
        };
        match tabs::open_switch_focus(ws, &doc, self.preview.pane()) {
            Ok(_) => self.set_status(format!("backlinks synced to {}", doc.name)),
            Err(err) => self.set_status(format!("could not open {}: {}", doc.name, err)),
        }
    }

    /// Linked and unlinked mentions of the previewed document, for a
    /// companion backlinks listing.
    pub fn preview_backlinks(&self, vault: &dyn Vault) -> Vec<Backlink> {
        match self.preview.current() {
            Some(doc) => backlinks::backlinks_for(vault, doc),
            None => Vec::new(),
        }
    }

    /// Jump to one of the companion backlink entries: through the result
    /// list when it is there, straight to the preview otherwise.
    pub fn open_backlink(&mut self, doc: &Doc, ws: &mut dyn Workspace, vault: &dyn Vault) {
        self.nav.refresh(ws, vault);
        if let Some(index) = self.nav.results.index_of_path(&doc.path) {
            if let Some(selected) = self.nav.set_index(index, ws, vault) {
                if self.config.preview {
                    self.preview.show(ws, &selected);
                }
            }
        } else if self.config.preview {
            self.preview.show(ws, doc);
        }
    }

    fn set_status(&mut self, message: String) {
        if self.config.status_messages {
            self.status = Some(message);
        }
    }
}
