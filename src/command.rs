//! The panel's command table: stable ids for the host's palette, display
//! names, default hotkeys, and enablement.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::panel::Panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenPanel,
    NavigateNext,
    NavigatePrevious,
    OpenKeepFocus,
    OpenSwitchFocus,
    OpenSplit,
    SwitchToSearch,
    SwitchToBacklinks,
    SyncBacklinks,
}

impl Command {
    pub fn all() -> &'static [Command] {
        &[
            Command::OpenPanel,
            Command::NavigateNext,
            Command::NavigatePrevious,
            Command::OpenKeepFocus,
            Command::OpenSwitchFocus,
            Command::OpenSplit,
            Command::SwitchToSearch,
            Command::SwitchToBacklinks,
            Command::SyncBacklinks,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Command::OpenPanel => "open-navigation-panel",
            Command::NavigateNext => "navigate-next",
            Command::NavigatePrevious => "navigate-previous",
            Command::OpenKeepFocus => "open-in-new-tab-keep-focus",
            Command::OpenSwitchFocus => "open-in-new-tab-switch-focus",
            Command::OpenSplit => "open-in-split-pane",
            Command::SwitchToSearch => "switch-to-search-mode",
            Command::SwitchToBacklinks => "switch-to-backlinks-mode",
            Command::SyncBacklinks => "sync-backlinks-to-current-file",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::OpenPanel => "Open navigation panel",
            Command::NavigateNext => "Navigate to next result",
            Command::NavigatePrevious => "Navigate to previous result",
            Command::OpenKeepFocus => "Open current result in new tab (keep focus)",
            Command::OpenSwitchFocus => "Open current result in new tab (switch focus)",
            Command::OpenSplit => "Open current result in split pane",
            Command::SwitchToSearch => "Switch to search mode",
            Command::SwitchToBacklinks => "Switch to backlinks mode",
            Command::SyncBacklinks => "Sync backlinks to current file",
        }
    }

    /// Default hotkey, on top of the interception modifier handled by the
    /// keymap. `None` means palette-only.
    pub fn hotkey(&self) -> Option<(KeyModifiers, KeyCode)> {
        let m = KeyModifiers::CONTROL;
        match self {
            Command::NavigateNext => Some((m, KeyCode::Down)),
            Command::NavigatePrevious => Some((m, KeyCode::Up)),
            Command::OpenKeepFocus => Some((m, KeyCode::Enter)),
            Command::SwitchToSearch => Some((m | KeyModifiers::SHIFT, KeyCode::Char('s'))),
            Command::SwitchToBacklinks => Some((m | KeyModifiers::SHIFT, KeyCode::Char('b'))),
            Command::SyncBacklinks => Some((m | KeyModifiers::SHIFT, KeyCode::Char('l'))),
            _ => None,
        }
    }

    /// Every command is unconditionally available except the backlinks
    /// sync, which needs a current document in the preview.
    pub fn enabled(&self, panel: &Panel) -> bool {
        match self {
            Command::SyncBacklinks => panel.preview.current().is_some(),
            _ => true,
        }
    }
}
