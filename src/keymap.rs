//! Global key interception policy.
//!
//! Only Modifier+ArrowUp, Modifier+ArrowDown and Modifier+Enter are ever
//! claimed. Plain arrows and Enter always pass through, and nothing is
//! claimed while focus sits in an editable control outside the panel, so
//! normal text editing is never broken.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::Command;

/// Where keyboard focus currently sits, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusContext {
    /// Ordinary focus: a pane, a list, the panel itself.
    Normal,
    /// An editable control outside the navigation panel.
    TextInput,
    /// An editable control inside the navigation panel.
    PanelInput,
}

/// Maps a key event to a panel command if the policy claims it.
pub fn intercept(modifier: KeyModifiers, key: &KeyEvent, ctx: FocusContext) -> Option<Command> {
    if key.modifiers != modifier {
        return None;
    }
    if ctx == FocusContext::TextInput {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Command::NavigatePrevious),
        KeyCode::Down => Some(Command::NavigateNext),
        KeyCode::Enter => Some(Command::OpenKeepFocus),
        _ => None,
    }
}
