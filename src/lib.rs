//! Keyboard-driven navigation over a host application's search and
//! backlink result lists, with an inline preview surface and commands to
//! promote the current result to a real tab.
//!
//! The crate does not search, resolve links or render documents. It reads
//! the host's already-rendered result lists (via [`host::tree`]), asks the
//! host to open documents (via [`host::Workspace`] and [`host::Vault`]),
//! and owns everything stateful in between: per-mode selection memory,
//! change detection, the highlight lifecycle, the single background
//! preview pane, and the focus policy around opening tabs.

pub mod backlinks;
pub mod command;
pub mod config;
pub mod extract;
pub mod host;
pub mod keymap;
pub mod nav;
pub mod panel;
pub mod preview;
pub mod tabs;
pub mod ui;

pub use backlinks::{backlinks_for, Backlink};
pub use command::Command;
pub use config::{Config, Theme};
pub use extract::{ResultEntry, ResultSet};
pub use host::{Doc, Feature, HostError, PaneId, Placement, Vault, Workspace};
pub use keymap::FocusContext;
pub use nav::{Mode, NavState};
pub use panel::Panel;
pub use preview::PreviewSurface;
