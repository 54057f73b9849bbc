use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use crossterm::event::KeyModifiers;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::nav::Mode;

const DEFAULT_CONFIG: &str = r#"# shortlist configuration

# Modifier for the intercepted navigation keys (ctrl, alt, super)
modifier = "ctrl"

# Mode the panel starts in (search, backlinks)
start_mode = "search"

# Show the preview surface while navigating
preview = true

# Show navigation feedback in the status line
status_messages = true

# Color theme (dusk, dawn)
theme = "dusk"
"#;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub modifier: String,
    pub start_mode: String,
    pub preview: bool,
    pub status_messages: bool,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modifier: "ctrl".to_string(),
            start_mode: "search".to_string(),
            preview: true,
            status_messages: true,
            theme: "dusk".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                PathBuf::from(env::var("HOME").unwrap_or_default()).join(".config")
            })
            .join("shortlist")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    pub fn load() -> Self {
        match fs::read_to_string(Self::config_path()) {
            Ok(text) => toml::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn load_or_create() -> Self {
        if !Self::exists() {
            let _ = fs::create_dir_all(Self::config_dir());
            let _ = fs::write(Self::config_path(), DEFAULT_CONFIG);
        }
        Self::load()
    }

    pub fn save(&self) -> io::Result<()> {
        fs::create_dir_all(Self::config_dir())?;
        let text = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(Self::config_path(), text)
    }

    pub fn interception_modifier(&self) -> KeyModifiers {
        match self.modifier.as_str() {
            "alt" => KeyModifiers::ALT,
            "super" => KeyModifiers::SUPER,
            _ => KeyModifiers::CONTROL,
        }
    }

    pub fn start_mode(&self) -> Mode {
        if self.start_mode.eq_ignore_ascii_case("backlinks") {
            Mode::Backlinks
        } else {
            Mode::Search
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub muted: Color,
    pub foreground: Color,
    pub error: Color,
    pub selection: Color,
    pub border: Color,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "dawn" => Self::dawn(),
            _ => Self::dusk(),
        }
    }

    fn dusk() -> Self {
        Self {
            primary: Color::Cyan,
            muted: Color::DarkGray,
            foreground: Color::White,
            error: Color::Red,
            selection: Color::Rgb(50, 60, 80),
            border: Color::DarkGray,
        }
    }

    fn dawn() -> Self {
        Self {
            primary: Color::Blue,
            muted: Color::Gray,
            foreground: Color::Black,
            error: Color::LightRed,
            selection: Color::Rgb(215, 220, 235),
            border: Color::Gray,
        }
    }
}
