use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where the overlay is anchored on screen.
///
/// `Cursor` follows the text cursor; the remaining variants pin the overlay
/// to a viewport corner and skip the cursor projection entirely.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Cursor,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Resolved overlay configuration.
///
/// Built once at startup from defaults, rc files, and CLI flags, and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Overlay width in columns.
    pub width: u16,
    /// Cap on overlay rows.
    pub max_height: u16,
    /// Column offset from the cursor.
    pub offset_x: u16,
    /// Row offset from the cursor.
    pub offset_y: u16,
    /// Placement anchor.
    pub position: Position,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: 40,
            max_height: 10,
            offset_x: 1,
            offset_y: 1,
            position: Position::Cursor,
        }
    }
}

impl OverlayConfig {
    /// Apply a set of partial overrides on top of this configuration.
    ///
    /// Field-wise merge: provided values win, omitted values keep what is
    /// already here.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            width: overrides.width.unwrap_or(self.width),
            max_height: overrides.max_height.unwrap_or(self.max_height),
            offset_x: overrides.offset_x.unwrap_or(self.offset_x),
            offset_y: overrides.offset_y.unwrap_or(self.offset_y),
            position: overrides.position.unwrap_or(self.position),
        }
    }
}

/// Partial configuration, as read from an rc file or the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub width: Option<u16>,
    pub max_height: Option<u16>,
    pub offset_x: Option<u16>,
    pub offset_y: Option<u16>,
    pub position: Option<Position>,
}

impl ConfigOverrides {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            width: other.width.or(self.width),
            max_height: other.max_height.or(self.max_height),
            offset_x: other.offset_x.or(self.offset_x),
            offset_y: other.offset_y.or(self.offset_y),
            position: other.position.or(self.position),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markpeek").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markpeek")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markpeek").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("markpeek")
                .join("config");
        }
    }

    PathBuf::from(".markpeekrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markpeekrc")
}

pub fn load_config_overrides(path: &Path) -> Result<ConfigOverrides> {
    if !path.exists() {
        return Ok(ConfigOverrides::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_config_tokens(&tokens))
}

pub fn save_config_overrides(path: &Path, overrides: &ConfigOverrides) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# markpeek defaults (saved with --save)".to_string());
    if let Some(width) = overrides.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(max_height) = overrides.max_height {
        lines.push(format!("--max-height {max_height}"));
    }
    if let Some(offset_x) = overrides.offset_x {
        lines.push(format!("--offset-x {offset_x}"));
    }
    if let Some(offset_y) = overrides.offset_y {
        lines.push(format!("--offset-y {offset_y}"));
    }
    if let Some(position) = overrides.position {
        lines.push(format!("--position {}", position_name(position)));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_overrides(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Parse a flag token list into overrides.
///
/// Unrecognized tokens are ignored so old rc files keep loading after
/// options are renamed or removed.
pub fn parse_config_tokens(tokens: &[String]) -> ConfigOverrides {
    let mut overrides = ConfigOverrides::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--width" {
            if let Some(next) = tokens.get(i + 1) {
                overrides.width = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--width=") {
            overrides.width = value.parse().ok();
        } else if token == "--max-height" {
            if let Some(next) = tokens.get(i + 1) {
                overrides.max_height = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--max-height=") {
            overrides.max_height = value.parse().ok();
        } else if token == "--offset-x" {
            if let Some(next) = tokens.get(i + 1) {
                overrides.offset_x = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--offset-x=") {
            overrides.offset_x = value.parse().ok();
        } else if token == "--offset-y" {
            if let Some(next) = tokens.get(i + 1) {
                overrides.offset_y = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--offset-y=") {
            overrides.offset_y = value.parse().ok();
        } else if token == "--position" {
            if let Some(next) = tokens.get(i + 1) {
                overrides.position = parse_position(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--position=") {
            overrides.position = parse_position(value);
        }
        i += 1;
    }
    overrides
}

fn parse_position(s: &str) -> Option<Position> {
    match s {
        "cursor" => Some(Position::Cursor),
        "top-left" => Some(Position::TopLeft),
        "top-right" => Some(Position::TopRight),
        "bottom-left" => Some(Position::BottomLeft),
        "bottom-right" => Some(Position::BottomRight),
        _ => None,
    }
}

const fn position_name(position: Position) -> &'static str {
    match position {
        Position::Cursor => "cursor",
        Position::TopLeft => "top-left",
        Position::TopRight => "top-right",
        Position::BottomLeft => "bottom-left",
        Position::BottomRight => "bottom-right",
    }
}
