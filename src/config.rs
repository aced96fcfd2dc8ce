//! Sizing configuration module.
//!
//! Handles loading, validating, and merging `srcset.toml` files. Stock
//! defaults (the Bootstrap 5 grid) are overridden by whatever the user file
//! specifies; the user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [grid]
//! columns = 12              # $grid-columns
//! gutter = 24               # $grid-gutter-width, px
//! breakpoints = [
//!     { name = "xs", min_width = 0 },
//!     { name = "sm", min_width = 576 },
//!     { name = "md", min_width = 768 },
//!     { name = "lg", min_width = 992 },
//!     { name = "xl", min_width = 1200 },
//!     { name = "xxl", min_width = 1400 },
//! ]
//!
//! [grid.containers]         # px including gutter, or "fluid"
//! sm = 540
//! md = 720
//! lg = 960
//! xl = 1140
//! xxl = 1320
//!
//! [default_transform]       # passed to the resolver for every size
//! quality = "auto:eco"
//! fetch_format = "auto"
//!
//! [layouts.hero]            # columns taken per breakpoint, cascading upwards
//! md = 8
//! lg = { cols = 6, height = 400, crop = "thumb" }
//!
//! [lists.thumbs]            # explicit breakpoint → size table
//! mobile_first = false
//! max_width = 1200
//! [lists.thumbs.sizes]
//! "576" = 500
//! "992" = { width = 900, height = 600, crop = ["center", "top"] }
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::grid::{ColumnLayout, Grid};
use crate::size::{Crop, CropSetting, SizeSpec};
use crate::size_list::SizeList;
use crate::types::{SizingError, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "srcset.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Sizing(#[from] SizingError),
}

/// Sizing configuration loaded from `srcset.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Grid system the layouts resolve against.
    pub grid: Grid,
    /// Resolver parameters applied beneath every size's own transform.
    pub default_transform: Transform,
    /// Named column layouts.
    pub layouts: BTreeMap<String, ColumnLayout>,
    /// Named explicit size lists.
    pub lists: BTreeMap<String, ListConfig>,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            grid: Grid::bootstrap(),
            default_transform: Transform::new()
                .with("quality", "auto:eco")
                .with("fetch_format", "auto"),
            layouts: BTreeMap::new(),
            lists: BTreeMap::new(),
        }
    }
}

/// An explicit breakpoint → size table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// Triggers are `min-width` (true) or `max-width` (false) thresholds.
    #[serde(default = "default_mobile_first")]
    pub mobile_first: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    /// Trigger in px (as a string key) → size. Entries are appended in
    /// ascending trigger order, which also breaks `widest` ties.
    pub sizes: BTreeMap<String, SizeEntry>,
}

fn default_mobile_first() -> bool {
    true
}

/// One size as written in config: a bare width or a full table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeEntry {
    Width(u32),
    Full(SizeTable),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeTable {
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropSetting>,
    #[serde(default, skip_serializing_if = "Transform::is_empty")]
    pub transform: Transform,
}

impl SizeEntry {
    fn to_spec(&self, defaults: &Transform) -> Result<SizeSpec, SizingError> {
        let spec = match self {
            SizeEntry::Width(width) => SizeSpec::width(*width)?,
            SizeEntry::Full(table) => SizeSpec::new(
                table.width,
                table.height,
                table.crop.clone().map(Crop::from),
            )?
            .with_transform(table.transform.clone()),
        };
        let transform = defaults.merged(spec.transform());
        Ok(spec.with_transform(transform))
    }
}

impl ListConfig {
    /// Build the [`SizeList`]. Trigger keys must be non-negative integers.
    ///
    /// TOML tables don't keep key order, so sizes are appended by ascending
    /// numeric trigger: on a `widest` tie the smallest trigger wins.
    pub fn to_size_list(&self, defaults: &Transform) -> Result<SizeList, SizingError> {
        let mut triggers: BTreeMap<u32, &SizeEntry> = BTreeMap::new();
        for (key, entry) in &self.sizes {
            let trigger: u32 = key.trim().parse().map_err(|_| {
                SizingError::InvalidConfiguration(format!(
                    "size list trigger '{key}' is not a pixel width"
                ))
            })?;
            if triggers.insert(trigger, entry).is_some() {
                return Err(SizingError::InvalidConfiguration(format!(
                    "size list trigger {trigger}px is declared twice"
                )));
            }
        }

        let mut list = SizeList::new(self.mobile_first).with_max_size(self.max_width, self.max_height)?;
        for (trigger, entry) in triggers {
            list.append(trigger, entry.to_spec(defaults)?);
        }
        Ok(list)
    }
}

impl SizingConfig {
    /// Default transform for every size: the grid's, overlaid by the
    /// top-level `[default_transform]`.
    pub fn default_transform(&self) -> Transform {
        self.grid.default_transform.merged(&self.default_transform)
    }

    /// The grid with this config's default transform attached.
    pub fn grid(&self) -> Grid {
        self.grid.clone().with_default_transform(self.default_transform())
    }

    /// Resolve a named layout or list into a [`SizeList`].
    ///
    /// Layouts are looked up first; a name present in both is rejected by
    /// [`validate`](Self::validate).
    pub fn size_list(&self, name: &str) -> Result<SizeList, ConfigError> {
        if let Some(layout) = self.layouts.get(name) {
            return Ok(self.grid().resolve(layout)?);
        }
        if let Some(list) = self.lists.get(name) {
            return Ok(list.to_size_list(&self.default_transform())?);
        }
        Err(ConfigError::Validation(format!(
            "no layout or list named '{name}'"
        )))
    }

    /// Names of all layouts and lists, layouts first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts
            .keys()
            .chain(self.lists.keys())
            .map(String::as_str)
    }

    /// Validate config values are within acceptable ranges.
    ///
    /// Every layout and list is resolved once, so any error the engine would
    /// raise later surfaces here with the entry's name attached.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        for name in self.layouts.keys() {
            if self.lists.contains_key(name) {
                return Err(ConfigError::Validation(format!(
                    "'{name}' is defined both as a layout and as a list"
                )));
            }
        }
        for name in self.names() {
            let list = self
                .size_list(name)
                .map_err(|e| ConfigError::Validation(format!("{name}: {e}")))?;
            if list.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{name}: resolves to no sizes"
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SizingConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user
///   `breakpoints` array replaces the stock one rather than extending it.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `srcset.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no config file exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using stock defaults");
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    debug!(path = %config_path.display(), "loaded config file");
    Ok(Some(value))
}

/// Empty the base `grid.containers` when the overlay brings its own
/// `grid.breakpoints`.
///
/// Container keys are breakpoint names, and the merge can only add keys, so
/// stock containers would otherwise outlive the breakpoints they name. An
/// empty table (not a missing key) keeps serde from refilling the defaults.
fn reset_containers_for_new_breakpoints(mut base: toml::Value, overlay: &toml::Value) -> toml::Value {
    let replaces_breakpoints = overlay
        .get("grid")
        .and_then(|grid| grid.get("breakpoints"))
        .is_some();
    if replaces_breakpoints
        && let Some(grid) = base.get_mut("grid").and_then(toml::Value::as_table_mut)
    {
        debug!("breakpoints replaced, stock containers dropped");
        grid.insert(
            "containers".to_string(),
            toml::Value::Table(toml::map::Map::new()),
        );
    }
    base
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SizingConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(reset_containers_for_new_breakpoints(base, &ov), ov),
        None => base,
    };
    let config: SizingConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `srcset.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SizingConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `srcset.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# srcset-grid Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults (the Bootstrap 5 grid).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Grid system
# ---------------------------------------------------------------------------
[grid]
# Total number of columns ($grid-columns).
columns = 12

# Gutter between columns in px ($grid-gutter-width). One gutter is subtracted
# from every computed image width.
gutter = 24

# Viewport breakpoints ($grid-breakpoints), strictly increasing.
# Replacing this list replaces all breakpoints and drops the stock containers
# below: list the containers for your own breakpoint names alongside it.
breakpoints = [
    { name = "xs", min_width = 0 },
    { name = "sm", min_width = 576 },
    { name = "md", min_width = 768 },
    { name = "lg", min_width = 992 },
    { name = "xl", min_width = 1200 },
    { name = "xxl", min_width = 1400 },
]

# Container max-widths in px including the gutter ($container-max-widths).
# Use "fluid" for a 100% wide container: its width is taken from the next
# breakpoint minus 1px. A fluid container at the last breakpoint yields no size.
# Breakpoints without an entry are fluid.
[grid.containers]
sm = 540
md = 720
lg = 960
xl = 1140
xxl = 1320

# ---------------------------------------------------------------------------
# Transform parameters passed to the resolver for every size
# ---------------------------------------------------------------------------
[default_transform]
fetch_format = "auto"
quality = "auto:eco"

# ---------------------------------------------------------------------------
# Column layouts
# ---------------------------------------------------------------------------
# Columns taken per breakpoint. A value applies to its breakpoint and every
# larger one until overridden; breakpoints before the first entry take the
# full width. Either a bare column count or a table:
#   { cols = 6, height = 400, crop = "fill", transform = { gravity = "face" } }
# crop accepts true/false, a mode name ("fit", "fill", "thumb", ...) or an
# [x, y] anchor such as ["center", "top"].
#
# [layouts.hero]
# md = 8
# lg = 6

# ---------------------------------------------------------------------------
# Explicit size lists
# ---------------------------------------------------------------------------
# Breakpoint trigger (px) → size, for images that don't follow the grid.
# Either a bare width or { width, height, crop, transform }.
#
# [lists.thumbs]
# mobile_first = true
# max_width = 1200
# [lists.thumbs.sizes]
# "0" = 300
# "768" = { width = 600, height = 400 }
"##
}
