//! Column-grid resolver.
//!
//! Turns "this image takes N of M columns at breakpoint B" into a concrete
//! [`SizeList`]. The defaults follow the Bootstrap 5 grid (`$grid-columns`,
//! `$grid-gutter-width`, `$grid-breakpoints`, `$container-max-widths`), but any
//! grid with the same shape works.
//!
//! ## Resolution
//!
//! For each declared breakpoint, in ascending order:
//!
//! 1. Pick the column span: an explicit entry in the [`ColumnLayout`] if there
//!    is one, otherwise the span carried forward from the previous breakpoint
//!    (full width before the first explicit entry). This mirrors how CSS
//!    column classes cascade upwards.
//! 2. Pick the container width: the fixed max-width if the container is fixed,
//!    otherwise the next breakpoint's min width minus one pixel. A fluid
//!    container at the last breakpoint has no known width and contributes no
//!    entry.
//! 3. Image width = `round(container / columns * span) - gutter`.
//!
//! ```text
//! columns = 12, gutter = 24, lg container = 960, lg span = 6
//!   round(960 / 12 * 6) - 24 = 456
//! ```
//!
//! The resulting list is mobile-first: triggers are minimum viewport widths.

use crate::size::{Crop, CropSetting, SizeSpec};
use crate::size_list::SizeList;
use crate::types::{SizingError, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A named viewport threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub name: String,
    pub min_width: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, min_width: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
        }
    }
}

/// Container max-width at a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Container {
    /// Fixed max-width in px, including the gutter.
    Fixed(u32),
    /// 100% wide. Written as `"fluid"` in config.
    Fluid(FluidKeyword),
}

/// Marker so `"fluid"` deserializes into [`Container::Fluid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FluidKeyword {
    Fluid,
}

impl Container {
    pub const FLUID: Container = Container::Fluid(FluidKeyword::Fluid);
}

/// Columns taken at a breakpoint plus the size options applied there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpan {
    pub cols: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropSetting>,
    #[serde(default, skip_serializing_if = "Transform::is_empty")]
    pub transform: Transform,
}

impl ColumnSpan {
    pub fn new(cols: u32) -> Self {
        Self {
            cols,
            height: None,
            crop: None,
            transform: Transform::new(),
        }
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn crop(mut self, crop: CropSetting) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Column span as written in config: a bare column count or a full table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpanSetting {
    Cols(u32),
    Full(ColumnSpan),
}

impl From<ColumnSpanSetting> for ColumnSpan {
    fn from(setting: ColumnSpanSetting) -> Self {
        match setting {
            ColumnSpanSetting::Cols(cols) => ColumnSpan::new(cols),
            ColumnSpanSetting::Full(span) => span,
        }
    }
}

/// Sparse breakpoint name → column span mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnLayout(BTreeMap<String, ColumnSpanSetting>);

impl ColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the span at `breakpoint`. Names are checked at resolve time.
    pub fn col(mut self, breakpoint: impl Into<String>, span: ColumnSpan) -> Self {
        self.0
            .insert(breakpoint.into(), ColumnSpanSetting::Full(span));
        self
    }

    pub fn get(&self, breakpoint: &str) -> Option<ColumnSpan> {
        self.0.get(breakpoint).cloned().map(ColumnSpan::from)
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Grid system description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Grid {
    /// Total columns (`$grid-columns`).
    pub columns: u32,
    /// Gutter in px (`$grid-gutter-width`).
    pub gutter: u32,
    /// Breakpoints, strictly increasing by `min_width`.
    pub breakpoints: Vec<Breakpoint>,
    /// Container widths. A breakpoint without an entry is fluid.
    pub containers: BTreeMap<String, Container>,
    /// Resolver parameters applied beneath every span's own transform.
    #[serde(skip_serializing_if = "Transform::is_empty")]
    pub default_transform: Transform,
}

impl Default for Grid {
    fn default() -> Self {
        Self::bootstrap()
    }
}

impl Grid {
    /// Bootstrap 5 grid: 12 columns, 24px gutter.
    pub fn bootstrap() -> Self {
        let breakpoints = [
            ("xs", 0),
            ("sm", 576),
            ("md", 768),
            ("lg", 992),
            ("xl", 1200),
            ("xxl", 1400),
        ]
        .into_iter()
        .map(|(name, min_width)| Breakpoint::new(name, min_width))
        .collect();
        let containers = [
            ("sm", 540),
            ("md", 720),
            ("lg", 960),
            ("xl", 1140),
            ("xxl", 1320),
        ]
        .into_iter()
        .map(|(name, width)| (name.to_string(), Container::Fixed(width)))
        .collect();
        Self {
            columns: 12,
            gutter: 24,
            breakpoints,
            containers,
            default_transform: Transform::new(),
        }
    }

    pub fn with_default_transform(mut self, transform: Transform) -> Self {
        self.default_transform = transform;
        self
    }

    /// Set the container at `breakpoint`.
    pub fn container(
        mut self,
        breakpoint: &str,
        container: Container,
    ) -> Result<Self, SizingError> {
        self.require_breakpoint(breakpoint, "container")?;
        self.containers.insert(breakpoint.to_string(), container);
        Ok(self)
    }

    /// Set a fixed container whose `width` excludes the gutter.
    pub fn container_without_gutter(
        self,
        breakpoint: &str,
        width: u32,
    ) -> Result<Self, SizingError> {
        let outer = width.checked_add(self.gutter).ok_or_else(|| {
            invalid(format!(
                "container at '{breakpoint}' is too wide: {width}px + {}px gutter",
                self.gutter
            ))
        })?;
        self.container(breakpoint, Container::Fixed(outer))
    }

    /// Check the grid itself, independent of any layout.
    pub fn validate(&self) -> Result<(), SizingError> {
        if self.columns == 0 {
            return Err(invalid("grid columns must be positive"));
        }
        if self.breakpoints.is_empty() {
            return Err(invalid("grid needs at least one breakpoint"));
        }
        for pair in self.breakpoints.windows(2) {
            if pair[1].min_width <= pair[0].min_width {
                return Err(invalid(format!(
                    "breakpoint '{}' ({}px) must be wider than '{}' ({}px)",
                    pair[1].name, pair[1].min_width, pair[0].name, pair[0].min_width
                )));
            }
        }
        for (idx, bp) in self.breakpoints.iter().enumerate() {
            if self.breakpoints[..idx].iter().any(|b| b.name == bp.name) {
                return Err(invalid(format!("breakpoint '{}' declared twice", bp.name)));
            }
        }
        for name in self.containers.keys() {
            self.require_breakpoint(name, "container")?;
        }
        Ok(())
    }

    /// Check a layout against this grid.
    pub fn validate_layout(&self, layout: &ColumnLayout) -> Result<(), SizingError> {
        for name in layout.breakpoints() {
            self.require_breakpoint(name, "column span")?;
        }
        for (name, setting) in &layout.0 {
            let span = ColumnSpan::from(setting.clone());
            if span.cols > self.columns {
                return Err(invalid(format!(
                    "column span at '{}' takes {} columns, grid has {}",
                    name, span.cols, self.columns
                )));
            }
        }
        Ok(())
    }

    /// Resolve `layout` into a mobile-first [`SizeList`].
    pub fn resolve(&self, layout: &ColumnLayout) -> Result<SizeList, SizingError> {
        self.validate()?;
        self.validate_layout(layout)?;

        let full_width = ColumnSpan::new(self.columns);
        let spans = self.breakpoints.iter().scan(full_width, |carry, bp| {
            if let Some(span) = layout.get(&bp.name) {
                *carry = span;
            }
            Some((bp, carry.clone()))
        });

        let mut sizes = SizeList::new(true);
        for (idx, (bp, span)) in spans.enumerate() {
            let Some(container) = self.container_width(idx) else {
                trace!(breakpoint = %bp.name, "fluid container at last breakpoint, skipped");
                continue;
            };
            let width = self.image_width(container, span.cols);
            if width <= 0 {
                return Err(invalid(format!(
                    "image width at '{}' resolves to {}px",
                    bp.name, width
                )));
            }
            debug!(
                breakpoint = %bp.name,
                min_width = bp.min_width,
                container,
                cols = span.cols,
                width,
                "resolved grid size"
            );
            let spec = SizeSpec::new(width as u32, span.height, span.crop.map(Crop::from))?
                .with_transform(self.default_transform.merged(&span.transform));
            sizes.append(bp.min_width, spec);
        }
        Ok(sizes)
    }

    /// Outer container width at breakpoint `idx`, gutter included.
    fn container_width(&self, idx: usize) -> Option<u32> {
        let bp = &self.breakpoints[idx];
        match self.containers.get(&bp.name) {
            Some(Container::Fixed(width)) => Some(*width),
            Some(Container::Fluid(_)) | None => self
                .breakpoints
                .get(idx + 1)
                .map(|next| next.min_width - 1),
        }
    }

    fn image_width(&self, container: u32, cols: u32) -> i64 {
        let share = f64::from(container) / f64::from(self.columns) * f64::from(cols);
        share.round() as i64 - i64::from(self.gutter)
    }

    fn require_breakpoint(&self, name: &str, what: &str) -> Result<(), SizingError> {
        if self.breakpoints.iter().any(|bp| bp.name == name) {
            Ok(())
        } else {
            Err(invalid(format!("{what} refers to unknown breakpoint '{name}'")))
        }
    }
}

fn invalid(message: impl Into<String>) -> SizingError {
    SizingError::InvalidConfiguration(message.into())
}
