//! Target size for a single breakpoint.
//!
//! A [`SizeSpec`] answers "how big should the image be at this breakpoint":
//! a target width, an optional height, a crop policy and optional clamps.
//!
//! ## Crop Policy
//!
//! Configuration may express crop in several legacy encodings:
//!
//! | Encoding | Normalized [`Crop`] |
//! |---|---|
//! | `true` / `"fill"` | [`Crop::Fill`] |
//! | `false` / `"fit"` | [`Crop::Fit`] |
//! | any other string (`"thumb"`, `"lfill"`, ...) | [`Crop::Mode`] |
//! | `[x, y]` | [`Crop::Position`] |
//! | absent | `Fill` when a height is set, otherwise `Fit` |
//!
//! The encoding is normalized once, when the size is built. Call sites only
//! ever see the four-way enum.

use crate::types::{SizingError, Transform};
use serde::{Deserialize, Serialize};

/// Resolver crop modes that scale *and* cut the image to the requested box.
const CROPPING_MODES: [&str; 5] = ["crop", "fill", "lfill", "fill_pad", "thumb"];

/// Normalized crop policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crop {
    /// Scale to fit inside the box, never cut.
    Fit,
    /// Scale and cut to exactly the box.
    Fill,
    /// Opaque mode name understood by the source resolver.
    Mode(String),
    /// Cut anchored at an explicit `(x, y)` position, e.g. `("center", "top")`.
    Position(String, String),
}

impl Crop {
    /// Mode name as understood by the resolver. Positions report `fill`.
    pub fn as_str(&self) -> &str {
        match self {
            Crop::Fit => "fit",
            Crop::Fill | Crop::Position(..) => "fill",
            Crop::Mode(mode) => mode,
        }
    }

    fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "fit" => Crop::Fit,
            "fill" => Crop::Fill,
            other => Crop::Mode(other.to_string()),
        }
    }
}

/// Crop as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CropSetting {
    Flag(bool),
    Keyword(String),
    Position([String; 2]),
}

impl From<CropSetting> for Crop {
    fn from(setting: CropSetting) -> Self {
        match setting {
            CropSetting::Flag(true) => Crop::Fill,
            CropSetting::Flag(false) => Crop::Fit,
            CropSetting::Keyword(keyword) => Crop::from_keyword(&keyword),
            CropSetting::Position([x, y]) => Crop::Position(x, y),
        }
    }
}

/// What a size asks the resolver to do about cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropRequest<'a> {
    Cropped(bool),
    Position(&'a str, &'a str),
}

/// Target size and transformation for one breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec {
    width: u32,
    height: Option<u32>,
    crop: Crop,
    transform: Transform,
    max_width: Option<u32>,
    max_height: Option<u32>,
}

impl SizeSpec {
    /// Build a spec. `crop` defaults to `Fill` when `height` is set, else `Fit`.
    pub fn new(
        width: u32,
        height: Option<u32>,
        crop: Option<Crop>,
    ) -> Result<Self, SizingError> {
        if width == 0 {
            return Err(SizingError::InvalidConfiguration(
                "size width must be positive".into(),
            ));
        }
        if height == Some(0) {
            return Err(SizingError::InvalidConfiguration(
                "size height must be positive when set".into(),
            ));
        }
        let crop = crop.unwrap_or(match height {
            Some(_) => Crop::Fill,
            None => Crop::Fit,
        });
        Ok(Self {
            width,
            height,
            crop,
            transform: Transform::new(),
            max_width: None,
            max_height: None,
        })
    }

    /// Shorthand for a width-only, uncropped spec.
    pub fn width(width: u32) -> Result<Self, SizingError> {
        Self::new(width, None, None)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_max_width(self, max_width: u32) -> Result<Self, SizingError> {
        self.with_clamp(Some(max_width), None)
    }

    pub fn with_max_height(self, max_height: u32) -> Result<Self, SizingError> {
        self.with_clamp(None, Some(max_height))
    }

    fn with_clamp(
        mut self,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<Self, SizingError> {
        if max_width == Some(0) || max_height == Some(0) {
            return Err(SizingError::InvalidConfiguration(
                "size clamps must be positive".into(),
            ));
        }
        self.apply_clamp(max_width, max_height);
        Ok(self)
    }

    /// Apply clamps. Called by the owning list before the size is read.
    ///
    /// An existing clamp is only ever tightened.
    pub(crate) fn apply_clamp(&mut self, max_width: Option<u32>, max_height: Option<u32>) {
        self.max_width = tighter(self.max_width, max_width);
        self.max_height = tighter(self.max_height, max_height);
    }

    /// Requested width before clamping.
    pub fn target_width(&self) -> u32 {
        self.width
    }

    /// Requested height before clamping.
    pub fn target_height(&self) -> Option<u32> {
        self.height
    }

    pub fn effective_width(&self) -> u32 {
        self.max_width.map_or(self.width, |max| self.width.min(max))
    }

    pub fn effective_height(&self) -> Option<u32> {
        self.height
            .map(|h| self.max_height.map_or(h, |max| h.min(max)))
    }

    pub fn crop(&self) -> &Crop {
        &self.crop
    }

    pub fn crop_type(&self) -> &str {
        self.crop.as_str()
    }

    pub fn is_cropped(&self) -> bool {
        CROPPING_MODES.contains(&self.crop_type())
    }

    /// The explicit crop anchor if there is one, otherwise whether to crop.
    pub fn crop_or_position(&self) -> CropRequest<'_> {
        match &self.crop {
            Crop::Position(x, y) => CropRequest::Position(x, y),
            _ => CropRequest::Cropped(self.is_cropped()),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Full parameter set for the resolver: `defaults`, then this spec's own
    /// transform, then `width`/`height`/`crop`.
    pub fn transform_params(&self, defaults: &Transform) -> Transform {
        let mut params = defaults.merged(&self.transform);
        params.insert("width", self.effective_width().to_string());
        if let Some(height) = self.effective_height() {
            params.insert("height", height.to_string());
        }
        params.insert("crop", self.crop_type());
        params
    }
}

fn tighter(current: Option<u32>, new: Option<u32>) -> Option<u32> {
    match (current, new) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
