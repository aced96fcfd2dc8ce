//! URL-template source resolver.
//!
//! [`TemplateResolver`] stands in for a resizing CDN: it expands a URL template
//! with the requested transform and reports the dimensions such a service
//! would actually deliver for an original of known size. It never upscales,
//! which is exactly the case where returned widths differ from requested ones.
//!
//! ## Template Placeholders
//!
//! | Placeholder | Value |
//! |---|---|
//! | `{width}` | delivered width |
//! | `{height}` | delivered height |
//! | `{crop}` | crop mode (`fit`, `fill`, `thumb`, ...) |
//! | `{transform}` | all transform params as `key=value&...`, sorted by key |
//!
//! ```text
//! https://cdn.example.com/hero.jpg?{transform}
//!   → https://cdn.example.com/hero.jpg?crop=fit&fetch_format=auto&quality=auto:eco&width=936
//! ```

use crate::attributes::{ResolvedSource, SourceResolver};
use crate::size::SizeSpec;
use crate::types::{SizingError, Transform};

/// Dimensions of a fit (no crop) resize inside `box_size`, never upscaling.
///
/// `box_size` height `None` means only the width constrains.
///
/// ```text
/// original 2000x1500, box 1000 x ∞  → 1000x750
/// original 2000x1500, box 1000 x 500 → 667x500
/// original 800x600,   box 1000 x ∞  → 800x600 (no upscale)
/// ```
pub fn fit_dimensions(original: (u32, u32), box_size: (u32, Option<u32>)) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let (box_w, box_h) = box_size;

    let mut scale = f64::from(box_w) / f64::from(orig_w);
    if let Some(box_h) = box_h {
        scale = scale.min(f64::from(box_h) / f64::from(orig_h));
    }
    let scale = scale.min(1.0);

    let w = (f64::from(orig_w) * scale).round().max(1.0) as u32;
    let h = (f64::from(orig_h) * scale).round().max(1.0) as u32;
    (w, h)
}

/// Dimensions of a fill (crop) resize to `target`, never upscaling.
///
/// Keeps the target aspect ratio. When the original is smaller than the box
/// in either direction, the box shrinks uniformly until it fits.
///
/// ```text
/// original 2000x1500, target 400x500  → 400x500
/// original 600x400,   target 800x800  → 400x400
/// ```
pub fn fill_dimensions(original: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let (tgt_w, tgt_h) = target;

    let scale = (f64::from(orig_w) / f64::from(tgt_w))
        .min(f64::from(orig_h) / f64::from(tgt_h))
        .min(1.0);

    let w = (f64::from(tgt_w) * scale).round().max(1.0) as u32;
    let h = (f64::from(tgt_h) * scale).round().max(1.0) as u32;
    (w, h)
}

/// Resolves sizes by expanding a URL template.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    template: String,
    original: (u32, u32),
    defaults: Transform,
}

impl TemplateResolver {
    pub fn new(template: impl Into<String>, original: (u32, u32)) -> Result<Self, SizingError> {
        if original.0 == 0 || original.1 == 0 {
            return Err(SizingError::InvalidConfiguration(
                "original dimensions must be positive".into(),
            ));
        }
        Ok(Self {
            template: template.into(),
            original,
            defaults: Transform::new(),
        })
    }

    /// Parameters every URL carries unless the size overrides them.
    pub fn with_defaults(mut self, defaults: Transform) -> Self {
        self.defaults = defaults;
        self
    }

    /// Width and height the service would deliver for `spec`.
    pub fn delivered_dimensions(&self, spec: &SizeSpec) -> (u32, u32) {
        let width = spec.effective_width();
        match (spec.is_cropped(), spec.effective_height()) {
            (true, Some(height)) => fill_dimensions(self.original, (width, height)),
            (_, height) => fit_dimensions(self.original, (width, height)),
        }
    }

    fn expand(&self, spec: &SizeSpec, width: u32, height: u32) -> String {
        let mut params = spec.transform_params(&self.defaults);
        params.insert("width", width.to_string());
        params.insert("height", height.to_string());
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.template
            .replace("{width}", &width.to_string())
            .replace("{height}", &height.to_string())
            .replace("{crop}", spec.crop_type())
            .replace("{transform}", &query)
    }
}

impl SourceResolver for TemplateResolver {
    fn resolve(&self, spec: &SizeSpec) -> Option<ResolvedSource> {
        let (width, height) = self.delivered_dimensions(spec);
        Some(ResolvedSource {
            url: self.expand(spec, width, height),
            width,
            height,
        })
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `1920x1080`.
pub fn parse_dimensions(value: &str) -> Result<(u32, u32), SizingError> {
    let invalid = || {
        SizingError::InvalidConfiguration(format!(
            "expected dimensions as WIDTHxHEIGHT, got '{value}'"
        ))
    };
    let (w, h) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}
