//! `sizes` / `srcset` attribute builder.
//!
//! Walks a [`SizeList`] in presentation order, asks a [`SourceResolver`] for
//! the actual variant at each size, and assembles the two attribute values:
//!
//! ```text
//! mobile-first, triggers 992 / 0:
//!   sizes  = "(min-width: 992px) 936px, 551px"
//!   srcset = "hero-936.jpg 936w, hero-551.jpg 551w"
//! ```
//!
//! Widths in both attributes are the widths the resolver *returned*, which may
//! differ from the requested ones (a CDN refusing to upscale, rounding). A
//! breakpoint whose source cannot be resolved is left out of both attributes
//! rather than failing the whole set.
//!
//! Vector sources have a single intrinsic resolution, so [`render`] skips the
//! responsive machinery for them and only resolves the widest size.

use crate::size::SizeSpec;
use crate::size_list::SizeList;
use crate::types::SizingError;
use serde::Serialize;
use tracing::debug;

/// A variant the resolver actually produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSource {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Turns a requested size into a concrete image variant.
///
/// Implementations may do I/O (CDN or media-store lookups). Every call is
/// treated as an independent query; `None` means the variant is unavailable.
pub trait SourceResolver {
    fn resolve(&self, spec: &SizeSpec) -> Option<ResolvedSource>;
}

impl<F> SourceResolver for F
where
    F: Fn(&SizeSpec) -> Option<ResolvedSource>,
{
    fn resolve(&self, spec: &SizeSpec) -> Option<ResolvedSource> {
        self(spec)
    }
}

/// Attribute values for a responsive `<img>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiveAttributes {
    pub sizes: String,
    pub srcset: String,
    /// Resolution of the widest size, for `src`/`width`/`height`.
    pub widest: Option<ResolvedSource>,
}

/// Build `sizes` and `srcset` for `list`.
pub fn build(
    list: &SizeList,
    resolver: &impl SourceResolver,
) -> Result<ResponsiveAttributes, SizingError> {
    let mut sizes = Vec::with_capacity(list.len());
    let mut srcset = Vec::with_capacity(list.len());

    for entry in list.entries()? {
        let Some(source) = resolver.resolve(entry.spec) else {
            debug!(trigger = entry.trigger, "no source for size, skipped");
            continue;
        };
        srcset.push(format!("{} {}w", source.url, source.width));
        if entry.is_last {
            sizes.push(format!("{}px", source.width));
        } else {
            sizes.push(format!(
                "({}: {}px) {}px",
                list.media_feature(),
                entry.trigger,
                source.width
            ));
        }
    }

    let widest = resolver.resolve(list.widest()?);
    Ok(ResponsiveAttributes {
        sizes: sizes.join(", "),
        srcset: srcset.join(", "),
        widest,
    })
}

/// Resolve only the widest size, for sources with one intrinsic resolution.
///
/// Without an explicit height the box is square, so the resolver gets a
/// bounded request either way.
pub fn single(
    list: &SizeList,
    resolver: &impl SourceResolver,
) -> Result<Option<ResolvedSource>, SizingError> {
    let widest = list.widest()?;
    let width = widest.effective_width();
    let height = widest.effective_height().unwrap_or(width);
    let spec = SizeSpec::new(width, Some(height), None)?;
    Ok(resolver.resolve(&spec))
}

/// Image formats the renderer distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Raster,
    Vector,
}

impl ImageFormat {
    /// Guess from the URL's file extension. Query and fragment are ignored.
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let file = path.rsplit('/').next().unwrap_or(path);
        match file.rsplit_once('.') {
            Some((_, ext)) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Vector,
            _ => ImageFormat::Raster,
        }
    }

    pub fn is_single_resolution(self) -> bool {
        matches!(self, ImageFormat::Vector)
    }
}

/// What to put on the `<img>` for a given original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rendering {
    Responsive(ResponsiveAttributes),
    Single { source: Option<ResolvedSource> },
}

/// Pick the responsive or single-size path based on the original's format.
pub fn render(
    original_url: &str,
    list: &SizeList,
    resolver: &impl SourceResolver,
) -> Result<Rendering, SizingError> {
    if ImageFormat::from_url(original_url).is_single_resolution() {
        debug!(url = original_url, "single-resolution source, srcset skipped");
        return Ok(Rendering::Single {
            source: single(list, resolver)?,
        });
    }
    build(list, resolver).map(Rendering::Responsive)
}
