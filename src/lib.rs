//! # srcset-grid
//!
//! Computes the `sizes` and `srcset` attributes of a responsive `<img>` from a
//! column-grid description. You say how many columns an image takes at each
//! breakpoint; the crate works out the pixel width of every variant, asks a
//! resolver for the actual image at that width, and assembles the attributes.
//!
//! # Pipeline
//!
//! ```text
//! 1. Grid       ColumnLayout  →  SizeList          (columns → pixel widths)
//! 2. Resolve    SizeSpec      →  ResolvedSource    (external, per entry)
//! 3. Build      SizeList      →  sizes + srcset    (attribute strings)
//! ```
//!
//! Stage 2 is a trait ([`attributes::SourceResolver`]) so the engine stays
//! independent of where images come from. A CDN may deliver a different width
//! than requested; the attributes always carry the delivered one.
//!
//! ```rust
//! use srcset_grid::attributes::{self, ResolvedSource};
//! use srcset_grid::grid::{ColumnLayout, ColumnSpan, Grid};
//! use srcset_grid::size::SizeSpec;
//!
//! let layout = ColumnLayout::new().col("lg", ColumnSpan::new(6));
//! let sizes = Grid::bootstrap().resolve(&layout)?;
//!
//! let resolver = |spec: &SizeSpec| {
//!     let w = spec.effective_width();
//!     Some(ResolvedSource { url: format!("hero-{w}.jpg"), width: w, height: w / 2 })
//! };
//! let attrs = attributes::build(&sizes, &resolver)?;
//! assert!(attrs.sizes.starts_with("(min-width: 1400px) 636px"));
//! assert!(attrs.srcset.contains("hero-456.jpg 456w"));
//! # Ok::<(), srcset_grid::SizingError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`size`] | One breakpoint's requested size: width, height, crop, transform, clamp |
//! | [`size_list`] | Breakpoint → size mapping with mobile-first/desktop-first ordering |
//! | [`grid`] | Column-grid resolver producing a [`SizeList`] (Bootstrap 5 defaults) |
//! | [`attributes`] | `sizes`/`srcset` builder and the [`attributes::SourceResolver`] seam |
//! | [`resolver`] | URL-template resolver that models a non-upscaling CDN |
//! | [`markup`] | Maud rendering of `<img>`, preload `<link>` and aspect-ratio `<figure>` |
//! | [`config`] | `srcset.toml` loading, merging over stock defaults, and validation |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared error and transform types |
//!
//! # Design Decisions
//!
//! ## Columns, Not Pixels
//!
//! Layouts are described the way the stylesheet describes them: `col-md-6`
//! becomes `md = 6`. A span cascades upwards until the next explicit one, so
//! a layout only lists the breakpoints where the image changes width. Changing
//! the grid (gutter, container widths) updates every layout at once.
//!
//! ## Fluid Containers
//!
//! A fluid container is as wide as the viewport, so its width at a breakpoint
//! is bounded by the next breakpoint: `next.min_width - 1`. At the last
//! breakpoint there is no bound and no size is produced.
//!
//! ## Unresolved Sizes Are Skipped
//!
//! A resolver returning `None` drops that breakpoint from both attributes
//! instead of failing the image. The browser then picks the closest remaining
//! candidate, which is better than no image.
//!
//! ## No Global State
//!
//! Default transform parameters travel with the [`grid::Grid`] value or the
//! [`config::SizingConfig`], never through process-wide settings. Everything
//! in the core is synchronous and pure apart from the resolver calls.

pub mod attributes;
pub mod config;
pub mod grid;
pub mod markup;
pub mod output;
pub mod resolver;
pub mod size;
pub mod size_list;
pub mod types;

pub use attributes::{Rendering, ResolvedSource, ResponsiveAttributes, SourceResolver};
pub use grid::{ColumnLayout, ColumnSpan, Grid};
pub use size::{Crop, SizeSpec};
pub use size_list::SizeList;
pub use types::{SizingError, Transform};

#[cfg(test)]
pub(crate) mod test_helpers;
