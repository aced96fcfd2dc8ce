//! HTML rendering of resolved images with Maud.
//!
//! Three elements cover what a page needs from the engine's output:
//!
//! | Function | Element |
//! |---|---|
//! | [`img_tag`] | `<img>` with `src`, `sizes`, `srcset`, `width`, `height` |
//! | [`preload_link`] | `<link rel="preload" as="image">` for the `<head>` |
//! | [`aspect_figure`] | Bootstrap `figure.ratio` reserving the box before load |
//!
//! All interpolated values are escaped by Maud.

use crate::attributes::{Rendering, ResolvedSource, ResponsiveAttributes};
use maud::{Markup, html};

/// Render the `<img>` for a [`Rendering`].
///
/// `src`, `width` and `height` come from the widest resolved source. When
/// nothing resolved, the element carries only its `alt`.
pub fn img_tag(rendering: &Rendering, alt: &str) -> Markup {
    match rendering {
        Rendering::Responsive(attrs) => {
            let src = attrs.widest.as_ref();
            let sizes = (!attrs.sizes.is_empty()).then_some(&attrs.sizes);
            let srcset = (!attrs.srcset.is_empty()).then_some(&attrs.srcset);
            html! {
                img src=[src.map(|s| &s.url)]
                    sizes=[sizes]
                    srcset=[srcset]
                    width=[src.map(|s| s.width)]
                    height=[src.map(|s| s.height)]
                    alt=(alt);
            }
        }
        Rendering::Single { source } => single_img(source.as_ref(), alt),
    }
}

fn single_img(source: Option<&ResolvedSource>, alt: &str) -> Markup {
    html! {
        img src=[source.map(|s| &s.url)]
            width=[source.map(|s| s.width)]
            height=[source.map(|s| s.height)]
            alt=(alt);
    }
}

/// Preload hint for an image rendered soon after page load.
///
/// Returns `None` when the widest size did not resolve, since the link needs
/// an `href`.
pub fn preload_link(attrs: &ResponsiveAttributes) -> Option<Markup> {
    let widest = attrs.widest.as_ref()?;
    Some(html! {
        link rel="preload" as="image" href=(widest.url)
            imagesrcset=(attrs.srcset)
            imagesizes=(attrs.sizes);
    })
}

/// Wrap `img` in a `figure.ratio` with the `width`:`height` aspect ratio.
pub fn aspect_figure(width: u32, height: u32, img: Markup) -> Markup {
    let style = format!("--bs-aspect-ratio:{}%", aspect_percent(width, height));
    html! {
        figure.ratio style=(style) {
            (img)
        }
    }
}

/// Height as a percentage of width, trimmed to four decimals.
fn aspect_percent(width: u32, height: u32) -> String {
    if width == 0 {
        return "0".to_string();
    }
    let ratio = f64::from(height) / f64::from(width) * 100.0;
    let formatted = format!("{ratio:.4}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str, width: u32, height: u32) -> ResolvedSource {
        ResolvedSource {
            url: url.to_string(),
            width,
            height,
        }
    }

    fn responsive() -> ResponsiveAttributes {
        ResponsiveAttributes {
            sizes: "(min-width: 768px) 600px, 300px".to_string(),
            srcset: "a-600.jpg 600w, a-300.jpg 300w".to_string(),
            widest: Some(source("a-600.jpg", 600, 400)),
        }
    }

    // =========================================================================
    // img_tag
    // =========================================================================

    #[test]
    fn responsive_img_has_all_attributes() {
        let html = img_tag(&Rendering::Responsive(responsive()), "A dog").into_string();
        assert!(html.starts_with("<img"));
        assert!(html.contains(r#"src="a-600.jpg""#));
        assert!(html.contains(r#"sizes="(min-width: 768px) 600px, 300px""#));
        assert!(html.contains(r#"srcset="a-600.jpg 600w, a-300.jpg 300w""#));
        assert!(html.contains(r#"width="600""#));
        assert!(html.contains(r#"height="400""#));
        assert!(html.contains(r#"alt="A dog""#));
    }

    #[test]
    fn alt_is_escaped() {
        let html = img_tag(&Rendering::Responsive(responsive()), r#"<b>"x"</b>"#).into_string();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn unresolved_img_has_only_alt() {
        let attrs = ResponsiveAttributes {
            sizes: String::new(),
            srcset: String::new(),
            widest: None,
        };
        let html = img_tag(&Rendering::Responsive(attrs), "x").into_string();
        assert!(!html.contains("src="));
        assert!(!html.contains("sizes="));
        assert!(!html.contains("width="));
        assert!(html.contains(r#"alt="x""#));
    }

    #[test]
    fn single_img_has_no_srcset() {
        let rendering = Rendering::Single {
            source: Some(source("logo.svg", 600, 600)),
        };
        let html = img_tag(&rendering, "Logo").into_string();
        assert!(html.contains(r#"src="logo.svg""#));
        assert!(html.contains(r#"width="600""#));
        assert!(!html.contains("srcset"));
        assert!(!html.contains("sizes"));
    }

    // =========================================================================
    // preload_link
    // =========================================================================

    #[test]
    fn preload_link_carries_srcset_and_sizes() {
        let html = preload_link(&responsive()).unwrap().into_string();
        assert!(html.contains(r#"rel="preload""#));
        assert!(html.contains(r#"as="image""#));
        assert!(html.contains(r#"href="a-600.jpg""#));
        assert!(html.contains(r#"imagesrcset="a-600.jpg 600w, a-300.jpg 300w""#));
        assert!(html.contains(r#"imagesizes="(min-width: 768px) 600px, 300px""#));
    }

    #[test]
    fn preload_link_needs_widest() {
        let mut attrs = responsive();
        attrs.widest = None;
        assert!(preload_link(&attrs).is_none());
    }

    // =========================================================================
    // aspect_figure
    // =========================================================================

    #[test]
    fn figure_wraps_img_with_ratio() {
        let img = img_tag(&Rendering::Responsive(responsive()), "A");
        let html = aspect_figure(1600, 900, img).into_string();
        assert!(html.starts_with("<figure"));
        assert!(html.contains(r#"class="ratio""#));
        assert!(html.contains(r#"style="--bs-aspect-ratio:56.25%""#));
        assert!(html.contains("<img"));
        assert!(html.ends_with("</figure>"));
    }

    #[test]
    fn aspect_percent_trims_decimals() {
        assert_eq!(aspect_percent(4, 3), "75");
        assert_eq!(aspect_percent(3, 2), "66.6667");
        assert_eq!(aspect_percent(0, 2), "0");
    }
}
