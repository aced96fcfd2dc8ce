//! End-to-end tests: `srcset.toml` on disk → size list → template resolver →
//! attributes → markup, through the public API only.

use srcset_grid::attributes::{self, Rendering};
use srcset_grid::config::{self, CONFIG_FILE, ConfigError};
use srcset_grid::resolver::TemplateResolver;
use srcset_grid::{SizeList, SourceResolver, markup};
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
[layouts.hero]
md = 8
lg = 6

[layouts.banner]
lg = { cols = 12, height = 400, crop = "thumb" }

[lists.thumbs]
mobile_first = false
max_width = 800
[lists.thumbs.sizes]
"576" = 500
"992" = 900
"#;

fn config_dir(content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(CONFIG_FILE), content).unwrap();
    tmp
}

fn load(name: &str) -> SizeList {
    let tmp = config_dir(CONFIG);
    let config = config::load_config(tmp.path()).unwrap();
    config.size_list(name).unwrap()
}

fn responsive(rendering: Rendering) -> attributes::ResponsiveAttributes {
    match rendering {
        Rendering::Responsive(attrs) => attrs,
        other => panic!("expected responsive rendering, got {other:?}"),
    }
}

// =============================================================================
// Grid layouts
// =============================================================================

#[test]
fn hero_layout_on_large_original() {
    let sizes = load("hero");
    let resolver = TemplateResolver::new("https://cdn.test/{width}/hero.jpg", (4000, 3000)).unwrap();
    let attrs = attributes::build(&sizes, &resolver).unwrap();

    assert_eq!(
        attrs.sizes,
        "(min-width: 1400px) 636px, (min-width: 1200px) 546px, \
         (min-width: 992px) 456px, (min-width: 768px) 456px, \
         (min-width: 576px) 516px, 551px"
    );
    assert_eq!(
        attrs.srcset,
        "https://cdn.test/636/hero.jpg 636w, https://cdn.test/546/hero.jpg 546w, \
         https://cdn.test/456/hero.jpg 456w, https://cdn.test/456/hero.jpg 456w, \
         https://cdn.test/516/hero.jpg 516w, https://cdn.test/551/hero.jpg 551w"
    );
    let widest = attrs.widest.unwrap();
    assert_eq!((widest.width, widest.height), (636, 477));
}

#[test]
fn small_original_reports_delivered_widths() {
    let sizes = load("hero");
    let resolver = TemplateResolver::new("{width}.jpg", (500, 400)).unwrap();
    let attrs = attributes::build(&sizes, &resolver).unwrap();

    assert_eq!(
        attrs.sizes,
        "(min-width: 1400px) 500px, (min-width: 1200px) 500px, \
         (min-width: 992px) 456px, (min-width: 768px) 456px, \
         (min-width: 576px) 500px, 500px"
    );
    assert!(attrs.srcset.starts_with("500.jpg 500w, 500.jpg 500w, 456.jpg 456w"));
}

#[test]
fn stock_transform_reaches_urls() {
    let sizes = load("banner");
    let resolver = TemplateResolver::new("b.jpg?{transform}", (4000, 3000)).unwrap();
    let lg = sizes.get(992).unwrap();
    let source = resolver.resolve(lg).unwrap();
    assert_eq!(
        source.url,
        "b.jpg?crop=thumb&fetch_format=auto&height=400&quality=auto:eco&width=936"
    );
    assert_eq!((source.width, source.height), (936, 400));
}

// =============================================================================
// Explicit lists
// =============================================================================

#[test]
fn desktop_first_list_is_clamped() {
    let sizes = load("thumbs");
    let resolver = TemplateResolver::new("t-{width}.jpg", (4000, 3000)).unwrap();
    let attrs = attributes::build(&sizes, &resolver).unwrap();
    assert_eq!(attrs.sizes, "(max-width: 576px) 500px, 800px");
    assert_eq!(attrs.srcset, "t-500.jpg 500w, t-800.jpg 800w");
}

// =============================================================================
// Rendering and markup
// =============================================================================

#[test]
fn vector_original_skips_srcset() {
    let sizes = load("hero");
    let template = "https://cdn.test/logo.svg?w={width}&h={height}";
    let resolver = TemplateResolver::new(template, (1000, 1000)).unwrap();
    let rendering = attributes::render(template, &sizes, &resolver).unwrap();

    let Rendering::Single { source } = &rendering else {
        panic!("expected single rendering");
    };
    assert_eq!(
        source.as_ref().unwrap().url,
        "https://cdn.test/logo.svg?w=636&h=636"
    );
    let html = markup::img_tag(&rendering, "Logo").into_string();
    assert!(!html.contains("srcset"));
}

#[test]
fn html_for_hero() {
    let sizes = load("hero");
    let template = "https://cdn.test/{width}/hero.jpg";
    let resolver = TemplateResolver::new(template, (4000, 3000)).unwrap();
    let rendering = attributes::render(template, &sizes, &resolver).unwrap();

    let img = markup::img_tag(&rendering, "Harbour at dusk");
    let figure = markup::aspect_figure(4000, 3000, img).into_string();
    assert!(figure.contains("--bs-aspect-ratio:75%"));
    assert!(figure.contains(r#"src="https://cdn.test/636/hero.jpg""#));
    assert!(figure.contains(r#"width="636""#));

    let attrs = responsive(rendering);
    let link = markup::preload_link(&attrs).unwrap().into_string();
    assert!(link.contains(r#"imagesizes="(min-width: 1400px) 636px"#));
}

// =============================================================================
// Config errors
// =============================================================================

#[test]
fn unknown_name_is_reported() {
    let tmp = config_dir(CONFIG);
    let config = config::load_config(tmp.path()).unwrap();
    let err = config.size_list("gallery").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("gallery"));
}

#[test]
fn invalid_layout_fails_to_load() {
    let tmp = config_dir(
        r#"
[layouts.too_wide]
md = 13
"#,
    );
    let err = config::load_config(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("too_wide"));
}
