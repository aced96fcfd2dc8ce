//! CLI output formatting.
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Size list
//!
//! ```text
//! hero (mobile-first, 3 sizes)
//!     (min-width: 992px) 456x400 thumb
//!     (min-width: 576px) 516px
//!     default 551px
//! ```
//!
//! ## Attributes
//!
//! ```text
//! sizes:  (min-width: 992px) 456px, 551px
//! srcset: hero-456.jpg 456w, hero-551.jpg 551w
//! src:    hero-551.jpg (551x367)
//! ```
//!
//! ## Config overview
//!
//! ```text
//! Grid: 12 columns, 24px gutter
//!     xs 0px fluid
//!     sm 576px container 540px
//!
//! Layouts
//!     hero
//!
//! Lists
//!     thumbs (desktop-first)
//! ```

use crate::attributes::{Rendering, ResolvedSource, ResponsiveAttributes};
use crate::config::SizingConfig;
use crate::grid::Container;
use crate::size::SizeSpec;
use crate::size_list::SizeList;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `456px`, or `456x400 fill` when the size has a height.
fn size_label(spec: &SizeSpec) -> String {
    match spec.effective_height() {
        Some(height) => format!(
            "{}x{} {}",
            spec.effective_width(),
            height,
            spec.crop_type()
        ),
        None => format!("{}px", spec.effective_width()),
    }
}

fn source_label(source: &ResolvedSource) -> String {
    format!("{} ({}x{})", source.url, source.width, source.height)
}

// ============================================================================
// Size lists
// ============================================================================

/// Format a size list in the order it is emitted into `sizes`.
pub fn format_size_list(name: &str, list: &SizeList) -> Vec<String> {
    let order = if list.is_mobile_first() {
        "mobile-first"
    } else {
        "desktop-first"
    };
    let count = match list.len() {
        1 => "1 size".to_string(),
        n => format!("{n} sizes"),
    };
    let mut lines = vec![format!("{name} ({order}, {count})")];

    let Ok(entries) = list.entries() else {
        lines.push(format!("{}(no sizes)", indent(1)));
        return lines;
    };
    for entry in entries {
        if entry.is_last {
            lines.push(format!("{}default {}", indent(1), size_label(entry.spec)));
        } else {
            lines.push(format!(
                "{}({}: {}px) {}",
                indent(1),
                list.media_feature(),
                entry.trigger,
                size_label(entry.spec)
            ));
        }
    }
    lines
}

/// Print a size list to stdout.
pub fn print_size_list(name: &str, list: &SizeList) {
    for line in format_size_list(name, list) {
        println!("{}", line);
    }
}

// ============================================================================
// Attributes
// ============================================================================

fn format_responsive(attrs: &ResponsiveAttributes) -> Vec<String> {
    let mut lines = vec![
        format!("sizes:  {}", attrs.sizes),
        format!("srcset: {}", attrs.srcset),
    ];
    match &attrs.widest {
        Some(source) => lines.push(format!("src:    {}", source_label(source))),
        None => lines.push("src:    (unresolved)".to_string()),
    }
    lines
}

/// Format the attributes produced for one image.
pub fn format_rendering(rendering: &Rendering) -> Vec<String> {
    match rendering {
        Rendering::Responsive(attrs) => format_responsive(attrs),
        Rendering::Single { source } => {
            let src = source
                .as_ref()
                .map_or_else(|| "(unresolved)".to_string(), source_label);
            vec![
                "single resolution, no srcset".to_string(),
                format!("src:    {src}"),
            ]
        }
    }
}

/// Print the attributes for one image to stdout.
pub fn print_rendering(rendering: &Rendering) {
    for line in format_rendering(rendering) {
        println!("{}", line);
    }
}

// ============================================================================
// Config overview
// ============================================================================

/// Format the grid plus the names of all layouts and lists.
pub fn format_config_overview(config: &SizingConfig) -> Vec<String> {
    let grid = &config.grid;
    let mut lines = vec![format!(
        "Grid: {} columns, {}px gutter",
        grid.columns, grid.gutter
    )];
    for bp in &grid.breakpoints {
        let container = match grid.containers.get(&bp.name) {
            Some(Container::Fixed(width)) => format!("container {width}px"),
            Some(Container::Fluid(_)) | None => "fluid".to_string(),
        };
        lines.push(format!(
            "{}{} {}px {}",
            indent(1),
            bp.name,
            bp.min_width,
            container
        ));
    }

    if !config.layouts.is_empty() {
        lines.push(String::new());
        lines.push("Layouts".to_string());
        for name in config.layouts.keys() {
            lines.push(format!("{}{}", indent(1), name));
        }
    }

    if !config.lists.is_empty() {
        lines.push(String::new());
        lines.push("Lists".to_string());
        for (name, list) in &config.lists {
            let order = if list.mobile_first {
                "mobile-first"
            } else {
                "desktop-first"
            };
            lines.push(format!("{}{} ({})", indent(1), name, order));
        }
    }

    lines
}

/// Print the config overview to stdout.
pub fn print_config_overview(config: &SizingConfig) {
    for line in format_config_overview(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::Crop;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn size_label_width_only() {
        assert_eq!(size_label(&SizeSpec::width(551).unwrap()), "551px");
    }

    #[test]
    fn size_label_with_height_shows_crop() {
        let spec = SizeSpec::new(456, Some(400), Some(Crop::Mode("thumb".into()))).unwrap();
        assert_eq!(size_label(&spec), "456x400 thumb");
    }

    // =========================================================================
    // format_size_list tests
    // =========================================================================

    #[test]
    fn size_list_mobile_first() {
        let list = SizeList::from_entries(
            true,
            [
                (0, SizeSpec::width(551).unwrap()),
                (992, SizeSpec::width(456).unwrap()),
            ],
        );
        let lines = format_size_list("hero", &list);
        assert_eq!(
            lines,
            vec![
                "hero (mobile-first, 2 sizes)",
                "    (min-width: 992px) 456px",
                "    default 551px",
            ]
        );
    }

    #[test]
    fn size_list_desktop_first() {
        let list = SizeList::from_entries(
            false,
            [
                (1200, SizeSpec::width(1100).unwrap()),
                (576, SizeSpec::width(500).unwrap()),
            ],
        );
        let lines = format_size_list("thumbs", &list);
        assert_eq!(lines[0], "thumbs (desktop-first, 2 sizes)");
        assert_eq!(lines[1], "    (max-width: 576px) 500px");
        assert_eq!(lines[2], "    default 1100px");
    }

    #[test]
    fn size_list_empty() {
        let lines = format_size_list("none", &SizeList::new(true));
        assert_eq!(lines, vec!["none (mobile-first, 0 sizes)", "    (no sizes)"]);
    }

    #[test]
    fn size_list_singular() {
        let list = SizeList::from_entries(true, [(0, SizeSpec::width(300).unwrap())]);
        assert_eq!(format_size_list("one", &list)[0], "one (mobile-first, 1 size)");
    }

    // =========================================================================
    // format_rendering tests
    // =========================================================================

    #[test]
    fn rendering_responsive() {
        let rendering = Rendering::Responsive(ResponsiveAttributes {
            sizes: "(min-width: 992px) 456px, 551px".to_string(),
            srcset: "a-456.jpg 456w, a-551.jpg 551w".to_string(),
            widest: Some(ResolvedSource {
                url: "a-551.jpg".to_string(),
                width: 551,
                height: 367,
            }),
        });
        assert_eq!(
            format_rendering(&rendering),
            vec![
                "sizes:  (min-width: 992px) 456px, 551px",
                "srcset: a-456.jpg 456w, a-551.jpg 551w",
                "src:    a-551.jpg (551x367)",
            ]
        );
    }

    #[test]
    fn rendering_single_unresolved() {
        let lines = format_rendering(&Rendering::Single { source: None });
        assert_eq!(lines[0], "single resolution, no srcset");
        assert_eq!(lines[1], "src:    (unresolved)");
    }

    // =========================================================================
    // format_config_overview tests
    // =========================================================================

    #[test]
    fn config_overview_default() {
        let lines = format_config_overview(&SizingConfig::default());
        assert_eq!(lines[0], "Grid: 12 columns, 24px gutter");
        assert_eq!(lines[1], "    xs 0px fluid");
        assert_eq!(lines[2], "    sm 576px container 540px");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn config_overview_lists_names() {
        let config: SizingConfig = toml::from_str(
            r#"
[layouts.hero]
md = 8

[lists.thumbs]
mobile_first = false
[lists.thumbs.sizes]
"576" = 500
"#,
        )
        .unwrap();
        let lines = format_config_overview(&config);
        let tail: Vec<&str> = lines[7..].iter().map(String::as_str).collect();
        assert_eq!(
            tail,
            vec!["", "Layouts", "    hero", "", "Lists", "    thumbs (desktop-first)"]
        );
    }
}
