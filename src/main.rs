use clap::{Parser, Subcommand};
use srcset_grid::resolver::{TemplateResolver, parse_dimensions};
use srcset_grid::{attributes, config, markup, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "srcset-grid")]
#[command(about = "Responsive image sizes from a column grid")]
#[command(long_about = "\
Responsive image sizes from a column grid

Describe how many grid columns an image takes at each breakpoint and get the
matching `sizes` and `srcset` attributes. Layouts and explicit size lists are
named in srcset.toml:

  [layouts.hero]          # col-12 col-md-8 col-lg-6
  md = 8
  lg = 6

  [lists.thumbs]          # breakpoint → width, for off-grid images
  [lists.thumbs.sizes]
  \"0\" = 300
  \"768\" = 600

URL templates accept {width}, {height}, {crop} and {transform}:

  srcset-grid render hero \\
      --template 'https://cdn.example.com/hero.jpg?{transform}' \\
      --original 4000x3000

Run 'srcset-grid gen-config' to generate a documented srcset.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing srcset.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Log more (-v debug, -vv trace). RUST_LOG applies when not given.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Arguments for rendering one image.
#[derive(clap::Args)]
struct RenderArgs {
    /// Layout or list name from srcset.toml
    name: String,

    /// Image URL template
    #[arg(long)]
    template: String,

    /// Original image dimensions, e.g. 4000x3000
    #[arg(long)]
    original: String,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "html")]
    json: bool,

    /// Print an <img> element
    #[arg(long)]
    html: bool,

    /// Alt text for --html
    #[arg(long, default_value = "", requires = "html")]
    alt: String,

    /// Also print a <link rel="preload"> for the <head>
    #[arg(long, requires = "html")]
    preload: bool,

    /// Wrap the <img> in an aspect-ratio <figure>
    #[arg(long, requires = "html")]
    aspect: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compute sizes and srcset for an image
    Render(RenderArgs),
    /// Show the grid and every configured layout and list
    List,
    /// Validate srcset.toml without rendering
    Check,
    /// Print a stock srcset.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render(args) => {
            let config = config::load_config(&cli.config)?;
            let sizes = config.size_list(&args.name)?;
            let original = parse_dimensions(&args.original)?;
            let resolver = TemplateResolver::new(args.template.as_str(), original)?;
            let rendering = attributes::render(&args.template, &sizes, &resolver)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&rendering)?);
            } else if args.html {
                if args.preload
                    && let attributes::Rendering::Responsive(attrs) = &rendering
                    && let Some(link) = markup::preload_link(attrs)
                {
                    println!("{}", link.into_string());
                }
                let img = markup::img_tag(&rendering, &args.alt);
                let img = if args.aspect {
                    markup::aspect_figure(original.0, original.1, img)
                } else {
                    img
                };
                println!("{}", img.into_string());
            } else {
                output::print_size_list(&args.name, &sizes);
                println!();
                output::print_rendering(&rendering);
            }
        }
        Command::List => {
            let config = config::load_config(&cli.config)?;
            output::print_config_overview(&config);
            for name in config.names() {
                println!();
                output::print_size_list(name, &config.size_list(name)?);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.join(config::CONFIG_FILE).display());
            let config = config::load_config(&cli.config)?;
            println!(
                "==> Config is valid ({} layouts, {} lists)",
                config.layouts.len(),
                config.lists.len()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `-v` flags win over `RUST_LOG`; without either only warnings show.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
