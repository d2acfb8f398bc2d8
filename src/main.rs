use clap::{Parser, Subcommand};
use simple_srcset::breakpoint::Breakpoint;
use simple_srcset::config::{self, SiteConfig};
use simple_srcset::render::ResponsiveImage;
use simple_srcset::resolver::{ImageDescriptor, ResolveRequest, Resolver};
use simple_srcset::size::SizeValue;
use simple_srcset::tabs::{self, TabPanel};
use simple_srcset::{output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-srcset")]
#[command(about = "Responsive srcset and sizes for static site images")]
#[command(long_about = "\
Responsive srcset and sizes for static site images

Computes the candidate widths and the sizes hint for <img> elements from an
image's intrinsic width and a layout preset.

Presets (per breakpoint xs, sm, md, lg, xl, 2xl):
  full     100vw everywhere
  half     100vw on small screens, 50vw from md
  third    100vw, 50vw at md, 33vw from lg
  logo     fixed 150px..300px
  hero     100vw, narrowing to 70vw at 2xl
  content  100vw, narrowing to 50vw at 2xl

Custom presets and default widths live in config.toml in the asset directory.
Run 'simple-srcset gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Asset directory (holds config.toml)
    #[arg(long, default_value = "assets", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ResolveArgs {
    /// Intrinsic image width in pixels
    #[arg(long)]
    width: u32,
    /// Intrinsic image height in pixels (only used with --html)
    #[arg(long)]
    height: Option<u32>,
    /// Named preset
    #[arg(long)]
    preset: Option<String>,
    /// Candidate widths, comma separated (default: config widths)
    #[arg(long, value_delimiter = ',')]
    widths: Option<Vec<u32>>,
    /// Explicit sizes string, used verbatim
    #[arg(long)]
    sizes: Option<String>,
    /// Override one breakpoint on top of `full`, e.g. `md=50vw` (repeatable)
    #[arg(long = "set", value_parser = parse_override)]
    overrides: Vec<(Breakpoint, SizeValue)>,
    /// Also print an <img> tag for this source path
    #[arg(long)]
    html: Option<String>,
    /// Alt text for --html
    #[arg(long, default_value = "")]
    alt: String,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve widths and sizes for a single image
    Resolve(ResolveArgs),
    /// Scan the asset directory and write a resolved manifest
    Scan {
        /// Manifest output path
        #[arg(long, default_value = "srcset-manifest.json")]
        output: PathBuf,
    },
    /// Render a tab panel definition to an HTML fragment
    Tabs {
        /// TOML file with [[tabs]] entries
        file: PathBuf,
    },
    /// List all presets with their sizes hint
    Presets,
    /// Validate config and images without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn parse_override(s: &str) -> Result<(Breakpoint, SizeValue), String> {
    let (bp, size) = s
        .split_once('=')
        .ok_or_else(|| format!("expected BREAKPOINT=SIZE, got '{s}'"))?;
    let bp: Breakpoint = bp.trim().parse().map_err(|e| format!("{e}"))?;
    let size: SizeValue = size.parse().map_err(|e| format!("{e}"))?;
    Ok((bp, size))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(args) => {
            let site_config = load_site_config(&cli.source)?;
            let resolver = Resolver::from_config(&site_config)?;
            let image = ImageDescriptor {
                width: args.width,
                height: args.height,
            };
            let request = build_request(&args);
            let resolution = resolver.resolve(&image, &request)?;
            output::print_resolution(&resolution);
            if let Some(src) = &args.html {
                let img = ResponsiveImage::new(
                    src,
                    &args.alt,
                    image,
                    &resolution,
                    &site_config.images.url_pattern,
                    site_config.images.loading,
                );
                println!("{}", img.render().into_string());
            }
        }
        Command::Scan { output: manifest_path } => {
            let manifest = scan::scan(&cli.source)?;
            print_entry_warnings(&manifest);
            let json = serde_json::to_string_pretty(&manifest)?;
            if let Some(parent) = manifest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
            println!("Manifest written to {}", manifest_path.display());
        }
        Command::Tabs { file } => {
            let site_config = load_site_config(&cli.source)?;
            let resolver = Resolver::from_config(&site_config)?;
            let panel = TabPanel::load(&file)?;
            let rendered = tabs::render_tab_panel(
                &panel,
                &panel.initial_state(),
                &resolver,
                &site_config.images,
            );
            for (title, error) in &rendered.errors {
                output::print_warning(title, error);
            }
            println!("{}", rendered.markup.into_string());
        }
        Command::Presets => {
            let site_config = load_site_config(&cli.source)?;
            let resolver = Resolver::from_config(&site_config)?;
            output::print_presets(&resolver);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            print_entry_warnings(&manifest);
            output::print_scan_output(&manifest);
            println!("==> Assets are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Root config of the asset directory; stock defaults when the directory is absent.
fn load_site_config(source: &std::path::Path) -> Result<SiteConfig, config::ConfigError> {
    if source.is_dir() {
        config::load_config(source)
    } else {
        Ok(SiteConfig::default())
    }
}

fn build_request(args: &ResolveArgs) -> ResolveRequest {
    let mut request = ResolveRequest {
        preset: args.preset.clone(),
        widths: args.widths.clone(),
        sizes: args.sizes.clone(),
        overrides: None,
    };
    for &(bp, size) in &args.overrides {
        request = request.set(bp, size);
    }
    request
}

fn print_entry_warnings(manifest: &scan::Manifest) {
    for entry in &manifest.images {
        for warning in &entry.warnings {
            eprintln!("warning: {}: {}", entry.source_path, warning);
        }
    }
}
