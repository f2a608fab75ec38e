//! sitecrumbs CLI
//!
//! Resolves the breadcrumb trail of a site description and renders it as
//! plain text, HTML, ANSI, JSON or YAML.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use sitecrumbs_core::{
    classify, format_trail, Catalog, CrumbConfig, FormatOptions, OutputFormat, Resolver, StaticSite,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Breadcrumb trails for content-managed sites
#[derive(Parser, Debug)]
#[command(name = "sitecrumbs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and render breadcrumb trails from site descriptions")]
#[command(long_about = r#"
sitecrumbs: Breadcrumb Trails for Content-Managed Sites

Reads a site description (YAML or JSON) listing terms, posts, taxonomies,
post types and the request being served, classifies the request into a page
kind and renders the resulting breadcrumb trail.

Output formats:
  - plain (default) - Titles joined by the separator
  - html            - Links and spans joined by the separator
  - list            - <ul> list of links
  - landmark        - <nav> landmark around the list, with screen-reader marker
  - ansi            - Colorful terminal output
  - json / yaml     - The trail as data

Examples:
  sitecrumbs site.yaml                        # Plain trail
  sitecrumbs site.yaml --format landmark      # Accessible HTML
  sitecrumbs site.yaml --locale de            # German labels
  sitecrumbs site.yaml --config crumbs.yaml   # Enable custom post types etc.
  sitecrumbs kind site.yaml                   # Show the classified page kind
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site description to resolve
    pub site: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value_t = OutputFormatArg::Plain)]
    pub format: OutputFormatArg,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Separator between breadcrumbs
    #[arg(long, global = true, default_value = " > ")]
    pub separator: String,

    /// Locale of the labels
    #[arg(long, global = true, default_value = "en")]
    pub locale: String,

    /// Title of the home breadcrumb
    #[arg(long, global = true)]
    pub home_label: Option<String>,

    /// Extra translation bundle as LOCALE=PATH (can be specified multiple times)
    #[arg(long, global = true, value_parser = parse_bundle, action = ArgAction::Append)]
    pub bundle: Vec<(String, PathBuf)>,

    /// CSS class of link and span tags (can be specified multiple times)
    #[arg(long, global = true, action = ArgAction::Append)]
    pub anchor_class: Vec<String>,

    /// CSS class of the list (can be specified multiple times)
    #[arg(long, global = true, action = ArgAction::Append)]
    pub list_class: Vec<String>,

    /// CSS class of list entries (can be specified multiple times)
    #[arg(long, global = true, action = ArgAction::Append)]
    pub entry_class: Vec<String>,

    /// CSS class of the nav landmark (can be specified multiple times)
    #[arg(long, global = true, action = ArgAction::Append)]
    pub nav_class: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and render the breadcrumb trail
    Resolve {
        /// Site description
        site: PathBuf,
    },

    /// Print the page kind of the request
    Kind {
        /// Site description
        site: PathBuf,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormatArg {
    Plain,
    Html,
    List,
    Landmark,
    Ansi,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Html => OutputFormat::Html,
            OutputFormatArg::List => OutputFormat::HtmlList,
            OutputFormatArg::Landmark => OutputFormat::Landmark,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Parse a `LOCALE=PATH` bundle argument
fn parse_bundle(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((locale, path)) if !locale.is_empty() && !path.is_empty() => {
            Ok((locale.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected LOCALE=PATH, got \"{}\"", value)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match &args.command {
        Some(Commands::Resolve { site }) => run_resolve(site, &args),
        Some(Commands::Kind { site }) => run_kind(site, &args),
        None => match &args.site {
            Some(site) => run_resolve(site, &args),
            None => bail!("No site description given; see --help"),
        },
    }
}

/// Initialize tracing based on the verbosity flag
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "sitecrumbs=warn,sitecrumbs_core=warn",
        1 => "sitecrumbs=info,sitecrumbs_core=info",
        2 => "sitecrumbs=debug,sitecrumbs_core=debug",
        _ => "sitecrumbs=trace,sitecrumbs_core=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build resolution configuration from args
fn build_config(args: &Args) -> Result<CrumbConfig> {
    let mut config = match &args.config {
        Some(path) => CrumbConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CrumbConfig::default(),
    };

    if let Some(label) = &args.home_label {
        config = config.with_home_label(label.clone());
    }

    Ok(config)
}

/// Build translation catalog from args
fn build_catalog(args: &Args) -> Result<Catalog> {
    let mut catalog = Catalog::new(args.locale.clone());

    for (locale, path) in &args.bundle {
        catalog = catalog
            .load_bundle(locale, path)
            .with_context(|| format!("Failed to load bundle {}", path.display()))?;
    }

    Ok(catalog)
}

/// Build formatter options from args
fn build_options(args: &Args) -> FormatOptions {
    FormatOptions {
        separator: args.separator.clone(),
        anchor_classes: args.anchor_class.clone(),
        list_classes: args.list_class.clone(),
        entry_classes: args.entry_class.clone(),
        nav_classes: args.nav_class.clone(),
    }
}

fn load_site(path: &Path) -> Result<StaticSite> {
    StaticSite::from_path(path).with_context(|| format!("Failed to load site {}", path.display()))
}

fn run_resolve(path: &Path, args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let catalog = build_catalog(args)?;
    let site = load_site(path)?;

    let trail = Resolver::new(&config, &catalog).resolve(&site);
    info!(breadcrumbs = trail.len(), "resolved trail");

    let output = format_trail(&trail, args.format.into(), &build_options(args), &catalog)
        .context("Failed to format trail")?;

    write_output(&output, args.output.as_deref())
}

fn run_kind(path: &Path, args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let site = load_site(path)?;

    let output = match classify(&site) {
        Some(rule) if rule.is_enabled(&config, &site) => rule.kind.label().to_string(),
        Some(rule) => format!("{} (disabled)", rule.kind.label()),
        None => "unclassified".to_string(),
    };

    write_output(&output, args.output.as_deref())
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}
