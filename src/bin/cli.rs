use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::EnvFilter;

use templatestats::config::{Config, DimensionFilter, Options, DEFAULT_CONFIG_FILE};
use templatestats::error::{Result, StatsError};
use templatestats::listing;
use templatestats::output::OutputFormat;

/// Long flags that may also be spelled with a single dash (`-top 10`).
const LEGACY_FLAGS: &[&str] = &[
    "top",
    "tags",
    "authors",
    "directory",
    "severity",
    "types",
    "lcr",
    "fields",
    "ta",
    "output",
    "json",
    "path",
    "config",
];

static LEGACY_FLAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-([a-z]{2,})(=.*)?$").unwrap());

#[derive(Parser, Debug)]
#[command(
    name = "templatestats",
    about = "Metadata statistics for security detection templates",
    version,
    author
)]
struct Cli {
    /// Output top N entries per dimension or listing (0 = all)
    #[arg(long)]
    top: Option<usize>,

    /// Show tag data
    #[arg(long)]
    tags: bool,

    /// Show author data
    #[arg(long)]
    authors: bool,

    /// Show directory data
    #[arg(long)]
    directory: bool,

    /// Show severity data
    #[arg(long)]
    severity: bool,

    /// Show protocol type data
    #[arg(long)]
    types: bool,

    /// Verbose mode: print lint advisories and ignored files
    #[arg(short = 'v', long)]
    verbose: bool,

    /// List CVEs in reverse order (newest first) instead of statistics
    #[arg(long = "lcr")]
    list_cves_in_reverse: bool,

    /// Fields appended to listing lines, comma separated: author,severity
    #[arg(long)]
    fields: Option<String>,

    /// Template additions file: newline-delimited template paths
    #[arg(long = "ta")]
    template_additions: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Show output in JSON format
    #[arg(long)]
    json: bool,

    /// Template directory (defaults to ~/nuclei-templates)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Config file path (defaults to .template-stats.toml if present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

/// Rewrite `-flag` spellings of known long flags to `--flag`.
fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            match LEGACY_FLAG_RE.captures(text) {
                Some(caps) if LEGACY_FLAGS.contains(&&caps[1]) => {
                    OsString::from(format!("-{text}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("TEMPLATE_STATS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) if !path.exists() => Err(StatsError::Config(format!(
            "config file not found: {}",
            path.display()
        ))),
        Some(path) => Config::load(path),
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn build_options(cli: &Cli, config: &Config) -> Result<Options> {
    let defaults = &config.defaults;

    let fields = match (&cli.fields, &defaults.fields) {
        (Some(raw), _) => listing::parse_fields([raw.as_str()]),
        (None, Some(list)) => listing::parse_fields(list.iter().map(String::as_str)),
        (None, None) => Vec::new(),
    };

    let format = if cli.json || defaults.json.unwrap_or(false) {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    Ok(Options {
        template_dir: config.template_dir(cli.path.clone())?,
        top: cli.top.or(defaults.top).unwrap_or(0),
        dimensions: DimensionFilter {
            tags: cli.tags,
            authors: cli.authors,
            directory: cli.directory,
            severity: cli.severity,
            types: cli.types,
        },
        verbose: cli.verbose,
        list_cves_in_reverse: cli.list_cves_in_reverse,
        fields,
        additions_file: cli.template_additions.clone(),
        format,
        include_hidden: defaults.include_hidden.unwrap_or(true),
        extensions: config.extensions()?,
    })
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let options = build_options(&cli, &config)?;

    let report = templatestats::run(&options)?;
    let rendered = templatestats::render_report(&report, &options)?;

    // Created only after a successful run so a failed walk leaves it intact.
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(std::fs::File::create(path).map_err(|source| {
            StatsError::OutputFile {
                path: path.clone(),
                source,
            }
        })?),
        None => Box::new(std::io::stdout().lock()),
    };
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}
