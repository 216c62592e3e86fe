use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};
use crate::listing::ListingField;
use crate::output::OutputFormat;
use crate::stats::Dimension;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".template-stats.toml";

/// Directory under the home directory used when no template root is given.
pub const DEFAULT_TEMPLATE_DIR: &str = "nuclei-templates";

/// Top-level configuration from `.template-stats.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Defaults applied when the matching CLI flag is not given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    pub top: Option<usize>,
    pub fields: Option<Vec<String>>,
    pub json: Option<bool>,
    pub path: Option<PathBuf>,
    pub include_hidden: Option<bool>,
    pub extensions: Option<Vec<String>>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the template root: explicit path, then config, then
    /// `~/nuclei-templates`.
    pub fn template_dir(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit.or_else(|| self.defaults.path.clone()) {
            return Ok(path);
        }
        let home = dirs::home_dir().ok_or(StatsError::HomeDir)?;
        Ok(home.join(DEFAULT_TEMPLATE_DIR))
    }

    /// Recognized template extensions, lower-cased and without the dot.
    pub fn extensions(&self) -> Result<Vec<String>> {
        let Some(raw) = &self.defaults.extensions else {
            return Ok(vec!["yaml".to_string()]);
        };
        let extensions: Vec<String> = raw
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if extensions.is_empty() {
            return Err(StatsError::Config(
                "`extensions` must name at least one file extension".into(),
            ));
        }
        Ok(extensions)
    }
}

/// Which frequency dimensions were explicitly requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionFilter {
    pub tags: bool,
    pub authors: bool,
    pub directory: bool,
    pub severity: bool,
    pub types: bool,
}

impl DimensionFilter {
    /// Whether a dimension should be emitted. With nothing selected, all are.
    pub fn wants(&self, dimension: Dimension) -> bool {
        if !self.any() {
            return true;
        }
        match dimension {
            Dimension::Tags => self.tags,
            Dimension::Authors => self.authors,
            Dimension::Directory => self.directory,
            Dimension::Severity => self.severity,
            Dimension::Types => self.types,
        }
    }

    fn any(&self) -> bool {
        self.tags || self.authors || self.directory || self.severity || self.types
    }
}

/// Options for one run, built once at startup.
#[derive(Debug, Clone)]
pub struct Options {
    /// Root of the template tree.
    pub template_dir: PathBuf,
    /// Entries kept per dimension or listing (0 = all).
    pub top: usize,
    pub dimensions: DimensionFilter,
    /// Emit advisory lint lines.
    pub verbose: bool,
    /// Produce the CVE-ordered listing instead of frequency tables.
    pub list_cves_in_reverse: bool,
    /// Optional fields appended to listing lines.
    pub fields: Vec<ListingField>,
    /// Newline-delimited list of added template paths.
    pub additions_file: Option<PathBuf>,
    pub format: OutputFormat,
    pub include_hidden: bool,
    pub extensions: Vec<String>,
}

impl Options {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            top: 0,
            dimensions: DimensionFilter::default(),
            verbose: false,
            list_cves_in_reverse: false,
            fields: Vec::new(),
            additions_file: None,
            format: OutputFormat::Table,
            include_hidden: true,
            extensions: vec!["yaml".to_string()],
        }
    }
}
