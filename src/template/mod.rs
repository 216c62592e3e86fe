//! Template metadata extraction.
//!
//! A template is decoded into a generic YAML document, then reduced to the
//! handful of metadata fields the statistics and listings care about.

pub mod document;

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

pub use document::{value_to_text, InfoBlock, TemplateDocument};

/// Why a single template could not be read. Never aborts a run.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("could not read: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("document is not a mapping")]
    NotAMapping,
}

/// Read and decode a template file.
pub fn load(path: &Path) -> Result<TemplateDocument, TemplateError> {
    let content = std::fs::read_to_string(path)?;
    TemplateDocument::parse(&content)
}

/// Detection mechanism, inferred from which top-level sections a template has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolType {
    Http,
    Dns,
    Network,
    File,
    Headless,
    Ssl,
    Websocket,
    Whois,
    Code,
    Javascript,
}

impl ProtocolType {
    pub const ALL: [ProtocolType; 10] = [
        Self::Http,
        Self::Dns,
        Self::Network,
        Self::File,
        Self::Headless,
        Self::Ssl,
        Self::Websocket,
        Self::Whois,
        Self::Code,
        Self::Javascript,
    ];

    /// Top-level section keys that mark a template as this type.
    pub fn section_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Http => &["requests", "http"],
            Self::Dns => &["dns"],
            Self::Network => &["network", "tcp"],
            Self::File => &["file"],
            Self::Headless => &["headless"],
            Self::Ssl => &["ssl"],
            Self::Websocket => &["websocket"],
            Self::Whois => &["whois"],
            Self::Code => &["code"],
            Self::Javascript => &["javascript"],
        }
    }

    /// Every type whose section appears in the document.
    pub fn detect(doc: &TemplateDocument) -> BTreeSet<ProtocolType> {
        Self::ALL
            .into_iter()
            .filter(|t| t.section_keys().iter().any(|key| doc.has_section(key)))
            .collect()
    }
}

impl std::fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Dns => write!(f, "dns"),
            Self::Network => write!(f, "network"),
            Self::File => write!(f, "file"),
            Self::Headless => write!(f, "headless"),
            Self::Ssl => write!(f, "ssl"),
            Self::Websocket => write!(f, "websocket"),
            Self::Whois => write!(f, "whois"),
            Self::Code => write!(f, "code"),
            Self::Javascript => write!(f, "javascript"),
        }
    }
}

/// Metadata missing from a template that is worth a lint line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    MissingTags,
    MissingDescription,
    MissingReference,
    MissingAuthor,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTags => write!(f, "no tags found"),
            Self::MissingDescription => write!(f, "no description found"),
            Self::MissingReference => write!(f, "no reference found"),
            Self::MissingAuthor => write!(f, "no author found"),
        }
    }
}

/// Metadata of one template, alive only while it is being aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    pub id: String,
    /// `info.name`, empty when absent.
    pub name: String,
    /// Raw `info.author`, possibly comma-separated.
    pub author: Option<String>,
    /// `info.severity` as written.
    pub severity: Option<String>,
    /// Raw `info.tags`.
    pub tags: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub protocol_types: BTreeSet<ProtocolType>,
}

impl TemplateRecord {
    /// Extract metadata. Returns `None` when the document has no `id` or no
    /// `info` block.
    pub fn from_document(doc: &TemplateDocument) -> Option<Self> {
        let id = doc.id()?;
        let info = doc.info()?;
        Some(Self {
            id,
            name: info.text("name").unwrap_or_default(),
            author: info.text("author"),
            severity: info.text("severity"),
            tags: info.text("tags"),
            description: info.text("description"),
            reference: info.text("reference"),
            protocol_types: ProtocolType::detect(doc),
        })
    }

    /// Whether the identifier names a CVE.
    pub fn is_cve(&self) -> bool {
        self.id.starts_with("CVE-")
    }

    /// Tag tokens, split on commas exactly as written. Missing tags read as `""`.
    pub fn tag_tokens(&self) -> Vec<&str> {
        self.tags.as_deref().unwrap_or_default().split(',').collect()
    }

    /// Author labels: comma-split, trimmed, lower-cased. Missing author reads as `""`.
    pub fn author_labels(&self) -> Vec<String> {
        explode_authors(self.author.as_deref().unwrap_or_default())
    }

    pub fn advisories(&self) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        if self.tags.is_none() {
            advisories.push(Advisory::MissingTags);
        }
        if self.description.is_none() {
            advisories.push(Advisory::MissingDescription);
        }
        if self.reference.is_none() {
            advisories.push(Advisory::MissingReference);
        }
        if self.author.is_none() {
            advisories.push(Advisory::MissingAuthor);
        }
        advisories
    }
}

/// Split a raw author field into lower-cased, trimmed labels, blanks included.
pub fn explode_authors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_lowercase())
        .collect()
}
