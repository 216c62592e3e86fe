//! Frequency aggregation over template metadata.

pub mod rank;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::DimensionFilter;
use crate::template::TemplateRecord;

pub use rank::{rank, RankedEntry};

/// A counted metadata dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Tags,
    Authors,
    Directory,
    Severity,
    Types,
}

/// Occurrence count per label. Every occurrence counts, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, usize>,
}

impl FrequencyTable {
    pub fn increment(&mut self, label: &str) {
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Accumulates the five frequency dimensions across a template tree.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    pub tags: FrequencyTable,
    pub authors: FrequencyTable,
    pub directory: FrequencyTable,
    pub severity: FrequencyTable,
    pub types: FrequencyTable,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a discovered file under its top-level directory, template or not.
    pub fn record_file(&mut self, directory: &str) {
        self.directory.increment(directory);
    }

    /// Fold one template's metadata into the content dimensions.
    pub fn record_template(&mut self, record: &TemplateRecord) {
        for tag in record.tag_tokens() {
            self.tags.increment(tag);
        }
        for author in record.author_labels() {
            self.authors.increment(&author);
        }
        if let Some(severity) = &record.severity {
            self.severity.increment(&severity.to_lowercase());
        }
        for protocol in &record.protocol_types {
            self.types.increment(&protocol.to_string());
        }
    }

    pub fn table(&self, dimension: Dimension) -> &FrequencyTable {
        match dimension {
            Dimension::Tags => &self.tags,
            Dimension::Authors => &self.authors,
            Dimension::Directory => &self.directory,
            Dimension::Severity => &self.severity,
            Dimension::Types => &self.types,
        }
    }

    /// Rank the requested dimensions.
    pub fn finish(&self, filter: &DimensionFilter, top: usize) -> AggregatedOutput {
        let ranked = |dimension: Dimension| {
            filter
                .wants(dimension)
                .then(|| rank(self.table(dimension), top))
        };
        AggregatedOutput {
            tags: ranked(Dimension::Tags),
            authors: ranked(Dimension::Authors),
            directory: ranked(Dimension::Directory),
            severity: ranked(Dimension::Severity),
            types: ranked(Dimension::Types),
        }
    }
}

/// Ranked dimensions of a run. Dimensions that were not requested are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedOutput {
    #[serde(default, skip_serializing_if = "is_absent")]
    pub tags: Option<Vec<RankedEntry>>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub authors: Option<Vec<RankedEntry>>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub directory: Option<Vec<RankedEntry>>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub severity: Option<Vec<RankedEntry>>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub types: Option<Vec<RankedEntry>>,
}

/// Unrequested and empty dimensions are left out of structured output.
fn is_absent(list: &Option<Vec<RankedEntry>>) -> bool {
    list.as_deref().unwrap_or_default().is_empty()
}

impl AggregatedOutput {
    pub fn get(&self, dimension: Dimension) -> Option<&[RankedEntry]> {
        match dimension {
            Dimension::Tags => self.tags.as_deref(),
            Dimension::Authors => self.authors.as_deref(),
            Dimension::Directory => self.directory.as_deref(),
            Dimension::Severity => self.severity.as_deref(),
            Dimension::Types => self.types.as_deref(),
        }
    }

    /// Length of the longest present dimension.
    pub fn max_rows(&self) -> usize {
        [
            &self.tags,
            &self.authors,
            &self.directory,
            &self.severity,
            &self.types,
        ]
        .into_iter()
        .filter_map(|list| list.as_ref().map(Vec::len))
        .max()
        .unwrap_or(0)
    }
}
