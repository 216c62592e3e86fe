//! Changelog-style listings of templates.
//!
//! CVE templates are ordered newest first; everything else keeps the order
//! it was discovered in and fills whatever room a top-N limit leaves.

pub mod cve;

use serde::{Deserialize, Serialize};

use crate::template::TemplateRecord;

pub use cve::{compare_cve_ids, parse_cve_id};

/// Optional field appended to a listing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingField {
    Author,
    Severity,
}

impl ListingField {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "author" | "authors" => Some(Self::Author),
            "severity" => Some(Self::Severity),
            _ => None,
        }
    }
}

/// Parse a comma-separated field list, keeping the first occurrence of each.
pub fn parse_fields<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<ListingField> {
    let mut fields = Vec::new();
    for name in names.into_iter().flat_map(|n| n.split(',')) {
        if name.trim().is_empty() {
            continue;
        }
        match ListingField::from_str_lenient(name) {
            Some(field) if !fields.contains(&field) => fields.push(field),
            Some(_) => {}
            None => tracing::warn!(field = name.trim(), "unknown listing field, ignoring"),
        }
    }
    fields
}

/// One template in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub id: String,
    pub name: String,
    /// Raw author field, possibly comma-separated.
    pub author: String,
    pub severity: String,
}

impl From<&TemplateRecord> for ListingEntry {
    fn from(record: &TemplateRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            author: record.author.clone().unwrap_or_default(),
            severity: record.severity.clone().unwrap_or_default(),
        }
    }
}

/// CVE and non-CVE entries, accumulated separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub cves: Vec<ListingEntry>,
    pub others: Vec<ListingEntry>,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a template by its identifier and append it.
    pub fn push(&mut self, record: &TemplateRecord) {
        let entry = ListingEntry::from(record);
        if record.is_cve() {
            self.cves.push(entry);
        } else {
            self.others.push(entry);
        }
    }

    /// Order CVEs newest first and apply the `top` limit (0 = no limit).
    ///
    /// CVEs are served first; non-CVE entries only fill the room left over.
    pub fn finish(mut self, top: usize) -> Self {
        cve::sort_newest_first(&mut self.cves);
        if top > 0 {
            self.cves.truncate(top);
            self.others.truncate(top.saturating_sub(self.cves.len()));
        }
        self
    }

    /// Entries in output order.
    pub fn entries(&self) -> impl Iterator<Item = &ListingEntry> {
        self.cves.iter().chain(self.others.iter())
    }
}

/// A newly added template, attributed to its authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addition {
    /// Path as written in the additions file.
    pub path: String,
    /// Raw author field.
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: &str) -> ListingEntry {
        ListingEntry {
            id: id.into(),
            name: format!("{id} name"),
            author: "pd".into(),
            severity: "high".into(),
        }
    }

    fn listing(cves: &[&str], others: &[&str]) -> Listing {
        Listing {
            cves: cves.iter().map(|id| entry(id)).collect(),
            others: others.iter().map(|id| entry(id)).collect(),
        }
    }

    fn ids(listing: &Listing) -> Vec<&str> {
        listing.entries().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn classifies_by_cve_prefix() {
        let mut listing = Listing::new();
        for id in ["CVE-2020-0001", "cve-2020-0002", "tech-detect"] {
            let mut record = crate::template::TemplateRecord::from_document(
                &crate::template::TemplateDocument::parse("id: x\ninfo: {}\n").unwrap(),
            )
            .unwrap();
            record.id = id.into();
            listing.push(&record);
        }
        assert_eq!(listing.cves.len(), 1);
        assert_eq!(listing.others.len(), 2);
    }

    #[test]
    fn no_limit_keeps_everything_with_cves_sorted() {
        let finished = listing(&["CVE-2021-1", "CVE-2023-1"], &["b", "a"]).finish(0);
        assert_eq!(ids(&finished), vec!["CVE-2023-1", "CVE-2021-1", "b", "a"]);
    }

    #[test]
    fn limit_within_cves_drops_others() {
        let finished = listing(&["CVE-2021-1", "CVE-2023-1", "CVE-2022-1"], &["a"]).finish(2);
        assert_eq!(ids(&finished), vec!["CVE-2023-1", "CVE-2022-1"]);
    }

    #[test]
    fn limit_equal_to_cves_drops_others() {
        let finished = listing(&["CVE-2021-1"], &["a", "b"]).finish(1);
        assert_eq!(ids(&finished), vec!["CVE-2021-1"]);
    }

    #[test]
    fn remaining_quota_taken_from_others_in_order() {
        let finished = listing(&["CVE-2021-1"], &["c", "a", "b"]).finish(3);
        assert_eq!(ids(&finished), vec!["CVE-2021-1", "c", "a"]);
    }

    #[test]
    fn limit_beyond_everything_returns_all() {
        let finished = listing(&["CVE-2021-1"], &["a"]).finish(10);
        assert_eq!(finished.entries().count(), 2);
    }

    #[test]
    fn fields_deduplicated_in_order() {
        assert_eq!(
            parse_fields(["severity,author,severity"]),
            vec![ListingField::Severity, ListingField::Author]
        );
        assert_eq!(
            parse_fields(["authors", "bogus", ""]),
            vec![ListingField::Author]
        );
        assert!(parse_fields([""]).is_empty());
    }
}
