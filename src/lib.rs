//! Template Stats: metadata statistics for security detection template trees.
//!
//! Walks a template directory, counts tags, authors, top-level directories,
//! severities and protocol types, and renders the ranking as a table or JSON.
//! Alternatively produces changelog-style listings of templates with CVEs
//! ordered newest first.
//!
//! # Quick Start
//!
//! ```no_run
//! use templatestats::{render_report, run, Options};
//!
//! let mut options = Options::new("./nuclei-templates");
//! options.top = 10;
//! let report = run(&options).unwrap();
//! print!("{}", render_report(&report, &options).unwrap());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod listing;
pub mod output;
pub mod stats;
pub mod template;

use std::path::Path;

pub use config::Options;
use error::Result;
use listing::{Addition, Listing};
use stats::{AggregatedOutput, Aggregator};
use template::{Advisory, TemplateRecord};

/// Outcome of a run. The variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Ranked frequency dimensions.
    Stats(AggregatedOutput),
    /// CVE-first listing, already ordered and truncated.
    Listing(Listing),
    /// Attributed template additions.
    Additions(Vec<Addition>),
}

/// Run the pipeline selected by `options`.
pub fn run(options: &Options) -> Result<Report> {
    match &options.additions_file {
        Some(additions) => run_additions(additions, options),
        None => run_tree(options),
    }
}

/// Render a report in the configured format.
pub fn render_report(report: &Report, options: &Options) -> Result<String> {
    match report {
        Report::Stats(stats) => output::render_stats(stats, options.format),
        Report::Listing(listing) => {
            output::render_listing(listing, &options.fields, options.format)
        }
        Report::Additions(additions) => output::render_additions(additions, options.format),
    }
}

fn run_tree(options: &Options) -> Result<Report> {
    let root = &options.template_dir;
    let files = catalog::discover(root, options.include_hidden)?;
    tracing::debug!(root = %root.display(), files = files.len(), "discovered files");

    let mut aggregator = Aggregator::new();
    let mut listing = Listing::new();

    for path in &files {
        aggregator.record_file(&catalog::directory_label(root, path));

        if !catalog::is_template(path, &options.extensions) {
            if options.verbose {
                tracing::info!(path = %path.display(), "[ignored] not a template");
            }
            continue;
        }

        let Some(record) = read_record(path, options.verbose) else {
            continue;
        };

        if options.list_cves_in_reverse {
            listing.push(&record);
            continue;
        }

        lint(&record, path, options.verbose);
        aggregator.record_template(&record);
    }

    if options.list_cves_in_reverse {
        return Ok(Report::Listing(listing.finish(options.top)));
    }
    Ok(Report::Stats(aggregator.finish(&options.dimensions, options.top)))
}

fn run_additions(additions_file: &Path, options: &Options) -> Result<Report> {
    let relative_paths = catalog::read_additions(additions_file)?;

    let mut additions = Vec::new();
    let mut listing = Listing::new();

    for relative in relative_paths {
        let path = options.template_dir.join(&relative);

        if !catalog::is_template(&path, &options.extensions) {
            tracing::warn!(path = %path.display(), "ignoring non-template addition");
            continue;
        }

        let doc = match template::load(&path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %relative, error = %e, "could not load addition");
                continue;
            }
        };

        let Some(record) = TemplateRecord::from_document(&doc) else {
            if doc.id().is_some() {
                tracing::warn!(path = %relative, "no info found for template");
            }
            continue;
        };

        let Some(author) = record.author.clone() else {
            tracing::warn!(path = %relative, "no author found for template");
            continue;
        };

        if options.list_cves_in_reverse {
            listing.push(&record);
        } else {
            additions.push(Addition {
                path: relative,
                author,
            });
        }
    }

    if options.list_cves_in_reverse {
        return Ok(Report::Listing(listing.finish(options.top)));
    }
    Ok(Report::Additions(additions))
}

/// Load a template and extract its metadata, logging why it was skipped.
fn read_record(path: &Path, verbose: bool) -> Option<TemplateRecord> {
    let doc = match template::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping template");
            return None;
        }
    };
    let record = TemplateRecord::from_document(&doc);
    if record.is_none() && verbose {
        tracing::info!(path = %path.display(), "skipping document without id or info");
    }
    record
}

fn lint(record: &TemplateRecord, path: &Path, verbose: bool) {
    for advisory in record.advisories() {
        match advisory {
            Advisory::MissingAuthor => {
                tracing::warn!(path = %path.display(), "[lint] {advisory}");
            }
            _ if verbose => {
                tracing::info!(path = %path.display(), "[lint] {advisory}");
            }
            _ => {}
        }
    }
}
