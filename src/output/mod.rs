pub mod json;
pub mod lines;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::listing::{Addition, Listing, ListingField};
use crate::stats::AggregatedOutput;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

/// Render ranked dimensions.
pub fn render_stats(output: &AggregatedOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::render(output)),
        OutputFormat::Json => json::render(output),
    }
}

/// Render a finished listing, one line per entry.
pub fn render_listing(
    listing: &Listing,
    fields: &[ListingField],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(listing
            .entries()
            .map(|entry| lines::listing_line(entry, fields))
            .collect()),
        OutputFormat::Json => json::render(listing),
    }
}

/// Render attributed template additions.
pub fn render_additions(additions: &[Addition], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(additions.iter().map(lines::addition_line).collect()),
        OutputFormat::Json => json::render(&additions),
    }
}
