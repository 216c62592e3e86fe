use crate::listing::{Addition, ListingEntry, ListingField};

/// `@`-prefixed author handles from a raw comma-separated author field.
pub fn mentions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(|author| {
            if author.starts_with('@') {
                author.to_string()
            } else {
                format!("@{author}")
            }
        })
        .collect()
}

/// `[<id>] <name>` followed by the requested fields, in the order requested.
pub fn listing_line(entry: &ListingEntry, fields: &[ListingField]) -> String {
    let mut line = format!("[{}] {}", entry.id, entry.name);
    for field in fields {
        match field {
            ListingField::Author => {
                let handles = mentions(&entry.author);
                if !handles.is_empty() {
                    line.push_str(&format!(" ({})", handles.join(", ")));
                }
            }
            ListingField::Severity => line.push_str(&format!(" [{}]", entry.severity)),
        }
    }
    line.push('\n');
    line
}

/// `- <path> by @a,@b`
pub fn addition_line(addition: &Addition) -> String {
    format!(
        "- {} by {}\n",
        addition.path,
        mentions(&addition.author).join(",")
    )
}
