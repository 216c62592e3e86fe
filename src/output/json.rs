use serde::Serialize;

use crate::error::Result;

/// Render any report section as pretty-printed JSON with a trailing newline.
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{AggregatedOutput, RankedEntry};
    use serde_json::Value;

    #[test]
    fn absent_and_empty_dimensions_are_omitted() {
        let output = AggregatedOutput {
            tags: Some(vec![RankedEntry {
                name: "xss".into(),
                count: 2,
            }]),
            severity: Some(vec![]),
            ..Default::default()
        };
        let value: Value = serde_json::from_str(&render(&output).unwrap()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(value["tags"][0]["name"], "xss");
        assert_eq!(value["tags"][0]["count"], 2);
        assert!(object.get("severity").is_none());
        assert!(object.get("authors").is_none());
    }
}
