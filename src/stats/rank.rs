use serde::{Deserialize, Serialize};

use super::FrequencyTable;

/// One row of a ranked dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: usize,
}

/// Order a table by count, highest first, keeping at most `top` entries.
///
/// `top == 0` keeps everything. Equal counts keep the table's label order.
pub fn rank(table: &FrequencyTable, top: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = table
        .iter()
        .map(|(name, count)| RankedEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    if top > 0 {
        entries.truncate(top);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn table(pairs: &[(&str, usize)]) -> FrequencyTable {
        let mut table = FrequencyTable::default();
        for (label, count) in pairs {
            for _ in 0..*count {
                table.increment(label);
            }
        }
        table
    }

    fn entry(name: &str, count: usize) -> RankedEntry {
        RankedEntry {
            name: name.into(),
            count,
        }
    }

    #[test]
    fn zero_top_keeps_everything() {
        let ranked = rank(&table(&[("a", 1), ("b", 3), ("c", 2)]), 0);
        assert_eq!(ranked, vec![entry("b", 3), entry("c", 2), entry("a", 1)]);
    }

    #[test]
    fn top_truncates_after_sorting() {
        let ranked = rank(&table(&[("a", 1), ("b", 3), ("c", 2)]), 2);
        assert_eq!(ranked, vec![entry("b", 3), entry("c", 2)]);
    }

    #[test]
    fn top_larger_than_table_returns_all() {
        assert_eq!(rank(&table(&[("a", 1)]), 10).len(), 1);
    }

    #[test]
    fn empty_table_ranks_empty() {
        assert!(rank(&FrequencyTable::default(), 0).is_empty());
        assert!(rank(&FrequencyTable::default(), 3).is_empty());
    }

    proptest! {
        #[test]
        fn ranked_is_prefix_of_full_sort(
            counts in proptest::collection::btree_map("[a-z]{1,4}", 1usize..20, 0..30),
            top in 0usize..40,
        ) {
            let mut t = FrequencyTable::default();
            for (label, count) in &counts {
                for _ in 0..*count {
                    t.increment(label);
                }
            }
            let full = rank(&t, 0);
            let limited = rank(&t, top);

            prop_assert_eq!(full.len(), counts.len());
            prop_assert!(full.windows(2).all(|w| w[0].count >= w[1].count));
            let expected = if top == 0 { counts.len() } else { top.min(counts.len()) };
            prop_assert_eq!(limited.len(), expected);
            prop_assert_eq!(&full[..expected], &limited[..]);
        }
    }
}
