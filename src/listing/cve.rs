use std::cmp::Ordering;

use super::ListingEntry;

/// Year and sequence number of a `CVE-<year>-<sequence>` identifier.
pub fn parse_cve_id(id: &str) -> Option<(u64, u64)> {
    let mut parts = id.split('-').skip(1);
    let year = parts.next()?.parse().ok()?;
    let sequence = parts.next()?.parse().ok()?;
    Some((year, sequence))
}

/// Most recent CVE first: year descending, then sequence descending.
///
/// Two identifiers that do not parse compare as strings, descending.
/// A parseable identifier always sorts ahead of one that does not, which
/// keeps the order total when both kinds are mixed.
pub fn compare_cve_ids(a: &str, b: &str) -> Ordering {
    match (parse_cve_id(a), parse_cve_id(b)) {
        (Some(a_key), Some(b_key)) => b_key.cmp(&a_key),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}

/// Sort CVE entries newest first.
pub fn sort_newest_first(entries: &mut [ListingEntry]) {
    entries.sort_by(|a, b| compare_cve_ids(&a.id, &b.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sorted(ids: &[&str]) -> Vec<String> {
        let mut ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        ids.sort_by(|a, b| compare_cve_ids(a, b));
        ids
    }

    #[test]
    fn newer_year_first() {
        assert_eq!(
            sorted(&["CVE-2021-9999", "CVE-2023-1234"]),
            vec!["CVE-2023-1234", "CVE-2021-9999"]
        );
    }

    #[test]
    fn sequence_compared_numerically() {
        assert_eq!(
            sorted(&["CVE-2021-999", "CVE-2021-10000", "CVE-2021-1000"]),
            vec!["CVE-2021-10000", "CVE-2021-1000", "CVE-2021-999"]
        );
    }

    #[test]
    fn malformed_ids_fall_back_to_string_order() {
        assert_eq!(sorted(&["CVE-a", "CVE-b"]), vec!["CVE-b", "CVE-a"]);
        assert_eq!(
            compare_cve_ids("CVE-2021-abc", "CVE-2021-abd"),
            Ordering::Greater
        );
        assert_eq!(compare_cve_ids("CVE-2021", "CVE-2021"), Ordering::Equal);
    }

    #[test]
    fn parseable_ids_precede_malformed() {
        assert_eq!(
            sorted(&["CVE-2023-abc", "CVE-2001-0001"]),
            vec!["CVE-2001-0001", "CVE-2023-abc"]
        );
    }

    #[test]
    fn parse_ignores_trailing_segments() {
        assert_eq!(parse_cve_id("CVE-2022-0001-extra"), Some((2022, 1)));
        assert_eq!(parse_cve_id("CVE-2022"), None);
        assert_eq!(parse_cve_id("CVE"), None);
    }

    proptest! {
        #[test]
        fn well_formed_sort_matches_year_sequence(
            keys in proptest::collection::vec((1999u64..2030, 0u64..100_000), 0..40),
        ) {
            let mut ids: Vec<String> = keys
                .iter()
                .map(|(y, s)| format!("CVE-{y}-{s:04}"))
                .collect();
            ids.sort_by(|a, b| compare_cve_ids(a, b));
            let parsed: Vec<(u64, u64)> = ids.iter().filter_map(|id| parse_cve_id(id)).collect();

            let mut expected = keys.clone();
            expected.sort_by(|a, b| b.cmp(a));
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn malformed_sort_matches_reverse_string_order(
            ids in proptest::collection::vec("CVE-[a-z]{1,6}", 0..30),
        ) {
            let mut actual = ids.clone();
            actual.sort_by(|a, b| compare_cve_ids(a, b));
            let mut expected = ids;
            expected.sort_by(|a, b| b.cmp(a));
            prop_assert_eq!(actual, expected);
        }
    }
}
