use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use super::loader::Repository;
use super::model::LegoSet;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Aggregations over a loaded slice of sets
// ---------------------------------------------------------------------------

/// Whether at least one set has no subtheme.
pub fn has_set_without_subtheme(sets: &[LegoSet]) -> bool {
    sets.iter().any(|set| set.subtheme.is_none())
}

/// Distinct tags of the sets whose name starts with `prefix`, sorted ascending
/// by UTF-16 code units.
///
/// The prefix match is case-sensitive. Sets without tags contribute nothing.
pub fn distinct_tags_starting_with(sets: &[LegoSet], prefix: &str) -> Vec<String> {
    let mut tags: Vec<String> = sets
        .iter()
        .filter(|set| set.name.starts_with(prefix))
        .filter_map(|set| set.tags.as_ref())
        .flatten()
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect();
    tags.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    tags
}

/// Write [`distinct_tags_starting_with`] to `out`, one tag per line.
pub fn print_distinct_tags_starting_with<W: Write>(
    sets: &[LegoSet],
    prefix: &str,
    out: &mut W,
) -> io::Result<()> {
    for tag in distinct_tags_starting_with(sets, prefix) {
        writeln!(out, "{tag}")?;
    }
    Ok(())
}

/// Sum of all piece counts; sets without a count add nothing.
pub fn total_pieces(sets: &[LegoSet]) -> u64 {
    sets.iter().filter_map(|set| set.pieces).map(u64::from).sum()
}

/// Number of sets per theme.
pub fn count_by_theme(sets: &[LegoSet]) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for set in sets {
        *counts.entry(set.theme_key().to_owned()).or_default() += 1;
    }
    counts
}

/// Longest set name per theme, measured in UTF-16 code units.
///
/// On equal length the name seen first in source order wins: a later name
/// only replaces the current one when it is strictly longer.
pub fn longest_name_by_theme(sets: &[LegoSet]) -> BTreeMap<String, String> {
    let mut longest: BTreeMap<String, (usize, &str)> = BTreeMap::new();
    for set in sets {
        let name = set.name.as_str();
        let len = name.encode_utf16().count();
        longest
            .entry(set.theme_key().to_owned())
            .and_modify(|best| {
                if len > best.0 {
                    *best = (len, name);
                }
            })
            .or_insert((len, name));
    }
    longest
        .into_iter()
        .map(|(theme, (_, name))| (theme, name.to_owned()))
        .collect()
}

/// Look up a grouping result, turning a missing key into [`Error::MissingKey`].
pub fn lookup<'a, V>(map: &'a BTreeMap<String, V>, key: &str) -> Result<&'a V> {
    map.get(key).ok_or_else(|| Error::MissingKey(key.to_owned()))
}

// ---------------------------------------------------------------------------
// Repository conveniences
// ---------------------------------------------------------------------------

impl Repository<LegoSet> {
    pub fn has_set_without_subtheme(&self) -> bool {
        has_set_without_subtheme(self.all())
    }

    pub fn distinct_tags_starting_with(&self, prefix: &str) -> Vec<String> {
        distinct_tags_starting_with(self.all(), prefix)
    }

    pub fn print_distinct_tags_starting_with<W: Write>(
        &self,
        prefix: &str,
        out: &mut W,
    ) -> io::Result<()> {
        print_distinct_tags_starting_with(self.all(), prefix, out)
    }

    pub fn total_pieces(&self) -> u64 {
        total_pieces(self.all())
    }

    pub fn count_by_theme(&self) -> BTreeMap<String, u64> {
        count_by_theme(self.all())
    }

    pub fn longest_name_by_theme(&self) -> BTreeMap<String, String> {
        longest_name_by_theme(self.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UNKNOWN_THEME;

    fn sample_sets() -> Vec<LegoSet> {
        vec![
            LegoSet::new("Fire Truck", "City").with_tags(["vehicle", "rescue"]),
            LegoSet::new("Farm House", "Duplo").with_tags(["rescue", "house"]),
            LegoSet::new("Castle", "City").with_pieces(500),
        ]
    }

    #[test]
    fn test_has_set_without_subtheme() {
        assert!(has_set_without_subtheme(&sample_sets()));

        let all_with_subtheme = vec![
            LegoSet::new("Fire Truck", "City").with_subtheme("Fire"),
            LegoSet::new("Castle", "Castle").with_subtheme("Kingdoms"),
        ];
        assert!(!has_set_without_subtheme(&all_with_subtheme));
    }

    #[test]
    fn test_has_set_without_subtheme_empty() {
        assert!(!has_set_without_subtheme(&[]));
    }

    #[test]
    fn test_distinct_tags_sorted_and_deduplicated() {
        assert_eq!(
            distinct_tags_starting_with(&sample_sets(), "F"),
            vec!["house", "rescue", "vehicle"]
        );
    }

    #[test]
    fn test_distinct_tags_prefix_is_case_sensitive() {
        assert!(distinct_tags_starting_with(&sample_sets(), "f").is_empty());
        assert_eq!(
            distinct_tags_starting_with(&sample_sets(), "Fire"),
            vec!["rescue", "vehicle"]
        );
    }

    #[test]
    fn test_distinct_tags_skips_sets_without_tags() {
        let sets = vec![
            LegoSet::new("Castle", "City").with_pieces(500),
            LegoSet::new("Castle Siege", "Castle").with_tags(["medieval"]),
        ];
        assert_eq!(distinct_tags_starting_with(&sets, "Castle"), vec!["medieval"]);
    }

    #[test]
    fn test_print_distinct_tags() {
        let mut out: Vec<u8> = Vec::new();
        print_distinct_tags_starting_with(&sample_sets(), "F", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "house\nrescue\nvehicle\n");
    }

    #[test]
    fn test_print_distinct_tags_no_match_prints_nothing() {
        let mut out: Vec<u8> = Vec::new();
        print_distinct_tags_starting_with(&sample_sets(), "Z", &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_total_pieces() {
        let mut sets = sample_sets();
        assert_eq!(total_pieces(&sets), 500);
        sets.push(LegoSet::new("Tower", "Castle").with_pieces(1200));
        assert_eq!(total_pieces(&sets), 1700);
        assert_eq!(total_pieces(&[]), 0);
    }

    #[test]
    fn test_total_pieces_does_not_overflow_u32() {
        let sets = vec![
            LegoSet::new("A", "X").with_pieces(u32::MAX),
            LegoSet::new("B", "X").with_pieces(u32::MAX),
        ];
        assert_eq!(total_pieces(&sets), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_count_by_theme() {
        let counts = count_by_theme(&sample_sets());
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["City"], 2);
        assert_eq!(counts["Duplo"], 1);
    }

    #[test]
    fn test_count_by_theme_groups_missing_theme_as_unknown() {
        let mut orphan = LegoSet::new("Mystery Box", "ignored");
        orphan.theme = None;
        let counts = count_by_theme(&[orphan]);
        assert_eq!(counts[UNKNOWN_THEME], 1);
    }

    #[test]
    fn test_longest_name_by_theme() {
        let longest = longest_name_by_theme(&sample_sets());
        assert_eq!(longest["City"], "Fire Truck");
        assert_eq!(longest["Duplo"], "Farm House");
    }

    #[test]
    fn test_longest_name_tie_keeps_first_seen() {
        let sets = vec![
            LegoSet::new("Abc", "City"),
            LegoSet::new("Xy", "City"),
            LegoSet::new("Def", "City"),
            LegoSet::new("Ghi", "City"),
        ];
        assert_eq!(longest_name_by_theme(&sets)["City"], "Abc");

        let reordered = vec![
            LegoSet::new("Ghi", "City"),
            LegoSet::new("Abc", "City"),
            LegoSet::new("Def", "City"),
        ];
        assert_eq!(longest_name_by_theme(&reordered)["City"], "Ghi");
    }

    #[test]
    fn test_longest_name_counts_utf16_units_not_bytes() {
        // "Café Corner" is 11 UTF-16 units but 12 bytes.
        let sets = vec![
            LegoSet::new("Town Square", "Creator"),
            LegoSet::new("Café Corner", "Creator"),
        ];
        assert_eq!(longest_name_by_theme(&sets)["Creator"], "Town Square");
    }

    #[test]
    fn test_longest_name_counts_surrogate_pairs_as_two() {
        // U+1F600 takes two UTF-16 units, so both names have length 4.
        let sets = vec![
            LegoSet::new("ab\u{1F600}", "City"),
            LegoSet::new("abcd", "City"),
        ];
        assert_eq!(longest_name_by_theme(&sets)["City"], "ab\u{1F600}");
    }

    #[test]
    fn test_distinct_tags_sorted_by_utf16_units() {
        // U+1F600 encodes as 0xD83D 0xDE00, which sorts before U+FF5E.
        let sets = vec![LegoSet::new("Fun Pack", "City").with_tags(["\u{FF5E}", "\u{1F600}", "a"])];
        assert_eq!(
            distinct_tags_starting_with(&sets, "F"),
            vec!["a", "\u{1F600}", "\u{FF5E}"]
        );
    }

    #[test]
    fn test_longest_name_groups_missing_theme_as_unknown() {
        let mut orphan = LegoSet::new("Mystery Box", "ignored");
        orphan.theme = None;
        let sets = vec![
            LegoSet::new("Box", UNKNOWN_THEME),
            orphan,
            LegoSet::new("Fire Truck", "City"),
        ];
        let longest = longest_name_by_theme(&sets);
        assert_eq!(longest.len(), 2);
        assert_eq!(longest[UNKNOWN_THEME], "Mystery Box");
        assert_eq!(count_by_theme(&sets)[UNKNOWN_THEME], 2);
    }

    #[test]
    fn test_lookup() {
        let counts = count_by_theme(&sample_sets());
        assert_eq!(*lookup(&counts, "City").unwrap(), 2);
        match lookup(&counts, "Technic") {
            Err(Error::MissingKey(key)) => assert_eq!(key, "Technic"),
            other => panic!("Expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_repository_methods_delegate() {
        let repo = Repository::from_records(sample_sets());
        assert!(repo.has_set_without_subtheme());
        assert_eq!(repo.total_pieces(), 500);
        assert_eq!(repo.count_by_theme()["City"], 2);
        assert_eq!(repo.longest_name_by_theme()["City"], "Fire Truck");
        assert_eq!(repo.distinct_tags_starting_with("F").len(), 3);

        let mut out: Vec<u8> = Vec::new();
        repo.print_distinct_tags_starting_with("F", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "house\nrescue\nvehicle\n");
    }
}
