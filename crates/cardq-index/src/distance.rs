//! Edit distance and similarity ranking for completion candidates.

use std::cmp::Ordering;

use strsim::osa_distance;

/// Cost of each unmatched trailing character in [`prefix_distance`].
const TAIL_PENALTY: f32 = 0.01;

/// Case-insensitive optimal string alignment distance.
///
/// Substitution, insertion, deletion, and adjacent transposition each cost 1.
pub fn distance(a: &str, b: &str) -> usize {
    osa_distance(&a.to_lowercase(), &b.to_lowercase())
}

/// Similarity in `0.0..=1.0`, where 1.0 means equal ignoring case.
pub fn similarity(a: &str, b: &str) -> f32 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - distance(a, b) as f32 / longest as f32
}

/// Distance from `a` to the closest prefix of `b`, plus a small charge for
/// the rest of `b`.
///
/// Used to match shortened or truncated names against full ones.
pub fn prefix_distance(a: &str, b: &str) -> f32 {
    let a = a.to_lowercase();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let mut best: Option<(usize, usize)> = None;
    for len in 0..=b.len() {
        let prefix: String = b[..len].iter().collect();
        let d = osa_distance(&a, &prefix);
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, b.len() - len));
        }
    }
    let (d, tail) = best.unwrap_or((0, 0));
    d as f32 + tail as f32 * TAIL_PENALTY
}

/// Ranks `values` by similarity to `value` and keeps at most `max_count`.
///
/// An empty `value` sorts alphabetically ignoring case. Otherwise values sort
/// by descending similarity, keeping input order among equals.
pub fn most_similar<I, S>(values: I, value: &str, max_count: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
    if value.is_empty() {
        values.sort_by_cached_key(|v| v.to_lowercase());
    } else {
        let mut scored: Vec<(f32, String)> =
            values.into_iter().map(|v| (similarity(value, &v), v)).collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        values = scored.into_iter().map(|(_, v)| v).collect();
    }
    values.truncate(max_count);
    values
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transposition_costs_one() {
        assert_eq!(distance("ab", "ba"), 1);
        assert_eq!(distance("fireball", "firebal"), 1);
        assert_eq!(distance("Bolt", "bolt"), 0);
    }

    #[test]
    fn identical_strings_have_zero_distance() {
        for s in ["", "a", "Shivan Dragon", "Молния", "稲妻"] {
            assert_eq!(distance(s, s), 0);
            assert_eq!(similarity(s, s), 1.0);
        }
    }

    #[test]
    fn similarity_is_bounded() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        let s = similarity("rarity", "rare");
        assert!(s > 0.0 && s < 1.0);
    }

    #[test]
    fn prefix_distance_favours_prefixes() {
        assert!(
            prefix_distance("light", "lightning bolt") < prefix_distance("bolt", "lightning bolt")
        );
        assert!(prefix_distance("light", "lightning bolt") < 1.0);
        assert_eq!(prefix_distance("", ""), 0.0);
    }

    #[test]
    fn empty_value_sorts_alphabetically() {
        let ranked = most_similar(["rare", "Common", "mythic", "uncommon"], "", 3);
        assert_eq!(ranked, vec!["Common", "mythic", "rare"]);
    }

    #[test]
    fn ranks_by_similarity_stably() {
        let ranked = most_similar(["uncommon", "rare", "mythic", "rara"], "rar", 10);
        assert_eq!(ranked, vec!["rare", "rara", "uncommon", "mythic"]);
    }
}
