use streamrank_core::Candidate;

use crate::normalize::normalize;

/// Sequence-alignment similarity between two normalized strings, in `[0, 1]`.
///
/// Defined as `2 * LCS(a, b) / (|a| + |b|)` over Unicode scalar values, where
/// LCS is the longest common subsequence. Symmetric, exactly `1.0` only for
/// identical strings and `0.0` when no character appears in common order.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let common = lcs_len(&a, &b);
    (2 * common) as f64 / total as f64
}

/// Best similarity of `query` against either of a candidate's titles.
///
/// Both catalog titles are normalized the same way as the scraped title
/// before comparison, so international releases listed under their
/// original-language name can still match.
pub fn title_similarity(query: &str, candidate: &Candidate) -> f64 {
    let primary = similarity(query, &normalize(&candidate.primary_title).canonical);
    if candidate.original_title.is_empty() || candidate.original_title == candidate.primary_title
    {
        return primary;
    }
    let original = similarity(query, &normalize(&candidate.original_title).canonical);
    primary.max(original)
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamrank_core::MediaType;

    fn candidate(primary: &str, original: &str) -> Candidate {
        Candidate {
            catalog_id: 1,
            media_type: MediaType::Movie,
            primary_title: primary.to_string(),
            original_title: original.to_string(),
            release_year: None,
            popularity_count: 0,
            poster_ref: None,
        }
    }

    #[test]
    fn reflexive() {
        for s in ["jawan", "the night agent", "", "spider-man"] {
            assert_eq!(similarity(s, s), 1.0);
        }
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("jawan", "jawaan"),
            ("the crown", "crown"),
            ("pushpa 2 the rule", "pushpa the rise"),
            ("abc", "xyz"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", "xyz"), 0.0);
    }

    #[test]
    fn partial_overlap() {
        // LCS("abcd", "abd") = 3 -> 6 / 7
        let s = similarity("abcd", "abd");
        assert!((s - 6.0 / 7.0).abs() < 1e-12);
        assert!(s < 1.0);
    }

    #[test]
    fn order_matters() {
        // Same characters, reversed: LCS is 1.
        let s = similarity("abc", "cba");
        assert!((s - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn uses_best_of_primary_and_original_title() {
        let c = candidate("Money Heist", "La casa de papel");
        assert_eq!(title_similarity("la casa de papel", &c), 1.0);
        assert_eq!(title_similarity("money heist", &c), 1.0);
    }

    #[test]
    fn candidate_titles_are_normalized() {
        let c = candidate("Spider-Man: No Way Home", "Spider-Man: No Way Home");
        assert_eq!(title_similarity("spider-man no way home", &c), 1.0);
    }
}
