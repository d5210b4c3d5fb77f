//! Canonical form for scraped and catalog titles.
//!
//! Ranking pages decorate titles inconsistently:
//! ```text
//! The Shawshank Redemption (1994)
//! Stranger Things: Season 4
//! Mirzapur Part 2
//! ```
//! Normalization pulls out an explicit release year, drops punctuation and
//! trailing season/part/volume markers, and lower-cases the rest so titles
//! from both sides compare on content only.

use std::sync::LazyLock;

use regex::Regex;

static PARENTHESIZED_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{4})\)").expect("year regex should compile"));

static TRAILING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:season|part|vol)\s+\d+$").expect("marker regex should compile")
});

/// A title reduced to its comparable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTitle {
    /// Lower-cased title with punctuation, year, and trailing markers removed.
    pub canonical: String,
    /// Year taken from a `(YYYY)` tag in the raw title, if any.
    pub extracted_year: Option<i32>,
}

/// Normalize a raw title.
///
/// # Examples
///
/// ```
/// use streamrank_match::normalize;
///
/// let n = normalize("Jawan (2023)");
/// assert_eq!(n.canonical, "jawan");
/// assert_eq!(n.extracted_year, Some(2023));
///
/// let n = normalize("Stranger Things: Season 4");
/// assert_eq!(n.canonical, "stranger things");
/// assert_eq!(n.extracted_year, None);
/// ```
pub fn normalize(raw: &str) -> NormalizedTitle {
    let (working, extracted_year) = extract_year(raw);

    let filtered: String = working
        .to_lowercase()
        .chars()
        .map(|c| if is_title_char(c) { c } else { ' ' })
        .collect();

    let mut canonical = collapse_whitespace(&filtered);
    // Markers can stack ("Part 2 Season 1"); strip until none remain so a
    // second pass over the output is a no-op.
    while let Some(m) = TRAILING_MARKER.find(&canonical) {
        canonical.truncate(m.start());
    }

    NormalizedTitle {
        canonical: canonical.trim().to_string(),
        extracted_year,
    }
}

/// Remove the first `(YYYY)` tag from a title and return it as a year.
fn extract_year(raw: &str) -> (String, Option<i32>) {
    let Some(caps) = PARENTHESIZED_YEAR.captures(raw) else {
        return (raw.to_string(), None);
    };
    let year = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok());
    let full = caps.get(0).map(|m| m.range());
    match (year, full) {
        (Some(year), Some(range)) => {
            let mut working = String::with_capacity(raw.len());
            working.push_str(&raw[..range.start]);
            working.push(' ');
            working.push_str(&raw[range.end..]);
            (working, Some(year))
        }
        _ => (raw.to_string(), None),
    }
}

fn is_title_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '\''
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_parenthesized_year() {
        let n = normalize("Jawan (2023)");
        assert_eq!(
            n,
            NormalizedTitle {
                canonical: "jawan".to_string(),
                extracted_year: Some(2023),
            }
        );
    }

    #[test]
    fn year_in_the_middle_is_removed() {
        let n = normalize("Dune (2021) Part 1");
        assert_eq!(n.canonical, "dune");
        assert_eq!(n.extracted_year, Some(2021));
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize("Spider-Man: No Way Home").canonical, "spider-man no way home");
        assert_eq!(normalize("Ocean's Eleven!").canonical, "ocean's eleven");
        assert_eq!(normalize("Mission: Impossible").canonical, "mission impossible");
    }

    #[test]
    fn strips_trailing_markers_case_insensitively() {
        assert_eq!(normalize("Stranger Things SEASON 4").canonical, "stranger things");
        assert_eq!(normalize("Mirzapur part 2").canonical, "mirzapur");
        assert_eq!(normalize("Kill Bill Vol. 2").canonical, "kill bill");
    }

    #[test]
    fn stacked_markers_are_all_removed() {
        assert_eq!(normalize("Money Heist Part 5 Season 2").canonical, "money heist");
    }

    #[test]
    fn marker_only_stripped_at_end() {
        assert_eq!(
            normalize("Season 2 of Love").canonical,
            "season 2 of love"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  The   Night\tAgent  ").canonical, "the night agent");
    }

    #[test]
    fn non_year_parentheses_are_just_punctuation() {
        let n = normalize("Kalki 2898 AD (Hindi)");
        assert_eq!(n.canonical, "kalki 2898 ad hindi");
        assert_eq!(n.extracted_year, None);
    }

    #[test]
    fn canonical_form_is_idempotent() {
        let samples = [
            "The Shawshank Redemption (1994)",
            "Stranger Things: Season 4",
            "Money Heist Part 5 Season 2",
            "  Ocean's   Eleven!! ",
            "Kill Bill: Vol. 1",
            "Bhool Bhulaiyaa 3",
            "",
        ];
        for raw in samples {
            let once = normalize(raw);
            let twice = normalize(&once.canonical);
            assert_eq!(twice.canonical, once.canonical, "not idempotent for {raw:?}");
            assert_eq!(twice.extracted_year, None);
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(normalize("Jawan (2023)"), normalize("Jawan (2023)"));
    }
}
