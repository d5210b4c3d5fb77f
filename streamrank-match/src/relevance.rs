/// Temporal relevance of a candidate, in `[0, 1]`.
///
/// An explicit `(YYYY)` year in the scraped title that equals the
/// candidate's release year short-circuits to `1.0`. Otherwise the score is
/// driven by the distance between `reference_year` (normally the current
/// year) and the release year, since trending charts skew towards recent
/// releases. A candidate without a release year contributes nothing.
pub fn relevance(reference_year: i32, release_year: Option<i32>, explicit_year: Option<i32>) -> f64 {
    let Some(release_year) = release_year else {
        return 0.0;
    };
    if explicit_year == Some(release_year) {
        return 1.0;
    }
    recency_score(reference_year.abs_diff(release_year))
}

/// Step table over the distance in years.
///
/// Past ten years the score decays linearly by 0.02 per year from 0.7,
/// bottoming out at 0.3 thirty years back.
fn recency_score(delta: u32) -> f64 {
    match delta {
        0..=1 => 1.0,
        2..=3 => 0.9,
        4..=5 => 0.8,
        6..=10 => 0.7,
        _ => (0.7 - 0.02 * f64::from(delta - 10)).clamp(0.3, 0.7),
    }
}
