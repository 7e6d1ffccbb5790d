use crate::models::{PairedRatingSample, UserRatings};

/// Pairs up the scores of every movie both users rated
///
/// Walks the second user's ratings and looks each movie up in the first
/// user's map. Emission order follows the second user's map and carries no meaning.
pub fn paired_samples(first: &UserRatings, second: &UserRatings) -> Vec<PairedRatingSample> {
    second
        .ratings
        .iter()
        .filter_map(|(movie_id, &score)| {
            first.score(*movie_id).map(|own| PairedRatingSample {
                first: own,
                second: score,
            })
        })
        .collect()
}

/// Pearson correlation between two users over the movies they both rated
///
/// Returns a value in [-1.0, 1.0]. Users with no movie in common get `0.0`,
/// which is indistinguishable from a genuine zero correlation.
pub fn similarity(first: &UserRatings, second: &UserRatings) -> f64 {
    let samples = paired_samples(first, second);
    if samples.is_empty() {
        return 0.0;
    }
    pearson(&samples)
}

/// Pearson product-moment correlation coefficient of paired scores
///
/// `r = (nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`
///
/// Sums are accumulated as `i128`, so the numerator and both variance terms
/// are exact for any `i32` scores and only the final division rounds. A series
/// without variance (including any single sample) yields `0.0`.
pub fn pearson(samples: &[PairedRatingSample]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let n = samples.len() as i128;
    let (sum_x, sum_y, sum_xy, sum_xx, sum_yy) = samples.iter().fold(
        (0i128, 0i128, 0i128, 0i128, 0i128),
        |(sx, sy, sxy, sxx, syy), s| {
            let x = i128::from(s.first);
            let y = i128::from(s.second);
            (sx + x, sy + y, sxy + x * y, sxx + x * x, syy + y * y)
        },
    );

    let numerator = n * sum_xy - sum_x * sum_y;
    let spread_x = n * sum_xx - sum_x * sum_x;
    let spread_y = n * sum_yy - sum_y * sum_y;

    if spread_x == 0 || spread_y == 0 {
        return 0.0;
    }

    let r = numerator as f64 / ((spread_x as f64) * (spread_y as f64)).sqrt();
    r.clamp(-1.0, 1.0)
}
