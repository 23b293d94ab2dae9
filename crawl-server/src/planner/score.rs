//! Venue scoring.
//!
//! Raw averages are misleading for venues with a handful of reviews, so the
//! rating is shrunk towards a neutral prior with a weight that grows with the
//! review count (a Bayesian average).

use crate::domain::{Mode, Venue};

/// Rating that venues with few reviews are pulled towards.
pub const NEUTRAL_RATING: f64 = 3.5;

/// Weights used by [`score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Pseudo-count of neutral reviews added to every venue.
    pub confidence_prior: f64,
    /// Score lost per price tier in [`Mode::Mixed`].
    pub mixed_price_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            confidence_prior: 50.0,
            mixed_price_weight: 0.3,
        }
    }
}

/// Rating shrunk towards [`NEUTRAL_RATING`].
///
/// A venue with no rating scores 0 however many reviews it claims.
///
/// ```
/// use crawl_server::planner::weighted_score;
///
/// assert_eq!(weighted_score(0.0, 1000, 50.0), 0.0);
/// // No reviews: all prior
/// assert_eq!(weighted_score(5.0, 0, 50.0), 3.5);
/// // As many reviews as the prior: halfway
/// assert_eq!(weighted_score(4.5, 50, 50.0), 4.0);
/// ```
pub fn weighted_score(rating: f64, review_count: u32, confidence_prior: f64) -> f64 {
    if rating == 0.0 || rating.is_nan() {
        return 0.0;
    }

    let votes = f64::from(review_count);
    let total = votes + confidence_prior;
    if total <= 0.0 {
        return rating;
    }

    (votes / total) * rating + (confidence_prior / total) * NEUTRAL_RATING
}

/// Comparable score for a venue under `mode`. Higher is better.
///
/// [`Mode::ShortestCorridor`] ranks by rating.
pub fn score(venue: &Venue, mode: Mode, weights: &ScoreWeights) -> f64 {
    let price = f64::from(venue.price_tier_or_default());

    match mode {
        Mode::Price => -price,
        Mode::Mixed => {
            weighted_score(venue.rating, venue.review_count, weights.confidence_prior)
                - weights.mixed_price_weight * price
        }
        Mode::Rating | Mode::ShortestCorridor => {
            weighted_score(venue.rating, venue.review_count, weights.confidence_prior)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn venue(rating: f64, reviews: u32, price: Option<u8>) -> Venue {
        let mut v = Venue::new("v", "V", Coordinate::new(0.0, 0.0)).with_rating(rating, reviews);
        v.price_tier = price;
        v
    }

    #[test]
    fn no_rating_scores_zero() {
        for reviews in [0, 1, 50, 10_000] {
            assert_eq!(weighted_score(0.0, reviews, 50.0), 0.0);
        }
    }

    #[test]
    fn many_reviews_approach_raw_rating() {
        let s = weighted_score(4.8, 1_000_000, 50.0);
        assert!((s - 4.8).abs() < 1e-3);
    }

    #[test]
    fn review_count_breaks_rating_ties() {
        // Same average, more reviews wins when above the prior
        assert!(weighted_score(4.5, 500, 50.0) > weighted_score(4.5, 10, 50.0));
        // ...and loses when below it
        assert!(weighted_score(2.0, 500, 50.0) < weighted_score(2.0, 10, 50.0));
    }

    #[test]
    fn zero_prior_returns_raw_rating() {
        assert_eq!(weighted_score(4.2, 0, 0.0), 4.2);
    }

    #[test]
    fn price_mode_prefers_cheaper() {
        let w = ScoreWeights::default();
        let cheap = venue(3.0, 10, Some(2));
        let pricey = venue(3.0, 10, Some(4));

        assert!(score(&cheap, Mode::Price, &w) > score(&pricey, Mode::Price, &w));
        assert_eq!(score(&cheap, Mode::Price, &w), -2.0);
    }

    #[test]
    fn price_mode_ignores_rating() {
        let w = ScoreWeights::default();
        assert_eq!(
            score(&venue(5.0, 900, Some(1)), Mode::Price, &w),
            score(&venue(1.0, 3, Some(1)), Mode::Price, &w)
        );
    }

    #[test]
    fn missing_price_counts_as_two() {
        let w = ScoreWeights::default();
        assert_eq!(score(&venue(0.0, 0, None), Mode::Price, &w), -2.0);
        assert_eq!(
            score(&venue(4.0, 50, None), Mode::Mixed, &w),
            score(&venue(4.0, 50, Some(2)), Mode::Mixed, &w)
        );
    }

    #[test]
    fn mixed_mode_penalises_price() {
        let w = ScoreWeights::default();
        let v = venue(4.5, 50, Some(3));
        let expected = 4.0 - 0.3 * 3.0;
        assert!((score(&v, Mode::Mixed, &w) - expected).abs() < 1e-12);
    }

    #[test]
    fn rating_and_corridor_modes_agree() {
        let w = ScoreWeights::default();
        let v = venue(4.1, 230, Some(3));
        assert_eq!(score(&v, Mode::Rating, &w), score(&v, Mode::ShortestCorridor, &w));
        assert_eq!(score(&v, Mode::Rating, &w), weighted_score(4.1, 230, 50.0));
    }
}
