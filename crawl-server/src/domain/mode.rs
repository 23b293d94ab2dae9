//! Crawl selection modes.

use std::fmt;

/// How venues are chosen and ordered.
///
/// The first three modes pick venues around seed points on the straight line
/// between start and end and differ only in scoring. `ShortestCorridor`
/// collects venues along the walking route itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Best-rated venues, shrunk towards a neutral prior by review count.
    #[default]
    Rating,
    /// Cheapest venues.
    Price,
    /// Rating penalised by price.
    Mixed,
    /// Venues within a corridor around the direct walking route.
    ShortestCorridor,
}

impl Mode {
    /// Parse a wire name, falling back to [`Mode::Rating`] for anything
    /// unrecognised.
    ///
    /// ```
    /// use crawl_server::domain::Mode;
    ///
    /// assert_eq!(Mode::parse_lenient("shortest"), Mode::ShortestCorridor);
    /// assert_eq!(Mode::parse_lenient("cheapest"), Mode::Rating);
    /// ```
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "price" => Mode::Price,
            "mixed" => Mode::Mixed,
            "shortest" => Mode::ShortestCorridor,
            _ => Mode::Rating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Rating => "rating",
            Mode::Price => "price",
            Mode::Mixed => "mixed",
            Mode::ShortestCorridor => "shortest",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
