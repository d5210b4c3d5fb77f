use serde::{Deserialize, Serialize};

use crate::types::MediaType;

/// Streaming services whose top-10 pages are tracked.
///
/// Centralizes slugs, field names, and the set of ranking categories each
/// service publishes, so the orchestrator never has to match on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Netflix,
    AmazonPrime,
    AppleTv,
    Itunes,
    Google,
    Zee5,
}

/// All platform variants in registration order.
const ALL_PLATFORMS: &[Platform] = &[
    Platform::Netflix,
    Platform::AmazonPrime,
    Platform::AppleTv,
    Platform::Itunes,
    Platform::Google,
    Platform::Zee5,
];

impl Platform {
    /// Slug used in ranking-page URLs, cache keys, and the CLI.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Netflix => "netflix",
            Self::AmazonPrime => "amazon-prime",
            Self::AppleTv => "apple-tv",
            Self::Itunes => "itunes",
            Self::Google => "google",
            Self::Zee5 => "zee5",
        }
    }

    /// Key used for this platform in serialized aggregate payloads.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Netflix => "netflix",
            Self::AmazonPrime => "amazon_prime",
            Self::AppleTv => "apple_tv",
            Self::Itunes => "itunes",
            Self::Google => "google",
            Self::Zee5 => "zee5",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Netflix => "Netflix",
            Self::AmazonPrime => "Amazon Prime Video",
            Self::AppleTv => "Apple TV+",
            Self::Itunes => "iTunes",
            Self::Google => "Google Play",
            Self::Zee5 => "ZEE5",
        }
    }

    /// Ranking categories this platform publishes.
    ///
    /// iTunes and Google Play only chart movies; ZEE5 only publishes a
    /// combined ranking.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Self::Netflix | Self::AppleTv => &[Category::Movies, Category::TvShows],
            Self::AmazonPrime => &[Category::Movies, Category::TvShows, Category::Overall],
            Self::Itunes | Self::Google => &[Category::Movies],
            Self::Zee5 => &[Category::Overall],
        }
    }

    pub fn supports(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }

    /// All accepted names for this platform (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Netflix => &["netflix", "nflx"],
            Self::AmazonPrime => &["amazon-prime", "amazon_prime", "prime", "prime-video", "amazon"],
            Self::AppleTv => &["apple-tv", "apple_tv", "appletv", "apple-tv+"],
            Self::Itunes => &["itunes"],
            Self::Google => &["google", "google-play", "play"],
            Self::Zee5 => &["zee5", "zee"],
        }
    }

    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Error returned when a string cannot be parsed into a `Platform` or `Category`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSourceError {
    #[error("unknown platform: '{0}'")]
    Platform(String),
    #[error("unknown category: '{0}'")]
    Category(String),
}

impl std::str::FromStr for Platform {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| ParseSourceError::Platform(s.to_string()))
    }
}

/// Content grouping within a platform's ranking page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Movies,
    TvShows,
    Overall,
}

const ALL_CATEGORIES: &[Category] = &[Category::Movies, Category::TvShows, Category::Overall];

impl Category {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::TvShows => "tv-shows",
            Self::Overall => "overall",
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::TvShows => "tv_shows",
            Self::Overall => "overall",
        }
    }

    /// Section heading on the ranking page ("TOP 10 Movies", ...).
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Movies => "TOP 10 Movies",
            Self::TvShows => "TOP 10 TV Shows",
            Self::Overall => "TOP 10 Overall",
        }
    }

    /// Catalog media types to search when matching titles from this category.
    ///
    /// The combined ranking mixes films and series, so both pools are searched.
    pub fn media_types(&self) -> &'static [MediaType] {
        match self {
            Self::Movies => &[MediaType::Movie],
            Self::TvShows => &[MediaType::Tv],
            Self::Overall => &[MediaType::Movie, MediaType::Tv],
        }
    }

    pub fn all() -> &'static [Category] {
        ALL_CATEGORIES
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movies" | "movie" | "films" => Ok(Self::Movies),
            "tv-shows" | "tv_shows" | "tv" | "shows" | "series" => Ok(Self::TvShows),
            "overall" | "all" | "combined" => Ok(Self::Overall),
            _ => Err(ParseSourceError::Category(s.to_string())),
        }
    }
}
