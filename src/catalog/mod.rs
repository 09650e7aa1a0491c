//! Media catalog resolution.
//!
//! Turns a logical browsing path such as `/tv/Show/Season1/sub` into a
//! [`Listing`] by reading the media tree. The tree is read on demand; see
//! [`index::CatalogIndex`] for the optional snapshot.

pub mod index;
pub mod listing;
pub mod navigation;
pub mod resolver;
pub mod sanitizer;
pub mod scanner;
pub mod subtitles;

pub use index::CatalogIndex;
pub use listing::{LandingLink, Listing, SeasonNode, ShowNode, VariantNode};
pub use navigation::{compare_locale, NavigationContext, NavigationIndexer};
pub use resolver::CatalogResolver;
pub use sanitizer::{PathSanitizer, ResolvedDir};
pub use scanner::{Catalog, TreeScanner};
pub use subtitles::SubtitleLocator;

use reelshelf_common::Error;
use std::fmt;
use std::str::FromStr;

/// Literal first segment of the flat catalog and item routes.
pub const MEDIA_SEGMENT: &str = "media";

/// A parsed logical browsing path.
///
/// Show, season, and language segments are kept raw here; they are only
/// trusted after the sanitizer has seen them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPath {
    Root,
    All,
    Category(String),
    Shows,
    Show {
        show: String,
    },
    Season {
        show: String,
        season: String,
    },
    Variant {
        show: String,
        season: String,
        language: String,
    },
    Item(String),
}

impl CatalogPath {
    /// Parse a path using `tv_dir` as the TV keyword.
    pub fn parse(raw: &str, tv_dir: &str) -> Result<Self, Error> {
        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();

        let path = match segments.as_slice() {
            [] => Self::Root,
            [media] if *media == MEDIA_SEGMENT => Self::All,
            [media, key] if *media == MEDIA_SEGMENT => Self::Item(key.to_string()),
            [tv] if *tv == tv_dir => Self::Shows,
            [tv, show] if *tv == tv_dir => Self::Show {
                show: show.to_string(),
            },
            [tv, show, season] if *tv == tv_dir => Self::Season {
                show: show.to_string(),
                season: season.to_string(),
            },
            [tv, show, season, language] if *tv == tv_dir => Self::Variant {
                show: show.to_string(),
                season: season.to_string(),
                language: language.to_string(),
            },
            [category] => Self::Category(category.to_string()),
            _ => return Err(Error::not_found("path", raw)),
        };
        Ok(path)
    }
}

impl FromStr for CatalogPath {
    type Err = Error;

    /// Parse with the default `tv` keyword.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, "tv")
    }
}

/// Renders with the default `tv` keyword.
impl fmt::Display for CatalogPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "/"),
            Self::All => write!(f, "/{MEDIA_SEGMENT}"),
            Self::Category(category) => write!(f, "/{category}"),
            Self::Shows => write!(f, "/tv"),
            Self::Show { show } => write!(f, "/tv/{show}"),
            Self::Season { show, season } => write!(f, "/tv/{show}/{season}"),
            Self::Variant {
                show,
                season,
                language,
            } => write!(f, "/tv/{show}/{season}/{language}"),
            Self::Item(key) => write!(f, "/{MEDIA_SEGMENT}/{key}"),
        }
    }
}
