//! Response shapes for every catalog path.

use super::navigation::NavigationContext;
use reelshelf_common::MediaItem;
use serde::Serialize;

/// A link on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingLink {
    pub label: String,
    pub href: String,
}

/// A show directory under the TV root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowNode {
    pub name: String,
    pub path: String,
}

/// A season directory inside a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonNode {
    pub name: String,
    pub path: String,
}

/// A language variant directory inside a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantNode {
    /// Directory name as it appears on disk.
    pub name: String,
    /// Upper-cased name for display, e.g. `SUB`.
    pub label: String,
    pub path: String,
}

impl VariantNode {
    pub fn new(name: String, path: String) -> Self {
        Self {
            label: name.to_uppercase(),
            name,
            path,
        }
    }
}

/// The resolved content for one catalog path.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Landing {
        links: Vec<LandingLink>,
    },
    Catalog {
        items: Vec<MediaItem>,
    },
    CategoryListing {
        category: String,
        items: Vec<MediaItem>,
    },
    ShowList {
        shows: Vec<ShowNode>,
    },
    SeasonList {
        show: String,
        seasons: Vec<SeasonNode>,
    },
    VariantList {
        show: String,
        season: String,
        variants: Vec<VariantNode>,
    },
    EpisodeList {
        show: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        season: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        variant: Option<String>,
        episodes: Vec<MediaItem>,
    },
    ItemDetail {
        item: MediaItem,
        navigation: NavigationContext,
    },
}

impl Listing {
    /// The serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Listing::Landing { .. } => "landing",
            Listing::Catalog { .. } => "catalog",
            Listing::CategoryListing { .. } => "category_listing",
            Listing::ShowList { .. } => "show_list",
            Listing::SeasonList { .. } => "season_list",
            Listing::VariantList { .. } => "variant_list",
            Listing::EpisodeList { .. } => "episode_list",
            Listing::ItemDetail { .. } => "item_detail",
        }
    }

    /// Number of entries listed; 1 for a single item.
    pub fn len(&self) -> usize {
        match self {
            Listing::Landing { links } => links.len(),
            Listing::Catalog { items } | Listing::CategoryListing { items, .. } => items.len(),
            Listing::ShowList { shows } => shows.len(),
            Listing::SeasonList { seasons, .. } => seasons.len(),
            Listing::VariantList { variants, .. } => variants.len(),
            Listing::EpisodeList { episodes, .. } => episodes.len(),
            Listing::ItemDetail { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
