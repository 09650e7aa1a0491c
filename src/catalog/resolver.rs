//! Maps logical browsing paths to listings.

use super::index::CatalogIndex;
use super::listing::{LandingLink, Listing, SeasonNode, ShowNode, VariantNode};
use super::navigation::{sort_items, NavigationIndexer};
use super::sanitizer::{PathSanitizer, ResolvedDir};
use super::scanner::{Catalog, TreeScanner};
use super::subtitles::SubtitleLocator;
use super::{CatalogPath, MEDIA_SEGMENT};
use crate::config::LibraryConfig;
use reelshelf_common::{normalize_category, paths::join_slash, Error, MediaItem, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Resolves catalog paths against one media root.
///
/// All methods block on filesystem reads; async callers should run them on
/// the blocking pool.
pub struct CatalogResolver {
    library: LibraryConfig,
    scanner: TreeScanner,
    sanitizer: PathSanitizer,
    subtitles: SubtitleLocator,
    index: CatalogIndex,
}

impl CatalogResolver {
    pub fn new(library: LibraryConfig) -> Self {
        let scanner = TreeScanner::new(&library.root, library.video_extensions.clone());
        let sanitizer = PathSanitizer::new(&library.root);
        let subtitles = SubtitleLocator::new(&library.root, &library.subtitle_extension);
        let index = CatalogIndex::new(Duration::from_secs(library.cache_ttl_secs));

        if index.is_enabled() {
            info!("Catalog snapshots enabled, ttl {}s", library.cache_ttl_secs);
        }

        Self {
            library,
            scanner,
            sanitizer,
            subtitles,
            index,
        }
    }

    pub fn library(&self) -> &LibraryConfig {
        &self.library
    }

    pub fn scanner(&self) -> &TreeScanner {
        &self.scanner
    }

    /// Parse a raw logical path with this library's TV keyword.
    pub fn parse(&self, raw: &str) -> Result<CatalogPath> {
        CatalogPath::parse(raw, &self.library.tv_dir)
    }

    pub fn resolve(&self, path: &CatalogPath) -> Result<Listing> {
        debug!("Resolving {:?}", path);
        let listing = match path {
            CatalogPath::Root => Ok(self.landing()),
            CatalogPath::All => self.catalog(),
            CatalogPath::Category(category) => self.category(category),
            CatalogPath::Shows => self.shows(),
            CatalogPath::Show { show } => self.show(show),
            CatalogPath::Season { show, season } => self.season(show, season),
            CatalogPath::Variant {
                show,
                season,
                language,
            } => self.variant(show, season, language),
            CatalogPath::Item(key) => self.item(key),
        }?;
        debug!(
            "Resolved {:?} to {} ({} entries)",
            path,
            listing.kind(),
            listing.len()
        );
        Ok(listing)
    }

    /// Static entry points. Never touches the filesystem.
    pub fn landing(&self) -> Listing {
        let tv = &self.library.tv_dir;
        Listing::Landing {
            links: vec![
                LandingLink {
                    label: "Movies".to_string(),
                    href: "/movies".to_string(),
                },
                LandingLink {
                    label: normalize_tv_label(tv),
                    href: format!("/{tv}"),
                },
            ],
        }
    }

    /// Every item in the flat catalog.
    pub fn catalog(&self) -> Result<Listing> {
        let catalog = self.snapshot()?;
        let mut items: Vec<_> = catalog.items().cloned().collect();
        sort_items(&mut items);
        Ok(Listing::Catalog { items })
    }

    /// Items whose top-level directory normalizes to the same label as `raw`.
    pub fn category(&self, raw: &str) -> Result<Listing> {
        let label = normalize_category(raw);
        let mut items = self.snapshot()?.in_category(&label);
        sort_items(&mut items);
        Ok(Listing::CategoryListing {
            category: label,
            items,
        })
    }

    pub fn shows(&self) -> Result<Listing> {
        let tv_dir = &self.library.tv_dir;
        let tv = self
            .sanitizer
            .resolve_dir("", "category", tv_dir)
            .map_err(|e| e.into_leaf("category", tv_dir))?;

        let shows = self
            .list_dirs(&tv, "category", tv_dir)?
            .into_iter()
            .map(|name| ShowNode {
                path: join_slash(&tv.relative, &name),
                name,
            })
            .collect();
        Ok(Listing::ShowList { shows })
    }

    /// Seasons of a show, or the show's own episodes when it has no seasons.
    pub fn show(&self, show: &str) -> Result<Listing> {
        let show_dir = self.show_dir(show)?;

        let seasons = self.list_dirs(&show_dir, "show", show)?;
        if !seasons.is_empty() {
            let seasons = seasons
                .into_iter()
                .map(|name| SeasonNode {
                    path: join_slash(&show_dir.relative, &name),
                    name,
                })
                .collect();
            return Ok(Listing::SeasonList {
                show: show.to_string(),
                seasons,
            });
        }

        let episodes = self.episodes(&show_dir, "show", show)?;
        Ok(Listing::EpisodeList {
            show: show.to_string(),
            season: None,
            variant: None,
            episodes,
        })
    }

    /// Language variants of a season, or its episodes when it has none.
    ///
    /// Once any variant folder exists the season's own files are never listed.
    pub fn season(&self, show: &str, season: &str) -> Result<Listing> {
        let season_dir = self.season_dir(show, season)?;

        let variants: Vec<VariantNode> = self
            .list_dirs(&season_dir, "season", season)?
            .into_iter()
            .filter(|name| self.library.is_variant(name))
            .map(|name| {
                let path = join_slash(&season_dir.relative, &name);
                VariantNode::new(name, path)
            })
            .collect();

        if !variants.is_empty() {
            return Ok(Listing::VariantList {
                show: show.to_string(),
                season: season.to_string(),
                variants,
            });
        }

        let episodes = self.episodes(&season_dir, "season", season)?;
        Ok(Listing::EpisodeList {
            show: show.to_string(),
            season: Some(season.to_string()),
            variant: None,
            episodes,
        })
    }

    /// Episodes of one language variant. Names outside the configured
    /// vocabulary are rejected before the disk is touched.
    pub fn variant(&self, show: &str, season: &str, language: &str) -> Result<Listing> {
        if !self.library.is_variant(language) {
            return Err(Error::not_found("variant", language));
        }

        let season_dir = self.season_dir(show, season)?;
        let variant_dir = self
            .sanitizer
            .resolve_dir(&season_dir.relative, "variant", language)
            .map_err(|e| e.into_leaf("variant", language))?;

        let episodes = self.episodes(&variant_dir, "variant", language)?;
        Ok(Listing::EpisodeList {
            show: show.to_string(),
            season: Some(season.to_string()),
            variant: Some(language.to_string()),
            episodes,
        })
    }

    /// A single item with its subtitle and folder navigation.
    pub fn item(&self, key: &str) -> Result<Listing> {
        let mut item = self
            .snapshot()?
            .get(key)
            .cloned()
            .ok_or_else(|| Error::not_found(MEDIA_SEGMENT, key))?;

        self.subtitles.attach(&mut item);
        let navigation = NavigationIndexer::new(&self.scanner).locate(&item)?;

        Ok(Listing::ItemDetail { item, navigation })
    }

    /// Drop any cached snapshot.
    pub fn invalidate(&self) {
        self.index.invalidate();
    }

    fn snapshot(&self) -> Result<Arc<Catalog>> {
        self.index.get_or_scan(&self.scanner)
    }

    fn show_dir(&self, show: &str) -> Result<ResolvedDir> {
        self.sanitizer
            .resolve_dir(&self.library.tv_dir, "show", show)
            .map_err(|e| e.into_leaf("show", show))
    }

    fn season_dir(&self, show: &str, season: &str) -> Result<ResolvedDir> {
        let show_dir = self.show_dir(show)?;
        self.sanitizer
            .resolve_dir(&show_dir.relative, "season", season)
            .map_err(|e| e.into_leaf("season", season))
    }

    fn list_dirs(&self, dir: &ResolvedDir, entity: &str, id: &str) -> Result<Vec<String>> {
        self.scanner
            .list_dirs(&dir.relative)
            .map_err(|e| e.into_leaf(entity, id))
    }

    fn episodes(&self, dir: &ResolvedDir, entity: &str, id: &str) -> Result<Vec<MediaItem>> {
        let episodes = self
            .scanner
            .list_files(&dir.relative)
            .map_err(|e| e.into_leaf(entity, id))?;
        if episodes.is_empty() {
            return Err(Error::empty_listing("episodes", &dir.relative));
        }
        Ok(episodes)
    }
}

fn normalize_tv_label(tv_dir: &str) -> String {
    if tv_dir.eq_ignore_ascii_case("tv") {
        "TV".to_string()
    } else {
        normalize_category(tv_dir)
    }
}
