//! Resolver behaviour over generated media trees.

mod common;

use assert_matches::assert_matches;
use common::MediaFixture;
use reelshelf::catalog::{CatalogResolver, Listing, NavigationIndexer, PathSanitizer};
use reelshelf_common::{Error, MediaItem};
use std::collections::BTreeSet;
use std::fs;

const SHOWS: &[&str] = &["Alpha", "beta", "Gamma"];
const SEASONS: &[&str] = &["Season1", "Season2"];
const VARIANTS: &[&str] = &["sub", "dub"];

fn episode_paths() -> Vec<String> {
    let mut paths = Vec::new();
    for (s, show) in SHOWS.iter().enumerate() {
        for season in SEASONS {
            for variant in VARIANTS {
                // Uneven episode counts so a mix-up between folders shows up.
                for ep in 0..(s + 2) {
                    paths.push(format!("tv/{show}/{season}/{variant}/ep{ep:02}.mp4"));
                }
            }
        }
    }
    paths
}

fn build_tree() -> MediaFixture {
    let fixture = MediaFixture::new();
    for path in episode_paths() {
        fixture.file(&path);
    }
    // Noise that must never be listed.
    fixture.file("tv/Alpha/Season1/sub/ep00.vtt");
    fixture.file("tv/Alpha/Season1/sub/readme.txt");
    fixture.file("tv/Alpha/Season1/recap.mp4");
    fixture
}

fn episodes(listing: Listing) -> Vec<MediaItem> {
    match listing {
        Listing::EpisodeList { episodes, .. } => episodes,
        other => panic!("expected episode list, got {}", other.kind()),
    }
}

#[test]
fn every_triple_lists_exactly_its_files() {
    let fixture = build_tree();
    let resolver = fixture.resolver();
    let all = episode_paths();

    for show in SHOWS {
        for season in SEASONS {
            for variant in VARIANTS {
                let listed = episodes(resolver.variant(show, season, variant).unwrap());
                let listed_paths: Vec<_> = listed.iter().map(|i| i.path.clone()).collect();
                let unique: BTreeSet<_> = listed_paths.iter().cloned().collect();
                assert_eq!(
                    unique.len(),
                    listed_paths.len(),
                    "duplicates in {show}/{season}/{variant}"
                );

                let prefix = format!("tv/{show}/{season}/{variant}/");
                let expected: BTreeSet<_> = all
                    .iter()
                    .filter(|p| p.starts_with(&prefix))
                    .cloned()
                    .collect();
                assert_eq!(unique, expected, "{prefix}");
            }
        }
    }
}

#[test]
fn navigation_is_a_strict_total_order_per_folder() {
    let fixture = build_tree();
    let resolver = fixture.resolver();
    let indexer = NavigationIndexer::new(resolver.scanner());

    for show in SHOWS {
        let folder_items = episodes(resolver.variant(show, "Season2", "dub").unwrap());
        let contexts: Vec<_> = folder_items
            .iter()
            .map(|item| indexer.locate(item).unwrap())
            .collect();

        assert_eq!(contexts.iter().filter(|c| c.is_first()).count(), 1);
        assert_eq!(contexts.iter().filter(|c| c.is_last()).count(), 1);

        for ctx in &contexts {
            assert_eq!(ctx.total, folder_items.len());
            if let Some(next) = &ctx.next {
                let next_ctx = indexer.locate(next).unwrap();
                let back = next_ctx.previous.as_ref().unwrap();
                assert_eq!(back.path, ctx.siblings[ctx.position].path);
            }
        }
    }
}

#[test]
fn navigation_follows_folder_paths_in_sorted_order() {
    let fixture = build_tree();
    let resolver = fixture.resolver();
    let indexer = NavigationIndexer::new(resolver.scanner());

    for show in SHOWS {
        let prefix = format!("tv/{show}/Season1/sub/");
        let mut expected: Vec<String> = episode_paths()
            .into_iter()
            .filter(|p| p.starts_with(&prefix))
            .collect();
        expected.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });

        for (i, path) in expected.iter().enumerate() {
            let ctx = indexer.locate(&MediaItem::from_relative(path.clone())).unwrap();
            assert_eq!(ctx.position, i, "{path}");
            assert_eq!(ctx.total, expected.len());
            assert_eq!(
                ctx.previous.map(|p| p.path),
                i.checked_sub(1).map(|j| expected[j].clone()),
                "{path}"
            );
            assert_eq!(
                ctx.next.map(|n| n.path),
                expected.get(i + 1).cloned(),
                "{path}"
            );
        }
    }
}

#[test]
fn season_with_variants_never_lists_own_files() {
    let fixture = build_tree();
    let listing = fixture.resolver().season("Alpha", "Season1").unwrap();

    assert_matches!(listing, Listing::VariantList { ref variants, .. } if variants.len() == 2);
    let json = serde_json::to_string(&listing).unwrap();
    assert!(!json.contains("recap"));
}

#[test]
fn item_navigation_ignores_name_collisions_elsewhere() {
    let fixture = MediaFixture::with_files(&[
        "tv/Show/S1/Pilot.mp4",
        "tv/Show/S1/Finale.mp4",
        "zzz/Pilot.mp4",
    ]);
    let resolver = fixture.resolver();

    // Last in walk order wins the flat key.
    let Listing::ItemDetail { item, navigation } = resolver.item("Pilot").unwrap() else {
        panic!("expected item detail");
    };
    assert_eq!(item.path, "zzz/Pilot.mp4");
    assert_eq!(navigation.total, 1);

    let Listing::ItemDetail { navigation, .. } = resolver.item("Finale").unwrap() else {
        panic!("expected item detail");
    };
    assert_eq!(navigation.total, 2);
    assert_eq!(navigation.next.unwrap().path, "tv/Show/S1/Pilot.mp4");
}

#[test]
fn subtitle_changes_are_seen_on_next_request() {
    let fixture = MediaFixture::with_files(&["movies/Inception.mp4"]);
    let resolver = fixture.resolver();

    let subtitle = |resolver: &CatalogResolver| match resolver.item("Inception").unwrap() {
        Listing::ItemDetail { item, .. } => item.subtitle,
        other => panic!("unexpected {}", other.kind()),
    };

    assert_eq!(subtitle(&resolver), None);
    fixture.file("movies/Inception.vtt");
    assert_eq!(subtitle(&resolver).as_deref(), Some("movies/Inception.vtt"));
    fs::rename(
        fixture.root().join("movies/Inception.vtt"),
        fixture.root().join("movies/Inception.en.vtt"),
    )
    .unwrap();
    assert_eq!(subtitle(&resolver), None);
}

#[test]
fn sanitizer_rejects_every_separator_convention() {
    for segment in [
        "..",
        "../x",
        "..\\x",
        "x/..",
        "/etc",
        "\\etc",
        "C:\\Windows",
        "c:",
        "a\0b",
    ] {
        assert_matches!(
            PathSanitizer::check_segment("show", segment),
            Err(Error::InvalidPath { .. }),
            "{segment:?}"
        );
    }
}

#[test]
fn snapshot_index_serves_stale_catalog_until_ttl() {
    let fixture = MediaFixture::with_files(&["movies/A.mp4"]);
    let mut library = fixture.config().library;
    library.cache_ttl_secs = 3600;
    let resolver = CatalogResolver::new(library);

    assert_eq!(resolver.catalog().unwrap().len(), 1);
    fixture.file("movies/B.mp4");
    assert_eq!(resolver.catalog().unwrap().len(), 1);

    resolver.invalidate();
    assert_eq!(resolver.catalog().unwrap().len(), 2);

    // Leaf listings always read the disk.
    fixture.file("tv/Show/ep1.mp4");
    assert_eq!(resolver.show("Show").unwrap().len(), 1);
}
