use reelshelf_common::paths::DEFAULT_SUBTITLE_EXTENSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Presentation assets served for any route the API does not claim
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Media root directory
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Extensions treated as playable (case-insensitive)
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    /// Extension of sidecar subtitle files
    #[serde(default = "default_subtitle_extension")]
    pub subtitle_extension: String,

    /// Top-level directory holding TV shows
    #[serde(default = "default_tv_dir")]
    pub tv_dir: String,

    /// Season subdirectory names treated as language variants (case-insensitive)
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,

    /// Lifetime of the in-memory catalog snapshot; 0 rescans on every request
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

fn default_root() -> PathBuf {
    PathBuf::from("media")
}

fn default_video_extensions() -> Vec<String> {
    reelshelf_common::paths::default_video_extensions()
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_subtitle_extension() -> String {
    DEFAULT_SUBTITLE_EXTENSION.to_string()
}

fn default_tv_dir() -> String {
    "tv".to_string()
}

fn default_variants() -> Vec<String> {
    vec!["sub".to_string(), "dub".to_string()]
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            video_extensions: default_video_extensions(),
            subtitle_extension: default_subtitle_extension(),
            tv_dir: default_tv_dir(),
            variants: default_variants(),
            cache_ttl_secs: 0,
        }
    }
}

impl LibraryConfig {
    /// Library settings rooted at `root`, everything else defaulted.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Whether `name` is one of the configured variant directory names.
    pub fn is_variant(&self, name: &str) -> bool {
        self.variants
            .iter()
            .any(|variant| variant.eq_ignore_ascii_case(name))
    }
}
