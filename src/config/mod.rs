mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// First path segments the server claims for itself.
const RESERVED_SEGMENTS: &[&str] = &["media", "files", "health"];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./reelshelf.toml",
        "./config.toml",
        "~/.config/reelshelf/config.toml",
        "/etc/reelshelf/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let library = &config.library;

    if !library.root.exists() {
        tracing::warn!("Media root does not exist: {:?}", library.root);
    }

    if library.video_extensions.is_empty() {
        anyhow::bail!("library.video_extensions must not be empty");
    }

    let subtitle_ext = library.subtitle_extension.trim_start_matches('.');
    if subtitle_ext.is_empty() {
        anyhow::bail!("library.subtitle_extension must not be empty");
    }
    if library
        .video_extensions
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(subtitle_ext))
    {
        anyhow::bail!(
            "library.subtitle_extension '{}' is also listed as a video extension",
            subtitle_ext
        );
    }

    if library.variants.is_empty() {
        anyhow::bail!("library.variants must not be empty");
    }

    if library.tv_dir.is_empty() || library.tv_dir.contains(['/', '\\']) {
        anyhow::bail!(
            "library.tv_dir must be a single directory name, got '{}'",
            library.tv_dir
        );
    }

    if RESERVED_SEGMENTS.contains(&library.tv_dir.as_str()) {
        anyhow::bail!(
            "library.tv_dir '{}' collides with a built-in route",
            library.tv_dir
        );
    }

    Ok(())
}
