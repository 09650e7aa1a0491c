//! Reelshelf-Common: Shared types, errors, and path utilities.
//!
//! This crate provides the pieces every reelshelf layer agrees on:
//!
//! - **Core Types**: [`MediaItem`] and the category normalization rule
//! - **Path Utilities**: extension checks and forward-slash relative path helpers
//! - **Error Handling**: the [`Error`] taxonomy and its HTTP status mapping
//!
//! # Examples
//!
//! ```
//! use reelshelf_common::{normalize_category, Error, Result};
//! use reelshelf_common::paths::{default_video_extensions, has_extension};
//! use std::path::Path;
//!
//! assert_eq!(normalize_category("movies"), "Movies");
//! assert!(has_extension(Path::new("Inception.mp4"), default_video_extensions()));
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("show", "Lost"))
//! }
//! assert_eq!(example().unwrap_err().http_status(), 404);
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
