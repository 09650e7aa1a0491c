//! Shared test harness for integration tests.
//!
//! [`MediaFixture`] builds a media tree inside a temp directory and hands out
//! a router or resolver pointed at it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use reelshelf::catalog::CatalogResolver;
use reelshelf::config::{Config, LibraryConfig};
use reelshelf::server::{create_router, AppContext};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct MediaFixture {
    dir: TempDir,
}

impl MediaFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Build a fixture containing empty files at each relative path.
    pub fn with_files(paths: &[&str]) -> Self {
        let fixture = Self::new();
        for path in paths {
            fixture.file(path);
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, relative: &str) -> PathBuf {
        self.write(relative, b"")
    }

    pub fn write(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.library = LibraryConfig::with_root(self.root());
        config
    }

    pub fn resolver(&self) -> CatalogResolver {
        CatalogResolver::new(LibraryConfig::with_root(self.root()))
    }

    pub fn router(&self) -> Router {
        create_router(AppContext::new(self.config()), None)
    }
}

/// Send a GET and return status plus the body parsed as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// The `error`/`code` pair of an error body, ignoring the request id.
pub fn error_parts(body: &serde_json::Value) -> (String, String) {
    (
        body["error"].as_str().unwrap_or_default().to_string(),
        body["code"].as_str().unwrap_or_default().to_string(),
    )
}
