//! Reelshelf - browse a local video library over HTTP
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod server;
