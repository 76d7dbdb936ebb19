//! # Envbanner (Deployment Environment Banner)
//!
//! `envbanner` serves a single page that tells an operator which deployment
//! slot is answering: the environment name (`blue`, `green`, `production`, ...),
//! the deployed version, when the display was initialized and how long it has
//! been up.
//!
//! ## Environment resolution
//!
//! The environment name is read once per session from an explicit [`Settings`]
//! object. The CLI fills it from, in order:
//!
//! 1. `--environment`
//! 2. `ENVBANNER_ENVIRONMENT`
//! 3. `ENVIRONMENT`
//! 4. the literal `development`
//!
//! Blank values are skipped. Any name maps to a display attribute set; names
//! other than `blue`, `green` and `production` (case-insensitive) share the
//! `development` attributes, so resolution never fails.
//!
//! ## Sessions
//!
//! A session captures the initialization timestamp and owns the uptime ticker.
//! `POST /refresh` replaces the session, which releases the previous ticker.
//!
//! [`Settings`]: display::Settings

pub mod api;
pub mod cli;
pub mod display;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// First seven characters of a commit hash, or the whole value when shorter.
#[must_use]
pub fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
