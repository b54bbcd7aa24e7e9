//! Error Types
//!
//! The animation core itself has no failure modes: every per-frame updater
//! is a total function of elapsed time. Errors only arise at the edges,
//! while the scene is being assembled or configured.
//!
//! All fallible APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, FajrError>`.

use thiserror::Error;

/// The main error type for Fajr Serenity.
#[derive(Error, Debug)]
pub enum FajrError {
    // ========================================================================
    // Scene Assembly Errors
    // ========================================================================
    /// A color literal could not be parsed (expected `#rrggbb` or `#rgb`).
    #[error("Invalid color literal: {0:?}")]
    InvalidColor(String),

    /// An animation target handle does not resolve to a live scene node.
    #[error("Animation target not found: {0}")]
    MissingTarget(&'static str),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A configuration value is outside of its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Page Errors
    // ========================================================================
    /// The overlay page template failed to load or render.
    #[error("Template error: {0}")]
    TemplateError(String),
}

/// Alias for `Result<T, FajrError>`.
pub type Result<T> = std::result::Result<T, FajrError>;
