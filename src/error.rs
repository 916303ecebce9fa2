//! Error types for playback, branding suppression and configuration.

use thiserror::Error;

/// Errors returned by the playback controller and its invocation surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("Unknown track: {name}")]
    UnknownTrack { name: String },

    #[error("Could not install entry point {name}: {reason}")]
    Surface { name: String, reason: String },
}

/// Errors raised while patching the widget's encapsulated subtree.
///
/// These never leave `suppress_branding`; they only decide whether an element
/// or a query is skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrandingError {
    #[error("Encapsulated subtree is not accessible: {reason}")]
    AccessRestricted { reason: String },

    #[error("Selector query failed ({selector}): {reason}")]
    Query { selector: String, reason: String },

    #[error("DOM mutation failed: {reason}")]
    Mutation { reason: String },
}

/// Errors produced while loading the landing page configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config defines no tracks")]
    EmptyTracks,

    #[error("Track defined twice: {name}")]
    DuplicateTrack { name: String },

    #[error("Entry point used by more than one track: {name}")]
    DuplicateEntryPoint { name: String },

    #[error("Widget tag must not be empty")]
    EmptyWidgetTag,

    #[error("Widget tag is not a custom element name: {tag}")]
    InvalidWidgetTag { tag: String },
}
