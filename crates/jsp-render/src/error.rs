//! Render error types.

use thiserror::Error;

/// Errors raised while producing markup.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The icon request could not be made or its body not read.
    #[error("Failed to fetch icon {slug}: {source}")]
    Fetch {
        slug: String,
        #[source]
        source: reqwest::Error,
    },

    /// The icon server answered with a non-success status.
    #[error("Icon {slug} returned HTTP {status}")]
    Status { slug: String, status: u16 },

    /// No icon exists for the slug.
    #[error("Unknown icon: {0}")]
    UnknownIcon(String),
}
