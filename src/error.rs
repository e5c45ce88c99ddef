//! Error handling for slotted.
//!
//! The error surface is deliberately small: everything the engine does is
//! either reading template source from disk or dispatching sections to
//! caller-supplied handlers, and each of those has exactly one way to fail.
//!
//! # Error Categories
//!
//! - [`TemplateError::Load`] - the template file or an included file could not
//!   be read; aborts the in-progress load (construction or reload)
//! - [`TemplateError::MissingHandler`] - a placeholder was encountered during
//!   render with no matching entry in the handler mapping; fatal to that
//!   render call
//! - [`TemplateError::Watch`] - the change-notification subscription could not
//!   be established; surfaced from construction when watching is enabled
//!
//! Errors propagate synchronously to the caller of the operation that
//! triggered them. There is no internal retry and no cached "last good"
//! fallback: a failed reload leaves the template stale, so the next
//! [`render`](crate::Template::render) call attempts the load again.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by template loading and rendering.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TemplateError {
    /// The template file or a file referenced by an include directive could
    /// not be read.
    ///
    /// `path` identifies the file that failed, which for include failures is
    /// the included file rather than the template itself.
    #[error("failed to read template source '{}'", .path.display())]
    Load {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A placeholder section was reached during render with no handler
    /// registered for its name.
    ///
    /// Handlers already invoked for earlier sections have run to completion;
    /// their side effects are not rolled back.
    #[error("no render handler defined for placeholder '{name}'")]
    MissingHandler {
        /// Name of the placeholder that had no handler.
        name: String,
    },

    /// The file-change subscription for a watched template could not be
    /// established.
    #[error("failed to watch '{}' for changes", .path.display())]
    Watch {
        /// Path that was being subscribed.
        path: PathBuf,
        /// The underlying watcher failure.
        #[source]
        source: notify::Error,
    },
}
