//! Change-notification subscription for watched templates.
//!
//! When a template is opened with watching enabled, a filesystem watcher
//! subscribes to its path and clears the template's readiness flag whenever
//! the file changes. Nothing is reloaded eagerly: the flag only marks the
//! cached section sequence stale, and the next render call performs the
//! actual reload (lazy invalidation). Rapid successive notifications are not
//! debounced; each one simply re-asserts the stale state, which is idempotent.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::TemplateError;

/// Owns the notification subscription for one template path.
///
/// The subscription lives exactly as long as this value; dropping it stops
/// the callbacks.
pub(crate) struct ChangeWatcher {
    _watcher: RecommendedWatcher,
}

impl ChangeWatcher {
    /// Subscribe to changes of `path`, clearing `ready` on each one.
    ///
    /// The callback runs on the watcher's own thread, which is why the flag
    /// is shared atomically rather than owned by the template outright.
    pub(crate) fn subscribe(
        path: &Path,
        ready: Arc<AtomicBool>,
    ) -> Result<Self, TemplateError> {
        let watched = path.to_path_buf();

        let mut watcher = notify::recommended_watcher(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                    ) {
                        tracing::debug!(
                            "change notification for {}, marking template stale",
                            watched.display()
                        );
                        ready.store(false, Ordering::SeqCst);
                    }
                }
                Err(e) => {
                    tracing::warn!("watch error for {}: {e}", watched.display());
                }
            },
        )
        .map_err(|source| TemplateError::Watch {
            path: path.to_path_buf(),
            source,
        })?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| TemplateError::Watch {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            _watcher: watcher,
        })
    }
}
