//! The [`Template`] entity: cached section sequence, readiness tracking, and
//! render dispatch.
//!
//! A template is bound to one source file. It loads eagerly on construction:
//! include directives are expanded first, the resolved text is split into
//! sections, and the result is cached. Rendering replays the cached sections
//! to a [`Handlers`] table in document order. When watching is enabled, a
//! change notification marks the cache stale and the next render reloads
//! before dispatching.
//!
//! The section sequence is only ever replaced wholesale on (re)load, never
//! mutated in place, so a reload that fails leaves the previous sequence
//! untouched but the template unready - the next render retries the load.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::TemplateError;
use crate::handlers::Handlers;
use crate::include::resolve_includes;
use crate::parser::{Section, parse_sections};
use crate::watcher::ChangeWatcher;

/// Construction options for [`Template::open`].
///
/// Derives serde so host applications can embed it in their own
/// configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    /// Subscribe to change notifications for the template path and
    /// invalidate the cached sections on change. Off by default: the
    /// template is loaded once and never automatically invalidated.
    pub watch: bool,
}

impl TemplateOptions {
    /// Options with file watching enabled.
    pub fn watched() -> Self {
        Self {
            watch: true,
        }
    }
}

/// A parsed template file, ready to replay its sections to handlers.
///
/// # Examples
///
/// ```no_run
/// use slotted::{Handlers, Template, TemplateOptions};
///
/// # async fn example() -> Result<(), slotted::TemplateError> {
/// let mut template = Template::open("pages/index.html", TemplateOptions::default()).await?;
///
/// let mut out = String::new();
/// let mut handlers = Handlers::new(|content| out.push_str(content));
/// handlers.on("html", || { /* write SSR markup */ });
///
/// template.render(&mut handlers).await?;
/// # Ok(())
/// # }
/// ```
pub struct Template {
    path: PathBuf,
    /// Include directives resolve relative to this directory.
    dir: PathBuf,
    /// False means the cached sections are stale and must be rebuilt before
    /// the next render. Shared with the watcher callback thread.
    ready: Arc<AtomicBool>,
    sections: Vec<Section>,
    _watcher: Option<ChangeWatcher>,
}

impl Template {
    /// Bind to a template file and load it eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Load`] if the template or an included file
    /// cannot be read, and [`TemplateError::Watch`] if `options.watch` is set
    /// and the change subscription cannot be established. No instance is
    /// retained on failure; construct again to retry.
    pub async fn open(
        path: impl Into<PathBuf>,
        options: TemplateOptions,
    ) -> Result<Self, TemplateError> {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let ready = Arc::new(AtomicBool::new(false));

        let watcher = if options.watch {
            Some(ChangeWatcher::subscribe(&path, Arc::clone(&ready))?)
        } else {
            None
        };

        let mut template = Self {
            path,
            dir,
            ready,
            sections: Vec::new(),
            _watcher: watcher,
        };
        template.load().await?;
        Ok(template)
    }

    /// Read, include-resolve, and parse the source file, replacing the cached
    /// sections and marking the template ready.
    async fn load(&mut self) -> Result<(), TemplateError> {
        let source = fs::read_to_string(&self.path).await.map_err(|source| {
            TemplateError::Load {
                path: self.path.clone(),
                source,
            }
        })?;

        let resolved = resolve_includes(source, &self.dir).await?;
        self.sections = parse_sections(&resolved);
        self.ready.store(true, Ordering::SeqCst);

        tracing::debug!(
            "loaded {} ({} section(s))",
            self.path.display(),
            self.sections.len()
        );
        Ok(())
    }

    /// Replay the section sequence to `handlers`, in document order.
    ///
    /// If the template is stale (never loaded successfully, or invalidated by
    /// a change notification), the source is reloaded first; otherwise no I/O
    /// is performed. Raw sections invoke the raw callback with their content;
    /// placeholder sections invoke the callback registered under their name.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Load`] if a needed reload fails, or
    /// [`TemplateError::MissingHandler`] at the first placeholder with no
    /// registered callback. Handlers invoked before the failure have already
    /// run; there is no rollback.
    pub async fn render(&mut self, handlers: &mut Handlers<'_>) -> Result<(), TemplateError> {
        if !self.ready.load(Ordering::SeqCst) {
            tracing::debug!("template stale, reloading {}", self.path.display());
            self.load().await?;
        }

        for section in &self.sections {
            match section {
                Section::Raw(content) => handlers.dispatch_raw(content),
                Section::Placeholder(name) => handlers.dispatch(name)?,
            }
        }
        Ok(())
    }

    /// Mark the cached sections stale, forcing the next render to reload.
    ///
    /// This is the same operation the change-notification callback performs;
    /// hosts can call it to force a re-read without a filesystem event.
    pub fn invalidate(&self) {
        self.ready.store(false, Ordering::SeqCst);
    }

    /// Whether the cached sections are current (no reload pending).
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// The cached section sequence, in document order.
    ///
    /// Empty only if the initial load has not completed.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Path of the template source file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("path", &self.path)
            .field("ready", &self.is_ready())
            .field("sections", &self.sections.len())
            .field("watched", &self._watcher.is_some())
            .finish()
    }
}
