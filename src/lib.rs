//! slotted - a minimal section-replay template engine.
//!
//! Turns a static text file containing named placeholders (`${name}`) and
//! include directives (`${include path}`) into an ordered sequence of typed
//! sections, then replays that sequence to caller-supplied handlers at render
//! time. Built for assembling HTML responses from server-rendered fragments
//! (markup, styles, scripts, serialized props) without a full template
//! language: no conditionals, no loops, no expressions.
//!
//! # Pipeline
//!
//! file text, include resolution, placeholder tokenization, cached section
//! list, handler dispatch on each render call:
//!
//! - include resolution (internal) expands `${include path}` directives into
//!   literal file content, relative to the template's directory, before any
//!   placeholder is looked at
//! - [`parser`] splits the resolved text into alternating [`Section::Raw`] /
//!   [`Section::Placeholder`] spans
//! - [`template`] caches the parsed sequence and replays it to a
//!   [`Handlers`] table, reloading lazily when the cache has been invalidated
//!
//! # Example
//!
//! A template file `page.html`:
//!
//! ```text
//! <!doctype html>
//! <html>${head}<body>${html}</body></html>
//! ```
//!
//! rendered by streaming each section to a response buffer:
//!
//! ```no_run
//! use slotted::{Handlers, Template, TemplateOptions};
//!
//! # async fn example() -> Result<(), slotted::TemplateError> {
//! let mut template = Template::open("page.html", TemplateOptions::default()).await?;
//!
//! let mut response = String::new();
//! let out = std::cell::RefCell::new(&mut response);
//! let mut handlers = Handlers::new(|content| out.borrow_mut().push_str(content));
//! handlers.on("head", || out.borrow_mut().push_str("<title>hi</title>"));
//! handlers.on("html", || out.borrow_mut().push_str("<p>hello</p>"));
//!
//! template.render(&mut handlers).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Hot Reload
//!
//! Opening a template with [`TemplateOptions::watched`] subscribes to change
//! notifications for its path. A notification only marks the cached sections
//! stale; the reload happens lazily on the next [`Template::render`] call.
//!
//! # Hazards
//!
//! Include resolution has no cycle detection and no depth limit; a circular
//! include loops until memory is exhausted. Handler-authored content is
//! trusted - this crate is not a sandbox.

mod include;
mod watcher;

pub mod error;
pub mod handlers;
pub mod parser;
pub mod template;

pub use error::TemplateError;
pub use handlers::Handlers;
pub use parser::{Section, parse_sections};
pub use template::{Template, TemplateOptions};
