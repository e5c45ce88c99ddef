//! Caller-supplied handler mapping consumed during rendering.
//!
//! Rendering replays the parsed section sequence to a [`Handlers`] value: raw
//! sections go to the required raw callback with their literal content, and
//! each placeholder goes to the callback registered under its name, with no
//! arguments. Placeholder callbacks produce output through their own side
//! effects (typically by closing over a response writer); return values play
//! no part in the contract.
//!
//! The set of valid placeholder names is determined by each template file,
//! not by this crate, so named handlers are a string-keyed map with an
//! explicit missing-key failure rather than a closed enum of handler kinds.
//!
//! # Examples
//!
//! ```
//! use slotted::Handlers;
//!
//! let mut out = String::new();
//! let mut handlers = Handlers::new(|content| out.push_str(content));
//! handlers.on("head", || { /* write SSR head markup */ });
//! handlers.on("html", || { /* write component markup */ });
//! ```

use std::collections::HashMap;

use crate::error::TemplateError;

/// Handler table for one or more render calls.
///
/// Constructed from the raw-section callback, which every template needs;
/// placeholder callbacks are registered with [`on`](Handlers::on). Callbacks
/// are `FnMut`, so they may accumulate state across sections (for example,
/// appending to a shared buffer).
pub struct Handlers<'a> {
    raw: Box<dyn FnMut(&str) + 'a>,
    named: HashMap<String, Box<dyn FnMut() + 'a>>,
}

impl<'a> Handlers<'a> {
    /// Create a handler table with the given raw-section callback.
    pub fn new(raw: impl FnMut(&str) + 'a) -> Self {
        Self {
            raw: Box::new(raw),
            named: HashMap::new(),
        }
    }

    /// Register the callback for placeholder `name`, replacing any previous
    /// registration under that name.
    pub fn on(&mut self, name: impl Into<String>, handler: impl FnMut() + 'a) -> &mut Self {
        let name = name.into();
        if name == "raw" {
            // Raw sections always dispatch to the constructor callback, so a
            // named handler under this key can never be invoked.
            tracing::warn!("handler registered under reserved name 'raw' is unreachable");
        }
        self.named.insert(name, Box::new(handler));
        self
    }

    /// Names with a registered placeholder callback.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    pub(crate) fn dispatch_raw(&mut self, content: &str) {
        (self.raw)(content);
    }

    pub(crate) fn dispatch(&mut self, name: &str) -> Result<(), TemplateError> {
        match self.named.get_mut(name) {
            Some(handler) => {
                handler();
                Ok(())
            }
            None => Err(TemplateError::MissingHandler {
                name: name.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for Handlers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("named", &self.named.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
