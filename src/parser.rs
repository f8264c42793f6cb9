//! The public driver: owns scanner input, dispatches to the builder, and
//! hands events to a caller-supplied [`EventHandler`].

use std::collections::HashMap;

use crate::atom::Atom;
use crate::error::{CreoleError, CreoleResult};
use crate::features::Features;
use crate::handler::EventHandler;
use crate::lexer::{normalize_eols, Lexer};

/// How deep a `plugin` callback may re-enter [`Parser::parse_plugin_text`]
/// before it is rejected, guarding against an infinitely self-referential
/// plugin body.
pub(crate) const MAX_PLUGIN_RECURSION: usize = 64;

/// Drives the scanner and tree builder over a document, emitting events to
/// an [`EventHandler`] in document order.
///
/// Generic over the handler type (rather than `Box<dyn EventHandler>`)
/// because `EventHandler::plugin` takes `&mut Parser<Self>` to support
/// re-entrant parsing, which a trait object couldn't express.
pub struct Parser<H: EventHandler> {
    pub(crate) handler: Option<H>,
    pub(crate) features: Features,
    pub(crate) wiki_urls: HashMap<String, String>,

    pub(crate) tag_stack: Vec<Atom>,
    pub(crate) list_stack: Vec<bool>,
    pub(crate) pending_chars: String,
    pub(crate) in_link: bool,
    pub(crate) table_columns: Option<usize>,
    pub(crate) current_column: usize,
    pub(crate) recursion_depth: usize,
}

impl<H: EventHandler> Parser<H> {
    /// Creates a parser that will deliver events to `handler`.
    pub fn new(handler: H) -> Self {
        Self {
            handler: Some(handler),
            features: Features::default(),
            wiki_urls: HashMap::new(),
            tag_stack: Vec::new(),
            list_stack: Vec::new(),
            pending_chars: String::new(),
            in_link: false,
            table_columns: None,
            current_column: 0,
            recursion_depth: 0,
        }
    }

    /// Selects which grammar extensions beyond base Creole 1.0 are active.
    /// Takes effect on the next call to [`Parser::parse_document`].
    pub fn set_features(&mut self, features: Features) {
        self.features = features;
    }

    /// Registers (or replaces) the URL prefix substituted for links whose
    /// scheme (or absence of one, via `""`) matches `wiki_name`. Stores the
    /// mapping verbatim even when `url` is empty — an explicit "suppress
    /// this scheme's prefix" entry is a valid mapping, not an erase.
    pub fn set_wiki_url(&mut self, wiki_name: &str, url: &str) {
        self.wiki_urls.insert(wiki_name.to_string(), url.to_string());
    }

    /// Gives back a reference to the handler, useful once parsing has
    /// finished and the caller wants to inspect accumulated state.
    pub fn handler_ref(&self) -> &H {
        self.handler
            .as_ref()
            .expect("handler is only absent while a plugin callback is executing")
    }

    /// Parses `text` as a full Creole document, normalising line endings
    /// and wrapping every event between a `body` start and end.
    pub fn parse_document(&mut self, text: &str) -> CreoleResult<()> {
        self.reset_for_document();
        self.dispatch_body_start();
        let normalized = normalize_eols(text);
        let mut lexer = Lexer::new(&normalized, self.features);
        self.run_tokens(&mut lexer);
        self.flush_block();
        self.dispatch_body_end();
        Ok(())
    }

    /// Parses `text` as Creole markup nested into the document currently
    /// being built, for use from [`EventHandler::plugin`]. Shares the
    /// enclosing tag and list stacks, so the produced events nest into
    /// whatever the caller currently has open; bounded to
    /// [`MAX_PLUGIN_RECURSION`] levels of re-entrancy.
    pub fn parse_plugin_text(&mut self, text: &str) -> CreoleResult<()> {
        if self.recursion_depth >= MAX_PLUGIN_RECURSION {
            log::warn!(
                "creole_markup: plugin recursion depth exceeded {MAX_PLUGIN_RECURSION}, rejecting re-entrant parse"
            );
            return Err(CreoleError::recursion_limit(MAX_PLUGIN_RECURSION));
        }
        if text.is_empty() {
            return Ok(());
        }
        log::trace!(
            "creole_markup: entering parse_plugin_text at depth {}",
            self.recursion_depth + 1
        );
        let normalized = normalize_eols(text);
        let mut lexer = Lexer::new(&normalized, self.features);
        self.recursion_depth += 1;
        self.run_tokens(&mut lexer);
        self.recursion_depth -= 1;
        log::trace!("creole_markup: leaving parse_plugin_text");
        Ok(())
    }

    fn reset_for_document(&mut self) {
        self.tag_stack.clear();
        self.list_stack.clear();
        self.pending_chars.clear();
        self.in_link = false;
        self.table_columns = None;
        self.current_column = 0;
        self.recursion_depth = 0;
    }

    fn dispatch_body_start(&mut self) {
        log::trace!("creole_markup: entering parse_document");
        if let Some(h) = self.handler.as_mut() {
            h.start_element(Atom::Body, &[]);
        }
    }

    fn dispatch_body_end(&mut self) {
        if let Some(h) = self.handler.as_mut() {
            h.end_element(Atom::Body);
        }
        log::trace!("creole_markup: leaving parse_document");
    }
}
