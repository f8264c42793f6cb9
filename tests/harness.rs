//! Shared helpers for Creole event-trace tests: a handler that records a
//! flat, human-readable trace of every event instead of building a tree, so
//! assertions can compare exact event order the way the golden scenarios in
//! `SPEC_FULL.md` §8 are written.

use creole_markup::{Atom, CreoleResult, EventHandler, Features, Parser};

#[derive(Default)]
pub struct TraceHandler {
    pub events: Vec<String>,
}

impl EventHandler for TraceHandler {
    fn start_element(&mut self, tag: Atom, attrs: &[(Atom, &str)]) {
        if attrs.is_empty() {
            self.events.push(format!("begin({tag})"));
        } else {
            let rendered: Vec<String> = attrs
                .iter()
                .map(|(name, value)| format!("{name}=\"{value}\""))
                .collect();
            self.events
                .push(format!("begin({tag} {})", rendered.join(" ")));
        }
    }

    fn end_element(&mut self, tag: Atom) {
        self.events.push(format!("end({tag})"));
    }

    fn characters(&mut self, text: &str) {
        self.events.push(format!("chars({text:?})"));
    }

    fn placeholder(&mut self, body: &str) {
        self.events.push(format!("placeholder({body:?})"));
    }

    fn plugin(&mut self, _parser: &mut Parser<Self>, body: &str) {
        self.events.push(format!("plugin({body:?})"));
    }
}

/// Parses `input` with default features and returns its event trace.
pub fn trace(input: &str) -> Vec<String> {
    let mut parser = Parser::new(TraceHandler::default());
    parser.parse_document(input).unwrap();
    parser.handler_ref().events.clone()
}

/// Parses `input` with an explicit feature set.
pub fn trace_with_features(input: &str, features: Features) -> Vec<String> {
    let mut parser = Parser::new(TraceHandler::default());
    parser.set_features(features);
    parser.parse_document(input).unwrap();
    parser.handler_ref().events.clone()
}

/// Parses `input` with a registered wiki URL mapping.
pub fn trace_with_wiki_url(input: &str, wiki_name: &str, url: &str) -> Vec<String> {
    let mut parser = Parser::new(TraceHandler::default());
    parser.set_wiki_url(wiki_name, url);
    parser.parse_document(input).unwrap();
    parser.handler_ref().events.clone()
}

/// A handler that re-enters the parser from `plugin`, used to exercise
/// `parse_plugin_text`'s recursion cap. Every re-entry's result is recorded
/// in `results`, since an outer call's `Ok` overwrites a single last-result
/// field once the stack unwinds past the level that actually hit the cap.
pub struct RecursivePluginHandler {
    pub events: Vec<String>,
    pub results: Vec<CreoleResult<()>>,
}

impl Default for RecursivePluginHandler {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            results: Vec::new(),
        }
    }
}

impl EventHandler for RecursivePluginHandler {
    fn start_element(&mut self, tag: Atom, _attrs: &[(Atom, &str)]) {
        self.events.push(format!("begin({tag})"));
    }

    fn end_element(&mut self, tag: Atom) {
        self.events.push(format!("end({tag})"));
    }

    fn characters(&mut self, text: &str) {
        self.events.push(format!("chars({text:?})"));
    }

    fn plugin(&mut self, parser: &mut Parser<Self>, body: &str) {
        self.events.push(format!("plugin({body:?})"));
        let result = parser.parse_plugin_text("<<recurse>>");
        self.results.push(result);
    }
}
