//! The callback surface hosts implement to receive parser events.

use crate::atom::Atom;
use crate::parser::Parser;

/// Receives events from a [`Parser`] in document order.
///
/// Every method has an empty default body, so implementors override only
/// the events they care about. This mirrors the reference's five separate
/// `set*Handler` function-pointer setters, collapsed into one trait with a
/// single `impl` per host, and replaces its opaque `void* userData` with
/// whatever state the implementing type itself owns.
#[allow(unused_variables)]
pub trait EventHandler: Sized {
    /// A tag has opened, with its attributes in emission order.
    fn start_element(&mut self, tag: Atom, attrs: &[(Atom, &str)]) {}

    /// A previously opened tag has closed.
    fn end_element(&mut self, tag: Atom) {}

    /// A run of character data.
    fn characters(&mut self, text: &str) {}

    /// A `<<<...>>>` placeholder body. Only fired when the body is
    /// non-empty.
    fn placeholder(&mut self, body: &str) {}

    /// A `<<...>>` plugin body. The handler may re-enter the parser via
    /// `parser.parse_plugin_text(...)` to have `body` (or any other text)
    /// parsed as Creole markup nested into the enclosing document.
    fn plugin(&mut self, parser: &mut Parser<Self>, body: &str) {}
}
