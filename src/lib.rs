//! An event-driven parser for Wiki Creole 1.0 markup, with the "Creole
//! Additions" (definition lists, indented blockquotes, `##` monospace) and
//! an `?WxH` image-size extension.
//!
//! There is no materialised parse tree: a [`Parser`] drives a byte-oriented
//! scanner and a small tag-stack builder directly into callbacks on an
//! [`EventHandler`] the caller supplies, in document order.

mod atom;
mod builder;
mod error;
mod features;
mod handler;
mod lexer;
mod parser;

pub use atom::Atom;
pub use error::{CreoleError, CreoleResult};
pub use features::Features;
pub use handler::EventHandler;
pub use parser::Parser;
