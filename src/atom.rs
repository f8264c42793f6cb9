//! The closed set of element and attribute names the builder ever emits.

/// A canonical, identity-comparable element or attribute name.
///
/// The reference implementation compares names by pointer identity into a
/// table of static strings; here the enum discriminant plays that role, so
/// `Atom == Atom` never touches the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Atom {
    Body,
    P,
    Pre,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Blockquote,
    Hr,
    A,
    Img,
    B,
    I,
    Tt,
    Sup,
    Sub,
    U,
    Verb,
    Br,
    Table,
    Tr,
    Th,
    Td,
    Ul,
    Ol,
    Li,
    Dl,
    Dt,
    Dd,
    Href,
    Src,
    Alt,
    Width,
    Height,
    Class,
    Citation,
}

impl Atom {
    /// The canonical name delivered to callbacks, matching the reference's
    /// rendered tag/attribute spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Atom::Body => "body",
            Atom::P => "p",
            Atom::Pre => "pre",
            Atom::H1 => "h1",
            Atom::H2 => "h2",
            Atom::H3 => "h3",
            Atom::H4 => "h4",
            Atom::H5 => "h5",
            Atom::H6 => "h6",
            Atom::Blockquote => "blockquote",
            Atom::Hr => "hr",
            Atom::A => "a",
            Atom::Img => "img",
            Atom::B => "b",
            Atom::I => "i",
            Atom::Tt => "tt",
            Atom::Sup => "sup",
            Atom::Sub => "sub",
            Atom::U => "u",
            Atom::Verb => "verb",
            Atom::Br => "br",
            Atom::Table => "table",
            Atom::Tr => "tr",
            Atom::Th => "th",
            Atom::Td => "td",
            Atom::Ul => "ul",
            Atom::Ol => "ol",
            Atom::Li => "li",
            Atom::Dl => "dl",
            Atom::Dt => "dt",
            Atom::Dd => "dd",
            Atom::Href => "href",
            Atom::Src => "src",
            Atom::Alt => "alt",
            Atom::Width => "width",
            Atom::Height => "height",
            Atom::Class => "class",
            Atom::Citation => "citation",
        }
    }

    /// The heading atom for a level in `1..=6`.
    pub(crate) fn heading(level: u8) -> Atom {
        match level {
            1 => Atom::H1,
            2 => Atom::H2,
            3 => Atom::H3,
            4 => Atom::H4,
            5 => Atom::H5,
            _ => Atom::H6,
        }
    }

    /// The list container atom for an ordered/unordered list.
    pub(crate) fn list_container(ordered: bool) -> Atom {
        if ordered {
            Atom::Ol
        } else {
            Atom::Ul
        }
    }

    /// The table cell atom for a header/body cell.
    pub(crate) fn table_cell(is_header: bool) -> Atom {
        if is_header {
            Atom::Th
        } else {
            Atom::Td
        }
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
