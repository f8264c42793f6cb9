//! The tree builder: turns the token stream into nested start/end/characters
//! events, tracking just enough state to know what is currently open.
//!
//! There is no materialised tree — `tag_stack` only remembers which atoms
//! are open so closing one can emit its matching `end_element` event, the
//! same push-event/pop-event structure as the reference `BaseParser`.

use crate::atom::Atom;
use crate::handler::EventHandler;
use crate::lexer::{Lexer, LexContext, Token};
use crate::parser::Parser;

impl<H: EventHandler> Parser<H> {
    pub(crate) fn run_tokens(&mut self, lexer: &mut Lexer) {
        loop {
            let token = lexer.next_token(LexContext::Block);
            if matches!(token, Token::Eof) {
                break;
            }
            self.handle_block_token(token, lexer);
        }
    }

    fn handle_block_token(&mut self, token: Token, lexer: &mut Lexer) {
        match token {
            Token::Blankline => self.flush_block(),
            Token::Heading(level, text) => {
                self.flush_block();
                let atom = Atom::heading(level);
                self.push_start(atom, &[]);
                self.emit_chars(text);
                self.pop_end();
            }
            Token::Hr => {
                self.flush_block();
                self.push_start(Atom::Hr, &[]);
                self.pop_end();
            }
            Token::PreBlock(text) => {
                self.flush_block();
                self.push_start(Atom::Pre, &[]);
                let stripped = strip_one_leading_space_per_line(text);
                self.emit_chars(&stripped);
                self.pop_end();
            }
            Token::TableRowStart(is_header) => self.handle_table(is_header, lexer),
            Token::ListItem(depth, ordered) => self.handle_list_item(depth, ordered),
            Token::Indent(depth) => self.handle_indent(depth, lexer),
            Token::DefTerm(text) => self.handle_def_term(text, lexer),
            // A bare newline at block level (e.g. right after a heading/hr/
            // preblock line) never starts a paragraph on its own — only a
            // token that actually carries visible content does.
            Token::Eol => self.handle_inline_token(Token::Eol, lexer),
            other => {
                self.ensure_block();
                self.handle_inline_token(other, lexer);
            }
        }
    }

    fn handle_inline_token(&mut self, token: Token, lexer: &mut Lexer) {
        match token {
            Token::Chars(s) => self.pending_chars.push_str(s),
            Token::Char(b) => self.pending_chars.push(b as char),
            // Outside verbatim, a bare end-of-line never reaches visible
            // output on its own: a following block-structural token (list
            // item, table row end, blank line, ...) flushes whatever text
            // preceded it. Inside an inline `{{{...}}}` span the newline is
            // real content and must be preserved.
            Token::Eol => {
                if lexer.verbatim_depth() > 0 {
                    self.pending_chars.push('\n');
                }
            }
            Token::BoldToggle => self.toggle(Atom::B),
            Token::ItalicToggle => self.toggle(Atom::I),
            Token::MonospaceToggle => self.toggle(Atom::Tt),
            Token::SuperscriptToggle => self.toggle(Atom::Sup),
            Token::SubscriptToggle => self.toggle(Atom::Sub),
            Token::UnderlineToggle => self.toggle(Atom::U),
            Token::Linebreak => {
                self.push_start(Atom::Br, &[]);
                self.pop_end();
            }
            Token::VerbOpen => {
                lexer.set_verbatim_depth(lexer.verbatim_depth() + 1);
                self.push_start(Atom::Verb, &[]);
            }
            Token::VerbClose => {
                if lexer.verbatim_depth() > 0 {
                    lexer.set_verbatim_depth(lexer.verbatim_depth() - 1);
                }
                if self.tag_stack.last() == Some(&Atom::Verb) {
                    self.pop_end();
                }
            }
            Token::LinkOpen => self.handle_link(lexer),
            Token::ImageOpen => self.handle_image(lexer),
            Token::FreeUrl(text) => self.handle_free_url(text),
            Token::PlaceholderOpen => self.handle_placeholder(lexer),
            Token::PluginOpen => self.handle_plugin(lexer),
            Token::LinkPipe | Token::ImagePipe => self.pending_chars.push('|'),
            Token::LinkClose => self.pending_chars.push_str("]]"),
            Token::ImageQMark => self.pending_chars.push('?'),
            Token::ImageX => self.pending_chars.push('x'),
            Token::ImageClose => self.pending_chars.push_str("}}"),
            // Block-level tokens never reach this arm from handle_block_token's
            // dispatch, but may appear harmlessly while scanning link/image/
            // table-cell text; ignored rather than matched exhaustively twice.
            _ => {}
        }
    }

    fn toggle(&mut self, atom: Atom) {
        if self.tag_stack.last() == Some(&atom) {
            self.pop_end();
        } else {
            self.push_start(atom, &[]);
        }
    }

    // --- stack primitives ---------------------------------------------

    fn push_start(&mut self, tag: Atom, attrs: &[(Atom, String)]) {
        self.flush_pending_chars();
        let refs: Vec<(Atom, &str)> = attrs.iter().map(|(a, s)| (*a, s.as_str())).collect();
        if let Some(h) = self.handler.as_mut() {
            h.start_element(tag, &refs);
        }
        self.tag_stack.push(tag);
    }

    fn pop_end(&mut self) -> Option<Atom> {
        self.flush_pending_chars();
        let tag = self.tag_stack.pop()?;
        if let Some(h) = self.handler.as_mut() {
            h.end_element(tag);
        }
        Some(tag)
    }

    fn emit_chars(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(h) = self.handler.as_mut() {
            h.characters(text);
        }
    }

    fn flush_pending_chars(&mut self) {
        if self.pending_chars.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_chars);
        if let Some(h) = self.handler.as_mut() {
            h.characters(&text);
        }
    }

    fn ensure_block(&mut self) {
        if self.tag_stack.is_empty() {
            self.push_start(Atom::P, &[]);
        }
    }

    /// Closes every element still open (innermost first), clearing all
    /// scratch state. Run on a blank line and at end of input.
    fn flush_block(&mut self) {
        self.flush_pending_chars();
        while !self.tag_stack.is_empty() {
            self.pop_end();
        }
        self.list_stack.clear();
        self.table_columns = None;
        self.current_column = 0;
        self.in_link = false;
    }

    fn in_table(&self) -> bool {
        self.tag_stack.first() == Some(&Atom::Table)
    }

    fn in_list(&self) -> bool {
        matches!(self.tag_stack.first(), Some(Atom::Ul) | Some(Atom::Ol))
    }

    fn in_definition_list(&self) -> bool {
        self.tag_stack.first() == Some(&Atom::Dl)
    }

    // --- lists -----------------------------------------------------------

    fn handle_list_item(&mut self, depth: u32, ordered: bool) {
        let depth = (depth.max(1)) as usize;
        if !self.in_list() {
            self.flush_block();
        } else if depth <= self.list_stack.len() && self.tag_stack.last() == Some(&Atom::Li) {
            self.pop_end();
        }
        while self.list_stack.len() > depth {
            if self.tag_stack.last() == Some(&Atom::Li) {
                self.pop_end();
            }
            self.pop_end();
            self.list_stack.pop();
        }
        if self.list_stack.len() == depth {
            if let Some(&last_ordered) = self.list_stack.last() {
                if last_ordered != ordered {
                    if self.tag_stack.last() == Some(&Atom::Li) {
                        self.pop_end();
                    }
                    self.pop_end();
                    self.list_stack.pop();
                }
            }
        }
        while self.list_stack.len() < depth {
            self.push_start(Atom::list_container(ordered), &[]);
            self.list_stack.push(ordered);
        }
        self.push_start(Atom::Li, &[]);
    }

    // --- indented blockquotes ---------------------------------------------

    fn handle_indent(&mut self, depth: u32, lexer: &mut Lexer) {
        self.flush_block();
        let is_citation = lexer.peek_byte() == Some(b'"');
        if is_citation {
            lexer.consume_byte();
        }
        for _ in 0..depth.max(1) {
            let attrs = if is_citation {
                vec![(Atom::Class, "citation".to_string())]
            } else {
                Vec::new()
            };
            self.push_start(Atom::Blockquote, &attrs);
        }
    }

    // --- definition lists --------------------------------------------------

    fn handle_def_term(&mut self, text: &str, lexer: &mut Lexer) {
        if !self.in_definition_list() {
            self.flush_block();
            self.push_start(Atom::Dl, &[]);
        } else if matches!(self.tag_stack.last(), Some(&Atom::Dt) | Some(&Atom::Dd)) {
            self.pop_end();
        }
        self.push_start(Atom::Dt, &[]);
        self.emit_chars(text);
        if lexer.def_term_had_colon() {
            self.pop_end();
            self.push_start(Atom::Dd, &[]);
        }
    }

    // --- tables --------------------------------------------------------

    fn open_table_cell(&mut self, is_header: bool, counts_towards_columns: bool) {
        self.push_start(Atom::table_cell(is_header), &[]);
        if counts_towards_columns {
            self.table_columns = Some(self.table_columns.unwrap_or(0) + 1);
        }
    }

    fn close_table_cell(&mut self) {
        if matches!(self.tag_stack.last(), Some(&Atom::Th) | Some(&Atom::Td)) {
            self.pop_end();
        }
    }

    fn handle_table_cell(&mut self, is_header: bool, first_row: bool) {
        if first_row {
            self.close_table_cell();
            self.current_column += 1;
            self.open_table_cell(is_header, true);
            return;
        }
        let columns = self.table_columns.unwrap_or(0);
        if self.current_column + 1 < columns {
            self.close_table_cell();
            self.current_column += 1;
            self.open_table_cell(is_header, false);
        } else {
            // Past the column count this table's first row established: a
            // tolerated excess `|`/`|=` is absorbed as literal cell text.
            self.pending_chars.push('|');
            if is_header {
                self.pending_chars.push('=');
            }
        }
    }

    fn handle_table(&mut self, first_is_header: bool, lexer: &mut Lexer) {
        self.flush_block();
        self.push_start(Atom::Table, &[]);
        self.table_columns = None;

        let mut pending_row: Option<bool> = Some(first_is_header);
        let mut first_row = true;

        while let Some(is_header) = pending_row.take() {
            self.push_start(Atom::Tr, &[]);
            self.current_column = 0;
            self.open_table_cell(is_header, first_row);

            loop {
                let token = lexer.next_table_cell_token();
                match token {
                    Token::TableCell(h) => {
                        if lexer.at_eol_or_eof() {
                            // Trailing `|` before EOL/EOF: tolerated, no new cell.
                        } else {
                            self.handle_table_cell(h, first_row);
                        }
                    }
                    Token::TableRowEnd => {
                        self.close_table_cell();
                        self.pop_end();
                        break;
                    }
                    Token::Eof => {
                        self.close_table_cell();
                        self.pop_end();
                        self.flush_block();
                        return;
                    }
                    Token::Blankline => {
                        self.close_table_cell();
                        self.pop_end();
                        self.flush_block();
                        return;
                    }
                    other => self.handle_inline_token(other, lexer),
                }
            }

            first_row = false;
            match lexer.next_token(LexContext::Block) {
                Token::TableRowStart(h) => pending_row = Some(h),
                Token::Blankline | Token::Eof => {
                    self.flush_block();
                    return;
                }
                other => {
                    self.flush_block();
                    self.handle_block_token(other, lexer);
                    return;
                }
            }
        }
    }

    // --- links ------------------------------------------------------------

    fn open_link(&mut self, raw_url: &str) {
        let mapped = self.map_url(raw_url);
        self.push_start(Atom::A, &[(Atom::Href, mapped)]);
    }

    fn close_link(&mut self) {
        if self.tag_stack.last() == Some(&Atom::A) {
            self.pop_end();
        }
    }

    fn handle_link(&mut self, lexer: &mut Lexer) {
        if self.in_link {
            // `[[` encountered while already scanning a link: not a nested
            // construct, just literal text.
            self.pending_chars.push_str("[[");
            return;
        }
        self.flush_pending_chars();
        self.in_link = true;

        let mut url = String::new();
        let mut piped = false;
        loop {
            match lexer.next_token(LexContext::Link) {
                Token::LinkPipe => {
                    piped = true;
                    break;
                }
                Token::LinkClose | Token::Eof => break,
                Token::Chars(s) => url.push_str(s),
                Token::Char(b) => url.push(b as char),
                Token::LinkOpen => url.push_str("[["),
                _ => {}
            }
        }

        if piped {
            self.open_link(&url);
            loop {
                match lexer.next_token(LexContext::Link) {
                    Token::LinkClose | Token::Eof => break,
                    other => self.handle_inline_token(other, lexer),
                }
            }
            self.close_link();
        } else {
            self.open_link(&url);
            self.emit_chars(&url);
            self.close_link();
        }
        self.in_link = false;
    }

    // --- images -------------------------------------------------------

    fn handle_image(&mut self, lexer: &mut Lexer) {
        self.flush_pending_chars();

        #[derive(PartialEq)]
        enum Segment {
            Url,
            Alt,
            Width,
            Height,
        }

        let mut url = String::new();
        let mut alt = String::new();
        let mut width = String::new();
        let mut height = String::new();
        let mut segment = Segment::Url;

        loop {
            match lexer.next_token(LexContext::Image) {
                Token::ImagePipe => segment = Segment::Alt,
                Token::ImageQMark => segment = Segment::Width,
                Token::ImageX => segment = Segment::Height,
                Token::ImageClose | Token::Eof => break,
                Token::Chars(s) => match segment {
                    Segment::Url => url.push_str(s),
                    Segment::Alt => alt.push_str(s),
                    Segment::Width => width.push_str(s),
                    Segment::Height => height.push_str(s),
                },
                Token::Char(b) => match segment {
                    Segment::Url => url.push(b as char),
                    Segment::Alt => alt.push(b as char),
                    Segment::Width => width.push(b as char),
                    Segment::Height => height.push(b as char),
                },
                _ => {}
            }
        }

        let mut attrs = vec![(Atom::Src, url)];
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if is_digits(&width) {
            attrs.push((Atom::Width, width));
        }
        if is_digits(&height) {
            attrs.push((Atom::Height, height));
        }
        attrs.push((Atom::Alt, alt));
        self.push_start(Atom::Img, &attrs);
        self.pop_end();
    }

    // --- free URLs ----------------------------------------------------

    fn handle_free_url(&mut self, text: &str) {
        self.flush_pending_chars();
        let mut body = text;
        let mut trailing = None;
        if let Some(last) = body.chars().last() {
            if ",.?!:;\"'".contains(last) {
                trailing = Some(last);
                body = &body[..body.len() - last.len_utf8()];
            }
        }
        self.ensure_block();
        let mapped = self.map_free_url(body);
        self.push_start(Atom::A, &[(Atom::Href, mapped)]);
        self.emit_chars(body);
        self.pop_end();
        if let Some(c) = trailing {
            self.pending_chars.push(c);
        }
    }

    // --- placeholders and plugins -------------------------------------

    fn handle_placeholder(&mut self, lexer: &mut Lexer) {
        self.flush_pending_chars();
        let mut body = String::new();
        loop {
            match lexer.next_token(LexContext::Placeholder) {
                Token::PlaceholderClose | Token::Eof => break,
                Token::Chars(s) => body.push_str(s),
                Token::Char(b) => body.push(b as char),
                _ => {}
            }
        }
        if body.is_empty() {
            return;
        }
        if let Some(mut h) = self.handler.take() {
            h.placeholder(&body);
            self.handler = Some(h);
        }
    }

    fn handle_plugin(&mut self, lexer: &mut Lexer) {
        self.flush_pending_chars();
        let mut body = String::new();
        loop {
            match lexer.next_token(LexContext::Plugin) {
                Token::PluginClose | Token::Eof => break,
                Token::Chars(s) => body.push_str(s),
                Token::Char(b) => body.push(b as char),
                _ => {}
            }
        }
        if let Some(mut h) = self.handler.take() {
            h.plugin(self, &body);
            self.handler = Some(h);
        }
    }

    // --- URL mapping -----------------------------------------------------

    fn trim_ascii_ws(s: &str) -> &str {
        s.trim_matches(|c: char| c == ' ' || (c as u32) <= 0x20)
    }

    fn map_url(&self, raw: &str) -> String {
        let trimmed = Self::trim_ascii_ws(raw);
        let with_scheme = if trimmed.len() >= 4 && trimmed[..4].eq_ignore_ascii_case("www.") {
            format!("http://{trimmed}")
        } else {
            trimmed.to_string()
        };
        if let Some(idx) = with_scheme.find(':') {
            let protocol = &with_scheme[..idx];
            if let Some(prefix) = self.wiki_urls.get(protocol) {
                let rest = &with_scheme[idx + 1..];
                return format!("{prefix}{rest}");
            }
            with_scheme
        } else if let Some(prefix) = self.wiki_urls.get("") {
            format!("{prefix}{with_scheme}")
        } else {
            with_scheme
        }
    }

    fn map_free_url(&self, raw: &str) -> String {
        let trimmed = Self::trim_ascii_ws(raw);
        if trimmed.len() >= 4 && trimmed[..4].eq_ignore_ascii_case("www.") {
            format!("http://{trimmed}")
        } else {
            trimmed.to_string()
        }
    }
}

fn strip_one_leading_space_per_line(text: &str) -> String {
    text.lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}
