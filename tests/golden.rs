//! The six golden scenarios from `SPEC_FULL.md` §8, checked as exact event
//! sequences.

mod harness;

use harness::{trace, trace_with_wiki_url};

#[test]
fn golden_heading() {
    assert_eq!(
        trace("= Hi ="),
        vec![
            "begin(body)",
            "begin(h1)",
            "chars(\"Hi\")",
            "end(h1)",
            "end(body)",
        ]
    );
}

#[test]
fn golden_bold_and_italic() {
    assert_eq!(
        trace("**bold** //it//"),
        vec![
            "begin(body)",
            "begin(p)",
            "begin(b)",
            "chars(\"bold\")",
            "end(b)",
            "chars(\" \")",
            "begin(i)",
            "chars(\"it\")",
            "end(i)",
            "end(p)",
            "end(body)",
        ]
    );
}

#[test]
fn golden_nested_list() {
    assert_eq!(
        trace("* a\n* b\n** c\n"),
        vec![
            "begin(body)",
            "begin(ul)",
            "begin(li)",
            "chars(\"a\")",
            "end(li)",
            "begin(li)",
            "chars(\"b\")",
            "begin(ul)",
            "begin(li)",
            "chars(\"c\")",
            "end(li)",
            "end(ul)",
            "end(li)",
            "end(ul)",
            "end(body)",
        ]
    );
}

#[test]
fn golden_table() {
    assert_eq!(
        trace("|=H1|=H2|\n|a|b|\n"),
        vec![
            "begin(body)",
            "begin(table)",
            "begin(tr)",
            "begin(th)",
            "chars(\"H1\")",
            "end(th)",
            "begin(th)",
            "chars(\"H2\")",
            "end(th)",
            "end(tr)",
            "begin(tr)",
            "begin(td)",
            "chars(\"a\")",
            "end(td)",
            "begin(td)",
            "chars(\"b\")",
            "end(td)",
            "end(tr)",
            "end(table)",
            "end(body)",
        ]
    );
}

#[test]
fn golden_link_with_wiki_url() {
    assert_eq!(
        trace_with_wiki_url("[[Foo:bar|text]]", "Foo", "http://f/"),
        vec![
            "begin(body)",
            "begin(p)",
            "begin(a href=\"http://f/bar\")",
            "chars(\"text\")",
            "end(a)",
            "end(p)",
            "end(body)",
        ]
    );
}

#[test]
fn golden_image_with_size() {
    assert_eq!(
        trace("{{pic.png?50x60|alt}}"),
        vec![
            "begin(body)",
            "begin(p)",
            "begin(img src=\"pic.png\" width=\"50\" height=\"60\" alt=\"alt\")",
            "end(img)",
            "end(p)",
            "end(body)",
        ]
    );
}
