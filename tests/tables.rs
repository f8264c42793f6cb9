mod harness;

use harness::trace;

#[test]
fn body_only_table_has_no_header_cells() {
    assert_eq!(
        trace("|a|b|\n"),
        vec![
            "begin(body)",
            "begin(table)",
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
fn excess_cells_in_later_rows_absorb_as_literal_text() {
    let events = trace("|a|b|\n|c|d|e|\n");
    // First row fixes 2 columns; the 3rd cell's leading `|` in row two
    // becomes literal text inside the last (2nd) cell instead of opening a
    // 3rd cell.
    let cell_begins = events
        .iter()
        .filter(|e| e.as_str() == "begin(td)" || e.as_str() == "begin(th)")
        .count();
    assert_eq!(cell_begins, 4, "trace: {events:?}");
    assert!(events.contains(&"chars(\"d|e\")".to_string()), "trace: {events:?}");
}

#[test]
fn trailing_pipe_creates_no_empty_cell() {
    let events = trace("|a|b|\n");
    let cell_begins = events
        .iter()
        .filter(|e| e.as_str() == "begin(td)")
        .count();
    assert_eq!(cell_begins, 2, "trace: {events:?}");
}

#[test]
fn blankline_flushes_an_open_table() {
    assert_eq!(
        trace("|a|b|\n\nafter"),
        vec![
            "begin(body)",
            "begin(table)",
            "begin(tr)",
            "begin(td)",
            "chars(\"a\")",
            "end(td)",
            "begin(td)",
            "chars(\"b\")",
            "end(td)",
            "end(tr)",
            "end(table)",
            "begin(p)",
            "chars(\"after\")",
            "end(p)",
            "end(body)",
        ]
    );
}
