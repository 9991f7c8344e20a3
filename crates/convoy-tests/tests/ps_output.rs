//! Process-list condensing.

use convoy_runtime::condense_ps;

/// Build a line where each retained column range carries a distinct
/// letter, so the slice boundaries are visible in the result.
fn marked_line() -> String {
    let mut line = String::new();
    line.push_str(&"A".repeat(20)); // 0..20   kept (id)
    line.push_str(&"B".repeat(36)); // 20..56  dropped (image)
    line.push_str(&"C".repeat(23)); // 56..79  kept (status)
    line.push_str(&"D".repeat(20)); // 79..99  dropped (created)
    line.push_str(&"E".repeat(21)); // 99..    kept (ports/names)
    line
}

#[test]
fn keeps_id_status_and_tail_columns() {
    let condensed = condense_ps(&marked_line());

    let expected = format!("{}{}{}", "A".repeat(20), "C".repeat(23), "E".repeat(21));
    assert_eq!(condensed, expected);
}

#[test]
fn short_lines_pass_through_untruncated() {
    assert_eq!(condense_ps("short"), "short");
    assert_eq!(condense_ps(""), "");
}

/// A line ending inside a dropped column keeps only what falls in the
/// retained ranges.
#[test]
fn partial_lines_slice_safely() {
    let line = format!("{}{}", "A".repeat(20), "B".repeat(40)); // 60 chars
    let condensed = condense_ps(&line);
    assert_eq!(condensed, format!("{}{}", "A".repeat(20), "B".repeat(4)));
}

#[test]
fn multiple_lines_stay_separate() {
    let raw = format!("{}\n{}", marked_line(), marked_line());
    let condensed = condense_ps(&raw);
    assert_eq!(condensed.lines().count(), 2);
}

/// Multi-byte characters are sliced by char position, never mid-byte.
#[test]
fn non_ascii_does_not_panic() {
    let line = "é".repeat(120);
    let condensed = condense_ps(&line);
    assert_eq!(condensed.chars().count(), 20 + 23 + 21);
}
