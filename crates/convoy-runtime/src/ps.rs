//! Process-list output condensing.

/// Column ranges kept from `ps` output: container id, status, and
/// ports/names. The IMAGE and CREATED columns in between are dropped so a
/// line fits a normal terminal.
const KEPT_RANGES: [(usize, usize); 2] = [(0, 20), (56, 79)];
const TAIL_START: usize = 99;

/// Condense raw `ps` output by slicing each line down to the columns an
/// operator actually scans.
///
/// Slicing is by character position and saturates, so short lines and
/// non-ASCII text pass through without panicking.
#[must_use]
pub fn condense_ps(raw: &str) -> String {
    raw.lines()
        .map(condense_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn condense_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::new();

    for (start, end) in KEPT_RANGES {
        if start >= chars.len() {
            break;
        }
        out.extend(&chars[start..end.min(chars.len())]);
    }
    if TAIL_START < chars.len() {
        out.extend(&chars[TAIL_START..]);
    }

    out
}
