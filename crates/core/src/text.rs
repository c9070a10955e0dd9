//! Text normalization.
//!
//! Canonicalizes raw text before it is embedded, scored, or assembled
//! into answer context. Every downstream component works on normalized
//! text only.

/// Normalize a piece of text.
///
/// - Typographic quotes and dashes become their plain-ASCII equivalents.
/// - Runs of whitespace collapse to single spaces; ends are trimmed.
/// - Runs of two or more sentence terminators (`.`, `!`, `?`) collapse
///   to a single `.`.
///
/// Pure and idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut ascii = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{201C}' | '\u{201D}' => ascii.push('"'),
            '\u{2018}' | '\u{2019}' => ascii.push('\''),
            '\u{2013}' | '\u{2014}' => ascii.push('-'),
            _ => ascii.push(ch),
        }
    }

    let collapsed = ascii.split_whitespace().collect::<Vec<_>>().join(" ");
    collapse_terminator_runs(&collapsed)
}

/// Collapse runs of two or more of `.`, `!`, `?` to a single `.`.
fn collapse_terminator_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run_start: Option<char> = None;
    let mut run_len = 0usize;

    for ch in text.chars() {
        if matches!(ch, '.' | '!' | '?') {
            if run_len == 0 {
                run_start = Some(ch);
            }
            run_len += 1;
        } else {
            flush_run(&mut out, run_start, run_len);
            run_start = None;
            run_len = 0;
            out.push(ch);
        }
    }
    flush_run(&mut out, run_start, run_len);
    out
}

fn flush_run(out: &mut String, first: Option<char>, run_len: usize) {
    if run_len >= 2 {
        out.push('.');
    } else if let Some(ch) = first {
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  hello \t world \n"), "hello world");
    }

    #[test]
    fn test_replaces_typographic_characters() {
        assert_eq!(
            normalize("\u{201C}quoted\u{201D} \u{2018}text\u{2019} \u{2013} dash \u{2014} here"),
            "\"quoted\" 'text' - dash - here"
        );
    }

    #[test]
    fn test_collapses_terminator_runs() {
        assert_eq!(normalize("Wait!!!"), "Wait.");
        assert_eq!(normalize("Really?!"), "Really.");
        assert_eq!(normalize("End..."), "End.");
        assert_eq!(normalize("Fine!"), "Fine!");
        assert_eq!(normalize("One. Two."), "One. Two.");
    }

    #[test]
    fn test_single_terminators_survive() {
        assert_eq!(normalize("e.g. a test?"), "e.g. a test?");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  hello \u{201C}world\u{201D}!!!  ",
            "plain text.",
            "a \u{2014} b ... c",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
