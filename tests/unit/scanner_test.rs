//! Unit tests for escape scanning and line rendering

use colorize::color::{lookup, Channel};
use colorize::sgr::{find_spans, scan_sgr, CleanPolicy, EscapeSpan};
use colorize::{ColorSelection, LineReader, Mode, Renderer};

use crate::helpers::esc;

fn render(mode: Mode, fg: &str, input: &str) -> String {
    let foreground = lookup(Channel::Foreground, fg).unwrap();
    let mut renderer = Renderer::new(Vec::new(), mode, ColorSelection::new(foreground, None));
    renderer
        .render_all(LineReader::new(input.as_bytes(), 4096))
        .unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

#[test]
fn bold_red_hello_is_cleaned_by_both_policies() {
    let input = esc("^[[1;31mHello^[[0m");
    assert_eq!(render(Mode::Clean, "none", &input), "Hello");
    assert_eq!(render(Mode::CleanAll, "none", &input), "Hello");
}

#[test]
fn plain_mode_wraps_existing_sequences_untouched() {
    let input = esc("^[[1;31mHello^[[0m");
    assert_eq!(
        render(Mode::Plain, "green", &input),
        esc("^[[32m^[[1;31mHello^[[0m^[[0m")
    );
}

#[test]
fn clean_keeps_sequences_outside_its_grammar() {
    let cases = [
        "^[[38;5;196mx",
        "^[[1mx",
        "^[[1;41mx",
        "^[[0;31mx",
        "^[[100mx",
        "^[[mx",
    ];
    for case in cases {
        let input = esc(case);
        assert_eq!(render(Mode::Clean, "none", &input), input, "case {case:?}");
        assert_eq!(render(Mode::CleanAll, "none", &input), "x", "case {case:?}");
    }
}

#[test]
fn clean_removes_every_sequence_colorize_emits() {
    let cases = [
        "^[[0m",
        "^[[31m",
        "^[[39m",
        "^[[44m",
        "^[[49m",
        "^[[1;31m",
        "^[[1;4;5;7;8;37m",
        "^[[1;4;39m",
    ];
    for case in cases {
        let input = esc(&format!("a{case}b"));
        assert_eq!(render(Mode::Clean, "none", &input), "ab", "case {case:?}");
    }
}

#[test]
fn spans_cover_exact_byte_ranges() {
    let line = esc("x^[[31my^[[0m");
    let spans = find_spans(line.as_bytes(), CleanPolicy::Clean);
    assert_eq!(
        spans,
        vec![
            EscapeSpan { start: 1, end: 6 },
            EscapeSpan { start: 7, end: 11 },
        ]
    );
    assert_eq!(
        scan_sgr(line.as_bytes(), 1, CleanPolicy::CleanAll),
        Some(EscapeSpan { start: 1, end: 6 })
    );
    assert_eq!(scan_sgr(line.as_bytes(), 0, CleanPolicy::CleanAll), None);
}

#[test]
fn unterminated_sequence_is_literal_text() {
    let input = esc("tail^[[31");
    assert_eq!(render(Mode::Clean, "none", &input), input);
    assert_eq!(render(Mode::CleanAll, "none", &input), input);
}
