//! Pipeline tests over in-memory streams: line splitting, chunk boundaries
//! and escape completion.

use std::io::Cursor;

use colorize::color::{lookup, Channel};
use colorize::input::InputSource;
use colorize::{Attributes, ColorSelection, LineEnding, LineReader, Mode, Options};

use crate::helpers::{esc, visible, Pieces};

fn options(mode: Mode, fg: &str, bg: Option<&str>, buffer_size: usize) -> Options {
    Options {
        mode,
        selection: ColorSelection::new(
            lookup(Channel::Foreground, fg).unwrap(),
            bg.map(|bg| lookup(Channel::Background, bg).unwrap()),
        ),
        attributes: Attributes::empty(),
        omit_color_empty: false,
        buffer_size,
        input: InputSource::Stdin,
    }
}

fn run(options: &Options, input: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    colorize::run(options, Cursor::new(input.to_vec()), &mut out).unwrap();
    out
}

#[test]
fn line_endings_are_reproduced_exactly() {
    let input = b"a\r\nb\nc\r";
    let lines: Vec<_> = LineReader::new(&input[..], 4096)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let endings: Vec<LineEnding> = lines.iter().map(|line| line.ending).collect();
    assert_eq!(
        endings,
        vec![
            LineEnding::CR | LineEnding::LF,
            LineEnding::LF,
            LineEnding::CR
        ]
    );

    let rejoined: Vec<u8> = lines
        .iter()
        .flat_map(|line| line.bytes.iter().chain(line.ending.as_bytes()).copied())
        .collect();
    assert_eq!(rejoined, input);
}

#[test]
fn crlf_split_across_reads_is_one_ending() {
    for buffer_size in 1..=4 {
        let lines: Vec<_> = LineReader::new(&b"ab\r\ncd\n"[..], buffer_size)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let complete: Vec<_> = lines.iter().filter(|line| !line.partial).collect();
        assert_eq!(complete.len(), 2, "buffer size {buffer_size}");
        assert_eq!(complete[0].ending, LineEnding::CR | LineEnding::LF);
        assert_eq!(complete[1].ending, LineEnding::LF);
    }
}

#[test]
fn clean_output_does_not_depend_on_buffer_size() {
    let input = esc("pre^[[1;31mtext^[[0m post\r\n^[[44mbg^[[0m\n^[[38;5;9mkeep\n");
    let expected = run(&options(Mode::Clean, "none", None, 4096), input.as_bytes());
    assert_eq!(visible(&expected), "pretext post\r\nbg\n^[[38;5;9mkeep\n");

    // Completion reads at most one buffer, so the longest sequence must fit
    for buffer_size in 8..=16 {
        let out = run(
            &options(Mode::Clean, "none", None, buffer_size),
            input.as_bytes(),
        );
        assert_eq!(visible(&out), visible(&expected), "buffer size {buffer_size}");
    }
}

#[test]
fn escape_split_after_bracket_matches_unsplit_read() {
    let input = esc("text^[[31m");
    let unsplit = run(&options(Mode::Clean, "none", None, 4096), input.as_bytes());

    // Six bytes end the first chunk right after the `[`
    let mut split = Vec::new();
    let pieces = Pieces::new(&[b"text\x1b[", b"31m"]);
    colorize::run(&options(Mode::Clean, "none", None, 6), pieces, &mut split).unwrap();

    assert_eq!(split, unsplit);
    assert_eq!(split, b"text");
}

#[test]
fn escape_split_after_escape_byte_is_completed() {
    let input = esc("abc^[[0mdef\n");
    for mode in [Mode::Clean, Mode::CleanAll] {
        let out = run(&options(mode, "none", None, 4), input.as_bytes());
        assert_eq!(out, b"abcdef\n", "{mode}");
    }
}

#[test]
fn failed_completion_keeps_literal_bytes() {
    let input = esc("abc^[Xyz\n");
    let out = run(&options(Mode::Clean, "none", None, 4), input.as_bytes());
    assert_eq!(visible(&out), "abc^[Xyz\n");
}

#[test]
fn plain_mode_passes_escapes_through_unexamined() {
    let input = esc("^[[1;31mHello^[[0m");
    let out = run(&options(Mode::Plain, "green", None, 4096), input.as_bytes());
    assert_eq!(visible(&out), "^[[32m^[[1;31mHello^[[0m^[[0m");
}

#[test]
fn plain_then_clean_all_round_trips() {
    let input = b"first line\r\nsecond\n\nthird\r";
    let colored = run(&options(Mode::Plain, "red", None, 4096), input);
    let cleaned = run(&options(Mode::CleanAll, "none", None, 4096), &colored);
    assert_eq!(cleaned, input);
}

#[test]
fn background_rainbow_never_collides_with_foreground() {
    let input = "x\n".repeat(30);
    let out = run(
        &options(Mode::RainbowBg, "blue", Some("black"), 4096),
        input.as_bytes(),
    );
    let text = visible(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 30);
    for line in lines {
        assert!(!line.starts_with("^[[44m"), "collision in {line:?}");
        assert!(line.contains("^[[34mx"));
    }
}

#[test]
fn long_lines_keep_one_rainbow_color() {
    let input = format!("{}\nnext\n", "y".repeat(20));
    let out = run(&options(Mode::RainbowFg, "red", None, 8), input.as_bytes());
    let text = visible(&out);
    let (first, rest) = text.split_once('\n').unwrap();
    assert!(!first.contains("^[[32m"));
    assert_eq!(first.matches("^[[31m").count(), 3);
    assert_eq!(rest, "^[[32mnext^[[0m\n");
}

#[test]
fn read_error_is_reported() {
    struct Failing;

    impl std::io::Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }

    let err = colorize::run(&options(Mode::Plain, "red", None, 16), Failing, Vec::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "less than 16 bytes read");
}
