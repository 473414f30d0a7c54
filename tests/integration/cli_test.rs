//! End-to-end tests of the colorize binary.

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{colorize, esc, visible};

// ============================================================================
// Coloring
// ============================================================================

#[test]
fn colors_stdin_red() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("red")
        .write_stdin("hello\nworld\n")
        .assert()
        .success()
        .stdout(esc("^[[31mhello^[[0m\n^[[31mworld^[[0m\n"));
}

#[test]
fn bold_foreground_on_background_with_attributes() {
    let home = TempDir::new().unwrap();
    let output = colorize(&home)
        .args(["--attr=underscore", "Yellow/blue", "-"])
        .write_stdin("x\r\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    insta::assert_snapshot!(visible(&output.stdout).trim_end(), @"^[[44m^[[1;4;33mx^[[0m");
    assert!(output.stdout.ends_with(b"\r\n"));
}

#[test]
fn reads_named_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("input.txt");
    fs::write(&path, "one\ntwo").unwrap();

    colorize(&home)
        .arg("green")
        .arg(&path)
        .assert()
        .success()
        .stdout(esc("^[[32mone^[[0m\n^[[32mtwo^[[0m"));
}

#[test]
fn omit_color_empty_leaves_blank_lines_bare() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .args(["--omit-color-empty", "blue"])
        .write_stdin("a\n\nb\n")
        .assert()
        .success()
        .stdout(esc("^[[34ma^[[0m\n\n^[[34mb^[[0m\n"));
}

#[test]
fn none_foreground_passes_text_through() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("none")
        .write_stdin("plain\n")
        .assert()
        .success()
        .stdout("plain\n");
}

#[test]
fn rainbow_foreground_cycles_per_line() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .args(["--rainbow-fg", "white"])
        .write_stdin("a\nb\nc\n")
        .assert()
        .success()
        .stdout(esc("^[[37ma^[[0m\n^[[30mb^[[0m\n^[[31mc^[[0m\n"));
}

#[test]
fn random_respects_exclusion() {
    let home = TempDir::new().unwrap();
    for _ in 0..20 {
        colorize(&home)
            .args(["--exclude-random=red", "random"])
            .write_stdin("x\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[31m").not());
    }
}

// ============================================================================
// Cleaning
// ============================================================================

#[test]
fn clean_strips_colorize_output() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("--clean")
        .write_stdin(esc("^[[1;31mHello^[[0m\n^[[38;5;1mkept^[[0m\n"))
        .assert()
        .success()
        .stdout(esc("Hello\n^[[38;5;1mkept\n"));
}

#[test]
fn clean_all_strips_everything_sgr_shaped() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("--clean-all")
        .write_stdin(esc("^[[1;31mHello^[[0m\n^[[38;5;1mgone^[[0m\n"))
        .assert()
        .success()
        .stdout("Hello\ngone\n");
}

#[test]
fn clean_takes_file_as_only_positional() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("colored.txt");
    fs::write(&path, esc("^[[32mgreen^[[0m\n")).unwrap();

    colorize(&home)
        .arg("--clean")
        .arg(&path)
        .assert()
        .success()
        .stdout("green\n");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_file_supplies_default_color() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("colorize.toml");
    fs::write(&config, "color = \"magenta\"\nattr = [\"blink\"]\n").unwrap();

    colorize(&home)
        .arg("--config")
        .arg(&config)
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(esc("^[[5;35mx^[[0m\n"));
}

#[test]
fn default_config_location_is_read() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("colorize");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "color = \"cyan\"\n").unwrap();

    colorize(&home)
        .arg("-")
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(esc("^[[36mx^[[0m\n"));
}

#[test]
fn missing_config_file_fails() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .args(["--config", "/nonexistent/colorize.toml", "red"])
        .write_stdin("x\n")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("colorize: "))
        .stderr(predicate::str::contains("config file not found"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unknown_color_exits_with_one() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("purple")
        .write_stdin("x\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr("colorize: foreground color 'purple' not recognized\n");
}

#[test]
fn missing_color_exits_with_one() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .write_stdin("x\n")
        .assert()
        .code(1)
        .stderr("colorize: color string missing\n");
}

#[test]
fn hyphen_in_color_position_before_file_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("input.txt");
    fs::write(&path, "x\n").unwrap();

    colorize(&home)
        .arg("-")
        .arg(&path)
        .assert()
        .code(1)
        .stdout("")
        .stderr("colorize: hyphen cannot be used as color string\n");
}

#[test]
fn lone_hyphen_needs_a_color() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("-")
        .write_stdin("x\n")
        .assert()
        .code(1)
        .stderr("colorize: hyphen must be preceded by color string\n");
}

#[test]
fn file_without_color_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("notes.txt");
    fs::write(&path, "x\n").unwrap();

    colorize(&home)
        .arg(&path)
        .assert()
        .code(1)
        .stdout("")
        .stderr("colorize: file must be preceded by color string\n");
}

#[test]
fn clean_all_output_is_stable_for_joined_fragments() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("--clean-all")
        .write_stdin(esc("^[[3^[[1mm\n"))
        .assert()
        .success()
        .stdout("\n");
    colorize(&home)
        .arg("--clean")
        .write_stdin(esc("^[^[[31m[31mX\n"))
        .assert()
        .success()
        .stdout("X\n");
}

#[test]
fn missing_file_names_the_path() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("absent.txt");
    colorize(&home)
        .arg("red")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(format!(
            "colorize: {}: ",
            path.display()
        )));
}

#[test]
fn directory_input_is_rejected() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("red")
        .arg(home.path())
        .assert()
        .code(1)
        .stderr(predicate::str::ends_with("unrecognized file type\n"));
}

#[test]
fn conflicting_flags_are_usage_errors() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .args(["--clean", "--clean-all"])
        .assert()
        .code(2);
    colorize(&home)
        .args(["--rainbow-fg", "--rainbow-bg", "red"])
        .assert()
        .code(2);
}

#[test]
fn version_and_help_succeed() {
    let home = TempDir::new().unwrap();
    colorize(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("colorize "));
    colorize(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("COLORS:"));
}
