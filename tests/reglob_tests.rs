// tests/reglob_tests.rs
//
// The translator emits regex source text; these tests also compile the
// output with the regex crate to check it means what it should.

use pql::{is_globby, reglob, GlobOptions};
use regex::Regex;

fn compile(glob: &str, opts: &GlobOptions) -> Regex {
    let pattern = reglob(glob, opts);
    Regex::new(&pattern).unwrap_or_else(|e| panic!("bad pattern {:?}: {}", pattern, e))
}

#[test]
fn test_star_collapses_to_dot_star() {
    assert_eq!(reglob("*.log", &GlobOptions::default()), "^.*\\.log$");
}

#[test]
fn test_question_mark_matches_one_char() {
    let re = compile("a?c", &GlobOptions::default());
    assert!(re.is_match("abc"));
    assert!(!re.is_match("ac"));
    assert!(!re.is_match("abbc"));
}

#[test]
fn test_special_chars_are_escaped() {
    let re = compile("a.b+c", &GlobOptions::default());
    assert!(re.is_match("a.b+c"));
    assert!(!re.is_match("axb+c"));
}

#[test]
fn test_brace_alternation() {
    let re = compile("*.{jpg,png}", &GlobOptions::default());
    assert!(re.is_match("photo.jpg"));
    assert!(re.is_match("photo.png"));
    assert!(!re.is_match("photo.gif"));
}

#[test]
fn test_globstar_spans_path_segments() {
    let opts = GlobOptions {
        globstar: true,
        ..GlobOptions::default()
    };
    let pattern = reglob("a/**/b", &opts);
    assert_eq!(pattern, "^a\\/((?:[^/]*(?:/|$))*)b$");
    let re = Regex::new(&pattern).unwrap();
    assert!(re.is_match("a/b"));
    assert!(re.is_match("a/x/b"));
    assert!(re.is_match("a/x/y/b"));
}

#[test]
fn test_single_star_under_globstar_stays_in_segment() {
    let opts = GlobOptions {
        globstar: true,
        ..GlobOptions::default()
    };
    let re = compile("a/*/b", &opts);
    assert!(re.is_match("a/x/b"));
    assert!(!re.is_match("a/x/y/b"));
}

#[test]
fn test_default_star_crosses_segments() {
    // Without globstar every star run collapses to `.*`.
    let re = compile("a/*/b", &GlobOptions::default());
    assert!(re.is_match("a/x/b"));
    assert!(re.is_match("a/x/y/b"));
}

#[test]
fn test_g_flag_drops_anchors() {
    let opts = GlobOptions {
        flags: "g".to_string(),
        ..GlobOptions::default()
    };
    let pattern = reglob("*.log", &opts);
    assert!(!pattern.starts_with('^'));
    assert!(!pattern.ends_with('$'));
    let re = Regex::new(&pattern).unwrap();
    assert!(re.is_match("see server.log for details"));
}

#[test]
fn test_non_extended_mode_keeps_question_mark_literal() {
    let opts = GlobOptions {
        extended: false,
        ..GlobOptions::default()
    };
    let re = compile("a?c", &opts);
    assert!(re.is_match("a?c"));
    assert!(!re.is_match("abc"));
}

#[test]
fn test_is_globby() {
    assert!(!is_globby("abc"));
    assert!(is_globby("a*c"));
    assert!(is_globby("a?c"));
    assert!(!is_globby("a.c"));
}
