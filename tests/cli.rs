//! Integration test suite for the `jhl` CLI
use assert_cmd::Command;

/// Helper function to run the `main` binary with the given arguments and
/// return a [`assert_cmd::assert::Assert`].
fn run_main(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd =
        Command::cargo_bin("jhl").expect("Failed to find main binary");
    cmd.args(args);
    cmd.assert()
}

/// Runs the binary with `stdin` piped in.
fn run_main_with_stdin(
    args: &[&str],
    stdin: &str,
) -> assert_cmd::assert::Assert {
    let mut cmd =
        Command::cargo_bin("jhl").expect("Failed to find main binary");
    cmd.args(args).write_stdin(stdin);
    cmd.assert()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone())
        .expect("Invalid UTF-8 output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;

    /// Parses `--spans` output into `(category, text)` pairs.
    fn span_pairs(output: &str) -> Vec<(String, String)> {
        output
            .lines()
            .map(|line| {
                let span: Value =
                    serde_json::from_str(line).expect("span line is JSON");
                (
                    span["category"].as_str().expect("category").to_string(),
                    span["text"].as_str().expect("text").to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn spans_of_file() {
        let assert = run_main(&["--spans", "tests/data/simple.json"])
            .success()
            .code(0);
        let pairs = span_pairs(&stdout_of(&assert));

        let expected = [
            ("key", r#""name""#),
            ("string", r#""John Doe""#),
            ("key", r#""age""#),
            ("number", "32"),
            ("key", r#""admin""#),
            ("string", "false"),
        ];
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(c, t)| ((*c).to_string(), (*t).to_string()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn spans_with_literals() {
        let assert =
            run_main_with_stdin(&["--spans", "--literals"], "[true, 1]")
                .success();
        let pairs = span_pairs(&stdout_of(&assert));
        assert_eq!(
            pairs,
            vec![
                ("literal".to_string(), "true".to_string()),
                ("number".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn spans_from_stdin() {
        let assert = run_main_with_stdin(&["--spans"], r#"{"a": 1}"#).success();
        let output = stdout_of(&assert);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"start":1,"length":3,"category":"key","text":"\"a\""}"#,
                r#"{"start":6,"length":1,"category":"number","text":"1"}"#,
            ]
        );
    }

    #[test]
    fn sample_uses_crlf_offsets() {
        let assert = run_main(&["--sample", "--spans"]).success();
        let output = stdout_of(&assert);
        let line = output.lines().next().expect("at least one span");
        let first: Value =
            serde_json::from_str(line).expect("span line is JSON");
        assert_eq!(first["start"], 7);
        assert_eq!(first["category"], "key");
        assert_eq!(first["text"], r#""title""#);
    }

    #[test]
    fn uncolored_output_is_verbatim() {
        let assert = run_main(&["--color", "never", "tests/data/simple.json"])
            .success();
        let expected = std::fs::read_to_string("tests/data/simple.json")
            .expect("test data");
        assert_eq!(stdout_of(&assert), expected);
    }

    #[test]
    fn forced_color_output() {
        let assert = run_main(&[
            "--color",
            "always",
            "--key-color",
            "#010203",
            "tests/data/simple.json",
        ])
        .success();
        let output = stdout_of(&assert);
        assert!(
            output.contains("\x1b["),
            "Expected ANSI color escapes, got: {output:?}"
        );
    }

    #[test]
    fn invalid_color() {
        run_main(&["--key-color", "blue", "tests/data/simple.json"])
            .failure()
            .code(2);
    }

    #[test]
    fn nonexistent_file() {
        run_main(&["does/not/exist.json"]).failure().code(1);
    }

    #[test]
    fn invalid_palette_file() {
        let mut palette = tempfile::NamedTempFile::new().expect("temp file");
        write!(palette, r#"{{"key": "cyan"}}"#).expect("write palette");
        let path = palette.path().to_str().expect("UTF-8 temp path");

        run_main(&["--palette", path, "tests/data/simple.json"])
            .failure()
            .code(1);
    }

    #[test]
    fn palette_file_must_be_object() {
        let mut palette = tempfile::NamedTempFile::new().expect("temp file");
        write!(palette, "[]").expect("write palette");
        let path = palette.path().to_str().expect("UTF-8 temp path");

        run_main(&["--palette", path, "tests/data/simple.json"])
            .failure()
            .code(1);
    }

    #[test]
    fn spans_ignore_palette() {
        let mut palette = tempfile::NamedTempFile::new().expect("temp file");
        write!(palette, "[]").expect("write palette");
        let path = palette.path().to_str().expect("UTF-8 temp path");

        let assert = run_main(&[
            "--spans",
            "--palette",
            path,
            "tests/data/simple.json",
        ])
        .success();
        assert_eq!(span_pairs(&stdout_of(&assert)).len(), 6);
    }

    #[test]
    fn completions() {
        let assert = run_main(&["generate", "shell", "bash"]).success();
        assert!(stdout_of(&assert).contains("jhl"));
    }
}
