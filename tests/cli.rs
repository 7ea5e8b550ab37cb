//! Integration test suite for the `j2s` CLI
use assert_cmd::Command;
use std::io::Write as _;

/// Helper function to run the `main` binary with the given arguments and
/// return a [`assert_cmd::assert::Assert`].
fn run_main(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd =
        Command::cargo_bin("j2s").expect("Failed to find main binary");
    cmd.args(args);
    cmd.assert()
}

/// Write `content` to a temp file the binary can read as its input.
fn fixture(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write fixture");
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_grid(assert: &assert_cmd::assert::Assert) -> Vec<Vec<String>> {
        let stdout = assert.get_output().stdout.clone();
        let output =
            String::from_utf8(stdout).expect("Invalid UTF-8 output");
        serde_json::from_str(output.trim()).expect("Failed to parse grid")
    }

    #[test]
    fn object_mode_builds_header_and_rows() {
        let file = fixture(
            "{\"a\":\"hello\",\"b\":\"world\"}\n\
             {\"b\":2,\"a\":1,\"c\":3}\n\
             {\"d\":4,\"a\":1,\"c\":3}\n",
        );

        let assert = run_main(&[file.path().to_str().unwrap()])
            .success()
            .code(0);

        let grid = parse_grid(&assert);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0], vec!["a", "b", "c", "d"]);
        assert_eq!(grid[1], vec!["hello", "world", "", ""]);
        assert_eq!(grid[3], vec!["1", "", "3", "4"]);
    }

    #[test]
    fn array_mode_keeps_ragged_rows() {
        let file = fixture("[\"hello\",\"world\"]\n[true,false,null]\n");

        let assert = run_main(&["--arrays", file.path().to_str().unwrap()])
            .success()
            .code(0);

        let grid = parse_grid(&assert);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], vec!["hello", "world"]);
        assert_eq!(grid[1], vec!["TRUE", "FALSE", ""]);
    }

    #[test]
    fn reads_from_stdin() {
        let mut cmd =
            Command::cargo_bin("j2s").expect("Failed to find main binary");
        cmd.arg("--arrays");
        cmd.write_stdin("[1,2][3]");

        let assert = cmd.assert().success();
        let grid = parse_grid(&assert);
        assert_eq!(grid, vec![vec!["1", "2"], vec!["3"]]);
    }

    #[test]
    fn pretty_output_is_still_valid_json() {
        let file = fixture("{\"a\":1}\n");
        let assert = run_main(&["--pretty", file.path().to_str().unwrap()])
            .success();

        let grid = parse_grid(&assert);
        assert_eq!(grid, vec![vec!["a"], vec!["1"]]);
    }

    #[test]
    fn lex_error_fails_the_run() {
        let file = fixture("True");
        let assert = run_main(&[file.path().to_str().unwrap()]).failure();

        let stderr = String::from_utf8(assert.get_output().stderr.clone())
            .expect("Invalid UTF-8 stderr");
        assert!(
            stderr.contains("unrecognized token: 'T'"),
            "stderr was: {stderr}"
        );
    }

    #[test]
    fn wrong_shape_fails_the_run() {
        let file = fixture("[1,2]");
        // Object mode (the default) rejects top-level arrays.
        let assert = run_main(&[file.path().to_str().unwrap()]).failure();

        let stderr = String::from_utf8(assert.get_output().stderr.clone())
            .expect("Invalid UTF-8 stderr");
        assert!(
            stderr.contains("json is not an object"),
            "stderr was: {stderr}"
        );
    }

    #[test]
    fn generate_man_pages_writes_prefixed_pages() {
        let dir = tempfile::tempdir().expect("create temp dir");
        run_main(&[
            "generate",
            "man",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .success();

        // One page for the binary plus a `parent-child` page per
        // subcommand, recursively.
        assert!(dir.path().join("j2s.1").exists());
        assert!(dir.path().join("j2s-generate.1").exists());
        assert!(dir.path().join("j2s-generate-shell.1").exists());
        assert!(dir.path().join("j2s-generate-man.1").exists());
    }

    #[test]
    fn nonexistent_file() {
        let assert = run_main(&["/definitely/not/a/file.json"]);
        assert.failure().code(1);
    }
}
