//! Architecture enforcement tests.
//!
//! Each external concern lives behind one module boundary. These tests
//! read the source tree and fail when code outside that boundary reaches
//! for it directly.
//!
//! # Test Categories
//!
//! 1. **Termination** - Only the CLI layer decides the exit status
//! 2. **Network** - Only `remote` talks HTTP
//! 3. **Processes** - Only `build` spawns child processes
//! 4. **Environment** - Only `credentials` and the CLI read process variables

use std::fs;
use std::path::{Path, PathBuf};

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// All `.rs` files under `src/`, relative to it.
fn source_files() -> Vec<(String, String)> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<(String, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else if path.extension().is_some_and(|e| e == "rs") {
                let rel = path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                out.push((rel, fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let root = src_dir();
    let mut files = Vec::new();
    walk(&root, &root, &mut files);
    files.sort();
    files
}

/// Strip `#[cfg(test)]` modules so test helpers are not linted.
fn non_test_code(content: &str) -> &str {
    content
        .find("#[cfg(test)]")
        .map_or(content, |idx| &content[..idx])
}

fn violations(needle: &str, allowed: &[&str]) -> Vec<String> {
    source_files()
        .into_iter()
        .filter(|(rel, _)| !allowed.iter().any(|prefix| rel.starts_with(prefix)))
        .filter(|(_, content)| non_test_code(content).contains(needle))
        .map(|(rel, _)| rel)
        .collect()
}

#[test]
fn source_tree_is_found() {
    let files = source_files();
    assert!(files.iter().any(|(rel, _)| rel == "lib.rs"));
    assert!(files.iter().any(|(rel, _)| rel == "engine/pipeline.rs"));
}

#[test]
fn nothing_calls_process_exit() {
    let found = violations("process::exit", &[]);
    assert!(found.is_empty(), "process::exit used in: {:?}", found);
}

#[test]
fn exit_codes_only_in_cli() {
    let found = violations("ExitCode", &["cli/", "main.rs"]);
    assert!(found.is_empty(), "ExitCode used outside cli: {:?}", found);
}

#[test]
fn http_only_in_remote() {
    let found = violations("reqwest", &["remote/"]);
    assert!(found.is_empty(), "reqwest used outside remote: {:?}", found);
}

#[test]
fn child_processes_only_in_build() {
    let found = violations("process::Command", &["build/"]);
    assert!(found.is_empty(), "Command spawned outside build: {:?}", found);
}

#[test]
fn environment_reads_are_centralised() {
    let found = violations("env::var(", &["credentials/", "cli/"]);
    assert!(found.is_empty(), "env::var used in: {:?}", found);
}
