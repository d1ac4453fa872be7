#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use sitemill_engine::{ConvertError, ConvertStrategy, MarkitdownStrategy};
use tempfile::TempDir;

/// Drops an executable stub script standing in for the external converter.
fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn tool_stdout_becomes_the_target_file() {
    let tools = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let stub = write_stub(tools.path(), "fake-markitdown", "#!/bin/sh\ncat \"$1\"\n");

    let source = work.path().join("page.html");
    fs::write(&source, "<p>content</p>").unwrap();
    let target = work.path().join("page.md");

    let strategy = MarkitdownStrategy::new(stub.to_string_lossy().into_owned(), None);
    let outcome = strategy.convert_file(&source, &target).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "<p>content</p>");
    assert_eq!(outcome.bytes_written, 14);
    assert_eq!(outcome.title, None);
}

#[test]
fn failing_tool_creates_no_target() {
    let tools = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let stub = write_stub(
        tools.path(),
        "fake-markitdown",
        "#!/bin/sh\necho boom >&2\nexit 3\n",
    );

    let source = work.path().join("page.html");
    fs::write(&source, "<p>content</p>").unwrap();
    let target = work.path().join("page.md");

    let strategy = MarkitdownStrategy::new(stub.to_string_lossy().into_owned(), None);
    let err = strategy.convert_file(&source, &target).unwrap_err();

    assert!(matches!(err, ConvertError::Tool(_)));
    assert!(err.to_string().contains("boom"));
    assert!(!target.exists());
}

#[test]
fn missing_tool_is_reported() {
    let work = TempDir::new().unwrap();
    let source = work.path().join("page.html");
    fs::write(&source, "<p>content</p>").unwrap();

    let strategy = MarkitdownStrategy::new("/definitely/not/a/real/tool", None);
    let err = strategy
        .convert_file(&source, &work.path().join("page.md"))
        .unwrap_err();
    assert!(matches!(err, ConvertError::Tool(_)));
}

#[test]
fn domain_rewrite_feeds_the_tool_a_temp_copy() {
    let tools = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let stub = write_stub(tools.path(), "fake-markitdown", "#!/bin/sh\ncat \"$1\"\n");

    let source = work.path().join("page.html");
    fs::write(&source, r#"<a href="/docs">docs</a>"#).unwrap();
    let target = work.path().join("page.md");

    let strategy = MarkitdownStrategy::new(
        stub.to_string_lossy().into_owned(),
        Some("example.com".to_string()),
    );
    strategy.convert_file(&source, &target).unwrap();

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains(r#"href="example.com/docs""#));

    // The rewritten temp input is gone; only source and target remain.
    let mut names: Vec<String> = fs::read_dir(work.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["page.html".to_string(), "page.md".to_string()]);
}
