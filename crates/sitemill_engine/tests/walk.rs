use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use sitemill_engine::{convert_tree, ConvertOptions, WalkError};
use tempfile::TempDir;

fn options(source: &Path, target: &Path) -> ConvertOptions {
    ConvertOptions {
        source_dir: source.to_path_buf(),
        target_dir: target.to_path_buf(),
        ..ConvertOptions::default()
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const PAGE: &str = r#"<html><head><title>Page</title></head>
<body><article><h1>Hi</h1><p>text</p></article></body></html>"#;

#[test]
fn mirrors_directories_and_maps_extensions() {
    mill_logging::initialize_for_tests();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    write(&src.path().join("index.html"), PAGE);
    write(&src.path().join("a/page.HTML"), PAGE);
    write(&src.path().join("a/b/deep.htm"), PAGE);
    write(&src.path().join("notes.txt"), "plain");
    fs::create_dir_all(src.path().join("empty")).unwrap();

    let summary = convert_tree(&options(src.path(), dst.path())).unwrap();

    assert!(dst.path().join("index.md").is_file());
    assert!(dst.path().join("a/page.md").is_file());
    assert!(dst.path().join("a/b/deep.md").is_file());
    // Every source directory is mirrored, even without HTML inside.
    assert!(dst.path().join("empty").is_dir());

    assert_eq!(summary.converted, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.documents.len(), 3);
}

#[test]
fn non_html_files_are_absent_from_output() {
    mill_logging::initialize_for_tests();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    write(&src.path().join("notes.txt"), "plain");
    write(&src.path().join("data.json"), "{}");
    write(&src.path().join("page.html"), PAGE);

    convert_tree(&options(src.path(), dst.path())).unwrap();

    let names: Vec<String> = fs::read_dir(dst.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["page.md".to_string()]);
}

#[test]
fn converted_markdown_contains_rendered_content() {
    mill_logging::initialize_for_tests();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    write(&src.path().join("page.html"), PAGE);
    let summary = convert_tree(&options(src.path(), dst.path())).unwrap();

    let markdown = fs::read_to_string(dst.path().join("page.md")).unwrap();
    assert_eq!(markdown, "# Hi\n\ntext");
    assert_eq!(summary.documents[0].relative_path, "page.md".to_string());
    assert_eq!(summary.documents[0].title.as_deref(), Some("Page"));
}

#[test]
fn configured_domain_rewrites_links_in_output() {
    mill_logging::initialize_for_tests();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    write(
        &src.path().join("page.html"),
        r#"<body><article><p><a href="/docs/page">docs</a></p></article></body>"#,
    );
    let mut opts = options(src.path(), dst.path());
    opts.domain = Some("example.com".to_string());
    convert_tree(&opts).unwrap();

    let markdown = fs::read_to_string(dst.path().join("page.md")).unwrap();
    assert_eq!(markdown, "[docs](example.com/docs/page)");
}

#[test]
fn one_bad_file_does_not_stop_the_walk() {
    mill_logging::initialize_for_tests();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    write(&src.path().join("good.html"), PAGE);
    write(&src.path().join("sub/also_good.html"), PAGE);
    // UTF-8 BOM followed by bytes that are not valid UTF-8.
    fs::write(src.path().join("bad.html"), b"\xEF\xBB\xBF\xFF\xFE<p>x</p>").unwrap();

    let summary = convert_tree(&options(src.path(), dst.path())).unwrap();

    assert!(dst.path().join("good.md").is_file());
    assert!(dst.path().join("sub/also_good.md").is_file());
    assert!(!dst.path().join("bad.md").exists());

    assert_eq!(summary.converted, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].relative_path.contains("bad.html"));
    assert!(!summary.failures[0].message.is_empty());
}

#[test]
fn missing_source_directory_is_fatal() {
    mill_logging::initialize_for_tests();
    let dst = TempDir::new().unwrap();
    let missing = dst.path().join("does_not_exist");

    let result = convert_tree(&options(&missing, &dst.path().join("out")));
    assert!(matches!(result, Err(WalkError::ReadDir { .. })));
}

#[test]
fn entries_are_processed_in_lexicographic_order() {
    mill_logging::initialize_for_tests();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    write(&src.path().join("zebra.html"), PAGE);
    write(&src.path().join("alpha.html"), PAGE);
    write(&src.path().join("mid.html"), PAGE);

    let summary = convert_tree(&options(src.path(), dst.path())).unwrap();
    let order: Vec<&str> = summary
        .documents
        .iter()
        .map(|d| d.relative_path.as_str())
        .collect();
    assert_eq!(order, vec!["alpha.md", "mid.md", "zebra.md"]);
}

#[test]
fn rerun_overwrites_existing_output() {
    mill_logging::initialize_for_tests();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    write(&src.path().join("page.html"), PAGE);
    convert_tree(&options(src.path(), dst.path())).unwrap();
    write(
        &src.path().join("page.html"),
        "<body><article><p>updated</p></article></body>",
    );
    convert_tree(&options(src.path(), dst.path())).unwrap();

    let markdown = fs::read_to_string(dst.path().join("page.md")).unwrap();
    assert_eq!(markdown, "updated");
}
