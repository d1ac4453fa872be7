use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use mill_logging::{mill_debug, mill_info, mill_warn};

use crate::convert::{ConvertStrategy, PipelineStrategy};
use crate::markitdown::MarkitdownStrategy;
use crate::options::ConvertOptions;
use crate::persist::ensure_dir;
use crate::render::RenderOptions;
use crate::types::{ConvertedDoc, FileFailure, RunSummary, WalkError};

/// Mirror the source tree into the target tree, converting every
/// `.html`/`.htm` file to a sibling-named `.md` file.
///
/// Per-file failures are logged and counted; only a missing or unreadable
/// source directory is fatal. Directory entries are processed in
/// lexicographic filename order, subdirectories depth-first.
pub fn convert_tree(options: &ConvertOptions) -> Result<RunSummary, WalkError> {
    mill_info!(
        "converting {} -> {}",
        options.source_dir.display(),
        options.target_dir.display()
    );

    let strategy: Box<dyn ConvertStrategy> = if options.use_markitdown {
        Box::new(MarkitdownStrategy::new(
            options.markitdown_command.clone(),
            options.domain.clone(),
        ))
    } else {
        Box::new(PipelineStrategy::new(
            options.domain.clone(),
            RenderOptions::default(),
        ))
    };

    let mut summary = RunSummary::default();
    walk_dir(
        &options.source_dir,
        &options.target_dir,
        Path::new(""),
        strategy.as_ref(),
        &mut summary,
    )?;

    mill_info!(
        "done: {} converted, {} skipped, {} failed",
        summary.converted,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

fn walk_dir(
    source_root: &Path,
    target_root: &Path,
    rel: &Path,
    strategy: &dyn ConvertStrategy,
    summary: &mut RunSummary,
) -> Result<(), WalkError> {
    let current_source = source_root.join(rel);
    let current_target = target_root.join(rel);

    // Mirror invariant: the target directory exists before any write below it.
    ensure_dir(&current_target).map_err(|e| WalkError::TargetDir {
        path: current_target.clone(),
        source: e,
    })?;

    let entries = fs::read_dir(&current_source).map_err(|e| WalkError::ReadDir {
        path: current_source.clone(),
        source: e,
    })?;
    let mut entries: Vec<fs::DirEntry> =
        entries
            .collect::<Result<_, _>>()
            .map_err(|e| WalkError::ReadDir {
                path: current_source.clone(),
                source: e,
            })?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        let child_rel = rel.join(&name);

        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(err) => {
                record_failure(summary, &child_rel, &err.to_string());
                continue;
            }
        };

        if file_type.is_dir() {
            walk_dir(source_root, target_root, &child_rel, strategy, summary)?;
        } else if file_type.is_file() && has_html_extension(&name) {
            let target_rel = child_rel.with_extension("md");
            let target_path = target_root.join(&target_rel);
            match strategy.convert_file(&entry.path(), &target_path) {
                Ok(outcome) => {
                    mill_info!("converted {}", child_rel.display());
                    summary.converted += 1;
                    summary.documents.push(ConvertedDoc {
                        relative_path: target_rel.display().to_string(),
                        title: outcome.title,
                        markdown_bytes: outcome.bytes_written,
                    });
                }
                Err(err) => record_failure(summary, &child_rel, &err.to_string()),
            }
        } else {
            mill_debug!("skipping {}", child_rel.display());
            summary.skipped += 1;
        }
    }
    Ok(())
}

fn record_failure(summary: &mut RunSummary, rel: &Path, message: &str) {
    mill_warn!("failed to convert {}: {}", rel.display(), message);
    summary.failed += 1;
    summary.failures.push(FileFailure {
        relative_path: rel.display().to_string(),
        message: message.to_string(),
    });
}

fn has_html_extension(name: &OsStr) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}
