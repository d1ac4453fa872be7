use std::path::{Path, PathBuf};

use serde_json::json;

use crate::persist::{write_atomic, PersistError};
use crate::types::RunSummary;

pub const MANIFEST_FILENAME: &str = "conversion-manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write `conversion-manifest.json` into the target root: run counts plus one
/// record per converted document, sorted by path.
pub fn write_manifest(
    target_root: &Path,
    summary: &RunSummary,
    generated_utc: &str,
) -> Result<PathBuf, ManifestError> {
    let mut documents: Vec<_> = summary.documents.iter().collect();
    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    let manifest = json!({
        "generated_utc": generated_utc,
        "converted": summary.converted,
        "skipped": summary.skipped,
        "failed": summary.failed,
        "documents": documents.iter().map(|d| {
            json!({
                "path": d.relative_path,
                "title": d.title,
                "markdown_bytes": d.markdown_bytes,
            })
        }).collect::<Vec<_>>(),
    });

    let path = target_root.join(MANIFEST_FILENAME);
    write_atomic(&path, &serde_json::to_string_pretty(&manifest)?)?;
    Ok(path)
}
