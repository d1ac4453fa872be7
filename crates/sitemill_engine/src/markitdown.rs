use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;

use crate::convert::{ConvertOutcome, ConvertStrategy};
use crate::decode::decode_html;
use crate::persist::write_atomic;
use crate::rewrite::rewrite_links;
use crate::types::ConvertError;

/// External-tool strategy: hand the HTML file to a command-line converter
/// (markitdown by default) and capture its stdout.
///
/// When a domain is configured, the source is decoded and link-rewritten into
/// a temporary file next to the original first; the temp file is removed on
/// every exit path when it drops. The target file is only written after the
/// tool exits successfully, so a failed invocation never leaves partial
/// output behind.
pub struct MarkitdownStrategy {
    command: String,
    domain: Option<String>,
}

impl MarkitdownStrategy {
    pub fn new(command: impl Into<String>, domain: Option<String>) -> Self {
        Self {
            command: command.into(),
            domain,
        }
    }

    /// Rewrites links into a sibling temp file, returning the guard that owns
    /// it and the path to feed the tool.
    fn rewrite_to_temp(
        &self,
        source: &Path,
        domain: &str,
    ) -> Result<(NamedTempFile, PathBuf), ConvertError> {
        let bytes = fs::read(source)?;
        let decoded = decode_html(&bytes)?;
        let rewritten = rewrite_links(&decoded.html, domain);

        let dir = source.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::Builder::new()
            .prefix(".sitemill-")
            .suffix(".html")
            .tempfile_in(dir)?;
        tmp.write_all(rewritten.as_bytes())?;
        tmp.flush()?;
        let path = tmp.path().to_path_buf();
        Ok((tmp, path))
    }
}

impl ConvertStrategy for MarkitdownStrategy {
    fn convert_file(&self, source: &Path, target: &Path) -> Result<ConvertOutcome, ConvertError> {
        let mut _temp_guard = None;
        let input_path = match &self.domain {
            Some(domain) => {
                let (guard, path) = self.rewrite_to_temp(source, domain)?;
                _temp_guard = Some(guard);
                path
            }
            None => source.to_path_buf(),
        };

        let output = Command::new(&self.command)
            .arg(&input_path)
            .output()
            .map_err(|e| ConvertError::Tool(format!("failed to run {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::Tool(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let markdown = String::from_utf8_lossy(&output.stdout);
        let bytes_written = write_atomic(target, &markdown)?;
        Ok(ConvertOutcome {
            title: None,
            bytes_written,
        })
    }
}
