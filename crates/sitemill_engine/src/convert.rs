use std::fs;
use std::path::Path;

use crate::decode::decode_html;
use crate::extract::{Extractor, ReadabilityLikeExtractor};
use crate::persist::write_atomic;
use crate::render::{collapse_blank_lines, MarkdownRenderer, RenderOptions};
use crate::rewrite::rewrite_links;
use crate::types::ConvertError;

/// Result of converting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOutcome {
    pub title: Option<String>,
    pub bytes_written: u64,
}

/// One of the two interchangeable per-file conversion strategies. Selected
/// once at startup; failures are per-file and never abort the traversal.
pub trait ConvertStrategy: Send + Sync {
    fn convert_file(&self, source: &Path, target: &Path) -> Result<ConvertOutcome, ConvertError>;
}

/// In-process pipeline: read, decode, rewrite links, extract the main
/// content, render to Markdown, write atomically.
pub struct PipelineStrategy {
    domain: Option<String>,
    extractor: Box<dyn Extractor>,
    renderer: MarkdownRenderer,
}

impl PipelineStrategy {
    pub fn new(domain: Option<String>, render_options: RenderOptions) -> Self {
        Self {
            domain,
            extractor: Box::new(ReadabilityLikeExtractor),
            renderer: MarkdownRenderer::new(render_options),
        }
    }
}

impl ConvertStrategy for PipelineStrategy {
    fn convert_file(&self, source: &Path, target: &Path) -> Result<ConvertOutcome, ConvertError> {
        let bytes = fs::read(source)?;
        let decoded = decode_html(&bytes)?;

        let html = match &self.domain {
            Some(domain) => rewrite_links(&decoded.html, domain),
            None => decoded.html,
        };

        let extracted = self.extractor.extract(&html);
        let markdown = collapse_blank_lines(&self.renderer.render(&extracted.content_html));

        let bytes_written = write_atomic(target, &markdown)?;
        Ok(ConvertOutcome {
            title: extracted.title,
            bytes_written,
        })
    }
}
