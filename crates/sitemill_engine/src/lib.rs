//! Sitemill engine: mirrors a tree of HTML documents into Markdown.
mod convert;
mod decode;
mod extract;
mod manifest;
mod markitdown;
mod options;
mod persist;
mod render;
mod rewrite;
mod types;
mod walk;

pub use convert::{ConvertOutcome, ConvertStrategy, PipelineStrategy};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use extract::{ExtractedContent, Extractor, ReadabilityLikeExtractor};
pub use manifest::{write_manifest, ManifestError, MANIFEST_FILENAME};
pub use markitdown::MarkitdownStrategy;
pub use options::ConvertOptions;
pub use persist::{ensure_dir, write_atomic, PersistError};
pub use render::{
    collapse_blank_lines, CodeBlockStyle, HeadingStyle, MarkdownRenderer, RenderOptions,
};
pub use rewrite::rewrite_links;
pub use types::{ConvertError, ConvertedDoc, FileFailure, RunSummary, WalkError};
pub use walk::convert_tree;
