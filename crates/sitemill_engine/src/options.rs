use std::path::PathBuf;

/// Configuration for one conversion run. Built once at startup and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    /// Convert through the external command instead of the in-process
    /// pipeline.
    pub use_markitdown: bool,
    /// Domain prefix for root-relative links. `None` disables rewriting.
    pub domain: Option<String>,
    /// Executable invoked when `use_markitdown` is set.
    pub markitdown_command: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./html_files"),
            target_dir: PathBuf::from("./markdown_files"),
            use_markitdown: false,
            domain: None,
            markitdown_command: "markitdown".to_string(),
        }
    }
}
