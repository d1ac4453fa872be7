//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use sitemill_engine::ConvertOptions;

/// Convert a directory tree of HTML documents into Markdown.
///
/// Sitemill mirrors the source directory layout under the target directory,
/// converting every `.html`/`.htm` file into a same-named `.md` file. All
/// other files are left out of the output tree.
#[derive(Parser, Debug)]
#[command(name = "sitemill")]
#[command(author, version, about)]
pub struct Args {
    /// Source directory containing HTML files
    #[arg(short, long, default_value = "./html_files")]
    pub source: PathBuf,

    /// Target directory for the Markdown output
    #[arg(short, long, default_value = "./markdown_files")]
    pub target: PathBuf,

    /// Convert with the external markitdown tool instead of the in-process pipeline
    #[arg(short = 'm', long)]
    pub use_markitdown: bool,

    /// Domain prefix for root-relative links; an empty value disables rewriting
    #[arg(short, long, default_value = "domain.com")]
    pub domain: String,

    /// Executable to invoke when --use-markitdown is set
    #[arg(long, default_value = "markitdown")]
    pub markitdown_cmd: String,

    /// Write conversion-manifest.json into the target root
    #[arg(long)]
    pub manifest: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            source_dir: self.source.clone(),
            target_dir: self.target.clone(),
            use_markitdown: self.use_markitdown,
            domain: if self.domain.is_empty() {
                None
            } else {
                Some(self.domain.clone())
            },
            markitdown_command: self.markitdown_cmd.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_args_parse_successfully() {
        let args = Args::try_parse_from(["sitemill"]).unwrap();
        assert_eq!(args.source, PathBuf::from("./html_files"));
        assert_eq!(args.target, PathBuf::from("./markdown_files"));
        assert!(!args.use_markitdown);
        assert_eq!(args.domain, "domain.com");
        assert_eq!(args.markitdown_cmd, "markitdown");
        assert!(!args.manifest);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn source_and_target_flags_override_defaults() {
        let args = Args::try_parse_from(["sitemill", "-s", "in", "--target", "out"]).unwrap();
        assert_eq!(args.source, PathBuf::from("in"));
        assert_eq!(args.target, PathBuf::from("out"));
    }

    #[test]
    fn markitdown_flag_selects_external_strategy() {
        let args = Args::try_parse_from(["sitemill", "-m"]).unwrap();
        assert!(args.use_markitdown);
        assert!(args.to_options().use_markitdown);
    }

    #[test]
    fn empty_domain_disables_rewriting() {
        let args = Args::try_parse_from(["sitemill", "-d", ""]).unwrap();
        assert_eq!(args.to_options().domain, None);

        let args = Args::try_parse_from(["sitemill", "-d", "example.com"]).unwrap();
        assert_eq!(args.to_options().domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn help_flag_shows_usage() {
        // --help causes early exit, so we check it returns an error with Help kind
        let result = Args::try_parse_from(["sitemill", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let result = Args::try_parse_from(["sitemill", "--invalid-flag"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn verbose_flag_increments_count() {
        let args = Args::try_parse_from(["sitemill", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
