use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logseq-blog")]
#[command(about = "Convert Logseq pages and journals marked `type:: blog` into Hugo posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Markdown file, or a graph directory to scan recursively
    pub input: PathBuf,

    /// Hugo content directory (defaults to `output_path` from the config file)
    pub output: Option<PathBuf>,

    /// Use this config file instead of ~/.config/logseq-blog/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Publish posts whatever their status
    #[arg(long)]
    pub include_drafts: bool,

    /// Report what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
