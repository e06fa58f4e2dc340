use std::path::PathBuf;

use clap::Parser;

/// Structural diff for release artifacts.
///
/// Recursively descends through gzip, tar, zip, and jar containers and
/// reports where two byte streams differ. Exits 0 when the inputs are
/// identical and 1 when they differ, like diff(1).
#[derive(Debug, Parser)]
#[command(name = "recdiff", version, about)]
pub struct Cli {
    /// First input file.
    pub file1: PathBuf,

    /// Second input file.
    pub file2: PathBuf,

    /// Emit canonical JSON instead of the ASCII tree.
    #[arg(long)]
    pub json: bool,

    /// Maximum container recursion depth (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    pub max_depth: u32,

    /// Write the report to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}
