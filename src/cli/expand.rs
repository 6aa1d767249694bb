//! # expand 子命令 CLI 定义
//!
//! 输入为文件时单独展开，为目录时批量展开其中所有匹配的数据库。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/expand.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// k 点分布图格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Svg,
}

impl PlotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

/// expand 子命令参数
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Lattice database file or directory
    pub input: PathBuf,

    /// Database filename pattern in batch mode (comma-separated globs)
    #[arg(long, default_value = "ns.db1*")]
    pub filename: String,

    /// Search the whole directory tree (`<dir>` and `<dir>/SAVE` are always searched)
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Full-zone k-point CSV (single mode: file path; batch mode: output directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Full expansion as JSON (single mode only)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Irreducible weights CSV (single mode only)
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// K-point distribution plot (single mode only)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot format, inferred from the plot extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<PlotFormat>,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Number of weight table rows to print
    #[arg(long, default_value_t = 20)]
    pub top_n: usize,
}
