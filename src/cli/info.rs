//! # info 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/info.rs`

use clap::Args;
use std::path::PathBuf;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Lattice database file, or a directory containing it (or its SAVE/)
    pub input: PathBuf,

    /// Database filename looked up inside a directory
    #[arg(long, default_value = "ns.db1")]
    pub filename: String,

    /// Also list the irreducible k-points
    #[arg(long, default_value_t = false)]
    pub kpoints: bool,
}
