//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `info`: 查看格点数据库内容
//! - `expand`: 把不可约 k 点展开到全布里渊区（单文件或批量）
//! - `submit`: 生成并提交 bash / PBS / OAR / Slurm 作业
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: info, expand, submit

pub mod expand;
pub mod info;
pub mod submit;

use clap::{Parser, Subcommand};

/// bzkit - 布里渊区 k 点展开工具
#[derive(Parser)]
#[command(name = "bzkit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Expand irreducible k-points to the full Brillouin zone", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show lattice, atoms, symmetries and k-points of a lattice database
    Info(info::InfoArgs),

    /// Expand irreducible k-points to the full Brillouin zone
    Expand(expand::ExpandArgs),

    /// Build and run a job script (bash, PBS, OAR, Slurm)
    Submit(submit::SubmitArgs),
}
