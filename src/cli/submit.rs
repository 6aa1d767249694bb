//! # submit 子命令 CLI 定义
//!
//! 把命令包装成本地或集群作业。资源参数可来自 JSON 配置文件，
//! 命令行给出的值覆盖文件中的值。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/submit.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 调度器选择
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SchedulerChoice {
    /// Run directly in bash
    Bash,
    /// PBS / Torque (qsub)
    Pbs,
    /// OAR (oarsub)
    Oar,
    /// Slurm (sbatch)
    Slurm,
}

/// submit 子命令参数
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Scheduler to use
    #[arg(long, value_enum, default_value = "bash")]
    pub scheduler: SchedulerChoice,

    /// Plain command, repeatable, kept in order
    #[arg(long = "command")]
    pub commands: Vec<String>,

    /// Command launched through mpirun, repeatable, appended after --command
    #[arg(long = "mpirun")]
    pub mpirun_commands: Vec<String>,

    /// JSON file with scheduler resources
    #[arg(long)]
    pub config: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // Resource overrides
    // ─────────────────────────────────────────────────────────────
    /// Job name
    #[arg(long)]
    pub name: Option<String>,

    /// Number of nodes
    #[arg(long)]
    pub nodes: Option<u32>,

    /// Cores per node
    #[arg(long)]
    pub cores: Option<u32>,

    /// Time limit (HH:MM:SS)
    #[arg(long)]
    pub walltime: Option<String>,

    /// Queue or partition
    #[arg(long)]
    pub queue: Option<String>,

    /// Memory request
    #[arg(long)]
    pub memory: Option<String>,

    /// mpirun executable
    #[arg(long = "mpirun-exec")]
    pub mpirun_exec: Option<String>,

    /// Modules to load (comma-separated)
    #[arg(long)]
    pub modules: Option<String>,

    /// Working directory for the script and submission
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Print the script without running or submitting it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
