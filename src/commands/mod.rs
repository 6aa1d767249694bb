//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `database/`, `bz/`, `batch/`, `scheduler/`, `utils/`
//! - 子模块: info, expand, submit

pub mod expand;
pub mod info;
pub mod submit;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Info(args) => info::execute(args),
        Commands::Expand(args) => expand::execute(args),
        Commands::Submit(args) => submit::execute(args),
    }
}
