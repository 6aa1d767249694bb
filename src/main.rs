//! # bzkit - 布里渊区 k 点展开工具
//!
//! 读取 DFT 预处理得到的格点数据库，借助晶体对称操作把不可约布里渊区的
//! k 点展开到整个布里渊区，并附带本地与集群作业的脚本封装。
//!
//! ## 子命令
//! - `info`   - 查看数据库内容
//! - `expand` - 展开 k 点（单文件 / 批量目录）
//! - `submit` - 生成并运行 bash / PBS / OAR / Slurm 作业
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── database/  (数据库读取)
//!   │     ├── bz/        (对称处理与展开)
//!   │     ├── geometry/  (坐标变换与成员判定)
//!   │     ├── batch/     (批量处理)
//!   │     ├── scheduler/ (作业脚本)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod bz;
mod cli;
mod commands;
mod database;
mod error;
mod geometry;
mod models;
mod scheduler;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
