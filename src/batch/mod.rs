//! # 批量展开模块
//!
//! 在目录中查找多个数据库并逐个展开。
//!
//! ## 功能
//! - 按文件名模式收集数据库
//! - 并行处理
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/expand.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::DatabaseCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
