//! # 布里渊区模块
//!
//! 对称操作处理、不可约 k 点到全布里渊区的展开，以及结果导出与绘图。
//!
//! ## 子模块
//! - `symmetry`: 倒空间对称矩阵与时间反演划分
//! - `expander`: 布里渊区展开算法
//! - `export`: CSV 导出
//! - `plot`: k 点分布图
//!
//! ## 依赖关系
//! - 被 `database/`, `commands/` 使用
//! - 使用 `geometry/`, `models/`

pub mod export;
pub mod expander;
pub mod plot;
pub mod symmetry;

pub use expander::{expand, expand_parallel};
pub use symmetry::{build_symmetries, SymmetryOp};
