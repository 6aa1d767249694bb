//! # 数据模型模块
//!
//! 定义晶体结构与布里渊区展开结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `database/`, `bz/` 和 `commands/` 使用
//! - 子模块: structure, kpoints

pub mod kpoints;
pub mod structure;

pub use kpoints::BzExpansion;
pub use structure::{Atom, Lattice};
