//! # 几何与坐标模块
//!
//! 提供笛卡尔坐标与约化（分数）坐标之间的转换、倒格子计算，
//! 以及基于容差的向量集合成员判定。
//!
//! ## 依赖关系
//! - 被 `database/`, `bz/` 使用
//! - 子模块: coords, membership

pub mod coords;
pub mod membership;

pub use coords::{cartesian_to_reduced, reciprocal_lattice, reduced_to_cartesian};
pub use membership::contains;

/// 三维向量
pub type Vector3 = [f64; 3];

/// 3x3 矩阵，行优先
pub type Matrix3 = [[f64; 3]; 3];
