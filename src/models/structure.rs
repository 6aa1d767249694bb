//! # 晶体结构数据模型
//!
//! 晶格向量、晶格常数与原子信息。从晶格数据库读取后不再修改。
//!
//! ## 依赖关系
//! - 被 `database/` 和 `commands/` 使用
//! - 使用 `geometry/` 计算倒格子

use crate::error::Result;
use crate::geometry::{self, Matrix3, Vector3};


/// 实空间晶格
#[derive(Debug, Clone)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a1, a2, a3
    pub matrix: Matrix3,

    /// 晶格常数，用于把内部 k 空间单位换算为笛卡尔单位
    pub alat: Vector3,
}

impl Lattice {
    /// 从晶格向量矩阵与晶格常数创建
    pub fn new(matrix: Matrix3, alat: Vector3) -> Self {
        Lattice { matrix, alat }
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)，角度单位：度
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let [a_vec, b_vec, c_vec] = self.matrix;

        let a = geometry::coords::dot(&a_vec, &a_vec).sqrt();
        let b = geometry::coords::dot(&b_vec, &b_vec).sqrt();
        let c = geometry::coords::dot(&c_vec, &c_vec).sqrt();

        let alpha = (geometry::coords::dot(&b_vec, &c_vec) / (b * c))
            .acos()
            .to_degrees();
        let beta = (geometry::coords::dot(&a_vec, &c_vec) / (a * c))
            .acos()
            .to_degrees();
        let gamma = (geometry::coords::dot(&a_vec, &b_vec) / (a * b))
            .acos()
            .to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 计算晶格体积（带符号）
    pub fn volume(&self) -> f64 {
        geometry::coords::determinant(&self.matrix)
    }

    /// 倒格子（不含 2π）
    pub fn reciprocal(&self) -> Result<Matrix3> {
        geometry::reciprocal_lattice(&self.matrix)
    }
}

/// 原子信息
#[derive(Debug, Clone)]
pub struct Atom {
    /// 原子序数
    pub atomic_number: u32,

    /// 元素符号
    pub symbol: String,

    /// 原子质量 (amu)
    pub mass: f64,

    /// 原子坐标，按数据库原样保存
    pub position: Vector3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_parameters_hexagonal() {
        let a = 3.0;
        let lattice = Lattice::new(
            [
                [a, 0.0, 0.0],
                [-0.5 * a, 0.5 * 3.0_f64.sqrt() * a, 0.0],
                [0.0, 0.0, 5.0],
            ],
            [a, a, 5.0],
        );
        let (la, lb, lc, alpha, beta, gamma) = lattice.parameters();

        assert!((la - 3.0).abs() < 1e-9);
        assert!((lb - 3.0).abs() < 1e-9);
        assert!((lc - 5.0).abs() < 1e-9);
        assert!((alpha - 90.0).abs() < 1e-9);
        assert!((beta - 90.0).abs() < 1e-9);
        assert!((gamma - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_lattice_volume_cubic() {
        let lattice = Lattice::new(
            [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]],
            [5.0, 5.0, 5.0],
        );
        assert!((lattice.volume() - 125.0).abs() < 1e-9);
    }
}
