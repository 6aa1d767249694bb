//! # 对称操作处理
//!
//! 把笛卡尔对称矩阵转换为倒空间对称矩阵（逆转置），
//! 并按时间反演把对称操作列表分为前后两半。
//!
//! ## 约定
//! 数据源已生成时间反演的一半并排在真对称操作之后。
//! 奇数个操作时两半相差一个元素，此处不做修正。
//!
//! ## 依赖关系
//! - 被 `database/latticedb.rs`, `bz/expander.rs` 使用
//! - 使用 `geometry/coords.rs` 的矩阵运算

use crate::error::{BzkitError, Result};
use crate::geometry::coords::{inverse, transpose};
use crate::geometry::Matrix3;

const IDENTITY_TOL: f64 = 1e-8;

/// 单个对称操作
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryOp {
    /// 笛卡尔空间中的线性变换
    pub sym_car: Matrix3,
    /// 作用于 k 矢量的变换 `inverse(sym_car)^T`
    pub sym_rec: Matrix3,
    /// 是否属于时间反演的一半
    pub time_reversed: bool,
}

impl SymmetryOp {
    /// 是否为恒等操作（不含时间反演）
    pub fn is_identity(&self) -> bool {
        !self.time_reversed
            && self.sym_car.iter().enumerate().all(|(i, row)| {
                row.iter().enumerate().all(|(j, v)| {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    (v - expected).abs() < IDENTITY_TOL
                })
            })
    }
}

/// 每个笛卡尔对称矩阵的逆转置
pub fn to_reciprocal_symmetries(sym_car: &[Matrix3]) -> Result<Vec<Matrix3>> {
    sym_car
        .iter()
        .enumerate()
        .map(|(index, s)| {
            inverse(s)
                .map(|inv| transpose(&inv))
                .ok_or(BzkitError::SingularSymmetry { index })
        })
        .collect()
}

/// 时间反演标记：`i >= nsym / (time_rev + 1)` 的操作带时间反演
pub fn partition_time_reversal(nsym: usize, time_rev: bool) -> Vec<bool> {
    let proper = nsym / (time_rev as usize + 1);
    (0..nsym).map(|i| i >= proper).collect()
}

/// 组合逆转置矩阵与时间反演标记
pub fn build_symmetries(sym_car: &[Matrix3], time_rev: bool) -> Result<Vec<SymmetryOp>> {
    let sym_rec = to_reciprocal_symmetries(sym_car)?;
    let flags = partition_time_reversal(sym_car.len(), time_rev);

    Ok(sym_car
        .iter()
        .zip(sym_rec)
        .zip(flags)
        .map(|((car, rec), time_reversed)| SymmetryOp {
            sym_car: *car,
            sym_rec: rec,
            time_reversed,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Matrix3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    #[test]
    fn test_reciprocal_of_rotation_is_itself() {
        // 正交矩阵的逆转置等于自身
        let c4 = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let rec = to_reciprocal_symmetries(&[c4]).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert!((rec[0][i][j] - c4[i][j]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_reciprocal_of_shear() {
        let s = [[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let rec = to_reciprocal_symmetries(&[s]).unwrap();
        let expected = [[1.0, 0.0, 0.0], [-1.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_eq!(rec[0], expected);
    }

    #[test]
    fn test_singular_symmetry() {
        let singular = [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            to_reciprocal_symmetries(&[E, singular]),
            Err(BzkitError::SingularSymmetry { index: 1 })
        ));
    }

    #[test]
    fn test_partition_without_time_reversal() {
        assert_eq!(partition_time_reversal(4, false), vec![false; 4]);
    }

    #[test]
    fn test_partition_with_time_reversal() {
        assert_eq!(
            partition_time_reversal(4, true),
            vec![false, false, true, true]
        );
    }

    #[test]
    fn test_partition_odd_count() {
        // 5 / 2 = 2：前 2 个为真对称操作，后 3 个带时间反演
        assert_eq!(
            partition_time_reversal(5, true),
            vec![false, false, true, true, true]
        );
    }

    #[test]
    fn test_build_symmetries() {
        let minus_e = [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]];
        let ops = build_symmetries(&[E, minus_e], true).unwrap();
        assert_eq!(ops.len(), 2);
        assert!(ops[0].is_identity());
        assert!(!ops[1].is_identity());
        assert!(ops[1].time_reversed);
        assert_eq!(ops[1].sym_rec, minus_e);
    }
}
