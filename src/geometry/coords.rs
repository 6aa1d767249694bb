//! # 坐标变换
//!
//! 笛卡尔坐标 ↔ 约化坐标转换，以及由实空间晶格向量构造倒格子。
//!
//! ## 约定
//! - 基矢矩阵按行存放：`basis[i]` 为第 i 个基矢
//! - 约化坐标 x 满足 `v = x0*b0 + x1*b1 + x2*b2`，即 `basis^T · x = v`
//! - 倒格子不含 2π 因子：`a_i · b_j = δ_ij`
//!
//! ## 依赖关系
//! - 被 `database/latticedb.rs`, `bz/` 调用
//! - 纯数值计算，无外部依赖

use super::{Matrix3, Vector3};
use crate::error::{BzkitError, Result};

/// 奇异判定的相对容差（相对于三行范数之积）
const SINGULAR_TOL: f64 = 1e-10;

/// 向量点积
pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// 向量叉积
pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: &Vector3) -> f64 {
    dot(a, a).sqrt()
}

/// 矩阵乘向量 `m · v`
pub fn mat_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
    [dot(&m[0], v), dot(&m[1], v), dot(&m[2], v)]
}

/// 矩阵转置
pub fn transpose(m: &Matrix3) -> Matrix3 {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// 行列式
pub fn determinant(m: &Matrix3) -> f64 {
    dot(&m[0], &cross(&m[1], &m[2]))
}

/// 行列式相对于行范数之积是否可忽略
fn is_singular(m: &Matrix3, det: f64) -> bool {
    let scale = norm(&m[0]) * norm(&m[1]) * norm(&m[2]);
    !det.is_finite() || det.abs() <= SINGULAR_TOL * scale
}

/// 矩阵求逆，奇异时返回 `None`
pub fn inverse(m: &Matrix3) -> Option<Matrix3> {
    let det = determinant(m);
    if is_singular(m, det) {
        return None;
    }

    // 伴随矩阵：逆矩阵的第 j 列为 m 另外两行的叉积
    let c0 = cross(&m[1], &m[2]);
    let c1 = cross(&m[2], &m[0]);
    let c2 = cross(&m[0], &m[1]);

    Some([
        [c0[0] / det, c1[0] / det, c2[0] / det],
        [c0[1] / det, c1[1] / det, c2[1] / det],
        [c0[2] / det, c1[2] / det, c2[2] / det],
    ])
}

/// 笛卡尔 → 约化坐标的线性映射 `(basis^T)^-1`
pub fn reduced_transform(basis: &Matrix3) -> Result<Matrix3> {
    inverse(&transpose(basis)).ok_or(BzkitError::SingularBasis)
}

/// 笛卡尔坐标转约化坐标
pub fn cartesian_to_reduced(vectors: &[Vector3], basis: &Matrix3) -> Result<Vec<Vector3>> {
    let to_reduced = reduced_transform(basis)?;
    Ok(vectors.iter().map(|v| mat_vec(&to_reduced, v)).collect())
}

/// 约化坐标转笛卡尔坐标
pub fn reduced_to_cartesian(reduced: &[Vector3], basis: &Matrix3) -> Vec<Vector3> {
    reduced
        .iter()
        .map(|r| {
            [
                r[0] * basis[0][0] + r[1] * basis[1][0] + r[2] * basis[2][0],
                r[0] * basis[0][1] + r[1] * basis[1][1] + r[2] * basis[2][1],
                r[0] * basis[0][2] + r[1] * basis[1][2] + r[2] * basis[2][2],
            ]
        })
        .collect()
}

/// 计算倒格子：b1 = (a2×a3)/V, b2 = (a3×a1)/V, b3 = (a1×a2)/V
pub fn reciprocal_lattice(basis: &Matrix3) -> Result<Matrix3> {
    let [a1, a2, a3] = *basis;

    // 体积 V = a1 · (a2 × a3)
    let a2_cross_a3 = cross(&a2, &a3);
    let volume = dot(&a1, &a2_cross_a3);

    if is_singular(basis, volume) {
        return Err(BzkitError::DegenerateLattice { volume });
    }

    let a3_cross_a1 = cross(&a3, &a1);
    let a1_cross_a2 = cross(&a1, &a2);

    let scale = |v: Vector3| [v[0] / volume, v[1] / volume, v[2] / volume];

    Ok([scale(a2_cross_a3), scale(a3_cross_a1), scale(a1_cross_a2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexagonal() -> Matrix3 {
        let a = 4.65;
        let c = 12.2;
        [
            [a, 0.0, 0.0],
            [-0.5 * a, 0.5 * 3.0_f64.sqrt() * a, 0.0],
            [0.0, 0.0, c],
        ]
    }

    #[test]
    fn test_reciprocal_orthogonality() {
        let lat = hexagonal();
        let rlat = reciprocal_lattice(&lat).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((dot(&lat[i], &rlat[j]) - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_reciprocal_cubic() {
        let lat = [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]];
        let rlat = reciprocal_lattice(&lat).unwrap();
        assert!((rlat[0][0] - 0.5).abs() < 1e-12);
        assert!((rlat[1][1] - 0.5).abs() < 1e-12);
        assert!((rlat[2][2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reciprocal_degenerate() {
        let lat = [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            reciprocal_lattice(&lat),
            Err(BzkitError::DegenerateLattice { .. })
        ));
    }

    #[test]
    fn test_coordinate_round_trip() {
        let basis = reciprocal_lattice(&hexagonal()).unwrap();
        let vectors = vec![[0.1, -0.2, 0.05], [0.0, 0.0, 0.0], [1.3, 0.7, -2.1]];

        let reduced = cartesian_to_reduced(&vectors, &basis).unwrap();
        let back = reduced_to_cartesian(&reduced, &basis);

        for (v, b) in vectors.iter().zip(back.iter()) {
            for i in 0..3 {
                assert!((v[i] - b[i]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_reduced_of_basis_vector() {
        let basis = hexagonal();
        let reduced = cartesian_to_reduced(&[basis[1]], &basis).unwrap();
        assert!((reduced[0][0]).abs() < 1e-12);
        assert!((reduced[0][1] - 1.0).abs() < 1e-12);
        assert!((reduced[0][2]).abs() < 1e-12);
    }

    #[test]
    fn test_singular_basis() {
        let basis = [[1.0, 1.0, 0.0], [2.0, 2.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            cartesian_to_reduced(&[[1.0, 0.0, 0.0]], &basis),
            Err(BzkitError::SingularBasis)
        ));
    }

    #[test]
    fn test_inverse() {
        let m = [[2.0, 1.0, 0.0], [0.0, 1.0, 3.0], [1.0, 0.0, 1.0]];
        let inv = inverse(&m).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                let col = [inv[0][j], inv[1][j], inv[2][j]];
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((dot(&m[i], &col) - expected).abs() < 1e-12);
            }
        }

        assert!(inverse(&[[0.0; 3]; 3]).is_none());
    }
}
