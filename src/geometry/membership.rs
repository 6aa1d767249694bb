//! # 向量集合成员判定
//!
//! 判断一个向量是否已在列表中（逐分量容差比较），
//! 用于展开 k 点时去重。
//!
//! 每次调用 O(n)。轨道大小受点群阶数限制（通常 ≤ 48），线性扫描足够。
//!
//! ## 依赖关系
//! - 被 `bz/expander.rs` 调用

use super::Vector3;

/// 逐分量满足 `|a - b| <= tol + tol * |b|`
fn all_close(a: &Vector3, b: &Vector3, tol: f64) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (x - y).abs() <= tol + tol * y.abs())
}

/// `list` 中是否存在与 `vec` 在容差内相等的向量
pub fn contains(vec: &Vector3, list: &[Vector3], tol: f64) -> bool {
    list.iter().any(|other| all_close(vec, other, tol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_exact_and_close() {
        let list = vec![[0.1, 0.2, 0.3], [0.5, 0.5, 0.0]];
        assert!(contains(&[0.1, 0.2, 0.3], &list, 1e-6));
        assert!(contains(&[0.5 + 5e-7, 0.5, 0.0], &list, 1e-6));
        assert!(!contains(&[0.5 + 1e-4, 0.5, 0.0], &list, 1e-6));
    }

    #[test]
    fn test_contains_requires_every_component() {
        let list = vec![[0.1, 0.2, 0.3]];
        assert!(!contains(&[0.1, 0.2, 0.4], &list, 1e-6));
    }

    #[test]
    fn test_contains_empty_list() {
        assert!(!contains(&[0.0, 0.0, 0.0], &[], 1e-6));
    }
}
