//! # 布里渊区展开结果
//!
//! 全布里渊区 k 点列表及其到不可约 k 点、对称操作的回溯索引。
//! 由 `bz::expander` 一次性构造，之后只读。
//!
//! ## 依赖关系
//! - 被 `bz/`, `commands/expand.rs` 使用

use crate::geometry::Vector3;

use serde::Serialize;

/// 全布里渊区展开结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BzExpansion {
    /// 全区 k 点（笛卡尔坐标）
    pub full_kpoints: Vec<Vector3>,

    /// 全区 k 点的约化坐标，由最终笛卡尔列表重新计算
    pub full_reduced: Vec<Vector3>,

    /// 每个全区 k 点对应的不可约 k 点索引
    pub irreducible_index_of: Vec<usize>,

    /// 每个全区 k 点对应的生成对称操作索引
    pub symmetry_index_of: Vec<usize>,

    /// 每个不可约 k 点的权重：轨道大小 / 全区 k 点总数
    pub weights: Vec<f64>,
}

impl BzExpansion {
    /// 全区 k 点数量
    pub fn len(&self) -> usize {
        self.full_kpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full_kpoints.is_empty()
    }

    /// 不可约 k 点数量
    pub fn irreducible_count(&self) -> usize {
        self.weights.len()
    }

    /// 每个不可约 k 点的轨道大小
    pub fn orbit_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.weights.len()];
        for &nk in &self.irreducible_index_of {
            sizes[nk] += 1;
        }
        sizes
    }

    /// 每个全区 k 点的权重：不可约权重平均分给其轨道成员
    pub fn full_weights(&self) -> Vec<f64> {
        let sizes = self.orbit_sizes();
        self.irreducible_index_of
            .iter()
            .map(|&nk| self.weights[nk] / sizes[nk] as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_sizes() {
        let expansion = BzExpansion {
            full_kpoints: vec![[0.0; 3]; 4],
            full_reduced: vec![[0.0; 3]; 4],
            irreducible_index_of: vec![0, 1, 1, 1],
            symmetry_index_of: vec![0, 0, 1, 2],
            weights: vec![0.25, 0.75],
        };

        assert_eq!(expansion.orbit_sizes(), vec![1, 3]);
        assert_eq!(expansion.len(), 4);
        assert_eq!(expansion.irreducible_count(), 2);
        assert!(!expansion.is_empty());
        assert_eq!(expansion.full_weights(), vec![0.25, 0.25, 0.25, 0.25]);
    }
}
