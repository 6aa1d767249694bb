//! # 布里渊区展开
//!
//! 把不可约 k 点在全部对称操作下展开为全布里渊区 k 点。
//!
//! ## 算法概述
//! 对每个不可约 k 点（外层循环）与每个对称操作（内层循环，按列表顺序）：
//! 1. `new_k = S · k`（笛卡尔）
//! 2. 转换为倒格子约化坐标
//! 3. 折叠到参考胞：`(reduced + 1e-6) mod 1`
//! 4. 若折叠后的点不在该不可约点的轨道中，记录 `new_k`、不可约索引与对称索引
//!
//! 同一轨道内先出现的对称操作优先，因此输出顺序完全确定。
//! 权重 = 轨道大小 / 全区 k 点总数。
//!
//! ## 依赖关系
//! - 被 `database/latticedb.rs` 调用
//! - 使用 `geometry/` 的坐标变换与成员判定
//! - 使用 `rayon` 按不可约 k 点并行

use super::symmetry::SymmetryOp;
use crate::error::{BzkitError, Result};
use crate::geometry::coords::{mat_vec, reduced_transform};
use crate::geometry::{self, Matrix3, Vector3};
use crate::models::BzExpansion;

use rayon::prelude::*;

/// 折叠前加到约化坐标上的偏移，使边界上的点统一落到同一侧
pub const FOLD_SHIFT: f64 = 1e-6;

/// 轨道去重容差
pub const MEMBERSHIP_TOL: f64 = 1e-6;

/// 轨道中的一个成员：全区 k 点（笛卡尔）与生成它的对称操作索引
type OrbitMember = (Vector3, usize);

/// 折叠到 [0, 1)
fn fold(reduced: &Vector3) -> Vector3 {
    [
        (reduced[0] + FOLD_SHIFT).rem_euclid(1.0),
        (reduced[1] + FOLD_SHIFT).rem_euclid(1.0),
        (reduced[2] + FOLD_SHIFT).rem_euclid(1.0),
    ]
}

/// 计算单个不可约 k 点的轨道
fn orbit(kpoint: &Vector3, symmetries: &[SymmetryOp], to_reduced: &Matrix3) -> Vec<OrbitMember> {
    let mut folded: Vec<Vector3> = Vec::with_capacity(symmetries.len());
    let mut members = Vec::with_capacity(symmetries.len());

    for (ns, op) in symmetries.iter().enumerate() {
        let new_k = mat_vec(&op.sym_car, kpoint);
        let k_bz = fold(&mat_vec(to_reduced, &new_k));

        if !geometry::contains(&k_bz, &folded, MEMBERSHIP_TOL) {
            folded.push(k_bz);
            members.push((new_k, ns));
        }
    }

    members
}

/// 按不可约索引顺序拼接各轨道，计算权重与约化坐标
fn assemble(orbits: Vec<Vec<OrbitMember>>, rlat: &Matrix3) -> Result<BzExpansion> {
    let total: usize = orbits.iter().map(Vec::len).sum();

    let weights = orbits
        .iter()
        .map(|o| {
            if total == 0 {
                0.0
            } else {
                o.len() as f64 / total as f64
            }
        })
        .collect();

    let mut full_kpoints = Vec::with_capacity(total);
    let mut irreducible_index_of = Vec::with_capacity(total);
    let mut symmetry_index_of = Vec::with_capacity(total);

    for (nk, members) in orbits.into_iter().enumerate() {
        for (kpoint, ns) in members {
            full_kpoints.push(kpoint);
            irreducible_index_of.push(nk);
            symmetry_index_of.push(ns);
        }
    }

    // 从最终的笛卡尔列表重新计算，不复用折叠过程中的中间值
    let full_reduced = geometry::cartesian_to_reduced(&full_kpoints, rlat)?;

    Ok(BzExpansion {
        full_kpoints,
        full_reduced,
        irreducible_index_of,
        symmetry_index_of,
        weights,
    })
}

/// 顺序展开
pub fn expand(
    kpoints: &[Vector3],
    symmetries: &[SymmetryOp],
    rlat: &Matrix3,
) -> Result<BzExpansion> {
    let to_reduced = reduced_transform(rlat)?;

    let orbits = kpoints
        .iter()
        .map(|k| orbit(k, symmetries, &to_reduced))
        .collect();

    assemble(orbits, rlat)
}

/// 按不可约 k 点并行展开（`jobs = 0` 使用全部核心）
///
/// 每个轨道内部仍按对称操作顺序计算，结果按不可约索引收集，
/// 与 [`expand`] 逐位一致。
pub fn expand_parallel(
    kpoints: &[Vector3],
    symmetries: &[SymmetryOp],
    rlat: &Matrix3,
    jobs: usize,
) -> Result<BzExpansion> {
    let to_reduced = reduced_transform(rlat)?;
    let jobs = if jobs == 0 { num_cpus::get() } else { jobs };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| BzkitError::Other(format!("Failed to build thread pool: {}", e)))?;

    let orbits: Vec<Vec<OrbitMember>> = pool.install(|| {
        kpoints
            .par_iter()
            .map(|k| orbit(k, symmetries, &to_reduced))
            .collect()
    });

    assemble(orbits, rlat)
}
