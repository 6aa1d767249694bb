//! # 晶格数据库模块
//!
//! 读取晶格向量、原子信息、对称操作和不可约 k 点。
//!
//! 底层存储只通过 [`FieldReader`] 访问：按字段名返回带形状的数组。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 使用
//! - 使用 `geometry/`, `models/`, `bz/symmetry.rs`
//! - 子模块: elements, store, latticedb

pub mod elements;
pub mod latticedb;
pub mod store;

pub use latticedb::{database_dirs, find_database, DatabaseMetadata, LatticeDatabase};
pub use store::FieldStore;

use crate::error::{BzkitError, Result};
use crate::geometry::{Matrix3, Vector3};

/// 按字段名读取数组
pub trait FieldReader {
    fn get(&self, name: &str) -> Result<FieldArray>;
}

/// 带形状的浮点数组，数据按行优先存放
#[derive(Debug, Clone, PartialEq)]
pub struct FieldArray {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl FieldArray {
    /// 创建数组，要求数据长度与形状一致
    pub fn new(name: impl Into<String>, shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let name = name.into();
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(BzkitError::FieldShape {
                field: name,
                expected: format!("a shape holding {} values", data.len()),
                found: shape,
            });
        }
        Ok(FieldArray { name, shape, data })
    }

    fn shape_error(&self, expected: &str) -> BzkitError {
        BzkitError::FieldShape {
            field: self.name.clone(),
            expected: expected.to_string(),
            found: self.shape.clone(),
        }
    }

    /// 全部数值
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// 指定位置的标量（按扁平索引）
    pub fn value_at(&self, index: usize) -> Result<f64> {
        self.data
            .get(index)
            .copied()
            .ok_or_else(|| self.shape_error(&format!("at least {} values", index + 1)))
    }

    /// 三维向量，要求恰好 3 个元素
    pub fn to_vector3(&self) -> Result<Vector3> {
        match self.data.as_slice() {
            [x, y, z] => Ok([*x, *y, *z]),
            _ => Err(self.shape_error("[3]")),
        }
    }

    /// 3x3 矩阵
    pub fn to_matrix3(&self) -> Result<Matrix3> {
        if self.shape != [3, 3] {
            return Err(self.shape_error("[3, 3]"));
        }
        let rows = rows_of_three(&self.data);
        Ok([rows[0], rows[1], rows[2]])
    }

    /// 3x3 矩阵序列，形状 `[n, 3, 3]`
    pub fn to_matrix_stack(&self) -> Result<Vec<Matrix3>> {
        match self.shape.as_slice() {
            [_, 3, 3] => Ok(self
                .data
                .chunks_exact(9)
                .map(|m| {
                    [
                        [m[0], m[1], m[2]],
                        [m[3], m[4], m[5]],
                        [m[6], m[7], m[8]],
                    ]
                })
                .collect()),
            _ => Err(self.shape_error("[n, 3, 3]")),
        }
    }

    /// 按列存放的三维向量列表：形状 `[3, n]`，转置为 n 个向量
    pub fn to_columns(&self) -> Result<Vec<Vector3>> {
        match self.shape.as_slice() {
            [3, n] => {
                let n = *n;
                Ok((0..n)
                    .map(|j| [self.data[j], self.data[n + j], self.data[2 * n + j]])
                    .collect())
            }
            _ => Err(self.shape_error("[3, n]")),
        }
    }

    /// 形状 `[m, n, 3]` 的第一个切片，返回 n 个向量
    pub fn first_slice_rows(&self) -> Result<Vec<Vector3>> {
        match self.shape.as_slice() {
            [m, n, 3] if *m > 0 => Ok(rows_of_three(&self.data[..n * 3])),
            _ => Err(self.shape_error("[m, n, 3] with m > 0")),
        }
    }
}

fn rows_of_three(data: &[f64]) -> Vec<Vector3> {
    data.chunks_exact(3).map(|r| [r[0], r[1], r[2]]).collect()
}
