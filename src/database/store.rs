//! # 字段存储
//!
//! 以字段名为键的数组存储，实现 [`FieldReader`]。
//!
//! ## 文件格式
//! JSON 文档，每个变量记录形状与按行优先展开的数据：
//! ```text
//! { "variables": { "LATTICE_VECTORS": { "shape": [3, 3], "data": [...] }, ... } }
//! ```
//!
//! ## 依赖关系
//! - 被 `database/latticedb.rs` 使用
//! - 使用 `serde_json` 读写文件

use super::{FieldArray, FieldReader};
use crate::error::{BzkitError, Result};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// 单个变量的存储形式
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredVariable {
    shape: Vec<usize>,
    data: Vec<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    variables: BTreeMap<String, StoredVariable>,
}

/// 内存中的字段存储，可从文件加载或保存到文件
#[derive(Debug, Default)]
pub struct FieldStore {
    variables: BTreeMap<String, StoredVariable>,
}

impl FieldStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开存储文件，文件句柄在返回前关闭
    pub fn open(path: &Path) -> Result<Self> {
        let open_error = |reason: String| BzkitError::DatabaseOpen {
            path: path.display().to_string(),
            reason,
        };

        let file = File::open(path).map_err(|e| open_error(e.to_string()))?;
        let parsed: StoreFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| open_error(e.to_string()))?;

        // 校验每个变量的形状与数据长度
        for (name, var) in &parsed.variables {
            let expected: usize = var.shape.iter().product();
            if expected != var.data.len() {
                return Err(open_error(format!(
                    "variable '{}' has shape {:?} but {} values",
                    name,
                    var.shape,
                    var.data.len()
                )));
            }
        }

        Ok(FieldStore {
            variables: parsed.variables,
        })
    }

    /// 插入或替换变量
    pub fn insert(&mut self, name: &str, shape: Vec<usize>, data: Vec<f64>) -> Result<()> {
        let array = FieldArray::new(name, shape, data)?;
        self.variables.insert(
            array.name,
            StoredVariable {
                shape: array.shape,
                data: array.data,
            },
        );
        Ok(())
    }

    /// 链式插入，便于构造
    pub fn with(mut self, name: &str, shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        self.insert(name, shape, data)?;
        Ok(self)
    }

    /// 保存为 JSON 文件
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| BzkitError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

        let document = StoreFile {
            variables: self.variables.clone(),
        };

        serde_json::to_writer(BufWriter::new(file), &document).map_err(|e| {
            BzkitError::FileWriteError {
                path: path.display().to_string(),
                source: e.into(),
            }
        })
    }
}

impl FieldReader for FieldStore {
    fn get(&self, name: &str) -> Result<FieldArray> {
        let var = self
            .variables
            .get(name)
            .ok_or_else(|| BzkitError::MissingField {
                field: name.to_string(),
            })?;

        Ok(FieldArray {
            name: name.to_string(),
            shape: var.shape.clone(),
            data: var.data.clone(),
        })
    }
}
