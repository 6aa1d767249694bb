//! # 统一错误处理模块
//!
//! 定义 bzkit 的所有错误类型，使用 `thiserror` 派生。
//!
//! 所有错误对当前操作都是终止性的，内部不做重试。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// bzkit 统一错误类型
#[derive(Error, Debug)]
pub enum BzkitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 数据库错误
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot open lattice database: {path}\nReason: {reason}")]
    DatabaseOpen { path: String, reason: String },

    #[error("Field '{field}' not present in lattice database")]
    MissingField { field: String },

    #[error("Field '{field}' has shape {found:?}, expected {expected}")]
    FieldShape {
        field: String,
        expected: String,
        found: Vec<usize>,
    },

    #[error("No atomic mass entry for atomic number {0}")]
    UnknownElement(u32),

    // ─────────────────────────────────────────────────────────────
    // 数值错误（输入的物理数据不合法）
    // ─────────────────────────────────────────────────────────────
    #[error("Basis matrix is singular, cannot convert to reduced coordinates")]
    SingularBasis,

    #[error("Lattice vectors are degenerate (cell volume {volume:e})")]
    DegenerateLattice { volume: f64 },

    #[error("Symmetry operation {index} is singular")]
    SingularSymmetry { index: usize },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid walltime '{0}' (expected HH:MM:SS)")]
    InvalidWalltime(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BzkitError>;
