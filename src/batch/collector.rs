//! # 数据库收集器
//!
//! 在目录下按文件名模式收集格点数据库。
//!
//! ## 功能
//! - 单文件输入直接返回
//! - glob 模式匹配文件名（逗号分隔多模式）
//! - 非递归时搜索目录本身与 `SAVE/`，递归时搜索整棵目录树
//! - 结果按路径排序
//!
//! ## 依赖关系
//! - 被 `commands/expand.rs` 调用
//! - 使用 `database::database_dirs` 确定非递归搜索的目录
//! - 使用 `walkdir` 遍历目录
//! - 使用 `glob` 匹配文件名

use crate::database::database_dirs;
use crate::error::{BzkitError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认数据库文件名模式
pub const DEFAULT_PATTERN: &str = "ns.db1*";

/// 数据库收集器
pub struct DatabaseCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl DatabaseCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec![],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let mut patterns = Vec::new();
        for item in pattern.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let compiled = Pattern::new(item).map_err(|e| {
                BzkitError::InvalidArgument(format!("Invalid pattern '{}': {}", item, e))
            })?;
            patterns.push(compiled);
        }
        self.patterns = patterns;
        Ok(self)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的数据库
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(BzkitError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let (roots, max_depth) = if self.recursive {
            (vec![self.input.clone()], usize::MAX)
        } else {
            (database_dirs(&self.input), 1)
        };

        let mut files: Vec<PathBuf> = roots
            .iter()
            .flat_map(|root| WalkDir::new(root).max_depth(max_depth))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    /// 文件名是否匹配任一模式
    fn matches(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        if self.patterns.is_empty() {
            return Pattern::new(DEFAULT_PATTERN)
                .map(|p| p.matches(filename))
                .unwrap_or(false);
        }

        self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("SAVE");
        fs::create_dir(&save).unwrap();
        fs::write(dir.path().join("ns.db1"), "{}").unwrap();
        fs::write(dir.path().join("ns.db1.json"), "{}").unwrap();
        fs::write(dir.path().join("ns.wf"), "").unwrap();
        fs::write(save.join("ns.db1"), "{}").unwrap();
        dir
    }

    #[test]
    fn test_default_pattern_top_level() {
        let dir = tree();
        let files = DatabaseCollector::new(dir.path().to_path_buf())
            .collect()
            .unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("SAVE/ns.db1"),
                dir.path().join("ns.db1"),
                dir.path().join("ns.db1.json"),
            ]
        );
    }

    #[test]
    fn test_nested_runs_need_recursive() {
        let dir = tree();
        let nested = dir.path().join("q1/SAVE");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("ns.db1"), "{}").unwrap();

        let collect = |recursive| {
            DatabaseCollector::new(dir.path().to_path_buf())
                .with_pattern("ns.db1")
                .unwrap()
                .recursive(recursive)
                .collect()
                .unwrap()
        };

        assert_eq!(
            collect(false),
            vec![dir.path().join("SAVE/ns.db1"), dir.path().join("ns.db1")]
        );
        assert_eq!(
            collect(true),
            vec![
                dir.path().join("SAVE/ns.db1"),
                dir.path().join("ns.db1"),
                dir.path().join("q1/SAVE/ns.db1"),
            ]
        );
    }

    #[test]
    fn test_recursive_with_pattern() {
        let dir = tree();
        let files = DatabaseCollector::new(dir.path().to_path_buf())
            .with_pattern("ns.db1")
            .unwrap()
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("SAVE/ns.db1"), dir.path().join("ns.db1")]
        );
    }

    #[test]
    fn test_multiple_patterns() {
        let dir = tree();
        let files = DatabaseCollector::new(dir.path().to_path_buf())
            .with_pattern("*.json, ns.wf")
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_single_file_input() {
        let dir = tree();
        let file = dir.path().join("ns.wf");
        let files = DatabaseCollector::new(file.clone()).collect().unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_missing_directory() {
        let collector = DatabaseCollector::new(PathBuf::from("/nonexistent/bzkit"));
        assert!(matches!(
            collector.collect(),
            Err(BzkitError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(DatabaseCollector::new(PathBuf::from("."))
            .with_pattern("[")
            .is_err());
    }
}
