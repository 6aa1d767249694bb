//! # 作业资源配置
//!
//! 描述一个作业所需的资源与环境。每个作业显式持有自己的配置，
//! 可以从 JSON 文件加载，再由命令行参数覆盖。
//!
//! ## 依赖关系
//! - 被 `scheduler/` 各调度器与 `commands/submit.rs` 使用
//! - 使用 `serde_json` 读取配置文件
//! - 使用 `regex` 校验 walltime

use crate::error::{BzkitError, Result};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WALLTIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}:[0-5]\d:[0-5]\d$").expect("valid walltime regex"));

/// 作业资源配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// 作业名
    pub name: String,
    /// 节点数
    pub nodes: u32,
    /// 每节点核数
    pub cores: u32,
    /// 时间限制 HH:MM:SS
    pub walltime: String,
    /// 队列 / 分区
    pub queue: Option<String>,
    /// 内存（PBS 为总内存，Slurm 为每 CPU 内存）
    pub memory: Option<String>,
    /// mpirun 可执行文件
    pub mpirun: String,
    /// 需要加载的 module
    pub modules: Vec<String>,
    /// 原样写入脚本头的附加指令行
    pub directives: Vec<String>,
    /// 工作目录（默认当前目录）
    pub workdir: Option<PathBuf>,
    /// 替换默认的提交命令（qsub / oarsub / sbatch）
    pub submit_command: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            name: "job".to_string(),
            nodes: 1,
            cores: 1,
            walltime: "24:00:00".to_string(),
            queue: None,
            memory: None,
            mpirun: "mpirun".to_string(),
            modules: vec![],
            directives: vec![],
            workdir: None,
            submit_command: None,
        }
    }
}

impl SchedulerConfig {
    /// 从 JSON 文件加载，缺失字段取默认值
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| BzkitError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: SchedulerConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| {
                BzkitError::InvalidArgument(format!(
                    "Invalid scheduler config {}: {}",
                    path.display(),
                    e
                ))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// 校验资源参数
    pub fn validate(&self) -> Result<()> {
        if !WALLTIME_PATTERN.is_match(&self.walltime) {
            return Err(BzkitError::InvalidWalltime(self.walltime.clone()));
        }
        if self.nodes == 0 || self.cores == 0 {
            return Err(BzkitError::InvalidArgument(
                "nodes and cores must be at least 1".to_string(),
            ));
        }
        if self.nodes.checked_mul(self.cores).is_none() {
            return Err(BzkitError::InvalidArgument(format!(
                "{} nodes x {} cores exceeds the process count limit",
                self.nodes, self.cores
            )));
        }
        if self.name.trim().is_empty() {
            return Err(BzkitError::InvalidArgument(
                "job name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// 总进程数
    pub fn total_cores(&self) -> u64 {
        u64::from(self.nodes) * u64::from(self.cores)
    }

    /// 工作目录
    pub fn workdir(&self) -> PathBuf {
        self.workdir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// `module load` 行
    pub fn module_loads(&self) -> String {
        self.modules
            .iter()
            .map(|m| format!("module load {}", m))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SchedulerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_walltime_validation() {
        let mut config = SchedulerConfig::default();
        for ok in ["1:00:00", "48:30:00", "120:00:59"] {
            config.walltime = ok.to_string();
            assert!(config.validate().is_ok(), "{}", ok);
        }
        for bad in ["1h", "24:00", "12:60:00", "aa:bb:cc"] {
            config.walltime = bad.to_string();
            assert!(matches!(
                config.validate(),
                Err(BzkitError::InvalidWalltime(_))
            ));
        }
    }

    #[test]
    fn test_zero_cores_rejected() {
        let config = SchedulerConfig {
            cores: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BzkitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_process_count_overflow_rejected() {
        let config = SchedulerConfig {
            nodes: 70000,
            cores: 70000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BzkitError::InvalidArgument(_))
        ));
        assert_eq!(config.total_cores(), 4_900_000_000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbs.json");
        std::fs::write(
            &path,
            r#"{"name": "gw", "nodes": 2, "cores": 16, "modules": ["yambo/5.1"]}"#,
        )
        .unwrap();

        let config = SchedulerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.name, "gw");
        assert_eq!(config.total_cores(), 32);
        assert_eq!(config.walltime, "24:00:00");
        assert_eq!(config.mpirun, "mpirun");
        assert_eq!(config.module_loads(), "module load yambo/5.1");
    }

    #[test]
    fn test_bad_json_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"nodes": "many"}"#).unwrap();
        assert!(matches!(
            SchedulerConfig::from_json_file(&path),
            Err(BzkitError::InvalidArgument(_))
        ));
    }
}
