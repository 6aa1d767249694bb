//! # 作业调度
//!
//! 把一组 shell 命令包装成本地 bash 作业或集群作业（PBS / OAR / Slurm）。
//!
//! ## 使用方式
//! ```text
//! let mut job = Job::new(SchedulerKind::Pbs, config)?;
//! job.add_module("yambo");
//! job.add_mpirun_command("yambo -F yambo.in");
//! job.run(true)?;
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs` 使用
//! - 子模块 `bash`, `pbs`, `oar`, `slurm` 各自生成脚本头与提交参数

pub mod bash;
pub mod config;
pub mod oar;
pub mod pbs;
pub mod slurm;

pub use config::SchedulerConfig;

use crate::error::{BzkitError, Result};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// 调度器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerKind {
    Bash,
    Pbs,
    Oar,
    Slurm,
}

impl SchedulerKind {
    /// 脚本文件扩展名（bash 不落盘）
    fn extension(&self) -> &'static str {
        match self {
            SchedulerKind::Bash => "sh",
            SchedulerKind::Pbs => "pbs",
            SchedulerKind::Oar => "oar",
            SchedulerKind::Slurm => "sbatch",
        }
    }

    /// 默认提交命令
    fn submitter(&self) -> &'static str {
        match self {
            SchedulerKind::Bash => "/bin/bash",
            SchedulerKind::Pbs => "qsub",
            SchedulerKind::Oar => "oarsub",
            SchedulerKind::Slurm => "sbatch",
        }
    }
}

impl std::fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchedulerKind::Bash => "bash",
            SchedulerKind::Pbs => "pbs",
            SchedulerKind::Oar => "oar",
            SchedulerKind::Slurm => "slurm",
        };
        write!(f, "{}", name)
    }
}

/// 运行结果
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// 未执行，仅生成脚本
    DryRun { script: String },
    /// 本地 bash 执行完成
    Executed { stdout: String },
    /// 已写入脚本并提交
    Submitted { script_path: PathBuf, stdout: String },
}

/// 一个待运行的作业
#[derive(Debug, Clone)]
pub struct Job {
    kind: SchedulerKind,
    config: SchedulerConfig,
    commands: Vec<String>,
}

impl Job {
    /// 创建作业，校验资源配置
    pub fn new(kind: SchedulerKind, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Job {
            kind,
            config,
            commands: vec![],
        })
    }

    pub fn kind(&self) -> SchedulerKind {
        self.kind
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn add_command(&mut self, cmd: &str) {
        self.commands.push(cmd.to_string());
    }

    /// 追加 `module load`
    pub fn add_module(&mut self, module: &str) {
        self.add_command(&format!("module load {}", module));
    }

    /// 追加 `<mpirun> -np <n> <cmd>`
    pub fn add_mpirun_command(&mut self, cmd: &str) {
        let line = match self.kind {
            SchedulerKind::Bash => bash::mpirun_line(&self.config, cmd),
            SchedulerKind::Pbs => pbs::mpirun_line(&self.config, cmd),
            SchedulerKind::Oar => oar::mpirun_line(&self.config, cmd),
            SchedulerKind::Slurm => slurm::mpirun_line(&self.config, cmd),
        };
        self.commands.push(line);
    }

    /// 命令部分
    pub fn get_commands(&self) -> String {
        self.commands.join("\n")
    }

    /// 完整脚本
    pub fn get_script(&self) -> String {
        let commands = self.get_commands();
        match self.kind {
            SchedulerKind::Bash => bash::script(&self.config, &commands),
            SchedulerKind::Pbs => pbs::script(&self.config, &commands),
            SchedulerKind::Oar => oar::script(&self.config, &commands),
            SchedulerKind::Slurm => slurm::script(&self.config, &commands),
        }
    }

    /// 脚本落盘路径 `<workdir>/<name>.<ext>`
    pub fn script_path(&self) -> PathBuf {
        self.config
            .workdir()
            .join(format!("{}.{}", self.config.name, self.kind.extension()))
    }

    /// 运行作业；`dry` 时只返回脚本
    pub fn run(&self, dry: bool) -> Result<JobOutcome> {
        if dry {
            return Ok(JobOutcome::DryRun {
                script: self.get_script(),
            });
        }

        match self.kind {
            SchedulerKind::Bash => self.run_bash(),
            _ => self.submit(),
        }
    }

    fn run_bash(&self) -> Result<JobOutcome> {
        let submitter = self.submitter();
        let script = self.get_script();
        let output = execute(
            Command::new(&submitter)
                .arg("-c")
                .arg(&script)
                .current_dir(self.config.workdir()),
            &submitter,
        )?;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !stderr.is_empty() {
            return Err(BzkitError::CommandFailed {
                command: submitter,
                stderr,
            });
        }

        Ok(JobOutcome::Executed {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }

    fn submit(&self) -> Result<JobOutcome> {
        let workdir = self.config.workdir();
        if !workdir.is_dir() {
            return Err(BzkitError::DirectoryNotFound {
                path: workdir.display().to_string(),
            });
        }

        let script_path = self.script_path();
        write_script(&script_path, &self.get_script())?;

        if self.kind == SchedulerKind::Slurm {
            let logs = workdir.join(slurm::LOG_DIR);
            fs::create_dir_all(&logs).map_err(|e| BzkitError::FileWriteError {
                path: logs.display().to_string(),
                source: e,
            })?;
        }

        let file_name = format!("{}.{}", self.config.name, self.kind.extension());
        let args = match self.kind {
            SchedulerKind::Oar => oar::submit_args(&file_name),
            _ => vec![file_name],
        };

        let submitter = self.submitter();
        let output = execute(
            Command::new(&submitter).args(&args).current_dir(&workdir),
            &submitter,
        )?;

        if !output.status.success() {
            return Err(BzkitError::CommandFailed {
                command: format!("{} {}", submitter, args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(JobOutcome::Submitted {
            script_path,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }

    fn submitter(&self) -> String {
        self.config
            .submit_command
            .clone()
            .unwrap_or_else(|| self.kind.submitter().to_string())
    }
}

fn execute(command: &mut Command, program: &str) -> Result<Output> {
    command.output().map_err(|e| match e.kind() {
        ErrorKind::NotFound => BzkitError::CommandNotFound {
            command: program.to_string(),
        },
        _ => BzkitError::CommandFailed {
            command: program.to_string(),
            stderr: e.to_string(),
        },
    })
}

/// 写入脚本并设置可执行权限（`oarsub -S` 需要）
fn write_script(path: &Path, script: &str) -> Result<()> {
    fs::write(path, script).map_err(|e| BzkitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| {
            BzkitError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            }
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path) -> SchedulerConfig {
        SchedulerConfig {
            name: "gw".to_string(),
            nodes: 2,
            cores: 8,
            workdir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_walltime_rejected_on_creation() {
        let config = SchedulerConfig {
            walltime: "forever".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Job::new(SchedulerKind::Pbs, config),
            Err(BzkitError::InvalidWalltime(_))
        ));
    }

    #[test]
    fn test_mpirun_process_count_per_kind() {
        let dir = tempfile::tempdir().unwrap();
        let expected = [
            (SchedulerKind::Bash, "mpirun -np 8 yambo"),
            (SchedulerKind::Pbs, "mpirun -np 16 yambo"),
            (SchedulerKind::Oar, "mpirun -machinefile $OAR_NODEFILE -np 16 yambo"),
            (SchedulerKind::Slurm, "mpirun -np 16 yambo"),
        ];
        for (kind, line) in expected {
            let mut job = Job::new(kind, config(dir.path())).unwrap();
            job.add_mpirun_command("yambo");
            assert_eq!(job.get_commands(), line, "{}", kind);
        }
    }

    #[test]
    fn test_commands_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = Job::new(SchedulerKind::Bash, config(dir.path())).unwrap();
        job.add_module("yambo/5.1");
        job.add_command("cd run");
        job.add_mpirun_command("yambo -F gw.in");
        assert_eq!(
            job.get_commands(),
            "module load yambo/5.1\ncd run\nmpirun -np 8 yambo -F gw.in"
        );
    }

    #[test]
    fn test_dry_run_returns_script() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = Job::new(SchedulerKind::Pbs, config(dir.path())).unwrap();
        job.add_command("echo hi");

        match job.run(true).unwrap() {
            JobOutcome::DryRun { script } => assert_eq!(script, job.get_script()),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!job.script_path().exists());
    }

    #[test]
    fn test_bash_runs_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = Job::new(SchedulerKind::Bash, config(dir.path())).unwrap();
        job.add_command("echo hello");

        assert_eq!(
            job.run(false).unwrap(),
            JobOutcome::Executed {
                stdout: "hello\n".to_string()
            }
        );
    }

    #[test]
    fn test_bash_stderr_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = Job::new(SchedulerKind::Bash, config(dir.path())).unwrap();
        job.add_command("echo oops 1>&2");

        match job.run(false) {
            Err(BzkitError::CommandFailed { stderr, .. }) => assert_eq!(stderr, "oops\n"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_submit_writes_script() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.submit_command = Some("echo".to_string());

        let mut job = Job::new(SchedulerKind::Pbs, cfg).unwrap();
        job.add_command("yambo");

        match job.run(false).unwrap() {
            JobOutcome::Submitted {
                script_path,
                stdout,
            } => {
                assert_eq!(script_path, dir.path().join("gw.pbs"));
                assert_eq!(stdout, "gw.pbs\n");
                let written = fs::read_to_string(&script_path).unwrap();
                assert_eq!(written, job.get_script());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_oar_submit_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.submit_command = Some("echo".to_string());

        let job = Job::new(SchedulerKind::Oar, cfg).unwrap();
        match job.run(false).unwrap() {
            JobOutcome::Submitted { stdout, .. } => assert_eq!(stdout, "-S ./gw.oar\n"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_slurm_submit_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.submit_command = Some("true".to_string());

        let job = Job::new(SchedulerKind::Slurm, cfg).unwrap();
        job.run(false).unwrap();
        assert!(dir.path().join(slurm::LOG_DIR).is_dir());
        assert!(dir.path().join("gw.sbatch").is_file());
    }

    #[test]
    fn test_missing_submitter() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.submit_command = Some("bzkit-no-such-submitter".to_string());

        let job = Job::new(SchedulerKind::Pbs, cfg).unwrap();
        assert!(matches!(
            job.run(false),
            Err(BzkitError::CommandNotFound { .. })
        ));
    }

    #[test]
    fn test_failing_submitter() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.submit_command = Some("false".to_string());

        let job = Job::new(SchedulerKind::Slurm, cfg).unwrap();
        assert!(matches!(
            job.run(false),
            Err(BzkitError::CommandFailed { .. })
        ));
    }
}
