//! # Slurm 作业
//!
//! 生成 sbatch 提交脚本，日志写入 `slurm_logs/`。

use super::SchedulerConfig;

/// sbatch 日志目录，提交前需存在
pub const LOG_DIR: &str = "slurm_logs";

pub(super) fn mpirun_line(config: &SchedulerConfig, cmd: &str) -> String {
    format!("{} -np {} {}", config.mpirun, config.total_cores(), cmd)
}

pub(super) fn script(config: &SchedulerConfig, commands: &str) -> String {
    let mut header = vec![
        "#!/bin/bash".to_string(),
        format!("#SBATCH -J {}", config.name),
    ];
    if let Some(partition) = &config.queue {
        header.push(format!("#SBATCH --partition {}", partition));
    }
    header.push(format!("#SBATCH --nodes={}", config.nodes));
    header.push(format!("#SBATCH -n {}", config.total_cores()));
    header.push(format!("#SBATCH --time {}", config.walltime));
    if let Some(memory) = &config.memory {
        header.push(format!("#SBATCH --mem-per-cpu {}", memory));
    }
    header.push(format!("#SBATCH -o {}/%x.out", LOG_DIR));
    header.push(format!("#SBATCH -e {}/%x.err", LOG_DIR));
    header.extend(config.directives.iter().cloned());

    format!(
        r#"{}

set -euo pipefail

module purge 2>&1
{}
echo "Loaded modules"

cd "{}"
echo "PWD=$(pwd)"
{}

echo "Timings:"
sacct -o JobID,Submit,Start,End,CPUTime,State -j $SLURM_JOBID
"#,
        header.join("\n"),
        config.module_loads(),
        config.workdir().display(),
        commands,
    )
}
