//! # PBS 作业
//!
//! 生成 `#PBS` 指令头，提交命令为 `qsub <script>`。

use super::SchedulerConfig;

pub(super) fn mpirun_line(config: &SchedulerConfig, cmd: &str) -> String {
    format!("{} -np {} {}", config.mpirun, config.total_cores(), cmd)
}

pub(super) fn script(config: &SchedulerConfig, commands: &str) -> String {
    let mut lines = vec!["#!/bin/bash".to_string(), format!("#PBS -N {}", config.name)];

    if let Some(queue) = &config.queue {
        lines.push(format!("#PBS -q {}", queue));
    }
    lines.push(format!(
        "#PBS -l nodes={}:ppn={}",
        config.nodes, config.cores
    ));
    lines.push(format!("#PBS -l walltime={}", config.walltime));
    if let Some(memory) = &config.memory {
        lines.push(format!("#PBS -l mem={}", memory));
    }
    lines.extend(config.directives.iter().cloned());

    lines.push(String::new());
    lines.push("cd $PBS_O_WORKDIR".to_string());

    let modules = config.module_loads();
    if !modules.is_empty() {
        lines.push(modules);
    }
    lines.push(commands.to_string());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}
