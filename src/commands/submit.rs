//! # submit 命令实现
//!
//! 组装作业配置，生成脚本并运行或提交。
//!
//! ## 功能
//! - 从 JSON 文件读取资源配置，命令行参数覆盖
//! - 按顺序加入普通命令与 mpirun 命令
//! - dry run 只打印脚本
//!
//! ## 依赖关系
//! - 使用 `cli/submit.rs` 定义的参数
//! - 使用 `scheduler/` 生成与提交脚本
//! - 使用 `utils/output.rs`

use crate::cli::submit::{SchedulerChoice, SubmitArgs};
use crate::error::{BzkitError, Result};
use crate::scheduler::{Job, JobOutcome, SchedulerConfig, SchedulerKind};
use crate::utils::output;

/// 执行 submit 命令
pub fn execute(args: SubmitArgs) -> Result<()> {
    output::print_header("Job Submission");

    let job = build_job(&args)?;
    output::print_info(&format!(
        "Scheduler: {}, job '{}', {} node(s) x {} core(s)",
        job.kind(),
        job.config().name,
        job.config().nodes,
        job.config().cores
    ));

    match job.run(args.dry_run)? {
        JobOutcome::DryRun { script } => {
            output::print_info("Dry run, script not executed:");
            output::print_separator();
            print!("{}", script);
            output::print_separator();
        }
        JobOutcome::Executed { stdout } => {
            print!("{}", stdout);
            output::print_done("Job finished");
        }
        JobOutcome::Submitted {
            script_path,
            stdout,
        } => {
            output::print_success(&format!("Script written to '{}'", script_path.display()));
            let reply = stdout.trim();
            if !reply.is_empty() {
                output::print_info(reply);
            }
            output::print_done("Job submitted");
        }
    }

    Ok(())
}

fn build_job(args: &SubmitArgs) -> Result<Job> {
    if args.commands.is_empty() && args.mpirun_commands.is_empty() {
        return Err(BzkitError::InvalidArgument(
            "no command given, use --command or --mpirun".to_string(),
        ));
    }

    let config = resolve_config(args)?;
    let mut job = Job::new(scheduler_kind(args.scheduler), config)?;

    for cmd in &args.commands {
        job.add_command(cmd);
    }
    for cmd in &args.mpirun_commands {
        job.add_mpirun_command(cmd);
    }

    Ok(job)
}

fn scheduler_kind(choice: SchedulerChoice) -> SchedulerKind {
    match choice {
        SchedulerChoice::Bash => SchedulerKind::Bash,
        SchedulerChoice::Pbs => SchedulerKind::Pbs,
        SchedulerChoice::Oar => SchedulerKind::Oar,
        SchedulerChoice::Slurm => SchedulerKind::Slurm,
    }
}

/// 配置文件打底，命令行参数覆盖
fn resolve_config(args: &SubmitArgs) -> Result<SchedulerConfig> {
    let mut config = match &args.config {
        Some(path) => SchedulerConfig::from_json_file(path)?,
        None => SchedulerConfig::default(),
    };

    if let Some(name) = &args.name {
        config.name = name.clone();
    }
    if let Some(nodes) = args.nodes {
        config.nodes = nodes;
    }
    if let Some(cores) = args.cores {
        config.cores = cores;
    }
    if let Some(walltime) = &args.walltime {
        config.walltime = walltime.clone();
    }
    if let Some(queue) = &args.queue {
        config.queue = Some(queue.clone());
    }
    if let Some(memory) = &args.memory {
        config.memory = Some(memory.clone());
    }
    if let Some(mpirun) = &args.mpirun_exec {
        config.mpirun = mpirun.clone();
    }
    if let Some(modules) = &args.modules {
        config.modules = modules
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(workdir) = &args.workdir {
        config.workdir = Some(workdir.clone());
    }

    Ok(config)
}
