//! # OAR 作业
//!
//! 生成 `#OAR` 指令头。`oarsub -S` 从脚本内读取指令，脚本需可执行。

use super::SchedulerConfig;

pub(super) fn mpirun_line(config: &SchedulerConfig, cmd: &str) -> String {
    format!(
        "{} -machinefile $OAR_NODEFILE -np {} {}",
        config.mpirun,
        config.total_cores(),
        cmd
    )
}

pub(super) fn submit_args(file_name: &str) -> Vec<String> {
    vec!["-S".to_string(), format!("./{}", file_name)]
}

pub(super) fn script(config: &SchedulerConfig, commands: &str) -> String {
    let mut lines = vec!["#!/bin/bash".to_string(), format!("#OAR -n {}", config.name)];

    if let Some(queue) = &config.queue {
        lines.push(format!("#OAR -q {}", queue));
    }
    lines.push(format!(
        "#OAR -l nodes={}/core={},walltime={}",
        config.nodes, config.cores, config.walltime
    ));
    lines.push(format!("#OAR -O {}.%jobid%.out", config.name));
    lines.push(format!("#OAR -E {}.%jobid%.err", config.name));
    lines.extend(config.directives.iter().cloned());
    lines.push(String::new());

    let modules = config.module_loads();
    if !modules.is_empty() {
        lines.push(modules);
    }
    lines.push(commands.to_string());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let config = SchedulerConfig {
            name: "nscf".to_string(),
            nodes: 3,
            cores: 16,
            walltime: "2:00:00".to_string(),
            queue: Some("besteffort".to_string()),
            directives: vec!["#OAR -p cluster='dahu'".to_string()],
            ..Default::default()
        };
        let text = script(&config, "pw.x");

        assert!(text.starts_with("#!/bin/bash\n#OAR -n nscf\n#OAR -q besteffort\n"));
        assert!(text.contains("#OAR -l nodes=3/core=16,walltime=2:00:00\n"));
        assert!(text.contains("#OAR -O nscf.%jobid%.out\n"));
        assert!(text.contains("#OAR -p cluster='dahu'\n"));
        assert!(text.ends_with("pw.x\n"));
    }

    #[test]
    fn test_submit_args() {
        assert_eq!(submit_args("job.oar"), vec!["-S", "./job.oar"]);
    }
}
