//! # 本地 bash 作业
//!
//! 不生成调度指令，脚本只包含 module 加载与命令本身。

use super::SchedulerConfig;

/// 本地运行只使用单节点的核数
pub(super) fn mpirun_line(config: &SchedulerConfig, cmd: &str) -> String {
    format!("{} -np {} {}", config.mpirun, config.cores, cmd)
}

pub(super) fn script(config: &SchedulerConfig, commands: &str) -> String {
    let mut script = String::from("#!/bin/bash\n");
    let modules = config.module_loads();
    if !modules.is_empty() {
        script.push_str(&modules);
        script.push('\n');
    }
    script.push_str(commands);
    script.push('\n');
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_has_no_directives() {
        let config = SchedulerConfig {
            modules: vec!["qe/7.2".to_string()],
            ..Default::default()
        };
        let text = script(&config, "pw.x < scf.in");
        assert_eq!(text, "#!/bin/bash\nmodule load qe/7.2\npw.x < scf.in\n");
    }

    #[test]
    fn test_custom_mpirun() {
        let config = SchedulerConfig {
            mpirun: "mpiexec.hydra".to_string(),
            nodes: 4,
            cores: 12,
            ..Default::default()
        };
        assert_eq!(mpirun_line(&config, "yambo"), "mpiexec.hydra -np 12 yambo");
    }
}
