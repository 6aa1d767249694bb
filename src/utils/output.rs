//! # 美化输出工具
//!
//! 统一的终端输出样式。核心模块不打印，只有 `commands/` 与 `main.rs` 调用这里。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块与 `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印展开摘要：`<source>  N kpoints expanded to M`
pub fn print_expansion(source: &str, irreducible: usize, full: usize) {
    println!(
        "{} {}  {} kpoints expanded to {}",
        "[OK]".green().bold(),
        source.dimmed(),
        irreducible.to_string().cyan(),
        full.to_string().cyan().bold()
    );
}

/// 打印 `key: value` 行
pub fn print_field(key: &str, value: &str) {
    println!("  {:<22} {}", format!("{}:", key).bold(), value);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
