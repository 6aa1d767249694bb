//! # expand 命令实现
//!
//! 读取格点数据库，把不可约 k 点展开到全布里渊区。
//!
//! ## 功能
//! - 单文件模式：打印展开摘要和权重表，可导出 CSV、JSON 与分布图
//! - 批量模式：并行展开目录下所有匹配的数据库，可把全区 k 点写入输出目录
//!
//! ## 依赖关系
//! - 使用 `cli/expand.rs` 定义的 ExpandArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `database/` 读取数据库，`bz/` 导出与绘图

use crate::batch::{BatchRunner, DatabaseCollector, ProcessResult};
use crate::bz::{export, plot};
use crate::cli::expand::{ExpandArgs, PlotFormat};
use crate::database::LatticeDatabase;
use crate::error::{BzkitError, Result};
use crate::models::BzExpansion;
use crate::utils::{output, progress};

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct WeightRow {
    #[tabled(rename = "IBZ #")]
    index: usize,
    #[tabled(rename = "k (cartesian)")]
    kpoint: String,
    #[tabled(rename = "Orbit")]
    orbit: usize,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// 执行 expand 命令
pub fn execute(args: ExpandArgs) -> Result<()> {
    output::print_header("Brillouin Zone Expansion");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(BzkitError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &ExpandArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let spinner = progress::create_spinner("Reading database");
    let db = LatticeDatabase::read(&args.input)?;
    spinner.set_message("Expanding k-points");
    let expansion = db.expand_parallel(args.jobs)?;
    spinner.finish_and_clear();

    output::print_expansion(
        &args.input.display().to_string(),
        expansion.irreducible_count(),
        expansion.len(),
    );

    print_weight_table(&expansion, db.irreducible_kpoints(), args.top_n);

    if let Some(path) = &args.output {
        if write_allowed(path, args.overwrite) {
            export::to_csv(&expansion, path)?;
            output::print_success(&format!("Full-zone k-points saved to '{}'", path.display()));
        }
    }

    if let Some(path) = &args.json {
        if write_allowed(path, args.overwrite) {
            export::to_json(&expansion, path)?;
            output::print_success(&format!("Expansion saved to '{}'", path.display()));
        }
    }

    if let Some(path) = &args.weights {
        if write_allowed(path, args.overwrite) {
            export::weights_to_csv(&expansion, db.irreducible_kpoints(), path)?;
            output::print_success(&format!("Weights saved to '{}'", path.display()));
        }
    }

    if let Some(path) = &args.plot {
        if write_allowed(path, args.overwrite) {
            let format = plot_format(path, args.format);
            let title = plot_title(&args.input);
            plot::generate_kpoint_plot(
                &expansion,
                path,
                &title,
                args.width,
                args.height,
                format == PlotFormat::Svg,
            )?;
            output::print_success(&format!("K-point plot saved to '{}'", path.display()));
        }
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &ExpandArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    if args.weights.is_some() || args.plot.is_some() || args.json.is_some() {
        output::print_warning("--json, --weights and --plot apply to single file mode only");
    }

    let files = DatabaseCollector::new(args.input.clone())
        .with_pattern(&args.filename)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No databases found with pattern '{}'",
            args.filename
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} databases", files.len()));

    if let Some(dir) = &args.output {
        fs::create_dir_all(dir).map_err(|e| BzkitError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| {
        let target = args
            .output
            .as_ref()
            .map(|dir| dir.join(batch_output_name(&args.input, file)));
        process_database(file, target.as_deref(), args.overwrite)
    })?;

    for report in &result.reports {
        output::print_success(report);
    }

    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed databases:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 展开单个数据库，批量模式下在工作线程中调用
fn process_database(input: &Path, target: Option<&Path>, overwrite: bool) -> ProcessResult {
    if let Some(path) = target {
        if path.exists() && !overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                path.display()
            ));
        }
    }

    let expand = || -> Result<BzExpansion> {
        let expansion = LatticeDatabase::read(input)?.expand()?;
        if let Some(path) = target {
            export::to_csv(&expansion, path)?;
        }
        Ok(expansion)
    };

    match expand() {
        Ok(expansion) => ProcessResult::Success(format!(
            "{}: {} kpoints expanded to {}",
            input.display(),
            expansion.irreducible_count(),
            expansion.len()
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 批量输出文件名：相对输入目录的路径，分隔符替换为 `_`
fn batch_output_name(root: &Path, file: &Path) -> PathBuf {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let flat = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("_");
    PathBuf::from(format!("{}_kpoints.csv", flat))
}

fn plot_format(path: &Path, explicit: Option<PlotFormat>) -> PlotFormat {
    explicit.unwrap_or_else(|| {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
        {
            Some(ext) if ext == PlotFormat::Svg.extension() => PlotFormat::Svg,
            _ => PlotFormat::Png,
        }
    })
}

fn plot_title(input: &Path) -> String {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("database");
    format!("Full BZ k-points ({})", name)
}

fn write_allowed(path: &Path, overwrite: bool) -> bool {
    if path.exists() && !overwrite {
        output::print_skip(&format!(
            "'{}' exists, use --overwrite to replace it",
            path.display()
        ));
        return false;
    }
    true
}

/// 打印不可约 k 点权重表
fn print_weight_table(expansion: &BzExpansion, kpoints: &[[f64; 3]], count: usize) {
    let sizes = expansion.orbit_sizes();
    let rows: Vec<WeightRow> = kpoints
        .iter()
        .zip(&expansion.weights)
        .enumerate()
        .take(count)
        .map(|(i, (k, w))| WeightRow {
            index: i,
            kpoint: format!("{:>10.6} {:>10.6} {:>10.6}", k[0], k[1], k[2]),
            orbit: sizes[i],
            weight: format!("{:.8}", w),
        })
        .collect();

    if rows.is_empty() {
        return;
    }

    output::print_header(&format!(
        "Irreducible weights ({} of {})",
        rows.len(),
        expansion.irreducible_count()
    ));
    println!("{}", Table::new(&rows));
}
