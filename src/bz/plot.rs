//! # k 点分布图
//!
//! 使用 `plotters` 绘制全布里渊区 k 点在前两个约化坐标轴上的投影，
//! 按不可约 k 点索引着色。
//!
//! ## 依赖关系
//! - 被 `commands/expand.rs` 调用
//! - 使用 `models/kpoints.rs` 的 BzExpansion
//! - 使用 `plotters` 渲染图表

use crate::error::{BzkitError, Result};
use crate::models::BzExpansion;

use plotters::prelude::*;
use std::path::Path;

/// 生成 k 点分布图（PNG 或 SVG）
pub fn generate_kpoint_plot(
    expansion: &BzExpansion,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_kpoint_chart(&root, expansion, title)?;
        root.present()
            .map_err(|e| BzkitError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_kpoint_chart(&root, expansion, title)?;
        root.present()
            .map_err(|e| BzkitError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 坐标范围，两端各留 5% 余量
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(0.05);
    (min - pad, max + pad)
}

fn draw_kpoint_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    expansion: &BzExpansion,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| BzkitError::Other(format!("{:?}", e)))?;

    let (x_min, x_max) = axis_range(expansion.full_reduced.iter().map(|r| r[0]));
    let (y_min, y_max) = axis_range(expansion.full_reduced.iter().map(|r| r[1]));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| BzkitError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("k1 (reduced)")
        .y_desc("k2 (reduced)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| BzkitError::Other(format!("{:?}", e)))?;

    chart
        .draw_series(
            expansion
                .full_reduced
                .iter()
                .zip(&expansion.irreducible_index_of)
                .map(|(r, &nk)| Circle::new((r[0], r[1]), 4, Palette99::pick(nk).filled())),
        )
        .map_err(|e| BzkitError::Other(format!("{:?}", e)))?;

    let summary = format!(
        "{} → {} k-points",
        expansion.irreducible_count(),
        expansion.len()
    );
    chart
        .draw_series(std::iter::once(Text::new(
            summary,
            (x_min + 0.02 * (x_max - x_min), y_max - 0.05 * (y_max - y_min)),
            ("sans-serif", 14).into_font().color(&BLACK),
        )))
        .map_err(|e| BzkitError::Other(format!("{:?}", e)))?;

    Ok(())
}
