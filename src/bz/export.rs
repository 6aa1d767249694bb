//! # 展开结果导出
//!
//! 把全布里渊区 k 点与不可约权重导出为 CSV，完整展开结果导出为 JSON。
//!
//! ## 支持格式
//! - 全区 k 点：index, kx, ky, kz, k1, k2, k3, ibz_index, sym_index
//! - 不可约权重：ibz_index, kx, ky, kz, orbit_size, weight
//! - 完整展开结果：BzExpansion 的 JSON 序列化
//!
//! ## 依赖关系
//! - 被 `commands/expand.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件
//! - 使用 `serde_json` 写入 JSON 文件

use crate::error::{BzkitError, Result};
use crate::geometry::Vector3;
use crate::models::BzExpansion;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// 导出全区 k 点
pub fn to_csv(expansion: &BzExpansion, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "index",
        "kx",
        "ky",
        "kz",
        "k1",
        "k2",
        "k3",
        "ibz_index",
        "sym_index",
    ])?;

    for i in 0..expansion.len() {
        let k = expansion.full_kpoints[i];
        let r = expansion.full_reduced[i];
        wtr.write_record(&[
            i.to_string(),
            format!("{:.10}", k[0]),
            format!("{:.10}", k[1]),
            format!("{:.10}", k[2]),
            format!("{:.10}", r[0]),
            format!("{:.10}", r[1]),
            format!("{:.10}", r[2]),
            expansion.irreducible_index_of[i].to_string(),
            expansion.symmetry_index_of[i].to_string(),
        ])?;
    }

    wtr.flush().map_err(|e| BzkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出不可约 k 点及其权重
pub fn weights_to_csv(
    expansion: &BzExpansion,
    ibz_kpoints: &[Vector3],
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["ibz_index", "kx", "ky", "kz", "orbit_size", "weight"])?;

    let sizes = expansion.orbit_sizes();
    for (nk, (k, weight)) in ibz_kpoints.iter().zip(&expansion.weights).enumerate() {
        wtr.write_record(&[
            nk.to_string(),
            format!("{:.10}", k[0]),
            format!("{:.10}", k[1]),
            format!("{:.10}", k[2]),
            sizes[nk].to_string(),
            format!("{:.12}", weight),
        ])?;
    }

    wtr.flush().map_err(|e| BzkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出完整展开结果为 JSON
pub fn to_json(expansion: &BzExpansion, output_path: &Path) -> Result<()> {
    let write_error = |e: std::io::Error| BzkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_error)?;
    serde_json::to_writer_pretty(BufWriter::new(file), expansion)
        .map_err(|e| write_error(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BzExpansion {
        BzExpansion {
            full_kpoints: vec![[0.3, 0.0, 0.0], [-0.3, 0.0, 0.0]],
            full_reduced: vec![[0.3, 0.0, 0.0], [-0.3, 0.0, 0.0]],
            irreducible_index_of: vec![0, 0],
            symmetry_index_of: vec![0, 1],
            weights: vec![1.0],
        }
    }

    #[test]
    fn test_kpoints_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kpoints.csv");
        to_csv(&sample(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "index,kx,ky,kz,k1,k2,k3,ibz_index,sym_index");
        assert!(lines[2].starts_with("1,-0.3000000000,"));
        assert!(lines[2].ends_with(",0,1"));
    }

    #[test]
    fn test_expansion_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expansion.json");
        to_json(&sample(), &path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let value: serde_json::Value = serde_json::from_reader(file).unwrap();
        assert_eq!(value["irreducible_index_of"], serde_json::json!([0, 0]));
        assert_eq!(value["symmetry_index_of"], serde_json::json!([0, 1]));
        assert_eq!(value["weights"], serde_json::json!([1.0]));
        assert_eq!(value["full_kpoints"][1][0].as_f64(), Some(-0.3));
    }

    #[test]
    fn test_weights_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.csv");
        weights_to_csv(&sample(), &[[0.3, 0.0, 0.0]], &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][4], "2");
        assert_eq!(rows[0][5].parse::<f64>().unwrap(), 1.0);
    }
}
