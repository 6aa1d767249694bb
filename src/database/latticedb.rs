//! # 晶格数据库
//!
//! 从字段存储中读取晶格、原子、对称操作与不可约 k 点，
//! 读取后立即导出倒格子、倒空间对称矩阵与时间反演标记。
//!
//! ## 存储约定
//! - `LATTICE_VECTORS` 按列存放，读取时转置为行向量
//! - `K-POINTS` 形状 `[3, nk]`，单位为内部 k 空间单位（未除以晶格常数）
//! - `ATOM_POS` 形状 `[m, natoms, 3]`，取第一个切片，行数须等于各物种原子数之和
//! - `DIMENSIONS` 元数据：6 k 点数，9 时间反演，11 自旋，13 温度，14 电子数
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 使用
//! - 使用 `database/store.rs`, `database/elements.rs`
//! - 使用 `bz/` 进行对称处理和展开

use super::elements::{atomic_mass, element_symbol};
use super::{FieldReader, FieldStore};
use crate::bz::{self, SymmetryOp};
use crate::error::{BzkitError, Result};
use crate::geometry::coords::transpose;
use crate::geometry::{self, Matrix3, Vector3};
use crate::models::{Atom, BzExpansion, Lattice};

use std::path::{Path, PathBuf};

const DIM_NKPOINTS: usize = 6;
const DIM_TIME_REV: usize = 9;
const DIM_SPIN: usize = 11;
const DIM_TEMPERATURE: usize = 13;
const DIM_NELECTRONS: usize = 14;

/// 数据库中的标量元数据
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseMetadata {
    pub temperature: f64,
    pub nelectrons: f64,
    /// 数据库记录的 k 点数
    pub nkpoints: usize,
    pub spin: usize,
    pub time_rev: bool,
}

/// 晶格数据库
#[derive(Debug, Clone)]
pub struct LatticeDatabase {
    /// 来源文件（从内存构造时为 None）
    pub source: Option<PathBuf>,
    lattice: Lattice,
    rlat: Matrix3,
    atomic_numbers: Vec<u32>,
    atomic_masses: Vec<f64>,
    atomic_positions: Vec<Vector3>,
    symmetries: Vec<SymmetryOp>,
    car_kpoints: Vec<Vector3>,
    red_kpoints: Vec<Vector3>,
    metadata: DatabaseMetadata,
}

impl LatticeDatabase {
    /// 打开并读取数据库文件
    pub fn read(path: &Path) -> Result<Self> {
        let store = FieldStore::open(path)?;
        let mut db = Self::from_reader(&store)?;
        db.source = Some(path.to_path_buf());
        Ok(db)
    }

    /// 从任意字段读取器构造
    pub fn from_reader<R: FieldReader>(reader: &R) -> Result<Self> {
        let lat = transpose(&reader.get("LATTICE_VECTORS")?.to_matrix3()?);
        let alat = reader.get("LATTICE_PARAMETER")?.to_vector3()?;
        let natoms: Vec<usize> = reader
            .get("N_ATOMS")?
            .values()
            .iter()
            .map(|n| n.round() as usize)
            .collect();
        let species_numbers = reader.get("atomic_numbers")?;
        let atom_pos = reader.get("ATOM_POS")?;
        let atomic_positions = atom_pos.first_slice_rows()?;
        let sym_car = reader.get("SYMMETRY")?.to_matrix_stack()?;
        let iku_kpoints = reader.get("K-POINTS")?.to_columns()?;

        let dimensions = reader.get("DIMENSIONS")?;
        let metadata = DatabaseMetadata {
            temperature: dimensions.value_at(DIM_TEMPERATURE)?,
            nelectrons: dimensions.value_at(DIM_NELECTRONS)?,
            nkpoints: dimensions.value_at(DIM_NKPOINTS)?.round() as usize,
            spin: dimensions.value_at(DIM_SPIN)?.round() as usize,
            time_rev: dimensions.value_at(DIM_TIME_REV)?.round() != 0.0,
        };

        // 按物种原子数展开原子序数
        if species_numbers.values().len() < natoms.len() {
            return Err(BzkitError::FieldShape {
                field: species_numbers.name.clone(),
                expected: format!("one atomic number per species ({})", natoms.len()),
                found: species_numbers.shape.clone(),
            });
        }
        let atomic_numbers: Vec<u32> = natoms
            .iter()
            .zip(species_numbers.values())
            .flat_map(|(&count, &z)| std::iter::repeat(z.round() as u32).take(count))
            .collect();

        // 位置数必须等于各物种原子数之和
        if atomic_positions.len() != atomic_numbers.len() {
            return Err(BzkitError::FieldShape {
                field: atom_pos.name.clone(),
                expected: format!("[m, {}, 3]", atomic_numbers.len()),
                found: atom_pos.shape.clone(),
            });
        }

        let atomic_masses = atomic_numbers
            .iter()
            .map(|&z| atomic_mass(z))
            .collect::<Result<Vec<_>>>()?;

        let lattice = Lattice::new(lat, alat);
        let rlat = lattice.reciprocal()?;

        // 内部单位 → 笛卡尔单位
        let car_kpoints: Vec<Vector3> = iku_kpoints
            .iter()
            .map(|k| [k[0] / alat[0], k[1] / alat[1], k[2] / alat[2]])
            .collect();
        let red_kpoints = geometry::cartesian_to_reduced(&car_kpoints, &rlat)?;

        let symmetries = bz::build_symmetries(&sym_car, metadata.time_rev)?;

        Ok(LatticeDatabase {
            source: None,
            lattice,
            rlat,
            atomic_numbers,
            atomic_masses,
            atomic_positions,
            symmetries,
            car_kpoints,
            red_kpoints,
            metadata,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// 实空间晶格向量（行向量）
    pub fn lattice_vectors(&self) -> Matrix3 {
        self.lattice.matrix
    }

    pub fn reciprocal_lattice(&self) -> Matrix3 {
        self.rlat
    }

    /// 不可约 k 点（笛卡尔坐标）
    pub fn irreducible_kpoints(&self) -> &[Vector3] {
        &self.car_kpoints
    }

    /// 不可约 k 点（约化坐标）
    pub fn irreducible_reduced(&self) -> &[Vector3] {
        &self.red_kpoints
    }

    /// 对称操作及其时间反演标记
    pub fn symmetries(&self) -> Vec<(Matrix3, bool)> {
        self.symmetries
            .iter()
            .map(|op| (op.sym_car, op.time_reversed))
            .collect()
    }

    pub fn symmetry_ops(&self) -> &[SymmetryOp] {
        &self.symmetries
    }

    pub fn metadata(&self) -> &DatabaseMetadata {
        &self.metadata
    }

    pub fn atomic_numbers(&self) -> &[u32] {
        &self.atomic_numbers
    }

    pub fn atomic_masses(&self) -> &[f64] {
        &self.atomic_masses
    }

    /// 原子列表（原子序数、符号、质量与位置逐一对应）
    pub fn atoms(&self) -> Vec<Atom> {
        self.atomic_numbers
            .iter()
            .zip(&self.atomic_masses)
            .zip(&self.atomic_positions)
            .map(|((&z, &mass), &position)| Atom {
                atomic_number: z,
                symbol: element_symbol(z).unwrap_or("X").to_string(),
                mass,
                position,
            })
            .collect()
    }

    /// 展开到全布里渊区
    pub fn expand(&self) -> Result<BzExpansion> {
        bz::expand(&self.car_kpoints, &self.symmetries, &self.rlat)
    }

    /// 按不可约 k 点并行展开，结果与 [`expand`](Self::expand) 相同
    pub fn expand_parallel(&self, jobs: usize) -> Result<BzExpansion> {
        bz::expand_parallel(&self.car_kpoints, &self.symmetries, &self.rlat, jobs)
    }
}

/// 计算目录下存放数据库的子目录
const SAVE_DIR: &str = "SAVE";

/// 计算目录下可能存放数据库的目录：目录本身，以及存在时的 `SAVE/`
pub fn database_dirs(dir: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![dir.to_path_buf()];
    let save = dir.join(SAVE_DIR);
    if save.is_dir() {
        dirs.push(save);
    }
    dirs
}

/// 在计算目录中定位数据库：`<dir>/<filename>` 或 `<dir>/SAVE/<filename>`
pub fn find_database(path: &Path, filename: &str) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if !path.is_dir() {
        return Err(BzkitError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    database_dirs(path)
        .into_iter()
        .map(|dir| dir.join(filename))
        .find(|p| p.is_file())
        .ok_or_else(|| BzkitError::FileNotFound {
            path: path.join(filename).display().to_string(),
        })
}
