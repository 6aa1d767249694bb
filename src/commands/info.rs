//! # info 命令实现
//!
//! 打印数据库中的晶格、原子、对称操作与元数据。
//!
//! ## 依赖关系
//! - 使用 `cli/info.rs` 定义的参数
//! - 使用 `database/` 读取数据库
//! - 使用 `tabled` 渲染表格

use crate::cli::info::InfoArgs;
use crate::database::{find_database, LatticeDatabase};
use crate::error::Result;
use crate::geometry::{Matrix3, Vector3};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct AtomRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Z")]
    atomic_number: u32,
    #[tabled(rename = "Element")]
    symbol: String,
    #[tabled(rename = "Mass (u)")]
    mass: String,
    #[tabled(rename = "Position")]
    position: String,
}

#[derive(Tabled)]
struct SymmetryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Matrix (cartesian)")]
    matrix: String,
    #[tabled(rename = "Time reversal")]
    time_reversed: String,
    #[tabled(rename = "Identity")]
    identity: bool,
}

#[derive(Tabled)]
struct KpointRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Cartesian")]
    cartesian: String,
    #[tabled(rename = "Reduced")]
    reduced: String,
}

/// 执行 info 命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let path = find_database(&args.input, &args.filename)?;
    let db = LatticeDatabase::read(&path)?;

    output::print_header(&format!("Lattice database '{}'", path.display()));

    let (a, b, c, alpha, beta, gamma) = db.lattice().parameters();
    output::print_field("a, b, c (bohr)", &format!("{:.6} {:.6} {:.6}", a, b, c));
    output::print_field(
        "alpha, beta, gamma",
        &format!("{:.3} {:.3} {:.3}", alpha, beta, gamma),
    );
    output::print_field("Volume (bohr^3)", &format!("{:.6}", db.lattice().volume()));
    output::print_field("Lattice constants", &format_vector(&db.lattice().alat));
    println!();
    print_matrix("Lattice vectors", &db.lattice_vectors());
    print_matrix("Reciprocal lattice", &db.reciprocal_lattice());

    let meta = db.metadata();
    output::print_header("Metadata");
    output::print_field("Temperature", &format!("{}", meta.temperature));
    output::print_field("Electrons", &format!("{}", meta.nelectrons));
    output::print_field("Spin components", &meta.spin.to_string());
    output::print_field(
        "Time reversal",
        if meta.time_rev { "yes" } else { "no" },
    );
    output::print_field(
        "Irreducible k-points",
        &format!(
            "{} (recorded {})",
            db.irreducible_kpoints().len(),
            meta.nkpoints
        ),
    );

    let atoms: Vec<AtomRow> = db
        .atoms()
        .into_iter()
        .enumerate()
        .map(|(i, atom)| AtomRow {
            index: i + 1,
            atomic_number: atom.atomic_number,
            symbol: atom.symbol,
            mass: format!("{:.4}", atom.mass),
            position: format_vector(&atom.position),
        })
        .collect();
    output::print_header(&format!("Atoms ({})", atoms.len()));
    println!("{}", Table::new(&atoms));

    let symmetries = symmetry_rows(&db);
    output::print_header(&format!("Symmetry operations ({})", symmetries.len()));
    println!("{}", Table::new(&symmetries));
    if !symmetries.iter().any(|row| row.identity) {
        output::print_warning(
            "No identity operation: expanded orbits may not contain the irreducible points",
        );
    }

    if args.kpoints {
        let kpoints: Vec<KpointRow> = db
            .irreducible_kpoints()
            .iter()
            .zip(db.irreducible_reduced())
            .enumerate()
            .map(|(i, (car, red))| KpointRow {
                index: i,
                cartesian: format_vector(car),
                reduced: format_vector(red),
            })
            .collect();
        output::print_header(&format!("Irreducible k-points ({})", kpoints.len()));
        println!("{}", Table::new(&kpoints));
    }

    Ok(())
}

fn symmetry_rows(db: &LatticeDatabase) -> Vec<SymmetryRow> {
    db.symmetries()
        .iter()
        .zip(db.symmetry_ops())
        .enumerate()
        .map(|(i, ((matrix, time_reversed), op))| SymmetryRow {
            index: i,
            matrix: format_matrix_inline(matrix),
            time_reversed: if *time_reversed { "yes" } else { "" }.to_string(),
            identity: op.is_identity(),
        })
        .collect()
}

fn format_vector(v: &Vector3) -> String {
    format!("{:>10.6} {:>10.6} {:>10.6}", v[0], v[1], v[2])
}

fn format_matrix_inline(m: &Matrix3) -> String {
    m.iter()
        .map(|row| format!("[{:>5.2} {:>5.2} {:>5.2}]", row[0], row[1], row[2]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_matrix(title: &str, m: &Matrix3) {
    println!("  {}:", title);
    for row in m {
        println!("    {}", format_vector(row));
    }
}
