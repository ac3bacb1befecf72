//! Compare a coarse and a fine solution of the same problem
//!
//! Reports the L2 norm of their difference for one variable and writes
//! the coarse-minus-fine nodal difference of all variables.

use anyhow::{Context, Result};
use clap::Parser;
use math_grid_transfer::{GridTransfer, OctTree, TransferConfig, io};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "grid2grid",
    version,
    about = "Interpolate a coarse-mesh solution onto a fine mesh and report their L2 difference"
)]
struct Cli {
    /// Index of the variable used for the L2 error
    ivar: usize,

    /// Coarse mesh (JSON)
    coarse_mesh: PathBuf,

    /// Fine mesh (JSON)
    fine_mesh: PathBuf,

    /// Solution on the coarse mesh (JSON)
    coarse_soln: PathBuf,

    /// Solution on the fine mesh (JSON)
    fine_soln: PathBuf,

    /// Where to write the nodal difference
    #[arg(short, long, default_value = "diff.json")]
    output: PathBuf,

    /// Transfer configuration (JSON); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leaf capacity of the octree
    #[arg(long)]
    max_elements_per_bin: Option<usize>,

    /// Polynomial degree integrated exactly by the error quadrature
    #[arg(long)]
    quadrature_order: Option<usize>,

    /// Check that every coarse element centroid and node can be located
    #[arg(long)]
    check_index: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => TransferConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TransferConfig::default(),
    };
    if let Some(n) = args.max_elements_per_bin {
        config.octree.max_elements_per_bin = n;
    }
    if let Some(order) = args.quadrature_order {
        config.quadrature_order = order;
    }

    let start = Instant::now();
    let coarse = io::read_mesh(&args.coarse_mesh)
        .with_context(|| format!("reading coarse mesh {}", args.coarse_mesh.display()))?;
    println!("Coarse mesh: {}", coarse.summary());
    let fine = io::read_mesh(&args.fine_mesh)
        .with_context(|| format!("reading fine mesh {}", args.fine_mesh.display()))?;
    println!("Fine mesh:   {}", fine.summary());

    let coarse_soln = io::read_solution(&args.coarse_soln, coarse.num_nodes())
        .with_context(|| format!("reading coarse solution {}", args.coarse_soln.display()))?;
    let fine_soln = io::read_solution(&args.fine_soln, fine.num_nodes())
        .with_context(|| format!("reading fine solution {}", args.fine_soln.display()))?;
    log::info!("Read inputs in {:.2?}", start.elapsed());

    let transfer = GridTransfer::new(&coarse, &fine, &coarse_soln, &fine_soln, config)?;
    report_tree(transfer.tree());
    if args.check_index {
        let n = transfer.tree().check_coverage()?;
        println!("Index check: located {} points", n);
    }

    let report = transfer.l2_error(args.ivar)?;
    println!("Computed error={}", report.error);

    let difference = transfer.nodal_difference()?;
    io::write_nodal_data(&args.output, &fine, &difference)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!(
        "Wrote nodal difference of {} variable(s) to {}",
        difference.n_variables(),
        args.output.display()
    );

    Ok(())
}

fn report_tree(tree: &OctTree<'_>) {
    println!(
        "Octree: n_active_bins()={} n_bins()={} depth={}",
        tree.n_active_bins(),
        tree.n_bins(),
        tree.depth()
    );
}
