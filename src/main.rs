use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dpt::generate::{self, Family, EXAMPLE_VALUES};
use dpt::{PulseTree, TieBreak};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dpt", about = "Discrete Pulse Transform of functions on graphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time the transform on generated graph families.
    Bench {
        /// Families to run (default: path, grid, complete, random).
        #[arg(long, value_enum)]
        family: Vec<FamilyArg>,
        /// Largest size exponent per family (default depends on the family).
        #[arg(long)]
        kmax: Option<u32>,
        /// Seed for the random values and arcs.
        #[arg(long, default_value_t = 2009)]
        seed: u64,
        /// Tie-break between equal-size extrema.
        #[arg(long, value_enum, default_value_t = PolicyArg::Ceiling)]
        policy: PolicyArg,
    },
    /// Decompose the 13-node reference example and rebuild it.
    Example {
        /// Tie-break between equal-size extrema.
        #[arg(long, value_enum, default_value_t = PolicyArg::Ceiling)]
        policy: PolicyArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FamilyArg {
    Path,
    Cycle,
    Grid,
    Complete,
    Random,
}

impl From<FamilyArg> for Family {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Path => Family::Path,
            FamilyArg::Cycle => Family::Cycle,
            FamilyArg::Grid => Family::Grid,
            FamilyArg::Complete => Family::Complete,
            FamilyArg::Random => Family::Random,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Ceiling,
    Floor,
}

impl From<PolicyArg> for TieBreak {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Ceiling => TieBreak::Ceiling,
            PolicyArg::Floor => TieBreak::Floor,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            family,
            kmax,
            seed,
            policy,
        } => run_bench(family, kmax, seed, policy.into())?,
        Commands::Example { policy } => run_example(policy.into())?,
    }

    Ok(())
}

fn run_bench(families: Vec<FamilyArg>, kmax: Option<u32>, seed: u64, policy: TieBreak) -> Result<()> {
    let families: Vec<Family> = if families.is_empty() {
        Family::BENCHMARKS.to_vec()
    } else {
        families.into_iter().map(Family::from).collect()
    };
    let mut rng = StdRng::seed_from_u64(seed);

    println!("#nodes #arcs count border1 border2\n    seconds");
    for family in families {
        println!("------- {} -------", family.description());
        for m in family.cases(kmax) {
            let graph = family
                .build(m, &mut rng)
                .with_context(|| format!("failed to generate {:?} graph of size {}", family, m))?;

            let started = Instant::now();
            let tree = graph
                .dpt_with(policy)
                .with_context(|| format!("transform failed for {:?} graph of size {}", family, m))?;
            let elapsed = started.elapsed();

            let stats = tree.stats();
            println!(
                "{} {} {} {} {}",
                stats.nnodes, stats.narcs, stats.count, stats.border1, stats.border
            );
            println!("     {:.6}", elapsed.as_secs_f64());
            info!(?family, m, extractions = stats.extractions, "case done");
        }
    }

    Ok(())
}

fn run_example(policy: TieBreak) -> Result<()> {
    let graph = generate::reference_example().context("failed to build reference example")?;

    println!("   Small example: tag, size, value, parent");
    for node in graph.nodes() {
        println!("{}_{} = {} -> {}", node.tag, node.size, node.value, node.parent);
    }

    let mut tree = graph.dpt_with(policy).context("transform failed")?;
    println!("   After DPT");
    print_tree(&tree);

    tree.revalue().context("reconstruction failed")?;
    println!("   Node values recomputed from DPT");
    for node in tree.iter() {
        println!("{} = {}", node.tag, node.value);
    }

    ensure!(
        tree.values() == EXAMPLE_VALUES,
        "reconstructed values differ from the input"
    );
    println!("fingerprint {}", tree.fingerprint());

    Ok(())
}

fn print_tree(tree: &PulseTree<i64>) {
    for node in tree.iter() {
        println!(
            "{}_{}({:?}) = {} -> {}",
            node.tag, node.size, node.children, node.value, node.parent
        );
    }
}
