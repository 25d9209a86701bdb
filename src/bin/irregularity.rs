//! Searches irregular edge weightings of small graphs.
//!
//! - Graph: a deterministic family, a random G(n,p) graph or an EdgeList file.
//! - Search: repeated trials redrawing the weight of the top-priority edge.
//! - Output: one line per trial, then the diagnostic report of the best weighting.
//! - Logging: set `RUST_LOG=debug` to trace every weight change.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use irregraphs::{algo::*, gens::*, io::*, prelude::*};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FamilyArg {
    Star,
    Complete,
    Path,
    Cycle,
    Diamonds,
    Gnp,
}

#[derive(Parser, Debug)]
#[command(
    name = "irregularity",
    about = "Randomized search for irregular edge weightings.",
    long_about = r#"
Assigns positive integer weights to the edges of a graph until no two vertices share the same
weighted degree. Every trial starts from the all-ones weighting and repeatedly redraws the
weight of the edge ranked highest by the degree-collision priorities. The largest weight of the
best irregular weighting found is an upper bound on the irregularity strength s(G).
"#
)]
struct Cli {
    /// Graph family to search on (ignored if --file is given)
    #[arg(long, value_enum, default_value_t = FamilyArg::Diamonds)]
    family: FamilyArg,

    /// Number of vertices for star, complete, path, cycle and gnp
    #[arg(long, default_value_t = 21)]
    nodes: NumNodes,

    /// Number of diamonds attached to the hub
    #[arg(long, default_value_t = 4)]
    copies: NumNodes,

    /// Edge probability for gnp
    #[arg(long, default_value_t = 0.3)]
    prob: f64,

    /// Read the graph from an EdgeList file instead
    #[arg(long)]
    file: Option<PathBuf>,

    /// Number of trials
    #[arg(long, default_value_t = 100)]
    trials: usize,

    /// Weight changes per trial before it is aborted
    #[arg(long, default_value_t = 100)]
    max_iterations: usize,

    /// Largest weight drawn in the first trial; 0 means |V| - 1
    #[arg(long, default_value_t = 6)]
    max_weight: Weight,

    /// Keep the weight cap fixed instead of lowering it after each success
    #[arg(long)]
    no_tighten: bool,

    /// RNG seed; drawn at random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write the best weighting as EdgeList to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_graph(cli: &Cli, rng: &mut Pcg64Mcg) -> std::io::Result<WeightedGraph> {
    if let Some(path) = &cli.file {
        return WeightedGraph::try_read_edge_list_file(path);
    }

    let graph = match cli.family {
        FamilyArg::Star => Family::Star(cli.nodes).try_build(),
        FamilyArg::Complete => Family::Complete(cli.nodes).try_build(),
        FamilyArg::Path => Family::Path(cli.nodes).try_build(),
        FamilyArg::Cycle => Family::Cycle(cli.nodes).try_build(),
        FamilyArg::Diamonds => Family::HubOfDiamonds(cli.copies).try_build(),
        FamilyArg::Gnp => {
            if !(0.0..=1.0).contains(&cli.prob) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} is not a probability", cli.prob),
                ));
            }
            Gnp::new().nodes(cli.nodes).prob(cli.prob).try_build(rng)
        }
    }?;

    Ok(graph)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let rng = &mut Pcg64Mcg::seed_from_u64(seed);

    let graph = load_graph(&cli, rng)?;
    info!(
        seed,
        n = graph.number_of_nodes(),
        m = graph.number_of_edges(),
        upper_bound = graph.irregularity_strength_upper_bound(),
        "graph loaded"
    );

    let max_weight = cli
        .max_weight
        .min(graph.irregularity_strength_upper_bound().max(1));
    let report = IrregularWeightSearch::new()
        .max_iterations(cli.max_iterations)
        .max_weight(max_weight)
        .tighten_on_success(!cli.no_tighten)
        .run(&graph, cli.trials, rng)?;

    for (trial, outcome) in report.outcomes.iter().enumerate() {
        match outcome {
            TrialOutcome::Irregular {
                strength,
                iterations,
            } => println!("trial {trial}: irregular s={strength} after {iterations} iterations"),
            TrialOutcome::Aborted { iterations } => {
                println!("trial {trial}: aborted after {iterations} iterations")
            }
        }
    }

    println!(
        "{} of {} trials succeeded",
        report.number_of_successes(),
        report.outcomes.len()
    );

    match &report.best {
        Some(best) => {
            println!("\n{best}");
            println!("vertex priorities:");
            for (u, p) in best.ranked_vertices() {
                println!("  v={u}: ({}, {})", p.class_size, p.degree);
            }
            println!("edge priorities:");
            print!("{}", best.compute_edge_priorities());

            if let Some(path) = &cli.output {
                EdgeListWriter::new().try_write_graph_file(best, path)?;
                info!(path = %path.display(), "best weighting written");
            }
        }
        None => println!("no irregular weighting found"),
    }

    Ok(())
}
