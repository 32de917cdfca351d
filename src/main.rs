use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use pathina::core::error::PathinaError;
use pathina::core::generators::arbitrary_wc_graph;
use pathina::core::io::{load_graph, save_benchmark, BenchmarkArchive};
use pathina::labeling::engine::{LabelSetting, LabelSettingConfig, DEFAULT_MIN_PERCENT_REMAIN};
use pathina::labeling::frontier::{best_feasible_path, efficient_frontier};

#[derive(Debug, Parser)]
#[command(
    name = "pathina",
    about = "Weight-constrained shortest path tools",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Run the label-setting algorithm on a graph archive
    RunAlgorithm {
        /// Path to the graph archive
        #[arg(long)]
        graph: PathBuf,
        /// Source node id
        #[arg(long)]
        source: u32,
        /// Destination node id
        #[arg(long)]
        destination: u32,
        /// Upper bound on the cumulative path weight
        #[arg(long)]
        max_weight: u64,
        /// Fraction of remaining nodes at which the selection strategy switches
        #[arg(long, default_value_t = DEFAULT_MIN_PERCENT_REMAIN)]
        min_percent_remain: f64,
    },
    /// Time label-setting runs over generated graphs and optionally archive the results
    Benchmark {
        /// Graph sizes (node counts) to benchmark, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        sizes: Vec<usize>,
        /// Mean edge weight of the generated graphs
        #[arg(long, default_value_t = 20.0)]
        mean_weight: f64,
        /// Mean edge cost of the generated graphs
        #[arg(long, default_value_t = 50.0)]
        mean_cost: f64,
        /// Standard deviation of the edge weights
        #[arg(long, default_value_t = 5.0)]
        std_weight: f64,
        /// Standard deviation of the edge costs
        #[arg(long, default_value_t = 10.0)]
        std_cost: f64,
        /// Maximum out-degree and forward reach of a node
        #[arg(long, default_value_t = 5)]
        peak: usize,
        /// Seed for the graph generator
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Weight bound per graph, as a multiple of its mean path weight
        #[arg(long, default_value_t = 1.0)]
        max_weight_factor: f64,
        /// Directory that receives a timestamped folder with the timing archives
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    let outcome = match args.command {
        Command::RunAlgorithm {
            graph,
            source,
            destination,
            max_weight,
            min_percent_remain,
        } => run_algorithm(graph, source, destination, max_weight, min_percent_remain),
        Command::Benchmark {
            sizes,
            mean_weight,
            mean_cost,
            std_weight,
            std_cost,
            peak,
            seed,
            max_weight_factor,
            output,
        } => benchmark(
            sizes,
            mean_weight,
            mean_cost,
            std_weight,
            std_cost,
            peak,
            seed,
            max_weight_factor,
            output,
        ),
    };
    if let Err(e) = outcome {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_algorithm(
    graph_path: PathBuf,
    source: u32,
    destination: u32,
    max_weight: u64,
    min_percent_remain: f64,
) -> Result<(), PathinaError> {
    let graph = load_graph(&graph_path)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded from {}",
        graph_path.display()
    );

    let config = LabelSettingConfig::new(max_weight).with_min_percent_remain(min_percent_remain);
    let run = LabelSetting::run(&graph, source, config)?;

    let frontier = efficient_frontier(&run, destination);
    println!("Efficient frontier at node {}:", destination);
    if frontier.is_empty() {
        println!("  (empty)");
    }
    for (slot, label) in &frontier {
        println!(
            "  via {:>4}: weight {:>6}  cost {:>6}",
            slot, label.weight, label.cost
        );
    }

    let (path, label) = best_feasible_path(&run, destination)?;
    println!(
        "Best feasible path: {:?} with weight {} and cost {}",
        path, label.weight, label.cost
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn benchmark(
    sizes: Vec<usize>,
    mean_weight: f64,
    mean_cost: f64,
    std_weight: f64,
    std_cost: f64,
    peak: usize,
    seed: u64,
    max_weight_factor: f64,
    output: Option<PathBuf>,
) -> Result<(), PathinaError> {
    let mut by_nodes = BenchmarkArchive::new();
    let mut by_edges = BenchmarkArchive::new();

    for &n in &sizes {
        let graph = arbitrary_wc_graph(n, mean_weight, mean_cost, std_weight, std_cost, peak, seed)?;
        // A path from node 0 to node n - 1 crosses roughly n / peak edges on
        // average, so scale the bound with the graph.
        let hops = (n as f64 / peak as f64).ceil();
        let max_weight = (hops * mean_weight * max_weight_factor).round() as u64;
        let config = LabelSettingConfig::new(max_weight);

        let start = Instant::now();
        let run = LabelSetting::run(&graph, 0, config)?;
        let elapsed = start.elapsed().as_secs_f64();
        info!(
            nodes = n,
            edges = graph.edge_count(),
            expansions = run.expansions(),
            elapsed,
            "benchmark run finished"
        );
        println!(
            "{:>7} nodes / {:>7} edges: {:.5} s",
            n,
            graph.edge_count(),
            elapsed
        );

        by_nodes.insert(n as u64, elapsed);
        by_edges.insert(graph.edge_count() as u64, elapsed);
    }

    if let Some(dir) = output {
        let stamp = jiff::Zoned::now().strftime("%Y%m%d-%H%M%S");
        let folder = dir.join(format!("bench-{}", stamp));
        std::fs::create_dir_all(&folder)?;
        save_benchmark(&by_nodes, folder.join("nodes.json"))?;
        save_benchmark(&by_edges, folder.join("edges.json"))?;
        println!("Saved benchmark archives under {}", folder.display());
    }
    Ok(())
}
