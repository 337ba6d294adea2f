//! Runs the force-directed layout over a generated or configured graph and
//! writes the resulting positions, edges, and convergence series to CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};

use fr_layout::config::LayoutConfig;
use fr_layout::graph::{BarnesHut, BruteForce, RepulsiveStrategy};
use fr_layout::{Graph, LayoutEngine};

/// Force-directed graph layout driver.
#[derive(Parser, Debug)]
#[command(name = "layout_cli", author, version, about = "Lay out a graph with Fruchterman-Reingold")]
struct Cli {
    /// Number of nodes in the generated Erdős–Rényi graph.
    #[arg(short = 'n', long, default_value_t = 100)]
    nodes: u32,

    /// Edge probability for the generated graph.
    #[arg(short = 'p', long, default_value_t = 0.05)]
    probability: f64,

    /// Number of layout iterations to run.
    #[arg(short = 'i', long, default_value_t = 200)]
    iterations: u32,

    /// PRNG seed for graph generation and node placement. Omit for a
    /// nondeterministic run.
    #[arg(long)]
    seed: Option<u64>,

    /// Repulsive strategy: "brute-force" or "barnes-hut".
    #[arg(long, default_value = "barnes-hut")]
    strategy: String,

    /// Path to an optional layout.toml overriding simulation defaults.
    #[arg(long, default_value = "layout.toml")]
    config: PathBuf,

    /// Directory the output CSV files are written into.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    let config = LayoutConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    info!(nodes = cli.nodes, probability = cli.probability, "generating graph");
    let seed = cli.seed.unwrap_or_else(|| rand::random());
    let mut graph = Graph::erdos_renyi(cli.nodes, cli.probability, seed)
        .context("failed to generate graph")?;

    let mut engine = LayoutEngine::new(config.width, config.height, config.scaling_constant)
        .context("failed to construct layout engine")?;
    engine.set_temperature(config.initial_temperature);
    engine.set_cooling_rate(config.cooling_rate);
    engine.set_t_min(config.t_min);

    match cli.strategy.as_str() {
        "brute-force" => engine.set_strategy(Box::new(BruteForce)),
        "barnes-hut" => engine.set_strategy(Box::new(BarnesHut::new(config.theta)) as Box<dyn RepulsiveStrategy>),
        other => anyhow::bail!("unknown strategy {other:?} (expected brute-force or barnes-hut)"),
    }

    engine.initialize(&mut graph, cli.seed).context("failed to initialize positions")?;

    info!(iterations = cli.iterations, strategy = %cli.strategy, "running layout");
    for i in 0..cli.iterations {
        engine.step(&mut graph).with_context(|| format!("step {i} failed"))?;
        if i % 50 == 0 {
            info!(step = i, temperature = engine.temperature(), energy = engine.kinetic_energy(), "progress");
        }
    }

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;
    write_positions(&cli.output_dir.join("positions.csv"), &graph)?;
    write_edges(&cli.output_dir.join("edges.csv"), &graph)?;
    write_convergence(&cli.output_dir.join("convergence.csv"), engine.convergence_history())?;

    info!("done");
    Ok(())
}

#[derive(Serialize)]
struct PositionRecord {
    id: u32,
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct EdgeRecord {
    source: u32,
    target: u32,
}

#[derive(Serialize)]
struct ConvergenceRecord {
    step: usize,
    energy: f32,
}

fn write_positions(path: &std::path::Path, graph: &Graph) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for (id, x, y) in graph.node_positions() {
        w.serialize(PositionRecord { id, x, y })?;
    }
    w.flush()?;
    Ok(())
}

fn write_edges(path: &std::path::Path, graph: &Graph) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for (source, target) in graph.canonical_edges() {
        w.serialize(EdgeRecord { source, target })?;
    }
    w.flush()?;
    Ok(())
}

fn write_convergence(path: &std::path::Path, history: &[f32]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for (step, &energy) in history.iter().enumerate() {
        w.serialize(ConvergenceRecord { step, energy })?;
    }
    w.flush()?;
    Ok(())
}
