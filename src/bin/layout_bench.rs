//! Compares BruteForce vs Barnes-Hut repulsion timing across a sweep of
//! graph sizes and prints a table to stdout.

use std::time::Instant;

use fr_layout::graph::{BarnesHut, BruteForce, RepulsiveStrategy};
use fr_layout::Graph;

const SIZES: &[u32] = &[50, 100, 250, 500, 1000, 2000];
const STEPS: u32 = 10;

fn time_strategy(mut strategy: Box<dyn RepulsiveStrategy>, n: u32, seed: u64) -> std::time::Duration {
    let mut graph = Graph::erdos_renyi(n, 0.02, seed).expect("valid graph parameters");
    for (i, node) in graph.nodes_mut().iter_mut().enumerate() {
        node.position.x = (i as f32 * 37.0) % 1000.0;
        node.position.y = (i as f32 * 53.0) % 1000.0;
    }
    let k = (1000.0 * 1000.0 / n as f32).sqrt();

    let start = Instant::now();
    for _ in 0..STEPS {
        strategy.compute_repulsive(graph.nodes_mut(), k).expect("repulsion step");
    }
    start.elapsed()
}

fn main() {
    println!("{:>8}  {:>14}  {:>14}", "|V|", "brute-force", "barnes-hut");
    for &n in SIZES {
        let brute = time_strategy(Box::new(BruteForce), n, 1);
        let bh = time_strategy(Box::new(BarnesHut::new(0.5)), n, 1);
        println!("{:>8}  {:>12?}  {:>12?}", n, brute, bh);
    }
}
