//! Performance benchmark comparing the step algorithms

use std::time::Instant;
use conway3d::{Algorithm, Grid, Preset, PresetInitializer, RuleSet, SimulationEngine};

fn benchmark(algorithm: Algorithm, size: usize, iterations: u32) -> f64 {
    let rule = RuleSet::default();
    let mut grid = Grid::new(size);
    let mut init = PresetInitializer::from_seed(0.2, 0xC0FFEE).expect("valid density");
    init.seed(&mut grid, Preset::Random);

    let mut engine = SimulationEngine::new(algorithm);
    let start = Instant::now();
    for _ in 0..iterations {
        engine.step(&mut grid, &rule);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== 3D Life Step Benchmark ===\n");

    let sizes = [16, 30, 64, 100, 160];
    let iterations = 10;

    println!(
        "{:>10} {:>12} {:>12} {:>10} {:>14}",
        "Size", "Serial", "Parallel", "Speedup", "Mcells/sec"
    );
    println!("{:-<62}", "");

    for size in sizes {
        let serial_ms = benchmark(Algorithm::Serial, size, iterations);
        let parallel_ms = benchmark(Algorithm::Parallel, size, iterations);
        let cells = (size * size * size) as f64;

        println!(
            "{:>10} {:>10.2}ms {:>10.2}ms {:>9.1}x {:>14.1}",
            format!("{}³", size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            cells / (parallel_ms / 1000.0) / 1_000_000.0
        );
    }
}
