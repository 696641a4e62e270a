use std::{error::Error, fs::File, io::BufWriter, path::PathBuf, time::Duration};

use clap::Parser;
use lazy_paths::{
    queue::FrontierKind,
    utility::{gen_tests_cases, init_logging, random_graph, validate_and_time},
};
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};

/// Builds a random graph in memory, solves `number_of_test_cases` random
/// requests on it and re-solves them with every frontier, validating each path
/// and reporting the average query time.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of vertices of the random graph
    #[arg(long, default_value_t = 10_000)]
    number_of_vertices: u32,

    /// Number of directed edges of the random graph
    #[arg(long, default_value_t = 40_000)]
    number_of_edges: u32,

    /// Largest edge weight
    #[arg(long, default_value_t = 100)]
    max_weight: u32,

    /// Number of random requests
    #[arg(short, long, default_value_t = 1_000)]
    number_of_test_cases: u32,

    /// Seed of the random graph
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Only benchmark this frontier
    #[arg(short, long, value_enum)]
    frontier: Option<FrontierKind>,

    /// Path where the timing results shall be saved
    #[arg(short, long)]
    timing_results: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = init_logging("info")?;

    info!("Generating graph");
    let mut rng = StdRng::seed_from_u64(args.seed);
    let graph = random_graph(
        &mut rng,
        args.number_of_vertices,
        args.number_of_edges,
        args.max_weight,
    );
    info!(
        "graph has {} vertices and {} edges",
        graph.number_of_vertices(),
        graph.number_of_edges()
    );

    info!("Generating test cases");
    let test_cases = gen_tests_cases(&graph, args.number_of_test_cases);
    let unreachable = test_cases
        .iter()
        .filter(|test_case| test_case.distance.is_none())
        .count();
    info!("{} test cases, {} without path", test_cases.len(), unreachable);

    let frontiers = match args.frontier {
        Some(frontier) => vec![frontier],
        None => vec![FrontierKind::Heap, FrontierKind::SortedVec, FrontierKind::Radix],
    };

    let mut all_results = Vec::new();
    for frontier in frontiers {
        info!("Testing & validating with {:?} frontier", frontier);
        let results = match validate_and_time(&graph, &test_cases, frontier) {
            Ok(results) => results,
            Err(err) => {
                error!("validation failed: {}", err);
                return Err(err.into());
            }
        };

        let average = results
            .iter()
            .map(|result| result.timing_in_seconds)
            .sum::<f64>()
            / results.len().max(1) as f64;
        println!(
            "{:?}: all correct, took {:?} per query averaged over {} queries",
            frontier,
            Duration::from_secs_f64(average),
            results.len()
        );
        all_results.push((frontier, results));
    }

    if let Some(timing_results) = args.timing_results {
        info!("Writing timing results");
        let writer = BufWriter::new(File::create(timing_results)?);
        serde_json::to_writer(writer, &all_results)?;
    }

    Ok(())
}
