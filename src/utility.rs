use std::time::Instant;

use ahash::HashMapExt;
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rand::prelude::*;
use rayon::prelude::*;

use crate::{
    graphs::{edge::WeightedEdge, vec_vec_graph::VecVecGraph, Distance, VertexId},
    queue::{
        heap_queue::HeapQueue, radix_queue::RadixQueue, sorted_vec_queue::SortedVecQueue,
        Frontier, FrontierKind,
    },
    search::{
        dijkstra::DijkstraSearch,
        path::{
            get_path, validate_path, Path, PathError, ShortestPathRequest, ShortestPathTestCase,
            ShortestPathTestTimingResult,
        },
        predecessors::PredecessorMap,
    },
};

/// Logs to stderr, filtered by `RUST_LOG` or `default_level`.
pub fn init_logging(default_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(default_level)?.start()
}

pub fn get_progressbar_long_jobs(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    if let Ok(style) =
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
    {
        bar.set_style(style);
    }
    bar
}

/// Random graph with `number_of_edges` directed edges between distinct
/// vertices, weights drawn from `0..=max_weight`.
pub fn random_graph<R: Rng>(
    rng: &mut R,
    number_of_vertices: u32,
    number_of_edges: u32,
    max_weight: Distance,
) -> VecVecGraph {
    let mut edges = Vec::with_capacity(number_of_edges as usize);
    if number_of_vertices > 1 {
        while edges.len() < number_of_edges as usize {
            let tail = rng.gen_range(0..number_of_vertices);
            let head = rng.gen_range(0..number_of_vertices);
            if tail != head {
                edges.push(WeightedEdge::new(tail, head, rng.gen_range(0..=max_weight)));
            }
        }
    }

    let mut graph = VecVecGraph::from_edges(&edges);
    // isolated trailing vertices still count
    if number_of_vertices > graph.number_of_vertices() {
        graph.set_weight(number_of_vertices - 1, 0, None);
    }
    graph
}

pub fn random_request<R: Rng>(number_of_vertices: u32, rng: &mut R) -> Option<ShortestPathRequest> {
    if number_of_vertices <= 1 {
        // not enough vertices to get a request with source != target
        return None;
    }

    // guarantee that source != target
    let source = rng.gen_range(0..number_of_vertices);
    let mut target = rng.gen_range(0..number_of_vertices - 1);
    if target >= source {
        target += 1;
    }

    Some(ShortestPathRequest { source, target })
}

/// Solves a single request on `graph` with the chosen frontier. Returns the
/// path, if any, and the number of vertices finalized on the way.
pub fn solve_request(
    graph: &VecVecGraph,
    request: &ShortestPathRequest,
    frontier: FrontierKind,
) -> (Option<Path<VertexId>>, u32) {
    match frontier {
        FrontierKind::Heap => solve_request_with(graph, request, HeapQueue::new()),
        FrontierKind::SortedVec => solve_request_with(graph, request, SortedVecQueue::new()),
        FrontierKind::Radix => solve_request_with(graph, request, RadixQueue::new()),
    }
}

fn solve_request_with<Q: Frontier<VertexId>>(
    graph: &VecVecGraph,
    request: &ShortestPathRequest,
    queue: Q,
) -> (Option<Path<VertexId>>, u32) {
    let target = request.target;
    let mut predecessors = PredecessorMap::new();
    let mut search = DijkstraSearch::with_queue([request.source], queue);
    search.run(
        |vertex: &VertexId| graph.neighbors(*vertex),
        |vertex: &VertexId| *vertex == target,
        &mut predecessors,
    );

    let path = get_path(search.distances(), &predecessors, &target);
    (path, search.dijkstra_rank())
}

/// Generates `number_of_test_cases` random requests and solves them in
/// parallel.
pub fn gen_tests_cases(graph: &VecVecGraph, number_of_test_cases: u32) -> Vec<ShortestPathTestCase> {
    (0..number_of_test_cases)
        .into_par_iter()
        .progress_count(number_of_test_cases as u64)
        .map_init(rand::thread_rng, |rng, _| {
            let request = random_request(graph.number_of_vertices(), rng)?;
            let (path, dijkstra_rank) = solve_request(graph, &request, FrontierKind::Heap);
            Some(ShortestPathTestCase {
                request,
                distance: path.map(|path| path.distance),
                dijkstra_rank,
            })
        })
        .flatten()
        .collect()
}

/// Check if a path is correct for a given test case.
pub fn validate_test_case(
    graph: &VecVecGraph,
    test_case: &ShortestPathTestCase,
    path: Option<&Path<VertexId>>,
) -> Result<(), PathError> {
    let found = path.map(|path| path.distance);
    if found != test_case.distance {
        return Err(PathError::UnexpectedDistance {
            expected: test_case.distance,
            found,
        });
    }

    match path {
        Some(path) => validate_path(
            path,
            &test_case.request.source,
            &test_case.request.target,
            |vertex: &VertexId| graph.neighbors(*vertex),
        ),
        None => Ok(()),
    }
}

/// Re-solves and validates every test case, timing each query.
pub fn validate_and_time(
    graph: &VecVecGraph,
    test_cases: &[ShortestPathTestCase],
    frontier: FrontierKind,
) -> Result<Vec<ShortestPathTestTimingResult>, PathError> {
    let bar = get_progressbar_long_jobs("validating", test_cases.len() as u64);

    let mut results = Vec::with_capacity(test_cases.len());
    for test_case in test_cases {
        let start = Instant::now();
        let (path, _) = solve_request(graph, &test_case.request, frontier);
        let timing_in_seconds = start.elapsed().as_secs_f64();

        validate_test_case(graph, test_case, path.as_ref())?;
        results.push(ShortestPathTestTimingResult {
            test_case: test_case.clone(),
            timing_in_seconds,
        });
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(results)
}
