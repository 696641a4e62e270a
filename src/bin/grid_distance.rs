use std::{error::Error, fs, hash::Hash, path::PathBuf};

use ahash::HashMapExt;
use clap::Parser;
use itertools::Itertools;
use lazy_paths::{
    graphs::{
        grid::{Arrow, Facing, Grid, Point},
        Distance, Neighbor, UniformNeighbors,
    },
    queue::{
        heap_queue::HeapQueue, radix_queue::RadixQueue, sorted_vec_queue::SortedVecQueue,
        Frontier, FrontierKind,
    },
    search::{
        dijkstra::DijkstraSearch,
        path::{get_path, Path},
        predecessors::PredecessorMap,
    },
    utility::init_logging,
};
use log::info;

const WALL: u8 = b'#';
const START: u8 = b'S';
const END: u8 = b'E';

/// Finds a shortest path through a maze from `S` to `E`. Cells marked `#` are
/// walls, every other cell can be entered.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maze file
    #[arg(short, long)]
    maze: PathBuf,

    /// Priority queue used by the search
    #[arg(short, long, value_enum, default_value_t = FrontierKind::Heap)]
    frontier: FrontierKind,

    /// Cost of turning by 90 degrees. The walk then starts facing east and
    /// moving forward costs 1.
    #[arg(short, long)]
    turn_cost: Option<Distance>,

    /// Print the maze with the path drawn in
    #[arg(short, long)]
    print_path: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = init_logging("info")?;

    let mut maze: Grid = fs::read_to_string(&args.maze)?.parse()?;
    let start = maze.find(START).ok_or("maze has no start `S`")?;
    let end = maze.find(END).ok_or("maze has no end `E`")?;
    info!(
        "read {}x{} maze, start {}, end {}",
        maze.width(),
        maze.height(),
        start,
        end
    );

    let is_open = |point: &Point| maze.get(*point).is_some_and(|cell| cell != WALL);

    let path = match args.turn_cost {
        None => search(
            args.frontier,
            start,
            |point: &Point| {
                maze.basic_neighbors(*point)
                    .filter(is_open)
                    .uniform_neighbors()
            },
            |point: &Point| *point == end,
        ),
        Some(turn_cost) => search(
            args.frontier,
            Arrow::new(start, Facing::East),
            |arrow: &Arrow| {
                let forward = arrow.forward();
                let mut neighbors = vec![
                    Neighbor::new(arrow.turned_clockwise(), turn_cost),
                    Neighbor::new(arrow.turned_anticlockwise(), turn_cost),
                ];
                if is_open(&forward.position) {
                    neighbors.push(Neighbor::new(forward, 1));
                }
                neighbors
            },
            |arrow: &Arrow| arrow.position == end,
        )
        .map(|path| Path {
            vertices: path
                .vertices
                .into_iter()
                .map(|arrow| arrow.position)
                .dedup()
                .collect(),
            distance: path.distance,
        }),
    };

    let Some(path) = path else {
        println!("no path");
        return Ok(());
    };

    println!("{}", path.distance);
    if args.print_path {
        for point in &path.vertices {
            if maze.get(*point) != Some(START) && maze.get(*point) != Some(END) {
                maze.set(*point, b'o');
            }
        }
        print!("{}", maze);
    }

    Ok(())
}

fn search<N, F, I, E>(frontier: FrontierKind, start: N, get_neighbors: F, end: E) -> Option<Path<N>>
where
    N: Clone + Ord + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = Neighbor<N>>,
    E: FnMut(&N) -> bool,
{
    match frontier {
        FrontierKind::Heap => search_with(HeapQueue::new(), start, get_neighbors, end),
        FrontierKind::SortedVec => search_with(SortedVecQueue::new(), start, get_neighbors, end),
        FrontierKind::Radix => search_with(RadixQueue::new(), start, get_neighbors, end),
    }
}

fn search_with<N, Q, F, I, E>(queue: Q, start: N, get_neighbors: F, mut end: E) -> Option<Path<N>>
where
    N: Clone + Hash + Eq,
    Q: Frontier<N>,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = Neighbor<N>>,
    E: FnMut(&N) -> bool,
{
    let mut predecessors = PredecessorMap::new();
    let mut reached = None;

    let mut search = DijkstraSearch::with_queue([start], queue);
    search.run(
        get_neighbors,
        |node: &N| {
            let end_reached = end(node);
            if end_reached {
                reached = Some(node.clone());
            }
            end_reached
        },
        &mut predecessors,
    );
    info!("finalized {} states", search.dijkstra_rank());

    get_path(search.distances(), &predecessors, &reached?)
}
