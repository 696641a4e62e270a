use ahash::HashMapExt;
use lazy_paths::{
    graphs::{
        edge::WeightedEdge,
        grid::{Arrow, Facing, Grid, Point},
        vec_vec_graph::VecVecGraph,
        Distance, Neighbor, UniformNeighbors, VertexId,
    },
    queue::Frontier,
    search::{
        dijkstra::{
            shortest_distance, shortest_distances, shortest_distances_until,
            shortest_distances_with_predecessors, shortest_path, DijkstraSearch,
        },
        end_condition::Exhaustive,
        path::{get_path, nodes_on_shortest_paths},
        predecessors::{AllPredecessorsMap, PredecessorMap},
    },
};

fn get_small_graph() -> VecVecGraph {
    // https://jlazarsfeld.github.io/ch.150.project/img/contraction/contract-full-1.png
    let mut graph = VecVecGraph::default();
    for (tail, head, weight) in [
        (0, 1, 3),
        (0, 2, 5),
        (0, 10, 3),
        (1, 2, 3),
        (1, 3, 5),
        (2, 3, 2),
        (2, 9, 2),
        (3, 4, 7),
        (3, 9, 4),
        (4, 5, 6),
        (4, 9, 3),
        (5, 6, 4),
        (5, 7, 2),
        (6, 7, 3),
        (6, 8, 5),
        (7, 8, 3),
        (7, 9, 2),
        (8, 9, 4),
        (8, 10, 6),
        (9, 10, 3),
    ] {
        graph.add_edge_bidirectional(&WeightedEdge::new(tail, head, weight));
    }
    graph
}

/// Five vertices with a long direct edge `0 -> 4` that is never the shortest
/// way.
fn decoy_neighbors(vertex: &u8) -> Vec<(u8, Distance)> {
    match vertex {
        0 => vec![(1, 4), (2, 1), (4, 10)],
        1 => vec![(3, 1)],
        2 => vec![(1, 2), (3, 5)],
        3 => vec![(4, 3)],
        _ => vec![],
    }
}

fn open_neighbors(grid: &Grid, point: Point) -> impl Iterator<Item = Neighbor<Point>> + '_ {
    grid.basic_neighbors(point)
        .filter(move |neighbor| grid.get(*neighbor) != Some(b'#'))
        .uniform_neighbors()
}

#[test]
fn single_source_distances() {
    let distances = shortest_distances([0u8], [], decoy_neighbors);

    assert_eq!(distances.len(), 5);
    assert_eq!(distances[&0], 0);
    assert_eq!(distances[&1], 3);
    assert_eq!(distances[&2], 1);
    assert_eq!(distances[&3], 4);
    assert_eq!(distances[&4], 7);
}

#[test]
fn small_graph_distances() {
    let graph = get_small_graph();
    let distances = shortest_distances([0], [], |vertex: &VertexId| graph.neighbors(*vertex));

    let expected = [0, 3, 5, 7, 9, 10, 11, 8, 9, 6, 3];
    for (vertex, distance) in expected.iter().enumerate() {
        assert_eq!(distances[&(vertex as VertexId)], *distance, "vertex {}", vertex);
    }
}

#[test]
fn multi_source_takes_nearest_start() {
    let graph = get_small_graph();
    let get_neighbors = |vertex: &VertexId| graph.neighbors(*vertex);

    let from_0 = shortest_distances([0], [], get_neighbors);
    let from_6 = shortest_distances([6], [], get_neighbors);
    let from_both = shortest_distances([0, 6], [], get_neighbors);

    for vertex in graph.vertices() {
        assert_eq!(from_both[&vertex], from_0[&vertex].min(from_6[&vertex]));
    }
    assert_eq!(from_both[&4], 8);
    assert_eq!(from_both[&6], 0);
}

#[test]
fn early_termination_matches_exhaustive_run() {
    let graph = get_small_graph();
    let get_neighbors = |vertex: &VertexId| graph.neighbors(*vertex);

    let exhaustive = shortest_distances([0], [], get_neighbors);

    let mut search = DijkstraSearch::new([0]);
    search.run(get_neighbors, |vertex: &VertexId| *vertex == 2, &mut ());
    assert_eq!(search.distance(&2), exhaustive.get(&2).copied());
    // 0, 1, 10 and 2 itself are finalized before the search stops
    assert_eq!(search.dijkstra_rank(), 4);
    assert!(!search.is_exhausted());
    assert!(search.distance(&6).is_none());
    assert!(search.frontier().contains(&3));
    assert!(!search.frontier().contains(&2));

    let targeted = shortest_distances([0], [2], get_neighbors);
    assert_eq!(targeted[&2], exhaustive[&2]);
    assert!(targeted.len() < exhaustive.len());
}

#[test]
fn stops_after_all_targets_are_finalized() {
    let graph = get_small_graph();
    let distances = shortest_distances([0], [9, 3, 9], |vertex: &VertexId| {
        graph.neighbors(*vertex)
    });

    assert_eq!(distances[&9], 6);
    assert_eq!(distances[&3], 7);
    assert!(distances.get(&6).is_none());
}

#[test]
fn target_equal_to_start() {
    let graph = get_small_graph();
    let mut search = DijkstraSearch::new([5]);
    search.run(
        |vertex: &VertexId| graph.neighbors(*vertex),
        |vertex: &VertexId| *vertex == 5,
        &mut (),
    );

    assert_eq!(search.dijkstra_rank(), 1);
    assert_eq!(search.distances().len(), 1);
    assert_eq!(shortest_distance(5, 5, |vertex: &VertexId| graph.neighbors(*vertex)), Some(0));
}

#[test]
fn relaxation_never_increases_a_distance() {
    let graph = get_small_graph();
    let mut get_neighbors = |vertex: &VertexId| graph.neighbors(*vertex);

    let mut search = DijkstraSearch::new([3]);
    let mut previous = search.distances().clone();
    while search.step(&mut get_neighbors, &mut ()).is_some() {
        for (vertex, distance) in search.distances() {
            if let Some(previous_distance) = previous.get(vertex) {
                assert!(distance <= previous_distance);
            }
        }
        assert!(previous.len() <= search.distances().len());
        previous = search.distances().clone();
    }

    assert_eq!(search.dijkstra_rank(), graph.number_of_vertices());
}

#[test]
fn finalized_distances_are_popped_in_order() {
    let graph = get_small_graph();
    let mut get_neighbors = |vertex: &VertexId| graph.neighbors(*vertex);

    let mut search = DijkstraSearch::new([0]);
    let mut last = 0;
    while let Some(element) = search.step(&mut get_neighbors, &mut ()) {
        assert!(last <= element.distance);
        assert_eq!(search.distance(&element.node), Some(element.distance));
        last = element.distance;
    }
}

#[test]
fn repeated_runs_are_identical() {
    let graph = get_small_graph();
    let run = || {
        let mut predecessors = PredecessorMap::new();
        let distances = shortest_distances_with_predecessors(
            [0, 8],
            [],
            |vertex: &VertexId| graph.neighbors(*vertex),
            &mut predecessors,
        );
        (distances, predecessors)
    };

    let (distances, predecessors) = run();
    let (distances_again, predecessors_again) = run();
    assert_eq!(distances, distances_again);
    assert_eq!(predecessors, predecessors_again);
}

#[test]
fn path_distance_is_sum_of_edges() {
    let graph = get_small_graph();
    let mut predecessors = PredecessorMap::new();
    let distances = shortest_distances_with_predecessors(
        [0],
        [],
        |vertex: &VertexId| graph.neighbors(*vertex),
        &mut predecessors,
    );

    for vertex in graph.vertices() {
        let path = get_path(&distances, &predecessors, &vertex).unwrap();
        assert_eq!(path.vertices.first(), Some(&0));
        assert_eq!(path.vertices.last(), Some(&vertex));

        let sum: Distance = path
            .vertices
            .windows(2)
            .map(|pair| graph.get_weight(pair[0], pair[1]).unwrap())
            .sum();
        assert_eq!(sum, distances[&vertex]);
        assert_eq!(path.distance, distances[&vertex]);
    }

    // the start itself has no predecessor
    let start = get_path(&distances, &predecessors, &0).unwrap();
    assert_eq!(start.vertices, vec![0]);
    assert_eq!(start.distance, 0);
}

#[test]
fn path_through_decoy_graph() {
    let path = shortest_path(0u8, 4, decoy_neighbors).unwrap();
    assert_eq!(path.vertices, vec![0, 2, 1, 3, 4]);
    assert_eq!(path.distance, 7);
}

#[test]
fn open_grid() {
    let grid = Grid::new(5, 5, b'.');
    let distance = shortest_distance(Point::new(0, 0), Point::new(4, 4), |point: &Point| {
        open_neighbors(&grid, *point)
    });

    assert_eq!(distance, Some(8));
}

#[test]
fn grid_maze_with_walls() {
    let maze: Grid = "\
.#...
.#.#.
.#.#.
.#.#.
...#.
"
    .parse()
    .unwrap();

    let path = shortest_path(Point::new(0, 0), Point::new(4, 4), |point: &Point| {
        open_neighbors(&maze, *point)
    })
    .unwrap();

    assert_eq!(path.distance, 16);
    assert_eq!(path.vertices.len(), 17);
    assert!(path
        .vertices
        .iter()
        .all(|point| maze.get(*point) == Some(b'.')));
}

#[test]
fn grid_maze_with_few_walls_keeps_manhattan_distance() {
    let maze: Grid = ".....\n.###.\n...#.\n.#...\n.#.#.\n".parse().unwrap();
    let distances = shortest_distances([Point::new(0, 0)], [], |point: &Point| {
        open_neighbors(&maze, *point)
    });

    let target = Point::new(4, 4);
    assert_eq!(distances[&target], Point::new(0, 0).manhattan_distance(&target));
    assert_eq!(distances.len(), 18);
}

#[test]
fn unreachable_target_is_absent() {
    let maze: Grid = ".....\n.###.\n...#.\n.####\n.#...\n".parse().unwrap();
    let start = Point::new(0, 0);
    let target = Point::new(4, 4);

    let distances = shortest_distances([start], [target], |point: &Point| {
        open_neighbors(&maze, *point)
    });
    assert!(distances.get(&target).is_none());
    assert_eq!(distances.len(), 13);

    let mut predecessors = PredecessorMap::new();
    let distances = shortest_distances_with_predecessors(
        [start],
        [target],
        |point: &Point| open_neighbors(&maze, *point),
        &mut predecessors,
    );
    assert!(get_path(&distances, &predecessors, &target).is_none());
    assert!(shortest_path(start, target, |point: &Point| open_neighbors(&maze, *point)).is_none());
}

#[test]
#[should_panic]
fn indexing_unreached_node_panics() {
    let graph = get_small_graph();
    // 11 does not exist, so it is never reached
    let distances = shortest_distances([0], [], |vertex: &VertexId| graph.neighbors(*vertex));
    assert!(distances[&11] > 0);
}

#[test]
fn disconnected_components() {
    let mut graph = get_small_graph();
    graph.add_edge_bidirectional(&WeightedEdge::new(20, 21, 1));

    let distances = shortest_distances([20], [], |vertex: &VertexId| graph.neighbors(*vertex));
    assert_eq!(distances.len(), 2);
    assert_eq!(distances[&21], 1);
    assert!(distances.get(&0).is_none());
    assert!(distances.get(&15).is_none());
}

#[test]
fn zero_weight_edges() {
    let neighbors = |vertex: &char| -> Vec<(char, Distance)> {
        match vertex {
            'a' => vec![('b', 0), ('c', 2)],
            'b' => vec![('c', 0), ('a', 0)],
            'c' => vec![('d', 1)],
            _ => vec![],
        }
    };

    let mut predecessors = PredecessorMap::new();
    let distances = shortest_distances_with_predecessors(['a'], [], neighbors, &mut predecessors);
    assert_eq!(distances[&'c'], 0);
    assert_eq!(distances[&'d'], 1);

    let path = get_path(&distances, &predecessors, &'d').unwrap();
    assert_eq!(path.vertices, vec!['a', 'b', 'c', 'd']);
}

#[test]
fn toggled_lights_as_bitmask() {
    // Pressing a button toggles the lights it is wired to.
    let machines: [(u16, &[&[u32]]); 3] = [
        (0b0110, &[&[3], &[1, 3], &[2], &[2, 3], &[0, 2], &[0, 1]]),
        (0b01000, &[&[0, 2, 3, 4], &[2, 3], &[0, 4], &[0, 1, 2], &[1, 2, 3, 4]]),
        (0b101110, &[&[0, 1, 2, 3, 4], &[0, 3, 4], &[0, 1, 2, 4, 5], &[1, 2]]),
    ];

    let presses: Vec<Distance> = machines
        .iter()
        .map(|(lights, buttons)| {
            let toggles: Vec<u16> = buttons
                .iter()
                .map(|button| button.iter().map(|light| 1u16 << light).sum())
                .collect();
            shortest_distance(0u16, *lights, |state: &u16| {
                toggles
                    .iter()
                    .map(|toggle| state ^ toggle)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .uniform_neighbors()
            })
            .unwrap()
        })
        .collect();

    assert_eq!(presses, vec![2, 3, 2]);
}

#[test]
fn climbing_heightmap() {
    let input = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi
";
    let mut heightmap: Grid = input.parse().unwrap();
    let start = heightmap.find(b'S').unwrap();
    let end = heightmap.find(b'E').unwrap();
    heightmap.set(start, b'a');
    heightmap.set(end, b'z');
    let heightmap = &heightmap;

    let climbable = |point: &Point| {
        let height = heightmap.get(*point).unwrap();
        heightmap
            .basic_neighbors(*point)
            .filter(|neighbor| heightmap.get(*neighbor).unwrap() <= height + 1)
            .collect::<Vec<_>>()
            .into_iter()
            .uniform_neighbors()
    };
    assert_eq!(shortest_distance(start, end, climbable), Some(31));

    // fewest steps from any lowest square
    let lowest: Vec<Point> = heightmap
        .positions()
        .filter(|point| heightmap.get(*point) == Some(b'a'))
        .collect();
    let distances = shortest_distances(lowest, [end], climbable);
    assert_eq!(distances[&end], 29);
}

fn maze_neighbors(maze: &Grid, arrow: &Arrow) -> Vec<Neighbor<Arrow>> {
    let mut neighbors = vec![
        Neighbor::new(arrow.turned_clockwise(), 1000),
        Neighbor::new(arrow.turned_anticlockwise(), 1000),
    ];
    let forward = arrow.forward();
    if maze.get(forward.position) != Some(b'#') {
        neighbors.push(Neighbor::new(forward, 1));
    }
    neighbors
}

#[test]
fn reindeer_maze_best_paths() {
    let maze: Grid = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
"
    .parse()
    .unwrap();
    let start = Arrow::new(maze.find(b'S').unwrap(), Facing::East);
    let end = maze.find(b'E').unwrap();

    // lowest score, stopping at the first arrow on the end tile
    let distances = shortest_distances_until(
        [start],
        |arrow: &Arrow| maze_neighbors(&maze, arrow),
        |arrow: &Arrow| arrow.position == end,
        &mut (),
    );
    let lowest = Facing::ALL
        .iter()
        .filter_map(|facing| distances.get(&Arrow::new(end, *facing)))
        .min()
        .copied();
    assert_eq!(lowest, Some(7036));

    // every tile on any of the best paths
    let mut predecessors = AllPredecessorsMap::new();
    let mut search = DijkstraSearch::new([start]);
    search.run(
        |arrow: &Arrow| maze_neighbors(&maze, arrow),
        Exhaustive,
        &mut predecessors,
    );
    let end_arrows: Vec<Arrow> = Facing::ALL
        .iter()
        .map(|facing| Arrow::new(end, *facing))
        .filter(|arrow| search.distance(arrow) == Some(7036))
        .collect();
    let tiles: ahash::HashSet<Point> = nodes_on_shortest_paths(&predecessors, end_arrows)
        .into_iter()
        .map(|arrow| arrow.position)
        .collect();
    assert_eq!(tiles.len(), 45);
}

#[test]
fn tuples_and_neighbors_are_interchangeable() {
    let as_tuples = shortest_distances([0u8], [], decoy_neighbors);
    let as_neighbors = shortest_distances([0u8], [], |vertex: &u8| {
        decoy_neighbors(vertex)
            .into_iter()
            .map(Neighbor::from)
            .collect::<Vec<_>>()
    });
    assert_eq!(as_tuples, as_neighbors);
}

#[test]
fn huge_weights_saturate() {
    let neighbors = |node: &char| -> Vec<(char, Distance)> {
        match node {
            'a' => vec![('b', 1), ('c', 5)],
            'b' => vec![('c', Distance::MAX), ('d', Distance::MAX)],
            _ => vec![],
        }
    };

    let distances = shortest_distances(['a'], [], neighbors);
    assert_eq!(distances[&'b'], 1);
    assert_eq!(distances[&'c'], 5);
    assert_eq!(distances[&'d'], Distance::MAX);
}
