extern crate cavern_pathfinding;
use env_logger::Env;

use criterion::{criterion_group, criterion_main, Criterion};

use cavern_pathfinding::escape::brute_force;
use cavern_pathfinding::prelude::*;
use nanorand::{Rng, WyRand};
use std::time::Duration;

#[derive(Copy, Clone, Debug)]
pub struct Tile {
    cost: isize,
}

#[derive(Clone)]
struct Map {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Map {
    pub fn new(width: usize, height: usize) -> Self {
        let tile_count = width * height;
        Map {
            tiles: vec![Tile { cost: 1 }; tile_count],
            width,
            height,
        }
    }

    pub fn new_random(width: usize, height: usize) -> Self {
        let tile_count = width * height;
        let mut tiles = Vec::with_capacity(tile_count);
        let mut rng = WyRand::new_seed(4);
        for _ in 0..tile_count {
            tiles.push(Tile {
                cost: rng.generate_range(0..10usize) as isize - 1,
            });
        }
        // start and target are always open
        tiles[0].cost = 1;
        tiles[tile_count - 1].cost = 1;
        Map {
            tiles,
            width,
            height,
        }
    }

    fn get_tile_cost(&self, x: usize, y: usize) -> isize {
        let index = self.get_tile_index(x, y).unwrap();
        self.tiles[index].cost
    }

    fn get_tile_index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            // Index out of bounds
            return None;
        }

        Some(x + y * self.width)
    }

    fn open_neighbours(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut ret = Vec::with_capacity(4);
        if x > 0 {
            ret.push((x - 1, y));
        }
        if y > 0 {
            ret.push((x, y - 1));
        }
        if x + 1 < self.width {
            ret.push((x + 1, y));
        }
        if y + 1 < self.height {
            ret.push((x, y + 1));
        }
        ret.retain(|&(x, y)| self.get_tile_cost(x, y) >= 0);
        ret
    }

    /// A Cavern with a chamber on every open tile, the tile costs as weights and some gold
    fn to_cavern(&self) -> Cavern {
        let mut rng = WyRand::new_seed(7);
        let mut cavern = Cavern::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get_tile_cost(x, y) < 0 {
                    continue;
                }
                let gold = if rng.generate_range(0..5usize) == 0 {
                    rng.generate_range(1..50usize)
                } else {
                    0
                };
                cavern.add_node((x + y * self.width) as NodeId, gold);
            }
        }
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get_tile_cost(x, y) < 0 {
                    continue;
                }
                for (nx, ny) in self.open_neighbours(x, y) {
                    if (nx, ny) > (x, y) {
                        let weight = (self.get_tile_cost(x, y) + self.get_tile_cost(nx, ny)) / 2;
                        cavern.add_edge(
                            (x + y * self.width) as NodeId,
                            (nx + ny * self.width) as NodeId,
                            weight.max(1) as Cost,
                        );
                    }
                }
            }
        }
        cavern
    }
}

/// Walks through a Map from the top left to the bottom right corner
struct Walker<'a> {
    map: &'a Map,
    position: (usize, usize),
}

impl Walker<'_> {
    fn distance(&self, (x, y): (usize, usize)) -> Distance {
        ((self.map.width - 1 - x) + (self.map.height - 1 - y)) as Distance
    }
}

impl ExplorationFeed for Walker<'_> {
    fn current_location(&self) -> NodeId {
        (self.position.0 + self.position.1 * self.map.width) as NodeId
    }
    fn distance_to_target(&self) -> Distance {
        self.distance(self.position)
    }
    fn neighbours(&self) -> Vec<(NodeId, Distance)> {
        self.map
            .open_neighbours(self.position.0, self.position.1)
            .into_iter()
            .map(|pos| ((pos.0 + pos.1 * self.map.width) as NodeId, self.distance(pos)))
            .collect()
    }
    fn move_to(&mut self, id: NodeId) {
        let id = id as usize;
        self.position = (id % self.map.width, id / self.map.width);
    }
}

#[allow(unused)]
// Setup logging output
fn init() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "debug") // Change this from debug to trace to see every single step.
        .write_style_or("MY_LOG_STYLE", "always");

    env_logger::init_from_env(env);
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bench_explore(c: &mut Criterion) {
    let mut group = c.benchmark_group("Explore");

    // Log to stdout
    init();

    let map_sizes = [32, 128];

    for map_size in map_sizes {
        let (width, height) = (map_size, map_size);

        let map = Map::new(width, height);
        let id = format!("Explore, Uniform Map, Map Size: ({}, {})", width, height);
        group.bench_function(&id, |b| {
            b.iter(|| {
                let mut walker = Walker {
                    map: &map,
                    position: (0, 0),
                };
                Explorer::new(ExploreConfig::default()).explore(&mut walker)
            })
        });

        let map = Map::new_random(width, height);
        for (name, config) in [
            ("Default", ExploreConfig::default()),
            ("Greedy", ExploreConfig::GREEDY),
            ("Patient", ExploreConfig::PATIENT),
        ] {
            let id = format!(
                "Explore, Random Map, {} Config, Map Size: ({}, {})",
                name, width, height
            );
            group.bench_function(&id, |b| {
                b.iter(|| {
                    let mut walker = Walker {
                        map: &map,
                        position: (0, 0),
                    };
                    Explorer::new(config).explore(&mut walker)
                })
            });
        }
    }
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("Escape");

    let map_sizes = [16, 64];

    for map_size in map_sizes {
        let (width, height) = (map_size, map_size);
        let cavern = Map::new_random(width, height).to_cavern();
        let exit = (width * height - 1) as NodeId;

        let required = match find_escape_path(&cavern, 0, exit, 0, &EscapeConfig::default()) {
            Err(SearchError::BudgetTooSmall { required, .. }) => required,
            _ => continue,
        };

        for factor in [1, 2, 4] {
            let budget = required * factor;
            let id = format!(
                "Escape, Random Cavern, Budget: {}x, Map Size: ({}, {})",
                factor, width, height
            );
            group.bench_function(&id, |b| {
                b.iter(|| find_escape_path(&cavern, 0, exit, budget, &EscapeConfig::default()))
            });
        }
    }
}

fn bench_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("Brute Force");
    // every iteration may run until the deadline
    group.sample_size(10);

    let (width, height) = (5, 5);
    let cavern = Map::new_random(width, height).to_cavern();
    let exit = (width * height - 1) as NodeId;
    let required = match find_escape_path(&cavern, 0, exit, 0, &EscapeConfig::default()) {
        Err(SearchError::BudgetTooSmall { required, .. }) => required,
        _ => return,
    };
    let budget = required * 2;

    #[cfg(feature = "parallel")]
    {
        let id = format!(
            "Brute Force, Random Cavern, Parallel, Map Size: ({}, {})",
            width, height
        );
        group.bench_function(&id, |b| {
            b.iter(|| {
                brute_force::escape_with_deadline(
                    &cavern,
                    0,
                    exit,
                    budget,
                    Duration::from_millis(200),
                )
            })
        });
    }

    #[cfg(not(feature = "parallel"))]
    {
        let id = format!(
            "Brute Force, Random Cavern, Single Threaded, Map Size: ({}, {})",
            width, height
        );
        group.bench_function(&id, |b| {
            b.iter(|| {
                brute_force::escape_with_deadline(
                    &cavern,
                    0,
                    exit,
                    budget,
                    Duration::from_millis(200),
                )
            })
        });
    }
}

criterion_group!(benches, bench_explore, bench_escape, bench_brute_force);
criterion_main!(benches);
