use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::GraphError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    pub fn manhattan_distance(&self, other: &Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One of the four basic directions. Rows grow downwards, so north is `y - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facing {
    East,
    North,
    West,
    South,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::East, Facing::North, Facing::West, Facing::South];

    pub fn offset(self) -> Point {
        match self {
            Facing::East => Point::new(1, 0),
            Facing::North => Point::new(0, -1),
            Facing::West => Point::new(-1, 0),
            Facing::South => Point::new(0, 1),
        }
    }

    pub fn clockwise(self) -> Facing {
        match self {
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
            Facing::North => Facing::East,
        }
    }

    pub fn anticlockwise(self) -> Facing {
        match self {
            Facing::East => Facing::North,
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
        }
    }
}

/// A position together with the direction it is being left in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Arrow {
    pub position: Point,
    pub facing: Facing,
}

impl Arrow {
    pub fn new(position: Point, facing: Facing) -> Arrow {
        Arrow { position, facing }
    }

    pub fn forward(&self) -> Arrow {
        Arrow::new(self.position + self.facing.offset(), self.facing)
    }

    pub fn turned_clockwise(&self) -> Arrow {
        Arrow::new(self.position, self.facing.clockwise())
    }

    pub fn turned_anticlockwise(&self) -> Arrow {
        Arrow::new(self.position, self.facing.anticlockwise())
    }
}

/// Rectangular map of ASCII cells, stored row by row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    pub fn new(width: usize, height: usize, fill: u8) -> Grid {
        Grid {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        (0..self.width as i32).contains(&point.x) && (0..self.height as i32).contains(&point.y)
    }

    pub fn get(&self, point: Point) -> Option<u8> {
        self.index(point).map(|index| self.cells[index])
    }

    /// Overwrites a cell. Points outside the grid are ignored.
    pub fn set(&mut self, point: Point, value: u8) {
        if let Some(index) = self.index(point) {
            self.cells[index] = value;
        }
    }

    /// First cell (in row order) holding `value`.
    pub fn find(&self, value: u8) -> Option<Point> {
        self.cells
            .iter()
            .position(|&cell| cell == value)
            .map(|index| self.point(index))
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.cells.len()).map(|index| self.point(index))
    }

    /// The up to four in-bounds points next to `point`.
    pub fn basic_neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        Facing::ALL
            .into_iter()
            .map(move |facing| point + facing.offset())
            .filter(|neighbor| self.contains(*neighbor))
    }

    fn index(&self, point: Point) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        Some(point.y as usize * self.width + point.x as usize)
    }

    fn point(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }
}

impl FromStr for Grid {
    type Err = GraphError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&[u8]> = input
            .lines()
            .map(|line| line.trim_end().as_bytes())
            .filter(|line| !line.is_empty())
            .collect();

        let width = rows.first().map(|row| row.len()).ok_or(GraphError::EmptyGrid)?;
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            if line.len() != width {
                return Err(GraphError::RaggedRow {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            cells.extend_from_slice(line);
        }

        Ok(Grid {
            width,
            height: rows.len(),
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_four_times_is_identity() {
        for facing in Facing::ALL {
            let mut clockwise = facing;
            let mut anticlockwise = facing;
            for _ in 0..4 {
                clockwise = clockwise.clockwise();
                anticlockwise = anticlockwise.anticlockwise();
            }
            assert_eq!(clockwise, facing);
            assert_eq!(anticlockwise, facing);
            assert_eq!(facing.clockwise().anticlockwise(), facing);
        }
    }

    #[test]
    fn corner_has_two_neighbors() {
        let grid = Grid::new(3, 2, b'.');
        let neighbors: Vec<Point> = grid.basic_neighbors(Point::new(0, 0)).collect();
        assert_eq!(neighbors, vec![Point::new(1, 0), Point::new(0, 1)]);
        assert_eq!(grid.basic_neighbors(Point::new(1, 1)).count(), 3);
    }

    #[test]
    fn arrow_moves_forward() {
        let arrow = Arrow::new(Point::new(2, 2), Facing::North);
        assert_eq!(arrow.forward().position, Point::new(2, 1));
        assert_eq!(arrow.turned_clockwise().forward().position, Point::new(3, 2));
        assert_eq!(arrow.position.manhattan_distance(&Point::new(-1, 4)), 5);
    }

    #[test]
    fn find_and_set() {
        let mut grid: Grid = "#.\n.S\n".parse().unwrap();
        let start = grid.find(b'S').unwrap();
        assert_eq!(start, Point::new(1, 1));

        grid.set(start, b'.');
        grid.set(Point::new(5, 5), b'#');
        assert_eq!(grid.find(b'S'), None);
        assert_eq!(grid.get(Point::new(-1, 0)), None);
        assert_eq!(grid.to_string(), "#.\n..\n");
    }
}
