//! Compass directions and the wall bits guarding each tile edge.

use crate::flags::CollisionFlags;
use crate::geom::Point;

/// One of the eight compass directions a tile step can take.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Cardinal directions first, then diagonals. Searches expand in this
    /// order, which keeps straight moves ahead of diagonal ones at equal cost.
    pub const ALL: [Direction; 8] = [
        Direction::West,
        Direction::East,
        Direction::South,
        Direction::North,
        Direction::SouthWest,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    /// Position of this direction in [`ALL`](Self::ALL); usable as a bit index.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::West => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::North => 3,
            Direction::SouthWest => 4,
            Direction::SouthEast => 5,
            Direction::NorthWest => 6,
            Direction::NorthEast => 7,
        }
    }

    /// Unit step for this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::North => Point::new(0, 1),
            Direction::NorthEast => Point::new(1, 1),
            Direction::East => Point::new(1, 0),
            Direction::SouthEast => Point::new(1, -1),
            Direction::South => Point::new(0, -1),
            Direction::SouthWest => Point::new(-1, -1),
            Direction::West => Point::new(-1, 0),
            Direction::NorthWest => Point::new(-1, 1),
        }
    }

    /// Direction of a unit step, or `None` for zero or non-unit offsets.
    pub const fn from_offset(d: Point) -> Option<Direction> {
        match (d.x, d.z) {
            (0, 1) => Some(Direction::North),
            (1, 1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, -1) => Some(Direction::SouthEast),
            (0, -1) => Some(Direction::South),
            (-1, -1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, 1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// The direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let d = self.offset();
        d.x != 0 && d.z != 0
    }

    /// Wall bit on a tile blocking its edge (or corner) facing this direction.
    #[inline]
    pub const fn wall(self) -> CollisionFlags {
        match self {
            Direction::North => CollisionFlags::WALL_NORTH,
            Direction::NorthEast => CollisionFlags::WALL_NORTH_EAST,
            Direction::East => CollisionFlags::WALL_EAST,
            Direction::SouthEast => CollisionFlags::WALL_SOUTH_EAST,
            Direction::South => CollisionFlags::WALL_SOUTH,
            Direction::SouthWest => CollisionFlags::WALL_SOUTH_WEST,
            Direction::West => CollisionFlags::WALL_WEST,
            Direction::NorthWest => CollisionFlags::WALL_NORTH_WEST,
        }
    }

    /// The east/west and north/south components of a diagonal direction.
    ///
    /// Returns `None` for cardinal directions.
    pub const fn components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthEast => Some((Direction::East, Direction::North)),
            Direction::SouthEast => Some((Direction::East, Direction::South)),
            Direction::SouthWest => Some((Direction::West, Direction::South)),
            Direction::NorthWest => Some((Direction::West, Direction::North)),
            _ => None,
        }
    }
}
