//! Random-walker moves and boundary injection.

use crate::types::RawPos;
use glam::IVec3;
use rand::Rng;

/// One of the six axis-aligned unit directions.
///
/// Used both for walk moves and to pick the lattice face a new particle
/// enters through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Picks one of the six directions uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Axis index: 0 for x, 1 for y, 2 for z.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Direction::PosX | Direction::NegX => 0,
            Direction::PosY | Direction::NegY => 1,
            Direction::PosZ | Direction::NegZ => 2,
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::PosX | Direction::PosY | Direction::PosZ)
    }

    /// Unit offset along this direction.
    pub fn offset(self) -> IVec3 {
        let mut v = IVec3::ZERO;
        v[self.axis()] = if self.is_positive() { 1 } else { -1 };
        v
    }

    /// Moves `pos` one cell along this direction, wrapping modulo `size`.
    ///
    /// `pos` must already lie inside the lattice.
    pub fn step(self, pos: RawPos, size: u32) -> RawPos {
        let mut next = pos;
        let c = &mut next[self.axis()];
        *c = if self.is_positive() {
            if *c + 1 >= size { 0 } else { *c + 1 }
        } else if *c == 0 {
            size - 1
        } else {
            *c - 1
        };
        next
    }
}

/// Picks a starting cell for a new walker on the lattice boundary.
///
/// A face is chosen uniformly among the six, then the two free coordinates
/// are drawn uniformly over `[0, size)`. The result is biased towards
/// faces, not uniform over the boundary shell.
pub fn inject(size: u32, rng: &mut impl Rng) -> RawPos {
    let face = Direction::random(rng);
    let mut pos = RawPos::ZERO;
    for axis in 0..3 {
        pos[axis] = if axis == face.axis() {
            if face.is_positive() { size - 1 } else { 0 }
        } else {
            rng.random_range(0..size)
        };
    }
    pos
}
