//! Cubic boolean occupancy grid.

use crate::config::validate_size;
use crate::error::Result;
use crate::particle::Direction;
use crate::types::RawPos;
use glam::IVec3;

/// A `size × size × size` grid of occupancy flags stored as one flat `Vec`.
///
/// Cells only ever go from unoccupied to occupied. Clearing happens by
/// building a new lattice.
#[derive(Clone, Debug)]
pub struct Lattice {
    size: u32,
    cells: Vec<bool>,
    occupied: usize,
}

impl Lattice {
    /// Allocates an all-unoccupied lattice.
    ///
    /// ### Errors
    /// - [`crate::error::Error::InvalidSize`] if `size` is zero or too large.
    pub fn new(size: u32) -> Result<Self> {
        validate_size(size)?;
        let side = size as usize;
        Ok(Self {
            size,
            cells: vec![false; side * side * side],
            occupied: 0,
        })
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of cells currently occupied.
    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Returns `true` if `pos` lies inside `[0, size)` on every axis.
    #[inline]
    pub fn contains(&self, pos: IVec3) -> bool {
        let s = self.size as i64;
        pos.to_array()
            .iter()
            .all(|&c| (0..s).contains(&(c as i64)))
    }

    /// Linear index of a raw coordinate; x varies fastest.
    ///
    /// ### Panics
    /// Panics if `pos` is outside the lattice.
    #[inline]
    pub fn index_of(&self, pos: RawPos) -> usize {
        let s = self.size;
        assert!(
            pos.x < s && pos.y < s && pos.z < s,
            "{pos} outside lattice of size {s}"
        );
        let s = s as usize;
        (pos.z as usize * s + pos.y as usize) * s + pos.x as usize
    }

    #[inline]
    pub fn is_occupied(&self, pos: RawPos) -> bool {
        self.cells[self.index_of(pos)]
    }

    /// Marks `pos` occupied. Returns `true` if the cell was previously free.
    pub fn occupy(&mut self, pos: RawPos) -> bool {
        let idx = self.index_of(pos);
        if self.cells[idx] {
            return false;
        }
        self.cells[idx] = true;
        self.occupied += 1;
        true
    }

    /// Returns `true` if any of the six face-adjacent cells is occupied.
    ///
    /// Neighbors are looked up without wraparound; a neighbor index that
    /// falls off the lattice counts as unoccupied.
    pub fn has_occupied_neighbor(&self, pos: RawPos) -> bool {
        let p = pos.as_ivec3();
        Direction::ALL.iter().any(|dir| {
            let n = p + dir.offset();
            self.contains(n) && self.cells[self.index_of(n.as_uvec3())]
        })
    }

    /// Returns `true` if any coordinate of `pos` is `0` or `size - 1`.
    pub fn touches_boundary(&self, pos: RawPos) -> bool {
        let last = self.size - 1;
        pos.to_array().iter().any(|&c| c == 0 || c == last)
    }

    /// Iterates over all occupied cells in index order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = RawPos> + '_ {
        let s = self.size as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| {
                RawPos::new((i % s) as u32, ((i / s) % s) as u32, (i / (s * s)) as u32)
            })
    }
}
