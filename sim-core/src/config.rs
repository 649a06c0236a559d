use crate::error::{Error, Result};

/// Default lattice side length used by [`Config::default`].
pub const DEFAULT_SIZE: u32 = 41;

/// Default number of walk moves batched into one `step()` call before the
/// walk is considered "over budget".
pub const DEFAULT_WALK_BUDGET: u32 = 100;

/// Largest accepted lattice side length. Keeps the grid at most 1 GiB of
/// cells and every flat index inside `u32`.
pub const MAX_SIZE: u32 = 1024;

/// Construction parameters for an [`crate::engine::Engine`].
///
/// ### Fields
/// - `size` - Side length of the cubic lattice. Odd values keep the seed
///   cell exactly centered.
/// - `walk_budget` - Nominal batch size of a walk, in moves. It does not
///   change the walk: a call always keeps moving until the particle
///   freezes. Passing it only emits a `trace!` log line.
/// - `seed` - Optional RNG seed. `None` draws a seed from the thread RNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub size: u32,
    pub walk_budget: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            walk_budget: DEFAULT_WALK_BUDGET,
            seed: None,
        }
    }
}

impl Config {
    /// Returns a copy of `self` with a different lattice size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Returns a copy of `self` with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration describes a lattice that can be allocated.
    ///
    /// ### Errors
    /// - [`Error::InvalidSize`] if `size` is zero or above [`MAX_SIZE`].
    pub fn validate(&self) -> Result<()> {
        validate_size(self.size)
    }
}

pub(crate) fn validate_size(size: u32) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidSize("size must be > 0".into()));
    }
    if size > MAX_SIZE {
        return Err(Error::InvalidSize(format!(
            "size {size} is too large to allocate (max {MAX_SIZE})"
        )));
    }
    Ok(())
}
