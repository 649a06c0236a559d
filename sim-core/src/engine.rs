//! The lattice aggregation engine.
//!
//! One [`Engine`] owns a [`Lattice`], at most one walking particle, and the
//! terminal flag. A driving loop calls [`Engine::step`] once per tick:
//! 1. With no particle in flight, a new one is injected on a random face
//!    and the call returns `None`.
//! 2. With a particle in flight, it walks (wrapping at the faces) until
//!    one of its six neighbors is occupied, freezes there, and the call
//!    returns the frozen raw coordinate.
//! 3. Once a frozen particle touches the boundary, every later call
//!    returns `None`.

use crate::{
    config::Config,
    error::{Error, Result},
    lattice::Lattice,
    particle::{self, Direction},
    types::{CenteredPos, RawPos},
};
use glam::IVec3;
use log::{debug, info, trace, warn};
use rand::{Rng, SeedableRng, rng, rngs::StdRng};

#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    lattice: Lattice,
    margin: u32,
    active: Option<RawPos>,
    finished: bool,
    frozen: Vec<RawPos>,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine with an empty lattice of side `size` and default
    /// tuning.
    ///
    /// ### Errors
    /// - [`Error::InvalidSize`] if `size` is zero or too large.
    pub fn new(size: u32) -> Result<Self> {
        Self::with_config(Config::default().with_size(size))
    }

    /// Creates an engine from a full [`Config`].
    ///
    /// With `cfg.seed` set the whole growth sequence is reproducible.
    pub fn with_config(cfg: Config) -> Result<Self> {
        cfg.validate()?;
        let rng = match cfg.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rng().random()),
        };
        Ok(Self {
            lattice: Lattice::new(cfg.size)?,
            margin: cfg.size / 2,
            active: None,
            finished: false,
            frozen: Vec::new(),
            rng,
            cfg,
        })
    }

    /// Replaces the lattice with an empty one of side `size`.
    ///
    /// Growth history, the walking particle and the terminal flag are all
    /// discarded. The caller has to seed again before stepping.
    pub fn resize(&mut self, size: u32) -> Result<()> {
        let lattice = Lattice::new(size)?;
        info!("resizing lattice {} -> {}", self.cfg.size, size);
        self.cfg.size = size;
        self.lattice = lattice;
        self.margin = size / 2;
        self.active = None;
        self.finished = false;
        self.frozen.clear();
        Ok(())
    }

    /// Marks a cell occupied, given in centered coordinates.
    ///
    /// Intended for placing fixed seeds before growth starts.
    ///
    /// ### Errors
    /// - [`Error::OutOfBounds`] if `pos + margin` is outside the lattice.
    pub fn mark_occupied(&mut self, pos: CenteredPos) -> Result<()> {
        let raw = pos.wrapping_add(IVec3::splat(self.margin as i32));
        if !self.lattice.contains(raw) {
            return Err(Error::OutOfBounds(format!(
                "seed {pos} maps to {raw}, outside lattice of size {}",
                self.size()
            )));
        }
        self.lattice.occupy(raw.as_uvec3());
        Ok(())
    }

    /// Puts the walking particle at a raw position, replacing any particle
    /// already in flight.
    ///
    /// ### Errors
    /// - [`Error::OutOfBounds`] if `raw` is outside the lattice.
    pub fn inject_at(&mut self, raw: RawPos) -> Result<()> {
        if !self.lattice.contains(raw.as_ivec3()) {
            return Err(Error::OutOfBounds(format!(
                "particle {raw} outside lattice of size {}",
                self.size()
            )));
        }
        self.active = Some(raw);
        Ok(())
    }

    /// Advances the growth process.
    ///
    /// Returns the raw coordinate of the particle frozen during this call,
    /// or `None` if the call only injected a particle, the engine is
    /// finished, or there is nothing to stick to.
    ///
    /// A walking particle is moved until it freezes, so one call may run
    /// well past `walk_budget` moves. Every move picks one of the six
    /// directions uniformly and is followed at once by the contact test.
    pub fn step(&mut self) -> Option<RawPos> {
        if self.finished {
            return None;
        }

        let Some(mut pos) = self.active else {
            self.active = Some(particle::inject(self.size(), &mut self.rng));
            return None;
        };

        // Nothing to collide with, the walk would never end.
        if self.lattice.occupied_count() == 0 {
            warn!("step() on an empty lattice; seed a cell first");
            return None;
        }

        let size = self.size();
        let budget = u64::from(self.cfg.walk_budget);
        let mut moves: u64 = 0;
        loop {
            pos = Direction::random(&mut self.rng).step(pos, size);
            moves += 1;
            if moves == budget {
                trace!("walk passed its budget of {budget} moves at {pos}");
            }
            if self.lattice.has_occupied_neighbor(pos) {
                return Some(self.freeze(pos, moves));
            }
        }
    }

    fn freeze(&mut self, pos: RawPos, moves: u64) -> RawPos {
        self.lattice.occupy(pos);
        self.active = None;
        self.frozen.push(pos);
        debug!("froze particle at {pos} after {moves} moves");

        if self.lattice.touches_boundary(pos) {
            self.finished = true;
            info!(
                "aggregate reached the boundary at {pos}; {} cells occupied",
                self.lattice.occupied_count()
            );
        }
        pos
    }

    /// Converts a raw lattice coordinate to the centered caller space.
    #[inline]
    pub fn to_centered(&self, raw: RawPos) -> CenteredPos {
        raw.as_ivec3() - IVec3::splat(self.margin as i32)
    }

    #[inline]
    pub fn margin(&self) -> u32 {
        self.margin
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.lattice.size()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The particle currently walking, if any.
    #[inline]
    pub fn active(&self) -> Option<RawPos> {
        self.active
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn occupied_count(&self) -> usize {
        self.lattice.occupied_count()
    }

    /// Cells frozen by [`Engine::step`] since construction or the last
    /// resize, in order. Seeds are not included.
    pub fn frozen(&self) -> &[RawPos] {
        &self.frozen
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }
}
