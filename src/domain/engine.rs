//! One-generation update of the lattice.
//!
//! A step reads only the committed generation, writes every cell of the
//! scratch buffer, diffs the two and then commits. Nothing is published
//! until the commit, so an abandoned or panicking step leaves the committed
//! generation untouched.

use rayon::prelude::*;

use super::{Algorithm, Cell, CellChange, ChangeRecord, Generation, Grid, Rule, Transition};

/// Engine lifecycle. `step` is the only transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Stepping,
}

/// Drives generations on a caller-owned [`Grid`].
#[derive(Clone, Debug, Default)]
pub struct SimulationEngine {
    algorithm: Algorithm,
    state: EngineState,
    generation: u64,
}

impl SimulationEngine {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            state: EngineState::Idle,
            generation: 0,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of steps committed since construction or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Forget the generation counter, used when a preset re-seeds the grid
    pub fn reset(&mut self) {
        self.generation = 0;
        self.state = EngineState::Idle;
    }

    /// Advance `grid` by one generation under `rule`.
    ///
    /// Returns every cell whose state changed, in x-major scan order.
    ///
    /// # Panics
    /// If a previous step never finished (it unwound mid-step).
    pub fn step<R: Rule + ?Sized>(&mut self, grid: &mut Grid, rule: &R) -> ChangeRecord {
        assert_eq!(
            self.state,
            EngineState::Idle,
            "step() started while a previous step is still in progress"
        );
        self.state = EngineState::Stepping;

        let changes = match self.algorithm {
            Algorithm::Serial => step_serial(grid, rule),
            Algorithm::Parallel => step_parallel(grid, rule),
        };
        grid.commit_scratch();

        self.state = EngineState::Idle;
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            born = changes.born().count(),
            died = changes.died().count(),
            population = grid.population(),
            "step committed"
        );
        changes
    }
}

/// Fill one x-slab of the scratch buffer from the committed generation
fn compute_slab<R: Rule + ?Sized>(current: Generation<'_>, rule: &R, x: usize, slab: &mut [Cell]) {
    let n = current.size();
    for (i, next) in slab.iter_mut().enumerate() {
        let (y, z) = (i / n, i % n);
        *next = rule.evolve(current.cell(x, y, z), current.neighbor_count(x, y, z));
    }
}

/// Changes within one x-slab, in (y, z) order
fn diff_slab(x: usize, n: usize, before: &[Cell], after: &[Cell]) -> Vec<CellChange> {
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter_map(|(i, pair)| {
            let transition = match pair {
                (Cell::Dead, Cell::Alive) => Transition::Born,
                (Cell::Alive, Cell::Dead) => Transition::Died,
                _ => return None,
            };
            Some(CellChange::new(x, i / n, i % n, transition))
        })
        .collect()
}

fn step_serial<R: Rule + ?Sized>(grid: &mut Grid, rule: &R) -> ChangeRecord {
    let n = grid.size();
    let slab_len = n * n;
    if slab_len == 0 {
        return ChangeRecord::new();
    }
    let (current, scratch) = grid.split_buffers();

    scratch
        .chunks_mut(slab_len)
        .enumerate()
        .for_each(|(x, slab)| compute_slab(current, rule, x, slab));

    let changes = current
        .cells()
        .chunks(slab_len)
        .zip(scratch.chunks(slab_len))
        .enumerate()
        .flat_map(|(x, (before, after))| diff_slab(x, n, before, after))
        .collect();
    ChangeRecord::from_changes(changes)
}

fn step_parallel<R: Rule + ?Sized>(grid: &mut Grid, rule: &R) -> ChangeRecord {
    let n = grid.size();
    let slab_len = n * n;
    if slab_len == 0 {
        return ChangeRecord::new();
    }
    let (current, scratch) = grid.split_buffers();

    scratch
        .par_chunks_mut(slab_len)
        .enumerate()
        .for_each(|(x, slab)| compute_slab(current, rule, x, slab));

    // Indexed collect keeps slabs in x order regardless of completion order
    let slabs: Vec<Vec<CellChange>> = current
        .cells()
        .par_chunks(slab_len)
        .zip(scratch.par_chunks(slab_len))
        .enumerate()
        .map(|(x, (before, after))| diff_slab(x, n, before, after))
        .collect();
    ChangeRecord::from_changes(slabs.into_iter().flatten().collect())
}
