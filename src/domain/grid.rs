use super::{Cell, LifeError};

/// Relative offsets of the 26 cells in the 3x3x3 Moore neighborhood.
const NEIGHBOR_OFFSETS: [(isize, isize, isize); 26] = {
    let mut offsets = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    offsets[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
};

/// Grid manages the cubic lattice of side `size`.
///
/// Two buffers are held: the committed generation every reader sees, and a
/// scratch buffer the engine fills with the next generation before
/// [`Grid::commit_scratch`] swaps it in. Cells are stored x-major, then y,
/// then z, which is also the scan order of every change record.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    committed: Vec<Cell>,
    scratch: Vec<Cell>,
}

/// Read-only view over one complete generation.
///
/// Neighbor counting goes through this view so that a step can read the
/// committed generation while it writes the scratch buffer.
#[derive(Clone, Copy, Debug)]
pub struct Generation<'a> {
    size: usize,
    cells: &'a [Cell],
}

impl<'a> Generation<'a> {
    /// Side length of the lattice
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Flat cell slice in x-major order
    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.size + y) * self.size + z
    }

    /// Cell at an in-range position
    #[inline]
    pub fn cell(&self, x: usize, y: usize, z: usize) -> Cell {
        self.cells[self.index(x, y, z)]
    }

    /// Wrap `coord + delta` onto [0, size)
    #[inline]
    fn wrap(&self, coord: usize, delta: isize) -> usize {
        let n = self.size as isize;
        (((coord as isize + delta) % n + n) % n) as usize
    }

    /// Count live cells among the 26 neighbors, each axis wrapping independently
    pub fn neighbor_count(&self, x: usize, y: usize, z: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy, dz)| {
                let nx = self.wrap(x, dx);
                let ny = self.wrap(y, dy);
                let nz = self.wrap(z, dz);
                self.cell(nx, ny, nz).weight()
            })
            .sum()
    }
}

impl Grid {
    /// Create a new grid with every cell dead.
    /// Panics when size³ overflows `usize`; use [`Grid::try_new`] for untrusted sizes.
    pub fn new(size: usize) -> Self {
        let volume = size
            .checked_mul(size)
            .and_then(|s| s.checked_mul(size))
            .unwrap_or_else(|| panic!("grid of side {size} has a volume overflowing usize"));
        Self {
            size,
            committed: vec![Cell::Dead; volume],
            scratch: vec![Cell::Dead; volume],
        }
    }

    /// Cell count of a cube of side `size`, rejecting zero or an overflowing volume
    pub fn checked_volume(size: usize) -> Result<usize, LifeError> {
        size.checked_mul(size)
            .and_then(|s| s.checked_mul(size))
            .filter(|&volume| volume > 0)
            .ok_or(LifeError::InvalidGridSize(size))
    }

    /// Create a new grid, rejecting a zero side length or an overflowing volume
    pub fn try_new(size: usize) -> Result<Self, LifeError> {
        Self::checked_volume(size)?;
        Ok(Self::new(size))
    }

    /// Side length of the cube
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (size³)
    pub fn volume(&self) -> usize {
        self.committed.len()
    }

    fn checked_index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < self.size && y < self.size && z < self.size,
            "cell ({x}, {y}, {z}) is out of bounds for a grid of side {}",
            self.size
        );
        (x * self.size + y) * self.size + z
    }

    /// Committed liveness at (x, y, z). Panics when out of bounds.
    pub fn is_alive(&self, x: usize, y: usize, z: usize) -> bool {
        self.committed[self.checked_index(x, y, z)].is_alive()
    }

    /// Set committed liveness at (x, y, z). Panics when out of bounds.
    pub fn set_alive(&mut self, x: usize, y: usize, z: usize, alive: bool) {
        let idx = self.checked_index(x, y, z);
        self.committed[idx] = Cell::from_alive(alive);
    }

    /// View of the committed generation
    pub fn generation(&self) -> Generation<'_> {
        Generation {
            size: self.size,
            cells: &self.committed,
        }
    }

    /// Live neighbor count in [0, 26] with toroidal wrapping.
    /// Panics when (x, y, z) is out of bounds.
    pub fn neighbor_count(&self, x: usize, y: usize, z: usize) -> u8 {
        self.checked_index(x, y, z);
        self.generation().neighbor_count(x, y, z)
    }

    /// Committed generation alongside the writable scratch buffer
    pub(crate) fn split_buffers(&mut self) -> (Generation<'_>, &mut [Cell]) {
        (
            Generation {
                size: self.size,
                cells: &self.committed,
            },
            self.scratch.as_mut_slice(),
        )
    }

    /// Replace the committed generation with the scratch buffer.
    ///
    /// The old committed buffer becomes the new scratch; its contents are
    /// stale and get fully overwritten by the next step.
    pub fn commit_scratch(&mut self) {
        std::mem::swap(&mut self.committed, &mut self.scratch);
    }

    /// Kill every cell in both buffers
    pub fn clear(&mut self) {
        self.committed.iter_mut().for_each(|cell| *cell = Cell::Dead);
        self.scratch.iter_mut().for_each(|cell| *cell = Cell::Dead);
    }

    /// Count alive cells in the committed generation
    pub fn population(&self) -> usize {
        self.committed.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Coordinates of every committed live cell, in scan order
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let n = self.size;
        self.committed
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(idx, _)| (idx / (n * n), (idx / n) % n, idx % n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.volume(), 64);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert_eq!(Grid::try_new(0).unwrap_err(), LifeError::InvalidGridSize(0));
        assert!(Grid::try_new(1).is_ok());
    }

    #[test]
    fn test_try_new_rejects_overflowing_size() {
        let size = 1usize << 22;
        assert_eq!(Grid::try_new(size).unwrap_err(), LifeError::InvalidGridSize(size));
        assert_eq!(
            Grid::checked_volume(usize::MAX),
            Err(LifeError::InvalidGridSize(usize::MAX))
        );
        assert_eq!(Grid::checked_volume(30), Ok(27_000));
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(5);
        grid.set_alive(1, 2, 3, true);
        assert!(grid.is_alive(1, 2, 3));
        assert!(!grid.is_alive(3, 2, 1));

        grid.set_alive(1, 2, 3, false);
        assert!(!grid.is_alive(1, 2, 3));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_is_alive_out_of_bounds_panics() {
        let grid = Grid::new(3);
        grid.is_alive(3, 0, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_alive_out_of_bounds_panics() {
        let mut grid = Grid::new(3);
        grid.set_alive(0, 0, 7, true);
    }

    #[test]
    fn test_neighbor_offsets_exclude_center() {
        assert!(!NEIGHBOR_OFFSETS.contains(&(0, 0, 0)));
        let mut unique = NEIGHBOR_OFFSETS.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 26);
    }

    #[test]
    fn test_interior_neighbor_count() {
        let mut grid = Grid::new(5);
        grid.set_alive(2, 2, 2, true);
        grid.set_alive(1, 2, 2, true);
        grid.set_alive(3, 3, 3, true);
        grid.set_alive(0, 0, 0, true); // not adjacent to (2, 2, 2)

        assert_eq!(grid.neighbor_count(2, 2, 2), 2);
        assert_eq!(grid.neighbor_count(2, 2, 3), 3);
    }

    #[test]
    fn test_full_block_counts_26() {
        let mut grid = Grid::new(5);
        for x in 1..4 {
            for y in 1..4 {
                for z in 1..4 {
                    grid.set_alive(x, y, z, true);
                }
            }
        }
        assert_eq!(grid.neighbor_count(2, 2, 2), 26);
    }

    #[test]
    fn test_wraparound_single_axis() {
        let mut grid = Grid::new(3);
        grid.set_alive(2, 0, 0, true);
        // (0,0,0) at offset (-1,0,0) reaches (2,0,0)
        assert_eq!(grid.neighbor_count(0, 0, 0), 1);
    }

    #[test]
    fn test_wraparound_corner_all_axes() {
        let mut grid = Grid::new(6);
        grid.set_alive(5, 5, 5, true);
        grid.set_alive(0, 5, 1, true);
        grid.set_alive(1, 0, 5, true);

        assert_eq!(grid.neighbor_count(0, 0, 0), 3);
        assert_eq!(grid.neighbor_count(5, 5, 5), 0);
        assert_eq!(grid.neighbor_count(4, 4, 4), 1);
    }

    /// Reference count taken by tiling the grid three times per axis.
    fn tiled_count(grid: &Grid, x: usize, y: usize, z: usize) -> u8 {
        let n = grid.size();
        let (tx, ty, tz) = (x + n, y + n, z + n);
        let mut count = 0;
        for ix in tx - 1..=tx + 1 {
            for iy in ty - 1..=ty + 1 {
                for iz in tz - 1..=tz + 1 {
                    if (ix, iy, iz) == (tx, ty, tz) {
                        continue;
                    }
                    if grid.is_alive(ix % n, iy % n, iz % n) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    #[test]
    fn test_boundary_faces_match_tiled_count() {
        let n = 4;
        let mut grid = Grid::new(n);
        for i in 0..40 {
            grid.set_alive((i * 3) % n, (i * 7) % n, (i * 5 + i / 4) % n, true);
        }

        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let on_face = [x, y, z].iter().any(|&c| c == 0 || c == n - 1);
                    if on_face {
                        assert_eq!(
                            grid.neighbor_count(x, y, z),
                            tiled_count(&grid, x, y, z),
                            "Mismatch at ({}, {}, {})", x, y, z
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_commit_scratch_swaps() {
        let mut grid = Grid::new(2);
        {
            let (_, scratch) = grid.split_buffers();
            scratch[0] = Cell::Alive;
        }
        assert!(!grid.is_alive(0, 0, 0));

        grid.commit_scratch();
        assert!(grid.is_alive(0, 0, 0));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_iter_alive_scan_order() {
        let mut grid = Grid::new(3);
        grid.set_alive(2, 0, 1, true);
        grid.set_alive(0, 1, 2, true);
        grid.set_alive(0, 1, 0, true);

        let alive: Vec<_> = grid.iter_alive().collect();
        assert_eq!(alive, vec![(0, 1, 0), (0, 1, 2), (2, 0, 1)]);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(3);
        grid.set_alive(1, 1, 1, true);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }
}
