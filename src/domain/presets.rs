//! Seeding strategies that populate an empty grid.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{CellChange, ChangeRecord, Grid, LifeError, Transition};

/// Default fraction of the volume picked by the Random preset
pub const DEFAULT_DENSITY: f64 = 0.05;

/// Named initial configurations, in preset-button order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Scatter `floor(density * N³)` picks uniformly, with replacement
    #[default]
    Random,
    /// Full x = 0 and x = N-1 faces
    TwoWalls,
    /// Solid block from the origin to a random corner
    WeirdCorners,
    /// Solid block covering [0, N/2)³
    Halfsies,
    /// Simplex region 0 <= k < j < i < N
    Triangular,
    /// Main diagonal (i, i, i)
    SingleBeam,
}

impl Preset {
    /// Get all available presets
    pub const ALL: [Preset; 6] = [
        Preset::Random,
        Preset::TwoWalls,
        Preset::WeirdCorners,
        Preset::Halfsies,
        Preset::Triangular,
        Preset::SingleBeam,
    ];

    /// Display name for preset buttons
    pub const fn name(self) -> &'static str {
        match self {
            Preset::Random => "Random",
            Preset::TwoWalls => "Two Walls",
            Preset::WeirdCorners => "Weird Corners",
            Preset::Halfsies => "Halfsies",
            Preset::Triangular => "Triangular",
            Preset::SingleBeam => "Single Beam",
        }
    }

    /// Preset at a button index
    pub fn from_index(index: usize) -> Result<Self, LifeError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| LifeError::UnknownPreset(index.to_string()))
    }

    /// Whether seeding draws from the random source
    pub const fn is_randomized(self) -> bool {
        matches!(self, Preset::Random | Preset::WeirdCorners)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = LifeError;

    /// Accepts the display name, the snake_case key or the button index
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if let Ok(index) = key.parse::<usize>() {
            return Self::from_index(index);
        }

        Self::ALL
            .into_iter()
            .find(|preset| {
                let name: String = preset
                    .name()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                name == key
            })
            .ok_or_else(|| LifeError::UnknownPreset(s.to_string()))
    }
}

/// Seeds grids from presets with its own random source.
///
/// Seed it with [`PresetInitializer::from_seed`] to make the randomized
/// presets reproducible.
#[derive(Clone, Debug)]
pub struct PresetInitializer {
    density: f64,
    rng: StdRng,
}

impl PresetInitializer {
    /// Initializer drawing its seed from the thread RNG
    pub fn new(density: f64) -> Result<Self, LifeError> {
        Self::from_seed(density, rand::random())
    }

    /// Initializer with a fixed seed
    pub fn from_seed(density: f64, seed: u64) -> Result<Self, LifeError> {
        if !density.is_finite() || !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidDensity(density));
        }
        Ok(Self {
            density,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub const fn density(&self) -> f64 {
        self.density
    }

    /// Clear `grid` and write `preset` into it.
    ///
    /// Only ever sets cells alive. Returns the seeded cells as Born entries
    /// in scan order so observers can build their initial scene.
    pub fn seed(&mut self, grid: &mut Grid, preset: Preset) -> ChangeRecord {
        grid.clear();
        let n = grid.size();

        match preset {
            Preset::Random => {
                let picks = (self.density * grid.volume() as f64).floor() as usize;
                if n > 0 {
                    for _ in 0..picks {
                        let x = self.rng.random_range(0..n);
                        let y = self.rng.random_range(0..n);
                        let z = self.rng.random_range(0..n);
                        grid.set_alive(x, y, z, true);
                    }
                }
            }
            Preset::TwoWalls => {
                for j in 0..n {
                    for k in 0..n {
                        grid.set_alive(0, j, k, true);
                        grid.set_alive(n - 1, j, k, true);
                    }
                }
            }
            Preset::WeirdCorners => {
                if n > 0 {
                    let rx = self.rng.random_range(0..n);
                    let ry = self.rng.random_range(0..n);
                    let rz = self.rng.random_range(0..n);
                    fill_block(grid, rx, ry, rz);
                }
            }
            Preset::Halfsies => {
                let half = n / 2;
                fill_block(grid, half, half, half);
            }
            Preset::Triangular => {
                for i in 0..n {
                    for j in 0..i {
                        for k in 0..j {
                            grid.set_alive(i, j, k, true);
                        }
                    }
                }
            }
            Preset::SingleBeam => {
                for i in 0..n {
                    grid.set_alive(i, i, i, true);
                }
            }
        }

        let seeded = ChangeRecord::from_changes(
            grid.iter_alive()
                .map(|(x, y, z)| CellChange::new(x, y, z, Transition::Born))
                .collect(),
        );
        tracing::info!(preset = %preset, size = n, alive = seeded.len(), "seeded grid");
        seeded
    }
}

/// Set alive every cell strictly below (rx, ry, rz)
fn fill_block(grid: &mut Grid, rx: usize, ry: usize, rz: usize) {
    for i in 0..rx {
        for j in 0..ry {
            for k in 0..rz {
                grid.set_alive(i, j, k, true);
            }
        }
    }
}
