mod algorithm;
mod cell;
mod change;
mod engine;
mod error;
mod grid;
mod presets;
mod rules;

pub use algorithm::Algorithm;
pub use cell::Cell;
pub use change::{CellChange, ChangeRecord, Transition};
pub use engine::{EngineState, SimulationEngine};
pub use error::LifeError;
pub use grid::{Generation, Grid};
pub use presets::{DEFAULT_DENSITY, Preset, PresetInitializer};
pub use rules::{Rule, RuleSet, Threshold};

/// Size of the 3D Moore neighborhood, the largest possible neighbor count
pub const MAX_NEIGHBORS: u8 = 26;

/// Default side length of the cube
pub const DEFAULT_GRID_SIZE: usize = 30;
