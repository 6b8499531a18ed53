// Domain layer - Core simulation logic
pub mod domain;

// Application layer - Session coordination
pub mod application;

// Settings loaded by drivers
pub mod config;

// Re-exports for convenience
pub use application::Simulation;
pub use config::{ConfigError, SimConfig};
pub use domain::{
    Algorithm, Cell, CellChange, ChangeRecord, Grid, LifeError, Preset, PresetInitializer, Rule,
    RuleSet, SimulationEngine, Threshold, Transition,
};
