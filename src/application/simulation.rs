use crate::config::SimConfig;
use crate::domain::{
    Algorithm, ChangeRecord, Grid, LifeError, Preset, PresetInitializer, Rule, RuleSet,
    SimulationEngine, Threshold,
};

/// Simulation orchestrates one session of the 3D automaton.
/// This is the application layer the presentation driver talks to: it owns
/// the grid, the live rule thresholds, the engine and the seeding source.
pub struct Simulation {
    grid: Grid,
    rules: RuleSet,
    engine: SimulationEngine,
    initializer: PresetInitializer,
    preset: Preset,
}

impl Simulation {
    /// Create a session from explicit parts and seed it with `preset`.
    ///
    /// Returns the session together with the seeded cells as Born entries.
    pub fn new(
        size: usize,
        rules: RuleSet,
        preset: Preset,
        initializer: PresetInitializer,
        algorithm: Algorithm,
    ) -> Result<(Self, ChangeRecord), LifeError> {
        let mut sim = Self {
            grid: Grid::try_new(size)?,
            rules,
            engine: SimulationEngine::new(algorithm),
            initializer,
            preset,
        };
        let seeded = sim.select_preset(preset);
        Ok((sim, seeded))
    }

    /// Create a session from validated settings
    pub fn from_config(config: &SimConfig) -> Result<(Self, ChangeRecord), LifeError> {
        config.validate()?;
        Self::new(
            config.grid_size,
            config.rules.to_rule_set()?,
            config.preset,
            config.initializer()?,
            config.algorithm,
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn algorithm(&self) -> Algorithm {
        self.engine.algorithm()
    }

    /// Fraction of the volume picked by the Random preset
    pub fn density(&self) -> f64 {
        self.initializer.density()
    }

    /// Generations stepped since the last seeding
    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    /// Advance one generation using the latest rule thresholds
    pub fn step(&mut self) -> ChangeRecord {
        self.engine.step(&mut self.grid, &self.rules)
    }

    /// Advance `count` generations, returning the last change record
    pub fn step_many(&mut self, count: usize) -> Option<ChangeRecord> {
        (0..count).map(|_| self.step()).last()
    }

    /// Update one rule threshold between steps
    pub fn set_rule(&mut self, threshold: Threshold, value: i64) -> Result<(), LifeError> {
        match self.rules.set(threshold, value) {
            Ok(()) => {
                tracing::info!(
                    threshold = threshold.name(),
                    value,
                    rules = %self.rules.description(),
                    "rule updated"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(threshold = threshold.name(), value, %err, "rule update rejected");
                Err(err)
            }
        }
    }

    /// Replace all four thresholds at once
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
        tracing::info!(rules = %self.rules.description(), "rules replaced");
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.engine.set_algorithm(algorithm);
    }

    /// Discard the current generation and re-seed with `preset`
    pub fn select_preset(&mut self, preset: Preset) -> ChangeRecord {
        self.preset = preset;
        self.engine.reset();
        self.initializer.seed(&mut self.grid, preset)
    }
}
